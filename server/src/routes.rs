//! Route table and request handlers for the employee directory.
//!
//! Routes are declared most specific first. `/api/employees/{name}` matches
//! any single segment under `/api/employees`, so it stays at the end of the
//! table and every fixed segment must be registered ahead of it.
//!
//! Every path also answers with one trailing slash.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    routing::{MethodRouter, get},
};
use platform_api::{ApiError, ApiResult};
use products_hr::{Directory, Employee, Page, PageError, USER_PRIVILEGE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

use crate::http::AppState;

pub const EMPLOYEE_CREATED: &str = "¡Nuevo empleado agregado con éxito!";

const FIRST_WINDOW: std::ops::Range<usize> = 0..2;
const SECOND_WINDOW: std::ops::Range<usize> = 2..4;

type Employees = Json<Vec<Employee>>;

/// Ordered `(path, handlers)` pairs, most specific first.
pub fn routes() -> Vec<(&'static str, MethodRouter<AppState>)> {
    vec![
        ("/health", get(health)),
        ("/api/employees", get(list_employees).post(create_employee)),
        ("/api/employees/page1", get(first_window)),
        ("/api/employees/page2", get(second_window)),
        ("/employees", get(page_from_query)),
        ("/employees/{page}", get(page_from_path)),
        ("/api/employees/oldest", get(oldest_employee)),
        ("/api/employees/user", get(user_employees)),
        ("/api/employees/badges/{badge}", get(employees_with_badge)),
        ("/api/employees/{name}", get(employee_by_name)),
    ]
}

pub fn router() -> Router<AppState> {
    routes()
        .into_iter()
        .fold(Router::new(), |router, (path, handlers)| {
            let slashed = format!("{path}/");
            router.route(&slashed, handlers.clone()).route(path, handlers)
        })
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    employees: usize,
    version: &'static str,
}

#[derive(Serialize)]
struct Acknowledgement {
    message: &'static str,
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    page: Option<String>,
}

async fn health(State(directory): State<Directory>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        employees: directory.len().await,
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[instrument(name = "employees.list", skip_all)]
async fn list_employees(State(directory): State<Directory>) -> Employees {
    Json(directory.all().await)
}

#[instrument(name = "employees.page1", skip_all)]
async fn first_window(State(directory): State<Directory>) -> Employees {
    Json(directory.slice(FIRST_WINDOW).await)
}

#[instrument(name = "employees.page2", skip_all)]
async fn second_window(State(directory): State<Directory>) -> Employees {
    Json(directory.slice(SECOND_WINDOW).await)
}

#[instrument(name = "employees.page_query", skip_all)]
async fn page_from_query(
    State(directory): State<Directory>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Employees> {
    let Query(query) = query.map_err(ApiError::bad_request)?;
    let page = query
        .page
        .as_deref()
        .ok_or(PageError::Missing)
        .and_then(str::parse::<Page>)
        .map_err(ApiError::bad_request)?;
    Ok(Json(directory.page(page).await))
}

#[instrument(name = "employees.page_path", skip_all)]
async fn page_from_path(
    State(directory): State<Directory>,
    page: Result<Path<String>, PathRejection>,
) -> ApiResult<Employees> {
    let Path(raw) = page.map_err(ApiError::bad_request)?;
    let page = raw.parse::<Page>().map_err(ApiError::bad_request)?;
    Ok(Json(directory.page(page).await))
}

#[instrument(name = "employees.oldest", skip_all)]
async fn oldest_employee(State(directory): State<Directory>) -> ApiResult<Json<Employee>> {
    directory.oldest().await.map(Json).ok_or(ApiError::NotFound)
}

/// Query flags such as `?user=true` are accepted and ignored.
#[instrument(name = "employees.users", skip_all)]
async fn user_employees(State(directory): State<Directory>) -> Employees {
    Json(directory.with_privileges(USER_PRIVILEGE).await)
}

#[instrument(name = "employees.by_badge", skip(directory))]
async fn employees_with_badge(
    State(directory): State<Directory>,
    Path(badge): Path<String>,
) -> Employees {
    Json(directory.with_badge(&badge).await)
}

#[instrument(name = "employees.by_name", skip(directory))]
async fn employee_by_name(
    State(directory): State<Directory>,
    Path(name): Path<String>,
) -> ApiResult<Json<Employee>> {
    directory
        .find_by_name(&name)
        .await
        .map(Json)
        .ok_or(ApiError::NotFound)
}

#[instrument(name = "employees.create", skip_all)]
async fn create_employee(
    State(directory): State<Directory>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Acknowledgement>> {
    let Json(body) = payload.map_err(ApiError::bad_request)?;
    let employee = Employee::from_submission(body).map_err(ApiError::bad_request)?;
    let name = employee.name.clone();
    let employees = directory.append(employee).await;
    info!(%name, employees, "employee added");
    Ok(Json(Acknowledgement {
        message: EMPLOYEE_CREATED,
    }))
}

async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}
