use std::path::PathBuf;

use anyhow::{Result, anyhow};
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

pub const DEFAULT_SEED_PATH: &str = "data/employees.json";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub seed_path: PathBuf,
    pub cors: CorsSettings,
}

/// Browser access rules. No origins means any origin may call the API.
#[derive(Clone, Debug)]
pub struct CorsSettings {
    pub allowed_origins: Vec<HeaderValue>,
    pub allowed_methods: Vec<Method>,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            allowed_methods: vec![Method::GET, Method::POST],
        }
    }
}

impl CorsSettings {
    pub fn layer(&self) -> CorsLayer {
        let allow_origin = if self.allowed_origins.is_empty() {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(self.allowed_origins.clone())
        };
        CorsLayer::new()
            .allow_headers([header::CONTENT_TYPE])
            .allow_methods(self.allowed_methods.clone())
            .allow_origin(allow_origin)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let seed_path = lookup("EMPLOYEES_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SEED_PATH));

        let allowed_origins = comma_list(lookup("CORS_ALLOWED_ORIGINS"))
            .into_iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .map_err(|_| anyhow!("invalid CORS origin {origin:?}"))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut cors = CorsSettings {
            allowed_origins,
            ..CorsSettings::default()
        };
        let methods = comma_list(lookup("CORS_ALLOWED_METHODS"))
            .into_iter()
            .map(|method| {
                method
                    .to_ascii_uppercase()
                    .parse::<Method>()
                    .map_err(|_| anyhow!("invalid CORS method {method:?}"))
            })
            .collect::<Result<Vec<_>>>()?;
        if !methods.is_empty() {
            cors.allowed_methods = methods;
        }

        Ok(Self { seed_path, cors })
    }

    /// Prefer an explicit `--data` path over the environment.
    pub fn with_seed_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.seed_path = path;
        }
        self
    }
}

fn comma_list(raw: Option<String>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
