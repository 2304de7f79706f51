use std::{
    ops::Range,
    path::{Path, PathBuf},
    sync::Arc,
};

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

use crate::{Employee, Page};

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("failed to read employee seed {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("employee seed {} is not a valid record list", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Shared handle to the in-memory employee list.
///
/// Clones point at the same list. Reads share the lock; [`Directory::append`]
/// is the only writer.
#[derive(Clone, Debug, Default)]
pub struct Directory {
    employees: Arc<RwLock<Vec<Employee>>>,
}

impl Directory {
    pub fn new(employees: Vec<Employee>) -> Self {
        Self {
            employees: Arc::new(RwLock::new(employees)),
        }
    }

    /// Load the seed file, a JSON array of employee records.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| DirectoryError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let employees: Vec<Employee> =
            serde_json::from_slice(&bytes).map_err(|source| DirectoryError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), count = employees.len(), "employee seed parsed");
        Ok(Self::new(employees))
    }

    pub async fn len(&self) -> usize {
        self.employees.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.employees.read().await.is_empty()
    }

    pub async fn all(&self) -> Vec<Employee> {
        self.employees.read().await.clone()
    }

    /// Records in `range`, clamped to the current length.
    pub async fn slice(&self, range: Range<usize>) -> Vec<Employee> {
        let employees = self.employees.read().await;
        let end = range.end.min(employees.len());
        let start = range.start.min(end);
        employees[start..end].to_vec()
    }

    pub async fn page(&self, page: Page) -> Vec<Employee> {
        let employees = self.employees.read().await;
        employees[page.bounds(employees.len())].to_vec()
    }

    /// The record with the highest age; the earliest one wins a tie.
    ///
    /// Records whose age is not a number rank below every numeric age.
    pub async fn oldest(&self) -> Option<Employee> {
        self.employees
            .read()
            .await
            .iter()
            .reduce(|oldest, employee| {
                if employee.age_years() > oldest.age_years() {
                    employee
                } else {
                    oldest
                }
            })
            .cloned()
    }

    pub async fn with_privileges(&self, level: &str) -> Vec<Employee> {
        self.filtered(|employee| employee.has_privileges(level)).await
    }

    pub async fn with_badge(&self, badge: &str) -> Vec<Employee> {
        self.filtered(|employee| employee.has_badge(badge)).await
    }

    /// First record whose name matches exactly (case-sensitive).
    pub async fn find_by_name(&self, name: &str) -> Option<Employee> {
        self.employees
            .read()
            .await
            .iter()
            .find(|employee| employee.has_name(name))
            .cloned()
    }

    /// Append a record and return the new length.
    pub async fn append(&self, employee: Employee) -> usize {
        let mut employees = self.employees.write().await;
        employees.push(employee);
        employees.len()
    }

    async fn filtered(&self, keep: impl Fn(&Employee) -> bool) -> Vec<Employee> {
        self.employees
            .read()
            .await
            .iter()
            .filter(|employee| keep(employee))
            .cloned()
            .collect()
    }
}
