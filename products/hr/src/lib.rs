//! HR employee directory.
//!
//! The directory is an append-only, insertion-ordered list of [`Employee`]
//! records seeded from a JSON file at startup. Callers share it through the
//! cloneable [`Directory`] handle.

mod directory;
mod employee;
mod page;

pub use directory::{Directory, DirectoryError};
pub use employee::{Employee, REQUIRED_FIELDS, USER_PRIVILEGE, ValidationError};
pub use page::{Page, PageError, WINDOW_SIZE};
