//! HR vertical slice: departments, positions and employees.
//!
//! The crate owns everything between the HTTP handlers and the database:
//! request payloads, validation rules, code generation and the repositories.

pub mod code;
pub mod input;
pub mod lookup;
pub mod query;
pub mod repository;
pub mod validate;

pub use code::{CodeError, CodeKind, next_code};
pub use input::{DepartmentInput, EmployeeInput, PositionInput};
pub use lookup::Lookup;
pub use query::{EmployeeFiltered, EmployeeQueryParams, Page};
pub use repository::{DepartmentRepository, EmployeeRepository, PositionRepository, RepoError};
pub use validate::{EmployeeValidator, validate_department, validate_position};
