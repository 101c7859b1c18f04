//! Storage models for the organization directory.

pub mod department;
pub mod employee;
pub mod position;

pub mod prelude {
    pub use super::department::Entity as Department;
    pub use super::employee::Entity as Employee;
    pub use super::position::Entity as Position;
}
