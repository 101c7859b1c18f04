//! One repository per table. Each borrows the pool for the lifetime of a request
//! and runs one or two statements per call, without transactions.

mod department;
mod employee;
mod position;

pub use department::DepartmentRepository;
pub use employee::EmployeeRepository;
pub use position::PositionRepository;

use platform_api::ApiError;
use sea_orm::DbErr;
use thiserror::Error;

use crate::code::CodeError;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Db(#[from] DbErr),
    #[error(transparent)]
    Code(#[from] CodeError),
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        ApiError::internal(value)
    }
}
