//! Field rules for incoming payloads.
//!
//! Every field is checked independently. Within a field the rules run in order and
//! stop at the first failure, so a blank code is reported as blank only.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use once_cell::sync::Lazy;
use platform_api::FieldErrors;
use regex::Regex;
use sea_orm::DbErr;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    code::CodeKind,
    input::{DepartmentInput, EmployeeInput, PositionInput},
    lookup::Lookup,
};

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").expect("email pattern")
});

struct CodeRule {
    kind: CodeKind,
    field: &'static str,
    blank: &'static str,
    invalid: &'static str,
    taken: &'static str,
}

const DEPARTMENT_CODE: CodeRule = CodeRule {
    kind: CodeKind::Department,
    field: "departmentCode",
    blank: "Department code must not be empty",
    invalid: "Department code is invalid",
    taken: "Department code already exists",
};

const POSITION_CODE: CodeRule = CodeRule {
    kind: CodeKind::Position,
    field: "positionCode",
    blank: "Position code must not be empty",
    invalid: "Position code is invalid",
    taken: "Position code already exists",
};

const EMPLOYEE_CODE: CodeRule = CodeRule {
    kind: CodeKind::Employee,
    field: "employeeCode",
    blank: "Employee code must not be empty",
    invalid: "Employee code is invalid",
    taken: "Employee code already exists",
};

impl CodeRule {
    async fn check(
        &self,
        errors: &mut FieldErrors,
        code: &str,
        store: &dyn Lookup,
        except: Option<Uuid>,
    ) -> Result<(), DbErr> {
        if is_blank(code) {
            errors.add(self.field, self.blank);
        } else if !self.kind.is_valid(code) {
            errors.add(self.field, self.invalid);
        } else if store.code_exists(code, except).await? {
            errors.add(self.field, self.taken);
        }
        Ok(())
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn require(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
    if is_blank(value) {
        errors.add(field, message);
    }
}

/// A date is in the past when its first instant (UTC) is strictly before `now`.
fn before(date: NaiveDate, now: DateTime<Utc>) -> bool {
    date.and_time(NaiveTime::MIN).and_utc() < now
}

/// `except` is the id being updated; its own code does not count as taken.
#[instrument(name = "validate.department", skip_all)]
pub async fn validate_department(
    input: &DepartmentInput,
    departments: &dyn Lookup,
    except: Option<Uuid>,
) -> Result<FieldErrors, DbErr> {
    let mut errors = FieldErrors::new();
    DEPARTMENT_CODE
        .check(&mut errors, &input.department_code, departments, except)
        .await?;
    require(
        &mut errors,
        "departmentName",
        &input.department_name,
        "Department name must not be empty",
    );
    Ok(errors)
}

#[instrument(name = "validate.position", skip_all)]
pub async fn validate_position(
    input: &PositionInput,
    positions: &dyn Lookup,
    except: Option<Uuid>,
) -> Result<FieldErrors, DbErr> {
    let mut errors = FieldErrors::new();
    POSITION_CODE
        .check(&mut errors, &input.position_code, positions, except)
        .await?;
    require(
        &mut errors,
        "positionName",
        &input.position_name,
        "Position name must not be empty",
    );
    Ok(errors)
}

/// Employee rules need three stores: their own codes plus the referenced
/// departments and positions.
pub struct EmployeeValidator<'a> {
    pub employees: &'a dyn Lookup,
    pub departments: &'a dyn Lookup,
    pub positions: &'a dyn Lookup,
}

impl EmployeeValidator<'_> {
    #[instrument(name = "validate.employee", skip_all)]
    pub async fn validate(
        &self,
        input: &EmployeeInput,
        except: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Result<FieldErrors, DbErr> {
        let mut errors = FieldErrors::new();
        EMPLOYEE_CODE
            .check(&mut errors, &input.employee_code, self.employees, except)
            .await?;
        require(
            &mut errors,
            "fullName",
            &input.full_name,
            "Full name must not be empty",
        );
        if is_blank(&input.email) {
            errors.add("email", "Email must not be empty");
        } else if !EMAIL.is_match(input.email.trim()) {
            errors.add("email", "Email is invalid");
        }
        require(
            &mut errors,
            "phoneNumber",
            &input.phone_number,
            "Phone number must not be empty",
        );
        require(
            &mut errors,
            "identityNumber",
            &input.identity_number,
            "Identity number must not be empty",
        );
        check_reference(
            &mut errors,
            "departmentId",
            input.department_id,
            self.departments,
            ("Department must not be empty", "Department does not exist"),
        )
        .await?;
        check_reference(
            &mut errors,
            "positionId",
            input.position_id,
            self.positions,
            ("Position must not be empty", "Position does not exist"),
        )
        .await?;
        if input.date_of_birth.is_some_and(|date| !before(date, now)) {
            errors.add("dateOfBirth", "Date of birth is invalid");
        }
        if input.identity_date.is_some_and(|date| !before(date, now)) {
            errors.add("identityDate", "Identity date is invalid");
        }
        Ok(errors)
    }
}

async fn check_reference(
    errors: &mut FieldErrors,
    field: &str,
    id: Option<Uuid>,
    store: &dyn Lookup,
    (missing, unknown): (&str, &str),
) -> Result<(), DbErr> {
    match id.filter(|id| !id.is_nil()) {
        None => errors.add(field, missing),
        Some(id) if !store.id_exists(id).await? => errors.add(field, unknown),
        Some(_) => {}
    }
    Ok(())
}
