use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use chrono::Utc;
use entity::employee;
use platform_api::{ApiError, ApiResponse, ApiResult, Payload, QueryParams};
use products_hr::{
    DepartmentRepository, EmployeeFiltered, EmployeeInput, EmployeeQueryParams,
    EmployeeRepository, EmployeeValidator, PositionRepository,
};
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use super::parse_id;
use crate::http::AppState;

const NOT_FOUND: &str = "Employee not found";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/filter", get(filter))
        .route("/newEmployeeCode", get(next_code))
        .route("/{id}", get(get_one).put(update).delete(remove))
}

#[derive(Serialize)]
struct EmployeeMeta {
    employee: employee::Model,
}

#[derive(Serialize)]
struct EmployeesMeta {
    employees: Vec<employee::Model>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmployeeCodeMeta {
    employee_code: String,
}

#[instrument(name = "http.employees.list", skip_all)]
async fn list(State(state): State<AppState>) -> ApiResult<ApiResponse<EmployeesMeta>> {
    let employees = EmployeeRepository::new(&state.pool).list_all().await?;
    Ok(ApiResponse::ok(
        "Employees fetched successfully",
        EmployeesMeta { employees },
    ))
}

/// Rejects the nil id and non-positive paging values before touching storage.
fn check_filter(params: &EmployeeQueryParams) -> Result<(), ApiError> {
    if params.department_id.is_some_and(|id| id.is_nil()) {
        return Err(ApiError::bad_request("Please select a valid department"));
    }
    if params.position_id.is_some_and(|id| id.is_nil()) {
        return Err(ApiError::bad_request("Please select a valid position"));
    }
    if params.page_size.is_some_and(|size| size <= 0) {
        return Err(ApiError::bad_request("Please select a valid page size"));
    }
    if params.page_number.is_some_and(|number| number <= 0) {
        return Err(ApiError::bad_request("Please select a valid page number"));
    }
    Ok(())
}

#[instrument(name = "http.employees.filter", skip_all)]
async fn filter(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<EmployeeQueryParams>,
) -> ApiResult<ApiResponse<EmployeeFiltered>> {
    check_filter(&params)?;
    let page = EmployeeRepository::new(&state.pool)
        .list_filtered(&params)
        .await?;
    Ok(ApiResponse::ok("Employees fetched successfully", page))
}

#[instrument(name = "http.employees.next_code", skip_all)]
async fn next_code(State(state): State<AppState>) -> ApiResult<ApiResponse<EmployeeCodeMeta>> {
    let employee_code = EmployeeRepository::new(&state.pool).next_code().await?;
    Ok(ApiResponse::ok(
        "New employee code generated",
        EmployeeCodeMeta { employee_code },
    ))
}

#[instrument(name = "http.employees.get", skip_all)]
async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<EmployeeMeta>> {
    let id = parse_id(&id)?;
    let employee = EmployeeRepository::new(&state.pool)
        .get_by_id(id)
        .await?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;
    Ok(ApiResponse::ok(
        "Employee fetched successfully",
        EmployeeMeta { employee },
    ))
}

async fn validate(
    state: &AppState,
    input: &EmployeeInput,
    except: Option<Uuid>,
) -> Result<(), ApiError> {
    let employees = EmployeeRepository::new(&state.pool);
    let departments = DepartmentRepository::new(&state.pool);
    let positions = PositionRepository::new(&state.pool);
    let validator = EmployeeValidator {
        employees: &employees,
        departments: &departments,
        positions: &positions,
    };
    let errors = validator.validate(input, except, Utc::now()).await?;
    Ok(errors.into_result()?)
}

#[instrument(name = "http.employees.create", skip_all)]
async fn create(
    State(state): State<AppState>,
    Payload(input): Payload<EmployeeInput>,
) -> ApiResult<ApiResponse<EmployeeMeta>> {
    validate(&state, &input, None).await?;
    let employee = EmployeeRepository::new(&state.pool).insert(input).await?;
    info!(id = %employee.employee_id, code = %employee.employee_code, "employee created");
    let location = format!("/api/v1/employees/{}", employee.employee_id);
    Ok(ApiResponse::created(
        "Employee created successfully",
        EmployeeMeta { employee },
        location,
    ))
}

#[instrument(name = "http.employees.update", skip_all)]
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(input): Payload<EmployeeInput>,
) -> ApiResult<ApiResponse<()>> {
    let id = parse_id(&id)?;
    let repo = EmployeeRepository::new(&state.pool);
    let existing = repo
        .get_by_id(id)
        .await?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;
    validate(&state, &input, Some(id)).await?;
    repo.update(existing, input).await?;
    info!(%id, "employee updated");
    Ok(ApiResponse::message("Employee updated successfully"))
}

#[instrument(name = "http.employees.delete", skip_all)]
async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    let id = parse_id(&id)?;
    let repo = EmployeeRepository::new(&state.pool);
    if repo.get_by_id(id).await?.is_none() {
        return Err(ApiError::NotFound(NOT_FOUND));
    }
    repo.delete(id).await?;
    info!(%id, "employee deleted");
    Ok(ApiResponse::message("Employee deleted successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_checks_reject_sentinels_and_non_positive_paging() {
        let nil_department = EmployeeQueryParams {
            department_id: Some(Uuid::nil()),
            ..Default::default()
        };
        assert_eq!(
            check_filter(&nil_department).unwrap_err().to_string(),
            "Please select a valid department"
        );
        let zero_size = EmployeeQueryParams {
            page_size: Some(0),
            ..Default::default()
        };
        assert_eq!(
            check_filter(&zero_size).unwrap_err().to_string(),
            "Please select a valid page size"
        );
        let negative_page = EmployeeQueryParams {
            page_number: Some(-1),
            ..Default::default()
        };
        assert!(check_filter(&negative_page).is_err());
        assert!(check_filter(&EmployeeQueryParams::default()).is_ok());
    }
}
