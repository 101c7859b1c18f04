use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use entity::department;
use platform_api::{ApiError, ApiResponse, ApiResult, Payload};
use products_hr::{
    DepartmentInput, DepartmentRepository, EmployeeRepository, validate_department,
};
use serde::Serialize;
use tracing::{info, instrument};

use super::parse_id;
use crate::http::AppState;

const NOT_FOUND: &str = "Department not found";
const STILL_ASSIGNED: &str = "Department is still assigned to employees";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/newDepartmentCode", get(next_code))
        .route("/{id}", get(get_one).put(update).delete(remove))
}

#[derive(Serialize)]
struct DepartmentMeta {
    department: department::Model,
}

#[derive(Serialize)]
struct DepartmentsMeta {
    departments: Vec<department::Model>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DepartmentCodeMeta {
    department_code: String,
}

#[instrument(name = "http.departments.list", skip_all)]
async fn list(State(state): State<AppState>) -> ApiResult<ApiResponse<DepartmentsMeta>> {
    let departments = DepartmentRepository::new(&state.pool).list_all().await?;
    Ok(ApiResponse::ok(
        "Departments fetched successfully",
        DepartmentsMeta { departments },
    ))
}

#[instrument(name = "http.departments.next_code", skip_all)]
async fn next_code(State(state): State<AppState>) -> ApiResult<ApiResponse<DepartmentCodeMeta>> {
    let department_code = DepartmentRepository::new(&state.pool).next_code().await?;
    Ok(ApiResponse::ok(
        "New department code generated",
        DepartmentCodeMeta { department_code },
    ))
}

#[instrument(name = "http.departments.get", skip_all)]
async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<DepartmentMeta>> {
    let id = parse_id(&id)?;
    let department = DepartmentRepository::new(&state.pool)
        .get_by_id(id)
        .await?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;
    Ok(ApiResponse::ok(
        "Department fetched successfully",
        DepartmentMeta { department },
    ))
}

#[instrument(name = "http.departments.create", skip_all)]
async fn create(
    State(state): State<AppState>,
    Payload(input): Payload<DepartmentInput>,
) -> ApiResult<ApiResponse<DepartmentMeta>> {
    let repo = DepartmentRepository::new(&state.pool);
    validate_department(&input, &repo, None)
        .await?
        .into_result()?;
    let department = repo.insert(input).await?;
    info!(id = %department.department_id, code = %department.department_code, "department created");
    let location = format!("/api/v1/departments/{}", department.department_id);
    Ok(ApiResponse::created(
        "Department created successfully",
        DepartmentMeta { department },
        location,
    ))
}

#[instrument(name = "http.departments.update", skip_all)]
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(input): Payload<DepartmentInput>,
) -> ApiResult<ApiResponse<()>> {
    let id = parse_id(&id)?;
    let repo = DepartmentRepository::new(&state.pool);
    let existing = repo
        .get_by_id(id)
        .await?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;
    validate_department(&input, &repo, Some(id))
        .await?
        .into_result()?;
    repo.update(existing, input).await?;
    info!(%id, "department updated");
    Ok(ApiResponse::message("Department updated successfully"))
}

#[instrument(name = "http.departments.delete", skip_all)]
async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    let id = parse_id(&id)?;
    let repo = DepartmentRepository::new(&state.pool);
    if repo.get_by_id(id).await?.is_none() {
        return Err(ApiError::NotFound(NOT_FOUND));
    }
    let assigned = EmployeeRepository::new(&state.pool).count_in_department(id).await?;
    if assigned > 0 {
        return Err(ApiError::bad_request(STILL_ASSIGNED));
    }
    repo.delete(id).await?;
    info!(%id, "department deleted");
    Ok(ApiResponse::message("Department deleted successfully"))
}
