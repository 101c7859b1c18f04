use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use entity::position;
use platform_api::{ApiError, ApiResponse, ApiResult, Payload};
use products_hr::{EmployeeRepository, PositionInput, PositionRepository, validate_position};
use serde::Serialize;
use tracing::{info, instrument};

use super::parse_id;
use crate::http::AppState;

const NOT_FOUND: &str = "Position not found";
const STILL_ASSIGNED: &str = "Position is still assigned to employees";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/newPositionCode", get(next_code))
        .route("/{id}", get(get_one).put(update).delete(remove))
}

#[derive(Serialize)]
struct PositionMeta {
    position: position::Model,
}

#[derive(Serialize)]
struct PositionsMeta {
    positions: Vec<position::Model>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PositionCodeMeta {
    position_code: String,
}

#[instrument(name = "http.positions.list", skip_all)]
async fn list(State(state): State<AppState>) -> ApiResult<ApiResponse<PositionsMeta>> {
    let positions = PositionRepository::new(&state.pool).list_all().await?;
    Ok(ApiResponse::ok(
        "Positions fetched successfully",
        PositionsMeta { positions },
    ))
}

#[instrument(name = "http.positions.next_code", skip_all)]
async fn next_code(State(state): State<AppState>) -> ApiResult<ApiResponse<PositionCodeMeta>> {
    let position_code = PositionRepository::new(&state.pool).next_code().await?;
    Ok(ApiResponse::ok(
        "New position code generated",
        PositionCodeMeta { position_code },
    ))
}

#[instrument(name = "http.positions.get", skip_all)]
async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<PositionMeta>> {
    let id = parse_id(&id)?;
    let position = PositionRepository::new(&state.pool)
        .get_by_id(id)
        .await?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;
    Ok(ApiResponse::ok(
        "Position fetched successfully",
        PositionMeta { position },
    ))
}

#[instrument(name = "http.positions.create", skip_all)]
async fn create(
    State(state): State<AppState>,
    Payload(input): Payload<PositionInput>,
) -> ApiResult<ApiResponse<PositionMeta>> {
    let repo = PositionRepository::new(&state.pool);
    validate_position(&input, &repo, None)
        .await?
        .into_result()?;
    let position = repo.insert(input).await?;
    info!(id = %position.position_id, code = %position.position_code, "position created");
    let location = format!("/api/v1/positions/{}", position.position_id);
    Ok(ApiResponse::created(
        "Position created successfully",
        PositionMeta { position },
        location,
    ))
}

#[instrument(name = "http.positions.update", skip_all)]
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(input): Payload<PositionInput>,
) -> ApiResult<ApiResponse<()>> {
    let id = parse_id(&id)?;
    let repo = PositionRepository::new(&state.pool);
    let existing = repo
        .get_by_id(id)
        .await?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;
    validate_position(&input, &repo, Some(id))
        .await?
        .into_result()?;
    repo.update(existing, input).await?;
    info!(%id, "position updated");
    Ok(ApiResponse::message("Position updated successfully"))
}

#[instrument(name = "http.positions.delete", skip_all)]
async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    let id = parse_id(&id)?;
    let repo = PositionRepository::new(&state.pool);
    if repo.get_by_id(id).await?.is_none() {
        return Err(ApiError::NotFound(NOT_FOUND));
    }
    let assigned = EmployeeRepository::new(&state.pool).count_in_position(id).await?;
    if assigned > 0 {
        return Err(ApiError::bad_request(STILL_ASSIGNED));
    }
    repo.delete(id).await?;
    info!(%id, "position deleted");
    Ok(ApiResponse::message("Position deleted successfully"))
}
