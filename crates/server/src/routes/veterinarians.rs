use axum::{extract::State, http::StatusCode};
use models::veterinarian;
use serde::Deserialize;

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::routes::auth::ServerState;

#[derive(Debug, Deserialize)]
pub struct VeterinarianInput {
    #[serde(default, alias = "nome")]
    pub name: String,
}

#[utoipa::path(
    post, path = "/veterinarios", tag = "veterinarios",
    request_body = crate::openapi::VeterinarianInputDoc,
    responses((status = 201, description = "Created"), (status = 400, description = "Validation Error"))
)]
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<VeterinarianInput>,
) -> Result<(StatusCode, ApiJson<veterinarian::Model>), JsonApiError> {
    let created = state.veterinarians.create(&input.name).await?;
    Ok((StatusCode::CREATED, ApiJson(created)))
}

#[utoipa::path(get, path = "/veterinarios", tag = "veterinarios", responses((status = 200, description = "All veterinarians")))]
pub async fn list(State(state): State<ServerState>) -> Result<ApiJson<Vec<veterinarian::Model>>, JsonApiError> {
    Ok(ApiJson(state.veterinarians.list().await?))
}

#[utoipa::path(
    get, path = "/veterinarios/{id}", tag = "veterinarios",
    params(("id" = i32, Path, description = "Veterinarian id")),
    responses((status = 200, description = "Found"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<ApiJson<veterinarian::Model>, JsonApiError> {
    Ok(ApiJson(state.veterinarians.get(id).await?))
}

#[utoipa::path(
    put, path = "/veterinarios/{id}", tag = "veterinarios",
    params(("id" = i32, Path, description = "Veterinarian id")),
    request_body = crate::openapi::VeterinarianInputDoc,
    responses((status = 200, description = "Updated"), (status = 404, description = "Not Found"))
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<VeterinarianInput>,
) -> Result<ApiJson<veterinarian::Model>, JsonApiError> {
    Ok(ApiJson(state.veterinarians.update(id, &input.name).await?))
}

#[utoipa::path(
    delete, path = "/veterinarios/{id}", tag = "veterinarios",
    params(("id" = i32, Path, description = "Veterinarian id")),
    responses((status = 204, description = "Deleted; appointments are unassigned"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<StatusCode, JsonApiError> {
    state.veterinarians.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
