use axum::{extract::State, http::StatusCode};
use models::pet;
use serde::Deserialize;
use service::pet::{NewPet, PetDraft, PhotoView};

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiMultipart, ApiPath, ApiQuery};
use crate::routes::auth::ServerState;
use crate::routes::medical_records::collect_files;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    pub client_id: Option<i32>,
}

#[utoipa::path(
    post, path = "/pets", tag = "pets",
    request_body = crate::openapi::CreatePetInputDoc,
    responses((status = 201, description = "Created"), (status = 400, description = "Validation Error"), (status = 404, description = "Client not found"))
)]
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(draft): ApiJson<PetDraft>,
) -> Result<(StatusCode, ApiJson<pet::Model>), JsonApiError> {
    let created = state.pets.create_draft(draft).await?;
    Ok((StatusCode::CREATED, ApiJson(created)))
}

#[utoipa::path(get, path = "/pets", tag = "pets", params(ListQuery), responses((status = 200, description = "Pets")))]
pub async fn list(
    State(state): State<ServerState>,
    ApiQuery(q): ApiQuery<ListQuery>,
) -> Result<ApiJson<Vec<pet::Model>>, JsonApiError> {
    Ok(ApiJson(state.pets.list(q.client_id).await?))
}

#[utoipa::path(
    get, path = "/pets/{id}", tag = "pets",
    params(("id" = i32, Path, description = "Pet id")),
    responses((status = 200, description = "Found"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<ApiJson<pet::Model>, JsonApiError> {
    Ok(ApiJson(state.pets.get(id).await?))
}

#[utoipa::path(
    put, path = "/pets/{id}", tag = "pets",
    params(("id" = i32, Path, description = "Pet id")),
    request_body = crate::openapi::PetInputDoc,
    responses((status = 200, description = "Updated"), (status = 400, description = "Validation Error"), (status = 404, description = "Not Found"))
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<NewPet>,
) -> Result<ApiJson<pet::Model>, JsonApiError> {
    Ok(ApiJson(state.pets.update(id, input).await?))
}

#[utoipa::path(
    delete, path = "/pets/{id}", tag = "pets",
    params(("id" = i32, Path, description = "Pet id")),
    responses((status = 204, description = "Deleted with its history"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<StatusCode, JsonApiError> {
    state.pets.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Multipart photo upload; the first file field is used.
#[utoipa::path(
    post, path = "/pets/{id}/fotos", tag = "pets",
    params(("id" = i32, Path, description = "Pet id")),
    responses(
        (status = 201, description = "Photo stored"),
        (status = 400, description = "Not a PNG/JPG file"),
        (status = 404, description = "Pet not found")
    )
)]
pub async fn upload_photo(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i32>,
    ApiMultipart(multipart): ApiMultipart,
) -> Result<(StatusCode, ApiJson<PhotoView>), JsonApiError> {
    let files = collect_files(multipart).await?;
    let Some(file) = files.first() else {
        return Err(JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", vec!["no file received".into()]));
    };
    let photo = state.pets.attach_photo(id, file).await?;
    Ok((StatusCode::CREATED, ApiJson(photo)))
}

#[utoipa::path(
    get, path = "/pets/{id}/fotos", tag = "pets",
    params(("id" = i32, Path, description = "Pet id")),
    responses((status = 200, description = "Photos"), (status = 404, description = "Pet not found"))
)]
pub async fn photos(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<ApiJson<Vec<PhotoView>>, JsonApiError> {
    Ok(ApiJson(state.pets.photos(id).await?))
}
