use axum::{extract::State, http::StatusCode};
use models::client;
use serde::Deserialize;
use service::client::ClientWithPets;
use service::pet::NewPet;

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::routes::auth::ServerState;

#[derive(Debug, Deserialize)]
pub struct CreateClientInput {
    #[serde(default, alias = "nome")]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "telefone")]
    pub phone: String,
    #[serde(default)]
    pub pets: Vec<NewPet>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateClientInput {
    #[serde(alias = "nome")]
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(alias = "telefone")]
    pub phone: Option<String>,
}

#[utoipa::path(
    post, path = "/clientes", tag = "clientes",
    request_body = crate::openapi::CreateClientInputDoc,
    responses((status = 201, description = "Client created with its pets"), (status = 400, description = "Validation Error"))
)]
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<CreateClientInput>,
) -> Result<(StatusCode, ApiJson<ClientWithPets>), JsonApiError> {
    let created = state.clients.create(&input.name, &input.email, &input.phone, input.pets).await?;
    Ok((StatusCode::CREATED, ApiJson(created)))
}

#[utoipa::path(get, path = "/clientes", tag = "clientes", responses((status = 200, description = "All clients")))]
pub async fn list(State(state): State<ServerState>) -> Result<ApiJson<Vec<client::Model>>, JsonApiError> {
    Ok(ApiJson(state.clients.list().await?))
}

#[utoipa::path(
    get, path = "/clientes/{id}", tag = "clientes",
    params(("id" = i32, Path, description = "Client id")),
    responses((status = 200, description = "Found"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<ApiJson<client::Model>, JsonApiError> {
    Ok(ApiJson(state.clients.get(id).await?))
}

#[utoipa::path(
    put, path = "/clientes/{id}", tag = "clientes",
    params(("id" = i32, Path, description = "Client id")),
    request_body = crate::openapi::UpdateClientInputDoc,
    responses((status = 200, description = "Updated"), (status = 400, description = "Validation Error"), (status = 404, description = "Not Found"))
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<UpdateClientInput>,
) -> Result<ApiJson<client::Model>, JsonApiError> {
    let updated = state
        .clients
        .update(id, input.name.as_deref(), input.email.as_deref(), input.phone.as_deref())
        .await?;
    Ok(ApiJson(updated))
}

#[utoipa::path(
    delete, path = "/clientes/{id}", tag = "clientes",
    params(("id" = i32, Path, description = "Client id")),
    responses((status = 204, description = "Deleted with pets and history"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<StatusCode, JsonApiError> {
    state.clients.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
