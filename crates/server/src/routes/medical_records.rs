use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use serde::Deserialize;
use service::medical_record::{AppendRequest, MedicalRecord, RecordChanges};
use service::upload::{IncomingFile, StoredFile};

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiMultipart, ApiPath};
use crate::routes::auth::ServerState;

#[derive(Debug, Deserialize)]
pub struct AppendInput {
    #[serde(default, alias = "data")]
    pub date: String,
    #[serde(default, rename = "type", alias = "tipo")]
    pub kind: String,
    #[serde(default, alias = "descricao")]
    pub description: String,
    #[serde(default, alias = "responsavel")]
    pub responsible: String,
    #[serde(default, alias = "arquivos")]
    pub files: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateInput {
    #[serde(default, alias = "responsavel")]
    pub responsible: Option<String>,
    #[serde(default, alias = "data")]
    pub date: Option<String>,
    #[serde(default, rename = "type", alias = "tipo")]
    pub kind: Option<String>,
    #[serde(default, alias = "descricao")]
    pub description: Option<String>,
    #[serde(default, alias = "arquivos")]
    pub files: Option<Vec<String>>,
}

/// Every file field of a multipart body, in order.
pub(crate) async fn collect_files(mut multipart: Multipart) -> Result<Vec<IncomingFile>, JsonApiError> {
    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        let Some(original_name) = field.file_name().map(str::to_string) else { continue };
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;
        files.push(IncomingFile { original_name, content_type, bytes: bytes.to_vec() });
    }
    Ok(files)
}

#[utoipa::path(
    get, path = "/prontuarios/{pet_id}", tag = "prontuarios",
    params(("pet_id" = i32, Path, description = "Pet id")),
    responses((status = 200, description = "History, newest first"), (status = 404, description = "Pet not found"))
)]
pub async fn list_for_pet(
    State(state): State<ServerState>,
    ApiPath(pet_id): ApiPath<i32>,
) -> Result<ApiJson<Vec<MedicalRecord>>, JsonApiError> {
    Ok(ApiJson(state.records.list_for_pet(pet_id).await?))
}

#[utoipa::path(
    post, path = "/prontuarios/{pet_id}/historico", tag = "prontuarios",
    params(("pet_id" = i32, Path, description = "Pet id")),
    request_body = crate::openapi::AppendInputDoc,
    responses(
        (status = 201, description = "Entry appended"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Pet not found")
    )
)]
pub async fn append(
    State(state): State<ServerState>,
    ApiPath(pet_id): ApiPath<i32>,
    ApiJson(input): ApiJson<AppendInput>,
) -> Result<(StatusCode, ApiJson<MedicalRecord>), JsonApiError> {
    let req = AppendRequest {
        date: input.date,
        kind: input.kind,
        description: input.description,
        responsible: input.responsible,
        files: input.files,
    };
    let created = state.records.append(pet_id, req).await?;
    Ok((StatusCode::CREATED, ApiJson(created)))
}

#[utoipa::path(
    post, path = "/prontuarios/{pet_id}/arquivos", tag = "prontuarios",
    params(("pet_id" = i32, Path, description = "Pet id")),
    responses(
        (status = 201, description = "Stored file references"),
        (status = 400, description = "Unexpected file type"),
        (status = 404, description = "Pet not found")
    )
)]
pub async fn upload_documents(
    State(state): State<ServerState>,
    ApiPath(pet_id): ApiPath<i32>,
    ApiMultipart(multipart): ApiMultipart,
) -> Result<(StatusCode, ApiJson<Vec<StoredFile>>), JsonApiError> {
    let files = collect_files(multipart).await?;
    let stored = state.records.store_documents(pet_id, &files).await?;
    Ok((StatusCode::CREATED, ApiJson(stored)))
}

#[utoipa::path(
    get, path = "/prontuarios/historico/{id}", tag = "prontuarios",
    params(("id" = i32, Path, description = "Entry id")),
    responses((status = 200, description = "Found"), (status = 404, description = "Not Found"))
)]
pub async fn get(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<ApiJson<MedicalRecord>, JsonApiError> {
    Ok(ApiJson(state.records.get(id).await?))
}

#[utoipa::path(
    put, path = "/prontuarios/historico/{id}", tag = "prontuarios",
    params(("id" = i32, Path, description = "Entry id")),
    request_body = crate::openapi::UpdateRecordInputDoc,
    responses(
        (status = 200, description = "Responsible party changed"),
        (status = 400, description = "Immutable field in body"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<UpdateInput>,
) -> Result<ApiJson<MedicalRecord>, JsonApiError> {
    let changes = RecordChanges {
        responsible: input.responsible,
        date: input.date,
        kind: input.kind,
        description: input.description,
        files: input.files,
    };
    Ok(ApiJson(state.records.update(id, changes).await?))
}

#[utoipa::path(
    delete, path = "/prontuarios/historico/{id}", tag = "prontuarios",
    params(("id" = i32, Path, description = "Entry id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, JsonApiError> {
    state.records.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
