use axum::{extract::State, http::StatusCode};
use models::appointment::{self, AppointmentStatus};
use serde::Deserialize;
use serde_json::Value;
use service::appointment::{AppointmentFilter, ScheduleDraft};
use service::errors::ServiceError;
use service::input;
use tracing::info;

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::routes::auth::ServerState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Inclusive lower bound: RFC 3339 instant or `YYYY-MM-DD`.
    pub from: Option<String>,
    /// Inclusive upper bound: RFC 3339 instant or `YYYY-MM-DD` (whole day).
    pub to: Option<String>,
    /// `clinico` or `petshop`.
    pub service_line: Option<String>,
    pub pet_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct StatusInput {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub status: Option<Value>,
}

impl StatusInput {
    fn parse(&self) -> Result<(i32, AppointmentStatus), ServiceError> {
        let mut errors = Vec::new();
        let id = input::required_id("id", self.id.as_ref()).map_err(|e| errors.push(e)).ok();
        let status = match input::required_text("status", self.status.as_ref()) {
            Ok(raw) => match raw.parse::<AppointmentStatus>() {
                Ok(status) => Some(status),
                Err(e) => {
                    errors.extend(ServiceError::from(e).into_messages());
                    None
                }
            },
            Err(e) => {
                errors.push(e);
                None
            }
        };
        match (id, status) {
            (Some(id), Some(status)) => Ok((id, status)),
            _ => Err(ServiceError::Validation(errors)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct IdInput {
    #[serde(default)]
    pub id: Option<Value>,
}

#[utoipa::path(
    post, path = "/agendamentos", tag = "agendamentos",
    request_body = crate::openapi::ScheduleInputDoc,
    responses(
        (status = 201, description = "Scheduled"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Pet or veterinarian not found"),
        (status = 409, description = "Slot already taken")
    )
)]
pub async fn schedule(
    State(state): State<ServerState>,
    ApiJson(draft): ApiJson<ScheduleDraft>,
) -> Result<(StatusCode, ApiJson<appointment::Model>), JsonApiError> {
    let created = state.appointments.schedule_draft(&draft).await?;
    Ok((StatusCode::CREATED, ApiJson(created)))
}

#[utoipa::path(
    get, path = "/agendamentos", tag = "agendamentos",
    params(ListQuery),
    responses((status = 200, description = "Appointments ordered by time"), (status = 400, description = "Bad filter"))
)]
pub async fn list(
    State(state): State<ServerState>,
    ApiQuery(q): ApiQuery<ListQuery>,
) -> Result<ApiJson<Vec<appointment::Model>>, JsonApiError> {
    let filter = AppointmentFilter::parse(q.from.as_deref(), q.to.as_deref(), q.service_line.as_deref(), q.pet_id)?;
    let list = state.appointments.list(&filter).await?;
    info!(count = list.len(), "list appointments");
    Ok(ApiJson(list))
}

#[utoipa::path(
    get, path = "/agendamentos/{id}", tag = "agendamentos",
    params(("id" = i32, Path, description = "Appointment id")),
    responses((status = 200, description = "Found"), (status = 404, description = "Not Found"))
)]
pub async fn get(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<ApiJson<appointment::Model>, JsonApiError> {
    Ok(ApiJson(state.appointments.get(id).await?))
}

#[utoipa::path(
    put, path = "/agendamentos", tag = "agendamentos",
    request_body = crate::openapi::StatusInputDoc,
    responses(
        (status = 200, description = "Status changed"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Transition not allowed")
    )
)]
pub async fn update_status(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<StatusInput>,
) -> Result<ApiJson<appointment::Model>, JsonApiError> {
    let (id, status) = input.parse()?;
    Ok(ApiJson(state.appointments.update_status(id, status).await?))
}

#[utoipa::path(
    delete, path = "/agendamentos", tag = "agendamentos",
    request_body = crate::openapi::IdInputDoc,
    responses(
        (status = 200, description = "Cancelled (or already cancelled)"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Already concluded")
    )
)]
pub async fn cancel(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<IdInput>,
) -> Result<ApiJson<appointment::Model>, JsonApiError> {
    let id = input::required_id("id", input.id.as_ref()).map_err(|e| ServiceError::Validation(vec![e]))?;
    Ok(ApiJson(state.appointments.cancel(id).await?))
}
