use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use sea_orm::DatabaseConnection;
use service::appointment::{AppointmentService, SeaOrmAppointmentRepository};
use service::auth::{AuthError, AuthStrategy};
use service::client::{ClientService, SeaOrmClientRepository};
use service::medical_record::{MedicalRecordService, SeaOrmMedicalRecordRepository};
use service::pet::{PetService, SeaOrmPetRepository};
use service::upload::UploadStore;
use service::veterinarian::{SeaOrmVeterinarianRepository, VeterinarianService};

use crate::errors::JsonApiError;

pub const AUTH_COOKIE: &str = "auth_token";

/// Shared, immutable application state.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: Arc<dyn AuthStrategy>,
    pub uploads: Arc<UploadStore>,
    pub clients: Arc<ClientService>,
    pub pets: Arc<PetService>,
    pub veterinarians: Arc<VeterinarianService>,
    pub appointments: Arc<AppointmentService>,
    pub records: Arc<MedicalRecordService>,
}

impl ServerState {
    /// Wire SeaORM repositories into the services.
    pub fn new(db: DatabaseConnection, auth: Arc<dyn AuthStrategy>, uploads: Arc<UploadStore>) -> Self {
        let clients_repo = Arc::new(SeaOrmClientRepository { db: db.clone() });
        let pets_repo = Arc::new(SeaOrmPetRepository { db: db.clone() });
        let vets_repo = Arc::new(SeaOrmVeterinarianRepository { db: db.clone() });
        let appointments_repo = Arc::new(SeaOrmAppointmentRepository { db: db.clone() });
        let records_repo = Arc::new(SeaOrmMedicalRecordRepository { db: db.clone() });

        Self {
            clients: Arc::new(ClientService::new(clients_repo.clone(), pets_repo.clone(), uploads.clone())),
            pets: Arc::new(PetService::new(pets_repo.clone(), clients_repo, uploads.clone())),
            veterinarians: Arc::new(VeterinarianService::new(vets_repo.clone())),
            appointments: Arc::new(AppointmentService::new(appointments_repo, pets_repo.clone(), vets_repo)),
            records: Arc::new(MedicalRecordService::new(records_repo, pets_repo, uploads.clone())),
            db,
            auth,
            uploads,
        }
    }
}

/// Bearer token from `Authorization`, falling back to the `auth_token` cookie.
/// A non-bearer `Authorization` header is rejected outright.
fn presented_token(req: &Request, jar: &CookieJar) -> Result<Option<String>, AuthError> {
    if let Some(value) = req.headers().get(AUTHORIZATION) {
        let value = value.to_str().map_err(|_| AuthError::InvalidToken("malformed Authorization header".into()))?;
        return match value.strip_prefix("Bearer ") {
            Some(token) => Ok(Some(token.trim().to_string())),
            None => Err(AuthError::InvalidToken("expected Bearer scheme".into())),
        };
    }
    Ok(jar.get(AUTH_COOKIE).map(|c| c.value().to_string()))
}

/// Run the injected strategy; on success the `Caller` is placed in the request
/// extensions for handlers that want it.
pub async fn require_caller(
    State(state): State<ServerState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_string();
    let token = presented_token(&req, &jar)?;
    let caller = state.auth.authenticate(token.as_deref()).map_err(|e| {
        tracing::warn!(%path, strategy = state.auth.name(), error = %e, "request_rejected");
        e
    })?;
    req.extensions_mut().insert(caller);
    Ok(next.run(req).await)
}
