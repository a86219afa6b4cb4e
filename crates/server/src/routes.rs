use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    set_header::SetResponseHeader,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::errors::handle_panic;
use crate::openapi::ApiDoc;

pub mod appointments;
pub mod auth;
pub mod clients;
pub mod medical_records;
pub mod pets;
pub mod veterinarians;

use auth::ServerState;

/// Upper bound for multipart bodies.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok", service: "lolli-pet" })
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: public routes, the static front end,
/// uploaded files and the API behind the injected auth strategy.
pub fn build_router(state: ServerState, cors: CorsLayer, frontend_dir: &str) -> Router {
    let index = format!("{}/index.html", frontend_dir.trim_end_matches('/'));
    let static_dir = ServeDir::new(frontend_dir).fallback(ServeFile::new(index));
    let uploads_dir = SetResponseHeader::overriding(
        ServeDir::new(state.uploads.root()),
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );

    let public = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest_service("/uploads", uploads_dir);

    let api = Router::new()
        .route(
            "/agendamentos",
            post(appointments::schedule)
                .get(appointments::list)
                .put(appointments::update_status)
                .delete(appointments::cancel),
        )
        .route("/agendamentos/:id", get(appointments::get))
        .route("/prontuarios/:pet_id", get(medical_records::list_for_pet))
        .route("/prontuarios/:pet_id/historico", post(medical_records::append))
        .route("/prontuarios/:pet_id/arquivos", post(medical_records::upload_documents))
        .route(
            "/prontuarios/historico/:id",
            put(medical_records::update).delete(medical_records::delete).get(medical_records::get),
        )
        .route("/clientes", post(clients::create).get(clients::list))
        .route("/clientes/:id", get(clients::get).put(clients::update).delete(clients::delete))
        .route("/pets", post(pets::create).get(pets::list))
        .route("/pets/:id", get(pets::get).put(pets::update).delete(pets::delete))
        .route("/pets/:id/fotos", post(pets::upload_photo).get(pets::photos))
        .route("/veterinarios", post(veterinarians::create).get(veterinarians::list))
        .route(
            "/veterinarios/:id",
            get(veterinarians::get).put(veterinarians::update).delete(veterinarians::delete),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_caller));

    public
        .merge(api)
        .fallback_service(static_dir)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
