#![allow(dead_code)]
use std::path::PathBuf;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use configs::{AuthConfig, AuthMode, DatabaseConfig};
use jsonwebtoken::{encode, EncodingKey, Header};
use migration::MigratorTrait;
use serde_json::{json, Value};
use service::upload::UploadStore;
use tower::ServiceExt;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::routes::{self, auth::ServerState};

pub const SECRET: &str = "test-secret";
pub const BOUNDARY: &str = "lolliBoundary7MA4YWxk";

pub struct TestApp {
    pub router: Router,
    pub uploads: PathBuf,
}

/// Router over a private in-memory database and a temp upload directory.
pub async fn build_app(mode: AuthMode) -> anyhow::Result<TestApp> {
    let db = models::db::connect_with_config(&DatabaseConfig::in_memory()).await?;
    migration::Migrator::up(&db, None).await?;

    let root = std::env::temp_dir().join(format!("lolli-server-test-{}", Uuid::new_v4()));
    let uploads = Arc::new(UploadStore::new(&root));
    uploads.ensure_dirs().await?;

    let strategy = service::auth::from_config(&AuthConfig { mode, jwt_secret: SECRET.into() });
    let state = ServerState::new(db, strategy, uploads);
    let router = routes::build_router(state, CorsLayer::very_permissive(), "target/no-frontend");
    Ok(TestApp { router, uploads: root })
}

pub fn token(sub: &str, ttl_secs: i64) -> String {
    #[derive(serde::Serialize)]
    struct Claims<'a> { sub: &'a str, exp: usize }
    let exp = (chrono::Utc::now().timestamp() + ttl_secs) as usize;
    encode(&Header::default(), &Claims { sub, exp }, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
}

pub fn multipart_request(uri: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n").as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

/// Send and decode; an empty body reads as `Null`.
pub async fn send(app: &Router, req: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    Ok((status, value))
}

/// A client with one pet; returns the pet id.
pub async fn seed_pet(app: &Router) -> anyhow::Result<i64> {
    let body = json!({
        "nome": "Maria Souza",
        "email": "maria@example.com",
        "telefone": "(11) 98765-4321",
        "pets": [{ "nome": "Rex", "especie": "cachorro" }]
    });
    let (status, v) = send(app, json_request("POST", "/clientes", &body)).await?;
    assert_eq!(status, StatusCode::CREATED, "{v}");
    Ok(v["pets"][0]["id"].as_i64().unwrap())
}
