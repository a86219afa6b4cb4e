//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so the binary can prepare the frontend
//! and upload directories through the service crate.

/// Ensure the upload tree exists; warn when the frontend build is missing.
pub async fn ensure_env(frontend_dir: &str, uploads_dir: &str) -> anyhow::Result<()> {
    common::env::ensure_env(frontend_dir, uploads_dir).await
}
