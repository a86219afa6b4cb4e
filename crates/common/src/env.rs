//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::warn;

/// Subdirectories of the uploads root, one per upload kind.
pub const UPLOAD_SUBDIRS: [&str; 2] = ["images", "files"];

/// Ensure the uploads tree exists; warn when the front-end build is missing.
pub async fn ensure_env(frontend_dir: &str, uploads_dir: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(frontend_dir).await.is_err() {
        warn!(%frontend_dir, "frontend assets directory not found; static assets may 404");
    }
    for sub in UPLOAD_SUBDIRS {
        let dir = std::path::Path::new(uploads_dir).join(sub);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
    }
    Ok(())
}
