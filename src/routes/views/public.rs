use std::path::{Path, PathBuf};

use axum::{
    Router,
    response::{IntoResponse, Response},
};
use tower_http::services::ServeDir;

use crate::{config::GeneralConfig, error::AppError};

pub fn router(general: &GeneralConfig) -> Router {
    Router::new().nest_service("/static", ServeDir::new(resolve_public_dir(general)))
}

pub(crate) async fn not_found() -> Response {
    AppError::not_found("Page not found").into_response()
}

/// Configured directory first, then `public/` next to the working directory
/// or the executable, then the crate's own copy.
fn resolve_public_dir(general: &GeneralConfig) -> PathBuf {
    if let Some(path) = general.public_dir.as_ref() {
        return path.clone();
    }

    if let Ok(current_dir) = std::env::current_dir() {
        let candidate = current_dir.join("public");
        if candidate.exists() {
            return candidate;
        }
    }

    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        let candidate = exe_dir.join("public");
        if candidate.exists() {
            return candidate;
        }
    }

    Path::new(env!("CARGO_MANIFEST_DIR")).join("public")
}
