//! Request-level failures and their HTTP mapping.
//!
//! Every variant is terminal for the current request only. Missing
//! directories are never errors anywhere in the crate; they scan as empty.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::render::RenderError;

#[derive(Error, Debug)]
pub enum GalleryError {
    /// Malformed or unsafe folder/path input.
    #[error("invalid {0}")]
    BadInput(&'static str),
    /// Well-formed path with no regular file behind it.
    #[error("not found: {0}")]
    NotFound(String),
    /// Safe, existing path that is neither a daily nor a weekly image.
    #[error("unsupported path: {0}")]
    Unsupported(String),
    #[error("render error: {0}")]
    Render(#[from] RenderError),
}

impl GalleryError {
    pub fn status(&self) -> StatusCode {
        match self {
            GalleryError::BadInput(_) | GalleryError::Unsupported(_) => StatusCode::BAD_REQUEST,
            GalleryError::NotFound(_) => StatusCode::NOT_FOUND,
            GalleryError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GalleryError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }
        (status, self.to_string()).into_response()
    }
}
