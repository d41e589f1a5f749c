//! HTTP request handlers.
//!
//! Each handler is a thin adapter: pull parameters out of the request, call
//! into the resolution core, hand the context to the renderer. Errors map to
//! status codes through [`GalleryError`]'s `IntoResponse`.

use std::sync::Arc;

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue, header};
use axum::response::{Html, IntoResponse, Response};

use crate::detail::{self, RequestOrigin};
use crate::error::GalleryError;
use crate::index;
use crate::render;
use crate::server::state::AppState;
use crate::validate::validate_folder_name;

/// The listener speaks plain HTTP; TLS, if any, ends upstream.
const SCHEME: &str = "http";

const HX_TRIGGER: HeaderName = HeaderName::from_static("hx-trigger");

/// Decoded query pairs in request order. Kept as a list so a repeated key
/// resolves to its first value instead of a rejection.
type QueryPairs = Vec<(String, String)>;

fn first_param<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Handle GET /?tab=&folder=.
pub(crate) async fn gallery_index(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<QueryPairs>,
) -> Result<Html<String>, GalleryError> {
    let ctx = index::assemble(
        &state.library,
        &state.config.site_name,
        first_param(&pairs, "tab"),
        first_param(&pairs, "folder"),
    );
    Ok(Html(state.renderer.render_index(&ctx)?))
}

/// Handle GET /daily/{folder}: the image grid for one daily collection.
pub(crate) async fn daily_fragment(
    State(state): State<Arc<AppState>>,
    Path(folder): Path<String>,
) -> Result<Response, GalleryError> {
    render_fragment(&state, &folder)
}

/// Handle GET /daily/ (no folder).
pub(crate) async fn daily_fragment_root(
    State(state): State<Arc<AppState>>,
) -> Result<Response, GalleryError> {
    render_fragment(&state, "")
}

fn render_fragment(state: &AppState, folder: &str) -> Result<Response, GalleryError> {
    let folder = validate_folder_name(folder)?;
    let images = state.library.list_images(&state.library.daily_folder(folder));
    let body = state.renderer.render_fragment(&images)?;
    Ok((
        [(HX_TRIGGER, HeaderValue::from_static("folderLoaded"))],
        Html(body),
    )
        .into_response())
}

/// Handle GET /view?src=.
pub(crate) async fn image_view(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<QueryPairs>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Result<Html<String>, GalleryError> {
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| state.fallback_host());
    let origin = RequestOrigin {
        scheme: SCHEME,
        host,
        request_uri: uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| uri.path().to_string()),
    };

    let ctx = detail::build(
        &state.library,
        &state.config.site_name,
        first_param(&pairs, "src").unwrap_or_default(),
        &origin,
    )?;
    Ok(Html(state.renderer.render_detail(&ctx)?))
}

/// Handle GET /assets/gallery.js.
pub(crate) async fn gallery_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        render::JS,
    )
}
