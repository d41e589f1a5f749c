//! Router construction.
//!
//! Routes:
//!
//! | Route                    | Handler                                 |
//! |--------------------------|-----------------------------------------|
//! | `GET /`                  | gallery index (`tab`, `folder` query)   |
//! | `GET /daily/{folder}`    | image grid fragment for one collection  |
//! | `GET /view`              | image detail (`src` query)              |
//! | `GET /assets/gallery.js` | embedded script                         |
//! | `/<content_root>/...`    | raw image bytes from the content root   |
//! | `/static/...`            | files from the site's static directory  |

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::server::handlers;
use crate::server::security;
use crate::server::state::AppState;

/// Create the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let images_dir = state.site_dir().join(&state.config.content_root);
    let static_dir = state.site_dir().join(&state.config.static_dir);
    let images_prefix = format!("/{}", state.config.content_root);

    Router::new()
        .route("/", get(handlers::gallery_index))
        .route("/daily/", get(handlers::daily_fragment_root))
        .route("/daily/{*folder}", get(handlers::daily_fragment))
        .route("/view", get(handlers::image_view))
        .route("/assets/gallery.js", get(handlers::gallery_js))
        .nest_service(&images_prefix, ServeDir::new(images_dir))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}
