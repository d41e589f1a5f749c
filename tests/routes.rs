//! Route tests for the gallery server.
//!
//! These drive the full router (handlers, security headers, static serving)
//! against a temp site directory, without binding a socket.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use card_gallery::config::SiteConfig;
use card_gallery::detail::ImageDetailContext;
use card_gallery::index::GalleryPageContext;
use card_gallery::render::{PageRenderer, RenderError};
use card_gallery::server::{AppState, create_router};
use card_gallery::types::ImageRef;

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "fake image").unwrap();
}

fn setup_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    for rel in [
        "images/daily/2024-06-01/card-01.jpg",
        "images/daily/2024-06-01/card-02.PNG",
        "images/daily/trip/x.PNG",
        "images/daily/trip/y.jpg",
        "images/daily/trip/notes.txt",
        "images/weekly/a.jpg",
        "images/weekly/b.jpg",
        "static/robots.txt",
    ] {
        touch(tmp.path(), rel);
    }
    tmp
}

fn app(site: &Path) -> Router {
    create_router(Arc::new(AppState::new(site, SiteConfig::default())))
}

async fn get(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
    let response = app
        .oneshot(
            Request::builder()
                .uri(uri)
                .header(header::HOST, "cards.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, String::from_utf8_lossy(&body).into_owned())
}

// =========================================================================
// Index
// =========================================================================

#[tokio::test]
async fn index_defaults_to_first_daily_folder() {
    let site = setup_site();
    let (status, headers, body) = get(app(site.path()), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("card-01.jpg"));
    assert!(body.contains("card-02.PNG"));
    assert!(!body.contains("x.PNG"));
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert!(headers.contains_key("content-security-policy"));
}

#[tokio::test]
async fn index_on_empty_site_renders_empty_daily_tab() {
    let site = TempDir::new().unwrap();
    let (status, _, body) = get(app(site.path()), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No daily collections yet."));
    assert!(!body.contains("<figure"));
}

#[tokio::test]
async fn index_weekly_tab_lists_weekly_images() {
    let site = setup_site();
    let (status, _, body) = get(app(site.path()), "/?tab=weekly").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"src="/images/weekly/a.jpg""#));
    assert!(body.contains(r#"src="/images/weekly/b.jpg""#));
    assert!(!body.contains("card-01.jpg"));
}

#[tokio::test]
async fn index_unknown_tab_is_not_an_error() {
    let site = setup_site();
    let (status, _, body) = get(app(site.path()), "/?tab=monthly&folder=trip").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Nothing to show."));
    assert!(!body.contains("<figure"));
}

#[tokio::test]
async fn index_repeated_keys_use_first_value() {
    let site = setup_site();
    let (status, _, body) = get(app(site.path()), "/?tab=weekly&tab=daily&folder=x&folder=y").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"class="tab active" href="/?tab=weekly""#));
    assert!(body.contains(r#"src="/images/weekly/a.jpg""#));
}

#[tokio::test]
async fn index_malformed_query_still_renders() {
    let site = setup_site();
    let (status, _, _) = get(app(site.path()), "/?tab&=&folder=%ZZ&&").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn index_unsafe_folder_renders_no_images() {
    let site = setup_site();
    touch(site.path(), "images/secret.jpg");
    for uri in ["/?folder=..", "/?folder=.", "/?tab=daily&folder=%2E%2E"] {
        let (status, _, body) = get(app(site.path()), uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert!(!body.contains("secret.jpg"), "{uri}");
        assert!(!body.contains("<figure"), "{uri}");
    }
}

// =========================================================================
// Fragment
// =========================================================================

#[tokio::test]
async fn fragment_lists_folder_images_and_triggers_event() {
    let site = setup_site();
    let (status, headers, body) = get(app(site.path()), "/daily/trip").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["hx-trigger"], "folderLoaded");
    assert_eq!(body.matches("<figure").count(), 2);
    assert!(body.contains("/view?src=images%2Fdaily%2Ftrip%2Fx.PNG"));
    assert!(!body.contains("notes.txt"));
    assert!(!body.contains("<html"));
}

#[tokio::test]
async fn fragment_for_missing_folder_is_empty_message() {
    let site = setup_site();
    let (status, _, body) = get(app(site.path()), "/daily/2030-01-01").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No images in this folder."));
}

#[tokio::test]
async fn fragment_rejects_unsafe_folder_names() {
    let site = setup_site();
    for uri in [
        "/daily/a%20b",
        "/daily/trip/nested",
        "/daily/%2E%2E%2Fweekly",
        "/daily/%2E%2E",
        "/daily/%2E",
        "/daily/",
    ] {
        let (status, _, body) = get(app(site.path()), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body, "invalid folder");
    }
}

// =========================================================================
// Detail
// =========================================================================

#[tokio::test]
async fn view_weekly_image_has_preview_and_siblings() {
    let site = setup_site();
    let (status, _, body) = get(app(site.path()), "/view?src=images/weekly/a.jpg").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"content="http://cards.example/images/weekly/a.jpg""#));
    assert!(body.contains(r#"content="http://cards.example/view?src=images/weekly/a.jpg""#));
    assert!(body.contains("<title>a.jpg - Thai Card Store</title>"));
    assert!(body.contains(r#"src="/images/weekly/b.jpg""#));
    assert!(!body.contains("/view?src=images%2Fweekly%2Fa.jpg"));
}

#[tokio::test]
async fn view_daily_image_links_back_to_folder() {
    let site = setup_site();
    let (status, _, body) = get(app(site.path()), "/view?src=images%2Fdaily%2Ftrip%2Fy.jpg").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"href="/?tab=daily&amp;folder=trip""#));
    assert!(body.contains(r#"src="/images/daily/trip/x.PNG""#));
}

#[tokio::test]
async fn view_file_directly_under_daily_is_a_daily_image() {
    let site = setup_site();
    touch(site.path(), "images/daily/flat.jpg");
    let (status, _, body) = get(app(site.path()), "/view?src=images/daily/flat.jpg").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"data-kind="daily""#));
    assert!(!body.contains("More from this collection"));
}

#[tokio::test]
async fn view_repeated_src_uses_first_value() {
    let site = setup_site();
    let (status, _, body) = get(
        app(site.path()),
        "/view?src=images/weekly/b.jpg&src=images/../secret",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>b.jpg - Thai Card Store</title>"));
}

#[tokio::test]
async fn view_status_codes() {
    let site = setup_site();
    touch(site.path(), "images/loose.jpg");

    let cases = [
        ("/view", StatusCode::BAD_REQUEST),
        ("/view?src=", StatusCode::BAD_REQUEST),
        ("/view?src=images/../secret", StatusCode::BAD_REQUEST),
        ("/view?src=static/robots.txt", StatusCode::BAD_REQUEST),
        ("/view?src=images/weekly/missing.jpg", StatusCode::NOT_FOUND),
        ("/view?src=images/daily/trip", StatusCode::NOT_FOUND),
        ("/view?src=images/loose.jpg", StatusCode::BAD_REQUEST),
    ];
    for (uri, expected) in cases {
        let (status, _, _) = get(app(site.path()), uri).await;
        assert_eq!(status, expected, "{uri}");
    }
}

// =========================================================================
// Static serving
// =========================================================================

#[tokio::test]
async fn raw_images_and_static_files_are_served() {
    let site = setup_site();

    let (status, _, body) = get(app(site.path()), "/images/weekly/a.jpg").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "fake image");

    let (status, _, _) = get(app(site.path()), "/static/robots.txt").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn embedded_script_is_served() {
    let site = setup_site();
    let (status, headers, body) = get(app(site.path()), "/assets/gallery.js").await;

    assert_eq!(status, StatusCode::OK);
    assert!(
        headers[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/javascript")
    );
    assert!(body.contains("data-fragment") || body.contains("dataset.fragment"));
}

// =========================================================================
// Render failures
// =========================================================================

struct FailingRenderer;

impl PageRenderer for FailingRenderer {
    fn render_index(&self, _: &GalleryPageContext) -> Result<String, RenderError> {
        Err(RenderError::Template("index unavailable".into()))
    }

    fn render_detail(&self, _: &ImageDetailContext) -> Result<String, RenderError> {
        Err(RenderError::Template("detail unavailable".into()))
    }

    fn render_fragment(&self, _: &[ImageRef]) -> Result<String, RenderError> {
        Err(RenderError::Template("fragment unavailable".into()))
    }
}

#[tokio::test]
async fn render_failure_is_500() {
    let site = setup_site();
    let state = AppState::with_renderer(
        site.path(),
        SiteConfig::default(),
        Box::new(FailingRenderer),
    );
    let app = create_router(Arc::new(state));

    for uri in ["/", "/daily/trip", "/view?src=images/weekly/a.jpg"] {
        let (status, _, _) = get(app.clone(), uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
    }

    // Validation still runs first
    let (status, _, _) = get(app, "/view?src=images/../x").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
