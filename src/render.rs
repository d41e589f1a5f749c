//! HTML rendering.
//!
//! Handlers only talk to the [`PageRenderer`] trait, which may fail; a
//! failure becomes a 500. [`MaudRenderer`] is the implementation the server
//! uses. It builds every response, including the collection fragment,
//! with [maud](https://maud.lambda.xyz/), so all interpolation is escaped
//! the same way.
//!
//! ## Pages
//!
//! - **Index**: tab bar (Daily / Weekly), daily folder list, image grid.
//! - **Fragment**: the grid for one daily folder, swapped in by
//!   `gallery.js` when a folder link is clicked.
//! - **Detail**: one image with Open Graph preview tags and a strip of
//!   the other images in its collection.
//!
//! Every grid card links to `/view?src=<path>` and carries Save / Copy
//! buttons (`data-dl` / `data-copy`) pointing at the raw image URL.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use thiserror::Error;

use crate::config::{self, SiteConfig};
use crate::detail::ImageDetailContext;
use crate::index::GalleryPageContext;
use crate::types::{ActiveTab, CollectionKind, ImageRef};

pub const CSS_STATIC: &str = include_str!("../assets/gallery.css");
pub const JS: &str = include_str!("../assets/gallery.js");

/// Characters left alone in a query value: RFC 3986 unreserved.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(String),
}

/// Turns finished view contexts into response bodies.
pub trait PageRenderer: Send + Sync {
    fn render_index(&self, ctx: &GalleryPageContext) -> Result<String, RenderError>;
    fn render_detail(&self, ctx: &ImageDetailContext) -> Result<String, RenderError>;
    fn render_fragment(&self, images: &[ImageRef]) -> Result<String, RenderError>;
}

/// Compile-time templates with the site palette baked into the stylesheet.
#[derive(Debug, Clone)]
pub struct MaudRenderer {
    css: String,
}

impl MaudRenderer {
    pub fn new(config: &SiteConfig) -> Self {
        let color_css = config::generate_color_css(&config.colors);
        Self {
            css: format!("{}\n\n{}", color_css, CSS_STATIC),
        }
    }
}

impl PageRenderer for MaudRenderer {
    fn render_index(&self, ctx: &GalleryPageContext) -> Result<String, RenderError> {
        Ok(render_index(ctx, &self.css).into_string())
    }

    fn render_detail(&self, ctx: &ImageDetailContext) -> Result<String, RenderError> {
        Ok(render_detail(ctx, &self.css).into_string())
    }

    fn render_fragment(&self, images: &[ImageRef]) -> Result<String, RenderError> {
        Ok(image_grid_items(images, "No images in this folder.").into_string())
    }
}

/// `/view?src=<escaped path>` for an image.
pub fn view_url(image: &ImageRef) -> String {
    format!("/view?src={}", utf8_percent_encode(image.as_str(), QUERY_VALUE))
}

fn folder_url(name: &str) -> String {
    format!("/?tab=daily&folder={}", utf8_percent_encode(name, QUERY_VALUE))
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, head_extra: Option<Markup>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                @if let Some(extra) = head_extra {
                    (extra)
                }
                style { (PreEscaped(css)) }
                script src="/assets/gallery.js" defer {}
            }
            body {
                (content)
            }
        }
    }
}

/// One grid card: linked thumbnail plus Save / Copy overlay buttons.
fn image_card(image: &ImageRef) -> Markup {
    let url = image.url();
    html! {
        figure.card {
            a.card-link href=(view_url(image)) {
                img loading="lazy" src=(url) alt=(image.file_name());
            }
            div.card-actions {
                button.dl-btn type="button" data-dl=(url) { "Save" }
                button.copy-btn type="button" data-copy=(url) { "Copy" }
            }
        }
    }
}

/// Grid contents, or a muted message when there is nothing to show.
fn image_grid_items(images: &[ImageRef], empty_message: &str) -> Markup {
    html! {
        @if images.is_empty() {
            p.empty { (empty_message) }
        } @else {
            @for image in images {
                (image_card(image))
            }
        }
    }
}

fn tab_bar(active: &ActiveTab) -> Markup {
    html! {
        nav.tabs {
            a.tab.active[*active == ActiveTab::Daily] href="/?tab=daily" { "Daily" }
            a.tab.active[*active == ActiveTab::Weekly] href="/?tab=weekly" { "Weekly" }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_index(ctx: &GalleryPageContext, css: &str) -> Markup {
    let content = html! {
        header.site-header {
            h1 { a href="/" { (ctx.site_name) } }
            (tab_bar(&ctx.active_tab))
        }
        main.index-page {
            @match &ctx.active_tab {
                ActiveTab::Daily => {
                    @if ctx.daily_folders.is_empty() {
                        p.empty { "No daily collections yet." }
                    } @else {
                        nav.folders {
                            @for folder in &ctx.daily_folders {
                                a.folder.active[folder.name == ctx.active_daily_folder]
                                    href=(folder_url(&folder.name))
                                    data-fragment={ "/daily/" (folder.name) } {
                                    (folder.name)
                                }
                            }
                        }
                    }
                    div.grid id="grid" {
                        @if !ctx.active_daily_folder.is_empty() {
                            (image_grid_items(&ctx.daily_images, "No images in this folder."))
                        }
                    }
                }
                ActiveTab::Weekly => {
                    div.grid id="grid" {
                        (image_grid_items(&ctx.weekly_images, "No weekly images yet."))
                    }
                }
                ActiveTab::Other(_) => {
                    p.empty { "Nothing to show." }
                }
            }
        }
    };

    base_document(&ctx.site_name, css, None, content)
}

fn render_detail(ctx: &ImageDetailContext, css: &str) -> Markup {
    let back_url = match ctx.kind {
        CollectionKind::Daily => folder_url(&ctx.folder),
        CollectionKind::Weekly => "/?tab=weekly".to_string(),
    };
    let back_label = match ctx.kind {
        CollectionKind::Daily => ctx.folder.as_str(),
        CollectionKind::Weekly => "Weekly",
    };

    let head = html! {
        meta name="description" content=(ctx.description);
        link rel="canonical" href=(ctx.page_url);
        meta property="og:type" content="website";
        meta property="og:site_name" content=(ctx.site_name);
        meta property="og:title" content=(ctx.title);
        meta property="og:description" content=(ctx.description);
        meta property="og:url" content=(ctx.page_url);
        meta property="og:image" content=(ctx.og_image);
        meta name="twitter:card" content="summary_large_image";
        meta name="twitter:title" content=(ctx.title);
        meta name="twitter:image" content=(ctx.og_image);
    };

    let content = html! {
        header.site-header {
            nav.breadcrumb {
                a href="/" { (ctx.site_name) }
                " › "
                a href=(back_url) { (back_label) }
                " › "
                (ctx.file_name)
            }
        }
        main.image-page data-kind=(ctx.kind.as_str()) {
            figure.viewer {
                img src=(ctx.src) alt=(ctx.file_name);
                figcaption {
                    (ctx.file_name)
                    div.card-actions {
                        button.dl-btn type="button" data-dl=(ctx.src) { "Save" }
                        button.copy-btn type="button" data-copy=(ctx.src) { "Copy" }
                    }
                }
            }
            @if !ctx.related_images.is_empty() {
                section.related {
                    h2 { "More from this collection" }
                    div.grid {
                        @for image in &ctx.related_images {
                            (image_card(image))
                        }
                    }
                }
            }
        }
    };

    base_document(&ctx.title, css, Some(head), content)
}
