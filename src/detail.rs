//! Single-image view context.
//!
//! [`build`] takes the untrusted `src` query value and produces an
//! [`ImageDetailContext`], or the reason it can't:
//!
//! | Condition                                         | Error         |
//! |---------------------------------------------------|---------------|
//! | empty, contains `..`, or outside the content root | `BadInput`    |
//! | not a regular file                                | `NotFound`    |
//! | not under `<root>/daily/<x>` or `<root>/weekly/` | `Unsupported` |
//!
//! Path validation happens before any filesystem access.
//!
//! Classification looks only at the second segment. A file directly under
//! `daily/` is still a daily image whose folder is its own file name; it has
//! no siblings because that "folder" lists as empty.

use serde::Serialize;

use crate::error::GalleryError;
use crate::scan::Library;
use crate::types::{CollectionKind, ImageRef};
use crate::validate::validate_image_src;

/// How the request reached us. Supplied by the listener, not computed here.
#[derive(Debug, Clone)]
pub struct RequestOrigin {
    /// `"https"` when TLS terminates in this process, else `"http"`.
    pub scheme: &'static str,
    /// Value of the `Host` header.
    pub host: String,
    /// Original request path and query, e.g. `/view?src=images%2Fweekly%2Fa.jpg`.
    pub request_uri: String,
}

impl RequestOrigin {
    fn absolute(&self, path: &str) -> String {
        format!("{}://{}{}", self.scheme, self.host, path)
    }
}

/// Everything the detail page needs.
#[derive(Debug, Clone, Serialize)]
pub struct ImageDetailContext {
    /// Site URL of the image, `/` + cleaned path.
    pub src: String,
    pub file_name: String,
    pub kind: CollectionKind,
    /// Daily collection name; empty for weekly images.
    pub folder: String,
    /// Other images of the same collection, in scan order.
    pub related_images: Vec<ImageRef>,
    pub site_name: String,
    /// Absolute image URL for social previews.
    pub og_image: String,
    /// Absolute URL of this page.
    pub page_url: String,
    pub title: String,
    pub description: String,
}

pub fn build(
    library: &Library,
    site_name: &str,
    raw_src: &str,
    origin: &RequestOrigin,
) -> Result<ImageDetailContext, GalleryError> {
    let path = validate_image_src(raw_src, library.content_root())?;

    if !library.is_regular_file(&path) {
        return Err(GalleryError::NotFound(path));
    }

    let parts: Vec<&str> = path.split('/').collect();
    let (kind, folder, collection_dir) = match parts.as_slice() {
        [_, "daily", folder, ..] => (
            CollectionKind::Daily,
            folder.to_string(),
            library.daily_folder(folder),
        ),
        [_, "weekly", ..] => (CollectionKind::Weekly, String::new(), library.weekly_root()),
        _ => return Err(GalleryError::Unsupported(path)),
    };

    let related_images: Vec<ImageRef> = library
        .list_images(&collection_dir)
        .into_iter()
        .filter(|img| img.as_str() != path)
        .collect();

    let file_name = parts.last().copied().unwrap_or_default().to_string();
    let src = format!("/{path}");

    tracing::debug!(
        src = %src,
        kind = kind.as_str(),
        related = related_images.len(),
        "built image view"
    );

    Ok(ImageDetailContext {
        og_image: origin.absolute(&src),
        page_url: origin.absolute(&origin.request_uri),
        title: format!("{file_name} - {site_name}"),
        description: format!("View image from {site_name}"),
        src,
        file_name,
        kind,
        folder,
        related_images,
        site_name: site_name.to_string(),
    })
}
