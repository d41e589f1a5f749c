//! Filesystem scanning of the image library.
//!
//! ## Directory Structure
//!
//! ```text
//! <site_dir>/
//! ├── config.toml                 # Site configuration (optional)
//! ├── static/                     # Served verbatim under /static/
//! └── images/                     # Content root
//!     ├── daily/                  # One subdirectory per daily collection
//!     │   ├── 2024-06-01/
//!     │   │   ├── card-01.jpg
//!     │   │   └── card-02.PNG
//!     │   └── trip/
//!     │       └── x.webp
//!     └── weekly/                 # Flat weekly collection
//!         ├── a.jpg
//!         └── b.gif
//! ```
//!
//! ## Rules
//!
//! - Listing is one level deep. Nested directories inside a collection are
//!   ignored, as are files with unsupported extensions.
//! - A missing or unreadable directory scans as empty. Collections are
//!   populated externally, so "not created yet" is a normal state.
//! - Nothing is cached: each call reflects the filesystem at that instant.
//!   A tree modified mid-scan may yield a mix of old and new entries.

use crate::types::{DailyCollection, ImageRef};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Read-only view of an image library rooted at a site directory.
///
/// All paths produced and accepted by this type are site-relative strings
/// with forward slashes, beginning with the content root segment.
#[derive(Debug, Clone)]
pub struct Library {
    site_dir: PathBuf,
    content_root: String,
}

impl Library {
    pub fn new(site_dir: impl Into<PathBuf>, content_root: impl Into<String>) -> Self {
        Self {
            site_dir: site_dir.into(),
            content_root: content_root.into(),
        }
    }

    pub fn site_dir(&self) -> &Path {
        &self.site_dir
    }

    pub fn content_root(&self) -> &str {
        &self.content_root
    }

    /// Site-relative directory holding the daily collections.
    pub fn daily_root(&self) -> String {
        format!("{}/daily", self.content_root)
    }

    /// Site-relative directory of the weekly collection.
    pub fn weekly_root(&self) -> String {
        format!("{}/weekly", self.content_root)
    }

    /// Site-relative directory of one daily collection. `name` must already
    /// have passed [`crate::validate::validate_folder_name`].
    pub fn daily_folder(&self, name: &str) -> String {
        format!("{}/daily/{}", self.content_root, name)
    }

    /// Daily collections, sorted case-insensitively by name.
    pub fn list_collections(&self) -> Vec<DailyCollection> {
        let mut names: Vec<String> = self
            .entries(&self.daily_root())
            .filter(|e| e.file_type().is_dir())
            .filter_map(|e| e.file_name().to_str().map(str::to_string))
            .collect();

        names.sort_by(|a, b| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });

        tracing::debug!(count = names.len(), "listed daily collections");
        names
            .into_iter()
            .map(|name| DailyCollection { name })
            .collect()
    }

    /// Image files directly inside `dir`, sorted by full path.
    pub fn list_images(&self, dir: &str) -> Vec<ImageRef> {
        let dir = dir.trim_end_matches('/');
        let mut images: Vec<String> = self
            .entries(dir)
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| e.file_name().to_str().map(str::to_string))
            .filter(|name| is_image_name(name))
            .map(|name| format!("{dir}/{name}"))
            .collect();

        images.sort();

        tracing::debug!(dir, count = images.len(), "listed images");
        images.into_iter().map(ImageRef::new).collect()
    }

    /// Whether a site-relative path names a regular file right now.
    pub fn is_regular_file(&self, rel: &str) -> bool {
        fs::metadata(self.site_dir.join(rel))
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    /// Immediate children of a site-relative directory. Unreadable entries
    /// and a missing directory are skipped silently.
    fn entries(&self, rel_dir: &str) -> impl Iterator<Item = DirEntry> + use<> {
        WalkDir::new(self.site_dir.join(rel_dir))
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
    }
}

fn is_image_name(name: &str) -> bool {
    let ext = Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}
