//! Validation of untrusted folder and path input.
//!
//! Both checks run before any filesystem access. They are deliberately
//! different:
//!
//! - [`validate_folder_name`] is for a single path component (a daily
//!   collection name) and only allows `[A-Za-z0-9._-]+`, minus `.` and any
//!   name containing `..`.
//! - [`validate_image_src`] is for a multi-segment path under the content
//!   root. It rejects the `..` token anywhere and anything outside the root
//!   prefix, then normalises away empty and `.` segments.

use crate::error::GalleryError;

/// Accept `name` only if it is a non-empty run of `[A-Za-z0-9._-]` that
/// can't name the current or parent directory.
pub fn validate_folder_name(name: &str) -> Result<&str, GalleryError> {
    let safe = !name.is_empty()
        && name != "."
        && !name.contains("..")
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'));
    if safe {
        Ok(name)
    } else {
        Err(GalleryError::BadInput("folder"))
    }
}

/// Check a site-relative image path and return it in clean form.
///
/// The path must start with `<content_root>/` and must not contain `..`.
/// The returned path has no empty or `.` segments, so `images//weekly/./a.jpg`
/// comes back as `images/weekly/a.jpg`.
pub fn validate_image_src(src: &str, content_root: &str) -> Result<String, GalleryError> {
    if src.is_empty() || src.contains("..") {
        return Err(GalleryError::BadInput("src"));
    }
    let under_root = src
        .strip_prefix(content_root)
        .is_some_and(|rest| rest.starts_with('/'));
    if !under_root {
        return Err(GalleryError::BadInput("src"));
    }
    Ok(clean_path(src))
}

fn clean_path(path: &str) -> String {
    path.split('/')
        .filter(|seg| !seg.is_empty() && *seg != ".")
        .collect::<Vec<_>>()
        .join("/")
}
