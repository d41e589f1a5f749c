//! Shared test utilities.
//!
//! Builds small image trees in temp directories (file contents don't matter;
//! only names and file types do) and extracts plain strings for assertions.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_library();
//! let library = Library::new(tmp.path(), "images");
//! assert_eq!(collection_names(&library), vec!["2024-06-01", "trip"]);
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::scan::Library;
use crate::types::ImageRef;

// =========================================================================
// Tree setup
// =========================================================================

/// Create a directory (and parents) under `root`.
pub fn make_dir(root: &Path, rel: &str) {
    fs::create_dir_all(root.join(rel)).unwrap();
}

/// Create a placeholder file (and parent directories) under `root`.
pub fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "fake image").unwrap();
}

/// A temp site directory with the standard test library:
///
/// ```text
/// images/
/// ├── daily/
/// │   ├── 2024-06-01/  card-01.jpg, card-02.PNG, notes.txt
/// │   └── trip/        x.PNG, y.jpg, notes.txt
/// └── weekly/          a.jpg, b.jpg, readme.md
/// ```
pub fn setup_library() -> TempDir {
    let tmp = TempDir::new().unwrap();
    for rel in [
        "images/daily/2024-06-01/card-01.jpg",
        "images/daily/2024-06-01/card-02.PNG",
        "images/daily/2024-06-01/notes.txt",
        "images/daily/trip/x.PNG",
        "images/daily/trip/y.jpg",
        "images/daily/trip/notes.txt",
        "images/weekly/a.jpg",
        "images/weekly/b.jpg",
        "images/weekly/readme.md",
    ] {
        touch(tmp.path(), rel);
    }
    tmp
}

// =========================================================================
// Extractors
// =========================================================================

/// Collection names in listing order.
pub fn collection_names(library: &Library) -> Vec<String> {
    library
        .list_collections()
        .into_iter()
        .map(|c| c.name)
        .collect()
}

/// Image paths as plain strings.
pub fn image_paths(images: &[ImageRef]) -> Vec<&str> {
    images.iter().map(ImageRef::as_str).collect()
}
