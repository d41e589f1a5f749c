//! Shared types handed from the resolution stages to the renderers.
//!
//! Everything here is built fresh for a single request and never mutated
//! afterwards.

use serde::Serialize;
use std::fmt;

/// A daily collection: one subdirectory of the daily root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCollection {
    pub name: String,
}

/// A site-relative path to an existing image file, e.g.
/// `images/daily/trip/x.PNG`.
///
/// Always forward-slash separated and never prefixed with `/`. Only the
/// scanner constructs these, so holding one means the file was a regular
/// image file at scan time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub(crate) fn new(path: String) -> Self {
        Self(path)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Absolute site URL of the image (`/` + path).
    pub fn url(&self) -> String {
        format!("/{}", self.0)
    }

    /// Last path segment.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which collection an image belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Daily,
    Weekly,
}

impl CollectionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CollectionKind::Daily => "daily",
            CollectionKind::Weekly => "weekly",
        }
    }
}

/// The tab requested on the index page.
///
/// Unknown values are carried through verbatim: they select nothing and the
/// page renders an empty gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveTab {
    Daily,
    Weekly,
    Other(String),
}

impl ActiveTab {
    /// Parse the raw `tab` query parameter. Absent or empty means daily.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.unwrap_or_default() {
            "" | "daily" => ActiveTab::Daily,
            "weekly" => ActiveTab::Weekly,
            other => ActiveTab::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ActiveTab::Daily => "daily",
            ActiveTab::Weekly => "weekly",
            ActiveTab::Other(raw) => raw,
        }
    }
}

impl Serialize for ActiveTab {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
