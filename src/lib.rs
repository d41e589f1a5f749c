//! # Card Gallery
//!
//! A read-only gallery server for externally populated image folders. Images
//! live in two kinds of collection under the content root:
//!
//! ```text
//! images/
//! ├── daily/<folder>/<file>   # one folder per day (or any name)
//! └── weekly/<file>           # a single flat collection
//! ```
//!
//! The server renders a tabbed index, a per-folder grid fragment for in-place
//! navigation, and a detail page for one image with links to its siblings.
//!
//! # Request Pipeline
//!
//! ```text
//! request params ─► validate ─► scan ─► index / detail ─► render
//!                   (reject)   (list)   (shape context)   (HTML)
//! ```
//!
//! Every stage except rendering is synchronous, stateless, and reads the
//! filesystem at call time. Nothing is cached, so dropping files into the
//! tree shows up on the next request.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`validate`] | Folder-name and image-path checks for untrusted input |
//! | [`scan`] | [`scan::Library`]: lists daily collections and images in a directory |
//! | [`index`] | Builds the index page context from `tab` / `folder` |
//! | [`detail`] | Builds the single-image context: classification, siblings, preview metadata |
//! | [`render`] | [`render::PageRenderer`] trait and the maud implementation |
//! | [`server`] | axum router, handlers, and listener |
//! | [`config`] | `config.toml` loading, merging, validation, palette CSS |
//! | [`error`] | [`error::GalleryError`] and its HTTP status mapping |
//! | [`types`] | Shared value types (`ImageRef`, `DailyCollection`, tabs, kinds) |
//! | [`output`] | Inventory printing for the `check` command |
//!
//! # Design Decisions
//!
//! ## Empty, Not Error
//!
//! A collection directory that doesn't exist yet lists as empty, and an
//! unknown `tab` renders an empty gallery. Neither is a failure: the tree is
//! filled by other tools and is expected to be partial.
//!
//! ## One Escaping Discipline
//!
//! Full pages and the folder fragment are both produced by maud through the
//! same renderer, so every interpolated path and name is escaped the same way.
//!
//! ## Explicit State
//!
//! Configuration and the renderer are built once in `main` and passed to the
//! router as an immutable [`server::AppState`]. There are no globals.

pub mod config;
pub mod detail;
pub mod error;
pub mod index;
pub mod output;
pub mod render;
pub mod scan;
pub mod server;
pub mod types;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_helpers;
