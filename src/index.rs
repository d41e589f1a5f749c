//! Gallery index assembly.
//!
//! Turns the raw `tab` and `folder` query parameters into a
//! [`GalleryPageContext`]. This never fails: anything absent, unknown, or
//! unsafe degrades to empty image lists.

use serde::Serialize;

use crate::scan::Library;
use crate::types::{ActiveTab, DailyCollection, ImageRef};
use crate::validate::validate_folder_name;

/// Everything the index page needs.
#[derive(Debug, Clone, Serialize)]
pub struct GalleryPageContext {
    pub active_tab: ActiveTab,
    /// All daily collections; always listed so the tab bar can switch.
    pub daily_folders: Vec<DailyCollection>,
    /// Selected daily collection, empty when none.
    pub active_daily_folder: String,
    pub daily_images: Vec<ImageRef>,
    /// Only populated when the weekly tab is active.
    pub weekly_images: Vec<ImageRef>,
    pub site_name: String,
}

/// Build the index context for the given query parameters.
///
/// On the daily tab the requested folder wins, else the first collection in
/// case-insensitive order. A requested folder that fails name validation is
/// still reported as selected but loads no images.
pub fn assemble(
    library: &Library,
    site_name: &str,
    tab: Option<&str>,
    folder: Option<&str>,
) -> GalleryPageContext {
    let active_tab = ActiveTab::from_param(tab);
    let daily_folders = library.list_collections();

    let mut active_daily_folder = String::new();
    let mut daily_images = Vec::new();
    let mut weekly_images = Vec::new();

    match active_tab {
        ActiveTab::Daily => {
            active_daily_folder = match folder.filter(|f| !f.is_empty()) {
                Some(requested) => requested.to_string(),
                None => daily_folders
                    .first()
                    .map(|c| c.name.clone())
                    .unwrap_or_default(),
            };
            if !active_daily_folder.is_empty() {
                match validate_folder_name(&active_daily_folder) {
                    Ok(name) => daily_images = library.list_images(&library.daily_folder(name)),
                    Err(_) => {
                        tracing::warn!(folder = %active_daily_folder, "ignoring unsafe folder parameter");
                    }
                }
            }
        }
        ActiveTab::Weekly => {
            weekly_images = library.list_images(&library.weekly_root());
        }
        ActiveTab::Other(ref raw) => {
            tracing::debug!(tab = %raw, "unknown tab, rendering empty gallery");
        }
    }

    GalleryPageContext {
        active_tab,
        daily_folders,
        active_daily_folder,
        daily_images,
        weekly_images,
        site_name: site_name.to_string(),
    }
}
