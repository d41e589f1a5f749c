//! CLI output formatting for the `check` command.
//!
//! Output is an inventory of what the server would show right now:
//!
//! ```text
//! Daily
//! 001 2024-06-01 (2 images)
//!     001 card-01.jpg
//!     002 card-02.PNG
//! 002 trip (0 images)
//!
//! Weekly (2 images)
//!     001 a.jpg
//!     002 b.jpg
//!
//! Config
//!     config.toml
//!     static/
//! ```
//!
//! With `--json` the same [`Inventory`] is printed as a JSON document instead.
//!
//! [`format_inventory`] is pure and returns lines for testability;
//! [`print_inventory`] scans the library and writes to stdout.

use serde::Serialize;

use crate::config::{CONFIG_FILE, SiteConfig};
use crate::scan::Library;
use crate::types::ImageRef;

/// One daily collection and its images.
#[derive(Debug, Clone, Serialize)]
pub struct DailyEntry {
    pub name: String,
    pub images: Vec<ImageRef>,
}

/// Snapshot of everything the server would list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Inventory {
    pub daily: Vec<DailyEntry>,
    pub weekly: Vec<ImageRef>,
}

impl Inventory {
    pub fn scan(library: &Library) -> Self {
        let daily = library
            .list_collections()
            .into_iter()
            .map(|c| {
                let images = library.list_images(&library.daily_folder(&c.name));
                DailyEntry { name: c.name, images }
            })
            .collect();
        Self {
            daily,
            weekly: library.list_images(&library.weekly_root()),
        }
    }
}

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn count_label(n: usize) -> String {
    match n {
        1 => "1 image".to_string(),
        n => format!("{} images", n),
    }
}

fn image_lines(images: &[ImageRef], lines: &mut Vec<String>) {
    for (i, img) in images.iter().enumerate() {
        lines.push(format!("    {} {}", format_index(i + 1), img.file_name()));
    }
}

/// Library inventory as display lines.
pub fn format_inventory(inventory: &Inventory) -> Vec<String> {
    let mut lines = vec!["Daily".to_string()];
    if inventory.daily.is_empty() {
        lines.push("    (no collections)".to_string());
    }
    for (i, entry) in inventory.daily.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            entry.name,
            count_label(entry.images.len())
        ));
        image_lines(&entry.images, &mut lines);
    }

    lines.push(String::new());
    lines.push(format!("Weekly ({})", count_label(inventory.weekly.len())));
    image_lines(&inventory.weekly, &mut lines);
    lines
}

/// Scan the library and print its inventory plus the config sources in use.
pub fn print_inventory(
    library: &Library,
    config: &SiteConfig,
    json: bool,
) -> Result<(), serde_json::Error> {
    let inventory = Inventory::scan(library);
    if json {
        println!("{}", serde_json::to_string_pretty(&inventory)?);
        return Ok(());
    }

    for line in format_inventory(&inventory) {
        println!("{}", line);
    }

    println!();
    println!("Config");
    if library.site_dir().join(CONFIG_FILE).exists() {
        println!("    {}", CONFIG_FILE);
    }
    if library.site_dir().join(&config.static_dir).is_dir() {
        println!("    {}/", config.static_dir);
    }
    Ok(())
}
