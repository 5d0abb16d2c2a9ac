//! CLI command implementations

mod check;
mod convert;
mod inspect;

pub use check::check;
pub use convert::{convert, BookArgs};
pub use inspect::inspect;

use anyhow::{Context, Result};
use std::path::Path;
use txtepub_core::BookInfo;

/// Load `bookinfo.yaml`, or start from defaults. A blank title falls back to
/// the manuscript's file stem.
fn load_book_info(config: Option<&Path>, input: &Path) -> Result<BookInfo> {
    let mut info = match config {
        Some(path) => BookInfo::from_yaml_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => BookInfo::default(),
    };

    if info.book_title.trim().is_empty() {
        if let Some(stem) = input.file_stem().and_then(|s| s.to_str()) {
            info.book_title = stem.to_string();
        }
    }

    Ok(info)
}
