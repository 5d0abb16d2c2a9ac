//! Book-level metadata carried into the package document

use serde::{Deserialize, Serialize};

/// Fallback archive and display name when the book has no title
pub const DEFAULT_BOOK_NAME: &str = "ebook";

/// Metadata substituted into the container's template files
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookMetadata {
    /// Book title
    pub title: String,

    /// Author, written into both creator orderings
    pub author: String,

    /// Language code (e.g. "zh", "en")
    pub language: String,

    /// Unique identifier, without the `urn:uuid:` prefix
    pub uuid: String,

    /// Optional ISBN
    pub isbn: Option<String>,

    /// Creation date, `YYYY-MM-DD`
    pub create_date: String,
}

impl BookMetadata {
    /// Create metadata with a fresh identifier and today's date
    pub fn new(title: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: String::new(),
            language: language.into(),
            uuid: uuid::Uuid::new_v4().to_string(),
            isbn: None,
            create_date: chrono::Local::now().format("%Y-%m-%d").to_string(),
        }
    }

    /// Set the author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// The title, or [`DEFAULT_BOOK_NAME`] when it is blank
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            DEFAULT_BOOK_NAME
        } else {
            &self.title
        }
    }

    /// File name of the produced archive
    pub fn archive_file_name(&self) -> String {
        let stem: String = self
            .display_title()
            .trim()
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c => c,
            })
            .collect();
        format!("{stem}.epub")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_title_falls_back() {
        let metadata = BookMetadata::new("  ", "zh");
        assert_eq!(metadata.display_title(), DEFAULT_BOOK_NAME);
        assert_eq!(metadata.archive_file_name(), "ebook.epub");
    }

    #[test]
    fn test_archive_name_replaces_separators() {
        let metadata = BookMetadata::new("A/B: Part 1", "en");
        assert_eq!(metadata.archive_file_name(), "A_B_ Part 1.epub");
    }
}
