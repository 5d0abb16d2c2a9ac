//! txtepub Core Library
//!
//! Converts a plain-text manuscript into an EPUB container. Lines are
//! classified by configurable title patterns into a document model (front
//! matter, optional sub-books, chapters), which is then rendered into XHTML
//! documents, described in navigation fragments, and packaged from a template
//! tree into the final archive.

pub mod config;
pub mod convert;
pub mod epub;
pub mod error;
pub mod segment;
pub mod types;

pub use config::BookInfo;
pub use convert::{read_manuscript, Converter};
pub use epub::BuildReport;
pub use error::{ConfigError, ConversionError, ParseError, Result, SegmentError, TxtEpubError};
pub use types::{BookMetadata, BookModel, Body, Chapter, ContentUnit, FileDescriptor, SubBook};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converter_creation() {
        let converter = Converter::new(BookInfo::default()).unwrap();
        let model = converter.segment_text("第一章\n正文");
        assert_eq!(model.chapter_count(), 1);
        assert_eq!(model.metadata.language, "zh");
    }
}
