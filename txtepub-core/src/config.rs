//! Book configuration (`bookinfo.yaml`)

use crate::error::ConfigError;
use crate::segment::{LineClassifier, PatternSet, SegmentMode, TextSegmenter};
use crate::types::BookMetadata;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default chapter title patterns
pub const DEFAULT_CHAPTER_PATTERNS: &[&str] = &["^第.{1,10}[章回]", r"(?i)^chapter\s+\S+"];

/// Default sub-book title patterns
pub const DEFAULT_SUB_BOOK_PATTERNS: &[&str] = &["^第.{1,5}[卷部]", r"(?i)^(book|volume|part)\s+\S+"];

/// Everything the caller supplies for one conversion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "snake_case")]
pub struct BookInfo {
    pub book_title: String,
    pub author: String,
    pub language: String,
    pub uuid: String,
    pub isbn: Option<String>,
    pub create_date: String,

    /// Directory receiving the staging tree and the archive
    pub output_dir: PathBuf,

    /// JPEG cover image
    pub cover_jpg: Option<PathBuf>,

    /// Template directory; the built-in template is used when absent
    pub template_dir: Option<PathBuf>,

    /// Group chapters into sub-books
    pub has_many_books: bool,

    pub chapter_patterns: Vec<String>,
    pub sub_book_patterns: Vec<String>,

    /// Literal substrings removed from every line before classification
    pub remove_substrings: Vec<String>,

    pub front_matter_title: String,
    pub cover_title: String,
    pub toc_title: String,

    /// Keep the staging directory after a successful build
    pub keep_staging: bool,
}

impl Default for BookInfo {
    fn default() -> Self {
        Self {
            book_title: String::new(),
            author: String::new(),
            language: "zh".to_string(),
            uuid: uuid::Uuid::new_v4().to_string(),
            isbn: None,
            create_date: chrono::Local::now().format("%Y-%m-%d").to_string(),
            output_dir: PathBuf::from("."),
            cover_jpg: None,
            template_dir: None,
            has_many_books: false,
            chapter_patterns: DEFAULT_CHAPTER_PATTERNS.iter().map(|s| s.to_string()).collect(),
            sub_book_patterns: DEFAULT_SUB_BOOK_PATTERNS.iter().map(|s| s.to_string()).collect(),
            remove_substrings: vec!["\u{3000}".to_string()],
            front_matter_title: "引言".to_string(),
            cover_title: "封面".to_string(),
            toc_title: "目录".to_string(),
            keep_staging: false,
        }
    }
}

impl BookInfo {
    /// Parse configuration from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    pub fn mode(&self) -> SegmentMode {
        if self.has_many_books {
            SegmentMode::MultiBook
        } else {
            SegmentMode::SingleBook
        }
    }

    /// Metadata for the document model
    pub fn metadata(&self) -> BookMetadata {
        BookMetadata {
            title: self.book_title.clone(),
            author: self.author.clone(),
            language: self.language.clone(),
            uuid: self.uuid.clone(),
            isbn: self.isbn.clone(),
            create_date: self.create_date.clone(),
        }
    }

    /// Compile the title patterns into a segmenter
    pub fn segmenter(&self) -> Result<TextSegmenter, ConfigError> {
        let chapter = PatternSet::compile(&self.chapter_patterns)?;
        if chapter.is_empty() {
            tracing::warn!("No chapter patterns configured, no chapter titles will be detected");
        }
        let classifier = LineClassifier::new(
            PatternSet::compile(&self.sub_book_patterns)?,
            chapter,
            self.mode(),
        );
        Ok(TextSegmenter::new(classifier, self.remove_substrings.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_with_defaults() {
        let info = BookInfo::from_yaml_str(
            "book_title: 红楼梦\nauthor: 曹雪芹\noutput_dir: /tmp/demo\nhas_many_books: true\n",
        )
        .unwrap();

        assert_eq!(info.book_title, "红楼梦");
        assert_eq!(info.author, "曹雪芹");
        assert_eq!(info.output_dir, PathBuf::from("/tmp/demo"));
        assert_eq!(info.mode(), SegmentMode::MultiBook);
        assert_eq!(info.language, "zh");
        assert_eq!(info.remove_substrings, vec!["\u{3000}"]);
        assert_eq!(info.chapter_patterns.len(), DEFAULT_CHAPTER_PATTERNS.len());
        assert!(uuid::Uuid::parse_str(&info.uuid).is_ok());
    }

    #[test]
    fn test_explicit_patterns_replace_defaults() {
        let info = BookInfo::from_yaml_str("chapter_patterns:\n  - '^Kapitel'\n").unwrap();
        assert_eq!(info.chapter_patterns, vec!["^Kapitel"]);
    }

    #[test]
    fn test_malformed_yaml() {
        let err = BookInfo::from_yaml_str("has_many_books: [oops").unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)));
    }

    #[test]
    fn test_invalid_pattern_rejected_by_segmenter() {
        let info = BookInfo {
            chapter_patterns: vec!["(".to_string()],
            ..BookInfo::default()
        };
        assert!(matches!(
            info.segmenter(),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_default_patterns_compile() {
        let segmenter = BookInfo::default().segmenter().unwrap();
        let classifier = segmenter.classifier();
        assert_eq!(
            classifier.classify("第十二回 宴宁府"),
            crate::segment::TitleKind::ChapterTitle
        );
        assert_eq!(
            classifier.classify("Chapter One"),
            crate::segment::TitleKind::ChapterTitle
        );
    }

    #[test]
    fn test_empty_chapter_patterns_still_segment() {
        let info = BookInfo {
            chapter_patterns: Vec::new(),
            ..BookInfo::default()
        };
        let model = info
            .segmenter()
            .unwrap()
            .segment("第一章\n正文".lines(), info.metadata());
        assert_eq!(model.chapter_count(), 1);
        assert_eq!(model.chapters().next().unwrap().title(), "");
    }
}
