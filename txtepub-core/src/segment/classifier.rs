//! Title detection over ordered regex lists

use crate::error::ConfigError;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Classification of a cleaned manuscript line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TitleKind {
    None,
    SubBookTitle,
    ChapterTitle,
}

/// Whether the manuscript groups chapters into sub-books
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentMode {
    #[default]
    SingleBook,
    MultiBook,
}

/// An ordered list of compiled title patterns
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    /// Compile patterns in order. Any invalid pattern is a configuration error.
    pub fn compile<I, S>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                let p = p.as_ref();
                Regex::new(p).map_err(|source| ConfigError::InvalidPattern {
                    pattern: p.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// True if any pattern matches somewhere in `line`
    pub fn is_match(&self, line: &str) -> bool {
        for pattern in &self.patterns {
            if pattern.is_match(line) {
                return true;
            }
        }
        false
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Decides whether a cleaned line is a sub-book title, a chapter title, or body text
#[derive(Debug, Clone)]
pub struct LineClassifier {
    sub_book: PatternSet,
    chapter: PatternSet,
    mode: SegmentMode,
}

impl LineClassifier {
    pub fn new(sub_book: PatternSet, chapter: PatternSet, mode: SegmentMode) -> Self {
        Self {
            sub_book,
            chapter,
            mode,
        }
    }

    pub fn mode(&self) -> SegmentMode {
        self.mode
    }

    /// Classify a line. Sub-book patterns are consulted only in multi-book mode
    /// and win over chapter patterns.
    pub fn classify(&self, line: &str) -> TitleKind {
        if self.mode == SegmentMode::MultiBook && self.sub_book.is_match(line) {
            TitleKind::SubBookTitle
        } else if self.chapter.is_match(line) {
            TitleKind::ChapterTitle
        } else {
            TitleKind::None
        }
    }
}

/// Remove every configured substring, then trim. Returns `None` for blank lines.
pub fn clean_line(raw: &str, remove: &[String]) -> Option<String> {
    let mut line = raw.to_string();
    for s in remove.iter().filter(|s| !s.is_empty()) {
        line = line.replace(s.as_str(), "");
    }
    let trimmed = line.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
