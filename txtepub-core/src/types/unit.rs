//! Text-bearing units and the file descriptors generated for them

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Suffix of every generated content document
pub const DOCUMENT_SUFFIX: &str = ".xhtml";

/// The minimal text-bearing entity: a title and its rendered body lines.
///
/// Body lines are already wrapped in markup. A titled unit's first line is its
/// heading; every other line is a paragraph.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContentUnit {
    /// Title (empty for front matter and untitled units)
    pub title: String,

    /// Rendered body lines, in manuscript order
    pub lines: Vec<String>,
}

impl ContentUnit {
    /// Create an untitled unit with no body
    pub fn untitled() -> Self {
        Self::default()
    }

    /// Start a titled unit whose first body line is the heading for `title`
    pub fn with_heading(title: impl Into<String>, level: u8) -> Self {
        let title = title.into();
        let level = level.clamp(1, 6);
        let heading = format!("<h{level}>{title}</h{level}>");
        Self {
            title,
            lines: vec![heading],
        }
    }

    /// Append a body paragraph
    pub fn push_paragraph(&mut self, text: &str) {
        self.lines.push(format!("<p>{text}</p>"));
    }
}

/// Generated file information for one content document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileDescriptor {
    /// Logical name without suffix, also used as the manifest id
    pub name: String,

    /// File suffix, including the dot
    pub suffix: String,

    /// Text used in the document's `<title>` and in navigation labels
    pub display_title: String,

    /// Where the document was written; `None` until written or if writing failed
    pub path: Option<PathBuf>,
}

impl FileDescriptor {
    pub fn new(name: impl Into<String>, display_title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            suffix: DOCUMENT_SUFFIX.to_string(),
            display_title: display_title.into(),
            path: None,
        }
    }

    /// Name with suffix, e.g. `chapter-01.xhtml`
    pub fn full_name(&self) -> String {
        format!("{}{}", self.name, self.suffix)
    }

    /// Whether the document exists on disk
    pub fn is_written(&self) -> bool {
        self.path.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_is_first_line() {
        let mut unit = ContentUnit::with_heading("第一章 开始", 1);
        unit.push_paragraph("这是正文。");
        assert_eq!(unit.title, "第一章 开始");
        assert_eq!(
            unit.lines,
            vec!["<h1>第一章 开始</h1>", "<p>这是正文。</p>"]
        );
    }

    #[test]
    fn test_full_name() {
        let file = FileDescriptor::new("chapter-07", "Seven");
        assert_eq!(file.full_name(), "chapter-07.xhtml");
        assert!(!file.is_written());
    }
}
