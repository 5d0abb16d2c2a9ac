//! Chapters and the optional sub-book grouping above them

use super::{ContentUnit, FileDescriptor};
use serde::{Deserialize, Serialize};

/// A titled unit of the book body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chapter {
    /// 1-based index, within the book or within the enclosing sub-book
    pub index: usize,

    /// Title and body
    pub unit: ContentUnit,

    /// Generated file, assigned once segmentation is complete
    pub file: Option<FileDescriptor>,
}

impl Chapter {
    pub fn new(index: usize, unit: ContentUnit) -> Self {
        Self {
            index,
            unit,
            file: None,
        }
    }

    /// Chapter title
    pub fn title(&self) -> &str {
        &self.unit.title
    }
}

/// A group of chapters, used only in multi-book mode
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubBook {
    /// 1-based index; 0 is the implicit group for chapters preceding the first sub-book title
    pub index: usize,

    /// The sub-book's own document: its heading plus any text before the first chapter.
    /// `None` for the implicit group.
    pub unit: Option<ContentUnit>,

    /// Generated file for `unit`
    pub file: Option<FileDescriptor>,

    /// Chapters in manuscript order
    pub chapters: Vec<Chapter>,
}

impl SubBook {
    pub fn new(index: usize, unit: ContentUnit) -> Self {
        Self {
            index,
            unit: Some(unit),
            file: None,
            chapters: Vec::new(),
        }
    }

    /// The untitled group holding chapters that appear before any sub-book title
    pub fn implicit() -> Self {
        Self {
            index: 0,
            unit: None,
            file: None,
            chapters: Vec::new(),
        }
    }

    /// Sub-book title, empty for the implicit group
    pub fn title(&self) -> &str {
        self.unit.as_ref().map(|u| u.title.as_str()).unwrap_or("")
    }

    pub fn is_implicit(&self) -> bool {
        self.unit.is_none()
    }
}
