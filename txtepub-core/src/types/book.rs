//! The BookModel - root of the document model populated by segmentation

use super::{BookMetadata, Chapter, ContentUnit, FileDescriptor, SubBook};
use crate::error::SegmentError;
use serde::{Deserialize, Serialize};

/// Reserved file name (without suffix) of the front-matter document
pub const FRONT_MATTER_FILE: &str = "front-matter";

/// Text preceding the first detected title
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrontMatter {
    pub unit: ContentUnit,
    pub file: Option<FileDescriptor>,
}

/// Singleton slot for the front matter.
///
/// Once a second commit is attempted the slot is `Conflicted` for good and no
/// front-matter document is emitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum FrontMatterSlot {
    #[default]
    Empty,
    Filled(FrontMatter),
    Conflicted,
}

impl FrontMatterSlot {
    /// The committed front matter, if exactly one was committed
    pub fn get(&self) -> Option<&FrontMatter> {
        match self {
            FrontMatterSlot::Filled(front) => Some(front),
            _ => None,
        }
    }

    pub fn is_conflicted(&self) -> bool {
        matches!(self, FrontMatterSlot::Conflicted)
    }
}

/// Body structure, chosen by segmentation mode
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", content = "units", rename_all = "snake_case")]
pub enum Body {
    Chapters(Vec<Chapter>),
    SubBooks(Vec<SubBook>),
}

/// The in-memory book: metadata, front matter, and body units
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookModel {
    pub metadata: BookMetadata,
    pub front_matter: FrontMatterSlot,
    pub body: Body,
}

impl BookModel {
    /// Create an empty model. `multi_book` selects sub-book grouping.
    pub fn new(metadata: BookMetadata, multi_book: bool) -> Self {
        let body = if multi_book {
            Body::SubBooks(Vec::new())
        } else {
            Body::Chapters(Vec::new())
        };
        Self {
            metadata,
            front_matter: FrontMatterSlot::Empty,
            body,
        }
    }

    pub fn is_multi_book(&self) -> bool {
        matches!(self.body, Body::SubBooks(_))
    }

    /// Commit the front matter. A second commit poisons the slot.
    pub fn commit_front_matter(&mut self, unit: ContentUnit) -> Result<(), SegmentError> {
        match self.front_matter {
            FrontMatterSlot::Empty => {
                self.front_matter = FrontMatterSlot::Filled(FrontMatter { unit, file: None });
                Ok(())
            }
            FrontMatterSlot::Filled(_) | FrontMatterSlot::Conflicted => {
                self.front_matter = FrontMatterSlot::Conflicted;
                Err(SegmentError::DuplicateFrontMatter)
            }
        }
    }

    /// Append a chapter. In multi-book mode it goes into the last sub-book,
    /// opening the implicit group if no sub-book exists yet.
    pub fn push_chapter(&mut self, index: usize, unit: ContentUnit) {
        match &mut self.body {
            Body::Chapters(chapters) => chapters.push(Chapter::new(index, unit)),
            Body::SubBooks(books) => {
                if books.is_empty() {
                    books.push(SubBook::implicit());
                }
                if let Some(book) = books.last_mut() {
                    book.chapters.push(Chapter::new(index, unit));
                }
            }
        }
    }

    /// Append a sub-book. In single-book mode the unit is kept as a chapter.
    pub fn push_sub_book(&mut self, index: usize, unit: ContentUnit) {
        match &mut self.body {
            Body::SubBooks(books) => books.push(SubBook::new(index, unit)),
            Body::Chapters(chapters) => {
                let next = chapters.len() + 1;
                chapters.push(Chapter::new(next, unit));
            }
        }
    }

    /// Total number of chapters, across all sub-books
    pub fn chapter_count(&self) -> usize {
        match &self.body {
            Body::Chapters(chapters) => chapters.len(),
            Body::SubBooks(books) => books.iter().map(|b| b.chapters.len()).sum(),
        }
    }

    /// Number of titled sub-books
    pub fn sub_book_count(&self) -> usize {
        match &self.body {
            Body::Chapters(_) => 0,
            Body::SubBooks(books) => books.iter().filter(|b| !b.is_implicit()).count(),
        }
    }

    /// Iterate all chapters in document order
    pub fn chapters(&self) -> Box<dyn Iterator<Item = &Chapter> + '_> {
        match &self.body {
            Body::Chapters(chapters) => Box::new(chapters.iter()),
            Body::SubBooks(books) => Box::new(books.iter().flat_map(|b| b.chapters.iter())),
        }
    }

    /// Generate a file descriptor for every document-bearing unit.
    ///
    /// Chapter numbers are zero-padded to the digit count of the total chapter
    /// count; sub-book numbers to the digit count of the sub-book count.
    pub fn assign_file_descriptors(&mut self, front_matter_title: &str) {
        let chapter_width = digits(self.chapter_count());
        let book_width = digits(self.sub_book_count());
        let fallback_title = self.metadata.display_title().to_string();

        if let FrontMatterSlot::Filled(front) = &mut self.front_matter {
            front.file = Some(FileDescriptor::new(FRONT_MATTER_FILE, front_matter_title));
        }

        let display = |title: &str| {
            if title.is_empty() {
                fallback_title.clone()
            } else {
                title.to_string()
            }
        };

        match &mut self.body {
            Body::Chapters(chapters) => {
                for chapter in chapters {
                    let name = format!("chapter-{:0width$}", chapter.index, width = chapter_width);
                    chapter.file = Some(FileDescriptor::new(name, display(&chapter.unit.title)));
                }
            }
            Body::SubBooks(books) => {
                for book in books {
                    let prefix = format!("book-{:0width$}", book.index, width = book_width);
                    if let Some(unit) = &book.unit {
                        book.file = Some(FileDescriptor::new(prefix.clone(), display(&unit.title)));
                    }
                    for chapter in &mut book.chapters {
                        let name = format!(
                            "{prefix}_chapter-{:0width$}",
                            chapter.index,
                            width = chapter_width
                        );
                        chapter.file = Some(FileDescriptor::new(name, display(&chapter.unit.title)));
                    }
                }
            }
        }
    }

    /// Every document-bearing unit paired with its file, in document order
    pub fn documents_mut(&mut self) -> Vec<(&ContentUnit, &mut FileDescriptor)> {
        let mut documents = Vec::new();

        if let FrontMatterSlot::Filled(FrontMatter {
            unit,
            file: Some(file),
        }) = &mut self.front_matter
        {
            documents.push((&*unit, file));
        }

        match &mut self.body {
            Body::Chapters(chapters) => {
                for Chapter { unit, file, .. } in chapters.iter_mut() {
                    if let Some(file) = file {
                        documents.push((&*unit, file));
                    }
                }
            }
            Body::SubBooks(books) => {
                for SubBook {
                    unit,
                    file,
                    chapters,
                    ..
                } in books.iter_mut()
                {
                    if let (Some(unit), Some(file)) = (unit.as_ref(), file.as_mut()) {
                        documents.push((unit, file));
                    }
                    for Chapter { unit, file, .. } in chapters.iter_mut() {
                        if let Some(file) = file {
                            documents.push((&*unit, file));
                        }
                    }
                }
            }
        }

        documents
    }
}

/// Decimal digit count of `n`, at least 1
fn digits(n: usize) -> usize {
    n.to_string().len()
}
