//! Line-driven state machine that builds the BookModel

use super::classifier::{clean_line, LineClassifier, SegmentMode, TitleKind};
use crate::types::{BookMetadata, BookModel, ContentUnit};

/// Where the segmenter is in the manuscript
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Nothing accumulated yet
    BeforeFirstTitle,
    /// Accumulating body text that precedes every title
    InFrontMatter,
    /// Accumulating a sub-book's own text (multi-book mode)
    InSubBook,
    /// Accumulating a chapter
    InChapter,
}

/// Splits manuscript lines into front matter, sub-books and chapters.
///
/// The segmenter holds configuration only; every call to [`segment`](Self::segment)
/// starts from a fresh run.
#[derive(Debug, Clone)]
pub struct TextSegmenter {
    classifier: LineClassifier,
    remove: Vec<String>,
}

impl TextSegmenter {
    pub fn new(classifier: LineClassifier, remove: Vec<String>) -> Self {
        Self { classifier, remove }
    }

    pub fn classifier(&self) -> &LineClassifier {
        &self.classifier
    }

    /// Segment `lines` into a new model carrying `metadata`
    pub fn segment<I, S>(&self, lines: I, metadata: BookMetadata) -> BookModel
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let multi_book = self.classifier.mode() == SegmentMode::MultiBook;
        let mut run = Run::new(BookModel::new(metadata, multi_book), multi_book);

        for raw in lines {
            let Some(line) = clean_line(raw.as_ref(), &self.remove) else {
                continue;
            };
            match self.classifier.classify(&line) {
                TitleKind::None => run.push_body(&line),
                kind => run.open_title(kind, line),
            }
        }

        run.finish()
    }
}

/// Accumulators for a single segmentation pass
struct Run {
    model: BookModel,
    multi_book: bool,
    state: State,
    open: ContentUnit,
    sub_book_index: usize,
    chapter_index: usize,
}

impl Run {
    fn new(model: BookModel, multi_book: bool) -> Self {
        Self {
            model,
            multi_book,
            state: State::BeforeFirstTitle,
            open: ContentUnit::untitled(),
            sub_book_index: 0,
            chapter_index: 0,
        }
    }

    fn push_body(&mut self, line: &str) {
        if self.state == State::BeforeFirstTitle {
            self.state = State::InFrontMatter;
        }
        self.open.push_paragraph(line);
    }

    fn open_title(&mut self, kind: TitleKind, title: String) {
        self.close_open();

        match kind {
            TitleKind::SubBookTitle => {
                self.sub_book_index += 1;
                self.chapter_index = 0;
                self.open = ContentUnit::with_heading(title, 1);
                self.state = State::InSubBook;
            }
            _ => {
                self.chapter_index += 1;
                let level = if self.multi_book { 2 } else { 1 };
                self.open = ContentUnit::with_heading(title, level);
                self.state = State::InChapter;
            }
        }
    }

    /// Commit the unit being accumulated into the model
    fn close_open(&mut self) {
        let unit = std::mem::take(&mut self.open);
        match self.state {
            State::BeforeFirstTitle => {}
            State::InFrontMatter => {
                tracing::debug!(lines = unit.lines.len(), "Front matter committed");
                if let Err(e) = self.model.commit_front_matter(unit) {
                    tracing::error!(error = %e, "Front matter will not be emitted");
                }
            }
            State::InSubBook => {
                tracing::debug!(title = %unit.title, lines = unit.lines.len(), "Sub-book committed");
                self.model.push_sub_book(self.sub_book_index, unit);
            }
            State::InChapter => {
                tracing::debug!(title = %unit.title, lines = unit.lines.len(), "Chapter committed");
                self.model.push_chapter(self.chapter_index, unit);
            }
        }
    }

    fn finish(mut self) -> BookModel {
        match self.state {
            State::BeforeFirstTitle => {
                tracing::warn!("Manuscript has no text");
            }
            State::InFrontMatter => {
                // No title anywhere: the whole text is one untitled chapter.
                tracing::warn!(
                    lines = self.open.lines.len(),
                    "No title detected, keeping the manuscript as a single untitled chapter"
                );
                let unit = std::mem::take(&mut self.open);
                self.model.push_chapter(1, unit);
            }
            State::InSubBook | State::InChapter => self.close_open(),
        }

        tracing::info!(
            chapters = self.model.chapter_count(),
            sub_books = self.model.sub_book_count(),
            front_matter = self.model.front_matter.get().is_some(),
            "Segmentation complete"
        );
        self.model
    }
}
