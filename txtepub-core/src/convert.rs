//! End-to-end conversion: manuscript text to EPUB archive

use crate::config::BookInfo;
use crate::epub::{BuildReport, ContainerAssembler};
use crate::error::{ParseError, Result};
use crate::segment::TextSegmenter;
use crate::types::BookModel;
use std::path::Path;

/// Read a UTF-8 manuscript into lines. A leading byte-order mark is dropped.
pub fn read_manuscript(path: &Path) -> std::result::Result<Vec<String>, ParseError> {
    let bytes = std::fs::read(path).map_err(|source| ParseError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|_| ParseError::InvalidUtf8 {
        path: path.to_path_buf(),
    })?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    let lines: Vec<String> = text.lines().map(str::to_string).collect();
    tracing::info!(lines = lines.len(), path = %path.display(), "Manuscript read");
    Ok(lines)
}

/// A validated conversion setup. Construction fails on any configuration
/// error, before anything is written.
#[derive(Debug, Clone)]
pub struct Converter {
    info: BookInfo,
    segmenter: TextSegmenter,
    assembler: ContainerAssembler,
}

impl Converter {
    pub fn new(info: BookInfo) -> Result<Self> {
        let segmenter = info.segmenter()?;
        let assembler = ContainerAssembler::new(info.clone())?;
        Ok(Self {
            info,
            segmenter,
            assembler,
        })
    }

    pub fn info(&self) -> &BookInfo {
        &self.info
    }

    /// Segment lines into a model with file descriptors assigned
    pub fn segment_lines<I, S>(&self, lines: I) -> BookModel
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut model = self.segmenter.segment(lines, self.info.metadata());
        model.assign_file_descriptors(&self.info.front_matter_title);
        model
    }

    /// Segment manuscript text
    pub fn segment_text(&self, text: &str) -> BookModel {
        self.segment_lines(text.lines())
    }

    /// Segment a manuscript file
    pub fn segment_file(&self, path: &Path) -> Result<BookModel> {
        let lines = read_manuscript(path)?;
        Ok(self.segment_lines(lines))
    }

    /// Convert manuscript text into an archive
    pub fn convert_text(&self, text: &str) -> Result<BuildReport> {
        let mut model = self.segment_text(text);
        self.assembler.assemble(&mut model)
    }

    /// Convert a manuscript file into an archive
    pub fn convert_file(&self, path: &Path) -> Result<BuildReport> {
        let mut model = self.segment_file(path)?;
        self.assembler.assemble(&mut model)
    }
}
