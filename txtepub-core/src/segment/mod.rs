//! Segmentation of a plain-text manuscript into the document model

mod classifier;
mod segmenter;

pub use classifier::{clean_line, LineClassifier, PatternSet, SegmentMode, TitleKind};
pub use segmenter::TextSegmenter;
