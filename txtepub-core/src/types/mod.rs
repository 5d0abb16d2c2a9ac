//! Core types for the txtepub document model

mod book;
mod chapter;
mod metadata;
mod unit;

pub use book::{BookModel, Body, FrontMatter, FrontMatterSlot, FRONT_MATTER_FILE};
pub use chapter::{Chapter, SubBook};
pub use metadata::{BookMetadata, DEFAULT_BOOK_NAME};
pub use unit::{ContentUnit, FileDescriptor, DOCUMENT_SUFFIX};
