//! Inspect command implementation

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use txtepub_core::{Body, BookModel, Converter, FileDescriptor};

/// One document-bearing unit of the outline
#[derive(Serialize)]
struct OutlineUnit {
    kind: &'static str,
    index: usize,
    title: String,
    file: Option<String>,
    lines: usize,
    depth: usize,
}

/// Segmentation outline output
#[derive(Serialize)]
struct Outline {
    title: String,
    multi_book: bool,
    chapters: usize,
    sub_books: usize,
    units: Vec<OutlineUnit>,
}

fn file_name(file: &Option<FileDescriptor>) -> Option<String> {
    file.as_ref().map(FileDescriptor::full_name)
}

impl Outline {
    fn from_model(model: &BookModel) -> Self {
        let mut units = Vec::new();

        if let Some(front) = model.front_matter.get() {
            units.push(OutlineUnit {
                kind: "front_matter",
                index: 0,
                title: front
                    .file
                    .as_ref()
                    .map(|f| f.display_title.clone())
                    .unwrap_or_default(),
                file: file_name(&front.file),
                lines: front.unit.lines.len(),
                depth: 0,
            });
        }

        match &model.body {
            Body::Chapters(chapters) => {
                units.extend(chapters.iter().map(|c| OutlineUnit {
                    kind: "chapter",
                    index: c.index,
                    title: c.title().to_string(),
                    file: file_name(&c.file),
                    lines: c.unit.lines.len(),
                    depth: 0,
                }));
            }
            Body::SubBooks(books) => {
                for book in books {
                    if let Some(unit) = &book.unit {
                        units.push(OutlineUnit {
                            kind: "sub_book",
                            index: book.index,
                            title: unit.title.clone(),
                            file: file_name(&book.file),
                            lines: unit.lines.len(),
                            depth: 0,
                        });
                    }
                    let depth = usize::from(!book.is_implicit());
                    units.extend(book.chapters.iter().map(|c| OutlineUnit {
                        kind: "chapter",
                        index: c.index,
                        title: c.title().to_string(),
                        file: file_name(&c.file),
                        lines: c.unit.lines.len(),
                        depth,
                    }));
                }
            }
        }

        Self {
            title: model.metadata.display_title().to_string(),
            multi_book: model.is_multi_book(),
            chapters: model.chapter_count(),
            sub_books: model.sub_book_count(),
            units,
        }
    }
}

/// Print the segmented outline of a manuscript without building anything
pub fn inspect(input: &Path, config: Option<&Path>, multi_book: bool, json: bool) -> Result<()> {
    let mut info = super::load_book_info(config, input)?;
    info.has_many_books |= multi_book;

    let converter = Converter::new(info).context("Invalid book configuration")?;
    let model = converter
        .segment_file(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    if model.front_matter.is_conflicted() {
        tracing::warn!("Front matter was committed twice and has been dropped");
    }

    let outline = Outline::from_model(&model);

    if json {
        println!("{}", serde_json::to_string_pretty(&outline)?);
    } else {
        println!("Title:     {}", outline.title);
        println!("Chapters:  {}", outline.chapters);
        if outline.multi_book {
            println!("Sub-books: {}", outline.sub_books);
        }
        println!();
        for unit in &outline.units {
            let indent = "  ".repeat(unit.depth);
            let title = if unit.title.is_empty() {
                "(untitled)"
            } else {
                unit.title.as_str()
            };
            println!(
                "{}{:<12} {} [{} lines] {}",
                indent,
                unit.kind,
                title,
                unit.lines,
                unit.file.as_deref().unwrap_or("-")
            );
        }
    }

    Ok(())
}
