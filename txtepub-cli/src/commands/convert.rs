//! Convert command implementation

use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use txtepub_core::{BookInfo, Converter};

/// Book options; each one overrides the config file
#[derive(Args, Debug, Default)]
pub struct BookArgs {
    /// Book configuration (YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Book title; when neither this nor the config sets one, the manuscript's
    /// file name (without extension) is used
    #[arg(long)]
    pub title: Option<String>,

    /// Author name
    #[arg(long)]
    pub author: Option<String>,

    /// Language code (e.g. zh, en)
    #[arg(long)]
    pub language: Option<String>,

    /// JPEG cover image
    #[arg(long)]
    pub cover: Option<PathBuf>,

    /// Template directory replacing the built-in template
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Group chapters into sub-books
    #[arg(long)]
    pub multi_book: bool,

    /// Keep the staging directory next to the archive
    #[arg(long)]
    pub keep_staging: bool,
}

impl BookArgs {
    fn apply(&self, info: &mut BookInfo) {
        if let Some(dir) = &self.output_dir {
            info.output_dir = dir.clone();
        }
        if let Some(title) = &self.title {
            info.book_title = title.clone();
        }
        if let Some(author) = &self.author {
            info.author = author.clone();
        }
        if let Some(language) = &self.language {
            info.language = language.clone();
        }
        if let Some(cover) = &self.cover {
            info.cover_jpg = Some(cover.clone());
        }
        if let Some(template) = &self.template {
            info.template_dir = Some(template.clone());
        }
        info.has_many_books |= self.multi_book;
        info.keep_staging |= self.keep_staging;
    }
}

/// Convert a text manuscript into an EPUB archive
pub fn convert(input: &Path, args: &BookArgs) -> Result<()> {
    let mut info = super::load_book_info(args.config.as_deref(), input)?;
    args.apply(&mut info);

    let converter = Converter::new(info).context("Invalid book configuration")?;

    // Set up progress bar with animation
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Converting {}...", input.display()));

    let report = match converter.convert_file(input) {
        Ok(report) => report,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e).with_context(|| format!("Failed to convert {}", input.display()));
        }
    };

    tracing::info!(
        units = report.units_written,
        entries = report.entries.len(),
        "Built '{}'",
        converter.info().book_title
    );

    if !report.is_complete() {
        pb.finish_and_clear();
        for title in &report.failed_units {
            eprintln!("Not written: {}", title);
        }
        if report.front_matter_conflict {
            eprintln!("Front matter was committed twice and has been dropped");
        }
        bail!(
            "Incomplete book written to {}",
            report.archive_path.display()
        );
    }

    pb.finish_with_message(format!(
        "Converted {} -> {}",
        input.display(),
        report.archive_path.display()
    ));
    if let Some(staging) = &report.staging_dir {
        println!("Staging kept at {}", staging.display());
    }

    Ok(())
}
