//! Check command implementation

use anyhow::{bail, Context, Result};
use std::fs::File;
use std::path::Path;
use txtepub_core::epub::check_archive;

/// Verify that an EPUB archive satisfies the container rules
pub fn check(input: &Path) -> Result<()> {
    let file =
        File::open(input).with_context(|| format!("Failed to open {}", input.display()))?;

    let check = check_archive(file)
        .with_context(|| format!("Failed to read {} as a zip archive", input.display()))?;

    if check.is_valid() {
        println!("Valid EPUB container");
        println!("  Entries: {}", check.entries.len());
        Ok(())
    } else {
        for problem in &check.problems {
            eprintln!("  {}", problem);
        }
        bail!("Check failed for {}", input.display());
    }
}
