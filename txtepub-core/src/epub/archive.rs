//! Serialization of a staged container tree into an EPUB archive

use super::template::MIMETYPE;
use crate::error::ConversionError;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Seek, Write};
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Name of the mandatory first entry
pub const MIMETYPE_ENTRY: &str = "mimetype";

/// Entries written to an archive, in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub entries: Vec<String>,
}

/// Zip the tree at `root` into a new file at `dest`
pub fn write_archive(root: &Path, dest: &Path) -> Result<ArchiveSummary, ConversionError> {
    let file = File::create(dest).map_err(|e| ConversionError::Archive {
        entry: dest.display().to_string(),
        source: ZipError::Io(e),
    })?;
    let summary = write_archive_to_writer(root, BufWriter::new(file))?;
    tracing::info!(
        archive = %dest.display(),
        entries = summary.entries.len(),
        "Archive written"
    );
    Ok(summary)
}

/// Zip the tree at `root` into any seekable writer.
///
/// `mimetype` goes first and is stored uncompressed; every other regular,
/// non-hidden file follows deflated, in sorted path order. The writer is
/// finished even when an entry fails, and the first failure is returned.
pub fn write_archive_to_writer<W: Write + Seek>(
    root: &Path,
    writer: W,
) -> Result<ArchiveSummary, ConversionError> {
    let files = collect_files(root).map_err(|e| ConversionError::Archive {
        entry: root.display().to_string(),
        source: ZipError::Io(e),
    })?;

    let mut zip = ZipWriter::new(writer);
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut summary = ArchiveSummary::default();
    let mut result = add_entry(&mut zip, MIMETYPE_ENTRY, MIMETYPE.as_bytes(), stored);
    if result.is_ok() {
        summary.entries.push(MIMETYPE_ENTRY.to_string());

        for relative in &files {
            let name = entry_name(relative);
            let added = fs::read(root.join(relative))
                .map_err(|e| ConversionError::Archive {
                    entry: name.clone(),
                    source: ZipError::Io(e),
                })
                .and_then(|bytes| add_entry(&mut zip, &name, &bytes, deflated));
            if let Err(e) = added {
                tracing::error!(entry = %name, error = %e, "Failed to add archive entry");
                result = Err(e);
                break;
            }
            summary.entries.push(name);
        }
    }

    let finished = zip.finish().map_err(|source| ConversionError::Archive {
        entry: "<central directory>".to_string(),
        source,
    });
    result?;
    finished?;
    Ok(summary)
}

fn add_entry<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    name: &str,
    bytes: &[u8],
    options: SimpleFileOptions,
) -> Result<(), ConversionError> {
    let archive_err = |source| ConversionError::Archive {
        entry: name.to_string(),
        source,
    };
    zip.start_file(name, options).map_err(archive_err)?;
    zip.write_all(bytes)
        .map_err(|e| archive_err(ZipError::Io(e)))
}

/// Archive entry name for a relative path, always `/`-separated
pub fn entry_name(relative: &Path) -> String {
    let joined = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/");
    joined.replace('\\', "/")
}

/// Relative paths of every file to archive, sorted.
/// Skips the root `mimetype`, hidden entries and symbolic links.
fn collect_files(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        let entry = entry?;
        let file_type = entry.file_type();
        if file_type.is_symlink() {
            tracing::debug!(path = %entry.path().display(), "Skipping symbolic link");
            continue;
        }
        if !file_type.is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        if relative != Path::new(MIMETYPE_ENTRY) {
            files.push(relative.to_path_buf());
        }
    }
    Ok(files)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// Structural facts about an existing archive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveCheck {
    pub entries: Vec<String>,
    pub problems: Vec<String>,
}

impl ArchiveCheck {
    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Verify the container invariants of an archive: a stored `mimetype` first
/// entry with the media type as content, and `/`-separated entry names
pub fn check_archive<R: Read + Seek>(reader: R) -> Result<ArchiveCheck, ZipError> {
    let mut archive = ZipArchive::new(reader)?;
    let mut check = ArchiveCheck::default();

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let name = file.name().to_string();

        if i == 0 {
            if name != MIMETYPE_ENTRY {
                check
                    .problems
                    .push(format!("first entry is '{name}', expected '{MIMETYPE_ENTRY}'"));
            } else {
                if file.compression() != CompressionMethod::Stored {
                    check
                        .problems
                        .push("mimetype entry is compressed".to_string());
                }
                let mut content = String::new();
                file.read_to_string(&mut content)?;
                if content != MIMETYPE {
                    check
                        .problems
                        .push(format!("mimetype content is '{content}'"));
                }
            }
        }
        if name.contains('\\') {
            check
                .problems
                .push(format!("entry '{name}' uses a backslash separator"));
        }
        check.entries.push(name);
    }

    if check.entries.is_empty() {
        check.problems.push("archive is empty".to_string());
    }
    Ok(check)
}
