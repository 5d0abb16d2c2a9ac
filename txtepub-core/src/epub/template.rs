//! Container template: the skeleton tree copied into staging, and the
//! placeholder tokens substituted into it

use crate::error::{ConfigError, ConversionError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Content of the `mimetype` entry
pub const MIMETYPE: &str = "application/epub+zip";

pub const CONTENT_OPF: &str = "OEBPS/content.opf";
pub const TOC_NCX: &str = "OEBPS/toc.ncx";
pub const COVER_XHTML: &str = "OEBPS/Text/cover.xhtml";
pub const TOC_XHTML: &str = "OEBPS/Text/toc.xhtml";
pub const COVER_IMAGE: &str = "OEBPS/Images/cover.jpg";
pub const TEXT_DIR: &str = "OEBPS/Text";

/// Literal tokens replaced in the template files
pub mod placeholder {
    pub const TITLE: &str = "[BOOK'S TITLE]";
    pub const UUID: &str = "[UUID]";
    pub const ISBN: &str = "[ISBN]";
    pub const AUTHOR: &str = "[NAME LASTNAME]";
    pub const AUTHOR_FILE_AS: &str = "[LASTNAME, NAME]";
    pub const LANGUAGE: &str = "[LANGUAGE]";
    pub const DATE: &str = "[DATE]";
    pub const NAV_POINTS: &str = "[navPoint LIST]";
    pub const MANIFEST: &str = "[manifest item list]";
    pub const SPINE: &str = "[spine itemref list]";
    pub const GUIDE: &str = "[guide reference list]";
    pub const TOC_ITEMS: &str = "[toc item]";
    pub const TOC_TITLE: &str = "[TOC TITLE]";
}

const BUILTIN_FILES: &[(&str, &[u8])] = &[
    ("mimetype", include_bytes!("../../template/mimetype")),
    (
        "META-INF/container.xml",
        include_bytes!("../../template/META-INF/container.xml"),
    ),
    (CONTENT_OPF, include_bytes!("../../template/OEBPS/content.opf")),
    (TOC_NCX, include_bytes!("../../template/OEBPS/toc.ncx")),
    (COVER_XHTML, include_bytes!("../../template/OEBPS/Text/cover.xhtml")),
    (TOC_XHTML, include_bytes!("../../template/OEBPS/Text/toc.xhtml")),
    (
        "OEBPS/Styles/main.css",
        include_bytes!("../../template/OEBPS/Styles/main.css"),
    ),
    (COVER_IMAGE, include_bytes!("../../template/OEBPS/Images/cover.jpg")),
];

/// Source of the container skeleton
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Template {
    /// The template compiled into this crate
    Builtin,
    /// A caller-supplied directory tree
    Directory(PathBuf),
}

impl Template {
    /// Use `dir` if given, the built-in template otherwise.
    /// A given directory must exist.
    pub fn resolve(dir: Option<&Path>) -> Result<Self, ConfigError> {
        match dir {
            None => Ok(Template::Builtin),
            Some(dir) if dir.is_dir() => Ok(Template::Directory(dir.to_path_buf())),
            Some(dir) => Err(ConfigError::TemplateNotFound(dir.to_path_buf())),
        }
    }

    /// Write the template tree into `dest`, which must already exist
    pub fn materialize(&self, dest: &Path) -> Result<(), ConversionError> {
        match self {
            Template::Builtin => {
                for (relative, bytes) in BUILTIN_FILES {
                    let target = dest.join(relative);
                    write_file(&target, bytes).map_err(|source| ConversionError::Staging {
                        path: target.clone(),
                        source,
                    })?;
                }
                Ok(())
            }
            Template::Directory(src) => {
                tracing::info!(template = %src.display(), staging = %dest.display(), "Copying template");
                copy_tree(src, dest)
            }
        }
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)
}

fn copy_tree(src: &Path, dst: &Path) -> Result<(), ConversionError> {
    let staging_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| ConversionError::Staging { path, source }
    };

    fs::create_dir_all(dst).map_err(staging_err(dst))?;
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry.map_err(|e| staging_err(src)(io::Error::from(e)))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| staging_err(entry.path())(io::Error::new(io::ErrorKind::Other, e)))?;
        let to = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&to).map_err(staging_err(&to))?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &to).map_err(staging_err(entry.path()))?;
        } else {
            tracing::debug!(path = %entry.path().display(), "Skipping non-regular template entry");
        }
    }
    Ok(())
}

/// Replace every `(token, value)` pair in the file at `path`
pub fn substitute_file(path: &Path, pairs: &[(&str, &str)]) -> Result<(), ConversionError> {
    let template_err = |source| ConversionError::Template {
        path: path.to_path_buf(),
        source,
    };
    let mut content = fs::read_to_string(path).map_err(template_err)?;
    for (token, value) in pairs {
        content = content.replace(token, value);
    }
    fs::write(path, content).map_err(template_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_template_carries_placeholders() {
        let dir = TempDir::new().unwrap();
        Template::Builtin.materialize(dir.path()).unwrap();

        let mimetype = fs::read_to_string(dir.path().join("mimetype")).unwrap();
        assert_eq!(mimetype, MIMETYPE);

        let opf = fs::read_to_string(dir.path().join(CONTENT_OPF)).unwrap();
        for token in [
            placeholder::TITLE,
            placeholder::UUID,
            placeholder::ISBN,
            placeholder::AUTHOR,
            placeholder::AUTHOR_FILE_AS,
            placeholder::LANGUAGE,
            placeholder::DATE,
            placeholder::MANIFEST,
            placeholder::SPINE,
            placeholder::GUIDE,
        ] {
            assert!(opf.contains(token), "content.opf lacks {token}");
        }
        let ncx = fs::read_to_string(dir.path().join(TOC_NCX)).unwrap();
        assert!(ncx.contains(placeholder::NAV_POINTS));
        let toc = fs::read_to_string(dir.path().join(TOC_XHTML)).unwrap();
        assert!(toc.contains(placeholder::TOC_ITEMS));
        assert!(dir.path().join(COVER_IMAGE).is_file());
    }

    #[test]
    fn test_directory_template_is_copied() {
        let src = TempDir::new().unwrap();
        fs::create_dir_all(src.path().join("OEBPS/Text")).unwrap();
        fs::write(src.path().join("mimetype"), MIMETYPE).unwrap();
        fs::write(src.path().join("OEBPS/Text/cover.xhtml"), "<p>[BOOK'S TITLE]</p>").unwrap();

        let dst = TempDir::new().unwrap();
        let template = Template::resolve(Some(src.path())).unwrap();
        template.materialize(dst.path()).unwrap();

        let cover = fs::read_to_string(dst.path().join("OEBPS/Text/cover.xhtml")).unwrap();
        assert_eq!(cover, "<p>[BOOK'S TITLE]</p>");
    }

    #[test]
    fn test_directory_template_keeps_nested_layout() {
        let src = TempDir::new().unwrap();
        fs::create_dir_all(src.path().join("OEBPS/Images")).unwrap();
        fs::create_dir_all(src.path().join("OEBPS/Fonts")).unwrap();
        fs::create_dir_all(src.path().join("META-INF")).unwrap();
        fs::write(src.path().join("META-INF/container.xml"), "<container/>").unwrap();
        fs::write(src.path().join("OEBPS/Images/cover.jpg"), b"\xFF\xD8").unwrap();
        #[cfg(unix)]
        std::os::unix::fs::symlink(
            src.path().join("META-INF/container.xml"),
            src.path().join("OEBPS/link.xml"),
        )
        .unwrap();

        let dst = TempDir::new().unwrap();
        Template::Directory(src.path().to_path_buf())
            .materialize(dst.path())
            .unwrap();

        assert_eq!(
            fs::read_to_string(dst.path().join("META-INF/container.xml")).unwrap(),
            "<container/>"
        );
        assert_eq!(fs::read(dst.path().join("OEBPS/Images/cover.jpg")).unwrap(), b"\xFF\xD8");
        assert!(dst.path().join("OEBPS/Fonts").is_dir());
        assert!(!dst.path().join("OEBPS/link.xml").exists());
    }

    #[test]
    fn test_missing_template_directory() {
        let err = Template::resolve(Some(Path::new("/nonexistent/template"))).unwrap_err();
        assert!(matches!(err, ConfigError::TemplateNotFound(_)));
    }

    #[test]
    fn test_substitute_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("toc.ncx");
        fs::write(&path, "<text>[BOOK'S TITLE]</text>[BOOK'S TITLE]").unwrap();

        substitute_file(&path, &[(placeholder::TITLE, "红楼梦")]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<text>红楼梦</text>红楼梦");
    }
}
