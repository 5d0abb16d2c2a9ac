//! EPUB container building: rendering, navigation, templating and archiving

mod archive;
mod assembler;
mod navigation;
mod render;
mod staging;
mod template;

pub use archive::{
    check_archive, entry_name, write_archive, write_archive_to_writer, ArchiveCheck,
    ArchiveSummary, MIMETYPE_ENTRY,
};
pub use assembler::{BuildReport, ContainerAssembler};
pub use navigation::{
    GuideRef, ManifestItem, NavFragments, NavPoint, NavigationBuilder, SpineRef, TocLine,
    COVER_FILE, TOC_FILE,
};
pub use render::ContentRenderer;
pub use staging::{StagingDir, STAGING_DIR_NAME};
pub use template::{placeholder, substitute_file, Template, MIMETYPE};
