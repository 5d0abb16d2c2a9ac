//! Builds the container: stage template, write documents, fill placeholders,
//! place the cover, and zip the result

use super::archive::write_archive;
use super::navigation::NavigationBuilder;
use super::render::ContentRenderer;
use super::staging::{StagingDir, STAGING_DIR_NAME};
use super::template::{
    placeholder, substitute_file, Template, CONTENT_OPF, COVER_IMAGE, COVER_XHTML, TEXT_DIR,
    TOC_NCX, TOC_XHTML,
};
use crate::config::BookInfo;
use crate::error::{ConversionError, Result};
use crate::types::BookModel;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of one build
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    /// The produced archive
    pub archive_path: PathBuf,

    /// Archive entry names, in order
    pub entries: Vec<String>,

    /// Number of content documents written
    pub units_written: usize,

    /// Titles of units whose document could not be written
    pub failed_units: Vec<String>,

    /// Whether front matter was dropped after a duplicate commit
    pub front_matter_conflict: bool,

    /// The staging tree, when kept
    pub staging_dir: Option<PathBuf>,
}

impl BuildReport {
    /// True when every unit made it into the archive
    pub fn is_complete(&self) -> bool {
        self.failed_units.is_empty() && !self.front_matter_conflict
    }
}

/// Assembles a populated model into an EPUB archive
#[derive(Debug, Clone)]
pub struct ContainerAssembler {
    info: BookInfo,
    template: Template,
    renderer: ContentRenderer,
    navigation: NavigationBuilder,
}

impl ContainerAssembler {
    /// Resolve the template named by `info`. Fails if it does not exist.
    pub fn new(info: BookInfo) -> Result<Self> {
        let template = Template::resolve(info.template_dir.as_deref())?;
        let navigation = NavigationBuilder::new(info.cover_title.clone(), info.toc_title.clone());
        Ok(Self {
            info,
            template,
            renderer: ContentRenderer::new(),
            navigation,
        })
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Run every assembly step for `model`, whose file descriptors must be assigned.
    /// Written paths are recorded on the model's descriptors.
    pub fn assemble(&self, model: &mut BookModel) -> Result<BuildReport> {
        let output_dir = &self.info.output_dir;
        fs::create_dir_all(output_dir).map_err(|source| ConversionError::Staging {
            path: output_dir.clone(),
            source,
        })?;

        let staging = StagingDir::create(output_dir.join(STAGING_DIR_NAME))?;
        self.template.materialize(staging.path())?;

        let (units_written, failed_units) = self.write_documents(staging.path(), model)?;
        self.fill_placeholders(staging.path(), model)?;
        self.place_cover(staging.path());

        let archive_path = output_dir.join(model.metadata.archive_file_name());
        let summary = write_archive(staging.path(), &archive_path)?;

        let staging_dir = if self.info.keep_staging {
            Some(staging.persist())
        } else {
            None
        };

        Ok(BuildReport {
            archive_path,
            entries: summary.entries,
            units_written,
            failed_units,
            front_matter_conflict: model.front_matter.is_conflicted(),
            staging_dir,
        })
    }

    /// Render and write every document. A failed write is logged and the unit
    /// is left without a path; the remaining units are still written.
    fn write_documents(
        &self,
        staging: &Path,
        model: &mut BookModel,
    ) -> Result<(usize, Vec<String>)> {
        let text_dir = staging.join(TEXT_DIR);
        fs::create_dir_all(&text_dir).map_err(|source| ConversionError::Staging {
            path: text_dir.clone(),
            source,
        })?;

        let mut written = 0;
        let mut failed = Vec::new();
        for (unit, file) in model.documents_mut() {
            let path = text_dir.join(file.full_name());
            let document = self.renderer.render_unit(unit, &file.display_title);
            match fs::write(&path, document) {
                Ok(()) => {
                    tracing::debug!(title = %file.display_title, path = %path.display(), "Document written");
                    file.path = Some(path);
                    written += 1;
                }
                Err(e) => {
                    tracing::error!(
                        title = %file.display_title,
                        path = %path.display(),
                        error = %e,
                        "Failed to write document"
                    );
                    file.path = None;
                    failed.push(file.display_title.clone());
                }
            }
        }

        tracing::info!(written, failed = failed.len(), "Content documents written");
        Ok((written, failed))
    }

    fn fill_placeholders(&self, staging: &Path, model: &BookModel) -> Result<()> {
        let fragments = self.navigation.build(model);
        let metadata = &model.metadata;
        let title = metadata.title.as_str();
        let isbn = metadata.isbn.as_deref().unwrap_or("");

        substitute_file(
            &staging.join(COVER_XHTML),
            &[(placeholder::TITLE, title)],
        )?;

        let toc_items = fragments.render_toc();
        substitute_file(
            &staging.join(TOC_XHTML),
            &[
                (placeholder::TOC_ITEMS, toc_items.as_str()),
                (placeholder::TOC_TITLE, self.info.toc_title.as_str()),
            ],
        )?;

        let nav_points = fragments.render_nav_points();
        substitute_file(
            &staging.join(TOC_NCX),
            &[
                (placeholder::UUID, metadata.uuid.as_str()),
                (placeholder::ISBN, isbn),
                (placeholder::TITLE, title),
                (placeholder::NAV_POINTS, nav_points.as_str()),
            ],
        )?;

        let manifest = fragments.render_manifest();
        let spine = fragments.render_spine();
        let guide = fragments.render_guide();
        substitute_file(
            &staging.join(CONTENT_OPF),
            &[
                (placeholder::UUID, metadata.uuid.as_str()),
                (placeholder::ISBN, isbn),
                (placeholder::TITLE, title),
                (placeholder::AUTHOR, metadata.author.as_str()),
                (placeholder::AUTHOR_FILE_AS, metadata.author.as_str()),
                (placeholder::LANGUAGE, metadata.language.as_str()),
                (placeholder::DATE, metadata.create_date.as_str()),
                (placeholder::MANIFEST, manifest.as_str()),
                (placeholder::SPINE, spine.as_str()),
                (placeholder::GUIDE, guide.as_str()),
            ],
        )?;

        Ok(())
    }

    /// Copy the configured JPEG cover over the template's placeholder.
    /// Any problem leaves the placeholder in place.
    fn place_cover(&self, staging: &Path) {
        let Some(cover) = &self.info.cover_jpg else {
            return;
        };

        let is_jpeg = cover
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| matches!(e.to_ascii_lowercase().as_str(), "jpg" | "jpeg"))
            .unwrap_or(false);
        if !is_jpeg {
            tracing::warn!(cover = %cover.display(), "Cover is not a JPEG, keeping template cover");
            return;
        }

        let dest = staging.join(COVER_IMAGE);
        if let Some(parent) = dest.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::warn!(path = %parent.display(), error = %e, "Cannot create image directory");
                return;
            }
        }
        match fs::copy(cover, &dest) {
            Ok(_) => tracing::debug!(cover = %cover.display(), "Cover image copied"),
            Err(e) => {
                tracing::warn!(cover = %cover.display(), error = %e, "Cover image unreadable, keeping template cover")
            }
        }
    }
}
