//! Navigation, manifest, spine, guide and TOC fragments
//!
//! Fragments are collected as records in document order and rendered to text
//! only when substituted into the template.

use crate::types::{Body, BookModel, Chapter, FileDescriptor};

/// Directory of the content documents, relative to the package document
const TEXT_DIR: &str = "Text";

/// Template file names of the two pseudo-entries
pub const COVER_FILE: &str = "cover.xhtml";
pub const TOC_FILE: &str = "toc.xhtml";

/// One node of the NCX navigation map
#[derive(Debug, Clone, PartialEq)]
pub struct NavPoint {
    pub play_order: usize,
    pub label: String,
    pub file_name: String,
    pub children: Vec<NavPoint>,
}

impl NavPoint {
    fn render_into(&self, out: &mut String) {
        out.push_str(&format!(
            r#"<navPoint id="navPoint-{n}" playOrder="{n}"><navLabel><text>{label}</text></navLabel><content src="{TEXT_DIR}/{file}"/>"#,
            n = self.play_order,
            label = self.label,
            file = self.file_name,
        ));
        if !self.children.is_empty() {
            out.push('\n');
            for child in &self.children {
                child.render_into(out);
            }
        }
        out.push_str("</navPoint>\n");
    }
}

/// A `<item>` in the package manifest
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestItem {
    pub id: String,
    pub file_name: String,
}

/// A `<itemref>` in the spine
#[derive(Debug, Clone, PartialEq)]
pub struct SpineRef {
    pub idref: String,
}

/// A `<reference>` in the guide
#[derive(Debug, Clone, PartialEq)]
pub struct GuideRef {
    pub kind: &'static str,
    pub file_name: String,
    pub title: String,
}

/// A line of the human-readable table of contents
#[derive(Debug, Clone, PartialEq)]
pub struct TocLine {
    pub file_name: String,
    pub title: String,
}

/// The ordered fragments produced for one book
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavFragments {
    pub nav_points: Vec<NavPoint>,
    pub manifest: Vec<ManifestItem>,
    pub spine: Vec<SpineRef>,
    pub guide: Vec<GuideRef>,
    pub toc: Vec<TocLine>,
}

impl NavFragments {
    pub fn render_nav_points(&self) -> String {
        let mut out = String::new();
        for point in &self.nav_points {
            point.render_into(&mut out);
        }
        out
    }

    pub fn render_manifest(&self) -> String {
        self.manifest
            .iter()
            .map(|item| {
                format!(
                    "<item href=\"{TEXT_DIR}/{}\" id=\"{}\" media-type=\"application/xhtml+xml\"/>\n",
                    item.file_name, item.id
                )
            })
            .collect()
    }

    pub fn render_spine(&self) -> String {
        self.spine
            .iter()
            .map(|r| format!("<itemref idref=\"{}\"/>\n", r.idref))
            .collect()
    }

    pub fn render_guide(&self) -> String {
        self.guide
            .iter()
            .map(|r| {
                format!(
                    "<reference type=\"{}\" href=\"{TEXT_DIR}/{}\" title=\"{}\"/>\n",
                    r.kind, r.file_name, r.title
                )
            })
            .collect()
    }

    pub fn render_toc(&self) -> String {
        self.toc
            .iter()
            .map(|l| format!("<p><a href=\"../{TEXT_DIR}/{}\">{}</a></p>\n", l.file_name, l.title))
            .collect()
    }

    /// Play orders of every nav point, depth-first
    pub fn play_orders(&self) -> Vec<usize> {
        fn walk(points: &[NavPoint], out: &mut Vec<usize>) {
            for p in points {
                out.push(p.play_order);
                walk(&p.children, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.nav_points, &mut out);
        out
    }
}

/// Walks a populated model and accumulates its fragments
#[derive(Debug, Clone)]
pub struct NavigationBuilder {
    cover_title: String,
    toc_title: String,
}

impl NavigationBuilder {
    pub fn new(cover_title: impl Into<String>, toc_title: impl Into<String>) -> Self {
        Self {
            cover_title: cover_title.into(),
            toc_title: toc_title.into(),
        }
    }

    /// Build fragments for every written document of `model`.
    ///
    /// Units without a written file are left out so nothing references a
    /// missing document.
    pub fn build(&self, model: &BookModel) -> NavFragments {
        let mut acc = Accumulator::default();

        acc.pseudo_entry("cover", &self.cover_title, COVER_FILE);
        acc.pseudo_entry("toc", &self.toc_title, TOC_FILE);

        if let Some(file) = model.front_matter.get().and_then(|f| f.file.as_ref()) {
            if let Some(point) = acc.document(file) {
                acc.nav_points.push(point);
            }
        }

        match &model.body {
            Body::Chapters(chapters) => {
                let points = acc.chapters(chapters);
                acc.nav_points.extend(points);
            }
            Body::SubBooks(books) => {
                for book in books {
                    let container = book.file.as_ref().and_then(|file| acc.document(file));
                    let children = acc.chapters(&book.chapters);
                    match container {
                        Some(mut point) => {
                            point.children = children;
                            acc.nav_points.push(point);
                        }
                        None => acc.nav_points.extend(children),
                    }
                }
            }
        }

        tracing::debug!(
            nav_points = acc.play_order,
            manifest_items = acc.fragments.manifest.len(),
            "Navigation fragments built"
        );
        acc.finish()
    }
}

#[derive(Default)]
struct Accumulator {
    play_order: usize,
    nav_points: Vec<NavPoint>,
    fragments: NavFragments,
}

impl Accumulator {
    fn next_play_order(&mut self) -> usize {
        self.play_order += 1;
        self.play_order
    }

    fn pseudo_entry(&mut self, kind: &'static str, title: &str, file_name: &str) {
        let play_order = self.next_play_order();
        self.nav_points.push(NavPoint {
            play_order,
            label: title.to_string(),
            file_name: file_name.to_string(),
            children: Vec::new(),
        });
        self.fragments.guide.push(GuideRef {
            kind,
            file_name: file_name.to_string(),
            title: title.to_string(),
        });
        self.fragments.toc.push(TocLine {
            file_name: file_name.to_string(),
            title: title.to_string(),
        });
    }

    /// Record a body document; returns its nav point for the caller to place
    fn document(&mut self, file: &FileDescriptor) -> Option<NavPoint> {
        if !file.is_written() {
            tracing::warn!(file = %file.full_name(), "Document was not written, leaving it out of navigation");
            return None;
        }

        let play_order = self.next_play_order();
        let file_name = file.full_name();
        self.fragments.manifest.push(ManifestItem {
            id: file.name.clone(),
            file_name: file_name.clone(),
        });
        self.fragments.spine.push(SpineRef {
            idref: file.name.clone(),
        });
        self.fragments.guide.push(GuideRef {
            kind: "text",
            file_name: file_name.clone(),
            title: file.display_title.clone(),
        });
        self.fragments.toc.push(TocLine {
            file_name: file_name.clone(),
            title: file.display_title.clone(),
        });
        Some(NavPoint {
            play_order,
            label: file.display_title.clone(),
            file_name,
            children: Vec::new(),
        })
    }

    fn chapters(&mut self, chapters: &[Chapter]) -> Vec<NavPoint> {
        chapters
            .iter()
            .filter_map(|c| c.file.as_ref())
            .filter_map(|file| self.document(file))
            .collect()
    }

    fn finish(mut self) -> NavFragments {
        self.fragments.nav_points = self.nav_points;
        self.fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::{LineClassifier, PatternSet, SegmentMode, TextSegmenter};
    use crate::types::{BookMetadata, ContentUnit};
    use std::path::PathBuf;

    fn written(model: &mut BookModel) {
        for (_, file) in model.documents_mut() {
            file.path = Some(PathBuf::from(file.full_name()));
        }
    }

    fn single_book() -> BookModel {
        let mut model = BookModel::new(BookMetadata::new("书", "zh"), false);
        let mut front = ContentUnit::untitled();
        front.push_paragraph("前言");
        model.commit_front_matter(front).unwrap();
        model.push_chapter(1, ContentUnit::with_heading("第一章", 1));
        model.push_chapter(2, ContentUnit::with_heading("第二章", 1));
        model.assign_file_descriptors("引言");
        written(&mut model);
        model
    }

    #[test]
    fn test_order_and_play_orders() {
        let fragments = NavigationBuilder::new("封面", "目录").build(&single_book());

        let labels: Vec<&str> = fragments.nav_points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["封面", "目录", "引言", "第一章", "第二章"]);
        assert_eq!(fragments.play_orders(), vec![1, 2, 3, 4, 5]);

        let ids: Vec<&str> = fragments.manifest.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["front-matter", "chapter-1", "chapter-2"]);
        assert_eq!(fragments.spine.len(), 3);
        assert_eq!(fragments.guide.len(), 5);
        assert_eq!(fragments.guide[0].kind, "cover");
        assert_eq!(fragments.guide[1].kind, "toc");
        assert_eq!(fragments.toc.len(), 5);
    }

    #[test]
    fn test_unwritten_documents_are_skipped() {
        let mut model = single_book();
        if let Body::Chapters(chapters) = &mut model.body {
            chapters[0].file.as_mut().unwrap().path = None;
        }
        let fragments = NavigationBuilder::new("封面", "目录").build(&model);

        assert_eq!(fragments.play_orders(), vec![1, 2, 3, 4]);
        let ids: Vec<&str> = fragments.manifest.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["front-matter", "chapter-2"]);
    }

    #[test]
    fn test_sub_books_nest_their_chapters() {
        let mut model = BookModel::new(BookMetadata::new("书", "zh"), true);
        model.push_sub_book(1, ContentUnit::with_heading("第一卷", 1));
        model.push_chapter(1, ContentUnit::with_heading("第一章", 2));
        model.push_chapter(2, ContentUnit::with_heading("第二章", 2));
        model.push_sub_book(2, ContentUnit::with_heading("第二卷", 1));
        model.push_chapter(1, ContentUnit::with_heading("第一章", 2));
        model.assign_file_descriptors("引言");
        written(&mut model);

        let fragments = NavigationBuilder::new("封面", "目录").build(&model);

        assert_eq!(fragments.nav_points.len(), 4);
        assert_eq!(fragments.nav_points[2].label, "第一卷");
        assert_eq!(fragments.nav_points[2].children.len(), 2);
        assert_eq!(fragments.nav_points[3].children.len(), 1);
        assert_eq!(fragments.play_orders(), vec![1, 2, 3, 4, 5, 6, 7]);

        let spine: Vec<&str> = fragments.spine.iter().map(|s| s.idref.as_str()).collect();
        assert_eq!(
            spine,
            vec!["book-1", "book-1_chapter-1", "book-1_chapter-2", "book-2", "book-2_chapter-1"]
        );
    }

    #[test]
    fn test_implicit_group_chapters_are_top_level() {
        let segmenter = TextSegmenter::new(
            LineClassifier::new(
                PatternSet::compile(["^第.{1,5}卷"]).unwrap(),
                PatternSet::compile(["^第.{1,10}章"]).unwrap(),
                SegmentMode::MultiBook,
            ),
            Vec::new(),
        );
        let text = "第一章 甲\n正文\n第一卷 上\n第一章 乙\n正文";
        let mut model = segmenter.segment(text.lines(), BookMetadata::new("书", "zh"));
        model.assign_file_descriptors("引言");
        written(&mut model);

        let fragments = NavigationBuilder::new("封面", "目录").build(&model);

        let spine: Vec<&str> = fragments.spine.iter().map(|s| s.idref.as_str()).collect();
        assert_eq!(spine, vec!["book-0_chapter-1", "book-1", "book-1_chapter-1"]);

        let labels: Vec<&str> = fragments.nav_points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["封面", "目录", "第一章 甲", "第一卷 上"]);
        assert!(fragments.nav_points[2].children.is_empty());
        assert_eq!(fragments.nav_points[3].children.len(), 1);
        assert_eq!(fragments.nav_points[3].children[0].file_name, "book-1_chapter-1.xhtml");
        assert_eq!(fragments.play_orders(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_rendered_fragments() {
        let fragments = NavigationBuilder::new("封面", "目录").build(&single_book());

        insta::assert_snapshot!(fragments.render_manifest().trim_end(), @r###"
        <item href="Text/front-matter.xhtml" id="front-matter" media-type="application/xhtml+xml"/>
        <item href="Text/chapter-1.xhtml" id="chapter-1" media-type="application/xhtml+xml"/>
        <item href="Text/chapter-2.xhtml" id="chapter-2" media-type="application/xhtml+xml"/>
        "###);
        insta::assert_snapshot!(fragments.render_spine().trim_end(), @r###"
        <itemref idref="front-matter"/>
        <itemref idref="chapter-1"/>
        <itemref idref="chapter-2"/>
        "###);

        let nav = fragments.render_nav_points();
        assert!(nav.starts_with(
            r#"<navPoint id="navPoint-1" playOrder="1"><navLabel><text>封面</text></navLabel><content src="Text/cover.xhtml"/></navPoint>"#
        ));
        assert!(fragments
            .render_toc()
            .contains(r#"<p><a href="../Text/chapter-2.xhtml">第二章</a></p>"#));
        assert!(fragments
            .render_guide()
            .contains(r#"<reference type="text" href="Text/front-matter.xhtml" title="引言"/>"#));
    }
}
