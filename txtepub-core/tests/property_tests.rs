//! Property tests for segmentation

use proptest::prelude::*;
use txtepub_core::{BookInfo, Converter};

#[derive(Debug, Clone)]
enum Line {
    Title(String),
    Body(String),
}

impl Line {
    fn text(&self) -> String {
        match self {
            Line::Title(word) => format!("Chapter {word}"),
            Line::Body(word) => word.clone(),
        }
    }
}

fn line() -> impl Strategy<Value = Line> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(Line::Title),
        "[a-z]{1,8}".prop_map(Line::Body),
    ]
}

fn converter() -> Converter {
    Converter::new(BookInfo {
        chapter_patterns: vec![r"^Chapter \S+".to_string()],
        ..BookInfo::default()
    })
    .unwrap()
}

proptest! {
    #[test]
    fn chapter_indices_are_contiguous(lines in prop::collection::vec(line(), 0..60)) {
        let text: Vec<String> = lines.iter().map(Line::text).collect();
        let model = converter().segment_lines(&text);

        let indices: Vec<usize> = model.chapters().map(|c| c.index).collect();
        let expected: Vec<usize> = (1..=indices.len()).collect();
        prop_assert_eq!(indices, expected);
    }

    #[test]
    fn titles_become_exactly_one_heading(lines in prop::collection::vec(line(), 1..60)) {
        let text: Vec<String> = lines.iter().map(Line::text).collect();
        let model = converter().segment_lines(&text);

        let titles: Vec<String> = lines
            .iter()
            .filter(|l| matches!(l, Line::Title(_)))
            .map(Line::text)
            .collect();
        let chapters: Vec<_> = model.chapters().collect();

        if titles.is_empty() {
            prop_assert_eq!(chapters.len(), 1);
            prop_assert_eq!(chapters[0].title(), "");
        } else {
            prop_assert_eq!(chapters.len(), titles.len());
            for (chapter, title) in chapters.iter().zip(&titles) {
                let heading = format!("<h1>{title}</h1>");
                prop_assert_eq!(chapter.title(), title.as_str());
                prop_assert_eq!(&chapter.unit.lines[0], &heading);
                prop_assert!(chapter.unit.lines[1..].iter().all(|l| l.starts_with("<p>")));
            }
        }

        if let Some(front) = model.front_matter.get() {
            prop_assert!(front.unit.lines.iter().all(|l| !l.contains("Chapter")));
        }
    }

    #[test]
    fn leading_block_becomes_front_matter(
        lead in prop::collection::vec("[a-z]{1,8}", 1..10),
        rest in prop::collection::vec(line(), 0..30),
    ) {
        let mut text = lead.clone();
        text.push("Chapter one".to_string());
        text.extend(rest.iter().map(Line::text));

        let model = converter().segment_lines(&text);
        let front = model.front_matter.get().expect("front matter");
        let expected: Vec<String> = lead.iter().map(|l| format!("<p>{l}</p>")).collect();
        prop_assert_eq!(&front.unit.lines, &expected);

        let first = model.chapters().next().expect("first chapter");
        prop_assert_eq!(first.title(), "Chapter one");
        prop_assert_eq!(first.index, 1);
    }
}
