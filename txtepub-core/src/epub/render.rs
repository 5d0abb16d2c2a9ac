//! XHTML rendering of a single content unit
//!
//! Titles and body lines are inserted verbatim. Nothing is escaped: body lines
//! already carry their paragraph/heading markup, and markup characters in the
//! manuscript pass through unchanged.

use crate::types::ContentUnit;

/// Renders content units into complete XHTML documents
#[derive(Debug, Clone)]
pub struct ContentRenderer {
    stylesheet_href: String,
}

impl ContentRenderer {
    pub fn new() -> Self {
        Self {
            stylesheet_href: "../Styles/main.css".to_string(),
        }
    }

    /// Link a different stylesheet
    pub fn with_stylesheet(mut self, href: impl Into<String>) -> Self {
        self.stylesheet_href = href.into();
        self
    }

    /// Lines of the document for `title` and its rendered `body`
    pub fn render(&self, title: &str, body: &[String]) -> Vec<String> {
        let mut lines = Vec::with_capacity(body.len() + 12);
        lines.push(r#"<?xml version="1.0" encoding="utf-8"?>"#.to_string());
        lines.push(r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.1//EN""#.to_string());
        lines.push(r#"  "http://www.w3.org/TR/xhtml11/DTD/xhtml11.dtd">"#.to_string());
        lines.push(r#"<html xmlns="http://www.w3.org/1999/xhtml">"#.to_string());
        lines.push("<head>".to_string());
        lines.push(format!("<title>{title}</title>"));
        lines.push(format!(
            r#"<link href="{}" type="text/css" rel="stylesheet"/>"#,
            self.stylesheet_href
        ));
        lines.push("</head>".to_string());
        lines.push("<body>".to_string());
        lines.extend(body.iter().cloned());
        lines.push("</body>".to_string());
        lines.push("</html>".to_string());
        lines
    }

    /// The document as a single string with a trailing newline
    pub fn render_document(&self, title: &str, body: &[String]) -> String {
        let mut document = self.render(title, body).join("\n");
        document.push('\n');
        document
    }

    /// Render a unit under its display title. Titled units open with their own
    /// heading; untitled ones (front matter, a title-free manuscript) get an
    /// `<h1>` carrying the display title.
    pub fn render_unit(&self, unit: &ContentUnit, display_title: &str) -> String {
        if !unit.title.is_empty() {
            return self.render_document(display_title, &unit.lines);
        }
        let mut body = Vec::with_capacity(unit.lines.len() + 1);
        body.push(format!("<h1>{display_title}</h1>"));
        body.extend(unit.lines.iter().cloned());
        self.render_document(display_title, &body)
    }
}

impl Default for ContentRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_is_framed_verbatim() {
        let body = vec![
            "<h1>第一章 开始</h1>".to_string(),
            "<p>这是正文。</p>".to_string(),
        ];
        let lines = ContentRenderer::new().render("第一章 开始", &body);

        assert_eq!(lines[5], "<title>第一章 开始</title>");
        assert_eq!(lines[8], "<body>");
        assert_eq!(&lines[9..11], body.as_slice());
        assert_eq!(lines[lines.len() - 2], "</body>");
        assert_eq!(lines[lines.len() - 1], "</html>");
    }

    #[test]
    fn test_markup_is_not_escaped() {
        let body = vec!["<p>a & b</p>".to_string()];
        let document = ContentRenderer::new().render_document("A & B", &body);
        assert!(document.contains("<title>A & B</title>"));
        assert!(document.contains("<p>a & b</p>\n"));
        assert!(document.ends_with("</html>\n"));
    }

    #[test]
    fn test_untitled_unit_gets_heading() {
        let mut front = ContentUnit::untitled();
        front.push_paragraph("前言");
        let document = ContentRenderer::new().render_unit(&front, "引言");
        assert!(document.contains("<title>引言</title>"));
        assert!(document.contains("<body>\n<h1>引言</h1>\n<p>前言</p>\n</body>"));
    }

    #[test]
    fn test_titled_unit_keeps_its_heading() {
        let mut chapter = ContentUnit::with_heading("第一章", 2);
        chapter.push_paragraph("正文");
        let document = ContentRenderer::new().render_unit(&chapter, "第一章");
        assert!(document.contains("<body>\n<h2>第一章</h2>\n<p>正文</p>\n</body>"));
        assert_eq!(document.matches("第一章</h").count(), 1);
    }

    #[test]
    fn test_custom_stylesheet() {
        let document = ContentRenderer::new()
            .with_stylesheet("../Styles/book.css")
            .render_document("t", &[]);
        assert!(document.contains(r#"<link href="../Styles/book.css""#));
    }
}
