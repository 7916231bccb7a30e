/// Runs: the smallest unit of character formatting in a paragraph.
use crate::error::Result;
use crate::xml::{escape_text, escape_xml};
use std::fmt::Write as FmtWrite;

/// Run content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunContent {
    /// Plain text
    Text(String),
    /// Line break within the same paragraph
    Break,
}

/// Character formatting applied to a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunProperties {
    pub(crate) style: Option<String>,
    pub(crate) bold: bool,
    pub(crate) italic: bool,
    pub(crate) font_name: Option<String>,
    /// Half-points (24 = 12pt)
    pub(crate) font_size: Option<u32>,
    pub(crate) color: Option<String>,
    pub(crate) shading: Option<String>,
}

impl RunProperties {
    pub(crate) fn has_properties(&self) -> bool {
        self.style.is_some()
            || self.bold
            || self.italic
            || self.font_name.is_some()
            || self.font_size.is_some()
            || self.color.is_some()
            || self.shading.is_some()
    }

    /// Write `w:rPr` in schema order.
    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        if !self.has_properties() {
            return Ok(());
        }
        xml.push_str("<w:rPr>");

        if let Some(ref style) = self.style {
            write!(xml, r#"<w:rStyle w:val="{}"/>"#, escape_xml(style))?;
        }
        if let Some(ref font) = self.font_name {
            let font = escape_xml(font);
            write!(
                xml,
                r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}"/>"#
            )?;
        }
        if self.bold {
            xml.push_str("<w:b/>");
        }
        if self.italic {
            xml.push_str("<w:i/>");
        }
        if let Some(ref color) = self.color {
            write!(xml, r#"<w:color w:val="{}"/>"#, color)?;
        }
        if let Some(size) = self.font_size {
            write!(xml, r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#)?;
        }
        if let Some(ref fill) = self.shading {
            write!(xml, r#"<w:shd w:val="clear" w:color="auto" w:fill="{}"/>"#, fill)?;
        }

        xml.push_str("</w:rPr>");
        Ok(())
    }
}

/// A run of identically formatted content.
///
/// Runs are built by value and then handed to a paragraph:
///
/// ```
/// use mdocx::docx::Run;
///
/// let run = Run::text("warning").bold(true).color("C00000");
/// assert_eq!(run.plain_text(), "warning");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub(crate) content: RunContent,
    pub(crate) properties: RunProperties,
}

impl Run {
    /// Create a text run.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: RunContent::Text(text.into()),
            properties: RunProperties::default(),
        }
    }

    /// Create a line break run.
    pub fn line_break() -> Self {
        Self {
            content: RunContent::Break,
            properties: RunProperties::default(),
        }
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.properties.bold = bold;
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.properties.italic = italic;
        self
    }

    /// Set font size in half-points (e.g., 24 = 12pt).
    pub fn font_size(mut self, size: u32) -> Self {
        self.properties.font_size = Some(size);
        self
    }

    pub fn font_name(mut self, name: &str) -> Self {
        self.properties.font_name = Some(name.to_string());
        self
    }

    /// Set text color using hex RGB (e.g., "FF0000" for red).
    pub fn color(mut self, color: &str) -> Self {
        self.properties.color = Some(color.to_string());
        self
    }

    /// Set background shading using hex RGB.
    pub fn shading(mut self, fill: &str) -> Self {
        self.properties.shading = Some(fill.to_string());
        self
    }

    /// Apply a character style by ID.
    pub fn style(mut self, style_id: &str) -> Self {
        self.properties.style = Some(style_id.to_string());
        self
    }

    pub fn content(&self) -> &RunContent {
        &self.content
    }

    pub fn properties(&self) -> &RunProperties {
        &self.properties
    }

    /// The text this run renders; a break renders as `\n`.
    pub fn plain_text(&self) -> &str {
        match &self.content {
            RunContent::Text(text) => text,
            RunContent::Break => "\n",
        }
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:r>");
        self.properties.to_xml(xml)?;

        match &self.content {
            RunContent::Text(text) if !text.is_empty() => {
                write!(
                    xml,
                    r#"<w:t xml:space="preserve">{}</w:t>"#,
                    escape_text(text)
                )?;
            },
            RunContent::Text(_) => {},
            RunContent::Break => xml.push_str("<w:br/>"),
        }

        xml.push_str("</w:r>");
        Ok(())
    }
}

impl RunProperties {
    pub fn is_bold(&self) -> bool {
        self.bold
    }

    pub fn is_italic(&self) -> bool {
        self.italic
    }

    pub fn font(&self) -> Option<&str> {
        self.font_name.as_deref()
    }

    pub fn shading_fill(&self) -> Option<&str> {
        self.shading.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(run: &Run) -> String {
        let mut xml = String::new();
        run.to_xml(&mut xml).unwrap();
        xml
    }

    #[test]
    fn test_plain_run_has_no_properties() {
        assert_eq!(
            render(&Run::text("hi")),
            r#"<w:r><w:t xml:space="preserve">hi</w:t></w:r>"#
        );
    }

    #[test]
    fn test_run_formatting() {
        let xml = render(&Run::text("x").bold(true).italic(true).font_size(28).color("2F5496"));
        assert!(xml.contains("<w:b/><w:i/>"));
        assert!(xml.contains(r#"<w:color w:val="2F5496"/>"#));
        assert!(xml.contains(r#"<w:sz w:val="28"/><w:szCs w:val="28"/>"#));
    }

    #[test]
    fn test_run_escapes_text() {
        let xml = render(&Run::text("a < b & c"));
        assert!(xml.contains("a &lt; b &amp; c"));
    }

    #[test]
    fn test_line_break() {
        assert_eq!(render(&Run::line_break()), "<w:r><w:br/></w:r>");
    }

    #[test]
    fn test_empty_text_writes_no_text_element() {
        assert_eq!(render(&Run::text("")), "<w:r></w:r>");
    }
}
