/// Paragraph types and implementation for DOCX documents.
use super::hyperlink::Hyperlink;
use super::numbering::ListKind;
use super::relmap::RelationshipMapper;
use super::run::Run;
use crate::error::{Error, Result};
use crate::xml::escape_xml;
use std::fmt::Write as FmtWrite;

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Both,
}

impl Alignment {
    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Both => "both",
        }
    }
}

/// Elements that can appear in a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParagraphElement {
    Run(Run),
    Hyperlink(Hyperlink),
}

/// Paragraph properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ParagraphProperties {
    pub(crate) list: Option<ListKind>,
    pub(crate) shading: Option<String>,
    /// Twips
    pub(crate) space_before: Option<u32>,
    /// Twips
    pub(crate) space_after: Option<u32>,
    /// Twips
    pub(crate) indent_left: Option<u32>,
    pub(crate) alignment: Option<Alignment>,
}

impl ParagraphProperties {
    fn has_properties(&self) -> bool {
        self.list.is_some()
            || self.shading.is_some()
            || self.space_before.is_some()
            || self.space_after.is_some()
            || self.indent_left.is_some()
            || self.alignment.is_some()
    }
}

/// A paragraph: a sequence of runs and hyperlinks with block-level formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub(crate) elements: Vec<ParagraphElement>,
    pub(crate) style: Option<String>,
    pub(crate) properties: ParagraphProperties,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with the given style ID.
    pub fn with_style(style_id: &str) -> Self {
        Self {
            style: Some(style_id.to_string()),
            ..Self::default()
        }
    }

    pub fn add_run(&mut self, run: Run) -> &mut Self {
        self.elements.push(ParagraphElement::Run(run));
        self
    }

    pub fn add_hyperlink(&mut self, hyperlink: Hyperlink) -> &mut Self {
        self.elements.push(ParagraphElement::Hyperlink(hyperlink));
        self
    }

    pub fn set_style(&mut self, style_id: &str) {
        self.style = Some(style_id.to_string());
    }

    /// Make this paragraph an item of the given list.
    pub fn set_list(&mut self, kind: ListKind) {
        self.properties.list = Some(kind);
    }

    /// Set paragraph background shading using hex RGB.
    pub fn set_shading(&mut self, fill: &str) {
        self.properties.shading = Some(fill.to_string());
    }

    /// Set spacing before and after this paragraph (in points).
    pub fn set_spacing(&mut self, before_pt: u32, after_pt: u32) {
        self.properties.space_before = Some(before_pt * 20);
        self.properties.space_after = Some(after_pt * 20);
    }

    /// Set left indentation in twips.
    pub fn set_indent_left(&mut self, twips: u32) {
        self.properties.indent_left = Some(twips);
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.properties.alignment = Some(alignment);
    }

    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    pub fn list(&self) -> Option<ListKind> {
        self.properties.list
    }

    pub fn shading(&self) -> Option<&str> {
        self.properties.shading.as_deref()
    }

    pub fn elements(&self) -> &[ParagraphElement] {
        &self.elements
    }

    /// Visible text of the paragraph, breaks rendered as `\n`.
    pub fn text(&self) -> String {
        self.elements
            .iter()
            .map(|element| match element {
                ParagraphElement::Run(run) => run.plain_text(),
                ParagraphElement::Hyperlink(link) => link.text(),
            })
            .collect()
    }

    pub(crate) fn hyperlinks(&self) -> impl Iterator<Item = &Hyperlink> {
        self.elements.iter().filter_map(|element| match element {
            ParagraphElement::Hyperlink(link) => Some(link),
            ParagraphElement::Run(_) => None,
        })
    }

    fn properties_to_xml(&self, xml: &mut String) -> Result<()> {
        if self.style.is_none() && !self.properties.has_properties() {
            return Ok(());
        }
        xml.push_str("<w:pPr>");

        if let Some(ref style) = self.style {
            write!(xml, r#"<w:pStyle w:val="{}"/>"#, escape_xml(style))?;
        }

        if let Some(list) = self.properties.list {
            write!(
                xml,
                r#"<w:numPr><w:ilvl w:val="0"/><w:numId w:val="{}"/></w:numPr>"#,
                list.num_id()
            )?;
        }

        if let Some(ref fill) = self.properties.shading {
            write!(xml, r#"<w:shd w:val="clear" w:color="auto" w:fill="{}"/>"#, fill)?;
        }

        if self.properties.space_before.is_some() || self.properties.space_after.is_some() {
            xml.push_str("<w:spacing");
            if let Some(before) = self.properties.space_before {
                write!(xml, r#" w:before="{}""#, before)?;
            }
            if let Some(after) = self.properties.space_after {
                write!(xml, r#" w:after="{}""#, after)?;
            }
            xml.push_str("/>");
        }

        if let Some(left) = self.properties.indent_left {
            write!(xml, r#"<w:ind w:left="{}"/>"#, left)?;
        }

        if let Some(alignment) = self.properties.alignment {
            write!(xml, r#"<w:jc w:val="{}"/>"#, alignment.as_str())?;
        }

        xml.push_str("</w:pPr>");
        Ok(())
    }

    /// Serialize with real relationship IDs.
    ///
    /// `hyperlink_counter` is the global index of the next hyperlink across
    /// the whole document and is advanced past every link written here.
    pub(crate) fn to_xml(
        &self,
        xml: &mut String,
        rel_mapper: &RelationshipMapper,
        hyperlink_counter: &mut usize,
    ) -> Result<()> {
        xml.push_str("<w:p>");
        self.properties_to_xml(xml)?;

        for element in &self.elements {
            match element {
                ParagraphElement::Run(run) => run.to_xml(xml)?,
                ParagraphElement::Hyperlink(link) => {
                    let rel_id = rel_mapper
                        .get_hyperlink_id(*hyperlink_counter)
                        .ok_or_else(|| {
                            Error::Xml(format!(
                                "hyperlink {} has no relationship",
                                *hyperlink_counter
                            ))
                        })?;
                    link.to_xml(xml, rel_id)?;
                    *hyperlink_counter += 1;
                },
            }
        }

        xml.push_str("</w:p>");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(paragraph: &Paragraph, mapper: &RelationshipMapper) -> Result<String> {
        let mut xml = String::new();
        let mut counter = 0;
        paragraph.to_xml(&mut xml, mapper, &mut counter)?;
        Ok(xml)
    }

    #[test]
    fn test_empty_paragraph() {
        let xml = render(&Paragraph::new(), &RelationshipMapper::new()).unwrap();
        assert_eq!(xml, "<w:p></w:p>");
    }

    #[test]
    fn test_properties_in_schema_order() {
        let mut paragraph = Paragraph::with_style("ListParagraph");
        paragraph.set_list(ListKind::Decimal);
        paragraph.set_shading("F2F2F2");
        paragraph.set_spacing(6, 12);
        paragraph.set_indent_left(720);
        paragraph.set_alignment(Alignment::Center);

        let xml = render(&paragraph, &RelationshipMapper::new()).unwrap();
        let order = [
            "<w:pStyle",
            "<w:numPr>",
            "<w:shd",
            r#"<w:spacing w:before="120" w:after="240"/>"#,
            r#"<w:ind w:left="720"/>"#,
            r#"<w:jc w:val="center"/>"#,
        ];
        let positions: Vec<usize> = order.iter().map(|tag| xml.find(tag).unwrap()).collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(xml.contains(r#"<w:numId w:val="2"/>"#));
    }

    #[test]
    fn test_text_concatenates_runs_and_links() {
        let mut paragraph = Paragraph::new();
        paragraph
            .add_run(Run::text("see "))
            .add_hyperlink(Hyperlink::new("https://x.test", "here"))
            .add_run(Run::line_break())
            .add_run(Run::text("end"));
        assert_eq!(paragraph.text(), "see here\nend");
        assert_eq!(paragraph.hyperlinks().count(), 1);
    }

    #[test]
    fn test_hyperlink_uses_mapped_id() {
        let mut paragraph = Paragraph::new();
        paragraph.add_hyperlink(Hyperlink::new("https://x.test", "x"));

        let mut mapper = RelationshipMapper::new();
        mapper.add_hyperlink(0, "rId9".to_string());
        let xml = render(&paragraph, &mapper).unwrap();
        assert!(xml.contains(r#"r:id="rId9""#));
    }

    #[test]
    fn test_unmapped_hyperlink_is_an_error() {
        let mut paragraph = Paragraph::new();
        paragraph.add_hyperlink(Hyperlink::new("https://x.test", "x"));
        assert!(matches!(
            render(&paragraph, &RelationshipMapper::new()),
            Err(Error::Xml(_))
        ));
    }
}
