/// The in-memory document model and its `word/document.xml` serialization.
use super::constants::{XML_DECLARATION, namespace};
use super::numbering::ListIndent;
use super::paragraph::Paragraph;
use super::relmap::RelationshipMapper;
use super::style::{DocDefaults, Style};
use super::table::Table;
use crate::error::Result;
use chrono::{DateTime, Utc};
use std::fmt::Write as FmtWrite;

/// Page size and margins, in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSetup {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
}

impl PageSetup {
    /// US Letter with one-inch margins.
    pub const LETTER: PageSetup = PageSetup {
        width: 12240,
        height: 15840,
        margin: 1440,
    };

    /// Width available to body content between the margins.
    pub const fn content_width(&self) -> u32 {
        self.width.saturating_sub(2 * self.margin)
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::LETTER
    }
}

/// Top-level element of the document body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyElement {
    Paragraph(Paragraph),
    Table(Table),
}

impl BodyElement {
    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            BodyElement::Paragraph(paragraph) => Some(paragraph),
            BodyElement::Table(_) => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            BodyElement::Table(table) => Some(table),
            BodyElement::Paragraph(_) => None,
        }
    }
}

/// A WordprocessingML document ready for packaging.
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) body: Vec<BodyElement>,
    pub(crate) page: PageSetup,
    pub(crate) defaults: DocDefaults,
    pub(crate) styles: Vec<Style>,
    pub(crate) list_indent: ListIndent,
    pub(crate) title: Option<String>,
    pub(crate) created: Option<DateTime<Utc>>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            body: Vec::new(),
            page: PageSetup::default(),
            defaults: DocDefaults {
                font: "Calibri".to_string(),
                size: 22,
            },
            styles: Vec::new(),
            list_indent: ListIndent::default(),
            title: None,
            created: None,
        }
    }

    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.body.push(BodyElement::Paragraph(paragraph));
    }

    pub fn add_table(&mut self, table: Table) {
        self.body.push(BodyElement::Table(table));
    }

    pub fn elements(&self) -> &[BodyElement] {
        &self.body
    }

    pub fn paragraph_count(&self) -> usize {
        self.body
            .iter()
            .filter(|element| matches!(element, BodyElement::Paragraph(_)))
            .count()
    }

    pub fn table_count(&self) -> usize {
        self.body
            .iter()
            .filter(|element| matches!(element, BodyElement::Table(_)))
            .count()
    }

    /// Install the style set written to `word/styles.xml`.
    pub fn set_styles(&mut self, defaults: DocDefaults, styles: Vec<Style>) {
        self.defaults = defaults;
        self.styles = styles;
    }

    pub fn styles(&self) -> &[Style] {
        &self.styles
    }

    pub fn set_page(&mut self, page: PageSetup) {
        self.page = page;
    }

    pub fn page(&self) -> PageSetup {
        self.page
    }

    pub fn set_list_indent(&mut self, indent: ListIndent) {
        self.list_indent = indent;
    }

    /// Title recorded in the core properties.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Fix the creation timestamp instead of stamping the time of packaging.
    pub fn set_created(&mut self, created: DateTime<Utc>) {
        self.created = Some(created);
    }

    /// Hyperlink targets in document order, tables included.
    pub(crate) fn collect_hyperlink_urls(&self) -> Vec<&str> {
        let mut urls = Vec::new();
        for element in &self.body {
            match element {
                BodyElement::Paragraph(paragraph) => {
                    urls.extend(paragraph.hyperlinks().map(|link| link.url()));
                },
                BodyElement::Table(table) => {
                    for row in table.rows() {
                        for cell in row.cells() {
                            for paragraph in cell.paragraphs() {
                                urls.extend(paragraph.hyperlinks().map(|link| link.url()));
                            }
                        }
                    }
                },
            }
        }
        urls
    }

    /// Generate `word/document.xml` with actual relationship IDs.
    pub(crate) fn to_xml(&self, rel_mapper: &RelationshipMapper) -> Result<String> {
        let mut xml = String::with_capacity(4096);
        xml.push_str(XML_DECLARATION);
        write!(
            xml,
            r#"<w:document xmlns:w="{}" xmlns:r="{}"><w:body>"#,
            namespace::WML_MAIN,
            namespace::OFC_RELATIONSHIPS
        )?;

        let mut hyperlink_counter = 0;
        for element in &self.body {
            match element {
                BodyElement::Paragraph(paragraph) => {
                    paragraph.to_xml(&mut xml, rel_mapper, &mut hyperlink_counter)?
                },
                BodyElement::Table(table) => {
                    table.to_xml(&mut xml, rel_mapper, &mut hyperlink_counter)?;
                    // Word requires a paragraph between adjacent tables
                    xml.push_str("<w:p/>");
                },
            }
        }

        // The sectPr must be the last element in the body
        write!(
            xml,
            r#"<w:sectPr><w:pgSz w:w="{}" w:h="{}"/><w:pgMar w:top="{m}" w:right="{m}" w:bottom="{m}" w:left="{m}" w:header="720" w:footer="720" w:gutter="0"/></w:sectPr>"#,
            self.page.width,
            self.page.height,
            m = self.page.margin
        )?;

        xml.push_str("</w:body></w:document>");
        Ok(xml)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::{Hyperlink, Run, TableCell, TableRow};

    #[test]
    fn test_create_empty_document() {
        let doc = Document::new();
        assert_eq!(doc.paragraph_count(), 0);
        assert_eq!(doc.table_count(), 0);
        assert_eq!(doc.page().content_width(), 9360);
    }

    #[test]
    fn test_xml_generation() {
        let mut doc = Document::new();
        let mut paragraph = Paragraph::new();
        paragraph.add_run(Run::text("Test paragraph"));
        doc.add_paragraph(paragraph);

        let xml = doc.to_xml(&RelationshipMapper::new()).unwrap();
        assert!(xml.contains("<w:document"));
        assert!(xml.contains("<w:body><w:p>"));
        assert!(xml.contains("Test paragraph"));
        assert!(xml.ends_with("</w:sectPr></w:body></w:document>"));
    }

    #[test]
    fn test_hyperlinks_collected_in_document_order() {
        let mut doc = Document::new();

        let mut first = Paragraph::new();
        first.add_hyperlink(Hyperlink::new("https://one.test", "one"));
        doc.add_paragraph(first);

        let mut cell_paragraph = Paragraph::new();
        cell_paragraph.add_hyperlink(Hyperlink::new("https://two.test", "two"));
        let mut row = TableRow::new();
        row.add_cell(TableCell::with_paragraph(cell_paragraph));
        let mut table = Table::new(doc.page().content_width());
        table.add_row(row);
        doc.add_table(table);

        let mut last = Paragraph::new();
        last.add_hyperlink(Hyperlink::new("https://three.test", "three"));
        doc.add_paragraph(last);

        assert_eq!(
            doc.collect_hyperlink_urls(),
            vec!["https://one.test", "https://two.test", "https://three.test"]
        );
    }
}
