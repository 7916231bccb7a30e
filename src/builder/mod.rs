//! Maps Markdown blocks onto the WordprocessingML document model.
//!
//! [`DocumentBuilder`] walks the block sequence once. Every block kind has a
//! defined rendering, so building never fails: empty headings become empty
//! styled paragraphs, ragged table rows are padded, and `Blank` blocks simply
//! produce nothing.

pub mod stylesheet;

pub use stylesheet::{StyleSheet, TextStyle, style_id};

use crate::docx::{
    Document, Hyperlink, ListKind, Paragraph, Run, Table, TableBorder, TableCell, TableRow,
};
use crate::markdown::{Block, HeadingLevel, InlineSegment, rendered_text, segment};

/// Builds a [`Document`] from parsed blocks.
///
/// # Examples
///
/// ```
/// use mdocx::builder::{DocumentBuilder, StyleSheet};
/// use mdocx::markdown::parse_blocks;
///
/// let blocks = parse_blocks("# Report\n\nAll **good**.");
/// let doc = DocumentBuilder::new(&StyleSheet::DEFAULT).build(&blocks);
/// assert_eq!(doc.title(), Some("Report"));
/// assert_eq!(doc.elements().len(), 2);
/// ```
#[derive(Debug)]
pub struct DocumentBuilder<'s> {
    sheet: &'s StyleSheet,
    document: Document,
    title_taken: bool,
}

impl<'s> DocumentBuilder<'s> {
    pub fn new(sheet: &'s StyleSheet) -> Self {
        let mut document = Document::new();
        document.set_styles(sheet.doc_defaults(), sheet.styles());
        document.set_page(sheet.page);
        document.set_list_indent(sheet.list_indent);
        Self {
            sheet,
            document,
            title_taken: false,
        }
    }

    /// Render every block and return the finished document.
    pub fn build(mut self, blocks: &[Block]) -> Document {
        for block in blocks {
            self.push_block(block);
        }
        self.document
    }

    /// Render a single block.
    pub fn push_block(&mut self, block: &Block) {
        match block {
            Block::Heading { level, text } => self.heading(*level, text),
            Block::Paragraph { text } => {
                let paragraph = self.inline_paragraph(style_id::NORMAL, text);
                self.document.add_paragraph(paragraph);
            },
            Block::BulletItem { text } => self.list_item(ListKind::Bullet, text),
            Block::OrderedItem { text, .. } => self.list_item(ListKind::Decimal, text),
            Block::CodeBlock { lines, .. } => self.code_block(lines),
            Block::Table { rows } => self.table(rows),
            Block::BlockQuote { text } => self.quote(text),
            Block::Blank => {},
        }
    }

    /// The first level-1 heading becomes the document title.
    fn heading(&mut self, level: HeadingLevel, text: &str) {
        let style = match level {
            HeadingLevel::H1 if !self.title_taken => {
                self.title_taken = true;
                self.document.set_title(rendered_text(&segment(text)));
                style_id::TITLE
            },
            HeadingLevel::H1 => style_id::HEADING_1,
            HeadingLevel::H2 => style_id::HEADING_2,
            HeadingLevel::H3 => style_id::HEADING_3,
        };
        let paragraph = self.inline_paragraph(style, text);
        self.document.add_paragraph(paragraph);
    }

    /// Numbering comes from the list definition, never from the source numeral.
    fn list_item(&mut self, kind: ListKind, text: &str) {
        let mut paragraph = self.inline_paragraph(style_id::LIST_PARAGRAPH, text);
        paragraph.set_list(kind);
        self.document.add_paragraph(paragraph);
    }

    /// One shaded paragraph, lines separated by explicit breaks, no inline
    /// markup.
    fn code_block(&mut self, lines: &[String]) {
        let mut paragraph = Paragraph::with_style(style_id::CODE);
        for (index, line) in lines.iter().enumerate() {
            if index > 0 {
                paragraph.add_run(Run::line_break());
            }
            paragraph.add_run(Run::text(line.as_str()));
        }
        self.document.add_paragraph(paragraph);
    }

    fn quote(&mut self, text: &str) {
        let mut paragraph = Paragraph::with_style(style_id::QUOTE);
        for (index, line) in text.split('\n').enumerate() {
            if index > 0 {
                paragraph.add_run(Run::line_break());
            }
            self.push_segments(&mut paragraph, line);
        }
        self.document.add_paragraph(paragraph);
    }

    /// Short rows are padded to the header width; long rows keep every cell
    /// and widen the grid.
    fn table(&mut self, rows: &[Vec<String>]) {
        let header_width = rows.first().map_or(0, Vec::len).max(1);

        let mut table = Table::new(self.sheet.page.content_width());
        table.set_border(TableBorder {
            size: 4,
            color: self.sheet.table_border_color.to_string(),
        });

        for (index, cells) in rows.iter().enumerate() {
            let is_header = index == 0;
            let mut row = if is_header {
                TableRow::header()
            } else {
                TableRow::new()
            };

            let padding = header_width.saturating_sub(cells.len());
            let texts = cells
                .iter()
                .map(String::as_str)
                .chain(std::iter::repeat_n("", padding));
            for text in texts {
                row.add_cell(self.table_cell(text, is_header));
            }
            table.add_row(row);
        }

        self.document.add_table(table);
    }

    fn table_cell(&self, text: &str, is_header: bool) -> TableCell {
        let mut paragraph = Paragraph::new();
        if is_header {
            for run in segment(text).iter().filter_map(|s| self.segment_run(s)) {
                paragraph.add_run(run.bold(true));
            }
        } else {
            self.push_segments(&mut paragraph, text);
        }

        let mut cell = TableCell::with_paragraph(paragraph);
        if is_header {
            cell.set_shading(self.sheet.table_header_shading);
        }
        cell
    }

    fn inline_paragraph(&self, style: &str, text: &str) -> Paragraph {
        let mut paragraph = Paragraph::with_style(style);
        self.push_segments(&mut paragraph, text);
        paragraph
    }

    fn push_segments(&self, paragraph: &mut Paragraph, text: &str) {
        for segment in segment(text) {
            match segment {
                InlineSegment::Link { label, url } => {
                    paragraph.add_hyperlink(Hyperlink::new(url, label));
                },
                other => {
                    if let Some(run) = self.segment_run(&other) {
                        paragraph.add_run(run);
                    }
                },
            }
        }
    }

    /// Run for a segment, links reduced to their label. Empty plain text
    /// yields nothing.
    fn segment_run(&self, segment: &InlineSegment) -> Option<Run> {
        let run = match segment {
            InlineSegment::Plain { text } if text.is_empty() => return None,
            InlineSegment::Plain { text } => Run::text(text.as_str()),
            InlineSegment::Bold { text } => Run::text(text.as_str()).bold(true),
            InlineSegment::Italic { text } => Run::text(text.as_str()).italic(true),
            InlineSegment::BoldItalic { text } => {
                Run::text(text.as_str()).bold(true).italic(true)
            },
            InlineSegment::Code { text } => Run::text(text.as_str())
                .font_name(self.sheet.code_font)
                .shading(self.sheet.inline_code_shading),
            InlineSegment::Link { label, .. } => Run::text(label.as_str()),
        };
        Some(run)
    }
}

/// Build a document from blocks with the default style sheet.
pub fn build_document(blocks: &[Block]) -> Document {
    DocumentBuilder::new(&StyleSheet::DEFAULT).build(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::{BodyElement, ParagraphElement, RunContent};
    use crate::markdown::parse_blocks;

    fn build(markdown: &str) -> Document {
        build_document(&parse_blocks(markdown))
    }

    fn paragraph(element: &BodyElement) -> &Paragraph {
        element.as_paragraph().expect("expected a paragraph")
    }

    #[test]
    fn test_end_to_end_title_body_bullets() {
        let doc = build("# Title\n\nBody text\n\n- item one\n- item two");
        let elements = doc.elements();
        assert_eq!(elements.len(), 4);

        assert_eq!(paragraph(&elements[0]).style(), Some(style_id::TITLE));
        assert_eq!(paragraph(&elements[0]).text(), "Title");

        assert_eq!(paragraph(&elements[1]).style(), Some(style_id::NORMAL));
        assert_eq!(paragraph(&elements[1]).text(), "Body text");

        for (element, text) in elements[2..].iter().zip(["item one", "item two"]) {
            let item = paragraph(element);
            assert_eq!(item.list(), Some(ListKind::Bullet));
            assert_eq!(item.text(), text);
        }

        assert!(
            elements
                .iter()
                .filter_map(BodyElement::as_paragraph)
                .all(|p| !p.text().is_empty())
        );
        assert_eq!(doc.title(), Some("Title"));
    }

    #[test]
    fn test_only_first_h1_is_title() {
        let doc = build("# One\n# Two\n## Three");
        let styles: Vec<_> = doc
            .elements()
            .iter()
            .map(|e| paragraph(e).style().unwrap())
            .collect();
        assert_eq!(
            styles,
            vec![style_id::TITLE, style_id::HEADING_1, style_id::HEADING_2]
        );
        assert_eq!(doc.title(), Some("One"));
    }

    #[test]
    fn test_title_property_drops_inline_markup() {
        let doc = build("# **Big** `mdocx` [Title](https://t.test)");
        assert_eq!(doc.title(), Some("Big mdocx Title"));
        assert_eq!(paragraph(&doc.elements()[0]).text(), "Big mdocx Title");
    }

    #[test]
    fn test_h2_before_h1_does_not_take_title() {
        let doc = build("## Intro\n# Main");
        assert_eq!(paragraph(&doc.elements()[1]).style(), Some(style_id::TITLE));
    }

    #[test]
    fn test_ordered_items_share_one_list() {
        let doc = build("5. five\n9. nine\n\n1. one");
        let lists: Vec<_> = doc
            .elements()
            .iter()
            .map(|e| paragraph(e).list())
            .collect();
        assert_eq!(lists, vec![Some(ListKind::Decimal); 3]);
        assert_eq!(paragraph(&doc.elements()[0]).text(), "five");
    }

    #[test]
    fn test_code_block_is_one_unsegmented_paragraph() {
        let doc = build("```python\nx = **1**\n\ny = 2\n```");
        assert_eq!(doc.elements().len(), 1);
        let code = paragraph(&doc.elements()[0]);
        assert_eq!(code.style(), Some(style_id::CODE));
        assert_eq!(code.text(), "x = **1**\n\ny = 2");
        let breaks = code
            .elements()
            .iter()
            .filter(|e| matches!(e, ParagraphElement::Run(r) if *r.content() == RunContent::Break))
            .count();
        assert_eq!(breaks, 2);
    }

    #[test]
    fn test_empty_code_block_renders() {
        let doc = build("```\n```");
        assert_eq!(doc.elements().len(), 1);
        assert_eq!(paragraph(&doc.elements()[0]).text(), "");
    }

    #[test]
    fn test_inline_formatting_runs() {
        let doc = build("a **b** *c* ***d*** `e` [f](https://g.test)");
        let p = paragraph(&doc.elements()[0]);
        assert_eq!(p.text(), "a b c d e f");

        let runs: Vec<&Run> = p
            .elements()
            .iter()
            .filter_map(|e| match e {
                ParagraphElement::Run(r) => Some(r),
                ParagraphElement::Hyperlink(_) => None,
            })
            .collect();
        let find = |text: &str| runs.iter().find(|r| r.plain_text() == text).unwrap();
        assert!(find("b").properties().is_bold());
        assert!(find("c").properties().is_italic());
        assert!(find("d").properties().is_bold() && find("d").properties().is_italic());
        assert_eq!(find("e").properties().font(), Some("Consolas"));
        assert!(matches!(
            p.elements().last(),
            Some(ParagraphElement::Hyperlink(link)) if link.url() == "https://g.test"
        ));
    }

    #[test]
    fn test_table_pads_short_rows_and_keeps_long_rows() {
        let doc = build("|a|b|c|\n|-|-|-|\n|1|\n|1|2|3|4|");
        let table = doc.elements()[0].as_table().unwrap();
        let widths: Vec<usize> = table.rows().iter().map(TableRow::cell_count).collect();
        assert_eq!(widths, vec![3, 3, 4]);
        assert_eq!(table.column_count(), 4);
        assert_eq!(table.rows()[1].cells()[2].text(), "");
        assert_eq!(table.rows()[2].cells()[3].text(), "4");
    }

    #[test]
    fn test_table_header_is_shaded_and_bold() {
        let doc = build("|Name|Age|\n|---|---|\n|Ann|3|");
        let table = doc.elements()[0].as_table().unwrap();
        let header = &table.rows()[0];
        assert!(header.is_header());
        let sheet = StyleSheet::DEFAULT;
        for cell in header.cells() {
            assert_eq!(cell.shading(), Some(sheet.table_header_shading));
            let first = &cell.paragraphs()[0].elements()[0];
            assert!(matches!(first, ParagraphElement::Run(r) if r.properties().is_bold()));
        }
        assert_eq!(table.rows()[1].cells()[0].shading(), None);
        assert_eq!(
            table.column_width(),
            sheet.page.content_width() / 2
        );
    }

    #[test]
    fn test_degenerate_table_header() {
        let doc = build_document(&[Block::Table {
            rows: vec![Vec::new(), vec!["x".to_string()]],
        }]);
        let table = doc.elements()[0].as_table().unwrap();
        assert_eq!(table.rows()[0].cell_count(), 1);
        assert_eq!(table.rows()[1].cell_count(), 1);
    }

    #[test]
    fn test_quote_lines_joined_with_breaks() {
        let doc = build("> first **line**\n> second");
        let quote = paragraph(&doc.elements()[0]);
        assert_eq!(quote.style(), Some(style_id::QUOTE));
        assert_eq!(quote.text(), "first line\nsecond");
    }

    #[test]
    fn test_blank_blocks_produce_nothing() {
        assert!(build("\n\n   \n").elements().is_empty());
    }

    #[test]
    fn test_empty_heading_renders() {
        let doc = build_document(&[Block::Heading {
            level: HeadingLevel::H3,
            text: String::new(),
        }]);
        assert_eq!(paragraph(&doc.elements()[0]).style(), Some(style_id::HEADING_3));
    }
}
