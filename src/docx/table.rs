/// Table types and implementation for DOCX documents.
use super::paragraph::Paragraph;
use super::relmap::RelationshipMapper;
use crate::error::Result;
use std::fmt::Write as FmtWrite;

/// Border definition shared by every edge of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBorder {
    /// Border width in eighths of a point (e.g., 8 = 1pt)
    pub size: u32,
    /// Border color in hex RGB format
    pub color: String,
}

impl Default for TableBorder {
    fn default() -> Self {
        Self {
            size: 4,
            color: "000000".to_string(),
        }
    }
}

/// A table with fixed, evenly divided column widths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub(crate) rows: Vec<TableRow>,
    /// Total width in twips
    pub(crate) width: u32,
    pub(crate) border: TableBorder,
}

impl Table {
    /// Create an empty table spanning `width` twips.
    pub fn new(width: u32) -> Self {
        Self {
            rows: Vec::new(),
            width,
            border: TableBorder::default(),
        }
    }

    pub fn set_border(&mut self, border: TableBorder) {
        self.border = border;
    }

    pub fn add_row(&mut self, row: TableRow) -> &mut Self {
        self.rows.push(row);
        self
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the grid: the longest row's cell count, at least one.
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(TableRow::cell_count)
            .max()
            .unwrap_or(0)
            .max(1)
    }

    /// Every column gets the same share of the table width.
    pub fn column_width(&self) -> u32 {
        let columns = u32::try_from(self.column_count()).unwrap_or(u32::MAX);
        self.width / columns
    }

    pub(crate) fn to_xml(
        &self,
        xml: &mut String,
        rel_mapper: &RelationshipMapper,
        hyperlink_counter: &mut usize,
    ) -> Result<()> {
        let columns = self.column_count();
        let column_width = self.column_width();

        xml.push_str("<w:tbl><w:tblPr>");
        write!(xml, r#"<w:tblW w:w="{}" w:type="dxa"/>"#, self.width)?;
        xml.push_str("<w:tblBorders>");
        for edge in ["top", "left", "bottom", "right", "insideH", "insideV"] {
            write!(
                xml,
                r#"<w:{} w:val="single" w:sz="{}" w:space="0" w:color="{}"/>"#,
                edge, self.border.size, self.border.color
            )?;
        }
        xml.push_str(r#"</w:tblBorders><w:tblLayout w:type="fixed"/></w:tblPr>"#);

        xml.push_str("<w:tblGrid>");
        for _ in 0..columns {
            write!(xml, r#"<w:gridCol w:w="{}"/>"#, column_width)?;
        }
        xml.push_str("</w:tblGrid>");

        for row in &self.rows {
            row.to_xml(xml, columns, column_width, rel_mapper, hyperlink_counter)?;
        }

        xml.push_str("</w:tbl>");
        Ok(())
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    pub(crate) cells: Vec<TableCell>,
    pub(crate) header: bool,
}

impl TableRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark as a header row, repeated at the top of each page.
    pub fn header() -> Self {
        Self {
            cells: Vec::new(),
            header: true,
        }
    }

    pub fn add_cell(&mut self, cell: TableCell) -> &mut Self {
        self.cells.push(cell);
        self
    }

    pub fn cells(&self) -> &[TableCell] {
        &self.cells
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_header(&self) -> bool {
        self.header
    }

    fn to_xml(
        &self,
        xml: &mut String,
        columns: usize,
        column_width: u32,
        rel_mapper: &RelationshipMapper,
        hyperlink_counter: &mut usize,
    ) -> Result<()> {
        xml.push_str("<w:tr>");

        let missing = columns.saturating_sub(self.cells.len());
        if self.header || missing > 0 {
            xml.push_str("<w:trPr>");
            if missing > 0 {
                write!(xml, r#"<w:gridAfter w:val="{}"/>"#, missing)?;
            }
            if self.header {
                xml.push_str("<w:tblHeader/>");
            }
            xml.push_str("</w:trPr>");
        }

        for cell in &self.cells {
            cell.to_xml(xml, column_width, rel_mapper, hyperlink_counter)?;
        }

        xml.push_str("</w:tr>");
        Ok(())
    }
}

/// A table cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableCell {
    pub(crate) paragraphs: Vec<Paragraph>,
    pub(crate) shading: Option<String>,
}

impl TableCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cell holding a single paragraph.
    pub fn with_paragraph(paragraph: Paragraph) -> Self {
        Self {
            paragraphs: vec![paragraph],
            shading: None,
        }
    }

    /// Set cell background color in hex RGB format.
    pub fn set_shading(&mut self, fill: &str) {
        self.shading = Some(fill.to_string());
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn shading(&self) -> Option<&str> {
        self.shading.as_deref()
    }

    /// Visible text of the cell, paragraphs joined with `\n`.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn to_xml(
        &self,
        xml: &mut String,
        width: u32,
        rel_mapper: &RelationshipMapper,
        hyperlink_counter: &mut usize,
    ) -> Result<()> {
        xml.push_str("<w:tc><w:tcPr>");
        write!(xml, r#"<w:tcW w:w="{}" w:type="dxa"/>"#, width)?;
        if let Some(ref fill) = self.shading {
            write!(xml, r#"<w:shd w:val="clear" w:color="auto" w:fill="{}"/>"#, fill)?;
        }
        xml.push_str("</w:tcPr>");

        // A cell must end with a paragraph
        if self.paragraphs.is_empty() {
            xml.push_str("<w:p/>");
        }
        for paragraph in &self.paragraphs {
            paragraph.to_xml(xml, rel_mapper, hyperlink_counter)?;
        }

        xml.push_str("</w:tc>");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::Run;

    fn cell(text: &str) -> TableCell {
        let mut paragraph = Paragraph::new();
        paragraph.add_run(Run::text(text));
        TableCell::with_paragraph(paragraph)
    }

    fn row(texts: &[&str]) -> TableRow {
        let mut row = TableRow::new();
        for text in texts {
            row.add_cell(cell(text));
        }
        row
    }

    fn render(table: &Table) -> String {
        let mut xml = String::new();
        let mut counter = 0;
        table
            .to_xml(&mut xml, &RelationshipMapper::new(), &mut counter)
            .unwrap();
        xml
    }

    #[test]
    fn test_columns_divide_width_evenly() {
        let mut table = Table::new(9000);
        table.add_row(row(&["a", "b", "c"]));
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.column_width(), 3000);

        let xml = render(&table);
        assert_eq!(xml.matches(r#"<w:gridCol w:w="3000"/>"#).count(), 3);
        assert_eq!(xml.matches(r#"<w:tcW w:w="3000" w:type="dxa"/>"#).count(), 3);
    }

    #[test]
    fn test_grid_widens_to_longest_row() {
        let mut table = Table::new(9000);
        table.add_row(row(&["a", "b"])).add_row(row(&["1", "2", "3"]));
        assert_eq!(table.column_count(), 3);

        let xml = render(&table);
        assert!(xml.contains(r#"<w:gridAfter w:val="1"/>"#));
    }

    #[test]
    fn test_header_row_and_shading() {
        let mut header = TableRow::header();
        let mut shaded = cell("h");
        shaded.set_shading("D9E2F3");
        header.add_cell(shaded);

        let mut table = Table::new(1000);
        table.add_row(header);
        let xml = render(&table);
        assert!(xml.contains("<w:tblHeader/>"));
        assert!(xml.contains(r#"w:fill="D9E2F3""#));
    }

    #[test]
    fn test_empty_cell_still_has_paragraph() {
        let mut table = Table::new(1000);
        let mut row = TableRow::new();
        row.add_cell(TableCell::new());
        table.add_row(row);
        assert!(render(&table).contains("</w:tcPr><w:p/></w:tc>"));
    }

    #[test]
    fn test_empty_table_has_one_column() {
        let table = Table::new(1000);
        assert_eq!(table.column_count(), 1);
        assert_eq!(table.column_width(), 1000);
    }
}
