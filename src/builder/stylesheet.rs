//! Fixed visual attributes of a converted document.
//!
//! The sheet is plain constant data. The builder borrows it for the duration
//! of a conversion and turns it into the package's style definitions; nothing
//! mutates it at runtime.

use crate::docx::{DocDefaults, ListIndent, PageSetup, Style, StyleType};

/// Style IDs referenced from body elements.
pub mod style_id {
    pub const NORMAL: &str = "Normal";
    pub const TITLE: &str = "Title";
    pub const HEADING_1: &str = "Heading1";
    pub const HEADING_2: &str = "Heading2";
    pub const HEADING_3: &str = "Heading3";
    pub const LIST_PARAGRAPH: &str = "ListParagraph";
    pub const QUOTE: &str = "Quote";
    pub const CODE: &str = "Code";
    pub const HYPERLINK: &str = crate::docx::HYPERLINK_STYLE;
}

/// Visual attributes of one kind of paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    /// Half-points (24 = 12pt)
    pub size: u32,
    /// Hex RGB
    pub color: &'static str,
    pub bold: bool,
    pub italic: bool,
    /// Points
    pub space_before: u32,
    /// Points
    pub space_after: u32,
    /// Twips
    pub indent_left: u32,
}

impl TextStyle {
    const fn body(size: u32, color: &'static str) -> Self {
        Self {
            size,
            color,
            bold: false,
            italic: false,
            space_before: 0,
            space_after: 8,
            indent_left: 0,
        }
    }

    const fn heading(size: u32, color: &'static str, space_before: u32) -> Self {
        Self {
            size,
            color,
            bold: true,
            italic: false,
            space_before,
            space_after: 6,
            indent_left: 0,
        }
    }
}

/// Every size, color, font and spacing used by the document builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSheet {
    pub body_font: &'static str,
    pub heading_font: &'static str,
    pub code_font: &'static str,
    pub title: TextStyle,
    pub heading1: TextStyle,
    pub heading2: TextStyle,
    pub heading3: TextStyle,
    pub body: TextStyle,
    pub list: TextStyle,
    pub quote: TextStyle,
    pub code: TextStyle,
    /// Background of fenced code blocks
    pub code_block_shading: &'static str,
    /// Background of inline code runs
    pub inline_code_shading: &'static str,
    pub table_header_shading: &'static str,
    pub table_border_color: &'static str,
    pub hyperlink_color: &'static str,
    pub list_indent: ListIndent,
    pub page: PageSetup,
}

impl StyleSheet {
    pub const DEFAULT: StyleSheet = StyleSheet {
        body_font: "Calibri",
        heading_font: "Calibri Light",
        code_font: "Consolas",
        title: TextStyle {
            size: 56,
            color: "1F3864",
            bold: false,
            italic: false,
            space_before: 0,
            space_after: 12,
            indent_left: 0,
        },
        heading1: TextStyle::heading(32, "2F5496", 18),
        heading2: TextStyle::heading(26, "2F5496", 14),
        heading3: TextStyle::heading(24, "1F3763", 12),
        body: TextStyle::body(22, "000000"),
        list: TextStyle {
            space_after: 4,
            ..TextStyle::body(22, "000000")
        },
        quote: TextStyle {
            italic: true,
            space_before: 6,
            indent_left: 720,
            ..TextStyle::body(22, "595959")
        },
        code: TextStyle {
            space_before: 6,
            indent_left: 144,
            ..TextStyle::body(20, "24292E")
        },
        code_block_shading: "F2F2F2",
        inline_code_shading: "EDEDED",
        table_header_shading: "D9E2F3",
        table_border_color: "A6A6A6",
        hyperlink_color: "0563C1",
        list_indent: ListIndent {
            left: 720,
            hanging: 360,
        },
        page: PageSetup::LETTER,
    };

    /// Run defaults for `w:docDefaults`.
    pub fn doc_defaults(&self) -> DocDefaults {
        DocDefaults {
            font: self.body_font.to_string(),
            size: self.body.size,
        }
    }

    /// The style definitions written to the package.
    pub fn styles(&self) -> Vec<Style> {
        vec![
            paragraph_style(style_id::NORMAL, "Normal", &self.body)
                .default_style()
                .font(self.body_font),
            paragraph_style(style_id::TITLE, "Title", &self.title)
                .based_on(style_id::NORMAL)
                .next(style_id::NORMAL)
                .priority(10)
                .font(self.heading_font),
            heading_style(style_id::HEADING_1, "heading 1", &self.heading1, 0, self.heading_font),
            heading_style(style_id::HEADING_2, "heading 2", &self.heading2, 1, self.heading_font),
            heading_style(style_id::HEADING_3, "heading 3", &self.heading3, 2, self.heading_font),
            paragraph_style(style_id::LIST_PARAGRAPH, "List Paragraph", &self.list)
                .based_on(style_id::NORMAL)
                .priority(34),
            paragraph_style(style_id::QUOTE, "Quote", &self.quote)
                .based_on(style_id::NORMAL)
                .next(style_id::NORMAL)
                .priority(29),
            paragraph_style(style_id::CODE, "Code", &self.code)
                .based_on(style_id::NORMAL)
                .font(self.code_font)
                .shading(self.code_block_shading),
            Style::new(style_id::HYPERLINK, "Hyperlink", StyleType::Character)
                .color(self.hyperlink_color)
                .underline(true)
                .priority(99),
        ]
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn paragraph_style(id: &str, name: &str, text: &TextStyle) -> Style {
    let mut style = Style::new(id, name, StyleType::Paragraph)
        .size(text.size)
        .color(text.color)
        .bold(text.bold)
        .italic(text.italic)
        .spacing(text.space_before * 20, text.space_after * 20);
    if text.indent_left > 0 {
        style = style.indent_left(text.indent_left);
    }
    style
}

fn heading_style(id: &str, name: &str, text: &TextStyle, level: u8, font: &str) -> Style {
    paragraph_style(id, name, text)
        .based_on(style_id::NORMAL)
        .next(style_id::NORMAL)
        .priority(9)
        .outline_level(level)
        .font(font)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_sizes_decrease() {
        let sheet = StyleSheet::DEFAULT;
        assert!(sheet.title.size > sheet.heading1.size);
        assert!(sheet.heading1.size > sheet.heading2.size);
        assert!(sheet.heading2.size > sheet.heading3.size);
        assert!(sheet.heading3.size > sheet.body.size);
    }

    #[test]
    fn test_every_referenced_style_is_defined() {
        let styles = StyleSheet::DEFAULT.styles();
        for id in [
            style_id::NORMAL,
            style_id::TITLE,
            style_id::HEADING_1,
            style_id::HEADING_2,
            style_id::HEADING_3,
            style_id::LIST_PARAGRAPH,
            style_id::QUOTE,
            style_id::CODE,
            style_id::HYPERLINK,
        ] {
            assert!(styles.iter().any(|s| s.style_id() == id), "missing {id}");
        }
    }

    #[test]
    fn test_styles_carry_sheet_values() {
        let sheet = StyleSheet::DEFAULT;
        let styles = sheet.styles();
        let heading2 = styles
            .iter()
            .find(|s| s.style_id() == style_id::HEADING_2)
            .unwrap();
        assert_eq!(heading2.font_size(), Some(sheet.heading2.size));
        assert_eq!(heading2.text_color(), Some(sheet.heading2.color));
    }
}
