//! List numbering definitions (`word/numbering.xml`).
//!
//! The package carries exactly two concrete lists: one bullet list shared by
//! every bulleted item and one decimal list shared by every ordered item.
//! Word's numbering engine produces the visible numbers, so ordered items
//! count continuously through the document whatever numerals the source used.

use super::constants::{XML_DECLARATION, namespace};
use crate::error::Result;
use std::fmt::Write as FmtWrite;

/// Kind of list a paragraph belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Bullet,
    Decimal,
}

impl ListKind {
    /// `w:numId` referenced from paragraph properties.
    pub const fn num_id(self) -> u32 {
        match self {
            ListKind::Bullet => 1,
            ListKind::Decimal => 2,
        }
    }

    const fn abstract_num_id(self) -> u32 {
        match self {
            ListKind::Bullet => 0,
            ListKind::Decimal => 1,
        }
    }
}

/// Indentation of list levels, in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListIndent {
    pub left: u32,
    pub hanging: u32,
}

impl Default for ListIndent {
    fn default() -> Self {
        Self {
            left: 720,
            hanging: 360,
        }
    }
}

const BULLET_GLYPHS: [(&str, &str); 3] = [
    ("\u{F0B7}", "Symbol"),
    ("o", "Courier New"),
    ("\u{F0A7}", "Wingdings"),
];
const LEVELS: u32 = 9;

/// Generate the numbering part.
pub fn generate_numbering_xml(indent: ListIndent) -> Result<String> {
    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECLARATION);
    write!(xml, r#"<w:numbering xmlns:w="{}">"#, namespace::WML_MAIN)?;

    for kind in [ListKind::Bullet, ListKind::Decimal] {
        write!(
            xml,
            r#"<w:abstractNum w:abstractNumId="{}"><w:multiLevelType w:val="hybridMultilevel"/>"#,
            kind.abstract_num_id()
        )?;
        for level in 0..LEVELS {
            write_level(&mut xml, kind, level, indent)?;
        }
        xml.push_str("</w:abstractNum>");
    }

    for kind in [ListKind::Bullet, ListKind::Decimal] {
        write!(
            xml,
            r#"<w:num w:numId="{}"><w:abstractNumId w:val="{}"/></w:num>"#,
            kind.num_id(),
            kind.abstract_num_id()
        )?;
    }

    xml.push_str("</w:numbering>");
    Ok(xml)
}

fn write_level(xml: &mut String, kind: ListKind, level: u32, indent: ListIndent) -> Result<()> {
    let left = indent.left * (level + 1);
    write!(xml, r#"<w:lvl w:ilvl="{}"><w:start w:val="1"/>"#, level)?;

    match kind {
        ListKind::Bullet => {
            let (glyph, font) = BULLET_GLYPHS[level as usize % BULLET_GLYPHS.len()];
            write!(
                xml,
                r#"<w:numFmt w:val="bullet"/><w:lvlText w:val="{glyph}"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="{left}" w:hanging="{}"/></w:pPr><w:rPr><w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:hint="default"/></w:rPr>"#,
                indent.hanging
            )?;
        },
        ListKind::Decimal => {
            write!(
                xml,
                r#"<w:numFmt w:val="decimal"/><w:lvlText w:val="%{}."/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="{left}" w:hanging="{}"/></w:pPr>"#,
                level + 1,
                indent.hanging
            )?;
        },
    }

    xml.push_str("</w:lvl>");
    Ok(())
}
