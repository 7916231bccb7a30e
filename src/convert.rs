//! One-call conversion from Markdown text to `.docx` bytes.
use crate::builder::{DocumentBuilder, StyleSheet};
use crate::docx::PackageWriter;
use crate::error::{Error, Result};
use crate::markdown::parse_blocks;
use tracing::debug;

/// Largest accepted input, in characters.
pub const MAX_MARKDOWN_CHARS: usize = 10_000;

/// Convert Markdown to a `.docx` package with the default style sheet.
///
/// No size ceiling is applied; see [`convert_with_limit`] for untrusted
/// input.
///
/// # Examples
///
/// ```
/// let bytes = mdocx::markdown_to_docx("# Hello\n\nWorld")?;
/// assert_eq!(&bytes[..2], b"PK");
/// # Ok::<(), mdocx::Error>(())
/// ```
pub fn markdown_to_docx(markdown: &str) -> Result<Vec<u8>> {
    convert_with_sheet(markdown, &StyleSheet::DEFAULT)
}

/// Convert Markdown after checking it against a character ceiling.
///
/// The check runs before any parsing, so oversized input costs no more than
/// counting its characters.
pub fn convert_with_limit(markdown: &str, max_chars: usize) -> Result<Vec<u8>> {
    let len = markdown.chars().count();
    if len > max_chars {
        return Err(Error::InputTooLarge {
            len,
            max: max_chars,
        });
    }
    markdown_to_docx(markdown)
}

/// Convert Markdown using a custom style sheet.
pub fn convert_with_sheet(markdown: &str, sheet: &StyleSheet) -> Result<Vec<u8>> {
    let blocks = parse_blocks(markdown);
    let document = DocumentBuilder::new(sheet).build(&blocks);
    let bytes = PackageWriter::new().write(&document)?;

    debug!(
        chars = markdown.len(),
        blocks = blocks.len(),
        bytes = bytes.len(),
        "converted markdown"
    );
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    fn document_xml(bytes: &[u8]) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        xml
    }

    #[test]
    fn test_end_to_end_package() {
        let bytes = markdown_to_docx("# Title\n\nBody text\n\n- item one\n- item two").unwrap();
        let xml = document_xml(&bytes);
        assert!(xml.contains(r#"<w:pStyle w:val="Title"/>"#));
        assert!(xml.contains(">Body text<"));
        assert_eq!(xml.matches(r#"<w:numId w:val="1"/>"#).count(), 2);
        assert!(!xml.contains("<w:p></w:p>"));
    }

    #[test]
    fn test_limit_rejects_before_parsing() {
        let input = "a".repeat(MAX_MARKDOWN_CHARS + 1);
        match convert_with_limit(&input, MAX_MARKDOWN_CHARS) {
            Err(Error::InputTooLarge { len, max }) => {
                assert_eq!(len, MAX_MARKDOWN_CHARS + 1);
                assert_eq!(max, MAX_MARKDOWN_CHARS);
            },
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_limit_counts_characters_not_bytes() {
        let input = "é".repeat(MAX_MARKDOWN_CHARS);
        assert!(convert_with_limit(&input, MAX_MARKDOWN_CHARS).is_ok());
    }

    #[test]
    fn test_empty_input_is_a_valid_document() {
        let xml = document_xml(&markdown_to_docx("").unwrap());
        assert!(xml.contains("<w:body><w:sectPr>"));
    }

    #[test]
    fn test_link_target_control_chars_stripped_from_rels() {
        let bytes = markdown_to_docx("see [x](https://a.test/\u{1}b)").unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let mut rels = String::new();
        archive
            .by_name("word/_rels/document.xml.rels")
            .unwrap()
            .read_to_string(&mut rels)
            .unwrap();
        assert!(rels.contains(r#"Target="https://a.test/b" TargetMode="External""#));
        assert!(!rels.contains('\u{1}'));
    }

    #[test]
    fn test_hostile_markup_survives() {
        let bytes =
            markdown_to_docx("<script>&</script> [x](javascript:alert(1)) \u{1}").unwrap();
        let xml = document_xml(&bytes);
        assert!(xml.contains("&lt;script&gt;&amp;&lt;/script&gt;"));
        assert!(!xml.contains("javascript"));
        assert!(!xml.contains("<w:hyperlink"));
    }
}
