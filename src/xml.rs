//! XML text escaping for generated OOXML parts.
use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

// Built once, shared across threads
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build XML escaper")
});

/// Escape XML special characters.
///
/// # Examples
///
/// ```
/// use mdocx::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<w:t>\"x\"</w:t>"), "&lt;w:t&gt;&quot;x&quot;&lt;/w:t&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    XML_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
}

/// Remove characters that are not allowed anywhere in an XML 1.0 document.
///
/// Markdown pasted from other tools occasionally carries C0 control
/// characters; Word refuses to open a package containing them.
pub fn strip_invalid_chars(s: &str) -> std::borrow::Cow<'_, str> {
    let is_valid = |c: char| matches!(c, '\t' | '\n' | '\r') || c >= ' ';
    if s.chars().all(is_valid) {
        std::borrow::Cow::Borrowed(s)
    } else {
        std::borrow::Cow::Owned(s.chars().filter(|&c| is_valid(c)).collect())
    }
}

/// Escape text destined for a `w:t` element.
#[inline]
pub fn escape_text(s: &str) -> String {
    escape_xml(&strip_invalid_chars(s))
}
