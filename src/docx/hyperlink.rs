/// External hyperlinks inside a paragraph.
use super::run::Run;
use crate::error::Result;
use std::fmt::Write as FmtWrite;

/// Character style applied to hyperlink text.
pub const HYPERLINK_STYLE: &str = "Hyperlink";

/// A clickable link to an external URL.
///
/// The target lives in the document part's relationships; the element itself
/// only carries the relationship ID, resolved at serialization time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hyperlink {
    pub(crate) url: String,
    pub(crate) text: String,
}

impl Hyperlink {
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: text.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn to_xml(&self, xml: &mut String, r_id: &str) -> Result<()> {
        write!(xml, r#"<w:hyperlink r:id="{}" w:history="1">"#, r_id)?;
        Run::text(self.text.as_str())
            .style(HYPERLINK_STYLE)
            .to_xml(xml)?;
        xml.push_str("</w:hyperlink>");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hyperlink_xml() {
        let link = Hyperlink::new("https://example.com/?a=1&b=2", "docs & more");
        let mut xml = String::new();
        link.to_xml(&mut xml, "rId7").unwrap();
        assert!(xml.starts_with(r#"<w:hyperlink r:id="rId7""#));
        assert!(xml.contains(r#"<w:rStyle w:val="Hyperlink"/>"#));
        assert!(xml.contains("docs &amp; more"));
        assert!(!xml.contains("example.com"));
    }
}
