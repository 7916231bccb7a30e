/// Document properties parts (`docProps/core.xml`, `docProps/app.xml`).
use crate::error::Result;
use crate::xml::escape_text;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write as FmtWrite;

use super::constants::XML_DECLARATION;

const APPLICATION: &str = concat!("mdocx ", env!("CARGO_PKG_VERSION"));

/// Generate the core properties part.
pub fn generate_core_xml(title: Option<&str>, created: DateTime<Utc>) -> Result<String> {
    let mut xml = String::with_capacity(768);
    xml.push_str(XML_DECLARATION);
    xml.push_str(
        r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
    );

    if let Some(title) = title {
        write!(xml, "<dc:title>{}</dc:title>", escape_text(title))?;
    }
    write!(xml, "<dc:creator>{}</dc:creator>", APPLICATION)?;

    let stamp = created.to_rfc3339_opts(SecondsFormat::Secs, true);
    write!(
        xml,
        r#"<dcterms:created xsi:type="dcterms:W3CDTF">{stamp}</dcterms:created><dcterms:modified xsi:type="dcterms:W3CDTF">{stamp}</dcterms:modified>"#
    )?;

    xml.push_str("</cp:coreProperties>");
    Ok(xml)
}

/// Generate the extended (application) properties part.
pub fn generate_app_xml() -> Result<String> {
    let mut xml = String::with_capacity(384);
    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes"><Application>{}</Application><DocSecurity>0</DocSecurity></Properties>"#,
        APPLICATION
    )?;
    Ok(xml)
}
