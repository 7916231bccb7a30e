//! Package writer: assembles every part into the `.docx` ZIP container.

use super::constants::{XML_DECLARATION, content_type as ct, namespace, part, relationship_type as rt};
use super::doc::Document;
use super::numbering::generate_numbering_xml;
use super::props::{generate_app_xml, generate_core_xml};
use super::relmap::{RelationshipMapper, Relationships};
use super::style::generate_styles_xml;
use crate::error::Result;
use crate::xml::escape_xml;
use chrono::Utc;
use std::collections::BTreeMap;
use std::io::{Cursor, Write};
use tracing::debug;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Writes a [`Document`] as an OOXML package.
///
/// # Examples
///
/// ```
/// use mdocx::docx::{Document, PackageWriter, Paragraph, Run};
///
/// # fn main() -> mdocx::Result<()> {
/// let mut doc = Document::new();
/// let mut paragraph = Paragraph::new();
/// paragraph.add_run(Run::text("Hello"));
/// doc.add_paragraph(paragraph);
///
/// let bytes = PackageWriter::new().write(&doc)?;
/// assert_eq!(&bytes[..2], b"PK");
/// # Ok(())
/// # }
/// ```
pub struct PackageWriter<W: Write + std::io::Seek> {
    zip_writer: ZipWriter<W>,
    content_types: ContentTypesItem,
}

impl PackageWriter<Cursor<Vec<u8>>> {
    /// Create a package writer that writes to memory.
    pub fn new() -> Self {
        Self::with_writer(Cursor::new(Vec::new()))
    }

    /// Serialize the document and return the package bytes.
    pub fn write(self, document: &Document) -> Result<Vec<u8>> {
        Ok(self.write_to(document)?.into_inner())
    }
}

impl Default for PackageWriter<Cursor<Vec<u8>>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + std::io::Seek> PackageWriter<W> {
    /// Create a package writer over any seekable sink.
    pub fn with_writer(writer: W) -> Self {
        Self {
            zip_writer: ZipWriter::new(writer),
            content_types: ContentTypesItem::new(),
        }
    }

    /// Serialize every part of the document and finish the archive.
    pub fn write_to(mut self, document: &Document) -> Result<W> {
        let mut doc_rels = Relationships::new();
        doc_rels.add(rt::STYLES, "styles.xml");
        doc_rels.add(rt::NUMBERING, "numbering.xml");
        let mapper =
            RelationshipMapper::register_hyperlinks(&mut doc_rels, document.collect_hyperlink_urls());

        let mut pkg_rels = Relationships::new();
        pkg_rels.add(rt::OFFICE_DOCUMENT, part::DOCUMENT);
        pkg_rels.add(rt::CORE_PROPERTIES, part::CORE_PROPERTIES);
        pkg_rels.add(rt::EXTENDED_PROPERTIES, part::EXTENDED_PROPERTIES);

        let created = document.created.unwrap_or_else(Utc::now);

        self.add_part(part::PACKAGE_RELS, ct::OPC_RELATIONSHIPS, &pkg_rels.to_xml())?;
        self.add_part(part::DOCUMENT, ct::WML_DOCUMENT_MAIN, &document.to_xml(&mapper)?)?;
        self.add_part(part::DOCUMENT_RELS, ct::OPC_RELATIONSHIPS, &doc_rels.to_xml())?;
        self.add_part(
            part::STYLES,
            ct::WML_STYLES,
            &generate_styles_xml(&document.defaults, &document.styles)?,
        )?;
        self.add_part(
            part::NUMBERING,
            ct::WML_NUMBERING,
            &generate_numbering_xml(document.list_indent)?,
        )?;
        self.add_part(
            part::CORE_PROPERTIES,
            ct::OPC_CORE_PROPERTIES,
            &generate_core_xml(document.title(), created)?,
        )?;
        self.add_part(
            part::EXTENDED_PROPERTIES,
            ct::OFC_EXTENDED_PROPERTIES,
            &generate_app_xml()?,
        )?;

        let content_types = self.content_types.to_xml();
        self.write_entry(part::CONTENT_TYPES, content_types.as_bytes())?;

        debug!(
            hyperlinks = mapper.hyperlink_count(),
            elements = document.elements().len(),
            "package assembled"
        );

        Ok(self.zip_writer.finish()?)
    }

    fn add_part(&mut self, name: &str, content_type: &str, content: &str) -> Result<()> {
        self.content_types.add_content_type(name, content_type);
        self.write_entry(name, content.as_bytes())
    }

    fn write_entry(&mut self, name: &str, content: &[u8]) -> Result<()> {
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        self.zip_writer.start_file(name, options)?;
        self.zip_writer.write_all(content)?;
        Ok(())
    }
}

/// Helper for building `[Content_Types].xml`.
///
/// Relationship parts map by extension; every other part gets an override.
struct ContentTypesItem {
    defaults: BTreeMap<&'static str, &'static str>,
    overrides: BTreeMap<String, String>,
}

impl ContentTypesItem {
    fn new() -> Self {
        let defaults = BTreeMap::from([("rels", ct::OPC_RELATIONSHIPS), ("xml", ct::XML)]);
        Self {
            defaults,
            overrides: BTreeMap::new(),
        }
    }

    fn add_content_type(&mut self, partname: &str, content_type: &str) {
        let ext = partname.rsplit('.').next().unwrap_or_default();
        if self.defaults.get(ext) == Some(&content_type) {
            return;
        }
        self.overrides
            .insert(format!("/{partname}"), content_type.to_string());
    }

    fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(1024);
        xml.push_str(XML_DECLARATION);
        xml.push_str(&format!(r#"<Types xmlns="{}">"#, namespace::OPC_CONTENT_TYPES));

        for (ext, content_type) in &self.defaults {
            xml.push_str(&format!(
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                ext, content_type
            ));
        }
        for (partname, content_type) in &self.overrides {
            xml.push_str(&format!(
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                escape_xml(partname),
                escape_xml(content_type)
            ));
        }

        xml.push_str("</Types>");
        xml
    }
}
