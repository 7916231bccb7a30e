/// Relationship bookkeeping for the main document part.
///
/// Fixed parts (styles, numbering) take the first IDs; every hyperlink then
/// gets its own external relationship in document order. The mapper hands out
/// IDs before the body is serialized so the XML carries the real references.
use super::constants::{namespace, relationship_type as rt};
use crate::xml::escape_text;
use std::collections::HashMap;

/// A single relationship entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: &'static str,
    pub target: String,
    pub external: bool,
}

/// An ordered set of relationships that serializes to a `.rels` part.
#[derive(Debug, Default, Clone)]
pub struct Relationships {
    entries: Vec<Relationship>,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an internal relationship and return its ID.
    pub fn add(&mut self, rel_type: &'static str, target: &str) -> String {
        self.push(rel_type, target, false)
    }

    /// Add an external relationship and return its ID.
    pub fn add_external(&mut self, rel_type: &'static str, target: &str) -> String {
        self.push(rel_type, target, true)
    }

    fn push(&mut self, rel_type: &'static str, target: &str, external: bool) -> String {
        let mut id = String::from("rId");
        id.push_str(itoa::Buffer::new().format(self.entries.len() + 1));
        self.entries.push(Relationship {
            id: id.clone(),
            rel_type,
            target: target.to_string(),
            external,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.entries.iter()
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.entries.len() * 160);
        xml.push_str(super::constants::XML_DECLARATION);
        xml.push_str(&format!(
            r#"<Relationships xmlns="{}">"#,
            namespace::OPC_RELATIONSHIPS
        ));
        for rel in &self.entries {
            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}""#,
                rel.id,
                rel.rel_type,
                escape_text(&rel.target)
            ));
            if rel.external {
                xml.push_str(r#" TargetMode="External""#);
            }
            xml.push_str("/>");
        }
        xml.push_str("</Relationships>");
        xml
    }
}

/// Maps hyperlink order to relationship IDs.
#[derive(Debug, Default)]
pub struct RelationshipMapper {
    hyperlink_ids: HashMap<usize, String>,
}

impl RelationshipMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every hyperlink URL, in document order, as an external
    /// relationship of `rels`.
    pub fn register_hyperlinks<'a>(
        rels: &mut Relationships,
        urls: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut mapper = Self::new();
        for (index, url) in urls.into_iter().enumerate() {
            let id = rels.add_external(rt::HYPERLINK, url);
            mapper.add_hyperlink(index, id);
        }
        mapper
    }

    pub fn add_hyperlink(&mut self, index: usize, rel_id: String) {
        self.hyperlink_ids.insert(index, rel_id);
    }

    pub fn get_hyperlink_id(&self, index: usize) -> Option<&str> {
        self.hyperlink_ids.get(&index).map(String::as_str)
    }

    pub fn hyperlink_count(&self) -> usize {
        self.hyperlink_ids.len()
    }
}
