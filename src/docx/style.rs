/// Style definitions (`word/styles.xml`).
///
/// Every visual attribute a converted document uses lives in a named style;
/// body elements reference styles by ID and only override what the style
/// cannot express.
use super::constants::{XML_DECLARATION, namespace};
use crate::error::Result;
use crate::xml::escape_xml;
use std::fmt::Write as FmtWrite;

/// Kind of content a style applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleType {
    Paragraph,
    Character,
}

impl StyleType {
    fn as_str(self) -> &'static str {
        match self {
            StyleType::Paragraph => "paragraph",
            StyleType::Character => "character",
        }
    }
}

/// A style definition.
///
/// # Examples
///
/// ```
/// use mdocx::docx::{Style, StyleType};
///
/// let style = Style::new("Quote", "Quote", StyleType::Paragraph)
///     .based_on("Normal")
///     .italic(true)
///     .color("595959");
/// assert_eq!(style.style_id(), "Quote");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    style_id: String,
    name: String,
    style_type: StyleType,
    is_default: bool,
    based_on: Option<String>,
    next: Option<String>,
    priority: Option<u32>,
    outline_level: Option<u8>,
    keep_next: bool,
    font_name: Option<String>,
    /// Half-points
    font_size: Option<u32>,
    bold: bool,
    italic: bool,
    underline: bool,
    color: Option<String>,
    shading: Option<String>,
    /// Twips
    space_before: Option<u32>,
    /// Twips
    space_after: Option<u32>,
    /// Twips
    indent_left: Option<u32>,
}

impl Style {
    pub fn new(style_id: &str, name: &str, style_type: StyleType) -> Self {
        Self {
            style_id: style_id.to_string(),
            name: name.to_string(),
            style_type,
            is_default: false,
            based_on: None,
            next: None,
            priority: None,
            outline_level: None,
            keep_next: false,
            font_name: None,
            font_size: None,
            bold: false,
            italic: false,
            underline: false,
            color: None,
            shading: None,
            space_before: None,
            space_after: None,
            indent_left: None,
        }
    }

    pub fn style_id(&self) -> &str {
        &self.style_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn style_type(&self) -> StyleType {
        self.style_type
    }

    pub fn font_size(&self) -> Option<u32> {
        self.font_size
    }

    pub fn text_color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Mark as the default style for its type.
    pub fn default_style(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn based_on(mut self, style_id: &str) -> Self {
        self.based_on = Some(style_id.to_string());
        self
    }

    /// Style of the paragraph that follows when typing in Word.
    pub fn next(mut self, style_id: &str) -> Self {
        self.next = Some(style_id.to_string());
        self
    }

    pub fn priority(mut self, priority: u32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Outline level (0 = level 1); makes the style a navigable heading.
    pub fn outline_level(mut self, level: u8) -> Self {
        self.outline_level = Some(level);
        self.keep_next = true;
        self
    }

    pub fn font(mut self, name: &str) -> Self {
        self.font_name = Some(name.to_string());
        self
    }

    /// Font size in half-points.
    pub fn size(mut self, half_points: u32) -> Self {
        self.font_size = Some(half_points);
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub fn underline(mut self, underline: bool) -> Self {
        self.underline = underline;
        self
    }

    pub fn color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn shading(mut self, fill: &str) -> Self {
        self.shading = Some(fill.to_string());
        self
    }

    /// Spacing before and after, in twips.
    pub fn spacing(mut self, before: u32, after: u32) -> Self {
        self.space_before = Some(before);
        self.space_after = Some(after);
        self
    }

    /// Left indentation in twips.
    pub fn indent_left(mut self, twips: u32) -> Self {
        self.indent_left = Some(twips);
        self
    }

    fn has_paragraph_properties(&self) -> bool {
        self.keep_next
            || self.outline_level.is_some()
            || self.shading.is_some()
            || self.space_before.is_some()
            || self.space_after.is_some()
            || self.indent_left.is_some()
    }

    fn has_run_properties(&self) -> bool {
        self.font_name.is_some()
            || self.font_size.is_some()
            || self.bold
            || self.italic
            || self.underline
            || self.color.is_some()
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        write!(
            xml,
            r#"<w:style w:type="{}" w:styleId="{}""#,
            self.style_type.as_str(),
            escape_xml(&self.style_id)
        )?;
        if self.is_default {
            xml.push_str(r#" w:default="1""#);
        }
        xml.push('>');

        write!(xml, r#"<w:name w:val="{}"/>"#, escape_xml(&self.name))?;
        if let Some(ref based_on) = self.based_on {
            write!(xml, r#"<w:basedOn w:val="{}"/>"#, escape_xml(based_on))?;
        }
        if let Some(ref next) = self.next {
            write!(xml, r#"<w:next w:val="{}"/>"#, escape_xml(next))?;
        }
        if let Some(priority) = self.priority {
            write!(xml, r#"<w:uiPriority w:val="{}"/>"#, priority)?;
        }
        xml.push_str("<w:qFormat/>");

        if self.style_type == StyleType::Paragraph && self.has_paragraph_properties() {
            xml.push_str("<w:pPr>");
            if self.keep_next {
                xml.push_str("<w:keepNext/>");
            }
            if let Some(ref fill) = self.shading {
                write!(xml, r#"<w:shd w:val="clear" w:color="auto" w:fill="{}"/>"#, fill)?;
            }
            if self.space_before.is_some() || self.space_after.is_some() {
                xml.push_str("<w:spacing");
                if let Some(before) = self.space_before {
                    write!(xml, r#" w:before="{}""#, before)?;
                }
                if let Some(after) = self.space_after {
                    write!(xml, r#" w:after="{}""#, after)?;
                }
                xml.push_str("/>");
            }
            if let Some(left) = self.indent_left {
                write!(xml, r#"<w:ind w:left="{}"/>"#, left)?;
            }
            if let Some(level) = self.outline_level {
                write!(xml, r#"<w:outlineLvl w:val="{}"/>"#, level)?;
            }
            xml.push_str("</w:pPr>");
        }

        if self.has_run_properties() {
            xml.push_str("<w:rPr>");
            if let Some(ref font) = self.font_name {
                let font = escape_xml(font);
                write!(
                    xml,
                    r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}"/>"#
                )?;
            }
            if self.bold {
                xml.push_str("<w:b/>");
            }
            if self.italic {
                xml.push_str("<w:i/>");
            }
            if let Some(ref color) = self.color {
                write!(xml, r#"<w:color w:val="{}"/>"#, escape_xml(color))?;
            }
            if let Some(size) = self.font_size {
                write!(xml, r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#)?;
            }
            if self.underline {
                xml.push_str(r#"<w:u w:val="single"/>"#);
            }
            xml.push_str("</w:rPr>");
        }

        xml.push_str("</w:style>");
        Ok(())
    }
}

/// Document-wide run defaults written into `w:docDefaults`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocDefaults {
    pub font: String,
    /// Half-points
    pub size: u32,
}

/// Generate the styles part.
pub fn generate_styles_xml(defaults: &DocDefaults, styles: &[Style]) -> Result<String> {
    let mut xml = String::with_capacity(1024 + styles.len() * 512);
    xml.push_str(XML_DECLARATION);
    write!(xml, r#"<w:styles xmlns:w="{}">"#, namespace::WML_MAIN)?;

    let font = escape_xml(&defaults.font);
    write!(
        xml,
        r#"<w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:eastAsia="{font}" w:cs="{font}"/><w:sz w:val="{size}"/><w:szCs w:val="{size}"/><w:lang w:val="en-US"/></w:rPr></w:rPrDefault><w:pPrDefault/></w:docDefaults>"#,
        size = defaults.size
    )?;

    for style in styles {
        style.to_xml(&mut xml)?;
    }

    xml.push_str("</w:styles>");
    Ok(xml)
}
