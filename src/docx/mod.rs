//! WordprocessingML document model and package writer.
//!
//! The model is deliberately small: a body of paragraphs and tables, a style
//! set, two list definitions and hyperlink relationships. Everything is
//! serialized by string building into the parts of a `.docx` ZIP package.

pub mod constants;
pub mod doc;
pub mod hyperlink;
pub mod numbering;
pub mod package;
pub mod paragraph;
pub mod props;
pub(crate) mod relmap;
pub mod run;
pub mod style;
pub mod table;

pub use doc::{BodyElement, Document, PageSetup};
pub use hyperlink::{HYPERLINK_STYLE, Hyperlink};
pub use numbering::{ListIndent, ListKind};
pub use package::PackageWriter;
pub use paragraph::{Alignment, Paragraph, ParagraphElement};
pub use run::{Run, RunContent, RunProperties};
pub use style::{DocDefaults, Style, StyleType};
pub use table::{Table, TableBorder, TableCell, TableRow};
