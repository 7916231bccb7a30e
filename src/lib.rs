//! mdocx - Markdown to Word (`.docx`) conversion
//!
//! The conversion pipeline runs in four synchronous stages:
//!
//! - **Block scanning** ([`markdown::BlockScanner`]): a single forward pass
//!   that classifies lines into headings, paragraphs, list items, code
//!   blocks, tables and block quotes
//! - **Inline segmentation** ([`markdown::segment`]): splits block text into
//!   bold, italic, code and hyperlink runs
//! - **Document building** ([`builder::DocumentBuilder`]): maps blocks onto a
//!   styled WordprocessingML model using a constant [`builder::StyleSheet`]
//! - **Serialization** ([`docx::PackageWriter`]): writes the OPC package as a
//!   ZIP archive
//!
//! The [`server`] module wraps the pipeline in an HTTP service with a
//! per-client request governor.
//!
//! # Example
//!
//! ```
//! use mdocx::markdown_to_docx;
//!
//! # fn main() -> mdocx::Result<()> {
//! let bytes = markdown_to_docx("# Report\n\n- **first**\n- second")?;
//! std::fs::write(std::env::temp_dir().join("report.docx"), &bytes)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Lower-level API
//!
//! ```
//! use mdocx::builder::DocumentBuilder;
//! use mdocx::builder::StyleSheet;
//! use mdocx::docx::PackageWriter;
//! use mdocx::markdown::parse_blocks;
//!
//! # fn main() -> mdocx::Result<()> {
//! let blocks = parse_blocks("| a | b |\n|---|---|\n| 1 | 2 |");
//! let document = DocumentBuilder::new(&StyleSheet::DEFAULT).build(&blocks);
//! assert_eq!(document.table_count(), 1);
//!
//! let bytes = PackageWriter::new().write(&document)?;
//! assert!(bytes.starts_with(b"PK"));
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod convert;
pub mod docx;
pub mod error;
pub mod markdown;
pub mod server;
pub mod xml;

pub use convert::{MAX_MARKDOWN_CHARS, convert_with_limit, markdown_to_docx};
pub use error::{Error, Result};
