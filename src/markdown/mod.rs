//! Markdown parsing for the DOCX converter.
//!
//! Parsing happens in two layers:
//!
//! - [`BlockScanner`] splits a document into an ordered sequence of [`Block`]s,
//!   one forward pass over the lines.
//! - [`segment`] splits the text of a single block into styled
//!   [`InlineSegment`]s.
//!
//! Neither layer can fail. Malformed or unsupported Markdown degrades to
//! plain text rather than producing an error.
//!
//! # Example
//!
//! ```
//! use mdocx::markdown::{parse_blocks, segment, Block, InlineSegment};
//!
//! let blocks = parse_blocks("## Setup\n\nRun **cargo**.");
//! assert_eq!(blocks.len(), 3);
//!
//! if let Block::Paragraph { text } = &blocks[2] {
//!     let segments = segment(text);
//!     assert_eq!(segments[1], InlineSegment::Bold { text: "cargo".to_string() });
//! }
//! ```

pub mod block;
pub mod inline;

pub use block::{Block, BlockScanner, HeadingLevel};
pub use inline::{InlineSegment, rendered_text, segment};

/// Scan a whole document into blocks.
pub fn parse_blocks(markdown: &str) -> Vec<Block> {
    BlockScanner::new(markdown).collect()
}
