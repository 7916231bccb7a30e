/// Line-oriented block scanning.
///
/// [`BlockScanner`] walks the document once with a single cursor. Each call to
/// `next` classifies the line under the cursor, consumes one or more lines and
/// yields one [`Block`]. The only lookahead is a single line used to confirm a
/// table separator row.
use std::fmt;

/// Heading depth recognized by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeadingLevel {
    H1 = 1,
    H2 = 2,
    H3 = 3,
}

impl HeadingLevel {
    /// Numeric level (1-3).
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// One structural unit of a Markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `#`, `##` or `###` heading
    Heading { level: HeadingLevel, text: String },
    /// Any line that matches nothing else
    Paragraph { text: String },
    /// `- item`, `* item` or `+ item`
    BulletItem { text: String },
    /// `12. item`; `number` is the numeral exactly as written
    OrderedItem { number: String, text: String },
    /// Fenced code, lines kept verbatim
    CodeBlock {
        language: Option<String>,
        lines: Vec<String>,
    },
    /// Header row first, data rows after
    Table { rows: Vec<Vec<String>> },
    /// Consecutive `> ` lines joined with `\n`
    BlockQuote { text: String },
    /// Whitespace-only line
    Blank,
}

const FENCE: &str = "```";

/// Single-pass block scanner over a Markdown document.
///
/// # Examples
///
/// ```
/// use mdocx::markdown::{Block, BlockScanner};
///
/// let blocks: Vec<Block> = BlockScanner::new("Hello\n\n- item").collect();
/// assert_eq!(blocks.len(), 3);
/// assert_eq!(blocks[1], Block::Blank);
/// ```
#[derive(Debug, Clone)]
pub struct BlockScanner<'a> {
    lines: Vec<&'a str>,
    cursor: usize,
}

impl<'a> BlockScanner<'a> {
    /// Create a scanner over the given document. Both `\n` and `\r\n` line
    /// endings are accepted.
    pub fn new(input: &'a str) -> Self {
        Self {
            lines: input.lines().collect(),
            cursor: 0,
        }
    }

    #[inline]
    fn line(&self, offset: usize) -> Option<&'a str> {
        self.lines.get(self.cursor + offset).copied()
    }

    /// Consume a fenced code block. The closing fence is dropped; an
    /// unterminated fence runs to the end of the document.
    fn scan_fence(&mut self, info: &str) -> Block {
        let language = Some(info.trim())
            .filter(|lang| !lang.is_empty())
            .map(str::to_string);
        self.cursor += 1;

        let mut lines = Vec::new();
        while let Some(line) = self.line(0) {
            self.cursor += 1;
            if line.trim_start().starts_with(FENCE) {
                break;
            }
            lines.push(line.to_string());
        }

        Block::CodeBlock { language, lines }
    }

    /// Consume a table whose separator row has already been confirmed.
    fn scan_table(&mut self, header: &str) -> Block {
        let mut rows = vec![header_cells(header)];
        self.cursor += 2;

        while let Some(line) = self.line(0) {
            if !is_table_row(line) {
                break;
            }
            rows.push(row_cells(line));
            self.cursor += 1;
        }

        Block::Table { rows }
    }

    fn scan_quote(&mut self) -> Block {
        let mut parts = Vec::new();
        while let Some(content) = self.line(0).and_then(|line| line.strip_prefix("> ")) {
            parts.push(content.trim());
            self.cursor += 1;
        }
        Block::BlockQuote {
            text: parts.join("\n"),
        }
    }

    /// Consume exactly one line as the given block.
    #[inline]
    fn single(&mut self, block: Block) -> Block {
        self.cursor += 1;
        block
    }
}

impl Iterator for BlockScanner<'_> {
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        let line = self.line(0)?;
        let trimmed = line.trim();

        if let Some(info) = trimmed.strip_prefix(FENCE) {
            return Some(self.scan_fence(info));
        }

        if trimmed.starts_with('|') && self.line(1).is_some_and(is_separator_row) {
            return Some(self.scan_table(trimmed));
        }

        if let Some((level, text)) = heading(line) {
            let text = text.trim().to_string();
            return Some(self.single(Block::Heading { level, text }));
        }

        if line.starts_with("> ") {
            return Some(self.scan_quote());
        }

        if let Some(text) = bullet_item(trimmed) {
            let text = text.to_string();
            return Some(self.single(Block::BulletItem { text }));
        }

        if let Some((number, text)) = ordered_item(trimmed) {
            let block = Block::OrderedItem {
                number: number.to_string(),
                text: text.to_string(),
            };
            return Some(self.single(block));
        }

        if trimmed.is_empty() {
            return Some(self.single(Block::Blank));
        }

        let text = trimmed.to_string();
        Some(self.single(Block::Paragraph { text }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.lines.len().saturating_sub(self.cursor);
        (remaining.min(1), Some(remaining))
    }
}

/// Longest matching heading prefix wins.
fn heading(line: &str) -> Option<(HeadingLevel, &str)> {
    [
        ("### ", HeadingLevel::H3),
        ("## ", HeadingLevel::H2),
        ("# ", HeadingLevel::H1),
    ]
    .into_iter()
    .find_map(|(prefix, level)| line.strip_prefix(prefix).map(|rest| (level, rest)))
}

fn bullet_item(trimmed: &str) -> Option<&str> {
    let rest = trimmed.strip_prefix(['-', '*', '+'])?;
    rest.starts_with(char::is_whitespace).then(|| rest.trim())
}

fn ordered_item(trimmed: &str) -> Option<(&str, &str)> {
    let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = trimmed[digits..].strip_prefix('.')?;
    rest.starts_with(char::is_whitespace)
        .then(|| (&trimmed[..digits], rest.trim()))
}

/// Only pipes, dashes, colons and whitespace, with at least one dash.
fn is_separator_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.contains('-')
        && trimmed
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':') || c.is_whitespace())
}

/// A data row continues the table while it carries at least one pipe.
fn is_table_row(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !trimmed.starts_with(FENCE) && trimmed.contains('|')
}

/// Header cells: pipe-delimited, trimmed, empty cells dropped.
fn header_cells(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
        .collect()
}

/// Data cells keep interior empty cells so columns stay aligned; only the
/// outer pipes are dropped.
fn row_cells(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(|cell| cell.trim().to_string()).collect()
}
