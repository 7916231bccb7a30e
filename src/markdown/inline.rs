//! Inline markup segmentation.
//!
//! Splits one line of block content into styled runs. Markers are tested at
//! each candidate position in a fixed priority order (inline code, bold-italic,
//! bold, italic, hyperlink); the first marker with a valid close wins and
//! scanning resumes after it. Emphasis does not nest: `**a*b*c**` is a single
//! bold run whose text still contains the inner asterisks.

use memchr::{memchr, memmem};

/// A styled run of text within a block's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineSegment {
    /// Unformatted text
    Plain { text: String },
    /// `**text**`
    Bold { text: String },
    /// `*text*` or `_text_`
    Italic { text: String },
    /// `***text***`
    BoldItalic { text: String },
    /// `` `text` ``
    Code { text: String },
    /// `[label](url)`
    Link { label: String, url: String },
}

impl InlineSegment {
    /// Create a plain segment.
    #[inline]
    pub fn plain(text: impl Into<String>) -> Self {
        InlineSegment::Plain { text: text.into() }
    }

    /// The characters this segment renders, without markup.
    pub fn text(&self) -> &str {
        match self {
            InlineSegment::Plain { text }
            | InlineSegment::Bold { text }
            | InlineSegment::Italic { text }
            | InlineSegment::BoldItalic { text }
            | InlineSegment::Code { text } => text,
            InlineSegment::Link { label, .. } => label,
        }
    }
}

/// Segment a single line of text.
///
/// Always returns at least one segment; a line without markup (including the
/// empty line) yields exactly one [`InlineSegment::Plain`].
///
/// # Examples
///
/// ```
/// use mdocx::markdown::{segment, InlineSegment};
///
/// let segments = segment("say **hi**");
/// assert_eq!(
///     segments,
///     vec![
///         InlineSegment::plain("say "),
///         InlineSegment::Bold { text: "hi".to_string() },
///     ]
/// );
/// ```
pub fn segment(line: &str) -> Vec<InlineSegment> {
    let bytes = line.as_bytes();
    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut pos = 0;

    // Markers are ASCII, so a match can only begin on a char boundary and
    // every slice below is valid UTF-8.
    while pos < bytes.len() {
        if !is_marker(bytes[pos]) {
            pos += 1;
            continue;
        }
        match match_at(&line[pos..]) {
            Some((segment, consumed)) => {
                if plain_start < pos {
                    segments.push(InlineSegment::plain(&line[plain_start..pos]));
                }
                segments.push(segment);
                pos += consumed;
                plain_start = pos;
            },
            None => pos += 1,
        }
    }

    if plain_start < line.len() || segments.is_empty() {
        segments.push(InlineSegment::plain(&line[plain_start..]));
    }

    segments
}

/// Concatenate the rendered text of a segment sequence.
pub fn rendered_text(segments: &[InlineSegment]) -> String {
    segments.iter().map(InlineSegment::text).collect()
}

#[inline]
fn is_marker(byte: u8) -> bool {
    matches!(byte, b'`' | b'*' | b'_' | b'[')
}

/// Try every marker at the start of `rest`, in priority order.
///
/// Returns the segment and the number of bytes it consumed.
fn match_at(rest: &str) -> Option<(InlineSegment, usize)> {
    match rest.as_bytes().first()? {
        b'`' => single_delimited(rest, b'`')
            .map(|(text, len)| (InlineSegment::Code { text }, len)),
        b'*' => double_delimited(rest, "***")
            .map(|(text, len)| (InlineSegment::BoldItalic { text }, len))
            .or_else(|| {
                double_delimited(rest, "**").map(|(text, len)| (InlineSegment::Bold { text }, len))
            })
            .or_else(|| {
                single_delimited(rest, b'*')
                    .map(|(text, len)| (InlineSegment::Italic { text }, len))
            }),
        b'_' => single_delimited(rest, b'_')
            .map(|(text, len)| (InlineSegment::Italic { text }, len)),
        b'[' => link(rest),
        _ => None,
    }
}

/// `<m>inner<m>` where the inner text is non-empty and holds no `m`.
fn single_delimited(rest: &str, marker: u8) -> Option<(String, usize)> {
    let close = memchr(marker, &rest.as_bytes()[1..])? + 1;
    if close == 1 {
        return None;
    }
    Some((rest[1..close].to_string(), close + 1))
}

/// `<mm>inner<mm>` with the shortest non-empty inner text.
fn double_delimited(rest: &str, marker: &str) -> Option<(String, usize)> {
    let width = marker.len();
    if !rest.starts_with(marker) || rest.len() <= width {
        return None;
    }
    let search_from = width + 1;
    let close = memmem::find(rest.as_bytes().get(search_from..)?, marker.as_bytes())? + search_from;
    Some((rest[width..close].to_string(), close + width))
}

/// `[label](url)`; a `javascript:` target degrades to the plain label.
fn link(rest: &str) -> Option<(InlineSegment, usize)> {
    let bytes = rest.as_bytes();
    let label_end = memchr(b']', &bytes[1..])? + 1;
    if label_end == 1 || bytes.get(label_end + 1) != Some(&b'(') {
        return None;
    }
    let url_start = label_end + 2;
    let url_end = memchr(b')', &bytes[url_start..])? + url_start;
    if url_end == url_start {
        return None;
    }

    let label = rest[1..label_end].to_string();
    let url = &rest[url_start..url_end];
    let consumed = url_end + 1;

    if is_script_url(url) {
        return Some((InlineSegment::Plain { text: label }, consumed));
    }
    Some((
        InlineSegment::Link {
            label,
            url: url.trim().to_string(),
        },
        consumed,
    ))
}

fn is_script_url(url: &str) -> bool {
    const SCHEME: &str = "javascript:";
    let url = url.trim_start();
    url.len() >= SCHEME.len()
        && url.is_char_boundary(SCHEME.len())
        && url[..SCHEME.len()].eq_ignore_ascii_case(SCHEME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn plain(text: &str) -> InlineSegment {
        InlineSegment::plain(text)
    }

    #[test]
    fn test_no_markup_is_single_plain() {
        assert_eq!(segment("just words"), vec![plain("just words")]);
    }

    #[test]
    fn test_empty_line_is_single_empty_plain() {
        assert_eq!(segment(""), vec![plain("")]);
    }

    #[test]
    fn test_bold_italic_wins_over_bold() {
        assert_eq!(
            segment("***x***"),
            vec![InlineSegment::BoldItalic {
                text: "x".to_string()
            }]
        );
    }

    #[test]
    fn test_bold_does_not_nest_italic() {
        assert_eq!(
            segment("**a*b*c**"),
            vec![InlineSegment::Bold {
                text: "a*b*c".to_string()
            }]
        );
    }

    #[test]
    fn test_mixed_line() {
        let segments = segment("Use `cargo` with *care* or _this_.");
        assert_eq!(
            segments,
            vec![
                plain("Use "),
                InlineSegment::Code {
                    text: "cargo".to_string()
                },
                plain(" with "),
                InlineSegment::Italic {
                    text: "care".to_string()
                },
                plain(" or "),
                InlineSegment::Italic {
                    text: "this".to_string()
                },
                plain("."),
            ]
        );
    }

    #[test]
    fn test_code_shields_emphasis() {
        assert_eq!(
            segment("`**not bold**`"),
            vec![InlineSegment::Code {
                text: "**not bold**".to_string()
            }]
        );
    }

    #[test]
    fn test_unmatched_backtick_is_plain_and_stable() {
        let line = "a `b and c";
        let first = segment(line);
        assert_eq!(first, vec![plain(line)]);
        assert_eq!(segment(line), first);
    }

    #[test]
    fn test_unmatched_bold_is_plain() {
        assert_eq!(segment("**open"), vec![plain("**open")]);
    }

    #[test]
    fn test_link() {
        assert_eq!(
            segment("see [docs](https://example.com) now"),
            vec![
                plain("see "),
                InlineSegment::Link {
                    label: "docs".to_string(),
                    url: "https://example.com".to_string()
                },
                plain(" now"),
            ]
        );
    }

    #[test]
    fn test_javascript_link_rendered_as_label() {
        assert_eq!(
            segment("[click](JavaScript:alert(1))"),
            vec![plain("click"), plain(")")]
        );
        assert_eq!(segment("[x]( javascript:void)"), vec![plain("x")]);
    }

    #[test]
    fn test_incomplete_link_is_plain() {
        assert_eq!(segment("[label] (url)"), vec![plain("[label] (url)")]);
        assert_eq!(segment("[](url)"), vec![plain("[](url)")]);
        assert_eq!(segment("[label]()"), vec![plain("[label]()")]);
    }

    #[test]
    fn test_multibyte_text_around_markers() {
        assert_eq!(
            segment("héllo **wörld** ✓"),
            vec![
                plain("héllo "),
                InlineSegment::Bold {
                    text: "wörld".to_string()
                },
                plain(" ✓"),
            ]
        );
    }

    #[test]
    fn test_rendered_text_drops_markup() {
        let segments = segment("a **b** `c` [d](e)");
        assert_eq!(rendered_text(&segments), "a b c d");
    }

    proptest! {
        #[test]
        fn prop_marker_free_text_is_one_plain(s in "[a-zA-Z0-9 ,.!?éü]{0,40}") {
            prop_assert_eq!(segment(&s), vec![InlineSegment::plain(s.clone())]);
        }

        #[test]
        fn prop_segmenting_never_panics_and_is_deterministic(s in "[a-c*_`\\[\\]() ]{0,30}") {
            let first = segment(&s);
            prop_assert!(!first.is_empty());
            prop_assert_eq!(segment(&s), first);
        }
    }
}
