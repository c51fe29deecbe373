//! Textual fixups around the converter run.
//!
//! sass-convert has no native support for keeping trailing comments inline,
//! preferring single quotes, or dropping leading zeros, so the pipeline
//! compensates with regex transforms around the subprocess: markers spliced
//! in before conversion and recognized afterwards, placeholders masking
//! quotes inside comments while the global rewrite runs. The transforms are
//! best-effort: they never fail, they only degrade on pathological input.

use std::sync::LazyLock;

use fancy_regex::Regex as FancyRegex;
use regex::Regex;

/// Marker spliced between an inline comment's opener and its body before
/// conversion, so relocated comments can be recognized and re-inlined.
const INLINE_COMMENT_MARKER: &str = "---sassfmt-end-of-inline-comment---";

/// Placeholder substituted for double quotes inside comments while the
/// global quote rewrite runs.
const DOUBLE_QUOTE_PLACEHOLDER: &str = "SASSFMT_DOUBLE_QUOTE_PLACEHOLDER";

/// An inline comment: `//` or `/*` trailing a statement terminator.
static INLINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([;{}]+[ \t]*)(//|/\*)(.*)").unwrap());

/// A marked comment after conversion: whitespace, opener, marker, rest.
static MARKED_INLINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(\s+)(//|/\*){INLINE_COMMENT_MARKER}(.*)")).unwrap());

/// A CSS block comment, `/* ... */`.
///
/// The lookahead keeps a `*` inside the body from closing the comment
/// early; plain regex cannot express that, hence fancy-regex here.
static BLOCK_COMMENT: LazyLock<FancyRegex> = LazyLock::new(|| FancyRegex::new(r"/\*(\*(?!/)|[^*])*\*/").unwrap());

/// A single-line comment through end of line.
static LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"//.+").unwrap());

/// A decimal below one, preceded by a space: ` 0.<digits>`.
static LEADING_ZERO_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" 0\.(\d+)").unwrap());

/// Splice markers into inline comments ahead of conversion.
///
/// Returns the marked text and the number of comments marked.
pub fn mark_inline_comments(text: &str) -> (String, usize) {
    let mut count = 0;
    let marked = INLINE_COMMENT.replace_all(text, |caps: &regex::Captures<'_>| {
        count += 1;
        format!("{}{}{INLINE_COMMENT_MARKER}{}", &caps[1], &caps[2], &caps[3])
    });
    (marked.into_owned(), count)
}

/// Re-inline marked comments after conversion and scrub leftover markers.
///
/// A restored comment sits one space after the code it annotates, whatever
/// whitespace the converter put in between.
pub fn restore_inline_comments(text: &str) -> String {
    let restored = MARKED_INLINE_COMMENT.replace_all(text, " ${2}${3}");
    // A marker without preceding whitespace (a comment the converter left
    // at the start of a line or buried in another comment) never matches
    // above; strip it back to the bare opener.
    restored
        .replace(&format!("//{INLINE_COMMENT_MARKER}"), "//")
        .replace(&format!("/*{INLINE_COMMENT_MARKER}"), "/*")
}

/// Mask double quotes inside comments with the placeholder.
///
/// Returns the masked text and how many quotes were protected.
pub fn mask_comment_quotes(text: &str) -> (String, usize) {
    let mut protected = 0;

    let masked = BLOCK_COMMENT.replace_all(text, |caps: &fancy_regex::Captures<'_>| {
        let body = &caps[0];
        protected += body.matches('"').count();
        body.replace('"', DOUBLE_QUOTE_PLACEHOLDER)
    });
    let masked = LINE_COMMENT.replace_all(&masked, |caps: &regex::Captures<'_>| {
        let body = &caps[0];
        protected += body.matches('"').count();
        body.replace('"', DOUBLE_QUOTE_PLACEHOLDER)
    });

    (masked.into_owned(), protected)
}

/// Turn placeholders back into double quotes.
pub fn unmask_comment_quotes(text: &str) -> String {
    text.replace(DOUBLE_QUOTE_PLACEHOLDER, "\"")
}

/// Rewrite double quotes to single quotes everywhere except inside comments.
pub fn prefer_single_quotes(text: &str) -> String {
    let (masked, protected) = mask_comment_quotes(text);
    if protected > 0 {
        log::debug!("protected {protected} double quote(s) inside comments");
    }
    unmask_comment_quotes(&masked.replace('"', "'"))
}

/// Strip the leading zero from decimal values (`margin: 0.5em` becomes
/// `margin: .5em`).
///
/// Applies everywhere a space precedes the number, comments included; this
/// transform has no protection pass.
pub fn strip_leading_zeros(text: &str) -> String {
    LEADING_ZERO_NUMBER.replace_all(text, " .${1}").into_owned()
}
