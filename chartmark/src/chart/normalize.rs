//! Data block normalization
//!
//! Chart blocks carry their points in a loose, JSON-like notation. Before handing the buffer to
//! serde_json it goes through an ordered list of rewrites. The rules interact (quoting has to run
//! after the brackets are fixed, comma removal after quotes are settled), so the order of
//! [`PIPELINE`] is part of the contract.

use once_cell::sync::Lazy;
use regex::Regex;

/// A single text rewrite.
pub type Rewrite = fn(&str) -> String;

/// Rewrites applied to a data buffer, in order.
pub const PIPELINE: &[(&str, Rewrite)] = &[
    ("rewrap brackets", rewrap_brackets),
    ("quote keys", quote_keys),
    ("double quotes", double_quotes),
    ("trailing commas", strip_trailing_commas),
];

static BARE_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([{,]\s*)(key|value)(\s*):").expect("valid key pattern"));

static TRAILING_COMMA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",\s*([}\]])").expect("valid comma pattern"));

/// Runs the whole pipeline over a data buffer.
pub fn normalize(buffer: &str) -> String {
    PIPELINE
        .iter()
        .fold(buffer.to_string(), |text, (_, rewrite)| rewrite(&text))
}

/// Wraps the buffer in exactly one pair of square brackets.
///
/// Handles both `[ ... ]` and a bare single entry; applying it twice changes nothing.
pub fn rewrap_brackets(text: &str) -> String {
    let text = text.trim();
    let text = text.strip_suffix(']').unwrap_or(text).trim();
    let text = text.strip_prefix('[').unwrap_or(text).trim();
    format!("[{text}]")
}

/// Quotes bare `key:` and `value:` object keys. Keys already in quotes and text inside string
/// literals are left alone.
pub fn quote_keys(text: &str) -> String {
    map_unquoted(text, |segment| {
        BARE_KEY.replace_all(segment, "$1\"$2\"$3:").into_owned()
    })
}

/// Turns single-quoted strings into double-quoted ones.
///
/// Apostrophes inside double-quoted strings survive, and double quotes inside single-quoted
/// strings are escaped.
pub fn double_quotes(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in text.chars() {
        if escaped {
            output.push(c);
            escaped = false;
            continue;
        }

        match (quote, c) {
            (_, '\\') => {
                output.push(c);
                escaped = true;
            }
            (None, '\'') => {
                quote = Some('\'');
                output.push('"');
            }
            (None, '"') => {
                quote = Some('"');
                output.push('"');
            }
            (Some('\''), '\'') | (Some('"'), '"') => {
                quote = None;
                output.push('"');
            }
            (Some('\''), '"') => output.push_str("\\\""),
            _ => output.push(c),
        }
    }

    output
}

/// Drops a comma that directly precedes `}` or `]` outside string literals.
pub fn strip_trailing_commas(text: &str) -> String {
    map_unquoted(text, |segment| {
        TRAILING_COMMA.replace_all(segment, "$1").into_owned()
    })
}

/// Applies `rewrite` to the parts of `text` outside single or double quoted strings.
///
/// Quoted strings, escapes included, are copied through unchanged. An unterminated string runs
/// to the end of the text.
fn map_unquoted(text: &str, rewrite: impl Fn(&str) -> String) -> String {
    let mut output = String::with_capacity(text.len());
    let mut start = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (Some(_), '\\') => escaped = true,
            (Some(q), c) if c == q => {
                let end = i + c.len_utf8();
                output.push_str(&text[start..end]);
                start = end;
                quote = None;
            }
            (None, '"') | (None, '\'') => {
                output.push_str(&rewrite(&text[start..i]));
                start = i;
                quote = Some(c);
            }
            _ => {}
        }
    }

    match quote {
        None => output.push_str(&rewrite(&text[start..])),
        Some(_) => output.push_str(&text[start..]),
    }
    output
}
