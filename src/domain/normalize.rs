//! Relaxed GYP syntax to strict JSON
//!
//! GYP files are Python literals: `#` comments, single-quoted strings and
//! trailing commas. The conversion runs as four named stages:
//!
//! 1. [`strip_comments`] - line-wise, drops `#` comments
//! 2. [`escape_quotes`] - `"` becomes `\"`
//! 3. [`requote`] - `'` becomes `"`
//! 4. [`strip_trailing_commas`] - `,` before `]` or `}` is removed
//!
//! None of the stages know about string boundaries. A `#` inside a string
//! literal still starts a comment, and a `, ]` inside a string still loses
//! its comma.

use std::sync::LazyLock;

use regex::Regex;

static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([\]}])").expect("static regex is valid"));

/// Runs all stages in order
pub fn normalize(raw: &str) -> String {
    let text = strip_comments(raw);
    let text = escape_quotes(&text);
    let text = requote(&text);
    strip_trailing_commas(&text)
}

/// Trims every line, drops comment lines and truncates at the first `#`
///
/// Surviving lines are re-joined with `\n` so that JSON parse errors still
/// point at the right line.
pub fn strip_comments(raw: &str) -> String {
    raw.split('\n')
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .map(|line| match line.find('#') {
            Some(pos) => line[..pos].trim_end(),
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Escapes literal double quotes so they survive [`requote`]
pub fn escape_quotes(text: &str) -> String {
    text.replace('"', "\\\"")
}

/// Turns single-quoted strings into double-quoted ones
pub fn requote(text: &str) -> String {
    text.replace('\'', "\"")
}

/// Removes commas directly followed (across whitespace) by `]` or `}`
pub fn strip_trailing_commas(text: &str) -> String {
    TRAILING_COMMA.replace_all(text, "$1").into_owned()
}
