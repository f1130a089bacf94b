//! # Math Markup Cleanup
//!
//! Script authors paste math in whatever shape their editor produced: wrapped
//! in `$...$`, with doubled backslashes from JSON escaping, or with unicode
//! symbols. [`normalize`] turns that into markup a typesetting backend
//! accepts. It never fails and does not check that the result is valid LaTeX;
//! [`validate_markup`] performs the structural checks a backend would.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use crate::error::RenderError;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// The word `infinity`, with any backslash already in front of it
static INFINITY_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\?infinity").expect("valid regex"));

/// Commands that must be followed by a space so they do not run into the
/// next token (`\sinx` is an undefined control sequence).
const SPACED_COMMANDS: [&str; 6] = [r"\pm", r"\sin", r"\cos", r"\tan", r"\log", r"\ln"];

const SYMBOLS: [(&str, &str); 9] = [
    ("∞", r"\infty"),
    ("±", r"\pm"),
    ("≤", r"\leq"),
    ("≥", r"\geq"),
    ("≠", r"\neq"),
    ("→", r"\to"),
    ("∈", r"\in"),
    ("∀", r"\forall"),
    ("∃", r"\exists"),
];

/// Clean a math string for the typesetting backend.
///
/// The rules run in a fixed order; later rules may produce text that earlier
/// ones would have touched, so the order is part of the contract.
pub fn normalize(raw: &str) -> String {
    let mut latex = raw.replace("$$", "").replace('$', "");

    // JSON-escaped input arrives with doubled backslashes, sometimes twice over
    while latex.contains(r"\\") {
        latex = latex.replace(r"\\", r"\");
    }

    latex = latex.replace(r"\text{", r"\mathrm{");

    for command in SPACED_COMMANDS {
        latex = latex.replace(command, &format!("{} ", command));
    }

    latex = INFINITY_WORD.replace_all(&latex, NoExpand(r"\infty")).into_owned();
    for (symbol, escape) in SYMBOLS {
        latex = latex.replace(symbol, escape);
    }

    WHITESPACE.replace_all(&latex, " ").trim().to_string()
}

/// Structural checks on normalized markup: non-empty, balanced braces and no
/// dangling backslash. Escaped braces (`\{`, `\}`) do not count.
pub fn validate_markup(latex: &str) -> Result<(), RenderError> {
    let malformed = |reason: &str| RenderError::MalformedMarkup {
        content: latex.to_string(),
        reason: reason.to_string(),
    };

    if latex.trim().is_empty() {
        return Err(malformed("empty expression"));
    }

    let mut depth: i64 = 0;
    let mut chars = latex.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if chars.next().is_none() {
                    return Err(malformed("dangling backslash"));
                }
            }
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return Err(malformed("unexpected closing brace"));
                }
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(malformed("unbalanced braces"));
    }

    Ok(())
}

/// Split normalized markup into its top-level relation sides
/// (`a = b = c` has three parts). Always at least one part.
pub fn top_level_parts(latex: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth: i64 = 0;
    let mut start = 0;
    let mut escaped = false;

    for (i, c) in latex.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '{' => depth += 1,
            '}' => depth -= 1,
            '=' if depth == 0 => {
                parts.push(latex[start..i].trim());
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(latex[start..].trim());

    let parts: Vec<&str> = parts.into_iter().filter(|p| !p.is_empty()).collect();
    if parts.is_empty() {
        vec![latex.trim()]
    } else {
        parts
    }
}
