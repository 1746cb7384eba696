//! Function-name heuristic
//!
//! Names are found with the textual pattern `function <identifier>(`, where the
//! identifier is made of ASCII word characters and is separated from the
//! keyword by spaces or tabs on the same line. Only JavaScript-style
//! declarations are recognized; methods, arrow functions and other languages'
//! syntax are invisible to it.

use std::sync::LazyLock;

use regex::Regex;

static FUNCTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bfunction[ \t]+([A-Za-z0-9_]+)\(").expect("function pattern is valid")
});

/// Every declared function name in `text`, in order, duplicates included
#[must_use]
pub fn extract_functions(text: &str) -> Vec<String> {
    FUNCTION_PATTERN
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// The first declared function name in `text`
#[must_use]
pub fn first_function(text: &str) -> Option<&str> {
    FUNCTION_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|name| name.as_str())
}

/// Function names declared across `lines`, scanned as one newline-joined text
#[must_use]
pub fn functions_in_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let content = lines.into_iter().collect::<Vec<_>>().join("\n");
    extract_functions(&content)
}
