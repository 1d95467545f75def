// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Utility functions for string processing.

/// Remove `<...>` markup, keeping the text between tags.
///
/// Not an HTML parser. A `<` opens a tag only when a letter, `/` or `!`
/// follows it, so `x < 5` survives. An unclosed tag swallows the rest of the
/// input. Whitespace left behind is collapsed.
///
/// # Example
///
/// ```ignore
/// assert_eq!(strip_tags("<p>Hello <b>world</b></p>"), "Hello world");
/// ```
pub fn strip_tags(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_tag = false;
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            // A tag opens only on `<` followed by a name, `/` or `!`
            '<' if !in_tag
                && chars
                    .peek()
                    .is_some_and(|&n| n.is_ascii_alphabetic() || n == '/' || n == '!') =>
            {
                in_tag = true;
                out.push(' ');
            }
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
