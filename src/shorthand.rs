// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Parser for shorthand shareable-configuration references.
//!
//! References are written the way users pass them to `npm install`, for
//! example `github:@scope/name@v1.0.0` or `owner/name#main`. semantic-release
//! only needs the bare module identifier, so the host prefix and any version
//! or ref suffix are stripped.

use std::sync::LazyLock;

use regex::Regex;

/// Grammar for a single reference line.
///
/// `(?:github:|gitlab:)?` drops the host prefix, group 1 captures either
/// `@?scope/name` or a single segment (no `/`, `#`, `@` or whitespace inside a
/// segment) and `(?:[@#][^\r\x{2028}\x{2029}]*)?` drops everything from the
/// first `@` or `#` that follows the identifier. Line terminators are excluded
/// from the dropped tail, so a line with an embedded carriage return does not
/// match.
static REFERENCE: LazyLock<Regex,> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^\s*(?:github:|gitlab:)?(@?[^/\s#@]+(?:/[^/\s#@]+)?)",
        r"(?:[@#][^\r\x{2028}\x{2029}]*)?\s*$",
    ),)
        .unwrap_or_else(|error| panic!("reference grammar must compile: {error}"),)
});

/// Extracts the bare module identifier from one reference line.
///
/// Returns `None` when the line does not follow the reference grammar.
///
/// # Examples
///
/// ```
/// use semrel_action::parse_reference;
///
/// assert_eq!(parse_reference("github:@scope/name@latest"), Some("@scope/name"));
/// assert_eq!(parse_reference("owner/name#main"), Some("owner/name"));
/// assert_eq!(parse_reference("not a reference"), None);
/// ```
pub fn parse_reference(line: &str,) -> Option<&str,>
{
    REFERENCE
        .captures(line.trim(),)
        .and_then(|captures| captures.get(1,),)
        .map(|identifier| identifier.as_str(),)
}

/// Extracts identifiers from newline separated references, preserving order
/// and dropping lines that do not match.
pub fn parse_references(raw: &str,) -> Vec<String,>
{
    raw.lines().filter_map(parse_reference,).map(str::to_owned,).collect()
}
