// Copyright 2025 the RPAVER Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Builds the display name of a character, which is also the name of its
/// image folder.
///
/// Both parts are trimmed. A missing or blank family name yields the given
/// name alone; otherwise the parts are joined with one space.
///
/// ```
/// use rpaver_gallery::format_character_name;
///
/// assert_eq!(format_character_name(" Alice ", Some(" Liddell ")), "Alice Liddell");
/// assert_eq!(format_character_name("Alice", Some("   ")), "Alice");
/// assert_eq!(format_character_name("Alice", None), "Alice");
/// ```
#[must_use]
pub fn format_character_name(name: &str, family: Option<&str>) -> String {
    let name = name.trim();
    match family.map(str::trim) {
        Some(family) if !family.is_empty() => format!("{name} {family}"),
        _ => name.to_owned(),
    }
}
