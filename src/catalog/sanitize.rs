// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Channel name composition and identifier sanitization.
//!
//! Catalog identifiers are built from the (group, recorder, channel) triple.
//! Recording files use free-form names with spaces, punctuation, and Greek
//! symbols; catalog identifiers must match `[A-Za-z_][A-Za-z0-9_]*`. The
//! sanitized identifier is lossy, which is why the catalog also retains the
//! original triple as metadata.

use std::sync::OnceLock;

use regex::Regex;

/// Substitution table for symbols that commonly appear in channel names.
const SUBSTITUTIONS: &[(char, &str)] = &[
    ('Σ', "sum"),
    ('σ', "sigma"),
    ('Φ', "phi"),
    ('φ', "phi"),
    ('λ', "lambda"),
    ('Ω', "ohm"),
    ('Δ', "delta"),
    ('µ', "u"),
    ('μ', "u"),
    ('°', "deg"),
];

fn identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex"))
}

/// Compose the display name for a (group, recorder, channel) triple.
///
/// Joins the three parts, applies the symbol substitution table, and removes
/// spaces and periods. The result is a display name, not yet a legal
/// identifier; pass it through [`sanitize_identifier`].
pub fn compose_display_name(group: &str, recorder: &str, name: &str) -> String {
    let raw = format!("{group}.{recorder}.{name}");
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch == ' ' || ch == '.' {
            continue;
        }
        match SUBSTITUTIONS.iter().find(|(sym, _)| *sym == ch) {
            Some((_, replacement)) => out.push_str(replacement),
            None => out.push(ch),
        }
    }
    out
}

/// Sanitize a display name into a catalog-legal identifier.
///
/// Strips characters outside `[A-Za-z0-9_]`, then strips leading characters
/// until the name starts with a letter or underscore. Returns `None` when
/// the result still fails identifier validation (in practice: when nothing
/// legal remains), in which case the channel is skipped.
pub fn sanitize_identifier(display_name: &str) -> Option<String> {
    let stripped: String = display_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    let legal = stripped.trim_start_matches(|c: char| c.is_ascii_digit());
    if identifier_re().is_match(legal) {
        Some(legal.to_string())
    } else {
        None
    }
}
