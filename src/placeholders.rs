//! Placeholder token parsing, substitution, and combination expansion.
//!
//! An options source may embed placeholder tokens referencing earlier page
//! preferences: `<FINISH>_<COLOR>_paint_options`. This module owns the three
//! pure operations the manifest builder composes:
//!
//! - [`find_tokens`]: extract the token names from a template
//! - [`substitute`]: replace tokens with concrete values
//! - [`cross_product`]: enumerate every combination of candidate values
//!
//! All three are stateless and know nothing about preferences or option
//! sets — they operate on strings only, which keeps them trivially testable.
//!
//! ## Token Syntax
//!
//! A token is `<IDENTIFIER>` where the identifier consists of uppercase
//! ASCII letters, digits, and underscores (the upper-cased form of a
//! preference id). Angle brackets that do not wrap a valid identifier are
//! left alone — `a < b` contains no tokens.

use std::collections::BTreeMap;

/// Extract placeholder token names from a template string.
///
/// Returns tokens in first-occurrence order with duplicates removed:
///
/// - `"<FINISH>_<COLOR>_paint"` → `["FINISH", "COLOR"]`
/// - `"<A>_<B>_<A>"` → `["A", "B"]`
/// - `"color_options"` → `[]`
pub fn find_tokens(template: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let bytes = template.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'<' {
            i += 1;
            continue;
        }
        // Scan the identifier between '<' and '>'
        let start = i + 1;
        let mut end = start;
        while end < bytes.len() && is_token_char(bytes[end]) {
            end += 1;
        }
        if end > start && end < bytes.len() && bytes[end] == b'>' {
            let token = &template[start..end];
            if !tokens.iter().any(|t| t == token) {
                tokens.push(token.to_string());
            }
            i = end + 1;
        } else {
            i += 1;
        }
    }

    tokens
}

fn is_token_char(b: u8) -> bool {
    b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_'
}

/// Replace every `<TOKEN>` occurrence in `template` with its mapped value.
///
/// Tokens absent from `values_by_token` are left in place. Callers always
/// derive the value map from [`find_tokens`] on the same template, so an
/// unreplaced token indicates a caller bug upstream, not a user error —
/// the resulting string will simply fail the options-set lookup.
pub fn substitute(template: &str, values_by_token: &BTreeMap<String, String>) -> String {
    let mut resolved = template.to_string();
    for (token, value) in values_by_token {
        resolved = resolved.replace(&format!("<{token}>"), value);
    }
    resolved
}

/// Enumerate the Cartesian product of candidate values per token.
///
/// Input is an ordered list of `(token, candidate values)` pairs; output is
/// one value map per combination. The first token varies slowest, matching
/// the nested-loop order an author expects when reading `<A>_<B>`:
///
/// ```text
/// [("A", [a1, a2]), ("B", [b1, b2])]
///   → {A:a1,B:b1}, {A:a1,B:b2}, {A:a2,B:b1}, {A:a2,B:b2}
/// ```
///
/// An empty input yields a single empty combination (the no-placeholder
/// case resolves exactly once). Any token with zero candidates yields no
/// combinations at all.
pub fn cross_product(lists_by_token: &[(String, Vec<String>)]) -> Vec<BTreeMap<String, String>> {
    let mut combinations: Vec<BTreeMap<String, String>> = vec![BTreeMap::new()];

    for (token, values) in lists_by_token {
        let mut expanded = Vec::with_capacity(combinations.len() * values.len());
        for combination in &combinations {
            for value in values {
                let mut next = combination.clone();
                next.insert(token.clone(), value.clone());
                expanded.push(next);
            }
        }
        combinations = expanded;
    }

    combinations
}
