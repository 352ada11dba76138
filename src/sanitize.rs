//! Identifier canonicalization for names coming out of robot documents.
//!
//! Link, joint, and material names become keys in the parsed model and
//! prim-path segments downstream, so they must be plain identifiers:
//! ASCII letters, digits, and underscores, starting with a letter.
//! The mapping is deterministic; the same raw name always canonicalizes
//! to the same identifier.

use tracing::warn;

/// Map every character outside `[A-Za-z0-9_]` to an underscore.
///
/// The first character additionally may not be a digit. An empty input
/// maps to a single underscore so the prefix pass below can fix it up.
fn map_chars(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, c) in name.chars().enumerate() {
        let valid = if i == 0 {
            c.is_ascii_alphabetic() || c == '_'
        } else {
            c.is_ascii_alphanumeric() || c == '_'
        };
        out.push(if valid { c } else { '_' });
    }
    if out.is_empty() {
        out.push('_');
    }
    out
}

/// Canonicalize a raw document name into a valid identifier.
///
/// Characters outside `[A-Za-z0-9_]` become underscores. If the mapped
/// name starts with an underscore (including names that started with a
/// digit or were empty), the stable prefix `a_` is applied to the raw
/// name and the mapping is run again, which preserves leading digits
/// instead of losing them to the underscore substitution.
///
/// Canonical names pass through unchanged, so the function is
/// idempotent.
#[must_use]
pub fn sanitize_identifier(name: &str) -> String {
    let mut valid = map_chars(name);
    if valid.starts_with('_') {
        valid = map_chars(&format!("a_{name}"));
    }
    if valid != name {
        warn!(raw = name, sanitized = %valid, "name is not a valid identifier, renaming");
    }
    valid
}
