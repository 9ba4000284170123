//! Raw export name normalization.
//!
//! Design-file exports name styles like `.Frame-Header-2`: a CSS-ish leading
//! dot, mixed case, and a numeric suffix the export tool appends to
//! disambiguate duplicates. Normalization maps all of these onto one clean
//! token key, so the mapping is many-to-one.

/// Normalize a raw export name into a token key.
///
/// Strips leading `.` characters, strips trailing `-<digits>` suffixes and
/// lower-cases the rest. Suffixes are stripped until none remain, which keeps
/// the function idempotent.
pub fn normalize_name(raw: &str) -> String {
    let mut name = raw.trim_start_matches('.');
    while let Some(stripped) = strip_numeric_suffix(name) {
        name = stripped;
    }
    name.to_lowercase()
}

fn strip_numeric_suffix(name: &str) -> Option<&str> {
    let (head, tail) = name.rsplit_once('-')?;
    if !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit()) {
        Some(head)
    } else {
        None
    }
}
