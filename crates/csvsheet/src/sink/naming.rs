//! Sheet name derivation.

use std::path::Path;

/// Longest sheet name spreadsheet applications accept.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Name used when nothing usable is left after sanitizing.
pub const FALLBACK_SHEET_NAME: &str = "Sheet";

const INVALID_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Derive a sheet name from a file path: the extension is stripped,
/// characters spreadsheets reject are removed and the result is cut to
/// [`MAX_SHEET_NAME_LEN`] characters.
pub fn sheet_name_from_path(path: impl AsRef<Path>) -> String {
    let stem = path
        .as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    sanitize_sheet_name(&stem)
}

/// Remove invalid characters, trim and truncate a proposed sheet name.
pub fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name.chars().filter(|c| !INVALID_CHARS.contains(c)).collect();
    let truncated = truncate_chars(cleaned.trim(), MAX_SHEET_NAME_LEN);
    let trimmed = truncated.trim();

    if trimmed.is_empty() {
        FALLBACK_SHEET_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Make `base` unique among `existing` (case-insensitive) by appending
/// ` (2)`, ` (3)`, ... and shortening the base so the result still fits.
pub fn unique_sheet_name<'a>(base: &str, existing: impl IntoIterator<Item = &'a str>) -> String {
    let taken: Vec<String> = existing.into_iter().map(str::to_lowercase).collect();
    let is_taken = |candidate: &str| taken.contains(&candidate.to_lowercase());

    if !is_taken(base) {
        return base.to_string();
    }

    let mut n = 2;
    loop {
        let suffix = format!(" ({})", n);
        let room = MAX_SHEET_NAME_LEN.saturating_sub(suffix.chars().count());
        let candidate = format!("{}{}", truncate_chars(base, room).trim_end(), suffix);
        if !is_taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
