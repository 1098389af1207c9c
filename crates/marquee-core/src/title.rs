//! Filesystem-safe titles for note filenames.
//!
//! The result is only ever used to build filenames; it is never persisted.

/// Characters removed from display titles.
pub const FORBIDDEN: [char; 8] = [':', '/', '\\', '#', '^', '[', ']', '|'];

/// Drop every [`FORBIDDEN`] character and trim surrounding whitespace.
///
/// Trimming happens after removal so whitespace exposed by a removed edge
/// character is trimmed too, which keeps the function idempotent.
///
/// Distinct titles may normalise to the same string; filenames that need to be
/// unique append the IMDb id.
pub fn normalize_title(title: &str) -> String {
  let kept: String =
    title.chars().filter(|c| !FORBIDDEN.contains(c)).collect();
  kept.trim().to_string()
}
