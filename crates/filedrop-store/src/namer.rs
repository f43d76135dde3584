//! Storage naming: turns a client-supplied filename into an on-disk name.
//!
//! Stored names have the form `<unix-millis>-<original>`. Uniqueness is only
//! as good as the millisecond clock: two uploads of the same original name in
//! the same millisecond map to the same stored name, and the later one wins.

use chrono::Utc;

use crate::error::{StoreError, StoreResult};

/// Separator between the timestamp token and the original name.
pub const SEPARATOR: char = '-';

/// Produce a stored name for `original` using the current wall-clock time.
pub fn storage_name(original: &str) -> String {
    storage_name_at(Utc::now().timestamp_millis(), original)
}

/// Produce a stored name for `original` at a fixed timestamp.
pub fn storage_name_at(millis: i64, original: &str) -> String {
    format!("{millis}{SEPARATOR}{original}")
}

/// Split a stored name into its timestamp and original name.
///
/// Returns `None` for names that were not produced by [`storage_name`].
pub fn parse_storage_name(name: &str) -> Option<(i64, &str)> {
    let (stamp, original) = name.split_once(SEPARATOR)?;
    if stamp.is_empty() || !stamp.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((stamp.parse().ok()?, original))
}

/// Reduce an untrusted client filename to a safe single path component.
///
/// Anything up to the last `/` or `\` is dropped, control characters are
/// removed and surrounding whitespace is trimmed. Names that end up empty,
/// `.` or `..` are rejected.
pub fn sanitize_original_name(original: &str) -> StoreResult<String> {
    let last = original
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default();
    let cleaned: String = last.chars().filter(|c| !c.is_control()).collect();
    let cleaned = cleaned.trim();

    match cleaned {
        "" | "." | ".." => Err(StoreError::InvalidName(original.to_string())),
        name => Ok(name.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_has_timestamp_prefix() {
        let name = storage_name("a.txt");
        let (stamp, original) = name.split_once('-').unwrap();
        assert!(!stamp.is_empty());
        assert!(stamp.bytes().all(|b| b.is_ascii_digit()));
        assert_eq!(original, "a.txt");
        assert_ne!(name, "a.txt");
    }

    #[test]
    fn fixed_timestamp_format() {
        assert_eq!(storage_name_at(1700000000123, "photo.png"), "1700000000123-photo.png");
    }

    #[test]
    fn original_with_dashes_survives_parse() {
        let name = storage_name_at(42, "my-report-v2.pdf");
        assert_eq!(parse_storage_name(&name), Some((42, "my-report-v2.pdf")));
    }

    #[test]
    fn parse_rejects_foreign_names() {
        assert_eq!(parse_storage_name("notes.txt"), None);
        assert_eq!(parse_storage_name("abc-notes.txt"), None);
        assert_eq!(parse_storage_name("-notes.txt"), None);
    }

    #[test]
    fn sanitize_keeps_plain_names() {
        assert_eq!(sanitize_original_name("a.txt").unwrap(), "a.txt");
        assert_eq!(sanitize_original_name("my file (1).tar.gz").unwrap(), "my file (1).tar.gz");
    }

    #[test]
    fn sanitize_strips_directories() {
        assert_eq!(sanitize_original_name("../../etc/passwd").unwrap(), "passwd");
        assert_eq!(sanitize_original_name("C:\\Users\\me\\doc.txt").unwrap(), "doc.txt");
        assert_eq!(sanitize_original_name("/abs/path.bin").unwrap(), "path.bin");
    }

    #[test]
    fn sanitize_drops_control_chars() {
        assert_eq!(sanitize_original_name("bad\u{0}name\n.txt").unwrap(), "badname.txt");
    }

    #[test]
    fn sanitize_rejects_empty_and_dots() {
        for input in ["", "   ", ".", "..", "dir/..", "dir/", "\u{7}"] {
            assert!(
                matches!(sanitize_original_name(input), Err(StoreError::InvalidName(_))),
                "expected rejection for {input:?}"
            );
        }
    }
}
