//! Path validation
//!
//! Turns client-supplied relative paths and names into locations that are
//! guaranteed to sit inside the storage root. Everything here is lexical;
//! the filesystem is never touched.

use std::path::{Path, PathBuf};

use crate::error::PathError;

const PARENT_SEGMENT: &str = "..";

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Normalize a client path into its root-relative, forward-slash form.
///
/// Empty input and inputs made only of separators and `.` segments resolve to
/// the root, returned as an empty string. Any `..` segment is rejected
/// outright instead of being resolved, so `a/../b` fails just like `../b`.
pub fn clean_relative(raw: &str) -> Result<String, PathError> {
    if raw.contains('\0') {
        return Err(PathError::NulByte);
    }

    let mut segments = Vec::new();
    for segment in raw.split(is_separator) {
        match segment {
            "" | "." => continue,
            PARENT_SEGMENT => return Err(PathError::Traversal(raw.to_string())),
            _ => segments.push(segment),
        }
    }

    Ok(segments.join("/"))
}

/// Resolve a client path to an absolute location under `root`.
pub fn resolve(root: &Path, raw: &str) -> Result<PathBuf, PathError> {
    let relative = clean_relative(raw)?;
    if relative.is_empty() {
        return Ok(root.to_path_buf());
    }

    let resolved = root.join(&relative);
    if !resolved.starts_with(root) {
        return Err(PathError::OutsideRoot(raw.to_string()));
    }

    Ok(resolved)
}

/// Validate a name that must be exactly one path segment.
///
/// Separators are rejected. Literal `..` substrings are stripped afterwards
/// as a second line of defense at the point the name becomes a filename.
pub fn validate_segment(field: &'static str, raw: &str) -> Result<String, PathError> {
    if raw.is_empty() {
        return Err(PathError::Missing(field));
    }
    if raw.contains('\0') {
        return Err(PathError::NulByte);
    }
    if raw.contains(char::is_control) {
        return Err(PathError::InvalidName(field));
    }
    if raw.contains(is_separator) {
        return Err(PathError::NotASegment {
            field,
            value: raw.to_string(),
        });
    }

    let stripped = raw.replace(PARENT_SEGMENT, "");
    if stripped.is_empty() || stripped == "." {
        return Err(PathError::InvalidName(field));
    }

    Ok(stripped)
}

/// Join a cleaned parent path and an entry name into a client-facing path.
pub fn join_relative(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// Last path segment of a client path, used as the suggested download name.
pub fn base_name(raw: &str) -> &str {
    raw.rsplit(is_separator)
        .find(|segment| !segment.is_empty())
        .unwrap_or(raw)
}

/// Suggested save name for a download; control characters cannot appear in
/// a header value and are replaced.
pub fn download_name(raw: &str) -> String {
    base_name(raw)
        .chars()
        .map(|c| if c.is_control() { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> PathBuf {
        PathBuf::from("/srv/store")
    }

    #[test]
    fn empty_path_is_the_root() {
        assert_eq!(resolve(&root(), "").unwrap(), root());
        assert_eq!(resolve(&root(), "/").unwrap(), root());
        assert_eq!(resolve(&root(), "./.").unwrap(), root());
    }

    #[test]
    fn collapses_dot_and_empty_segments() {
        assert_eq!(clean_relative("a//b/./c/").unwrap(), "a/b/c");
        assert_eq!(clean_relative("a\\b").unwrap(), "a/b");
    }

    #[test]
    fn leading_separator_does_not_override_root() {
        assert_eq!(
            resolve(&root(), "/etc/passwd").unwrap(),
            PathBuf::from("/srv/store/etc/passwd")
        );
    }

    #[test]
    fn rejects_any_parent_segment() {
        for raw in [
            "..",
            "../etc/passwd",
            "../../etc/passwd",
            "a/../b",
            "a/b/..",
            "/..",
            "..\\windows",
            "a\\..\\..\\b",
        ] {
            assert!(
                matches!(clean_relative(raw), Err(PathError::Traversal(_))),
                "expected {raw:?} to be rejected"
            );
            assert!(resolve(&root(), raw).is_err());
        }
    }

    #[test]
    fn dots_inside_a_name_are_not_traversal() {
        assert_eq!(clean_relative("v1..2/notes.txt").unwrap(), "v1..2/notes.txt");
        assert_eq!(clean_relative("...").unwrap(), "...");
    }

    #[test]
    fn rejects_nul_bytes() {
        assert_eq!(clean_relative("a\0b"), Err(PathError::NulByte));
        assert_eq!(validate_segment("name", "a\0b"), Err(PathError::NulByte));
    }

    #[test]
    fn resolution_is_idempotent() {
        for raw in ["", "a", "a/b", "/a/./b/", "x\\y\\z"] {
            let cleaned = clean_relative(raw).unwrap();
            assert_eq!(clean_relative(&cleaned).unwrap(), cleaned);
            assert_eq!(
                resolve(&root(), &cleaned).unwrap(),
                resolve(&root(), raw).unwrap()
            );
        }
    }

    #[test]
    fn resolved_paths_stay_under_root() {
        for raw in ["a", "a/b/c", "/abs/path", "./x", "deep/../"] {
            if let Ok(path) = resolve(&root(), raw) {
                assert!(path.starts_with(root()));
            }
        }
    }

    #[test]
    fn segment_requires_a_value() {
        assert_eq!(
            validate_segment("folder name", ""),
            Err(PathError::Missing("folder name"))
        );
    }

    #[test]
    fn segment_rejects_separators() {
        for raw in ["a/b", "a\\b", "/a", "nested/"] {
            assert!(matches!(
                validate_segment("folder name", raw),
                Err(PathError::NotASegment { .. })
            ));
        }
    }

    #[test]
    fn segment_strips_parent_markers() {
        assert_eq!(
            validate_segment("filename", "re..port.txt").unwrap(),
            "report.txt"
        );
        assert_eq!(
            validate_segment("filename", ".."),
            Err(PathError::InvalidName("filename"))
        );
        assert_eq!(
            validate_segment("filename", "..."),
            Err(PathError::InvalidName("filename"))
        );
    }

    #[test]
    fn segment_rejects_control_characters() {
        for raw in ["nl\nname.txt", "tab\tname", "cr\r", "bell\u{7}"] {
            assert_eq!(
                validate_segment("filename", raw),
                Err(PathError::InvalidName("filename"))
            );
        }
        assert_eq!(
            validate_segment("filename", "caf\u{e9} \"quoted\".txt").unwrap(),
            "caf\u{e9} \"quoted\".txt"
        );
    }

    #[test]
    fn download_name_replaces_control_characters() {
        assert_eq!(download_name("docs/nl\nname.txt"), "nl_name.txt");
        assert_eq!(download_name("docs/report.txt"), "report.txt");
    }

    #[test]
    fn joins_relative_paths() {
        assert_eq!(join_relative("", "a.txt"), "a.txt");
        assert_eq!(join_relative("docs/2024", "a.txt"), "docs/2024/a.txt");
    }

    #[test]
    fn base_name_drops_directories() {
        assert_eq!(base_name("docs/2024/report.txt"), "report.txt");
        assert_eq!(base_name("report.txt"), "report.txt");
        assert_eq!(base_name("docs/"), "docs");
    }
}
