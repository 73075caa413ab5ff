//! Slash-normalized path strings
//!
//! Everything the ignore engine stores or queries is a `/`-separated string,
//! whatever the platform separator is.

use std::path::Path;

/// Replace backslashes with forward slashes
pub fn to_slash(path: &str) -> String {
    path.replace('\\', "/")
}

/// Render a filesystem path as a slash-separated string
pub fn path_to_slash(path: &Path) -> String {
    to_slash(&path.to_string_lossy())
}

/// Join a slash-separated directory and a child name
pub fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else if dir.ends_with('/') {
        format!("{dir}{name}")
    } else {
        format!("{dir}/{name}")
    }
}

/// Lexically clean a slash path into its components, resolving `.` and `..`.
fn clean(path: &str) -> (bool, Vec<&str>) {
    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for part in path.split('/') {
        match part {
            "" | "." => {},
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                },
                // `/..` is `/`
                _ if rooted => {},
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    (rooted, parts)
}

/// Express `path` relative to `base`, lexically.
///
/// Returns `None` when one side is rooted and the other is not, or when
/// `base` itself climbs above the common prefix. The same path yields `"."`.
pub fn relative_to(base: &str, path: &str) -> Option<String> {
    let (base_rooted, base_parts) = clean(base);
    let (path_rooted, path_parts) = clean(path);

    if base_rooted != path_rooted {
        return None;
    }

    let common = base_parts
        .iter()
        .zip(&path_parts)
        .take_while(|(a, b)| a == b)
        .count();

    if base_parts[common..].iter().any(|part| *part == "..") {
        return None;
    }

    let mut rel: Vec<&str> = vec![".."; base_parts.len() - common];
    rel.extend_from_slice(&path_parts[common..]);

    if rel.is_empty() {
        Some(".".to_string())
    } else {
        Some(rel.join("/"))
    }
}

/// Whether a relative path climbs out of its base.
///
/// Any path starting with `..` counts, so a top-level name such as
/// `..hidden` is treated as outside the base too.
pub fn escapes_base(rel_path: &str) -> bool {
    rel_path.starts_with("..")
}

/// Directory prefix of a slash path, `""` for top-level entries
pub fn parent_dir(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[..idx],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/project", "/project/test.txt", Some("test.txt"))]
    #[case("/project", "/project/a/b/c.txt", Some("a/b/c.txt"))]
    #[case("/project", "/project", Some("."))]
    #[case("/project/", "/project//docs/./x.md", Some("docs/x.md"))]
    #[case("/project", "/other/test.txt", Some("../other/test.txt"))]
    #[case("/project", "/project/../outside.txt", Some("../outside.txt"))]
    #[case("", "test.txt", Some("test.txt"))]
    #[case(".", "a/b", Some("a/b"))]
    #[case("/project", "relative.txt", None)]
    #[case("", "/abs.txt", None)]
    #[case("..", "a", None)]
    fn test_relative_to(#[case] base: &str, #[case] path: &str, #[case] expected: Option<&str>) {
        assert_eq!(relative_to(base, path).as_deref(), expected);
    }

    #[test]
    fn test_escapes_base() {
        assert!(escapes_base("../outside.txt"));
        assert!(escapes_base(".."));
        assert!(escapes_base("..hidden/file"));
        assert!(escapes_base("..cfg"));
        assert!(!escapes_base("a/../b"));
        assert!(!escapes_base("a/..hidden"));
    }

    #[test]
    fn test_join_and_parent() {
        assert_eq!(join("", "a"), "a");
        assert_eq!(join("a", "b"), "a/b");
        assert_eq!(join("/root/", "b"), "/root/b");
        assert_eq!(parent_dir("a/b/c.txt"), "a/b");
        assert_eq!(parent_dir("c.txt"), "");
        assert_eq!(parent_dir("a/b/"), "a");
    }

    #[test]
    fn test_to_slash() {
        assert_eq!(to_slash("docs\\sub\\README.md"), "docs/sub/README.md");
    }
}
