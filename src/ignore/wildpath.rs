//! Glob matching for slash-separated paths
//!
//! Supported syntax:
//!   - `*` matches any run of characters inside one path component
//!   - `?` matches exactly one character
//!   - `**` as a whole component matches zero or more components
//!   - `[abc]`, `[a-z]` match one character; `[!abc]` / `[^abc]` negate
//!   - `{js,ts}` expands into one pattern per alternative
//!   - a leading `/` anchors the pattern; anchored patterns only match
//!     anchored paths and the other way around
//!
//! Matching never fails: malformed brackets or braces are taken literally
//! and simply make the pattern less likely to match.

/// Check whether `path` matches `pattern`
pub fn matches(pattern: &str, path: &str) -> bool {
    if pattern.contains('{') {
        return expand_braces(pattern)
            .iter()
            .any(|expanded| match_expanded(expanded, path));
    }
    match_expanded(pattern, path)
}

/// Expand the first `{a,b}` group of a pattern, recursing into the suffix.
///
/// An unterminated group, an empty group or a group without a comma leaves
/// the whole pattern untouched.
pub fn expand_braces(pattern: &str) -> Vec<String> {
    let Some(start) = pattern.find('{') else {
        return vec![pattern.to_string()];
    };
    let Some(len) = pattern[start..].find('}') else {
        return vec![pattern.to_string()];
    };
    let end = start + len;

    let content = &pattern[start + 1..end];
    if content.is_empty() || !content.contains(',') {
        return vec![pattern.to_string()];
    }

    let prefix = &pattern[..start];
    let suffixes = expand_braces(&pattern[end + 1..]);

    let mut expanded = Vec::new();
    for alternative in content.split(',') {
        for suffix in &suffixes {
            expanded.push(format!("{prefix}{alternative}{suffix}"));
        }
    }
    expanded
}

fn match_expanded(pattern: &str, path: &str) -> bool {
    let (pattern_parts, pattern_rooted) = split_components(pattern);
    let (path_parts, path_rooted) = split_components(path);

    if pattern_rooted != path_rooted {
        return false;
    }

    match_components(&pattern_parts, &path_parts)
}

/// Split on `/`, dropping empty components, and report whether the string
/// started at the root.
fn split_components(s: &str) -> (Vec<&str>, bool) {
    let parts = s.split('/').filter(|part| !part.is_empty()).collect();
    (parts, s.starts_with('/'))
}

fn match_components(pattern: &[&str], path: &[&str]) -> bool {
    let Some((&head, rest)) = pattern.split_first() else {
        return path.is_empty();
    };

    if path.is_empty() {
        return pattern.iter().all(|part| *part == "**");
    }

    if head == "**" {
        if rest.is_empty() {
            return true;
        }
        return (0..=path.len()).any(|skip| match_components(rest, &path[skip..]));
    }

    match_component(head, path[0]) && match_components(rest, &path[1..])
}

/// Match a single path component against a single pattern component.
fn match_component(pattern: &str, name: &str) -> bool {
    if pattern == "*" || pattern == name {
        return true;
    }

    let p: Vec<char> = pattern.chars().collect();
    let s: Vec<char> = name.chars().collect();

    let mut i = 0;
    let mut j = 0;
    // pattern index of the last `*` and the name position it currently covers up to
    let mut star: Option<usize> = None;
    let mut star_end = 0;

    while j < s.len() {
        if i < p.len() && p[i] == '*' {
            star = Some(i);
            star_end = j;
            i += 1;
            continue;
        }

        if i < p.len() && (p[i] == '?' || p[i] == s[j]) {
            i += 1;
            j += 1;
            continue;
        }

        if i < p.len() && p[i] == '[' {
            let Some(close) = closing_bracket(&p[i..]) else {
                return false;
            };
            if bracket_matches(&p[i + 1..i + close], s[j]) {
                i += close + 1;
                j += 1;
                continue;
            }
        }

        match star {
            Some(star_at) => {
                i = star_at + 1;
                star_end += 1;
                j = star_end;
            },
            None => return false,
        }
    }

    while i < p.len() && p[i] == '*' {
        i += 1;
    }

    i == p.len()
}

/// Offset of the `]` closing the bracket expression that starts at `p[0]`.
fn closing_bracket(p: &[char]) -> Option<usize> {
    p.iter().skip(1).position(|&c| c == ']').map(|pos| pos + 1)
}

fn bracket_matches(class: &[char], c: char) -> bool {
    if class.is_empty() {
        return false;
    }

    let (negated, members) = match class[0] {
        '!' | '^' => (true, &class[1..]),
        _ => (false, class),
    };

    let mut found = false;
    let mut k = 0;
    while k < members.len() {
        if k + 2 < members.len() && members[k + 1] == '-' {
            if members[k] <= c && c <= members[k + 2] {
                found = true;
                break;
            }
            k += 3;
        } else {
            if members[k] == c {
                found = true;
                break;
            }
            k += 1;
        }
    }

    found != negated
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    // literals
    #[case("file.txt", "file.txt", true)]
    #[case("file.txt", "file.exe", false)]
    #[case("file.txt", "dir/file.txt", false)]
    // star
    #[case("*.txt", "file.txt", true)]
    #[case("file.*", "file.txt", true)]
    #[case("file*.txt", "file123.txt", true)]
    #[case("fi*le*.txt", "file123.txt", true)]
    #[case("*.txt", "file.exe", false)]
    #[case("*.txt", "dir/file.txt", false)]
    // question mark
    #[case("file.???", "file.txt", true)]
    #[case("?*?.*", "abc.txt", true)]
    #[case("???.txt", "abcd.txt", false)]
    // bracket expressions
    #[case("[a-z].txt", "a.txt", true)]
    #[case("[0-9].txt", "5.txt", true)]
    #[case("[a-zA-Z0-9]*.txt", "Test123.txt", true)]
    #[case("[a-z].txt", "5.txt", false)]
    #[case("[!0-9]*.txt", "abc.txt", true)]
    #[case("[^a-z]*.txt", "abc.txt", false)]
    #[case("[a-z][0-9][0-9].txt", "a12.txt", true)]
    #[case("[a-z-]*.txt", "a-bc.txt", true)]
    #[case("[abc]*.txt", "def.txt", false)]
    // separators
    #[case("dir/file.txt", "dir/subdir/file.txt", false)]
    #[case("dir/*.txt", "dir/file.txt", true)]
    #[case("dir/*.txt", "dir/subdir/file.txt", false)]
    #[case("dir/*/file.txt", "dir\\sub\\file.txt", false)]
    fn test_component_matching(#[case] pattern: &str, #[case] path: &str, #[case] expected: bool) {
        assert_eq!(matches(pattern, path), expected, "{pattern} vs {path}");
    }

    #[rstest]
    #[case("**/file.txt", "file.txt", true)]
    #[case("**/file.txt", "deep/path/file.txt", true)]
    #[case("**/test/*.txt", "deep/path/test/file.txt", true)]
    #[case("dir/**/*.txt", "dir/deep/path/file.txt", true)]
    #[case("dir/**/test/*.txt", "dir/deep/path/test/file.txt", true)]
    #[case("dir/**", "dir", true)]
    #[case("dir/**", "dir/", true)]
    #[case("dir/**", "dir/sub/file.txt", true)]
    #[case("dir/**/*.txt", "dir/file.txt", true)]
    #[case("dir/**/*.txt", "other/file.txt", false)]
    #[case("dir/**/**", "dir", true)]
    #[case("dir/**/**/*.txt", "dir/a/b/file.txt", true)]
    #[case("dir/**/end", "dir/end", true)]
    #[case("**/node_modules/**", "a/b/node_modules/c.js", true)]
    #[case("**/[a-z][a-z][0-9][0-9]/**/*.txt", "path/ab12/deep/file.txt", true)]
    #[case("**/[a-z][a-z][0-9][0-9]/**/*.txt", "path/12ab/deep/file.txt", false)]
    #[case("**/*[!.]*/*.txt", "dir/test_file/doc.txt", true)]
    #[case("**.txt", "file.txt", true)]
    #[case("dir/**", "dir2", false)]
    #[case("dir/**", "..", false)]
    #[case("dir/**", "directory", false)]
    fn test_globstar(#[case] pattern: &str, #[case] path: &str, #[case] expected: bool) {
        assert_eq!(matches(pattern, path), expected, "{pattern} vs {path}");
    }

    #[rstest]
    #[case("dir///**", "dir", true)]
    #[case("dir/", "dir", true)]
    #[case("dir////**///*.txt", "dir/a/b/file.txt", true)]
    #[case("///dir/file.txt", "/dir/file.txt", true)]
    #[case("/dir/file.txt", "/dir/file.txt", true)]
    #[case("/dir/file.txt", "dir/file.txt", false)]
    #[case("dir/file.txt", "/dir/file.txt", false)]
    #[case("/dir/**/*.txt", "/dir/sub/file.txt", true)]
    #[case("/dir/**/*.txt", "dir/sub/file.txt", false)]
    #[case("/*.txt", "file.txt", false)]
    #[case("/[a-z]*.txt", "/test.txt", true)]
    #[case("/", "/", true)]
    #[case("/", "", false)]
    #[case("", "/", false)]
    #[case("/**", "/dir/file.txt", true)]
    #[case("**", "dir/file.txt", true)]
    fn test_slashes_and_anchors(#[case] pattern: &str, #[case] path: &str, #[case] expected: bool) {
        assert_eq!(matches(pattern, path), expected, "{pattern} vs {path}");
    }

    #[rstest]
    #[case("", "", true)]
    #[case("", "file.txt", false)]
    #[case("* *.txt", "a b.txt", true)]
    #[case("[a-z.txt", "[a-z.txt", true)]
    #[case("[a-z.txt", "a.txt", false)]
    #[case("*[a-z", "x[a-z", false)]
    #[case("\\[a-z].txt", "[a-z].txt", false)]
    #[case("*.TXT", "file.txt", false)]
    fn test_malformed_and_edge_patterns(
        #[case] pattern: &str,
        #[case] path: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(matches(pattern, path), expected, "{pattern} vs {path}");
    }

    #[rstest]
    #[case("*.{js,ts}", &["*.js", "*.ts"])]
    #[case("*.{js,ts,jsx}", &["*.js", "*.ts", "*.jsx"])]
    #[case("{src,lib}/*.js", &["src/*.js", "lib/*.js"])]
    #[case("{a,b}.{x,y}", &["a.x", "a.y", "b.x", "b.y"])]
    #[case("file.{}", &["file.{}"])]
    #[case("file.{js}", &["file.{js}"])]
    #[case("file.{js,ts", &["file.{js,ts"])]
    #[case("{", &["{"])]
    #[case("}", &["}"])]
    #[case("file.js", &["file.js"])]
    #[case("file.{,ts}", &["file.", "file.ts"])]
    #[case("file.{js,,ts}", &["file.js", "file.", "file.ts"])]
    #[case("file.{js,ts,}", &["file.js", "file.ts", "file."])]
    fn test_expand_braces(#[case] pattern: &str, #[case] expected: &[&str]) {
        assert_eq!(expand_braces(pattern), expected);
    }

    #[rstest]
    #[case("*.{js,ts}", "module.js", true)]
    #[case("*.{js,ts}", "file.ts", true)]
    #[case("*.{js,ts}", "file.go", false)]
    #[case("file.{}", "file.{}", true)]
    #[case("file.{}", "file.", false)]
    #[case("file.{js}", "file.{js}", true)]
    #[case("file.{js}", "file.js", false)]
    #[case("file.{js", "file.{js", true)]
    #[case("file.{js", "file.js", false)]
    #[case("{src,lib}/*.js", "src/test.js", true)]
    #[case("**/*.{js,ts}", "dir/test.ts", true)]
    #[case("file.{,js}", "file.", true)]
    #[case("file.{,js}", "file.js", true)]
    fn test_matching_with_braces(#[case] pattern: &str, #[case] path: &str, #[case] expected: bool) {
        assert_eq!(matches(pattern, path), expected, "{pattern} vs {path}");
    }

    proptest! {
        #[test]
        fn prop_never_panics(pattern in "[a-z*?/\\[\\]{},!^.-]{0,16}", path in "[a-z/.\\[\\]{}-]{0,16}") {
            let _ = matches(&pattern, &path);
        }

        #[test]
        fn prop_empty_pattern_matches_only_empty_path(path in ".{0,12}") {
            prop_assert_eq!(matches("", &path), path.is_empty());
        }

        #[test]
        fn prop_plain_name_matches_itself(name in "[a-zA-Z0-9_.-]{1,12}") {
            prop_assert!(matches(&name, &name));
            let (pattern, path) = (format!("**/{name}"), format!("a/b/{name}"));
            prop_assert!(matches(&pattern, &path));
        }
    }
}
