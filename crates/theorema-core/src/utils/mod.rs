pub mod time;

/// Normalize a theory reference to its identifier.
///
/// Strips leading/trailing slashes, a `theories/` prefix and a `.json`
/// extension.
///
/// # Examples
///
/// ```
/// use theorema_core::normalize_theory_path;
///
/// assert_eq!(normalize_theory_path("theories/group_theory"), "group_theory");
/// assert_eq!(normalize_theory_path("/theories/group_theory/"), "group_theory");
/// assert_eq!(normalize_theory_path("ring_theory.json"), "ring_theory");
/// ```
pub fn normalize_theory_path(path: &str) -> String {
    let mut s = path.trim().replace('\\', "/");
    s = s.trim_matches('/').to_string();
    if let Some(rest) = s.strip_prefix("theories/") {
        s = rest.to_string();
    }
    s.trim_end_matches(".json").trim_matches('/').to_string()
}

/// Turn an identifier into a display name.
///
/// # Examples
///
/// ```
/// use theorema_core::title_case;
///
/// assert_eq!(title_case("group_theory"), "Group Theory");
/// assert_eq!(title_case("category-theory"), "Category Theory");
/// ```
pub fn title_case(id: &str) -> String {
    id.split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Identifier form of a display name: lowercase words joined by `_`.
///
/// # Examples
///
/// ```
/// use theorema_core::slugify_identifier;
///
/// assert_eq!(slugify_identifier("Group Theory"), "group_theory");
/// assert_eq!(slugify_identifier("  Linear  Algebra! "), "linear_algebra");
/// ```
pub fn slugify_identifier(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect::<Vec<&str>>()
        .join("_")
}

/// Slugify a heading text to create a URL-safe anchor ID.
///
/// Rules:
/// - Convert to lowercase
/// - Preserve Unicode letters and digits
/// - Replace whitespace with hyphens
/// - Remove ASCII special characters (parentheses, exclamation marks, etc.)
/// - Trim leading/trailing hyphens
pub fn slugify_heading(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_alphabetic() || c.is_numeric() || c == '-' || c == '_' {
                Some(c)
            } else if c.is_whitespace() {
                Some('-')
            } else {
                None
            }
        })
        .collect::<String>()
        .trim_matches('-')
        .to_string()
}

/// Match a `/`-separated path against a glob pattern.
///
/// `*` matches within one segment, `**` matches any number of segments and
/// `?` matches one character.
pub fn glob_match(pattern: &str, path: &str) -> bool {
    let pattern: Vec<&str> = pattern.trim_matches('/').split('/').collect();
    let path: Vec<&str> = path.trim_matches('/').split('/').collect();
    match_segments(&pattern, &path)
}

fn match_segments(pattern: &[&str], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((&"**", rest)) => (0..=path.len()).any(|skip| match_segments(rest, &path[skip..])),
        Some((segment, rest)) => match path.split_first() {
            Some((name, path_rest)) => {
                match_segment(segment.as_bytes(), name.as_bytes()) && match_segments(rest, path_rest)
            }
            None => false,
        },
    }
}

fn match_segment(pattern: &[u8], name: &[u8]) -> bool {
    match pattern.split_first() {
        None => name.is_empty(),
        Some((b'*', rest)) => (0..=name.len()).any(|skip| match_segment(rest, &name[skip..])),
        Some((b'?', rest)) => !name.is_empty() && match_segment(rest, &name[1..]),
        Some((c, rest)) => name.first() == Some(c) && match_segment(rest, &name[1..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_heading() {
        assert_eq!(slugify_heading("My Header"), "my-header");
        assert_eq!(slugify_heading("Hello (World)!"), "hello-world");
        assert_eq!(slugify_heading("A  B  C"), "a--b--c");
        assert_eq!(slugify_heading("-Hello-"), "hello");
        assert_eq!(slugify_heading("!!!"), "");
        assert_eq!(slugify_heading("  Hello  "), "hello");
    }

    #[test]
    fn test_normalize_theory_path_plain_id() {
        assert_eq!(normalize_theory_path("group_theory"), "group_theory");
        assert_eq!(normalize_theory_path(""), "");
    }

    #[test]
    fn test_title_case_collapses_separators() {
        assert_eq!(title_case("a__b"), "A B");
        assert_eq!(title_case("nonexistent"), "Nonexistent");
    }

    #[test]
    fn test_glob_match() {
        assert!(glob_match("**/*.json", "/subjects/math/theories/x/definitions.json"));
        assert!(glob_match("*.json", "manifest.json"));
        assert!(!glob_match("*.json", "theories/manifest.json"));
        assert!(glob_match("theories/*/theorem?.json", "theories/groups/theorems.json"));
        assert!(glob_match("**/node_modules/**", "a/node_modules/b/c.json"));
        assert!(!glob_match("theories/**/*.md", "theories/a/b.json"));
    }
}
