//! Escaping helpers for the HTML writer.

/// Escape text for element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Keep a caller-supplied CSS value from breaking out of its declaration.
pub fn css_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '<' | '>' | '"' | '\\'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// JSON embedded in a `<script>` element must not close it early.
pub fn script_json(value: &serde_json::Value) -> String {
    value.to_string().replace("</", "<\\/")
}

/// Class-name form of a variant name: `RomanLower` -> `roman-lower`.
pub fn kebab(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.extend(c.to_lowercase());
        } else if c.is_alphanumeric() {
            out.push(c);
        } else {
            out.push('-');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<a href=\"x\">Tom & 'Jerry'</a>"),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_css_value_strips_breakouts() {
        assert_eq!(css_value("red; background: url(x)"), "red background: url(x)");
        assert_eq!(css_value(" 1fr "), "1fr");
    }

    #[test]
    fn test_kebab() {
        assert_eq!(kebab("RomanLower"), "roman-lower");
        assert_eq!(kebab("TypeMappingDisplay"), "type-mapping-display");
        assert_eq!(kebab("Tabs"), "tabs");
    }

    #[test]
    fn test_script_json_escapes_closing_tags() {
        let value = serde_json::json!({ "label": "</script>" });
        assert!(!script_json(&value).contains("</script>"));
    }
}
