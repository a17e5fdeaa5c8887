//! Small utilities handed to view bodies: HTML escaping and nested lookup.

use serde_json::Value;

/// Entity-encode `&`, `<`, `>`, `"` and `'`.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Look up `path` (dot separated) in nested objects, falling back to
/// `default` as soon as a segment is missing.
///
/// Array elements can be addressed by index (`items.0.name`).
pub fn get<'a>(data: &'a Value, path: &str, default: &'a Value) -> &'a Value {
    lookup(data, path).unwrap_or(default)
}

/// Like [`get`] but yields `None` instead of a default.
pub fn lookup<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(data);
    }
    path.split('.').try_fold(data, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Render a value as view text: strings verbatim, `null` as nothing,
/// everything else in its JSON form.
pub fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape("<h1>Foo</h1>"), "&lt;h1&gt;Foo&lt;/h1&gt;");
        assert_eq!(
            escape("<script>Bar</script>"),
            "&lt;script&gt;Bar&lt;/script&gt;"
        );
        assert_eq!(escape(r#"a & "b" 'c'"#), "a &amp; &quot;b&quot; &#039;c&#039;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_escape_leaves_slashes_and_urls_alone() {
        assert_eq!(escape("</p>"), "&lt;/p&gt;");
        assert_eq!(escape("/static/app.js?v=1"), "/static/app.js?v=1");
    }

    #[test]
    fn test_get_nested() {
        let data = json!({"user": {"name": "John Doe", "city": {"name": "Jakarta"}}});
        let unknown = json!("Unknown");
        assert_eq!(get(&data, "user.name", &unknown), "John Doe");
        assert_eq!(get(&data, "user.city.name", &unknown), "Jakarta");
        assert_eq!(get(&data, "user.province.name", &unknown), "Unknown");
    }

    #[test]
    fn test_get_missing_intermediate() {
        let data = json!({"user": {"name": "John Doe"}});
        let unknown = json!("Unknown");
        assert_eq!(get(&data, "user.city.name", &unknown), "Unknown");
    }

    #[test]
    fn test_get_through_scalar_falls_back() {
        let data = json!({"user": "John"});
        let fallback = Value::Null;
        assert_eq!(get(&data, "user.name", &fallback), &Value::Null);
    }

    #[test]
    fn test_lookup_array_index() {
        let data = json!({"items": [{"name": "a"}, {"name": "b"}]});
        assert_eq!(lookup(&data, "items.1.name"), Some(&json!("b")));
        assert_eq!(lookup(&data, "items.9.name"), None);
        assert_eq!(lookup(&data, "items.x"), None);
    }

    #[test]
    fn test_lookup_empty_path_is_root() {
        let data = json!({"a": 1});
        assert_eq!(lookup(&data, ""), Some(&data));
    }

    #[test]
    fn test_display() {
        assert_eq!(display(&json!("text")), "text");
        assert_eq!(display(&Value::Null), "");
        assert_eq!(display(&json!(42)), "42");
        assert_eq!(display(&json!(true)), "true");
    }
}
