//! Tera filters and functions exposed to file-backed views.

use std::collections::HashMap;

use tera::{Result, Value};

use crate::helpers;

/// `{{ html | escape }}` - entity-encode a string value.
pub(crate) fn escape(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    let s = match value {
        Value::String(s) => s.clone(),
        other => helpers::display(other),
    };
    Ok(Value::String(helpers::escape(&s)))
}

/// `{{ get(path="user.city.name", default="Unknown") }}` over the view's data.
pub(crate) fn getter(data: Value) -> impl tera::Function {
    move |args: &HashMap<String, Value>| -> Result<Value> {
        let path = args
            .get("path")
            .and_then(Value::as_str)
            .ok_or_else(|| tera::Error::msg("get() expects a string `path` argument"))?;
        let default = args.get("default").cloned().unwrap_or(Value::Null);
        Ok(helpers::get(&data, path, &default).clone())
    }
}

/// `{{ block(name="js") }}` - finalized block content as of the view's start.
pub(crate) fn block(blocks: HashMap<String, String>) -> impl tera::Function {
    move |args: &HashMap<String, Value>| -> Result<Value> {
        let name = args
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| tera::Error::msg("block() expects a string `name` argument"))?;
        Ok(Value::String(blocks.get(name).cloned().unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tera::Function;

    fn args(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_escape_filter() {
        let out = escape(&json!("<b>hi</b>"), &HashMap::new()).unwrap();
        assert_eq!(out, json!("&lt;b&gt;hi&lt;/b&gt;"));
    }

    #[test]
    fn test_escape_filter_non_string() {
        let out = escape(&json!(5), &HashMap::new()).unwrap();
        assert_eq!(out, json!("5"));
    }

    #[test]
    fn test_getter_function() {
        let f = getter(json!({"user": {"name": "John Doe"}}));
        let found = f.call(&args(&[("path", json!("user.name"))])).unwrap();
        assert_eq!(found, json!("John Doe"));

        let missing = f
            .call(&args(&[
                ("path", json!("user.city.name")),
                ("default", json!("Unknown")),
            ]))
            .unwrap();
        assert_eq!(missing, json!("Unknown"));
    }

    #[test]
    fn test_getter_requires_path() {
        let f = getter(json!({}));
        assert!(f.call(&HashMap::new()).is_err());
    }

    #[test]
    fn test_block_function() {
        let mut blocks = HashMap::new();
        blocks.insert("js".to_string(), "<script></script>".to_string());
        let f = block(blocks);
        assert_eq!(
            f.call(&args(&[("name", json!("js"))])).unwrap(),
            json!("<script></script>")
        );
        assert_eq!(f.call(&args(&[("name", json!("css"))])).unwrap(), json!(""));
    }
}
