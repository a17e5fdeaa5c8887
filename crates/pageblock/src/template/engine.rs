//! Tera rendering of view files that have no compiled body.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use tera::{Context, Tera};

use super::filters;
use crate::error::RenderError;

/// Render the Tera template stored at `path` with `data` (an object) as its
/// context.
///
/// `blocks` is the snapshot of finalized blocks visible to the view through
/// `block(name=...)`. Autoescaping is disabled: views escape explicitly.
pub(crate) fn render_file(
    view: &str,
    path: &Path,
    data: &Value,
    blocks: HashMap<String, String>,
) -> Result<String, RenderError> {
    let source = std::fs::read_to_string(path).map_err(|e| RenderError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    render_source(view, &source, data, blocks)
}

pub(crate) fn render_source(
    view: &str,
    source: &str,
    data: &Value,
    blocks: HashMap<String, String>,
) -> Result<String, RenderError> {
    let template_error = |e: tera::Error| RenderError::Template {
        view: view.to_string(),
        source: e,
    };

    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    tera.add_raw_template(view, source).map_err(template_error)?;

    tera.register_filter("escape", filters::escape);
    tera.register_filter("e", filters::escape);
    tera.register_function("get", filters::getter(data.clone()));
    tera.register_function("block", filters::block(blocks));

    let context = Context::from_value(data.clone()).map_err(template_error)?;
    tera.render(view, &context).map_err(template_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    #[test]
    fn test_render_simple_page() {
        let out = render_source(
            "simple-page",
            "<h1>{{message}}</h1>",
            &json!({"message": "Simple Page"}),
            HashMap::new(),
        )
        .unwrap();
        assert_eq!(out, "<h1>Simple Page</h1>");
    }

    #[test]
    fn test_autoescape_is_off() {
        let out = render_source(
            "raw",
            "{{ html }}",
            &json!({"html": "<b>x</b>"}),
            HashMap::new(),
        )
        .unwrap();
        assert_eq!(out, "<b>x</b>");
    }

    #[test]
    fn test_escape_and_get_helpers() {
        let out = render_source(
            "helpers",
            "{{ html | escape }} {{ get(path=\"user.city.name\", default=\"Unknown\") }}",
            &json!({"html": "<h1>Foo</h1>", "user": {"name": "John Doe"}}),
            HashMap::new(),
        )
        .unwrap();
        assert_eq!(out, "&lt;h1&gt;Foo&lt;/h1&gt; Unknown");
    }

    #[test]
    fn test_block_function_reads_snapshot() {
        let mut blocks = HashMap::new();
        blocks.insert("content".to_string(), "page content".to_string());
        let out = render_source(
            "layout",
            "<main>{{ block(name=\"content\") }}</main>",
            &json!({}),
            blocks,
        )
        .unwrap();
        assert_eq!(out, "<main>page content</main>");
    }

    #[test]
    fn test_syntax_error_is_template_error() {
        let result = render_source("bad", "{{ unclosed", &json!({}), HashMap::new());
        assert!(matches!(result, Err(RenderError::Template { .. })));
    }

    #[test]
    fn test_render_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        fs::write(&path, "Hello {{ name }}").unwrap();

        let out = render_file("page", &path, &json!({"name": "Ada"}), HashMap::new()).unwrap();
        assert_eq!(out, "Hello Ada");
    }

    #[test]
    fn test_render_missing_file() {
        let result = render_file(
            "gone",
            Path::new("/nonexistent/gone.html"),
            &json!({}),
            HashMap::new(),
        );
        assert!(matches!(result, Err(RenderError::Io { .. })));
    }
}
