//! `render`: render a view and print or save the output.

use std::path::Path;

use anyhow::Context as _;
use pageblock::Environment;
use serde_json::Value;

use crate::output;

/// Parse render data from an inline JSON string or a JSON file.
/// Neither given means an empty scope.
pub(crate) fn read_data(inline: Option<&str>, file: Option<&Path>) -> anyhow::Result<Value> {
    let data: Value = match (inline, file) {
        (Some(json), _) => serde_json::from_str(json).context("invalid --data JSON")?,
        (None, Some(path)) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("invalid JSON in {}", path.display()))?
        }
        (None, None) => Value::Null,
    };

    if !(data.is_object() || data.is_null()) {
        anyhow::bail!("render data must be a JSON object");
    }
    Ok(data)
}

pub(crate) fn handle_render_command(
    env: &Environment,
    view: &str,
    data: Value,
    destination: Option<&Path>,
) -> anyhow::Result<()> {
    let rendered = env
        .render(view, data)
        .with_context(|| format!("failed to render '{view}'"))?;

    match destination {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            output::success(format!("Rendered '{view}' to {}", path.display()));
        }
        None => output::raw(&rendered),
    }
    Ok(())
}
