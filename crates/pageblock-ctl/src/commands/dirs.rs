//! `dirs`: show the namespace table and view extension.

use pageblock::Environment;

use crate::output;

const DEFAULT_LABEL: &str = "(default)";

pub(crate) fn handle_dirs_command(env: &Environment) {
    let resolver = env.resolver();
    let rows: Vec<(&str, String)> = resolver
        .namespaces()
        .into_iter()
        .map(|(namespace, dir)| (namespace_label(namespace), dir.display().to_string()))
        .collect();
    let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

    output::section("Namespaces", true);
    if rows.is_empty() {
        output::hint("none configured");
    }
    for (name, dir) in &rows {
        output::row(name, dir, width);
    }

    output::section("Extension", false);
    output::row("suffix", format!(".{}", resolver.view_extension()), width);
}

fn namespace_label(namespace: &str) -> &str {
    if namespace.is_empty() {
        DEFAULT_LABEL
    } else {
        namespace
    }
}
