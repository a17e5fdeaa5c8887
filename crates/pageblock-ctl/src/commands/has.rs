//! `has`: report whether a view resolves.

use pageblock::Environment;

use crate::output;

/// Returns whether the view exists, after printing the outcome.
pub(crate) fn handle_has_command(env: &Environment, view: &str) -> bool {
    match env.resolve(view) {
        Ok(path) => {
            output::success(format!("{view} → {}", path.display()));
            true
        }
        Err(e) => {
            output::error(&e);
            false
        }
    }
}
