//! # Error Types
//!
//! Every failure surfaces synchronously from the call that caused it. Nothing is
//! retried or recovered internally; a failed render leaves no partial output.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error raised by user code (view bodies and composer callbacks).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Failure to turn a view reference into an existing file.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no directory registered for namespace '{namespace}'")]
    UnknownNamespace { namespace: String },

    #[error("view '{view}' not found at {}", path.display())]
    ViewNotFound { view: String, path: PathBuf },

    #[error("invalid view reference '{view}'")]
    InvalidViewRef { view: String },
}

/// Structural misuse of the block capture stack.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BlockError {
    #[error("stop() called with no open block")]
    NoOpenBlock,

    #[error("block '{name}' was started but never stopped")]
    UnclosedBlock { name: String },
}

/// Failure while loading an environment configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Any failure of a `render`/`insert` call.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Block(#[from] BlockError),

    #[error("composer for '{view}' failed: {source}")]
    Composer { view: String, source: BoxError },

    #[error("view '{view}' failed: {source}")]
    View { view: String, source: BoxError },

    #[error("template error in '{view}': {source}")]
    Template { view: String, source: tera::Error },

    #[error("failed to read view file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("data for view '{view}' must be a JSON object")]
    InvalidData { view: String },

    #[error("failed to write view output")]
    Write(#[from] std::fmt::Error),
}

impl RenderError {
    /// Wrap an error raised by a view body.
    pub fn view(view: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::View {
            view: view.into(),
            source: source.into(),
        }
    }

    /// True when the failure is a missing view rather than a broken one.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, RenderError::Resolve(ResolveError::ViewNotFound { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_namespace_message() {
        let err = ResolveError::UnknownNamespace {
            namespace: "admin".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no directory registered for namespace 'admin'"
        );
    }

    #[test]
    fn test_view_not_found_message_includes_path() {
        let err = ResolveError::ViewNotFound {
            view: "foo.bar".to_string(),
            path: PathBuf::from("/views/foo/bar.html"),
        };
        let msg = err.to_string();
        assert!(msg.contains("foo.bar"));
        assert!(msg.contains("/views/foo/bar.html"));
    }

    #[test]
    fn test_render_error_is_transparent_for_resolve() {
        let err: RenderError = ResolveError::UnknownNamespace {
            namespace: "x".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "no directory registered for namespace 'x'");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_is_not_found() {
        let err: RenderError = ResolveError::ViewNotFound {
            view: "missing".to_string(),
            path: PathBuf::from("missing.html"),
        }
        .into();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_view_constructor_keeps_source() {
        let err = RenderError::view("page", "boom");
        assert_eq!(err.to_string(), "view 'page' failed: boom");
    }
}
