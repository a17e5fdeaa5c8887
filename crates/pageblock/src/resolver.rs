//! View resolution: maps `[namespace::]seg.seg.seg` references onto files.
//!
//! Each namespace owns a base directory. The default namespace is keyed by the
//! empty string and is used for unqualified references. Segments may be
//! separated by `.` or a path separator interchangeably, so `foo.bar.baz`,
//! `foo/bar/baz` and `foo\bar\baz` name the same file.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ResolveError;

/// Key of the default namespace.
pub const DEFAULT_NAMESPACE: &str = "";

/// Extension appended to view files when none has been configured.
pub const DEFAULT_EXTENSION: &str = "html";

const NAMESPACE_DELIMITER: &str = "::";

/// A parsed view reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewRef {
    namespace: String,
    segments: Vec<String>,
}

impl ViewRef {
    /// Parse a reference, rejecting empty names, empty segments and a second
    /// `::` after the namespace.
    pub fn parse(view: &str) -> Result<Self, ResolveError> {
        let (namespace, name) = match view.split_once(NAMESPACE_DELIMITER) {
            Some((ns, rest)) => (ns, rest),
            None => (DEFAULT_NAMESPACE, view),
        };

        let segments: Vec<String> = name.split(is_separator).map(str::to_string).collect();
        if segments
            .iter()
            .any(|s| s.is_empty() || s.contains(NAMESPACE_DELIMITER))
        {
            return Err(ResolveError::InvalidViewRef {
                view: view.to_string(),
            });
        }

        Ok(Self {
            namespace: namespace.to_string(),
            segments,
        })
    }

    /// Canonical spelling used as a lookup key: segments joined by `/`,
    /// qualified with `ns::` outside the default namespace.
    ///
    /// Unparseable references normalize to themselves so they can still be
    /// used as keys; they simply never resolve.
    pub fn normalize(view: &str) -> String {
        Self::parse(view)
            .map(|r| r.to_string())
            .unwrap_or_else(|_| view.to_string())
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Relative file path for this reference with `extension` appended.
    pub fn relative_path(&self, extension: &str) -> PathBuf {
        let mut path: PathBuf = self.segments.iter().collect();
        if !extension.is_empty() {
            let file = match path.file_name() {
                Some(name) => format!("{}.{extension}", name.to_string_lossy()),
                None => return path,
            };
            path.set_file_name(file);
        }
        path
    }
}

impl fmt::Display for ViewRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.namespace.is_empty() {
            write!(f, "{}{NAMESPACE_DELIMITER}", self.namespace)?;
        }
        write!(f, "{}", self.segments.join("/"))
    }
}

fn is_separator(c: char) -> bool {
    c == '.' || c == '/' || c == '\\'
}

/// Namespace directory table plus the view file extension.
#[derive(Debug, Clone)]
pub struct ViewResolver {
    directories: HashMap<String, PathBuf>,
    extension: String,
}

impl Default for ViewResolver {
    fn default() -> Self {
        Self {
            directories: HashMap::new(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl ViewResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or overwrite the base directory of `namespace`.
    pub fn set_directory(&mut self, path: impl Into<PathBuf>, namespace: &str) {
        let path = path.into();
        tracing::debug!(namespace, ?path, "Registered view directory");
        self.directories.insert(namespace.to_string(), path);
    }

    /// Base directory of `namespace`.
    pub fn directory(&self, namespace: &str) -> Result<&Path, ResolveError> {
        self.directories
            .get(namespace)
            .map(PathBuf::as_path)
            .ok_or_else(|| ResolveError::UnknownNamespace {
                namespace: namespace.to_string(),
            })
    }

    /// Registered namespaces in name order, default first.
    pub fn namespaces(&self) -> Vec<(&str, &Path)> {
        let mut entries: Vec<_> = self
            .directories
            .iter()
            .map(|(ns, dir)| (ns.as_str(), dir.as_path()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Set the suffix for all subsequent resolutions. A leading `.` is ignored.
    pub fn set_view_extension(&mut self, extension: &str) {
        self.extension = extension.trim_start_matches('.').to_string();
    }

    pub fn view_extension(&self) -> &str {
        &self.extension
    }

    /// Candidate file path for `view`, whether or not it exists.
    pub fn path_for(&self, view: &str) -> Result<PathBuf, ResolveError> {
        let view_ref = ViewRef::parse(view)?;
        let base = self.directory(view_ref.namespace())?;
        Ok(base.join(view_ref.relative_path(&self.extension)))
    }

    /// Whether `view` resolves to an existing file. Never fails.
    pub fn has(&self, view: &str) -> bool {
        self.path_for(view).is_ok_and(|path| path.is_file())
    }

    /// Resolve `view` to an existing file.
    pub fn resolve(&self, view: &str) -> Result<PathBuf, ResolveError> {
        let path = self.path_for(view)?;
        if !path.is_file() {
            return Err(ResolveError::ViewNotFound {
                view: view.to_string(),
                path,
            });
        }
        tracing::trace!(view, ?path, "Resolved view");
        Ok(path)
    }
}
