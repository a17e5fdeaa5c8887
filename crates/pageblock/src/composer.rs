//! View composers: callbacks that contribute data whenever a view renders.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::{BoxError, RenderError};
use crate::resolver::ViewRef;

/// Data scope of one render.
pub type Data = Map<String, Value>;

type ComposerFn = dyn Fn(&Data) -> Result<Data, BoxError> + Send + Sync;

/// Maps view references to composer callbacks.
///
/// References are normalized, so `a.b` and `a/b` share a composer. A second
/// registration for the same view replaces the first.
#[derive(Clone, Default)]
pub struct ComposerRegistry {
    composers: HashMap<String, Arc<ComposerFn>>,
}

impl fmt::Debug for ComposerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut views: Vec<&String> = self.composers.keys().collect();
        views.sort();
        f.debug_struct("ComposerRegistry")
            .field("views", &views)
            .finish()
    }
}

impl ComposerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store (or replace) the composer for `view`.
    pub fn register<F>(&mut self, view: &str, composer: F)
    where
        F: Fn(&Data) -> Result<Data, BoxError> + Send + Sync + 'static,
    {
        let key = ViewRef::normalize(view);
        if self.composers.insert(key.clone(), Arc::new(composer)).is_some() {
            tracing::debug!(view = %key, "Replaced view composer");
        } else {
            tracing::debug!(view = %key, "Registered view composer");
        }
    }

    pub fn contains(&self, view: &str) -> bool {
        self.composers.contains_key(&ViewRef::normalize(view))
    }

    /// Merge the composer's output for `view` into `data`.
    ///
    /// Keys already present in `data` win over composer-supplied keys, so data
    /// passed explicitly to `render` always takes precedence. Without a
    /// registered composer this is a no-op.
    pub fn apply(&self, view: &str, data: &mut Data) -> Result<(), RenderError> {
        let Some(composer) = self.composers.get(&ViewRef::normalize(view)) else {
            return Ok(());
        };

        let composed = composer(data).map_err(|source| RenderError::Composer {
            view: view.to_string(),
            source,
        })?;
        tracing::debug!(view, keys = composed.len(), "Applied view composer");

        for (key, value) in composed {
            data.entry(key).or_insert(value);
        }
        Ok(())
    }
}
