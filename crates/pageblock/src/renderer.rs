//! Renderer: resolves a view, applies its composer, runs its body.
//!
//! An [`Environment`] is configured once (directories, extension, composers,
//! compiled view bodies) and then shared read-only, e.g. behind an `Arc`,
//! across concurrent renders. Every top-level [`Environment::render`] gets its
//! own [`BlockEngine`]; [`Environment::render_in`] lets a caller keep one
//! engine across several renders of the same page.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use crate::blocks::BlockEngine;
use crate::composer::{ComposerRegistry, Data};
use crate::config::EnvironmentConfig;
use crate::error::{BlockError, BoxError, RenderError, RenderResult, ResolveError};
use crate::helpers;
use crate::resolver::{ViewRef, ViewResolver, DEFAULT_NAMESPACE};
use crate::template;

/// Compiled body of a view.
pub trait ViewBody: Send + Sync {
    fn render(&self, ctx: &mut ViewContext<'_>) -> RenderResult<()>;
}

impl<F> ViewBody for F
where
    F: Fn(&mut ViewContext<'_>) -> RenderResult<()> + Send + Sync,
{
    fn render(&self, ctx: &mut ViewContext<'_>) -> RenderResult<()> {
        self(ctx)
    }
}

/// Process-wide view configuration.
#[derive(Default)]
pub struct Environment {
    resolver: ViewResolver,
    composers: ComposerRegistry,
    bodies: HashMap<String, Arc<dyn ViewBody>>,
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bodies: Vec<&String> = self.bodies.keys().collect();
        bodies.sort();
        f.debug_struct("Environment")
            .field("resolver", &self.resolver)
            .field("composers", &self.composers)
            .field("bodies", &bodies)
            .finish()
    }
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an environment from a loaded configuration.
    pub fn from_config(config: &EnvironmentConfig) -> Self {
        let mut env = Self::new();
        if let Some(dir) = &config.default_directory {
            env.set_directory(config.resolve_path(dir), DEFAULT_NAMESPACE);
        }
        for (namespace, dir) in &config.namespaces {
            env.set_directory(config.resolve_path(dir), namespace);
        }
        if let Some(ext) = &config.view_extension {
            env.set_view_extension(ext);
        }
        env
    }

    /// Register or overwrite the base directory of `namespace`
    /// ([`DEFAULT_NAMESPACE`] for unqualified views).
    pub fn set_directory(&mut self, path: impl Into<PathBuf>, namespace: &str) {
        self.resolver.set_directory(path, namespace);
    }

    /// Base directory registered for `namespace`, or `UnknownNamespace`.
    pub fn directory(&self, namespace: &str) -> Result<&Path, ResolveError> {
        self.resolver.directory(namespace)
    }

    /// Suffix for every later resolution. Earlier renders are unaffected.
    pub fn set_view_extension(&mut self, extension: &str) {
        self.resolver.set_view_extension(extension);
    }

    /// Read-only view of the namespace table and extension.
    pub fn resolver(&self) -> &ViewResolver {
        &self.resolver
    }

    /// Whether `view` resolves to an existing file. Never fails.
    pub fn has(&self, view: &str) -> bool {
        self.resolver.has(view)
    }

    /// Path of the existing file for `view`, or `ViewNotFound`.
    pub fn resolve(&self, view: &str) -> Result<PathBuf, ResolveError> {
        self.resolver.resolve(view)
    }

    /// Register the composer for `view`, replacing any earlier one.
    pub fn composer<F>(&mut self, view: &str, composer: F)
    where
        F: Fn(&Data) -> Result<Data, BoxError> + Send + Sync + 'static,
    {
        self.composers.register(view, composer);
    }

    /// Attach a compiled body to `view`. The view file must still exist for
    /// the view to render; the body replaces rendering its contents.
    pub fn define<F>(&mut self, view: &str, body: F)
    where
        F: Fn(&mut ViewContext<'_>) -> RenderResult<()> + Send + Sync + 'static,
    {
        self.define_body(view, Arc::new(body));
    }

    pub fn define_body(&mut self, view: &str, body: Arc<dyn ViewBody>) {
        let key = ViewRef::normalize(view);
        tracing::debug!(view = %key, "Defined view body");
        self.bodies.insert(key, body);
    }

    /// Render `view` as a page of its own, with fresh block state.
    pub fn render(&self, view: &str, data: Value) -> RenderResult<String> {
        let mut blocks = BlockEngine::new();
        self.render_in(&mut blocks, view, data)
    }

    /// Render `view` using `blocks` as the page's block state.
    ///
    /// On failure the frames opened by this render are discarded, while
    /// blocks finalized before the failure remain.
    pub fn render_in(
        &self,
        blocks: &mut BlockEngine,
        view: &str,
        data: Value,
    ) -> RenderResult<String> {
        let data = into_data(view, data)?;
        self.render_view(blocks, view, data)
    }

    fn render_view(
        &self,
        blocks: &mut BlockEngine,
        view: &str,
        mut data: Data,
    ) -> RenderResult<String> {
        let path = self.resolver.resolve(view)?;
        self.composers.apply(view, &mut data)?;
        let data = Value::Object(data);

        let body = self.bodies.get(&ViewRef::normalize(view)).cloned();
        tracing::debug!(view, ?path, compiled = body.is_some(), "Rendering view");

        let scope = blocks.enter_scope();
        let result = match body {
            Some(body) => {
                let mut ctx = ViewContext {
                    env: self,
                    blocks: &mut *blocks,
                    view,
                    data: &data,
                    out: String::new(),
                };
                body.render(&mut ctx).map(|()| ctx.out)
            }
            None => template::render_file(view, &path, &data, blocks.snapshot()),
        };

        match result {
            Ok(output) => {
                blocks.leave_scope(scope)?;
                Ok(output)
            }
            Err(e) => {
                blocks.abandon_scope(scope);
                Err(e)
            }
        }
    }
}

fn into_data(view: &str, data: Value) -> RenderResult<Data> {
    match data {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Data::new()),
        _ => Err(RenderError::InvalidData {
            view: view.to_string(),
        }),
    }
}

/// Handle given to a compiled view body while it runs.
///
/// Text written through [`write`](Self::write) (or `write!`) lands in the
/// innermost block the view has open, or in the view's own output.
pub struct ViewContext<'a> {
    env: &'a Environment,
    blocks: &'a mut BlockEngine,
    view: &'a str,
    data: &'a Value,
    out: String,
}

impl fmt::Debug for ViewContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewContext")
            .field("view", &self.view)
            .field("depth", &self.blocks.depth())
            .field("buffered", &self.out.len())
            .finish()
    }
}

impl ViewContext<'_> {
    /// Reference of the view being rendered.
    pub fn view(&self) -> &str {
        self.view
    }

    /// The view's data scope (always an object).
    pub fn data(&self) -> &Value {
        self.data
    }

    /// Nested lookup in the data scope, `default` when any segment is missing.
    pub fn get<'v>(&'v self, path: &str, default: &'v Value) -> &'v Value {
        helpers::get(self.data, path, default)
    }

    /// Data value at `path` as text; missing values render as nothing.
    pub fn text(&self, path: &str) -> String {
        helpers::lookup(self.data, path)
            .map(helpers::display)
            .unwrap_or_default()
    }

    pub fn escape(&self, text: &str) -> String {
        helpers::escape(text)
    }

    pub fn write(&mut self, text: &str) {
        if !self.blocks.capture(text) {
            self.out.push_str(text);
        }
    }

    pub fn write_escaped(&mut self, text: &str) {
        let escaped = helpers::escape(text);
        self.write(&escaped);
    }

    /// Open block `name`.
    pub fn start(&mut self, name: impl Into<String>) {
        self.blocks.start(name);
    }

    /// Close the innermost block this view opened.
    pub fn stop(&mut self) -> Result<(), BlockError> {
        self.blocks.stop()
    }

    /// Splice the parent content of the innermost open block at this point.
    pub fn parent(&mut self) {
        let parent = self.blocks.parent();
        self.write(&parent);
    }

    /// Finalized content of block `name`.
    pub fn block(&self, name: &str) -> String {
        self.blocks.get(name)
    }

    /// Render `view` with its own data scope and return its output.
    /// Blocks are shared with the current page.
    pub fn render(&mut self, view: &str, data: Value) -> RenderResult<String> {
        let data = into_data(view, data)?;
        self.env.render_view(self.blocks, view, data)
    }

    /// Render `view` and write its output here.
    pub fn insert(&mut self, view: &str, data: Value) -> RenderResult<()> {
        let output = self.render(view, data)?;
        self.write(&output);
        Ok(())
    }
}

impl fmt::Write for ViewContext<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write(s);
        Ok(())
    }
}
