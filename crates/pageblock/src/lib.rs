//! Server-side page composition: namespaced views, layered output blocks, and
//! view composers.
//!
//! A page is rendered by running view bodies that write text. While running,
//! a body can capture part of its output under a name (a *block*), read blocks
//! other views finished earlier, insert other views inline, or hand off to a
//! layout view that assembles the blocks into the final page.
//!
//! # Modules
//!
//! - [`resolver`]: `[namespace::]a.b.c` references → files under per-namespace directories
//! - [`blocks`]: the `start`/`stop`/`parent`/`get` capture stack
//! - [`composer`]: per-view callbacks that contribute render data
//! - [`renderer`]: [`Environment`] and the [`ViewContext`] handed to view bodies
//! - [`helpers`]: HTML escaping and nested data lookup
//! - [`config`]: TOML configuration for directories and the view extension
//!
//! # Example
//!
//! ```no_run
//! use pageblock::{Environment, DEFAULT_NAMESPACE};
//! use serde_json::json;
//!
//! let mut env = Environment::new();
//! env.set_directory("views", DEFAULT_NAMESPACE);
//! env.define("page", |ctx| {
//!     ctx.start("title");
//!     ctx.write("Home");
//!     ctx.stop()?;
//!     ctx.insert("layout", json!({}))
//! });
//! env.define("layout", |ctx| {
//!     let title = ctx.block("title");
//!     ctx.write("<title>");
//!     ctx.write_escaped(&title);
//!     ctx.write("</title>");
//!     Ok(())
//! });
//! let html = env.render("page", json!({})).unwrap();
//! assert_eq!(html, "<title>Home</title>");
//! ```

pub mod blocks;
pub mod composer;
pub mod config;
pub mod error;
pub mod helpers;
pub mod renderer;
pub mod resolver;

mod template;

pub use blocks::BlockEngine;
pub use composer::{ComposerRegistry, Data};
pub use config::EnvironmentConfig;
pub use error::{BlockError, BoxError, ConfigError, RenderError, RenderResult, ResolveError};
pub use helpers::{escape, get};
pub use renderer::{Environment, ViewBody, ViewContext};
pub use resolver::{ViewRef, ViewResolver, DEFAULT_EXTENSION, DEFAULT_NAMESPACE};
