//! Tera-backed bodies for view files without a compiled body.
//!
//! The file's contents are a Tera template rendered with the view's data as
//! context. Besides Tera's builtins, such templates get the `escape` filter
//! and the `get(path=, default=)` and `block(name=)` functions. They can read
//! blocks but not capture them; capturing needs a compiled body.

mod engine;
mod filters;

pub(crate) use engine::render_file;
