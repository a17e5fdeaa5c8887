//! Command handlers for `pageblock-ctl`.

pub(crate) mod dirs;
pub(crate) mod has;
pub(crate) mod render;

pub(crate) use dirs::handle_dirs_command;
pub(crate) use has::handle_has_command;
pub(crate) use render::handle_render_command;
