//! Configuration discovery for `pageblock-ctl`.
//!
//! The file format is [`pageblock::EnvironmentConfig`]; this module only
//! decides which file to read.

pub(crate) mod loader;

pub(crate) use loader::load_environment_config;
