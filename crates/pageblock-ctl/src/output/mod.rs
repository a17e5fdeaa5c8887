//! Styled terminal output for `pageblock-ctl`.
//!
//! Rendered views go to stdout untouched. Diagnostics that may accompany a
//! render (warnings, hints, errors) go to stderr so piped output stays clean.
//! `anstream` strips the styling when the stream is not a terminal.

mod styles;

use std::fmt::Display;
use std::io::Write;

pub(crate) use styles::clap_styles;

use styles::{ERROR, HEADER, HINT, LABEL, SUCCESS, WARNING};

/// `✓ message` on stdout.
pub(crate) fn success(msg: impl Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "{SUCCESS}✓ {msg}{SUCCESS:#}").ok();
}

/// `✗ message` on stderr.
pub(crate) fn error(msg: impl Display) {
    let mut err = anstream::stderr().lock();
    writeln!(err, "{ERROR}✗ {msg}{ERROR:#}").ok();
}

/// `! message` on stderr.
pub(crate) fn warning(msg: impl Display) {
    let mut err = anstream::stderr().lock();
    writeln!(err, "{WARNING}! {msg}{WARNING:#}").ok();
}

/// Guidance that follows a warning or error, on stderr.
pub(crate) fn hint(msg: impl Display) {
    let mut err = anstream::stderr().lock();
    writeln!(err, "{HINT}  {msg}{HINT:#}").ok();
}

/// Section title, preceded by a blank line unless it opens the output.
pub(crate) fn section(title: impl Display, first: bool) {
    let mut out = anstream::stdout().lock();
    if !first {
        writeln!(out).ok();
    }
    writeln!(out, "{HEADER}{title}{HEADER:#}").ok();
}

/// One row of a two-column listing, names padded to `width`.
pub(crate) fn row(name: &str, value: impl Display, width: usize) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "  {LABEL}{name:<width$}{LABEL:#}  {value}").ok();
}

/// Write rendered output verbatim, without a trailing newline.
pub(crate) fn raw(text: &str) {
    let mut out = std::io::stdout().lock();
    out.write_all(text.as_bytes()).ok();
    out.flush().ok();
}
