// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Top-level entry points: one single-threaded, single-pass pipeline from
//! raw bytes to rendered text. The fatal errors are all detected before any
//! rendering begins; malformed byte content is never fatal, it is the
//! subject of the visualization.

use crate::decode;
use crate::encoding::{EncodingFamily, UnibitsError};
use crate::render;
use crate::stats as stats_mod;
use crate::terminal;

/// Recognized configuration for one visualization pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Explicit column width; auto-detected with a fixed fallback otherwise.
    pub width: Option<usize>,
    /// Count East-Asian-ambiguous characters as two columns in the stats.
    pub wide_ambiguous: bool,
}

/// Render the full diagnostic breakdown of `bytes` under `family`.
///
/// # Errors
///
/// [`UnibitsError::EmptyInput`] when no data was given. Encoding-name errors
/// are raised earlier, by [`EncodingFamily::resolve`].
pub fn visualize(
    bytes: &[u8],
    family: EncodingFamily,
    options: &Options,
) -> Result<String, UnibitsError> {
    if bytes.is_empty() {
        return Err(UnibitsError::EmptyInput);
    }
    let units = decode::decode(bytes, family);
    // % is Display, ? is Debug.
    tracing::debug!(
        message = "decoded input",
        encoding = %family.name(),
        byte_count = bytes.len(),
        unit_count = units.len()
    );
    let width = options.width.unwrap_or_else(terminal::detect_columns);
    Ok(render::compose(&units, family, width))
}

/// Render the one-line summary for `bytes` under `family`.
///
/// # Errors
///
/// [`UnibitsError::EmptyInput`] when no data was given.
pub fn stats(
    bytes: &[u8],
    family: EncodingFamily,
    options: &Options,
) -> Result<String, UnibitsError> {
    if bytes.is_empty() {
        return Err(UnibitsError::EmptyInput);
    }
    Ok(stats_mod::stats_line(bytes, family, options.wide_ambiguous))
}
