// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Terminal column-width detection with a fixed fallback for non-interactive
//! output.

pub const FALLBACK_COLUMNS: usize = 80;

/// Get the terminal width in columns, or [`FALLBACK_COLUMNS`] when stdout is
/// not a terminal (pipes, CI).
#[must_use]
pub fn detect_columns() -> usize {
    match crossterm::terminal::size() {
        Ok((columns, _rows)) => usize::from(columns),
        Err(_) => FALLBACK_COLUMNS,
    }
}
