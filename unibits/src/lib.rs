// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # unibits
//!
//! Inspects a byte sequence tagged with a declared text encoding and renders
//! a diagnostic, human-readable breakdown of its structure: per-character
//! codepoint, visible symbol, hex bytes, and bit layout, with color-coded
//! semantic categories, including precise classification of *why* a byte
//! sequence is malformed (overlong encoding, surrogate leakage, truncated
//! multi-byte unit, stray continuation byte, and so on).
//!
//! Malformed input is displayed, never corrected: encoding defects are the
//! subject of the visualization, not an error condition.
//!
//! # Example
//!
//! ```rust
//! use unibits::{EncodingFamily, Options, visualize};
//!
//! let family = EncodingFamily::resolve("UTF-8")?;
//! let options = Options {
//!     width: Some(80),
//!     ..Options::default()
//! };
//! let rendered = visualize("ℜ".as_bytes(), family, &options)?;
//! assert!(rendered.contains("U+211C"));
//! # Ok::<(), unibits::UnibitsError>(())
//! ```

pub mod ansi_text;
pub mod bits;
pub mod char_info;
pub mod codepages;
pub mod color;
pub mod convert;
pub mod decode;
pub mod defect;
pub mod encoding;
pub mod render;
pub mod stats;
pub mod symbolify;
pub mod terminal;
pub mod visualize;

pub use char_info::CharacterUnit;
pub use codepages::Codepage;
pub use convert::convert;
pub use defect::DefectKind;
pub use encoding::{Endian, EncodingFamily, UnibitsError};
pub use visualize::{Options, stats, visualize};
