// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Minimal ANSI SGR emission for the visualizer's colored cells.
//!
//! More info:
//! - <https://notes.burke.libbey.me/ansi-escape-codes/>
//! - <https://en.wikipedia.org/wiki/ANSI_escape_code#24-bit>

use std::fmt::{Display, Formatter, Result};

/// Represents a color in RGB (24-bit truecolor) format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RgbValue {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl From<(u8, u8, u8)> for RgbValue {
    fn from((red, green, blue): (u8, u8, u8)) -> Self { Self { red, green, blue } }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SgrCode {
    Reset,
    Bold,
    Underline,
    ForegroundRGB(u8, u8, u8),
}

pub mod sgr_code_impl {
    use super::{Display, Formatter, Result, SgrCode};

    pub const CSI: &str = "\x1b[";
    pub const SGR: &str = "m";

    impl Display for SgrCode {
        /// SGR: set graphics mode command.
        #[rustfmt::skip]
        fn fmt(&self, f: &mut Formatter<'_>) -> Result {
            match *self {
                SgrCode::Reset                  => write!(f, "{CSI}0{SGR}"),
                SgrCode::Bold                   => write!(f, "{CSI}1{SGR}"),
                SgrCode::Underline              => write!(f, "{CSI}4{SGR}"),
                SgrCode::ForegroundRGB(r, g, b) => write!(f, "{CSI}38;2;{r};{g};{b}{SGR}"),
            }
        }
    }
}

/// One span of text painted with a single foreground color, optionally bold
/// or underlined. [`Display`] writes the SGR prelude, the text, and a reset,
/// so spans can be appended to a row buffer with `write!`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsiText<'a> {
    pub text: &'a str,
    pub color: RgbValue,
    pub bold: bool,
    pub underline: bool,
}

impl Display for AnsiText<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "{}",
            SgrCode::ForegroundRGB(self.color.red, self.color.green, self.color.blue)
        )?;
        if self.bold {
            write!(f, "{}", SgrCode::Bold)?;
        }
        if self.underline {
            write!(f, "{}", SgrCode::Underline)?;
        }
        write!(f, "{}{}", self.text, SgrCode::Reset)
    }
}

pub fn fg(text: &str, color: RgbValue) -> AnsiText<'_> {
    AnsiText {
        text,
        color,
        bold: false,
        underline: false,
    }
}

pub fn fg_bold(text: &str, color: RgbValue) -> AnsiText<'_> {
    AnsiText {
        text,
        color,
        bold: true,
        underline: false,
    }
}

pub fn fg_underline(text: &str, color: RgbValue) -> AnsiText<'_> {
    AnsiText {
        text,
        color,
        bold: false,
        underline: true,
    }
}
