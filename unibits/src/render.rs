// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The line compositor. Lays out four position-synchronized row buffers
//! (label, symbol, hex, bit), assigns one color per unit, and wraps into
//! [`RenderBlock`]s at the configured column width. A unit's columns are
//! never split across two blocks, and block text is only materialized after
//! the defect analyzer has finished rewriting labels, so backpatching never
//! touches rendered output.

use std::fmt::Write as _;

use unicode_width::UnicodeWidthStr;

use crate::ansi_text::{RgbValue, fg, fg_bold, fg_underline};
use crate::bits;
use crate::char_info::CharacterUnit;
use crate::color;
use crate::encoding::EncodingFamily;
use crate::symbolify::symbolify;

/// Every byte occupies one 10-column cell in each row.
const CELL_WIDTH: usize = 10;
/// Rows are indented by two columns, like the reference output.
const INDENT: &str = "  ";

/// One column-width-bounded page of output. The four rows stay
/// index-synchronized; `hex_plain_len` tracks the hex row's printable width
/// (color codes excluded) for the wrap decision.
#[derive(Debug)]
struct RenderBlock {
    label: String,
    symbol: String,
    hex: String,
    bits: String,
    hex_plain_len: usize,
    unit_count: usize,
}

impl RenderBlock {
    fn new() -> RenderBlock {
        RenderBlock {
            label: INDENT.to_string(),
            symbol: INDENT.to_string(),
            hex: INDENT.to_string(),
            bits: INDENT.to_string(),
            hex_plain_len: INDENT.len(),
            unit_count: 0,
        }
    }
}

/// Compose the annotated unit stream into the final colored text.
#[must_use]
pub fn compose(units: &[CharacterUnit], family: EncodingFamily, width: usize) -> String {
    let show_label_row = family.is_unicode();
    let mut rng = rand::rng();
    let mut done: Vec<RenderBlock> = Vec::new();
    let mut current = RenderBlock::new();

    for unit in units {
        let unit_color = color::assign(unit, &mut rng);
        let unit_cols = CELL_WIDTH * unit.bytes.len();

        // Start a new block when this unit would push the hex row past the
        // configured width. A unit wider than an empty block is emitted
        // anyway; it cannot be split.
        if current.unit_count > 0 && current.hex_plain_len + unit_cols > width {
            done.push(std::mem::replace(&mut current, RenderBlock::new()));
        }

        append_unit(&mut current, unit, family, unit_color, show_label_row);
    }
    done.push(current);

    materialize(&done, show_label_row)
}

fn append_unit(
    block: &mut RenderBlock,
    unit: &CharacterUnit,
    family: EncodingFamily,
    unit_color: RgbValue,
    show_label_row: bool,
) {
    for (index, byte) in unit.bytes.iter().enumerate() {
        if index == 0 {
            if show_label_row {
                let label_text = label_text(unit);
                _ = write!(block.label, "{}", fg_bold(&label_text, unit_color));
                pad(&mut block.label, CELL_WIDTH.saturating_sub(label_text.len()));
            }
            let glyph = symbolify(unit, family);
            _ = write!(block.symbol, "{}", fg(&glyph, unit_color));
            pad(&mut block.symbol, CELL_WIDTH.saturating_sub(glyph.width()));
        } else {
            if show_label_row {
                pad(&mut block.label, CELL_WIDTH);
            }
            pad(&mut block.symbol, CELL_WIDTH);
        }

        let hex = format!("{byte:02X}");
        _ = write!(block.hex, "{}", fg(&hex, unit_color));
        pad(&mut block.hex, CELL_WIDTH - hex.len());
        block.hex_plain_len += CELL_WIDTH;

        let split = bits::split(*byte, index, family, unit);
        if !split.header().is_empty() {
            _ = write!(block.bits, "{}", fg(split.header(), unit_color));
        }
        if !split.payload().is_empty() {
            _ = write!(block.bits, "{}", fg_underline(split.payload(), unit_color));
        }
        pad(&mut block.bits, CELL_WIDTH - 8);
    }
    block.unit_count += 1;
}

/// Label cell text: the scalar value for well-formed units, the defect's
/// short label otherwise.
fn label_text(unit: &CharacterUnit) -> String {
    match (unit.defect, unit.ord()) {
        (Some(defect), _) => defect.cell_label().to_string(),
        (None, Some(ord)) => format!("U+{ord:04X}"),
        (None, None) => String::new(),
    }
}

fn pad(row: &mut String, count: usize) {
    for _ in 0..count {
        row.push(' ');
    }
}

/// Blocks are concatenated top to bottom; within a block the rows are
/// emitted label, symbol, hex, bit, then a blank separator line. The
/// byte-oriented families have no label row.
fn materialize(blocks: &[RenderBlock], show_label_row: bool) -> String {
    let mut acc = String::new();
    for block in blocks {
        if block.unit_count == 0 {
            continue;
        }
        if show_label_row {
            _ = writeln!(acc, "{}", block.label.trim_end());
        }
        _ = writeln!(acc, "{}", block.symbol.trim_end());
        _ = writeln!(acc, "{}", block.hex.trim_end());
        _ = writeln!(acc, "{}", block.bits.trim_end());
        acc.push('\n');
    }
    acc
}
