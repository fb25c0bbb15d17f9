// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Color assignment for one classified unit. The semantic categories get
//! fixed palette colors; everything else gets a random color constrained to
//! a mid-range band per channel so it stays legible on both light and dark
//! backgrounds. One color is drawn per unit and reused for all of its bytes.

use rand::Rng;

use crate::ansi_text::RgbValue;
use crate::char_info::CharacterUnit;

/// Fixed mapping of category to semantic color.
pub mod palette {
    use super::RgbValue;

    pub const INVALID: RgbValue = RgbValue {
        red: 0xD0,
        green: 0x20,
        blue: 0x20,
    };
    pub const UNASSIGNED: RgbValue = RgbValue {
        red: 0xD0,
        green: 0x80,
        blue: 0x10,
    };
    pub const BLANK: RgbValue = RgbValue {
        red: 0x20,
        green: 0xA8,
        blue: 0xB8,
    };
    pub const CONTROL: RgbValue = RgbValue {
        red: 0x40,
        green: 0x50,
        blue: 0xD0,
    };
    pub const FORMAT: RgbValue = RgbValue {
        red: 0xB0,
        green: 0x20,
        blue: 0xB0,
    };
    pub const MARK: RgbValue = RgbValue {
        red: 0x20,
        green: 0xA0,
        blue: 0x40,
    };
}

/// Channel band for the random colors of ordinary valid units.
const CHANNEL_RANGE: std::ops::Range<u8> = 60..150;

#[must_use]
pub fn assign(unit: &CharacterUnit, rng: &mut impl Rng) -> RgbValue {
    if !unit.valid {
        palette::INVALID
    } else if !unit.assigned {
        palette::UNASSIGNED
    } else if unit.blank {
        palette::BLANK
    } else if unit.control {
        palette::CONTROL
    } else if unit.format {
        palette::FORMAT
    } else if unit.mark {
        palette::MARK
    } else {
        RgbValue {
            red: rng.random_range(CHANNEL_RANGE),
            green: rng.random_range(CHANNEL_RANGE),
            blue: rng.random_range(CHANNEL_RANGE),
        }
    }
}
