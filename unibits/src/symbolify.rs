// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Renders one classified unit as a compact visible glyph for the symbol
//! row: control pictures for C0, mnemonic names for C1 and for invisible
//! formatting characters, bracketing for blanks, and escaped literals for
//! the raw binary family.

use crate::char_info::CharacterUnit;
use crate::codepages::Codepage;
use crate::encoding::EncodingFamily;

/// U+2400 block: one picture per C0 control code.
const CONTROL_PICTURES_BASE: u32 = 0x2400;

const CONTROL_DELETE_SYMBOL: &str = "␡";

/// ISO 6429 mnemonics for the C1 range 0x80-0x9F.
#[rustfmt::skip]
const CONTROL_C1_NAMES: [&str; 32] = [
    "PAD", "HOP", "BPH", "NBH", "IND", "NEL", "SSA", "ESA",
    "HTS", "HTJ", "VTS", "PLD", "PLU", "RI",  "SS2", "SS3",
    "DCS", "PU1", "PU2", "STS", "CCH", "MW",  "SPA", "EPA",
    "SOS", "SGC", "SCI", "CSI", "ST",  "OSC", "PM",  "APC",
];

#[must_use]
pub fn symbolify(unit: &CharacterUnit, family: EncodingFamily) -> String {
    if !unit.valid {
        return "�".to_string();
    }
    match family {
        EncodingFamily::Utf8
        | EncodingFamily::Utf16 { .. }
        | EncodingFamily::Utf32 { .. } => unicode(unit),
        EncodingFamily::SingleByte { codepage } => byte(unit, codepage),
        EncodingFamily::Ascii => ascii(unit),
        EncodingFamily::Binary => binary(unit),
    }
}

fn unicode(unit: &CharacterUnit) -> String {
    if !unit.assigned {
        return "n/a".to_string();
    }
    let Some(scalar) = unit.scalar else {
        return "�".to_string();
    };
    let ord = u32::from(scalar);

    if unit.is_delete() {
        CONTROL_DELETE_SYMBOL.to_string()
    } else if unit.is_c0() {
        control_picture(ord)
    } else if unit.is_c1() {
        c1_name(ord)
    } else if unit.blank {
        format!("]{scalar}[")
    } else if (0xE0021..0xE007F).contains(&ord) {
        // Tag characters mirror printable ASCII in the E00xx plane.
        match char::from_u32(ord - 0xE0000) {
            Some(payload) => format!("TAG {payload}"),
            None => scalar.to_string(),
        }
    } else {
        interesting_codepoint(ord).unwrap_or_else(|| scalar.to_string())
    }
}

fn byte(unit: &CharacterUnit, codepage: Codepage) -> String {
    if !unit.assigned {
        return "n/a".to_string();
    }
    let raw = unit.bytes[0];

    if raw == 0x7F {
        CONTROL_DELETE_SYMBOL.to_string()
    } else if raw < 0x20 {
        codepage
            .mac_key_symbol(raw)
            .map_or_else(|| control_picture(u32::from(raw)), str::to_string)
    } else if (0x80..0xA0).contains(&raw) && codepage.has_c1() {
        c1_name(u32::from(raw))
    } else if unit.blank {
        match unit.scalar {
            Some(scalar) => format!("]{scalar}["),
            None => "] [".to_string(),
        }
    } else if let Some(name) = codepage.interesting_byte(raw) {
        name.to_string()
    } else {
        match unit.scalar {
            Some(scalar) => scalar.to_string(),
            None => escaped_byte(raw),
        }
    }
}

fn ascii(unit: &CharacterUnit) -> String {
    let Some(scalar) = unit.scalar else {
        return "�".to_string();
    };
    if unit.is_delete() {
        CONTROL_DELETE_SYMBOL.to_string()
    } else if unit.is_c0() {
        control_picture(u32::from(scalar))
    } else if unit.blank {
        format!("]{scalar}[")
    } else {
        scalar.to_string()
    }
}

/// The binary family has no path to a universal display form, so every byte
/// renders as a quoted literal.
fn binary(unit: &CharacterUnit) -> String {
    let raw = unit.bytes[0];
    if (0x20..0x7F).contains(&raw) {
        format!("\"{}\"", char::from(raw))
    } else {
        escaped_byte(raw)
    }
}

fn escaped_byte(raw: u8) -> String { format!("\"\\x{raw:02X}\"") }

fn control_picture(ord: u32) -> String {
    char::from_u32(CONTROL_PICTURES_BASE + ord)
        .map_or_else(|| "�".to_string(), |picture| picture.to_string())
}

fn c1_name(ord: u32) -> String { CONTROL_C1_NAMES[(ord - 0x80) as usize].to_string() }

/// Invisible-but-meaningful codepoints that deserve a mnemonic instead of
/// rendering as nothing: Mongolian free variation selectors, bidi controls,
/// variation selectors, and the tag-plane specials.
fn interesting_codepoint(ord: u32) -> Option<String> {
    let name = match ord {
        0x180B => "FVS1",
        0x180C => "FVS2",
        0x180D => "FVS3",
        0x200E => "LRM",
        0x200F => "RLM",
        0x202A => "LRE",
        0x202B => "RLE",
        0x202C => "PDF",
        0x202D => "LRO",
        0x202E => "RLO",
        0x2066 => "LRI",
        0x2067 => "RLI",
        0x2068 => "FSI",
        0x2069 => "PDI",
        0xE0001 => "LANG TAG",
        0xE0020 => "TAG ␠",
        0xE007F => "TAG ␡",
        0xFE00..=0xFE0F => return Some(format!("VS{}", ord - 0xFE00 + 1)),
        0xE0100..=0xE01EF => return Some(format!("VS{}", ord - 0xE0100 + 17)),
        _ => return None,
    };
    Some(name.to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::symbolify;
    use crate::char_info::{ByteSpan, CharacterUnit};
    use crate::codepages::Codepage;
    use crate::defect::DefectKind;
    use crate::encoding::EncodingFamily;

    fn unicode_unit(scalar: char) -> CharacterUnit {
        let mut buf = [0u8; 4];
        let encoded = scalar.encode_utf8(&mut buf);
        CharacterUnit::unicode(scalar, ByteSpan::from_slice(encoded.as_bytes()))
    }

    #[test]
    fn malformed_renders_replacement() {
        let unit = CharacterUnit::malformed(
            ByteSpan::from_slice(&[0x80]),
            DefectKind::UnexpectedContinuation,
        );
        assert_eq!(symbolify(&unit, EncodingFamily::Utf8), "�");
    }

    #[test_case('A', "A")]
    #[test_case('ℜ', "ℜ")]
    #[test_case('\u{0}', "␀")]
    #[test_case('\u{1B}', "␛")]
    #[test_case('\u{7F}', "␡")]
    #[test_case('\u{85}', "NEL")]
    #[test_case(' ', "] [")]
    #[test_case('\u{A0}', "]\u{A0}[")]
    #[test_case('\u{200E}', "LRM")]
    #[test_case('\u{FE00}', "VS1")]
    #[test_case('\u{FE0F}', "VS16")]
    #[test_case('\u{E0100}', "VS17")]
    #[test_case('\u{E01EF}', "VS256")]
    #[test_case('\u{E0001}', "LANG TAG")]
    #[test_case('\u{E0041}', "TAG A")]
    #[test_case('\u{E007E}', "TAG ~")]
    #[test_case('\u{E0020}', "TAG ␠")]
    #[test_case('\u{E007F}', "TAG ␡")]
    fn unicode_glyphs(scalar: char, expected: &str) {
        let unit = unicode_unit(scalar);
        assert_eq!(symbolify(&unit, EncodingFamily::Utf8), expected);
    }

    #[test]
    fn unicode_unassigned() {
        let unit = unicode_unit('\u{378}');
        assert_eq!(symbolify(&unit, EncodingFamily::Utf8), "n/a");
    }

    #[test]
    fn legacy_c1_and_unassigned() {
        let family = EncodingFamily::SingleByte {
            codepage: Codepage::Iso8859_1,
        };
        let unit = CharacterUnit::single_byte(0x85, Codepage::Iso8859_1);
        assert_eq!(symbolify(&unit, family), "NEL");

        let family = EncodingFamily::SingleByte {
            codepage: Codepage::Windows1252,
        };
        let unit = CharacterUnit::single_byte(0x81, Codepage::Windows1252);
        assert_eq!(symbolify(&unit, family), "n/a");
    }

    #[test]
    fn legacy_nbsp_brackets() {
        let family = EncodingFamily::SingleByte {
            codepage: Codepage::Iso8859_15,
        };
        let unit = CharacterUnit::single_byte(0xA0, Codepage::Iso8859_15);
        assert_eq!(symbolify(&unit, family), "]\u{A0}[");
    }

    #[test]
    fn legacy_interesting_bytes() {
        let family = EncodingFamily::SingleByte {
            codepage: Codepage::MacRoman,
        };
        let unit = CharacterUnit::single_byte(0xF0, Codepage::MacRoman);
        assert_eq!(symbolify(&unit, family), "Logo");

        let unit = CharacterUnit::single_byte(0x11, Codepage::MacRoman);
        assert_eq!(symbolify(&unit, family), "⌘");
    }

    #[test]
    fn ascii_glyphs() {
        assert_eq!(
            symbolify(&CharacterUnit::ascii(b'C'), EncodingFamily::Ascii),
            "C"
        );
        assert_eq!(
            symbolify(&CharacterUnit::ascii(0x09), EncodingFamily::Ascii),
            "␉"
        );
        assert_eq!(
            symbolify(&CharacterUnit::ascii(0x80), EncodingFamily::Ascii),
            "�"
        );
    }

    #[test]
    fn binary_escapes() {
        assert_eq!(
            symbolify(&CharacterUnit::binary(0xE2), EncodingFamily::Binary),
            "\"\\xE2\""
        );
        assert_eq!(
            symbolify(&CharacterUnit::binary(b'C'), EncodingFamily::Binary),
            "\"C\""
        );
    }
}
