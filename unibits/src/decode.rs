// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Splits the raw byte stream into an ordered list of [`CharacterUnit`]s for
//! one encoding family. Well-formed spans decode into classified scalars;
//! malformed bytes become single-byte units labeled by the defect analyzer,
//! whose backpatches are applied to the unit list as runs resolve. The pass
//! is strictly left-to-right; units are never reordered.

use crate::char_info::{ByteSpan, CharacterUnit};
use crate::codepages::Codepage;
use crate::defect::{self, Utf8DefectMachine, is_continuation};
use crate::encoding::{Endian, EncodingFamily};

/// Decode the whole input into units for the declared family.
#[must_use]
pub fn decode(bytes: &[u8], family: EncodingFamily) -> Vec<CharacterUnit> {
    match family {
        EncodingFamily::Utf8 => decode_utf8(bytes),
        EncodingFamily::Utf16 { endian } => decode_utf16(bytes, endian),
        EncodingFamily::Utf32 { endian } => decode_utf32(bytes, endian),
        EncodingFamily::SingleByte { codepage } => decode_single_byte(bytes, codepage),
        EncodingFamily::Ascii => {
            bytes.iter().map(|byte| CharacterUnit::ascii(*byte)).collect()
        }
        EncodingFamily::Binary => {
            bytes.iter().map(|byte| CharacterUnit::binary(*byte)).collect()
        }
    }
}

/// Expected total length of a UTF-8 sequence, from its leading byte pattern.
/// Returns `None` for bytes that cannot lead a well-formed sequence.
fn utf8_sequence_width(leading: u8) -> Option<usize> {
    match leading {
        0x00..=0x7F => Some(1),
        0xC0..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF7 => Some(4),
        _ => None,
    }
}

/// Decode one well-formed scalar at the start of `bytes`, or `None` if the
/// span there is not strict UTF-8 (overlong, surrogate, out of range, or
/// truncated spans all fail here and fall to the defect machine).
fn decode_one_utf8(bytes: &[u8]) -> Option<(char, usize)> {
    let width = utf8_sequence_width(bytes[0])?;
    let span = bytes.get(..width)?;
    let decoded = std::str::from_utf8(span).ok()?;
    decoded.chars().next().map(|scalar| (scalar, width))
}

fn decode_utf8(bytes: &[u8]) -> Vec<CharacterUnit> {
    let mut units: Vec<CharacterUnit> = Vec::new();
    let mut machine = Utf8DefectMachine::default();
    let mut cursor = 0;

    while cursor < bytes.len() {
        let byte = bytes[cursor];

        // While a run is open, continuation bytes extend it even where a
        // fresh decode would succeed (10xxxxxx can never lead a sequence).
        if machine.expects_continuation() && is_continuation(byte) {
            push_malformed(&mut units, &mut machine, byte);
            cursor += 1;
            continue;
        }
        machine.interrupt();

        if let Some((scalar, width)) = decode_one_utf8(&bytes[cursor..]) {
            let span = ByteSpan::from_slice(&bytes[cursor..cursor + width]);
            units.push(CharacterUnit::unicode(scalar, span));
            cursor += width;
            continue;
        }

        push_malformed(&mut units, &mut machine, byte);
        cursor += 1;
    }
    units
}

/// Feed one defective byte to the machine, emit its unit, and apply any
/// backpatch the feed resolved.
fn push_malformed(
    units: &mut Vec<CharacterUnit>,
    machine: &mut Utf8DefectMachine,
    byte: u8,
) {
    let feed = machine.feed(units.len(), byte);
    units.push(CharacterUnit::malformed(
        ByteSpan::from_slice(&[byte]),
        feed.label,
    ));
    for member in feed.backpatch {
        units[member].defect = Some(feed.label);
    }
}

fn read_u16(bytes: &[u8], endian: Endian) -> u16 {
    match endian {
        Endian::Little => u16::from_le_bytes([bytes[0], bytes[1]]),
        Endian::Big => u16::from_be_bytes([bytes[0], bytes[1]]),
    }
}

fn is_high_surrogate(unit: u16) -> bool { (0xD800..=0xDBFF).contains(&unit) }

fn is_low_surrogate(unit: u16) -> bool { (0xDC00..=0xDFFF).contains(&unit) }

fn decode_utf16(bytes: &[u8], endian: Endian) -> Vec<CharacterUnit> {
    let mut units: Vec<CharacterUnit> = Vec::new();
    let mut cursor = 0;

    while cursor < bytes.len() {
        let remaining = &bytes[cursor..];
        if remaining.len() < 2 {
            // Odd trailing byte.
            units.push(CharacterUnit::malformed(
                ByteSpan::from_slice(remaining),
                defect::classify_utf16(remaining, endian),
            ));
            break;
        }

        let code_unit = read_u16(remaining, endian);
        if is_high_surrogate(code_unit) && remaining.len() >= 4 {
            let next = read_u16(&remaining[2..], endian);
            if is_low_surrogate(next) {
                let scalar_value = 0x10000
                    + (u32::from(code_unit - 0xD800) << 10)
                    + u32::from(next - 0xDC00);
                if let Some(scalar) = char::from_u32(scalar_value) {
                    let span = ByteSpan::from_slice(&remaining[..4]);
                    units.push(CharacterUnit::unicode(scalar, span));
                    cursor += 4;
                    continue;
                }
            }
        }

        match char::from_u32(u32::from(code_unit)) {
            Some(scalar) => {
                let span = ByteSpan::from_slice(&remaining[..2]);
                units.push(CharacterUnit::unicode(scalar, span));
            }
            None => {
                // An unpaired surrogate half.
                let span = &remaining[..2];
                units.push(CharacterUnit::malformed(
                    ByteSpan::from_slice(span),
                    defect::classify_utf16(span, endian),
                ));
            }
        }
        cursor += 2;
    }
    units
}

fn decode_utf32(bytes: &[u8], endian: Endian) -> Vec<CharacterUnit> {
    let mut units: Vec<CharacterUnit> = Vec::new();
    let mut cursor = 0;

    while cursor < bytes.len() {
        let remaining = &bytes[cursor..];
        if remaining.len() < 4 {
            units.push(CharacterUnit::malformed(
                ByteSpan::from_slice(remaining),
                defect::classify_utf32(remaining, endian),
            ));
            break;
        }

        let span = &remaining[..4];
        let value = match endian {
            Endian::Little => u32::from_le_bytes([span[0], span[1], span[2], span[3]]),
            Endian::Big => u32::from_be_bytes([span[0], span[1], span[2], span[3]]),
        };
        match char::from_u32(value) {
            Some(scalar) => {
                units.push(CharacterUnit::unicode(scalar, ByteSpan::from_slice(span)));
            }
            None => {
                units.push(CharacterUnit::malformed(
                    ByteSpan::from_slice(span),
                    defect::classify_utf32(span, endian),
                ));
            }
        }
        cursor += 4;
    }
    units
}

fn decode_single_byte(bytes: &[u8], codepage: Codepage) -> Vec<CharacterUnit> {
    bytes
        .iter()
        .map(|byte| CharacterUnit::single_byte(*byte, codepage))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::decode;
    use crate::defect::DefectKind;
    use crate::encoding::{Endian, EncodingFamily};

    const UTF16LE: EncodingFamily = EncodingFamily::Utf16 {
        endian: Endian::Little,
    };
    const UTF32LE: EncodingFamily = EncodingFamily::Utf32 {
        endian: Endian::Little,
    };

    fn defects(bytes: &[u8], family: EncodingFamily) -> Vec<Option<DefectKind>> {
        decode(bytes, family).iter().map(|unit| unit.defect).collect()
    }

    #[test]
    fn utf8_well_formed_units_keep_their_spans() {
        let units = decode("aℜ🌫".as_bytes(), EncodingFamily::Utf8);
        assert_eq!(units.len(), 3);
        assert_eq!(units[0].bytes.as_slice(), b"a");
        assert_eq!(units[1].bytes.as_slice(), &[0xE2, 0x84, 0x9C]);
        assert_eq!(units[2].bytes.as_slice(), &[0xF0, 0x9F, 0x8C, 0xAB]);
        assert_eq!(units[2].ord(), Some(0x1F32B));
    }

    #[test]
    fn utf8_stray_continuation_between_letters() {
        let units = decode(b"abc\x80efg", EncodingFamily::Utf8);
        assert_eq!(units.len(), 7);
        assert_eq!(units[3].defect, Some(DefectKind::UnexpectedContinuation));
        assert!(units[4].valid);
        assert_eq!(units[4].scalar, Some('e'));
    }

    #[test]
    fn utf8_truncated_run_resumes_ascii() {
        let units = decode(b"\xF0\x9F\x8CABC", EncodingFamily::Utf8);
        assert_eq!(units.len(), 6);
        for unit in &units[0..3] {
            assert_eq!(unit.defect, Some(DefectKind::NotEnoughContinuation));
        }
        assert_eq!(units[3].scalar, Some('A'));
    }

    #[test]
    fn utf8_overlong_backpatches_all_members() {
        let units = decode(b"\xE0\x81\x81ABC", EncodingFamily::Utf8);
        for unit in &units[0..3] {
            assert_eq!(unit.defect, Some(DefectKind::Overlong));
        }
        assert!(units[3].valid);
    }

    #[test]
    fn utf8_surrogate_span() {
        let units = decode(b"\xED\xA0\x80ABC", EncodingFamily::Utf8);
        for unit in &units[0..3] {
            assert_eq!(unit.defect, Some(DefectKind::Surrogate));
        }
    }

    #[test]
    fn utf8_too_large_span() {
        let units = decode(b"\xF5\x8F\xBF\xBFABC", EncodingFamily::Utf8);
        for unit in &units[0..4] {
            assert_eq!(unit.defect, Some(DefectKind::TooLarge));
        }
    }

    #[test]
    fn utf16_surrogate_pair_is_one_unit() {
        // 🌫 is D83C DF2B.
        let units = decode(b"\x3C\xD8\x2B\xDF", UTF16LE);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].ord(), Some(0x1F32B));
        assert_eq!(units[0].bytes.len(), 4);
    }

    #[test]
    fn utf16_lone_high_surrogate() {
        let units = decode(b"\x3C\xD8\x2B\x61", UTF16LE);
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].defect, Some(DefectKind::HalfSurrogate));
        assert_eq!(units[1].ord(), Some(0x612B));
    }

    #[test]
    fn utf16_odd_trailing_byte() {
        assert_eq!(
            defects(b"\x61", UTF16LE),
            vec![Some(DefectKind::Incomplete)]
        );
    }

    #[test]
    fn utf32_units_and_incomplete_tail() {
        let units = decode(b"\x1C\x21\x00\x00\x2B\xF3", UTF32LE);
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].ord(), Some(0x211C));
        assert_eq!(units[1].defect, Some(DefectKind::Incomplete));
        assert_eq!(units[1].bytes.len(), 2);
    }

    #[test]
    fn utf32_surrogate_and_too_large() {
        assert_eq!(
            defects(b"\x00\xD8\x00\x00\x00\x00\x11\x00", UTF32LE),
            vec![Some(DefectKind::Surrogate), Some(DefectKind::TooLarge)]
        );
    }

    #[test]
    fn byte_order_round_trip() {
        let units = decode("é".as_bytes(), EncodingFamily::Utf8);
        let collected: Vec<u8> = units
            .iter()
            .flat_map(|unit| unit.bytes.iter().copied())
            .collect();
        assert_eq!(collected, "é".as_bytes());
    }
}
