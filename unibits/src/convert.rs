// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Re-encoding for the `--convert` option. Decoding and legacy-codepage
//! encoding are delegated to the conversion provider; the Unicode families
//! encode through std. Unmappable characters are replaced, never reported:
//! the conversion input is assumed well-formed.

use crate::codepages::Codepage;
use crate::encoding::{Endian, EncodingFamily};

/// Re-encode `bytes` from the `from` family into the `to` family.
#[must_use]
pub fn convert(bytes: &[u8], from: EncodingFamily, to: EncodingFamily) -> Vec<u8> {
    encode(&decode_lossy(bytes, from), to)
}

fn decode_lossy(bytes: &[u8], family: EncodingFamily) -> String {
    match family {
        EncodingFamily::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        EncodingFamily::Utf16 { endian } => {
            let mut code_units: Vec<u16> = Vec::with_capacity(bytes.len() / 2);
            for pair in bytes.chunks(2) {
                match (pair, endian) {
                    ([low, high], Endian::Little) => {
                        code_units.push(u16::from_le_bytes([*low, *high]));
                    }
                    ([high, low], Endian::Big) => {
                        code_units.push(u16::from_be_bytes([*high, *low]));
                    }
                    _ => code_units.push(0xFFFD),
                }
            }
            String::from_utf16_lossy(&code_units)
        }
        EncodingFamily::Utf32 { endian } => bytes
            .chunks(4)
            .map(|quad| match (quad, endian) {
                ([a, b, c, d], Endian::Little) => {
                    char::from_u32(u32::from_le_bytes([*a, *b, *c, *d]))
                        .unwrap_or(char::REPLACEMENT_CHARACTER)
                }
                ([a, b, c, d], Endian::Big) => {
                    char::from_u32(u32::from_be_bytes([*a, *b, *c, *d]))
                        .unwrap_or(char::REPLACEMENT_CHARACTER)
                }
                _ => char::REPLACEMENT_CHARACTER,
            })
            .collect(),
        EncodingFamily::SingleByte { codepage } => bytes
            .iter()
            .map(|byte| {
                codepage
                    .decode_byte(*byte)
                    .unwrap_or(char::REPLACEMENT_CHARACTER)
            })
            .collect(),
        EncodingFamily::Ascii => bytes
            .iter()
            .map(|byte| {
                if *byte < 0x80 {
                    char::from(*byte)
                } else {
                    char::REPLACEMENT_CHARACTER
                }
            })
            .collect(),
        // Raw binary reads as Latin-1 so every byte maps to a scalar.
        EncodingFamily::Binary => bytes.iter().map(|byte| char::from(*byte)).collect(),
    }
}

fn encode(text: &str, family: EncodingFamily) -> Vec<u8> {
    match family {
        EncodingFamily::Utf8 => text.as_bytes().to_vec(),
        EncodingFamily::Utf16 { endian } => {
            let mut acc: Vec<u8> = Vec::with_capacity(text.len() * 2);
            for code_unit in text.encode_utf16() {
                let pair = match endian {
                    Endian::Little => code_unit.to_le_bytes(),
                    Endian::Big => code_unit.to_be_bytes(),
                };
                acc.extend_from_slice(&pair);
            }
            acc
        }
        EncodingFamily::Utf32 { endian } => {
            let mut acc: Vec<u8> = Vec::with_capacity(text.len() * 4);
            for scalar in text.chars() {
                let quad = match endian {
                    Endian::Little => u32::from(scalar).to_le_bytes(),
                    Endian::Big => u32::from(scalar).to_be_bytes(),
                };
                acc.extend_from_slice(&quad);
            }
            acc
        }
        EncodingFamily::SingleByte { codepage } => text
            .chars()
            .map(|scalar| encode_single_byte(scalar, codepage))
            .collect(),
        EncodingFamily::Ascii => text
            .chars()
            .map(|scalar| {
                let ord = u32::from(scalar);
                if ord < 0x80 { ord as u8 } else { b'?' }
            })
            .collect(),
        EncodingFamily::Binary => text.as_bytes().to_vec(),
    }
}

fn encode_single_byte(scalar: char, codepage: Codepage) -> u8 {
    codepage.encode_char(scalar).unwrap_or(b'?')
}
