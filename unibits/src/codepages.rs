// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Single-byte legacy codepage identifiers and their per-codepage exception
//! tables: which codepages carry C1 controls, which byte positions are
//! unassigned, which positions are extra blanks, and which bytes get a
//! special display name. The tables are plain data keyed by [`Codepage`],
//! never by name pattern matching.
//!
//! The supported set is scoped to what the conversion provider
//! ([`encoding_rs`]) ships, plus ISO-8859-1 decoded as the identity mapping
//! (the provider follows the WHATWG alias of latin1 to windows-1252, which
//! would misreport the C1 range this tool exists to diagnose).

use strum_macros::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Codepage {
    Iso8859_1,
    Iso8859_2,
    Iso8859_3,
    Iso8859_4,
    Iso8859_5,
    Iso8859_6,
    Iso8859_7,
    Iso8859_8,
    Iso8859_10,
    Iso8859_13,
    Iso8859_14,
    Iso8859_15,
    Iso8859_16,
    Windows1250,
    Windows1251,
    Windows1252,
    Windows1253,
    Windows1254,
    Windows1255,
    Windows1256,
    Windows1257,
    Windows1258,
    Koi8R,
    Koi8U,
    Ibm866,
    MacRoman,
    MacCyrillic,
    Tis620,
}

impl Codepage {
    /// Canonical name as accepted on the command line and shown in output.
    #[rustfmt::skip]
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Codepage::Iso8859_1   => "ISO-8859-1",
            Codepage::Iso8859_2   => "ISO-8859-2",
            Codepage::Iso8859_3   => "ISO-8859-3",
            Codepage::Iso8859_4   => "ISO-8859-4",
            Codepage::Iso8859_5   => "ISO-8859-5",
            Codepage::Iso8859_6   => "ISO-8859-6",
            Codepage::Iso8859_7   => "ISO-8859-7",
            Codepage::Iso8859_8   => "ISO-8859-8",
            Codepage::Iso8859_10  => "ISO-8859-10",
            Codepage::Iso8859_13  => "ISO-8859-13",
            Codepage::Iso8859_14  => "ISO-8859-14",
            Codepage::Iso8859_15  => "ISO-8859-15",
            Codepage::Iso8859_16  => "ISO-8859-16",
            Codepage::Windows1250 => "Windows-1250",
            Codepage::Windows1251 => "Windows-1251",
            Codepage::Windows1252 => "Windows-1252",
            Codepage::Windows1253 => "Windows-1253",
            Codepage::Windows1254 => "Windows-1254",
            Codepage::Windows1255 => "Windows-1255",
            Codepage::Windows1256 => "Windows-1256",
            Codepage::Windows1257 => "Windows-1257",
            Codepage::Windows1258 => "Windows-1258",
            Codepage::Koi8R       => "KOI8-R",
            Codepage::Koi8U       => "KOI8-U",
            Codepage::Ibm866      => "IBM866",
            Codepage::MacRoman    => "macRoman",
            Codepage::MacCyrillic => "macCyrillic",
            Codepage::Tis620      => "TIS-620",
        }
    }

    /// Case-insensitive lookup by canonical name.
    pub fn resolve(name: &str) -> Option<Codepage> {
        use strum::IntoEnumIterator;
        Codepage::iter().find(|codepage| codepage.name().eq_ignore_ascii_case(name))
    }

    /// The label understood by the conversion provider, or `None` for the
    /// identity-decoded ISO-8859-1.
    #[rustfmt::skip]
    #[must_use]
    pub fn provider_label(self) -> Option<&'static str> {
        match self {
            Codepage::Iso8859_1   => None,
            Codepage::Iso8859_2   => Some("ISO-8859-2"),
            Codepage::Iso8859_3   => Some("ISO-8859-3"),
            Codepage::Iso8859_4   => Some("ISO-8859-4"),
            Codepage::Iso8859_5   => Some("ISO-8859-5"),
            Codepage::Iso8859_6   => Some("ISO-8859-6"),
            Codepage::Iso8859_7   => Some("ISO-8859-7"),
            Codepage::Iso8859_8   => Some("ISO-8859-8"),
            Codepage::Iso8859_10  => Some("ISO-8859-10"),
            Codepage::Iso8859_13  => Some("ISO-8859-13"),
            Codepage::Iso8859_14  => Some("ISO-8859-14"),
            Codepage::Iso8859_15  => Some("ISO-8859-15"),
            Codepage::Iso8859_16  => Some("ISO-8859-16"),
            Codepage::Windows1250 => Some("windows-1250"),
            Codepage::Windows1251 => Some("windows-1251"),
            Codepage::Windows1252 => Some("windows-1252"),
            Codepage::Windows1253 => Some("windows-1253"),
            Codepage::Windows1254 => Some("windows-1254"),
            Codepage::Windows1255 => Some("windows-1255"),
            Codepage::Windows1256 => Some("windows-1256"),
            Codepage::Windows1257 => Some("windows-1257"),
            Codepage::Windows1258 => Some("windows-1258"),
            Codepage::Koi8R       => Some("KOI8-R"),
            Codepage::Koi8U       => Some("KOI8-U"),
            Codepage::Ibm866      => Some("IBM866"),
            Codepage::MacRoman    => Some("macintosh"),
            Codepage::MacCyrillic => Some("x-mac-cyrillic"),
            Codepage::Tis620      => Some("windows-874"),
        }
    }

    /// Only the ISO-8859 family keeps the 0x80-0x9F range as C1 controls.
    #[must_use]
    pub fn has_c1(self) -> bool {
        matches!(
            self,
            Codepage::Iso8859_1
                | Codepage::Iso8859_2
                | Codepage::Iso8859_3
                | Codepage::Iso8859_4
                | Codepage::Iso8859_5
                | Codepage::Iso8859_6
                | Codepage::Iso8859_7
                | Codepage::Iso8859_8
                | Codepage::Iso8859_10
                | Codepage::Iso8859_13
                | Codepage::Iso8859_14
                | Codepage::Iso8859_15
                | Codepage::Iso8859_16
        )
    }

    #[must_use]
    pub fn is_mac(self) -> bool {
        matches!(self, Codepage::MacRoman | Codepage::MacCyrillic)
    }

    fn is_iso8859(self) -> bool { self.has_c1() }

    fn is_windows125x(self) -> bool {
        matches!(
            self,
            Codepage::Windows1250
                | Codepage::Windows1251
                | Codepage::Windows1252
                | Codepage::Windows1253
                | Codepage::Windows1254
                | Codepage::Windows1255
                | Codepage::Windows1256
                | Codepage::Windows1257
                | Codepage::Windows1258
        )
    }

    /// Byte positions this codepage leaves unassigned. C1 positions listed
    /// here only matter for codepages without C1 controls; the classifier
    /// checks control status first.
    #[rustfmt::skip]
    #[must_use]
    pub fn unassigned_positions(self) -> &'static [u8] {
        match self {
            Codepage::Windows1250 => &[0x81, 0x83, 0x88, 0x90, 0x98],
            Codepage::Windows1251 => &[0x98],
            Codepage::Windows1252 => &[0x81, 0x8D, 0x8F, 0x90, 0x9B],
            Codepage::Windows1253 => &[0x81, 0x88, 0x8A, 0x8C, 0x8D, 0x8E, 0x8F, 0x90,
                                       0x98, 0x9A, 0x9C, 0x9D, 0x9E, 0x9F, 0xAA, 0xD2,
                                       0xFF],
            Codepage::Windows1254 => &[0x81, 0x8D, 0x8E, 0x8F, 0x90, 0x9D, 0x9E],
            Codepage::Windows1255 => &[0x81, 0x8A, 0x8C, 0x8D, 0x8E, 0x8F, 0x90, 0x9A,
                                       0x9C, 0x9D, 0x9E, 0x9F, 0xD9, 0xDA, 0xDB, 0xDC,
                                       0xDD, 0xDE, 0xDF, 0xFB, 0xFC, 0xFF],
            Codepage::Windows1257 => &[0x81, 0x83, 0x88, 0x8A, 0x8C, 0x90, 0x98, 0x9A,
                                       0x9C, 0x9F, 0xA1, 0xA5],
            Codepage::Windows1258 => &[0x81, 0x8A, 0x8D, 0x8E, 0x8F, 0x90, 0x9A, 0x9D,
                                       0x9E],
            _ => &[],
        }
    }

    #[must_use]
    pub fn is_unassigned(self, byte: u8) -> bool {
        self.unassigned_positions().contains(&byte)
    }

    /// Blank positions beyond the plain 0x20 space: NBSP at 0xA0 for the
    /// ISO-8859 and Windows-125x pages, plus two Windows-1256 positions.
    #[must_use]
    pub fn is_extra_blank(self, byte: u8) -> bool {
        match byte {
            0xA0 => self.is_iso8859() || self.is_windows125x(),
            0x9D | 0x9F => self == Codepage::Windows1256,
            _ => false,
        }
    }

    /// Display names for codepage-specific bytes that deserve a mnemonic
    /// instead of their glyph: the Apple logo and the bidi marks that some
    /// right-to-left codepages place in the high range.
    #[must_use]
    pub fn interesting_byte(self, byte: u8) -> Option<&'static str> {
        match (self, byte) {
            (Codepage::MacRoman, 0xF0) => Some("Logo"),
            (
                Codepage::Iso8859_8 | Codepage::Windows1255 | Codepage::Windows1256,
                0xFD,
            ) => Some("LRM"),
            (
                Codepage::Iso8859_8 | Codepage::Windows1255 | Codepage::Windows1256,
                0xFE,
            ) => Some("RLM"),
            _ => None,
        }
    }

    /// Mac codepages render the 0x11-0x14 control positions as the key
    /// symbols they historically carried.
    #[must_use]
    pub fn mac_key_symbol(self, byte: u8) -> Option<&'static str> {
        if !self.is_mac() {
            return None;
        }
        match byte {
            0x11 => Some("⌘"),
            0x12 => Some("⇧"),
            0x13 => Some("⌥"),
            0x14 => Some("⌃"),
            _ => None,
        }
    }

    /// Decode one byte to its scalar under this codepage via the conversion
    /// provider. Returns `None` for bytes the provider cannot map.
    #[must_use]
    pub fn decode_byte(self, byte: u8) -> Option<char> {
        let Some(label) = self.provider_label() else {
            // ISO-8859-1 is the identity mapping over 0x00-0xFF.
            return char::from_u32(u32::from(byte));
        };
        let encoding = encoding_rs::Encoding::for_label(label.as_bytes())?;
        let input = [byte];
        let (decoded, had_errors) = encoding.decode_without_bom_handling(&input);
        if had_errors {
            return None;
        }
        decoded.chars().next().filter(|ch| *ch != char::REPLACEMENT_CHARACTER)
    }

    /// Encode one scalar back to a byte under this codepage.
    #[must_use]
    pub fn encode_char(self, ch: char) -> Option<u8> {
        let Some(label) = self.provider_label() else {
            return u8::try_from(u32::from(ch)).ok();
        };
        let encoding = encoding_rs::Encoding::for_label(label.as_bytes())?;
        let mut buf = [0u8; 4];
        let (encoded, _, had_errors) = encoding.encode(ch.encode_utf8(&mut buf));
        if had_errors || encoded.len() != 1 {
            return None;
        }
        Some(encoded[0])
    }
}
