// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Per-character classification. One decoded element of the input becomes a
//! [`CharacterUnit`]: its raw byte span, validity, optional scalar, and the
//! category flags the renderer and color assigner dispatch on. Classification
//! is a closed dispatch over [`EncodingFamily`]; each family has exactly one
//! constructor here.

use smallvec::SmallVec;
use unicode_general_category::{GeneralCategory, get_general_category};

use crate::codepages::Codepage;
use crate::defect::DefectKind;

/// Raw byte span of one unit. At most 4 bytes for every supported family, so
/// the span lives inline.
pub type ByteSpan = SmallVec<[u8; 4]>;

/// Invisible separators treated as blank beyond the White_Space property:
/// Mongolian vowel separator, zero-width space/non-joiner/joiner, word
/// joiner, and the BOM.
const EXTRA_BLANK_SCALARS: [char; 6] =
    ['\u{180E}', '\u{200B}', '\u{200C}', '\u{200D}', '\u{2060}', '\u{FEFF}'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterUnit {
    pub bytes: ByteSpan,
    pub scalar: Option<char>,
    pub valid: bool,
    pub assigned: bool,
    pub control: bool,
    pub blank: bool,
    pub format: bool,
    pub mark: bool,
    pub defect: Option<DefectKind>,
}

impl CharacterUnit {
    /// A well-formed scalar decoded from one of the Unicode families. The
    /// category flags come from the Unicode database provider.
    #[must_use]
    pub fn unicode(scalar: char, bytes: ByteSpan) -> CharacterUnit {
        let category = get_general_category(scalar);
        CharacterUnit {
            bytes,
            scalar: Some(scalar),
            valid: true,
            assigned: category != GeneralCategory::Unassigned,
            control: category == GeneralCategory::Control,
            blank: scalar.is_whitespace() || EXTRA_BLANK_SCALARS.contains(&scalar),
            format: category == GeneralCategory::Format,
            mark: matches!(
                category,
                GeneralCategory::NonspacingMark
                    | GeneralCategory::SpacingMark
                    | GeneralCategory::EnclosingMark
            ),
            defect: None,
        }
    }

    /// A malformed span from one of the multi-byte families, labeled by the
    /// defect analyzer. The label may be rewritten later by backpatching.
    #[must_use]
    pub fn malformed(bytes: ByteSpan, defect: DefectKind) -> CharacterUnit {
        CharacterUnit {
            bytes,
            scalar: None,
            valid: false,
            assigned: false,
            control: false,
            blank: false,
            format: false,
            mark: false,
            defect: Some(defect),
        }
    }

    /// A byte under a single-byte legacy codepage. Single-byte encodings
    /// accept every byte value, so validity is always true; the category
    /// flags come from the per-codepage exception tables.
    #[must_use]
    pub fn single_byte(byte: u8, codepage: Codepage) -> CharacterUnit {
        let c0 = byte < 0x20;
        let c1 = (0x80..0xA0).contains(&byte) && codepage.has_c1();
        let delete = byte == 0x7F;
        let control = c0 || c1 || delete;
        CharacterUnit {
            bytes: ByteSpan::from_slice(&[byte]),
            scalar: codepage.decode_byte(byte),
            valid: true,
            assigned: control || !codepage.is_unassigned(byte),
            control,
            blank: byte == 0x20 || codepage.is_extra_blank(byte),
            format: false,
            mark: false,
            defect: None,
        }
    }

    /// A 7-bit ASCII byte; the high bit set makes it invalid.
    #[must_use]
    pub fn ascii(byte: u8) -> CharacterUnit {
        let valid = byte < 0x80;
        CharacterUnit {
            bytes: ByteSpan::from_slice(&[byte]),
            scalar: valid.then(|| char::from(byte)),
            valid,
            assigned: valid,
            control: valid && (byte < 0x20 || byte == 0x7F),
            blank: byte == 0x20,
            format: false,
            mark: false,
            defect: (!valid).then_some(DefectKind::Invalid),
        }
    }

    /// A raw binary byte: always valid, always assigned.
    #[must_use]
    pub fn binary(byte: u8) -> CharacterUnit {
        CharacterUnit {
            bytes: ByteSpan::from_slice(&[byte]),
            scalar: (byte < 0x80).then(|| char::from(byte)),
            valid: true,
            assigned: true,
            control: byte < 0x20 || byte == 0x7F,
            blank: byte == 0x20,
            format: false,
            mark: false,
            defect: None,
        }
    }

    /// Scalar value, when one was decoded.
    #[must_use]
    pub fn ord(&self) -> Option<u32> { self.scalar.map(u32::from) }

    #[must_use]
    pub fn is_c0(&self) -> bool { self.ord().is_some_and(|ord| ord < 0x20) }

    #[must_use]
    pub fn is_c1(&self) -> bool {
        self.ord().is_some_and(|ord| (0x80..0xA0).contains(&ord))
    }

    #[must_use]
    pub fn is_delete(&self) -> bool { self.ord() == Some(0x7F) }
}
