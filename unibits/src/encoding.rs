// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Encoding name resolution: maps a declared encoding name to an
//! [`EncodingFamily`] or fails with one of the fatal errors in
//! [`UnibitsError`]. Family selection is a pure, total function over a fixed
//! name table and happens before any unit is produced, so no partial output
//! can exist for a rejected name.

use miette::Diagnostic;
use thiserror::Error;

use crate::codepages::Codepage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingFamily {
    Utf8,
    Utf16 { endian: Endian },
    Utf32 { endian: Endian },
    SingleByte { codepage: Codepage },
    Ascii,
    Binary,
}

#[derive(Debug, Error, Diagnostic)]
pub enum UnibitsError {
    #[error("no data given to unibits")]
    #[diagnostic(code(unibits::empty_input))]
    EmptyInput,

    #[error("unibits only supports {name} with specified endianness")]
    #[diagnostic(
        code(unibits::ambiguous_endianness),
        help("please use {name}LE or {name}BE")
    )]
    AmbiguousEndianness { name: String },

    #[error("unibits does not support strings of encoding {name}")]
    #[diagnostic(
        code(unibits::unsupported_encoding),
        help("supported encodings: {supported}")
    )]
    UnsupportedEncoding { name: String, supported: String },
}

impl EncodingFamily {
    /// Resolve a declared encoding name.
    ///
    /// # Errors
    ///
    /// - [`UnibitsError::AmbiguousEndianness`] for bare `UTF-16` / `UTF-32`.
    /// - [`UnibitsError::UnsupportedEncoding`] for any unrecognized name.
    pub fn resolve(name: &str) -> Result<EncodingFamily, UnibitsError> {
        let normalized = name.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "UTF-8" | "UTF8" => Ok(EncodingFamily::Utf8),
            "UTF-16LE" | "UTF16LE" => Ok(EncodingFamily::Utf16 {
                endian: Endian::Little,
            }),
            "UTF-16BE" | "UTF16BE" => Ok(EncodingFamily::Utf16 { endian: Endian::Big }),
            "UTF-32LE" | "UTF32LE" => Ok(EncodingFamily::Utf32 {
                endian: Endian::Little,
            }),
            "UTF-32BE" | "UTF32BE" => Ok(EncodingFamily::Utf32 { endian: Endian::Big }),
            "US-ASCII" | "ASCII" => Ok(EncodingFamily::Ascii),
            "ASCII-8BIT" | "BINARY" => Ok(EncodingFamily::Binary),
            "UTF-16" | "UTF16" => Err(UnibitsError::AmbiguousEndianness {
                name: "UTF-16".to_string(),
            }),
            "UTF-32" | "UTF32" => Err(UnibitsError::AmbiguousEndianness {
                name: "UTF-32".to_string(),
            }),
            _ => match Codepage::resolve(name.trim()) {
                Some(codepage) => Ok(EncodingFamily::SingleByte { codepage }),
                None => Err(UnibitsError::UnsupportedEncoding {
                    name: name.to_string(),
                    supported: EncodingFamily::supported_names(),
                }),
            },
        }
    }

    /// Canonical name of this family, shown in the stats line.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            EncodingFamily::Utf8 => "UTF-8",
            EncodingFamily::Utf16 {
                endian: Endian::Little,
            } => "UTF-16LE",
            EncodingFamily::Utf16 { endian: Endian::Big } => "UTF-16BE",
            EncodingFamily::Utf32 {
                endian: Endian::Little,
            } => "UTF-32LE",
            EncodingFamily::Utf32 { endian: Endian::Big } => "UTF-32BE",
            EncodingFamily::SingleByte { codepage } => codepage.name(),
            EncodingFamily::Ascii => "US-ASCII",
            EncodingFamily::Binary => "ASCII-8BIT",
        }
    }

    /// Unicode families get the codepoint label row; the byte-oriented
    /// families render without it.
    #[must_use]
    pub fn is_unicode(&self) -> bool {
        matches!(
            self,
            EncodingFamily::Utf8
                | EncodingFamily::Utf16 { .. }
                | EncodingFamily::Utf32 { .. }
        )
    }

    /// Every supported encoding name, for the CLI listing and the
    /// unsupported-name error.
    #[must_use]
    pub fn supported_names() -> String {
        use strum::IntoEnumIterator;
        let mut names: Vec<&'static str> = vec![
            "UTF-8", "UTF-16LE", "UTF-16BE", "UTF-32LE", "UTF-32BE", "US-ASCII",
            "ASCII-8BIT",
        ];
        names.extend(Codepage::iter().map(Codepage::name));
        names.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::{Endian, EncodingFamily, UnibitsError};
    use crate::codepages::Codepage;

    #[test_case("UTF-8", EncodingFamily::Utf8; "utf8 uppercase")]
    #[test_case("utf-8", EncodingFamily::Utf8; "utf8 lowercase")]
    #[test_case("UTF-16LE", EncodingFamily::Utf16 { endian: Endian::Little })]
    #[test_case("UTF-32BE", EncodingFamily::Utf32 { endian: Endian::Big })]
    #[test_case("US-ASCII", EncodingFamily::Ascii)]
    #[test_case("ASCII-8BIT", EncodingFamily::Binary)]
    #[test_case("binary", EncodingFamily::Binary)]
    fn resolves_supported_names(name: &str, expected: EncodingFamily) {
        assert_eq!(EncodingFamily::resolve(name).unwrap(), expected);
    }

    #[test]
    fn resolves_legacy_codepages() {
        assert_eq!(
            EncodingFamily::resolve("Windows-1256").unwrap(),
            EncodingFamily::SingleByte {
                codepage: Codepage::Windows1256
            }
        );
    }

    #[test]
    fn rejects_bare_utf16() {
        let err = EncodingFamily::resolve("UTF-16").unwrap_err();
        assert!(matches!(
            err,
            UnibitsError::AmbiguousEndianness { ref name } if name == "UTF-16"
        ));
        assert_eq!(
            err.to_string(),
            "unibits only supports UTF-16 with specified endianness"
        );
    }

    #[test]
    fn rejects_bare_utf32() {
        assert!(matches!(
            EncodingFamily::resolve("utf-32"),
            Err(UnibitsError::AmbiguousEndianness { .. })
        ));
    }

    #[test]
    fn rejects_unknown_names() {
        let err = EncodingFamily::resolve("EBCDIC").unwrap_err();
        assert!(matches!(
            err,
            UnibitsError::UnsupportedEncoding { ref name, .. } if name == "EBCDIC"
        ));
    }

    #[test]
    fn supported_listing_contains_all_families() {
        let listing = EncodingFamily::supported_names();
        assert!(listing.contains("UTF-32LE"));
        assert!(listing.contains("KOI8-R"));
        assert!(listing.contains("TIS-620"));
    }
}
