// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The one-line summary ahead of the render blocks: validity, encoding
//! name, byte count, codepoint count, grapheme-cluster count, and display
//! width. `wide_ambiguous` switches the width measurement to count
//! East-Asian-ambiguous characters as two columns.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

use crate::ansi_text::fg_bold;
use crate::char_info::CharacterUnit;
use crate::color::palette;
use crate::decode;
use crate::encoding::EncodingFamily;

#[must_use]
pub fn stats_line(bytes: &[u8], family: EncodingFamily, wide_ambiguous: bool) -> String {
    let units = decode::decode(bytes, family);
    let valid = units.iter().all(|unit| unit.valid);
    let display: String = units.iter().map(display_scalar).collect();
    let glyphs = display.graphemes(true).count();
    let columns: usize = display
        .chars()
        .map(|scalar| {
            if wide_ambiguous {
                scalar.width_cjk().unwrap_or(0)
            } else {
                scalar.width().unwrap_or(0)
            }
        })
        .sum();

    let flag = if valid {
        fg_bold("✓", palette::MARK)
    } else {
        fg_bold("✗", palette::INVALID)
    };
    format!(
        "{flag} {name} · {byte_count} bytes · {codepoints} codepoints · {glyphs} glyphs · {columns} columns",
        name = family.name(),
        byte_count = bytes.len(),
        codepoints = units.len(),
    )
}

/// Stand-in scalar for measuring: malformed spans measure like the
/// replacement character they render as.
fn display_scalar(unit: &CharacterUnit) -> char {
    unit.scalar.unwrap_or(char::REPLACEMENT_CHARACTER)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::stats_line;
    use crate::encoding::EncodingFamily;

    fn plain(text: &str) -> String { strip_ansi_escapes::strip_str(text) }

    #[test]
    fn counts_for_plain_ascii_text() {
        let line = plain(&stats_line(b"abc", EncodingFamily::Utf8, false));
        assert_eq!(line, "✓ UTF-8 · 3 bytes · 3 codepoints · 3 glyphs · 3 columns");
    }

    #[test]
    fn grapheme_clusters_differ_from_codepoints() {
        // "e" followed by a combining acute accent is one glyph.
        let line = plain(&stats_line("e\u{301}".as_bytes(), EncodingFamily::Utf8, false));
        assert!(line.contains("3 bytes"));
        assert!(line.contains("2 codepoints"));
        assert!(line.contains("1 glyphs"));
    }

    #[test]
    fn ambiguous_width_toggle() {
        // A die face (neutral) followed by six middle dots (ambiguous).
        let input = "⚀······".as_bytes();
        let narrow = plain(&stats_line(input, EncodingFamily::Utf8, false));
        let wide = plain(&stats_line(input, EncodingFamily::Utf8, true));
        assert!(narrow.contains("7 columns"), "narrow was: {narrow}");
        assert!(wide.contains("13 columns"), "wide was: {wide}");
        // Only the width field changes.
        assert!(narrow.contains("7 codepoints") && wide.contains("7 codepoints"));
    }

    #[test]
    fn invalid_input_flips_the_flag() {
        let line = plain(&stats_line(b"\x80", EncodingFamily::Utf8, false));
        assert!(line.starts_with('✗'));
    }
}
