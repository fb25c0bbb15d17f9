// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Malformed-sequence analysis for the multi-byte Unicode families.
//!
//! UTF-8 defects cannot always be named from a single byte: a defective
//! leading byte opens a [`DefectRun`] whose member bytes are provisionally
//! labeled "not enough continuation bytes", and only once the expected
//! number of continuation bytes has been observed can the true defect
//! (overlong, surrogate, too large) be determined. At that point every
//! provisional label belonging to the run is rewritten ("backpatching").
//! The rewrite happens on the unit list, before any row text is
//! materialized, so no rendered output is ever string-edited.
//!
//! UTF-16 and UTF-32 defects resolve within a single unit and need no run
//! state.

use std::fmt::{Display, Formatter, Result};

use crate::encoding::Endian;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefectKind {
    UnexpectedContinuation,
    NotEnoughContinuation,
    Overlong,
    TooLarge,
    Surrogate,
    HalfSurrogate,
    Incomplete,
    Invalid,
}

impl DefectKind {
    /// Fixed-width text rendered in the 10-column label cell.
    #[rustfmt::skip]
    #[must_use]
    pub fn cell_label(self) -> &'static str {
        match self {
            DefectKind::UnexpectedContinuation => "unexp.c.",
            DefectKind::NotEnoughContinuation  => "n.e.con.",
            DefectKind::Overlong               => "overlong",
            DefectKind::TooLarge               => "toolarge",
            DefectKind::Surrogate              => "sur.gate",
            DefectKind::HalfSurrogate          => "hlf.srg.",
            DefectKind::Incomplete             => "incompl.",
            DefectKind::Invalid                => "invalid",
        }
    }
}

impl Display for DefectKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let description = match self {
            DefectKind::UnexpectedContinuation => "unexpected continuation byte",
            DefectKind::NotEnoughContinuation => "not enough continuation bytes",
            DefectKind::Overlong => "overlong encoding",
            DefectKind::TooLarge => "codepoint too large",
            DefectKind::Surrogate => "surrogate codepoint",
            DefectKind::HalfSurrogate => "half surrogate",
            DefectKind::Incomplete => "incomplete byte sequence",
            DefectKind::Invalid => "invalid bytes",
        };
        write!(f, "{description}")
    }
}

/// Provisional judgement carried by an open run, refined as continuation
/// bytes arrive and collapsed into the final [`DefectKind`] when the run
/// completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum RunQualifier {
    /// No extra information yet; a completed run defaults to overlong.
    #[default]
    Unqualified,
    /// Leading byte 0xF4: the value is at the top of the scalar range, and
    /// the next payload bits decide whether it overflows it.
    LeadingAtMax,
    /// Leading byte 0xED: the value may land in the UTF-16 surrogate range.
    MaybeSurrogate,
    /// Certain: the value exceeds U+10FFFF.
    TooLarge,
    /// Certain: the value is a surrogate.
    Surrogate,
}

impl RunQualifier {
    /// Refine the qualifier with the continuation byte that carries the
    /// distinguishing payload bits, the first one after the leading byte.
    /// The two payload bits right after the `10` prefix decide: any nonzero
    /// value pushes a max-range lead over the scalar limit, and a set high
    /// bit pushes a 0xED lead into the surrogate range.
    fn refine(self, continuation: u8) -> RunQualifier {
        match self {
            RunQualifier::LeadingAtMax if continuation & 0b0011_0000 != 0 => {
                RunQualifier::TooLarge
            }
            RunQualifier::MaybeSurrogate if continuation & 0b0010_0000 != 0 => {
                RunQualifier::Surrogate
            }
            RunQualifier::LeadingAtMax | RunQualifier::MaybeSurrogate => {
                RunQualifier::Unqualified
            }
            other => other,
        }
    }

    fn into_final_label(self) -> DefectKind {
        match self {
            RunQualifier::TooLarge => DefectKind::TooLarge,
            RunQualifier::Surrogate => DefectKind::Surrogate,
            RunQualifier::Unqualified
            | RunQualifier::LeadingAtMax
            | RunQualifier::MaybeSurrogate => DefectKind::Overlong,
        }
    }
}

/// Live state of one unresolved multi-byte defect: how many continuation
/// bytes are still expected, the current qualifier, and the indices of every
/// unit labeled so far on this run's behalf.
#[derive(Debug)]
struct DefectRun {
    remaining: usize,
    qualifier: RunQualifier,
    awaiting_first_continuation: bool,
    members: Vec<usize>,
}

/// What [`Utf8DefectMachine::feed`] decided for one byte.
#[derive(Debug, PartialEq, Eq)]
pub struct Feed {
    /// Label for the unit built from this byte.
    pub label: DefectKind,
    /// When the byte resolved a run: indices of the previously labeled
    /// member units whose label must be rewritten to `label`.
    pub backpatch: Vec<usize>,
}

impl Feed {
    fn immediate(label: DefectKind) -> Feed {
        Feed {
            label,
            backpatch: Vec::new(),
        }
    }
}

/// Streaming defect state machine for UTF-8. Strictly ordered: one byte at a
/// time, at most one active run.
#[derive(Debug, Default)]
pub struct Utf8DefectMachine {
    run: Option<DefectRun>,
}

impl Utf8DefectMachine {
    /// True while a run is open, i.e. a `10xxxxxx` byte belongs to it.
    #[must_use]
    pub fn expects_continuation(&self) -> bool { self.run.is_some() }

    /// A byte broke the expected pattern (or a valid unit was decoded):
    /// abandon the run. Member labels stay provisional; abandonment never
    /// rewrites.
    pub fn interrupt(&mut self) { self.run = None; }

    /// Classify one byte that failed well-formed decoding (or continues an
    /// open run). `unit_index` is the index of the unit the caller will
    /// create for this byte.
    pub fn feed(&mut self, unit_index: usize, byte: u8) -> Feed {
        if let Some(run) = self.run.as_mut() {
            if is_continuation(byte) {
                run.members.push(unit_index);
                if run.awaiting_first_continuation {
                    run.awaiting_first_continuation = false;
                    run.qualifier = run.qualifier.refine(byte);
                }
                run.remaining -= 1;
                if run.remaining == 0 {
                    let label = run.qualifier.into_final_label();
                    let members = std::mem::take(&mut run.members);
                    self.run = None;
                    return Feed {
                        label,
                        backpatch: members,
                    };
                }
                return Feed::immediate(DefectKind::NotEnoughContinuation);
            }
            // Not a continuation byte: the run dies and the byte is
            // classified fresh as a new leading byte.
            self.run = None;
        }
        self.classify_leading(unit_index, byte)
    }

    /// The UTF-8 defect grammar over leading byte patterns.
    fn classify_leading(&mut self, unit_index: usize, byte: u8) -> Feed {
        if is_continuation(byte) {
            // 10xxxxxx with no open run.
            return Feed::immediate(DefectKind::UnexpectedContinuation);
        }
        let (expected, qualifier) = match byte {
            b if b & 0b1110_0000 == 0b1100_0000 => (1, RunQualifier::Unqualified),
            b if b & 0b1111_0000 == 0b1110_0000 => {
                let qualifier = if b & 0x0F == 0b1101 {
                    RunQualifier::MaybeSurrogate
                } else {
                    RunQualifier::Unqualified
                };
                (2, qualifier)
            }
            b if b & 0b1111_1000 == 0b1111_0000 => {
                let qualifier = match b & 0b0000_0111 {
                    0b100 => RunQualifier::LeadingAtMax,
                    0b101..=0b111 => RunQualifier::TooLarge,
                    _ => RunQualifier::Unqualified,
                };
                (3, qualifier)
            }
            // 11111xxx is never a valid UTF-8 leading form.
            b if b & 0b1111_1000 == 0b1111_1000 => {
                return Feed::immediate(DefectKind::TooLarge);
            }
            _ => return Feed::immediate(DefectKind::Invalid),
        };
        self.run = Some(DefectRun {
            remaining: expected,
            qualifier,
            awaiting_first_continuation: true,
            members: vec![unit_index],
        });
        Feed::immediate(DefectKind::NotEnoughContinuation)
    }
}

#[must_use]
pub fn is_continuation(byte: u8) -> bool { byte & 0b1100_0000 == 0b1000_0000 }

/// Defect classification for one invalid UTF-16 unit. An odd byte count only
/// occurs for the trailing byte of the input; otherwise the byte carrying
/// the surrogate tag decides.
#[must_use]
pub fn classify_utf16(bytes: &[u8], endian: Endian) -> DefectKind {
    if bytes.len() % 2 != 0 {
        return DefectKind::Incomplete;
    }
    let tag_byte = match endian {
        Endian::Little => bytes[1],
        Endian::Big => bytes[0],
    };
    if tag_byte >> 3 == 0b11011 {
        DefectKind::HalfSurrogate
    } else {
        DefectKind::Invalid
    }
}

/// Defect classification for one invalid UTF-32 unit. Values above the
/// scalar maximum are "too large"; every other invalid unit is labeled
/// "surrogate", the only other way a 4-byte unit can be invalid.
#[must_use]
pub fn classify_utf32(bytes: &[u8], endian: Endian) -> DefectKind {
    if bytes.len() % 4 != 0 {
        return DefectKind::Incomplete;
    }
    let value = match endian {
        Endian::Little => u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
        Endian::Big => u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
    };
    if value > 0x10FFFF {
        DefectKind::TooLarge
    } else {
        DefectKind::Surrogate
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::{DefectKind, Utf8DefectMachine, classify_utf16, classify_utf32};
    use crate::encoding::Endian;

    /// Run the machine over the bytes as if each produced one unit, applying
    /// backpatches, and return the final label per byte.
    fn labels(bytes: &[u8]) -> Vec<DefectKind> {
        let mut machine = Utf8DefectMachine::default();
        let mut acc: Vec<DefectKind> = Vec::new();
        for (index, byte) in bytes.iter().enumerate() {
            let feed = machine.feed(index, *byte);
            acc.push(feed.label);
            for member in feed.backpatch {
                acc[member] = feed.label;
            }
        }
        acc
    }

    #[test]
    fn stray_continuation_byte() {
        assert_eq!(labels(&[0x80]), vec![DefectKind::UnexpectedContinuation]);
    }

    #[test]
    fn truncated_sequence_keeps_provisional_labels() {
        // F0 9F 8C with nothing after it: the run never resolves.
        assert_eq!(
            labels(&[0xF0, 0x9F, 0x8C]),
            vec![DefectKind::NotEnoughContinuation; 3]
        );
    }

    #[test]
    fn overlong_three_byte_form() {
        assert_eq!(labels(&[0xE0, 0x81, 0x81]), vec![DefectKind::Overlong; 3]);
    }

    #[test]
    fn overlong_double_null() {
        assert_eq!(labels(&[0xC0, 0x80]), vec![DefectKind::Overlong; 2]);
    }

    #[test]
    fn too_large_leading_byte_f5() {
        assert_eq!(
            labels(&[0xF5, 0x8F, 0xBF, 0xBF]),
            vec![DefectKind::TooLarge; 4]
        );
    }

    #[test]
    fn too_large_past_max_on_f4() {
        assert_eq!(
            labels(&[0xF4, 0xAF, 0xBF, 0xBF]),
            vec![DefectKind::TooLarge; 4]
        );
    }

    #[test]
    fn too_large_five_bit_leading_form() {
        assert_eq!(labels(&[0xFF]), vec![DefectKind::TooLarge]);
    }

    #[test_case(&[0xED, 0xA0, 0x80]; "low end of surrogate range")]
    #[test_case(&[0xED, 0xBF, 0xBF]; "high end of surrogate range")]
    fn surrogate_backpatched(bytes: &[u8]) {
        assert_eq!(labels(bytes), vec![DefectKind::Surrogate; 3]);
    }

    #[test]
    fn interrupted_run_is_abandoned_without_rewriting() {
        let mut machine = Utf8DefectMachine::default();
        let first = machine.feed(0, 0xE1);
        assert_eq!(first.label, DefectKind::NotEnoughContinuation);
        let second = machine.feed(1, 0x80);
        assert_eq!(second.label, DefectKind::NotEnoughContinuation);
        assert!(machine.expects_continuation());
        // 'A' would decode as a fresh valid unit; the caller interrupts.
        machine.interrupt();
        assert!(!machine.expects_continuation());
    }

    #[test]
    fn fresh_leading_byte_after_dead_run() {
        // C2 opens a run; FF is not a continuation, so the run dies and FF
        // classifies on its own.
        assert_eq!(
            labels(&[0xC2, 0xFF]),
            vec![DefectKind::NotEnoughContinuation, DefectKind::TooLarge]
        );
    }

    #[test]
    fn utf16_odd_tail_is_incomplete() {
        assert_eq!(
            classify_utf16(&[0x61], Endian::Little),
            DefectKind::Incomplete
        );
    }

    #[test]
    fn utf16_half_surrogate_per_endianness() {
        // D83C: high surrogate, tag bits live in the high-order byte.
        assert_eq!(
            classify_utf16(&[0x3C, 0xD8], Endian::Little),
            DefectKind::HalfSurrogate
        );
        assert_eq!(
            classify_utf16(&[0xD8, 0x3C], Endian::Big),
            DefectKind::HalfSurrogate
        );
        assert_eq!(
            classify_utf16(&[0x2B, 0xDF], Endian::Little),
            DefectKind::HalfSurrogate
        );
    }

    #[test]
    fn utf32_too_large_and_surrogate() {
        assert_eq!(
            classify_utf32(&[0x00, 0x11, 0x00, 0x00], Endian::Big),
            DefectKind::TooLarge
        );
        assert_eq!(
            classify_utf32(&[0x00, 0xD8, 0x00, 0x00], Endian::Little),
            DefectKind::Surrogate
        );
        assert_eq!(
            classify_utf32(&[0x61, 0x00], Endian::Little),
            DefectKind::Incomplete
        );
    }
}
