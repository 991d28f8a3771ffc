//! WinAnsi encoding utilities for the built-in PDF fonts
//!
//! The standard 14 fonts only cover Windows-1252. This module provides:
//! - Checking/encoding text to WinAnsi
//! - Measuring Helvetica text widths in millimetres
//! - Truncating and wrapping text to a width

use crate::error::{PdfError, PdfResult};
use crate::layout::FontStyle;
use tracing::instrument;

/// Points to millimetres
const PT_TO_MM: f32 = 25.4 / 72.0;

/// Glyph width used for characters outside printable ASCII
const FALLBACK_WIDTH: u16 = 556;

/// Helvetica advance widths for ' '..='~' (1/1000 em)
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold advance widths for ' '..='~' (1/1000 em)
#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Encode text to WinAnsi (Windows-1252) bytes
///
/// Fails if any character has no WinAnsi code point.
#[instrument(skip(s))]
pub fn to_winansi(s: &str) -> PdfResult<Vec<u8>> {
    let (bytes, _, had_errors) = encoding_rs::WINDOWS_1252.encode(s);
    if had_errors {
        let bad: String = s
            .chars()
            .filter(|c| {
                let mut buf = [0u8; 4];
                let (_, _, err) = encoding_rs::WINDOWS_1252.encode(c.encode_utf8(&mut buf));
                err
            })
            .collect();
        return Err(PdfError::Encoding(format!(
            "unsupported characters {:?} in {:?}",
            bad, s
        )));
    }
    Ok(bytes.into_owned())
}

/// Check that text can be shown with the built-in fonts
pub fn ensure_winansi(s: &str) -> PdfResult<()> {
    to_winansi(s).map(|_| ())
}

fn glyph_width(c: char, style: FontStyle) -> u16 {
    let table = match style {
        FontStyle::Bold => &HELVETICA_BOLD,
        // Oblique shares the regular metrics
        FontStyle::Regular | FontStyle::Italic => &HELVETICA,
    };
    match c {
        ' '..='~' => table[c as usize - ' ' as usize],
        _ => FALLBACK_WIDTH,
    }
}

/// Width of a string in millimetres at the given font size (points)
pub fn text_width(s: &str, style: FontStyle, size: f32) -> f32 {
    let units: u32 = s.chars().map(|c| glyph_width(c, style) as u32).sum();
    units as f32 * size / 1000.0 * PT_TO_MM
}

/// Truncate a string to fit within a width in millimetres
pub fn truncate_to_width(s: &str, max_width: f32, style: FontStyle, size: f32) -> String {
    let mut width = 0.0;
    let mut result = String::new();
    for c in s.chars() {
        let w = glyph_width(c, style) as f32 * size / 1000.0 * PT_TO_MM;
        if width + w > max_width {
            break;
        }
        result.push(c);
        width += w;
    }
    result
}

/// Break text into lines no wider than `max_width`
///
/// Explicit newlines are kept. Lines break at spaces where possible; a single
/// word longer than the width is split.
pub fn wrap_to_width(s: &str, max_width: f32, style: FontStyle, size: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in s.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        let mut current = String::new();

        for word in paragraph.split(' ') {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if text_width(&candidate, style, size) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            // Split words that are wider than a whole line
            let mut rest = word.to_string();
            while text_width(&rest, style, size) > max_width {
                let head = truncate_to_width(&rest, max_width, style, size);
                if head.is_empty() {
                    break;
                }
                rest = rest[head.len()..].to_string();
                lines.push(head);
            }
            current = rest;
        }

        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_winansi() {
        assert_eq!(to_winansi("Phone 100").unwrap(), b"Phone 100".to_vec());
        // é and € are WinAnsi
        assert_eq!(to_winansi("é€").unwrap(), vec![0xE9, 0x80]);
    }

    #[test]
    fn test_to_winansi_rejects_cjk() {
        let err = to_winansi("手机").unwrap_err();
        assert!(matches!(err, PdfError::Encoding(_)));
        assert!(ensure_winansi("plain").is_ok());
    }

    #[test]
    fn test_text_width() {
        // 1000 units at 10pt = 10pt = 3.5277mm
        let w = text_width("MM", FontStyle::Regular, 10.0);
        assert!((w - 833.0 * 2.0 / 100.0 * PT_TO_MM).abs() < 1e-4);
        assert!(text_width("abc", FontStyle::Bold, 12.0) > text_width("abc", FontStyle::Regular, 12.0));
        assert_eq!(text_width("", FontStyle::Regular, 12.0), 0.0);
    }

    #[test]
    fn test_truncate_to_width() {
        let one_digit = text_width("0", FontStyle::Regular, 10.0);
        assert_eq!(
            truncate_to_width("0123456789", one_digit * 4.5, FontStyle::Regular, 10.0),
            "0123"
        );
    }

    #[test]
    fn test_wrap_to_width() {
        let width = text_width("House 12, Street", FontStyle::Regular, 12.0);
        let lines = wrap_to_width("House 12, Street 4, Lahore", width, FontStyle::Regular, 12.0);
        assert_eq!(lines, vec!["House 12, Street", "4, Lahore"]);
    }

    #[test]
    fn test_wrap_keeps_newlines() {
        let lines = wrap_to_width("a\nb", 100.0, FontStyle::Regular, 12.0);
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_wrap_splits_long_word() {
        let width = text_width("00000", FontStyle::Regular, 10.0);
        let lines = wrap_to_width("0000000000", width + 0.01, FontStyle::Regular, 10.0);
        assert_eq!(lines, vec!["00000", "00000"]);
    }
}
