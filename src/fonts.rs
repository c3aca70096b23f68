use std::collections::{BTreeMap, BTreeSet};

use pdf_writer::{Name, Pdf, Ref};

use crate::model::FontStyle;

/// Helvetica advance widths (1000 units/em) for ASCII 32..=126, from the AFM.
/// Helvetica-Oblique shares these.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width used for WinAnsi characters outside the ASCII tables.
const FALLBACK_WIDTH: f32 = 556.0;

pub(crate) struct FontEntry {
    pub(crate) pdf_name: String,
    pub(crate) font_ref: Ref,
}

pub(crate) fn base_font(style: FontStyle) -> &'static str {
    match style {
        FontStyle::Normal => "Helvetica",
        FontStyle::Bold => "Helvetica-Bold",
        FontStyle::Italic => "Helvetica-Oblique",
    }
}

/// Width of a single character in 1000-units.
pub(crate) fn char_width_1000(style: FontStyle, ch: char) -> f32 {
    let byte = char_to_winansi(ch);
    if byte == 0 {
        return 0.0;
    }
    let table = match style {
        FontStyle::Bold => &HELVETICA_BOLD_WIDTHS,
        FontStyle::Normal | FontStyle::Italic => &HELVETICA_WIDTHS,
    };
    match byte {
        32..=126 => table[(byte - 32) as usize] as f32,
        _ => FALLBACK_WIDTH,
    }
}

/// Advance width of `text` in points.
pub fn text_width(text: &str, style: FontStyle, font_size: f32) -> f32 {
    text.chars()
        .map(|ch| char_width_1000(style, ch))
        .sum::<f32>()
        * font_size
        / 1000.0
}

/// Map a single Unicode char to its WinAnsi byte, or 0 if unmappable.
fn char_to_winansi(c: char) -> u8 {
    match c as u32 {
        0x0020..=0x007F => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95,
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => 0,
    }
}

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for PDF Str encoding.
/// Characters the encoding lacks are dropped.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .map(char_to_winansi)
        .filter(|&b| b >= 32)
        .collect()
}

/// Register the base-14 faces the pages use, in a stable order so identical
/// documents serialize to identical bytes. Falls back to plain Helvetica when
/// nothing draws text, since every page still carries a font resource.
pub(crate) fn register_fonts(
    pdf: &mut Pdf,
    used: impl IntoIterator<Item = FontStyle>,
    alloc: &mut impl FnMut() -> Ref,
) -> BTreeMap<FontStyle, FontEntry> {
    let mut styles: BTreeSet<FontStyle> = used.into_iter().collect();
    if styles.is_empty() {
        styles.insert(FontStyle::Normal);
    }

    styles
        .into_iter()
        .enumerate()
        .map(|(i, style)| {
            let pdf_name = format!("F{}", i + 1);
            let font_ref = alloc();
            pdf.type1_font(font_ref)
                .base_font(Name(base_font(style).as_bytes()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
            log::debug!("register_font: {} as {pdf_name}", base_font(style));
            (
                style,
                FontEntry {
                    pdf_name,
                    font_ref,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_follow_afm() {
        assert_eq!(char_width_1000(FontStyle::Normal, ' '), 278.0);
        assert_eq!(char_width_1000(FontStyle::Normal, 'W'), 944.0);
        assert_eq!(char_width_1000(FontStyle::Bold, 'b'), 611.0);
        assert_eq!(char_width_1000(FontStyle::Italic, 'i'), 222.0);
    }

    #[test]
    fn text_width_scales_with_size() {
        let w10 = text_width("INVOICE", FontStyle::Bold, 10.0);
        let w20 = text_width("INVOICE", FontStyle::Bold, 20.0);
        assert!((w20 - 2.0 * w10).abs() < 1e-4);
        // digits are all 556 wide in both faces
        assert!((text_width("1000", FontStyle::Normal, 10.0) - 22.24).abs() < 1e-4);
    }

    #[test]
    fn winansi_drops_unmappable() {
        assert_eq!(to_winansi_bytes("A\u{20AC}B"), vec![b'A', 0x80, b'B']);
        assert_eq!(to_winansi_bytes("\u{20B9}5"), vec![b'5']);
        assert_eq!(to_winansi_bytes("a\tb"), vec![b'a', b'b']);
    }
}
