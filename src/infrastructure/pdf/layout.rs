//! Page geometry and text measurement for the builtin Helvetica faces.
//!
//! Widths come from the standard Helvetica AFM tables, in 1/1000 em, for ASCII
//! 0x20..=0x7E. Anything outside that range is measured as a digit. Good enough for
//! greedy wrapping; a line may end a few points short of the margin.

use serde::Deserialize;

/// Points to millimetres.
pub const PT_TO_MM: f32 = 25.4 / 72.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    #[default]
    A4,
    Letter,
}

impl PaperSize {
    /// (width, height) in millimetres.
    pub fn dimensions_mm(&self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::Letter => (215.9, 279.4),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[rustfmt::skip]
static HELVETICA: [u16; 95] = [
    // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
    278, 278, 584, 584, 584, 556, 1015,
    // A-M
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    // N-Z
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
    278, 278, 278, 469, 556, 333,
    // a-m
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    // n-z
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // {    |    }    ~
    334, 260, 334, 584,
];

#[rustfmt::skip]
static HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

const FALLBACK_WIDTH: u16 = 556;

fn glyph_width(c: char, weight: FontWeight) -> u16 {
    let table = match weight {
        FontWeight::Regular => &HELVETICA,
        FontWeight::Bold => &HELVETICA_BOLD,
    };
    let code = c as usize;
    if (32..=126).contains(&code) {
        table[code - 32]
    } else {
        FALLBACK_WIDTH
    }
}

/// Rendered width of `text` in millimetres.
pub fn text_width_mm(text: &str, size_pt: f32, weight: FontWeight) -> f32 {
    let units: u32 = text.chars().map(|c| glyph_width(c, weight) as u32).sum();
    units as f32 / 1000.0 * size_pt * PT_TO_MM
}

/// Greedy word wrap. Words wider than a full line are split by character.
pub fn wrap_text(text: &str, max_width_mm: f32, size_pt: f32, weight: FontWeight) -> Vec<String> {
    let space = text_width_mm(" ", size_pt, weight);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in text.split_whitespace() {
        let word_width = text_width_mm(word, size_pt, weight);

        if word_width > max_width_mm {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut pieces = split_long_word(word, max_width_mm, size_pt, weight);
            current = pieces.pop().unwrap_or_default();
            current_width = text_width_mm(&current, size_pt, weight);
            lines.extend(pieces);
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + space + word_width <= max_width_mm {
            current.push(' ');
            current.push_str(word);
            current_width += space + word_width;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
            current_width = word_width;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn split_long_word(word: &str, max_width_mm: f32, size_pt: f32, weight: FontWeight) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0_f32;

    for c in word.chars() {
        let w = text_width_mm(c.encode_utf8(&mut [0; 4]), size_pt, weight);
        if width + w > max_width_mm && !piece.is_empty() {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(c);
        width += w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_is_never_narrower_than_regular() {
        let text = "Senior Software Engineer";
        assert!(text_width_mm(text, 11.0, FontWeight::Bold) >= text_width_mm(text, 11.0, FontWeight::Regular));
    }

    #[test]
    fn width_scales_with_font_size() {
        let small = text_width_mm("Rust", 10.0, FontWeight::Regular);
        let large = text_width_mm("Rust", 20.0, FontWeight::Regular);
        assert!((large - 2.0 * small).abs() < 1e-4);
    }

    #[test]
    fn wrapped_lines_fit_and_keep_every_word() {
        let text = "Designed and shipped a multi-tenant billing pipeline handling \
                    two million invoices a month with zero downtime migrations";
        let lines = wrap_text(text, 60.0, 10.0, FontWeight::Regular);

        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width_mm(line, 10.0, FontWeight::Regular) <= 60.0 + 1e-3);
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn overlong_word_is_split() {
        let word = "x".repeat(200);
        let lines = wrap_text(&word, 30.0, 10.0, FontWeight::Regular);

        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn blank_text_yields_no_lines() {
        assert!(wrap_text("   \n ", 100.0, 10.0, FontWeight::Regular).is_empty());
    }

    #[test]
    fn letter_is_wider_and_shorter_than_a4() {
        let (a4_w, a4_h) = PaperSize::A4.dimensions_mm();
        let (l_w, l_h) = PaperSize::Letter.dimensions_mm();
        assert!(l_w > a4_w && l_h < a4_h);
    }
}
