#![forbid(unsafe_code)]

/// Standard-14 faces used by the summary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    pub fn base_font(self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
        }
    }
}

/// Polish letters missing from WinAnsi, re-mapped onto code points that are
/// undefined or rarely used in it. The font encoding names each one in
/// `/Differences`, so the standard Helvetica glyphs are used as-is.
pub const POLISH_GLYPHS: [(char, u8, &str); 16] = [
    ('Ą', 0x81, "Aogonek"),
    ('ą', 0x8D, "aogonek"),
    ('Ć', 0x8F, "Cacute"),
    ('ć', 0x90, "cacute"),
    ('Ę', 0x9D, "Eogonek"),
    ('ę', 0x83, "eogonek"),
    ('Ł', 0x86, "Lslash"),
    ('ł', 0x87, "lslash"),
    ('Ń', 0x88, "Nacute"),
    ('ń', 0x89, "nacute"),
    ('Ś', 0x8B, "Sacute"),
    ('ś', 0x98, "sacute"),
    ('Ź', 0x9B, "Zacute"),
    ('ź', 0xA4, "zacute"),
    ('Ż', 0xA6, "Zdotaccent"),
    ('ż', 0xA8, "zdotaccent"),
];

/// Encodes `text` for a font using WinAnsiEncoding plus [`POLISH_GLYPHS`].
///
/// Tabs and line breaks become spaces. Any other character without a code
/// point, including the WinAnsi characters displaced by Polish letters,
/// becomes `?`.
pub fn encode_text(text: &str) -> Vec<u8> {
    text.chars().map(encode_char).collect()
}

fn encode_char(ch: char) -> u8 {
    if let Some((_, code, _)) = POLISH_GLYPHS.iter().find(|(polish, _, _)| *polish == ch) {
        return *code;
    }
    match ch {
        ' '..='~' => ch as u8,
        '\t' | '\n' | '\r' => b' ',
        '\u{00A4}' | '\u{00A6}' | '\u{00A8}' => b'?',
        '\u{00A0}'..='\u{00FF}' => ch as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        '„' => 0x84,
        '…' => 0x85,
        'Š' => 0x8A,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '™' => 0x99,
        'š' => 0x9A,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => b'?',
    }
}

// Advance widths from the Adobe AFM files, in 1/1000 em, for ' '..='~'.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // '0'..'?'
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 'P'..'_'
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // '`'..'o'
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 'p'..'~'
];

/// Advance width of `ch` in 1/1000 em.
///
/// Accented letters share the width of their base letter in both faces.
pub fn char_width(font: Font, ch: char) -> u16 {
    let table = match font {
        Font::Helvetica => &HELVETICA_WIDTHS,
        Font::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
    };
    let ascii = match ch {
        '\t' | '\n' | '\r' => ' ',
        'Æ' | 'Œ' | '…' | '‰' | '™' | '—' => return 1000,
        'æ' | 'œ' => return if font == Font::Helvetica { 889 } else { 944 },
        _ => base_letter(ch),
    };
    match ascii {
        ' '..='~' => table[ascii as usize - ' ' as usize],
        _ => 556,
    }
}

/// Rendered width of `text` in points at `size`.
pub fn text_width(font: Font, size: f32, text: &str) -> f32 {
    let units: u32 = text.chars().map(|ch| u32::from(char_width(font, ch))).sum();
    units as f32 * size / 1000.0
}

fn base_letter(ch: char) -> char {
    match ch {
        'ą' | 'à'..='å' => 'a',
        'Ą' | 'À'..='Å' => 'A',
        'ć' | 'ç' => 'c',
        'Ć' | 'Ç' => 'C',
        'ę' | 'è'..='ë' => 'e',
        'Ę' | 'È'..='Ë' => 'E',
        'ì'..='ï' => 'i',
        'Ì'..='Ï' => 'I',
        'ł' => 'l',
        'Ł' => 'L',
        'ń' | 'ñ' => 'n',
        'Ń' | 'Ñ' => 'N',
        'ò'..='ö' | 'ø' => 'o',
        'Ò'..='Ö' | 'Ø' => 'O',
        'ś' | 'š' => 's',
        'Ś' | 'Š' => 'S',
        'ù'..='ü' => 'u',
        'Ù'..='Ü' => 'U',
        'ý' | 'ÿ' => 'y',
        'Ý' | 'Ÿ' => 'Y',
        'ź' | 'ż' | 'ž' => 'z',
        'Ź' | 'Ż' | 'Ž' => 'Z',
        'ß' => 'B',
        _ => ch,
    }
}

/// Greedy word wrap so no line renders wider than `max_width` points.
///
/// Explicit line breaks are kept; words wider than the box are split.
pub fn wrap(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let measure = |text: &str| text_width(font, size, text);
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let mut word = word.to_string();
            while measure(&word) > max_width {
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                }
                let head = split_to_width(&word, max_width, &measure);
                let rest = word.split_off(head);
                lines.push(word);
                word = rest;
            }
            if word.is_empty() {
                continue;
            }
            if !line.is_empty() && measure(&format!("{line} {word}")) > max_width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(&word);
        }
        lines.push(line);
    }
    lines
}

/// Byte length of the longest prefix of `word` that fits; at least one char.
fn split_to_width(word: &str, max_width: f32, measure: &impl Fn(&str) -> f32) -> usize {
    let mut end = 0;
    for (idx, ch) in word.char_indices() {
        let next = idx + ch.len_utf8();
        if end > 0 && measure(&word[..next]) > max_width {
            break;
        }
        end = next;
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOX_PT: f32 = 482.0;

    #[test]
    fn keeps_polish_letters_and_latin1() {
        assert_eq!(encode_text("Łódź"), vec![0x86, 0xF3, b'd', 0xA4]);
        assert_eq!(
            encode_text("ZAŻÓŁĆ"),
            vec![b'Z', b'A', 0xA6, 0xD3, 0x86, 0x8F]
        );
        assert_eq!(encode_text("ŚREDNIE"), b"\x8BREDNIE".to_vec());
    }

    #[test]
    fn polish_code_points_are_distinct() {
        let mut codes: Vec<u8> = POLISH_GLYPHS.iter().map(|(_, code, _)| *code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), POLISH_GLYPHS.len());
    }

    #[test]
    fn line_breaks_become_spaces_other_controls_unknown() {
        assert_eq!(encode_text("a\tb\r\nc"), b"a b  c".to_vec());
        assert_eq!(encode_text("a\u{7}b"), b"a?b".to_vec());
        assert_eq!(encode_text("→ ¤"), b"? ?".to_vec());
    }

    #[test]
    fn measures_with_font_metrics() {
        assert_eq!(text_width(Font::Helvetica, 10.0, "M"), 8.33);
        assert_eq!(text_width(Font::Helvetica, 10.0, "il"), 4.44);
        assert_eq!(char_width(Font::HelveticaBold, 'Ś'), char_width(Font::HelveticaBold, 'S'));
        assert!(text_width(Font::HelveticaBold, 11.0, "ABC") > text_width(Font::Helvetica, 11.0, "abc"));
    }

    #[test]
    fn wide_upper_case_lines_fit_the_box() {
        let notes = "MMMM ".repeat(40);
        let lines = wrap(&notes, Font::Helvetica, 11.0, BOX_PT);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(Font::Helvetica, 11.0, line) <= BOX_PT, "{line}");
        }
        assert_eq!(lines.concat().replace(' ', ""), notes.replace(' ', ""));
    }

    #[test]
    fn wraps_on_word_boundaries() {
        let width = text_width(Font::Helvetica, 10.0, "kota i") + 0.5;
        assert_eq!(
            wrap("ala ma kota i psa", Font::Helvetica, 10.0, width),
            vec!["ala ma", "kota i", "psa"]
        );
        assert_eq!(
            wrap("one\n\ntwo", Font::Helvetica, 10.0, BOX_PT),
            vec!["one", "", "two"]
        );
    }

    #[test]
    fn splits_words_wider_than_the_box() {
        let word = "W".repeat(100);
        let lines = wrap(&word, Font::HelveticaBold, 11.0, BOX_PT);
        assert!(lines.len() >= 2);
        assert!(lines.iter().all(|line| !line.is_empty()));
        for line in &lines {
            assert!(text_width(Font::HelveticaBold, 11.0, line) <= BOX_PT);
        }
        assert_eq!(lines.concat(), word);
    }
}
