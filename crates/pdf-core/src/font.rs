//! Standard PDF fonts, glyph metrics and WinAnsi encoding
//!
//! The canvas only uses the base-14 Helvetica and Courier faces, so no font
//! program is embedded. Widths come from the Adobe AFM files and are given in
//! 1/1000 em.

use lopdf::{dictionary, Dictionary};
use unicode_normalization::UnicodeNormalization;

/// One of the standard fonts every PDF viewer ships
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum StandardFont {
    #[default]
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    Courier,
}

impl StandardFont {
    /// All fonts registered in every document
    pub const ALL: [StandardFont; 5] = [
        StandardFont::Helvetica,
        StandardFont::HelveticaBold,
        StandardFont::HelveticaOblique,
        StandardFont::HelveticaBoldOblique,
        StandardFont::Courier,
    ];

    /// PostScript name used as /BaseFont
    pub fn base_font_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
            StandardFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
            StandardFont::Courier => "Courier",
        }
    }

    /// Resource name used in content streams (e.g. "F1")
    pub fn resource_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "F1",
            StandardFont::HelveticaBold => "F2",
            StandardFont::HelveticaOblique => "F3",
            StandardFont::HelveticaBoldOblique => "F4",
            StandardFont::Courier => "F5",
        }
    }

    /// Whether this is one of the bold faces
    pub fn is_bold(&self) -> bool {
        matches!(
            self,
            StandardFont::HelveticaBold | StandardFont::HelveticaBoldOblique
        )
    }

    /// Advance width of a character in 1/1000 em
    ///
    /// Characters outside WinAnsi are measured as the `?` they are rendered as.
    pub fn char_width(&self, c: char) -> u16 {
        if *self == StandardFont::Courier {
            return 600;
        }
        let bold = self.is_bold();
        let c = if c == '\t' { ' ' } else { c };

        if (' '..='~').contains(&c) {
            let index = c as usize - 32;
            return if bold {
                HELVETICA_BOLD_WIDTHS[index]
            } else {
                HELVETICA_WIDTHS[index]
            };
        }

        if let Some(width) = special_width(c, bold) {
            return width;
        }

        // Accented Latin letters share the advance of their base letter
        if let Some(base) = std::iter::once(c).nfd().next() {
            if base != c && (' '..='~').contains(&base) {
                return self.char_width(base);
            }
        }

        if to_win_ansi(c).is_some() {
            // Remaining Latin-1 symbols: close to the average lowercase advance
            556
        } else {
            self.char_width('?')
        }
    }

    /// Width of a string in points at the given size
    ///
    /// Measured after NFC composition, the same glyphs `encode_win_ansi` emits.
    pub fn text_width(&self, text: &str, font_size: f64) -> f64 {
        let units: u32 = text.nfc().map(|c| self.char_width(c) as u32).sum();
        units as f64 / 1000.0 * font_size
    }

    /// Font dictionary for a simple Type1 font with WinAnsi encoding
    pub fn to_pdf_dictionary(&self) -> Dictionary {
        dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => self.base_font_name(),
            "Encoding" => "WinAnsiEncoding",
        }
    }
}

/// Widths for typographic characters in the 0x80..0xFF half of WinAnsi
fn special_width(c: char, bold: bool) -> Option<u16> {
    let width = match c {
        '\u{00A0}' => 278,
        '•' => 350,
        '–' => 556,
        '—' => 1000,
        '…' => 1000,
        '€' => 556,
        '™' => 1000,
        '°' => 400,
        '©' | '®' => 737,
        '«' | '»' => 556,
        '¡' => 333,
        '¿' => 611,
        'º' => 365,
        'ª' => 370,
        '·' => 278,
        'ß' => 611,
        'æ' => 889,
        'Æ' => 1000,
        'ø' => 611,
        'Ø' => 778,
        '‘' | '’' | '‚' => {
            if bold {
                278
            } else {
                222
            }
        }
        '“' | '”' | '„' => {
            if bold {
                500
            } else {
                333
            }
        }
        _ => return None,
    };
    Some(width)
}

/// Map a character to its WinAnsiEncoding byte
pub fn to_win_ansi(c: char) -> Option<u8> {
    let code = c as u32;
    match c {
        '\t' => Some(b' '),
        ' '..='~' => Some(code as u8),
        '\u{00A0}'..='\u{00FF}' => Some(code as u8),
        '€' => Some(0x80),
        '‚' => Some(0x82),
        'ƒ' => Some(0x83),
        '„' => Some(0x84),
        '…' => Some(0x85),
        '†' => Some(0x86),
        '‡' => Some(0x87),
        'ˆ' => Some(0x88),
        '‰' => Some(0x89),
        'Š' => Some(0x8A),
        '‹' => Some(0x8B),
        'Œ' => Some(0x8C),
        'Ž' => Some(0x8E),
        '‘' => Some(0x91),
        '’' => Some(0x92),
        '“' => Some(0x93),
        '”' => Some(0x94),
        '•' => Some(0x95),
        '–' => Some(0x96),
        '—' => Some(0x97),
        '˜' => Some(0x98),
        '™' => Some(0x99),
        'š' => Some(0x9A),
        '›' => Some(0x9B),
        'œ' => Some(0x9C),
        'ž' => Some(0x9E),
        'Ÿ' => Some(0x9F),
        _ => None,
    }
}

/// Map a WinAnsiEncoding byte back to its character
pub fn from_win_ansi(byte: u8) -> char {
    match byte {
        0x80 => '€',
        0x82 => '‚',
        0x83 => 'ƒ',
        0x84 => '„',
        0x85 => '…',
        0x86 => '†',
        0x87 => '‡',
        0x88 => 'ˆ',
        0x89 => '‰',
        0x8A => 'Š',
        0x8B => '‹',
        0x8C => 'Œ',
        0x8E => 'Ž',
        0x91 => '‘',
        0x92 => '’',
        0x93 => '“',
        0x94 => '”',
        0x95 => '•',
        0x96 => '–',
        0x97 => '—',
        0x98 => '˜',
        0x99 => '™',
        0x9A => 'š',
        0x9B => '›',
        0x9C => 'œ',
        0x9E => 'ž',
        0x9F => 'Ÿ',
        b => b as char,
    }
}

/// Encode text as WinAnsi bytes, substituting `?` for unsupported characters
///
/// Decomposed accents (`e` + U+0301) are composed first so they map to their
/// Latin-1 code points.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.nfc()
        .map(|c| to_win_ansi(c).unwrap_or(b'?'))
        .collect()
}

/// Decode WinAnsi bytes (as found in a content stream) into a string
pub fn decode_win_ansi(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| from_win_ansi(b)).collect()
}

/// Encode text as a hex string for the PDF Tj operator
pub fn encode_text_hex(text: &str) -> String {
    let hex: String = encode_win_ansi(text)
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect();
    format!("<{hex}>")
}

#[rustfmt::skip]
static HELVETICA_WIDTHS: [u16; 95] = [
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
static HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
    333, 333, 584, 584, 584, 611, 975,
    // A-M
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    // N-Z
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
    333, 278, 333, 584, 556, 333,
    // a-m
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    // n-z
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    // {    |    }    ~
    389, 280, 389, 584,
];
