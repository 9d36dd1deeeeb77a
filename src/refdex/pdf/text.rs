//! Fonts, text measurement and line wrapping for the PDF renderer.
//!
//! Only the standard Type1 Helvetica family is used, so no font files are
//! embedded. Widths come from a per-character approximation of the Helvetica
//! metrics, which is close enough to wrap table cells without overflowing.

use encoding_rs::WINDOWS_1252;

/// The three faces the index layout uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Regular,
    Bold,
    Oblique,
}

impl Font {
    pub const ALL: [Font; 3] = [Font::Regular, Font::Bold, Font::Oblique];

    /// Name of the font in the page resource dictionary.
    pub fn resource_name(&self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
            Font::Oblique => "F3",
        }
    }

    pub fn base_font(&self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
            Font::Oblique => "Helvetica-Oblique",
        }
    }
}

/// A font face at a size, with the line leading used for wrapped text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub size: f32,
}

impl TextStyle {
    pub const fn new(font: Font, size: f32) -> Self {
        Self { font, size }
    }

    pub fn leading(&self) -> f32 {
        self.size * 1.2
    }

    /// Distance from the top of a line box to its baseline.
    pub fn ascent(&self) -> f32 {
        self.size * 0.8
    }
}

/// Width of one character in thousandths of the font size.
fn char_units(c: char, font: Font) -> f32 {
    let base = match c {
        ' ' | '\'' | '|' | 'i' | 'j' | 'l' | '!' | ',' | '.' | ':' | ';' => 278.0,
        'f' | 't' | 'I' | '/' | '\\' | '(' | ')' | '[' | ']' | '-' => 300.0,
        'r' | '"' | '*' => 350.0,
        '0'..='9' | 'a'..='e' | 'g' | 'h' | 'k' | 'n'..='q' | 's' | 'u' | 'v' | 'x'..='z'
        | '_' | '$' | '?' => 556.0,
        'm' | 'M' | 'W' | 'w' | '@' | '%' => 850.0,
        'A'..='Z' => 680.0,
        c if c.is_ascii() => 584.0,
        _ => 600.0,
    };
    match font {
        Font::Bold => base * 1.06,
        Font::Regular | Font::Oblique => base,
    }
}

pub fn measure(text: &str, style: &TextStyle) -> f32 {
    text.chars()
        .map(|c| char_units(c, style.font))
        .sum::<f32>()
        * style.size
        / 1000.0
}

/// Wraps `text` into lines no wider than `max_width`.
///
/// Explicit newlines always start a new line (an empty paragraph still yields
/// one empty line). Words wider than the line are broken between characters.
pub fn wrap(text: &str, style: &TextStyle, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if measure(&candidate, style) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            if measure(word, style) <= max_width {
                current = word.to_string();
            } else {
                let mut pieces = break_word(word, style, max_width);
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }

        lines.push(current);
    }

    lines
}

fn break_word(word: &str, style: &TextStyle, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    for c in word.chars() {
        current.push(c);
        if measure(&current, style) > max_width && current.chars().count() > 1 {
            current.pop();
            pieces.push(std::mem::take(&mut current));
            current.push(c);
        }
    }
    pieces.push(current);
    pieces
}

/// Encodes text for a simple-font string as Windows-1252; characters outside
/// the code page become `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    let mut buf = [0u8; 4];
    for c in s.chars() {
        let (bytes, _, unmappable) = WINDOWS_1252.encode(c.encode_utf8(&mut buf));
        if unmappable {
            out.push(b'?');
        } else {
            out.extend_from_slice(&bytes);
        }
    }
    out
}
