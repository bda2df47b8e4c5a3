//! Seven-segment glyph encoding.
//!
//! Segment bits follow the usual `a`-`g` order with the decimal point in
//! bit 7, which is the layout both the HT16K33 backpack and the TM1637
//! expect for a digit cell:
//!
//! ```text
//!    -a-
//!   f   b
//!    -g-
//!   e   c
//!    -d-  .dp
//! ```

/// Decimal point / colon bit.
pub const SEG_DP: u8 = 0x80;

/// Segment patterns for the decimal digits.
const DIGITS: [u8; 10] = [0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F];

/// Segment patterns for `A`-`Z`. Several letters are approximations; the
/// month abbreviations and unit labels stay readable.
const LETTERS: [u8; 26] = [
    0x77, // A
    0x7C, // b
    0x39, // C
    0x5E, // d
    0x79, // E
    0x71, // F
    0x3D, // G
    0x76, // H
    0x30, // I
    0x1E, // J
    0x75, // K
    0x38, // L
    0x55, // M
    0x54, // n
    0x3F, // O
    0x73, // P
    0x67, // q
    0x50, // r
    0x6D, // S
    0x78, // t
    0x3E, // U
    0x1C, // v
    0x6A, // W
    0x49, // X
    0x6E, // y
    0x5B, // Z
];

/// Returns the segment pattern for a character.
///
/// Letters are case-insensitive. Anything without a glyph is blank.
pub fn glyph(c: char) -> u8 {
    match c {
        '0'..='9' => DIGITS[(c as u8 - b'0') as usize],
        'a'..='z' => LETTERS[(c as u8 - b'a') as usize],
        'A'..='Z' => LETTERS[(c as u8 - b'A') as usize],
        '-' => 0x40,
        '_' => 0x08,
        '=' => 0x48,
        _ => 0x00,
    }
}

/// Encodes four cells into segment bytes.
pub fn encode(cells: &[char; 4]) -> [u8; 4] {
    [
        glyph(cells[0]),
        glyph(cells[1]),
        glyph(cells[2]),
        glyph(cells[3]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits() {
        assert_eq!(glyph('0'), 0x3F);
        assert_eq!(glyph('1'), 0x06);
        assert_eq!(glyph('8'), 0x7F);
    }

    #[test]
    fn test_letters_case_insensitive() {
        assert_eq!(glyph('m'), glyph('M'));
        assert_eq!(glyph('P'), 0x73);
        assert_eq!(glyph('H'), 0x76);
    }

    #[test]
    fn test_unknown_is_blank() {
        assert_eq!(glyph(' '), 0x00);
        assert_eq!(glyph('?'), 0x00);
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode(&[' ', '-', '-', '-']), [0x00, 0x40, 0x40, 0x40]);
    }
}
