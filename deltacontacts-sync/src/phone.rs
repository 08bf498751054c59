//! Phone number canonicalization.
//!
//! Numbers are reduced to their dialable characters: decimal digits plus a
//! single leading `+`. Decimal digits of any script become ASCII digits and
//! keypad letters are translated to digits. No country
//! code is inferred, so a local number keeps exactly the digits it was
//! written with.

/// Normalizes a raw phone number.
///
/// Returns `None` if the input is blank or contains nothing dialable.
/// The output is a fixed point: `normalize(&normalize(s)?) == normalize(s)`.
#[must_use]
pub fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut out = String::with_capacity(trimmed.len());
    let mut saw_digit = false;

    for ch in trimmed.chars() {
        if let Some(digit) = decimal_digit(ch) {
            out.push(digit);
            saw_digit = true;
        } else if ch == '+' && out.is_empty() {
            out.push('+');
        } else if let Some(digit) = keypad_digit(ch) {
            out.push(digit);
            saw_digit = true;
        }
    }

    saw_digit.then_some(out)
}

/// Zero code points of the Unicode decimal digit (`Nd`) runs in the Basic
/// Multilingual Plane. Each run holds the digits 0 to 9 in order.
const DIGIT_ZEROS: [u32; 37] = [
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66,
    0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946,
    0x19D0, 0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0,
    0xA9F0, 0xAA50, 0xABF0, 0xFF10,
];

/// Maps a decimal digit of any script to its ASCII digit.
fn decimal_digit(ch: char) -> Option<char> {
    let code = u32::from(ch);
    DIGIT_ZEROS
        .iter()
        .find(|&&zero| (zero..zero + 10).contains(&code))
        .and_then(|&zero| char::from_digit(code - zero, 10))
}

/// Maps a letter to the digit it shares a key with on a phone keypad.
fn keypad_digit(ch: char) -> Option<char> {
    let digit = match ch.to_ascii_lowercase() {
        'a' | 'b' | 'c' => '2',
        'd' | 'e' | 'f' => '3',
        'g' | 'h' | 'i' => '4',
        'j' | 'k' | 'l' => '5',
        'm' | 'n' | 'o' => '6',
        'p' | 'q' | 'r' | 's' => '7',
        't' | 'u' | 'v' => '8',
        'w' | 'x' | 'y' | 'z' => '9',
        _ => return None,
    };
    Some(digit)
}
