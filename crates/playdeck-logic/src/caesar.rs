//! Caesar-cipher transposition over the 26 uppercase Latin letters.
//!
//! Input is case-folded to uppercase one character at a time. Anything that
//! is not `A`–`Z` after folding passes through untouched, so the output has
//! the same number of characters as the input and every non-letter keeps its
//! position.
//!
//! ```
//! use playdeck_logic::caesar::{decode, encode};
//!
//! assert_eq!(encode("Hello, World", 3), "KHOOR, ZRUOG");
//! assert_eq!(decode("KHOOR, ZRUOG", 3), "HELLO, WORLD");
//! ```

use crate::constants::ALPHABET_LEN;

/// Rotate every letter of `text` forward by `shift` places.
///
/// Any integer shift is accepted and normalized mod 26.
pub fn encode(text: &str, shift: i64) -> String {
    rotate(text, normalize(shift))
}

/// Rotate every letter of `text` back by `shift` places (inverse of [`encode`]).
pub fn decode(text: &str, shift: i64) -> String {
    rotate(text, (ALPHABET_LEN - normalize(shift)) % ALPHABET_LEN)
}

/// Reduce an arbitrary shift into `0..26`.
pub fn normalize(shift: i64) -> u8 {
    // rem_euclid keeps negative shifts in range
    shift.rem_euclid(i64::from(ALPHABET_LEN)) as u8
}

fn rotate(text: &str, by: u8) -> String {
    text.chars().map(|ch| rotate_char(fold_upper(ch), by)).collect()
}

fn rotate_char(ch: char, by: u8) -> char {
    if !ch.is_ascii_uppercase() {
        return ch;
    }
    let pos = ch as u8 - b'A';
    char::from(b'A' + (pos + by) % ALPHABET_LEN)
}

/// Uppercase a single character, keeping it as-is when the uppercase form
/// expands to several characters (e.g. `ß`).
fn fold_upper(ch: char) -> char {
    let mut upper = ch.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => ch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_known_phrase() {
        assert_eq!(encode("HELLO WORLD", 3), "KHOOR ZRUOG");
    }

    #[test]
    fn wraps_past_z() {
        assert_eq!(encode("XYZ", 3), "ABC");
        assert_eq!(decode("ABC", 3), "XYZ");
    }

    #[test]
    fn folds_lowercase_before_mapping() {
        assert_eq!(encode("abc", 1), "BCD");
        assert_eq!(decode("bcd", 1), "ABC");
    }

    #[test]
    fn non_letters_pass_through_in_place() {
        let text = "A1 B-2! ÉZ";
        let out = encode(text, 7);
        assert_eq!(out.chars().count(), text.chars().count());
        for (a, b) in text.chars().zip(out.chars()) {
            if !a.to_ascii_uppercase().is_ascii_uppercase() {
                assert_eq!(a.to_uppercase().next(), Some(b));
            }
        }
        assert_eq!(out, "H1 I-2! ÉG");
    }

    #[test]
    fn multi_char_uppercase_is_left_alone() {
        assert_eq!(encode("straße", 1), "TUSBßF");
    }

    #[test]
    fn round_trips_every_shift() {
        let text = "The quick brown fox, 42 jumps!";
        for shift in 1..=25 {
            assert_eq!(decode(&encode(text, shift), shift), text.to_uppercase());
        }
    }

    #[test]
    fn shift_is_normalized() {
        assert_eq!(encode("A", 27), "B");
        assert_eq!(encode("A", -1), "Z");
        assert_eq!(encode("A", 0), "A");
        assert_eq!(decode("A", 26), "A");
        assert_eq!(normalize(-27), 25);
    }
}
