//! Game constants — shift bounds, puzzle size, shared display strings.
//!
//! Plain values with no runtime dependency, shared by the logic modules and
//! the headless harness.

/// Number of letters in the cipher alphabet.
pub const ALPHABET_LEN: u8 = 26;

/// Secret Shift bounds (inclusive).
pub mod shifts {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 25;

    /// Whether `value` is a playable shift.
    pub fn contains(value: i64) -> bool {
        (i64::from(MIN)..=i64::from(MAX)).contains(&value)
    }
}

/// Value the guess input is reset to when a round starts.
pub const DEFAULT_GUESS: u8 = 1;

/// Rendered in place of a preview when the guess is not a playable shift.
pub const NO_PREVIEW: &str = "—";

/// Number of switch/bulb pairs in the logic puzzle.
pub const SWITCH_COUNT: usize = 5;

/// Display labels for a boolean position.
pub mod labels {
    pub const ON: &str = "ON";
    pub const OFF: &str = "OFF";

    pub fn on_off(value: bool) -> &'static str {
        if value {
            ON
        } else {
            OFF
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_bounds_are_inclusive() {
        assert!(!shifts::contains(0));
        assert!(shifts::contains(1));
        assert!(shifts::contains(25));
        assert!(!shifts::contains(26));
        assert!(!shifts::contains(-3));
    }
}
