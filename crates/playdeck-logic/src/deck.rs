//! Phrase deck — the ordered plaintexts Secret Shift cycles through.
//!
//! Hosts may supply their own deck as a JSON array of strings. Anything else
//! (missing, not an array, empty, or holding a non-string) falls back to the
//! built-in five-phrase deck.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Phrases used when the host supplies no usable deck.
pub const DEFAULT_PHRASES: [&str; 5] = [
    "HELLO WORLD",
    "CYBERSECURITY",
    "SINGAPORE",
    "THE NEW ERA",
    "KNOWLEDGE IS POWER",
];

/// An ordered, non-empty, immutable sequence of phrases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct PhraseDeck {
    phrases: Vec<String>,
}

impl PhraseDeck {
    /// Build a deck from owned phrases. Fails on an empty list.
    pub fn new(phrases: Vec<String>) -> Result<Self, DeckError> {
        if phrases.is_empty() {
            return Err(DeckError::Empty);
        }
        Ok(Self { phrases })
    }

    /// Parse a deck from a JSON value.
    pub fn from_json(value: &Value) -> Result<Self, DeckError> {
        let items = value.as_array().ok_or(DeckError::NotASequence)?;
        let phrases = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_str()
                    .map(str::to_owned)
                    .ok_or(DeckError::NonStringEntry(i))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(phrases)
    }

    /// Parse a deck from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, DeckError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_json(&value)
    }

    /// Use the host's deck when it is usable, the default deck otherwise.
    pub fn from_json_or_default(value: Option<&Value>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };
        match Self::from_json(value) {
            Ok(deck) => deck,
            Err(e) => {
                log::warn!("Ignoring supplied phrase deck ({}), using default", e);
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Whether the deck holds no phrases.
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Phrase for a 1-based round number, counting round numbers modulo the
    /// deck length (round `len + 1` is round 1 again, round 0 is the last).
    pub fn phrase_for_round(&self, round: usize) -> &str {
        let len = self.phrases.len();
        &self.phrases[(round % len + len - 1) % len]
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }
}

impl Default for PhraseDeck {
    fn default() -> Self {
        Self {
            phrases: DEFAULT_PHRASES.iter().map(|p| (*p).to_owned()).collect(),
        }
    }
}

impl TryFrom<Vec<String>> for PhraseDeck {
    type Error = DeckError;

    fn try_from(phrases: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(phrases)
    }
}

impl From<PhraseDeck> for Vec<String> {
    fn from(deck: PhraseDeck) -> Self {
        deck.phrases
    }
}

/// Why a supplied deck was rejected.
#[derive(Debug)]
pub enum DeckError {
    Json(serde_json::Error),
    NotASequence,
    Empty,
    NonStringEntry(usize),
}

impl From<serde_json::Error> for DeckError {
    fn from(e: serde_json::Error) -> Self {
        DeckError::Json(e)
    }
}

impl std::fmt::Display for DeckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeckError::Json(e) => write!(f, "JSON error: {}", e),
            DeckError::NotASequence => write!(f, "deck is not an array"),
            DeckError::Empty => write!(f, "deck is empty"),
            DeckError::NonStringEntry(i) => write!(f, "deck entry {} is not a string", i),
        }
    }
}

impl std::error::Error for DeckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeckError::Json(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_deck_has_five_phrases() {
        let deck = PhraseDeck::default();
        assert_eq!(deck.len(), 5);
        assert_eq!(deck.phrase_for_round(1), "HELLO WORLD");
        assert_eq!(deck.phrase_for_round(5), "KNOWLEDGE IS POWER");
    }

    #[test]
    fn round_numbers_wrap_around_the_deck() {
        let deck = PhraseDeck::default();
        assert_eq!(deck.phrase_for_round(6), "HELLO WORLD");
        assert_eq!(deck.phrase_for_round(12), "CYBERSECURITY");
        assert_eq!(deck.phrase_for_round(0), "KNOWLEDGE IS POWER");
    }

    #[test]
    fn accepts_custom_array() {
        let deck = PhraseDeck::from_json(&json!(["ONE", "TWO"])).unwrap();
        assert_eq!(deck.phrases(), ["ONE".to_string(), "TWO".to_string()]);
    }

    #[test]
    fn rejects_non_array() {
        assert!(matches!(
            PhraseDeck::from_json(&json!({"phrases": ["A"]})),
            Err(DeckError::NotASequence)
        ));
        assert!(matches!(
            PhraseDeck::from_json(&json!("HELLO")),
            Err(DeckError::NotASequence)
        ));
    }

    #[test]
    fn rejects_empty_and_mixed_arrays() {
        assert!(matches!(
            PhraseDeck::from_json(&json!([])),
            Err(DeckError::Empty)
        ));
        assert!(matches!(
            PhraseDeck::from_json(&json!(["A", 2])),
            Err(DeckError::NonStringEntry(1))
        ));
    }

    #[test]
    fn falls_back_to_default() {
        assert_eq!(PhraseDeck::from_json_or_default(None), PhraseDeck::default());
        assert_eq!(
            PhraseDeck::from_json_or_default(Some(&json!(42))),
            PhraseDeck::default()
        );
        let custom = PhraseDeck::from_json_or_default(Some(&json!(["ONLY"])));
        assert_eq!(custom.len(), 1);
    }

    #[test]
    fn parses_from_text() {
        let deck = PhraseDeck::from_json_str(r#"["ALPHA", "BETA"]"#).unwrap();
        assert_eq!(deck.len(), 2);
        assert!(matches!(
            PhraseDeck::from_json_str("[oops"),
            Err(DeckError::Json(_))
        ));
    }

    #[test]
    fn serde_rejects_empty_deck() {
        let parsed: Result<PhraseDeck, _> = serde_json::from_str("[]");
        assert!(parsed.is_err());
        let parsed: PhraseDeck = serde_json::from_str(r#"["X"]"#).unwrap();
        assert_eq!(serde_json::to_string(&parsed).unwrap(), r#"["X"]"#);
    }

    #[test]
    fn warns_only_when_supplied_deck_is_rejected() {
        use crate::log_capture::capture;
        use log::Level;

        let (_, records) = capture(|| PhraseDeck::from_json_or_default(Some(&json!({}))));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, Level::Warn);
        assert!(records[0].1.contains("deck is not an array"));

        let (_, records) = capture(|| PhraseDeck::from_json_or_default(None));
        assert!(records.is_empty());
        let (_, records) = capture(|| PhraseDeck::from_json_or_default(Some(&json!(["A"]))));
        assert!(records.is_empty());
    }
}
