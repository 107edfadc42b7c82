//! Secret Shift — guess the Caesar shift behind a ciphertext.
//!
//! Each round takes the next phrase from the [`PhraseDeck`], encrypts it with
//! a fresh random shift in 1–25, and asks the player for the shift. A correct
//! guess scores a point and unlocks the next round; skipping reveals the
//! answer without scoring. After the last phrase the deck loops back to
//! round 1 and the score starts over.
//!
//! # Round lifecycle
//!
//! | Phase | Guess / Skip | Next round |
//! |-------|--------------|------------|
//! | `InProgress` | enabled | disabled |
//! | `Resolved` | enabled | enabled |
//!
//! `InProgress → Resolved` on a correct guess or a skip.
//! `Resolved → InProgress` when the next round starts.
//!
//! ```
//! use playdeck_logic::deck::PhraseDeck;
//! use playdeck_logic::secret_shift::{GuessOutcome, Hint, ShiftGame};
//!
//! let deck = PhraseDeck::new(vec!["HELLO WORLD".into()]).unwrap();
//! let mut game = ShiftGame::with_shift(deck, 3);
//! assert_eq!(game.round().ciphertext(), "KHOOR ZRUOG");
//!
//! let miss = game.submit_guess(5).unwrap();
//! assert!(matches!(miss, GuessOutcome::Incorrect { hint: Hint::Lower, .. }));
//!
//! game.submit_guess(3).unwrap();
//! assert_eq!(game.score(), 1);
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::caesar;
use crate::constants::{shifts, DEFAULT_GUESS, NO_PREVIEW};
use crate::deck::PhraseDeck;

// ── Status lines ────────────────────────────────────────────────────────

/// How a log line should be styled by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineClass {
    Info,
    Ok,
    Warn,
    Plain,
}

/// One line for the scrolling game log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLine {
    pub class: LineClass,
    pub text: String,
}

impl StatusLine {
    fn new(class: LineClass, text: impl Into<String>) -> Self {
        Self {
            class,
            text: text.into(),
        }
    }
}

// ── Round state ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    InProgress,
    Resolved,
}

/// A single round: one phrase encrypted with one shift.
///
/// Fields are private so the ciphertext can only ever be the encoding of the
/// plaintext under the round's shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Round {
    number: usize,
    plaintext: String,
    shift: u8,
    ciphertext: String,
}

impl Round {
    fn new(number: usize, plaintext: &str, shift: u8) -> Self {
        Self {
            number,
            plaintext: plaintext.to_string(),
            shift,
            ciphertext: caesar::encode(plaintext, i64::from(shift)),
        }
    }

    /// 1-based position in the deck.
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn plaintext(&self) -> &str {
        &self.plaintext
    }

    pub fn shift(&self) -> u8 {
        self.shift
    }

    pub fn ciphertext(&self) -> &str {
        &self.ciphertext
    }
}

/// Draw a shift uniformly from 1–25.
pub fn draw_shift(rng: &mut impl Rng) -> u8 {
    rng.gen_range(shifts::MIN..=shifts::MAX)
}

// ── Guesses ─────────────────────────────────────────────────────────────

/// Which way the player should move their next guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hint {
    Lower,
    Higher,
}

impl Hint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Hint::Lower => "lower",
            Hint::Higher => "higher",
        }
    }
}

/// Result of an accepted guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessOutcome {
    Correct {
        shift: u8,
        plaintext: String,
    },
    Incorrect {
        guess: u8,
        hint: Hint,
        /// Ciphertext decoded with the guessed shift.
        preview: String,
    },
}

impl GuessOutcome {
    pub fn status_line(&self) -> StatusLine {
        match self {
            GuessOutcome::Correct { shift, plaintext } => StatusLine::new(
                LineClass::Ok,
                format!("✅ Correct! Shift = {}. Decrypted: {}", shift, plaintext),
            ),
            GuessOutcome::Incorrect {
                guess,
                hint,
                preview,
            } => StatusLine::new(
                LineClass::Plain,
                format!(
                    "❌ Not quite. Try {}. Preview with {}: {}",
                    hint.as_str(),
                    guess,
                    preview
                ),
            ),
        }
    }
}

/// A guess that could not be accepted. The game state is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessError {
    NotANumber,
    OutOfRange(i64),
}

impl GuessError {
    /// The inline warning shown to the player.
    pub fn status_line(&self) -> StatusLine {
        StatusLine::new(
            LineClass::Warn,
            format!(
                "Please enter a number between {} and {}.",
                shifts::MIN,
                shifts::MAX
            ),
        )
    }
}

impl std::fmt::Display for GuessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GuessError::NotANumber => write!(f, "guess is not a number"),
            GuessError::OutOfRange(v) => write!(
                f,
                "guess {} is outside {}–{}",
                v,
                shifts::MIN,
                shifts::MAX
            ),
        }
    }
}

impl std::error::Error for GuessError {}

/// Read the leading integer of `input`, ignoring leading whitespace and any
/// trailing text (`" 7abc"` reads as 7).
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits.bytes().take_while(u8::is_ascii_digit).count();
    if end == 0 {
        return None;
    }
    // Digit runs too long for i64 are out of range either way
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Parse raw guess input into a playable shift.
pub fn parse_guess(input: &str) -> Result<u8, GuessError> {
    let value = parse_leading_int(input).ok_or(GuessError::NotANumber)?;
    check_shift(value)
}

fn check_shift(value: i64) -> Result<u8, GuessError> {
    if shifts::contains(value) {
        Ok(value as u8)
    } else {
        Err(GuessError::OutOfRange(value))
    }
}

// ── Host commands and effects ───────────────────────────────────────────

/// A user interaction forwarded by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// The guess field changed; carries its full current text.
    GuessInputChanged(String),
    SubmitGuess(String),
    Skip,
    NextRound,
}

/// Something the host should render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    Log(StatusLine),
    SetRound(String),
    SetScore(String),
    SetCipher(String),
    SetPreview(String),
    SetGuessInput(String),
    SetNextEnabled(bool),
}

// ── Game ────────────────────────────────────────────────────────────────

/// Secret Shift session: deck, score, and the current round.
#[derive(Debug, Clone)]
pub struct ShiftGame {
    deck: PhraseDeck,
    score: u32,
    phase: RoundPhase,
    round: Round,
}

impl ShiftGame {
    /// Start a session at round 1 with a random shift.
    pub fn new(deck: PhraseDeck, rng: &mut impl Rng) -> Self {
        Self::with_shift(deck, draw_shift(rng))
    }

    /// Start a session at round 1 with a known shift.
    ///
    /// Panics if `shift` is outside 1–25.
    pub fn with_shift(deck: PhraseDeck, shift: u8) -> Self {
        assert!(
            shifts::contains(i64::from(shift)),
            "shift {} outside {}..={}",
            shift,
            shifts::MIN,
            shifts::MAX
        );
        let round = Round::new(1, deck.phrase_for_round(1), shift);
        let game = Self {
            deck,
            score: 0,
            phase: RoundPhase::InProgress,
            round,
        };
        game.log_round_ready();
        game
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn total_rounds(&self) -> usize {
        self.deck.len()
    }

    /// Advance to the next phrase with a random shift.
    pub fn start_round(&mut self, rng: &mut impl Rng) -> StatusLine {
        self.start_round_with_shift(draw_shift(rng))
    }

    /// Advance to the next phrase with a known shift.
    ///
    /// Past the last phrase the deck wraps to round 1 and the score resets.
    /// Panics if `shift` is outside 1–25.
    pub fn start_round_with_shift(&mut self, shift: u8) -> StatusLine {
        assert!(
            shifts::contains(i64::from(shift)),
            "shift {} outside {}..={}",
            shift,
            shifts::MIN,
            shifts::MAX
        );
        let mut number = self.round.number + 1;
        if number > self.total_rounds() {
            number = 1;
            self.score = 0;
        }
        self.round = Round::new(number, self.deck.phrase_for_round(number), shift);
        self.phase = RoundPhase::InProgress;
        self.log_round_ready();
        self.round_ready_line()
    }

    /// Check a guess against the current shift.
    ///
    /// A wrong guess never changes the score; an out-of-range guess changes
    /// nothing at all.
    pub fn submit_guess(&mut self, guess: i64) -> Result<GuessOutcome, GuessError> {
        let guess = check_shift(guess)?;
        if guess == self.round.shift {
            self.score += 1;
            self.phase = RoundPhase::Resolved;
            log::info!(
                "Round {} solved with shift {} (score {})",
                self.round.number,
                guess,
                self.score
            );
            return Ok(GuessOutcome::Correct {
                shift: self.round.shift,
                plaintext: self.round.plaintext.clone(),
            });
        }
        let hint = if guess > self.round.shift {
            Hint::Lower
        } else {
            Hint::Higher
        };
        Ok(GuessOutcome::Incorrect {
            guess,
            hint,
            preview: caesar::decode(&self.round.ciphertext, i64::from(guess)),
        })
    }

    /// Parse raw input and submit it.
    pub fn submit_guess_text(&mut self, input: &str) -> Result<GuessOutcome, GuessError> {
        let guess = parse_guess(input)?;
        self.submit_guess(i64::from(guess))
    }

    /// Give up on the round and reveal the answer. No score is awarded.
    pub fn skip_round(&mut self) -> StatusLine {
        self.phase = RoundPhase::Resolved;
        log::info!("Round {} skipped", self.round.number);
        StatusLine::new(
            LineClass::Plain,
            format!(
                "➡ Skipped. Shift was {}. Plaintext: {}",
                self.round.shift, self.round.plaintext
            ),
        )
    }

    /// Decode the current ciphertext with a candidate shift, if it is playable.
    pub fn preview_decode(&self, candidate: i64) -> Option<String> {
        check_shift(candidate)
            .ok()
            .map(|s| caesar::decode(&self.round.ciphertext, i64::from(s)))
    }

    /// Preview text for raw guess input, or the no-preview placeholder.
    pub fn preview_text(&self, input: &str) -> String {
        parse_leading_int(input)
            .and_then(|g| self.preview_decode(g))
            .unwrap_or_else(|| NO_PREVIEW.to_string())
    }

    pub fn round_summary(&self) -> String {
        format!("Round {}/{}", self.round.number, self.total_rounds())
    }

    pub fn score_summary(&self) -> String {
        format!("Score: {}", self.score)
    }

    fn round_ready_line(&self) -> StatusLine {
        StatusLine::new(
            LineClass::Info,
            format!(
                "Round {}/{}: new ciphertext ready.",
                self.round.number,
                self.total_rounds()
            ),
        )
    }

    fn log_round_ready(&self) {
        log::info!("Round {}/{} ready", self.round.number, self.total_rounds());
    }

    /// Everything the host renders when a round begins, including the opening round.
    pub fn round_effects(&self) -> Vec<Effect> {
        let guess = DEFAULT_GUESS.to_string();
        vec![
            Effect::SetCipher(self.round.ciphertext.clone()),
            Effect::SetGuessInput(guess.clone()),
            Effect::SetNextEnabled(false),
            Effect::Log(self.round_ready_line()),
            Effect::SetRound(self.round_summary()),
            Effect::SetScore(self.score_summary()),
            Effect::SetPreview(self.preview_text(&guess)),
        ]
    }

    /// Apply one host command and return what changed.
    ///
    /// `NextRound` is ignored while the round is still in progress, matching
    /// the disabled next-round control.
    pub fn handle(&mut self, command: Command, rng: &mut impl Rng) -> Vec<Effect> {
        match command {
            Command::GuessInputChanged(input) => {
                vec![Effect::SetPreview(self.preview_text(&input))]
            }
            Command::SubmitGuess(input) => match self.submit_guess_text(&input) {
                Err(e) => vec![Effect::Log(e.status_line())],
                Ok(outcome) => {
                    let mut effects = vec![Effect::Log(outcome.status_line())];
                    if matches!(outcome, GuessOutcome::Correct { .. }) {
                        effects.push(Effect::SetNextEnabled(true));
                    }
                    effects.push(Effect::SetRound(self.round_summary()));
                    effects.push(Effect::SetScore(self.score_summary()));
                    effects
                }
            },
            Command::Skip => vec![
                Effect::Log(self.skip_round()),
                Effect::SetNextEnabled(true),
            ],
            Command::NextRound => {
                if self.phase == RoundPhase::InProgress {
                    return Vec::new();
                }
                self.start_round(rng);
                self.round_effects()
            }
        }
    }
}
