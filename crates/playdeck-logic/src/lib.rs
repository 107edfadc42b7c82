//! Pure game logic for Playdeck.
//!
//! This crate contains the logic behind the Playdeck landing page and its
//! two puzzle games, independent of any browser, renderer, or event loop.
//! Hosts feed it commands and render the views and effects it returns, so
//! every rule here is unit-testable without a UI.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`caesar`] | Caesar-cipher encode/decode over the 26 uppercase letters |
//! | [`constants`] | Shift bounds, switch count, shared display strings |
//! | [`deck`] | Phrase deck input seam with built-in default |
//! | [`navigation`] | Card activation (click / Enter / Space) and link annotations |
//! | [`secret_shift`] | Guess-the-shift round and score state machine |
//! | [`switch_bulb`] | Switch/bulb truth-table puzzle and status evaluation |

pub mod caesar;
pub mod constants;
pub mod deck;
pub mod navigation;
pub mod secret_shift;
pub mod switch_bulb;

#[cfg(test)]
mod log_capture;
