//! Switch & Bulb — a five-switch truth-table puzzle.
//!
//! Every switch drives one bulb through an editable if/else mapping:
//!
//! ```text
//! if (switch[i] == ON)  →  bulb[i] = mapping[i].if_on
//! else                  →  bulb[i] = mapping[i].if_off
//! ```
//!
//! The goal is to light every bulb. Lighting a bulb with a mapping that is ON
//! in both branches ignores the switch entirely, so the puzzle reports that
//! as a warning instead of a win.
//!
//! Bulbs are never stored; they are recomputed from the switches and the
//! mappings whenever they are read.
//!
//! ```
//! use playdeck_logic::switch_bulb::{PuzzleStatus, SwitchBulbPuzzle};
//!
//! let mut puzzle = SwitchBulbPuzzle::new();
//! for i in 0..5 {
//!     puzzle.toggle_switch(i);
//! }
//! assert_eq!(puzzle.evaluate_status(), PuzzleStatus::AllOn);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{labels, SWITCH_COUNT};

/// Shown after a reset, until the player changes something.
pub const PROMPT: &str = "Tip: Toggle a switch and modify its if–else mapping below using the \
    dropdowns (choose what the bulb should be when the switch is ON/OFF).";

// ── Mappings ────────────────────────────────────────────────────────────

/// Which side of a switch's if/else mapping to edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Branch {
    IfOn,
    IfOff,
}

/// One switch's truth table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    pub if_on: bool,
    pub if_off: bool,
}

impl Default for Mapping {
    /// Bulb mirrors the switch.
    fn default() -> Self {
        Self {
            if_on: true,
            if_off: false,
        }
    }
}

impl Mapping {
    pub fn output(&self, switch_on: bool) -> bool {
        if switch_on {
            self.if_on
        } else {
            self.if_off
        }
    }

    /// ON in both branches: the bulb no longer depends on the switch.
    pub fn is_degenerate(&self) -> bool {
        self.if_on && self.if_off
    }

    pub fn set(&mut self, branch: Branch, value: bool) {
        match branch {
            Branch::IfOn => self.if_on = value,
            Branch::IfOff => self.if_off = value,
        }
    }
}

// ── Status ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PuzzleStatus {
    /// Every bulb is lit and every mapping depends on its switch.
    AllOn,
    /// Every bulb is lit, but these switches (0-based) are wired ON in both branches.
    DegenerateAllOn(Vec<usize>),
    /// Number of lit bulbs, always below the switch count.
    InProgress(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusClass {
    Win,
    Warn,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusView {
    pub class: StatusClass,
    pub text: String,
}

impl PuzzleStatus {
    pub fn view(&self) -> StatusView {
        match self {
            PuzzleStatus::DegenerateAllOn(bad) => {
                let list = bad
                    .iter()
                    .map(|i| (i + 1).to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                StatusView {
                    class: StatusClass::Warn,
                    text: format!(
                        "Not quite yet — the logic for switch(es) {} makes the bulb ON \
                         regardless of input (IF ON→ON, ELSE→ON). Adjust the ELSE branch.",
                        list
                    ),
                }
            }
            PuzzleStatus::AllOn => StatusView {
                class: StatusClass::Win,
                text: "All bulbs are ON! 🎉".to_string(),
            },
            PuzzleStatus::InProgress(n) => StatusView {
                class: StatusClass::Neutral,
                text: format!("Bulbs ON: {}/{}", n, SWITCH_COUNT),
            },
        }
    }
}

// ── Views ───────────────────────────────────────────────────────────────

/// One line of the traced if/else block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracedLine {
    pub text: String,
    /// This branch is the one the current switch position takes.
    pub hit: bool,
}

/// Everything rendered on one switch card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchView {
    pub label: String,
    pub on: bool,
    pub pill: String,
    pub mapping: Mapping,
    pub if_line: TracedLine,
    pub else_line: TracedLine,
}

/// Full render of the puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleView {
    pub bulbs: [bool; SWITCH_COUNT],
    pub switches: Vec<SwitchView>,
    pub status: StatusView,
}

/// A user interaction forwarded by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Toggle(usize),
    SetMapping(usize, Branch, bool),
    Reset,
}

// ── Puzzle ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchBulbPuzzle {
    switches: [bool; SWITCH_COUNT],
    config: [Mapping; SWITCH_COUNT],
    show_prompt: bool,
}

impl Default for SwitchBulbPuzzle {
    fn default() -> Self {
        Self::new()
    }
}

fn check_index(index: usize) {
    assert!(
        index < SWITCH_COUNT,
        "switch index {} out of range 0..{}",
        index,
        SWITCH_COUNT
    );
}

impl SwitchBulbPuzzle {
    /// All switches OFF, every bulb mirroring its switch.
    pub fn new() -> Self {
        Self {
            switches: [false; SWITCH_COUNT],
            config: [Mapping::default(); SWITCH_COUNT],
            show_prompt: false,
        }
    }

    pub fn with_config(config: [Mapping; SWITCH_COUNT]) -> Self {
        Self {
            config,
            ..Self::new()
        }
    }

    pub fn switches(&self) -> &[bool; SWITCH_COUNT] {
        &self.switches
    }

    pub fn config(&self) -> &[Mapping; SWITCH_COUNT] {
        &self.config
    }

    /// Flip one switch. Panics if `index` is not below the switch count.
    pub fn toggle_switch(&mut self, index: usize) {
        check_index(index);
        self.switches[index] = !self.switches[index];
        self.show_prompt = false;
    }

    /// Set one branch of one mapping. Panics if `index` is not below the switch count.
    pub fn set_mapping(&mut self, index: usize, branch: Branch, value: bool) {
        check_index(index);
        self.config[index].set(branch, value);
        self.show_prompt = false;
    }

    /// Turn every switch OFF, keep the mappings, and show the instructions.
    pub fn reset(&mut self) {
        self.switches = [false; SWITCH_COUNT];
        self.show_prompt = true;
    }

    pub fn bulb(&self, index: usize) -> bool {
        check_index(index);
        self.config[index].output(self.switches[index])
    }

    pub fn bulbs(&self) -> [bool; SWITCH_COUNT] {
        std::array::from_fn(|i| self.bulb(i))
    }

    /// 0-based indices of mappings that are ON in both branches.
    pub fn degenerate_switches(&self) -> Vec<usize> {
        self.config
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_degenerate())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn evaluate_status(&self) -> PuzzleStatus {
        let lit = self.bulbs().iter().filter(|b| **b).count();
        if lit < SWITCH_COUNT {
            return PuzzleStatus::InProgress(lit);
        }
        let bad = self.degenerate_switches();
        if bad.is_empty() {
            PuzzleStatus::AllOn
        } else {
            PuzzleStatus::DegenerateAllOn(bad)
        }
    }

    /// The status line, or the instructions right after a reset.
    pub fn status_view(&self) -> StatusView {
        if self.show_prompt {
            return StatusView {
                class: StatusClass::Neutral,
                text: PROMPT.to_string(),
            };
        }
        self.evaluate_status().view()
    }

    pub fn switch_view(&self, index: usize) -> SwitchView {
        check_index(index);
        let on = self.switches[index];
        let mapping = self.config[index];
        SwitchView {
            label: format!("Switch {}", index + 1),
            on,
            pill: labels::on_off(on).to_string(),
            mapping,
            if_line: TracedLine {
                text: format!(
                    "if (switch[{}] == ON)  →  bulb[{}] = {}",
                    index,
                    index,
                    labels::on_off(mapping.if_on)
                ),
                hit: on,
            },
            else_line: TracedLine {
                text: format!(
                    "else                   →  bulb[{}] = {}",
                    index,
                    labels::on_off(mapping.if_off)
                ),
                hit: !on,
            },
        }
    }

    pub fn view(&self) -> PuzzleView {
        PuzzleView {
            bulbs: self.bulbs(),
            switches: (0..SWITCH_COUNT).map(|i| self.switch_view(i)).collect(),
            status: self.status_view(),
        }
    }

    /// Apply one host command and return the fresh render.
    pub fn handle(&mut self, command: Command) -> PuzzleView {
        match command {
            Command::Toggle(i) => self.toggle_switch(i),
            Command::SetMapping(i, branch, value) => self.set_mapping(i, branch, value),
            Command::Reset => self.reset(),
        }
        if let PuzzleStatus::AllOn = self.evaluate_status() {
            if !self.show_prompt {
                log::info!("All bulbs lit with a valid mapping");
            }
        }
        self.view()
    }
}
