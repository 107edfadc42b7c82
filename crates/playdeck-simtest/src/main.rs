//! Playdeck Headless Harness
//!
//! Sweeps the game logic and plays scripted sessions without a browser.
//! Runs entirely in-process — no DOM, no networking, no rendering.
//!
//! Usage:
//!   cargo run -p playdeck-simtest
//!   cargo run -p playdeck-simtest -- --verbose --seed 7 --deck my_phrases.json

use playdeck_logic::caesar;
use playdeck_logic::constants::{shifts, NO_PREVIEW, SWITCH_COUNT};
use playdeck_logic::deck::PhraseDeck;
use playdeck_logic::navigation::{Activation, NavBoard, Navigator};
use playdeck_logic::secret_shift::{self, Effect, GuessOutcome, RoundPhase, ShiftGame};
use playdeck_logic::switch_bulb::{
    self, Branch, Mapping, PuzzleStatus, StatusClass, SwitchBulbPuzzle,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ── Bundled deck (same JSON a host page would inject) ───────────────────
const PHRASES_JSON: &str = include_str!("../../../data/phrases.json");

// ── Configuration ───────────────────────────────────────────────────────

struct HarnessConfig {
    verbose: bool,
    seed: u64,
    deck_path: Option<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            seed: 42,
            deck_path: None,
        }
    }
}

impl HarnessConfig {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut config = Self::default();
        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--verbose" | "-v" => {
                    config.verbose = true;
                    i += 1;
                }
                "--seed" if i + 1 < args.len() => {
                    config.seed = args[i + 1].parse().unwrap_or(config.seed);
                    i += 2;
                }
                "--deck" if i + 1 < args.len() => {
                    config.deck_path = Some(args[i + 1].clone());
                    i += 2;
                }
                _ => i += 1,
            }
        }
        config
    }
}

// ── Logging ─────────────────────────────────────────────────────────────

/// Route the logic crate's `log` records through a tracing subscriber.
fn init_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn check(name: &str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            detail: detail.into(),
        }
    }
}

fn main() {
    let config = HarnessConfig::from_args();
    init_logging(config.verbose);
    println!("=== Playdeck Simulation Harness ===\n");

    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(config.seed);

    // 1. Phrase deck loading
    let (deck, deck_results) = load_deck(&config);
    results.extend(deck_results);

    // 2. Cipher sweep
    results.extend(validate_cipher(&deck));

    // 3. Secret Shift sessions
    results.extend(validate_secret_shift(&deck, &mut rng));

    // 4. Switch & Bulb exhaustive sweep
    results.extend(validate_switch_bulb());

    // 5. Landing navigation
    results.extend(validate_navigation());

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || config.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Phrase Deck ──────────────────────────────────────────────────────

fn load_deck(config: &HarnessConfig) -> (PhraseDeck, Vec<TestResult>) {
    println!("--- Phrase Deck ---");
    let mut results = Vec::new();

    let (source, text) = match &config.deck_path {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(text) => (path.clone(), text),
            Err(e) => {
                results.push(TestResult::check(
                    "deck_read",
                    false,
                    format!("cannot read {}: {}", path, e),
                ));
                ("bundled".to_string(), PHRASES_JSON.to_string())
            }
        },
        None => ("bundled".to_string(), PHRASES_JSON.to_string()),
    };

    let deck = match PhraseDeck::from_json_str(&text) {
        Ok(deck) => {
            results.push(TestResult::check(
                "deck_parse",
                true,
                format!("{} phrases from {}", deck.len(), source),
            ));
            deck
        }
        Err(e) => {
            results.push(TestResult::check(
                "deck_parse",
                false,
                format!("{} deck rejected: {}", source, e),
            ));
            PhraseDeck::default()
        }
    };

    let blank: Vec<_> = deck
        .phrases()
        .iter()
        .filter(|p| !p.chars().any(|c| c.is_ascii_alphabetic()))
        .collect();
    results.push(TestResult::check(
        "deck_has_letters",
        blank.is_empty(),
        if blank.is_empty() {
            "every phrase has something to encrypt".to_string()
        } else {
            format!("{} phrases without letters", blank.len())
        },
    ));

    let rejected = PhraseDeck::from_json(&serde_json::json!({ "not": "a deck" }));
    let fallback = PhraseDeck::from_json_or_default(None);
    results.push(TestResult::check(
        "deck_fallback",
        rejected.is_err() && fallback == PhraseDeck::default(),
        "non-array input is rejected, missing input uses the default deck",
    ));

    (deck, results)
}

// ── 2. Cipher ───────────────────────────────────────────────────────────

fn validate_cipher(deck: &PhraseDeck) -> Vec<TestResult> {
    println!("--- Cipher ---");
    let mut failures = Vec::new();
    let mut checked = 0;

    let mut samples: Vec<String> = deck.phrases().to_vec();
    samples.push("mixed Case, digits 0-9 & symbols!".to_string());

    for text in &samples {
        for shift in i64::from(shifts::MIN)..=i64::from(shifts::MAX) {
            let cipher = caesar::encode(text, shift);
            checked += 1;
            if caesar::decode(&cipher, shift) != text.to_uppercase() {
                failures.push(format!("round trip {:?} @ {}", text, shift));
            }
            let moved = text
                .chars()
                .zip(cipher.chars())
                .any(|(a, b)| !a.is_alphabetic() && a != b);
            if moved || cipher.chars().count() != text.chars().count() {
                failures.push(format!("layout changed {:?} @ {}", text, shift));
            }
        }
    }

    vec![TestResult::check(
        "cipher_round_trip",
        failures.is_empty(),
        if failures.is_empty() {
            format!("{} encodings verified", checked)
        } else {
            format!("{} failures, first: {}", failures.len(), failures[0])
        },
    )]
}

// ── 3. Secret Shift ─────────────────────────────────────────────────────

fn validate_secret_shift(deck: &PhraseDeck, rng: &mut StdRng) -> Vec<TestResult> {
    println!("--- Secret Shift ---");
    let mut results = Vec::new();
    let mut game = ShiftGame::new(deck.clone(), rng);
    let total = game.total_rounds();

    // Play three full loops, mixing misses, skips, and solves.
    let mut errors = Vec::new();
    let mut shift_seen = [false; 26];
    for _ in 0..total * 3 {
        let round = game.round().clone();
        shift_seen[usize::from(round.shift())] = true;
        if round.ciphertext() != caesar::encode(round.plaintext(), i64::from(round.shift())) {
            errors.push(format!("round {} ciphertext drifted", round.number()));
        }

        let score_before = game.score();
        let wrong = if round.shift() == shifts::MAX { 1 } else { round.shift() + 1 };
        match game.submit_guess(i64::from(wrong)) {
            Ok(GuessOutcome::Incorrect { .. }) if game.score() == score_before => {}
            other => errors.push(format!("wrong guess gave {:?}", other)),
        }
        if game.submit_guess(0).is_ok() || game.score() != score_before {
            errors.push("out-of-range guess accepted".to_string());
        }

        if rng.gen_bool(0.5) {
            game.submit_guess(i64::from(round.shift())).ok();
            if game.score() != score_before + 1 {
                errors.push(format!("round {} did not score", round.number()));
            }
        } else {
            game.skip_round();
            if game.score() != score_before {
                errors.push(format!("round {} skip changed score", round.number()));
            }
        }
        if game.phase() != RoundPhase::Resolved {
            errors.push(format!("round {} not resolved", round.number()));
        }

        let was_last = round.number() == total;
        game.start_round(rng);
        if was_last && (game.round().number() != 1 || game.score() != 0) {
            errors.push("deck did not wrap with a fresh score".to_string());
        }
    }
    results.push(TestResult::check(
        "shift_rounds",
        errors.is_empty(),
        if errors.is_empty() {
            format!("{} rounds played across 3 loops", total * 3)
        } else {
            format!("{} problems, first: {}", errors.len(), errors[0])
        },
    ));

    results.push(TestResult::check(
        "shift_range",
        !shift_seen[0],
        format!(
            "{} distinct shifts drawn, none outside {}..={}",
            shift_seen.iter().filter(|s| **s).count(),
            shifts::MIN,
            shifts::MAX
        ),
    ));

    // Host command flow: preview, guess, next.
    let effects = game.handle(secret_shift::Command::GuessInputChanged("x".into()), rng);
    results.push(TestResult::check(
        "shift_preview_sentinel",
        effects == vec![Effect::SetPreview(NO_PREVIEW.to_string())],
        "non-numeric input shows no preview",
    ));
    let blocked = game.handle(secret_shift::Command::NextRound, rng);
    results.push(TestResult::check(
        "shift_next_locked",
        blocked.is_empty(),
        "next round ignored while a round is in progress",
    ));

    results
}

// ── 4. Switch & Bulb ────────────────────────────────────────────────────

fn validate_switch_bulb() -> Vec<TestResult> {
    println!("--- Switch & Bulb ---");
    let mut results = Vec::new();
    let mut counts = [0usize; 3];
    let mut errors = Vec::new();

    for switch_bits in 0u32..(1 << SWITCH_COUNT) {
        for map_bits in 0u32..(1 << (2 * SWITCH_COUNT)) {
            let config: [Mapping; SWITCH_COUNT] = std::array::from_fn(|i| Mapping {
                if_on: (map_bits >> (2 * i)) & 1 == 1,
                if_off: (map_bits >> (2 * i + 1)) & 1 == 1,
            });
            let mut puzzle = SwitchBulbPuzzle::with_config(config);
            for i in 0..SWITCH_COUNT {
                if (switch_bits >> i) & 1 == 1 {
                    puzzle.toggle_switch(i);
                }
            }
            let bulbs = puzzle.bulbs();
            for (i, lit) in bulbs.iter().enumerate() {
                if *lit != config[i].output(puzzle.switches()[i]) {
                    errors.push(format!("bulb {} drifted", i));
                }
            }
            let lit = bulbs.iter().filter(|b| **b).count();
            let status = puzzle.evaluate_status();
            let ok = match &status {
                PuzzleStatus::AllOn => {
                    counts[0] += 1;
                    lit == SWITCH_COUNT && puzzle.degenerate_switches().is_empty()
                }
                PuzzleStatus::DegenerateAllOn(bad) => {
                    counts[1] += 1;
                    lit == SWITCH_COUNT && !bad.is_empty()
                }
                PuzzleStatus::InProgress(n) => {
                    counts[2] += 1;
                    *n == lit && lit < SWITCH_COUNT
                }
            };
            if !ok {
                errors.push(format!("{:?} for switches {:05b}", status, switch_bits));
            }
        }
    }
    results.push(TestResult::check(
        "bulb_status_sweep",
        errors.is_empty(),
        if errors.is_empty() {
            format!(
                "win {} / degenerate {} / in-progress {}",
                counts[0], counts[1], counts[2]
            )
        } else {
            format!("{} problems, first: {}", errors.len(), errors[0])
        },
    ));

    // Scripted play: wire switch 1 to ignore input, then fix it.
    let mut puzzle = SwitchBulbPuzzle::new();
    for i in 0..SWITCH_COUNT {
        puzzle.handle(switch_bulb::Command::Toggle(i));
    }
    let warned = puzzle.handle(switch_bulb::Command::SetMapping(0, Branch::IfOff, true));
    let fixed = puzzle.handle(switch_bulb::Command::SetMapping(0, Branch::IfOff, false));
    let reset = puzzle.handle(switch_bulb::Command::Reset);
    results.push(TestResult::check(
        "bulb_scripted_play",
        warned.status.class == StatusClass::Warn
            && fixed.status.class == StatusClass::Win
            && reset.status.text == switch_bulb::PROMPT
            && reset.bulbs == [false; SWITCH_COUNT],
        "warn → win → prompt",
    ));

    results
}

// ── 5. Navigation ───────────────────────────────────────────────────────

#[derive(Default)]
struct VisitLog(Vec<String>);

impl Navigator for VisitLog {
    fn navigate(&mut self, target: &str) {
        self.0.push(target.to_string());
    }
}

fn validate_navigation() -> Vec<TestResult> {
    println!("--- Navigation ---");
    let board = NavBoard::from_targets([
        Some("secret_shift_web/"),
        Some("switch_bulb_web/"),
        Some(""),
        None,
    ]);
    let mut visits = VisitLog::default();

    let activations = [
        Activation::Click,
        Activation::Key("Enter"),
        Activation::Key(" "),
        Activation::Key("Tab"),
    ];
    for index in 0..board.cards.len() {
        for activation in activations {
            board.activate(index, activation, &mut visits);
        }
    }

    // Two live cards, three opening activations each
    let expected = 6;
    vec![
        TestResult::check(
            "nav_activations",
            visits.0.len() == expected,
            format!("{} navigations (expected {})", visits.0.len(), expected),
        ),
        TestResult::check(
            "nav_annotations",
            board
                .cards
                .iter()
                .all(|c| c.annotations()[0] == ("role", "link".to_string())),
            "every card is announced as a link",
        ),
    ]
}
