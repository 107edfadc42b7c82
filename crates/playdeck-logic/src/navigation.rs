//! Landing-page navigation cards.
//!
//! Each card carries an optional target URL. Activating a card with a
//! primary click, `Enter`, or Space asks the host to navigate there. A card
//! with no target does nothing. Cards are also annotated so assistive tech
//! treats them as links.
//!
//! ```
//! use playdeck_logic::navigation::{Activation, NavCard, Navigator};
//!
//! struct Recorder(Vec<String>);
//! impl Navigator for Recorder {
//!     fn navigate(&mut self, target: &str) {
//!         self.0.push(target.to_string());
//!     }
//! }
//!
//! let card = NavCard::new(Some("secret_shift_web/"));
//! let mut host = Recorder(Vec::new());
//! card.activate(Activation::Key("Enter"), &mut host);
//! assert_eq!(host.0, ["secret_shift_web/"]);
//! ```

use serde::{Deserialize, Serialize};

/// Host primitive that performs the actual page navigation.
pub trait Navigator {
    fn navigate(&mut self, target: &str);
}

/// A user interaction delivered to a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation<'a> {
    /// Primary pointer click.
    Click,
    /// Key press, named the way the host reports it (`"Enter"`, `" "`, ...).
    Key(&'a str),
}

impl Activation<'_> {
    /// Whether this interaction should open the card.
    pub fn opens(&self) -> bool {
        match self {
            Activation::Click => true,
            Activation::Key(key) => matches!(*key, "Enter" | " "),
        }
    }
}

/// What the card did with an activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActivationOutcome {
    /// The host navigator was invoked.
    pub navigated: bool,
    /// The host should suppress the key's default action (e.g. page scroll on Space).
    pub prevent_default: bool,
}

/// A clickable card pointing at another page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavCard {
    target: Option<String>,
}

impl NavCard {
    pub fn new(target: Option<&str>) -> Self {
        Self {
            target: target.map(str::to_owned),
        }
    }

    /// The target, if it is something we can navigate to. Empty strings count as missing.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref().filter(|t| !t.is_empty())
    }

    /// Accessibility attributes the host should set on the card element.
    pub fn annotations(&self) -> [(&'static str, String); 3] {
        let shown = self.target.as_deref().unwrap_or("null");
        [
            ("role", "link".to_string()),
            ("tabindex", "0".to_string()),
            ("title", format!("Open {}", shown)),
        ]
    }

    /// Handle one interaction, calling the navigator when the card should open.
    pub fn activate(
        &self,
        activation: Activation<'_>,
        nav: &mut impl Navigator,
    ) -> ActivationOutcome {
        if !activation.opens() {
            return ActivationOutcome::default();
        }
        let prevent_default = matches!(activation, Activation::Key(_));
        let Some(target) = self.target() else {
            log::debug!("Card activated without a target; ignoring");
            return ActivationOutcome {
                navigated: false,
                prevent_default,
            };
        };
        log::debug!("Navigating to {}", target);
        nav.navigate(target);
        ActivationOutcome {
            navigated: true,
            prevent_default,
        }
    }
}

/// All cards on the landing page, addressed by position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavBoard {
    pub cards: Vec<NavCard>,
}

impl NavBoard {
    pub fn from_targets<'a>(targets: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        Self {
            cards: targets.into_iter().map(NavCard::new).collect(),
        }
    }

    /// Route an activation to the card at `index`. Unknown indices are ignored.
    pub fn activate(
        &self,
        index: usize,
        activation: Activation<'_>,
        nav: &mut impl Navigator,
    ) -> ActivationOutcome {
        self.cards
            .get(index)
            .map(|card| card.activate(activation, nav))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        visits: Vec<String>,
    }

    impl Navigator for Recorder {
        fn navigate(&mut self, target: &str) {
            self.visits.push(target.to_string());
        }
    }

    #[test]
    fn click_navigates() {
        let mut host = Recorder::default();
        let out = NavCard::new(Some("a.html")).activate(Activation::Click, &mut host);
        assert!(out.navigated);
        assert!(!out.prevent_default);
        assert_eq!(host.visits, ["a.html"]);
    }

    #[test]
    fn enter_and_space_navigate_and_suppress_default() {
        let card = NavCard::new(Some("b.html"));
        let mut host = Recorder::default();
        for key in ["Enter", " "] {
            let out = card.activate(Activation::Key(key), &mut host);
            assert!(out.navigated);
            assert!(out.prevent_default);
        }
        assert_eq!(host.visits.len(), 2);
    }

    #[test]
    fn other_keys_are_ignored() {
        let card = NavCard::new(Some("c.html"));
        let mut host = Recorder::default();
        for key in ["Tab", "a", "Escape", "Spacebar"] {
            assert_eq!(
                card.activate(Activation::Key(key), &mut host),
                ActivationOutcome::default()
            );
        }
        assert!(host.visits.is_empty());
    }

    #[test]
    fn missing_or_empty_target_is_a_no_op() {
        let mut host = Recorder::default();
        NavCard::new(None).activate(Activation::Click, &mut host);
        let out = NavCard::new(Some("")).activate(Activation::Key("Enter"), &mut host);
        assert!(!out.navigated);
        assert!(out.prevent_default);
        assert!(host.visits.is_empty());
    }

    #[test]
    fn annotations_mark_card_as_link() {
        let attrs = NavCard::new(Some("switch_bulb_web/")).annotations();
        assert_eq!(attrs[0], ("role", "link".to_string()));
        assert_eq!(attrs[1], ("tabindex", "0".to_string()));
        assert_eq!(attrs[2], ("title", "Open switch_bulb_web/".to_string()));
        assert_eq!(NavCard::new(None).annotations()[2].1, "Open null");
    }

    #[test]
    fn board_routes_by_index() {
        let board = NavBoard::from_targets([Some("one/"), None, Some("three/")]);
        let mut host = Recorder::default();
        assert!(board.activate(0, Activation::Click, &mut host).navigated);
        assert!(!board.activate(1, Activation::Click, &mut host).navigated);
        assert!(!board.activate(9, Activation::Click, &mut host).navigated);
        assert!(board.activate(2, Activation::Key(" "), &mut host).navigated);
        assert_eq!(host.visits, ["one/", "three/"]);
    }

    #[test]
    fn logs_navigation_at_debug() {
        use crate::log_capture::capture;
        use log::Level;

        let mut host = Recorder::default();
        let (_, records) =
            capture(|| NavCard::new(Some("a.html")).activate(Activation::Click, &mut host));
        assert_eq!(records, vec![(Level::Debug, "Navigating to a.html".to_string())]);

        let (_, records) = capture(|| NavCard::new(None).activate(Activation::Click, &mut host));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, Level::Debug);
    }
}
