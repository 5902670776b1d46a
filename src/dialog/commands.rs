//! Global command recognition.
//!
//! Commands are checked before state-scoped handling and are recognized
//! identically regardless of the current dialogue state.

/// A command recognized from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Return to the main menu.
    Menu,
    Directions,
    Businesses,
    Explore,
    FunFacts,
    About,
    Help,
    Feedback,
    EasterEgg,
}

/// Navigation synonyms that all mean "take me back to the menu".
const NAV_SYNONYMS: &[&str] = &["menu", "back", "go back", "exit", "quit", "escape"];

const DIRECTIONS_SYNONYMS: &[&str] = &["directions", "direction"];
const BUSINESS_SYNONYMS: &[&str] = &["businesses", "business", "servery", "serveries"];
const FUN_FACT_SYNONYMS: &[&str] = &["fun facts", "fun fact", "funfacts", "facts"];

/// The one phrase that summons Sammy.
const EASTER_EGG_PHRASE: &str = "hoot hoot";

impl Command {
    /// Parse input text as a global command. Matching is case-insensitive
    /// and ignores surrounding whitespace; anything else is not a command.
    pub fn parse(text: &str) -> Option<Self> {
        let normalized = text.trim().to_lowercase();
        let t = normalized.as_str();

        if NAV_SYNONYMS.contains(&t) {
            return Some(Self::Menu);
        }
        if DIRECTIONS_SYNONYMS.contains(&t) {
            return Some(Self::Directions);
        }
        if BUSINESS_SYNONYMS.contains(&t) {
            return Some(Self::Businesses);
        }
        if FUN_FACT_SYNONYMS.contains(&t) {
            return Some(Self::FunFacts);
        }
        match t {
            "explore" => Some(Self::Explore),
            "about" => Some(Self::About),
            "help" => Some(Self::Help),
            "feedback" => Some(Self::Feedback),
            EASTER_EGG_PHRASE => Some(Self::EasterEgg),
            _ => None,
        }
    }
}
