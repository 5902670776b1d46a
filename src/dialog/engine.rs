//! The dialogue state machine.
//!
//! Turn contract, in order: clarification interception, global commands,
//! state-scoped handling. Transient actions (explore, fun facts, about,
//! help, feedback, the easter egg) produce their response and return the
//! session to the menu; only Menu, Directions, and Businesses are resting
//! states.

use std::sync::Arc;

use tracing::{debug, info};

use crate::catalog::{businesses, locations, CatalogEntry, EntryKind};
use crate::config::DialogConfig;
use crate::content::{self, ContentPool, ExploreSpot, PoolId};
use crate::dialog::commands::Command;
use crate::dialog::types::{
    EventKind, InboundEvent, QuickReplyOption, ResponseIntent, ScheduledResponse,
};
use crate::resolver::{EntityResolver, Resolution};
use crate::rotation::ContentRotator;
use crate::session::{DialogState, SessionStore};

const MENU_TEXT: &str = "How can I help?";
const CLARIFY_TEXT: &str = "Did you mean:";
const DIRECTIONS_PROMPT: &str = "Sure — which building are you looking for?";
const BUSINESSES_PROMPT: &str = "Which business or servery can I point you to?";
const LOCATION_NOT_RECOGNIZED: &str =
    "Hmm, I don't recognize that place. Try another building name?";
const BUSINESS_NOT_RECOGNIZED: &str =
    "Hmm, I don't recognize that one. Try a servery or business name?";
const ATTACHMENT_FALLBACK: &str = "I can't understand attachments :/";
const ABOUT_TEXT: &str = "I'm Campus Assist, a small owl that knows its way around campus. \
     Ask me for directions, servery hours, fun facts, or somewhere new to explore.";
const HELP_TEXT: &str = "Type \"directions\" and then a building name, \"businesses\" for \
     hours and locations, \"explore\" for somewhere new, or \"fun facts\". \
     \"menu\" always brings you back here.";
const FEEDBACK_TEXT: &str = "We'd love to hear from you! Send a note to \
     feedback@campus-assist.example and a human will read it.";
const EASTER_EGG_TEXT: &str = "Hoot hoot! You found Sammy.";
const EASTER_EGG_IMAGE: &str = "https://campus-assist.example/assets/sammy.png";

/// The dialogue state machine: session + input in, ordered response
/// intents out. Never calls a delivery transport.
pub struct DialogEngine {
    sessions: Arc<SessionStore>,
    rotator: ContentRotator,
    locations: EntityResolver,
    businesses: EntityResolver,
    facts: ContentPool<String>,
    spots: ContentPool<ExploreSpot>,
    config: DialogConfig,
}

impl DialogEngine {
    pub fn new(
        locations: EntityResolver,
        businesses: EntityResolver,
        facts: ContentPool<String>,
        spots: ContentPool<ExploreSpot>,
        config: DialogConfig,
    ) -> Self {
        let sessions = Arc::new(SessionStore::new());
        let rotator = ContentRotator::new(Arc::clone(&sessions));
        Self {
            sessions,
            rotator,
            locations,
            businesses,
            facts,
            spots,
            config,
        }
    }

    /// Engine wired with the built-in catalogs and content pools.
    pub fn with_defaults() -> Self {
        Self::new(
            EntityResolver::new(locations::campus_locations()),
            EntityResolver::new(businesses::campus_businesses()),
            content::fun_facts(),
            content::exploration_spots(),
            DialogConfig::default(),
        )
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Handle one inbound turn event, producing the ordered responses for
    /// this turn. Always yields at least one intent.
    pub fn handle_event(&self, event: &InboundEvent) -> Vec<ScheduledResponse> {
        let session = self.sessions.get(&event.user_id);
        debug!(
            user = %event.user_id,
            state = %session.state,
            clarifying = session.clarifying,
            "handling turn"
        );

        match &event.kind {
            EventKind::Attachment => {
                vec![ScheduledResponse::now(ResponseIntent::text(
                    ATTACHMENT_FALLBACK,
                ))]
            }
            EventKind::QuickReply(payload) => {
                if session.clarifying {
                    // The disambiguation menu's payload already carries the
                    // fully rendered answer; emit it verbatim.
                    self.sessions.set_clarifying(&event.user_id, false);
                    info!(user = %event.user_id, "clarification choice made");
                    vec![ScheduledResponse::now(ResponseIntent::text(payload.clone()))]
                } else {
                    self.handle_text(&event.user_id, session.state, payload)
                }
            }
            EventKind::Text(text) => self.handle_text(&event.user_id, session.state, text),
        }
    }

    fn handle_text(
        &self,
        user_id: &str,
        state: DialogState,
        text: &str,
    ) -> Vec<ScheduledResponse> {
        if let Some(command) = Command::parse(text) {
            return self.run_command(user_id, command);
        }

        match state {
            DialogState::Menu => vec![self.main_menu()],
            DialogState::Directions => self.resolve_location(user_id, text),
            DialogState::Businesses => self.resolve_business(user_id, text),
        }
    }

    fn run_command(&self, user_id: &str, command: Command) -> Vec<ScheduledResponse> {
        debug!(user = %user_id, command = ?command, "global command");
        match command {
            Command::Menu => {
                self.sessions.set_state(user_id, DialogState::Menu);
                self.sessions.set_clarifying(user_id, false);
                vec![self.main_menu()]
            }
            Command::Directions => {
                self.sessions.set_state(user_id, DialogState::Directions);
                self.sessions.set_clarifying(user_id, false);
                vec![ScheduledResponse::now(ResponseIntent::text(
                    DIRECTIONS_PROMPT,
                ))]
            }
            Command::Businesses => {
                self.sessions.set_state(user_id, DialogState::Businesses);
                self.sessions.set_clarifying(user_id, false);
                vec![ScheduledResponse::now(ResponseIntent::text(
                    BUSINESSES_PROMPT,
                ))]
            }
            Command::Explore => self.transient(user_id, |engine| engine.explore_spot(user_id)),
            Command::FunFacts => self.transient(user_id, |engine| engine.fun_fact(user_id)),
            Command::About => {
                self.transient(user_id, |_| vec![ScheduledResponse::now(ResponseIntent::text(ABOUT_TEXT))])
            }
            Command::Help => {
                self.transient(user_id, |_| vec![ScheduledResponse::now(ResponseIntent::text(HELP_TEXT))])
            }
            Command::Feedback => self.transient(user_id, |_| {
                vec![ScheduledResponse::now(ResponseIntent::text(FEEDBACK_TEXT))]
            }),
            Command::EasterEgg => self.transient(user_id, |_| {
                vec![
                    ScheduledResponse::now(ResponseIntent::text(EASTER_EGG_TEXT)),
                    ScheduledResponse::now(ResponseIntent::image(EASTER_EGG_IMAGE)),
                ]
            }),
        }
    }

    /// Run a transient action: it fires once and the session rests at Menu.
    /// Any pending clarification is abandoned; the next quick reply must be
    /// parsed normally, not echoed as a stale disambiguation choice.
    fn transient(
        &self,
        user_id: &str,
        action: impl FnOnce(&Self) -> Vec<ScheduledResponse>,
    ) -> Vec<ScheduledResponse> {
        self.sessions.set_state(user_id, DialogState::Menu);
        self.sessions.set_clarifying(user_id, false);
        action(self)
    }

    fn main_menu(&self) -> ScheduledResponse {
        ScheduledResponse::now(ResponseIntent::QuickReplies {
            text: MENU_TEXT.to_string(),
            options: vec![
                QuickReplyOption::new("Directions", "directions"),
                QuickReplyOption::new("Explore", "explore"),
                QuickReplyOption::new("Business/Servery", "businesses"),
                QuickReplyOption::new("Fun Facts", "fun facts"),
                QuickReplyOption::new("About", "about"),
                QuickReplyOption::new("Help", "help"),
            ],
        })
    }

    fn resolve_location(&self, user_id: &str, text: &str) -> Vec<ScheduledResponse> {
        match self.locations.resolve(text) {
            Resolution::NotFound => {
                info!(user = %user_id, input = %text, "location not recognized");
                vec![ScheduledResponse::now(ResponseIntent::text(
                    LOCATION_NOT_RECOGNIZED,
                ))]
            }
            Resolution::Ambiguous { group, members } => {
                info!(user = %user_id, group = %group, "ambiguous location");
                self.clarify(user_id, &self.locations, &members)
            }
            Resolution::Resolved(entry) => {
                info!(user = %user_id, entity = %entry.canonical, "location resolved");
                match identification_text(&entry) {
                    Some(answer) => vec![ScheduledResponse::now(ResponseIntent::text(answer))],
                    None => vec![ScheduledResponse::now(ResponseIntent::text(
                        LOCATION_NOT_RECOGNIZED,
                    ))],
                }
            }
        }
    }

    fn resolve_business(&self, user_id: &str, text: &str) -> Vec<ScheduledResponse> {
        match self.businesses.resolve(text) {
            Resolution::NotFound => {
                info!(user = %user_id, input = %text, "business not recognized");
                vec![ScheduledResponse::now(ResponseIntent::text(
                    BUSINESS_NOT_RECOGNIZED,
                ))]
            }
            Resolution::Ambiguous { group, members } => {
                info!(user = %user_id, group = %group, "ambiguous business");
                self.clarify(user_id, &self.businesses, &members)
            }
            Resolution::Resolved(entry) => {
                info!(user = %user_id, entity = %entry.canonical, "business resolved");
                self.staged_business_reply(&entry)
            }
        }
    }

    /// Identification now, hours and map link after fixed offsets. Order is
    /// preserved by the dispatcher's per-recipient sequencing.
    fn staged_business_reply(&self, entry: &CatalogEntry) -> Vec<ScheduledResponse> {
        let EntryKind::Resolved(meta) = &entry.kind else {
            return vec![ScheduledResponse::now(ResponseIntent::text(
                BUSINESS_NOT_RECOGNIZED,
            ))];
        };

        let mut responses = vec![ScheduledResponse::now(ResponseIntent::text(format!(
            "{} is located at {}",
            entry.canonical, meta.address
        )))];
        if let Some(hours) = &meta.hours {
            responses.push(ScheduledResponse::after(
                self.config.hours_delay,
                ResponseIntent::text(hours.clone()),
            ));
        }
        if let Some(map_url) = &meta.map_url {
            responses.push(ScheduledResponse::after(
                self.config.map_delay,
                ResponseIntent::text(format!("Here's a map: {map_url}")),
            ));
        }
        responses
    }

    /// Emit the disambiguation menu for a conflict group and raise the
    /// clarifying flag. Each option's payload is the member's fully
    /// rendered answer, so the interception path can emit it without
    /// re-resolving.
    fn clarify(
        &self,
        user_id: &str,
        resolver: &EntityResolver,
        members: &[String],
    ) -> Vec<ScheduledResponse> {
        self.sessions.set_clarifying(user_id, true);
        let options = members
            .iter()
            .filter_map(|name| {
                let entry = resolver.catalog().entry_by_name(name)?;
                let answer = identification_text(entry)?;
                Some(QuickReplyOption::new(name.clone(), answer))
            })
            .collect();
        vec![ScheduledResponse::now(ResponseIntent::QuickReplies {
            text: CLARIFY_TEXT.to_string(),
            options,
        })]
    }

    fn fun_fact(&self, user_id: &str) -> Vec<ScheduledResponse> {
        if self.facts.is_empty() {
            return vec![ScheduledResponse::now(ResponseIntent::text(
                "I'm fresh out of facts!",
            ))];
        }
        let index = self.rotator.pick(user_id, PoolId::Facts, self.facts.len());
        match self.facts.get(index) {
            Some(fact) => vec![ScheduledResponse::now(ResponseIntent::text(fact.clone()))],
            None => vec![ScheduledResponse::now(ResponseIntent::text(
                "I'm fresh out of facts!",
            ))],
        }
    }

    fn explore_spot(&self, user_id: &str) -> Vec<ScheduledResponse> {
        if self.spots.is_empty() {
            return vec![ScheduledResponse::now(ResponseIntent::text(
                "I've got nowhere new for you today!",
            ))];
        }
        let index = self
            .rotator
            .pick(user_id, PoolId::ExplorationSpots, self.spots.len());
        match self.spots.get(index) {
            Some(spot) => vec![
                ScheduledResponse::now(ResponseIntent::text(spot.description.clone())),
                ScheduledResponse::now(ResponseIntent::image(spot.image_url.clone())),
                ScheduledResponse::now(ResponseIntent::text(format!(
                    "Find it here: {}",
                    spot.map_url
                ))),
            ],
            None => vec![ScheduledResponse::now(ResponseIntent::text(
                "I've got nowhere new for you today!",
            ))],
        }
    }
}

/// Render the answer text for a resolved entry: "<name> is located at
/// <address>". Conflict markers have no answer.
fn identification_text(entry: &CatalogEntry) -> Option<String> {
    match &entry.kind {
        EntryKind::Resolved(meta) => Some(format!(
            "{} is located at {}",
            entry.canonical, meta.address
        )),
        EntryKind::ConflictMarker { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> DialogEngine {
        DialogEngine::with_defaults()
    }

    fn single_text(responses: &[ScheduledResponse]) -> &str {
        assert_eq!(responses.len(), 1, "expected one response: {responses:?}");
        match &responses[0].intent {
            ResponseIntent::Text { text } => text,
            other => panic!("expected text intent, got {other:?}"),
        }
    }

    #[test]
    fn attachments_get_fixed_fallback_in_any_state() {
        let engine = engine();
        engine
            .sessions()
            .set_state("u", DialogState::Directions);
        let responses = engine.handle_event(&InboundEvent::attachment("u"));
        assert_eq!(single_text(&responses), ATTACHMENT_FALLBACK);
        // State untouched.
        assert_eq!(engine.sessions().get("u").state, DialogState::Directions);
    }

    #[test]
    fn menu_state_reemits_menu_on_unrecognized_text() {
        let engine = engine();
        let responses = engine.handle_event(&InboundEvent::text("u", "blah blah"));
        match &responses[0].intent {
            ResponseIntent::QuickReplies { text, options } => {
                assert_eq!(text, MENU_TEXT);
                assert_eq!(options.len(), 6);
                assert_eq!(options[0].payload, "directions");
            }
            other => panic!("expected menu quick replies, got {other:?}"),
        }
    }

    #[test]
    fn nav_synonym_returns_to_menu_from_any_state() {
        let engine = engine();
        engine.sessions().set_state("u", DialogState::Businesses);
        let responses = engine.handle_event(&InboundEvent::text("u", "exit"));
        assert_eq!(engine.sessions().get("u").state, DialogState::Menu);
        assert!(matches!(
            responses[0].intent,
            ResponseIntent::QuickReplies { .. }
        ));
    }

    #[test]
    fn directions_not_found_keeps_state() {
        let engine = engine();
        engine.sessions().set_state("u", DialogState::Directions);
        let responses = engine.handle_event(&InboundEvent::text("u", "the moon"));
        assert_eq!(single_text(&responses), LOCATION_NOT_RECOGNIZED);
        assert_eq!(engine.sessions().get("u").state, DialogState::Directions);
        assert!(!engine.sessions().get("u").clarifying);
    }

    #[test]
    fn ambiguous_location_raises_clarifying_and_lists_members() {
        let engine = engine();
        engine.sessions().set_state("u", DialogState::Directions);
        let responses = engine.handle_event(&InboundEvent::text("u", "anderson"));

        let session = engine.sessions().get("u");
        assert_eq!(session.state, DialogState::Directions);
        assert!(session.clarifying);

        match &responses[0].intent {
            ResponseIntent::QuickReplies { text, options } => {
                assert_eq!(text, CLARIFY_TEXT);
                assert_eq!(options.len(), 3);
                // Labels respect the platform cap; payloads carry answers.
                for option in options {
                    assert!(option.label.chars().count() <= 20);
                    assert!(option.payload.contains("is located at"));
                }
            }
            other => panic!("expected quick replies, got {other:?}"),
        }
    }

    #[test]
    fn clarification_choice_emits_payload_verbatim_and_clears_flag() {
        let engine = engine();
        engine.sessions().set_state("u", DialogState::Directions);
        let responses = engine.handle_event(&InboundEvent::text("u", "anderson"));
        let payload = match &responses[0].intent {
            ResponseIntent::QuickReplies { options, .. } => options
                .iter()
                .find(|o| o.payload.starts_with("M.D. Anderson Hall"))
                .unwrap()
                .payload
                .clone(),
            other => panic!("expected quick replies, got {other:?}"),
        };

        let responses = engine.handle_event(&InboundEvent::quick_reply("u", payload));
        assert_eq!(
            single_text(&responses),
            "M.D. Anderson Hall is located at https://goo.gl/maps/KYpf6JNxeSr"
        );
        let session = engine.sessions().get("u");
        assert!(!session.clarifying);
        assert_eq!(session.state, DialogState::Directions);
    }

    #[test]
    fn resolved_location_answer_format() {
        let engine = engine();
        engine.sessions().set_state("u", DialogState::Directions);
        let responses = engine.handle_event(&InboundEvent::text("u", "md anderson hall"));
        assert_eq!(
            single_text(&responses),
            "M.D. Anderson Hall is located at https://goo.gl/maps/KYpf6JNxeSr"
        );
    }

    #[test]
    fn business_reply_is_staged_with_increasing_delays() {
        let engine = engine();
        engine.sessions().set_state("u", DialogState::Businesses);
        let responses = engine.handle_event(&InboundEvent::text("u", "north servery"));
        assert_eq!(responses.len(), 3);
        assert!(responses[0].delay < responses[1].delay);
        assert!(responses[1].delay < responses[2].delay);
        match &responses[0].intent {
            ResponseIntent::Text { text } => {
                assert!(text.starts_with("North Servery is located at"));
            }
            other => panic!("expected text, got {other:?}"),
        }
        assert!(matches!(responses[1].intent, ResponseIntent::Text { .. }));
        match &responses[2].intent {
            ResponseIntent::Text { text } => assert!(text.contains("https://")),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn quick_reply_payload_without_clarifying_is_parsed_normally() {
        let engine = engine();
        let responses = engine.handle_event(&InboundEvent::quick_reply("u", "directions"));
        assert_eq!(single_text(&responses), DIRECTIONS_PROMPT);
        assert_eq!(engine.sessions().get("u").state, DialogState::Directions);
    }

    #[test]
    fn fun_facts_are_transient_and_do_not_repeat() {
        let engine = engine();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..9 {
            let responses = engine.handle_event(&InboundEvent::text("u", "fun facts"));
            seen.insert(single_text(&responses).to_string());
            assert_eq!(engine.sessions().get("u").state, DialogState::Menu);
        }
        assert_eq!(seen.len(), 9, "9 draws from a 9-item pool must be distinct");

        // The 10th draw starts a new cycle and may repeat.
        let responses = engine.handle_event(&InboundEvent::text("u", "fun facts"));
        assert!(seen.contains(single_text(&responses)));
    }

    #[test]
    fn explore_is_transient_and_emits_text_image_map() {
        let engine = engine();
        engine.sessions().set_state("u", DialogState::Directions);
        let responses = engine.handle_event(&InboundEvent::text("u", "explore"));
        assert_eq!(responses.len(), 3);
        assert!(matches!(responses[0].intent, ResponseIntent::Text { .. }));
        assert!(matches!(responses[1].intent, ResponseIntent::Image { .. }));
        assert!(matches!(responses[2].intent, ResponseIntent::Text { .. }));
        assert_eq!(engine.sessions().get("u").state, DialogState::Menu);
    }

    #[test]
    fn transient_command_abandons_pending_clarification() {
        let engine = engine();
        engine.sessions().set_state("u", DialogState::Directions);
        engine.handle_event(&InboundEvent::text("u", "anderson"));
        assert!(engine.sessions().get("u").clarifying);

        // Typing a command mid-disambiguation abandons the clarification.
        engine.handle_event(&InboundEvent::text("u", "fun facts"));
        let session = engine.sessions().get("u");
        assert_eq!(session.state, DialogState::Menu);
        assert!(!session.clarifying);

        // The next quick reply is parsed normally, not echoed verbatim.
        let responses = engine.handle_event(&InboundEvent::quick_reply("u", "directions"));
        assert_eq!(single_text(&responses), DIRECTIONS_PROMPT);
        assert_eq!(engine.sessions().get("u").state, DialogState::Directions);
    }

    #[test]
    fn easter_egg_fires_from_any_state() {
        let engine = engine();
        engine.sessions().set_state("u", DialogState::Businesses);
        let responses = engine.handle_event(&InboundEvent::text("u", "hoot hoot"));
        assert_eq!(responses.len(), 2);
        assert!(matches!(responses[1].intent, ResponseIntent::Image { .. }));
        assert_eq!(engine.sessions().get("u").state, DialogState::Menu);
    }
}
