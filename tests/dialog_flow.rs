//! End-to-end dialogue flows against the built-in catalogs.

use std::collections::HashSet;

use campus_assist::dialog::types::{InboundEvent, ResponseIntent};
use campus_assist::dialog::DialogEngine;
use campus_assist::session::DialogState;

fn text_of(intent: &ResponseIntent) -> &str {
    match intent {
        ResponseIntent::Text { text } => text,
        other => panic!("expected text intent, got {other:?}"),
    }
}

#[test]
fn anderson_disambiguation_round_trip() {
    let engine = DialogEngine::with_defaults();

    // Fresh user enters the directions flow.
    let responses = engine.handle_event(&InboundEvent::text("4242", "directions"));
    assert_eq!(responses.len(), 1);
    assert_eq!(engine.sessions().get("4242").state, DialogState::Directions);

    // "anderson" is ambiguous among exactly the three Anderson buildings.
    let responses = engine.handle_event(&InboundEvent::text("4242", "anderson"));
    let session = engine.sessions().get("4242");
    assert_eq!(session.state, DialogState::Directions);
    assert!(session.clarifying);

    let options = match &responses[0].intent {
        ResponseIntent::QuickReplies { options, .. } => options.clone(),
        other => panic!("expected quick replies, got {other:?}"),
    };
    assert_eq!(options.len(), 3);

    // Tapping the M.D. Anderson Hall option yields the precomputed answer.
    let choice = options
        .iter()
        .find(|o| o.payload.starts_with("M.D. Anderson Hall"))
        .expect("M.D. Anderson Hall option present");
    let responses = engine.handle_event(&InboundEvent::quick_reply("4242", choice.payload.clone()));
    assert_eq!(
        text_of(&responses[0].intent),
        "M.D. Anderson Hall is located at https://goo.gl/maps/KYpf6JNxeSr"
    );
    assert!(!engine.sessions().get("4242").clarifying);
}

#[test]
fn global_nav_escapes_every_flow() {
    let engine = DialogEngine::with_defaults();

    for (entry, state) in [
        ("directions", DialogState::Directions),
        ("businesses", DialogState::Businesses),
    ] {
        engine.handle_event(&InboundEvent::text("7", entry));
        assert_eq!(engine.sessions().get("7").state, state);

        let responses = engine.handle_event(&InboundEvent::text("7", "exit"));
        assert_eq!(engine.sessions().get("7").state, DialogState::Menu);
        match &responses[0].intent {
            ResponseIntent::QuickReplies { options, .. } => assert_eq!(options.len(), 6),
            other => panic!("expected main menu, got {other:?}"),
        }
    }
}

#[test]
fn not_recognized_is_retryable() {
    let engine = DialogEngine::with_defaults();
    engine.handle_event(&InboundEvent::text("9", "directions"));

    let responses = engine.handle_event(&InboundEvent::text("9", "narnia"));
    assert!(text_of(&responses[0].intent).contains("recognize"));
    assert_eq!(engine.sessions().get("9").state, DialogState::Directions);

    // A retry with a real building still works.
    let responses = engine.handle_event(&InboundEvent::text("9", "fondren library"));
    assert!(text_of(&responses[0].intent).starts_with("Fondren Library is located at"));
}

#[test]
fn nine_fun_facts_without_repeats_then_cycle_restarts() {
    let engine = DialogEngine::with_defaults();
    let mut seen = HashSet::new();
    for _ in 0..9 {
        let responses = engine.handle_event(&InboundEvent::text("55", "fun facts"));
        assert!(seen.insert(text_of(&responses[0].intent).to_string()));
    }
    assert_eq!(seen.len(), 9);

    // The 10th draw is allowed to repeat an earlier fact.
    let responses = engine.handle_event(&InboundEvent::text("55", "fun facts"));
    assert!(seen.contains(text_of(&responses[0].intent)));
}

#[test]
fn fun_fact_histories_are_per_user() {
    let engine = DialogEngine::with_defaults();
    for _ in 0..9 {
        engine.handle_event(&InboundEvent::text("a", "fun facts"));
    }
    // A different user still has a full pool ahead of them.
    let mut seen = HashSet::new();
    for _ in 0..9 {
        let responses = engine.handle_event(&InboundEvent::text("b", "fun facts"));
        assert!(seen.insert(text_of(&responses[0].intent).to_string()));
    }
}

#[test]
fn servery_disambiguation_then_staged_reply() {
    let engine = DialogEngine::with_defaults();
    engine.handle_event(&InboundEvent::text("77", "businesses"));

    // A bare "the servery" is ambiguous among the four serveries.
    let responses = engine.handle_event(&InboundEvent::text("77", "the servery"));
    let options = match &responses[0].intent {
        ResponseIntent::QuickReplies { options, .. } => options.clone(),
        other => panic!("expected quick replies, got {other:?}"),
    };
    assert_eq!(options.len(), 4);
    assert!(engine.sessions().get("77").clarifying);

    // Picking one emits its payload verbatim and clears the flag.
    let responses =
        engine.handle_event(&InboundEvent::quick_reply("77", options[0].payload.clone()));
    assert!(text_of(&responses[0].intent).contains("is located at"));
    assert!(!engine.sessions().get("77").clarifying);

    // A specific servery gets the full staged reply.
    let responses = engine.handle_event(&InboundEvent::text("77", "seibel servery"));
    assert_eq!(responses.len(), 3);
    assert!(responses[0].delay.is_zero());
    assert!(responses[1].delay < responses[2].delay);
}

#[test]
fn restart_forgets_everything() {
    let engine = DialogEngine::with_defaults();
    engine.handle_event(&InboundEvent::text("x", "directions"));
    engine.handle_event(&InboundEvent::text("x", "anderson"));
    assert!(engine.sessions().get("x").clarifying);
    drop(engine);

    // A rebuilt engine treats the same user as first contact.
    let engine = DialogEngine::with_defaults();
    let session = engine.sessions().get("x");
    assert_eq!(session.state, DialogState::Menu);
    assert!(!session.clarifying);

    // And first contact with unrecognized text shows the menu.
    let responses = engine.handle_event(&InboundEvent::text("x", "hello there"));
    assert!(matches!(
        responses[0].intent,
        ResponseIntent::QuickReplies { .. }
    ));
}
