//! Monkey tests - edge cases and long pseudo-random edit sequences
//!
//! Every step goes through `update`, which in debug builds also checks the
//! field invariants (caret never inside a token, suggestion state current).

mod common;

use common::{body, caret, send, test_model, BODY};
use varfield::editable::{EditContext, MoveTarget, TextEditMsg};
use varfield::messages::Msg;
use varfield::template::{render, scanner, Affinity};
use varfield::update::update;

/// Small deterministic generator so failures reproduce
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn pick(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }
}

const ALPHABET: &[char] = &['a', 'n', ' ', '{', '}', '{', '}', 'é', '\n', '!'];

fn random_msg(rng: &mut Lcg, len: usize) -> TextEditMsg {
    match rng.pick(14) {
        0..=4 => TextEditMsg::InsertChar(ALPHABET[rng.pick(ALPHABET.len())]),
        5 => TextEditMsg::DeleteBackward,
        6 => TextEditMsg::DeleteForward,
        7 => TextEditMsg::Move(MoveTarget::Left),
        8 => TextEditMsg::Move(MoveTarget::Right),
        9 => TextEditMsg::MoveWithSelection(MoveTarget::WordLeft),
        10 => TextEditMsg::SetCursor {
            offset: rng.pick(len + 2),
            affinity: Affinity::Nearest,
        },
        11 => TextEditMsg::AcceptSuggestion,
        12 => TextEditMsg::Paste("x{name}y".into()),
        _ => TextEditMsg::DeleteWordBackward,
    }
}

fn assert_consistent(text: &str, offset: usize) {
    let len = text.chars().count();
    assert!(offset <= len, "caret {} past end {} in {:?}", offset, len, text);

    let spans = scanner::scan(text);
    assert!(
        scanner::containing(&spans, offset).is_none(),
        "caret {} inside a token in {:?}",
        offset,
        text
    );
    for span in &spans {
        assert!(!span.identifier.is_empty());
        assert!(!span.identifier.contains(['{', '}']));
    }

    let segments = render::render(text);
    assert_eq!(render::to_literal(&segments), text);
}

#[test]
fn test_random_edit_sequences_keep_invariants() {
    for seed in 1..=20u64 {
        let mut rng = Lcg(seed);
        let mut model = test_model("", 0);
        for _ in 0..300 {
            let len = body(&model).chars().count();
            let msg = random_msg(&mut rng, len);
            send(&mut model, msg);
            assert_consistent(&body(&model), caret(&model));
        }
    }
}

#[test]
fn test_change_notifications_match_text() {
    let mut rng = Lcg(7);
    let mut model = test_model("Hi {name}", 9);
    let mut last = body(&model);
    for _ in 0..500 {
        let len = last.chars().count();
        let msg = random_msg(&mut rng, len);
        let cmd = send(&mut model, msg);
        let now = body(&model);
        match cmd.as_ref().and_then(|c| c.changed_text()) {
            Some(text) => assert_eq!(text, now),
            None => assert_eq!(now, last, "text changed without a notification"),
        }
        last = now;
    }
}

// ========================================================================
// Odd inputs
// ========================================================================

#[test]
fn test_only_braces() {
    let mut model = test_model("}}{{}}{{", 4);
    send(&mut model, TextEditMsg::InsertChar('x'));
    assert_eq!(body(&model), "}}{{x}}{{");
    // "{{x}" is nested, so everything stays literal
    assert!(scanner::scan(&body(&model)).is_empty());
    assert_eq!(caret(&model), 5);
    assert!(model.suggestion(BODY).is_none());
}

#[test]
fn test_huge_offsets_clamp() {
    let mut model = test_model("abc", 0);
    send(
        &mut model,
        TextEditMsg::SetCursor {
            offset: usize::MAX,
            affinity: Affinity::FromLeft,
        },
    );
    assert_eq!(caret(&model), 3);
}

#[test]
fn test_empty_field_operations() {
    let mut model = test_model("", 0);
    for msg in [
        TextEditMsg::DeleteBackward,
        TextEditMsg::DeleteForward,
        TextEditMsg::DeleteWordBackward,
        TextEditMsg::AcceptSuggestion,
        TextEditMsg::SuggestionNext,
        TextEditMsg::CancelSuggestion,
    ] {
        assert_eq!(send(&mut model, msg), None);
    }
    assert_eq!(body(&model), "");
}

#[test]
fn test_focus_messages() {
    let mut model = test_model("", 0);
    assert_eq!(model.focused, BODY);
    assert!(update(&mut model, Msg::Focus(BODY)).is_none());
    assert!(update(&mut model, Msg::Focus(EditContext::EmailSubject)).is_some());
    assert_eq!(model.focused, EditContext::EmailSubject);
}
