//! Suggestion tests - detection, filtering, acceptance

mod common;

use common::{body, caret, send, test_model, type_text, BODY};
use varfield::editable::{MoveTarget, TextEditMsg};
use varfield::template::{engine, suggest, InsertTokenError, SuggestionState};
use varfield::Cmd;

fn names(model: &varfield::TemplateModel) -> Vec<String> {
    model.suggestion_names(BODY)
}

// ========================================================================
// Detection
// ========================================================================

#[test]
fn test_typing_open_run_activates_suggestions() {
    let mut model = test_model("", 0);
    type_text(&mut model, "Hello {na");

    assert_eq!(
        model.suggestion(BODY),
        Some(SuggestionState {
            query_start: 6,
            query: "na".into()
        })
    );
    assert_eq!(names(&model), vec!["name", "nationality"]);
}

#[test]
fn test_filter_is_case_insensitive_substring() {
    let mut model = test_model("", 0);
    type_text(&mut model, "{NAT");
    assert_eq!(names(&model), vec!["nationality"]);

    send(&mut model, TextEditMsg::DeleteBackward);
    send(&mut model, TextEditMsg::DeleteBackward);
    // "{N" matches both again
    assert_eq!(names(&model), vec!["name", "nationality"]);
}

#[test]
fn test_bare_open_brace_lists_everything() {
    let mut model = test_model("Hi ", 3);
    type_text(&mut model, "{");
    assert_eq!(model.suggestion(BODY).unwrap().query, "");
    assert_eq!(names(&model), vec!["name", "nationality"]);
}

#[test]
fn test_nested_open_brace_disables_suggestions() {
    let mut model = test_model("", 0);
    type_text(&mut model, "{{na");
    assert!(model.suggestion(BODY).is_none());
}

#[test]
fn test_no_suggestions_after_closed_token() {
    let mut model = test_model("", 0);
    type_text(&mut model, "{name} and");
    assert!(model.suggestion(BODY).is_none());
}

#[test]
fn test_moving_never_opens_suggestions() {
    let mut model = test_model("Hi {na", 0);
    send(&mut model, TextEditMsg::Move(MoveTarget::DocumentEnd));
    assert!(model.suggestion(BODY).is_none());
}

#[test]
fn test_detect_and_suggest_are_pure() {
    let state = suggest::detect("Hello {na", 9).unwrap();
    assert_eq!(state.query_start, 6);
    assert_eq!(state.query_end(), 9);
    assert!(suggest::detect("Hello {na}", 10).is_none());
    assert!(suggest::detect("Hello", 5).is_none());

    let catalog = common::name_catalog();
    let found: Vec<_> = suggest::suggest(&catalog, "zzz").into_iter().collect();
    assert!(found.is_empty());
}

// ========================================================================
// Acceptance
// ========================================================================

#[test]
fn test_insert_token_replaces_query() {
    let outcome = engine::insert_token("Hello {na", 6, 9, "name").unwrap();
    assert_eq!(outcome.text, "Hello {name}");
    assert_eq!(outcome.offset, 12);
    assert!(outcome.suggestion.is_none());
}

#[test]
fn test_insert_token_rejects_inconsistent_start() {
    assert_eq!(
        engine::insert_token("Hello {na", 2, 9, "name"),
        Err(InsertTokenError::NotAnOpenBrace { query_start: 2 })
    );
    assert!(matches!(
        engine::insert_token("Hello {na", 9, 9, "name"),
        Err(InsertTokenError::OutOfRange { .. })
    ));
    assert!(matches!(
        engine::insert_token("Hello {na", 6, 9, "a}b"),
        Err(InsertTokenError::InvalidIdentifier(_))
    ));
}

#[test]
fn test_accept_highlighted() {
    let mut model = test_model("", 0);
    type_text(&mut model, "Hello {na");
    let cmd = send(&mut model, TextEditMsg::AcceptSuggestion);

    assert_eq!(cmd, Some(Cmd::TemplateChanged("Hello {name}".into())));
    assert_eq!(caret(&model), 12);
    assert!(model.suggestion(BODY).is_none());
}

#[test]
fn test_highlight_navigation_wraps() {
    let mut model = test_model("", 0);
    type_text(&mut model, "{na");

    assert_eq!(send(&mut model, TextEditMsg::SuggestionNext), Some(Cmd::Redraw));
    assert_eq!(model.email_body.highlighted_index(), Some(1));
    send(&mut model, TextEditMsg::SuggestionNext);
    assert_eq!(model.email_body.highlighted_index(), Some(0));
    send(&mut model, TextEditMsg::SuggestionPrev);
    send(&mut model, TextEditMsg::AcceptSuggestion);

    assert_eq!(body(&model), "{nationality}");
}

#[test]
fn test_accept_without_matches_is_noop() {
    let mut model = test_model("", 0);
    type_text(&mut model, "{zzz");
    assert!(names(&model).is_empty());
    assert_eq!(send(&mut model, TextEditMsg::AcceptSuggestion), None);
    assert_eq!(body(&model), "{zzz");
}

#[test]
fn test_insert_token_message_uses_open_run() {
    let mut model = test_model("", 0);
    type_text(&mut model, "Hi {x");
    // Identifiers outside the catalog are allowed
    let cmd = send(&mut model, TextEditMsg::InsertToken("ticketId".into()));
    assert_eq!(cmd, Some(Cmd::TemplateChanged("Hi {ticketId}".into())));
}

#[test]
fn test_insert_token_without_run_is_rejected() {
    let mut model = test_model("Hello", 5);
    assert_eq!(
        send(&mut model, TextEditMsg::InsertToken("name".into())),
        None
    );
    assert_eq!(body(&model), "Hello");
}

// ========================================================================
// Dismissal
// ========================================================================

#[test]
fn test_cancel_keeps_run_closed_until_new_brace() {
    let mut model = test_model("", 0);
    type_text(&mut model, "{na");
    assert_eq!(send(&mut model, TextEditMsg::CancelSuggestion), Some(Cmd::Redraw));
    assert!(model.suggestion(BODY).is_none());

    type_text(&mut model, "m");
    assert!(model.suggestion(BODY).is_none());
    assert_eq!(send(&mut model, TextEditMsg::CancelSuggestion), None);

    type_text(&mut model, "} {");
    assert!(model.suggestion(BODY).is_some());
}
