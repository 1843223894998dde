//! Edit session tests
//!
//! Drafts stay out of the table until committed, and the delete gate.

mod common;

use common::{apply, page_ids, test_model};
use rowdesk::messages::{EditMsg, TableMsg};
use rowdesk::model::Value;
use rowdesk::update::update;
use rowdesk::{Cmd, Msg};

#[test]
fn test_draft_is_invisible_until_commit() {
    let mut model = test_model();
    apply(
        &mut model,
        [
            Msg::begin_edit("1"),
            Msg::set_field("1", "name", "Alicia Johnson"),
        ],
    );

    assert_eq!(model.store.row("1").unwrap().display("name"), "Alice Johnson");
    assert_eq!(
        model.edits.draft("1").unwrap().display("name"),
        "Alicia Johnson"
    );

    let cmd = update(&mut model, Msg::Edit(EditMsg::CommitAll));
    assert_eq!(cmd, Some(Cmd::Persist));
    assert_eq!(model.store.row("1").unwrap().display("name"), "Alicia Johnson");
    assert!(model.edits.is_empty());
}

#[test]
fn test_commit_keeps_row_position() {
    let mut model = test_model();
    apply(
        &mut model,
        [
            Msg::begin_edit("5"),
            Msg::set_field("5", "role", "QA Lead"),
            Msg::Edit(EditMsg::CommitAll),
        ],
    );
    assert_eq!(model.store.rows()[4].id, "5");
    assert_eq!(model.store.len(), 11);
}

#[test]
fn test_discard_leaves_table_unchanged() {
    let mut model = test_model();
    let before = model.store.clone();
    apply(
        &mut model,
        [
            Msg::begin_edit("2"),
            Msg::set_field("2", "age", 99i64),
            Msg::begin_edit("3"),
        ],
    );
    assert_eq!(model.edits.len(), 2);

    let cmd = update(&mut model, Msg::Edit(EditMsg::DiscardAll));
    assert_eq!(cmd, Some(Cmd::Persist));
    assert!(model.edits.is_empty());
    assert_eq!(model.store, before);
}

#[test]
fn test_restart_edit_drops_unsaved_changes() {
    let mut model = test_model();
    apply(
        &mut model,
        [
            Msg::begin_edit("4"),
            Msg::set_field("4", "name", "changed"),
            Msg::begin_edit("4"),
        ],
    );
    assert_eq!(model.edits.draft("4").unwrap().display("name"), "Divya K");
}

#[test]
fn test_set_field_without_begin_does_nothing() {
    let mut model = test_model();
    let cmd = update(&mut model, Msg::set_field("4", "name", "x"));
    assert_eq!(cmd, None);
    assert!(!model.edits.is_editing("4"));
}

#[test]
fn test_begin_unknown_row_does_nothing() {
    let mut model = test_model();
    assert_eq!(update(&mut model, Msg::begin_edit("404")), None);
    assert!(model.edits.is_empty());
}

#[test]
fn test_id_field_cannot_be_edited() {
    let mut model = test_model();
    apply(&mut model, [Msg::begin_edit("1")]);
    let cmd = update(&mut model, Msg::set_field("1", "id", "999"));
    assert_eq!(cmd, None);
    apply(&mut model, [Msg::Edit(EditMsg::CommitAll)]);
    assert!(model.store.row("1").is_some());
    assert!(model.store.row("999").is_none());
}

#[test]
fn test_draft_can_add_new_field() {
    let mut model = test_model();
    apply(
        &mut model,
        [
            Msg::begin_edit("7"),
            Msg::set_field("7", "team", Value::text("Platform")),
            Msg::Edit(EditMsg::CommitAll),
        ],
    );
    assert_eq!(model.store.row("7").unwrap().display("team"), "Platform");
}

#[test]
fn test_committed_edit_shows_in_search() {
    let mut model = test_model();
    apply(
        &mut model,
        [
            Msg::begin_edit("10"),
            Msg::set_field("10", "role", "Developer"),
            Msg::search("developer"),
        ],
    );
    // Drafts never feed the pipeline
    assert_eq!(page_ids(&model), vec!["1", "7", "8", "11"]);

    apply(&mut model, [Msg::Edit(EditMsg::CommitAll)]);
    assert_eq!(page_ids(&model), vec!["1", "7", "8", "10", "11"]);
}

#[test]
fn test_reset_drops_drafts() {
    let mut model = test_model();
    apply(
        &mut model,
        [
            Msg::begin_edit("1"),
            Msg::Table(TableMsg::ResetToSeed),
        ],
    );
    assert!(model.edits.is_empty());
}

#[test]
fn test_delete_confirmation_flow() {
    let mut model = test_model();
    apply(&mut model, [Msg::Table(TableMsg::RequestDelete("9".into()))]);
    assert!(model.store.row("9").is_some());

    let cmd = update(&mut model, Msg::Table(TableMsg::ConfirmDelete));
    assert_eq!(cmd, Some(Cmd::Persist));
    assert!(model.store.row("9").is_none());
    assert!(model.pending_delete.is_none());
}

#[test]
fn test_request_delete_unknown_row_is_ignored() {
    let mut model = test_model();
    apply(&mut model, [Msg::Table(TableMsg::RequestDelete("404".into()))]);
    assert!(model.pending_delete.is_none());
}

#[test]
fn test_delete_then_reset_restores_row() {
    let mut model = test_model();
    apply(&mut model, [Msg::delete_row("2"), Msg::search("bob")]);
    assert!(page_ids(&model).is_empty());

    apply(&mut model, [Msg::Table(TableMsg::ResetToSeed)]);
    assert_eq!(model.store.row("2").unwrap().display("name"), "Bob Singh");
    assert_eq!(model.store.len(), 11);
    assert!(model.query.search_is_blank());
}
