//! Edit session message handlers

use crate::commands::Cmd;
use crate::messages::EditMsg;
use crate::model::TableModel;

/// Handle edit session messages
pub fn update_edit(model: &mut TableModel, msg: EditMsg) -> Option<Cmd> {
    let changed = match msg {
        EditMsg::Begin(id) => model.edits.begin(&model.store, &id),
        EditMsg::SetField { id, key, value } => model.edits.set_field(&id, &key, value),
        EditMsg::CommitAll => {
            let drafts = model.edits.len();
            let written = model.edits.commit_all(&mut model.store);
            tracing::debug!(drafts, written, "committed drafts");
            drafts > 0
        }
        EditMsg::DiscardAll => model.edits.discard_all() > 0,
    };

    if changed {
        Some(Cmd::Persist)
    } else {
        None
    }
}
