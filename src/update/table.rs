//! Record store message handlers (import, columns, delete, reset)

use crate::commands::Cmd;
use crate::csv::{import_csv, import_headers};
use crate::messages::TableMsg;
use crate::model::TableModel;

/// Handle record store messages
pub fn update_table(model: &mut TableModel, msg: TableMsg) -> Option<Cmd> {
    match msg {
        TableMsg::ImportCsv(text) => import_text(model, &text),

        TableMsg::AddColumn { key, label } => {
            if model.store.add_column(&key, label) {
                Some(Cmd::Persist)
            } else {
                None
            }
        }

        TableMsg::ToggleColumn(key) => {
            if model.store.toggle_column_visibility(&key) {
                Some(Cmd::Persist)
            } else {
                None
            }
        }

        TableMsg::RequestDelete(id) => {
            if model.store.row(&id).is_some() {
                model.pending_delete = Some(id);
            } else {
                tracing::debug!(%id, "delete requested for unknown row");
            }
            None
        }

        TableMsg::ConfirmDelete => {
            let id = model.pending_delete.take()?;
            delete_row(model, &id)
        }

        TableMsg::CancelDelete => {
            model.pending_delete = None;
            None
        }

        TableMsg::DeleteRow(id) => delete_row(model, &id),

        TableMsg::ResetToSeed => {
            model.reset_to_seed();
            Some(Cmd::Persist)
        }
    }
}

/// Replace every row with the parsed CSV, or leave the store untouched on error
pub(super) fn import_text(model: &mut TableModel, text: &str) -> Option<Cmd> {
    let rows = match import_csv(text) {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!("CSV import rejected: {}", e);
            return Some(Cmd::error(e.to_string()));
        }
    };

    let count = rows.len();
    model.store.replace_all(rows);
    model.query.page = 0;
    // Drafts refer to ids that no longer exist
    model.edits.discard_all();
    model.pending_delete = None;

    if model.sync_columns_on_import {
        if let Ok(headers) = import_headers(text) {
            let added = model
                .store
                .register_columns(headers.iter().map(String::as_str));
            if added > 0 {
                tracing::debug!(added, "registered columns from CSV header");
            }
        }
    }

    Some(Cmd::batch(vec![
        Cmd::Persist,
        Cmd::info(format!("Imported {} rows", count)),
    ]))
}

fn delete_row(model: &mut TableModel, id: &str) -> Option<Cmd> {
    if model.pending_delete.as_deref() == Some(id) {
        model.pending_delete = None;
    }
    if !model.store.delete_row(id) {
        return None;
    }
    if model.edits.purge(id) {
        tracing::debug!(id, "dropped draft of deleted row");
    }
    Some(Cmd::Persist)
}
