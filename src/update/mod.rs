//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod app;
mod edit;
mod query;
mod table;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::TableModel;

#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use app::update_app;
pub use edit::update_edit;
pub use query::update_query;
pub use table::update_table;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut TableModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut TableModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Table(m) => table::update_table(model, m),
        Msg::Query(m) => query::update_query(model, m),
        Msg::Edit(m) => edit::update_edit(model, m),
        Msg::App(m) => app::update_app(model, m),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after state counters and logs the diff.
#[cfg(debug_assertions)]
fn update_traced(model: &mut TableModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = model.summary();
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(model, msg);

    if let Some(diff) = before.diff(&model.summary()) {
        debug!(target: "state", %diff, "state changed");
    }

    result
}

/// Get a display name for a message type
///
/// Example outputs:
/// - `Query::SetPage(2)`
/// - `Edit::CommitAll`
/// - `Table::ImportCsv(<120 bytes>)`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    use crate::messages::TableMsg;

    match msg {
        // CSV payloads can be large; log the size only
        Msg::Table(TableMsg::ImportCsv(text)) => {
            format!("Table::ImportCsv(<{} bytes>)", text.len())
        }
        Msg::Table(m) => format!("Table::{:?}", m),
        Msg::Query(m) => format!("Query::{:?}", m),
        Msg::Edit(m) => format!("Edit::{:?}", m),
        Msg::App(crate::messages::AppMsg::FileLoaded { path, .. }) => {
            format!("App::FileLoaded({})", path.display())
        }
        Msg::App(m) => format!("App::{:?}", m),
    }
}
