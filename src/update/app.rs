//! App message handlers (file import/export)

use crate::commands::Cmd;
use crate::csv::export_csv;
use crate::messages::AppMsg;
use crate::model::TableModel;

/// Handle app messages (file operations)
pub fn update_app(model: &mut TableModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::ImportFile(path) => Some(Cmd::LoadFile { path }),

        AppMsg::FileLoaded { path, result } => match result {
            Ok(content) => {
                tracing::info!("Importing {}", path.display());
                super::table::import_text(model, &content)
            }
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                Some(Cmd::error(format!("{}: {}", path.display(), e)))
            }
        },

        AppMsg::ExportFile(path) => {
            let content = export_csv(model.store.rows(), model.store.columns());
            Some(Cmd::SaveFile { path, content })
        }

        AppMsg::ExportCompleted { path, result } => match result {
            Ok(()) => Some(Cmd::info(format!("Exported: {}", path.display()))),
            Err(e) => {
                tracing::warn!("Failed to write {}: {}", path.display(), e);
                Some(Cmd::error(format!("{}: {}", path.display(), e)))
            }
        },
    }
}
