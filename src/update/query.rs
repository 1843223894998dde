//! Query message handlers (search, sort, pagination)

use crate::commands::Cmd;
use crate::messages::QueryMsg;
use crate::model::TableModel;

/// Handle query messages
pub fn update_query(model: &mut TableModel, msg: QueryMsg) -> Option<Cmd> {
    let query = &mut model.query;
    match msg {
        QueryMsg::SetSearch(text) => {
            query.search_text = text;
            query.page = 0;
        }

        QueryMsg::SetSort(spec) => {
            query.sort = spec;
        }

        QueryMsg::CycleSort(key) => {
            query.sort = query.sort.cycle(&key);
        }

        QueryMsg::SetPage(page) => {
            query.page = page;
        }

        QueryMsg::SetPageSize(size) => {
            if size == 0 {
                tracing::debug!("ignoring zero page size");
                return None;
            }
            query.page_size = size;
            query.page = 0;
        }
    }
    Some(Cmd::Persist)
}
