use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::DocSelector;
use crate::store::DataStore;

use super::helpers::resolve_selectors;

pub fn run<S: DataStore>(store: &mut S, selectors: &[DocSelector]) -> Result<CmdResult> {
    // Resolve everything up front: positions refer to the list before any deletion
    let resolved = resolve_selectors(store, selectors)?;
    let mut result = CmdResult::default();

    for display in resolved {
        let removed = store.delete_document(&display.document.id)?;
        result.add_message(CmdMessage::success(format!(
            "Document deleted ({}): {}",
            display.index, removed.name
        )));
        result.affected_documents.push(removed);
    }

    Ok(result)
}
