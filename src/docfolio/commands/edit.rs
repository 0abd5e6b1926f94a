use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DocfolioError, Result};
use crate::index::DocSelector;
use crate::model::DocumentUpdate;
use crate::store::backend::KeyValueStore;
use crate::store::categories::CategoryRegistry;
use crate::store::DataStore;

use super::helpers::resolve_selectors;

/// Rename and/or recategorize one document. The file is never touched.
pub fn run<S: DataStore, K: KeyValueStore>(
    store: &mut S,
    categories: &CategoryRegistry<K>,
    selector: &DocSelector,
    name: Option<&str>,
    category: Option<&str>,
) -> Result<CmdResult> {
    if let DocSelector::Range(..) = selector {
        return Err(DocfolioError::Api(format!(
            "Expected a single document, got {}",
            selector
        )));
    }
    let mut update = DocumentUpdate::default();

    if let Some(name) = name {
        let name = name.trim();
        if name.is_empty() {
            return Err(DocfolioError::Api("Document name cannot be empty".into()));
        }
        update.name = Some(name.to_string());
    }
    if let Some(category) = category {
        if !categories.contains(category) {
            return Err(DocfolioError::Api(format!("Unknown category: {}", category)));
        }
        update.category = Some(category.to_string());
    }
    if update.is_empty() {
        return Err(DocfolioError::Api("Nothing to update: give a new name or category".into()));
    }

    let target = resolve_selectors(store, std::slice::from_ref(selector))?
        .into_iter()
        .next()
        .ok_or_else(|| DocfolioError::DocumentNotFound(selector.to_string()))?;
    let updated = store.update_document(&target.document.id, &update)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Document updated ({}): {} [{}]",
        target.index, updated.name, updated.category
    )));
    result.affected_documents.push(updated);
    Ok(result)
}
