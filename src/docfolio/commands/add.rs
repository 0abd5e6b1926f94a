use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DocfolioError, Result};
use crate::model::{Document, PickedFile};
use crate::store::backend::KeyValueStore;
use crate::store::categories::CategoryRegistry;
use crate::store::DataStore;

/// Import a picked file and index it under `name` / `category`.
///
/// `picked` is `None` when the user cancelled the picker; that is not an error.
pub fn run<S: DataStore, K: KeyValueStore>(
    store: &mut S,
    categories: &CategoryRegistry<K>,
    picked: Option<&PickedFile>,
    name: &str,
    category: &str,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let Some(picked) = picked else {
        result.add_message(CmdMessage::info("No file selected, nothing added."));
        return Ok(result);
    };

    let name = name.trim();
    if name.is_empty() {
        return Err(DocfolioError::Api("Document name cannot be empty".into()));
    }
    if !categories.contains(category) {
        return Err(DocfolioError::Api(format!("Unknown category: {}", category)));
    }

    let path = store.import_file(&picked.source(), picked.suggested_name())?;
    let document = Document::new(name, picked.document_type(), category, path.to_string_lossy())
        .with_size(picked.size)
        .with_mime_type(picked.mime_type.clone());

    if let Err(e) = store.save_document(&document) {
        store.discard_import(&path);
        return Err(e);
    }

    result.add_message(CmdMessage::success(format!(
        "Document added: {} ({}, {})",
        document.name, document.doc_type, document.category
    )));
    result.affected_documents.push(document);
    Ok(result)
}
