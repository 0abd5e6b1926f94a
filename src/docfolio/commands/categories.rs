use crate::commands::{CategoryUsage, CmdMessage, CmdResult};
use crate::error::{DocfolioError, Result};
use crate::store::backend::KeyValueStore;
use crate::store::categories::CategoryRegistry;
use crate::store::DataStore;

fn usage_count<S: DataStore>(store: &S, name: &str) -> Result<usize> {
    Ok(store
        .list_documents()?
        .iter()
        .filter(|d| d.category == name)
        .count())
}

/// Every registered category with the number of documents filed under it.
pub fn list<S: DataStore, K: KeyValueStore>(
    store: &S,
    registry: &CategoryRegistry<K>,
) -> Result<CmdResult> {
    let documents = store.list_documents()?;
    let usage = registry
        .get_categories()
        .into_iter()
        .map(|name| CategoryUsage {
            documents: documents.iter().filter(|d| d.category == name).count(),
            name,
        })
        .collect();

    Ok(CmdResult::default().with_categories(usage))
}

pub fn add<K: KeyValueStore>(registry: &CategoryRegistry<K>, name: &str) -> Result<CmdResult> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DocfolioError::Api("Category name cannot be empty".into()));
    }

    let mut result = CmdResult::default();
    if registry.add_category(name)? {
        result.add_message(CmdMessage::success(format!("Category added: {}", name)));
    } else {
        result.add_message(CmdMessage::warning(format!(
            "Category already exists: {}",
            name
        )));
    }
    Ok(result)
}

/// Remove a category name. Documents filed under it keep the label; unless
/// `force` is set, removal is refused while any document still uses it.
pub fn remove<S: DataStore, K: KeyValueStore>(
    store: &S,
    registry: &CategoryRegistry<K>,
    name: &str,
    force: bool,
) -> Result<CmdResult> {
    if !force {
        let in_use = usage_count(store, name)?;
        if in_use > 0 {
            return Err(DocfolioError::Api(format!(
                "Category \"{}\" is in use by {} document(s); pass --force to remove it anyway",
                name, in_use
            )));
        }
    }

    let mut result = CmdResult::default();
    if registry.remove_category(name)? {
        result.add_message(CmdMessage::success(format!("Category removed: {}", name)));
    } else {
        result.add_message(CmdMessage::info(format!("No such category: {}", name)));
    }
    Ok(result)
}
