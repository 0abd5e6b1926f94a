use crate::error::{DocfolioError, Result};
use crate::index::{index_documents, DisplayDocument, DocSelector};
use crate::store::DataStore;
use std::collections::HashSet;

/// Every document with its display position, in index order.
pub fn indexed_documents<S: DataStore>(store: &S) -> Result<Vec<DisplayDocument>> {
    Ok(index_documents(store.list_documents()?))
}

/// Resolve selectors against one reconciled snapshot, so positions stay
/// meaningful even if the caller mutates documents afterwards.
///
/// Each document appears once, at its first mention, however many selectors
/// (positions, overlapping ranges, ids) point at it.
pub fn resolve_selectors<S: DataStore>(
    store: &S,
    selectors: &[DocSelector],
) -> Result<Vec<DisplayDocument>> {
    let indexed = indexed_documents(store)?;
    let mut seen = HashSet::new();
    let mut resolved = Vec::new();

    for selector in selectors {
        let matched: &[DisplayDocument] = match selector {
            DocSelector::Index(n) => position_range(&indexed, *n, *n)?,
            DocSelector::Range(start, end) => position_range(&indexed, *start, *end)?,
            DocSelector::Id(id) => {
                let position = indexed
                    .iter()
                    .position(|dd| dd.document.id == *id)
                    .ok_or_else(|| DocfolioError::DocumentNotFound(selector.to_string()))?;
                &indexed[position..=position]
            }
        };
        for display in matched {
            if seen.insert(display.document.id.clone()) {
                resolved.push(display.clone());
            }
        }
    }

    Ok(resolved)
}

/// Positions `start..=end` (1-based), all of which must exist.
fn position_range(
    indexed: &[DisplayDocument],
    start: usize,
    end: usize,
) -> Result<&[DisplayDocument]> {
    if start == 0 || start > end {
        return Err(DocfolioError::Api(format!("Invalid range {}-{}", start, end)));
    }
    if end > indexed.len() {
        let first_missing = start.max(indexed.len() + 1);
        return Err(DocfolioError::DocumentNotFound(first_missing.to_string()));
    }
    Ok(&indexed[start - 1..end])
}
