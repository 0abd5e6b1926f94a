use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::DataStore;

use super::helpers::indexed_documents;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Case-insensitive substring of the document name.
    pub search: Option<String>,
    /// Exact category label. `None` shows every category.
    pub category: Option<String>,
}

impl ListFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Default::default()
        }
    }

    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Default::default()
        }
    }
}

/// Reconciled listing. Display positions are assigned before filtering, so a
/// filtered row keeps the index it has in the full list.
pub fn run<S: DataStore>(store: &S, filter: &ListFilter) -> Result<CmdResult> {
    let term = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase);

    let listed = indexed_documents(store)?
        .into_iter()
        .filter(|dd| {
            term.as_ref()
                .map_or(true, |t| dd.document.name.to_lowercase().contains(t.as_str()))
        })
        .filter(|dd| {
            filter
                .category
                .as_ref()
                .map_or(true, |c| &dd.document.category == c)
        })
        .collect();

    Ok(CmdResult::default().with_listed_documents(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MemEnv;

    fn names(result: &CmdResult) -> Vec<&str> {
        result
            .listed_documents
            .iter()
            .map(|dd| dd.document.name.as_str())
            .collect()
    }

    fn seeded() -> MemEnv {
        let mut env = MemEnv::new();
        env.add_document("Tax Return 2023", "Finanzas");
        env.add_document("Passport", "Personal");
        env.add_document("tax receipt", "Finanzas");
        env
    }

    #[test]
    fn lists_everything_in_insertion_order() {
        let env = seeded();
        let result = run(&env.store, &ListFilter::default()).unwrap();
        assert_eq!(names(&result), vec!["Tax Return 2023", "Passport", "tax receipt"]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let env = seeded();
        let result = run(&env.store, &ListFilter::search("TAX")).unwrap();
        assert_eq!(names(&result), vec!["Tax Return 2023", "tax receipt"]);
    }

    #[test]
    fn filtered_rows_keep_full_list_positions() {
        let env = seeded();
        let result = run(&env.store, &ListFilter::category("Personal")).unwrap();
        assert_eq!(result.listed_documents.len(), 1);
        assert_eq!(result.listed_documents[0].index, 2);
    }

    #[test]
    fn search_and_category_combine() {
        let env = seeded();
        let filter = ListFilter {
            search: Some("receipt".into()),
            category: Some("Finanzas".into()),
        };
        let result = run(&env.store, &filter).unwrap();
        assert_eq!(names(&result), vec!["tax receipt"]);
    }

    #[test]
    fn blank_search_matches_all() {
        let env = seeded();
        let result = run(&env.store, &ListFilter::search("   ")).unwrap();
        assert_eq!(result.listed_documents.len(), 3);
    }

    #[test]
    fn listing_drops_orphans() {
        let mut env = MemEnv::new();
        let gone = env.add_document("Gone", "Personal");
        env.add_document("Here", "Personal");
        env.backend.remove_file_externally(gone.path());

        let result = run(&env.store, &ListFilter::default()).unwrap();
        assert_eq!(names(&result), vec!["Here"]);
        assert_eq!(result.listed_documents[0].index, 1);
    }
}
