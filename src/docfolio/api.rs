//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for docfolio operations, whatever UI sits on top.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Wires** the document store, category registry and session store onto one
//!   shared backend
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (e.g. parsing display indexes into selectors)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O operations**: No stdout, stderr, or formatting
//! - **Gatekeeping**: [`DocfolioApi::require_session`] is offered, but callers
//!   decide which operations need it
//!
//! ## Generic Over StorageBackend
//!
//! `DocfolioApi<B: StorageBackend>`:
//! - Production: `DocfolioApi<FsBackend>`
//! - Testing: `DocfolioApi<MemBackend>`

use crate::commands;
use crate::config::DocfolioConfig;
use crate::error::{DocfolioError, Result};
use crate::index::{parse_selector, parse_selectors, DocSelector};
use crate::model::PickedFile;
use crate::session::{Session, SessionStore};
use crate::store::backend::StorageBackend;
use crate::store::categories::CategoryRegistry;
use crate::store::document_store::DocumentStore;
use crate::store::fs_backend::FsBackend;
use std::path::{Path, PathBuf};

pub struct DocfolioApi<B: StorageBackend> {
    backend: B,
    store: DocumentStore<B>,
    categories: CategoryRegistry<B>,
    sessions: SessionStore<B>,
    config: DocfolioConfig,
    config_dir: Option<PathBuf>,
}

impl DocfolioApi<FsBackend> {
    /// Open (or lazily create) a data root: loads `config.json` from it and
    /// roots every store there.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let config = DocfolioConfig::load(&root)?;
        Ok(Self::new(FsBackend::new(&root), config).with_config_dir(root))
    }
}

impl<B: StorageBackend> DocfolioApi<B> {
    pub fn new(backend: B, config: DocfolioConfig) -> Self {
        Self {
            store: DocumentStore::with_backend(backend.clone()).with_copy_timeout(config.copy_timeout()),
            categories: CategoryRegistry::new(backend.clone()),
            sessions: SessionStore::new(backend.clone()),
            backend,
            config,
            config_dir: None,
        }
    }

    /// Persist config changes to `dir/config.json`.
    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = Some(dir.into());
        self
    }

    pub fn config_values(&self) -> &DocfolioConfig {
        &self.config
    }

    pub fn config_dir(&self) -> Option<&Path> {
        self.config_dir.as_deref()
    }

    /// The active session, or `Api("not logged in")`.
    pub fn require_session(&self) -> Result<Session> {
        let session = self.sessions.load();
        if session.is_active() {
            Ok(session)
        } else {
            Err(DocfolioError::Api("not logged in: run `docfolio login` first".into()))
        }
    }

    pub fn login(&self, username: &str, password: &str) -> Result<commands::CmdResult> {
        commands::session::login(&self.sessions, &self.config, username, password)
    }

    pub fn logout(&self) -> Result<commands::CmdResult> {
        commands::session::logout(&self.sessions)
    }

    pub fn whoami(&self) -> Result<commands::CmdResult> {
        commands::session::whoami(&self.sessions)
    }

    pub fn add_document(
        &mut self,
        picked: Option<&PickedFile>,
        name: &str,
        category: &str,
    ) -> Result<commands::CmdResult> {
        commands::add::run(&mut self.store, &self.categories, picked, name, category)
    }

    pub fn list_documents(&self, filter: &ListFilter) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, filter)
    }

    pub fn view_documents<I: AsRef<str>>(&self, inputs: &[I]) -> Result<commands::CmdResult> {
        let selectors = selectors(inputs)?;
        commands::view::run(&self.store, &selectors)
    }

    pub fn edit_document(
        &mut self,
        input: &str,
        name: Option<&str>,
        category: Option<&str>,
    ) -> Result<commands::CmdResult> {
        let selector = single_selector(input)?;
        commands::edit::run(&mut self.store, &self.categories, &selector, name, category)
    }

    pub fn delete_documents<I: AsRef<str>>(&mut self, inputs: &[I]) -> Result<commands::CmdResult> {
        let selectors = selectors(inputs)?;
        commands::delete::run(&mut self.store, &selectors)
    }

    pub fn list_categories(&self) -> Result<commands::CmdResult> {
        commands::categories::list(&self.store, &self.categories)
    }

    pub fn add_category(&self, name: &str) -> Result<commands::CmdResult> {
        commands::categories::add(&self.categories, name)
    }

    pub fn remove_category(&self, name: &str, force: bool) -> Result<commands::CmdResult> {
        commands::categories::remove(&self.store, &self.categories, name, force)
    }

    pub fn doctor(&self) -> Result<commands::CmdResult> {
        commands::doctor::run(&self.store)
    }

    pub fn config(&mut self, action: ConfigAction) -> Result<commands::CmdResult> {
        let result = commands::config::run(&mut self.config, self.config_dir.as_deref(), action)?;
        // A changed copy timeout applies to the next import
        self.store = DocumentStore::with_backend(self.backend.clone())
            .with_copy_timeout(self.config.copy_timeout());
        Ok(result)
    }
}

fn selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<DocSelector>> {
    if inputs.is_empty() {
        return Err(DocfolioError::Api("No documents selected".into()));
    }
    parse_selectors(inputs).map_err(DocfolioError::Api)
}

fn single_selector(input: &str) -> Result<DocSelector> {
    let mut parsed = parse_selector(input).map_err(DocfolioError::Api)?;
    if parsed.len() != 1 || matches!(parsed[0], DocSelector::Range(..)) {
        return Err(DocfolioError::Api(format!(
            "Expected a single document, got {}",
            input
        )));
    }
    Ok(parsed.remove(0))
}

pub use crate::commands::config::ConfigAction;
pub use commands::list::ListFilter;
pub use commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use crate::store::DataStore;
    use crate::test_utils::MemEnv;

    fn make_api() -> (MemEnv, DocfolioApi<MemBackend>) {
        let env = MemEnv::new();
        let api = DocfolioApi::new(env.backend.clone(), DocfolioConfig::default());
        (env, api)
    }

    #[test]
    fn session_gate() {
        let (_env, api) = make_api();
        assert!(matches!(api.require_session(), Err(DocfolioError::Api(_))));

        api.login("admin", "admin123").unwrap();
        assert!(api.require_session().unwrap().is_active());

        api.logout().unwrap();
        assert!(api.require_session().is_err());
    }

    #[test]
    fn add_list_view_through_facade() {
        let (env, mut api) = make_api();
        let picked = env.pick("report.pdf", "application/pdf", b"%PDF-1.7\n/Type /Page\n");

        api.add_document(Some(&picked), "Q1 Report", "Trabajo").unwrap();

        let listed = api.list_documents(&ListFilter::default()).unwrap();
        assert_eq!(listed.listed_documents.len(), 1);

        let viewed = api.view_documents(&["1"]).unwrap();
        assert_eq!(viewed.viewed[0].display.document.name, "Q1 Report");
    }

    #[test]
    fn edit_needs_exactly_one_document() {
        let (mut env, mut api) = make_api();
        env.add_document("A", "Personal");
        env.add_document("B", "Personal");

        let result = api.edit_document("1-2", Some("C"), None);
        assert!(matches!(result, Err(DocfolioError::Api(_))));

        api.edit_document("2", Some("C"), None).unwrap();
        let names: Vec<_> = env
            .store
            .list_documents()
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn delete_ranges() {
        let (mut env, mut api) = make_api();
        env.add_document("A", "Personal");
        env.add_document("B", "Personal");
        let c = env.add_document("C", "Personal");

        api.delete_documents(&["1-2"]).unwrap();
        assert_eq!(env.store.list_documents().unwrap(), vec![c]);
    }

    #[test]
    fn empty_selection_is_rejected() {
        let (_env, mut api) = make_api();
        let none: [&str; 0] = [];
        assert!(matches!(api.delete_documents(&none), Err(DocfolioError::Api(_))));
    }

    #[test]
    fn config_change_updates_copy_timeout() {
        let (_env, mut api) = make_api();
        api.config(ConfigAction::Set("copy-timeout".into(), "3".into()))
            .unwrap();
        assert_eq!(api.config_values().copy_timeout_secs, 3);
        assert_eq!(api.store.copy_timeout(), std::time::Duration::from_secs(3));
    }

    #[test]
    fn category_commands_share_the_backend() {
        let (mut env, api) = make_api();
        api.add_category("Viajes").unwrap();
        env.add_document("Trip", "Viajes");

        assert!(api.remove_category("Viajes", false).is_err());
        api.remove_category("Viajes", true).unwrap();
        assert!(!env.categories.contains("Viajes"));
    }
}
