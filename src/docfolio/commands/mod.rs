//! # Command Layer
//!
//! This module contains the **core business logic** of docfolio. Each command lives in
//! its own submodule and implements plain Rust functions over the storage traits.
//!
//! ## Role and Responsibilities
//!
//! Commands are where the caller-side rules live:
//! - Trimming and validating user input (names, categories)
//! - The creation-time category check on add and edit
//! - The "category still in use" check before removing a category
//! - Resolving display indexes to documents
//!
//! The storage layer deliberately does none of this: the category registry never
//! blocks a removal and the document store accepts any category label.
//!
//! ## What Commands Do NOT Do
//!
//! - **Any terminal I/O**: No stdout, stderr or colors
//! - **Argument parsing**: That's the CLI layer's job
//! - **Exit codes**: Return `Result`, let the caller decide
//!
//! ## Structured Returns
//!
//! Commands return [`CmdResult`], not strings. The UI decides how to render it.
//!
//! ## Command Modules
//!
//! - [`add`]: Import a picked file and index it
//! - [`list`]: Reconciled listing with search and category filter
//! - [`view`]: Load stored bytes and pick a viewer
//! - [`edit`]: Rename / recategorize
//! - [`delete`]: Remove documents
//! - [`categories`]: Manage category names
//! - [`config`]: Show / set configuration values
//! - [`doctor`]: Storage diagnostics
//! - [`session`]: Login / logout
//! - [`helpers`]: Selector resolution

use crate::config::DocfolioConfig;
use crate::index::DisplayDocument;
use crate::model::Document;
use crate::session::Session;
use crate::store::DoctorReport;
use crate::viewer::DocumentView;
use serde::Serialize;

pub mod add;
pub mod categories;
pub mod config;
pub mod delete;
pub mod doctor;
pub mod edit;
pub mod helpers;
pub mod list;
pub mod session;
pub mod view;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A category name and how many documents currently carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryUsage {
    pub name: String,
    pub documents: usize,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_documents: Vec<Document>,
    pub listed_documents: Vec<DisplayDocument>,
    pub viewed: Vec<DocumentView>,
    pub categories: Vec<CategoryUsage>,
    pub report: Option<DoctorReport>,
    pub session: Option<Session>,
    pub config: Option<DocfolioConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_documents(mut self, documents: Vec<DisplayDocument>) -> Self {
        self.listed_documents = documents;
        self
    }

    pub fn with_categories(mut self, categories: Vec<CategoryUsage>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_config(mut self, config: DocfolioConfig) -> Self {
        self.config = Some(config);
        self
    }
}
