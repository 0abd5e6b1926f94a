use super::backend::KeyValueStore;
use crate::error::{DocfolioError, Result};
use tracing::{info, warn};

pub const CATEGORIES_KEY: &str = "CATEGORIES";
pub const DEFAULT_CATEGORIES: [&str; 5] = ["Personal", "Trabajo", "Educación", "Salud", "Finanzas"];

pub fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

/// The set of category names documents may be filed under.
///
/// Categories are plain labels: documents reference them by name and nothing
/// here checks whether a category is still in use.
#[derive(Clone)]
pub struct CategoryRegistry<K: KeyValueStore> {
    backend: K,
}

impl<K: KeyValueStore> CategoryRegistry<K> {
    pub fn new(backend: K) -> Self {
        Self { backend }
    }

    /// Persisted list, or the defaults when nothing usable is stored.
    /// Never writes the defaults back.
    pub fn get_categories(&self) -> Vec<String> {
        let stored = match self.backend.get_item(CATEGORIES_KEY) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "could not read categories, using defaults");
                return default_categories();
            }
        };
        match stored {
            Some(json) if !json.trim().is_empty() => {
                serde_json::from_str(&json).unwrap_or_else(|e| {
                    warn!(error = %e, "stored categories unreadable, using defaults");
                    default_categories()
                })
            }
            _ => default_categories(),
        }
    }

    /// Like [`get_categories`](Self::get_categories), but read and parse
    /// failures surface as errors. Mutations start from this so a failed read
    /// never overwrites the stored list with the defaults.
    fn load_for_update(&self) -> Result<Vec<String>> {
        match self.backend.get_item(CATEGORIES_KEY)? {
            Some(json) if !json.trim().is_empty() => serde_json::from_str(&json).map_err(|e| {
                DocfolioError::Persistence(format!("{}: unreadable category list: {}", CATEGORIES_KEY, e))
            }),
            _ => Ok(default_categories()),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get_categories().iter().any(|c| c == name)
    }

    /// Append `name` unless it is already present (exact match).
    /// Returns whether anything was added.
    pub fn add_category(&self, name: &str) -> Result<bool> {
        let mut categories = self.load_for_update()?;
        if categories.iter().any(|c| c == name) {
            return Ok(false);
        }
        categories.push(name.to_string());
        self.save(&categories)?;
        info!(category = name, "category added");
        Ok(true)
    }

    /// Remove every occurrence of `name`. Returns whether anything was removed.
    pub fn remove_category(&self, name: &str) -> Result<bool> {
        let mut categories = self.load_for_update()?;
        let before = categories.len();
        categories.retain(|c| c != name);
        if categories.len() == before {
            return Ok(false);
        }
        self.save(&categories)?;
        info!(category = name, "category removed");
        Ok(true)
    }

    fn save(&self, categories: &[String]) -> Result<()> {
        let json = serde_json::to_string(categories)?;
        self.backend.set_item(CATEGORIES_KEY, &json)
    }
}
