//! Troubleshooting knowledge base
//!
//! An ordered, immutable list of [`Entry`] records loaded once at startup.
//! Order is significant: the matcher breaks score ties by knowledge-base order.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};

use crate::storage::{self, DataLoadError};

/// Systems the UI always offers, even when the knowledge base failed to load.
pub const KNOWN_SYSTEMS: [&str; 3] = ["KDS", "Kiosk Software", "POS"];

/// One troubleshooting record.
///
/// Accepts both the spreadsheet-export headers (`"Problem"`, `"What to Try First"`,
/// `"When to Call Support"`) and snake_case field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default, alias = "System", deserialize_with = "blank_as_none")]
    pub system: Option<String>,

    #[serde(default, alias = "Problem", deserialize_with = "null_as_empty")]
    pub problem: String,

    #[serde(
        default,
        alias = "What to Try First",
        alias = "what_to_try_first",
        deserialize_with = "null_as_empty"
    )]
    pub first_step: String,

    #[serde(
        default,
        alias = "When to Call Support",
        alias = "when_to_call_support",
        deserialize_with = "null_as_empty"
    )]
    pub escalation: String,
}

impl Entry {
    pub fn new(
        system: Option<&str>,
        problem: impl Into<String>,
        first_step: impl Into<String>,
        escalation: impl Into<String>,
    ) -> Self {
        Self {
            system: system.map(str::to_string),
            problem: problem.into(),
            first_step: first_step.into(),
            escalation: escalation.into(),
        }
    }

    /// Entries without problem text never take part in matching.
    pub fn is_matchable(&self) -> bool {
        !self.problem.trim().is_empty()
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Spreadsheet exports write blank cells as `null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Source of knowledge-base entries.
#[async_trait]
pub trait KnowledgeBaseStore: Send + Sync {
    async fn load(&self) -> Result<Vec<Entry>, DataLoadError>;
}

/// Reads `troubleshooting.json`: a JSON array of entry objects.
#[derive(Debug, Clone)]
pub struct JsonKnowledgeBaseStore {
    path: PathBuf,
}

impl JsonKnowledgeBaseStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl KnowledgeBaseStore for JsonKnowledgeBaseStore {
    async fn load(&self) -> Result<Vec<Entry>, DataLoadError> {
        storage::read_json(&self.path).await
    }
}

/// The loaded knowledge base plus any warning raised while loading it.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: Vec<Arc<Entry>>,
    load_warning: Option<String>,
}

impl KnowledgeBase {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            entries: entries.into_iter().map(Arc::new).collect(),
            load_warning: None,
        }
    }

    /// Loads entries from `store`, falling back to an empty knowledge base.
    pub async fn load_from(store: &dyn KnowledgeBaseStore) -> Self {
        match store.load().await {
            Ok(entries) => {
                let skipped = entries.iter().filter(|e| !e.is_matchable()).count();
                info!(
                    "Loaded knowledge base: {} entries ({} without problem text)",
                    entries.len(),
                    skipped
                );
                Self::new(entries)
            }
            Err(err) => {
                warn!("Knowledge base unavailable, continuing with no entries: {}", err);
                Self {
                    entries: Vec::new(),
                    load_warning: Some(err.to_string()),
                }
            }
        }
    }

    pub fn entries(&self) -> &[Arc<Entry>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn load_warning(&self) -> Option<&str> {
        self.load_warning.as_deref()
    }

    /// [`KNOWN_SYSTEMS`] followed by any other labels found in the entries, in
    /// first-seen order. Labels compare case-insensitively.
    pub fn systems(&self) -> Vec<String> {
        let mut systems: Vec<String> = KNOWN_SYSTEMS.iter().map(|s| s.to_string()).collect();
        for system in self.entries.iter().filter_map(|e| e.system.as_deref()) {
            if !systems.iter().any(|s| s.eq_ignore_ascii_case(system)) {
                systems.push(system.to_string());
            }
        }
        systems
    }
}
