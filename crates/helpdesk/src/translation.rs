//! Process-wide translation cache for display strings.
//!
//! Keyed by (source text, target language). A key is requested from the
//! language service at most once per cache lifetime; concurrent misses on the
//! same key are coalesced by the underlying cache. The cache is unbounded and has
//! no TTL so entries are never evicted and re-requested.

use std::{
    collections::BTreeMap,
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    language::{is_canonical, prompts, LanguageService, LanguageServiceError},
    storage::{self, DataLoadError, DataSaveError},
};

/// Persisted layout: source text -> language -> translated text.
pub type TranslationMap = BTreeMap<String, BTreeMap<String, String>>;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TranslationKey {
    pub text: String,
    pub language: String,
}

impl TranslationKey {
    pub fn new(text: &str, language: &str) -> Self {
        Self {
            text: text.to_string(),
            language: language.trim().to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("Translation into {language} unavailable: {source}")]
    Unavailable {
        language: String,
        #[source]
        source: Arc<LanguageServiceError>,
    },

    #[error("Failed to persist translations: {0}")]
    Persist(#[from] DataSaveError),
}

/// Backing storage for the translation cache.
#[async_trait]
pub trait TranslationStore: Send + Sync {
    async fn load(&self) -> Result<TranslationMap, DataLoadError>;
    async fn save(&self, translations: &TranslationMap) -> Result<(), DataSaveError>;
}

#[derive(Debug, Clone)]
pub struct JsonTranslationStore {
    path: PathBuf,
}

impl JsonTranslationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TranslationStore for JsonTranslationStore {
    async fn load(&self) -> Result<TranslationMap, DataLoadError> {
        storage::read_json(&self.path).await
    }

    async fn save(&self, translations: &TranslationMap) -> Result<(), DataSaveError> {
        storage::write_json(&self.path, translations).await
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub entry_count: u64,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}

pub struct TranslationCache {
    cache: Cache<TranslationKey, String>,
    service: Arc<dyn LanguageService>,
    store: Arc<dyn TranslationStore>,
    hits: AtomicU64,
    misses: AtomicU64,
    dirty: AtomicBool,
    flush_lock: Mutex<()>,
    load_warning: Option<String>,
}

impl TranslationCache {
    /// An empty cache; nothing is read from `store` until [`TranslationCache::load`].
    pub fn new(service: Arc<dyn LanguageService>, store: Arc<dyn TranslationStore>) -> Self {
        Self {
            cache: Cache::builder().build(),
            service,
            store,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            dirty: AtomicBool::new(false),
            flush_lock: Mutex::new(()),
            load_warning: None,
        }
    }

    /// Builds a cache seeded from `store`. A missing or malformed store starts empty.
    pub async fn load(service: Arc<dyn LanguageService>, store: Arc<dyn TranslationStore>) -> Self {
        let mut translations = Self::new(service, store);

        match translations.store.load().await {
            Ok(map) => {
                let mut count = 0usize;
                for (text, languages) in map {
                    for (language, translated) in languages {
                        translations
                            .cache
                            .insert(TranslationKey::new(&text, &language), translated)
                            .await;
                        count += 1;
                    }
                }
                info!("Loaded {} cached translation(s)", count);
            }
            Err(err) => {
                warn!("Translation cache starting empty: {}", err);
                translations.load_warning = Some(err.to_string());
            }
        }

        translations
    }

    pub fn load_warning(&self) -> Option<&str> {
        self.load_warning.as_deref()
    }

    /// Returns `text` in `language`, asking the language service only on a miss.
    ///
    /// The canonical language and blank text pass through untouched.
    pub async fn translate(&self, text: &str, language: &str) -> Result<String, TranslationError> {
        if text.trim().is_empty() || is_canonical(language) {
            return Ok(text.to_string());
        }

        let key = TranslationKey::new(text, language);
        if let Some(hit) = self.cache.get(&key).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(hit);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let language_owned = key.language.clone();
        let result = self
            .cache
            .try_get_with(key, async {
                debug!("Translating {:?} into {}", text, language_owned);
                let prompt = prompts::translate(text, &language_owned);
                self.service.complete(&prompt.system, &prompt.turns).await
            })
            .await;

        match result {
            Ok(translated) => {
                self.dirty.store(true, Ordering::Release);
                Ok(translated)
            }
            Err(source) => Err(TranslationError::Unavailable {
                language: language_owned,
                source,
            }),
        }
    }

    /// Whether entries were added since the last successful flush.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Current contents in the persisted layout.
    pub async fn snapshot(&self) -> TranslationMap {
        self.cache.run_pending_tasks().await;

        let mut map = TranslationMap::new();
        for (key, translated) in self.cache.iter() {
            map.entry(key.text.clone())
                .or_default()
                .insert(key.language.clone(), translated);
        }
        map
    }

    /// Writes the cache back to its store if anything changed. Returns the number
    /// of translations written, or 0 when there was nothing to do.
    ///
    /// Flushes run one at a time so a later snapshot is never overwritten by an
    /// earlier one.
    pub async fn flush(&self) -> Result<usize, TranslationError> {
        let _guard = self.flush_lock.lock().await;
        if !self.dirty.swap(false, Ordering::AcqRel) {
            return Ok(0);
        }

        let map = self.snapshot().await;
        let count = map.values().map(BTreeMap::len).sum();
        if let Err(err) = self.store.save(&map).await {
            self.dirty.store(true, Ordering::Release);
            return Err(err.into());
        }

        debug!("Flushed {} translation(s)", count);
        Ok(count)
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        CacheStats {
            entry_count: self.cache.entry_count(),
            hits,
            misses,
            hit_rate,
        }
    }
}
