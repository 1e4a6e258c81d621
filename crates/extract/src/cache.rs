use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::llm::InferenceRequest;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub enabled: bool,
    pub max_entries: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            max_entries: 1000,
        }
    }
}

/// Backend responses keyed by a hash of the full request.
#[derive(Clone)]
pub struct ResponseCache {
    responses: Arc<DashMap<String, String>>,
    max_entries: usize,
}

impl ResponseCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            responses: Arc::new(DashMap::new()),
            max_entries,
        }
    }

    pub fn from_settings(settings: &CacheSettings) -> Option<Self> {
        (settings.enabled && settings.max_entries > 0).then(|| Self::new(settings.max_entries))
    }

    pub fn get(&self, request: &InferenceRequest) -> Option<String> {
        let key = Self::key(request);
        self.responses.get(&key).map(|r| r.value().clone())
    }

    pub fn insert(&self, request: &InferenceRequest, response: String) {
        if self.responses.len() >= self.max_entries {
            // Simple eviction: clear 25% when full
            let to_remove: Vec<_> = self.responses.iter()
                .take((self.max_entries / 4).max(1))
                .map(|r| r.key().clone())
                .collect();
            for key in to_remove {
                self.responses.remove(&key);
            }
        }
        self.responses.insert(Self::key(request), response);
    }

    pub(crate) fn len(&self) -> usize {
        self.responses.len()
    }

    fn key(request: &InferenceRequest) -> String {
        let mut hasher = Sha256::new();
        hasher.update(request.system.as_bytes());
        hasher.update([0u8]);
        hasher.update(request.user.as_bytes());
        hasher.update(request.temperature.to_le_bytes());
        hasher.update(request.max_tokens.to_le_bytes());
        hex::encode(hasher.finalize())
    }
}
