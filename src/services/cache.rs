use crate::models::Recommendation;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// In-memory cache for assistant answers
///
/// LLM calls are slow and billed, and the same car page is opened again and
/// again, so recommendations are kept for a configurable TTL.
pub struct AssistantCache {
    recommendations: moka::future::Cache<String, Vec<Recommendation>>,
}

impl AssistantCache {
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let recommendations = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .support_invalidation_closures()
            .build();

        Self { recommendations }
    }

    pub async fn get_recommendations(&self, key: &str) -> Option<Vec<Recommendation>> {
        let hit = self.recommendations.get(key).await;
        if hit.is_some() {
            tracing::trace!("Cache hit: {}", key);
        } else {
            tracing::trace!("Cache miss: {}", key);
        }
        hit
    }

    pub async fn set_recommendations(&self, key: &str, value: Vec<Recommendation>) {
        self.recommendations.insert(key.to_string(), value).await;
        tracing::trace!("Cache set: {}", key);
    }

    /// Drop every cached entry for a car (its reviews or details changed)
    pub async fn invalidate_car(&self, car_id: &str) {
        let prefix = CacheKey::recommendations_prefix(car_id);
        if let Err(e) = self
            .recommendations
            .invalidate_entries_if(move |key, _| key.starts_with(&prefix))
        {
            tracing::warn!("Failed to invalidate cache entries for car {}: {}", car_id, e);
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.recommendations.entry_count(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: u64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for recommendations of a car under given preferences
    pub fn recommendations(car_id: &str, preferences: Option<&str>) -> String {
        format!(
            "{}{}",
            Self::recommendations_prefix(car_id),
            preferences.map(|p| p.trim().to_lowercase()).unwrap_or_default()
        )
    }

    fn recommendations_prefix(car_id: &str) -> String {
        format!("recs:{}:", car_id)
    }
}
