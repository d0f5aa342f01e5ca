use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};
use crate::api::types::{AssessResponse, AssessmentStatus};

#[derive(Clone)]
pub struct CacheEntry {
    pub response: AssessResponse,
    pub cached_at: u64,
    pub ttl_seconds: u64,
}

pub struct SimpleCache {
    entries: HashMap<String, CacheEntry>,
}

impl SimpleCache {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<AssessResponse> {
        let entry = self.entries.get(key)?;
        let age = current_timestamp().saturating_sub(entry.cached_at);

        if age < entry.ttl_seconds {
            Some(entry.response.clone())
        } else {
            None
        }
    }

    pub fn set(&mut self, key: String, response: AssessResponse, ttl_seconds: u64) {
        let entry = CacheEntry {
            response,
            cached_at: current_timestamp(),
            ttl_seconds,
        };

        self.entries.insert(key, entry);
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Remove expired entries
    pub fn cleanup(&mut self) {
        let now = current_timestamp();
        self.entries.retain(|_, entry| {
            let age = now.saturating_sub(entry.cached_at);
            age < entry.ttl_seconds
        });
    }
}

impl Default for SimpleCache {
    fn default() -> Self {
        Self::new()
    }
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Incomplete assessments are kept for a shorter time so a transient RPC
/// failure is retried sooner.
pub fn ttl_for_response(response: &AssessResponse, base_ttl: u64) -> u64 {
    match response.status {
        AssessmentStatus::Ok => base_ttl,
        AssessmentStatus::Partial => base_ttl / 2,
        AssessmentStatus::Error => base_ttl.min(60),
    }
}
