use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Critic and user scores for a single film.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScorePair {
    pub critic: Option<u8>,
    pub user: Option<f64>,
}

impl ScorePair {
    pub fn new(critic: Option<u8>, user: Option<f64>) -> Self {
        Self { critic, user }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.critic.is_none() && self.user.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.critic.is_some() && self.user.is_some()
    }

    /// Fills absent fields from `other`, keeping the ones already present.
    pub fn fill_missing(self, other: ScorePair) -> Self {
        Self {
            critic: self.critic.or(other.critic),
            user: self.user.or(other.user),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub scores: ScorePair,
    pub created_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(scores: ScorePair, created_at: DateTime<Utc>) -> Self {
        Self { scores, created_at }
    }
}
