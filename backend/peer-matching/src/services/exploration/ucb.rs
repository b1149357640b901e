// ============================================
// UCB (Upper Confidence Bound) Bandit Tracker
// ============================================
//
// UCB1 Formula:
//   UCB(i) = avg_reward(i) + sqrt(2 * ln(N) / n(i))
//
// Where:
//   - avg_reward(i): exact running mean of rewards for peer i
//   - N: total trials across all tracked peers (supplied by the caller)
//   - n(i): trials recorded for peer i
//
// Peers with no trials score +infinity so they are explored first.

use crate::models::{ArmStats, PeerId};
use dashmap::DashMap;
use tracing::debug;

/// Process-local bandit statistics keyed by peer identity.
///
/// Entries are created lazily on first feedback and live as long as the
/// tracker. All methods take `&self`; share it across threads with `Arc`.
#[derive(Debug, Default)]
pub struct BanditTracker {
    arms: DashMap<PeerId, ArmStats>,
}

impl BanditTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the UCB1 score for a peer
    ///
    /// # Arguments
    /// * `peer_id` - Candidate identity
    /// * `total_trials` - Sum of trials across all tracked peers
    ///
    /// # Returns
    /// `f64::INFINITY` for untried peers, and also when `total_trials` is 0
    /// (nothing recorded platform-wide yet, so `ln(0)` never happens).
    pub fn ucb_score(&self, peer_id: &PeerId, total_trials: u64) -> f64 {
        let stats = self.stats(peer_id);

        if stats.trials == 0 || total_trials == 0 {
            return f64::INFINITY;
        }

        let explore = ((2.0 * (total_trials as f64).ln()) / stats.trials as f64).sqrt();

        debug!(
            peer_id = %peer_id,
            trials = stats.trials,
            exploit = stats.average_reward,
            explore = explore,
            "UCB components computed"
        );

        stats.average_reward + explore
    }

    /// Record one interaction outcome for a peer
    ///
    /// `reward` is expected in [0, 1]. The average is the exact incremental
    /// mean `(avg * n + reward) / (n + 1)`, updated under the entry lock so
    /// concurrent feedback for the same peer is never lost.
    pub fn record_feedback(&self, peer_id: PeerId, reward: f64) {
        let mut entry = self.arms.entry(peer_id).or_default();
        let stats = entry.value_mut();

        let trials = stats.trials as f64;
        stats.average_reward = (stats.average_reward * trials + reward) / (trials + 1.0);
        stats.trials += 1;

        debug!(
            peer_id = %entry.key(),
            reward = reward,
            trials = entry.value().trials,
            average_reward = entry.value().average_reward,
            "Bandit feedback recorded"
        );
    }

    /// Average reward for a peer, 0.0 if never seen
    pub fn current_score(&self, peer_id: &PeerId) -> f64 {
        self.stats(peer_id).average_reward
    }

    pub fn trials(&self, peer_id: &PeerId) -> u64 {
        self.stats(peer_id).trials
    }

    /// Sum of trial counts over every peer ever observed
    pub fn total_trials(&self) -> u64 {
        self.arms.iter().map(|entry| entry.value().trials).sum()
    }

    pub fn stats(&self, peer_id: &PeerId) -> ArmStats {
        self.arms
            .get(peer_id)
            .map(|entry| *entry.value())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.arms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arms.is_empty()
    }

    /// Copy of all arm statistics, for inspection and debugging
    pub fn snapshot(&self) -> Vec<(PeerId, ArmStats)> {
        self.arms
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}
