use super::{CONTENT_WEIGHT, MAB_WEIGHT};
use crate::models::{PeerId, PeerProfile, RankedMatch};
use crate::services::exploration::BanditTracker;
use crate::services::similarity::similarity;
use std::sync::Arc;
use tracing::{debug, info};

/// Hybrid Matcher - content similarity + bandit exploration
///
/// Stateless apart from the tracker it holds. The tracker is injectable so
/// several matchers (or a test) can share or isolate statistics.
pub struct HybridMatcher {
    tracker: Arc<BanditTracker>,
}

impl Default for HybridMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HybridMatcher {
    pub fn new() -> Self {
        Self::with_tracker(Arc::new(BanditTracker::new()))
    }

    pub fn with_tracker(tracker: Arc<BanditTracker>) -> Self {
        Self { tracker }
    }

    pub fn tracker(&self) -> &Arc<BanditTracker> {
        &self.tracker
    }

    /// Blend content similarity with the squashed UCB score.
    ///
    /// `min(ucb / 2, 1)` is a heuristic squash rather than a normalization:
    /// untried peers (infinite UCB) always get the full 1.0.
    pub fn hybrid_score(
        &self,
        user: &PeerProfile,
        candidate: &PeerProfile,
        total_trials: u64,
    ) -> f64 {
        let content_score = similarity(user, candidate);
        let mab_score = self.tracker.ucb_score(&candidate.id, total_trials);
        let normalized_mab = (mab_score / 2.0).min(1.0);

        content_score * CONTENT_WEIGHT + normalized_mab * MAB_WEIGHT
    }

    /// Score and rank candidates for a user.
    ///
    /// The caller must not include `user` in `candidates`. The input is left
    /// untouched; each result is a scored copy.
    pub fn find_matches(&self, user: &PeerProfile, candidates: &[PeerProfile]) -> Vec<RankedMatch> {
        let total_trials = self.tracker.total_trials();

        let mut matches: Vec<RankedMatch> = candidates
            .iter()
            .map(|candidate| RankedMatch {
                score: self.hybrid_score(user, candidate, total_trials),
                profile: candidate.clone(),
            })
            .collect();

        // Stable: ties keep candidate order
        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        debug!(
            user_id = %user.id,
            candidate_count = candidates.len(),
            total_trials = total_trials,
            top_score = matches.first().map(|m| m.score),
            "Hybrid ranking complete"
        );

        matches
    }

    /// Rank a whole user pool, skipping the user themself, keeping at most
    /// `limit` results.
    pub fn find_matches_in_pool(
        &self,
        user: &PeerProfile,
        pool: &[PeerProfile],
        limit: Option<usize>,
    ) -> Vec<RankedMatch> {
        let candidates: Vec<PeerProfile> = pool
            .iter()
            .filter(|candidate| candidate.id != user.id)
            .cloned()
            .collect();

        let mut matches = self.find_matches(user, &candidates);
        if let Some(limit) = limit {
            matches.truncate(limit);
        }
        matches
    }

    /// Feed an interaction outcome back into the bandit (success = 1, else 0)
    pub fn update_match_feedback(&self, peer_id: PeerId, success: bool) {
        let reward = if success { 1.0 } else { 0.0 };

        info!(peer_id = %peer_id, success = success, "Match feedback received");

        self.tracker.record_feedback(peer_id, reward);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn mock_users() -> Vec<PeerProfile> {
        vec![
            PeerProfile::new(1, 25, "Diabetes", "New York"),
            PeerProfile::new(2, 26, "Diabetes", "New York"),
            PeerProfile::new(3, 45, "Hypertension", "Los Angeles"),
        ]
    }

    #[test]
    fn test_initial_ranking_follows_content() {
        let matcher = HybridMatcher::new();
        let users = mock_users();

        let matches = matcher.find_matches(&users[0], &users[1..]);

        assert_eq!(matches[0].profile.id, PeerId::from(2));
        assert_eq!(matches[1].profile.id, PeerId::from(3));
    }

    #[test]
    fn test_untried_candidate_gets_full_mab_weight() {
        let matcher = HybridMatcher::new();
        let users = mock_users();

        // Unrelated peers accumulate history; candidate 2 stays untried
        for _ in 0..10 {
            matcher.update_match_feedback(PeerId::from(99), true);
        }

        let total = matcher.tracker().total_trials();
        let score = matcher.hybrid_score(&users[0], &users[1], total);
        let content = similarity(&users[0], &users[1]);

        assert!((score - (content * CONTENT_WEIGHT + MAB_WEIGHT)).abs() < EPS);
    }

    #[test]
    fn test_scores_in_unit_range_without_feedback() {
        let matcher = HybridMatcher::new();
        let users = mock_users();

        for m in matcher.find_matches(&users[0], &users[1..]) {
            assert!((0.0..=1.0).contains(&m.score), "score {}", m.score);
        }
    }

    #[test]
    fn test_feedback_changes_scores() {
        let matcher = HybridMatcher::new();
        let users = mock_users();

        matcher.update_match_feedback(PeerId::from(2), false);
        matcher.update_match_feedback(PeerId::from(2), false);
        matcher.update_match_feedback(PeerId::from(3), true);
        matcher.update_match_feedback(PeerId::from(3), true);

        let matches = matcher.find_matches(&users[0], &users[1..]);

        assert!(matches[0].score > 0.0);
        assert_eq!(matcher.tracker().current_score(&PeerId::from(3)), 1.0);
        assert_eq!(matcher.tracker().current_score(&PeerId::from(2)), 0.0);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let matcher = HybridMatcher::new();
        let user = PeerProfile::new(1, 30, "Asthma", "Chicago");
        let candidates: Vec<PeerProfile> = (10..15)
            .map(|id| PeerProfile::new(id, 30, "Asthma", "Chicago"))
            .collect();

        let matches = matcher.find_matches(&user, &candidates);
        let ids: Vec<PeerId> = matches.into_iter().map(|m| m.profile.id).collect();
        let expected: Vec<PeerId> = (10..15).map(PeerId::from).collect();

        assert_eq!(ids, expected);
    }

    #[test]
    fn test_pool_excludes_self_and_limits() {
        let matcher = HybridMatcher::new();
        let users = mock_users();

        let matches = matcher.find_matches_in_pool(&users[0], &users, Some(1));

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].profile.id, PeerId::from(2));

        let all = matcher.find_matches_in_pool(&users[0], &users, None);
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|m| m.profile.id != users[0].id));
    }

    #[test]
    fn test_shared_tracker_is_visible_to_both_matchers() {
        let tracker = Arc::new(BanditTracker::new());
        let first = HybridMatcher::with_tracker(Arc::clone(&tracker));
        let second = HybridMatcher::with_tracker(Arc::clone(&tracker));

        first.update_match_feedback(PeerId::from(5), true);

        assert_eq!(second.tracker().trials(&PeerId::from(5)), 1);
    }

    #[test]
    fn test_empty_candidates() {
        let matcher = HybridMatcher::new();
        let users = mock_users();

        assert!(matcher.find_matches(&users[0], &[]).is_empty());
    }
}
