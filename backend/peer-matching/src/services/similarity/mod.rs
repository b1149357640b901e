//! Content Similarity
//!
//! Static profile similarity between a user and a candidate peer.
//!
//! # Formula
//! `0.5 * condition + 0.3 * age + 0.2 * location`, where condition and
//! location are exact-equality matches and `age = 1 - |Δage| / 100`.
//!
//! The age term is not clamped: gaps above 100 years push it below zero.

use crate::models::PeerProfile;

pub const CONDITION_WEIGHT: f64 = 0.5;
pub const AGE_WEIGHT: f64 = 0.3;
pub const LOCATION_WEIGHT: f64 = 0.2;

/// Age gap that maps to an age score of zero
pub const MAX_AGE_GAP: f64 = 100.0;

/// Per-attribute sub-scores before weighting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityBreakdown {
    pub condition: f64,
    pub age: f64,
    pub location: f64,
}

impl SimilarityBreakdown {
    pub fn compute(user: &PeerProfile, candidate: &PeerProfile) -> Self {
        let condition = if user.chronic_conditions == candidate.chronic_conditions {
            1.0
        } else {
            0.0
        };

        let age_gap = user.age.abs_diff(candidate.age) as f64;
        let age = 1.0 - age_gap / MAX_AGE_GAP;

        let location = if user.location == candidate.location {
            1.0
        } else {
            0.0
        };

        Self {
            condition,
            age,
            location,
        }
    }

    pub fn total(&self) -> f64 {
        self.condition * CONDITION_WEIGHT + self.age * AGE_WEIGHT + self.location * LOCATION_WEIGHT
    }
}

/// Content-based similarity in [0, 1] for age gaps up to 100 years.
pub fn similarity(user: &PeerProfile, candidate: &PeerProfile) -> f64 {
    SimilarityBreakdown::compute(user, candidate).total()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn profile(id: i64, age: u32, condition: &str, location: &str) -> PeerProfile {
        PeerProfile::new(id, age, condition, location)
    }

    #[test]
    fn test_identical_attributes_score_one() {
        let user = profile(1, 25, "Diabetes", "New York");
        let candidate = profile(2, 25, "Diabetes", "New York");

        assert!((similarity(&user, &candidate) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_close_match_scores_high() {
        let user = profile(1, 25, "Diabetes", "New York");
        let candidate = profile(2, 26, "Diabetes", "New York");

        let score = similarity(&user, &candidate);
        assert!(score > 0.8);
        assert!((score - 0.997).abs() < EPS);
    }

    #[test]
    fn test_different_condition_scores_low() {
        let user = profile(1, 25, "Diabetes", "New York");
        let candidate = profile(3, 45, "Hypertension", "Los Angeles");

        let score = similarity(&user, &candidate);
        assert!(score < 0.5);
        assert!((score - 0.24).abs() < EPS);
    }

    #[test]
    fn test_same_condition_different_location_is_medium() {
        let user = profile(1, 25, "Diabetes", "New York");
        let candidate = profile(4, 28, "Diabetes", "Chicago");

        let score = similarity(&user, &candidate);
        assert!(score > 0.5 && score < 0.9);
    }

    #[test]
    fn test_all_attributes_differ_bounded_by_age_weight() {
        let user = profile(1, 30, "Asthma", "Miami");
        for age in [30, 55, 80, 130] {
            let candidate = profile(2, age, "Arthritis", "Houston");
            let score = similarity(&user, &candidate);
            assert!((0.0..=AGE_WEIGHT + EPS).contains(&score), "age {age}: {score}");
        }
    }

    #[test]
    fn test_similarity_is_symmetric() {
        let a = profile(1, 22, "Diabetes", "Chicago");
        let b = profile(2, 57, "Diabetes", "Miami");

        assert_eq!(similarity(&a, &b), similarity(&b, &a));
    }

    #[test]
    fn test_age_gap_over_hundred_goes_negative() {
        let user = profile(1, 5, "Diabetes", "Chicago");
        let candidate = profile(2, 155, "Asthma", "Miami");

        let breakdown = SimilarityBreakdown::compute(&user, &candidate);
        assert!((breakdown.age + 0.5).abs() < EPS);
        assert!(breakdown.total() < 0.0);
    }

    #[test]
    fn test_labels_compare_exactly() {
        let user = profile(1, 40, "Diabetes", "New York");
        let candidate = profile(2, 40, "diabetes", "New York ");

        let breakdown = SimilarityBreakdown::compute(&user, &candidate);
        assert_eq!(breakdown.condition, 0.0);
        assert_eq!(breakdown.location, 0.0);
    }
}
