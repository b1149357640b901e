// ============================================
// Matching Simulation
// ============================================
//
// Offline harness for the hybrid matcher:
// 1. Generate a synthetic user pool
// 2. Repeatedly rank peers for a random active user
// 3. Simulate interactions with the top matches and feed outcomes back
// 4. Report success rate, score distribution and ranking latency
//
// Interaction success probability:
//   0.3 base, +0.3 same condition, +0.2 age gap < 10, +0.2 same location

use crate::config::SimulationConfig;
use crate::models::PeerProfile;
use crate::services::matching::HybridMatcher;
use crate::utils::{mean, ratio};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};

pub const CONDITIONS: [&str; 4] = ["Diabetes", "Hypertension", "Asthma", "Arthritis"];
pub const LOCATIONS: [&str; 5] = ["New York", "Los Angeles", "Chicago", "Houston", "Miami"];

const HIGH_MATCH_THRESHOLD: f64 = 0.7;
const MEDIUM_MATCH_THRESHOLD: f64 = 0.4;

/// Synthetic users with ids `1..=count`, ages 20..60
pub fn generate_profiles<R: Rng>(count: usize, rng: &mut R) -> Vec<PeerProfile> {
    (1..=count as i64)
        .map(|id| {
            let age = rng.gen_range(20..60);
            let condition = CONDITIONS[rng.gen_range(0..CONDITIONS.len())];
            let location = LOCATIONS[rng.gen_range(0..LOCATIONS.len())];
            PeerProfile::new(id, age, condition, location)
        })
        .collect()
}

pub fn success_probability(a: &PeerProfile, b: &PeerProfile) -> f64 {
    let mut probability = 0.3;
    if a.chronic_conditions == b.chronic_conditions {
        probability += 0.3;
    }
    if a.age.abs_diff(b.age) < 10 {
        probability += 0.2;
    }
    if a.location == b.location {
        probability += 0.2;
    }
    probability
}

pub fn interaction_succeeds<R: Rng>(a: &PeerProfile, b: &PeerProfile, rng: &mut R) -> bool {
    rng.gen::<f64>() < success_probability(a, b)
}

/// Score buckets: high (> 0.7), medium (> 0.4), low (rest)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchDistribution {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl MatchDistribution {
    pub fn from_scores(scores: &[f64]) -> Self {
        let mut distribution = Self::default();
        for &score in scores {
            if score > HIGH_MATCH_THRESHOLD {
                distribution.high += 1;
            } else if score > MEDIUM_MATCH_THRESHOLD {
                distribution.medium += 1;
            } else {
                distribution.low += 1;
            }
        }
        distribution
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub iterations: usize,
    pub total_interactions: u64,
    pub successful_interactions: u64,
    pub success_rate: f64,
    pub average_match_score: f64,
    pub average_ranking_micros: f64,
    pub distribution: MatchDistribution,
}

pub struct Simulation {
    config: SimulationConfig,
    matcher: HybridMatcher,
    users: Vec<PeerProfile>,
    rng: StdRng,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let users = generate_profiles(config.users, &mut rng);

        Self {
            config,
            matcher: HybridMatcher::new(),
            users,
            rng,
        }
    }

    /// Run with an explicit user pool instead of a generated one
    pub fn with_users(config: SimulationConfig, users: Vec<PeerProfile>) -> Self {
        Self {
            rng: StdRng::seed_from_u64(config.seed),
            config,
            matcher: HybridMatcher::new(),
            users,
        }
    }

    pub fn matcher(&self) -> &HybridMatcher {
        &self.matcher
    }

    pub fn run(&mut self) -> SimulationReport {
        info!(
            users = self.users.len(),
            iterations = self.config.iterations,
            top_k = self.config.top_k,
            "Starting hybrid matching simulation"
        );

        let mut total_interactions = 0u64;
        let mut successful_interactions = 0u64;
        let mut match_scores = Vec::new();
        let mut ranking_micros = Vec::with_capacity(self.config.iterations);

        for iteration in 0..self.config.iterations {
            let Some(active_user) = self.users.choose(&mut self.rng).cloned() else {
                break;
            };

            let started = Instant::now();
            let recommendations =
                self.matcher
                    .find_matches_in_pool(&active_user, &self.users, Some(self.config.top_k));
            ranking_micros.push(started.elapsed().as_secs_f64() * 1_000_000.0);

            for recommendation in recommendations {
                if self.rng.gen::<f64>() >= self.config.interaction_probability {
                    continue;
                }

                total_interactions += 1;
                match_scores.push(recommendation.score);

                let success =
                    interaction_succeeds(&active_user, &recommendation.profile, &mut self.rng);
                if success {
                    successful_interactions += 1;
                }

                self.matcher
                    .update_match_feedback(recommendation.profile.id, success);
            }

            debug!(
                iteration = iteration,
                active_user = %active_user.id,
                total_interactions = total_interactions,
                "Simulation step complete"
            );
        }

        let report = SimulationReport {
            iterations: self.config.iterations,
            total_interactions,
            successful_interactions,
            success_rate: ratio(successful_interactions, total_interactions),
            average_match_score: mean(&match_scores),
            average_ranking_micros: mean(&ranking_micros),
            distribution: MatchDistribution::from_scores(&match_scores),
        };

        info!(
            total_interactions = report.total_interactions,
            success_rate = report.success_rate,
            average_match_score = report.average_match_score,
            "Simulation finished"
        );

        report
    }
}
