pub mod config;
pub mod models;
pub mod services;
pub mod utils;

pub use config::Config;
pub use models::{ArmStats, PeerId, PeerProfile, RankedMatch};
pub use services::{similarity, BanditTracker, HybridMatcher, Simulation, SimulationReport};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatchingError {
    #[error("Invalid profile record: {0}")]
    InvalidProfile(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MatchingError>;
