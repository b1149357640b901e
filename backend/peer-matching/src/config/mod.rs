use serde::Deserialize;
use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read environment: {0}")]
    Env(#[from] envy::Error),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub service_name: String,
}

/// Parameters for the offline matching simulation.
///
/// Read from `SIM_*` environment variables (`SIM_USERS`, `SIM_ITERATIONS`,
/// `SIM_INTERACTION_PROBABILITY`, `SIM_TOP_K`, `SIM_SEED`).
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_users")]
    pub users: usize,
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default = "default_interaction_probability")]
    pub interaction_probability: f64,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_users() -> usize {
    100
}

fn default_iterations() -> usize {
    1000
}

fn default_interaction_probability() -> f64 {
    0.3
}

fn default_top_k() -> usize {
    5
}

fn default_seed() -> u64 {
    42
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            users: default_users(),
            iterations: default_iterations(),
            interaction_probability: default_interaction_probability(),
            top_k: default_top_k(),
            seed: default_seed(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.users < 2 {
            return Err(ConfigError::InvalidValue {
                key: "SIM_USERS",
                reason: format!("need at least 2 users, got {}", self.users),
            });
        }

        if !(0.0..=1.0).contains(&self.interaction_probability) {
            return Err(ConfigError::InvalidValue {
                key: "SIM_INTERACTION_PROBABILITY",
                reason: format!("{} is outside [0, 1]", self.interaction_probability),
            });
        }

        Ok(())
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let simulation: SimulationConfig = envy::prefixed("SIM_").from_env()?;
        simulation.validate()?;

        Ok(Config {
            service: ServiceConfig {
                service_name: env::var("SERVICE_NAME")
                    .unwrap_or_else(|_| "peer-matching".to_string()),
            },
            simulation,
        })
    }
}
