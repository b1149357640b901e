pub mod exploration;
pub mod matching;
pub mod similarity;
pub mod simulation;

pub use exploration::BanditTracker;
pub use matching::HybridMatcher;
pub use simulation::{Simulation, SimulationReport};
