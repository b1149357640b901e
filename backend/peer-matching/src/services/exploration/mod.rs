// ============================================
// Exploration Module
// ============================================
//
// Per-peer multi-armed bandit statistics for the hybrid matcher.
// Every candidate peer is an arm; a successful interaction (chat started,
// profile followed) is reward 1, anything else is reward 0.
//
// Key Metrics:
// - Exploitation: average reward per peer
// - Exploration: UCB1 uncertainty bonus based on trial count

pub mod ucb;

pub use ucb::BanditTracker;
