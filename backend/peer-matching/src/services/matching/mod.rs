/// Hybrid Matching Module
///
/// Ranks candidate peers for "find your health buddy" by blending two signals.
///
/// # Architecture
/// - **Content Layer**: static profile similarity (`services::similarity`)
/// - **Exploration Layer**: UCB1 score from the shared `BanditTracker`
///
/// # Workflow
/// 1. Sum trials across every tracked peer
/// 2. Score each candidate: `0.7 * content + 0.3 * min(ucb / 2, 1)`
/// 3. Stable sort descending, so equal scores keep input order
/// 4. Feedback from the chat/profile layer flows back through
///    `update_match_feedback`
pub mod hybrid;

pub use hybrid::HybridMatcher;

pub const CONTENT_WEIGHT: f64 = 0.7;
pub const MAB_WEIGHT: f64 = 0.3;
