use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identity of a platform user, used as the bandit statistics key.
///
/// Accepts both numeric and string ids; both decode from JSON as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PeerId {
    Numeric(i64),
    Text(String),
}

impl From<i64> for PeerId {
    fn from(id: i64) -> Self {
        PeerId::Numeric(id)
    }
}

impl From<i32> for PeerId {
    fn from(id: i32) -> Self {
        PeerId::Numeric(i64::from(id))
    }
}

impl From<&str> for PeerId {
    fn from(id: &str) -> Self {
        PeerId::Text(id.to_string())
    }
}

impl From<String> for PeerId {
    fn from(id: String) -> Self {
        PeerId::Text(id)
    }
}

impl From<Uuid> for PeerId {
    fn from(id: Uuid) -> Self {
        PeerId::Text(id.to_string())
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeerId::Numeric(id) => write!(f, "{}", id),
            PeerId::Text(id) => f.write_str(id),
        }
    }
}

/// Profile attributes consumed by the matcher.
///
/// `chronic_conditions` is a single category label compared by equality, not
/// a set. Any other fields of the source record are kept in `extra` and come
/// back unchanged on the ranked result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerProfile {
    pub id: PeerId,
    pub age: u32,
    pub chronic_conditions: String,
    pub location: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PeerProfile {
    pub fn new(
        id: impl Into<PeerId>,
        age: u32,
        chronic_conditions: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            age,
            chronic_conditions: chronic_conditions.into(),
            location: location.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Decode a single record; incomplete records are rejected here rather
    /// than degrading into bogus scores later.
    pub fn from_json(value: serde_json::Value) -> crate::Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

/// A candidate annotated with its hybrid score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatch {
    #[serde(flatten)]
    pub profile: PeerProfile,
    pub score: f64,
}

/// Running statistics for one bandit arm (one candidate).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmStats {
    pub trials: u64,
    pub average_reward: f64,
}
