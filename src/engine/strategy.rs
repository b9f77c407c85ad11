// ==========================================
// Retail standard assortment engine - allocation strategy
// ==========================================
// The two selection policies solve the same problem; the
// strategy value picks one at configuration time so the
// pipeline is not duplicated.
// ==========================================

use serde::{Deserialize, Serialize};

/// Allocation strategy for the standard-selection pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStrategy {
    /// Cumulative-share interleaving fill (revenue-proportional)
    CumulativeShare,
    /// Rank-greedy fill with floor-rescale redistribution
    RankRescale,
}

impl AllocationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationStrategy::CumulativeShare => "cumulative_share",
            AllocationStrategy::RankRescale => "rank_rescale",
        }
    }
}

impl Default for AllocationStrategy {
    fn default() -> Self {
        AllocationStrategy::CumulativeShare
    }
}

impl std::str::FromStr for AllocationStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cumulative_share" | "cumulative-share" => Ok(AllocationStrategy::CumulativeShare),
            "rank_rescale" | "rank-rescale" => Ok(AllocationStrategy::RankRescale),
            other => Err(format!("unknown allocation strategy: {}", other)),
        }
    }
}
