use serde::{Deserialize, Serialize};

/// Medal and MVP counts extracted from one competitor's profile page.
///
/// Derived per lookup, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementSummary {
    /// Gold + silver + bronze. MVP trophies are deliberately not medals
    /// and are excluded from this total.
    pub total_medals: u32,
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
    pub mvp: u32,
}

impl AchievementSummary {
    /// Build a summary from raw icon counts, computing `total_medals`.
    pub fn tally(gold: u32, silver: u32, bronze: u32, mvp: u32) -> Self {
        Self {
            total_medals: gold + silver + bronze,
            gold,
            silver,
            bronze,
            mvp,
        }
    }
}
