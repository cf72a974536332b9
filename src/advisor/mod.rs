//! Profile-driven scoring and the recommendations built on top of it.

pub mod collection;
pub mod export;
pub mod profiles;
pub mod scoring;
pub mod upgrades;

#[cfg(test)]
mod tests;

pub use collection::{
    Advisor, CollectionAnalysis, CollectionQuery, CollectionSummary, ItemAdvice, ProfileScore,
    Recommendation, RecommendationCount, SortOrder, TierCount,
};
pub use export::write_advice_csv;
pub use profiles::{Element, Profile, ProfileDatabase, WeaponClass};
pub use scoring::{ArtifactScorer, ScoreResult, SubstatContribution, Tier, PERFECT_ROLL_CEILING};
pub use upgrades::{HolderBuildSummary, SlotScore, UpgradeSuggestion};
