use super::profiles::ProfileDatabase;
use super::scoring::{ArtifactScorer, ScoreResult, Tier};
use crate::inventory::domain::{CanonicalItem, SlotKey};
use serde::{Deserialize, Serialize};

const TOP_ITEM_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recommendation {
    BestInSlot,
    Keep,
    Potential,
    Fodder,
}

impl Recommendation {
    pub const fn ordered() -> [Recommendation; 4] {
        [
            Recommendation::BestInSlot,
            Recommendation::Keep,
            Recommendation::Potential,
            Recommendation::Fodder,
        ]
    }

    /// Depends on the best tier alone.
    pub const fn from_tier(tier: Tier) -> Self {
        match tier {
            Tier::S => Recommendation::BestInSlot,
            Tier::A | Tier::B => Recommendation::Keep,
            Tier::C => Recommendation::Potential,
            Tier::D | Tier::F => Recommendation::Fodder,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Recommendation::BestInSlot => "best-in-slot",
            Recommendation::Keep => "keep",
            Recommendation::Potential => "potential",
            Recommendation::Fodder => "fodder",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Recommendation::BestInSlot => "Best-in-Slot",
            Recommendation::Keep => "Keep",
            Recommendation::Potential => "Potential",
            Recommendation::Fodder => "Fodder",
        }
    }

    pub fn from_key(value: &str) -> Option<Self> {
        Recommendation::ordered()
            .into_iter()
            .find(|recommendation| recommendation.key().eq_ignore_ascii_case(value.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileScore {
    pub profile_key: String,
    pub result: ScoreResult,
}

/// Verdict for one item across every candidate profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemAdvice<'i> {
    pub item: &'i CanonicalItem,
    pub recommendation: Recommendation,
    pub best_profile_key: Option<String>,
    pub best_score: ScoreResult,
    pub all_scores: Vec<ProfileScore>,
}

/// Applies the scorer across a list of candidate profiles.
#[derive(Debug, Clone)]
pub struct Advisor<'a> {
    scorer: ArtifactScorer<'a>,
    candidates: Vec<String>,
}

impl Advisor<'static> {
    pub fn standard() -> Self {
        Self::new(ProfileDatabase::standard())
    }
}

impl<'a> Advisor<'a> {
    /// Every profile in the table is a candidate, in declaration order.
    pub fn new(profiles: &'a ProfileDatabase) -> Self {
        let candidates = profiles
            .profile_keys()
            .into_iter()
            .map(str::to_string)
            .collect();

        Self {
            scorer: ArtifactScorer::new(profiles),
            candidates,
        }
    }

    /// Restricts scoring to `keys`. Order matters: ties keep the earlier key.
    pub fn with_candidates<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.candidates = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Restricts scoring to the owned holders that have a profile, in holder
    /// order. Keeps the current candidates when none of them has one.
    pub fn for_holders<'k, I>(self, holder_keys: I) -> Self
    where
        I: IntoIterator<Item = &'k str>,
    {
        let profiles = self.scorer.profiles();
        let mut owned: Vec<&str> = Vec::new();
        for key in holder_keys {
            if profiles.get_profile(key).is_some() && !owned.contains(&key) {
                owned.push(key);
            }
        }

        if owned.is_empty() {
            self
        } else {
            self.with_candidates(owned)
        }
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn scorer(&self) -> ArtifactScorer<'a> {
        self.scorer
    }

    pub fn advise<'i>(&self, item: &'i CanonicalItem) -> ItemAdvice<'i> {
        let mut best_profile_key: Option<&str> = None;
        let mut best_score = ScoreResult::empty();
        let mut all_scores = Vec::with_capacity(self.candidates.len());

        for key in &self.candidates {
            let result = self.scorer.score(item, key);
            if result.score > best_score.score {
                best_profile_key = Some(key.as_str());
                best_score = result.clone();
            }
            all_scores.push(ProfileScore {
                profile_key: key.clone(),
                result,
            });
        }

        ItemAdvice {
            item,
            recommendation: Recommendation::from_tier(best_score.tier),
            best_profile_key: best_profile_key.map(str::to_string),
            best_score,
            all_scores,
        }
    }

    pub fn analyze_collection<'i>(&self, items: &'i [CanonicalItem]) -> CollectionAnalysis<'i> {
        let results: Vec<ItemAdvice<'i>> = items.iter().map(|item| self.advise(item)).collect();
        let summary = CollectionSummary::from_results(&results);
        CollectionAnalysis { results, summary }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationCount {
    pub recommendation: Recommendation,
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierCount {
    pub tier: Tier,
    pub description: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSummary<'i> {
    pub total: usize,
    pub by_recommendation: Vec<RecommendationCount>,
    pub by_tier: Vec<TierCount>,
    pub top_items: Vec<ItemAdvice<'i>>,
    pub fodder_count: usize,
}

impl<'i> CollectionSummary<'i> {
    fn from_results(results: &[ItemAdvice<'i>]) -> Self {
        let by_recommendation: Vec<RecommendationCount> = Recommendation::ordered()
            .into_iter()
            .map(|recommendation| RecommendationCount {
                recommendation,
                label: recommendation.label(),
                count: results
                    .iter()
                    .filter(|advice| advice.recommendation == recommendation)
                    .count(),
            })
            .collect();

        let by_tier = Tier::ordered()
            .into_iter()
            .map(|tier| TierCount {
                tier,
                description: tier.description(),
                count: results
                    .iter()
                    .filter(|advice| advice.best_score.tier == tier)
                    .count(),
            })
            .collect();

        let mut ranked: Vec<&ItemAdvice<'i>> = results.iter().collect();
        ranked.sort_by(|a, b| b.best_score.score.total_cmp(&a.best_score.score));
        let top_items = ranked
            .into_iter()
            .take(TOP_ITEM_LIMIT)
            .cloned()
            .collect();

        let fodder_count = by_recommendation
            .iter()
            .find(|entry| entry.recommendation == Recommendation::Fodder)
            .map(|entry| entry.count)
            .unwrap_or(0);

        Self {
            total: results.len(),
            by_recommendation,
            by_tier,
            top_items,
            fodder_count,
        }
    }

    pub fn count_for(&self, recommendation: Recommendation) -> usize {
        self.by_recommendation
            .iter()
            .find(|entry| entry.recommendation == recommendation)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionAnalysis<'i> {
    pub results: Vec<ItemAdvice<'i>>,
    pub summary: CollectionSummary<'i>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Best score, highest first.
    #[default]
    Score,
    /// Item level, highest first.
    Level,
    /// Set key, alphabetical.
    Set,
}

impl SortOrder {
    pub fn from_key(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "score" => Some(SortOrder::Score),
            "level" => Some(SortOrder::Level),
            "set" => Some(SortOrder::Set),
            _ => None,
        }
    }
}

/// Filter and ordering applied to an analyzed collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CollectionQuery {
    pub recommendation: Option<Recommendation>,
    pub slot: Option<SlotKey>,
    pub search: Option<String>,
    pub sort: SortOrder,
}

impl CollectionQuery {
    fn matches(&self, advice: &ItemAdvice<'_>, needle: Option<&str>) -> bool {
        if self
            .recommendation
            .is_some_and(|recommendation| advice.recommendation != recommendation)
        {
            return false;
        }
        if self.slot.is_some_and(|slot| advice.item.slot_key != slot) {
            return false;
        }

        let Some(needle) = needle else {
            return true;
        };
        let main_stat = advice.item.main_stat.as_ref().map(|main| main.key.key());
        [
            Some(advice.item.set_key.as_str()),
            main_stat,
            advice.best_profile_key.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
    }
}

impl<'i> CollectionAnalysis<'i> {
    /// Filtered view in the requested order. Sorting is stable.
    pub fn query(&self, query: &CollectionQuery) -> Vec<&ItemAdvice<'i>> {
        let needle = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|search| !search.is_empty())
            .map(str::to_lowercase);

        let mut matched: Vec<&ItemAdvice<'i>> = self
            .results
            .iter()
            .filter(|advice| query.matches(advice, needle.as_deref()))
            .collect();

        match query.sort {
            SortOrder::Score => {
                matched.sort_by(|a, b| b.best_score.score.total_cmp(&a.best_score.score))
            }
            SortOrder::Level => matched.sort_by(|a, b| b.item.level.cmp(&a.item.level)),
            SortOrder::Set => matched.sort_by(|a, b| a.item.set_key.cmp(&b.item.set_key)),
        }

        matched
    }
}
