use super::collection::Advisor;
use super::scoring::{round_tenth, ScoreResult, Tier};
use crate::inventory::domain::{CanonicalItem, SlotKey};
use serde::Serialize;

/// Best same-slot replacement found in the collection for one slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeSuggestion<'i> {
    pub slot: SlotKey,
    pub slot_label: &'static str,
    pub current: Option<&'i CanonicalItem>,
    pub current_score: ScoreResult,
    pub suggestion: &'i CanonicalItem,
    pub suggestion_score: ScoreResult,
    pub improvement: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotScore<'i> {
    pub slot: SlotKey,
    pub slot_label: &'static str,
    pub item: Option<&'i CanonicalItem>,
    pub score: Option<ScoreResult>,
}

/// Per-slot scores of what a holder currently wears.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HolderBuildSummary<'i> {
    pub holder_key: String,
    pub display_name: &'static str,
    pub slots: Vec<SlotScore<'i>>,
    pub equipped_count: usize,
    pub average_score: f64,
    pub average_tier: Tier,
}

impl<'a> Advisor<'a> {
    /// One suggestion per slot where an unequipped item outscores the
    /// equipped one, largest improvement first.
    pub fn suggest_upgrades<'i>(
        &self,
        holder_key: &str,
        equipped: &[&'i CanonicalItem],
        all_items: &'i [CanonicalItem],
    ) -> Vec<UpgradeSuggestion<'i>> {
        let scorer = self.scorer();
        if scorer.profiles().get_profile(holder_key).is_none() {
            return Vec::new();
        }

        let mut suggestions = Vec::new();
        for slot in SlotKey::ordered() {
            let current = equipped.iter().copied().find(|item| item.slot_key == slot);
            let current_score = current
                .map(|item| scorer.score(item, holder_key))
                .unwrap_or_else(ScoreResult::empty);

            let mut best: Option<(&'i CanonicalItem, ScoreResult)> = None;
            for candidate in all_items
                .iter()
                .filter(|item| item.slot_key == slot)
                .filter(|item| !equipped.iter().any(|worn| worn.id == item.id))
            {
                let result = scorer.score(candidate, holder_key);
                let threshold = best
                    .as_ref()
                    .map(|(_, score)| score.score)
                    .unwrap_or(current_score.score);
                if result.score > threshold {
                    best = Some((candidate, result));
                }
            }

            if let Some((suggestion, suggestion_score)) = best {
                suggestions.push(UpgradeSuggestion {
                    slot,
                    slot_label: slot.label(),
                    current,
                    improvement: round_tenth(suggestion_score.score - current_score.score),
                    current_score,
                    suggestion,
                    suggestion_score,
                });
            }
        }

        suggestions.sort_by(|a, b| b.improvement.total_cmp(&a.improvement));
        suggestions
    }

    /// `None` when the holder has no profile. Empty slots are left out of the
    /// average.
    pub fn holder_build<'i>(
        &self,
        holder_key: &str,
        equipped: &[&'i CanonicalItem],
    ) -> Option<HolderBuildSummary<'i>> {
        let scorer = self.scorer();
        let profile = scorer.profiles().get_profile(holder_key)?;

        let slots: Vec<SlotScore<'i>> = SlotKey::ordered()
            .into_iter()
            .map(|slot| {
                let item = equipped.iter().copied().find(|item| item.slot_key == slot);
                SlotScore {
                    slot,
                    slot_label: slot.label(),
                    item,
                    score: item.map(|item| scorer.score(item, holder_key)),
                }
            })
            .collect();

        let scores: Vec<f64> = slots
            .iter()
            .filter_map(|entry| entry.score.as_ref().map(|result| result.score))
            .collect();
        let average_score = if scores.is_empty() {
            0.0
        } else {
            round_tenth(scores.iter().sum::<f64>() / scores.len() as f64)
        };

        Some(HolderBuildSummary {
            holder_key: holder_key.to_string(),
            display_name: profile.display_name,
            equipped_count: scores.len(),
            slots,
            average_score,
            average_tier: Tier::from_score(average_score),
        })
    }
}
