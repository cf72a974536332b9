use super::collection::ItemAdvice;
use crate::inventory::labels::{format_set_name, format_stat_value};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct AdviceRow<'r> {
    #[serde(rename = "Item")]
    id: &'r str,
    #[serde(rename = "Set")]
    set: String,
    #[serde(rename = "Slot")]
    slot: &'static str,
    #[serde(rename = "Level")]
    level: u32,
    #[serde(rename = "Rarity")]
    rarity: u8,
    #[serde(rename = "Main Stat")]
    main_stat: String,
    #[serde(rename = "Best Profile")]
    best_profile: &'r str,
    #[serde(rename = "Score")]
    score: f64,
    #[serde(rename = "Tier")]
    tier: &'static str,
    #[serde(rename = "Recommendation")]
    recommendation: &'static str,
}

impl<'r> AdviceRow<'r> {
    fn from_advice(advice: &'r ItemAdvice<'_>) -> Self {
        let item = advice.item;
        let main_stat = item
            .main_stat
            .as_ref()
            .map(|main| format!("{} {}", main.key.label(), format_stat_value(&main.key, main.value)))
            .unwrap_or_default();

        Self {
            id: item.id.as_str(),
            set: format_set_name(&item.set_key),
            slot: item.slot_key.label(),
            level: item.level,
            rarity: item.rarity,
            main_stat,
            best_profile: advice.best_profile_key.as_deref().unwrap_or_default(),
            score: advice.best_score.score,
            tier: advice.best_score.tier.label(),
            recommendation: advice.recommendation.label(),
        }
    }
}

/// Writes one CSV row per advised item, header first.
pub fn write_advice_csv<W: Write>(rows: &[&ItemAdvice<'_>], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for advice in rows {
        csv_writer.serialize(AdviceRow::from_advice(advice))?;
    }
    csv_writer.flush()?;
    Ok(())
}
