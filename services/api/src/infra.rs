use artifact_advisor::advisor::{Advisor, Recommendation, SortOrder};
use artifact_advisor::config::AnalysisConfig;
use artifact_advisor::inventory::{ImportedInventory, SlotKey};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) analysis: Arc<AnalysisConfig>,
}

/// Explicit profile keys win over the configured list, which wins over the
/// inventory's own holders. Every profile is a candidate when none apply.
pub(crate) fn build_advisor(
    config: &AnalysisConfig,
    overrides: &[String],
    inventory: &ImportedInventory,
) -> Advisor<'static> {
    let advisor = Advisor::standard();
    if !overrides.is_empty() {
        return advisor.with_candidates(overrides.iter().map(|key| key.trim().to_ascii_lowercase()));
    }

    match &config.candidate_profiles {
        Some(keys) => advisor.with_candidates(keys.iter().cloned()),
        None => advisor.for_holders(inventory.holder_keys()),
    }
}

pub(crate) fn parse_recommendation(raw: &str) -> Result<Recommendation, String> {
    Recommendation::from_key(raw).ok_or_else(|| {
        format!("unknown recommendation '{raw}' (expected best-in-slot, keep, potential or fodder)")
    })
}

pub(crate) fn parse_slot(raw: &str) -> Result<SlotKey, String> {
    SlotKey::from_key(raw).ok_or_else(|| {
        format!("unknown slot '{raw}' (expected flower, plume, sands, goblet or circlet)")
    })
}

pub(crate) fn parse_sort(raw: &str) -> Result<SortOrder, String> {
    SortOrder::from_key(raw)
        .ok_or_else(|| format!("unknown sort order '{raw}' (expected score, level or set)"))
}
