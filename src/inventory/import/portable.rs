use super::{mapping, take_records, ImportError};
use crate::inventory::domain::{
    CanonicalHolder, CanonicalItem, ItemId, StatLine, TalentLevels, MAX_SUBSTATS,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

/// Top-level fields of a portable export. Collections stay as raw records so
/// one malformed entry only costs that entry.
#[derive(Debug, Default)]
pub(crate) struct PortablePayload {
    pub(crate) format: Option<String>,
    pub(crate) version: Option<u32>,
    pub(crate) source: Option<String>,
    characters: Option<Vec<Value>>,
    artifacts: Option<Vec<Value>>,
}

impl PortablePayload {
    pub(crate) fn from_object(mut object: Map<String, Value>) -> Result<Self, ImportError> {
        Ok(Self {
            format: object
                .get("format")
                .and_then(Value::as_str)
                .map(str::to_string),
            version: object
                .get("version")
                .and_then(Value::as_u64)
                .and_then(|version| u32::try_from(version).ok()),
            source: object
                .get("source")
                .and_then(Value::as_str)
                .map(str::to_string),
            characters: take_records(&mut object, "characters")?,
            artifacts: take_records(&mut object, "artifacts")?,
        })
    }

    pub(crate) fn has_collections(&self) -> bool {
        self.characters.is_some() || self.artifacts.is_some()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCharacter {
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    level: Option<u32>,
    #[serde(default)]
    ascension: Option<u8>,
    #[serde(default)]
    constellation: Option<u8>,
    #[serde(default)]
    talent: Option<RawTalent>,
}

#[derive(Debug, Default, Deserialize)]
struct RawTalent {
    #[serde(default)]
    auto: Option<u8>,
    #[serde(default)]
    skill: Option<u8>,
    #[serde(default)]
    burst: Option<u8>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    #[serde(default)]
    set_key: Option<String>,
    #[serde(default)]
    slot_key: Option<String>,
    #[serde(default)]
    rarity: Option<u8>,
    #[serde(default)]
    level: Option<u32>,
    #[serde(default)]
    main_stat_key: Option<String>,
    #[serde(default)]
    main_stat_value: Option<f64>,
    #[serde(default)]
    substats: Option<Vec<Value>>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    lock: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawSubstat {
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    value: Option<f64>,
}

pub(crate) struct PortableImport {
    pub(crate) holders: Vec<CanonicalHolder>,
    pub(crate) items: Vec<CanonicalItem>,
    pub(crate) warnings: Vec<String>,
}

pub(crate) fn normalize(payload: PortablePayload) -> PortableImport {
    let mut warnings = Vec::new();

    let mut items = Vec::new();
    for (index, record) in payload.artifacts.unwrap_or_default().into_iter().enumerate() {
        match serde_json::from_value::<RawArtifact>(record) {
            Ok(raw) => items.extend(normalize_artifact(index, raw, &mut warnings)),
            Err(err) => {
                warn!(index, error = %err, "dropping unreadable artifact record");
                warnings.push(format!("artifact #{index} could not be read ({err}) and was skipped"));
            }
        }
    }

    let mut holders = Vec::new();
    for (index, record) in payload.characters.unwrap_or_default().into_iter().enumerate() {
        match serde_json::from_value::<RawCharacter>(record) {
            Ok(raw) => holders.push(normalize_character(raw, &items)),
            Err(err) => {
                warn!(index, error = %err, "dropping unreadable character record");
                warnings.push(format!("character #{index} could not be read ({err}) and was skipped"));
            }
        }
    }

    PortableImport {
        holders,
        items,
        warnings,
    }
}

fn normalize_character(raw: RawCharacter, items: &[CanonicalItem]) -> CanonicalHolder {
    let key = mapping::holder_key_for_name(raw.key.as_deref().unwrap_or_default());
    // The export records equipment on the artifact side only.
    let equipped_items = items
        .iter()
        .filter(|item| !key.is_empty() && item.is_equipped_by(&key))
        .map(|item| item.id.clone())
        .collect();

    CanonicalHolder {
        level: raw.level.unwrap_or(1),
        ascension_tier: raw.ascension.unwrap_or(0),
        constellation_rank: raw.constellation.unwrap_or(0),
        talents: raw.talent.map(|talent| TalentLevels {
            auto: talent.auto.unwrap_or(0),
            skill: talent.skill.unwrap_or(0),
            burst: talent.burst.unwrap_or(0),
        }),
        equipped_items,
        key,
    }
}

fn normalize_artifact(
    index: usize,
    raw: RawArtifact,
    warnings: &mut Vec<String>,
) -> Option<CanonicalItem> {
    let raw_slot = raw.slot_key.as_deref().unwrap_or_default();
    let Some(slot_key) = mapping::slot_for_portable_key(raw_slot) else {
        warn!(index, slot = raw_slot, "dropping artifact with unrecognized slot");
        warnings.push(format!(
            "artifact #{index} has unrecognized slot \"{raw_slot}\" and was skipped"
        ));
        return None;
    };

    let main_stat = raw
        .main_stat_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(|key| {
            StatLine::new(
                mapping::stat_for_portable_key(key),
                raw.main_stat_value.unwrap_or(0.0),
            )
        });

    // A zero roll cannot be told apart from an absent one in this format.
    let mut substats = Vec::new();
    for record in raw.substats.unwrap_or_default() {
        let sub = match serde_json::from_value::<RawSubstat>(record) {
            Ok(sub) => sub,
            Err(err) => {
                warnings.push(format!("artifact #{index} has an unreadable substat ({err}); dropped it"));
                continue;
            }
        };
        let Some(key) = sub.key.filter(|key| !key.trim().is_empty()) else {
            continue;
        };
        let Some(value) = sub.value.filter(|value| *value != 0.0 && !value.is_nan()) else {
            continue;
        };
        substats.push(StatLine::new(mapping::stat_for_portable_key(&key), value));
    }
    if substats.len() > MAX_SUBSTATS {
        warnings.push(format!(
            "artifact #{index} carried {} substats; kept the first {MAX_SUBSTATS}",
            substats.len()
        ));
        substats.truncate(MAX_SUBSTATS);
    }

    let location = raw
        .location
        .as_deref()
        .map(mapping::holder_key_for_name)
        .filter(|key| !key.is_empty());

    Some(CanonicalItem {
        id: ItemId::generate(),
        set_key: mapping::set_key_for_name(raw.set_key.as_deref().unwrap_or_default()),
        slot_key,
        rarity: raw.rarity.unwrap_or(5).clamp(1, 5),
        level: raw.level.unwrap_or(0),
        main_stat,
        substats,
        location,
        locked: raw.lock.unwrap_or(false),
    })
}
