use super::{mapping, take_records, ImportError};
use crate::inventory::domain::{
    CanonicalHolder, CanonicalItem, ItemId, PlayerInfo, StatLine, MAX_SUBSTATS,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{debug, warn};

const PROP_LEVEL: &str = "4001";
const PROP_ASCENSION: &str = "1002";

#[derive(Debug, Default)]
pub(crate) struct ShowcasePayload {
    player_info: Option<Value>,
    avatars: Vec<Value>,
}

impl ShowcasePayload {
    pub(crate) fn from_object(mut object: Map<String, Value>) -> Result<Self, ImportError> {
        Ok(Self {
            avatars: take_records(&mut object, "avatarInfoList")?.unwrap_or_default(),
            player_info: object.remove("playerInfo").filter(|info| !info.is_null()),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPlayerInfo {
    #[serde(default)]
    nickname: Option<String>,
    #[serde(default)]
    level: Option<u32>,
    #[serde(default)]
    world_level: Option<u32>,
    #[serde(default)]
    finish_achievement_num: Option<u32>,
    #[serde(default)]
    tower_floor_index: Option<u32>,
    #[serde(default)]
    tower_level_index: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAvatar {
    #[serde(default)]
    avatar_id: Option<u64>,
    #[serde(default)]
    prop_map: Option<HashMap<String, RawProp>>,
    #[serde(default)]
    talent_id_list: Option<Vec<Value>>,
    #[serde(default)]
    equip_list: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawProp {
    #[serde(default)]
    val: Option<Value>,
}

impl RawProp {
    /// Prop values arrive as strings (`"90"`) or bare numbers depending on the
    /// service version.
    fn as_u32(&self) -> Option<u32> {
        match self.val.as_ref()? {
            Value::String(raw) => raw.trim().parse().ok(),
            Value::Number(number) => number.as_u64().and_then(|value| u32::try_from(value).ok()),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawEquip {
    #[serde(default)]
    reliquary: Option<RawReliquary>,
    #[serde(default)]
    flat: Option<RawFlat>,
}

#[derive(Debug, Deserialize)]
struct RawReliquary {
    #[serde(default)]
    level: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFlat {
    #[serde(default)]
    equip_type: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    rank_level: Option<u8>,
    #[serde(default)]
    reliquary_mainstat: Option<RawMainstat>,
    #[serde(default)]
    reliquary_substats: Option<Vec<RawSubstat>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMainstat {
    #[serde(default)]
    main_prop_id: Option<String>,
    #[serde(default)]
    stat_value: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSubstat {
    #[serde(default)]
    append_prop_id: Option<String>,
    #[serde(default)]
    stat_value: Option<f64>,
}

pub(crate) struct ShowcaseImport {
    pub(crate) player: PlayerInfo,
    pub(crate) holders: Vec<CanonicalHolder>,
    pub(crate) items: Vec<CanonicalItem>,
    pub(crate) warnings: Vec<String>,
}

pub(crate) fn normalize(payload: ShowcasePayload) -> ShowcaseImport {
    let mut warnings = Vec::new();
    let raw_player = match payload.player_info.map(serde_json::from_value::<RawPlayerInfo>) {
        Some(Ok(raw)) => raw,
        Some(Err(err)) => {
            warn!(error = %err, "ignoring unreadable player info");
            warnings.push(format!("player info could not be read ({err}); using defaults"));
            RawPlayerInfo::default()
        }
        None => RawPlayerInfo::default(),
    };
    let player = player_info(raw_player);
    let mut holders = Vec::new();
    let mut items = Vec::new();

    for (index, record) in payload.avatars.into_iter().enumerate() {
        let avatar = match serde_json::from_value::<RawAvatar>(record) {
            Ok(avatar) => avatar,
            Err(err) => {
                warn!(index, error = %err, "dropping unreadable showcase avatar");
                warnings.push(format!("avatar #{index} could not be read ({err}) and was skipped"));
                continue;
            }
        };
        let Some(avatar_id) = avatar.avatar_id else {
            debug!(index, "dropping showcase avatar without an id");
            continue;
        };
        let Some(holder_key) = mapping::holder_key_for_avatar(avatar_id) else {
            debug!(avatar_id, "dropping showcase avatar with unknown id");
            continue;
        };

        let props = avatar.prop_map.unwrap_or_default();
        let constellations = avatar.talent_id_list.map(|list| list.len()).unwrap_or(0);
        let mut holder = CanonicalHolder {
            key: holder_key.to_string(),
            level: props.get(PROP_LEVEL).and_then(RawProp::as_u32).unwrap_or(0),
            ascension_tier: props
                .get(PROP_ASCENSION)
                .and_then(RawProp::as_u32)
                .and_then(|value| u8::try_from(value).ok())
                .unwrap_or(0),
            constellation_rank: u8::try_from(constellations).unwrap_or(u8::MAX),
            talents: None,
            equipped_items: Vec::new(),
        };

        for (slot_index, record) in avatar.equip_list.unwrap_or_default().into_iter().enumerate() {
            let equip = match serde_json::from_value::<RawEquip>(record) {
                Ok(equip) => equip,
                Err(err) => {
                    warnings.push(format!(
                        "{holder_key} equip entry #{slot_index} could not be read ({err}) and was skipped"
                    ));
                    continue;
                }
            };
            if let Some(item) = normalize_equip(equip, holder_key, &mut warnings) {
                holder.equipped_items.push(item.id.clone());
                items.push(item);
            }
        }

        holders.push(holder);
    }

    ShowcaseImport {
        player,
        holders,
        items,
        warnings,
    }
}

fn normalize_equip(
    equip: RawEquip,
    holder_key: &str,
    warnings: &mut Vec<String>,
) -> Option<CanonicalItem> {
    // Weapons share the equip list but carry no reliquary block.
    let reliquary = equip.reliquary?;
    let flat = equip.flat?;

    let equip_type = flat.equip_type.as_deref().unwrap_or_default();
    let Some(slot_key) = mapping::slot_for_equip_type(equip_type) else {
        debug!(holder = holder_key, equip_type, "dropping equip entry with unknown slot");
        return None;
    };

    let main_stat = flat.reliquary_mainstat.and_then(|main| {
        let prop_id = main.main_prop_id?;
        Some(StatLine::new(
            mapping::stat_for_fight_prop(&prop_id),
            main.stat_value.unwrap_or(0.0),
        ))
    });

    let mut substats: Vec<StatLine> = flat
        .reliquary_substats
        .unwrap_or_default()
        .into_iter()
        .filter_map(|sub| {
            let prop_id = sub.append_prop_id?;
            Some(StatLine::new(
                mapping::stat_for_fight_prop(&prop_id),
                sub.stat_value.unwrap_or(0.0),
            ))
        })
        .collect();
    if substats.len() > MAX_SUBSTATS {
        warnings.push(format!(
            "{holder_key} {slot_key} carried {} substats; kept the first {MAX_SUBSTATS}",
            substats.len()
        ));
        substats.truncate(MAX_SUBSTATS);
    }

    Some(CanonicalItem {
        id: ItemId::generate(),
        set_key: mapping::set_key_from_icon(flat.icon.as_deref()),
        slot_key,
        rarity: flat.rank_level.unwrap_or(5).clamp(1, 5),
        level: reliquary.level.unwrap_or(1).saturating_sub(1),
        main_stat,
        substats,
        location: Some(holder_key.to_string()),
        locked: false,
    })
}

fn player_info(raw: RawPlayerInfo) -> PlayerInfo {
    let spiral_abyss = match (raw.tower_floor_index, raw.tower_level_index) {
        (Some(floor), Some(chamber)) if floor > 0 => Some(format!("{floor}-{chamber}")),
        _ => None,
    };

    PlayerInfo {
        nickname: raw
            .nickname
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "Unknown".to_string()),
        level: raw.level.unwrap_or(0),
        world_level: raw.world_level.unwrap_or(0),
        achievements: raw.finish_achievement_num.unwrap_or(0),
        spiral_abyss,
    }
}
