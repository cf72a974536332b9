use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Opaque identifier assigned to every item during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The five equip slots an artifact can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKey {
    Flower,
    Plume,
    Sands,
    Goblet,
    Circlet,
}

impl SlotKey {
    pub const fn ordered() -> [SlotKey; 5] {
        [
            SlotKey::Flower,
            SlotKey::Plume,
            SlotKey::Sands,
            SlotKey::Goblet,
            SlotKey::Circlet,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            SlotKey::Flower => "flower",
            SlotKey::Plume => "plume",
            SlotKey::Sands => "sands",
            SlotKey::Goblet => "goblet",
            SlotKey::Circlet => "circlet",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SlotKey::Flower => "Flower of Life",
            SlotKey::Plume => "Plume of Death",
            SlotKey::Sands => "Sands of Eon",
            SlotKey::Goblet => "Goblet of Eonothem",
            SlotKey::Circlet => "Circlet of Logos",
        }
    }

    /// Flower and plume always roll a flat HP/ATK main stat.
    pub const fn has_variable_main_stat(self) -> bool {
        matches!(self, SlotKey::Sands | SlotKey::Goblet | SlotKey::Circlet)
    }

    pub fn from_key(value: &str) -> Option<Self> {
        SlotKey::ordered()
            .into_iter()
            .find(|slot| slot.key().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Attribute vocabulary shared by main stats, substats and profile weights.
///
/// Identifiers outside the vocabulary survive normalization as [`StatKey::Other`]
/// so newer game data degrades to an opaque key instead of failing an import.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatKey {
    Hp,
    HpPercent,
    Atk,
    AtkPercent,
    Def,
    DefPercent,
    CritRate,
    CritDamage,
    EnergyRecharge,
    ElementalMastery,
    HealingBonus,
    PyroDamage,
    HydroDamage,
    ElectroDamage,
    AnemoDamage,
    DendroDamage,
    CryoDamage,
    GeoDamage,
    PhysicalDamage,
    Other(String),
}

const KNOWN_STATS: [StatKey; 19] = [
    StatKey::Hp,
    StatKey::HpPercent,
    StatKey::Atk,
    StatKey::AtkPercent,
    StatKey::Def,
    StatKey::DefPercent,
    StatKey::CritRate,
    StatKey::CritDamage,
    StatKey::EnergyRecharge,
    StatKey::ElementalMastery,
    StatKey::HealingBonus,
    StatKey::PyroDamage,
    StatKey::HydroDamage,
    StatKey::ElectroDamage,
    StatKey::AnemoDamage,
    StatKey::DendroDamage,
    StatKey::CryoDamage,
    StatKey::GeoDamage,
    StatKey::PhysicalDamage,
];

impl StatKey {
    pub fn from_key(value: &str) -> Self {
        KNOWN_STATS
            .iter()
            .find(|stat| stat.key() == value)
            .cloned()
            .unwrap_or_else(|| StatKey::Other(value.to_string()))
    }

    pub fn key(&self) -> &str {
        match self {
            StatKey::Hp => "hp",
            StatKey::HpPercent => "hp_",
            StatKey::Atk => "atk",
            StatKey::AtkPercent => "atk_",
            StatKey::Def => "def",
            StatKey::DefPercent => "def_",
            StatKey::CritRate => "critRate_",
            StatKey::CritDamage => "critDMG_",
            StatKey::EnergyRecharge => "enerRech_",
            StatKey::ElementalMastery => "eleMas",
            StatKey::HealingBonus => "heal_",
            StatKey::PyroDamage => "pyro_dmg_",
            StatKey::HydroDamage => "hydro_dmg_",
            StatKey::ElectroDamage => "electro_dmg_",
            StatKey::AnemoDamage => "anemo_dmg_",
            StatKey::DendroDamage => "dendro_dmg_",
            StatKey::CryoDamage => "cryo_dmg_",
            StatKey::GeoDamage => "geo_dmg_",
            StatKey::PhysicalDamage => "physical_dmg_",
            StatKey::Other(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            StatKey::Hp => "HP",
            StatKey::HpPercent => "HP%",
            StatKey::Atk => "ATK",
            StatKey::AtkPercent => "ATK%",
            StatKey::Def => "DEF",
            StatKey::DefPercent => "DEF%",
            StatKey::CritRate => "CRIT Rate",
            StatKey::CritDamage => "CRIT DMG",
            StatKey::EnergyRecharge => "Energy Recharge",
            StatKey::ElementalMastery => "Elemental Mastery",
            StatKey::HealingBonus => "Healing Bonus",
            StatKey::PyroDamage => "Pyro DMG Bonus",
            StatKey::HydroDamage => "Hydro DMG Bonus",
            StatKey::ElectroDamage => "Electro DMG Bonus",
            StatKey::AnemoDamage => "Anemo DMG Bonus",
            StatKey::DendroDamage => "Dendro DMG Bonus",
            StatKey::CryoDamage => "Cryo DMG Bonus",
            StatKey::GeoDamage => "Geo DMG Bonus",
            StatKey::PhysicalDamage => "Physical DMG Bonus",
            StatKey::Other(raw) => raw,
        }
    }

    /// Largest increment a single upgrade roll can add on a 5-star artifact.
    pub fn max_roll(&self) -> Option<f64> {
        match self {
            StatKey::Hp => Some(298.75),
            StatKey::HpPercent => Some(5.83),
            StatKey::Atk => Some(19.45),
            StatKey::AtkPercent => Some(5.83),
            StatKey::Def => Some(23.15),
            StatKey::DefPercent => Some(7.29),
            StatKey::CritRate => Some(3.89),
            StatKey::CritDamage => Some(7.77),
            StatKey::EnergyRecharge => Some(6.48),
            StatKey::ElementalMastery => Some(23.31),
            _ => None,
        }
    }

    pub fn is_percentage(&self) -> bool {
        self.key().ends_with('_')
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for StatKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for StatKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(StatKey::from_key(&raw))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatLine {
    pub key: StatKey,
    pub value: f64,
}

impl StatLine {
    pub fn new(key: StatKey, value: f64) -> Self {
        Self { key, value }
    }
}

pub const MAX_SUBSTATS: usize = 4;

/// Canonical artifact shared by both import adapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalItem {
    pub id: ItemId,
    pub set_key: String,
    pub slot_key: SlotKey,
    pub rarity: u8,
    pub level: u32,
    pub main_stat: Option<StatLine>,
    pub substats: Vec<StatLine>,
    pub location: Option<String>,
    #[serde(default)]
    pub locked: bool,
}

impl CanonicalItem {
    pub fn is_equipped_by(&self, holder_key: &str) -> bool {
        self.location.as_deref() == Some(holder_key)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalentLevels {
    pub auto: u8,
    pub skill: u8,
    pub burst: u8,
}

/// Canonical character. Equipped items are referenced by id and live in the
/// collection-wide item list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalHolder {
    pub key: String,
    pub level: u32,
    pub ascension_tier: u8,
    pub constellation_rank: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub talents: Option<TalentLevels>,
    pub equipped_items: Vec<ItemId>,
}

/// Account summary carried by showcase payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInfo {
    pub nickname: String,
    pub level: u32,
    pub world_level: u32,
    pub achievements: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spiral_abyss: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventorySource {
    Showcase,
    Portable,
}

impl InventorySource {
    pub const fn label(self) -> &'static str {
        match self {
            InventorySource::Showcase => "Showcase",
            InventorySource::Portable => "Portable export",
        }
    }
}

/// Result of one normalization pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedInventory {
    pub source: InventorySource,
    pub source_label: String,
    pub version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<PlayerInfo>,
    pub holders: Vec<CanonicalHolder>,
    pub items: Vec<CanonicalItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    pub imported_at: DateTime<Utc>,
}

impl ImportedInventory {
    pub fn holder(&self, key: &str) -> Option<&CanonicalHolder> {
        self.holders.iter().find(|holder| holder.key == key)
    }

    pub fn item(&self, id: &ItemId) -> Option<&CanonicalItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Resolves a holder's equipped ids against the item list, skipping ids
    /// that no longer exist.
    pub fn equipped_items(&self, holder_key: &str) -> Vec<&CanonicalItem> {
        let Some(holder) = self.holder(holder_key) else {
            return Vec::new();
        };

        holder
            .equipped_items
            .iter()
            .filter_map(|id| self.item(id))
            .collect()
    }

    pub fn holder_keys(&self) -> Vec<&str> {
        self.holders.iter().map(|holder| holder.key.as_str()).collect()
    }

    /// Moves an item onto a holder, replacing whatever that holder wore in the
    /// same slot and detaching the item from its previous holder.
    pub fn equip(&mut self, holder_key: &str, item_id: &ItemId) -> Result<(), EquipError> {
        let slot = self
            .item(item_id)
            .map(|item| item.slot_key)
            .ok_or_else(|| EquipError::UnknownItem(item_id.clone()))?;

        if self.holder(holder_key).is_none() {
            return Err(EquipError::UnknownHolder(holder_key.to_string()));
        }

        let displaced: Vec<ItemId> = self
            .equipped_items(holder_key)
            .into_iter()
            .filter(|item| item.slot_key == slot && &item.id != item_id)
            .map(|item| item.id.clone())
            .collect();

        for holder in &mut self.holders {
            holder
                .equipped_items
                .retain(|id| id != item_id && !displaced.contains(id));
            if holder.key == holder_key {
                holder.equipped_items.push(item_id.clone());
            }
        }

        for item in &mut self.items {
            if &item.id == item_id {
                item.location = Some(holder_key.to_string());
            } else if displaced.contains(&item.id) {
                item.location = None;
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EquipError {
    UnknownItem(ItemId),
    UnknownHolder(String),
}

impl fmt::Display for EquipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquipError::UnknownItem(id) => write!(f, "item {id} is not in this inventory"),
            EquipError::UnknownHolder(key) => write!(f, "holder '{key}' is not in this inventory"),
        }
    }
}

impl std::error::Error for EquipError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(slot: SlotKey, location: Option<&str>) -> CanonicalItem {
        CanonicalItem {
            id: ItemId::generate(),
            set_key: "emblem-of-severed-fate".to_string(),
            slot_key: slot,
            rarity: 5,
            level: 20,
            main_stat: None,
            substats: Vec::new(),
            location: location.map(str::to_string),
            locked: false,
        }
    }

    fn holder(key: &str, equipped: Vec<ItemId>) -> CanonicalHolder {
        CanonicalHolder {
            key: key.to_string(),
            level: 90,
            ascension_tier: 6,
            constellation_rank: 0,
            talents: None,
            equipped_items: equipped,
        }
    }

    fn inventory() -> ImportedInventory {
        let worn = item(SlotKey::Sands, Some("raiden"));
        let spare = item(SlotKey::Sands, Some("yelan"));
        ImportedInventory {
            source: InventorySource::Portable,
            source_label: "Unknown".to_string(),
            version: 2,
            player: None,
            holders: vec![
                holder("raiden", vec![worn.id.clone()]),
                holder("yelan", vec![spare.id.clone()]),
            ],
            items: vec![worn, spare],
            warnings: Vec::new(),
            imported_at: Utc::now(),
        }
    }

    #[test]
    fn stat_keys_round_trip_known_and_opaque_identifiers() {
        assert_eq!(StatKey::from_key("critDMG_"), StatKey::CritDamage);
        assert_eq!(StatKey::CritDamage.key(), "critDMG_");
        let opaque = StatKey::from_key("FIGHT_PROP_NEW_THING");
        assert_eq!(opaque, StatKey::Other("FIGHT_PROP_NEW_THING".to_string()));
        assert_eq!(opaque.label(), "FIGHT_PROP_NEW_THING");
        assert!(opaque.max_roll().is_none());
    }

    #[test]
    fn stat_key_serializes_as_plain_string() {
        let line = StatLine::new(StatKey::EnergyRecharge, 6.5);
        let json = serde_json::to_value(&line).expect("serializes");
        assert_eq!(json["key"], "enerRech_");
        let back: StatLine = serde_json::from_value(json).expect("deserializes");
        assert_eq!(back.key, StatKey::EnergyRecharge);
    }

    #[test]
    fn only_sands_goblet_circlet_have_variable_main_stats() {
        let variable: Vec<SlotKey> = SlotKey::ordered()
            .into_iter()
            .filter(|slot| slot.has_variable_main_stat())
            .collect();
        assert_eq!(variable, vec![SlotKey::Sands, SlotKey::Goblet, SlotKey::Circlet]);
        assert_eq!(SlotKey::from_key("Circlet"), Some(SlotKey::Circlet));
        assert_eq!(SlotKey::from_key("weapon"), None);
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(ItemId::generate(), ItemId::generate());
    }

    #[test]
    fn equip_moves_item_and_displaces_same_slot_piece() {
        let mut inventory = inventory();
        let raiden_sands = inventory.holders[0].equipped_items[0].clone();
        let yelan_sands = inventory.holders[1].equipped_items[0].clone();

        inventory.equip("raiden", &yelan_sands).expect("equip succeeds");

        let raiden: Vec<&ItemId> = inventory
            .equipped_items("raiden")
            .into_iter()
            .map(|item| &item.id)
            .collect();
        assert_eq!(raiden, vec![&yelan_sands]);
        assert!(inventory.equipped_items("yelan").is_empty());
        assert_eq!(
            inventory.item(&yelan_sands).and_then(|item| item.location.clone()),
            Some("raiden".to_string())
        );
        assert!(inventory
            .item(&raiden_sands)
            .expect("still in inventory")
            .location
            .is_none());
    }

    #[test]
    fn equip_rejects_unknown_references() {
        let mut inventory = inventory();
        let id = inventory.items[0].id.clone();
        assert_eq!(
            inventory.equip("nobody", &id),
            Err(EquipError::UnknownHolder("nobody".to_string()))
        );
        let missing = ItemId("missing".to_string());
        assert_eq!(
            inventory.equip("raiden", &missing),
            Err(EquipError::UnknownItem(missing.clone()))
        );
    }
}
