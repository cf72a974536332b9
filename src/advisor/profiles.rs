use crate::inventory::domain::{SlotKey, StatKey};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

static STANDARD: OnceLock<ProfileDatabase> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Pyro,
    Hydro,
    Electro,
    Anemo,
    Dendro,
    Cryo,
    Geo,
}

impl Element {
    pub const fn label(self) -> &'static str {
        match self {
            Element::Pyro => "Pyro",
            Element::Hydro => "Hydro",
            Element::Electro => "Electro",
            Element::Anemo => "Anemo",
            Element::Dendro => "Dendro",
            Element::Cryo => "Cryo",
            Element::Geo => "Geo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponClass {
    Sword,
    Claymore,
    Polearm,
    Bow,
    Catalyst,
}

impl WeaponClass {
    pub const fn label(self) -> &'static str {
        match self {
            WeaponClass::Sword => "Sword",
            WeaponClass::Claymore => "Claymore",
            WeaponClass::Polearm => "Polearm",
            WeaponClass::Bow => "Bow",
            WeaponClass::Catalyst => "Catalyst",
        }
    }
}

/// Scoring preferences for one holder archetype.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub key: &'static str,
    pub display_name: &'static str,
    pub element: Element,
    pub weapon_class: WeaponClass,
    pub preferred_sets: Vec<&'static str>,
    pub alternate_set_combos: Vec<Vec<&'static str>>,
    pub preferred_main_stats: BTreeMap<SlotKey, Vec<StatKey>>,
    pub attribute_weights: BTreeMap<StatKey, f64>,
    pub notes: &'static str,
}

impl Profile {
    /// Weight in `[0, 1]`; attributes the profile does not mention weigh 0.
    pub fn weight(&self, stat: &StatKey) -> f64 {
        self.attribute_weights.get(stat).copied().unwrap_or(0.0)
    }

    pub fn recommends_set(&self, set_key: &str) -> bool {
        self.preferred_sets.contains(&set_key)
            || self
                .alternate_set_combos
                .iter()
                .any(|combo| combo.contains(&set_key))
    }

    /// `None` for slots without main-stat preferences (flower, plume).
    pub fn main_stats_for(&self, slot: SlotKey) -> Option<&[StatKey]> {
        self.preferred_main_stats.get(&slot).map(Vec::as_slice)
    }
}

/// Read-only profile table, keyed by holder key and kept in declaration order.
#[derive(Debug, Clone)]
pub struct ProfileDatabase {
    profiles: Vec<Profile>,
}

impl ProfileDatabase {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self { profiles }
    }

    /// Shared table built on first use.
    pub fn standard() -> &'static ProfileDatabase {
        STANDARD.get_or_init(|| ProfileDatabase::new(PROFILES.iter().map(ProfileSeed::build).collect()))
    }

    pub fn get_profile(&self, key: &str) -> Option<&Profile> {
        self.profiles.iter().find(|profile| profile.key == key)
    }

    pub fn list_profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn profile_keys(&self) -> Vec<&str> {
        self.profiles.iter().map(|profile| profile.key).collect()
    }

    pub fn is_set_recommended(&self, key: &str, set_key: &str) -> bool {
        self.get_profile(key)
            .is_some_and(|profile| profile.recommends_set(set_key))
    }

    pub fn is_preferred_main_stat(&self, key: &str, slot: SlotKey, stat: &StatKey) -> bool {
        self.get_profile(key)
            .and_then(|profile| profile.main_stats_for(slot))
            .is_some_and(|stats| stats.contains(stat))
    }
}

struct ProfileSeed {
    key: &'static str,
    display_name: &'static str,
    element: Element,
    weapon_class: WeaponClass,
    sets: &'static [&'static str],
    alternate_sets: &'static [&'static [&'static str]],
    sands: &'static [&'static str],
    goblet: &'static [&'static str],
    circlet: &'static [&'static str],
    weights: &'static [(&'static str, f64)],
    notes: &'static str,
}

impl ProfileSeed {
    fn build(&self) -> Profile {
        let stats = |keys: &[&str]| keys.iter().map(|key| StatKey::from_key(key)).collect::<Vec<_>>();

        let preferred_main_stats = [
            (SlotKey::Sands, self.sands),
            (SlotKey::Goblet, self.goblet),
            (SlotKey::Circlet, self.circlet),
        ]
        .into_iter()
        .filter(|(_, keys)| !keys.is_empty())
        .map(|(slot, keys)| (slot, stats(keys)))
        .collect();

        Profile {
            key: self.key,
            display_name: self.display_name,
            element: self.element,
            weapon_class: self.weapon_class,
            preferred_sets: self.sets.to_vec(),
            alternate_set_combos: self.alternate_sets.iter().map(|combo| combo.to_vec()).collect(),
            preferred_main_stats,
            attribute_weights: self
                .weights
                .iter()
                .map(|(key, weight)| (StatKey::from_key(key), *weight))
                .collect(),
            notes: self.notes,
        }
    }
}

const PROFILES: &[ProfileSeed] = &[
    ProfileSeed {
        key: "yelan",
        display_name: "Yelan",
        element: Element::Hydro,
        weapon_class: WeaponClass::Bow,
        sets: &["emblem-of-severed-fate"],
        alternate_sets: &[&["noblesse-oblige", "heart-of-depth"]],
        sands: &["enerRech_", "hp_"],
        goblet: &["hydro_dmg_", "hp_"],
        circlet: &["critRate_", "critDMG_"],
        weights: &[
            ("critRate_", 1.0),
            ("critDMG_", 1.0),
            ("hp_", 0.9),
            ("enerRech_", 0.85),
            ("atk_", 0.2),
            ("eleMas", 0.1),
            ("hp", 0.3),
            ("atk", 0.05),
            ("def_", 0.0),
            ("def", 0.0),
        ],
        notes: "Burst-reliant Hydro sub-DPS. Needs ~200% ER. HP% scales her damage.",
    },
    ProfileSeed {
        key: "bennett",
        display_name: "Bennett",
        element: Element::Pyro,
        weapon_class: WeaponClass::Sword,
        sets: &["noblesse-oblige"],
        alternate_sets: &[&["emblem-of-severed-fate"]],
        sands: &["enerRech_", "hp_"],
        goblet: &["hp_"],
        circlet: &["hp_", "heal_"],
        weights: &[
            ("enerRech_", 1.0),
            ("hp_", 0.9),
            ("hp", 0.6),
            ("critRate_", 0.2),
            ("critDMG_", 0.2),
            ("atk_", 0.1),
            ("def_", 0.1),
            ("eleMas", 0.1),
            ("atk", 0.05),
            ("def", 0.05),
        ],
        notes: "Support build. ATK buff scales from base ATK only. Stack ER and HP.",
    },
    ProfileSeed {
        key: "xiangling",
        display_name: "Xiangling",
        element: Element::Pyro,
        weapon_class: WeaponClass::Polearm,
        sets: &["emblem-of-severed-fate"],
        alternate_sets: &[&["crimson-witch-of-flames"]],
        sands: &["enerRech_"],
        goblet: &["pyro_dmg_"],
        circlet: &["critRate_", "critDMG_"],
        weights: &[
            ("critRate_", 1.0),
            ("critDMG_", 1.0),
            ("enerRech_", 0.9),
            ("atk_", 0.75),
            ("eleMas", 0.7),
            ("atk", 0.3),
            ("hp_", 0.0),
            ("hp", 0.0),
            ("def_", 0.0),
            ("def", 0.0),
        ],
        notes: "Off-field Pyro DPS. Needs 200-250% ER. Pyronado is the main damage source.",
    },
    ProfileSeed {
        key: "xingqiu",
        display_name: "Xingqiu",
        element: Element::Hydro,
        weapon_class: WeaponClass::Sword,
        sets: &["emblem-of-severed-fate"],
        alternate_sets: &[&["noblesse-oblige"], &["heart-of-depth"]],
        sands: &["enerRech_", "atk_"],
        goblet: &["hydro_dmg_"],
        circlet: &["critRate_", "critDMG_"],
        weights: &[
            ("critRate_", 1.0),
            ("critDMG_", 1.0),
            ("enerRech_", 0.85),
            ("atk_", 0.75),
            ("eleMas", 0.3),
            ("atk", 0.3),
            ("hp_", 0.1),
            ("hp", 0.05),
            ("def_", 0.0),
            ("def", 0.0),
        ],
        notes: "Hydro sub-DPS. Needs 190-260% ER depending on team.",
    },
    ProfileSeed {
        key: "wanderer",
        display_name: "Wanderer",
        element: Element::Anemo,
        weapon_class: WeaponClass::Catalyst,
        sets: &["desert-pavilion-chronicle"],
        alternate_sets: &[&["marechaussee-hunter"], &["shimenawa-s-reminiscence"]],
        sands: &["atk_"],
        goblet: &["anemo_dmg_"],
        circlet: &["critRate_", "critDMG_"],
        weights: &[
            ("critRate_", 1.0),
            ("critDMG_", 1.0),
            ("atk_", 0.85),
            ("eleMas", 0.4),
            ("enerRech_", 0.3),
            ("atk", 0.35),
            ("hp_", 0.0),
            ("hp", 0.0),
            ("def_", 0.0),
            ("def", 0.0),
        ],
        notes: "Main DPS hypercarry. Aim for 70%+ Crit Rate.",
    },
    ProfileSeed {
        key: "furina",
        display_name: "Furina",
        element: Element::Hydro,
        weapon_class: WeaponClass::Sword,
        sets: &["golden-troupe"],
        alternate_sets: &[&["tenacity-of-the-millelith"]],
        sands: &["hp_", "enerRech_"],
        goblet: &["hp_", "hydro_dmg_"],
        circlet: &["critRate_", "critDMG_"],
        weights: &[
            ("hp_", 1.0),
            ("critRate_", 0.9),
            ("critDMG_", 0.9),
            ("enerRech_", 0.8),
            ("hp", 0.5),
            ("atk_", 0.1),
            ("eleMas", 0.1),
            ("atk", 0.05),
            ("def_", 0.0),
            ("def", 0.0),
        ],
        notes: "Off-field support and sub-DPS. Scales off HP. Aim for ~40,000 HP.",
    },
    ProfileSeed {
        key: "nahida",
        display_name: "Nahida",
        element: Element::Dendro,
        weapon_class: WeaponClass::Catalyst,
        sets: &["deepwood-memories"],
        alternate_sets: &[&["gilded-dreams"]],
        sands: &["eleMas"],
        goblet: &["dendro_dmg_", "eleMas"],
        circlet: &["critRate_", "critDMG_", "eleMas"],
        weights: &[
            ("eleMas", 1.0),
            ("critRate_", 0.9),
            ("critDMG_", 0.9),
            ("enerRech_", 0.5),
            ("atk_", 0.4),
            ("atk", 0.2),
            ("hp_", 0.0),
            ("hp", 0.0),
            ("def_", 0.0),
            ("def", 0.0),
        ],
        notes: "Dendro applicator and buffer. Wants ~1000 EM before Crit.",
    },
    ProfileSeed {
        key: "raiden",
        display_name: "Raiden Shogun",
        element: Element::Electro,
        weapon_class: WeaponClass::Polearm,
        sets: &["emblem-of-severed-fate"],
        alternate_sets: &[&["tenacity-of-the-millelith", "emblem-of-severed-fate"]],
        sands: &["enerRech_"],
        goblet: &["electro_dmg_"],
        circlet: &["critRate_", "critDMG_"],
        weights: &[
            ("critRate_", 1.0),
            ("critDMG_", 1.0),
            ("enerRech_", 0.95),
            ("atk_", 0.75),
            ("eleMas", 0.3),
            ("atk", 0.35),
            ("hp_", 0.0),
            ("hp", 0.0),
            ("def_", 0.0),
            ("def", 0.0),
        ],
        notes: "Burst DPS and battery. Aim for 250%+ ER.",
    },
];
