use super::normalizer::{hyphenate_compound, normalize_lookup};
use crate::inventory::domain::{SlotKey, StatKey};
use std::collections::HashMap;
use std::sync::OnceLock;

static AVATAR_IDS: OnceLock<HashMap<u64, &'static str>> = OnceLock::new();
static SET_IDS: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
static FIGHT_PROPS: OnceLock<HashMap<&'static str, StatKey>> = OnceLock::new();
static HOLDER_ALIASES: OnceLock<HashMap<String, &'static str>> = OnceLock::new();
static SET_ALIASES: OnceLock<HashMap<String, &'static str>> = OnceLock::new();

/// Showcase avatar id → canonical holder key. Unknown ids yield `None`.
pub(crate) fn holder_key_for_avatar(avatar_id: u64) -> Option<&'static str> {
    avatar_ids().get(&avatar_id).copied()
}

pub(crate) fn slot_for_equip_type(equip_type: &str) -> Option<SlotKey> {
    match equip_type.trim() {
        "EQUIP_BRACER" => Some(SlotKey::Flower),
        "EQUIP_NECKLACE" => Some(SlotKey::Plume),
        "EQUIP_SHOES" => Some(SlotKey::Sands),
        "EQUIP_RING" => Some(SlotKey::Goblet),
        "EQUIP_DRESS" => Some(SlotKey::Circlet),
        _ => None,
    }
}

/// Resolves the set slug from a relic icon name such as `UI_RelicIcon_15026_4`.
pub(crate) fn set_key_from_icon(icon: Option<&str>) -> String {
    let Some(set_id) = icon.and_then(set_id_from_icon) else {
        return "unknown".to_string();
    };

    match set_ids().get(set_id) {
        Some(slug) => (*slug).to_string(),
        None => format!("set-{set_id}"),
    }
}

fn set_id_from_icon(icon: &str) -> Option<&str> {
    let (_, rest) = icon.split_once("UI_RelicIcon_")?;
    let (digits, _) = rest.split_once('_')?;
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    Some(digits)
}

/// Showcase property identifier → attribute key, passing unknown ids through.
pub(crate) fn stat_for_fight_prop(prop_id: &str) -> StatKey {
    fight_props()
        .get(prop_id)
        .cloned()
        .unwrap_or_else(|| StatKey::from_key(prop_id))
}

/// Portable-export attribute keys already use the canonical vocabulary.
pub(crate) fn stat_for_portable_key(key: &str) -> StatKey {
    StatKey::from_key(key.trim())
}

pub(crate) fn slot_for_portable_key(key: &str) -> Option<SlotKey> {
    SlotKey::from_key(key)
}

/// Compound holder name (`RaidenShogun`) → canonical key (`raiden`).
pub(crate) fn holder_key_for_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    match holder_aliases().get(&normalize_lookup(trimmed)) {
        Some(key) => (*key).to_string(),
        None => hyphenate_compound(trimmed),
    }
}

/// Compound set name (`EmblemOfSeveredFate`) → canonical slug.
pub(crate) fn set_key_for_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return "unknown".to_string();
    }

    match set_aliases().get(&normalize_lookup(trimmed)) {
        Some(key) => (*key).to_string(),
        None => hyphenate_compound(trimmed).replace('\'', "-s-"),
    }
}

fn avatar_ids() -> &'static HashMap<u64, &'static str> {
    AVATAR_IDS.get_or_init(|| {
        const AVATARS: &[(u64, &str)] = &[
            (10000002, "ayaka"),
            (10000003, "jean"),
            (10000005, "traveler-anemo"),
            (10000006, "lisa"),
            (10000007, "traveler-anemo"),
            (10000014, "barbara"),
            (10000015, "kaeya"),
            (10000016, "diluc"),
            (10000020, "razor"),
            (10000021, "amber"),
            (10000022, "venti"),
            (10000023, "xiangling"),
            (10000024, "beidou"),
            (10000025, "xingqiu"),
            (10000026, "xiao"),
            (10000027, "ningguang"),
            (10000029, "klee"),
            (10000030, "zhongli"),
            (10000031, "fischl"),
            (10000032, "bennett"),
            (10000033, "tartaglia"),
            (10000034, "noelle"),
            (10000035, "qiqi"),
            (10000036, "chongyun"),
            (10000037, "ganyu"),
            (10000038, "albedo"),
            (10000039, "diona"),
            (10000041, "mona"),
            (10000042, "keqing"),
            (10000043, "sucrose"),
            (10000044, "xinyan"),
            (10000045, "rosaria"),
            (10000046, "hu-tao"),
            (10000047, "kazuha"),
            (10000048, "yanfei"),
            (10000049, "yoimiya"),
            (10000050, "thoma"),
            (10000051, "eula"),
            (10000052, "raiden"),
            (10000053, "sayu"),
            (10000054, "kokomi"),
            (10000055, "gorou"),
            (10000056, "sara"),
            (10000057, "arataki-itto"),
            (10000058, "yae-miko"),
            (10000059, "shikanoin-heizou"),
            (10000060, "yelan"),
            (10000062, "aloy"),
            (10000063, "shenhe"),
            (10000064, "yun-jin"),
            (10000065, "kuki-shinobu"),
            (10000066, "collei"),
            (10000067, "dori"),
            (10000068, "tighnari"),
            (10000069, "nilou"),
            (10000070, "cyno"),
            (10000071, "candace"),
            (10000072, "nahida"),
            (10000073, "layla"),
            (10000074, "wanderer"),
            (10000075, "faruzan"),
            (10000076, "yaoyao"),
            (10000077, "alhaitham"),
            (10000078, "dehya"),
            (10000079, "mika"),
            (10000080, "baizhu"),
            (10000081, "kaveh"),
            (10000082, "kirara"),
            (10000083, "lyney"),
            (10000084, "lynette"),
            (10000085, "freminet"),
            (10000086, "wriothesley"),
            (10000087, "neuvillette"),
            (10000088, "charlotte"),
            (10000089, "furina"),
            (10000090, "chevreuse"),
            (10000091, "navia"),
            (10000092, "gaming"),
            (10000093, "xianyun"),
            (10000094, "chiori"),
            (10000095, "sigewinne"),
            (10000096, "arlecchino"),
            (10000097, "sethos"),
            (10000098, "clorinde"),
            (10000099, "emilie"),
            (10000100, "kachina"),
            (10000101, "kinich"),
            (10000102, "mualani"),
        ];

        AVATARS.iter().copied().collect()
    })
}

fn set_ids() -> &'static HashMap<&'static str, &'static str> {
    SET_IDS.get_or_init(|| {
        const SETS: &[(&str, &str)] = &[
            ("10001", "resolution-of-sojourner"),
            ("10002", "brave-heart"),
            ("10003", "defender-s-will"),
            ("10004", "tiny-miracle"),
            ("10005", "berserker"),
            ("10006", "martial-artist"),
            ("10007", "instructor"),
            ("10008", "gambler"),
            ("10009", "the-exile"),
            ("10010", "adventurer"),
            ("10011", "lucky-dog"),
            ("10012", "scholar"),
            ("10013", "traveling-doctor"),
            ("14001", "gladiator-s-finale"),
            ("14002", "wanderer-s-troupe"),
            ("14003", "thundersoother"),
            ("14004", "thundering-fury"),
            ("15001", "maiden-beloved"),
            ("15002", "viridescent-venerer"),
            ("15003", "crimson-witch-of-flames"),
            ("15004", "lavawalker"),
            ("15005", "noblesse-oblige"),
            ("15006", "bloodstained-chivalry"),
            ("15007", "archaic-petra"),
            ("15008", "retracing-bolide"),
            ("15009", "heart-of-depth"),
            ("15010", "blizzard-strayer"),
            ("15013", "tenacity-of-the-millelith"),
            ("15014", "pale-flame"),
            ("15015", "emblem-of-severed-fate"),
            ("15016", "shimenawa-s-reminiscence"),
            ("15017", "husk-of-opulent-dreams"),
            ("15018", "ocean-hued-clam"),
            ("15019", "vermillion-hereafter"),
            ("15020", "echoes-of-an-offering"),
            ("15021", "deepwood-memories"),
            ("15022", "gilded-dreams"),
            ("15023", "desert-pavilion-chronicle"),
            ("15024", "flower-of-paradise-lost"),
            ("15025", "nymph-s-dream"),
            ("15026", "vourukasha-s-glow"),
            ("15027", "golden-troupe"),
            ("15028", "marechaussee-hunter"),
            ("15029", "song-of-days-past"),
            ("15030", "nighttime-whispers-in-the-echoing-woods"),
            ("15031", "fragment-of-harmonic-whimsy"),
            ("15032", "unfinished-reverie"),
        ];

        SETS.iter().copied().collect()
    })
}

fn fight_props() -> &'static HashMap<&'static str, StatKey> {
    FIGHT_PROPS.get_or_init(|| {
        const PROPS: &[(&str, &str)] = &[
            // Base values appear on flower/plume main stats in older payloads.
            ("FIGHT_PROP_BASE_HP", "hp"),
            ("FIGHT_PROP_HP", "hp"),
            ("FIGHT_PROP_HP_PERCENT", "hp_"),
            ("FIGHT_PROP_BASE_ATTACK", "atk"),
            ("FIGHT_PROP_ATTACK", "atk"),
            ("FIGHT_PROP_ATTACK_PERCENT", "atk_"),
            ("FIGHT_PROP_BASE_DEFENSE", "def"),
            ("FIGHT_PROP_DEFENSE", "def"),
            ("FIGHT_PROP_DEFENSE_PERCENT", "def_"),
            ("FIGHT_PROP_CRITICAL", "critRate_"),
            ("FIGHT_PROP_CRITICAL_HURT", "critDMG_"),
            ("FIGHT_PROP_CHARGE_EFFICIENCY", "enerRech_"),
            ("FIGHT_PROP_ELEMENT_MASTERY", "eleMas"),
            ("FIGHT_PROP_HEAL_ADD", "heal_"),
            ("FIGHT_PROP_FIRE_ADD_HURT", "pyro_dmg_"),
            ("FIGHT_PROP_WATER_ADD_HURT", "hydro_dmg_"),
            ("FIGHT_PROP_ELEC_ADD_HURT", "electro_dmg_"),
            ("FIGHT_PROP_WIND_ADD_HURT", "anemo_dmg_"),
            ("FIGHT_PROP_GRASS_ADD_HURT", "dendro_dmg_"),
            ("FIGHT_PROP_ICE_ADD_HURT", "cryo_dmg_"),
            ("FIGHT_PROP_ROCK_ADD_HURT", "geo_dmg_"),
            ("FIGHT_PROP_PHYSICAL_ADD_HURT", "physical_dmg_"),
        ];

        PROPS
            .iter()
            .map(|(prop, key)| (*prop, StatKey::from_key(key)))
            .collect()
    })
}

fn holder_aliases() -> &'static HashMap<String, &'static str> {
    HOLDER_ALIASES.get_or_init(|| {
        const NAME_TO_HOLDER: &[(&str, &str)] = &[
            ("RaidenShogun", "raiden"),
            ("Raiden", "raiden"),
            ("KamisatoAyaka", "ayaka"),
            ("KamisatoAyato", "ayato"),
            ("SangonomiyaKokomi", "kokomi"),
            ("KaedeharaKazuha", "kazuha"),
            ("AratakiItto", "arataki-itto"),
            ("HuTao", "hu-tao"),
            ("YaeMiko", "yae-miko"),
            ("ShikanoinHeizou", "shikanoin-heizou"),
            ("KukiShinobu", "kuki-shinobu"),
            ("Tartaglia", "tartaglia"),
            ("Wanderer", "wanderer"),
            ("Xiangling", "xiangling"),
            ("Xingqiu", "xingqiu"),
            ("Bennett", "bennett"),
            ("Yelan", "yelan"),
            ("Furina", "furina"),
            ("Nahida", "nahida"),
        ];

        let mut map = HashMap::with_capacity(NAME_TO_HOLDER.len());
        for (name, key) in NAME_TO_HOLDER {
            map.insert(normalize_lookup(name), *key);
        }
        map
    })
}

fn set_aliases() -> &'static HashMap<String, &'static str> {
    SET_ALIASES.get_or_init(|| {
        const NAME_TO_SET: &[(&str, &str)] = &[
            ("EmblemOfSeveredFate", "emblem-of-severed-fate"),
            ("NoblesseOblige", "noblesse-oblige"),
            ("CrimsonWitchOfFlames", "crimson-witch-of-flames"),
            ("ViridescentVenerer", "viridescent-venerer"),
            ("GoldenTroupe", "golden-troupe"),
            ("DeepwoodMemories", "deepwood-memories"),
            ("GildedDreams", "gilded-dreams"),
            ("DesertPavilionChronicle", "desert-pavilion-chronicle"),
            ("MarechausseeHunter", "marechaussee-hunter"),
            ("HeartOfDepth", "heart-of-depth"),
            ("BlizzardStrayer", "blizzard-strayer"),
            ("GladiatorsFinale", "gladiator-s-finale"),
            ("WanderersTroupe", "wanderer-s-troupe"),
            ("ShimenawasReminiscence", "shimenawa-s-reminiscence"),
            ("TenacityOfTheMillelith", "tenacity-of-the-millelith"),
            ("PaleFlame", "pale-flame"),
            ("Thundersoother", "thundersoother"),
            ("ThunderingFury", "thundering-fury"),
            ("MaidenBeloved", "maiden-beloved"),
            ("Lavawalker", "lavawalker"),
            ("BloodstainedChivalry", "bloodstained-chivalry"),
            ("ArchaicPetra", "archaic-petra"),
            ("RetracingBolide", "retracing-bolide"),
            ("HuskOfOpulentDreams", "husk-of-opulent-dreams"),
            ("OceanHuedClam", "ocean-hued-clam"),
            ("VermillionHereafter", "vermillion-hereafter"),
            ("EchoesOfAnOffering", "echoes-of-an-offering"),
            ("FlowerOfParadiseLost", "flower-of-paradise-lost"),
            ("NymphsDream", "nymph-s-dream"),
            ("VourukashasGlow", "vourukasha-s-glow"),
            ("SongOfDaysPast", "song-of-days-past"),
            ("FragmentOfHarmonicWhimsy", "fragment-of-harmonic-whimsy"),
            ("UnfinishedReverie", "unfinished-reverie"),
            (
                "NighttimeWhispersInTheEchoingWoods",
                "nighttime-whispers-in-the-echoing-woods",
            ),
        ];

        let mut map = HashMap::with_capacity(NAME_TO_SET.len());
        for (name, key) in NAME_TO_SET {
            map.insert(normalize_lookup(name), *key);
        }
        map
    })
}
