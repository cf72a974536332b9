use crate::inventory::domain::{CanonicalItem, ItemId, SlotKey, StatKey, StatLine};

pub(super) fn item(
    set_key: &str,
    slot: SlotKey,
    main_stat: Option<StatKey>,
    substats: &[(StatKey, f64)],
) -> CanonicalItem {
    CanonicalItem {
        id: ItemId::generate(),
        set_key: set_key.to_string(),
        slot_key: slot,
        rarity: 5,
        level: 20,
        main_stat: main_stat.map(|key| StatLine::new(key, 0.0)),
        substats: substats
            .iter()
            .map(|(key, value)| StatLine::new(key.clone(), *value))
            .collect(),
        location: None,
        locked: false,
    }
}

/// Four max rolls into crit and one each into ER and ATK%: a strong Raiden
/// circlet that lands in S tier on its own set.
pub(super) fn raiden_circlet() -> CanonicalItem {
    item(
        "emblem-of-severed-fate",
        SlotKey::Circlet,
        Some(StatKey::CritRate),
        &[
            (StatKey::CritRate, 3.89 * 2.0),
            (StatKey::CritDamage, 7.77 * 2.0),
            (StatKey::EnergyRecharge, 6.48 * 2.0),
            (StatKey::AtkPercent, 5.83),
        ],
    )
}

/// Only flat DEF and HP substats: weight 0 or near zero for every profile.
pub(super) fn junk_flower() -> CanonicalItem {
    item(
        "gladiator-s-finale",
        SlotKey::Flower,
        Some(StatKey::Hp),
        &[(StatKey::Def, 23.15), (StatKey::DefPercent, 7.29)],
    )
}

pub(super) fn plain_item(set_key: &str, slot: SlotKey, crit_rolls: f64) -> CanonicalItem {
    item(
        set_key,
        slot,
        None,
        &[
            (StatKey::CritRate, 3.89 * crit_rolls),
            (StatKey::CritDamage, 7.77 * crit_rolls),
        ],
    )
}

pub(super) fn equipped_by(mut item: CanonicalItem, holder_key: &str) -> CanonicalItem {
    item.location = Some(holder_key.to_string());
    item
}
