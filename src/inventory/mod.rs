//! Canonical inventory model and the adapters that produce it.

pub mod domain;
pub mod import;
pub mod labels;

pub use domain::{
    CanonicalHolder, CanonicalItem, EquipError, ImportedInventory, InventorySource, ItemId,
    PlayerInfo, SlotKey, StatKey, StatLine, TalentLevels, MAX_SUBSTATS,
};
pub use import::{
    validate, ImportError, InventoryImporter, NormalizeAdapter, ValidationReport,
    ValidationStats,
};
pub use labels::{format_set_name, format_stat_value};
