//! Vocations: definitions, promotions and training-cost curves

pub mod definition;
pub mod loader;
pub mod progression;
pub mod record;
pub mod registry;

pub use definition::{
    CombatMultipliers, Regeneration, TransformationOverride, VocationDefinition, WeaponCategory,
};
pub use loader::{parse_document, TomlVocationSource};
pub use progression::{ProgressionCache, BASE_MANA, SKILL_ANCHOR_LEVEL, SKILL_BASE_TRIES};
pub use record::{TransformRecord, VocationRecord, VocationSource};
pub use registry::{init_vocations, vocations, VocationRegistry};
