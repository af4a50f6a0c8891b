//! Vocation definitions and promotion overrides

use ahash::AHashMap;
use serde::Serialize;

use crate::core::config::VocationBaselines;
use crate::core::types::{MagicLevel, Skill, SkillLevel, Ticks, VocationId};
use crate::vocation::progression::ProgressionCache;
use crate::vocation::record::{TransformRecord, VocationRecord};

/// Skill multipliers of a freshly constructed vocation, before the load
/// pass applies the baseline pair and the weapon table.
pub const INITIAL_SKILL_MULTIPLIERS: [f32; Skill::COUNT] = [1.5, 2.0, 2.0, 2.0, 2.0, 1.5, 1.1];

/// Fist and club multipliers every loaded vocation starts from
pub const BASELINE_FIST_MULTIPLIER: f32 = 1.2;
pub const BASELINE_CLUB_MULTIPLIER: f32 = 1.1;

/// Weapon style a vocation trains with. Drives the sword, glove and
/// distance multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum WeaponCategory {
    Glove,
    Sword,
    Distance,
    #[default]
    Unspecified,
}

impl WeaponCategory {
    /// Parse a category name, case-insensitively. Unknown names are `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "glove" => Some(WeaponCategory::Glove),
            "sword" => Some(WeaponCategory::Sword),
            "distance" => Some(WeaponCategory::Distance),
            _ => None,
        }
    }

    /// `(sword, glove, distance)` multipliers; the category's own skill
    /// is the cheap one.
    pub fn weapon_multipliers(self) -> Option<[f32; 3]> {
        match self {
            WeaponCategory::Glove => Some([2.0, 1.1, 2.0]),
            WeaponCategory::Sword => Some([1.1, 2.0, 2.0]),
            WeaponCategory::Distance => Some([2.0, 2.0, 1.1]),
            WeaponCategory::Unspecified => None,
        }
    }

    /// Full multiplier table for a vocation of this category
    pub fn skill_multipliers(self) -> [f32; Skill::COUNT] {
        let mut multipliers = INITIAL_SKILL_MULTIPLIERS;
        multipliers[Skill::Fist.as_index()] = BASELINE_FIST_MULTIPLIER;
        multipliers[Skill::Club.as_index()] = BASELINE_CLUB_MULTIPLIER;

        if let Some([sword, glove, distance]) = self.weapon_multipliers() {
            multipliers[Skill::Sword.as_index()] = sword;
            multipliers[Skill::Glove.as_index()] = glove;
            multipliers[Skill::Distance.as_index()] = distance;
        }

        multipliers
    }
}

/// Overrides applied when promoting into one target vocation.
/// Every field is optional; `None` inherits the base vocation's value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransformationOverride {
    pub level_req: Option<u32>,
    pub new_looktype: Option<u16>,
    pub melee_damage_multiplier: Option<f32>,
    pub dist_damage_multiplier: Option<f32>,
    pub additional_health: Option<u32>,
    pub additional_mana: Option<u32>,
    pub effect: Option<u16>,
    pub storage: Option<u32>,
}

impl TransformationOverride {
    fn merge(&mut self, record: &TransformRecord) {
        if let Some(v) = record.level_req {
            self.level_req = Some(v);
        }
        if let Some(v) = record.new_looktype {
            self.new_looktype = Some(v);
        }
        if let Some(v) = record.melee_damage {
            self.melee_damage_multiplier = Some(v);
        }
        if let Some(v) = record.dist_damage {
            self.dist_damage_multiplier = Some(v);
        }
        if let Some(v) = record.additional_health {
            self.additional_health = Some(v);
        }
        if let Some(v) = record.additional_mana {
            self.additional_mana = Some(v);
        }
        if let Some(v) = record.effect {
            self.effect = Some(v);
        }
        if let Some(v) = record.storage {
            self.storage = Some(v);
        }
    }
}

/// Passive regeneration parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Regeneration {
    pub health_ticks: Ticks,
    pub health_amount: u32,
    pub mana_ticks: Ticks,
    pub mana_amount: u32,
    pub soul_ticks: Ticks,
    pub soul_max: u16,
}

/// Combat scaling applied to every character of the vocation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CombatMultipliers {
    pub melee_damage: f32,
    pub dist_damage: f32,
    pub defense: f32,
    pub armor: f32,
}

/// A loaded vocation. Immutable after load except for its progression cache.
#[derive(Debug)]
pub struct VocationDefinition {
    pub id: VocationId,
    pub name: String,
    pub client_id: u16,
    pub description: String,

    pub gain_cap: u32,
    pub gain_hp: u32,
    pub gain_mana: u32,
    pub regeneration: Regeneration,

    pub attack_speed: u32,
    pub base_speed: u32,

    pub weapon: WeaponCategory,
    pub looktype: u16,
    /// Vocation this one is promoted from
    pub from_vocation: VocationId,

    pub combat: CombatMultipliers,

    transformations: AHashMap<VocationId, TransformationOverride>,
    progression: ProgressionCache,
}

impl VocationDefinition {
    /// Build a definition from baselines, then apply whatever the record sets
    pub fn from_record(id: VocationId, record: &VocationRecord, baselines: &VocationBaselines) -> Self {
        let weapon = match record.weapon.as_deref() {
            None => WeaponCategory::Unspecified,
            Some(name) => WeaponCategory::parse(name).unwrap_or_else(|| {
                tracing::warn!(vocation = %id, weapon = name, "unknown weapon category, using baseline multipliers");
                WeaponCategory::Unspecified
            }),
        };

        let mut transformations: AHashMap<VocationId, TransformationOverride> = AHashMap::new();
        for transform in &record.transforms {
            let Some(target) = transform.id else {
                tracing::warn!(vocation = %id, "skipping transform without target id");
                continue;
            };
            transformations
                .entry(VocationId(target))
                .or_default()
                .merge(transform);
        }

        let mana_multiplier = match record.mana_multiplier {
            Some(m) if m > 0.0 => m,
            Some(m) => {
                tracing::warn!(vocation = %id, mana_multiplier = m, "mana multiplier must be positive, using baseline");
                baselines.mana_multiplier
            }
            None => baselines.mana_multiplier,
        };

        Self {
            id,
            name: record.name.clone().unwrap_or_default(),
            client_id: record.client_id.unwrap_or(0),
            description: record.description.clone().unwrap_or_default(),

            gain_cap: record.gain_cap.unwrap_or(baselines.gain_cap),
            gain_hp: record.gain_hp.unwrap_or(baselines.gain_hp),
            gain_mana: record.gain_mana.unwrap_or(baselines.gain_mana),
            regeneration: Regeneration {
                health_ticks: record.gain_health_ticks.unwrap_or(baselines.gain_health_ticks),
                health_amount: record.gain_health_amount.unwrap_or(baselines.gain_health_amount),
                mana_ticks: record.gain_mana_ticks.unwrap_or(baselines.gain_mana_ticks),
                mana_amount: record.gain_mana_amount.unwrap_or(baselines.gain_mana_amount),
                soul_ticks: record.gain_soul_ticks.unwrap_or(baselines.gain_soul_ticks),
                soul_max: record.soul_max.unwrap_or(baselines.soul_max),
            },

            attack_speed: record.attack_speed.unwrap_or(baselines.attack_speed),
            base_speed: record.base_speed.unwrap_or(baselines.base_speed),

            weapon,
            looktype: record.looktype.unwrap_or(0),
            from_vocation: VocationId(record.from_vocation.unwrap_or(0)),

            combat: CombatMultipliers {
                melee_damage: record.melee_damage.unwrap_or(baselines.melee_damage_multiplier),
                dist_damage: record.dist_damage.unwrap_or(baselines.dist_damage_multiplier),
                defense: record.defense.unwrap_or(baselines.defense_multiplier),
                armor: record.armor.unwrap_or(baselines.armor_multiplier),
            },

            transformations,
            progression: ProgressionCache::new(weapon.skill_multipliers(), mana_multiplier),
        }
    }

    /// Whether this vocation is a promotion of another one
    pub fn is_promotion(&self) -> bool {
        self.from_vocation != VocationId::NONE && self.from_vocation != self.id
    }

    pub fn mana_multiplier(&self) -> f32 {
        self.progression.mana_multiplier()
    }

    pub fn skill_multiplier(&self, skill: Skill) -> f32 {
        self.progression.skill_multiplier(skill)
    }

    pub fn progression(&self) -> &ProgressionCache {
        &self.progression
    }

    /// Tries needed to advance `skill` from `level`
    pub fn required_skill_tries(&self, skill: Skill, level: SkillLevel) -> u64 {
        self.progression.required_skill_tries(skill, level)
    }

    /// Raw skill index variant; out-of-range indices return 0
    pub fn required_skill_tries_by_index(&self, index: u8, level: SkillLevel) -> u64 {
        self.progression.required_skill_tries_by_index(index, level)
    }

    /// Mana needed to advance from magic level `level`
    pub fn required_mana(&self, level: MagicLevel) -> u64 {
        self.progression.required_mana(level)
    }

    // === TRANSFORMATIONS ===

    pub fn transformation(&self, target: VocationId) -> Option<&TransformationOverride> {
        self.transformations.get(&target)
    }

    /// Targets that carry overrides, in ascending id order
    pub fn transformation_targets(&self) -> Vec<VocationId> {
        let mut targets: Vec<VocationId> = self.transformations.keys().copied().collect();
        targets.sort();
        targets
    }

    /// A transformation must be declared and its level requirement met
    pub fn can_transform(&self, target: VocationId, level: u32) -> bool {
        self.transformation(target)
            .map(|t| t.level_req.map_or(true, |req| level >= req))
            .unwrap_or(false)
    }

    pub fn melee_damage_multiplier_for(&self, target: VocationId) -> f32 {
        self.transformation(target)
            .and_then(|t| t.melee_damage_multiplier)
            .unwrap_or(self.combat.melee_damage)
    }

    pub fn dist_damage_multiplier_for(&self, target: VocationId) -> f32 {
        self.transformation(target)
            .and_then(|t| t.dist_damage_multiplier)
            .unwrap_or(self.combat.dist_damage)
    }

    pub fn looktype_for(&self, target: VocationId) -> u16 {
        self.transformation(target)
            .and_then(|t| t.new_looktype)
            .unwrap_or(self.looktype)
    }
}
