//! Raw vocation records as yielded by a definitions source
//!
//! Records carry only what the source actually contained. Defaults are
//! applied later, when the registry turns a record into a definition.

use crate::core::error::Result;

/// One `transform` entry nested in a vocation record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformRecord {
    /// Destination vocation id
    pub id: Option<u16>,
    pub level_req: Option<u32>,
    pub new_looktype: Option<u16>,
    pub melee_damage: Option<f32>,
    pub dist_damage: Option<f32>,
    pub additional_health: Option<u32>,
    pub additional_mana: Option<u32>,
    pub effect: Option<u16>,
    pub storage: Option<u32>,
}

/// One vocation entry of a definitions document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VocationRecord {
    pub id: Option<u16>,
    pub name: Option<String>,
    pub client_id: Option<u16>,
    pub description: Option<String>,

    pub gain_cap: Option<u32>,
    pub gain_hp: Option<u32>,
    pub gain_mana: Option<u32>,
    pub gain_health_ticks: Option<u32>,
    pub gain_health_amount: Option<u32>,
    pub gain_mana_ticks: Option<u32>,
    pub gain_mana_amount: Option<u32>,
    pub gain_soul_ticks: Option<u32>,
    pub soul_max: Option<u16>,

    pub mana_multiplier: Option<f32>,
    pub attack_speed: Option<u32>,
    pub base_speed: Option<u32>,

    pub weapon: Option<String>,
    pub looktype: Option<u16>,
    pub from_vocation: Option<u16>,

    pub melee_damage: Option<f32>,
    pub dist_damage: Option<f32>,
    pub defense: Option<f32>,
    pub armor: Option<f32>,

    pub transforms: Vec<TransformRecord>,
}

impl VocationRecord {
    /// Minimal record with just an id and a name
    pub fn new(id: u16, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_from_vocation(mut self, from: u16) -> Self {
        self.from_vocation = Some(from);
        self
    }

    pub fn with_weapon(mut self, weapon: impl Into<String>) -> Self {
        self.weapon = Some(weapon.into());
        self
    }

    pub fn with_transform(mut self, transform: TransformRecord) -> Self {
        self.transforms.push(transform);
        self
    }
}

/// Anything that can produce vocation records.
///
/// Only a failure to read or parse the source as a whole is an error;
/// individual records are judged by the registry.
pub trait VocationSource {
    fn records(&self) -> Result<Vec<VocationRecord>>;
}

impl VocationSource for Vec<VocationRecord> {
    fn records(&self) -> Result<Vec<VocationRecord>> {
        Ok(self.clone())
    }
}

impl VocationSource for [VocationRecord] {
    fn records(&self) -> Result<Vec<VocationRecord>> {
        Ok(self.to_vec())
    }
}
