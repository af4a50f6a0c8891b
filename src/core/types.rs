//! Core type definitions shared by the vocation modules

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a vocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VocationId(pub u16);

impl VocationId {
    /// Vocation 0: characters without a vocation
    pub const NONE: VocationId = VocationId(0);
}

impl fmt::Display for VocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for VocationId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

/// Skill level (1-based, 11 is the starting level for weapon skills)
pub type SkillLevel = u16;

/// Magic level (0-based)
pub type MagicLevel = u32;

/// Server ticks between regeneration events
pub type Ticks = u32;

/// Trainable skills, in the fixed order used by the multiplier and base tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Skill {
    Fist,
    Club,
    Sword,
    Glove,
    Distance,
    Shielding,
    Fishing,
}

impl Skill {
    pub const COUNT: usize = 7;

    pub fn all() -> [Skill; Self::COUNT] {
        [
            Skill::Fist,
            Skill::Club,
            Skill::Sword,
            Skill::Glove,
            Skill::Distance,
            Skill::Shielding,
            Skill::Fishing,
        ]
    }

    #[inline]
    pub fn as_index(self) -> usize {
        self as usize
    }

    /// Map a raw skill index to a skill, `None` when out of range
    pub fn from_index(index: u8) -> Option<Skill> {
        Self::all().get(index as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Skill::Fist => "fist",
            Skill::Club => "club",
            Skill::Sword => "sword",
            Skill::Glove => "glove",
            Skill::Distance => "distance",
            Skill::Shielding => "shielding",
            Skill::Fishing => "fishing",
        }
    }
}
