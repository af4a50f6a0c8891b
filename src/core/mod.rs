pub mod config;
pub mod error;
pub mod types;

pub use config::{ServerConfig, VocationBaselines};
pub use error::{Result, VocationError};
pub use types::{MagicLevel, Skill, SkillLevel, Ticks, VocationId};
