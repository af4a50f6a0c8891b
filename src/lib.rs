//! Vocation Registry - character classes for the game server

pub mod core;
pub mod vocation;
