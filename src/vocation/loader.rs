//! Load vocation records from TOML definitions documents
//!
//! Document shape:
//!
//! ```toml
//! [[vocation]]
//! id = 1
//! name = "Sorcerer"
//! weapon = "distance"
//! from_vocation = 0
//!
//! [[vocation.transform]]
//! id = 5
//! level_req = 50
//! ```

use std::path::{Path, PathBuf};

use crate::core::error::{Result, VocationError};
use crate::vocation::record::{TransformRecord, VocationRecord, VocationSource};

/// Definitions source backed by a TOML file or an in-memory document
#[derive(Debug, Clone)]
pub struct TomlVocationSource {
    input: Input,
}

#[derive(Debug, Clone)]
enum Input {
    File(PathBuf),
    Text(String),
}

impl TomlVocationSource {
    /// Read definitions from a file when records are requested
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            input: Input::File(path.into()),
        }
    }

    /// Use an already loaded TOML document
    pub fn from_text(content: impl Into<String>) -> Self {
        Self {
            input: Input::Text(content.into()),
        }
    }

    /// Path of the backing file, if any
    pub fn path(&self) -> Option<&Path> {
        match &self.input {
            Input::File(path) => Some(path.as_path()),
            Input::Text(_) => None,
        }
    }
}

impl VocationSource for TomlVocationSource {
    fn records(&self) -> Result<Vec<VocationRecord>> {
        match &self.input {
            Input::File(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    tracing::error!(path = %path.display(), "failed to read vocation definitions: {}", e);
                    VocationError::IoError(e)
                })?;
                parse_document(&content)
            }
            Input::Text(content) => parse_document(content),
        }
    }
}

/// Parse a whole definitions document into records
///
/// A missing `vocation` key is an empty document. A `vocation` key that is
/// not an array of tables fails the whole document.
pub fn parse_document(content: &str) -> Result<Vec<VocationRecord>> {
    let document: toml::Value = content.parse()?;

    let Some(entries) = document.get("vocation") else {
        return Ok(Vec::new());
    };
    let entries = entries.as_array().ok_or_else(|| {
        VocationError::InvalidDocument("`vocation` must be an array of tables".to_string())
    })?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            entry
                .as_table()
                .map(|table| parse_vocation(table, index))
                .ok_or_else(|| {
                    VocationError::InvalidDocument(format!("vocation[{}] is not a table", index))
                })
        })
        .collect()
}

fn parse_vocation(table: &toml::value::Table, index: usize) -> VocationRecord {
    let fields = Fields {
        table,
        context: format!("vocation[{}]", index),
    };

    let transforms = match table.get("transform") {
        None => Vec::new(),
        Some(toml::Value::Array(items)) => items
            .iter()
            .enumerate()
            .filter_map(|(t, item)| match item.as_table() {
                Some(t_table) => Some(parse_transform(t_table, &fields.context, t)),
                None => {
                    tracing::warn!(entry = %fields.context, transform = t, "skipping transform that is not a table");
                    None
                }
            })
            .collect(),
        Some(_) => {
            tracing::warn!(entry = %fields.context, "ignoring `transform` that is not an array of tables");
            Vec::new()
        }
    };

    VocationRecord {
        id: fields.int("id"),
        name: fields.string("name"),
        client_id: fields.int("client_id"),
        description: fields.string("description"),

        gain_cap: fields.int("gain_cap"),
        gain_hp: fields.int("gain_hp"),
        gain_mana: fields.int("gain_mana"),
        gain_health_ticks: fields.int("gain_health_ticks"),
        gain_health_amount: fields.int("gain_health_amount"),
        gain_mana_ticks: fields.int("gain_mana_ticks"),
        gain_mana_amount: fields.int("gain_mana_amount"),
        gain_soul_ticks: fields.int("gain_soul_ticks"),
        soul_max: fields.int("soul_max"),

        mana_multiplier: fields.float("mana_multiplier"),
        attack_speed: fields.int("attack_speed"),
        base_speed: fields.int("base_speed"),

        weapon: fields.string("weapon"),
        looktype: fields.int("looktype"),
        from_vocation: fields.int("from_vocation"),

        melee_damage: fields.float("melee_damage"),
        dist_damage: fields.float("dist_damage"),
        defense: fields.float("defense"),
        armor: fields.float("armor"),

        transforms,
    }
}

fn parse_transform(table: &toml::value::Table, parent: &str, index: usize) -> TransformRecord {
    let fields = Fields {
        table,
        context: format!("{}.transform[{}]", parent, index),
    };

    TransformRecord {
        id: fields.int("id"),
        level_req: fields.int("level_req"),
        new_looktype: fields.int("new_looktype"),
        melee_damage: fields.float("melee_damage"),
        dist_damage: fields.float("dist_damage"),
        additional_health: fields.int("additional_health"),
        additional_mana: fields.int("additional_mana"),
        effect: fields.int("effect"),
        storage: fields.int("storage"),
    }
}

/// Typed access to optional keys. Present values of the wrong type or
/// out of range are dropped with a warning.
struct Fields<'a> {
    table: &'a toml::value::Table,
    context: String,
}

impl Fields<'_> {
    fn int<T: TryFrom<i64>>(&self, key: &str) -> Option<T> {
        let value = self.table.get(key)?;
        let parsed = value.as_integer().and_then(|i| T::try_from(i).ok());
        if parsed.is_none() {
            self.reject(key, value);
        }
        parsed
    }

    fn float(&self, key: &str) -> Option<f32> {
        let value = self.table.get(key)?;
        let parsed = value
            .as_float()
            .or_else(|| value.as_integer().map(|i| i as f64))
            .filter(|f| f.is_finite())
            .map(|f| f as f32);
        if parsed.is_none() {
            self.reject(key, value);
        }
        parsed
    }

    fn string(&self, key: &str) -> Option<String> {
        let value = self.table.get(key)?;
        let parsed = value.as_str().map(str::to_string);
        if parsed.is_none() {
            self.reject(key, value);
        }
        parsed
    }

    fn reject(&self, key: &str, value: &toml::Value) {
        tracing::warn!(entry = %self.context, key, value = %value, "ignoring invalid attribute");
    }
}
