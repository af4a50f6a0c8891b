//! Vocation registry: load once at startup, then serve lookups.
//!
//! Loading is the only write phase. Once built, the registry is shared
//! read-only; the per-vocation progression caches are the only state
//! that changes afterwards.

use ahash::AHashMap;
use std::collections::hash_map::Entry;
use std::sync::OnceLock;

use crate::core::config::{ServerConfig, VocationBaselines};
use crate::core::error::{Result, VocationError};
use crate::core::types::VocationId;
use crate::vocation::definition::VocationDefinition;
use crate::vocation::loader::TomlVocationSource;
use crate::vocation::record::VocationSource;

/// All vocations known to the server
#[derive(Debug, Default)]
pub struct VocationRegistry {
    /// Definitions indexed by ID
    vocations: AHashMap<VocationId, VocationDefinition>,
    /// IDs in ascending order
    ordered_ids: Vec<VocationId>,
    /// Lowercased name to ID
    by_name: AHashMap<String, VocationId>,
    /// Source vocation to its promotion
    promotions: AHashMap<VocationId, VocationId>,
}

impl VocationRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Load all vocations from a source using the default baselines
    pub fn load<S: VocationSource + ?Sized>(source: &S) -> Result<Self> {
        Self::load_with_baselines(source, &VocationBaselines::default())
    }

    /// Load all vocations from a source.
    ///
    /// Fails only when the source itself cannot be read. Records without
    /// an id, or repeating an id already loaded, are skipped with a warning.
    pub fn load_with_baselines<S: VocationSource + ?Sized>(
        source: &S,
        baselines: &VocationBaselines,
    ) -> Result<Self> {
        let records = source.records()?;

        let mut vocations: AHashMap<VocationId, VocationDefinition> =
            AHashMap::with_capacity(records.len());
        let mut skipped = 0usize;

        for (index, record) in records.iter().enumerate() {
            let Some(raw_id) = record.id else {
                tracing::warn!(index, name = ?record.name, "missing vocation id, skipping record");
                skipped += 1;
                continue;
            };
            let id = VocationId(raw_id);

            match vocations.entry(id) {
                Entry::Occupied(_) => {
                    tracing::warn!(vocation = %id, index, "duplicate vocation id, skipping record");
                    skipped += 1;
                }
                Entry::Vacant(slot) => {
                    slot.insert(VocationDefinition::from_record(id, record, baselines));
                }
            }
        }

        let registry = Self::from_map(vocations);
        tracing::info!(loaded = registry.len(), skipped, "vocations loaded");
        Ok(registry)
    }

    /// Load the definitions file named by a server config, with its baselines
    pub fn load_from_config(config: &ServerConfig) -> Result<Self> {
        let source = TomlVocationSource::from_path(&config.definitions_path);
        Self::load_with_baselines(&source, &config.baselines)
    }

    fn from_map(vocations: AHashMap<VocationId, VocationDefinition>) -> Self {
        let mut ordered_ids: Vec<VocationId> = vocations.keys().copied().collect();
        ordered_ids.sort();

        let mut by_name: AHashMap<String, VocationId> = AHashMap::new();
        let mut promotions: AHashMap<VocationId, VocationId> = AHashMap::new();

        // Ascending order makes the lowest id win every tie.
        for id in &ordered_ids {
            let Some(vocation) = vocations.get(id) else {
                continue;
            };

            match by_name.entry(vocation.name.to_lowercase()) {
                Entry::Occupied(existing) => tracing::warn!(
                    vocation = %id,
                    name = %vocation.name,
                    kept = %existing.get(),
                    "duplicate vocation name"
                ),
                Entry::Vacant(slot) => {
                    slot.insert(*id);
                }
            }

            if vocation.from_vocation == *id {
                tracing::debug!(vocation = %id, "vocation lists itself as its source, not a promotion");
                continue;
            }

            match promotions.entry(vocation.from_vocation) {
                // Every base vocation defaults to source 0
                Entry::Occupied(existing) if vocation.from_vocation == VocationId::NONE => tracing::debug!(
                    vocation = %id,
                    kept = %existing.get(),
                    "another vocation sourced from none"
                ),
                Entry::Occupied(existing) => tracing::warn!(
                    from = %vocation.from_vocation,
                    vocation = %id,
                    kept = %existing.get(),
                    "multiple promotions from one vocation"
                ),
                Entry::Vacant(slot) => {
                    slot.insert(*id);
                }
            }
        }

        Self {
            vocations,
            ordered_ids,
            by_name,
            promotions,
        }
    }

    /// Get a vocation by ID
    pub fn get(&self, id: VocationId) -> Option<&VocationDefinition> {
        let vocation = self.vocations.get(&id);
        if vocation.is_none() {
            tracing::warn!(vocation = %id, "vocation not found");
        }
        vocation
    }

    /// Get vocation ID by name, ignoring case
    pub fn id_by_name(&self, name: &str) -> Option<VocationId> {
        let id = self.by_name.get(&name.to_lowercase()).copied();
        if id.is_none() {
            tracing::warn!(name, "no vocation with this name");
        }
        id
    }

    /// Get a vocation by name, ignoring case
    pub fn get_by_name(&self, name: &str) -> Option<&VocationDefinition> {
        self.id_by_name(name).and_then(|id| self.vocations.get(&id))
    }

    /// The vocation promoted from `id`, if any. A vocation that names
    /// itself as its source is never its own promotion.
    pub fn promoted_vocation(&self, id: VocationId) -> Option<VocationId> {
        self.promotions.get(&id).copied()
    }

    pub fn contains(&self, id: VocationId) -> bool {
        self.vocations.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.vocations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocations.is_empty()
    }

    /// All vocations in ascending ID order
    pub fn iter(&self) -> impl Iterator<Item = &VocationDefinition> {
        self.ordered_ids
            .iter()
            .filter_map(|id| self.vocations.get(id))
    }
}

// === GLOBAL REGISTRY ACCESS ===

static VOCATIONS: OnceLock<VocationRegistry> = OnceLock::new();

/// Install the loaded registry for the rest of the process (once)
pub fn init_vocations(registry: VocationRegistry) -> Result<&'static VocationRegistry> {
    VOCATIONS
        .set(registry)
        .map_err(|_| VocationError::AlreadyInitialized)?;
    VOCATIONS.get().ok_or(VocationError::AlreadyInitialized)
}

/// The installed registry, `None` before [`init_vocations`]
pub fn vocations() -> Option<&'static VocationRegistry> {
    VOCATIONS.get()
}
