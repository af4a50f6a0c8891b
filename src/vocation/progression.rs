//! Skill and magic training costs with lazy per-level memoization
//!
//! Both curves are exponential in the level and anchored so that the
//! starting level costs exactly the base amount. Results are cached per
//! key on first use and never change afterwards.

use ahash::AHashMap;
use std::hash::Hash;
use std::sync::{PoisonError, RwLock};

use crate::core::types::{MagicLevel, Skill, SkillLevel};

/// Tries needed to advance each skill at its anchor level, indexed by [`Skill`]
pub const SKILL_BASE_TRIES: [u64; Skill::COUNT] = [50, 50, 50, 50, 30, 100, 20];

/// Level at which a skill costs exactly its base tries
pub const SKILL_ANCHOR_LEVEL: SkillLevel = 11;

/// Mana needed to advance from magic level 1
pub const BASE_MANA: u64 = 1600;

/// Magic level at which the mana cost equals [`BASE_MANA`]
pub const MANA_ANCHOR_LEVEL: MagicLevel = 1;

/// `floor(SKILL_BASE_TRIES[skill] * multiplier ^ (level - 11))`
pub fn skill_tries_for(skill: Skill, multiplier: f32, level: SkillLevel) -> u64 {
    let exponent = i32::from(level) - i32::from(SKILL_ANCHOR_LEVEL);
    let base = SKILL_BASE_TRIES[skill.as_index()] as f64;
    (base * f64::from(multiplier).powf(f64::from(exponent))) as u64
}

/// `floor(1600 * multiplier ^ (level - 1))`
pub fn mana_for(multiplier: f32, level: MagicLevel) -> u64 {
    let exponent = i64::from(level) - i64::from(MANA_ANCHOR_LEVEL);
    (BASE_MANA as f64 * f64::from(multiplier).powf(exponent as f64)) as u64
}

/// Memoized training costs for one vocation.
///
/// Readers share the tables; a miss computes outside any lock and inserts
/// only if the key is still absent, so racing threads agree on the value.
#[derive(Debug)]
pub struct ProgressionCache {
    skill_multipliers: [f32; Skill::COUNT],
    mana_multiplier: f32,
    skill_tries: [RwLock<AHashMap<SkillLevel, u64>>; Skill::COUNT],
    mana: RwLock<AHashMap<MagicLevel, u64>>,
}

impl ProgressionCache {
    pub fn new(skill_multipliers: [f32; Skill::COUNT], mana_multiplier: f32) -> Self {
        Self {
            skill_multipliers,
            mana_multiplier,
            skill_tries: Default::default(),
            mana: RwLock::default(),
        }
    }

    pub fn skill_multiplier(&self, skill: Skill) -> f32 {
        self.skill_multipliers[skill.as_index()]
    }

    pub fn skill_multipliers(&self) -> &[f32; Skill::COUNT] {
        &self.skill_multipliers
    }

    pub fn mana_multiplier(&self) -> f32 {
        self.mana_multiplier
    }

    /// Tries required to advance `skill` at `level`
    pub fn required_skill_tries(&self, skill: Skill, level: SkillLevel) -> u64 {
        let multiplier = self.skill_multiplier(skill);
        get_or_insert_with(&self.skill_tries[skill.as_index()], level, || {
            let tries = skill_tries_for(skill, multiplier, level);
            tracing::trace!(skill = skill.name(), level, tries, "skill tries cached");
            tries
        })
    }

    /// Like [`required_skill_tries`](Self::required_skill_tries) for a raw
    /// skill index. Unknown indices cost nothing.
    pub fn required_skill_tries_by_index(&self, index: u8, level: SkillLevel) -> u64 {
        match Skill::from_index(index) {
            Some(skill) => self.required_skill_tries(skill, level),
            None => {
                tracing::debug!(index, "skill index out of range");
                0
            }
        }
    }

    /// Mana required to advance from magic level `level`
    pub fn required_mana(&self, level: MagicLevel) -> u64 {
        let multiplier = self.mana_multiplier;
        get_or_insert_with(&self.mana, level, || {
            let mana = mana_for(multiplier, level);
            tracing::trace!(level, mana, "mana cached");
            mana
        })
    }

    /// Number of memoized levels for a skill
    pub fn cached_skill_levels(&self, skill: Skill) -> usize {
        self.skill_tries[skill.as_index()]
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Number of memoized magic levels
    pub fn cached_mana_levels(&self) -> usize {
        self.mana.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

fn get_or_insert_with<K, F>(table: &RwLock<AHashMap<K, u64>>, key: K, compute: F) -> u64
where
    K: Eq + Hash,
    F: FnOnce() -> u64,
{
    // Values are pure functions of the key, so a poisoned table is still valid.
    if let Some(value) = table
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
    {
        return *value;
    }

    let value = compute();
    *table
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .entry(key)
        .or_insert(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn cache() -> ProgressionCache {
        ProgressionCache::new([1.2, 1.1, 2.0, 1.1, 2.0, 1.5, 1.1], 1.1)
    }

    #[test]
    fn test_skill_anchor_returns_base() {
        let cache = cache();
        for skill in Skill::all() {
            assert_eq!(
                cache.required_skill_tries(skill, SKILL_ANCHOR_LEVEL),
                SKILL_BASE_TRIES[skill.as_index()]
            );
        }
    }

    #[test]
    fn test_skill_curve_values() {
        let cache = cache();
        // 50 * 2.0^1
        assert_eq!(cache.required_skill_tries(Skill::Sword, 12), 100);
        // 50 * 2.0^3
        assert_eq!(cache.required_skill_tries(Skill::Sword, 14), 400);
        // 30 * 2.0^-1
        assert_eq!(cache.required_skill_tries(Skill::Distance, 10), 15);
        // floor(50 * 1.2^2) with 1.2 stored as f32
        let expected = (50.0 * f64::from(1.2f32).powf(2.0)) as u64;
        assert_eq!(cache.required_skill_tries(Skill::Fist, 13), expected);
        assert_eq!(expected, 72);
    }

    #[test]
    fn test_mana_anchor_and_growth() {
        let cache = cache();
        assert_eq!(cache.required_mana(1), 1600);
        assert_eq!(cache.required_mana(2), (1600.0 * f64::from(1.1f32)) as u64);
        assert!(cache.required_mana(0) < 1600);
    }

    #[test]
    fn test_out_of_range_index_is_zero() {
        let cache = cache();
        assert_eq!(cache.required_skill_tries_by_index(7, 20), 0);
        assert_eq!(cache.required_skill_tries_by_index(200, 20), 0);
        assert_eq!(cache.required_skill_tries_by_index(2, 12), 100);
    }

    #[test]
    fn test_entries_fill_lazily_and_stay() {
        let cache = cache();
        assert_eq!(cache.cached_skill_levels(Skill::Club), 0);
        assert_eq!(cache.cached_mana_levels(), 0);

        let first = cache.required_skill_tries(Skill::Club, 40);
        let second = cache.required_skill_tries(Skill::Club, 40);
        assert_eq!(first, second);
        assert_eq!(cache.cached_skill_levels(Skill::Club), 1);
        assert_eq!(cache.cached_skill_levels(Skill::Sword), 0);

        cache.required_mana(10);
        cache.required_mana(10);
        cache.required_mana(11);
        assert_eq!(cache.cached_mana_levels(), 2);
    }

    #[test]
    fn test_concurrent_first_access_agrees() {
        let cache = Arc::new(cache());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    (1..60)
                        .map(|level| cache.required_mana(level))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let results: Vec<Vec<u64>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for result in &results[1..] {
            assert_eq!(result, &results[0]);
        }
        assert_eq!(cache.cached_mana_levels(), 59);
    }

    #[test]
    fn test_huge_levels_saturate() {
        assert_eq!(skill_tries_for(Skill::Sword, 2.0, u16::MAX), u64::MAX);
        assert_eq!(mana_for(4.0, u32::MAX), u64::MAX);
    }
}
