//! Host-side character record
//!
//! Overall health and equipment belong to the host's battle pipeline; the
//! body-part system only reads the health ratio and unequips slots.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{CharacterId, EquipSlot, StatBlock, StatBonus, StatId};

/// An equipped item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub name: String,
    pub bonuses: Vec<StatBonus>,
}

impl Equipment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bonuses: Vec::new(),
        }
    }

    pub fn with_bonus(mut self, stat: StatId, amount: i32) -> Self {
        self.bonuses.push(StatBonus::new(stat, amount));
        self
    }
}

/// A tracked character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    /// Stats before any modifier
    pub base: StatBlock,
    /// Stats after the last refresh
    pub derived: StatBlock,
    /// Overall current health
    pub health: u32,
    pub equipment: AHashMap<EquipSlot, Equipment>,
}

impl Character {
    /// New character at full health
    pub fn new(name: impl Into<String>, base: StatBlock) -> Self {
        let health = base[StatId::MaxHp].max(1) as u32;
        Self {
            id: CharacterId::new(),
            name: name.into(),
            base,
            derived: base,
            health,
            equipment: AHashMap::new(),
        }
    }

    /// Character with `max_hp` and modest default stats
    pub fn with_max_hp(name: impl Into<String>, max_hp: u32) -> Self {
        let max_hp = max_hp.min(i32::MAX as u32) as i32;
        Self::new(name, StatBlock::new([max_hp, 50, 30, 30, 20, 20, 25, 15]))
    }

    pub fn max_health(&self) -> u32 {
        self.derived[StatId::MaxHp].max(1) as u32
    }

    /// `health / max_health`
    pub fn health_ratio(&self) -> f64 {
        self.health as f64 / self.max_health() as f64
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Reduce overall health, saturating at zero
    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Raise overall health, clamped at max
    pub fn recover(&mut self, amount: u32) {
        self.health = self.health.saturating_add(amount).min(self.max_health());
    }

    /// Set overall health, clamped to `0..=max_health`
    pub fn set_health(&mut self, health: u32) {
        self.health = health.min(self.max_health());
    }

    pub fn equipped(&self, slot: EquipSlot) -> Option<&Equipment> {
        self.equipment.get(&slot)
    }

    pub fn unequip(&mut self, slot: EquipSlot) -> Option<Equipment> {
        self.equipment.remove(&slot)
    }
}
