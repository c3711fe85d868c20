//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use uuid::Uuid;

/// Unique identifier for tracked characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifier of a body part template ("left_arm", "heart", ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartId(pub String);

impl PartId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PartId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Derived character statistics, in the host engine's parameter order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatId {
    MaxHp,
    MaxMp,
    Attack,
    Defense,
    MagicAttack,
    MagicDefense,
    Agility,
    Luck,
}

impl StatId {
    pub const COUNT: usize = 8;

    /// Returns all stats in parameter order
    pub fn all() -> [StatId; Self::COUNT] {
        [
            StatId::MaxHp,
            StatId::MaxMp,
            StatId::Attack,
            StatId::Defense,
            StatId::MagicAttack,
            StatId::MagicDefense,
            StatId::Agility,
            StatId::Luck,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            StatId::MaxHp => "Max HP",
            StatId::MaxMp => "Max MP",
            StatId::Attack => "Attack",
            StatId::Defense => "Defense",
            StatId::MagicAttack => "M.Attack",
            StatId::MagicDefense => "M.Defense",
            StatId::Agility => "Agility",
            StatId::Luck => "Luck",
        }
    }

    /// Lowest value the stat may take after all modifiers
    pub fn floor(&self) -> i32 {
        match self {
            StatId::MaxHp => 1,
            _ => 0,
        }
    }
}

/// One value per `StatId`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock(pub [i32; StatId::COUNT]);

impl StatBlock {
    pub fn new(values: [i32; StatId::COUNT]) -> Self {
        Self(values)
    }
}

impl Index<StatId> for StatBlock {
    type Output = i32;

    fn index(&self, stat: StatId) -> &i32 {
        &self.0[stat as usize]
    }
}

impl IndexMut<StatId> for StatBlock {
    fn index_mut(&mut self, stat: StatId) -> &mut i32 {
        &mut self.0[stat as usize]
    }
}

/// Equipment slots of the host engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipSlot {
    Weapon,
    Shield,
    Head,
    Body,
    Accessory,
}

impl EquipSlot {
    pub fn name(&self) -> &'static str {
        match self {
            EquipSlot::Weapon => "Weapon",
            EquipSlot::Shield => "Shield",
            EquipSlot::Head => "Head",
            EquipSlot::Body => "Body",
            EquipSlot::Accessory => "Accessory",
        }
    }
}

/// A flat bonus (or malus) to one stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBonus {
    pub stat: StatId,
    pub amount: i32,
}

impl StatBonus {
    pub fn new(stat: StatId, amount: i32) -> Self {
        Self { stat, amount }
    }
}
