//! Stat computation as an explicit chain of modifiers
//!
//! `compute_stat` starts from the character's base value and folds every
//! modifier over it in order. The default chain is equipment, then
//! prosthetics, then body-part penalties.

use crate::body::state::Body;
use crate::core::types::{StatBlock, StatId};
use crate::entity::character::Character;

/// What a modifier may look at
#[derive(Debug, Clone, Copy)]
pub struct StatContext<'a> {
    pub character: &'a Character,
    /// None until the character's body is first touched
    pub body: Option<&'a Body>,
}

/// One link of the stat chain
pub trait StatModifier: Send + Sync {
    fn name(&self) -> &'static str;

    /// Return the new value of `stat` given the value so far
    fn modify(&self, ctx: &StatContext<'_>, stat: StatId, value: i32) -> i32;
}

/// Flat bonuses of equipped items
#[derive(Debug, Clone, Copy, Default)]
pub struct EquipmentBonuses;

impl StatModifier for EquipmentBonuses {
    fn name(&self) -> &'static str {
        "equipment"
    }

    fn modify(&self, ctx: &StatContext<'_>, stat: StatId, value: i32) -> i32 {
        let bonus: i32 = ctx
            .character
            .equipment
            .values()
            .flat_map(|item| item.bonuses.iter())
            .filter(|b| b.stat == stat)
            .map(|b| b.amount)
            .sum();
        value + bonus
    }
}

/// Bonuses of installed prosthetics
#[derive(Debug, Clone, Copy, Default)]
pub struct ProstheticBonuses;

impl StatModifier for ProstheticBonuses {
    fn name(&self) -> &'static str {
        "prosthetics"
    }

    fn modify(&self, ctx: &StatContext<'_>, stat: StatId, value: i32) -> i32 {
        let Some(body) = ctx.body else {
            return value;
        };
        let bonus: i32 = body
            .parts()
            .filter_map(|p| p.prosthetic.as_ref())
            .flat_map(|p| p.bonuses.iter())
            .filter(|b| b.stat == stat)
            .map(|b| b.amount)
            .sum();
        value + bonus
    }
}

/// Penalties of destroyed body parts
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyPenalties;

impl StatModifier for BodyPenalties {
    fn name(&self) -> &'static str {
        "body penalties"
    }

    fn modify(&self, ctx: &StatContext<'_>, stat: StatId, value: i32) -> i32 {
        value + ctx.body.map_or(0, |b| b.modifier(stat))
    }
}

/// Ordered list of stat modifiers
pub struct StatPipeline {
    modifiers: Vec<Box<dyn StatModifier>>,
}

impl Default for StatPipeline {
    fn default() -> Self {
        Self::empty()
            .with(EquipmentBonuses)
            .with(ProstheticBonuses)
            .with(BodyPenalties)
    }
}

impl std::fmt::Debug for StatPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl StatPipeline {
    /// Pipeline with no modifiers: stats equal base stats
    pub fn empty() -> Self {
        Self {
            modifiers: Vec::new(),
        }
    }

    /// Append a modifier to the end of the chain
    pub fn with(mut self, modifier: impl StatModifier + 'static) -> Self {
        self.modifiers.push(Box::new(modifier));
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.modifiers.iter().map(|m| m.name()).collect()
    }

    /// Effective value of `stat`, clamped at the stat's floor
    pub fn compute_stat(&self, character: &Character, body: Option<&Body>, stat: StatId) -> i32 {
        let ctx = StatContext { character, body };
        let value = self
            .modifiers
            .iter()
            .fold(character.base[stat], |value, m| m.modify(&ctx, stat, value));
        value.max(stat.floor())
    }

    pub fn compute_all(&self, character: &Character, body: Option<&Body>) -> StatBlock {
        let mut block = StatBlock::default();
        for stat in StatId::all() {
            block[stat] = self.compute_stat(character, body, stat);
        }
        block
    }

    /// Recompute cached stats and clamp health to the new max
    pub fn refresh(&self, character: &mut Character, body: Option<&Body>) {
        character.derived = self.compute_all(character, body);
        let max = character.max_health();
        if character.health > max {
            character.health = max;
        }
    }
}
