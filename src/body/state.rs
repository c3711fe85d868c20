//! Per-character body part state

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::anatomy::Anatomy;
use crate::core::error::{LimbError, Result};
use crate::core::types::{EquipSlot, PartId, StatBonus, StatId};

/// Replacement installed on a destroyed part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prosthetic {
    pub name: String,
    pub bonuses: Vec<StatBonus>,
}

impl Prosthetic {
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

/// Mutable state of one body part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyPartState {
    pub part: PartId,
    pub max_health: u32,
    /// Always within `0..=max_health`
    pub current_health: u32,
    /// Once set, only cleared by healing, a prosthetic or a full restore
    pub destroyed: bool,
    /// Only true while destroyed
    pub penalty_applied: bool,
    pub prosthetic: Option<Prosthetic>,
}

impl BodyPartState {
    pub fn new(part: PartId, max_health: u32) -> Self {
        Self {
            part,
            max_health,
            current_health: max_health,
            destroyed: false,
            penalty_applied: false,
            prosthetic: None,
        }
    }

    pub fn health_ratio(&self) -> f64 {
        self.current_health as f64 / self.max_health.max(1) as f64
    }

    /// Add health, clamped at max
    pub fn add_health(&mut self, amount: u32) {
        self.current_health = self
            .current_health
            .saturating_add(amount)
            .min(self.max_health);
    }
}

/// All part states of one character plus its aggregate stat modifiers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    parts: AHashMap<PartId, BodyPartState>,
    /// Net modifier per stat from applied penalties
    modifiers: BTreeMap<StatId, i32>,
}

impl Body {
    /// Fresh body for a character whose max health is `overall_max`
    pub fn from_anatomy(anatomy: &Anatomy, overall_max: u32) -> Self {
        let parts = anatomy
            .parts()
            .iter()
            .map(|template| {
                let max_health = template.max_health_for(overall_max);
                let state = BodyPartState::new(template.id.clone(), max_health);
                (template.id.clone(), state)
            })
            .collect();
        Self {
            parts,
            modifiers: BTreeMap::new(),
        }
    }

    pub fn part(&self, id: &PartId) -> Option<&BodyPartState> {
        self.parts.get(id)
    }

    pub fn part_mut(&mut self, id: &PartId) -> Option<&mut BodyPartState> {
        self.parts.get_mut(id)
    }

    /// Part states in no particular order
    pub fn parts(&self) -> impl Iterator<Item = &BodyPartState> {
        self.parts.values()
    }

    pub(crate) fn parts_mut(&mut self) -> impl Iterator<Item = &mut BodyPartState> {
        self.parts.values_mut()
    }

    pub fn destroyed_parts(&self) -> impl Iterator<Item = &BodyPartState> {
        self.parts.values().filter(|p| p.destroyed)
    }

    pub fn modifiers(&self) -> &BTreeMap<StatId, i32> {
        &self.modifiers
    }

    pub fn modifier(&self, stat: StatId) -> i32 {
        self.modifiers.get(&stat).copied().unwrap_or(0)
    }

    /// Accumulate a modifier; entries that net to zero are dropped
    pub fn add_modifier(&mut self, stat: StatId, amount: i32) {
        let entry = self.modifiers.entry(stat).or_insert(0);
        *entry += amount;
        if *entry == 0 {
            self.modifiers.remove(&stat);
        }
    }

    pub fn clear_modifiers(&mut self) {
        self.modifiers.clear();
    }

    /// Check a deserialized body against `anatomy`
    ///
    /// Parts must match the anatomy one to one, and each state must be one
    /// that damage, healing and prosthetics can produce. The modifier map must
    /// equal the sum of applied penalties.
    pub fn validate(&self, anatomy: &Anatomy) -> Result<()> {
        if self.parts.len() != anatomy.parts().len() {
            return Err(invalid_record(format!(
                "expected {} parts, found {}",
                anatomy.parts().len(),
                self.parts.len()
            )));
        }

        let mut expected = BTreeMap::new();
        for template in anatomy.parts() {
            let state = self
                .parts
                .get(&template.id)
                .ok_or_else(|| invalid_record(format!("missing part {}", template.id)))?;
            if state.part != template.id {
                return Err(invalid_record(format!(
                    "part {} stored under {}",
                    state.part, template.id
                )));
            }
            if state.current_health > state.max_health {
                return Err(invalid_record(format!("{} health above max", template.id)));
            }
            if state.destroyed && state.current_health > 0 {
                return Err(invalid_record(format!("{} destroyed with health", template.id)));
            }
            if state.penalty_applied && !state.destroyed {
                return Err(invalid_record(format!("{} penalised while intact", template.id)));
            }
            if state.destroyed && state.prosthetic.is_some() {
                return Err(invalid_record(format!("{} destroyed with prosthetic", template.id)));
            }
            if state.penalty_applied {
                if let Some(p) = template.penalty.filter(|p| p.stat != StatId::MaxHp) {
                    let entry = expected.entry(p.stat).or_insert(0);
                    *entry += p.amount;
                }
            }
        }
        expected.retain(|_, amount| *amount != 0);

        if expected != self.modifiers {
            return Err(invalid_record("modifiers do not match applied penalties".into()));
        }
        Ok(())
    }

    /// First destroyed part mapped to `slot`, if any
    pub fn disabling_part<'a>(&self, anatomy: &'a Anatomy, slot: EquipSlot) -> Option<&'a PartId> {
        anatomy
            .parts()
            .iter()
            .filter(|t| t.slot == Some(slot))
            .find(|t| self.parts.get(&t.id).is_some_and(|s| s.destroyed))
            .map(|t| &t.id)
    }
}

fn invalid_record(msg: String) -> LimbError {
    LimbError::InvalidAnatomy(format!("body record: {}", msg))
}
