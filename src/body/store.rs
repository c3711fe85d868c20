//! Owned store of per-character bodies
//!
//! The store is the entry point for the host: every operation first makes
//! sure the character has a body record, then refreshes the character's
//! stats when parts were destroyed or restored.

use ahash::AHashMap;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::anatomy::loader::LoadedAnatomy;
use crate::anatomy::Anatomy;
use crate::body::cascade::DestructionEvent;
use crate::body::damage::{self, DamageReport};
use crate::body::prosthetics;
use crate::body::recovery::{self, HealReport};
use crate::body::state::{Body, Prosthetic};
use crate::core::config::{config, DamageConfig};
use crate::core::error::{LimbError, Result};
use crate::core::types::{CharacterId, EquipSlot, PartId, StatId};
use crate::entity::character::{Character, Equipment};
use crate::stats::StatPipeline;

/// One row of the status list shown to the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartStatus {
    pub id: PartId,
    pub name: String,
    pub vital: bool,
    pub max_health: u32,
    pub current_health: u32,
    pub destroyed: bool,
    pub penalty_applied: bool,
    pub prosthetic: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct BodyRecord {
    character: CharacterId,
    body: Body,
}

/// Body records keyed by character
#[derive(Debug)]
pub struct BodyStore {
    anatomy: Anatomy,
    config: DamageConfig,
    pipeline: StatPipeline,
    bodies: AHashMap<CharacterId, Body>,
}

impl BodyStore {
    /// Store using the global damage config
    pub fn new(anatomy: Anatomy) -> Self {
        Self::with_config(anatomy, config().clone())
    }

    pub fn with_config(anatomy: Anatomy, config: DamageConfig) -> Self {
        Self {
            anatomy,
            config,
            pipeline: StatPipeline::default(),
            bodies: AHashMap::new(),
        }
    }

    pub fn from_loaded(loaded: LoadedAnatomy) -> Self {
        Self::with_config(loaded.anatomy, loaded.config)
    }

    /// Replace the stat chain
    pub fn with_pipeline(mut self, pipeline: StatPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn anatomy(&self) -> &Anatomy {
        &self.anatomy
    }

    pub fn config(&self) -> &DamageConfig {
        &self.config
    }

    pub fn pipeline(&self) -> &StatPipeline {
        &self.pipeline
    }

    /// Create the body record if missing
    ///
    /// Part max health is derived from `max_health` at this moment and is
    /// not rescaled later.
    pub fn ensure_initialized(&mut self, id: CharacterId, max_health: u32) -> &mut Body {
        Self::entry(&mut self.bodies, &self.anatomy, id, max_health)
    }

    fn entry<'a>(
        bodies: &'a mut AHashMap<CharacterId, Body>,
        anatomy: &Anatomy,
        id: CharacterId,
        max_health: u32,
    ) -> &'a mut Body {
        bodies.entry(id).or_insert_with(|| {
            tracing::debug!(character = ?id, max_health, "Initializing body parts");
            Body::from_anatomy(anatomy, max_health)
        })
    }

    fn record<'a>(
        bodies: &'a mut AHashMap<CharacterId, Body>,
        anatomy: &Anatomy,
        character: &Character,
    ) -> &'a mut Body {
        Self::entry(bodies, anatomy, character.id, character.max_health())
    }

    pub fn is_initialized(&self, id: CharacterId) -> bool {
        self.bodies.contains_key(&id)
    }

    pub fn body(&self, id: CharacterId) -> Option<&Body> {
        self.bodies.get(&id)
    }

    pub fn body_mut(&mut self, id: CharacterId) -> Option<&mut Body> {
        self.bodies.get_mut(&id)
    }

    /// Drop a character's record
    pub fn forget(&mut self, id: CharacterId) -> Option<Body> {
        self.bodies.remove(&id)
    }

    /// Host hook for resolved HP damage
    pub fn apply_damage<R: Rng + ?Sized>(
        &mut self,
        character: &mut Character,
        amount: u32,
        rng: &mut R,
    ) -> DamageReport {
        let body = Self::record(&mut self.bodies, &self.anatomy, character);
        let report =
            damage::apply_damage(body, &self.anatomy, &self.config, character, amount, rng);
        if report.needs_refresh() {
            self.refresh(character);
        }
        report
    }

    /// Damage explicit parts of a named hit location
    pub fn distribute_damage(
        &mut self,
        character: &mut Character,
        location: &str,
        selected: &[PartId],
        amount: u32,
    ) -> Result<DamageReport> {
        let group = self
            .anatomy
            .table()
            .group(location)
            .ok_or_else(|| LimbError::UnknownLocation(location.to_string()))?;
        let body = Self::record(&mut self.bodies, &self.anatomy, character);
        let report = damage::distribute_damage(
            body,
            &self.anatomy,
            &self.config,
            character,
            group,
            selected,
            amount,
        );
        if report.needs_refresh() {
            self.refresh(character);
        }
        Ok(report)
    }

    /// Host hook for resolved recovery effects
    pub fn heal(&mut self, character: &mut Character, amount: u32) -> HealReport {
        let body = Self::record(&mut self.bodies, &self.anatomy, character);
        let report = recovery::heal(body, &self.anatomy, &self.config, amount);
        if report.needs_refresh() {
            self.refresh(character);
        }
        report
    }

    /// Reset every part and set overall health to `revive_health`
    ///
    /// Without an amount the character comes back with `revive_fraction` of
    /// max health.
    pub fn restore_all(&mut self, character: &mut Character, revive_health: Option<u32>) {
        let body = Self::record(&mut self.bodies, &self.anatomy, character);
        recovery::restore_all(body);
        self.refresh(character);

        let health = revive_health.unwrap_or_else(|| self.default_revive_health(character));
        character.set_health(health);
        tracing::info!(
            character = %character.name,
            health = character.health,
            "Body fully restored"
        );
    }

    fn default_revive_health(&self, character: &Character) -> u32 {
        let health = (character.max_health() as f64 * self.config.revive_fraction).floor() as u32;
        health.max(1)
    }

    /// Death-and-revive reset; returns whether the character was dead
    pub fn handle_death(&mut self, character: &mut Character) -> bool {
        if !character.is_dead() {
            return false;
        }
        tracing::info!(character = %character.name, "Character fell, resetting body");
        self.restore_all(character, None);
        true
    }

    /// Heal every part by its own max and overall health to max
    pub fn fully_heal(&mut self, character: &mut Character) -> HealReport {
        let body = Self::record(&mut self.bodies, &self.anatomy, character);
        let amount = body.parts().map(|p| p.max_health).max().unwrap_or(0);
        let report = self.heal(character, amount);
        self.refresh(character);
        character.set_health(character.max_health());
        report
    }

    pub fn install_prosthetic(
        &mut self,
        character: &mut Character,
        part: &PartId,
        prosthetic: Prosthetic,
    ) -> Result<()> {
        let body = Self::record(&mut self.bodies, &self.anatomy, character);
        prosthetics::install_prosthetic(body, &self.anatomy, part, prosthetic)?;
        self.refresh(character);
        Ok(())
    }

    pub fn remove_prosthetic(
        &mut self,
        character: &mut Character,
        part: &PartId,
    ) -> Result<(Prosthetic, Vec<DestructionEvent>)> {
        let body = Self::record(&mut self.bodies, &self.anatomy, character);
        let locale = self.config.locale.as_str();
        let removed = prosthetics::remove_prosthetic(body, &self.anatomy, character, part, locale)?;
        self.refresh(character);
        Ok(removed)
    }

    /// Equip `item`, refusing slots whose body part is destroyed
    pub fn equip(
        &mut self,
        character: &mut Character,
        slot: EquipSlot,
        item: Equipment,
    ) -> Result<Option<Equipment>> {
        let body = Self::record(&mut self.bodies, &self.anatomy, character);
        if let Some(part) = body.disabling_part(&self.anatomy, slot) {
            return Err(LimbError::SlotDisabled {
                slot,
                part: part.clone(),
            });
        }
        let previous = character.equipment.insert(slot, item);
        self.refresh(character);
        Ok(previous)
    }

    /// Effective stat through the modifier chain
    pub fn compute_stat(&self, character: &Character, stat: StatId) -> i32 {
        self.pipeline
            .compute_stat(character, self.bodies.get(&character.id), stat)
    }

    /// Recompute the character's cached stats
    pub fn refresh(&self, character: &mut Character) {
        let body = self.bodies.get(&character.id);
        self.pipeline.refresh(character, body);
    }

    /// Status rows in anatomy order
    pub fn status(&self, id: CharacterId) -> Result<Vec<PartStatus>> {
        let body = self.bodies.get(&id).ok_or(LimbError::UnknownCharacter(id))?;
        let locale = self.config.locale.as_str();

        Ok(self
            .anatomy
            .parts()
            .iter()
            .filter_map(|template| {
                let state = body.part(&template.id)?;
                Some(PartStatus {
                    id: template.id.clone(),
                    name: template.name.get(locale).to_string(),
                    vital: template.vital,
                    max_health: state.max_health,
                    current_health: state.current_health,
                    destroyed: state.destroyed,
                    penalty_applied: state.penalty_applied,
                    prosthetic: state.prosthetic.as_ref().map(|p| p.name.clone()),
                })
            })
            .collect())
    }

    /// Serialize every body record
    pub fn export_json(&self) -> Result<String> {
        let mut records: Vec<BodyRecord> = self
            .bodies
            .iter()
            .map(|(id, body)| BodyRecord {
                character: *id,
                body: body.clone(),
            })
            .collect();
        records.sort_by_key(|r| r.character.0);
        Ok(serde_json::to_string_pretty(&records)?)
    }

    /// Replace all body records; returns how many were loaded
    ///
    /// Every record is checked against the anatomy first. On error the
    /// current records are left untouched.
    pub fn import_json(&mut self, json: &str) -> Result<usize> {
        let records: Vec<BodyRecord> = serde_json::from_str(json)?;
        for record in &records {
            record.body.validate(&self.anatomy)?;
        }
        self.bodies = records.into_iter().map(|r| (r.character, r.body)).collect();
        Ok(self.bodies.len())
    }
}
