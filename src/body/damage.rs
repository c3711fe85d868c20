//! Damage distribution across body parts
//!
//! Part damage is parallel bookkeeping: it never changes the character's
//! overall health, which the host reduces on its own.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::anatomy::{select_parts, Anatomy, HitLocationGroup};
use crate::body::cascade::{destroy_part, DestructionCause, DestructionEvent};
use crate::body::state::Body;
use crate::core::config::DamageConfig;
use crate::core::types::PartId;
use crate::entity::character::Character;

/// Outcome of one damage application
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageReport {
    /// Hit location id
    pub location: Option<String>,
    /// Parts selected for the even split
    pub parts_hit: Vec<PartId>,
    /// Damage actually taken off part health
    pub absorbed: u32,
    /// Destructions caused, in order
    pub events: Vec<DestructionEvent>,
}

impl DamageReport {
    /// Destructions change stats
    pub fn needs_refresh(&self) -> bool {
        !self.events.is_empty()
    }
}

/// Pick a hit location and parts at random, then distribute `amount`
pub fn apply_damage<R: Rng + ?Sized>(
    body: &mut Body,
    anatomy: &Anatomy,
    config: &DamageConfig,
    character: &mut Character,
    amount: u32,
    rng: &mut R,
) -> DamageReport {
    if amount == 0 {
        return DamageReport::default();
    }

    let group = anatomy.table().select(rng);
    let count = rng.gen_range(1..=config.max_parts_per_hit.max(1));
    let selected = select_parts(group, count, rng);

    distribute_damage(body, anatomy, config, character, group, &selected, amount)
}

/// Split `amount` evenly over `selected`; the remainder goes to the primary part
pub fn distribute_damage(
    body: &mut Body,
    anatomy: &Anatomy,
    config: &DamageConfig,
    character: &mut Character,
    group: &HitLocationGroup,
    selected: &[PartId],
    amount: u32,
) -> DamageReport {
    let mut report = DamageReport {
        location: Some(group.id.clone()),
        parts_hit: selected.to_vec(),
        ..Default::default()
    };
    if selected.is_empty() || amount == 0 {
        return report;
    }

    let per_part = amount / selected.len() as u32;
    let remainder = amount - per_part * selected.len() as u32;

    let mut hit = PartHit {
        body,
        anatomy,
        config,
        character,
        report: &mut report,
    };
    for part in selected {
        hit.hit(part, per_part);
    }
    if remainder > 0 {
        if let Some(primary) = group.primary() {
            hit.hit(primary, remainder);
        }
    }

    tracing::debug!(
        location = %group.id,
        requested = amount,
        absorbed = report.absorbed,
        "Distributed damage over {} parts",
        selected.len()
    );
    report
}

struct PartHit<'a> {
    body: &'a mut Body,
    anatomy: &'a Anatomy,
    config: &'a DamageConfig,
    character: &'a mut Character,
    report: &'a mut DamageReport,
}

impl PartHit<'_> {
    /// Apply `requested` to one part under the protective or normal rule
    fn hit(&mut self, part: &PartId, requested: u32) {
        if requested == 0 {
            return;
        }

        // Read per hit, not once per batch
        let protected = self.character.health_ratio() > self.config.protection_threshold;

        let Some(state) = self.body.part_mut(part) else {
            tracing::warn!("Hit on untracked body part {}", part);
            return;
        };
        if state.destroyed {
            return;
        }

        let applied = if protected {
            requested.min(state.current_health.saturating_sub(1))
        } else {
            requested.min(state.current_health)
        };
        if applied == 0 {
            return;
        }

        state.current_health -= applied;
        let remaining = state.current_health;
        self.report.absorbed += applied;

        tracing::debug!(part = %part, applied, remaining, protected, "Body part hit");

        if remaining == 0 && !protected {
            let events = destroy_part(
                self.body,
                self.anatomy,
                self.character,
                part,
                DestructionCause::Damage,
                &self.config.locale,
            );
            self.report.events.extend(events);
        }
    }
}
