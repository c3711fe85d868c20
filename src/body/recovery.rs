//! Healing and full restore of body parts

use serde::{Deserialize, Serialize};

use crate::anatomy::Anatomy;
use crate::body::state::Body;
use crate::core::config::DamageConfig;
use crate::core::types::PartId;

/// Outcome of a heal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealReport {
    /// Destroyed parts that work again, in anatomy order
    pub restored: Vec<PartId>,
}

impl HealReport {
    /// Stats only change when a penalty was lifted
    pub fn needs_refresh(&self) -> bool {
        !self.restored.is_empty()
    }
}

/// Add `amount` to every part
///
/// A destroyed part comes back once it reaches `restore_threshold` of its max
/// health (inclusive), and its penalty is reversed.
pub fn heal(body: &mut Body, anatomy: &Anatomy, config: &DamageConfig, amount: u32) -> HealReport {
    let mut report = HealReport::default();

    for template in anatomy.parts() {
        let Some(state) = body.part_mut(&template.id) else {
            continue;
        };
        state.add_health(amount);

        if !state.destroyed {
            continue;
        }
        if (state.current_health as f64) < state.max_health as f64 * config.restore_threshold {
            continue;
        }

        state.destroyed = false;
        let lifted = state.penalty_applied;
        state.penalty_applied = false;
        if lifted {
            if let Some(p) = template.penalty {
                body.add_modifier(p.stat, -p.amount);
            }
        }

        tracing::info!(part = %template.id, "Body part restored by healing");
        report.restored.push(template.id.clone());
    }

    report
}

/// Every part to max health; flags and modifiers cleared
pub fn restore_all(body: &mut Body) {
    for state in body.parts_mut() {
        state.current_health = state.max_health;
        state.destroyed = false;
        state.penalty_applied = false;
    }
    body.clear_modifiers();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::cascade::{destroy_part, DestructionCause};
    use crate::core::types::StatId;
    use crate::entity::character::Character;

    fn destroyed(id: &str) -> (Anatomy, Body) {
        let anatomy = Anatomy::standard();
        let mut body = Body::from_anatomy(&anatomy, 100);
        let mut hero = Character::with_max_hp("Hero", 100);
        destroy_part(
            &mut body,
            &anatomy,
            &mut hero,
            &PartId::new(id),
            DestructionCause::Damage,
            "en",
        );
        (anatomy, body)
    }

    #[test]
    fn test_heal_below_threshold_keeps_destroyed() {
        let (anatomy, mut body) = destroyed("left_foot");
        // max 10, needs 5
        let report = heal(&mut body, &anatomy, &DamageConfig::default(), 4);
        let foot = body.part(&PartId::new("left_foot")).unwrap();
        assert!(foot.destroyed);
        assert_eq!(foot.current_health, 4);
        assert!(report.restored.is_empty());
        assert_eq!(body.modifier(StatId::Agility), -5);
    }

    #[test]
    fn test_heal_exactly_half_restores() {
        let (anatomy, mut body) = destroyed("left_foot");
        let report = heal(&mut body, &anatomy, &DamageConfig::default(), 5);
        let foot = body.part(&PartId::new("left_foot")).unwrap();
        assert!(!foot.destroyed);
        assert!(!foot.penalty_applied);
        assert_eq!(report.restored, vec![PartId::new("left_foot")]);
        assert!(body.modifiers().is_empty());
        assert!(report.needs_refresh());
    }

    #[test]
    fn test_heal_accumulates_across_calls() {
        let (anatomy, mut body) = destroyed("left_foot");
        heal(&mut body, &anatomy, &DamageConfig::default(), 3);
        let report = heal(&mut body, &anatomy, &DamageConfig::default(), 2);
        assert_eq!(report.restored, vec![PartId::new("left_foot")]);
    }

    #[test]
    fn test_heal_clamps_intact_parts() {
        let anatomy = Anatomy::standard();
        let mut body = Body::from_anatomy(&anatomy, 100);
        let head = PartId::new("head");
        body.part_mut(&head).unwrap().current_health = 20;
        let report = heal(&mut body, &anatomy, &DamageConfig::default(), 50);
        assert_eq!(body.part(&head).unwrap().current_health, 30);
        assert!(!report.needs_refresh());
    }

    #[test]
    fn test_heal_is_flat_per_part() {
        let (anatomy, mut body) = destroyed("right_arm");
        heal(&mut body, &anatomy, &DamageConfig::default(), 6);
        // arm max 25 stays destroyed, hand max 10 comes back
        assert!(body.part(&PartId::new("right_arm")).unwrap().destroyed);
        assert!(!body.part(&PartId::new("right_hand")).unwrap().destroyed);
        assert_eq!(body.modifier(StatId::Attack), -10);
    }

    #[test]
    fn test_restore_all_is_canonical() {
        let (anatomy, mut body) = destroyed("head");
        restore_all(&mut body);
        assert_eq!(body, Body::from_anatomy(&anatomy, 100));
    }
}
