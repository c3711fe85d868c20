//! Destruction of body parts and the cascade to child parts

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::anatomy::Anatomy;
use crate::body::state::Body;
use crate::core::types::{PartId, StatId};
use crate::entity::character::Character;

/// Why a part was destroyed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DestructionCause {
    /// Health reached zero from a hit
    Damage,
    /// A parent part was destroyed
    Cascade { parent: PartId },
    /// Its prosthetic was taken off
    ProstheticRemoved,
}

/// Record handed to the presentation layer, one per destroyed part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestructionEvent {
    pub character_name: String,
    pub part: PartId,
    pub part_name: String,
    pub message: String,
    /// Stat penalised by this destruction, if the penalty was applied
    pub stat: Option<StatId>,
    pub amount: Option<i32>,
    /// Item taken off the associated equipment slot
    pub unequipped: Option<String>,
    /// Prosthetic wrecked along with the part
    pub prosthetic_lost: Option<String>,
    pub cause: DestructionCause,
}

/// Everything a cascade needs to read or touch
pub(crate) struct Cascade<'a> {
    pub body: &'a mut Body,
    pub anatomy: &'a Anatomy,
    pub character: &'a mut Character,
    pub locale: &'a str,
}

/// Destroy `part` and, depth-first, every declared child
///
/// Parts that are already destroyed are left alone, so calling this twice is
/// the same as calling it once. Events come back in destruction order.
pub fn destroy_part(
    body: &mut Body,
    anatomy: &Anatomy,
    character: &mut Character,
    part: &PartId,
    cause: DestructionCause,
    locale: &str,
) -> Vec<DestructionEvent> {
    let mut cascade = Cascade {
        body,
        anatomy,
        character,
        locale,
    };
    cascade.destroy(part, cause)
}

impl Cascade<'_> {
    pub(crate) fn destroy(
        &mut self,
        part: &PartId,
        cause: DestructionCause,
    ) -> Vec<DestructionEvent> {
        let mut visited = AHashSet::new();
        let mut events = Vec::new();
        self.destroy_recursive(part, cause, &mut visited, &mut events);
        events
    }

    fn destroy_recursive(
        &mut self,
        part: &PartId,
        cause: DestructionCause,
        visited: &mut AHashSet<PartId>,
        events: &mut Vec<DestructionEvent>,
    ) {
        if !visited.insert(part.clone()) {
            return;
        }
        let anatomy = self.anatomy;
        let Some(template) = anatomy.part(part) else {
            tracing::warn!("Cannot destroy unknown body part {}", part);
            return;
        };
        let Some(state) = self.body.part_mut(part) else {
            return;
        };
        if state.destroyed {
            return;
        }

        state.destroyed = true;
        state.current_health = 0;
        let prosthetic_lost = state.prosthetic.take().map(|p| p.name);

        // Max HP penalties are never applied automatically
        let penalty = template
            .penalty
            .filter(|p| p.stat != StatId::MaxHp && !state.penalty_applied);
        if penalty.is_some() {
            state.penalty_applied = true;
        }
        if let Some(p) = penalty {
            self.body.add_modifier(p.stat, p.amount);
        }

        let unequipped = template
            .slot
            .and_then(|slot| self.character.unequip(slot))
            .map(|item| item.name);

        let part_name = template.name.get(self.locale).to_string();
        let message = match &cause {
            DestructionCause::Damage => {
                format!("{}'s {} was destroyed!", self.character.name, part_name)
            }
            DestructionCause::Cascade { parent } => {
                let parent_name = anatomy
                    .part(parent)
                    .map_or(parent.as_str(), |t| t.name.get(self.locale));
                format!(
                    "{}'s {} was lost along with the {}!",
                    self.character.name, part_name, parent_name
                )
            }
            DestructionCause::ProstheticRemoved => {
                format!("{}'s {} is gone again.", self.character.name, part_name)
            }
        };

        tracing::info!(
            character = %self.character.name,
            part = %part,
            "{}",
            message
        );

        events.push(DestructionEvent {
            character_name: self.character.name.clone(),
            part: part.clone(),
            part_name,
            message,
            stat: penalty.map(|p| p.stat),
            amount: penalty.map(|p| p.amount),
            unequipped,
            prosthetic_lost,
            cause,
        });

        for child in &template.children {
            self.destroy_recursive(
                child,
                DestructionCause::Cascade {
                    parent: part.clone(),
                },
                visited,
                events,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::EquipSlot;
    use crate::entity::character::Equipment;

    fn setup() -> (Anatomy, Body, Character) {
        let anatomy = Anatomy::standard();
        let body = Body::from_anatomy(&anatomy, 100);
        let hero = Character::with_max_hp("Hero", 100);
        (anatomy, body, hero)
    }

    fn destroy(
        body: &mut Body,
        anatomy: &Anatomy,
        hero: &mut Character,
        part: &PartId,
    ) -> Vec<DestructionEvent> {
        destroy_part(body, anatomy, hero, part, DestructionCause::Damage, "en")
    }

    /// arm -> hand -> finger, plus a sibling thumb on the hand
    fn three_level() -> Anatomy {
        use crate::anatomy::{BodyPart, HitLocationGroup, HitTable, LocalizedText};

        let parts = vec![
            BodyPart::new("arm", LocalizedText::new("Arm"), 30)
                .children(&["hand"])
                .penalty(StatId::Attack, -10),
            BodyPart::new("hand", LocalizedText::new("Hand"), 20)
                .children(&["finger", "thumb"])
                .penalty(StatId::Attack, -5),
            BodyPart::new("finger", LocalizedText::new("Finger"), 5)
                .penalty(StatId::Agility, -2),
            BodyPart::new("thumb", LocalizedText::new("Thumb"), 5).penalty(StatId::Luck, -1),
        ];
        let table = HitTable::new(vec![HitLocationGroup::new(
            "arm",
            LocalizedText::new("Arm"),
            1,
            &["arm"],
        )]);
        Anatomy::new(parts, table).unwrap()
    }

    #[test]
    fn test_destroy_applies_penalty_once() {
        let (anatomy, mut body, mut hero) = setup();
        let arm = PartId::new("right_arm");
        let events = destroy(&mut body, &anatomy, &mut hero, &arm);

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].part, arm);
        assert_eq!(events[0].stat, Some(StatId::Attack));
        assert_eq!(events[0].amount, Some(-10));
        // arm -10 plus hand -5
        assert_eq!(body.modifier(StatId::Attack), -15);
        assert!(body.part(&arm).unwrap().penalty_applied);
    }

    #[test]
    fn test_cascade_reaches_children() {
        let (anatomy, mut body, mut hero) = setup();
        let events = destroy_part(
            &mut body,
            &anatomy,
            &mut hero,
            &PartId::new("head"),
            DestructionCause::Damage,
            "en",
        );

        let destroyed: Vec<&str> = events.iter().map(|e| e.part.as_str()).collect();
        assert_eq!(destroyed, vec!["head", "left_eye", "right_eye"]);
        for id in ["head", "left_eye", "right_eye"] {
            let state = body.part(&PartId::new(id)).unwrap();
            assert!(state.destroyed);
            assert_eq!(state.current_health, 0);
        }
        assert_eq!(
            events[1].cause,
            DestructionCause::Cascade {
                parent: PartId::new("head")
            }
        );
    }

    #[test]
    fn test_cascade_reaches_grandchildren_depth_first() {
        let anatomy = three_level();
        let mut body = Body::from_anatomy(&anatomy, 100);
        let mut hero = Character::with_max_hp("Hero", 100);

        let events = destroy(&mut body, &anatomy, &mut hero, &PartId::new("arm"));

        let order: Vec<&str> = events.iter().map(|e| e.part.as_str()).collect();
        assert_eq!(order, vec!["arm", "hand", "finger", "thumb"]);
        for id in ["arm", "hand", "finger", "thumb"] {
            let state = body.part(&PartId::new(id)).unwrap();
            assert!(state.destroyed);
            assert!(state.penalty_applied);
            assert_eq!(state.current_health, 0);
        }
        assert_eq!(
            events[2].cause,
            DestructionCause::Cascade {
                parent: PartId::new("hand")
            }
        );
        assert_eq!(body.modifier(StatId::Attack), -15);
        assert_eq!(body.modifier(StatId::Agility), -2);
        assert_eq!(body.modifier(StatId::Luck), -1);
    }

    #[test]
    fn test_destroy_wrecks_installed_prosthetic() {
        use crate::body::state::Prosthetic;

        let (anatomy, mut body, mut hero) = setup();
        let hand = PartId::new("right_hand");
        body.part_mut(&hand).unwrap().prosthetic = Some(Prosthetic::new("Claw"));

        let events = destroy(&mut body, &anatomy, &mut hero, &hand);

        assert_eq!(events[0].prosthetic_lost.as_deref(), Some("Claw"));
        assert!(body.part(&hand).unwrap().prosthetic.is_none());
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let (anatomy, mut body, mut hero) = setup();
        let leg = PartId::new("left_leg");
        destroy(&mut body, &anatomy, &mut hero, &leg);
        let after_once = body.clone();

        let events = destroy(&mut body, &anatomy, &mut hero, &leg);
        assert!(events.is_empty());
        assert_eq!(body, after_once);
    }

    #[test]
    fn test_max_hp_penalty_not_applied() {
        let (anatomy, mut body, mut hero) = setup();
        let torso = PartId::new("torso");
        let events = destroy(&mut body, &anatomy, &mut hero, &torso);

        assert_eq!(events[0].stat, None);
        assert!(body.modifiers().is_empty());
        assert!(!body.part(&torso).unwrap().penalty_applied);
    }

    #[test]
    fn test_destroy_unequips_slot() {
        let (anatomy, mut body, mut hero) = setup();
        hero.equipment.insert(EquipSlot::Weapon, Equipment::new("Sword"));
        let events = destroy_part(
            &mut body,
            &anatomy,
            &mut hero,
            &PartId::new("right_arm"),
            DestructionCause::Damage,
            "en",
        );

        assert!(hero.equipped(EquipSlot::Weapon).is_none());
        let hand = events.iter().find(|e| e.part.as_str() == "right_hand").unwrap();
        assert_eq!(hand.unequipped.as_deref(), Some("Sword"));
    }

    #[test]
    fn test_localized_message() {
        let (anatomy, mut body, mut hero) = setup();
        let events = destroy_part(
            &mut body,
            &anatomy,
            &mut hero,
            &PartId::new("heart"),
            DestructionCause::Damage,
            "ja",
        );
        assert_eq!(events[0].part_name, "心臓");
    }
}
