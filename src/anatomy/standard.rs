//! Built-in humanoid body used for the tracked player character

use crate::anatomy::hit_location::{HitLocationGroup, HitTable};
use crate::anatomy::template::{BodyPart, LocalizedText};
use crate::anatomy::Anatomy;
use crate::core::types::{EquipSlot, StatId};

fn text(en: &str, ja: &str) -> LocalizedText {
    LocalizedText::new(en).with("ja", ja)
}

/// Head, torso, two arms and two legs, with eyes, heart, hands and feet
pub fn standard_parts() -> Vec<BodyPart> {
    vec![
        BodyPart::new("head", text("Head", "頭"), 30)
            .vital()
            .slot(EquipSlot::Head)
            .children(&["left_eye", "right_eye"])
            .penalty(StatId::MagicAttack, -10),
        BodyPart::new("left_eye", text("Left Eye", "左目"), 5).penalty(StatId::Luck, -5),
        BodyPart::new("right_eye", text("Right Eye", "右目"), 5).penalty(StatId::Luck, -5),
        // Max HP penalties are never applied automatically
        BodyPart::new("torso", text("Torso", "胴体"), 50)
            .vital()
            .slot(EquipSlot::Body)
            .penalty(StatId::MaxHp, -20),
        BodyPart::new("heart", text("Heart", "心臓"), 15)
            .vital()
            .penalty(StatId::Agility, -10),
        BodyPart::new("left_arm", text("Left Arm", "左腕"), 25)
            .children(&["left_hand"])
            .penalty(StatId::Defense, -10),
        BodyPart::new("left_hand", text("Left Hand", "左手"), 10)
            .slot(EquipSlot::Shield)
            .penalty(StatId::Defense, -5),
        BodyPart::new("right_arm", text("Right Arm", "右腕"), 25)
            .children(&["right_hand"])
            .penalty(StatId::Attack, -10),
        BodyPart::new("right_hand", text("Right Hand", "右手"), 10)
            .slot(EquipSlot::Weapon)
            .penalty(StatId::Attack, -5),
        BodyPart::new("left_leg", text("Left Leg", "左脚"), 30)
            .children(&["left_foot"])
            .penalty(StatId::Agility, -10),
        BodyPart::new("left_foot", text("Left Foot", "左足"), 10).penalty(StatId::Agility, -5),
        BodyPart::new("right_leg", text("Right Leg", "右脚"), 30)
            .children(&["right_foot"])
            .penalty(StatId::Agility, -10),
        BodyPart::new("right_foot", text("Right Foot", "右足"), 10).penalty(StatId::Agility, -5),
    ]
}

/// Hit weights sum to 100
pub fn standard_table() -> HitTable {
    HitTable::new(vec![
        HitLocationGroup::new("head", text("Head", "頭部"), 10, &["head", "left_eye", "right_eye"]),
        HitLocationGroup::new("torso", text("Torso", "胴体"), 36, &["torso", "heart"]),
        HitLocationGroup::new("left_arm", text("Left Arm", "左腕"), 15, &["left_arm", "left_hand"]),
        HitLocationGroup::new(
            "right_arm",
            text("Right Arm", "右腕"),
            15,
            &["right_arm", "right_hand"],
        ),
        HitLocationGroup::new("left_leg", text("Left Leg", "左脚"), 12, &["left_leg", "left_foot"]),
        HitLocationGroup::new(
            "right_leg",
            text("Right Leg", "右脚"),
            12,
            &["right_leg", "right_foot"],
        ),
    ])
}

impl Anatomy {
    /// The built-in humanoid anatomy
    pub fn standard() -> Self {
        Self::build(standard_parts(), standard_table())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::PartId;

    #[test]
    fn test_standard_is_valid() {
        assert!(Anatomy::standard().validate().is_ok());
    }

    #[test]
    fn test_standard_weights_sum_to_hundred() {
        assert_eq!(standard_table().total_weight(), 100);
    }

    #[test]
    fn test_every_part_is_reachable_by_a_hit() {
        let anatomy = Anatomy::standard();
        for part in anatomy.parts() {
            let covered = anatomy
                .table()
                .groups()
                .iter()
                .any(|g| g.parts.contains(&part.id));
            assert!(covered, "{} is never hit", part.id);
        }
    }

    #[test]
    fn test_arm_cascades_to_hand() {
        let anatomy = Anatomy::standard();
        let arm = anatomy.part(&PartId::new("left_arm")).unwrap();
        assert_eq!(arm.children, vec![PartId::new("left_hand")]);
    }
}
