//! Hit locations: weighted groups of body parts
//!
//! A hit first picks a location group by weight, then 1..=N distinct parts
//! inside that group.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::anatomy::template::LocalizedText;
use crate::core::types::PartId;

/// A named cluster of body parts targeted as one unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitLocationGroup {
    pub id: String,
    pub name: LocalizedText,
    /// Relative selection weight (positive)
    pub weight: u32,
    /// Member parts; the first entry is the primary part
    pub parts: Vec<PartId>,
}

impl HitLocationGroup {
    pub fn new(id: &str, name: LocalizedText, weight: u32, parts: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name,
            weight,
            parts: parts.iter().map(|p| PartId::new(*p)).collect(),
        }
    }

    /// The part that absorbs rounding remainders
    pub fn primary(&self) -> Option<&PartId> {
        self.parts.first()
    }
}

/// Ordered table of hit locations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HitTable {
    groups: Vec<HitLocationGroup>,
}

impl HitTable {
    pub fn new(groups: Vec<HitLocationGroup>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[HitLocationGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn total_weight(&self) -> u64 {
        self.groups.iter().map(|g| g.weight as u64).sum()
    }

    pub fn group(&self, id: &str) -> Option<&HitLocationGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Pick a group with probability `weight / total_weight`
    ///
    /// The table must not be empty.
    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> &HitLocationGroup {
        let total = self.total_weight() as f64;
        let draw = rng.gen_range(0.0..total);
        self.select_with_draw(draw)
    }

    /// Cumulative lookup for a draw in `[0, total_weight)`
    fn select_with_draw(&self, draw: f64) -> &HitLocationGroup {
        let mut cumulative = 0.0;
        for group in &self.groups {
            cumulative += group.weight as f64;
            if cumulative > draw {
                return group;
            }
        }
        &self.groups[self.groups.len() - 1]
    }
}

/// Draw `min(count, group size)` distinct parts uniformly from `group`
pub fn select_parts<R: Rng + ?Sized>(
    group: &HitLocationGroup,
    count: usize,
    rng: &mut R,
) -> Vec<PartId> {
    let mut members = group.parts.clone();
    members.shuffle(rng);
    members.truncate(count);
    members
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn table() -> HitTable {
        HitTable::new(vec![
            HitLocationGroup::new("head", LocalizedText::new("Head"), 10, &["head", "eye"]),
            HitLocationGroup::new("torso", LocalizedText::new("Torso"), 30, &["torso"]),
            HitLocationGroup::new("legs", LocalizedText::new("Legs"), 60, &["leg", "foot", "knee"]),
        ])
    }

    #[test]
    fn test_cumulative_boundaries() {
        let table = table();
        assert_eq!(table.select_with_draw(0.0).id, "head");
        assert_eq!(table.select_with_draw(9.999).id, "head");
        assert_eq!(table.select_with_draw(10.0).id, "torso");
        assert_eq!(table.select_with_draw(39.5).id, "torso");
        assert_eq!(table.select_with_draw(40.0).id, "legs");
    }

    #[test]
    fn test_draw_at_total_falls_back_to_last() {
        let table = table();
        assert_eq!(table.select_with_draw(100.0).id, "legs");
    }

    #[test]
    fn test_single_group_always_selected() {
        let table = HitTable::new(vec![HitLocationGroup::new(
            "torso",
            LocalizedText::new("Torso"),
            1,
            &["torso"],
        )]);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(table.select(&mut rng).id, "torso");
        }
    }

    #[test]
    fn test_primary_is_first_member() {
        let table = table();
        assert_eq!(table.group("legs").and_then(|g| g.primary()), Some(&PartId::new("leg")));
    }

    #[test]
    fn test_select_parts_caps_at_group_size() {
        let table = table();
        let head = table.group("head").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let picked = select_parts(head, 3, &mut rng);
        assert_eq!(picked.len(), 2);
        assert!(picked.contains(&PartId::new("head")));
        assert!(picked.contains(&PartId::new("eye")));
    }

    #[test]
    fn test_select_parts_distinct() {
        let table = table();
        let legs = table.group("legs").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            let mut picked = select_parts(legs, 2, &mut rng);
            assert_eq!(picked.len(), 2);
            picked.sort();
            picked.dedup();
            assert_eq!(picked.len(), 2);
        }
    }
}
