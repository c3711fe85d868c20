//! Static anatomy: body part templates and the hit-location table
//!
//! An `Anatomy` is built once at startup, either from the built-in humanoid
//! body or from a TOML file, and is immutable afterwards.

pub mod hit_location;
pub mod loader;
pub mod standard;
pub mod template;

pub use hit_location::{select_parts, HitLocationGroup, HitTable};
pub use loader::{load_anatomy, parse_anatomy};
pub use template::{BodyPart, LocalizedText, StatPenalty};

use ahash::{AHashMap, AHashSet};

use crate::core::error::{LimbError, Result};
use crate::core::types::PartId;

/// Validated set of part templates plus hit locations
#[derive(Debug, Clone)]
pub struct Anatomy {
    parts: Vec<BodyPart>,
    index: AHashMap<PartId, usize>,
    table: HitTable,
}

impl Anatomy {
    /// Build and validate an anatomy
    pub fn new(parts: Vec<BodyPart>, table: HitTable) -> Result<Self> {
        let anatomy = Self::build(parts, table);
        anatomy.validate()?;
        Ok(anatomy)
    }

    pub(crate) fn build(parts: Vec<BodyPart>, table: HitTable) -> Self {
        let index = parts
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();
        Self { parts, index, table }
    }

    /// Templates in declaration order
    pub fn parts(&self) -> &[BodyPart] {
        &self.parts
    }

    pub fn part(&self, id: &PartId) -> Option<&BodyPart> {
        self.index.get(id).map(|&i| &self.parts[i])
    }

    pub fn table(&self) -> &HitTable {
        &self.table
    }

    /// Check every structural requirement of the tables
    pub fn validate(&self) -> Result<()> {
        if self.parts.is_empty() {
            return Err(invalid("no body parts defined"));
        }
        if self.table.is_empty() {
            return Err(invalid("no hit locations defined"));
        }
        if self.index.len() != self.parts.len() {
            return Err(invalid("duplicate body part id"));
        }

        for part in &self.parts {
            if part.max_health_percent == 0 || part.max_health_percent > 100 {
                return Err(invalid(&format!(
                    "{}: max_health_percent must be within 1..=100",
                    part.id
                )));
            }
            for child in &part.children {
                if !self.index.contains_key(child) {
                    return Err(LimbError::UnknownPart(child.clone()));
                }
                if child == &part.id {
                    return Err(invalid(&format!("{} lists itself as a child", part.id)));
                }
            }
        }

        let mut group_ids = AHashSet::new();
        for group in self.table.groups() {
            if !group_ids.insert(group.id.as_str()) {
                return Err(invalid(&format!("duplicate hit location {}", group.id)));
            }
            if group.weight == 0 {
                return Err(invalid(&format!("hit location {} has zero weight", group.id)));
            }
            if group.parts.is_empty() {
                return Err(invalid(&format!("hit location {} has no parts", group.id)));
            }
            for member in &group.parts {
                if !self.index.contains_key(member) {
                    return Err(LimbError::UnknownPart(member.clone()));
                }
            }
        }

        self.check_acyclic()
    }

    /// Depth-first search over the child graph, rejecting back edges
    fn check_acyclic(&self) -> Result<()> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Done,
        }

        let mut marks = vec![Mark::Unvisited; self.parts.len()];

        for start in 0..self.parts.len() {
            if marks[start] != Mark::Unvisited {
                continue;
            }
            // (node, next child index)
            let mut stack = vec![(start, 0usize)];
            marks[start] = Mark::InProgress;

            while let Some(top) = stack.last_mut() {
                let node = top.0;
                let children = &self.parts[node].children;
                if top.1 < children.len() {
                    let child = self.index[&children[top.1]];
                    top.1 += 1;
                    match marks[child] {
                        Mark::InProgress => {
                            return Err(invalid(&format!(
                                "child cycle through {}",
                                self.parts[child].id
                            )));
                        }
                        Mark::Unvisited => {
                            marks[child] = Mark::InProgress;
                            stack.push((child, 0));
                        }
                        Mark::Done => {}
                    }
                } else {
                    marks[node] = Mark::Done;
                    stack.pop();
                }
            }
        }

        Ok(())
    }
}

fn invalid(msg: &str) -> LimbError {
    LimbError::InvalidAnatomy(msg.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(id: &str, children: &[&str]) -> BodyPart {
        BodyPart::new(id, LocalizedText::new(id), 10).children(children)
    }

    fn table(parts: &[&str]) -> HitTable {
        HitTable::new(vec![HitLocationGroup::new(
            "all",
            LocalizedText::new("All"),
            1,
            parts,
        )])
    }

    #[test]
    fn test_valid_tree() {
        let anatomy = Anatomy::new(
            vec![part("arm", &["hand"]), part("hand", &["finger"]), part("finger", &[])],
            table(&["arm"]),
        );
        assert!(anatomy.is_ok());
    }

    #[test]
    fn test_cycle_rejected() {
        let result = Anatomy::new(
            vec![part("a", &["b"]), part("b", &["c"]), part("c", &["a"])],
            table(&["a"]),
        );
        assert!(matches!(result, Err(LimbError::InvalidAnatomy(_))));
    }

    #[test]
    fn test_self_child_rejected() {
        let result = Anatomy::new(vec![part("a", &["a"])], table(&["a"]));
        assert!(matches!(result, Err(LimbError::InvalidAnatomy(_))));
    }

    #[test]
    fn test_shared_child_is_not_a_cycle() {
        let anatomy = Anatomy::new(
            vec![part("a", &["c"]), part("b", &["c"]), part("c", &[])],
            table(&["a", "b"]),
        );
        assert!(anatomy.is_ok());
    }

    #[test]
    fn test_unknown_child_rejected() {
        let result = Anatomy::new(vec![part("a", &["ghost"])], table(&["a"]));
        assert!(matches!(result, Err(LimbError::UnknownPart(_))));
    }

    #[test]
    fn test_empty_table_rejected() {
        let result = Anatomy::new(vec![part("a", &[])], HitTable::default());
        assert!(matches!(result, Err(LimbError::InvalidAnatomy(_))));
    }

    #[test]
    fn test_zero_weight_rejected() {
        let table = HitTable::new(vec![HitLocationGroup::new(
            "all",
            LocalizedText::new("All"),
            0,
            &["a"],
        )]);
        let result = Anatomy::new(vec![part("a", &[])], table);
        assert!(matches!(result, Err(LimbError::InvalidAnatomy(_))));
    }

    #[test]
    fn test_lookup_by_id() {
        let anatomy = Anatomy::new(vec![part("a", &[]), part("b", &[])], table(&["a"])).unwrap();
        assert_eq!(anatomy.part(&PartId::new("b")).map(|p| p.id.as_str()), Some("b"));
        assert!(anatomy.part(&PartId::new("z")).is_none());
    }
}
