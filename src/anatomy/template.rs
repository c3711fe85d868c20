//! Static body part templates
//!
//! A template describes one trackable part of a body. Per-character state
//! lives in `body::state` and is derived from these templates.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::types::{EquipSlot, PartId, StatId};

/// Display text with optional per-locale translations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub default: String,
    pub translations: BTreeMap<String, String>,
}

impl LocalizedText {
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
            translations: BTreeMap::new(),
        }
    }

    /// Add a translation for `locale`
    pub fn with(mut self, locale: impl Into<String>, text: impl Into<String>) -> Self {
        self.translations.insert(locale.into(), text.into());
        self
    }

    /// Text for `locale`, falling back to the default text
    pub fn get(&self, locale: &str) -> &str {
        self.translations
            .get(locale)
            .map(String::as_str)
            .unwrap_or(&self.default)
    }
}

/// Stat modifier applied while the owning part is destroyed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatPenalty {
    pub stat: StatId,
    pub amount: i32,
}

/// Template of a body part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPart {
    pub id: PartId,
    pub name: LocalizedText,
    /// Max health as a percentage of the character's overall max health
    pub max_health_percent: u32,
    /// Vital parts are flagged for presentation; destruction alone never kills
    pub vital: bool,
    /// Equipment slot unequipped when this part is destroyed
    pub slot: Option<EquipSlot>,
    /// Parts destroyed along with this one
    pub children: Vec<PartId>,
    pub penalty: Option<StatPenalty>,
}

impl BodyPart {
    pub fn new(id: &str, name: LocalizedText, max_health_percent: u32) -> Self {
        Self {
            id: PartId::new(id),
            name,
            max_health_percent,
            vital: false,
            slot: None,
            children: Vec::new(),
            penalty: None,
        }
    }

    pub fn vital(mut self) -> Self {
        self.vital = true;
        self
    }

    pub fn slot(mut self, slot: EquipSlot) -> Self {
        self.slot = Some(slot);
        self
    }

    pub fn children(mut self, children: &[&str]) -> Self {
        self.children = children.iter().map(|c| PartId::new(*c)).collect();
        self
    }

    pub fn penalty(mut self, stat: StatId, amount: i32) -> Self {
        self.penalty = Some(StatPenalty { stat, amount });
        self
    }

    /// Max health of this part for a character with `overall_max` health
    ///
    /// Rounded down, but never below 1.
    pub fn max_health_for(&self, overall_max: u32) -> u32 {
        let scaled = overall_max as u64 * self.max_health_percent as u64 / 100;
        (scaled as u32).max(1)
    }
}
