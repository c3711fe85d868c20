//! Load anatomy tables from TOML files

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::anatomy::hit_location::{HitLocationGroup, HitTable};
use crate::anatomy::template::{BodyPart, LocalizedText, StatPenalty};
use crate::anatomy::Anatomy;
use crate::core::config::DamageConfig;
use crate::core::error::{LimbError, Result};
use crate::core::types::{EquipSlot, PartId};

/// An anatomy together with the damage settings declared next to it
#[derive(Debug, Clone)]
pub struct LoadedAnatomy {
    pub anatomy: Anatomy,
    pub config: DamageConfig,
}

#[derive(Debug, Deserialize)]
struct RawFile {
    #[serde(default)]
    damage: Option<DamageConfig>,
    #[serde(default)]
    parts: Vec<RawPart>,
    #[serde(default)]
    groups: Vec<RawGroup>,
}

#[derive(Debug, Deserialize)]
struct RawPart {
    id: String,
    name: String,
    max_health_percent: u32,
    #[serde(default)]
    vital: bool,
    slot: Option<EquipSlot>,
    #[serde(default)]
    children: Vec<String>,
    penalty: Option<StatPenalty>,
    /// `name_<locale>` translations
    #[serde(flatten)]
    extra: BTreeMap<String, toml::Value>,
}

#[derive(Debug, Deserialize)]
struct RawGroup {
    id: String,
    name: String,
    weight: u32,
    parts: Vec<String>,
    #[serde(flatten)]
    extra: BTreeMap<String, toml::Value>,
}

/// Load an anatomy file from disk
pub fn load_anatomy(path: &Path) -> Result<LoadedAnatomy> {
    let content = fs::read_to_string(path)?;
    let loaded = parse_anatomy(&content)?;
    tracing::info!(
        "Loaded anatomy from {}: {} parts, {} hit locations",
        path.display(),
        loaded.anatomy.parts().len(),
        loaded.anatomy.table().groups().len()
    );
    Ok(loaded)
}

/// Parse and validate anatomy TOML
pub fn parse_anatomy(content: &str) -> Result<LoadedAnatomy> {
    let raw: RawFile = toml::from_str(content)?;

    let config = raw.damage.unwrap_or_default();
    config.validate().map_err(LimbError::InvalidConfig)?;

    let parts = raw
        .parts
        .into_iter()
        .map(|p| {
            let name = localized(&p.id, p.name, p.extra)?;
            Ok(BodyPart {
                id: PartId::new(p.id),
                name,
                max_health_percent: p.max_health_percent,
                vital: p.vital,
                slot: p.slot,
                children: p.children.into_iter().map(PartId::new).collect(),
                penalty: p.penalty,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let groups = raw
        .groups
        .into_iter()
        .map(|g| {
            let name = localized(&g.id, g.name, g.extra)?;
            Ok(HitLocationGroup {
                id: g.id,
                name,
                weight: g.weight,
                parts: g.parts.into_iter().map(PartId::new).collect(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let anatomy = Anatomy::new(parts, HitTable::new(groups))?;
    Ok(LoadedAnatomy { anatomy, config })
}

fn localized(
    owner: &str,
    default: String,
    extra: BTreeMap<String, toml::Value>,
) -> Result<LocalizedText> {
    let mut text = LocalizedText::new(default);
    for (key, value) in extra {
        let Some(locale) = key.strip_prefix("name_") else {
            return Err(LimbError::InvalidAnatomy(format!(
                "{}: unknown key '{}'",
                owner, key
            )));
        };
        let Some(translation) = value.as_str() else {
            return Err(LimbError::InvalidAnatomy(format!(
                "{}: '{}' must be a string",
                owner, key
            )));
        };
        text = text.with(locale, translation);
    }
    Ok(text)
}
