use thiserror::Error;

use crate::core::types::{CharacterId, EquipSlot, PartId};

#[derive(Error, Debug)]
pub enum LimbError {
    #[error("Unknown body part: {0}")]
    UnknownPart(PartId),

    #[error("Unknown hit location: {0}")]
    UnknownLocation(String),

    #[error("Character has no body record: {0:?}")]
    UnknownCharacter(CharacterId),

    #[error("Invalid anatomy: {0}")]
    InvalidAnatomy(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Body part {0} is not destroyed")]
    PartIntact(PartId),

    #[error("Body part {0} has no prosthetic installed")]
    NoProsthetic(PartId),

    #[error("{slot:?} slot is disabled while {part} is destroyed")]
    SlotDisabled { slot: EquipSlot, part: PartId },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LimbError>;
