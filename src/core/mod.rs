pub mod config;
pub mod error;
pub mod types;

pub use config::{config, DamageConfig};
pub use error::{LimbError, Result};
pub use types::{CharacterId, EquipSlot, PartId, StatBlock, StatBonus, StatId};
