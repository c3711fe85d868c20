//! Per-character body part bookkeeping
//!
//! Damage is spread over parts of a randomly chosen hit location. Parts that
//! reach zero under the normal rule are destroyed, penalise a stat, drop
//! their equipment and take their children with them.

pub mod cascade;
pub mod damage;
pub mod prosthetics;
pub mod recovery;
pub mod state;
pub mod store;

pub use cascade::{destroy_part, DestructionCause, DestructionEvent};
pub use damage::{apply_damage, distribute_damage, DamageReport};
pub use prosthetics::{install_prosthetic, remove_prosthetic};
pub use recovery::{heal, restore_all, HealReport};
pub use state::{Body, BodyPartState, Prosthetic};
pub use store::{BodyStore, PartStatus};
