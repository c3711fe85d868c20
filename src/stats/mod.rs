//! Derived character stats

pub mod pipeline;

pub use pipeline::{
    BodyPenalties, EquipmentBonuses, ProstheticBonuses, StatContext, StatModifier, StatPipeline,
};
