//! Limb Tracker - Per-limb damage, destruction cascades and prosthetics

pub mod anatomy;
pub mod body;
pub mod core;
pub mod entity;
pub mod stats;
