//! Prosthetic install and removal

use crate::anatomy::Anatomy;
use crate::body::cascade::{destroy_part, DestructionCause, DestructionEvent};
use crate::body::state::{Body, Prosthetic};
use crate::core::error::{LimbError, Result};
use crate::core::types::PartId;
use crate::entity::character::Character;

/// Fit a prosthetic onto a destroyed part, bringing it back to full health
pub fn install_prosthetic(
    body: &mut Body,
    anatomy: &Anatomy,
    part: &PartId,
    prosthetic: Prosthetic,
) -> Result<()> {
    let template = anatomy
        .part(part)
        .ok_or_else(|| LimbError::UnknownPart(part.clone()))?;
    let state = body
        .part_mut(part)
        .ok_or_else(|| LimbError::UnknownPart(part.clone()))?;
    if !state.destroyed {
        return Err(LimbError::PartIntact(part.clone()));
    }

    tracing::info!(part = %part, prosthetic = %prosthetic.name, "Installing prosthetic");

    state.destroyed = false;
    state.current_health = state.max_health;
    state.prosthetic = Some(prosthetic);
    let lifted = state.penalty_applied;
    state.penalty_applied = false;
    if lifted {
        if let Some(p) = template.penalty {
            body.add_modifier(p.stat, -p.amount);
        }
    }
    Ok(())
}

/// Take a prosthetic off; the part is destroyed again
pub fn remove_prosthetic(
    body: &mut Body,
    anatomy: &Anatomy,
    character: &mut Character,
    part: &PartId,
    locale: &str,
) -> Result<(Prosthetic, Vec<DestructionEvent>)> {
    let state = body
        .part_mut(part)
        .ok_or_else(|| LimbError::UnknownPart(part.clone()))?;
    let prosthetic = state
        .prosthetic
        .take()
        .ok_or_else(|| LimbError::NoProsthetic(part.clone()))?;

    tracing::info!(part = %part, prosthetic = %prosthetic.name, "Removing prosthetic");

    let events = destroy_part(
        body,
        anatomy,
        character,
        part,
        DestructionCause::ProstheticRemoved,
        locale,
    );
    Ok((prosthetic, events))
}
