//! Faction pool assembly and the per-player pick loop.
use super::{StepResult, draw};
use crate::registry::ComponentRegistry;
use crate::state::{SetupError, SetupState};
use crate::step::{FlowState, SetupStep};
use rand::Rng;

/// Fill the faction pool with `player_count + 1` factions, at least one of
/// them militant, and start the pick loop at the last seat.
///
/// Factions excluded by a drawn hireling never enter the pool.
///
/// # Errors
///
/// [`SetupError::NoMilitantFaction`] when no militant faction is available,
/// [`SetupError::TooFewFaction`] when the available factions cannot fill
/// the pool.
pub fn build_faction_pool<R: Rng + ?Sized>(
    setup: &mut SetupState,
    registry: &ComponentRegistry,
    rng: &mut R,
) -> StepResult {
    setup.clear_faction_pool();

    let available = |militant: bool| {
        let factions = if militant {
            registry.militant_factions()
        } else {
            registry.insurgent_factions()
        };
        factions
            .into_iter()
            .filter(|faction| !setup.excluded_factions.contains(&faction.code))
            .collect::<Vec<_>>()
    };
    let mut militant = available(true);
    let insurgent = available(false);

    let player_count = setup.player_count;
    if militant.is_empty() {
        return Err(SetupError::NoMilitantFaction);
    }
    if militant.len() + insurgent.len() < player_count + 1 {
        return Err(SetupError::TooFewFaction);
    }

    let anchor = draw(&mut militant, rng);
    let added = setup.add_to_faction_pool(anchor);
    debug_assert!(added.is_ok());

    let mut combined = militant;
    combined.extend(insurgent);
    for _ in 0..player_count {
        let faction = draw(&mut combined, rng);
        let added = setup.add_to_faction_pool(faction);
        debug_assert!(added.is_ok());
    }

    let started = setup.set_current_player_index(player_count - 1);
    debug_assert!(started.is_ok());
    Ok(())
}

/// Confirm the faction at `current_faction_index` for the current player.
///
/// # Errors
///
/// [`SetupError::NoFaction`] when nothing valid is selected,
/// [`SetupError::LockedFaction`] when the selection is the locked last entry.
pub fn select_faction(setup: &mut SetupState) -> StepResult {
    let Some(index) = setup.current_faction_index else {
        return Err(SetupError::NoFaction);
    };
    if setup.is_locked_index(index) {
        return Err(SetupError::LockedFaction);
    }
    setup
        .apply_current_faction_index()
        .map_err(|_| SetupError::NoFaction)
}

/// Move to the previous seat. Returns `true` once every seat has picked and
/// the flow should advance normally; otherwise the flow is sent back to
/// [`SetupStep::SelectFaction`].
pub fn advance_player(flow: &mut FlowState, setup: &mut SetupState) -> bool {
    match setup.current_player_index.checked_sub(1) {
        Some(previous) => {
            setup.current_player_index = previous;
            flow.set_step(SetupStep::SelectFaction);
            false
        }
        None => true,
    }
}
