//! Hireling draws and the faction exclusions they impose.
use super::{StepResult, draw};
use crate::constants::{HIRELING_DEMOTE_THRESHOLD, HIRELING_SLOTS};
use crate::registry::ComponentRegistry;
use crate::state::{SetupError, SetupState};
use crate::step::{FlowState, SetupStep};
use rand::Rng;

/// Whether the hireling in `slot` is dealt demoted at `player_count` seats.
#[must_use]
pub const fn is_demoted(player_count: usize, slot: u8) -> bool {
    player_count + slot as usize > HIRELING_DEMOTE_THRESHOLD
}

/// Draw three hirelings into their slots when hirelings are in use, then
/// disable every faction tied to them.
///
/// # Errors
///
/// [`SetupError::TooFewHireling`] when fewer than three hirelings are enabled.
pub fn choose_hirelings<R: Rng + ?Sized>(
    flow: &FlowState,
    setup: &mut SetupState,
    registry: &mut ComponentRegistry,
    rng: &mut R,
) -> StepResult {
    setup.clear_excluded_factions();

    if !flow.is_skipped(SetupStep::SetUpHireling1) {
        let mut pool = registry.enabled_hirelings();
        if pool.len() < usize::from(HIRELING_SLOTS) {
            return Err(SetupError::TooFewHireling);
        }
        for slot in 1..=HIRELING_SLOTS {
            let hireling = draw(&mut pool, rng);
            let demoted = is_demoted(setup.player_count, slot);
            let placed = setup.set_hireling(slot, hireling, demoted);
            debug_assert!(placed.is_ok(), "hireling slots are always in range");
        }
    }

    for code in &setup.excluded_factions {
        registry.toggle_faction(code, false);
    }
    Ok(())
}
