//! Housekeeping run when the player leaves expansion selection.
use crate::registry::ComponentRegistry;
use crate::state::SetupState;
use crate::step::{FlowState, SetupStep};

/// Reconcile flow and state with the expansions that ended up enabled.
///
/// A lone deck is assigned directly and its choice step skipped. A stale
/// player count is clamped so one faction always remains in the pool. The
/// landmark steps and the hireling chain are skipped when nothing of that
/// kind is enabled. Never fails.
pub fn prepare_expansions(
    flow: &mut FlowState,
    setup: &mut SetupState,
    registry: &ComponentRegistry,
) {
    let mut decks = registry.enabled_decks();
    if decks.len() == 1
        && let Some(deck) = decks.pop()
    {
        log::debug!("auto-selecting sole deck \"{}\"", deck.code);
        setup.set_deck(deck);
        flow.skip_steps(&[SetupStep::ChooseDeck], true);
    } else {
        flow.skip_steps(&[SetupStep::ChooseDeck], false);
    }

    let max_players = registry.enabled_factions().len().saturating_sub(1);
    if setup.player_count > max_players && max_players >= 1 {
        log::debug!(
            "clamping player count {} to {max_players}",
            setup.player_count
        );
        let clamped = setup.set_player_count(max_players);
        debug_assert!(clamped.is_ok(), "clamped player count is at least 1");
    }

    let no_landmarks = registry.enabled_landmarks().is_empty();
    flow.skip_steps(&SetupStep::LANDMARK_STEPS, no_landmarks);

    if registry.enabled_hirelings().is_empty() {
        flow.skip_steps(&[SetupStep::ChooseHirelings], true);
        flow.skip_steps(&SetupStep::HIRELING_SETUP_STEPS, true);
    } else {
        flow.skip_steps(&[SetupStep::ChooseHirelings], false);
    }

    setup.clear_excluded_factions();
}
