//! The single "advance setup" entry point.
use crate::registry::ComponentRegistry;
use crate::rng::RandomSource;
use crate::selection::{
    advance_player, build_faction_pool, choose_deck, choose_hirelings, choose_landmarks,
    choose_map, prepare_expansions, seat_players, select_faction,
};
use crate::state::{SetupError, SetupState};
use crate::step::{FlowState, SetupStep};
use serde::{Deserialize, Serialize};

/// What one call to [`next_step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepReport {
    /// Step whose logic ran.
    pub step: SetupStep,
    /// Validation error that blocked the step, if any.
    pub error: Option<SetupError>,
    /// Whether the flow moved on by normal advancement.
    pub advanced: bool,
    /// Step the flow is at afterwards.
    pub current: SetupStep,
}

/// Run the logic of the current step once and advance when it allows.
///
/// Safe to call repeatedly on a blocked step: the same validation runs again
/// against whatever inputs have changed since.
pub fn next_step<Rs>(
    flow: &mut FlowState,
    setup: &mut SetupState,
    registry: &mut ComponentRegistry,
    random: &mut Rs,
) -> StepReport
where
    Rs: RandomSource + ?Sized,
{
    let step = flow.current_step();
    log::debug!("running setup step {}", step.key());

    let mut advance = !step.is_terminal();
    let outcome = match step {
        SetupStep::ChooseExpansions => {
            prepare_expansions(flow, setup, registry);
            Ok(())
        }
        SetupStep::ChooseMap => choose_map(flow, setup, registry, random.component_rng()),
        SetupStep::ChooseDeck => choose_deck(setup, registry, random.component_rng()),
        SetupStep::ChooseLandmarks => {
            choose_landmarks(flow, setup, registry, random.component_rng())
        }
        SetupStep::ChooseHirelings => {
            choose_hirelings(flow, setup, registry, random.component_rng())
        }
        SetupStep::SeatPlayers => {
            seat_players(setup, registry, random.seating_rng());
            Ok(())
        }
        SetupStep::ChooseFactions => build_faction_pool(setup, registry, random.component_rng()),
        SetupStep::SelectFaction => select_faction(setup),
        SetupStep::SetUpFaction => {
            advance = advance_player(flow, setup);
            Ok(())
        }
        SetupStep::SetUpLandmark1
        | SetupStep::SetUpLandmark2
        | SetupStep::SetUpMapLandmark
        | SetupStep::SetUpHireling1
        | SetupStep::SetUpHireling2
        | SetupStep::SetUpHireling3
        | SetupStep::PostHirelingSetup
        | SetupStep::SetupEnd => Ok(()),
    };

    let error = outcome.err();
    if let Some(err) = error {
        log::debug!("step {} blocked: {}", step.key(), err.key());
        advance = false;
    }
    if setup.error_message != error {
        setup.set_error_message(error);
    }
    if advance {
        flow.increment_step();
        if flow.current_step().is_terminal() {
            log::info!("setup complete");
        }
    }

    StepReport {
        step,
        error,
        advanced: advance,
        current: flow.current_step(),
    }
}
