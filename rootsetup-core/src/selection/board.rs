//! Map, deck and landmark draws.
use super::{StepResult, draw};
use crate::registry::ComponentRegistry;
use crate::state::{SetupError, SetupState};
use crate::step::{FlowState, SetupStep};
use rand::Rng;

/// Draw the map and decide whether its printed landmark needs setting up.
///
/// # Errors
///
/// [`SetupError::NoMap`] when no map is enabled.
pub fn choose_map<R: Rng + ?Sized>(
    flow: &mut FlowState,
    setup: &mut SetupState,
    registry: &ComponentRegistry,
    rng: &mut R,
) -> StepResult {
    let mut pool = registry.enabled_maps();
    if pool.is_empty() {
        return Err(SetupError::NoMap);
    }
    let map = draw(&mut pool, rng);
    let skip_map_landmark = !setup.use_map_landmark || map.landmark.is_none();
    setup.set_map(map);
    flow.skip_steps(&[SetupStep::SetUpMapLandmark], skip_map_landmark);
    Ok(())
}

/// Draw one of several enabled decks.
///
/// # Errors
///
/// [`SetupError::NoDeck`] when no deck is enabled.
pub fn choose_deck<R: Rng + ?Sized>(
    setup: &mut SetupState,
    registry: &ComponentRegistry,
    rng: &mut R,
) -> StepResult {
    let mut pool = registry.enabled_decks();
    if pool.is_empty() {
        return Err(SetupError::NoDeck);
    }
    setup.set_deck(draw(&mut pool, rng));
    Ok(())
}

/// Draw `landmark_count` distinct landmarks and unskip their setup steps.
///
/// The map's own landmark is left out of the pool while it is in use.
///
/// # Errors
///
/// [`SetupError::NoLandmark`] when the pool is empty but landmarks were
/// requested, [`SetupError::TooFewLandmark`] when it is merely too small.
pub fn choose_landmarks<R: Rng + ?Sized>(
    flow: &mut FlowState,
    setup: &mut SetupState,
    registry: &ComponentRegistry,
    rng: &mut R,
) -> StepResult {
    let count = usize::from(setup.landmark_count);
    let mut pool: Vec<_> = registry
        .enabled_landmarks()
        .into_iter()
        .filter(|landmark| !setup.is_map_landmark(&landmark.code))
        .collect();
    if pool.len() < count {
        return Err(if pool.is_empty() {
            SetupError::NoLandmark
        } else {
            SetupError::TooFewLandmark
        });
    }

    setup.landmark1 = (count >= 1).then(|| draw(&mut pool, rng));
    setup.landmark2 = (count >= 2).then(|| draw(&mut pool, rng));
    flow.skip_steps(&[SetupStep::SetUpLandmark1], count < 1);
    flow.skip_steps(&[SetupStep::SetUpLandmark2], count < 2);
    Ok(())
}
