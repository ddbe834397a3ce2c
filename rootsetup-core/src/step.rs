//! Setup step enumeration and the flow state machine driving it.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One stage of the linear setup wizard, in fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SetupStep {
    ChooseExpansions,
    ChooseMap,
    ChooseDeck,
    ChooseLandmarks,
    SetUpLandmark1,
    SetUpLandmark2,
    SetUpMapLandmark,
    ChooseHirelings,
    SetUpHireling1,
    SetUpHireling2,
    SetUpHireling3,
    PostHirelingSetup,
    SeatPlayers,
    ChooseFactions,
    SelectFaction,
    SetUpFaction,
    SetupEnd,
}

impl SetupStep {
    pub const ALL: [Self; 17] = [
        Self::ChooseExpansions,
        Self::ChooseMap,
        Self::ChooseDeck,
        Self::ChooseLandmarks,
        Self::SetUpLandmark1,
        Self::SetUpLandmark2,
        Self::SetUpMapLandmark,
        Self::ChooseHirelings,
        Self::SetUpHireling1,
        Self::SetUpHireling2,
        Self::SetUpHireling3,
        Self::PostHirelingSetup,
        Self::SeatPlayers,
        Self::ChooseFactions,
        Self::SelectFaction,
        Self::SetUpFaction,
        Self::SetupEnd,
    ];

    /// Steps preparing the randomly drawn landmarks.
    pub const LANDMARK_STEPS: [Self; 3] =
        [Self::ChooseLandmarks, Self::SetUpLandmark1, Self::SetUpLandmark2];

    /// Steps setting up each drawn hireling, not including the entry step.
    pub const HIRELING_SETUP_STEPS: [Self; 4] = [
        Self::SetUpHireling1,
        Self::SetUpHireling2,
        Self::SetUpHireling3,
        Self::PostHirelingSetup,
    ];

    /// Position of the step in the wizard order.
    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|step| *step == self)
            .unwrap_or(Self::ALL.len() - 1)
    }

    /// The directly following step, ignoring skip flags.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::SetupEnd)
    }

    /// Stable camelCase key used by UIs and reports.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::ChooseExpansions => "chooseExpansions",
            Self::ChooseMap => "chooseMap",
            Self::ChooseDeck => "chooseDeck",
            Self::ChooseLandmarks => "chooseLandmarks",
            Self::SetUpLandmark1 => "setUpLandmark1",
            Self::SetUpLandmark2 => "setUpLandmark2",
            Self::SetUpMapLandmark => "setUpMapLandmark",
            Self::ChooseHirelings => "chooseHirelings",
            Self::SetUpHireling1 => "setUpHireling1",
            Self::SetUpHireling2 => "setUpHireling2",
            Self::SetUpHireling3 => "setUpHireling3",
            Self::PostHirelingSetup => "postHirelingSetup",
            Self::SeatPlayers => "seatPlayers",
            Self::ChooseFactions => "chooseFactions",
            Self::SelectFaction => "selectFaction",
            Self::SetUpFaction => "setUpFaction",
            Self::SetupEnd => "setupEnd",
        }
    }
}

/// Current position in the wizard plus per-step skip flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowState {
    pub current_step: SetupStep,
    pub skipped_steps: BTreeMap<SetupStep, bool>,
}

impl Default for FlowState {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            current_step: SetupStep::ChooseExpansions,
            skipped_steps: SetupStep::ALL.iter().map(|step| (*step, false)).collect(),
        }
    }

    #[must_use]
    pub const fn current_step(&self) -> SetupStep {
        self.current_step
    }

    #[must_use]
    pub fn is_skipped(&self, step: SetupStep) -> bool {
        self.skipped_steps.get(&step).copied().unwrap_or(false)
    }

    /// Set the skip flag of every listed step. `SetupEnd` can never be skipped.
    pub fn skip_steps(&mut self, steps: &[SetupStep], skip: bool) {
        for step in steps {
            if step.is_terminal() && skip {
                log::warn!("ignoring request to skip the final setup step");
                continue;
            }
            self.skipped_steps.insert(*step, skip);
        }
    }

    /// Jump directly to `step`.
    pub fn set_step(&mut self, step: SetupStep) {
        self.current_step = step;
    }

    /// Move to the next step in order whose skip flag is clear.
    /// Advancing from `SetupEnd` is a no-op.
    pub fn increment_step(&mut self) {
        let mut candidate = self.current_step;
        while let Some(next) = candidate.next() {
            candidate = next;
            if next.is_terminal() || !self.is_skipped(next) {
                break;
            }
        }
        self.current_step = candidate;
    }

    /// Return to the first step with every skip flag cleared.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_flow_starts_at_expansions_with_nothing_skipped() {
        let flow = FlowState::new();
        assert_eq!(flow.current_step(), SetupStep::ChooseExpansions);
        assert!(SetupStep::ALL.iter().all(|step| !flow.is_skipped(*step)));
    }

    #[test]
    fn increment_walks_every_step_in_order() {
        let mut flow = FlowState::new();
        for expected in SetupStep::ALL.iter().skip(1) {
            flow.increment_step();
            assert_eq!(flow.current_step(), *expected);
        }
        flow.increment_step();
        assert_eq!(flow.current_step(), SetupStep::SetupEnd);
    }

    #[test]
    fn increment_skips_flagged_steps() {
        let mut flow = FlowState::new();
        flow.skip_steps(&[SetupStep::ChooseMap, SetupStep::ChooseDeck], true);
        flow.increment_step();
        assert_eq!(flow.current_step(), SetupStep::ChooseLandmarks);

        flow.skip_steps(&[SetupStep::ChooseDeck], false);
        flow.set_step(SetupStep::ChooseExpansions);
        flow.increment_step();
        assert_eq!(flow.current_step(), SetupStep::ChooseDeck);
    }

    #[test]
    fn increment_lands_on_end_when_everything_after_is_skipped() {
        let mut flow = FlowState::new();
        let rest: Vec<SetupStep> = SetupStep::ALL[1..16].to_vec();
        flow.skip_steps(&rest, true);
        flow.increment_step();
        assert_eq!(flow.current_step(), SetupStep::SetupEnd);
    }

    #[test]
    fn setup_end_cannot_be_skipped() {
        let mut flow = FlowState::new();
        flow.skip_steps(&[SetupStep::SetupEnd], true);
        assert!(!flow.is_skipped(SetupStep::SetupEnd));
    }

    #[test]
    fn step_keys_serialize_as_camel_case() {
        let json = serde_json::to_string(&SetupStep::SetUpHireling2).unwrap();
        assert_eq!(json, format!("\"{}\"", SetupStep::SetUpHireling2.key()));
        let flow = FlowState::new();
        let restored: FlowState =
            serde_json::from_str(&serde_json::to_string(&flow).unwrap()).unwrap();
        assert_eq!(restored, flow);
    }
}
