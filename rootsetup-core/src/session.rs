use crate::catalog::{CatalogError, ExpansionCatalog};
use crate::options::SetupOptions;
use crate::orchestrator::{StepReport, next_step};
use crate::registry::ComponentRegistry;
use crate::rng::RngBundle;
use crate::state::{Rejection, SetupState};
use crate::step::{FlowState, SetupStep};
use serde::{Deserialize, Serialize};

/// Everything a setup run persists between invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupSnapshot {
    pub seed: u64,
    pub flow: FlowState,
    pub setup: SetupState,
    pub registry: ComponentRegistry,
    /// Registry as it stood when the run left expansion selection, before
    /// hirelings and seating changed any enablement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_registry: Option<ComponentRegistry>,
}

/// High-level session wrapper binding the random streams to a setup run.
#[derive(Debug, Clone)]
pub struct SetupSession {
    rng: RngBundle,
    snapshot: SetupSnapshot,
}

impl SetupSession {
    /// Fresh run over `registry`, starting at expansion selection.
    #[must_use]
    pub fn new(seed: u64, registry: ComponentRegistry) -> Self {
        Self {
            rng: RngBundle::from_user_seed(seed),
            snapshot: SetupSnapshot {
                seed,
                flow: FlowState::new(),
                setup: SetupState::default(),
                registry,
                start_registry: None,
            },
        }
    }

    /// Build a run from options, enabling their expansions from `catalog`.
    ///
    /// Rejected option values keep their defaults and are only logged. Use
    /// [`Self::new`] followed by [`Self::apply_options`] to inspect them.
    ///
    /// # Errors
    ///
    /// Returns an error if an expansion code is not in `catalog`.
    pub fn from_options(
        catalog: &ExpansionCatalog,
        options: &SetupOptions,
        seed: u64,
    ) -> Result<Self, CatalogError> {
        let registry =
            ComponentRegistry::with_expansions(catalog, &options.expansions_or_base(catalog))?;
        let mut session = Self::new(seed, registry);
        for rejection in session.apply_options(options) {
            log::debug!("option ignored for seed {seed}: {rejection}");
        }
        Ok(session)
    }

    /// Resume a persisted run. Random streams restart from the snapshot's
    /// seed; draws made before the snapshot are not replayed.
    ///
    /// # Errors
    ///
    /// Returns the first setup field a setter would have rejected.
    pub fn from_snapshot(snapshot: SetupSnapshot) -> Result<Self, Rejection> {
        snapshot.setup.validate()?;
        Ok(Self {
            rng: RngBundle::from_user_seed(snapshot.seed),
            snapshot,
        })
    }

    /// Apply `options` to the current state, returning any rejections.
    pub fn apply_options(&mut self, options: &SetupOptions) -> Vec<Rejection> {
        options.apply(&mut self.snapshot.flow, &mut self.snapshot.setup)
    }

    /// Run the current step once.
    pub fn advance(&mut self) -> StepReport {
        if self.current_step() == SetupStep::ChooseExpansions {
            self.snapshot.start_registry = Some(self.snapshot.registry.clone());
        }
        next_step(
            &mut self.snapshot.flow,
            &mut self.snapshot.setup,
            &mut self.snapshot.registry,
            &mut self.rng,
        )
    }

    #[must_use]
    pub const fn current_step(&self) -> SetupStep {
        self.snapshot.flow.current_step()
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.current_step().is_terminal()
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.snapshot.seed
    }

    #[must_use]
    pub const fn rng(&self) -> &RngBundle {
        &self.rng
    }

    #[must_use]
    pub const fn flow(&self) -> &FlowState {
        &self.snapshot.flow
    }

    #[must_use]
    pub const fn state(&self) -> &SetupState {
        &self.snapshot.setup
    }

    pub const fn state_mut(&mut self) -> &mut SetupState {
        &mut self.snapshot.setup
    }

    /// Apply a closure to the mutable setup state.
    pub fn with_state_mut<R>(&mut self, f: impl FnOnce(&mut SetupState) -> R) -> R {
        f(&mut self.snapshot.setup)
    }

    #[must_use]
    pub const fn registry(&self) -> &ComponentRegistry {
        &self.snapshot.registry
    }

    pub const fn registry_mut(&mut self) -> &mut ComponentRegistry {
        &mut self.snapshot.registry
    }

    /// Deterministically reseed the remaining draws.
    pub fn reseed(&mut self, seed: u64) {
        self.snapshot.seed = seed;
        self.rng = RngBundle::from_user_seed(seed);
    }

    /// Go back to expansion selection for another run with the same seed.
    ///
    /// Configured options survive; every draw and pick is discarded. The
    /// registry returns to its enablement from when the run left expansion
    /// selection.
    pub fn restart(&mut self) {
        if let Some(start) = self.snapshot.start_registry.clone() {
            self.snapshot.registry = start;
        }
        let previous = &self.snapshot.setup;
        self.snapshot.setup = SetupState {
            player_count: previous.player_count,
            fixed_first_player: previous.fixed_first_player,
            use_map_landmark: previous.use_map_landmark,
            landmark_count: previous.landmark_count,
            ..SetupState::default()
        };
        self.snapshot.flow.set_step(SetupStep::ChooseExpansions);
        self.rng = RngBundle::from_user_seed(self.snapshot.seed);
    }

    #[must_use]
    pub const fn snapshot(&self) -> &SetupSnapshot {
        &self.snapshot
    }

    /// Consume the session, returning its persistable snapshot.
    #[must_use]
    pub fn into_snapshot(self) -> SetupSnapshot {
        self.snapshot
    }
}
