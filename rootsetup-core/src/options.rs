//! User-facing configuration for a setup run.
use crate::catalog::ExpansionCatalog;
use crate::constants::DEFAULT_PLAYER_COUNT;
use crate::state::{Rejection, SetupState};
use crate::step::{FlowState, SetupStep};
use serde::{Deserialize, Serialize};

/// Options chosen before the wizard starts.
///
/// Every field is optional in JSON; missing fields take the defaults of a
/// fresh setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SetupOptions {
    /// Expansion codes to enable. Empty means the catalog's base expansions.
    pub expansions: Vec<String>,
    pub player_count: usize,
    pub fixed_first_player: bool,
    pub use_map_landmark: bool,
    pub landmark_count: u8,
    pub use_hirelings: bool,
}

impl Default for SetupOptions {
    fn default() -> Self {
        Self {
            expansions: Vec::new(),
            player_count: DEFAULT_PLAYER_COUNT,
            fixed_first_player: false,
            use_map_landmark: false,
            landmark_count: 0,
            use_hirelings: false,
        }
    }
}

impl SetupOptions {
    /// # Errors
    ///
    /// Returns an error if `json` is not a valid options document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Expansions to enable, falling back to the base game.
    #[must_use]
    pub fn expansions_or_base(&self, catalog: &ExpansionCatalog) -> Vec<String> {
        if self.expansions.is_empty() {
            catalog.base_codes()
        } else {
            self.expansions.clone()
        }
    }

    /// Push the options through the validated setters. Returns every
    /// rejection; rejected options leave their field at its previous value.
    pub fn apply(&self, flow: &mut FlowState, setup: &mut SetupState) -> Vec<Rejection> {
        let mut rejections = Vec::new();
        if let Err(rejection) = setup.set_player_count(self.player_count) {
            rejections.push(rejection);
        }
        if let Err(rejection) = setup.set_landmark_count(self.landmark_count) {
            rejections.push(rejection);
        }
        setup.fix_first_player(self.fixed_first_player);
        setup.enable_map_landmark(self.use_map_landmark);
        flow.skip_steps(&SetupStep::HIRELING_SETUP_STEPS, !self.use_hirelings);
        rejections
    }
}
