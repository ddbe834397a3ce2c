//! Root Setup Engine
//!
//! Platform-agnostic core of the setup wizard for the Root board game.
//! Given the enabled expansions it draws the map, deck, landmarks, hirelings
//! and faction pool, seats the players and walks them through their faction
//! picks. UI and storage concerns are left to the embedding application.

pub mod catalog;
pub mod components;
pub mod constants;
pub mod draw;
pub mod options;
pub mod orchestrator;
pub mod registry;
pub mod rng;
pub mod selection;
pub mod session;
pub mod state;
pub mod step;

// Re-export commonly used types
pub use catalog::{CatalogError, ExpansionCatalog, ExpansionDefinition};
pub use components::{
    Component, Deck, Faction, FactionCodes, Hireling, HirelingEntry, HirelingPair, Landmark,
    MapComponent,
};
pub use draw::{DrawError, take_random};
pub use options::SetupOptions;
pub use orchestrator::{StepReport, next_step};
pub use registry::{ComponentRegistry, ComponentStore};
pub use rng::{CountingRng, RandomSource, RngBundle, SingleStream};
pub use session::{SetupSession, SetupSnapshot};
pub use state::{Rejection, SetterResult, SetupError, SetupState};
pub use step::{FlowState, SetupStep};

/// Trait for abstracting where the expansion catalog comes from
/// Platform-specific implementations should provide this
pub trait CatalogLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the expansion catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read or parsed.
    fn load_catalog(&self) -> Result<ExpansionCatalog, Self::Error>;
}

/// Loader serving the catalog compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCatalogLoader;

impl CatalogLoader for StaticCatalogLoader {
    type Error = CatalogError;

    fn load_catalog(&self) -> Result<ExpansionCatalog, Self::Error> {
        ExpansionCatalog::load_from_static()
    }
}

/// Trait for abstracting save/load of setup runs
/// Platform-specific implementations should provide this
pub trait SetupStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Save a setup snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be saved.
    fn save_setup(&self, save_name: &str, snapshot: &SetupSnapshot) -> Result<(), Self::Error>;

    /// Load a setup snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be loaded.
    fn load_setup(&self, save_name: &str) -> Result<Option<SetupSnapshot>, Self::Error>;

    /// Delete a saved setup
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    fn delete_setup(&self, save_name: &str) -> Result<(), Self::Error>;
}

/// Entry point tying a catalog source to a save backend
pub struct SetupEngine<L, S>
where
    L: CatalogLoader,
    S: SetupStorage,
{
    catalog_loader: L,
    storage: S,
}

impl<L, S> SetupEngine<L, S>
where
    L: CatalogLoader,
    S: SetupStorage,
{
    pub const fn new(catalog_loader: L, storage: S) -> Self {
        Self {
            catalog_loader,
            storage,
        }
    }

    /// Load the catalog from the configured source.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    pub fn catalog(&self) -> Result<ExpansionCatalog, L::Error> {
        self.catalog_loader.load_catalog()
    }

    /// Start a setup run with the given options and seed.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or names an
    /// expansion it does not define.
    pub fn create_session(
        &self,
        options: &SetupOptions,
        seed: u64,
    ) -> Result<SetupSession, anyhow::Error>
    where
        L::Error: Into<anyhow::Error>,
    {
        let catalog = self.catalog().map_err(Into::into)?;
        Ok(SetupSession::from_options(&catalog, options, seed)?)
    }

    /// Save a setup run
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be saved.
    pub fn save_setup(&self, save_name: &str, snapshot: &SetupSnapshot) -> Result<(), S::Error> {
        self.storage.save_setup(save_name, snapshot)
    }

    /// Resume a saved setup run
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be loaded or holds setup
    /// values that would have been rejected.
    pub fn load_session(&self, save_name: &str) -> Result<Option<SetupSession>, anyhow::Error>
    where
        S::Error: Into<anyhow::Error>,
    {
        let snapshot = self.storage.load_setup(save_name).map_err(Into::into)?;
        Ok(snapshot.map(SetupSession::from_snapshot).transpose()?)
    }

    /// Delete a saved setup run
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    pub fn delete_setup(&self, save_name: &str) -> Result<(), S::Error> {
        self.storage.delete_setup(save_name)
    }
}
