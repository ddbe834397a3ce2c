//! Components contributed by the enabled expansions, with per-component
//! enablement and the pool views the setup steps draw from.
use crate::catalog::{CatalogError, ExpansionCatalog};
use crate::components::{Component, Deck, Faction, HirelingPair, Landmark, MapComponent};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Components of one kind keyed by their unique code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentStore<T> {
    items: BTreeMap<String, T>,
}

impl<T> Default for ComponentStore<T> {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }
}

impl<T: Component + Clone> ComponentStore<T> {
    /// Add `item` unless its code is already taken. Returns whether it was added.
    pub fn insert(&mut self, item: T) -> bool {
        if self.items.contains_key(item.code()) {
            log::warn!(
                "while enabling expansion \"{}\", component with duplicate code \"{}\" not added",
                item.expansion_code(),
                item.code()
            );
            return false;
        }
        self.items.insert(item.code().to_string(), item);
        true
    }

    /// Drop every component contributed by `expansion_code`.
    pub fn remove_expansion(&mut self, expansion_code: &str) {
        self.items
            .retain(|_, item| item.expansion_code() != expansion_code);
    }

    /// Set the enabled flag of one component. Returns false for unknown codes.
    pub fn set_enabled(&mut self, code: &str, enabled: bool) -> bool {
        match self.items.get_mut(code) {
            Some(item) => {
                item.set_enabled(enabled);
                true
            }
            None => {
                log::debug!("cannot toggle unknown component \"{code}\"");
                false
            }
        }
    }

    #[must_use]
    pub fn get(&self, code: &str) -> Option<&T> {
        self.items.get(code)
    }

    /// Every available component, enabled or not.
    #[must_use]
    pub fn all(&self) -> Vec<T> {
        self.items.values().cloned().collect()
    }

    /// Components currently enabled.
    #[must_use]
    pub fn enabled(&self) -> Vec<T> {
        self.filtered(|_| true)
    }

    /// Enabled components matching `predicate`.
    #[must_use]
    pub fn filtered(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.items
            .values()
            .filter(|item| item.enabled() && predicate(item))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Every component available from the enabled expansions.
///
/// Views are rebuilt on each call so they always reflect the current
/// enable/disable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRegistry {
    expansions: Vec<String>,
    factions: ComponentStore<Faction>,
    hirelings: ComponentStore<HirelingPair>,
    landmarks: ComponentStore<Landmark>,
    maps: ComponentStore<MapComponent>,
    decks: ComponentStore<Deck>,
}

impl ComponentRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with each of `codes` enabled in order.
    ///
    /// # Errors
    ///
    /// Returns an error if any code is missing from `catalog`.
    pub fn with_expansions<S: AsRef<str>>(
        catalog: &ExpansionCatalog,
        codes: &[S],
    ) -> Result<Self, CatalogError> {
        let mut registry = Self::new();
        for code in codes {
            registry.enable_expansion(catalog, code.as_ref())?;
        }
        Ok(registry)
    }

    /// Codes of the enabled expansions, in the order they were enabled.
    #[must_use]
    pub fn expansions(&self) -> &[String] {
        &self.expansions
    }

    #[must_use]
    pub fn is_expansion_enabled(&self, code: &str) -> bool {
        self.expansions.iter().any(|enabled| enabled == code)
    }

    /// Add every component of expansion `code`, each starting enabled.
    /// Components whose code is already present are logged and dropped.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownExpansion`] when `code` is not in `catalog`.
    pub fn enable_expansion(
        &mut self,
        catalog: &ExpansionCatalog,
        code: &str,
    ) -> Result<(), CatalogError> {
        let definition = catalog
            .get(code)
            .ok_or_else(|| CatalogError::UnknownExpansion(code.to_string()))?;
        if self.is_expansion_enabled(code) {
            log::warn!("expansion \"{code}\" is already enabled");
            return Ok(());
        }
        self.expansions.push(code.to_string());

        for (faction_code, def) in &definition.factions {
            self.factions.insert(Faction {
                code: faction_code.clone(),
                expansion_code: code.to_string(),
                enabled: true,
                name: def.name.clone(),
                militant: def.militant,
                vagabond: def.vagabond,
            });
        }
        for (hireling_code, def) in &definition.hirelings {
            self.hirelings.insert(HirelingPair {
                code: hireling_code.clone(),
                expansion_code: code.to_string(),
                enabled: true,
                factions: def.factions.clone(),
                promoted: def.promoted.clone(),
                demoted: def.demoted.clone(),
            });
        }
        for (landmark_code, def) in &definition.landmarks {
            self.landmarks.insert(Landmark {
                code: landmark_code.clone(),
                expansion_code: code.to_string(),
                enabled: true,
                name: def.name.clone(),
                min_players: def.min_players,
            });
        }
        for (map_code, def) in &definition.maps {
            self.maps.insert(MapComponent {
                code: map_code.clone(),
                expansion_code: code.to_string(),
                enabled: true,
                name: def.name.clone(),
                landmark: def.landmark.clone(),
            });
        }
        for (deck_code, def) in &definition.decks {
            self.decks.insert(Deck {
                code: deck_code.clone(),
                expansion_code: code.to_string(),
                enabled: true,
                name: def.name.clone(),
            });
        }
        log::debug!("enabled expansion \"{code}\"");
        Ok(())
    }

    /// Remove exactly the components expansion `code` added.
    pub fn disable_expansion(&mut self, code: &str) {
        self.expansions.retain(|enabled| enabled != code);
        self.factions.remove_expansion(code);
        self.hirelings.remove_expansion(code);
        self.landmarks.remove_expansion(code);
        self.maps.remove_expansion(code);
        self.decks.remove_expansion(code);
    }

    pub fn toggle_faction(&mut self, code: &str, enabled: bool) -> bool {
        self.factions.set_enabled(code, enabled)
    }

    pub fn toggle_hireling(&mut self, code: &str, enabled: bool) -> bool {
        self.hirelings.set_enabled(code, enabled)
    }

    pub fn toggle_landmark(&mut self, code: &str, enabled: bool) -> bool {
        self.landmarks.set_enabled(code, enabled)
    }

    pub fn toggle_map(&mut self, code: &str, enabled: bool) -> bool {
        self.maps.set_enabled(code, enabled)
    }

    pub fn toggle_deck(&mut self, code: &str, enabled: bool) -> bool {
        self.decks.set_enabled(code, enabled)
    }

    #[must_use]
    pub const fn factions(&self) -> &ComponentStore<Faction> {
        &self.factions
    }

    #[must_use]
    pub const fn hirelings(&self) -> &ComponentStore<HirelingPair> {
        &self.hirelings
    }

    #[must_use]
    pub const fn landmarks(&self) -> &ComponentStore<Landmark> {
        &self.landmarks
    }

    #[must_use]
    pub const fn maps(&self) -> &ComponentStore<MapComponent> {
        &self.maps
    }

    #[must_use]
    pub const fn decks(&self) -> &ComponentStore<Deck> {
        &self.decks
    }

    #[must_use]
    pub fn faction_array(&self) -> Vec<Faction> {
        self.factions.all()
    }

    #[must_use]
    pub fn enabled_factions(&self) -> Vec<Faction> {
        self.factions.enabled()
    }

    /// Enabled factions counting toward the one-militant minimum.
    #[must_use]
    pub fn militant_factions(&self) -> Vec<Faction> {
        self.factions.filtered(|faction| faction.militant)
    }

    /// Enabled non-militant factions.
    #[must_use]
    pub fn insurgent_factions(&self) -> Vec<Faction> {
        self.factions.filtered(|faction| !faction.militant)
    }

    #[must_use]
    pub fn hireling_array(&self) -> Vec<HirelingPair> {
        self.hirelings.all()
    }

    #[must_use]
    pub fn enabled_hirelings(&self) -> Vec<HirelingPair> {
        self.hirelings.enabled()
    }

    #[must_use]
    pub fn landmark_array(&self) -> Vec<Landmark> {
        self.landmarks.all()
    }

    #[must_use]
    pub fn enabled_landmarks(&self) -> Vec<Landmark> {
        self.landmarks.enabled()
    }

    #[must_use]
    pub fn map_array(&self) -> Vec<MapComponent> {
        self.maps.all()
    }

    #[must_use]
    pub fn enabled_maps(&self) -> Vec<MapComponent> {
        self.maps.enabled()
    }

    #[must_use]
    pub fn deck_array(&self) -> Vec<Deck> {
        self.decks.all()
    }

    #[must_use]
    pub fn enabled_decks(&self) -> Vec<Deck> {
        self.decks.enabled()
    }
}
