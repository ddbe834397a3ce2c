//! Expansion definitions the component registry is populated from.
use crate::components::{FactionCodes, Hireling};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

const DEFAULT_CATALOG_DATA: &str = include_str!("../assets/expansions.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog JSON is invalid: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown expansion code \"{0}\"")]
    UnknownExpansion(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionDef {
    pub name: String,
    pub militant: bool,
    #[serde(default)]
    pub vagabond: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HirelingDef {
    #[serde(default)]
    pub factions: FactionCodes,
    pub promoted: Hireling,
    pub demoted: Hireling,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandmarkDef {
    pub name: String,
    #[serde(default = "default_min_players")]
    pub min_players: u8,
}

fn default_min_players() -> u8 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDef {
    pub name: String,
    #[serde(default)]
    pub landmark: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckDef {
    pub name: String,
}

/// Everything one expansion contributes, keyed by component code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ExpansionDefinition {
    pub name: String,
    /// Enabled by default when no expansion list is given.
    #[serde(default)]
    pub base: bool,
    #[serde(default)]
    pub factions: BTreeMap<String, FactionDef>,
    #[serde(default)]
    pub hirelings: BTreeMap<String, HirelingDef>,
    #[serde(default)]
    pub landmarks: BTreeMap<String, LandmarkDef>,
    #[serde(default)]
    pub maps: BTreeMap<String, MapDef>,
    #[serde(default)]
    pub decks: BTreeMap<String, DeckDef>,
}

/// All known expansions keyed by expansion code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ExpansionCatalog {
    expansions: BTreeMap<String, ExpansionDefinition>,
}

impl ExpansionCatalog {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a catalog from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into expansion definitions.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a catalog from pre-parsed definitions.
    #[must_use]
    pub fn from_expansions(expansions: BTreeMap<String, ExpansionDefinition>) -> Self {
        Self { expansions }
    }

    /// The catalog bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled JSON is malformed.
    pub fn load_from_static() -> Result<Self, CatalogError> {
        Self::from_json(DEFAULT_CATALOG_DATA)
    }

    #[must_use]
    pub fn get(&self, code: &str) -> Option<&ExpansionDefinition> {
        self.expansions.get(code)
    }

    pub fn insert(&mut self, code: impl Into<String>, definition: ExpansionDefinition) {
        self.expansions.insert(code.into(), definition);
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.expansions.keys().map(String::as_str)
    }

    /// Codes of expansions flagged as part of the base game.
    #[must_use]
    pub fn base_codes(&self) -> Vec<String> {
        self.expansions
            .iter()
            .filter(|(_, def)| def.base)
            .map(|(code, _)| code.clone())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.expansions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expansions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_parses() {
        let catalog = ExpansionCatalog::load_from_static().unwrap();
        assert!(!catalog.is_empty());
        assert_eq!(catalog.base_codes(), vec!["base".to_string()]);
        let base = catalog.get("base").unwrap();
        assert!(base.factions.values().any(|f| f.militant));
        assert!(base.factions.values().any(|f| !f.militant));
        assert_eq!(base.decks.len(), 1);
    }

    #[test]
    fn bundled_map_landmarks_exist_in_catalog() {
        let catalog = ExpansionCatalog::load_from_static().unwrap();
        let landmark_codes: Vec<&String> = catalog
            .codes()
            .filter_map(|code| catalog.get(code))
            .flat_map(|def| def.landmarks.keys())
            .collect();
        for code in catalog.codes() {
            for map in catalog.get(code).unwrap().maps.values() {
                if let Some(landmark) = &map.landmark {
                    assert!(landmark_codes.contains(&landmark), "{landmark} missing");
                }
            }
        }
    }

    #[test]
    fn definitions_fill_defaults() {
        let json = r#"{
            "mini": {
                "name": "Mini",
                "landmarks": { "well": { "name": "Well" } },
                "hirelings": {
                    "crew": {
                        "promoted": { "name": "Crew" },
                        "demoted": { "name": "Small Crew" }
                    }
                }
            }
        }"#;
        let catalog = ExpansionCatalog::from_json(json).unwrap();
        let mini = catalog.get("mini").unwrap();
        assert!(!mini.base);
        assert_eq!(mini.landmarks["well"].min_players, 1);
        assert!(mini.hirelings["crew"].factions.is_empty());
        assert!(mini.factions.is_empty());
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = ExpansionCatalog::from_json("{\"x\": 3}").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
