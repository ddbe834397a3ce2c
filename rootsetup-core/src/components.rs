//! Selectable expansion components as held by the registry.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Faction codes tied to a hireling; almost always one or two.
pub type FactionCodes = SmallVec<[String; 2]>;

/// Common surface shared by every selectable component kind.
pub trait Component {
    fn code(&self) -> &str;
    fn expansion_code(&self) -> &str;
    fn enabled(&self) -> bool;
    fn set_enabled(&mut self, enabled: bool);
}

macro_rules! impl_component {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Component for $ty {
                fn code(&self) -> &str {
                    &self.code
                }

                fn expansion_code(&self) -> &str {
                    &self.expansion_code
                }

                fn enabled(&self) -> bool {
                    self.enabled
                }

                fn set_enabled(&mut self, enabled: bool) {
                    self.enabled = enabled;
                }
            }
        )+
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faction {
    pub code: String,
    pub expansion_code: String,
    pub enabled: bool,
    pub name: String,
    pub militant: bool,
    #[serde(default)]
    pub vagabond: bool,
}

/// One face of a hireling card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hireling {
    pub name: String,
}

/// A two-sided hireling card and the factions it excludes from play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HirelingPair {
    pub code: String,
    pub expansion_code: String,
    pub enabled: bool,
    #[serde(default)]
    pub factions: FactionCodes,
    pub promoted: Hireling,
    pub demoted: Hireling,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Landmark {
    pub code: String,
    pub expansion_code: String,
    pub enabled: bool,
    pub name: String,
    pub min_players: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapComponent {
    pub code: String,
    pub expansion_code: String,
    pub enabled: bool,
    pub name: String,
    /// Landmark printed on the map, if any.
    #[serde(default)]
    pub landmark: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub code: String,
    pub expansion_code: String,
    pub enabled: bool,
    pub name: String,
}

impl_component!(Faction, HirelingPair, Landmark, MapComponent, Deck);

/// A hireling placed in one of the three hireling slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HirelingEntry {
    pub hireling: HirelingPair,
    pub demoted: bool,
}

impl HirelingEntry {
    /// Name of the face that is up for this entry.
    #[must_use]
    pub fn face_name(&self) -> &str {
        if self.demoted {
            &self.hireling.demoted.name
        } else {
            &self.hireling.promoted.name
        }
    }
}
