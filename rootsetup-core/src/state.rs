//! The accumulating record of every choice made during a setup run.
use crate::components::{Deck, Faction, HirelingEntry, HirelingPair, Landmark, MapComponent};
use crate::constants::{DEFAULT_PLAYER_COUNT, MAX_LANDMARK_COUNT};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Conditions that stop a step from advancing until inputs change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
#[serde(rename_all = "camelCase")]
pub enum SetupError {
    #[error("no map is enabled")]
    NoMap,
    #[error("no deck is enabled")]
    NoDeck,
    #[error("no landmark is enabled")]
    NoLandmark,
    #[error("fewer landmarks are enabled than requested")]
    TooFewLandmark,
    #[error("no militant faction is enabled")]
    NoMilitantFaction,
    #[error("not enough factions are enabled for the player count")]
    TooFewFaction,
    #[error("fewer than three hirelings are enabled")]
    TooFewHireling,
    #[error("no faction has been chosen")]
    NoFaction,
    #[error("the last faction is locked until a militant faction is chosen")]
    LockedFaction,
}

impl SetupError {
    /// Localisation key shown by UIs.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::NoMap => "error.noMap",
            Self::NoDeck => "error.noDeck",
            Self::NoLandmark => "error.noLandmark",
            Self::TooFewLandmark => "error.tooFewLandmark",
            Self::NoMilitantFaction => "error.noMilitantFaction",
            Self::TooFewFaction => "error.tooFewFaction",
            Self::TooFewHireling => "error.tooFewHireling",
            Self::NoFaction => "error.noFaction",
            Self::LockedFaction => "error.lockedFaction",
        }
    }
}

/// Reasons a direct field setter refused its input. State is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("player count must be at least 1 (got {0})")]
    PlayerCount(usize),
    #[error("first player must be between 1 and {player_count} (got {value})")]
    FirstPlayer { value: usize, player_count: usize },
    #[error("landmark count must be between 0 and 2 (got {0})")]
    LandmarkCount(u8),
    #[error("cannot set landmark {slot} when landmark count is {landmark_count}")]
    LandmarkSlotInactive { slot: u8, landmark_count: u8 },
    #[error("landmark \"{0}\" is the map landmark and the map landmark is in use")]
    MapLandmark(String),
    #[error("hireling slot must be between 1 and 3 (got {0})")]
    HirelingSlot(u8),
    #[error("faction \"{0}\" is excluded by a hireling")]
    ExcludedFaction(String),
    #[error("player index must be below {player_count} (got {value})")]
    PlayerIndex { value: usize, player_count: usize },
    #[error("faction index must be below {pool_len} (got {value})")]
    FactionIndex { value: usize, pool_len: usize },
    #[error("no faction index is selected")]
    NoFactionIndex,
    #[error("index {0} is the locked last faction")]
    LockedFaction(usize),
}

pub type SetterResult = Result<(), Rejection>;

fn reject(rejection: Rejection) -> SetterResult {
    log::warn!("rejected setup input: {rejection}");
    Err(rejection)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupState {
    pub player_count: usize,
    pub fixed_first_player: bool,
    pub player_order: Vec<usize>,
    pub error_message: Option<SetupError>,
    pub map: Option<MapComponent>,
    pub use_map_landmark: bool,
    pub deck: Option<Deck>,
    pub landmark_count: u8,
    pub landmark1: Option<Landmark>,
    pub landmark2: Option<Landmark>,
    pub hireling1: Option<HirelingEntry>,
    pub hireling2: Option<HirelingEntry>,
    pub hireling3: Option<HirelingEntry>,
    /// Faction codes tied to drawn hirelings. Not deduplicated.
    pub excluded_factions: Vec<String>,
    pub faction_pool: Vec<Faction>,
    pub last_faction_locked: bool,
    pub current_player_index: usize,
    pub current_faction_index: Option<usize>,
    pub current_faction: Option<Faction>,
}

impl Default for SetupState {
    fn default() -> Self {
        Self {
            player_count: DEFAULT_PLAYER_COUNT,
            fixed_first_player: false,
            player_order: Vec::new(),
            error_message: None,
            map: None,
            use_map_landmark: false,
            deck: None,
            landmark_count: 0,
            landmark1: None,
            landmark2: None,
            hireling1: None,
            hireling2: None,
            hireling3: None,
            excluded_factions: Vec::new(),
            faction_pool: Vec::new(),
            last_faction_locked: false,
            current_player_index: 0,
            current_faction_index: None,
            current_faction: None,
        }
    }
}

impl SetupState {
    /// # Errors
    ///
    /// Rejects counts below 1.
    pub fn set_player_count(&mut self, count: usize) -> SetterResult {
        if count < 1 {
            return reject(Rejection::PlayerCount(count));
        }
        self.player_count = count;
        Ok(())
    }

    pub fn fix_first_player(&mut self, fixed: bool) {
        self.fixed_first_player = fixed;
    }

    /// Seat players in a rotation starting from `first_player`.
    ///
    /// # Errors
    ///
    /// Rejects values outside `1..=player_count`.
    pub fn set_first_player(&mut self, first_player: usize) -> SetterResult {
        let player_count = self.player_count;
        if !(1..=player_count).contains(&first_player) {
            return reject(Rejection::FirstPlayer {
                value: first_player,
                player_count,
            });
        }
        self.player_order = (0..player_count)
            .map(|i| (first_player - 1 + i) % player_count + 1)
            .collect();
        Ok(())
    }

    pub fn set_error_message(&mut self, error: Option<SetupError>) {
        self.error_message = error;
    }

    pub fn enable_map_landmark(&mut self, enabled: bool) {
        self.use_map_landmark = enabled;
    }

    pub fn set_map(&mut self, map: MapComponent) {
        self.map = Some(map);
    }

    pub fn set_deck(&mut self, deck: Deck) {
        self.deck = Some(deck);
    }

    /// # Errors
    ///
    /// Rejects counts above two.
    pub fn set_landmark_count(&mut self, count: u8) -> SetterResult {
        if count > MAX_LANDMARK_COUNT {
            return reject(Rejection::LandmarkCount(count));
        }
        self.landmark_count = count;
        Ok(())
    }

    /// # Errors
    ///
    /// Rejects when fewer than one landmark is requested, or when `landmark`
    /// is the map's own landmark while that landmark is in use.
    pub fn set_landmark1(&mut self, landmark: Landmark) -> SetterResult {
        self.check_landmark_slot(1, &landmark)?;
        self.landmark1 = Some(landmark);
        Ok(())
    }

    /// # Errors
    ///
    /// Rejects when fewer than two landmarks are requested, or when `landmark`
    /// is the map's own landmark while that landmark is in use.
    pub fn set_landmark2(&mut self, landmark: Landmark) -> SetterResult {
        self.check_landmark_slot(2, &landmark)?;
        self.landmark2 = Some(landmark);
        Ok(())
    }

    fn check_landmark_slot(&self, slot: u8, landmark: &Landmark) -> SetterResult {
        if self.landmark_count < slot {
            return reject(Rejection::LandmarkSlotInactive {
                slot,
                landmark_count: self.landmark_count,
            });
        }
        if self.is_map_landmark(&landmark.code) {
            return reject(Rejection::MapLandmark(landmark.code.clone()));
        }
        Ok(())
    }

    /// Whether `code` is the landmark printed on the chosen map and that
    /// landmark is being used.
    #[must_use]
    pub fn is_map_landmark(&self, code: &str) -> bool {
        self.use_map_landmark
            && self
                .map
                .as_ref()
                .and_then(|map| map.landmark.as_deref())
                .is_some_and(|landmark| landmark == code)
    }

    /// Place `hireling` in slot `number` and exclude its factions from play.
    ///
    /// # Errors
    ///
    /// Rejects slot numbers outside `1..=3`.
    pub fn set_hireling(
        &mut self,
        number: u8,
        hireling: HirelingPair,
        demoted: bool,
    ) -> SetterResult {
        let slot = match number {
            1 => &mut self.hireling1,
            2 => &mut self.hireling2,
            3 => &mut self.hireling3,
            _ => return reject(Rejection::HirelingSlot(number)),
        };
        self.excluded_factions
            .extend(hireling.factions.iter().cloned());
        *slot = Some(HirelingEntry { hireling, demoted });
        Ok(())
    }

    #[must_use]
    pub fn hireling(&self, number: u8) -> Option<&HirelingEntry> {
        match number {
            1 => self.hireling1.as_ref(),
            2 => self.hireling2.as_ref(),
            3 => self.hireling3.as_ref(),
            _ => None,
        }
    }

    pub fn clear_excluded_factions(&mut self) {
        self.excluded_factions.clear();
    }

    pub fn clear_faction_pool(&mut self) {
        self.faction_pool.clear();
        self.last_faction_locked = false;
        self.current_faction_index = None;
        self.current_faction = None;
    }

    /// Append `faction` to the pool; the pool locks when it is an insurgent.
    ///
    /// # Errors
    ///
    /// Rejects factions excluded by a drawn hireling.
    pub fn add_to_faction_pool(&mut self, faction: Faction) -> SetterResult {
        if self.excluded_factions.contains(&faction.code) {
            return reject(Rejection::ExcludedFaction(faction.code));
        }
        self.last_faction_locked = !faction.militant;
        self.faction_pool.push(faction);
        Ok(())
    }

    /// # Errors
    ///
    /// Rejects indexes at or beyond the player count.
    pub fn set_current_player_index(&mut self, index: usize) -> SetterResult {
        if index >= self.player_count {
            return reject(Rejection::PlayerIndex {
                value: index,
                player_count: self.player_count,
            });
        }
        self.current_player_index = index;
        Ok(())
    }

    /// # Errors
    ///
    /// Rejects indexes outside the faction pool.
    pub fn set_current_faction_index(&mut self, index: usize) -> SetterResult {
        if index >= self.faction_pool.len() {
            return reject(Rejection::FactionIndex {
                value: index,
                pool_len: self.faction_pool.len(),
            });
        }
        self.current_faction_index = Some(index);
        Ok(())
    }

    /// Whether confirming `index` would take the locked last faction.
    #[must_use]
    pub fn is_locked_index(&self, index: usize) -> bool {
        self.last_faction_locked && index + 1 == self.faction_pool.len()
    }

    /// Confirm the faction at `current_faction_index` for the current player.
    ///
    /// # Errors
    ///
    /// Rejects when no index is selected or the index is the locked last faction.
    pub fn apply_current_faction_index(&mut self) -> SetterResult {
        let Some(index) = self.current_faction_index else {
            return reject(Rejection::NoFactionIndex);
        };
        if self.is_locked_index(index) {
            return reject(Rejection::LockedFaction(index));
        }
        if index >= self.faction_pool.len() {
            return reject(Rejection::FactionIndex {
                value: index,
                pool_len: self.faction_pool.len(),
            });
        }
        let faction = self.faction_pool.remove(index);
        if faction.militant {
            self.last_faction_locked = false;
        }
        self.current_faction = Some(faction);
        self.current_faction_index = None;
        Ok(())
    }

    /// Pool indexes a player may currently confirm.
    #[must_use]
    pub fn selectable_faction_indexes(&self) -> Vec<usize> {
        (0..self.faction_pool.len())
            .filter(|index| !self.is_locked_index(*index))
            .collect()
    }

    /// Check fields that arrive without going through a setter, such as a
    /// deserialized save.
    ///
    /// # Errors
    ///
    /// Returns the first field that a setter would have rejected.
    pub fn validate(&self) -> SetterResult {
        if self.player_count < 1 {
            return Err(Rejection::PlayerCount(self.player_count));
        }
        if self.landmark_count > MAX_LANDMARK_COUNT {
            return Err(Rejection::LandmarkCount(self.landmark_count));
        }
        if self.current_player_index >= self.player_count {
            return Err(Rejection::PlayerIndex {
                value: self.current_player_index,
                player_count: self.player_count,
            });
        }
        Ok(())
    }

    /// Return to the defaults used at the start of a run.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{FactionCodes, Hireling};

    fn faction(code: &str, militant: bool) -> Faction {
        Faction {
            code: code.to_string(),
            expansion_code: "test".to_string(),
            enabled: true,
            name: code.to_string(),
            militant,
            vagabond: false,
        }
    }

    fn landmark(code: &str) -> Landmark {
        Landmark {
            code: code.to_string(),
            expansion_code: "test".to_string(),
            enabled: true,
            name: code.to_string(),
            min_players: 2,
        }
    }

    fn hireling(code: &str, factions: &[&str]) -> HirelingPair {
        HirelingPair {
            code: code.to_string(),
            expansion_code: "test".to_string(),
            enabled: true,
            factions: factions.iter().map(ToString::to_string).collect::<FactionCodes>(),
            promoted: Hireling {
                name: format!("{code} up"),
            },
            demoted: Hireling {
                name: format!("{code} down"),
            },
        }
    }

    #[test]
    fn player_count_rejects_zero() {
        let mut state = SetupState::default();
        assert_eq!(state.set_player_count(0), Err(Rejection::PlayerCount(0)));
        assert_eq!(state.player_count, DEFAULT_PLAYER_COUNT);
        assert!(state.set_player_count(2).is_ok());
        assert_eq!(state.player_count, 2);
    }

    #[test]
    fn first_player_rotates_seating() {
        let mut state = SetupState::default();
        state.set_player_count(5).unwrap();
        state.set_first_player(3).unwrap();
        assert_eq!(state.player_order, vec![3, 4, 5, 1, 2]);
        state.set_first_player(1).unwrap();
        assert_eq!(state.player_order, vec![1, 2, 3, 4, 5]);
        assert!(state.set_first_player(6).is_err());
        assert!(state.set_first_player(0).is_err());
        assert_eq!(state.player_order, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn landmark_slots_respect_count_and_map_landmark() {
        let mut state = SetupState::default();
        assert!(matches!(
            state.set_landmark1(landmark("forge")),
            Err(Rejection::LandmarkSlotInactive { slot: 1, .. })
        ));
        assert_eq!(state.set_landmark_count(3), Err(Rejection::LandmarkCount(3)));
        state.set_landmark_count(1).unwrap();
        state.set_landmark1(landmark("forge")).unwrap();
        assert!(state.set_landmark2(landmark("city")).is_err());

        state.set_map(MapComponent {
            code: "lake".to_string(),
            expansion_code: "test".to_string(),
            enabled: true,
            name: "Lake".to_string(),
            landmark: Some("ferry".to_string()),
        });
        assert!(state.set_landmark1(landmark("ferry")).is_ok());
        state.enable_map_landmark(true);
        assert_eq!(
            state.set_landmark1(landmark("ferry")),
            Err(Rejection::MapLandmark("ferry".to_string()))
        );
        assert_eq!(state.landmark1.as_ref().unwrap().code, "ferry");
    }

    #[test]
    fn hireling_slots_accumulate_exclusions() {
        let mut state = SetupState::default();
        state.set_hireling(1, hireling("patrol", &["marquise"]), false).unwrap();
        state.set_hireling(2, hireling("twin", &["marquise"]), true).unwrap();
        assert_eq!(
            state.set_hireling(4, hireling("extra", &["eyrie"]), false),
            Err(Rejection::HirelingSlot(4))
        );
        assert_eq!(state.excluded_factions, vec!["marquise", "marquise"]);
        assert!(state.hireling(2).unwrap().demoted);
        assert!(state.hireling(3).is_none());
    }

    #[test]
    fn faction_pool_locks_on_insurgents() {
        let mut state = SetupState::default();
        state.add_to_faction_pool(faction("marquise", true)).unwrap();
        assert!(!state.last_faction_locked);
        state.add_to_faction_pool(faction("alliance", false)).unwrap();
        assert!(state.last_faction_locked);
        state.add_to_faction_pool(faction("eyrie", true)).unwrap();
        assert!(!state.last_faction_locked);

        state.excluded_factions.push("cult".to_string());
        assert_eq!(
            state.add_to_faction_pool(faction("cult", false)),
            Err(Rejection::ExcludedFaction("cult".to_string()))
        );
        assert_eq!(state.faction_pool.len(), 3);
    }

    #[test]
    fn applying_index_removes_and_unlocks() {
        let mut state = SetupState::default();
        state.add_to_faction_pool(faction("marquise", true)).unwrap();
        state.add_to_faction_pool(faction("alliance", false)).unwrap();

        assert_eq!(
            state.apply_current_faction_index(),
            Err(Rejection::NoFactionIndex)
        );
        state.set_current_faction_index(1).unwrap();
        assert_eq!(
            state.apply_current_faction_index(),
            Err(Rejection::LockedFaction(1))
        );
        assert_eq!(state.selectable_faction_indexes(), vec![0]);

        state.set_current_faction_index(0).unwrap();
        state.apply_current_faction_index().unwrap();
        assert_eq!(state.current_faction.as_ref().unwrap().code, "marquise");
        assert!(!state.last_faction_locked);
        assert_eq!(state.current_faction_index, None);
        assert_eq!(state.faction_pool.len(), 1);
        assert!(state.set_current_faction_index(1).is_err());
    }

    #[test]
    fn player_index_is_bounded_by_player_count() {
        let mut state = SetupState::default();
        state.set_player_count(3).unwrap();
        assert!(state.set_current_player_index(3).is_err());
        state.set_current_player_index(2).unwrap();
        assert_eq!(state.current_player_index, 2);
    }

    #[test]
    fn deserialized_state_is_validated() {
        assert!(SetupState::default().validate().is_ok());

        let mut value = serde_json::to_value(SetupState::default()).unwrap();
        value["playerCount"] = 0.into();
        let state: SetupState = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(state.validate(), Err(Rejection::PlayerCount(0)));

        value["playerCount"] = 2.into();
        value["currentPlayerIndex"] = 2.into();
        let state: SetupState = serde_json::from_value(value.clone()).unwrap();
        assert!(matches!(
            state.validate(),
            Err(Rejection::PlayerIndex { value: 2, .. })
        ));

        value["currentPlayerIndex"] = 1.into();
        value["landmarkCount"] = 3.into();
        let state: SetupState = serde_json::from_value(value).unwrap();
        assert_eq!(state.validate(), Err(Rejection::LandmarkCount(3)));
    }

    #[test]
    fn error_keys_round_trip_through_state() {
        let mut state = SetupState::default();
        state.set_error_message(Some(SetupError::TooFewLandmark));
        assert_eq!(SetupError::TooFewLandmark.key(), "error.tooFewLandmark");
        let restored: SetupState =
            serde_json::from_str(&serde_json::to_string(&state).unwrap()).unwrap();
        assert_eq!(restored, state);
    }
}
