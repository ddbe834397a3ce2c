//! Seating order and the player-count gate on landmarks.
use crate::registry::ComponentRegistry;
use crate::state::SetupState;
use rand::Rng;

/// Pick the first player and seat everyone in rotation from them.
///
/// Returns the first player (1-based).
pub fn seat_players<R: Rng + ?Sized>(
    setup: &mut SetupState,
    registry: &mut ComponentRegistry,
    rng: &mut R,
) -> usize {
    let first_player = if setup.fixed_first_player {
        1
    } else {
        rng.gen_range(1..=setup.player_count)
    };
    let seated = setup.set_first_player(first_player);
    debug_assert!(seated.is_ok(), "first player is drawn within the player count");
    log::debug!("first player is {first_player} of {}", setup.player_count);
    sync_landmarks(setup, registry);
    first_player
}

/// Enable exactly the landmarks playable at this player count that are not
/// the map's own landmark in use. Only differing flags are touched.
pub fn sync_landmarks(setup: &SetupState, registry: &mut ComponentRegistry) {
    for landmark in registry.landmark_array() {
        let playable = usize::from(landmark.min_players) <= setup.player_count
            && !setup.is_map_landmark(&landmark.code);
        if playable != landmark.enabled {
            registry.toggle_landmark(&landmark.code, playable);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ExpansionCatalog;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn registry() -> ComponentRegistry {
        let catalog = ExpansionCatalog::load_from_static().unwrap();
        ComponentRegistry::with_expansions(&catalog, &["base", "underworld", "landmarks"]).unwrap()
    }

    #[test]
    fn fixed_first_player_seats_in_order() {
        let mut registry = registry();
        let mut setup = SetupState::default();
        setup.set_player_count(5).unwrap();
        setup.fix_first_player(true);
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        assert_eq!(seat_players(&mut setup, &mut registry, &mut rng), 1);
        assert_eq!(setup.player_order, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn random_first_player_is_a_rotation() {
        let mut registry = registry();
        for count in 1..=6 {
            for seed in 0..12 {
                let mut setup = SetupState::default();
                setup.set_player_count(count).unwrap();
                let mut rng = ChaCha20Rng::seed_from_u64(seed);
                let first = seat_players(&mut setup, &mut registry, &mut rng);
                assert_eq!(setup.player_order[0], first);
                let mut sorted = setup.player_order.clone();
                sorted.sort_unstable();
                assert_eq!(sorted, (1..=count).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn landmarks_follow_player_count_and_map() {
        let mut registry = registry();
        let mut setup = SetupState::default();
        setup.set_player_count(3).unwrap();
        sync_landmarks(&setup, &mut registry);
        assert!(!registry.landmarks().get("treetop").unwrap().enabled);
        assert!(registry.landmarks().get("ferry").unwrap().enabled);

        setup.enable_map_landmark(true);
        setup.set_map(registry.maps().get("lake").unwrap().clone());
        setup.set_player_count(4).unwrap();
        sync_landmarks(&setup, &mut registry);
        assert!(registry.landmarks().get("treetop").unwrap().enabled);
        assert!(!registry.landmarks().get("ferry").unwrap().enabled);
        assert!(registry.landmarks().get("tower").unwrap().enabled);

        setup.set_player_count(1).unwrap();
        sync_landmarks(&setup, &mut registry);
        assert!(registry.enabled_landmarks().is_empty());
    }
}
