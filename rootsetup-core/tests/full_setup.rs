use rootsetup_core::{
    ComponentRegistry, ExpansionCatalog, SetupError, SetupOptions, SetupSession, SetupSnapshot,
    SetupStep, StepReport,
};
use std::collections::BTreeSet;

const ALL_EXPANSIONS: [&str; 8] = [
    "base",
    "riverfolk",
    "underworld",
    "marauder",
    "winter",
    "exiles",
    "landmarks",
    "hirelings",
];

fn catalog() -> ExpansionCatalog {
    ExpansionCatalog::load_from_static().unwrap()
}

fn full_options(player_count: usize) -> SetupOptions {
    SetupOptions {
        expansions: ALL_EXPANSIONS.map(String::from).to_vec(),
        player_count,
        use_map_landmark: true,
        landmark_count: 2,
        use_hirelings: true,
        ..SetupOptions::default()
    }
}

/// Advance until setup ends, confirming the last selectable faction for
/// each player. Returns every report in order.
fn drive(session: &mut SetupSession) -> Vec<StepReport> {
    let mut reports = Vec::new();
    while !session.is_complete() {
        if session.current_step() == SetupStep::SelectFaction {
            let index = *session
                .state()
                .selectable_faction_indexes()
                .last()
                .expect("a selectable faction");
            session
                .state_mut()
                .set_current_faction_index(index)
                .unwrap();
        }
        let report = session.advance();
        assert_eq!(
            report.error, None,
            "seed {} blocked at {}",
            session.seed(),
            report.step.key()
        );
        reports.push(report);
        assert!(reports.len() < 200, "setup did not terminate");
    }
    reports
}

#[test]
fn full_catalog_setup_completes_for_every_seed() {
    let catalog = catalog();
    for player_count in 2..=6 {
        for seed in 0..40 {
            let mut session =
                SetupSession::from_options(&catalog, &full_options(player_count), seed).unwrap();
            let reports = drive(&mut session);
            let state = session.state();

            let map = state.map.as_ref().unwrap();
            assert!(state.deck.is_some());

            let first = state.landmark1.as_ref().unwrap();
            let second = state.landmark2.as_ref().unwrap();
            assert_ne!(first.code, second.code);
            assert_ne!(map.landmark.as_deref(), Some(first.code.as_str()));
            assert_ne!(map.landmark.as_deref(), Some(second.code.as_str()));

            let hirelings: BTreeSet<_> = (1..=3)
                .map(|slot| state.hireling(slot).unwrap().hireling.code.clone())
                .collect();
            assert_eq!(hirelings.len(), 3);

            let selects = reports
                .iter()
                .filter(|r| r.step == SetupStep::SelectFaction)
                .count();
            let setups = reports
                .iter()
                .filter(|r| r.step == SetupStep::SetUpFaction)
                .count();
            assert_eq!(selects, player_count);
            assert_eq!(setups, player_count);
            assert_eq!(state.faction_pool.len(), 1);
            assert_eq!(reports.last().unwrap().current, SetupStep::SetupEnd);
        }
    }
}

#[test]
fn faction_pool_holds_one_extra_with_a_militant() {
    let catalog = catalog();
    for seed in 0..64 {
        let mut session = SetupSession::from_options(&catalog, &full_options(4), seed).unwrap();
        while session.current_step() != SetupStep::SelectFaction {
            assert_eq!(session.advance().error, None);
        }
        let state = session.state();
        assert_eq!(state.faction_pool.len(), 5);
        assert!(state.faction_pool.iter().any(|f| f.militant));
        let codes: BTreeSet<_> = state.faction_pool.iter().map(|f| &f.code).collect();
        assert_eq!(codes.len(), 5);
        for faction in &state.faction_pool {
            assert!(!state.excluded_factions.contains(&faction.code));
        }
        assert_eq!(state.current_player_index, 3);
        assert_eq!(
            state.last_faction_locked,
            !state.faction_pool.last().unwrap().militant
        );
    }
}

#[test]
fn hireling_factions_are_disabled() {
    let catalog = catalog();
    for seed in 0..32 {
        let mut session = SetupSession::from_options(&catalog, &full_options(3), seed).unwrap();
        while session.current_step() != SetupStep::SeatPlayers {
            assert_eq!(session.advance().error, None);
        }
        let state = session.state();
        for slot in 1..=3u8 {
            let entry = state.hireling(slot).unwrap();
            assert_eq!(entry.demoted, 3 + usize::from(slot) > 5);
            for code in &entry.hireling.factions {
                assert!(state.excluded_factions.contains(code));
                if let Some(faction) = session.registry().factions().get(code) {
                    assert!(!faction.enabled);
                }
            }
        }
    }
}

#[test]
fn seating_is_a_rotation_from_the_first_player() {
    let catalog = catalog();
    for player_count in 1..=6 {
        for seed in 0..24 {
            let options = SetupOptions {
                player_count,
                expansions: ["base", "riverfolk", "marauder"].map(String::from).to_vec(),
                ..SetupOptions::default()
            };
            let mut session = SetupSession::from_options(&catalog, &options, seed).unwrap();
            while session.current_step() != SetupStep::ChooseFactions {
                session.advance();
            }
            let order = &session.state().player_order;
            let mut sorted = order.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, (1..=player_count).collect::<Vec<_>>());
            for pair in order.windows(2) {
                assert_eq!(pair[1], pair[0] % player_count + 1);
            }
        }
    }
}

#[test]
fn fixed_first_player_with_five_seats() {
    let options = SetupOptions {
        player_count: 5,
        fixed_first_player: true,
        expansions: ["base", "riverfolk"].map(String::from).to_vec(),
        ..SetupOptions::default()
    };
    let mut session = SetupSession::from_options(&catalog(), &options, 31).unwrap();
    drive(&mut session);
    assert_eq!(session.state().player_order, vec![1, 2, 3, 4, 5]);
}

#[test]
fn first_player_ignores_component_choices() {
    let catalog = catalog();
    for seed in 0..16 {
        let order = |expansions: &[&str]| {
            let options = SetupOptions {
                player_count: 3,
                expansions: expansions.iter().map(ToString::to_string).collect(),
                ..SetupOptions::default()
            };
            let mut session = SetupSession::from_options(&catalog, &options, seed).unwrap();
            while session.current_step() != SetupStep::ChooseFactions {
                session.advance();
            }
            session.state().player_order.clone()
        };
        assert_eq!(order(&["base"]), order(&["base", "underworld", "exiles"]));
    }
}

#[test]
fn no_militant_faction_blocks_faction_step() {
    let catalog = ExpansionCatalog::from_json(
        r#"{
            "peaceful": {
                "name": "Peaceful",
                "factions": {
                    "otters": { "name": "Otters", "militant": false },
                    "moles": { "name": "Moles", "militant": false },
                    "bats": { "name": "Bats", "militant": false }
                },
                "maps": { "meadow": { "name": "Meadow" } },
                "decks": { "plain": { "name": "Plain" } }
            }
        }"#,
    )
    .unwrap();
    let registry = ComponentRegistry::with_expansions(&catalog, &["peaceful"]).unwrap();
    let mut session = SetupSession::new(5, registry);
    while session.current_step() != SetupStep::ChooseFactions {
        session.advance();
    }
    for _ in 0..3 {
        let report = session.advance();
        assert_eq!(report.error, Some(SetupError::NoMilitantFaction));
        assert!(!report.advanced);
        assert_eq!(session.current_step(), SetupStep::ChooseFactions);
    }
    assert_eq!(
        session.state().error_message.map(SetupError::key),
        Some("error.noMilitantFaction")
    );
}

#[test]
fn exactly_two_landmarks_fill_both_slots() {
    let options = SetupOptions {
        expansions: ["base", "landmarks"].map(String::from).to_vec(),
        player_count: 3,
        landmark_count: 2,
        ..SetupOptions::default()
    };
    for seed in 0..16 {
        let mut session = SetupSession::from_options(&catalog(), &options, seed).unwrap();
        session.registry_mut().toggle_landmark("market", false);
        session.registry_mut().toggle_landmark("treetop", false);
        while session.current_step() != SetupStep::SetUpLandmark1 {
            assert_eq!(session.advance().error, None);
        }
        let state = session.state();
        let drawn: BTreeSet<_> = [&state.landmark1, &state.landmark2]
            .into_iter()
            .map(|landmark| landmark.as_ref().unwrap().code.as_str())
            .collect();
        assert_eq!(drawn, BTreeSet::from(["city", "forge"]));
        session.advance();
        assert_eq!(session.current_step(), SetupStep::SetUpLandmark2);
    }
}

#[test]
fn finished_setup_survives_serialization() {
    let mut session = SetupSession::from_options(&catalog(), &full_options(4), 2024).unwrap();
    drive(&mut session);
    let json = serde_json::to_string_pretty(session.snapshot()).unwrap();
    assert!(json.contains("\"currentStep\": \"setupEnd\""));
    let restored: SetupSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(&restored, session.snapshot());
}
