use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use colored::Colorize;
use rootsetup_core::{ComponentRegistry, ExpansionCatalog, SetupOptions, SetupSession, SetupStep};
use serde::Serialize;

use crate::policy::PickPolicy;

/// Upper bound on orchestrator calls for one run; a full run needs far fewer.
const MAX_STEP_CALLS: usize = 256;

/// One seat's confirmed faction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatAssignment {
    pub seat: usize,
    pub player: usize,
    pub faction: String,
    pub militant: bool,
}

/// Hireling dealt into a slot, showing the face in play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HirelingSummary {
    pub slot: u8,
    pub code: String,
    pub name: String,
    pub demoted: bool,
}

/// Outcome of one seeded setup run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupRecord {
    pub seed: u64,
    pub policy: String,
    pub completed: bool,
    /// Step the run stopped at when it did not complete.
    pub blocked_at: Option<String>,
    /// Localisation key of the blocking error.
    pub error: Option<String>,
    pub map: Option<String>,
    pub deck: Option<String>,
    pub landmarks: Vec<String>,
    pub hirelings: Vec<HirelingSummary>,
    pub player_order: Vec<usize>,
    pub seats: Vec<SeatAssignment>,
    pub leftover_factions: Vec<String>,
    pub step_calls: usize,
    pub draws: u64,
    #[serde(with = "duration_millis")]
    pub duration: Duration,
}

/// Run a full setup for `seed`, letting `policy` make every faction pick.
///
/// A blocked step ends the run and is recorded rather than returned as an
/// error; only configuration problems fail.
pub fn run_setup(
    catalog: &ExpansionCatalog,
    options: &SetupOptions,
    seed: u64,
    policy: PickPolicy,
    verbose: bool,
) -> Result<SetupRecord> {
    let started = Instant::now();
    let expansions = options.expansions_or_base(catalog);
    let registry = ComponentRegistry::with_expansions(catalog, &expansions)
        .with_context(|| format!("failed to start setup for seed {seed}"))?;
    let mut session = SetupSession::new(seed, registry);
    let rejections = session.apply_options(options);
    if let Some(rejection) = rejections.first() {
        anyhow::bail!("invalid setup options: {rejection}");
    }

    let mut picker = policy.create_picker(seed);
    let mut seats = Vec::new();
    let mut step_calls = 0;
    let mut blocked = None;

    while !session.is_complete() && step_calls < MAX_STEP_CALLS {
        if session.current_step() == SetupStep::SelectFaction
            && let Some(index) = picker.pick(session.state())
        {
            session
                .state_mut()
                .set_current_faction_index(index)
                .context("picker chose an index outside the pool")?;
        }

        let report = session.advance();
        step_calls += 1;
        if verbose {
            let status = match report.error {
                Some(err) => err.key().red(),
                None if report.advanced => "ok".green(),
                None => "loop".yellow(),
            };
            println!(
                "   [seed {seed}] {:<18} {status} -> {}",
                report.step.key(),
                report.current.key()
            );
        }

        if report.step == SetupStep::SelectFaction && report.error.is_none() {
            let state = session.state();
            if let Some(faction) = &state.current_faction {
                let seat = state.current_player_index;
                seats.push(SeatAssignment {
                    seat: seat + 1,
                    player: state.player_order.get(seat).copied().unwrap_or(seat + 1),
                    faction: faction.name.clone(),
                    militant: faction.militant,
                });
            }
        }

        if let Some(err) = report.error {
            log::warn!("seed {seed} blocked at {}: {err}", report.step.key());
            blocked = Some((report.step, err));
            break;
        }
    }

    seats.sort_by_key(|assignment| assignment.seat);
    let state = session.state();
    Ok(SetupRecord {
        seed,
        policy: policy.label().to_string(),
        completed: session.is_complete(),
        blocked_at: blocked.map(|(step, _)| step.key().to_string()),
        error: blocked.map(|(_, err)| err.key().to_string()),
        map: state.map.as_ref().map(|map| map.name.clone()),
        deck: state.deck.as_ref().map(|deck| deck.name.clone()),
        landmarks: [&state.landmark1, &state.landmark2]
            .into_iter()
            .flatten()
            .map(|landmark| landmark.name.clone())
            .collect(),
        hirelings: (1..=3)
            .filter_map(|slot| {
                state.hireling(slot).map(|entry| HirelingSummary {
                    slot,
                    code: entry.hireling.code.clone(),
                    name: entry.face_name().to_string(),
                    demoted: entry.demoted,
                })
            })
            .collect(),
        player_order: state.player_order.clone(),
        seats,
        leftover_factions: state
            .faction_pool
            .iter()
            .map(|faction| faction.name.clone())
            .collect(),
        step_calls,
        draws: session.rng().draws(),
        duration: started.elapsed(),
    })
}

mod duration_millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }
}
