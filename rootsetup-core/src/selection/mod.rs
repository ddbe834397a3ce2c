//! Constrained random selection performed by the individual setup steps.
//!
//! Every function validates pool sizes before it draws, so the empty-pool
//! contract of [`take_random`] can only break through a programming error.

pub mod board;
pub mod expansions;
pub mod factions;
pub mod hirelings;
pub mod seating;

use crate::draw::take_random;
use crate::state::SetupError;
use rand::Rng;

pub use board::{choose_deck, choose_landmarks, choose_map};
pub use expansions::prepare_expansions;
pub use factions::{advance_player, build_faction_pool, select_faction};
pub use hirelings::choose_hirelings;
pub use seating::{seat_players, sync_landmarks};

/// Result of one step's selection logic.
pub type StepResult = Result<(), SetupError>;

fn draw<T, R: Rng + ?Sized>(pool: &mut Vec<T>, rng: &mut R) -> T {
    match take_random(pool, rng) {
        Ok(item) => {
            log::debug!("drew from pool, {} left", pool.len());
            item
        }
        Err(err) => unreachable!("pool size is validated before drawing: {err}"),
    }
}
