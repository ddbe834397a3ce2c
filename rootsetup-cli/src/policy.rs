use std::fmt;

use clap::ValueEnum;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rootsetup_core::SetupState;

/// How automated players pick their faction from the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum PickPolicy {
    /// Always take the first selectable faction
    First,
    /// Take a random selectable faction
    Random,
    /// Prefer militant factions, then the first selectable one
    MilitantFirst,
}

impl PickPolicy {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Random => "random",
            Self::MilitantFirst => "militant-first",
        }
    }

    #[must_use]
    pub fn create_picker(self, seed: u64) -> Box<dyn FactionPicker> {
        match self {
            Self::First => Box::new(FirstPicker),
            Self::Random => Box::new(RandomPicker {
                rng: ChaCha20Rng::seed_from_u64(seed),
            }),
            Self::MilitantFirst => Box::new(MilitantFirstPicker),
        }
    }
}

impl fmt::Display for PickPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Chooses a faction pool index for the current player.
pub trait FactionPicker {
    /// Index to confirm, or `None` when nothing is selectable.
    fn pick(&mut self, state: &SetupState) -> Option<usize>;
}

struct FirstPicker;
struct MilitantFirstPicker;

struct RandomPicker {
    rng: ChaCha20Rng,
}

impl FactionPicker for FirstPicker {
    fn pick(&mut self, state: &SetupState) -> Option<usize> {
        state.selectable_faction_indexes().first().copied()
    }
}

impl FactionPicker for MilitantFirstPicker {
    fn pick(&mut self, state: &SetupState) -> Option<usize> {
        let selectable = state.selectable_faction_indexes();
        selectable
            .iter()
            .copied()
            .find(|index| state.faction_pool[*index].militant)
            .or_else(|| selectable.first().copied())
    }
}

impl FactionPicker for RandomPicker {
    fn pick(&mut self, state: &SetupState) -> Option<usize> {
        state
            .selectable_faction_indexes()
            .choose(&mut self.rng)
            .copied()
    }
}
