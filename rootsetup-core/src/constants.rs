//! Game-balance constants shared by the setup steps.

/// Player count a fresh setup starts with.
pub const DEFAULT_PLAYER_COUNT: usize = 4;

/// Landmarks that can be drawn at random.
pub const MAX_LANDMARK_COUNT: u8 = 2;

/// Hirelings drawn when hirelings are in use.
pub const HIRELING_SLOTS: u8 = 3;

/// A hireling slot is demoted once `player_count + slot` exceeds this.
pub const HIRELING_DEMOTE_THRESHOLD: usize = 5;

/// Seed used when none is supplied.
pub const DEFAULT_SEED: u64 = 1337;
