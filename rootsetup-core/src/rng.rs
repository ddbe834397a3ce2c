//! Deterministic random streams used by a setup run.
use hmac::{Hmac, Mac};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::Sha256;

/// Where the orchestrator takes its randomness from.
pub trait RandomSource {
    /// Stream for map, deck, landmark, hireling and faction draws.
    fn component_rng(&mut self) -> &mut dyn RngCore;
    /// Stream for picking the first player.
    fn seating_rng(&mut self) -> &mut dyn RngCore;
}

/// One generator serving every stream; handy for forcing draws in tests.
#[derive(Debug, Clone)]
pub struct SingleStream<R>(pub R);

impl<R: RngCore> RandomSource for SingleStream<R> {
    fn component_rng(&mut self) -> &mut dyn RngCore {
        &mut self.0
    }

    fn seating_rng(&mut self) -> &mut dyn RngCore {
        &mut self.0
    }
}

/// Independent random streams derived from one user-visible seed.
///
/// Component draws and seating use separate streams so changing the enabled
/// expansions never changes who sits first for a given seed.
#[derive(Debug, Clone)]
pub struct RngBundle {
    seed: u64,
    components: CountingRng<ChaCha20Rng>,
    seating: CountingRng<ChaCha20Rng>,
}

impl RngBundle {
    /// Construct the bundle from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        Self {
            seed,
            components: CountingRng::new(derive_stream_seed(seed, b"components")),
            seating: CountingRng::new(derive_stream_seed(seed, b"seating")),
        }
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Stream for map, deck, landmark, hireling and faction draws.
    pub fn components(&mut self) -> &mut CountingRng<ChaCha20Rng> {
        &mut self.components
    }

    /// Stream for picking the first player.
    pub fn seating(&mut self) -> &mut CountingRng<ChaCha20Rng> {
        &mut self.seating
    }

    /// Total draw calls across both streams.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.components.draws().saturating_add(self.seating.draws())
    }
}

impl RandomSource for RngBundle {
    fn component_rng(&mut self) -> &mut dyn RngCore {
        &mut self.components
    }

    fn seating_rng(&mut self) -> &mut dyn RngCore {
        &mut self.seating
    }
}

/// Counting wrapper for RNG streams providing instrumentation.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl CountingRng<ChaCha20Rng> {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            draws: 0,
        }
    }
}

impl<R: RngCore> CountingRng<R> {
    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: RngCore> RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let mut mac = Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes())
        .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut seed_bytes = [0u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed_bytes)
}
