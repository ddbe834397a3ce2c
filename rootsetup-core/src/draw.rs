//! Uniform draws without replacement from a mutable pool.
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DrawError {
    #[error("cannot draw from an empty pool")]
    EmptyPool,
}

/// Remove and return one element of `pool`, chosen uniformly.
///
/// Order of the remaining elements is preserved, so repeated calls draw
/// without replacement.
///
/// # Errors
///
/// Returns [`DrawError::EmptyPool`] when `pool` has no elements.
pub fn take_random<T, R>(pool: &mut Vec<T>, rng: &mut R) -> Result<T, DrawError>
where
    R: Rng + ?Sized,
{
    if pool.is_empty() {
        return Err(DrawError::EmptyPool);
    }
    let idx = rng.gen_range(0..pool.len());
    Ok(pool.remove(idx))
}
