use anyhow::{Result, bail};
use chrono::Utc;
use rootsetup_core::constants::DEFAULT_SEED;

/// Resolve CLI seed tokens into concrete seeds.
///
/// Supports literal integers (negative values use their magnitude),
/// inclusive ranges `a..b`, and `now`, which takes the current time.
/// Duplicates are dropped; an empty list yields the default seed.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<u64>> {
    let mut seeds: Vec<u64> = Vec::new();

    for token in tokens {
        if token.is_empty() {
            continue;
        }

        if token.eq_ignore_ascii_case("now") {
            seeds.push(Utc::now().timestamp_millis().unsigned_abs());
            continue;
        }

        if let Some((start, end)) = token.split_once("..") {
            let (Ok(start), Ok(end)) = (start.parse::<u64>(), end.parse::<u64>()) else {
                bail!("Unrecognized seed range: {token}");
            };
            if start > end {
                bail!("Seed range is reversed: {token}");
            }
            seeds.extend(start..=end);
            continue;
        }

        if let Ok(value) = token.parse::<i64>() {
            seeds.push(value.unsigned_abs());
            continue;
        }

        if let Ok(value) = token.parse::<u64>() {
            seeds.push(value);
            continue;
        }

        bail!("Unrecognized seed token: {token}");
    }

    let mut deduped = Vec::with_capacity(seeds.len());
    for seed in seeds {
        if !deduped.contains(&seed) {
            deduped.push(seed);
        }
    }
    if deduped.is_empty() {
        deduped.push(DEFAULT_SEED);
    }
    Ok(deduped)
}

pub fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ToString::to_string)
        .collect()
}
