//! Full pipeline: round robin per group, slot pool, assignment, with caller-level retries.

use crate::logic::{assign_times_seeded, generate_all_matches, time_slots};
use crate::models::{Competition, Infeasible, Match};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a generated schedule.
pub type ScheduleId = Uuid;

/// A successful assignment and the seed that produced it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Schedule {
    pub id: ScheduleId,
    /// Seed of the attempt that succeeded; re-running with it reproduces `matches`.
    pub seed: u64,
    /// How many shuffles were tried, including the successful one.
    pub attempts: u32,
    pub matches: Vec<Match>,
}

impl Schedule {
    pub fn new(seed: u64, attempts: u32, matches: Vec<Match>) -> Self {
        Self {
            id: Uuid::new_v4(),
            seed,
            attempts,
            matches,
        }
    }
}

/// One attempt with the given seed.
pub fn generate_schedule(competition: &Competition, seed: u64) -> Result<Schedule, Infeasible> {
    let matches = generate_all_matches(&competition.groups);
    let slots = time_slots(&competition.slots);
    log::debug!(
        "Scheduling {} matches into {} slots (seed {})",
        matches.len(),
        slots.len(),
        seed
    );
    let matches = assign_times_seeded(matches, slots, seed)?;
    Ok(Schedule::new(seed, 1, matches))
}

/// Up to `max_attempts` attempts (at least one). The first uses `seed`; later ones draw
/// their seeds from an RNG seeded with `seed`. Only dead ends are retried.
pub fn generate_schedule_with_retries(
    competition: &Competition,
    seed: u64,
    max_attempts: u32,
) -> Result<Schedule, Infeasible> {
    let mut seeds = StdRng::seed_from_u64(seed);
    let mut attempt_seed = seed;
    let mut attempt = 1;
    loop {
        match generate_schedule(competition, attempt_seed) {
            Ok(mut schedule) => {
                schedule.attempts = attempt;
                log::info!(
                    "Scheduled {} matches after {} attempt(s)",
                    schedule.matches.len(),
                    attempt
                );
                return Ok(schedule);
            }
            Err(e) if e.is_retryable() && attempt < max_attempts => {
                log::warn!("Attempt {} with seed {} failed: {}", attempt, attempt_seed, e);
                attempt += 1;
                attempt_seed = seeds.gen();
            }
            Err(e) => return Err(e),
        }
    }
}
