//! Conflict-aware slot assignment.
//!
//! Randomized greedy fill with a local retry: slots are visited in a shuffled order and each
//! takes the first unassigned match (from the tail) whose players are all free at that start
//! time. Matches that conflict go back to the head of the queue. Filled slots are never
//! revisited, so a bad shuffle can end in [`Infeasible::DeadEnd`] even though another order
//! would work; callers retry with a new seed.

use crate::models::{Infeasible, Match, PlayerId, TimeSlot};
use chrono::NaiveDateTime;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeSet, HashMap, VecDeque};

/// Bind every match to its own slot so no player is in two matches starting at the same time.
///
/// When there are more slots than matches, the pool is cut down with [`trim_slots`].
pub fn assign_times<R: Rng + ?Sized>(
    matches: Vec<Match>,
    mut slots: Vec<TimeSlot>,
    rng: &mut R,
) -> Result<Vec<Match>, Infeasible> {
    let total = matches.len();
    if total > slots.len() {
        return Err(Infeasible::NotEnoughSlots {
            matches: total,
            slots: slots.len(),
        });
    }
    if slots.len() > total {
        slots = trim_slots(slots, total);
    }
    slots.shuffle(rng);

    let mut unassigned: VecDeque<Match> = matches.into();
    let mut assigned: Vec<Match> = Vec::with_capacity(total);

    for slot in slots {
        let committed: BTreeSet<PlayerId> = assigned
            .iter()
            .filter(|m| m.time.as_ref().is_some_and(|t| t.is_simultaneous(&slot)))
            .flat_map(Match::players)
            .collect();

        let mut failures = 0;
        while let Some(mut candidate) = unassigned.pop_back() {
            if candidate.players().is_disjoint(&committed) {
                candidate.time = Some(slot);
                assigned.push(candidate);
                break;
            }
            unassigned.push_front(candidate);
            failures += 1;
            if failures >= unassigned.len() {
                log::debug!(
                    "Dead end at {} on court {} with {} matches left",
                    slot.start,
                    slot.court,
                    unassigned.len()
                );
                return Err(Infeasible::DeadEnd {
                    start: slot.start,
                    unassigned: unassigned.len(),
                });
            }
        }
    }

    assert_eq!(
        assigned.len(),
        total,
        "every match must be bound to exactly one slot"
    );
    Ok(assigned)
}

/// [`assign_times`] with a reproducible random source.
pub fn assign_times_seeded(
    matches: Vec<Match>,
    slots: Vec<TimeSlot>,
    seed: u64,
) -> Result<Vec<Match>, Infeasible> {
    let mut rng = StdRng::seed_from_u64(seed);
    assign_times(matches, slots, &mut rng)
}

/// Keep `keep` slots, spreading them over as many start instants as possible.
///
/// Every start instant first contributes its first slot (first listed court), then its
/// second, and so on; ties go to the earlier slot in the pool. The result keeps pool order
/// within each round, so the same pool always trims the same way.
pub fn trim_slots(slots: Vec<TimeSlot>, keep: usize) -> Vec<TimeSlot> {
    let mut per_start: HashMap<NaiveDateTime, usize> = HashMap::new();
    let mut ranked: Vec<(usize, usize, TimeSlot)> = slots
        .into_iter()
        .enumerate()
        .map(|(i, slot)| {
            let seen = per_start.entry(slot.start).or_insert(0);
            let rank = *seen;
            *seen += 1;
            (rank, i, slot)
        })
        .collect();
    ranked.sort_by_key(|(rank, i, _)| (*rank, *i));
    ranked.truncate(keep);
    ranked.into_iter().map(|(_, _, slot)| slot).collect()
}
