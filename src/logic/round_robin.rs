//! Round-robin pairing: every competitor meets every other competitor of its group once.

use crate::models::{Competitor, Group, Match};

/// All n·(n−1)/2 pairings of `competitors`, in lexicographic order of their positions.
///
/// Fewer than two competitors give no matches.
pub fn round_robin(competitors: &[Competitor], group: &str) -> Vec<Match> {
    competitors
        .iter()
        .enumerate()
        .flat_map(|(i, c1)| {
            competitors[i + 1..]
                .iter()
                .map(move |c2| Match::new(c1.clone(), c2.clone(), group))
        })
        .collect()
}

/// Round robin for every group, flattened in group order.
pub fn generate_all_matches(groups: &[Group]) -> Vec<Match> {
    groups
        .iter()
        .flat_map(|g| round_robin(&g.competitors, &g.name))
        .collect()
}
