//! Candidate filtering and ranking shared by the booking agents.

use crate::domain::record::Candidate;

/// How many candidates are embedded in an agent prompt.
pub const TOP_K: usize = 8;

/// Keep records matching `keep`, sort cheapest then earliest, truncate to `k`.
///
/// The sort is stable, so records equal on both keys keep their store order
/// and the result is fully deterministic for a given store.
pub fn rank_candidates<R, F>(records: Vec<R>, keep: F, k: usize) -> Vec<R>
where
    R: Candidate,
    F: Fn(&R) -> bool,
{
    let mut ranked: Vec<R> = records.into_iter().filter(|r| keep(r)).collect();
    ranked.sort_by(|a, b| {
        a.cost()
            .cmp(&b.cost())
            .then_with(|| a.date().cmp(b.date()))
    });
    ranked.truncate(k);
    ranked
}
