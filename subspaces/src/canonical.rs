//! Greedy bounded search for a canonical representative of a state's subspace.
//!
//! The search repeatedly jumps to the numerically smallest state found within `max_depth`
//! steps of the current one, until a round brings no improvement. The result is exact (the
//! minimum of the whole subspace) only when `max_depth` reaches across the subspace in one
//! round; smaller depths trade precision for a search that stays local.

use crate::SubspaceSystem;
use bitrel::{BitString, Result};
use log::trace;
use std::collections::{HashSet, VecDeque};

/// Outcome of [`greedy_min_search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanonicalSearch {
    /// Smallest state reached by the greedy descent.
    pub representative: BitString,
    /// Number of bounded searches run, including the final one that found no improvement.
    pub rounds: usize,
}

/// Greedy descent from `state` towards the smallest state of its subspace.
///
/// Each round runs a breadth-first search of depth `max_depth` from the current state,
/// skipping the state accepted in the previous round, and moves to the smallest state seen.
/// The sequence of accepted states strictly decreases, so the search terminates. A
/// `max_depth` of zero expands nothing and returns `state` after a single round.
///
/// # Errors
///
/// Returns [`Error::OutOfRange`](bitrel::Error::OutOfRange) if an operator of `system` acts
/// on a site past the end of `state`.
///
/// # Example
///
/// ```
/// use bitrel::{BitString, BoolMatrix};
/// use subspaces::{greedy_min_search, LocalEditMap, SubspaceSystem};
///
/// let exchange: BoolMatrix = "1000|0110|0110|0001".parse().unwrap();
/// let system: SubspaceSystem = (0..3)
///     .map(|site| LocalEditMap::new(&exchange, [site, site + 1]))
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// let state: BitString = "1010".parse().unwrap();
/// let search = greedy_min_search(&system, &state, 1).unwrap();
/// assert_eq!(search.representative.to_string(), "0011");
/// ```
pub fn greedy_min_search(system: &SubspaceSystem, state: &BitString, max_depth: usize) -> Result<CanonicalSearch> {
    let mut current: Option<BitString> = None;
    let mut next = *state;
    let mut rounds = 0usize;

    while current != Some(next) {
        let mut visited: HashSet<BitString> = current.into_iter().chain([next]).collect();
        current = Some(next);
        rounds += 1;

        let mut queue = VecDeque::from([(next, 0usize)]);
        let mut local_min = next;
        while let Some((candidate, depth)) = queue.pop_front() {
            if depth == max_depth {
                break;
            }
            for neighbor in system.one_step(&candidate)? {
                if visited.insert(neighbor) {
                    queue.push_back((neighbor, depth + 1));
                    local_min = local_min.min(neighbor);
                }
            }
        }
        trace!("round {rounds}: {next} -> {local_min} after visiting {} states", visited.len());
        next = local_min;
    }

    Ok(CanonicalSearch {
        representative: next,
        rounds,
    })
}

/// The representative found by [`greedy_min_search`].
///
/// # Errors
///
/// As [`greedy_min_search`].
pub fn canonical_representative(system: &SubspaceSystem, state: &BitString, max_depth: usize) -> Result<BitString> {
    greedy_min_search(system, state, max_depth).map(|search| search.representative)
}
