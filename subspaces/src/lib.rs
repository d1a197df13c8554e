pub mod canonical;
pub mod edit_map;
pub mod postselection;
pub mod system;

#[cfg(feature = "serde")]
mod serde;

pub use bitrel::{BitString, Error, Result, MAX_SITES};
pub use canonical::{canonical_representative, greedy_min_search, CanonicalSearch};
pub use edit_map::{LocalEditMap, SiteWindow};
pub use postselection::MeasurementVerifier;
pub use system::{Partition, SubspaceSystem};

use std::collections::BTreeSet;

pub type SiteId = usize;

/// States ordered by numeric value.
pub type StateSet = BTreeSet<BitString>;

pub(crate) fn write_states(f: &mut std::fmt::Formatter<'_>, states: &StateSet) -> std::fmt::Result {
    write!(f, "{{")?;
    for (index, state) in states.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{state}")?;
    }
    write!(f, "}}")
}
