use crate::{write_states, SiteId, StateSet};
use bitrel::{booleanize, BitString, BoolMatrix, Error, Result, MAX_SITES};
use log::debug;
use num_traits::Zero;
use smallvec::SmallVec;

/// Ordered sites a local operator acts on; position `i` of a local pattern is site `window[i]`.
pub type SiteWindow = SmallVec<[SiteId; 8]>;

/// The closed transition relation of one local operator, projected onto full bit strings.
///
/// Built from the support pattern of a `2^k x 2^k` operator acting on a window of `k` sites.
/// The support is symmetrized and closed under reflexivity and transitivity, so every local
/// pattern maps to its whole equivalence class and the entries partition the `2^k` local
/// patterns.
///
/// # Example
///
/// ```
/// use bitrel::{BitString, BoolMatrix};
/// use subspaces::LocalEditMap;
///
/// // Exchange of the two sites: 01 <-> 10.
/// let support: BoolMatrix = "1000|0110|0110|0001".parse().unwrap();
/// let exchange = LocalEditMap::new(&support, [1, 2]).unwrap();
///
/// let state: BitString = "0100".parse().unwrap();
/// let next: Vec<String> = exchange.map(&state).unwrap().iter().map(ToString::to_string).collect();
/// assert_eq!(next, ["0010", "0100"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalEditMap {
    sites: SiteWindow,
    edit_map: Vec<StateSet>,
}

fn validated_window(sites: impl IntoIterator<Item = SiteId>) -> Result<SiteWindow> {
    let window: SiteWindow = sites.into_iter().collect();
    if window.is_empty() {
        return Err(Error::EmptyWindow);
    }
    if window.len() > MAX_SITES {
        return Err(Error::OutOfRange {
            index: window.len(),
            length: MAX_SITES,
        });
    }
    for (offset, site) in window.iter().enumerate() {
        if window[..offset].contains(site) {
            return Err(Error::DuplicateSite(*site));
        }
    }
    Ok(window)
}

impl LocalEditMap {
    /// Builds the edit map of an operator with the given support acting on `sites`.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyWindow`] or [`Error::DuplicateSite`] for a malformed window.
    /// - [`Error::OutOfRange`] if the window is wider than [`MAX_SITES`] or `2^k` overflows.
    /// - [`Error::DimensionMismatch`] if `support` is not `2^k x 2^k`.
    pub fn new(support: &BoolMatrix, sites: impl IntoIterator<Item = SiteId>) -> Result<Self> {
        let sites = validated_window(sites)?;
        let arity = sites.len();
        let dimension = u32::try_from(arity)
            .ok()
            .and_then(|shift| 1usize.checked_shl(shift))
            .ok_or(Error::OutOfRange {
                index: arity,
                length: usize::BITS as usize - 1,
            })?;
        if support.shape() != (dimension, dimension) {
            return Err(Error::DimensionMismatch {
                expected: (dimension, dimension),
                found: support.shape(),
            });
        }

        let symmetric = support | &support.transposed();
        let closure = symmetric.reflexive_transitive_closure()?;

        let mut edit_map = Vec::with_capacity(dimension);
        for source in 0..dimension {
            let pattern = BitString::new(source as u64, arity)?;
            let mut reachable = closure
                .column_support(source)
                .map(|sink| BitString::new(sink as u64, arity))
                .collect::<Result<StateSet>>()?;
            reachable.insert(pattern);
            edit_map.push(reachable);
        }

        let local_map = Self { sites, edit_map };
        debug!(
            "built local edit map on sites {:?} with {} local subspaces",
            local_map.sites(),
            local_map.subspaces().len()
        );
        Ok(local_map)
    }

    /// Builds the edit map from an operator's numeric matrix; only its nonzero pattern is read.
    ///
    /// # Errors
    ///
    /// As [`new`](Self::new), plus [`Error::LengthMismatch`] for ragged rows.
    pub fn from_operator<T: Zero>(matrix: &[Vec<T>], sites: impl IntoIterator<Item = SiteId>) -> Result<Self> {
        Self::new(&booleanize(matrix)?, sites)
    }

    #[must_use]
    pub fn sites(&self) -> &[SiteId] {
        &self.sites
    }

    /// Number of sites the operator acts on.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.sites.len()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn entry(&self, pattern: &BitString) -> &StateSet {
        &self.edit_map[pattern.value() as usize]
    }

    /// Local patterns reachable from `pattern`, itself included.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `pattern` is not [`arity`](Self::arity) bits long.
    pub fn reachable(&self, pattern: &BitString) -> Result<&StateSet> {
        if pattern.len() != self.arity() {
            return Err(Error::OutOfRange {
                index: pattern.len(),
                length: self.arity(),
            });
        }
        Ok(self.entry(pattern))
    }

    /// The distinct local subspaces, ordered by their smallest pattern.
    #[must_use]
    pub fn subspaces(&self) -> Vec<&StateSet> {
        self.edit_map
            .iter()
            .enumerate()
            .filter(|(source, reachable)| reachable.first().map(|first| first.value()) == Some(*source as u64))
            .map(|(_, reachable)| reachable)
            .collect()
    }

    /// Full states reachable from `state` by one application of this operator, `state` included.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `state` is too short to hold every site of the window.
    pub fn map(&self, state: &BitString) -> Result<StateSet> {
        let local = state.gather(&self.sites)?;
        let mut next_states = StateSet::from([*state]);
        for pattern in self.entry(&local) {
            if *pattern != local {
                next_states.insert(state.scatter(&self.sites, pattern)?);
            }
        }
        Ok(next_states)
    }
}

impl std::fmt::Display for LocalEditMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LocalEditMap: sites={:?}, subspaces=[", self.sites())?;
        for (index, subspace) in self.subspaces().into_iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write_states(f, subspace)?;
        }
        write!(f, "]")
    }
}
