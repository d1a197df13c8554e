use crate::{write_states, LocalEditMap, StateSet};
use bitrel::{BitString, Result};
use derive_more::{From, Into};
use log::{debug, trace};
use std::collections::{HashMap, HashSet};

/// A collection of local operators acting together on a chain of sites.
///
/// One step of the system applies any single operator once, or none. Reachability under
/// repeated steps is an equivalence relation, because every local relation is, so the state
/// space splits into disjoint closure classes (symmetry-protected subspaces).
///
/// # Example
///
/// ```
/// use bitrel::BoolMatrix;
/// use subspaces::{LocalEditMap, SubspaceSystem};
///
/// let exchange: BoolMatrix = "1000|0110|0110|0001".parse().unwrap();
/// let system: SubspaceSystem = (0..2)
///     .map(|site| LocalEditMap::new(&exchange, [site, site + 1]))
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// // Exchange conserves the number of ones: 4 classes of sizes 1, 3, 3, 1.
/// let partition = system.partition(3).unwrap();
/// assert_eq!(partition.sizes(), vec![1, 3, 3, 1]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, From, Into)]
pub struct SubspaceSystem {
    maps: Vec<LocalEditMap>,
}

impl SubspaceSystem {
    pub fn new(maps: Vec<LocalEditMap>) -> Self {
        Self { maps }
    }

    #[must_use]
    pub fn maps(&self) -> &[LocalEditMap] {
        &self.maps
    }

    /// States reachable from `state` by applying at most one operator once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`](bitrel::Error::OutOfRange) if an operator acts on a site
    /// past the end of `state`.
    pub fn one_step(&self, state: &BitString) -> Result<StateSet> {
        let mut neighbors = StateSet::from([*state]);
        for local_map in &self.maps {
            neighbors.extend(local_map.map(state)?);
        }
        Ok(neighbors)
    }

    /// Breadth-first closure of `initial` under [`one_step`](Self::one_step).
    ///
    /// With `hop_limit` set, at most that many layers are expanded: `Some(0)` yields just
    /// `initial` and `Some(1)` equals `one_step`. With `None` the search runs until no new
    /// state appears, which may visit up to `2^n` states.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`](bitrel::Error::OutOfRange) if an operator acts on a site
    /// past the end of `initial`.
    pub fn transitive_closure(&self, initial: &BitString, hop_limit: Option<usize>) -> Result<StateSet> {
        let mut visited = HashSet::from([*initial]);
        let mut frontier = vec![*initial];
        let mut layers = 0usize;
        while !frontier.is_empty() && !hop_limit.is_some_and(|limit| layers >= limit) {
            let mut next_frontier = Vec::new();
            for state in &frontier {
                for next in self.one_step(state)? {
                    if visited.insert(next) {
                        next_frontier.push(next);
                    }
                }
            }
            layers += 1;
            trace!("layer {layers} from {initial}: {} new states", next_frontier.len());
            frontier = next_frontier;
        }
        Ok(visited.into_iter().collect())
    }

    /// Splits all `2^system_size` states into closure classes.
    ///
    /// States are enumerated in increasing numeric order and each class is seeded by the first
    /// state not yet assigned, so classes come out ordered by their smallest member.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`](bitrel::Error::OutOfRange) if `system_size` exceeds
    /// [`MAX_SITES`](bitrel::MAX_SITES) or an operator acts on a site at or beyond
    /// `system_size`.
    pub fn partition(&self, system_size: usize) -> Result<Partition> {
        let mut classes = Vec::new();
        let mut class_indexes = HashMap::new();
        for state in BitString::all(system_size)? {
            if class_indexes.contains_key(&state) {
                continue;
            }
            let class = self.transitive_closure(&state, None)?;
            let index = classes.len();
            class_indexes.extend(class.iter().map(|member| (*member, index)));
            debug!("subspace {index} seeded by {state} holds {} states", class.len());
            classes.push(class);
        }
        Ok(Partition {
            system_size,
            classes,
            class_indexes,
        })
    }
}

impl FromIterator<LocalEditMap> for SubspaceSystem {
    fn from_iter<Iterator: IntoIterator<Item = LocalEditMap>>(iterator: Iterator) -> Self {
        Self::new(iterator.into_iter().collect())
    }
}

impl std::fmt::Display for SubspaceSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SubspaceSystem with {} local edit maps:", self.maps.len())?;
        for local_map in &self.maps {
            writeln!(f, "{local_map}")?;
        }
        Ok(())
    }
}

/// The closure classes of every state of a fixed system size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    system_size: usize,
    classes: Vec<StateSet>,
    class_indexes: HashMap<BitString, usize>,
}

impl Partition {
    #[must_use]
    pub fn system_size(&self) -> usize {
        self.system_size
    }

    /// Number of classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    #[must_use]
    pub fn classes(&self) -> &[StateSet] {
        &self.classes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StateSet> {
        self.classes.iter()
    }

    /// Position of the class holding `state`, or `None` for a state of another length.
    #[must_use]
    pub fn class_index(&self, state: &BitString) -> Option<usize> {
        self.class_indexes.get(state).copied()
    }

    #[must_use]
    pub fn class_of(&self, state: &BitString) -> Option<&StateSet> {
        self.class_index(state).map(|index| &self.classes[index])
    }

    /// Class sizes, in class order.
    #[must_use]
    pub fn sizes(&self) -> Vec<usize> {
        self.classes.iter().map(StateSet::len).collect()
    }

    #[must_use]
    pub fn into_classes(self) -> Vec<StateSet> {
        self.classes
    }
}

impl<'life> IntoIterator for &'life Partition {
    type Item = &'life StateSet;
    type IntoIter = std::slice::Iter<'life, StateSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.classes.iter()
    }
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Partition of {} sites into {} subspaces:", self.system_size, self.len())?;
        for class in &self.classes {
            write_states(f, class)?;
            writeln!(f)?;
        }
        Ok(())
    }
}
