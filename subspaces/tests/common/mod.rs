#![allow(dead_code)]

use bitrel::BoolMatrix;
use proptest::prelude::*;
use subspaces::{LocalEditMap, SubspaceSystem};

/// Heisenberg XXX exchange on two sites: `01 <-> 10`, `00` and `11` fixed.
pub fn exchange_support() -> BoolMatrix {
    "1000|0110|0110|0001".parse().unwrap()
}

/// T6 cellular automaton rule on `(left, center, right)`: the center flips when exactly one
/// neighbor is set.
pub fn t6_support() -> BoolMatrix {
    BoolMatrix::from_fn(8, 8, |sink, source| {
        let left = (source >> 2) & 1;
        let right = source & 1;
        sink == source || (left ^ right == 1 && sink == source ^ 0b010)
    })
}

/// F4 cellular automaton rule on five sites `(left, left, center, right, right)`: the center
/// flips when exactly two of its four neighbors are set.
pub fn f4_support() -> BoolMatrix {
    BoolMatrix::from_fn(32, 32, |sink, source| {
        let neighbors = source & 0b11011;
        sink == source || (neighbors.count_ones() == 2 && sink == source ^ 0b00100)
    })
}

/// Flips two bits at a time, so it preserves parity on three sites.
pub fn parity_support() -> BoolMatrix {
    BoolMatrix::from_fn(8, 8, |sink, source| (sink ^ source).count_ones() == 2)
}

pub fn nearest_neighbor_chain(support: &BoolMatrix, length: usize, arity: usize) -> SubspaceSystem {
    (0..=length - arity)
        .map(|start| LocalEditMap::new(support, start..start + arity).unwrap())
        .collect()
}

prop_compose! {
    pub fn arbitrary_support(max_arity: usize)(arity in 1..=max_arity)
        (bits in prop::collection::vec(prop::bool::weighted(0.1), (1 << arity) * (1 << arity)), arity in Just(arity)) -> (BoolMatrix, usize) {
        let dimension = 1 << arity;
        (BoolMatrix::from_fn(dimension, dimension, |row, column| bits[row * dimension + column]), arity)
    }
}

prop_compose! {
    /// A system of 1 to 3 random operators, each tiled along a chain of `length` sites.
    pub fn arbitrary_system(length: usize)(supports in prop::collection::vec(arbitrary_support(2), 1..=3)) -> SubspaceSystem {
        supports
            .iter()
            .flat_map(|(support, arity)| {
                (0..=length - arity).map(move |start| LocalEditMap::new(support, start..start + arity).unwrap())
            })
            .collect()
    }
}
