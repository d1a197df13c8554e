mod common;

use bitrel::{BitString, BoolMatrix, Error};
use common::{arbitrary_system, exchange_support, nearest_neighbor_chain};
use proptest::prelude::*;
use subspaces::{canonical_representative, greedy_min_search, LocalEditMap, MeasurementVerifier, SubspaceSystem};

fn bits(text: &str) -> BitString {
    text.parse().unwrap()
}

fn weight_two_mixer() -> SubspaceSystem {
    let support = BoolMatrix::from_fn(8, 8, |sink, source| {
        sink == source || (sink.count_ones() == 2 && source.count_ones() == 2)
    });
    vec![LocalEditMap::new(&support, [0, 1, 2]).unwrap()].into()
}

proptest! {
    #[test]
    fn representative_stays_in_the_subspace(system in arbitrary_system(4), value in 0u64..16, max_depth in 0usize..4) {
        let state = BitString::new(value, 4).unwrap();
        let search = greedy_min_search(&system, &state, max_depth).unwrap();
        assert!(search.representative <= state);
        assert!(search.rounds >= 1);
        let closure = system.transitive_closure(&state, None).unwrap();
        assert!(closure.contains(&search.representative));
    }

    #[test]
    fn deep_search_finds_the_subspace_minimum(system in arbitrary_system(4), value in 0u64..16) {
        let state = BitString::new(value, 4).unwrap();
        let partition = system.partition(4).unwrap();
        let minimum = *partition.class_of(&state).unwrap().iter().next().unwrap();
        assert_eq!(canonical_representative(&system, &state, 16).unwrap(), minimum);
    }

    #[test]
    fn deep_search_is_idempotent(system in arbitrary_system(4), value in 0u64..16) {
        let state = BitString::new(value, 4).unwrap();
        let representative = canonical_representative(&system, &state, 16).unwrap();
        let again = greedy_min_search(&system, &representative, 16).unwrap();
        assert_eq!(again.representative, representative);
        assert_eq!(again.rounds, 1);
    }

    #[test]
    fn shallow_search_is_idempotent(system in arbitrary_system(5), value in 0u64..32, max_depth in 1usize..4) {
        let state = BitString::new(value, 5).unwrap();
        let representative = canonical_representative(&system, &state, max_depth).unwrap();
        assert_eq!(canonical_representative(&system, &representative, max_depth).unwrap(), representative);
        let again = greedy_min_search(&system, &representative, max_depth).unwrap();
        assert_eq!(again.representative, representative);
        assert_eq!(again.rounds, 1);
    }

    #[test]
    fn verifier_never_accepts_a_foreign_subspace(
        system in arbitrary_system(4),
        initial in 0u64..16,
        outcomes in prop::collection::vec(0u64..16, 0..20),
        max_depth in 0usize..3
    ) {
        let initial = BitString::new(initial, 4).unwrap();
        let outcomes: Vec<BitString> = outcomes.into_iter().map(|value| BitString::new(value, 4).unwrap()).collect();
        let verifier = MeasurementVerifier::new(&system, initial, max_depth).unwrap();
        let subspace = system.transitive_closure(&initial, None).unwrap();
        for outcome in verifier.post_select(&outcomes).unwrap() {
            assert!(subspace.contains(&outcome));
        }
    }
}

#[test]
fn weight_two_mixer_descends_in_one_hop() {
    let system = weight_two_mixer();
    assert_eq!(canonical_representative(&system, &bits("110"), 1).unwrap(), bits("011"));
    assert_eq!(canonical_representative(&system, &bits("100"), 1).unwrap(), bits("100"));
}

#[test]
fn shallow_search_can_stop_above_the_minimum() {
    // Two operators: 100 reaches 001 only through the larger 111.
    let mut first = BoolMatrix::identity(8);
    first.set((0b111, 0b100), true);
    let mut second = BoolMatrix::identity(8);
    second.set((0b001, 0b111), true);
    let system: SubspaceSystem = vec![
        LocalEditMap::new(&first, [0, 1, 2]).unwrap(),
        LocalEditMap::new(&second, [0, 1, 2]).unwrap(),
    ]
    .into();
    let state = bits("100");
    assert_eq!(canonical_representative(&system, &state, 1).unwrap(), state);
    assert_eq!(canonical_representative(&system, &state, 2).unwrap(), bits("001"));
}

#[test]
fn search_reports_rounds() {
    let system = nearest_neighbor_chain(&exchange_support(), 5, 2);
    let search = greedy_min_search(&system, &bits("10000"), 1).unwrap();
    assert_eq!(search.representative, bits("00001"));
    assert_eq!(search.rounds, 5);
}

#[test]
fn short_states_are_out_of_range() {
    let system = nearest_neighbor_chain(&exchange_support(), 4, 2);
    assert_eq!(
        greedy_min_search(&system, &bits("010"), 2),
        Err(Error::OutOfRange { index: 3, length: 3 })
    );
}

#[test]
fn verifier_keeps_outcomes_of_the_initial_subspace() {
    let system = nearest_neighbor_chain(&exchange_support(), 4, 2);
    let verifier = MeasurementVerifier::new(&system, bits("0101"), 4).unwrap();
    assert_eq!(verifier.target(), bits("0011"));
    assert_eq!(verifier.initial_condition(), bits("0101"));
    assert_eq!(verifier.max_depth(), 4);
    assert!(verifier.accepts(&bits("1010")).unwrap());
    assert!(!verifier.accepts(&bits("1110")).unwrap());

    let outcomes = vec![bits("1100"), bits("0001"), bits("1001"), bits("1100"), bits("1111")];
    assert_eq!(
        verifier.post_select(&outcomes).unwrap(),
        vec![bits("1100"), bits("1001"), bits("1100")]
    );
}

#[test]
fn verifier_rejects_mismatched_lengths() {
    let system = nearest_neighbor_chain(&exchange_support(), 4, 2);
    let verifier = MeasurementVerifier::new(&system, bits("0101"), 2).unwrap();
    assert_eq!(
        verifier.post_select(&[bits("0101"), bits("011")]),
        Err(Error::LengthMismatch { expected: 4, found: 3 })
    );
    assert_eq!(
        verifier.post_select(&[bits("011"), bits("110")]),
        Err(Error::OutOfRange { index: 3, length: 4 })
    );
    assert_eq!(
        verifier.accepts(&bits("01011")),
        Err(Error::OutOfRange { index: 5, length: 4 })
    );
}

#[test]
fn acceptance_rate_counts_duplicates() {
    let system = nearest_neighbor_chain(&exchange_support(), 4, 2);
    let verifier = MeasurementVerifier::new(&system, bits("0101"), 4).unwrap();
    let outcomes = [bits("0101"), bits("1111"), bits("0101"), bits("0000")];
    assert!((verifier.acceptance_rate(&outcomes).unwrap() - 0.5).abs() < f64::EPSILON);
    assert!(verifier.acceptance_rate(std::iter::empty()).unwrap().abs() < f64::EPSILON);
}
