use std::collections::BTreeSet;

use avl_arena::AvlTreeSet;
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

#[test]
fn random_interleaving_oracle_matrix() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(0x5eed);
    let mut tree = AvlTreeSet::<i32>::new();
    let mut oracle = BTreeSet::<i32>::new();

    for step in 0..5000 {
        let v = rng.gen_range(0..400);
        if rng.gen_bool(0.6) {
            assert_eq!(tree.add(Some(v)), oracle.insert(v), "add {v} at step {step}");
        } else {
            assert_eq!(
                tree.remove(Some(&v)),
                oracle.remove(&v),
                "remove {v} at step {step}"
            );
        }
        assert_eq!(tree.size(), oracle.len());
        tree.assert_valid().unwrap();
    }

    for v in 0..400 {
        assert_eq!(tree.contains(Some(&v)), oracle.contains(&v));
    }
}

#[test]
fn random_interleaving_with_null_matrix() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(0xfeed);
    let mut tree = AvlTreeSet::<i32>::new();
    let mut oracle = BTreeSet::<i32>::new();
    let mut oracle_null = false;

    for _ in 0..2000 {
        let add = rng.gen_bool(0.55);
        if rng.gen_bool(0.05) {
            if add {
                assert_eq!(tree.add(None), !oracle_null);
                oracle_null = true;
            } else {
                assert_eq!(tree.remove(None), oracle_null);
                oracle_null = false;
            }
        } else {
            let v = rng.gen_range(0..200);
            if add {
                assert_eq!(tree.add(Some(v)), oracle.insert(v));
            } else {
                assert_eq!(tree.remove(Some(&v)), oracle.remove(&v));
            }
        }
        assert_eq!(tree.size(), oracle.len() + usize::from(oracle_null));
        assert_eq!(tree.contains(None), oracle_null);
        tree.assert_valid().unwrap();
    }
}

proptest! {
    #[test]
    fn invariants_hold_after_any_insert_sequence(values in prop::collection::vec(-1000i32..1000, 0..200)) {
        let mut tree = AvlTreeSet::<i32>::new();
        let mut oracle = BTreeSet::new();
        for v in values {
            prop_assert_eq!(tree.add(Some(v)), oracle.insert(v));
            prop_assert_eq!(tree.size(), oracle.len());
        }
        prop_assert!(tree.is_balanced());
        tree.assert_valid().unwrap();
    }

    #[test]
    fn insert_then_drain_leaves_empty_tree(
        values in prop::collection::vec(-500i32..500, 1..150),
        drain_reversed in any::<bool>(),
    ) {
        let mut tree = AvlTreeSet::<i32>::new();
        let mut distinct = BTreeSet::new();
        for &v in &values {
            tree.add(Some(v));
            distinct.insert(v);
        }
        prop_assert_eq!(tree.size(), distinct.len());

        let mut order: Vec<i32> = distinct.into_iter().collect();
        if drain_reversed {
            order.reverse();
        }
        for v in order {
            prop_assert!(tree.contains(Some(&v)));
            prop_assert!(tree.remove(Some(&v)));
            prop_assert!(!tree.contains(Some(&v)));
            prop_assert!(tree.is_balanced());
        }
        prop_assert_eq!(tree.size(), 0);
        prop_assert!(tree.root.is_none());
        prop_assert!(tree.is_balanced());
    }

    #[test]
    fn duplicate_insert_is_rejected(v in any::<i32>()) {
        let mut tree = AvlTreeSet::<i32>::new();
        prop_assert!(tree.add(Some(v)));
        prop_assert!(!tree.add(Some(v)));
        prop_assert!(tree.contains(Some(&v)));
        prop_assert_eq!(tree.size(), 1);
    }
}
