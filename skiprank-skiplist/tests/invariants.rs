//! Random operation sequences checked against `BTreeMap`, with the
//! structural invariants verified after every step.

use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use proptest::prelude::*;
use proptest::test_runner::Config;
use skiprank_skiplist::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert(u16, u32),
    Delete(u16),
    Search(u16),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u16..256, any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        2 => (0u16..256).prop_map(Op::Delete),
        1 => (0u16..256).prop_map(Op::Search),
    ]
}

fn check_structure(list: &SkipList<u16, u32>) -> Result<(), TestCaseError> {
    let current = list.current_level();
    prop_assert!(current <= list.max_level());

    let levels = (0..=current)
        .map(|level| list.level_nodes(level).map(|n| *n.key()).collect_vec())
        .collect_vec();

    prop_assert_eq!(levels[0].len(), list.len());
    if list.is_empty() {
        prop_assert_eq!(current, 0);
    } else {
        prop_assert!(!levels[current].is_empty());
    }

    for keys in &levels {
        for (a, b) in keys.iter().tuple_windows() {
            prop_assert!(a < b);
        }
    }

    for (lower, upper) in levels.iter().tuple_windows() {
        let lower: BTreeSet<_> = lower.iter().collect();
        for key in upper {
            prop_assert!(lower.contains(key));
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(Config {
        cases: 128,
        ..Config::default()
    })]

    #[test]
    fn prop_matches_btree_map(
        seed in any::<u64>(),
        max_level in 1usize..12,
        p in 0.05f64..0.95,
        ops in prop::collection::vec(op(), 0..400),
    ) {
        let mut list = SkipList::with_seed(max_level, p, seed).unwrap();
        let mut model = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    prop_assert_eq!(list.insert(k, v), model.insert(k, v));
                    prop_assert_eq!(list.search(&k).map(|n| *n.value()), Some(v));
                }
                Op::Delete(k) => {
                    let before = list.len();
                    let removed = list.delete(&k);
                    prop_assert_eq!(removed, model.remove_entry(&k));
                    let expected = if removed.is_some() { before - 1 } else { before };
                    prop_assert_eq!(list.len(), expected);
                    prop_assert!(list.search(&k).is_none());
                }
                Op::Search(k) => {
                    prop_assert_eq!(list.get(&k), model.get(&k));
                }
            }
            check_structure(&list)?;
        }

        prop_assert_eq!(
            list.iter().map(|(k, v)| (*k, *v)).collect_vec(),
            model.into_iter().collect_vec()
        );
    }

    #[test]
    fn prop_overwrite_keeps_size(
        keys in prop::collection::btree_set(any::<u16>(), 1..64),
        seed in any::<u64>(),
    ) {
        let mut list = SkipList::with_seed(10, 0.5, seed).unwrap();
        for &k in &keys {
            list.insert(k, 1);
        }
        let size = list.len();
        for &k in &keys {
            prop_assert_eq!(list.insert(k, 2), Some(1));
        }
        prop_assert_eq!(list.len(), size);
        prop_assert!(list.iter().all(|(_, v)| *v == 2));
        check_structure(&list)?;
    }

    #[test]
    fn prop_last_is_max(
        pairs in prop::collection::vec((any::<u16>(), any::<u32>()), 1..128),
    ) {
        let mut list = SkipList::new(10, 0.5);
        list.extend(pairs.iter().copied());
        let max = pairs.iter().map(|(k, _)| *k).max();
        prop_assert_eq!(list.last().map(|n| *n.key()), max);
        prop_assert_eq!(list.level_nodes(0).last().map(|n| *n.key()), max);
    }
}
