//! Property-based tests for tessera-index using proptest.

use std::collections::{BTreeMap, BTreeSet};
use tessera_core::{fields, Value};
use tessera_index::{FieldIndex, HashIndex, Index};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Add(i64, u64),
    Remove(i64, u64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0i64..20, 0u64..200).prop_map(|(k, id)| Op::Add(k, id)),
        (0i64..20, 0u64..200).prop_map(|(k, id)| Op::Remove(k, id)),
    ]
}

proptest! {
    /// HashIndex agrees with a BTreeSet model after any add/remove sequence.
    #[test]
    fn hash_index_matches_model(ops in prop::collection::vec(op_strategy(), 1..400)) {
        let mut index: HashIndex<i64> = HashIndex::new();
        let mut model: BTreeMap<i64, BTreeSet<u64>> = BTreeMap::new();

        for op in &ops {
            match *op {
                Op::Add(k, id) => {
                    index.add(k, id);
                    model.entry(k).or_default().insert(id);
                }
                Op::Remove(k, id) => {
                    let expected = model.get_mut(&k).map(|s| s.remove(&id)).unwrap_or(false);
                    prop_assert_eq!(index.remove(&k, id), expected);
                    if model.get(&k).map(|s| s.is_empty()).unwrap_or(false) {
                        model.remove(&k);
                    }
                }
            }
        }

        let total: usize = model.values().map(|s| s.len()).sum();
        prop_assert_eq!(index.len(), total);
        prop_assert_eq!(index.key_count(), model.len());
        for k in 0i64..20 {
            let expected: Vec<u64> = model.get(&k).map(|s| s.iter().copied().collect()).unwrap_or_default();
            prop_assert_eq!(index.get(&k), expected.as_slice());
        }
    }

    /// Refiling a record through a chain of values leaves it only under the last one.
    #[test]
    fn field_index_refile_chain(values in prop::collection::vec(0i64..5, 1..30)) {
        let mut index = FieldIndex::new("v");
        let mut current = Value::Int64(values[0]);
        index.insert(42, &fields([("v", values[0])]));

        for &v in &values[1..] {
            let next = Value::Int64(v);
            index.refile(42, Some(&current), Some(&next));
            current = next;
        }

        prop_assert_eq!(index.len(), 1);
        let last = Value::Int64(*values.last().unwrap());
        prop_assert_eq!(index.lookup(&last), &[42u64][..]);
    }
}
