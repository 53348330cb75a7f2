//! Property tests for flatseg-core
//!
//! Every query is checked against a naive left-to-right fold over a shadow copy of the
//! sequence, and the tree-consistency invariant is checked after every mutation.

use flatseg_core::{FnOperation, Operation, SegmentTree, ops::{BitXor, Gcd, Max, Min, Sum}};
use proptest::{prelude::*, sample::Index};

#[derive(Debug, Clone)]
enum Op<T> {
    Update(Index, T),
    Query(Index, Index),
}

fn op_sequence<T: Arbitrary + Clone + 'static>() -> impl Strategy<Value = Vec<Op<T>>> {
    prop::collection::vec(
        prop_oneof![
            any::<(Index, T)>().prop_map(|(i, v)| Op::Update(i, v)),
            any::<(Index, Index)>().prop_map(|(a, b)| Op::Query(a, b)),
        ],
        0..64,
    )
}

fn naive_fold<T, O: Operation<T>>(op: &O, values: &[T]) -> T {
    values
        .iter()
        .fold(op.identity(), |acc, v| op.combine(&acc, v))
}

/// Applies `ops` to both the tree and a shadow vector and compares every query
fn run_against_shadow<T, O>(values: Vec<T>, op: O, ops: Vec<Op<T>>) -> Result<(), TestCaseError>
where
    T: Clone + PartialEq + std::fmt::Debug,
    O: Operation<T> + Clone,
{
    let mut shadow = values.clone();
    let mut tree = SegmentTree::build(values, op.clone()).unwrap();
    prop_assert!(tree.validate());

    for o in ops {
        match o {
            Op::Update(index, value) => {
                let i = index.index(shadow.len());
                let old = tree.update(i, value.clone()).unwrap();
                prop_assert_eq!(&old, &shadow[i]);
                shadow[i] = value;
                prop_assert!(tree.validate());
            }
            Op::Query(a, b) => {
                let a = a.index(shadow.len() + 1);
                let b = b.index(shadow.len() + 1);
                let (start, end) = (a.min(b), a.max(b));
                prop_assert_eq!(
                    tree.query(start, end).unwrap(),
                    naive_fold(&op, &shadow[start..end])
                );
            }
        }
    }
    prop_assert_eq!(tree.total(), naive_fold(&op, &shadow));
    prop_assert_eq!(tree.leaves(), &shadow[..]);
    Ok(())
}

fn concat_strings(a: &String, b: &String) -> String {
    format!("{a}{b}")
}

type Concat = fn(&String, &String) -> String;

fn concat() -> FnOperation<String, Concat> {
    FnOperation::new(String::new(), concat_strings as Concat)
}

proptest! {
    #[test]
    fn prop_sum_matches_fold(values in prop::collection::vec(any::<u32>(), 1..200), ops in op_sequence::<u32>()) {
        run_against_shadow(values, Sum, ops)?;
    }

    #[test]
    fn prop_min_matches_fold(values in prop::collection::vec(any::<i64>(), 1..200), ops in op_sequence::<i64>()) {
        run_against_shadow(values, Min, ops)?;
    }

    #[test]
    fn prop_max_matches_fold(values in prop::collection::vec(any::<i16>(), 1..200), ops in op_sequence::<i16>()) {
        run_against_shadow(values, Max, ops)?;
    }

    #[test]
    fn prop_xor_matches_fold(values in prop::collection::vec(any::<u64>(), 1..200), ops in op_sequence::<u64>()) {
        run_against_shadow(values, BitXor, ops)?;
    }

    #[test]
    fn prop_gcd_matches_fold(values in prop::collection::vec(0u32..10_000, 1..100), ops in op_sequence::<u32>()) {
        run_against_shadow(values, Gcd, ops)?;
    }

    // concatenation is associative but not commutative
    #[test]
    fn prop_concat_preserves_order(values in prop::collection::vec("[a-z]{0,3}", 1..60), ops in op_sequence::<String>()) {
        run_against_shadow(values, concat(), ops)?;
    }

    #[test]
    fn prop_empty_range_is_identity(values in prop::collection::vec(any::<u32>(), 1..100)) {
        let tree = SegmentTree::build(values.clone(), Sum).unwrap();
        for x in 0..=values.len() {
            prop_assert_eq!(tree.query(x, x), Ok(0));
        }
    }

    #[test]
    fn prop_update_is_local(
        values in prop::collection::vec(any::<i32>(), 1..100),
        index in any::<Index>(),
        value in any::<i32>()
    ) {
        let mut tree = SegmentTree::build(values.clone(), Sum).unwrap();
        let i = index.index(values.len());
        tree.update(i, value).unwrap();
        for (j, v) in values.iter().enumerate() {
            let expected = if j == i { value } else { *v };
            prop_assert_eq!(tree.query(j, j + 1), Ok(expected));
        }
    }

    #[test]
    fn prop_out_of_range_rejected_without_mutation(
        values in prop::collection::vec(any::<u8>(), 1..50),
        offset in 0usize..10
    ) {
        let mut tree = SegmentTree::build(values.clone(), Max).unwrap();
        let len = values.len();
        prop_assert!(tree.update(len + offset, 1).unwrap_err().is_index_out_of_range());
        prop_assert!(tree.query(0, len + offset + 1).unwrap_err().is_invalid_range());
        prop_assert_eq!(tree.leaves(), &values[..]);
        prop_assert!(tree.validate());
    }
}
