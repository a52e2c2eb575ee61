use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::BTreeSet;

/// Checks every structural property of the tree, panicking on the first one
/// that fails.
pub(crate) fn validate_set<T, C: Comparator<T>>(s: &SortedSet<T, C>) {
    let bottom = s.nodes.get(BOTTOM);
    assert_eq!(bottom.level, 0, "sentinel level must stay 0");
    assert!(bottom.value.is_none(), "sentinel must not hold a value");
    assert_eq!(
        (bottom.left, bottom.right, bottom.parent),
        (BOTTOM, BOTTOM, BOTTOM),
        "sentinel links must point at itself"
    );

    let mut stack: Vec<NodeId> = Vec::new();
    if !s.root.is_bottom() {
        assert!(s.parent(s.root).is_bottom(), "root must not have a parent");
        stack.push(s.root);
    }

    let mut count = 0usize;
    while let Some(id) = stack.pop() {
        count += 1;
        let node = s.nodes.get(id);
        assert!(node.value.is_some(), "reachable node {id:?} holds no value");
        let (level, l, r) = (node.level, node.left, node.right);
        assert!(level >= 1, "real node {id:?} has level 0");

        if l.is_bottom() && r.is_bottom() {
            assert_eq!(level, 1, "leaf {id:?} must be at level 1");
        }
        assert_eq!(s.level(l) + 1, level, "left child of {id:?} must be one level down");
        assert!(
            s.level(r) == level || s.level(r) + 1 == level,
            "right child of {id:?} must be at the same level or one down"
        );
        assert!(
            s.level(s.right(r)) < level,
            "two consecutive horizontal right links below {id:?}"
        );
        if level > 1 {
            assert!(
                !l.is_bottom() && !r.is_bottom(),
                "internal node {id:?} must have two children"
            );
        }

        for child in [l, r] {
            if !child.is_bottom() {
                assert_eq!(s.parent(child), id, "parent link of {child:?} is stale");
                stack.push(child);
            }
        }
    }

    assert_eq!(count, s.len, "reachable node count must match SortedSet::len");
    assert_eq!(count, s.nodes.live(), "arena holds unreachable live nodes");

    let forward: Vec<&T> = s.iter().collect();
    assert_eq!(forward.len(), s.len);
    for pair in forward.windows(2) {
        assert_eq!(
            s.order.compare(pair[0], pair[1]),
            Ordering::Less,
            "iteration must be strictly increasing"
        );
    }
    let mut backward: Vec<&T> = s.backward().collect();
    backward.reverse();
    assert!(
        forward.iter().zip(&backward).all(|(a, b)| std::ptr::eq(*a, *b)),
        "backward iteration must mirror forward iteration"
    );
}

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[proptest(weight = 5)]
    Insert(#[proptest(strategy = "0i32..256")] i32),
    #[proptest(weight = 3)]
    Remove(#[proptest(strategy = "0i32..256")] i32),
    #[proptest(weight = 2)]
    Contains(#[proptest(strategy = "0i32..256")] i32),
    #[proptest(weight = 3)]
    InsertNearby {
        #[proptest(strategy = "0i32..256")]
        anchor: i32,
        #[proptest(strategy = "0i32..256")]
        x: i32,
    },
    #[proptest(weight = 2)]
    Ceiling(#[proptest(strategy = "0i32..256")] i32),
    Compact,
}

/// Replays `ops` against `s` and a `BTreeSet` model. With `descending`, `s`
/// is expected to order elements from largest to smallest.
fn run_ops<C: Comparator<i32>>(
    mut s: SortedSet<i32, C>,
    ops: Vec<Op>,
    descending: bool,
) -> Result<(), TestCaseError> {
    let mut m: BTreeSet<i32> = BTreeSet::new();

    for op in ops {
        match op {
            Op::Insert(x) => prop_assert_eq!(s.insert(x), m.insert(x)),
            Op::Remove(x) => prop_assert_eq!(s.remove(&x), m.remove(&x)),
            Op::Contains(x) => prop_assert_eq!(s.contains(&x), m.contains(&x)),
            Op::InsertNearby { anchor, x } => {
                let added = match s.find_greater_or_equal_mut(&anchor) {
                    Some(at) => {
                        let (at, added) = at.insert_nearby(x);
                        prop_assert_eq!(*at.value(), x);
                        added
                    }
                    None => s.insert(x),
                };
                prop_assert_eq!(added, m.insert(x));
            }
            Op::Ceiling(x) => {
                let got = s.find_greater_or_equal(&x).map(|it| *it.value());
                let want = if descending {
                    m.range(..=x).next_back().copied()
                } else {
                    m.range(x..).next().copied()
                };
                prop_assert_eq!(got, want);
            }
            Op::Compact => {
                s.compact();
            }
        }

        prop_assert_eq!(s.len(), m.len());
    }

    validate_set(&s);
    let got: Vec<i32> = s.iter().copied().collect();
    let mut expected: Vec<i32> = m.iter().copied().collect();
    if descending {
        expected.reverse();
    }
    prop_assert_eq!(got, expected);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_natural(ops in prop::collection::vec(any::<Op>(), 0..=1000)) {
        run_ops(SortedSet::new(), ops, false)?;
    }

    #[test]
    fn prop_equivalence_descending(ops in prop::collection::vec(any::<Op>(), 0..=1000)) {
        let s = SortedSet::with_comparator(|a: &i32, b: &i32| b.cmp(a));
        run_ops(s, ops, true)?;
    }

    #[test]
    fn prop_insert_nearby_matches_insert(values in prop::collection::vec(any::<i16>(), 1..=500)) {
        let mut plain: SortedSet<i16> = SortedSet::new();
        for &v in &values {
            plain.insert(v);
        }

        let mut nearby: SortedSet<i16> = SortedSet::new();
        nearby.insert(values[0]);
        let mut at = nearby.first_mut().unwrap();
        for &v in &values[1..] {
            let (next, _) = at.insert_nearby(v);
            prop_assert_eq!(*next.value(), v);
            at = next;
        }

        validate_set(&nearby);
        prop_assert!(nearby.iter().eq(plain.iter()));
    }

    #[test]
    fn prop_remove_everything(
        values in prop::collection::btree_set(any::<i32>(), 0..=300),
        seed in any::<u64>(),
    ) {
        use rand::rngs::StdRng;
        use rand::seq::SliceRandom;
        use rand::SeedableRng;

        let mut s: SortedSet<i32> = values.iter().copied().collect();
        prop_assert_eq!(s.len(), values.len());

        let mut order: Vec<i32> = values.into_iter().collect();
        order.shuffle(&mut StdRng::seed_from_u64(seed));
        for x in order {
            let before: Vec<i32> = s.iter().copied().filter(|&y| y != x).collect();
            prop_assert!(s.remove(&x));
            prop_assert!(!s.remove(&x));
            prop_assert_eq!(s.iter().copied().collect::<Vec<_>>(), before);
        }
        prop_assert!(s.is_empty());
        validate_set(&s);
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn exhaustive_insert_order_small_set() {
    let keys: Vec<u8> = (1..=7).collect();

    for_each_permutation(&keys, |perm| {
        let mut s = SortedSet::new();
        for &k in &perm {
            assert!(s.insert(k));
            validate_set(&s);
        }
        assert_eq!(s.iter().copied().collect::<Vec<_>>(), keys);
    });
}

#[test]
fn exhaustive_remove_order_small_set() {
    let keys: Vec<u8> = (1..=7).collect();
    let base: SortedSet<u8> = keys.iter().copied().collect();

    for_each_permutation(&keys, |perm| {
        let mut s = base.clone();
        let mut left: BTreeSet<u8> = keys.iter().copied().collect();

        for k in perm {
            assert!(s.remove(&k));
            left.remove(&k);
            assert_eq!(s.len(), left.len());
            validate_set(&s);
            assert!(s.iter().eq(left.iter()));
        }
        assert!(s.is_empty());
        assert!(s.root.is_bottom());
    });
}

#[test]
fn exhaustive_nearby_insert_order_small_set() {
    let keys: Vec<u8> = (1..=7).collect();

    for_each_permutation(&keys, |perm| {
        let mut s = SortedSet::new();
        s.insert(perm[0]);
        let mut at = s.first_mut().unwrap();
        for &k in &perm[1..] {
            let (next, added) = at.insert_nearby(k);
            assert!(added);
            at = next;
        }
        validate_set(&s);
        assert_eq!(s.iter().copied().collect::<Vec<_>>(), keys);
    });
}
