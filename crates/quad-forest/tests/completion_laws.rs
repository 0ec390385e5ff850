//! Property-based and end-to-end checks for `region_complete`.

use std::any::Any;
use std::cmp::Ordering;

use proptest::prelude::*;
use quad::{Quadrant, MAX_LEVEL};
use quad_forest::{region_complete, Endpoints, ForestContext, Tree};

fn no_data(_which_tree: i32, _q: &Quadrant) -> Box<dyn Any> {
    Box::new(())
}

/// A valid quadrant at a random level, aligned to that level's cell
/// side by construction. Shared in spirit with `quad`'s own strategy,
/// duplicated here since integration tests cannot import a sibling
/// crate's test-only helpers.
fn arb_quadrant() -> impl Strategy<Value = Quadrant> {
    (0i8..=MAX_LEVEL).prop_flat_map(|level| {
        let cells_per_side = 1i64 << level as i64;
        (Just(level), 0..cells_per_side, 0..cells_per_side).prop_map(
            move |(level, xc, yc)| {
                let shift = (MAX_LEVEL - level) as i64;
                Quadrant::new((xc << shift) as i32, (yc << shift) as i32, level)
            },
        )
    })
}

fn no_quadrant_pair_overlaps(tree: &Tree) -> bool {
    let quadrants = tree.quadrants.as_slice();
    for i in 0..quadrants.len() {
        for j in (i + 1)..quadrants.len() {
            let a = &quadrants[i].quadrant;
            let b = &quadrants[j].quadrant;
            if a.is_ancestor(b) || b.is_ancestor(a) || a.is_equal(b) {
                return false;
            }
        }
    }
    true
}

fn run_completion(a: Quadrant, b: Quadrant, endpoints: Endpoints, data_size: usize) -> (ForestContext, Tree) {
    let mut ctx = ForestContext::new(data_size);
    let mut tree = Tree::new();
    region_complete(&mut ctx, a, b, endpoints, &mut tree, 0, no_data);
    (ctx, tree)
}

proptest! {
    #[test]
    fn completion_is_sorted_complete_and_non_overlapping(
        a in arb_quadrant(), b in arb_quadrant(), include_a in any::<bool>(), include_b in any::<bool>(),
    ) {
        prop_assume!(quad::compare(&a, &b) == Ordering::Less);

        let mut endpoints = Endpoints::empty();
        if include_a { endpoints |= Endpoints::A; }
        if include_b { endpoints |= Endpoints::B; }

        let (ctx, tree) = run_completion(a, b, endpoints, 0);

        prop_assert!(tree.is_sorted());
        prop_assert!(tree.is_complete());
        prop_assert!(no_quadrant_pair_overlaps(&tree));
        prop_assert_eq!(ctx.quadrant_pool_len(), 0);

        if include_a {
            prop_assert_eq!(tree.quadrants.as_slice()[0].quadrant, a);
        }
        if include_b && !tree.is_empty() {
            prop_assert_eq!(tree.quadrants.as_slice()[tree.len() - 1].quadrant, b);
        }
    }

    #[test]
    fn user_data_pool_delta_matches_output_length_when_active(
        a in arb_quadrant(), b in arb_quadrant(),
    ) {
        prop_assume!(quad::compare(&a, &b) == Ordering::Less);

        let (ctx, tree) = run_completion(a, b, Endpoints::all(), 8);
        prop_assert_eq!(ctx.user_data_pool_len(), tree.len());
    }
}

#[test]
fn scenario_identity_completion() {
    let a = Quadrant::new(0, 0, MAX_LEVEL);
    let b = Quadrant::new(1, 0, MAX_LEVEL);
    let (_, tree) = run_completion(a, b, Endpoints::all(), 0);

    let quadrants: Vec<_> = tree.quadrants.as_slice().iter().map(|s| s.quadrant).collect();
    assert_eq!(quadrants, vec![a, b]);
}

#[test]
fn scenario_two_corner_root_fill() {
    let root = Quadrant::ROOT;
    let [c0, _, _, c3] = root.children();
    let (_, tree) = run_completion(c0, c3, Endpoints::all(), 0);

    let expected = root.children();
    let quadrants: Vec<_> = tree.quadrants.as_slice().iter().map(|s| s.quadrant).collect();
    assert_eq!(quadrants, expected.to_vec());
}

#[test]
fn scenario_asymmetric_l_shaped_region() {
    let level = 2;
    let side = 1i32 << (MAX_LEVEL - level);
    let a = Quadrant::new(0, 0, level);
    let b = Quadrant::new(side + (side << 1), side + (side << 1), level);
    // b = (2^29 + 2^28, 2^29 + 2^28) at level 2, per the scenario table.
    assert_eq!(b.x(), (1 << 29) + (1 << 28));

    let (ctx, tree) = run_completion(a, b, Endpoints::all(), 0);

    assert!(tree.is_sorted());
    assert!(tree.is_complete());
    assert!(no_quadrant_pair_overlaps(&tree));
    assert_eq!(ctx.quadrant_pool_len(), 0);
    assert_eq!(tree.quadrants.as_slice()[0].quadrant, a);
    assert_eq!(tree.quadrants.as_slice()[tree.len() - 1].quadrant, b);
}

#[test]
fn scenario_exclude_both_endpoints() {
    let root = Quadrant::ROOT;
    let [c0, _, _, c3] = root.children();
    let (ctx, tree) = run_completion(c0, c3, Endpoints::empty(), 8);

    assert!(tree.is_sorted());
    assert!(tree.is_complete());
    assert_eq!(ctx.user_data_pool_len(), tree.len());
}

#[test]
fn scenario_adjacent_siblings_include_both_vs_neither() {
    let root = Quadrant::ROOT;
    let [c0, c1, ..] = root.children();
    assert!(c0.is_next(&c1));

    let (_, included) = run_completion(c0, c1, Endpoints::all(), 0);
    let quadrants: Vec<_> = included.quadrants.as_slice().iter().map(|s| s.quadrant).collect();
    assert_eq!(quadrants, vec![c0, c1]);

    let (_, excluded) = run_completion(c0, c1, Endpoints::empty(), 0);
    assert!(excluded.is_empty());
}

#[test]
fn scenario_deep_to_shallow_chain() {
    let root = Quadrant::ROOT;
    let [c0, ..] = root.children();
    let [_, _, _, gc3] = c0.children();
    let [_, _, _, a] = gc3.children();

    let [_, b, ..] = root.children();
    assert!(a.is_next(&b));

    let (ctx, tree) = run_completion(a, b, Endpoints::all(), 0);
    assert!(tree.is_complete());
    assert_eq!(ctx.quadrant_pool_len(), 0);
    assert_eq!(tree.quadrants.as_slice()[0].quadrant, a);
    assert_eq!(tree.quadrants.as_slice()[tree.len() - 1].quadrant, b);
}
