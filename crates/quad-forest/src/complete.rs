use alloc::boxed::Box;
use core::any::Any;
use core::cmp::Ordering;

use quad::Quadrant;
use quad_alloc::Worklist;

use crate::context::ForestContext;
use crate::tree::Tree;

bitflags::bitflags! {
    /// Which of `region_complete`'s two endpoints to include in the
    /// output.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Endpoints: u8 {
        const A = 0b01;
        const B = 0b10;
    }
}

/// Given `a < b` in Morton order, writes the minimal Morton-sorted
/// tiling of `[a,b]` into the empty `tree`.
///
/// `init` is called once per quadrant the algorithm emits, including
/// an included endpoint — every emitted quadrant gets a freshly
/// initialized user-data slot, endpoint or not, so callers never
/// pre-allocate one behind this call's back — and returns that
/// quadrant's boxed user-data payload; it is only invoked when
/// `ctx.has_user_data()`.
///
/// # Panics (debug only)
///
/// Panics if `tree` is not empty, if `compare(a,b) != Less`, or if the
/// postconditions (pool balance, tree completeness) fail — these mark
/// programming errors, not recoverable conditions.
pub fn region_complete<F>(
    ctx: &mut ForestContext,
    a: Quadrant,
    b: Quadrant,
    endpoints: Endpoints,
    tree: &mut Tree,
    which_tree: i32,
    mut init: F,
) where
    F: FnMut(i32, &Quadrant) -> Box<dyn Any>,
{
    debug_assert!(
        tree.is_empty(),
        "region_complete requires an empty target tree"
    );
    debug_assert!(
        quad::compare(&a, &b) == Ordering::Less,
        "region_complete requires a < b"
    );

    let quadrant_pool_before = ctx.quadrant_pool_len();
    let user_data_pool_before = ctx.user_data_pool_len();

    if endpoints.contains(Endpoints::A) {
        emit(ctx, which_tree, a, tree, &mut init);
    }

    let ancestor = quad::nearest_common_ancestor(&a, &b);
    let [c0, c1, c2, c3] = ancestor.children();

    let mut worklist = Worklist::new();
    worklist.append(ctx.quadrant_pool.alloc(c0));
    worklist.append(ctx.quadrant_pool.alloc(c1));
    worklist.append(ctx.quadrant_pool.alloc(c2));
    worklist.append(ctx.quadrant_pool.alloc(c3));

    while let Some(handle) = worklist.pop_front() {
        let w = *ctx.quadrant_pool.get(&handle);

        if quad::compare(&a, &w) == Ordering::Less
            && quad::compare(&w, &b) == Ordering::Less
            && !w.is_ancestor(&b)
        {
            emit(ctx, which_tree, w, tree, &mut init);
        } else if w.is_ancestor(&a) || w.is_ancestor(&b) {
            let [c0, c1, c2, c3] = w.children();
            worklist.prepend(ctx.quadrant_pool.alloc(c3));
            worklist.prepend(ctx.quadrant_pool.alloc(c2));
            worklist.prepend(ctx.quadrant_pool.alloc(c1));
            worklist.prepend(ctx.quadrant_pool.alloc(c0));
        }

        ctx.quadrant_pool.free(handle);
    }

    if endpoints.contains(Endpoints::B) {
        emit(ctx, which_tree, b, tree, &mut init);
    }

    debug_assert_eq!(
        ctx.quadrant_pool_len(),
        quadrant_pool_before,
        "region_complete must return every scratch quadrant it allocates"
    );
    debug_assert!(tree.is_complete(), "region_complete produced a gapped or unsorted tiling");
    if ctx.has_user_data() {
        // Every emitted quadrant, endpoint or not, is initialized by
        // this call — an included endpoint's user-data is never the
        // caller's responsibility — so the delta is simply the output
        // length.
        debug_assert_eq!(
            ctx.user_data_pool_len(),
            user_data_pool_before + tree.len(),
            "user-data pool delta must equal len(output) under the always-initialize convention"
        );
    }
}

fn emit<F>(ctx: &mut ForestContext, which_tree: i32, q: Quadrant, tree: &mut Tree, init: &mut F)
where
    F: FnMut(i32, &Quadrant) -> Box<dyn Any>,
{
    let user_data = ctx
        .has_user_data()
        .then(|| init(which_tree, &q))
        .and_then(|payload| ctx.alloc_user_data(payload));
    tree.append(q, user_data);
}
