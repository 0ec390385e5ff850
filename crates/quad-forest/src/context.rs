use alloc::boxed::Box;
use core::any::Any;

use quad::Quadrant;
use quad_alloc::{Pool, PoolHandle};

/// A handle into a forest's user-data pool.
pub type UserDataHandle = PoolHandle<Box<dyn Any>>;

/// The pools shared by every tree in a forest.
///
/// `quadrant_pool` supplies scratch quadrants to [`crate::region_complete`];
/// `user_data_pool` is gated by `data_size` — when `data_size` is `0`,
/// no user-data allocation ever happens, and `user_data_pool` stays
/// empty for the context's whole lifetime.
#[derive(Debug)]
pub struct ForestContext {
    pub(crate) quadrant_pool: Pool<Quadrant>,
    pub(crate) user_data_pool: Pool<Box<dyn Any>>,
    data_size: usize,
}

impl ForestContext {
    /// Creates a context whose user-data pool is active iff `data_size
    /// > 0`. `data_size` itself is not otherwise interpreted here —
    /// callers typically pass a nonzero placeholder and store whatever
    /// boxed value they like, since `data_size` only gates whether
    /// allocation happens at all.
    pub fn new(data_size: usize) -> Self {
        Self {
            quadrant_pool: Pool::new(),
            user_data_pool: Pool::new(),
            data_size,
        }
    }

    pub fn data_size(&self) -> usize {
        self.data_size
    }

    /// `true` iff this context allocates user-data at all.
    pub fn has_user_data(&self) -> bool {
        self.data_size > 0
    }

    /// Number of live scratch quadrants currently checked out of the
    /// quadrant pool.
    pub fn quadrant_pool_len(&self) -> usize {
        self.quadrant_pool.len()
    }

    /// Number of live user-data allocations.
    pub fn user_data_pool_len(&self) -> usize {
        self.user_data_pool.len()
    }

    pub fn user_data(&self, handle: &UserDataHandle) -> &(dyn Any) {
        &**self.user_data_pool.get(handle)
    }

    pub fn user_data_mut(&mut self, handle: &UserDataHandle) -> &mut (dyn Any) {
        &mut **self.user_data_pool.get_mut(handle)
    }

    /// Allocates a user-data slot iff `has_user_data()`. Returns
    /// `None` when the context has no user-data pool active — callers
    /// treat `data_size == 0` uniformly rather than special-casing it.
    pub(crate) fn alloc_user_data(&mut self, value: Box<dyn Any>) -> Option<UserDataHandle> {
        self.has_user_data()
            .then(|| self.user_data_pool.alloc(value))
    }

    /// Releases a quadrant's user-data slot. A no-op on `None`, so
    /// callers can pass a `StoredQuadrant::user_data` straight through
    /// regardless of whether this context has user-data active.
    pub fn free_user_data(&mut self, handle: Option<UserDataHandle>) {
        if let Some(handle) = handle {
            self.user_data_pool.free(handle);
        }
    }
}

impl Default for ForestContext {
    fn default() -> Self {
        Self::new(0)
    }
}
