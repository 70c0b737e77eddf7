//! Memory Pool

use bumpalo::Bump;

/// A bump allocator for short lived values such as BSDFs and per-light
/// scratch buffers. Allocations are never freed individually; the whole pool
/// is reset once the values are no longer referenced. Destructors of
/// allocated values are not run.
#[derive(Default)]
pub struct MemoryPool {
    bump: Bump,
}

impl MemoryPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Move a value into the pool.
    ///
    /// * `value` - The value.
    #[inline]
    #[allow(clippy::mut_from_ref)]
    pub fn alloc<T>(&self, value: T) -> &mut T {
        self.bump.alloc(value)
    }

    /// Allocate a slice of `len` copies of a value.
    ///
    /// * `len`   - Number of elements.
    /// * `value` - The value.
    #[inline]
    #[allow(clippy::mut_from_ref)]
    pub fn alloc_slice<T: Copy>(&self, len: usize, value: T) -> &mut [T] {
        self.bump.alloc_slice_fill_copy(len, value)
    }

    /// Release every allocation at once. The borrow checker guarantees no
    /// references into the pool are alive.
    pub fn reset(&mut self) {
        self.bump.reset();
    }

    /// Returns the number of bytes currently reserved by the pool.
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }
}
