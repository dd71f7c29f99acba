//! # Object Pools
//!
//! Typed free-list arenas used for the conflict arcs, faces and vertices of a
//! hull workspace.
//!
//! Storage grows in whole blocks when the free list runs dry. Elements are
//! addressed by [`Handle`]s carrying the slot index and a generation tag, so a
//! stale handle to a released element is caught by debug assertions instead of
//! silently reading a recycled record. Acquired elements always start from
//! their `Default` (zeroed) state, and released elements are reset before they
//! return to the free list.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use crate::error::{HullError, HullResult};

// =============================================================================
// HANDLES
// =============================================================================

/// Stable reference to an element of a [`Pool`].
pub(crate) struct Handle<T> {
    index: u32,
    generation: u32,
    marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    fn new(index: u32, generation: u32) -> Self {
        Self {
            index,
            generation,
            marker: PhantomData,
        }
    }

    /// Slot index of the element.
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.index as usize
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}g{}", self.index, self.generation)
    }
}

// =============================================================================
// POOL
// =============================================================================

struct Slot<T> {
    value: T,
    generation: u32,
    live: bool,
}

/// A block-grown free-list pool of `T`.
pub(crate) struct Pool<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    block_size: usize,
    what: &'static str,
}

impl<T: Default> Pool<T> {
    /// Creates an empty pool. `what` names the pool in allocation errors.
    pub(crate) fn new(what: &'static str, block_size: usize) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            block_size: block_size.max(1),
            what,
        }
    }

    /// Number of elements currently on the free list.
    #[inline]
    pub(crate) fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Number of elements currently acquired.
    #[inline]
    pub(crate) fn live_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Total number of slots, live or free.
    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Ensures at least `min_free` elements are available without growing.
    ///
    /// Grows by a whole number of blocks, enough to exceed `min_free`.
    pub(crate) fn reserve(&mut self, min_free: usize) -> HullResult<()> {
        if self.free.len() >= min_free {
            return Ok(());
        }
        let count = ((min_free / self.block_size) + 1) * self.block_size;
        let start = self.slots.len();
        if start + count > u32::MAX as usize {
            return Err(HullError::mem_alloc(self.what));
        }
        self.slots
            .try_reserve_exact(count)
            .map_err(|_| HullError::mem_alloc(self.what))?;
        self.free
            .try_reserve(count)
            .map_err(|_| HullError::mem_alloc(self.what))?;
        self.slots.extend((0..count).map(|_| Slot {
            value: T::default(),
            generation: 0,
            live: false,
        }));
        // Lowest indices are handed out first.
        self.free.extend((start..start + count).rev().map(|i| i as u32));
        Ok(())
    }

    /// Takes a zeroed element from the pool, growing it when empty.
    pub(crate) fn acquire(&mut self) -> HullResult<Handle<T>> {
        if self.free.is_empty() {
            self.reserve(1)?;
        }
        let index = self
            .free
            .pop()
            .ok_or_else(|| HullError::mem_alloc(self.what))?;
        let slot = &mut self.slots[index as usize];
        slot.live = true;
        Ok(Handle::new(index, slot.generation))
    }

    /// Zeroes an element and returns it to the free list.
    pub(crate) fn release(&mut self, handle: Handle<T>) {
        let slot = &mut self.slots[handle.index()];
        debug_assert!(
            slot.live && slot.generation == handle.generation,
            "release of stale {} handle {:?}",
            self.what,
            handle
        );
        slot.value = T::default();
        slot.live = false;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
    }

    /// Returns true if the handle refers to a live element.
    pub(crate) fn is_live(&self, handle: Handle<T>) -> bool {
        self.slots
            .get(handle.index())
            .map_or(false, |s| s.live && s.generation == handle.generation)
    }
}

impl<T> Index<Handle<T>> for Pool<T> {
    type Output = T;

    #[inline]
    fn index(&self, handle: Handle<T>) -> &T {
        let slot = &self.slots[handle.index()];
        debug_assert!(
            slot.live && slot.generation == handle.generation,
            "stale {} handle {:?}",
            self.what,
            handle
        );
        &slot.value
    }
}

impl<T> IndexMut<Handle<T>> for Pool<T> {
    #[inline]
    fn index_mut(&mut self, handle: Handle<T>) -> &mut T {
        let slot = &mut self.slots[handle.index()];
        debug_assert!(
            slot.live && slot.generation == handle.generation,
            "stale {} handle {:?}",
            self.what,
            handle
        );
        &mut slot.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Item {
        value: i32,
    }

    #[test]
    fn test_acquire_grows_by_block() {
        let mut pool: Pool<Item> = Pool::new("item pool", 8);
        assert_eq!(pool.capacity(), 0);

        let a = pool.acquire().unwrap();
        assert_eq!(pool.capacity(), 8);
        assert_eq!(pool.live_count(), 1);
        assert_eq!(pool.free_count(), 7);
        assert_eq!(a.index(), 0);
    }

    #[test]
    fn test_reserve_rounds_up_to_blocks() {
        let mut pool: Pool<Item> = Pool::new("item pool", 4);
        pool.reserve(9).unwrap();
        assert_eq!(pool.capacity(), 12);
        // Already satisfied, no growth.
        pool.reserve(5).unwrap();
        assert_eq!(pool.capacity(), 12);
    }

    #[test]
    fn test_released_elements_are_zeroed_and_reused() {
        let mut pool: Pool<Item> = Pool::new("item pool", 4);
        let a = pool.acquire().unwrap();
        pool[a].value = 42;
        pool.release(a);
        assert!(!pool.is_live(a));

        let b = pool.acquire().unwrap();
        assert_eq!(b.index(), a.index());
        assert_ne!(a, b, "generation must change on reuse");
        assert_eq!(pool[b], Item::default());
    }

    #[test]
    fn test_grows_past_first_block() {
        let mut pool: Pool<Item> = Pool::new("item pool", 2);
        let handles: Vec<_> = (0..5).map(|_| pool.acquire().unwrap()).collect();
        assert_eq!(pool.live_count(), 5);
        assert!(pool.capacity() >= 5);
        for (i, h) in handles.iter().enumerate() {
            pool[*h].value = i as i32;
        }
        for (i, h) in handles.iter().enumerate() {
            assert_eq!(pool[*h].value, i as i32);
        }
    }
}
