//! Fixed-capacity object pools
//!
//! Slots are allocated once when the pool is built and reused in place.
//! A slot is either active (a live entity) or free. Free slots hold stale
//! data that nothing reads; spawning overwrites the first free slot.

/// An entity that can live in a [`Pool`]
pub trait Pooled: Copy + Default {
    /// Whether this slot currently represents a live entity
    fn is_active(&self) -> bool;
}

/// Fixed-size slot array with an `active` flag per entry
#[derive(Debug, Clone)]
pub struct Pool<T, const N: usize> {
    slots: [T; N],
}

impl<T: Pooled, const N: usize> Default for Pool<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Pooled, const N: usize> Pool<T, N> {
    /// Build a pool with every slot free
    pub fn new() -> Self {
        Self {
            slots: [T::default(); N],
        }
    }

    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Index of the first free slot, scanning from slot 0
    #[inline]
    pub fn first_free(&self) -> Option<usize> {
        self.slots.iter().position(|s| !s.is_active())
    }

    /// Place `entity` in the first free slot. Returns the slot index, or
    /// `None` when the pool is full (the entity is dropped).
    pub fn spawn(&mut self, entity: T) -> Option<usize> {
        let index = self.first_free()?;
        self.slots[index] = entity;
        Some(index)
    }

    /// Overwrite a specific slot
    #[inline]
    pub fn put(&mut self, index: usize, entity: T) {
        self.slots[index] = entity;
    }

    #[inline(always)]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    #[inline(always)]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)
    }

    /// Number of active slots
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_active()).count()
    }

    /// Active slots with their indices, in slot order
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots.iter().enumerate().filter(|(_, s)| s.is_active())
    }

    /// Mutable active slots, in slot order
    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut().filter(|s| s.is_active())
    }

    /// All slots, free ones included
    #[inline(always)]
    pub fn slots(&self) -> &[T] {
        &self.slots
    }
}
