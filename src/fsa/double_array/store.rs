//! Backing storage for the `base`/`check` arrays
//!
//! The store owns both arrays and the ordered set of free indices. A slot is
//! free exactly when both of its fields are `Empty`; membership in the free set
//! is recomputed from the pair after every write, so clearing one field never
//! makes a half-vacated slot look free.

use std::collections::BTreeSet;

use crate::error::{DatrieError, Result};
use crate::StateId;

/// Integer view of [`Base::Empty`] and [`Check::Empty`]
pub const EMPTY_VALUE: i64 = -1;
/// Integer view of [`Base::Leaf`]
pub const LEAF_BASE_VALUE: i64 = -2;
/// Integer view of [`Check::Root`]
pub const ROOT_CHECK_VALUE: i64 = -3;
/// Offset the root row starts at
pub const INITIAL_ROOT_BASE: usize = 1;

/// Index of the root state
pub const ROOT_STATE: StateId = 0;

/// Content of a `base` slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base {
    /// Slot unused
    Empty,
    /// Terminal state with no materialized children
    Leaf,
    /// Row offset: the child on symbol `c` lives at `offset + c`
    Offset(usize),
}

impl Base {
    /// Row offset, if this slot holds one
    #[inline]
    pub fn offset(self) -> Option<usize> {
        match self {
            Base::Offset(offset) => Some(offset),
            _ => None,
        }
    }

    /// Integer encoding using the sentinel constants
    pub fn to_value(self) -> i64 {
        match self {
            Base::Empty => EMPTY_VALUE,
            Base::Leaf => LEAF_BASE_VALUE,
            Base::Offset(offset) => offset as i64,
        }
    }
}

/// Content of a `check` slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Check {
    /// Slot unused
    Empty,
    /// Anchor of index 0; the root has no parent
    Root,
    /// State that owns the edge landing here
    Parent(StateId),
}

impl Check {
    /// Integer encoding using the sentinel constants
    pub fn to_value(self) -> i64 {
        match self {
            Check::Empty => EMPTY_VALUE,
            Check::Root => ROOT_CHECK_VALUE,
            Check::Parent(state) => state as i64,
        }
    }
}

/// Growable `base`/`check` arrays with incremental free-slot tracking
#[derive(Debug, Clone)]
pub struct ArrayStore {
    base: Vec<Base>,
    check: Vec<Check>,
    free: BTreeSet<usize>,
}

impl ArrayStore {
    /// Create a store holding only the root
    pub fn new() -> Self {
        Self {
            base: vec![Base::Offset(INITIAL_ROOT_BASE)],
            check: vec![Check::Root],
            free: BTreeSet::new(),
        }
    }

    /// Create a store holding only the root, reserving room for `capacity` slots
    ///
    /// Fails with a configuration error when the reservation cannot be allocated.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut store = Self::new();
        let additional = capacity.saturating_sub(1);
        store
            .base
            .try_reserve_exact(additional)
            .and_then(|_| store.check.try_reserve_exact(additional))
            .map_err(|e| {
                DatrieError::configuration(format!("cannot reserve {} slots: {}", capacity, e))
            })?;
        Ok(store)
    }

    /// Number of slots (`N`)
    #[inline]
    pub fn len(&self) -> usize {
        self.base.len()
    }

    /// Always false: the root slot exists from construction on
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    /// Base value at `index`. Panics when `index >= len()`.
    #[inline]
    pub fn base(&self, index: usize) -> Base {
        self.base[index]
    }

    /// Check value at `index`. Panics when `index >= len()`.
    #[inline]
    pub fn check(&self, index: usize) -> Check {
        self.check[index]
    }

    /// Write a base value and refresh the slot's free-set membership
    pub fn set_base(&mut self, index: usize, value: Base) {
        self.base[index] = value;
        self.refresh(index);
    }

    /// Write a check value and refresh the slot's free-set membership
    pub fn set_check(&mut self, index: usize, value: Check) {
        assert!(
            index != ROOT_STATE || value == Check::Root,
            "root anchor cannot be overwritten"
        );
        self.check[index] = value;
        self.refresh(index);
    }

    /// Reset both fields of `index` to `Empty`
    pub fn vacate(&mut self, index: usize) {
        assert!(index != ROOT_STATE, "root slot cannot be freed");
        self.base[index] = Base::Empty;
        self.check[index] = Check::Empty;
        self.free.insert(index);
    }

    /// Whether `index` exists and both of its fields are `Empty`
    #[inline]
    pub fn is_free(&self, index: usize) -> bool {
        index < self.len() && self.base[index] == Base::Empty && self.check[index] == Check::Empty
    }

    /// Number of free slots
    #[inline]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Smallest free index `>= from`
    #[inline]
    pub fn free_successor(&self, from: usize) -> Option<usize> {
        self.free.range(from..).next().copied()
    }

    /// Free indices `>= from` in ascending order
    pub fn free_from(&self, from: usize) -> impl Iterator<Item = usize> + '_ {
        self.free.range(from..).copied()
    }

    /// Append `Empty/Empty` slots until `limit` is a valid index
    pub fn ensure_reachable_index(&mut self, limit: usize) {
        if limit < self.len() {
            return;
        }
        log::trace!("growing store from {} to {} slots", self.len(), limit + 1);
        while self.len() <= limit {
            self.base.push(Base::Empty);
            self.check.push(Check::Empty);
            self.free.insert(self.base.len() - 1);
        }
    }

    /// Append exactly `amount` free slots at the tail
    pub fn grow_by(&mut self, amount: usize) {
        if amount > 0 {
            self.ensure_reachable_index(self.len() + amount - 1);
        }
    }

    /// Typed `base` array
    pub fn bases(&self) -> &[Base] {
        &self.base
    }

    /// Typed `check` array
    pub fn checks(&self) -> &[Check] {
        &self.check
    }

    /// Whether the tracked free set agrees with the stored pairs at `index`
    pub(crate) fn free_set_agrees(&self, index: usize) -> bool {
        self.free.contains(&index) == self.is_free(index)
    }

    /// Highest index recorded as free, if any
    pub(crate) fn last_free(&self) -> Option<usize> {
        self.free.iter().next_back().copied()
    }

    fn refresh(&mut self, index: usize) {
        if self.base[index] == Base::Empty && self.check[index] == Check::Empty {
            self.free.insert(index);
        } else {
            self.free.remove(&index);
        }
    }
}

impl Default for ArrayStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_has_only_root() {
        let store = ArrayStore::new();
        assert_eq!(store.len(), 1);
        assert!(!store.is_empty());
        assert_eq!(store.base(ROOT_STATE), Base::Offset(INITIAL_ROOT_BASE));
        assert_eq!(store.check(ROOT_STATE), Check::Root);
        assert_eq!(store.free_count(), 0);
        assert!(!store.is_free(ROOT_STATE));
    }

    #[test]
    fn test_with_capacity_reserves_without_growing() {
        let store = ArrayStore::with_capacity(128).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.bases().len() == 1 && store.checks().len() == 1);
        assert_eq!(store.base(ROOT_STATE), Base::Offset(INITIAL_ROOT_BASE));
        assert_eq!(store.free_count(), 0);
    }

    #[test]
    fn test_with_capacity_reports_impossible_reservation() {
        let err = ArrayStore::with_capacity(usize::MAX / 4).unwrap_err();
        assert_eq!(err.category(), "config");
        assert!(err.to_string().contains("cannot reserve"));
    }

    #[test]
    fn test_ensure_reachable_registers_free_slots() {
        let mut store = ArrayStore::new();
        store.ensure_reachable_index(4);
        assert_eq!(store.len(), 5);
        assert_eq!(store.free_count(), 4);
        for index in 1..5 {
            assert!(store.is_free(index));
        }

        // Already reachable: no growth
        store.ensure_reachable_index(2);
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_grow_by_appends_exactly() {
        let mut store = ArrayStore::new();
        store.grow_by(3);
        assert_eq!(store.len(), 4);
        store.grow_by(0);
        assert_eq!(store.len(), 4);
        assert_eq!(store.last_free(), Some(3));
    }

    #[test]
    fn test_membership_tracks_pair() {
        let mut store = ArrayStore::new();
        store.ensure_reachable_index(3);

        store.set_check(2, Check::Parent(0));
        assert!(!store.is_free(2));
        assert!(store.free_set_agrees(2));

        store.set_base(2, Base::Leaf);
        assert!(!store.is_free(2));

        // Clearing only one field keeps the slot occupied
        store.set_base(2, Base::Empty);
        assert!(!store.is_free(2));
        assert!(store.free_set_agrees(2));
        assert_eq!(store.free_successor(2), Some(3));

        store.set_check(2, Check::Empty);
        assert!(store.is_free(2));
        assert!(store.free_set_agrees(2));
        assert_eq!(store.free_successor(2), Some(2));
    }

    #[test]
    fn test_vacate_frees_slot() {
        let mut store = ArrayStore::new();
        store.ensure_reachable_index(2);
        store.set_check(1, Check::Parent(0));
        store.set_base(1, Base::Offset(5));
        assert_eq!(store.free_count(), 1);

        store.vacate(1);
        assert!(store.is_free(1));
        assert_eq!(store.free_count(), 2);
    }

    #[test]
    fn test_free_successor_and_iteration() {
        let mut store = ArrayStore::new();
        store.ensure_reachable_index(6);
        store.set_check(3, Check::Parent(0));

        assert_eq!(store.free_successor(3), Some(4));
        assert_eq!(store.free_successor(7), None);
        let free: Vec<usize> = store.free_from(2).collect();
        assert_eq!(free, vec![2, 4, 5, 6]);
    }

    #[test]
    fn test_sentinel_values() {
        assert_eq!(Base::Empty.to_value(), EMPTY_VALUE);
        assert_eq!(Base::Leaf.to_value(), LEAF_BASE_VALUE);
        assert_eq!(Base::Offset(9).to_value(), 9);
        assert_eq!(Check::Empty.to_value(), EMPTY_VALUE);
        assert_eq!(Check::Root.to_value(), ROOT_CHECK_VALUE);
        assert_eq!(Check::Parent(4).to_value(), 4);
        assert_eq!(Base::Offset(3).offset(), Some(3));
        assert_eq!(Base::Leaf.offset(), None);
    }

    #[test]
    #[should_panic(expected = "root slot cannot be freed")]
    fn test_root_cannot_be_vacated() {
        let mut store = ArrayStore::new();
        store.vacate(ROOT_STATE);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_read_panics() {
        let store = ArrayStore::new();
        let _ = store.base(1);
    }
}
