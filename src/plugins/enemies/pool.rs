//! Fixed-capacity enemy slot pool.
//!
//! Invariant: slot `i` is either empty or holds exactly one live enemy entity whose
//! `Enemy::slot` is `i`. `allocate` is the only way in and `release` the only way out.

use bevy::prelude::*;

/// Maximum number of simultaneously live enemies.
pub const MAX_ENEMIES: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotIndex(usize);

impl SlotIndex {
    #[inline]
    pub fn new(i: usize) -> Self {
        Self(i)
    }

    #[inline]
    pub fn get(self) -> usize {
        self.0
    }
}

#[derive(Resource, Debug, Default)]
pub struct EnemySlots {
    slots: [Option<Entity>; MAX_ENEMIES],
}

impl EnemySlots {
    /// First empty slot in index order.
    pub fn first_free(&self) -> Option<SlotIndex> {
        self.slots.iter().position(Option::is_none).map(SlotIndex)
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.first_free().is_none()
    }

    /// Claim the first empty slot for the entity built by `spawn`.
    ///
    /// `spawn` only runs when a slot is free and receives the slot it will own. Returns `None`
    /// when the pool is full.
    pub fn allocate(&mut self, spawn: impl FnOnce(SlotIndex) -> Entity) -> Option<SlotIndex> {
        let slot = self.first_free()?;
        self.slots[slot.0] = Some(spawn(slot));
        Some(slot)
    }

    /// Empty a slot, handing back the entity it owned.
    ///
    /// Releasing an empty (or out of range) slot is a no-op: the deletion queue may hold
    /// duplicates.
    pub fn release(&mut self, slot: SlotIndex) -> Option<Entity> {
        self.slots.get_mut(slot.0).and_then(Option::take)
    }

    #[inline]
    pub fn get(&self, slot: SlotIndex) -> Option<Entity> {
        self.slots.get(slot.0).copied().flatten()
    }

    /// Occupied slots in index order.
    pub fn iter_active(&self) -> impl Iterator<Item = (SlotIndex, Entity)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.map(|e| (SlotIndex(i), e)))
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn clear(&mut self) {
        self.slots = Default::default();
    }
}
