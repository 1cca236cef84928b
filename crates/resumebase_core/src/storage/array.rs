//! Fixed-capacity in-memory backends.
//!
//! # Responsibility
//! - Provide one arena shared by both array variants, with per-variant
//!   find/insert/remove behavior behind a sealed strategy seam.
//!
//! # Invariants
//! - Live slot count never exceeds the configured capacity.
//! - The sorted variant keeps slots continuously ordered by uuid.

use super::{Storage, StorageError, StorageResult};
use crate::model::resume::Resume;
use std::marker::PhantomData;

/// Default slot capacity for both array variants.
pub const DEFAULT_CAPACITY: usize = 10_000;

/// Outcome of a key lookup against the slot arena.
///
/// `Missing` carries the insertion point, so a following insert needs no
/// second scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotLookup {
    Found(usize),
    Missing(usize),
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::LinearScan {}
    impl Sealed for super::SortedByUuid {}
}

/// Per-variant find/insert/remove behavior over the slot arena.
///
/// Sealed: the variant set is closed by design.
pub trait SlotStrategy: sealed::Sealed {
    fn find(slots: &[Resume], uuid: &str) -> SlotLookup;
    fn insert(slots: &mut Vec<Resume>, at: usize, resume: Resume);
    fn remove(slots: &mut Vec<Resume>, index: usize);
}

/// Insertion-order slots with linear lookup.
#[derive(Debug)]
pub enum LinearScan {}

impl SlotStrategy for LinearScan {
    fn find(slots: &[Resume], uuid: &str) -> SlotLookup {
        match slots.iter().position(|slot| slot.uuid == uuid) {
            Some(index) => SlotLookup::Found(index),
            None => SlotLookup::Missing(slots.len()),
        }
    }

    fn insert(slots: &mut Vec<Resume>, _at: usize, resume: Resume) {
        slots.push(resume);
    }

    // O(1): the last live slot overwrites the removed one. Relative
    // order is not preserved; this variant guarantees none.
    fn remove(slots: &mut Vec<Resume>, index: usize) {
        slots.swap_remove(index);
    }
}

/// Slots kept continuously sorted by uuid for O(log n) lookup.
#[derive(Debug)]
pub enum SortedByUuid {}

impl SlotStrategy for SortedByUuid {
    fn find(slots: &[Resume], uuid: &str) -> SlotLookup {
        match slots.binary_search_by(|slot| slot.uuid.as_str().cmp(uuid)) {
            Ok(index) => SlotLookup::Found(index),
            Err(insertion_point) => SlotLookup::Missing(insertion_point),
        }
    }

    fn insert(slots: &mut Vec<Resume>, at: usize, resume: Resume) {
        slots.insert(at, resume);
    }

    fn remove(slots: &mut Vec<Resume>, index: usize) {
        slots.remove(index);
    }
}

/// Shared fixed-capacity arena; the strategy type decides slot layout.
#[derive(Debug)]
pub struct ArenaStorage<S: SlotStrategy> {
    slots: Vec<Resume>,
    capacity: usize,
    _strategy: PhantomData<S>,
}

/// Insertion-order backend with linear key lookup.
pub type ArrayStorage = ArenaStorage<LinearScan>;

/// Uuid-sorted backend with binary-search lookup and shifted
/// insertion/removal.
pub type SortedArrayStorage = ArenaStorage<SortedByUuid>;

impl<S: SlotStrategy> ArenaStorage<S> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            _strategy: PhantomData,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[cfg(test)]
    fn slot_uuids(&self) -> Vec<&str> {
        self.slots.iter().map(|slot| slot.uuid.as_str()).collect()
    }
}

impl<S: SlotStrategy> Default for ArenaStorage<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SlotStrategy> Storage for ArenaStorage<S> {
    fn get(&self, uuid: &str) -> StorageResult<Resume> {
        match S::find(&self.slots, uuid) {
            SlotLookup::Found(index) => Ok(self.slots[index].clone()),
            SlotLookup::Missing(_) => Err(StorageError::NotFound(uuid.to_string())),
        }
    }

    fn save(&mut self, resume: Resume) -> StorageResult<()> {
        resume.validate()?;
        match S::find(&self.slots, &resume.uuid) {
            SlotLookup::Found(_) => Err(StorageError::AlreadyExists(resume.uuid)),
            SlotLookup::Missing(_) if self.slots.len() == self.capacity => {
                Err(StorageError::CapacityExceeded(self.capacity))
            }
            SlotLookup::Missing(at) => {
                S::insert(&mut self.slots, at, resume);
                Ok(())
            }
        }
    }

    fn update(&mut self, resume: Resume) -> StorageResult<()> {
        resume.validate()?;
        match S::find(&self.slots, &resume.uuid) {
            // uuid is unchanged, so replacing in place preserves any
            // slot ordering the strategy maintains.
            SlotLookup::Found(index) => {
                self.slots[index] = resume;
                Ok(())
            }
            SlotLookup::Missing(_) => Err(StorageError::NotFound(resume.uuid)),
        }
    }

    fn delete(&mut self, uuid: &str) -> StorageResult<()> {
        match S::find(&self.slots, uuid) {
            SlotLookup::Found(index) => {
                S::remove(&mut self.slots, index);
                Ok(())
            }
            SlotLookup::Missing(_) => Err(StorageError::NotFound(uuid.to_string())),
        }
    }

    fn size(&self) -> StorageResult<usize> {
        Ok(self.slots.len())
    }

    fn clear(&mut self) -> StorageResult<()> {
        self.slots.clear();
        Ok(())
    }

    fn get_all_sorted(&self) -> StorageResult<Vec<Resume>> {
        let mut resumes = self.slots.clone();
        resumes.sort_by(|a, b| a.order_key().cmp(&b.order_key()));
        Ok(resumes)
    }
}
