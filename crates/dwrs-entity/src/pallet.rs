//! Pallets.

/// Intermediate container buffer.  Exactly one crane owns each pallet.
///
/// `0 <= containers <= capacity` always holds; the mutators refuse to
/// cross either bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pallet {
    capacity:   u32,
    containers: u32,
}

impl Pallet {
    pub fn new(capacity: u32) -> Self {
        Self { capacity, containers: 0 }
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    #[inline]
    pub fn containers(&self) -> u32 {
        self.containers
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.containers == 0
    }

    #[inline]
    pub fn has_room(&self) -> bool {
        self.containers < self.capacity
    }

    /// Add one container.  Returns `false` if the pallet is full.
    pub(crate) fn load(&mut self) -> bool {
        if !self.has_room() {
            return false;
        }
        self.containers += 1;
        true
    }

    /// Remove one container.  Returns `false` if the pallet is empty.
    pub(crate) fn unload(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        self.containers -= 1;
        true
    }
}
