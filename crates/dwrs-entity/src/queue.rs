//! `ShipQueue` — bounded FIFO of ships waiting for a crane.
//!
//! A ship offered to a full queue balks: it is dropped and counted.  That is
//! a modeled outcome, not an error, so [`ShipQueue::add_ship`] reports it
//! through its return value.

use std::collections::VecDeque;

use crate::Ship;

#[derive(Debug, Default)]
pub struct ShipQueue {
    inner:        VecDeque<Ship>,
    max_length:   usize,
    balk_count:   u64,
}

impl ShipQueue {
    pub fn new(max_length: usize) -> Self {
        Self {
            inner: VecDeque::with_capacity(max_length),
            max_length,
            balk_count: 0,
        }
    }

    /// Enqueue `ship` at the tail.
    ///
    /// Returns `false` if the queue was full; the ship is dropped and the
    /// balk counter incremented.
    pub fn add_ship(&mut self, ship: Ship) -> bool {
        if self.inner.len() >= self.max_length {
            self.balk_count += 1;
            return false;
        }
        self.inner.push_back(ship);
        true
    }

    /// Remove and return the head of the queue.
    pub fn pop_ship(&mut self) -> Option<Ship> {
        self.inner.pop_front()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Ships turned away so far.
    pub fn balk_count(&self) -> u64 {
        self.balk_count
    }
}
