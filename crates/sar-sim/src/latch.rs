//! `ReportLatch` — a count-down barrier over incoming reports.
//!
//! The latch is created with the number of reporters it waits for.  Every
//! [`arrive`][ReportLatch::arrive] stores one item; the arrival that brings
//! the count to zero releases everything collected so far, exactly once.  A
//! latch created for zero reporters releases on the first
//! [`try_release`][ReportLatch::try_release].

use crate::{SimError, SimResult};

/// What an arrival did to the latch.
#[derive(Debug, PartialEq)]
pub enum Arrival<T> {
    /// Still waiting for `remaining` more reports.
    Waiting { remaining: usize },
    /// The last report came in; all items in arrival order.
    Released(Vec<T>),
}

#[derive(Debug)]
pub struct ReportLatch<T> {
    expected: usize,
    arrived:  usize,
    items:    Vec<T>,
    released: bool,
}

impl<T> ReportLatch<T> {
    pub fn new(expected: usize) -> Self {
        Self { expected, arrived: 0, items: Vec::with_capacity(expected), released: false }
    }

    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Reports still missing; zero once released.
    pub fn remaining(&self) -> usize {
        self.expected.saturating_sub(self.arrived)
    }

    pub fn arrived(&self) -> usize {
        self.arrived
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Record one report.  Errors once the latch has been released.
    pub fn arrive(&mut self, item: T) -> SimResult<Arrival<T>> {
        if self.released {
            return Err(SimError::LatchReleased { expected: self.expected });
        }
        self.items.push(item);
        self.arrived += 1;
        Ok(match self.try_release() {
            Some(items) => Arrival::Released(items),
            None => Arrival::Waiting { remaining: self.remaining() },
        })
    }

    /// Release if every expected report is in and the latch has not fired
    /// yet.
    pub fn try_release(&mut self) -> Option<Vec<T>> {
        if self.released || self.remaining() > 0 {
            return None;
        }
        self.released = true;
        Some(std::mem::take(&mut self.items))
    }
}
