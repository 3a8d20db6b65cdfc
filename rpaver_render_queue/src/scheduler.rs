// Copyright 2025 the RPAVER Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render admission controller.

use alloc::vec::Vec;

use hashbrown::HashSet;

use crate::admission_order;

/// Controller deciding which image slots of a fixed-length strip may render.
///
/// This type:
/// - stores the outside-in [`admission_order`] for the current length,
/// - tracks a cursor into that order,
/// - keeps the set of admitted indices, which is always the prefix of the
///   order up to and including the cursor.
///
/// It does *not* know about image elements or network requests; hosts mount
/// the slots reported by [`is_admitted`](Self::is_admitted) and forward each
/// settle event to [`on_settled`](Self::on_settled).
#[derive(Clone, Debug)]
pub struct RenderScheduler {
    order: Vec<usize>,
    cursor: usize,
    admitted: HashSet<usize>,
}

impl RenderScheduler {
    /// Creates a scheduler for `total` slots with only the first slot admitted.
    #[must_use]
    pub fn new(total: usize) -> Self {
        let mut scheduler = Self {
            order: Vec::new(),
            cursor: 0,
            admitted: HashSet::new(),
        };
        scheduler.initialize(total);
        scheduler
    }

    /// Resets the scheduler for a strip of `total` slots.
    ///
    /// All prior admission state is discarded. The first index of the new
    /// order is admitted immediately; with `total == 0` nothing is admitted.
    pub fn initialize(&mut self, total: usize) {
        self.order = admission_order(total);
        self.cursor = 0;
        self.admitted.clear();
        if let Some(&first) = self.order.first() {
            self.admitted.insert(first);
        }
    }

    /// Returns the number of slots in the strip.
    #[must_use]
    pub fn total(&self) -> usize {
        self.order.len()
    }

    /// Returns the full admission order for the current strip.
    #[must_use]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Returns `true` if slot `index` may start rendering.
    #[must_use]
    pub fn is_admitted(&self, index: usize) -> bool {
        self.admitted.contains(&index)
    }

    /// Returns how many slots are currently admitted.
    #[must_use]
    pub fn admitted_len(&self) -> usize {
        self.admitted.len()
    }

    /// Iterates admitted slots in the order they were admitted.
    pub fn admitted(&self) -> impl Iterator<Item = usize> + '_ {
        self.order[..self.admitted.len()].iter().copied()
    }

    /// Iterates slots that are still waiting for admission, in admission order.
    pub fn pending(&self) -> impl Iterator<Item = usize> + '_ {
        self.order[self.admitted.len()..].iter().copied()
    }

    /// Returns `true` once every slot of a non-empty strip is admitted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.order.is_empty() && self.admitted.len() == self.order.len()
    }

    /// Records that one admitted image settled and admits the next slot.
    ///
    /// Returns the newly admitted index, or `None` when every slot was already
    /// admitted (or the strip is empty).
    pub fn on_settled(&mut self) -> Option<usize> {
        let next = self.cursor + 1;
        let index = *self.order.get(next)?;
        self.cursor = next;
        self.admitted.insert(index);
        Some(index)
    }

    /// Forwards a successful load of slot `index` to [`on_settled`](Self::on_settled).
    ///
    /// Events for slots outside the current strip are ignored and return
    /// `None`. They are late reports from a strip that was replaced by
    /// [`initialize`](Self::initialize).
    pub fn on_load(&mut self, index: usize) -> Option<usize> {
        if index >= self.order.len() {
            return None;
        }
        self.on_settled()
    }

    /// Forwards a failed load of slot `index` to [`on_settled`](Self::on_settled).
    ///
    /// A broken image leaves its own slot empty but never blocks the strip.
    /// Out-of-range slots are ignored like in [`on_load`](Self::on_load).
    pub fn on_error(&mut self, index: usize) -> Option<usize> {
        if index >= self.order.len() {
            return None;
        }
        self.on_settled()
    }

    /// Fraction of slots admitted so far, in `0.0..=1.0`.
    ///
    /// An empty strip reports `0.0`.
    #[must_use]
    pub fn progress_fraction(&self) -> f64 {
        if self.order.is_empty() {
            return 0.0;
        }
        self.admitted.len() as f64 / self.order.len() as f64
    }
}

impl Default for RenderScheduler {
    fn default() -> Self {
        Self::new(0)
    }
}
