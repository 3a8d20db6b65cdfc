// Copyright 2025 the RPAVER Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outside-in admission ordering.

use alloc::vec::Vec;

/// Returns the order in which the indices `0..total` should be admitted.
///
/// The order pairs the lowest and the highest remaining index (lowest first)
/// and shrinks the range inward. When a single index remains in the middle it
/// is emitted once.
///
/// ```rust
/// use rpaver_render_queue::admission_order;
///
/// assert_eq!(admission_order(5), [0, 4, 1, 3, 2]);
/// assert_eq!(admission_order(6), [0, 5, 1, 4, 2, 3]);
/// assert!(admission_order(0).is_empty());
/// ```
#[must_use]
pub fn admission_order(total: usize) -> Vec<usize> {
    let mut order = Vec::with_capacity(total);
    if total == 0 {
        return order;
    }

    let mut low = 0;
    let mut high = total - 1;
    while low < high {
        order.push(low);
        order.push(high);
        low += 1;
        high -= 1;
    }
    if low == high {
        order.push(low);
    }
    order
}
