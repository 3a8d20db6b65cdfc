// Copyright 2025 the RPAVER Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! RPAVER Navigator: a single "open item" across several groups of items.
//!
//! A gallery can show many folders at once, but its full-screen viewer shows one
//! image at a time. [`GroupedSelectionNavigator`] tracks which item of which
//! group is open and steps through the *same* group with wraparound, so the
//! viewer's next/prev buttons never leave the folder the user clicked in.
//!
//! The navigator has two states:
//!
//! - **Closed**: no [`Selection`]; [`next`](GroupedSelectionNavigator::next) and
//!   [`prev`](GroupedSelectionNavigator::prev) do nothing.
//! - **Open**: a [`Selection`] that always addresses an existing item of the
//!   current groups.
//!
//! ## Minimal example
//!
//! ```rust
//! use rpaver_navigator::{GroupedSelectionNavigator, Selection};
//!
//! let mut nav = GroupedSelectionNavigator::new(vec![vec!['a', 'b', 'c'], vec!['x', 'y']]);
//!
//! assert!(nav.open(1, 1));
//! assert_eq!(nav.selected_item(), Some(&'y'));
//!
//! // Stepping wraps inside group 1 and never moves to group 0.
//! nav.next();
//! assert_eq!(nav.selection(), Some(Selection { group: 1, item: 0 }));
//! nav.prev();
//! assert_eq!(nav.selected_item(), Some(&'y'));
//!
//! nav.close();
//! assert_eq!(nav.selected_item(), None);
//! ```
//!
//! ## Stale indices
//!
//! Group contents are usually populated asynchronously, so a click can refer to
//! an index that no longer exists. [`open`](GroupedSelectionNavigator::open)
//! rejects such pairs instead of panicking, and
//! [`set_groups`](GroupedSelectionNavigator::set_groups) closes the navigator
//! when the open selection falls out of range.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod navigator;

pub use navigator::{GroupedSelectionNavigator, Selection, Step};
