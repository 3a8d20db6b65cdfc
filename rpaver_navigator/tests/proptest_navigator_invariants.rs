// Copyright 2025 the RPAVER Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based invariant tests for grouped selection.
//!
//! 1. Steps never change the open group.
//! 2. The open selection always addresses an existing item.
//! 3. `len` forward steps (or backward steps) return to the starting item.

use proptest::prelude::*;
use rpaver_navigator::{GroupedSelectionNavigator, Step};

// ── Helpers ─────────────────────────────────────────────────────────────

fn groups_strategy() -> impl Strategy<Value = Vec<Vec<u16>>> {
    prop::collection::vec(prop::collection::vec(any::<u16>(), 0..12), 0..6)
}

fn steps_strategy() -> impl Strategy<Value = Vec<Step>> {
    prop::collection::vec(prop_oneof![Just(Step::Next), Just(Step::Prev)], 0..64)
}

proptest! {
    #[test]
    fn steps_preserve_group(
        groups in groups_strategy(),
        group in 0usize..8,
        item in 0usize..16,
        steps in steps_strategy(),
    ) {
        let mut nav = GroupedSelectionNavigator::new(groups.clone());
        let opened = nav.open(group, item);
        let valid = groups.get(group).is_some_and(|g| item < g.len());
        prop_assert_eq!(opened, valid);

        for step in steps {
            nav.step(step);
            match nav.selection() {
                Some(selection) => {
                    prop_assert_eq!(selection.group, group);
                    prop_assert!(selection.item < groups[group].len());
                    prop_assert_eq!(nav.selected_item(), Some(&groups[group][selection.item]));
                }
                None => prop_assert!(!valid, "navigator closed itself while stepping"),
            }
        }
    }
}

proptest! {
    #[test]
    fn full_cycle_returns_to_start(len in 1usize..32, start in 0usize..32, forward in any::<bool>()) {
        let start = start % len;
        let mut nav = GroupedSelectionNavigator::new(vec![(0..len).collect::<Vec<_>>()]);
        prop_assert!(nav.open(0, start));
        let step = if forward { Step::Next } else { Step::Prev };
        for _ in 0..len {
            nav.step(step);
        }
        prop_assert_eq!(nav.selected_item(), Some(&start));
    }
}
