// Copyright 2025 the RPAVER Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grouped selection state for the image viewer.

use alloc::vec::Vec;

/// Direction of a viewer step within the open group.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// Move to the following item, wrapping to the first.
    Next,
    /// Move to the preceding item, wrapping to the last.
    Prev,
}

/// Address of the open item.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Selection {
    /// Index of the group the item belongs to.
    pub group: usize,
    /// Index of the item within its group.
    pub item: usize,
}

/// Tracks the open item across ordered groups of items.
///
/// The navigator owns its group snapshot. Replace it with
/// [`set_groups`](Self::set_groups) when folder contents change.
#[derive(Clone, Debug)]
pub struct GroupedSelectionNavigator<T> {
    groups: Vec<Vec<T>>,
    selection: Option<Selection>,
}

impl<T> GroupedSelectionNavigator<T> {
    /// Creates a closed navigator over `groups`.
    #[must_use]
    pub fn new(groups: Vec<Vec<T>>) -> Self {
        Self {
            groups,
            selection: None,
        }
    }

    /// Returns the current groups.
    #[must_use]
    pub fn groups(&self) -> &[Vec<T>] {
        &self.groups
    }

    /// Replaces the groups, closing the navigator if the open selection no
    /// longer addresses an item.
    pub fn set_groups(&mut self, groups: Vec<Vec<T>>) {
        self.groups = groups;
        if let Some(selection) = self.selection {
            if !self.is_valid(selection.group, selection.item) {
                self.selection = None;
            }
        }
    }

    /// Opens item `item` of group `group`.
    ///
    /// Returns `false` and leaves the state untouched if the pair does not
    /// address an item of the current groups.
    pub fn open(&mut self, group: usize, item: usize) -> bool {
        if !self.is_valid(group, item) {
            return false;
        }
        self.selection = Some(Selection { group, item });
        true
    }

    /// Closes the navigator.
    pub fn close(&mut self) {
        self.selection = None;
    }

    /// Moves to the next item of the open group, wrapping at the end.
    pub fn next(&mut self) {
        self.step(Step::Next);
    }

    /// Moves to the previous item of the open group, wrapping at the start.
    pub fn prev(&mut self) {
        self.step(Step::Prev);
    }

    /// Applies `step` to the open selection. Does nothing while closed.
    pub fn step(&mut self, step: Step) {
        let Some(selection) = self.selection.as_mut() else {
            return;
        };
        let len = self.groups.get(selection.group).map_or(0, Vec::len);
        if len == 0 {
            return;
        }
        selection.item = match step {
            Step::Next => (selection.item + 1) % len,
            Step::Prev => (selection.item + len - 1) % len,
        };
    }

    /// Returns the open selection, if any.
    #[must_use]
    pub const fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Returns `true` while an item is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.selection.is_some()
    }

    /// Returns the open item, if any.
    #[must_use]
    pub fn selected_item(&self) -> Option<&T> {
        let selection = self.selection?;
        self.groups.get(selection.group)?.get(selection.item)
    }

    /// Returns the 1-based position of the open item and the length of its
    /// group, as shown in a "3 / 12" caption.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        let selection = self.selection?;
        let len = self.groups.get(selection.group)?.len();
        Some((selection.item + 1, len))
    }

    fn is_valid(&self, group: usize, item: usize) -> bool {
        self.groups.get(group).is_some_and(|items| item < items.len())
    }
}

impl<T> Default for GroupedSelectionNavigator<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::{GroupedSelectionNavigator, Selection, Step};
    use alloc::vec;
    use alloc::vec::Vec;

    fn sample() -> GroupedSelectionNavigator<char> {
        GroupedSelectionNavigator::new(vec![vec!['a', 'b', 'c'], vec!['x', 'y']])
    }

    #[test]
    fn next_wraps_within_group() {
        let mut nav = sample();
        assert!(nav.open(0, 0));
        let mut seen = vec![*nav.selected_item().unwrap()];
        for _ in 0..3 {
            nav.next();
            seen.push(*nav.selected_item().unwrap());
        }
        assert_eq!(seen, ['a', 'b', 'c', 'a']);
        assert_eq!(nav.selection(), Some(Selection { group: 0, item: 0 }));
    }

    #[test]
    fn prev_wraps_within_group() {
        let mut nav = sample();
        assert!(nav.open(1, 1));
        nav.prev();
        assert_eq!(nav.selection(), Some(Selection { group: 1, item: 0 }));
        assert_eq!(nav.selected_item(), Some(&'x'));
        nav.prev();
        assert_eq!(nav.selection(), Some(Selection { group: 1, item: 1 }));
        assert_eq!(nav.selected_item(), Some(&'y'));
    }

    #[test]
    fn closed_navigator_ignores_steps() {
        let mut nav = sample();
        assert!(nav.open(0, 2));
        nav.close();
        assert_eq!(nav.selected_item(), None);
        nav.next();
        nav.prev();
        assert_eq!(nav.selection(), None);
        // Closing twice is fine.
        nav.close();
        assert!(!nav.is_open());
    }

    #[test]
    fn open_rejects_out_of_range_pairs() {
        let mut nav = sample();
        assert!(!nav.open(2, 0));
        assert!(!nav.open(1, 2));
        assert_eq!(nav.selection(), None);

        assert!(nav.open(0, 1));
        // A rejected open keeps the previous selection.
        assert!(!nav.open(5, 5));
        assert_eq!(nav.selection(), Some(Selection { group: 0, item: 1 }));
    }

    #[test]
    fn empty_groups_reject_every_open() {
        let mut nav: GroupedSelectionNavigator<u8> = GroupedSelectionNavigator::new(Vec::new());
        assert!(!nav.open(0, 0));
        assert_eq!(nav.selected_item(), None);

        let mut nav: GroupedSelectionNavigator<u8> =
            GroupedSelectionNavigator::new(vec![Vec::new(), vec![1]]);
        assert!(!nav.open(0, 0));
        assert!(nav.open(1, 0));
    }

    #[test]
    fn single_item_group_steps_in_place() {
        let mut nav = GroupedSelectionNavigator::new(vec![vec![7_u32]]);
        assert!(nav.open(0, 0));
        nav.step(Step::Next);
        assert_eq!(nav.selected_item(), Some(&7));
        nav.step(Step::Prev);
        assert_eq!(nav.selection(), Some(Selection { group: 0, item: 0 }));
    }

    #[test]
    fn set_groups_closes_stale_selection() {
        let mut nav = sample();
        assert!(nav.open(0, 2));

        // Still in range: selection survives.
        nav.set_groups(vec![vec!['p', 'q', 'r', 's']]);
        assert_eq!(nav.selected_item(), Some(&'r'));

        // Group shrank below the open index: navigator closes.
        nav.set_groups(vec![vec!['p']]);
        assert!(!nav.is_open());
        assert_eq!(nav.selected_item(), None);
    }

    #[test]
    fn position_reports_one_based_caption() {
        let mut nav = sample();
        assert_eq!(nav.position(), None);
        assert!(nav.open(0, 2));
        assert_eq!(nav.position(), Some((3, 3)));
        nav.next();
        assert_eq!(nav.position(), Some((1, 3)));
    }
}
