//! Ordered pane sets and the pane-list algebra.
//!
//! A [`PaneSet`] is a bitset over the extended alphabet. Iteration always
//! yields alphabet order, which is what every pane-list operation needs.

use std::fmt;
use std::iter::FromIterator;

use crate::alphabet::{EXTENDED_LEN, MAXIMUM_PANES, pane_at, pane_index};

/// Set of pane identifiers (and mask symbols) in alphabet order.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PaneSet(u128);

impl PaneSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Every pane identifier (without mask symbols).
    #[must_use]
    pub const fn all_panes() -> Self {
        Self((1u128 << MAXIMUM_PANES) - 1)
    }

    /// Every symbol of the alphabet, extended or not.
    #[must_use]
    pub const fn alphabet(extended: bool) -> Self {
        if extended {
            Self((1u128 << EXTENDED_LEN) - 1)
        } else {
            Self::all_panes()
        }
    }

    /// Collect the valid symbols of `text`, ignoring everything else.
    #[must_use]
    pub fn from_chars(text: &str) -> Self {
        text.chars().collect()
    }

    #[must_use]
    pub const fn contains(&self, ch: char) -> bool {
        match pane_index(ch) {
            Some(ix) => self.0 & (1u128 << ix) != 0,
            None => false,
        }
    }

    /// Insert `ch`; returns `false` if it was present or is not a symbol.
    pub fn insert(&mut self, ch: char) -> bool {
        match pane_index(ch) {
            Some(ix) => {
                let bit = 1u128 << ix;
                let fresh = self.0 & bit == 0;
                self.0 |= bit;
                fresh
            }
            None => false,
        }
    }

    pub fn remove(&mut self, ch: char) -> bool {
        match pane_index(ch) {
            Some(ix) => {
                let bit = 1u128 << ix;
                let present = self.0 & bit != 0;
                self.0 &= !bit;
                present
            }
            None => false,
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    #[must_use]
    pub const fn is_subset(&self, other: &Self) -> bool {
        self.0 & !other.0 == 0
    }

    /// First symbol in alphabet order.
    #[must_use]
    pub fn first(&self) -> Option<char> {
        if self.0 == 0 {
            return None;
        }
        pane_at(self.0.trailing_zeros() as usize)
    }

    /// Symbols in alphabet order.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        (0..EXTENDED_LEN)
            .filter(|ix| self.0 & (1u128 << *ix) != 0)
            .filter_map(pane_at)
    }
}

impl FromIterator<char> for PaneSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for ch in iter {
            set.insert(ch);
        }
        set
    }
}

impl fmt::Display for PaneSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.iter() {
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for PaneSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PaneSet(\"{self}\")")
    }
}

/// Move `panes` out of `from` and into `to`, preserving alphabet order.
///
/// Every pane identifier in `panes` ends up in `to`, even one absent from
/// `from`. Mask symbols are never moved.
#[must_use]
pub fn move_panes(from: PaneSet, to: PaneSet, panes: PaneSet) -> (PaneSet, PaneSet) {
    let moving = panes.intersection(PaneSet::all_panes());
    (from.difference(moving), to.union(moving))
}

/// Panes present in `before` but missing from `after`.
#[must_use]
pub fn diff_lost(before: PaneSet, after: PaneSet) -> PaneSet {
    before.difference(after)
}

/// Reorder the free identifiers so that caller-chosen ids come first.
///
/// `newpanes` is taken in the given order (duplicates and ids that are not
/// free are skipped). The remaining free ids follow, rotated so that they
/// start at the first id whose alphabet position is at or after the last
/// valid id in `newpanes`.
#[must_use]
pub fn preferential_order(used: PaneSet, unused: PaneSet, newpanes: &str) -> Vec<char> {
    let mut ordered: Vec<char> = Vec::new();
    let mut last_index = 0usize;
    for ch in newpanes.chars() {
        if let Some(ix) = pane_index(ch)
            && ix < MAXIMUM_PANES
        {
            last_index = ix;
        }
        if unused.contains(ch) && !used.contains(ch) && !ordered.contains(&ch) {
            ordered.push(ch);
        }
    }
    let chosen: PaneSet = ordered.iter().copied().collect();
    let work: Vec<char> = unused.difference(chosen).iter().collect();
    let pivot = work
        .iter()
        .position(|ch| pane_index(*ch).is_some_and(|ix| ix >= last_index))
        .unwrap_or(0);
    ordered.extend(work[pivot..].iter().copied());
    ordered.extend(work[..pivot].iter().copied());
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_follows_alphabet_order() {
        let set = PaneSet::from_chars("Zb0aA");
        assert_eq!(set.to_string(), "0abAZ");
        assert_eq!(set.len(), 5);
        assert_eq!(set.first(), Some('0'));
    }

    #[test]
    fn invalid_characters_are_ignored() {
        let set = PaneSet::from_chars("1 #*2");
        assert_eq!(set.to_string(), "12");
    }

    #[test]
    fn extended_symbols_sort_after_panes() {
        let set = PaneSet::from_chars(":@.Z");
        assert_eq!(set.to_string(), "Z.@:");
    }

    #[test]
    fn move_panes_keeps_sets_disjoint() {
        let used = PaneSet::from_chars("0123");
        let unused = PaneSet::all_panes().difference(used);
        let (used, unused) = move_panes(used, unused, PaneSet::from_chars("13x"));
        assert_eq!(used.to_string(), "02");
        assert!(unused.contains('1') && unused.contains('3'));
        assert!(used.intersection(unused).is_empty());
        assert_eq!(used.union(unused), PaneSet::all_panes());
    }

    #[test]
    fn diff_lost_reports_missing_panes() {
        let lost = diff_lost(PaneSet::from_chars("abc"), PaneSet::from_chars("b"));
        assert_eq!(lost.to_string(), "ac");
    }

    #[test]
    fn preferential_order_rotates_after_last_choice() {
        let used = PaneSet::from_chars("1");
        let unused = PaneSet::all_panes().difference(used);
        let order: String = preferential_order(used, unused, "A").into_iter().collect();
        assert!(order.starts_with("ABCD"));
        assert!(order.ends_with("XYZ023456789abcdefghijklmnopqrstuvwxyz"));
        assert_eq!(order.len(), 61);
    }

    #[test]
    fn preferential_order_without_choice_is_alphabetical() {
        let used = PaneSet::from_chars("0");
        let unused = PaneSet::all_panes().difference(used);
        let order: String = preferential_order(used, unused, "").into_iter().collect();
        assert_eq!(order, &crate::alphabet::PANE_CHARACTERS[1..]);
    }

    #[test]
    fn preferential_order_skips_taken_and_duplicate_ids() {
        let used = PaneSet::from_chars("01");
        let unused = PaneSet::all_panes().difference(used);
        let order = preferential_order(used, unused, "x1xy");
        assert_eq!(&order[..3], &['x', 'y', 'z']);
        assert_eq!(order.len(), 60);
    }
}
