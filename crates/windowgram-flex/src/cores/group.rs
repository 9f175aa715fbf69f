//! Group core: is a set of panes a complete rectangle?
//!
//! The group's bounding rectangle is checked for foreign panes. Any found are
//! added to the group and the check repeats until the rectangle is clean, so
//! the suggestions are exactly the panes needed to make the group whole.

use serde::{Deserialize, Serialize};
use windowgram_core::{MASK_ONE, PaneSet, Windowgram, mask_generate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupStatus {
    /// The panes form a complete rectangle.
    Success,
    /// Some panes are not in use.
    InvalidPanes,
    /// The rectangle has gaps; see the suggestions.
    InsufficientPanes,
}

/// Check `panes` against `wg`.
///
/// Returns the status and, for [`GroupStatus::InsufficientPanes`], the panes
/// that would complete the group.
#[must_use]
pub fn groupcore(wg: &Windowgram, panes: PaneSet) -> (GroupStatus, PaneSet) {
    let (used, _) = wg.used_unused();
    if !panes.is_subset(&used) {
        return (GroupStatus::InvalidPanes, PaneSet::EMPTY);
    }
    let chars = wg.chars();
    let mut group = panes;
    let mut suggestions = PaneSet::EMPTY;
    loop {
        let mask = mask_generate(wg, group);
        let Some((x1, y1, x2, y2)) = mask.pane_xyxy(MASK_ONE) else {
            break;
        };
        let deficient: PaneSet = chars
            .iter()
            .take(y2)
            .skip(y1 - 1)
            .flat_map(|row| row.iter().take(x2).skip(x1 - 1))
            .copied()
            .filter(|ch| !group.contains(*ch))
            .collect();
        if deficient.is_empty() {
            break;
        }
        group = group.union(deficient);
        suggestions = suggestions.union(deficient);
    }
    if suggestions.is_empty() {
        (GroupStatus::Success, PaneSet::EMPTY)
    } else {
        (GroupStatus::InsufficientPanes, suggestions)
    }
}
