//! Edge core: derive one unambiguous edge from a group of panes.
//!
//! An edge is a run along a grid line: `pos` is the line (a column boundary
//! for a vertical edge, a row boundary for a horizontal one, 0 being the
//! outer top/left boundary) and `start..end` the cells it spans.
//!
//! The *minimal* edge is the literal boundary between the group and its
//! neighbours. The *optimal* edge extends it along the same line over every
//! pane boundary it partially overlaps, so that moving it cannot shear a third
//! pane into a non-rectangular shape.

use serde::{Deserialize, Serialize};
use windowgram_core::{Axis, Pane, PaneSet, Windowgram, convert::transpose_chars};

use crate::args::{Direction, Hint};

/// A run along a grid line; `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeRun {
    pub pos: usize,
    pub start: usize,
    pub end: usize,
}

impl EdgeRun {
    #[must_use]
    pub const fn new(pos: usize, start: usize, end: usize) -> Self {
        Self { pos, start, end }
    }
}

/// Why no edge could be derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeStatus {
    /// Nothing in the group borders anything.
    Irrational,
    /// The group borders on both axes.
    Ambiguous,
    /// The edge has gaps, or there is more than one.
    Noncontiguous,
}

impl EdgeStatus {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Irrational => "No edge found (EdgeStatus.Irrational)",
            Self::Ambiguous => "Edges found on each axis (EdgeStatus.Ambiguous)",
            Self::Noncontiguous => "Multiple edges found (EdgeStatus.Noncontiguous)",
        }
    }
}

/// A validated edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Orientation of the line: `Vertical` lines are dragged sideways.
    pub axis: Axis,
    pub minimal: EdgeRun,
    pub optimal: EdgeRun,
}

/// Inclusive run used while scanning: `(pos, first, last)`.
type RawRun = (usize, usize, usize);

/// Shared border of two panes that sit side by side, if their spans overlap.
///
/// Arguments are inclusive 1-based corners; swap the x and y arguments to
/// look for a horizontal border instead.
#[allow(clippy::too_many_arguments)]
fn side_swipe(
    p1x1: usize,
    p1x2: usize,
    p2x1: usize,
    p2x2: usize,
    p1y1: usize,
    p1y2: usize,
    p2y1: usize,
    p2y2: usize,
) -> Option<RawRun> {
    let run = |pos: usize, a: usize, b: usize| Some((pos - 1, a - 1, b - 1));
    if p2x1 == p1x2 + 1 {
        if p2y1 <= p1y1 && p2y2 <= p1y2 && p1y1 <= p2y2 {
            return run(p2x1, p1y1, p2y2);
        }
        if p1y1 <= p2y1 && p2y2 <= p1y2 {
            return run(p2x1, p2y1, p2y2);
        }
        if p2y1 <= p1y1 && p1y2 <= p2y2 {
            return run(p2x1, p1y1, p1y2);
        }
        if p1y1 <= p2y1 && p1y2 <= p2y2 && p2y1 <= p1y2 {
            return run(p2x1, p2y1, p1y2);
        }
    }
    if p1x1 == p2x2 + 1 {
        if p1y1 <= p2y1 && p1y2 <= p2y2 && p2y1 <= p1y2 {
            return run(p1x1, p2y1, p1y2);
        }
        if p2y1 <= p1y1 && p1y2 <= p2y2 {
            return run(p1x1, p1y1, p1y2);
        }
        if p1y1 <= p2y1 && p2y2 <= p1y2 {
            return run(p1x1, p2y1, p2y2);
        }
        if p2y1 <= p1y1 && p2y2 <= p1y2 && p1y1 <= p2y2 {
            return run(p1x1, p1y1, p2y2);
        }
    }
    None
}

/// Runs along the top (or bottom) side of `pane` whose neighbour is outside
/// the group. Left and right sides are scanned on transposed input.
fn swipe_side(top: bool, pane: &Pane, group: PaneSet, chars: &[Vec<char>]) -> Vec<RawRun> {
    let (y1, y2) = (pane.y, pane.y + pane.h - 1);
    let outside = |row: usize, ix: usize| {
        chars
            .get(row)
            .and_then(|r| r.get(ix))
            .is_none_or(|ch| !group.contains(*ch))
    };
    let mut runs: Vec<RawRun> = Vec::new();
    let mut current: Option<RawRun> = None;
    for ix in pane.x - 1..pane.x + pane.w - 1 {
        let hit = if top {
            (y1 == 1 || outside(y1 - 2, ix)).then_some(y1 - 1)
        } else {
            (y2 == chars.len() || outside(y2, ix)).then_some(y2)
        };
        let Some(pos) = hit else {
            continue;
        };
        current = match current {
            None => Some((pos, ix, ix)),
            Some((p, a, b)) if ix == b + 1 => Some((p, a, ix)),
            Some(run) => {
                runs.push(run);
                Some((pos, ix, ix))
            }
        };
    }
    runs.extend(current);
    runs
}

/// Drop duplicates, sort, and join runs on the same line whose cells abut.
fn merge_runs(runs: Vec<RawRun>) -> Vec<RawRun> {
    let mut unique: Vec<RawRun> = Vec::new();
    for run in runs {
        if !unique.contains(&run) {
            unique.push(run);
        }
    }
    unique.sort_by_key(|&(pos, a, _)| (pos, a));
    let mut merged: Vec<RawRun> = Vec::new();
    for (pos, a, b) in unique {
        match merged.last_mut() {
            Some(last) if last.0 == pos && last.2 + 1 == a => last.2 = b,
            _ => merged.push((pos, a, b)),
        }
    }
    merged
}

/// Grow `minimal` over every pane boundary on its line that overlaps it by
/// more than a corner, until nothing more is absorbed.
#[must_use]
pub fn build_optimal(panes: &[Pane], axis: Axis, minimal: EdgeRun) -> EdgeRun {
    let on_axis = minimal.pos;
    let mut qedges: Vec<(char, usize, usize)> = panes
        .iter()
        .filter_map(|pane| {
            let (near, far, a, b) = match axis {
                Axis::Vertical => (pane.x - 1, pane.right() - 1, pane.y - 1, pane.bottom() - 1),
                Axis::Horizontal => (pane.y - 1, pane.bottom() - 1, pane.x - 1, pane.right() - 1),
            };
            (near == on_axis || far == on_axis).then_some((pane.id, a, b))
        })
        .collect();
    let mut run = minimal;
    loop {
        let absorbed = qedges.iter().find(|&&(_, a, b)| {
            let overlap = (b.min(run.end) + 1).saturating_sub(a.max(run.start));
            overlap > 1
        });
        let Some(&(id, a, b)) = absorbed else {
            break;
        };
        run.start = run.start.min(a);
        run.end = run.end.max(b);
        qedges.retain(|&(other, _, _)| other != id);
    }
    run
}

/// Derive the edge of `group`, optionally narrowed by an axis or side hint.
///
/// Without a hint (or with an axis), members of the group are paired up and
/// their shared borders collected, trying vertical borders first. With a
/// side, the group is treated as one shape and its border on that side
/// collected.
pub fn edgecore(wg: &Windowgram, group: PaneSet, hint: Option<Hint>) -> Result<Edge, EdgeStatus> {
    let panes = wg.parsed().unwrap_or_default();
    let chars_yx = wg.chars();
    let chars_xy = transpose_chars(&chars_yx);
    let mut runs_v: Vec<RawRun> = Vec::new();
    let mut runs_h: Vec<RawRun> = Vec::new();
    for pane1 in panes.iter().filter(|p| group.contains(p.id)) {
        match hint {
            Some(Hint::Side(side @ (Direction::Top | Direction::Bottom))) => {
                runs_h.extend(swipe_side(side == Direction::Top, pane1, group, &chars_yx));
            }
            Some(Hint::Side(side @ (Direction::Left | Direction::Right))) => {
                let transposed = pane1.transposed();
                runs_v.extend(swipe_side(side == Direction::Left, &transposed, group, &chars_xy));
            }
            Some(Hint::Axis(_)) | None => {
                let vertical = matches!(hint, None | Some(Hint::Axis(Axis::Vertical)));
                let horizontal = matches!(hint, None | Some(Hint::Axis(Axis::Horizontal)));
                for pane2 in panes.iter().filter(|p| group.contains(p.id) && p.id != pane1.id) {
                    let (p1x1, p1y1, p1x2, p1y2) =
                        (pane1.x, pane1.y, pane1.right() - 1, pane1.bottom() - 1);
                    let (p2x1, p2y1, p2x2, p2y2) =
                        (pane2.x, pane2.y, pane2.right() - 1, pane2.bottom() - 1);
                    let run_v = if vertical {
                        side_swipe(p1x1, p1x2, p2x1, p2x2, p1y1, p1y2, p2y1, p2y2)
                    } else {
                        None
                    };
                    if let Some(run) = run_v {
                        runs_v.push(run);
                    } else if horizontal
                        && let Some(run) =
                            side_swipe(p1y1, p1y2, p2y1, p2y2, p1x1, p1x2, p2x1, p2x2)
                    {
                        runs_h.push(run);
                    }
                }
            }
        }
    }
    let runs_v = merge_runs(runs_v);
    let runs_h = merge_runs(runs_h);
    let (runs, axis) = match (runs_v.is_empty(), runs_h.is_empty()) {
        (true, true) => return Err(EdgeStatus::Irrational),
        (false, false) => return Err(EdgeStatus::Ambiguous),
        (false, true) => (runs_v, Axis::Vertical),
        (true, false) => (runs_h, Axis::Horizontal),
    };
    let &[(pos, first, last)] = runs.as_slice() else {
        return Err(EdgeStatus::Noncontiguous);
    };
    let minimal = EdgeRun::new(pos, first, last + 1);
    let optimal = build_optimal(&panes, axis, minimal);
    tracing::trace!(
        target: "windowgram.flex",
        axis = %axis.code(),
        pos,
        start = optimal.start,
        end = optimal.end,
        "edge resolved"
    );
    Ok(Edge {
        axis,
        minimal,
        optimal,
    })
}

/// Where an edge sits relative to the outer boundary: `-1` on the top/left
/// boundary, `1` on the bottom/right boundary, `0` inside.
#[must_use]
pub fn edge_to_edge(axis: Axis, run: EdgeRun, width: usize, height: usize) -> i8 {
    let span = match axis {
        Axis::Vertical => width,
        Axis::Horizontal => height,
    };
    if run.pos == 0 {
        -1
    } else if run.pos == span {
        1
    } else {
        0
    }
}
