//! `drag [hint] <edge> <direction> <size> [limit]`: move an edge.
//!
//! The edge is named by the panes that border it, optionally narrowed by a
//! hint (an axis or a side). Everything on the edge's path is smudged along;
//! panes listed after a `:` (the scalegroup) are instead scaled as a block
//! on either side of the edge, so they keep their proportions.
//!
//! The full drag is tried first. If it would blank the windowgram (or lose
//! panes while `limit` is set), the largest drag that does not is found by
//! bisection.

use windowgram_core::{
    Axis, MASK_ONE, PANE_CHAR_ALL, PaneSet, Windowgram, mask_and, mask_generate, mask_side,
};

use super::{lost_panes, optional};
use crate::args::{Hint, is_true, resolve_size, thru_valid_panes};
use crate::cores::{
    Edge, EdgeRun, GroupStatus, build_optimal, edge_to_edge, edgecore, groupcore, scalecore,
    smudgecore,
};
use crate::notice::{Applied, FlexResult, ValidationError};

/// `drag <edge> <direction> <size>`
pub fn drag_short(wg: &Windowgram, args: &[String]) -> FlexResult {
    drag(wg, "", &args[0], &args[1], &args[2], None)
}

/// `drag <hint> <edge> <direction> <size> [limit]`
pub fn drag_full(wg: &Windowgram, args: &[String]) -> FlexResult {
    drag(wg, &args[0], &args[1], &args[2], &args[3], optional(args, 4))
}

/// A hint word: `Some(None)` for no hint, `None` when unrecognized.
fn resolve_hint(word: &str) -> Option<Option<Hint>> {
    if word.is_empty() {
        Some(None)
    } else {
        Hint::resolve(word).map(Some)
    }
}

fn expand_all(panes: &str, used: PaneSet) -> PaneSet {
    let set = PaneSet::from_chars(panes);
    if panes.contains(PANE_CHAR_ALL) {
        set.union(used)
    } else {
        set
    }
}

/// The two halves of the windowgram on either side of the edge, and the
/// scaled regions within them.
struct DragPlan {
    edge: Edge,
    move_axis: Axis,
    inverse: bool,
    /// Scaled region masks before and after the edge.
    masks: [Windowgram; 2],
    /// Contents of those regions.
    dynamics: [Windowgram; 2],
}

impl DragPlan {
    /// Drag by `count` cells.
    fn apply(&self, wg: &Windowgram, count: usize) -> Windowgram {
        let location = self.edge.optimal.pos;
        let edge_axis = self.edge.axis;
        let mut dynamics = self.dynamics.clone();
        for (which, dynamic) in dynamics.iter_mut().enumerate() {
            if !dynamic.panes_exist() {
                continue;
            }
            let grows = self.inverse == (which == 1);
            let resize = |val: usize| match (val, grows) {
                (0, _) => 0,
                (val, true) => val + count,
                (val, false) => val.saturating_sub(count),
            };
            let (w, h) = dynamic.width_height();
            let (w, h) = match self.move_axis {
                Axis::Horizontal => (resize(w), h),
                Axis::Vertical => (w, resize(h)),
            };
            *dynamic = scalecore(dynamic, w, h);
        }
        let masks = self.masks.clone().map(|mask| {
            if mask.panes_exist() {
                smudgecore(&mask, location, edge_axis, count, self.inverse, None)
            } else {
                mask
            }
        });

        let mut out = wg.clone();
        let mut run: EdgeRun = self.edge.optimal;
        let mut remaining = count;
        let step: isize = if self.inverse { -1 } else { 1 };
        while remaining > 0 && out.panes_exist() {
            let (w, h) = out.width_height();
            let mut shift = step;
            if edge_to_edge(edge_axis, run, w, h) != 0 {
                shift *= remaining as isize;
            }
            let length = shift.unsigned_abs();
            out = smudgecore(&out, run.pos, edge_axis, length, self.inverse, Some(run));
            remaining -= length;
            if remaining == 0 {
                break;
            }
            let Some(pos) = run.pos.checked_add_signed(shift) else {
                break;
            };
            run.pos = pos;
            run = build_optimal(&out.parsed().unwrap_or_default(), edge_axis, run);
        }
        for (mask, dynamic) in masks.iter().zip(&dynamics) {
            out = out.copy_masked_in(mask, dynamic);
        }
        Windowgram::with_mode(out.as_str(), wg.is_extended())
    }
}

/// Why a scale mask cannot be dragged, if it cannot.
fn mask_problem(mask: &Windowgram, edge_axis: Axis, location: usize) -> Option<&'static str> {
    if mask.has_pane(MASK_ONE) && !mask.edge_panes_along(edge_axis, location).contains(MASK_ONE) {
        return Some("Group of panes does not touch the specified edge");
    }
    let (status, _) = groupcore(mask, PaneSet::from_chars(&MASK_ONE.to_string()));
    (status == GroupStatus::InsufficientPanes)
        .then_some("The group of panes is an unsupported irregular shape, try making it rectangular")
}

fn drag(
    wg: &Windowgram,
    hint: &str,
    edge: &str,
    direction: &str,
    size: &str,
    limit: Option<&str>,
) -> FlexResult {
    let (used, unused) = wg.used_unused();

    // The hint and the edge may be given in either order.
    let mut swapped = "";
    let mut res_hint = resolve_hint(hint);
    let mut res_edge = thru_valid_panes(edge, "*:").filter(|e| !e.is_empty());
    if matches!(res_hint, None | Some(None)) || res_edge.is_none() {
        let swapped_hint = Hint::resolve(edge);
        let swapped_edge = thru_valid_panes(hint, "*:").filter(|e| !e.is_empty());
        if let (Some(h), Some(e)) = (swapped_hint, swapped_edge) {
            res_hint = Some(Some(h));
            res_edge = Some(e);
            swapped = "swapped ";
        }
    }
    let Some(res_hint) = res_hint else {
        return ValidationError::fail(format!("The {swapped}hint is unrecognized"));
    };
    let Some(res_edge) = res_edge else {
        return ValidationError::fail("The edge contains invalid pane characters");
    };
    let mut invalids = String::new();
    let mut not_used = String::new();
    for ch in res_edge.chars() {
        if used.contains(ch) || ch == PANE_CHAR_ALL || ch == ':' {
            continue;
        }
        if unused.contains(ch) {
            not_used.push(ch);
        } else {
            invalids.push(ch);
        }
    }
    if !invalids.is_empty() {
        return ValidationError::fail(format!(
            "The panes ({invalids}) in {swapped}edge ({res_edge}) are invalid"
        ));
    }
    if !not_used.is_empty() {
        return ValidationError::fail(format!(
            "The panes ({not_used}) in {swapped}edge ({res_edge}) are not being used"
        ));
    }
    let (edge_panes, scalegroup) = res_edge.split_once(':').unwrap_or((res_edge, ""));
    if scalegroup.contains(':') {
        return ValidationError::fail(
            "Please specify the optional scalegroup in the form: \"<edge>:<scalegroup>\"",
        );
    }
    let edge_group = expand_all(edge_panes, used);
    let scale_group = expand_all(scalegroup, used);

    let Some(res_direction) = Hint::resolve(direction) else {
        return ValidationError::fail("The direction parameter is unrecognized");
    };
    let found = edgecore(wg, edge_group, res_hint).map_err(|status| {
        ValidationError::new(format!("Edge specification error: {}", status.message()))
    })?;
    if res_direction.family() == found.axis {
        return ValidationError::fail("The direction must go against the edge axis");
    }

    let negative = size.starts_with('-');
    let (move_axis, inverse, show_inverse) = match res_direction {
        Hint::Axis(axis) => (axis, negative, negative),
        Hint::Side(side) => {
            if negative {
                return ValidationError::fail(
                    "Negative size only valid if `direction` is vertical or horizontal",
                );
            }
            let (axis, towards_origin) = side.axis_with_flag(true);
            (axis, towards_origin, false)
        }
    };

    let (width, height) = wg.width_height();
    let location = found.optimal.pos;
    let axis_length = if inverse {
        location
    } else {
        match move_axis {
            Axis::Horizontal => width,
            Axis::Vertical => height,
        }
        .saturating_sub(location)
    };
    let size_chars = resolve_size(size, axis_length, show_inverse, false)
        .map_err(|err| ValidationError::new(format!("Size error: {err}")))?;
    let limit = limit.is_some_and(|word| is_true(word, Some("limit")));

    let sides = [
        mask_side(width, height, found.axis, location, true),
        mask_side(width, height, found.axis, location, false),
    ];
    let generate = |panes: PaneSet| {
        let selected = mask_generate(wg, panes);
        [mask_and(&sides[0], &selected), mask_and(&sides[1], &selected)]
    };
    let validate = |masks: &[Windowgram; 2]| {
        masks
            .iter()
            .find_map(|mask| mask_problem(mask, found.axis, location))
    };
    let mut masks = generate(scale_group.union(edge_group));
    if validate(&masks).is_some() {
        masks = generate(scale_group);
    }
    if let Some(problem) = validate(&masks) {
        return ValidationError::fail(format!("Unable to drag: {problem}"));
    }
    let dynamics = [wg.copy_masked_out(&masks[0]), wg.copy_masked_out(&masks[1])];
    let plan = DragPlan {
        edge: found,
        move_axis,
        inverse,
        masks,
        dynamics,
    };

    let rejected = |out: &Windowgram| {
        out.is_blank() || (limit && !lost_panes(wg, out).is_empty())
    };
    let mut chars = size_chars;
    let (mut chars_min, mut chars_max) = (0, size_chars + 1);
    let dragged = loop {
        if chars == 0 {
            return ValidationError::fail(
                "Drag without losing panes is not possible for the given parameters with this windowgram",
            );
        }
        let out = plan.apply(wg, chars);
        if rejected(&out) {
            chars_max = chars;
        } else {
            chars_min = chars;
        }
        let span = chars_max - chars_min;
        if span == 1 {
            if chars == chars_min {
                break out;
            }
            chars = chars_min;
        } else {
            chars = chars_min + span / 2;
        }
    };
    tracing::debug!(
        target: "windowgram.flex",
        requested = size_chars,
        dragged = chars,
        "drag settled"
    );

    let lost = lost_panes(wg, &dragged);
    let applied = Applied::new(dragged);
    if lost.is_empty() {
        Ok(applied)
    } else {
        Ok(applied.with_warning(format!(
            "The drag action resulted in {} lost panes: {lost}",
            lost.len()
        )))
    }
}
