//! `break <pane> <grid> [newpanes]`: break one pane into a grid of panes.
//!
//! When the pane does not divide evenly by the grid, the whole windowgram is
//! first scaled up so that it does.

use windowgram_core::{MAXIMUM_PANES, PaneSet, Windowgram, move_panes, preferential_order};

use super::{existing_pane, optional};
use crate::args::panes_in_use_message;
use crate::cores::scalecore_retry;
use crate::notice::{Applied, FlexResult, ValidationError};

/// Parse `WxH`, checking it against the panes that will be free.
fn parse_grid(grid: &str, available: usize) -> Result<(usize, usize), ValidationError> {
    let digits = |s: &str| !s.is_empty() && s.chars().all(|ch| ch.is_ascii_digit());
    let invalid = || ValidationError::new(format!("Grid parameter is invalid: {grid}"));
    if grid.matches('x').count() != 1 {
        return Err(invalid());
    }
    let Some((gw, gh)) = grid.split_once('x') else {
        return Err(invalid());
    };
    if !digits(gw) || !digits(gh) {
        return Err(invalid());
    }
    let (Ok(gw), Ok(gh)) = (gw.parse::<usize>(), gh.parse::<usize>()) else {
        return Err(invalid());
    };
    let panes = gw.saturating_mul(gh);
    if panes == 0 {
        return ValidationError::fail("Grid you specified results in no panes");
    }
    if panes > MAXIMUM_PANES {
        return ValidationError::fail(format!(
            "Grid is {panes} panes, exceeding max of {MAXIMUM_PANES}"
        ));
    }
    if panes > available {
        return ValidationError::fail(format!(
            "Grid is {panes} panes, only {available} will be available"
        ));
    }
    Ok((gw, gh))
}

/// Smallest size at or above `length` that `cells` divides evenly, but never
/// below `cells`.
const fn scale_to(length: usize, cells: usize) -> usize {
    if length > cells {
        if length % cells != 0 {
            (length / cells + 1) * cells
        } else {
            length
        }
    } else {
        cells
    }
}

/// `break <pane> <grid> [newpanes]`
pub fn break_pane(wg: &Windowgram, args: &[String]) -> FlexResult {
    let pane = existing_pane(wg, &args[0])?;
    let (used, unused) = wg.used_unused();
    let (gw, gh) = parse_grid(&args[1], unused.len() + 1)?;

    let (wg_w, wg_h) = wg.width_height();
    let Some(before) = wg.pane_xywh(pane) else {
        return ValidationError::fail("The pane you specified does not exist");
    };
    let target_w = scale_to(before.w, gw);
    let target_h = scale_to(before.h, gh);
    let scaled = scalecore_retry(
        wg,
        wg_w * target_w / before.w,
        wg_h * target_h / before.h,
        pane,
        target_w,
        target_h,
    );
    let Some(area) = scaled
        .pane_xywh(pane)
        .filter(|p| p.w == target_w && p.h == target_h)
    else {
        return ValidationError::fail("The result is not the expected pane size");
    };

    let (used, unused) = move_panes(used, unused, PaneSet::from_chars(&pane.to_string()));
    let order: Vec<char> = match optional(args, 2).filter(|s| !s.is_empty()) {
        Some(newpanes) => {
            let in_use: String = newpanes
                .chars()
                .filter(|ch| !unused.contains(*ch) && *ch != pane)
                .collect();
            if let Some(message) = panes_in_use_message(&in_use) {
                return ValidationError::fail(message);
            }
            preferential_order(used, unused, newpanes)
        }
        None => unused.iter().collect(),
    };

    let chars: Vec<Vec<char>> = scaled
        .chars()
        .iter()
        .enumerate()
        .map(|(iy, row)| {
            row.iter()
                .enumerate()
                .map(|(ix, &ch)| {
                    if ch != pane {
                        return ch;
                    }
                    let gy = (iy + 1 - area.y) * gh / area.h;
                    let gx = (ix + 1 - area.x) * gw / area.w;
                    order.get(gy * gw + gx).copied().unwrap_or(ch)
                })
                .collect()
        })
        .collect();
    tracing::debug!(target: "windowgram.flex", %pane, gw, gh, "pane broken into grid");
    Ok(Applied::new(Windowgram::from_chars(&chars, wg.is_extended())))
}
