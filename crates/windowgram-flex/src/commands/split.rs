//! `split <pane> <how> [size] [newpanes]`: split one pane in two.
//!
//! `how` is an axis (`vert`, `horz`) or a side (`top`, `left`, ...). With an
//! axis a negative size measures from the far side; with a side the size
//! always belongs to the new pane on that side. The default size is half.

use windowgram_core::{Axis, PANE_CHARACTERS, Windowgram};

use super::{existing_pane, optional};
use crate::args::{Direction, panes_in_use_message, parse_axis, resolve_size};
use crate::notice::{Applied, FlexResult, ValidationError};

const DEFAULT_SIZE: &str = "50%";

/// `split <pane> <how> [size] [newpanes]`
pub fn split(wg: &Windowgram, args: &[String]) -> FlexResult {
    let pane = existing_pane(wg, &args[0])?;
    let how = args[1].as_str();
    let size = optional(args, 2).unwrap_or(DEFAULT_SIZE);
    let negative = size.starts_with('-');

    let (axis, inverse, show_inverse) = match parse_axis(how) {
        Some(axis) => (axis, negative, negative),
        None => {
            if negative {
                return ValidationError::fail("Negative size only valid if `how` is vert or horz");
            }
            let Some(side) = Direction::parse(how) else {
                return ValidationError::fail("The axis you specified is invalid");
            };
            let (axis, far) = side.axis_with_flag(false);
            (axis, far, false)
        }
    };

    let Some(area) = wg.pane_xywh(pane) else {
        return ValidationError::fail("The pane you specified does not exist");
    };
    let axis_length = match axis {
        Axis::Horizontal => area.w,
        Axis::Vertical => area.h,
    };
    if area.w < 2 && area.h < 2 {
        return ValidationError::fail("Pane is too small to be split");
    }
    if axis_length < 2 {
        return ValidationError::fail("Pane is too small to be split in that way");
    }
    let mut size_chars = resolve_size(size, axis_length, show_inverse, true)?;
    if inverse {
        size_chars = axis_length - size_chars;
    }

    let (_, unused) = wg.used_unused();
    let Some(first_free) = unused.first() else {
        return ValidationError::fail("Insufficient panes to split");
    };
    let mut newpanes: Vec<char> = optional(args, 3).unwrap_or("").chars().collect();
    if newpanes.is_empty() {
        newpanes.push(first_free);
    }
    if newpanes.len() == 1 {
        newpanes.push(pane);
    }
    if newpanes.len() > 2 {
        return ValidationError::fail("Parameter newpanes exceeds the function maximum of two panes");
    }
    if let Some(bad) = newpanes.iter().find(|ch| !PANE_CHARACTERS.contains(**ch)) {
        return ValidationError::fail(format!("Invalid pane in newpanes parameter: {bad}"));
    }
    let in_use: String = newpanes
        .iter()
        .filter(|ch| !unused.contains(**ch) && **ch != pane)
        .collect();
    if let Some(message) = panes_in_use_message(&in_use) {
        return ValidationError::fail(message);
    }
    if inverse {
        newpanes.reverse();
    }

    let (near, far) = (newpanes[0], newpanes[1]);
    let cut = match axis {
        Axis::Vertical => area.y + size_chars - 1,
        Axis::Horizontal => area.x + size_chars - 1,
    };
    let chars: Vec<Vec<char>> = wg
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
                    let along = match axis {
                        Axis::Vertical => iy,
                        Axis::Horizontal => ix,
                    };
                    if along < cut { near } else { far }
                })
                .collect()
        })
        .collect();
    Ok(Applied::new(Windowgram::from_chars(&chars, wg.is_extended())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(wg: &str, args: &[&str]) -> FlexResult {
        let args: Vec<String> = args.iter().map(|s| (*s).to_owned()).collect();
        split(&Windowgram::new(wg), &args)
    }

    fn out(wg: &str, args: &[&str]) -> String {
        run(wg, args).unwrap().windowgram.as_str().to_owned()
    }

    fn error(wg: &str, args: &[&str]) -> String {
        run(wg, args).unwrap_err().message
    }

    #[test]
    fn axis_split_defaults_to_half() {
        assert_eq!(out("1111\n", &["1", "h"]), "0011\n");
        assert_eq!(out("11\n11\n", &["1", "vert"]), "00\n11\n");
    }

    #[test]
    fn negative_size_measures_from_far_side() {
        assert_eq!(out("1111\n", &["1", "horizontal", "-1"]), "1110\n");
    }

    #[test]
    fn side_split_sizes_the_new_pane() {
        assert_eq!(out("11\n11\n", &["1", "top", "1"]), "00\n11\n");
        assert_eq!(
            out("11\n11\n11\n11\n", &["1", "bottom", "1", "AB"]),
            "BB\nBB\nBB\nAA\n"
        );
        assert_eq!(out("1111\n", &["1", "left", "25%", "LR"]), "LRRR\n");
        assert_eq!(out("1111\n", &["1", "r", "1", "x"]), "111x\n");
    }

    #[test]
    fn leaves_other_panes_alone() {
        assert_eq!(out("1112\n1112\n", &["1", "v", "1"]), "0002\n1112\n");
    }

    #[test]
    fn rejects_small_panes() {
        assert_eq!(error("12\n", &["1", "h"]), "Pane is too small to be split");
        assert_eq!(error("11\n", &["1", "v"]), "Pane is too small to be split in that way");
    }

    #[test]
    fn rejects_bad_how_and_size() {
        assert_eq!(
            error("1111\n", &["1", "left", "-1"]),
            "Negative size only valid if `how` is vert or horz"
        );
        assert_eq!(error("1111\n", &["1", "diagonal"]), "The axis you specified is invalid");
        assert_eq!(
            error("1111\n", &["1", "h", "4"]),
            "Specified size (4) is greater or equal to the maximum range (4) of this function"
        );
        assert_eq!(
            error("1111\n", &["1", "h", "-4"]),
            "Specified size (-4) is greater or equal to the maximum range (-4) of this function"
        );
    }

    #[test]
    fn rejects_bad_newpanes() {
        assert_eq!(
            error("1111\n", &["1", "h", "1", "ABC"]),
            "Parameter newpanes exceeds the function maximum of two panes"
        );
        assert_eq!(
            error("1111\n", &["1", "h", "1", "!"]),
            "Invalid pane in newpanes parameter: !"
        );
        assert_eq!(
            error("1112\n", &["1", "h", "1", "2"]),
            "Specified pane (2) is already in use"
        );
    }
}
