//! `add <edge> <size> [newpane]`: append a new pane along one side.

use windowgram_core::{PaneIdError, Windowgram};

use super::optional;
use crate::args::{Direction, Size, single_pane};
use crate::notice::{Applied, FlexResult, ValidationError};

/// `add <edge> <size> [newpane]`
pub fn add(wg: &Windowgram, args: &[String]) -> FlexResult {
    let (edge, size) = (args[0].as_str(), args[1].as_str());
    let preferred = match optional(args, 2) {
        None => None,
        Some(arg) => Some(single_pane(arg).ok_or(PaneIdError::Invalid)),
    };
    let newpane = preferred
        .transpose()
        .and_then(|preferred| wg.new_pane_id(preferred))
        .map_err(|err| ValidationError::new(format!("Unable to secure a new pane id: {err}")))?;
    let Some(side) = Direction::parse(edge) else {
        return ValidationError::fail(
            "The edge you specified is invalid, please specify either: top, bottom, left, or right",
        );
    };

    let mut lines = wg.lines();
    let (width, height) = wg.width_height();
    let axis_length = match side {
        Direction::Top | Direction::Bottom => height,
        Direction::Left | Direction::Right => width,
    };
    let Some(size) = Size::parse(size) else {
        return ValidationError::fail(format!("Invalid size parameter: {size}"));
    };
    let count = usize::try_from(size.to_characters(axis_length)).unwrap_or(0);
    match side {
        Direction::Top => {
            let row = newpane.to_string().repeat(width);
            lines.splice(0..0, std::iter::repeat_n(row, count));
        }
        Direction::Bottom => {
            let row = newpane.to_string().repeat(width);
            lines.extend(std::iter::repeat_n(row, count));
        }
        Direction::Right => {
            let strip = newpane.to_string().repeat(count);
            for line in &mut lines {
                line.push_str(&strip);
            }
        }
        Direction::Left => {
            let strip = newpane.to_string().repeat(count);
            for line in &mut lines {
                line.insert_str(0, &strip);
            }
        }
    }
    let added = Windowgram::from_lines(&lines, wg.is_extended());
    if added == *wg {
        return Ok(Applied::new(added).with_warning("Addition was too small to register"));
    }
    Ok(Applied::new(added))
}
