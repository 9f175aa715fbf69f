//! `scale <xy_how>` and `scale <x_how> <y_how>`.
//!
//! The one-argument form accepts both axes joined by `:` or `x`, so `64:36`,
//! `64x36`, `2xx3x` and `200%x2x` all work. Anything it cannot split applies
//! to both axes.

use windowgram_core::Windowgram;

use super::lost_panes;
use crate::args::Size;
use crate::cores::scalecore;
use crate::notice::{Applied, FlexResult, ValidationError};

/// Split a combined `x:y` / `xXy` argument into its two axes.
fn split_xy(how: &str) -> (String, String) {
    if how.contains(':') {
        if let Some((x, y)) = how.split_once(':')
            && !y.contains(':')
        {
            return (x.to_owned(), y.to_owned());
        }
    } else if how.contains('x') {
        let count = how.matches('x').count();
        let ends_with_x = how.ends_with('x');
        match (count, ends_with_x) {
            (1, false) | (2, true) => {
                if let Some((x, y)) = how.split_once('x') {
                    return (x.to_owned(), y.to_owned());
                }
            }
            (2, false) => {
                if let Some((x, y)) = how.rsplit_once('x') {
                    return (x.to_owned(), y.to_owned());
                }
            }
            (3, true) => {
                let parts: Vec<&str> = how.splitn(3, 'x').collect();
                if let [x, _, y] = parts[..] {
                    return (format!("{x}x"), y.to_owned());
                }
            }
            _ => {}
        }
    }
    (how.to_owned(), how.to_owned())
}

fn axis_characters(how: &str, base: usize) -> Result<usize, ValidationError> {
    Size::parse(how)
        .map(|size| size.to_characters(base))
        .and_then(|chars| usize::try_from(chars).ok())
        .ok_or_else(|| ValidationError::new(format!("Invalid size parameter: {how}")))
}

/// Scale `wg` to the given per-axis sizes.
pub fn scale_xy(wg: &Windowgram, x_how: &str, y_how: &str) -> FlexResult {
    let (width, height) = wg.width_height();
    let w_chars = axis_characters(x_how, width)?;
    let h_chars = axis_characters(y_how, height)?;
    let scaled = scalecore(wg, w_chars, h_chars);
    let (new_w, new_h) = scaled.width_height();
    if new_w == 0 || new_h == 0 {
        return ValidationError::fail("Scale produced a blank windowgram, skipping");
    }
    if new_w != w_chars || new_h != h_chars {
        return ValidationError::fail("Scale produced erroneous result, skipping");
    }
    let lost = lost_panes(wg, &scaled);
    let applied = Applied::new(scaled);
    if lost.is_empty() {
        Ok(applied)
    } else {
        Ok(applied.with_warning(format!("Lost {} panes: {lost}", lost.len())))
    }
}

/// `scale <xy_how>`
pub fn scale_one(wg: &Windowgram, args: &[String]) -> FlexResult {
    let (x_how, y_how) = split_xy(&args[0]);
    scale_xy(wg, &x_how, &y_how)
}

/// `scale <x_how> <y_how>`
pub fn scale_two(wg: &Windowgram, args: &[String]) -> FlexResult {
    scale_xy(wg, &args[0], &args[1])
}
