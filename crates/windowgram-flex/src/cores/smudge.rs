//! Smudge core: push an edge by copying the cells beside it.
//!
//! The line of cells on the trailing side of the edge is repeated `length`
//! times in the direction of travel, overwriting what was there. Smudging past
//! the outer boundary grows the windowgram; smudging transparency in from the
//! outside shrinks it once the outer transparent lines are clipped.

use windowgram_core::{Axis, MASK_TRANSPARENT, Windowgram, convert::transpose_chars};

use super::edge::EdgeRun;

/// Smudge the edge at `edge` on `axis` by `length` cells.
///
/// `negative` travels towards the origin (left or up). Only cells within
/// `run` are overwritten; the whole edge is used when `run` is `None`, when
/// the trailing side is transparent, or when the edge travels outwards from
/// the boundary. The result is always in extended mode.
#[must_use]
pub fn smudgecore(
    wg: &Windowgram,
    edge: usize,
    axis: Axis,
    length: usize,
    negative: bool,
    run: Option<EdgeRun>,
) -> Windowgram {
    let (width, height) = wg.width_height();
    let span = match axis {
        Axis::Vertical => width,
        Axis::Horizontal => height,
    };
    let edge_chars = wg.edge_extract(axis, edge, !negative);
    let transparent =
        !edge_chars.is_empty() && edge_chars.iter().all(|ch| *ch == MASK_TRANSPARENT);
    let outwards = (edge == 0 && negative) || (edge == span && !negative);
    let run = match run {
        Some(run) if !transparent && !outwards => run,
        _ => EdgeRun::new(edge, 0, edge_chars.len()),
    };

    let (edge_i, length_i, span_i) = (edge as i64, length as i64, span as i64);
    let (a, b) = if negative {
        (edge_i - 1, edge_i - length_i)
    } else {
        (edge_i, edge_i + length_i - 1)
    };
    let (mut from, mut to) = (a.min(b), a.max(b));
    let (mut prepend, mut append) = (0_usize, 0_usize);
    if from <= 0 {
        prepend = from.unsigned_abs() as usize;
        from = 0;
    } else if to >= span_i {
        append = (to - span_i + 1) as usize;
        to = span_i - 1;
    }

    let mut chars = wg.chars();
    if axis == Axis::Horizontal {
        chars = transpose_chars(&chars);
    }
    for (iy, row) in chars.iter_mut().enumerate() {
        let Some(&fill) = edge_chars.get(iy) else {
            continue;
        };
        if (run.start..run.end).contains(&iy) {
            for (ix, cell) in row.iter_mut().enumerate() {
                if (from..=to).contains(&(ix as i64)) {
                    *cell = fill;
                }
            }
        }
        if prepend > 0 {
            row.splice(0..0, std::iter::repeat_n(fill, prepend));
        }
        if append > 0 {
            row.extend(std::iter::repeat_n(fill, append));
        }
    }
    if axis == Axis::Horizontal {
        chars = transpose_chars(&chars);
    }
    Windowgram::from_chars(&chars, true).clip_outer_transparents()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn smudge(wg: &str, edge: usize, axis: Axis, length: usize, negative: bool) -> String {
        smudgecore(&Windowgram::new(wg), edge, axis, length, negative, None)
            .as_str()
            .to_owned()
    }

    #[test]
    fn pushes_inner_edge_both_ways() {
        assert_eq!(smudge("12\n", 1, Axis::Vertical, 1, false), "11\n");
        assert_eq!(smudge("12\n", 1, Axis::Vertical, 1, true), "22\n");
    }

    #[test]
    fn grows_past_the_boundary() {
        assert_eq!(smudge("12\n", 2, Axis::Vertical, 2, false), "1222\n");
        assert_eq!(smudge("12\n", 0, Axis::Vertical, 1, true), "112\n");
    }

    #[test]
    fn shrinks_from_the_boundary() {
        assert_eq!(smudge("12\n", 2, Axis::Vertical, 1, true), "1\n");
        assert_eq!(smudge("12\n", 0, Axis::Vertical, 1, false), "2\n");
    }

    #[test]
    fn horizontal_edges_transpose() {
        assert_eq!(smudge("1\n2\n", 1, Axis::Horizontal, 1, false), "1\n1\n");
        assert_eq!(smudge("1\n2\n", 2, Axis::Horizontal, 1, false), "1\n2\n2\n");
    }

    #[test]
    fn run_limits_the_overwrite() {
        let wg = Windowgram::new("12\n34\n");
        let out = smudgecore(&wg, 1, Axis::Vertical, 1, false, Some(EdgeRun::new(1, 0, 1)));
        assert_eq!(out.as_str(), "11\n34\n");
        assert!(out.is_extended());
    }
}
