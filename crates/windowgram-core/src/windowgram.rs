//! The [`Windowgram`] value type.
//!
//! A windowgram owns its canonical purified string. Every other view (lines,
//! chars, parsed panes) is computed on demand, and every edit produces a new
//! value.

use std::fmt;

use thiserror::Error;

use crate::alphabet::{MASK_ONE, MASK_TRANSPARENT, is_valid_pane};
use crate::convert::{
    Chars, chars_to_string, lines_to_string, parsed_to_string, purify, string_to_chars,
    string_to_lines, string_to_parsed, transpose_chars,
};
use crate::error::ParseError;
use crate::geometry::{Axis, Pane};
use crate::pane_list::PaneSet;

/// Failure to allocate a pane identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaneIdError {
    #[error("All pane identifiers have been used")]
    Exhausted,
    #[error("Invalid pane identifier")]
    Invalid,
    #[error("Pane id `{0}` is in use")]
    InUse(char),
}

/// A screen layout as a grid of pane identifiers.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Windowgram {
    text: String,
    extended: bool,
}

impl Windowgram {
    /// Purify `raw` without validating it.
    ///
    /// Blank and malformed windowgrams are representable; [`Self::parsed`]
    /// reports what is wrong with them.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self {
            text: purify(raw),
            extended: false,
        }
    }

    /// A windowgram that admits the mask symbols `.`, `@` and `:`.
    #[must_use]
    pub fn new_extended(raw: &str) -> Self {
        Self {
            text: purify(raw),
            extended: true,
        }
    }

    /// Purify and validate raw text.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let wg = Self::new(raw);
        wg.parsed()?;
        Ok(wg)
    }

    #[must_use]
    pub fn from_lines<S: AsRef<str>>(lines: &[S], extended: bool) -> Self {
        Self::with_mode(&lines_to_string(lines), extended)
    }

    #[must_use]
    pub fn from_chars(chars: &[Vec<char>], extended: bool) -> Self {
        Self::with_mode(&chars_to_string(chars), extended)
    }

    #[must_use]
    pub fn from_parsed(panes: &[Pane], extended: bool) -> Self {
        Self::with_mode(&parsed_to_string(panes), extended)
    }

    #[must_use]
    pub fn with_mode(raw: &str, extended: bool) -> Self {
        Self {
            text: purify(raw),
            extended,
        }
    }

    #[must_use]
    pub const fn is_extended(&self) -> bool {
        self.extended
    }

    /// The canonical string: one `\n`-terminated line per row.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        string_to_lines(&self.text)
    }

    #[must_use]
    pub fn chars(&self) -> Chars {
        string_to_chars(&self.text)
    }

    /// Panes in first-occurrence order.
    pub fn parsed(&self) -> Result<Vec<Pane>, ParseError> {
        string_to_parsed(&self.text, self.extended)
    }

    /// Width of the widest row and number of rows.
    #[must_use]
    pub fn width_height(&self) -> (usize, usize) {
        let lines = self.lines();
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        (width, lines.len())
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }

    /// True if any cell exists, transparent ones included.
    #[must_use]
    pub fn panes_exist(&self) -> bool {
        !self.is_blank()
    }

    /// Used identifiers and the remaining free ones of the active alphabet.
    #[must_use]
    pub fn used_unused(&self) -> (PaneSet, PaneSet) {
        let alphabet = PaneSet::alphabet(self.extended);
        let used = PaneSet::from_chars(&self.text).intersection(alphabet);
        (used, alphabet.difference(used))
    }

    /// The first free identifier, or `preferred` if it is valid and free.
    pub fn new_pane_id(&self, preferred: Option<char>) -> Result<char, PaneIdError> {
        let (_, unused) = self.used_unused();
        let first = unused.first().ok_or(PaneIdError::Exhausted)?;
        let Some(preferred) = preferred else {
            return Ok(first);
        };
        if !is_valid_pane(preferred, self.extended) {
            return Err(PaneIdError::Invalid);
        }
        if !unused.contains(preferred) {
            return Err(PaneIdError::InUse(preferred));
        }
        Ok(preferred)
    }

    #[must_use]
    pub fn has_pane(&self, id: char) -> bool {
        id != '\n' && self.text.contains(id)
    }

    /// 1-based inclusive corners of the cells holding `id`.
    #[must_use]
    pub fn pane_xyxy(&self, id: char) -> Option<(usize, usize, usize, usize)> {
        if !self.has_pane(id) {
            return None;
        }
        let mut bounds: Option<(usize, usize, usize, usize)> = None;
        for (y, line) in self.lines().iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                if ch != id {
                    continue;
                }
                let (x, y) = (x + 1, y + 1);
                bounds = Some(match bounds {
                    None => (x, y, x, y),
                    Some((x1, y1, x2, y2)) => (x1.min(x), y1.min(y), x2.max(x), y2.max(y)),
                });
            }
        }
        bounds
    }

    /// Bounding box of the cells holding `id`.
    #[must_use]
    pub fn pane_xywh(&self, id: char) -> Option<Pane> {
        self.pane_xyxy(id)
            .map(|(x1, y1, x2, y2)| Pane::new(id, x1, y1, x2 - x1 + 1, y2 - y1 + 1))
    }

    /// Replace every cell in `panes` with `to`.
    #[must_use]
    pub fn renamed(&self, panes: PaneSet, to: char) -> Self {
        let lines: Vec<String> = self
            .lines()
            .iter()
            .map(|line| {
                line.chars()
                    .map(|ch| if panes.contains(ch) { to } else { ch })
                    .collect()
            })
            .collect();
        Self::from_lines(&lines, self.extended)
    }

    /// Identifiers found under the `@` cells of `mask`.
    #[must_use]
    pub fn panes_from_mask(&self, mask: &Windowgram) -> PaneSet {
        let data = self.chars();
        let mask = mask.chars();
        let mut panes = PaneSet::EMPTY;
        for (row, mask_row) in data.iter().zip(&mask) {
            for (ch, m) in row.iter().zip(mask_row) {
                if *m == MASK_ONE {
                    panes.insert(*ch);
                }
            }
        }
        panes
    }

    /// Identifiers on either side of the edge at `edge` along `axis`.
    #[must_use]
    pub fn edge_panes_along(&self, axis: Axis, edge: usize) -> PaneSet {
        let mut chars = self.chars();
        if axis == Axis::Vertical {
            chars = transpose_chars(&chars);
        }
        let mut panes = PaneSet::EMPTY;
        if edge > 0
            && let Some(line) = chars.get(edge - 1)
        {
            panes = panes.union(line.iter().copied().collect());
        }
        if let Some(line) = chars.get(edge) {
            panes = panes.union(line.iter().copied().collect());
        }
        panes
    }

    /// The cells bordering one side of an edge.
    ///
    /// `before` selects the line just before the edge (column or row
    /// `edge - 1`), otherwise the line just after it. An edge on the outer
    /// boundary has nothing on its outer side; that side reads as transparent.
    #[must_use]
    pub fn edge_extract(&self, axis: Axis, edge: usize, before: bool) -> Vec<char> {
        edge_extract_chars(&self.chars(), axis, edge, before)
    }

    /// Drop every fully transparent row or column on the outside.
    #[must_use]
    pub fn clip_outer_transparents(&self) -> Self {
        let chars = self.chars();
        let occupied = |ch: &char| *ch != MASK_TRANSPARENT;
        let rows: Vec<usize> = (0..chars.len())
            .filter(|&y| chars[y].iter().any(occupied))
            .collect();
        let width = chars.iter().map(Vec::len).max().unwrap_or(0);
        let cols: Vec<usize> = (0..width)
            .filter(|&x| chars.iter().any(|row| row.get(x).is_some_and(occupied)))
            .collect();
        let (Some(&y1), Some(&y2), Some(&x1), Some(&x2)) =
            (rows.first(), rows.last(), cols.first(), cols.last())
        else {
            return Self::with_mode("", self.extended);
        };
        let clipped: Chars = chars[y1..=y2]
            .iter()
            .map(|row| row.iter().skip(x1).take(x2 - x1 + 1).copied().collect())
            .collect();
        Self::from_chars(&clipped, self.extended)
    }

    /// Minimal enclosing copy of the cells under the mask's `@` region.
    ///
    /// Cells inside the region but outside the mask read as transparent. A
    /// mask without `@` yields a blank windowgram.
    #[must_use]
    pub fn copy_masked_out(&self, mask: &Windowgram) -> Self {
        let Some(area) = mask.pane_xywh(MASK_ONE) else {
            return Self::new_extended("");
        };
        let source = self.chars();
        let mask = mask.chars();
        let mut out: Chars = vec![vec![MASK_TRANSPARENT; area.w]; area.h];
        for (oy, row) in out.iter_mut().enumerate() {
            for (ox, cell) in row.iter_mut().enumerate() {
                let (ix, iy) = (area.x - 1 + ox, area.y - 1 + oy);
                if mask.get(iy).and_then(|r| r.get(ix)) == Some(&MASK_ONE)
                    && let Some(ch) = source.get(iy).and_then(|r| r.get(ix))
                {
                    *cell = *ch;
                }
            }
        }
        Self::from_chars(&out, true)
    }

    /// Paste `data` at the origin of the mask's `@` region, only where the
    /// mask is `@`.
    ///
    /// `data` is expected to have the region's dimensions; cells falling
    /// outside this windowgram are ignored.
    #[must_use]
    pub fn copy_masked_in(&self, mask: &Windowgram, data: &Windowgram) -> Self {
        let mut chars = self.chars();
        let Some(area) = mask.pane_xywh(MASK_ONE) else {
            return self.clone();
        };
        let frame = mask.chars();
        for (iy, image_row) in data.chars().iter().enumerate() {
            for (ix, ch) in image_row.iter().enumerate() {
                let (x, y) = (area.x - 1 + ix, area.y - 1 + iy);
                if frame.get(y).and_then(|r| r.get(x)) != Some(&MASK_ONE) {
                    continue;
                }
                if let Some(cell) = chars.get_mut(y).and_then(|r| r.get_mut(x)) {
                    *cell = *ch;
                }
            }
        }
        Self::from_chars(&chars, self.extended)
    }

    /// Reverse every row (left/right).
    #[must_use]
    pub fn mirrored(&self) -> Self {
        let lines: Vec<String> = self.lines().iter().map(|l| l.chars().rev().collect()).collect();
        Self::from_lines(&lines, self.extended)
    }

    /// Reverse the row order (top/bottom).
    #[must_use]
    pub fn flipped(&self) -> Self {
        let mut lines = self.lines();
        lines.reverse();
        Self::from_lines(&lines, self.extended)
    }

    /// Swap rows and columns.
    #[must_use]
    pub fn transposed(&self) -> Self {
        Self::from_chars(&transpose_chars(&self.chars()), self.extended)
    }
}

/// [`Windowgram::edge_extract`] over an already split grid.
#[must_use]
pub fn edge_extract_chars(chars: &[Vec<char>], axis: Axis, edge: usize, before: bool) -> Vec<char> {
    let width = chars.iter().map(Vec::len).max().unwrap_or(0);
    let height = chars.len();
    let span = match axis {
        Axis::Vertical => width,
        Axis::Horizontal => height,
    };
    let outside = (before && edge == 0) || (!before && edge >= span);
    match axis {
        Axis::Vertical if outside => vec![MASK_TRANSPARENT; height],
        Axis::Horizontal if outside => vec![MASK_TRANSPARENT; width],
        Axis::Vertical => {
            let x = if before { edge - 1 } else { edge };
            chars
                .iter()
                .map(|row| row.get(x).copied().unwrap_or(MASK_TRANSPARENT))
                .collect()
        }
        Axis::Horizontal => {
            let y = if before { edge - 1 } else { edge };
            chars
                .get(y)
                .cloned()
                .unwrap_or_else(|| vec![MASK_TRANSPARENT; width])
        }
    }
}

impl fmt::Display for Windowgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Debug for Windowgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Windowgram")
            .field("text", &self.text)
            .field("extended", &self.extended)
            .finish()
    }
}
