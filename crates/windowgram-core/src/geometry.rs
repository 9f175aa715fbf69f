#![forbid(unsafe_code)]

//! Geometric primitives for windowgram cells.
//!
//! Windowgram coordinates are 1-based: the top-left cell is `(1, 1)`.

use serde::{Deserialize, Serialize};

/// Orientation.
///
/// For sizes, directions and splits this names the dimension being divided:
/// `Vertical` stacks rows (top/bottom), `Horizontal` places columns side by
/// side (left/right). For edges it names the orientation of the edge line: a
/// `Vertical` edge is a column boundary and its position counts columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    #[serde(rename = "v")]
    Vertical,
    #[serde(rename = "h")]
    Horizontal,
}

impl Axis {
    /// Single-letter code (`v` or `h`).
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Vertical => 'v',
            Self::Horizontal => 'h',
        }
    }
}

/// A rectangle of windowgram cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge (inclusive, 1-based).
    pub x: usize,
    /// Top edge (inclusive, 1-based).
    pub y: usize,
    /// Width in cells.
    pub width: usize,
    /// Height in cells.
    pub height: usize,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> usize {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> usize {
        self.y + self.height
    }

    /// Whether the two rectangles share at least one cell.
    #[inline]
    pub const fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// A pane: its identifier and the 1-based bounding box of all its cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pane {
    pub id: char,
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl Pane {
    #[inline]
    pub const fn new(id: char, x: usize, y: usize, w: usize, h: usize) -> Self {
        Self { id, x, y, w, h }
    }

    #[inline]
    pub const fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> usize {
        self.x + self.w
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> usize {
        self.y + self.h
    }

    /// Whether the pane has no area (e.g. it vanished while scaling).
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Swap the axes.
    #[inline]
    #[must_use]
    pub const fn transposed(&self) -> Self {
        Self::new(self.id, self.y, self.x, self.h, self.w)
    }

    /// Whether the bounding boxes share a cell.
    #[inline]
    pub const fn overlaps(&self, other: &Pane) -> bool {
        self.rect().overlaps(&other.rect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_exclusive() {
        let r = Rect::new(2, 3, 4, 5);
        assert_eq!(r.right(), 6);
        assert_eq!(r.bottom(), 8);
    }

    #[test]
    fn adjacent_rects_do_not_overlap() {
        let a = Rect::new(1, 1, 2, 2);
        assert!(!a.overlaps(&Rect::new(3, 1, 2, 2)));
        assert!(!a.overlaps(&Rect::new(1, 3, 2, 2)));
        assert!(a.overlaps(&Rect::new(2, 2, 2, 2)));
    }

    #[test]
    fn panes_overlap_by_bounding_box() {
        let left = Pane::new('1', 1, 1, 2, 3);
        assert!(!left.overlaps(&Pane::new('2', 3, 1, 1, 3)));
        assert!(left.overlaps(&Pane::new('3', 2, 3, 4, 1)));
    }

    #[test]
    fn transpose_swaps_axes() {
        let p = Pane::new('a', 1, 4, 2, 7);
        assert_eq!(p.transposed(), Pane::new('a', 4, 1, 7, 2));
        assert_eq!(p.transposed().transposed(), p);
    }

    #[test]
    fn empty_pane_detection() {
        assert!(Pane::new('a', 1, 1, 0, 3).is_empty());
        assert!(!Pane::new('a', 1, 1, 1, 1).is_empty());
    }
}
