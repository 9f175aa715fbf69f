//! Masks and mosaics.
//!
//! A mask is an extended windowgram of `@` (selected) and `:` (rejected)
//! cells with the same dimensions as the windowgram it applies to. A mosaic is
//! a base windowgram plus `(data, mask)` layers flattened bottom to top.

use crate::alphabet::{MASK_ONE, MASK_TRANSPARENT, MASK_ZERO};
use crate::convert::{Chars, mosaic_to_string};
use crate::pane_list::PaneSet;
use crate::windowgram::Windowgram;

/// Mask selecting the bounding boxes of `panes`.
///
/// Panes that are not present select nothing. A windowgram that does not
/// parse yields an all-zero mask.
#[must_use]
pub fn mask_generate(wg: &Windowgram, panes: PaneSet) -> Windowgram {
    let (width, height) = wg.width_height();
    let mut chars: Chars = vec![vec![MASK_ZERO; width]; height];
    for pane in wg.parsed().unwrap_or_default() {
        if !panes.contains(pane.id) {
            continue;
        }
        for row in chars.iter_mut().take(pane.bottom() - 1).skip(pane.y - 1) {
            for cell in row.iter_mut().take(pane.right() - 1).skip(pane.x - 1) {
                *cell = MASK_ONE;
            }
        }
    }
    Windowgram::from_chars(&chars, true)
}

/// Cell-wise AND of two masks of identical size.
#[must_use]
pub fn mask_and(a: &Windowgram, b: &Windowgram) -> Windowgram {
    let b = b.chars();
    let chars: Chars = a
        .chars()
        .iter()
        .enumerate()
        .map(|(iy, row)| {
            row.iter()
                .enumerate()
                .map(|(ix, ch)| {
                    let other = b.get(iy).and_then(|r| r.get(ix));
                    if *ch == MASK_ONE && other == Some(&MASK_ONE) {
                        MASK_ONE
                    } else {
                        MASK_ZERO
                    }
                })
                .collect()
        })
        .collect();
    Windowgram::from_chars(&chars, true)
}

/// Mask of `width` by `height` selecting one side of an edge.
///
/// `location` is the edge position along `axis` (a column count for a
/// vertical edge, a row count for a horizontal one). `first_side` selects the
/// cells before the edge, otherwise the cells after it.
#[must_use]
pub fn mask_side(
    width: usize,
    height: usize,
    axis: crate::geometry::Axis,
    location: usize,
    first_side: bool,
) -> Windowgram {
    let chars: Chars = (0..height)
        .map(|y| {
            (0..width)
                .map(|x| {
                    let along = match axis {
                        crate::geometry::Axis::Vertical => x,
                        crate::geometry::Axis::Horizontal => y,
                    };
                    if (along < location) == first_side {
                        MASK_ONE
                    } else {
                        MASK_ZERO
                    }
                })
                .collect()
        })
        .collect();
    Windowgram::from_chars(&chars, true)
}

/// A base windowgram with masked layers on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mosaic {
    pub base: Windowgram,
    pub layers: Vec<(Windowgram, Windowgram)>,
}

impl Mosaic {
    #[must_use]
    pub fn new(base: Windowgram) -> Self {
        Self {
            base,
            layers: Vec::new(),
        }
    }

    /// Add a `(data, mask)` layer on top.
    pub fn push(&mut self, data: Windowgram, mask: Windowgram) {
        self.layers.push((data, mask));
    }

    /// Split `wg` into one layer per mask.
    ///
    /// Each layer keeps only the panes its mask touches; every other cell is
    /// transparent.
    #[must_use]
    pub fn from_masks(wg: &Windowgram, masks: &[Windowgram]) -> Self {
        let mut mosaic = Self::new(wg.clone());
        let (used, _) = wg.used_unused();
        for mask in masks {
            let keep = wg.panes_from_mask(mask);
            let strip = used.difference(keep);
            let data = Windowgram::new_extended(wg.renamed(strip, MASK_TRANSPARENT).as_str());
            mosaic.push(data, mask.clone());
        }
        mosaic
    }

    /// Flatten the layers onto the base.
    #[must_use]
    pub fn flatten(&self) -> Windowgram {
        let layers: Vec<(String, String)> = self
            .layers
            .iter()
            .map(|(data, mask)| (data.as_str().to_owned(), mask.as_str().to_owned()))
            .collect();
        Windowgram::with_mode(
            &mosaic_to_string(self.base.as_str(), &layers),
            self.base.is_extended(),
        )
    }
}
