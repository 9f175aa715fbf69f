#![forbid(unsafe_code)]

//! Windowgram core: screen layouts drawn as grids of pane identifiers.
//!
//! ```text
//! 1122
//! 1133
//! 4444
//! ```
//!
//! This crate parses and validates windowgrams, provides the pane and mask
//! algebra the flex commands are built from, and compiles a windowgram into
//! the ordered binary splits a split-based terminal multiplexer replays.

pub mod alphabet;
pub mod convert;
pub mod error;
pub mod geometry;
pub mod group_pattern;
pub mod mask;
pub mod pane_list;
pub mod split;
pub mod windowgram;

pub use alphabet::{
    MASK_ONE, MASK_TRANSPARENT, MASK_ZERO, MAXIMUM_PANES, PANE_CHAR_ALL, PANE_CHARACTERS,
    is_valid_pane,
};
pub use error::{CompileError, ParseError};
pub use geometry::{Axis, Pane, Rect};
pub use group_pattern::{list_to_pattern, pattern_to_list};
pub use mask::{Mosaic, mask_and, mask_generate, mask_side};
pub use pane_list::{PaneSet, diff_lost, move_panes, preferential_order};
pub use split::{
    PaneAssignment, PaneLink, SplitConfig, SplitNode, SplitPlan, WindowgramType, compile,
};
pub use windowgram::{PaneIdError, Windowgram};
