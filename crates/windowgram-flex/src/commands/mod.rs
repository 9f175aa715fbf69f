//! Flex command handlers.
//!
//! Every handler takes the current windowgram and the command's arguments and
//! either returns the replacement windowgram (plus warnings) or rejects the
//! command with a [`ValidationError`]. Arity is checked by the registry before
//! a handler runs, so handlers index their required arguments directly.

pub mod add;
pub mod breakup;
pub mod drag;
pub mod join;
pub mod reflect;
pub mod rename;
pub mod scale;
pub mod split;

use windowgram_core::{PaneSet, Windowgram, diff_lost};

use crate::args::single_pane;
use crate::notice::{FlexResult, ValidationError};

/// Signature shared by every command handler.
pub type Handler = fn(&Windowgram, &[String]) -> FlexResult;

/// Resolve a pane argument that must name a pane of `wg`.
pub(crate) fn existing_pane(wg: &Windowgram, arg: &str) -> Result<char, ValidationError> {
    let Some(pane) = single_pane(arg) else {
        return ValidationError::fail("The pane you specified is invalid");
    };
    if !wg.has_pane(pane) {
        return ValidationError::fail("The pane you specified does not exist");
    }
    Ok(pane)
}

/// Panes of `before` that are missing from `after`.
pub(crate) fn lost_panes(before: &Windowgram, after: &Windowgram) -> PaneSet {
    diff_lost(before.used_unused().0, after.used_unused().0)
}

/// Optional argument `ix`, if given.
pub(crate) fn optional(args: &[String], ix: usize) -> Option<&str> {
    args.get(ix).map(String::as_str)
}
