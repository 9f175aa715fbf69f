#![forbid(unsafe_code)]

//! Windowgram public facade.
//!
//! Parse a windowgram, reshape it with flex commands, and compile it into the
//! split instructions a split-based terminal multiplexer replays.
//!
//! ```
//! let mut wg = windowgram::parse("1\n").unwrap();
//! let report = windowgram::run(&mut wg, "scale 2x1 ; break 1 2x1");
//! assert!(report.is_clean());
//! assert_eq!(windowgram::export(&wg), "01\n");
//! ```

use thiserror::Error;

// --- Core re-exports -------------------------------------------------------

pub use windowgram_core::{
    Axis, CompileError, Mosaic, Pane, PaneSet, ParseError, SplitConfig, SplitNode, SplitPlan,
    Windowgram, WindowgramType,
};

// --- Flex re-exports -------------------------------------------------------

pub use windowgram_flex::{
    CommandTable, DispatchConfig, Dispatcher, FlexNotice, FlexReport, NoticePolicy, Severity,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for the facade helpers.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Compile(#[from] CompileError),
    /// A flex command string stopped with notices; holds the summary.
    #[error("{0}")]
    Flex(String),
}

/// Standard result type for the facade helpers.
pub type Result<T> = std::result::Result<T, Error>;

// --- Helpers ---------------------------------------------------------------

/// Purify and validate raw windowgram text.
pub fn parse(raw: &str) -> Result<Windowgram> {
    Ok(Windowgram::parse(raw)?)
}

/// Run a `;`-separated flex command string with the standard commands.
pub fn run(wg: &mut Windowgram, commands: &str) -> FlexReport {
    let table = CommandTable::standard();
    Dispatcher::new(&table, DispatchConfig::default()).run(wg, commands)
}

/// Parse `raw`, run `commands` on it, and fail on any notice.
pub fn reshape(raw: &str, commands: &str) -> Result<Windowgram> {
    let mut wg = parse(raw)?;
    let report = run(&mut wg, commands);
    match report.summary() {
        Some(summary) => Err(Error::Flex(summary)),
        None => Ok(wg),
    }
}

/// The canonical text of `wg`.
#[must_use]
pub fn export(wg: &Windowgram) -> String {
    wg.as_str().to_owned()
}

/// Compile `wg` into ordered split instructions.
pub fn compile(wg: &Windowgram, config: &SplitConfig) -> Result<SplitPlan> {
    Ok(windowgram_core::compile(wg, config)?)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CommandTable, DispatchConfig, Dispatcher, Error, FlexReport, Result, SplitConfig,
        SplitPlan, Windowgram, WindowgramType,
    };

    pub use crate::{core, flex};
}

pub use windowgram_core as core;
pub use windowgram_flex as flex;
