#![forbid(unsafe_code)]

//! Flex: scriptable transformations of windowgram layouts.
//!
//! ```text
//! scale 25x10 ; add right 50% ; break 0 3x5 A ; join ABC.z DG.B
//! ```
//!
//! Four cores do the geometry ([`cores`]): scaling, rectangular group
//! detection, edge discovery and smudging. The [`commands`] compose them into
//! user-facing operations, the [`registry`] names those operations, and the
//! [`dispatch`]er runs `;`-separated command strings against a live
//! windowgram.

pub mod args;
pub mod commands;
pub mod cores;
pub mod dispatch;
pub mod notice;
pub mod registry;

pub use commands::Handler;
pub use cores::{Edge, EdgeRun, EdgeStatus, GroupStatus};
pub use dispatch::{DispatchConfig, Dispatcher, FlexReport, NoticePolicy};
pub use notice::{Applied, FlexNotice, FlexResult, Severity, ValidationError};
pub use registry::{CommandAlias, CommandSpec, CommandTable, Lookup, RegistryError};
