//! Cores shared by the flex commands.
//!
//! Cores take a windowgram and return a windowgram or a status; they never
//! produce notices themselves.

pub mod edge;
pub mod group;
pub mod scale;
pub mod smudge;

pub use edge::{Edge, EdgeRun, EdgeStatus, build_optimal, edge_to_edge, edgecore};
pub use group::{GroupStatus, groupcore};
pub use scale::{SCALE_RETRIES, scale_one, scalecore, scalecore_retry};
pub use smudge::smudgecore;
