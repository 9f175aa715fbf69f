//! Run `;`-separated flex command strings against a live windowgram.
//!
//! Each sub-command is looked up in a [`CommandTable`], run against the
//! current windowgram and, on success, replaces it. A rejected command leaves
//! the windowgram as it was. Processing stops at the first sub-command that
//! produced a notice, unless the policy allows warnings through.

use serde::{Deserialize, Serialize};
use windowgram_core::Windowgram;

use crate::notice::FlexNotice;
use crate::registry::{CommandTable, Lookup};

/// When to stop a command sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticePolicy {
    /// Stop after any command that produced a warning or an error.
    #[default]
    HaltOnNotice,
    /// Keep going through warnings; stop only on errors.
    ContinueOnWarning,
}

/// Dispatcher configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchConfig {
    pub notice_policy: NoticePolicy,
}

impl DispatchConfig {
    #[must_use]
    pub const fn with_notice_policy(mut self, notice_policy: NoticePolicy) -> Self {
        self.notice_policy = notice_policy;
        self
    }

    /// Load from environment variables.
    ///
    /// Reads:
    /// - `WINDOWGRAM_FLEX_CONTINUE_ON_WARNING`: Set to "1" or "true" to run
    ///   through warnings
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("WINDOWGRAM_FLEX_CONTINUE_ON_WARNING")
            && (val == "1" || val.eq_ignore_ascii_case("true"))
        {
            config.notice_policy = NoticePolicy::ContinueOnWarning;
        }

        config
    }
}

/// What happened while running one command string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlexReport {
    /// The command string as given.
    pub commands: String,
    pub notices: Vec<FlexNotice>,
    /// Sub-commands that ran to completion (with or without warnings).
    pub executed: usize,
    /// True if a notice stopped the sequence early or rejected a command.
    pub halted: bool,
}

impl FlexReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.notices.is_empty()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.notices.iter().any(FlexNotice::is_error)
    }

    /// A printable account of every notice, or `None` when there were none.
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        if self.notices.is_empty() {
            return None;
        }
        let mut out = format!(
            "There were warnings or errors when processing: {}\n",
            self.commands
        );
        for notice in &self.notices {
            out.push_str("* ");
            out.push_str(&notice.message);
            out.push('\n');
        }
        Some(out)
    }
}

/// Runs command strings against a table.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'t> {
    table: &'t CommandTable,
    config: DispatchConfig,
}

impl<'t> Dispatcher<'t> {
    #[must_use]
    pub const fn new(table: &'t CommandTable, config: DispatchConfig) -> Self {
        Self { table, config }
    }

    #[must_use]
    pub const fn config(&self) -> DispatchConfig {
        self.config
    }

    /// Run every sub-command of `commands` in order against `wg`.
    pub fn run(&self, wg: &mut Windowgram, commands: &str) -> FlexReport {
        let mut report = FlexReport {
            commands: commands.to_owned(),
            ..FlexReport::default()
        };
        for segment in commands.split(';').map(str::trim) {
            if segment.is_empty() {
                continue;
            }
            let mut words = segment.split_whitespace();
            let Some(word) = words.next() else {
                continue;
            };
            let args: Vec<String> = words.map(str::to_owned).collect();
            let notices = self.run_one(wg, segment, word, &args, &mut report);
            let stop = match self.config.notice_policy {
                NoticePolicy::HaltOnNotice => !notices.is_empty(),
                NoticePolicy::ContinueOnWarning => notices.iter().any(FlexNotice::is_error),
            };
            report.notices.extend(notices);
            if stop {
                report.halted = true;
                break;
            }
        }
        report
    }

    fn run_one(
        &self,
        wg: &mut Windowgram,
        segment: &str,
        word: &str,
        args: &[String],
        report: &mut FlexReport,
    ) -> Vec<FlexNotice> {
        let (spec, args) = match self.table.lookup(word, args) {
            Lookup::Found { spec, args } => (spec, args),
            Lookup::NotFound => {
                tracing::warn!(target: "windowgram.flex", command = word, "command not found");
                return vec![FlexNotice::error(format!("Command not found: {segment}"))];
            }
            Lookup::ArgumentMismatch => {
                tracing::warn!(target: "windowgram.flex", command = word, "argument mismatch");
                return vec![FlexNotice::error(format!(
                    "Command argument mismatch: {segment}"
                ))];
            }
        };
        let span = tracing::debug_span!(
            target: "windowgram.flex",
            "flex.command",
            command = spec.name,
            args = %args.join(" ")
        );
        let _guard = span.enter();

        if wg.is_blank() {
            tracing::warn!(target: "windowgram.flex", "no windowgram to modify");
            return vec![FlexNotice::error("Please specify a window with use or new")];
        }
        match (spec.handler)(wg, &args) {
            Ok(applied) => {
                *wg = applied.windowgram;
                report.executed += 1;
                tracing::debug!(
                    target: "windowgram.flex",
                    warnings = applied.warnings.len(),
                    "command applied"
                );
                applied
                    .warnings
                    .into_iter()
                    .map(FlexNotice::warning)
                    .collect()
            }
            Err(err) => {
                tracing::warn!(target: "windowgram.flex", error = %err, "command rejected");
                vec![err.into()]
            }
        }
    }
}
