//! The flex command table.
//!
//! Each command is a declarative descriptor: name, argument count bounds,
//! group and handler. A name may be registered more than once (overloads) as
//! long as the argument counts do not overlap, so one argument count always
//! selects exactly one handler. Aliases map a shorthand to a command name
//! plus leading arguments (`half` is `scale 50%`).

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::commands::{Handler, add, breakup, drag, join, reflect, rename, scale, split};

/// Group of every command that transforms the windowgram in place.
pub const GROUP_MODIFIERS: &str = "modifiers";

/// One overload of one command.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub min_args: usize,
    /// `None` accepts any number of arguments from `min_args` up.
    pub max_args: Option<usize>,
    pub group: &'static str,
    pub usage: &'static str,
    pub handler: Handler,
}

impl CommandSpec {
    #[must_use]
    pub const fn new(name: &'static str, min_args: usize, max_args: usize, handler: Handler) -> Self {
        Self {
            name,
            min_args,
            max_args: Some(max_args),
            group: GROUP_MODIFIERS,
            usage: "",
            handler,
        }
    }

    #[must_use]
    pub const fn variadic(name: &'static str, min_args: usize, handler: Handler) -> Self {
        Self {
            name,
            min_args,
            max_args: None,
            group: GROUP_MODIFIERS,
            usage: "",
            handler,
        }
    }

    #[must_use]
    pub const fn with_usage(mut self, usage: &'static str) -> Self {
        self.usage = usage;
        self
    }

    #[must_use]
    pub const fn accepts(&self, count: usize) -> bool {
        count >= self.min_args
            && match self.max_args {
                Some(max) => count <= max,
                None => true,
            }
    }

    fn overlaps(&self, other: &Self) -> bool {
        let lo = self.min_args.max(other.min_args);
        match (self.max_args, other.max_args) {
            (None, None) => true,
            (Some(max), None) | (None, Some(max)) => lo <= max,
            (Some(a), Some(b)) => lo <= a.min(b),
        }
    }
}

/// A shorthand for a command with leading arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandAlias {
    pub alias: &'static str,
    pub command: &'static str,
    pub prefix: &'static [&'static str],
}

impl CommandAlias {
    #[must_use]
    pub const fn new(alias: &'static str, command: &'static str) -> Self {
        Self {
            alias,
            command,
            prefix: &[],
        }
    }

    #[must_use]
    pub const fn with_prefix(mut self, prefix: &'static [&'static str]) -> Self {
        self.prefix = prefix;
        self
    }
}

/// Defects in how the table was put together.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("command `{name}` has overloads accepting the same argument count")]
    OverlappingArity { name: &'static str },
    #[error("alias `{alias}` refers to unknown command `{command}`")]
    UnknownAliasTarget {
        alias: &'static str,
        command: &'static str,
    },
    #[error("alias `{alias}` shadows a command of the same name")]
    AliasShadowsCommand { alias: &'static str },
}

/// Outcome of looking a command up.
#[derive(Debug, Clone)]
pub enum Lookup<'t> {
    /// The handler to run and the full argument list, alias prefix included.
    Found {
        spec: &'t CommandSpec,
        args: Vec<String>,
    },
    NotFound,
    ArgumentMismatch,
}

/// Immutable set of commands and aliases, built once and passed to the
/// dispatcher.
#[derive(Debug, Default)]
pub struct CommandTable {
    commands: Vec<CommandSpec>,
    by_name: FxHashMap<&'static str, Vec<usize>>,
    aliases: FxHashMap<&'static str, CommandAlias>,
}

impl CommandTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in flex command and alias.
    #[must_use]
    pub fn standard() -> Self {
        let mut table = Self::new();
        for spec in [
            CommandSpec::new("scale", 1, 1, scale::scale_one).with_usage("scale <size>"),
            CommandSpec::new("scale", 2, 2, scale::scale_two).with_usage("scale <width> <height>"),
            CommandSpec::new("add", 2, 3, add::add).with_usage("add <edge> <size> [newpane]"),
            CommandSpec::new("break", 2, 3, breakup::break_pane)
                .with_usage("break <pane> <grid> [newpanes]"),
            CommandSpec::variadic("join", 1, join::join).with_usage("join <group>..."),
            CommandSpec::new("split", 2, 4, split::split)
                .with_usage("split <pane> <how> [size] [newpanes]"),
            CommandSpec::variadic("rename", 1, rename::rename)
                .with_usage("rename <from> <to> ..."),
            CommandSpec::variadic("swap", 1, rename::swap).with_usage("swap <from> <to> ..."),
            CommandSpec::new("drag", 3, 3, drag::drag_short)
                .with_usage("drag <edge> <direction> <size>"),
            CommandSpec::new("drag", 4, 5, drag::drag_full)
                .with_usage("drag <hint> <edge> <direction> <size> [limit]"),
            CommandSpec::new("mirror", 0, 0, reflect::mirror).with_usage("mirror"),
            CommandSpec::new("flip", 0, 0, reflect::flip).with_usage("flip"),
        ] {
            table.register(spec);
        }
        for alias in [
            CommandAlias::new("size", "scale"),
            CommandAlias::new("half", "scale").with_prefix(&["50%"]),
            CommandAlias::new("double", "scale").with_prefix(&["2x"]),
            CommandAlias::new("wider", "scale").with_prefix(&["200%:100%"]),
            CommandAlias::new("thinner", "scale").with_prefix(&["50%:100%"]),
            CommandAlias::new("taller", "scale").with_prefix(&["100%:200%"]),
            CommandAlias::new("higher", "scale").with_prefix(&["100%:200%"]),
            CommandAlias::new("shorter", "scale").with_prefix(&["100%:50%"]),
            CommandAlias::new("lower", "scale").with_prefix(&["100%:50%"]),
            CommandAlias::new("append", "add"),
            CommandAlias::new("app", "add"),
            CommandAlias::new("grid", "break"),
            CommandAlias::new("panes", "break"),
            CommandAlias::new("group", "join"),
            CommandAlias::new("merge", "join"),
            CommandAlias::new("glue", "join"),
            CommandAlias::new("move", "drag"),
            CommandAlias::new("slide", "drag"),
        ] {
            table.alias(alias);
        }
        table
    }

    pub fn register(&mut self, spec: CommandSpec) {
        let index = self.commands.len();
        self.by_name.entry(spec.name).or_default().push(index);
        self.commands.push(spec);
    }

    /// Register an alias. A later alias of the same name replaces the earlier.
    pub fn alias(&mut self, alias: CommandAlias) {
        self.aliases.insert(alias.alias, alias);
    }

    /// Check for overlapping overloads and dangling or shadowing aliases.
    pub fn validate(&self) -> Result<(), RegistryError> {
        let mut names: Vec<&'static str> = self.by_name.keys().copied().collect();
        names.sort_unstable();
        for name in names {
            let overloads = self.overloads(name);
            for (ix, a) in overloads.iter().enumerate() {
                if overloads[ix + 1..].iter().any(|b| a.overlaps(b)) {
                    return Err(RegistryError::OverlappingArity { name });
                }
            }
        }
        let mut aliases: Vec<&CommandAlias> = self.aliases.values().collect();
        aliases.sort_unstable_by_key(|a| a.alias);
        for alias in aliases {
            if self.by_name.contains_key(alias.alias) {
                return Err(RegistryError::AliasShadowsCommand { alias: alias.alias });
            }
            if !self.by_name.contains_key(alias.command) {
                return Err(RegistryError::UnknownAliasTarget {
                    alias: alias.alias,
                    command: alias.command,
                });
            }
        }
        Ok(())
    }

    /// Every overload registered under `name`, in registration order.
    #[must_use]
    pub fn overloads(&self, name: &str) -> Vec<&CommandSpec> {
        self.by_name
            .get(name)
            .map(|ixs| ixs.iter().filter_map(|&ix| self.commands.get(ix)).collect())
            .unwrap_or_default()
    }

    /// Resolve a command word and its arguments, expanding aliases.
    #[must_use]
    pub fn lookup(&self, word: &str, args: &[String]) -> Lookup<'_> {
        let (name, args) = match self.aliases.get(word) {
            Some(alias) => (
                alias.command,
                alias
                    .prefix
                    .iter()
                    .map(|arg| (*arg).to_owned())
                    .chain(args.iter().cloned())
                    .collect(),
            ),
            None => (word, args.to_vec()),
        };
        let overloads = self.overloads(name);
        if overloads.is_empty() {
            return Lookup::NotFound;
        }
        match overloads.into_iter().find(|spec| spec.accepts(args.len())) {
            Some(spec) => Lookup::Found { spec, args },
            None => Lookup::ArgumentMismatch,
        }
    }

    /// Command names in alphabetical order, without aliases.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.by_name.keys().copied().collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
