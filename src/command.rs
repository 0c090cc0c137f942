//! Named commands a host can dispatch
//!
//! Each command runs one engine operation against the host's current view.

use crate::engine::DecorationEngine;
use crate::error::{EditorError, Result};
use crate::host::Host;
use crate::scan::ScanReport;

/// Command function signature
pub type CommandFn = fn(&DecorationEngine, &mut dyn Host) -> Result<ScanReport>;

/// A named command
pub struct Command {
    pub name: &'static str,
    pub function: CommandFn,
}

/// All commands, in the order `render-all-tags` runs them
pub static COMMANDS: &[Command] = &[
    Command {
        name: "render-at-tags",
        function: render_at_tags,
    },
    Command {
        name: "render-list-tags",
        function: render_list_tags,
    },
    Command {
        name: "render-list-subtags",
        function: render_list_subtags,
    },
    Command {
        name: "render-hr-tags",
        function: render_hr_tags,
    },
    Command {
        name: "render-all-tags",
        function: render_all_tags,
    },
];

/// Find a command by name
pub fn lookup(name: &str) -> Option<&'static Command> {
    COMMANDS.iter().find(|c| c.name == name)
}

/// Run a command by name
pub fn execute(name: &str, engine: &DecorationEngine, host: &mut dyn Host) -> Result<ScanReport> {
    let command = lookup(name).ok_or_else(|| EditorError::UnknownCommand(name.to_string()))?;
    (command.function)(engine, host)
}

fn render_at_tags(engine: &DecorationEngine, host: &mut dyn Host) -> Result<ScanReport> {
    engine.render_attribution_tags(host)
}

fn render_list_tags(engine: &DecorationEngine, host: &mut dyn Host) -> Result<ScanReport> {
    engine.render_list_tags(host)
}

fn render_list_subtags(engine: &DecorationEngine, host: &mut dyn Host) -> Result<ScanReport> {
    engine.render_list_subtags(host)
}

fn render_hr_tags(engine: &DecorationEngine, host: &mut dyn Host) -> Result<ScanReport> {
    engine.render_rule_tags(host)
}

fn render_all_tags(engine: &DecorationEngine, host: &mut dyn Host) -> Result<ScanReport> {
    engine.render_all(host)
}
