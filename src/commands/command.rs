//! The [`Command`] trait implemented by every fixbam subcommand.

use anyhow::Result;
use enum_dispatch::enum_dispatch;

/// Trait implemented by all fixbam CLI commands.
///
/// `command_line` is the full invocation, recorded in the output @PG record.
#[enum_dispatch]
pub trait Command {
    #[allow(clippy::missing_errors_doc)]
    fn execute(&self, command_line: &str) -> Result<()>;
}
