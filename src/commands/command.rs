//! Command trait definition for CLI commands.
//!
//! Every errprof subcommand implements [`Command`]; `enum_dispatch` routes the parsed
//! subcommand to its implementation without boxing.

use anyhow::Result;
use enum_dispatch::enum_dispatch;

/// Trait implemented by all errprof CLI commands.
#[enum_dispatch]
pub trait Command {
    /// Runs the command to completion.
    #[allow(clippy::missing_errors_doc)]
    fn execute(&self) -> Result<()>;
}
