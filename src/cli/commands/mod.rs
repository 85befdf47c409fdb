//! cli::commands
//!
//! Built-in commands.
//!
//! # Architecture
//!
//! Each command:
//! 1. Is built by a [`CommandFactory`] from the shared [`CommandOptions`]
//! 2. Validates its arguments in `validate_and_run`
//! 3. Writes output through the UI it was given
//!
//! Commands answer [`Outcome::ShowHelp`](crate::engine::Outcome::ShowHelp)
//! when asked for `--help`; the engine then runs `help` on their behalf.

mod help;
mod version;

pub use help::HelpCommand;
pub use version::VersionCommand;

use crate::engine::{CommandFactory, CommandOptions, CommandRegistry, CommandSpec, DispatchError};

/// Registry of every built-in command.
///
/// # Errors
///
/// Fails only if two built-ins claim the same name.
pub fn builtin_registry() -> Result<CommandRegistry, DispatchError> {
    let mut registry = CommandRegistry::new();
    registry.register(
        CommandSpec::new(
            "help",
            "Show the list of commands, or help for one command",
            CommandFactory::new(|options: CommandOptions| Box::new(HelpCommand::new(options))),
        )
        .alias("h"),
    )?;
    registry.register(
        CommandSpec::new(
            "version",
            "Show version and build information",
            CommandFactory::new(|options: CommandOptions| Box::new(VersionCommand::new(options))),
        )
        .alias("v"),
    )?;
    Ok(registry)
}
