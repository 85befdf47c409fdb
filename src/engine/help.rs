//! engine::help
//!
//! Help fallback: a command answered [`Outcome::ShowHelp`], so the help
//! command runs in its place with the original command name as its first
//! argument.

use anyhow::Result;
use tracing::debug;

use super::command::{Outcome, HELP_FLAGS};
use super::errors::DispatchError;
use super::lookup::{ResolveContext, HELP_COMMAND};
use super::orchestrator::Orchestrator;
use crate::core::environment::Environment;

/// Rewrite `args` in place for the help command.
///
/// Removes every `--help` / `-h` token and prepends `command_name`.
///
/// ```
/// use hearthwork::engine::help::rewrite_help_args;
///
/// let mut args = vec!["--prod".to_string(), "-h".to_string()];
/// rewrite_help_args(Some("build"), &mut args);
/// assert_eq!(args, vec!["build".to_string(), "--prod".to_string()]);
/// ```
pub fn rewrite_help_args(command_name: Option<&str>, args: &mut Vec<String>) {
    args.retain(|arg| !HELP_FLAGS.contains(&arg.as_str()));
    if let Some(name) = command_name {
        args.insert(0, name.to_string());
    }
}

impl Orchestrator {
    /// Resolve and run the help command for `command_name`.
    ///
    /// # Errors
    ///
    /// Fails with [`DispatchError::HelpRecursion`] if the help command itself
    /// answers `ShowHelp`.
    pub(super) async fn call_help(
        &self,
        env: &Environment,
        command_name: Option<&str>,
        command_args: &mut Vec<String>,
    ) -> Result<i32> {
        debug!(command = command_name.unwrap_or("<none>"), "re-dispatching to help");

        let factory = self.resolver.resolve(
            &env.commands,
            Some(HELP_COMMAND),
            command_args,
            &ResolveContext {
                project: &env.project,
                ui: self.shared.ui.as_ref(),
            },
        )?;
        let mut help = factory.build(self.shared.command_options(env));

        rewrite_help_args(command_name, command_args);

        match help.validate_and_run(command_args).await? {
            Outcome::Exit(code) => Ok(code),
            Outcome::ShowHelp => Err(DispatchError::HelpRecursion.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn strips_all_help_tokens() {
        let mut a = args(&["-h", "--port", "4200", "--help", "-h"]);
        rewrite_help_args(Some("serve"), &mut a);
        assert_eq!(a, args(&["serve", "--port", "4200"]));
    }

    #[test]
    fn no_name_only_strips() {
        let mut a = args(&["--help"]);
        rewrite_help_args(None, &mut a);
        assert!(a.is_empty());
    }
}
