//! engine::lookup
//!
//! Command resolution: from a typed name to a [`CommandFactory`].
//!
//! # Resolution order ([`RegistryResolver`])
//!
//! 1. No name: the `help` command
//! 2. Exact name
//! 3. Exact alias
//! 4. Unique prefix of a command name
//!
//! Steps 2-4 are [`CommandRegistry::lookup`], which `help` shares so that any
//! name that runs a command also describes it. Several prefix matches fail
//! with [`DispatchError::AmbiguousCommand`]; none fail with
//! [`DispatchError::UnknownCommand`].

use tracing::debug;

use super::command::CommandFactory;
use super::errors::DispatchError;
use super::registry::CommandRegistry;
use crate::core::project::Project;
use crate::ui::Ui;

/// Name of the command used for help re-dispatch and empty invocations.
pub const HELP_COMMAND: &str = "help";

/// What a resolver may consult besides the registry.
pub struct ResolveContext<'a> {
    pub project: &'a Project,
    pub ui: &'a dyn Ui,
}

/// Maps a command name to a command implementation.
pub trait CommandResolver: Send + Sync {
    /// Resolve `name` against `registry`.
    fn resolve(
        &self,
        registry: &CommandRegistry,
        name: Option<&str>,
        args: &[String],
        ctx: &ResolveContext<'_>,
    ) -> Result<CommandFactory, DispatchError>;
}

/// Default resolver backed by the registry's names and aliases.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistryResolver;

impl CommandResolver for RegistryResolver {
    fn resolve(
        &self,
        registry: &CommandRegistry,
        name: Option<&str>,
        args: &[String],
        ctx: &ResolveContext<'_>,
    ) -> Result<CommandFactory, DispatchError> {
        let name = name.unwrap_or(HELP_COMMAND);
        debug!(
            command = name,
            args = args.len(),
            project = %ctx.project.root.display(),
            "resolving command"
        );

        let spec = registry.lookup(name)?;
        if !spec.answers_to(name) {
            debug!(command = name, resolved = %spec.name, "resolved by prefix");
        }
        Ok(spec.factory.clone())
    }
}
