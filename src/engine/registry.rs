//! engine::registry
//!
//! The set of commands a user can invoke.

use std::collections::BTreeMap;

use super::command::CommandFactory;
use super::errors::DispatchError;

/// A registered command.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    /// Primary name.
    pub name: String,
    /// Alternative names.
    pub aliases: Vec<String>,
    /// One-line description for help output.
    pub description: String,
    /// Constructor.
    pub factory: CommandFactory,
}

impl CommandSpec {
    /// Create a spec with no aliases.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        factory: CommandFactory,
    ) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            description: description.into(),
            factory,
        }
    }

    /// Add an alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Whether `name` is this command's name or one of its aliases.
    pub fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.aliases.iter().any(|a| a == name)
    }
}

/// Mapping from command name to [`CommandSpec`].
///
/// # Invariants
///
/// - Names and aliases are unique across the registry
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, CommandSpec>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::DuplicateCommand`] if the name or any alias
    /// is already taken.
    pub fn register(&mut self, spec: CommandSpec) -> Result<(), DispatchError> {
        let taken = std::iter::once(&spec.name)
            .chain(spec.aliases.iter())
            .find(|n| self.find(n).is_some());
        if let Some(name) = taken {
            return Err(DispatchError::DuplicateCommand(name.clone()));
        }
        self.commands.insert(spec.name.clone(), spec);
        Ok(())
    }

    /// Find a command by exact name or alias.
    pub fn find(&self, name: &str) -> Option<&CommandSpec> {
        self.commands
            .get(name)
            .or_else(|| self.commands.values().find(|spec| spec.answers_to(name)))
    }

    /// Find a command by exact name, alias, or unique name prefix.
    ///
    /// # Errors
    ///
    /// [`DispatchError::AmbiguousCommand`] when several names start with
    /// `name`, [`DispatchError::UnknownCommand`] when none do. An empty name
    /// is unknown.
    pub fn lookup(&self, name: &str) -> Result<&CommandSpec, DispatchError> {
        if let Some(spec) = self.find(name) {
            return Ok(spec);
        }

        let mut candidates = self
            .commands
            .values()
            .filter(|spec| !name.is_empty() && spec.name.starts_with(name));
        match (candidates.next(), candidates.next()) {
            (Some(spec), None) => Ok(spec),
            (Some(first), Some(second)) => {
                let mut names = vec![first.name.clone(), second.name.clone()];
                names.extend(candidates.map(|spec| spec.name.clone()));
                Err(DispatchError::AmbiguousCommand {
                    name: name.to_string(),
                    candidates: names,
                })
            }
            (None, _) => Err(DispatchError::UnknownCommand(name.to_string())),
        }
    }

    /// All commands, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.values()
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
