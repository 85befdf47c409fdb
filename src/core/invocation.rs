//! core::invocation
//!
//! Splitting raw arguments into a command name and its arguments.

/// The command the user asked for and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    /// First token, if any.
    pub command_name: Option<String>,
    /// Remaining tokens, in order.
    pub command_args: Vec<String>,
}

impl CommandInvocation {
    /// Split raw tokens.
    ///
    /// ```
    /// use hearthwork::core::invocation::CommandInvocation;
    ///
    /// let args = vec!["build".to_string(), "--prod".to_string()];
    /// let inv = CommandInvocation::from_args(&args);
    /// assert_eq!(inv.command_name.as_deref(), Some("build"));
    /// assert_eq!(inv.command_args, vec!["--prod".to_string()]);
    /// ```
    pub fn from_args(cli_args: &[String]) -> Self {
        match cli_args.split_first() {
            Some((name, rest)) => Self {
                command_name: Some(name.clone()),
                command_args: rest.to_vec(),
            },
            None => Self {
                command_name: None,
                command_args: Vec::new(),
            },
        }
    }
}
