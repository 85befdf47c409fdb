//! core
//!
//! Domain types for one invocation.
//!
//! # Modules
//!
//! - [`environment`] - The resolved inputs and their concurrent resolution
//! - [`invocation`] - Command name / argument split
//! - [`project`] - Project root discovery
//! - [`settings`] - Persisted settings with global and project scopes

pub mod environment;
pub mod invocation;
pub mod project;
pub mod settings;

pub use environment::{Environment, EnvironmentSources};
pub use invocation::CommandInvocation;
pub use project::Project;
pub use settings::Settings;
