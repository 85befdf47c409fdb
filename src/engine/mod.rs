//! engine
//!
//! Orchestrates one command invocation.
//!
//! # Architecture
//!
//! The engine is the only component with control flow of its own. It
//! sequences the external collaborators (resolver, command, update checker,
//! UI, process state) and owns the exit-code contract:
//!
//! ```text
//! Resolve -> Construct -> Prepare -> Run -> [Help fallback] -> Exit code
//! ```
//!
//! # Invariants
//!
//! - Exactly one command runs per invocation (plus `help` on fallback)
//! - Every command receives the same collaborator set
//! - Every failure is reported once, through the error boundary, as exit code 1
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use hearthwork::analytics::NoopAnalytics;
//! use hearthwork::engine::Orchestrator;
//! use hearthwork::ui::TerminalUi;
//!
//! # async fn demo(env: hearthwork::core::Environment) {
//! let orchestrator = Orchestrator::new(Arc::new(TerminalUi::default()), Arc::new(NoopAnalytics), false);
//! let code = orchestrator.run(env).await;
//! std::process::exit(code);
//! # }
//! ```

pub mod boundary;
pub mod command;
pub mod errors;
pub mod help;
pub mod lookup;
pub mod orchestrator;
pub mod registry;

pub use boundary::{ErrorBoundary, EXIT_FAILURE};
pub use command::{
    help_requested, Command, CommandFactory, CommandOptions, Outcome, SharedContext,
};
pub use errors::DispatchError;
pub use lookup::{CommandResolver, RegistryResolver, ResolveContext, HELP_COMMAND};
pub use orchestrator::Orchestrator;
pub use registry::{CommandRegistry, CommandSpec};
