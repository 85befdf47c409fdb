//! tasks
//!
//! Named units of reusable work.
//!
//! Commands receive the full [`TaskRegistry`] and look tasks up by name, so
//! two commands can share one implementation (for example a `build` task run
//! by both `build` and `serve`).

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::core::project::Project;
use crate::ui::Ui;

/// Errors from the task registry.
#[derive(Debug, Error)]
pub enum TaskError {
    /// No task with that name.
    #[error("task '{0}' is not registered")]
    NotFound(String),

    /// A task with that name already exists.
    #[error("task '{0}' is already registered")]
    Duplicate(String),
}

/// What a task sees when it runs.
#[derive(Clone)]
pub struct TaskContext {
    pub ui: Arc<dyn Ui>,
    pub project: Arc<Project>,
}

/// A reusable unit of work.
#[async_trait]
pub trait Task: Send + Sync {
    /// Run the task.
    async fn run(&self, ctx: &TaskContext, args: &[String]) -> Result<()>;
}

/// Mapping from task name to implementation.
#[derive(Clone, Default)]
pub struct TaskRegistry {
    tasks: BTreeMap<String, Arc<dyn Task>>,
}

impl TaskRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task under `name`.
    pub fn register(&mut self, name: impl Into<String>, task: Arc<dyn Task>) -> Result<(), TaskError> {
        let name = name.into();
        if self.tasks.contains_key(&name) {
            return Err(TaskError::Duplicate(name));
        }
        self.tasks.insert(name, task);
        Ok(())
    }

    /// Look up a task.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Task>, TaskError> {
        self.tasks
            .get(name)
            .cloned()
            .ok_or_else(|| TaskError::NotFound(name.to_string()))
    }

    /// Registered task names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tasks.keys().map(String::as_str)
    }

    /// Number of registered tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether no tasks are registered.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl std::fmt::Debug for TaskRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskRegistry")
            .field("tasks", &self.tasks.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::mock::MockUi;

    struct Echo;

    #[async_trait]
    impl Task for Echo {
        async fn run(&self, ctx: &TaskContext, args: &[String]) -> Result<()> {
            ctx.ui.write_line(&args.join(" "));
            Ok(())
        }
    }

    #[tokio::test]
    async fn registered_task_runs() {
        let mut registry = TaskRegistry::new();
        registry.register("echo", Arc::new(Echo)).unwrap();

        let ui = MockUi::new();
        let ctx = TaskContext {
            ui: Arc::new(ui.clone()),
            project: Arc::new(Project::new("/work/app")),
        };
        let task = registry.get("echo").unwrap();
        task.run(&ctx, &["hello".to_string(), "world".to_string()])
            .await
            .unwrap();

        assert_eq!(ui.lines(), vec!["hello world"]);
    }

    #[test]
    fn duplicate_rejected() {
        let mut registry = TaskRegistry::new();
        registry.register("echo", Arc::new(Echo)).unwrap();
        assert!(matches!(
            registry.register("echo", Arc::new(Echo)),
            Err(TaskError::Duplicate(_))
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn missing_task_is_error() {
        let registry = TaskRegistry::new();
        assert!(registry.is_empty());
        assert!(matches!(registry.get("lint"), Err(TaskError::NotFound(_))));
    }
}
