pub mod gls;
pub mod rrgls;

use anyhow::{anyhow, Result};
use park_model::task::{Task, TaskResult};

/// Resolves a parsed task with the solver its kind selects.
pub fn resolve_task(task: &Task) -> Result<TaskResult> {
    match task {
        Task::GreedyLocalSearch(task) => gls::solve_task(task),
        Task::RandomRestart(task) => rrgls::solve_task(task),
        Task::Unsupported { kind } => Err(anyhow!("unsupported task kind {}", kind)),
    }
}
