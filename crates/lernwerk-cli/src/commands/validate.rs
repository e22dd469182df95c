//! The `lernwerk validate` command.

use std::path::PathBuf;

use anyhow::Result;

use lernwerk_core::store::{validate_tasks, JsonFileStore, TaskStore};

pub fn execute(tasks_path: PathBuf) -> Result<()> {
    anyhow::ensure!(
        tasks_path.exists(),
        "task file not found: {}",
        tasks_path.display()
    );
    let tasks = JsonFileStore::new(&tasks_path).load_all()?;
    println!("Task file: {} ({} tasks)", tasks_path.display(), tasks.len());

    let warnings = validate_tasks(&tasks);
    for w in &warnings {
        println!("  [{}] WARNING: {}", w.task_id, w.message);
    }

    if warnings.is_empty() {
        println!("All tasks valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
