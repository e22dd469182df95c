//! The `lernwerk list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use lernwerk_core::store::{JsonFileStore, TaskStore};

pub fn execute(tasks_path: PathBuf, course: Option<String>) -> Result<()> {
    let tasks = JsonFileStore::new(&tasks_path).load_all()?;
    let tasks: Vec<_> = tasks
        .iter()
        .filter(|t| course.as_deref().map_or(true, |c| t.course == c))
        .collect();

    if tasks.is_empty() {
        println!("No tasks found in {}.", tasks_path.display());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Course", "Type", "Status", "Grade", "Due"]);

    for task in &tasks {
        table.add_row(vec![
            Cell::new(&task.id),
            Cell::new(&task.title),
            Cell::new(&task.course),
            Cell::new(task.kind),
            Cell::new(task.status),
            Cell::new(task.grade.map(|g| g.to_string()).unwrap_or_default()),
            Cell::new(task.due_date.map(|d| d.to_string()).unwrap_or_default()),
        ]);
    }

    println!("{table}");
    Ok(())
}
