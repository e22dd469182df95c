//! The `lernwerk progress` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use lernwerk_core::bander::Grade;
use lernwerk_core::store::{JsonFileStore, TaskStore};
use lernwerk_core::summary::summarize;

pub fn execute(tasks_path: PathBuf, course: Option<String>) -> Result<()> {
    let tasks = JsonFileStore::new(&tasks_path).load_all()?;
    let summary = summarize(&tasks, course.as_deref());

    println!(
        "{} task(s): {} pending, {} submitted, {} graded ({:.0}% complete)",
        summary.total,
        summary.pending,
        summary.submitted,
        summary.graded,
        summary.completion_rate() * 100.0
    );

    if summary.graded > 0 {
        let mut table = Table::new();
        table.set_header(vec!["Grade", "Tasks"]);
        for grade in Grade::ALL {
            let count = summary.grades.get(&grade).copied().unwrap_or(0);
            table.add_row(vec![Cell::new(grade), Cell::new(count)]);
        }
        println!("\n{table}");
    }

    if let Some(avg) = summary.average_quiz_percentage {
        println!("Average quiz score: {avg:.1}%");
    }

    Ok(())
}
