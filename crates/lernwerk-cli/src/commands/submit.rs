//! The `lernwerk submit` command.

use std::path::PathBuf;

use anyhow::Result;

use lernwerk_core::config::load_config_from;
use lernwerk_core::grader::{GradeDetail, Grader};
use lernwerk_core::lifecycle::SubmitOutcome;

/// Exit code when the submission is refused.
const EXIT_REFUSED: i32 = 2;

pub fn execute(
    tasks_path: PathBuf,
    task_id: String,
    answer: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    tracing::debug!(tasks = %tasks_path.display(), task_id = %task_id, "submitting");
    let mut controller = super::open(tasks_path, Grader::new(config));

    match controller.submit(&task_id, answer)? {
        SubmitOutcome::Graded { task, report } => {
            println!("{}: {}", task.title, report.grade);
            match &report.detail {
                GradeDetail::Quiz(outcome) => println!(
                    "Score: {}/{} ({:.1}%)",
                    outcome.score.correct_count, outcome.score.total, outcome.score.percentage
                ),
                GradeDetail::FreeText(evaluation) => {
                    println!("Score: {}/100", evaluation.score())
                }
            }
            println!("\n{}", report.feedback);
            Ok(())
        }
        SubmitOutcome::Rejected(failure) => {
            eprintln!("Not submitted: {failure}");
            std::process::exit(EXIT_REFUSED);
        }
    }
}
