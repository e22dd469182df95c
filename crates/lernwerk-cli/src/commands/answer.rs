//! The `lernwerk answer` and `lernwerk write` commands.

use std::path::PathBuf;

use anyhow::Result;

use lernwerk_core::error::TaskError;
use lernwerk_core::grader::Grader;
use lernwerk_core::model::Answer;

pub fn execute(tasks_path: PathBuf, task_id: String, question_id: String, value: String) -> Result<()> {
    let mut controller = super::open(tasks_path, Grader::default());
    let task = controller.task(&task_id)?;

    let kind = task
        .questions
        .iter()
        .flatten()
        .find(|q| q.id == question_id)
        .map(|q| &q.kind)
        .ok_or_else(|| TaskError::UnknownQuestion {
            task_id: task_id.clone(),
            question_id: question_id.clone(),
        })?;
    let Some(answer) = Answer::parse_for(kind, &value) else {
        anyhow::bail!("'{value}' is not a valid {} answer", kind.type_name());
    };

    controller.record_answer(&task_id, &question_id, answer)?;
    println!("Recorded answer for {task_id}/{question_id}.");
    Ok(())
}

pub fn execute_text(tasks_path: PathBuf, task_id: String, text: String) -> Result<()> {
    let mut controller = super::open(tasks_path, Grader::default());
    let task = controller.record_free_text(&task_id, text)?;
    let chars = task.answer.as_deref().map_or(0, |a| a.trim().chars().count());
    println!("Recorded answer for {task_id} ({chars} characters).");
    Ok(())
}
