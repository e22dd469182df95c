//! The `lernwerk init` command.

use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;

use lernwerk_core::config::CONFIG_FILE_NAME;
use lernwerk_core::model::{Question, Task, TaskType, TruthValue};

const TASKS_FILE_NAME: &str = "tasks.json";

pub fn execute() -> Result<()> {
    if Path::new(CONFIG_FILE_NAME).exists() {
        println!("{CONFIG_FILE_NAME} already exists, skipping.");
    } else {
        std::fs::write(CONFIG_FILE_NAME, SAMPLE_CONFIG)?;
        println!("Created {CONFIG_FILE_NAME}");
    }

    if Path::new(TASKS_FILE_NAME).exists() {
        println!("{TASKS_FILE_NAME} already exists, skipping.");
    } else {
        let json = serde_json::to_string_pretty(&sample_tasks())?;
        std::fs::write(TASKS_FILE_NAME, json)?;
        println!("Created {TASKS_FILE_NAME}");
    }

    println!("\nNext steps:");
    println!("  1. Run: lernwerk list");
    println!("  2. Run: lernwerk answer --task quiz-ownership --question q1 --value 1");
    println!("  3. Run: lernwerk submit --task quiz-ownership");

    Ok(())
}

fn sample_tasks() -> Vec<Task> {
    let mut quiz = Task::new_quiz(
        "Ownership basics",
        "rust-101",
        vec![
            Question::multiple_choice(
                "q1",
                "What happens to a String when it is assigned to another variable?",
                vec![
                    "It is copied".into(),
                    "It is moved".into(),
                    "It is borrowed".into(),
                ],
                1,
            ),
            Question::true_false(
                "q2",
                "A value can have several mutable references at the same time.",
                TruthValue::False,
            ),
            Question::text("q3", "Which keyword creates a mutable binding?", "mut"),
        ],
    );
    quiz.id = "quiz-ownership".into();
    quiz.description = "Three questions on moves and borrows.".into();
    quiz.due_date = NaiveDate::from_ymd_opt(2026, 11, 30);

    let mut essay = Task::new_free_text("Explain borrowing", "rust-101", TaskType::Assignment);
    essay.id = "essay-borrowing".into();
    essay.description = "Describe shared and mutable borrows in your own words.".into();

    let mut reading = Task::new_free_text("Read chapter 4", "rust-101", TaskType::Reading);
    reading.id = "reading-intro".into();
    reading.description = "Summarize the chapter in a few sentences.".into();

    vec![quiz, essay, reading]
}

const SAMPLE_CONFIG: &str = r#"# lernwerk grader configuration

# Free-text answers shorter than this many characters are not scored.
min-answer-chars = 20

# Point tiers for the free-text heuristics. The first tier whose range
# contains the measured value wins.
#
# [heuristics]
# word-count = [
#     { min = 200.0, points = 30 },
#     { min = 100.0, points = 25 },
#     { min = 50.0, points = 20 },
#     { min = 20.0, points = 10 },
#     { min = 0.0, points = 5 },
# ]

# Feedback texts. Placeholders: {correct}, {total}, {percentage} for quizzes;
# {score}, {words}, {sentences}, {avg_sentence_length}, {unique_ratio} for
# free text.
#
# [feedback]
# short-answer = "Deine Antwort ist zu kurz."
#
# [feedback.quiz]
# sehr-gut = "Ausgezeichnet! {correct} von {total} richtig."
"#;
