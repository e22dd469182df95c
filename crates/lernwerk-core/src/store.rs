//! Task collection storage.
//!
//! The controller reads the whole collection before an operation and writes
//! the whole collection after a successful transition. [`JsonFileStore`] keeps
//! it in a JSON file; [`MemoryStore`] keeps it in memory for tests.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::model::{Task, TaskType};
use crate::scorer::check_shape;

/// Read-all / write-all access to the task collection.
pub trait TaskStore {
    /// Read every task, in stored order.
    fn load_all(&self) -> Result<Vec<Task>>;

    /// Replace the stored collection with `tasks`.
    fn save_all(&mut self, tasks: &[Task]) -> Result<()>;
}

/// In-memory store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    tasks: Vec<Task>,
    writes: usize,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            ..Self::default()
        }
    }

    /// A store whose writes always fail.
    pub fn failing(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            writes: 0,
            fail_writes: true,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl TaskStore for MemoryStore {
    fn load_all(&self) -> Result<Vec<Task>> {
        Ok(self.tasks.clone())
    }

    fn save_all(&mut self, tasks: &[Task]) -> Result<()> {
        if self.fail_writes {
            anyhow::bail!("memory store is read-only");
        }
        self.tasks = tasks.to_vec();
        self.writes += 1;
        Ok(())
    }
}

/// JSON file holding an array of tasks.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TaskStore for JsonFileStore {
    /// A missing file is an empty collection.
    fn load_all(&self) -> Result<Vec<Task>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read tasks from {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse tasks in {}", self.path.display()))
    }

    /// Atomic write via temp file + rename.
    fn save_all(&mut self, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_string_pretty(tasks).context("failed to serialize tasks")?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .with_context(|| format!("failed to write tasks to {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

/// A problem found in a task collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskWarning {
    pub task_id: String,
    pub message: String,
}

/// Check a task collection for authoring mistakes.
pub fn validate_tasks(tasks: &[Task]) -> Vec<TaskWarning> {
    let mut warnings = Vec::new();
    let mut warn = |task: &Task, message: String| {
        warnings.push(TaskWarning {
            task_id: task.id.clone(),
            message,
        })
    };

    let mut seen_ids = HashSet::new();
    for task in tasks {
        if !seen_ids.insert(task.id.as_str()) {
            warn(task, format!("duplicate task ID: {}", task.id));
        }

        match (&task.questions, task.kind) {
            (None, TaskType::Quiz) => {
                warn(task, "quiz has no questions, it will be graded as free text".into())
            }
            (Some(questions), TaskType::Quiz) if questions.is_empty() => {
                warn(task, "quiz has an empty question list and cannot be submitted".into())
            }
            (Some(_), kind) if kind != TaskType::Quiz => {
                warn(task, format!("{kind} task carries quiz questions"))
            }
            _ => {}
        }

        let mut question_ids = HashSet::new();
        for question in task.questions.iter().flatten() {
            if !question_ids.insert(question.id.as_str()) {
                warn(task, format!("duplicate question ID: {}", question.id));
            }
            if let Err(e) = check_shape(question) {
                warn(task, e.to_string());
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Question;

    fn quiz() -> Task {
        Task::new_quiz(
            "Quiz",
            "course",
            vec![Question::multiple_choice("q1", "p", vec!["a".into(), "b".into()], 0)],
        )
    }

    #[test]
    fn memory_store_counts_writes() {
        let mut store = MemoryStore::new(vec![quiz()]);
        let tasks = store.load_all().unwrap();
        store.save_all(&tasks).unwrap();
        assert_eq!(store.write_count(), 1);
        assert_eq!(store.tasks().len(), 1);
    }

    #[test]
    fn failing_store_keeps_contents() {
        let task = quiz();
        let mut store = MemoryStore::failing(vec![task.clone()]);
        assert!(store.save_all(&[]).is_err());
        assert_eq!(store.tasks(), &[task]);
    }

    #[test]
    fn json_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("tasks.json"));
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn json_store_writes_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tasks.json");
        let mut store = JsonFileStore::new(&path);
        let tasks = vec![quiz(), Task::new_free_text("Essay", "course", TaskType::Assignment)];
        store.save_all(&tasks).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(store.load_all().unwrap(), tasks);
    }

    #[test]
    fn json_store_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = JsonFileStore::new(&path).load_all().unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse tasks"));
    }

    #[test]
    fn json_store_reports_unwritable_parent() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let mut store = JsonFileStore::new(blocker.join("tasks.json"));
        let err = store.save_all(&[quiz()]).unwrap_err();
        assert!(format!("{err:#}").contains("failed to create"), "{err:#}");
    }

    #[test]
    fn validate_flags_authoring_mistakes() {
        let mut dup = quiz();
        dup.id = "same".into();
        let mut dup2 = dup.clone();
        dup2.questions = Some(vec![
            Question::multiple_choice("x", "p", vec!["a".into()], 0),
            Question::text("x", "p", "  "),
        ]);
        let mut reading = Task::new_free_text("Read", "c", TaskType::Reading);
        reading.questions = Some(vec![]);
        let bare_quiz = Task::new_free_text("Quiz", "c", TaskType::Quiz);

        let warnings = validate_tasks(&[dup, dup2, reading, bare_quiz]);
        let messages: Vec<&str> = warnings.iter().map(|w| w.message.as_str()).collect();
        assert!(messages.iter().any(|m| m.contains("duplicate task ID")));
        assert!(messages.iter().any(|m| m.contains("duplicate question ID")));
        assert!(messages.iter().any(|m| m.contains("at least 2 options")));
        assert!(messages.iter().any(|m| m.contains("expected answer is empty")));
        assert!(messages.iter().any(|m| m.contains("reading task carries quiz questions")));
        assert!(messages.iter().any(|m| m.contains("graded as free text")));
    }

    #[test]
    fn validate_clean_collection() {
        assert!(validate_tasks(&[quiz()]).is_empty());
    }
}
