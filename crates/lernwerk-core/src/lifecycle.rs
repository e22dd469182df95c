//! Task lifecycle controller.
//!
//! Moves tasks through `pending → submitted → graded`. A submission is
//! validated and graded before anything is written, so a refused or failed
//! submission leaves the stored collection untouched. Each transition is
//! persisted as a whole-collection write.

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::answer::{all_answered, unanswered_ids};
use crate::error::{TaskError, ValidationFailure};
use crate::grader::{GradeReport, Grader};
use crate::model::{Answer, Task, TaskStatus};
use crate::store::TaskStore;

/// Source of timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Result of a submit request.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Submitted and graded. `task` is the stored state.
    Graded { task: Task, report: GradeReport },
    /// Not submitted; nothing was changed.
    Rejected(ValidationFailure),
}

impl SubmitOutcome {
    pub fn is_graded(&self) -> bool {
        matches!(self, SubmitOutcome::Graded { .. })
    }
}

/// The only component allowed to advance a task's status.
pub struct TaskController<S: TaskStore> {
    store: S,
    grader: Grader,
    clock: Box<dyn Clock>,
}

impl<S: TaskStore> TaskController<S> {
    pub fn new(store: S, grader: Grader) -> Self {
        Self {
            store,
            grader,
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the clock used for `submittedAt`.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read a single task.
    pub fn task(&self, task_id: &str) -> Result<Task> {
        let tasks = self.store.load_all()?;
        tasks
            .into_iter()
            .find(|t| t.id == task_id)
            .ok_or_else(|| TaskError::UnknownTask(task_id.to_string()).into())
    }

    /// Record the learner's answer to one quiz question.
    pub fn record_answer(
        &mut self,
        task_id: &str,
        question_id: &str,
        answer: Answer,
    ) -> Result<Task> {
        self.edit_pending(task_id, |task| {
            let question = task
                .question_mut(question_id)
                .ok_or_else(|| TaskError::UnknownQuestion {
                    task_id: task_id.to_string(),
                    question_id: question_id.to_string(),
                })?;
            question
                .set_answer(answer)
                .map_err(|expected| TaskError::AnswerShape {
                    question_id: question_id.to_string(),
                    expected,
                })?;
            Ok(())
        })
    }

    /// Record the learner's free-text answer.
    pub fn record_free_text(&mut self, task_id: &str, text: impl Into<String>) -> Result<Task> {
        let text = text.into();
        self.edit_pending(task_id, move |task| {
            task.answer = Some(text);
            Ok(())
        })
    }

    fn edit_pending(
        &mut self,
        task_id: &str,
        edit: impl FnOnce(&mut Task) -> Result<(), TaskError>,
    ) -> Result<Task> {
        let mut tasks = self.store.load_all()?;
        let idx = find_index(&tasks, task_id)?;
        let mut task = tasks[idx].clone();
        if task.status != TaskStatus::Pending {
            return Err(TaskError::NotEditable {
                task_id: task_id.to_string(),
                status: task.status,
            }
            .into());
        }
        edit(&mut task)?;
        tasks[idx] = task.clone();
        self.store.save_all(&tasks)?;
        Ok(task)
    }

    /// Submit a task and grade it.
    ///
    /// `free_text` replaces the stored answer of a free-text task; it is
    /// ignored for quizzes, whose answers are recorded beforehand. A task
    /// left in `submitted` (for example after a failed write) is graded
    /// without being submitted again.
    pub fn submit(&mut self, task_id: &str, free_text: Option<String>) -> Result<SubmitOutcome> {
        let mut tasks = self.store.load_all()?;
        let idx = find_index(&tasks, task_id)?;
        let mut task = tasks[idx].clone();

        match task.status {
            TaskStatus::Graded => {
                tracing::debug!(task_id, "submit refused, task already graded");
                return Ok(SubmitOutcome::Rejected(ValidationFailure::NotPending {
                    status: task.status,
                }));
            }
            TaskStatus::Pending => {
                if task.is_quiz() {
                    if free_text.is_some() {
                        tracing::debug!(task_id, "ignoring free text on quiz submission");
                    }
                } else if let Some(text) = free_text {
                    task.answer = Some(text);
                }
                if let Err(failure) = check_complete(&task) {
                    tracing::debug!(task_id, %failure, "submit refused");
                    return Ok(SubmitOutcome::Rejected(failure));
                }
            }
            TaskStatus::Submitted => {
                tracing::debug!(task_id, "resuming grading of submitted task");
            }
        }

        let report = self.grade(&task)?;

        if task.status == TaskStatus::Pending {
            task.status = TaskStatus::Submitted;
            task.submitted_at = Some(self.clock.now());
            tasks[idx] = task.clone();
            self.store.save_all(&tasks)?;
            tracing::debug!(task_id, "task submitted");
        }

        task.status = TaskStatus::Graded;
        task.grade = Some(report.grade);
        task.feedback = Some(report.feedback.clone());
        tasks[idx] = task.clone();
        self.store.save_all(&tasks)?;
        tracing::info!(task_id, grade = %report.grade, "task graded");

        Ok(SubmitOutcome::Graded { task, report })
    }

    fn grade(&self, task: &Task) -> Result<GradeReport> {
        match &task.questions {
            Some(questions) => self.grader.grade_quiz(questions).map_err(|problems| {
                for problem in &problems {
                    tracing::warn!(task_id = %task.id, "{problem}");
                }
                anyhow::Error::from(TaskError::Unscoreable {
                    task_id: task.id.clone(),
                    problems,
                })
            }),
            None => Ok(self
                .grader
                .grade_free_text(task.answer.as_deref().unwrap_or_default(), task.kind)),
        }
    }
}

/// Completeness preconditions for the `pending → submitted` transition.
fn check_complete(task: &Task) -> Result<(), ValidationFailure> {
    match &task.questions {
        Some(questions) if questions.is_empty() => Err(ValidationFailure::NoQuestions),
        Some(questions) if !all_answered(questions) => Err(ValidationFailure::IncompleteQuiz {
            unanswered: unanswered_ids(questions),
        }),
        Some(_) => Ok(()),
        None => match task.answer.as_deref() {
            Some(text) if !text.trim().is_empty() => Ok(()),
            _ => Err(ValidationFailure::EmptyAnswer),
        },
    }
}

fn find_index(tasks: &[Task], task_id: &str) -> Result<usize, TaskError> {
    tasks
        .iter()
        .position(|t| t.id == task_id)
        .ok_or_else(|| TaskError::UnknownTask(task_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bander::Grade;
    use crate::model::{Question, TaskType, TruthValue};
    use crate::store::MemoryStore;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap()
    }

    fn quiz() -> Task {
        let mut task = Task::new_quiz(
            "Borrowing",
            "rust-101",
            vec![
                Question::multiple_choice("q1", "p", vec!["a".into(), "b".into()], 0),
                Question::true_false("q2", "p", TruthValue::False),
            ],
        );
        task.id = "quiz".into();
        task
    }

    fn essay() -> Task {
        let mut task = Task::new_free_text("Essay", "rust-101", TaskType::Assignment);
        task.id = "essay".into();
        task
    }

    fn controller(tasks: Vec<Task>) -> TaskController<MemoryStore> {
        TaskController::new(MemoryStore::new(tasks), Grader::default()).with_clock(FixedClock(at()))
    }

    #[test]
    fn incomplete_quiz_is_refused_without_writes() {
        let mut c = controller(vec![quiz()]);
        c.record_answer("quiz", "q1", Answer::Choice(0)).unwrap();
        let writes = c.store().write_count();

        let outcome = c.submit("quiz", None).unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected(ValidationFailure::IncompleteQuiz {
                unanswered: vec!["q2".into()]
            })
        );
        assert_eq!(c.store().write_count(), writes);
        assert_eq!(c.task("quiz").unwrap().status, TaskStatus::Pending);
    }

    #[test]
    fn complete_quiz_is_submitted_and_graded() {
        let mut c = controller(vec![quiz()]);
        c.record_answer("quiz", "q1", Answer::Choice(0)).unwrap();
        c.record_answer("quiz", "q2", Answer::Text("false".into())).unwrap();

        let SubmitOutcome::Graded { task, report } = c.submit("quiz", None).unwrap() else {
            panic!("expected graded outcome");
        };
        assert_eq!(task.status, TaskStatus::Graded);
        assert_eq!(task.grade, Some(Grade::SehrGut));
        assert_eq!(task.submitted_at, Some(at()));
        assert_eq!(task.feedback.as_deref(), Some(report.feedback.as_str()));
        // two answers, then submitted, then graded
        assert_eq!(c.store().write_count(), 4);
        assert_eq!(c.task("quiz").unwrap(), task);
    }

    #[test]
    fn empty_free_text_is_refused() {
        let mut c = controller(vec![essay()]);
        let outcome = c.submit("essay", Some("   ".into())).unwrap();
        assert_eq!(outcome, SubmitOutcome::Rejected(ValidationFailure::EmptyAnswer));
        assert_eq!(c.task("essay").unwrap().answer, None);
        assert_eq!(c.store().write_count(), 0);
    }

    #[test]
    fn free_text_submission_stores_answer_and_grade() {
        let mut c = controller(vec![essay()]);
        let outcome = c.submit("essay", Some("ok".into())).unwrap();
        let SubmitOutcome::Graded { task, .. } = outcome else {
            panic!("expected graded outcome");
        };
        assert_eq!(task.answer.as_deref(), Some("ok"));
        assert_eq!(task.grade, Some(Grade::Ungenuegend));
    }

    #[test]
    fn stored_free_text_is_used_when_none_given() {
        let mut c = controller(vec![essay()]);
        c.record_free_text("essay", "Ownership moves values between bindings.")
            .unwrap();
        assert!(c.submit("essay", None).unwrap().is_graded());
    }

    #[test]
    fn graded_task_cannot_be_resubmitted() {
        let mut c = controller(vec![essay()]);
        c.submit("essay", Some("short".into())).unwrap();
        let before = c.task("essay").unwrap();
        let outcome = c.submit("essay", Some("a much longer and different answer".into())).unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected(ValidationFailure::NotPending {
                status: TaskStatus::Graded
            })
        );
        assert_eq!(c.task("essay").unwrap(), before);
    }

    #[test]
    fn submitted_task_is_graded_on_retry() {
        let mut task = essay();
        task.status = TaskStatus::Submitted;
        task.answer = Some("ok".into());
        task.submitted_at = Some(at());
        let mut c = controller(vec![task]);
        let SubmitOutcome::Graded { task, .. } = c.submit("essay", None).unwrap() else {
            panic!("expected graded outcome");
        };
        assert_eq!(task.status, TaskStatus::Graded);
        assert_eq!(c.store().write_count(), 1);
    }

    #[test]
    fn unknown_task_is_an_error() {
        let mut c = controller(vec![]);
        let err = c.submit("nope", None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TaskError>(),
            Some(TaskError::UnknownTask(id)) if id == "nope"
        ));
    }

    #[test]
    fn unscoreable_quiz_is_not_mutated() {
        let mut task = quiz();
        task.questions = Some(vec![Question::multiple_choice(
            "bad",
            "p",
            vec!["a".into(), "b".into()],
            9,
        )
        .answered(Answer::Choice(0))
        .unwrap()]);
        let mut c = controller(vec![task.clone()]);
        let err = c.submit("quiz", None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TaskError>(),
            Some(TaskError::Unscoreable { problems, .. }) if problems.len() == 1
        ));
        assert_eq!(c.store().write_count(), 0);
        assert_eq!(c.task("quiz").unwrap(), task);
    }

    #[test]
    fn failed_write_leaves_store_unchanged() {
        let task = essay();
        let mut c = TaskController::new(MemoryStore::failing(vec![task.clone()]), Grader::default());
        assert!(c.submit("essay", Some("some reasonable answer text".into())).is_err());
        assert_eq!(c.store().tasks(), &[task]);
    }

    #[test]
    fn answers_are_checked_against_question_type() {
        let mut c = controller(vec![quiz()]);
        let err = c
            .record_answer("quiz", "q2", Answer::Choice(1))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TaskError>(),
            Some(TaskError::AnswerShape { expected: "true-false", .. })
        ));
        let err = c
            .record_answer("quiz", "q9", Answer::Choice(1))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TaskError>(),
            Some(TaskError::UnknownQuestion { .. })
        ));
    }

    #[test]
    fn answers_are_frozen_after_grading() {
        let mut c = controller(vec![essay()]);
        c.submit("essay", Some("ok".into())).unwrap();
        let err = c.record_free_text("essay", "changed").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TaskError>(),
            Some(TaskError::NotEditable { status: TaskStatus::Graded, .. })
        ));
    }

    #[test]
    fn empty_quiz_is_refused() {
        let mut task = quiz();
        task.questions = Some(vec![]);
        let mut c = controller(vec![task]);
        assert_eq!(
            c.submit("quiz", None).unwrap(),
            SubmitOutcome::Rejected(ValidationFailure::NoQuestions)
        );
    }
}
