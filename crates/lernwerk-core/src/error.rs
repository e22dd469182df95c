//! Grading and lifecycle error types.
//!
//! Recoverable, user-facing refusals are modelled as [`ValidationFailure`]
//! and travel inside `Ok(..)`. The remaining types are real errors; they are
//! carried through `anyhow` so callers can downcast and classify them.

use thiserror::Error;

use crate::model::TaskStatus;

/// A question whose authored data does not fit its answer type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataShapeError {
    /// A multiple-choice question with fewer than two options.
    #[error("question {question_id}: multiple-choice needs at least 2 options, found {count}")]
    TooFewOptions { question_id: String, count: usize },

    /// The correct option does not index into the option list.
    #[error("question {question_id}: correct option {index} is out of range for {len} options")]
    CorrectOptionOutOfRange {
        question_id: String,
        index: usize,
        len: usize,
    },

    /// A text question with a blank expected answer.
    #[error("question {question_id}: expected answer is empty")]
    EmptyExpectedAnswer { question_id: String },

    /// A required authored field is absent or not a valid value.
    #[error("question {question_id}: {field} is missing or invalid")]
    MissingField {
        question_id: String,
        field: &'static str,
    },
}

impl DataShapeError {
    /// The id of the offending question.
    pub fn question_id(&self) -> &str {
        match self {
            DataShapeError::TooFewOptions { question_id, .. }
            | DataShapeError::CorrectOptionOutOfRange { question_id, .. }
            | DataShapeError::EmptyExpectedAnswer { question_id }
            | DataShapeError::MissingField { question_id, .. } => question_id,
        }
    }
}

/// Why a submission was refused. No state is mutated when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    /// At least one quiz question has no answer yet.
    #[error("{} question(s) still unanswered", unanswered.len())]
    IncompleteQuiz { unanswered: Vec<String> },

    /// A quiz task without any questions.
    #[error("quiz has no questions")]
    NoQuestions,

    /// The free-text answer is empty after trimming.
    #[error("answer is empty")]
    EmptyAnswer,

    /// The task has already left the `pending` state.
    #[error("task is already {status}")]
    NotPending { status: TaskStatus },
}

/// Errors raised by the task lifecycle controller.
#[derive(Debug, Error)]
pub enum TaskError {
    /// No task with this id exists in the store.
    #[error("unknown task: {0}")]
    UnknownTask(String),

    /// No question with this id exists on the task.
    #[error("task {task_id} has no question {question_id}")]
    UnknownQuestion {
        task_id: String,
        question_id: String,
    },

    /// The supplied answer does not fit the question's answer type.
    #[error("question {question_id} expects a {expected} answer")]
    AnswerShape {
        question_id: String,
        expected: &'static str,
    },

    /// The task can no longer be edited.
    #[error("task {task_id} is {status}, answers can only change while pending")]
    NotEditable { task_id: String, status: TaskStatus },

    /// Grading was refused because some questions cannot be scored.
    #[error("task {task_id} has {} unscoreable question(s)", problems.len())]
    Unscoreable {
        task_id: String,
        problems: Vec<DataShapeError>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_shape_error_exposes_question_id() {
        let err = DataShapeError::CorrectOptionOutOfRange {
            question_id: "q7".into(),
            index: 4,
            len: 2,
        };
        assert_eq!(err.question_id(), "q7");
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn validation_failure_messages() {
        let f = ValidationFailure::IncompleteQuiz {
            unanswered: vec!["a".into(), "b".into()],
        };
        assert_eq!(f.to_string(), "2 question(s) still unanswered");
        let f = ValidationFailure::NotPending {
            status: TaskStatus::Graded,
        };
        assert_eq!(f.to_string(), "task is already graded");
    }

    #[test]
    fn answer_shape_names_the_answer_type() {
        let err = TaskError::AnswerShape {
            question_id: "q".into(),
            expected: "true-false",
        };
        assert_eq!(err.to_string(), "question q expects a true-false answer");
    }

    #[test]
    fn missing_field_message() {
        let err = DataShapeError::MissingField {
            question_id: "q3".into(),
            field: "correctOption",
        };
        assert_eq!(err.question_id(), "q3");
        assert_eq!(err.to_string(), "question q3: correctOption is missing or invalid");
    }
}
