//! Core data model types for lernwerk.
//!
//! Tasks, quiz questions and the learner's answers. The serialized form uses
//! camelCase keys and an `answerType` tag on questions, so a task collection
//! written by the front end can be read back without translation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::bander::Grade;

/// The kind of learner work a task represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Reading,
    Video,
    Quiz,
    Assignment,
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskType::Reading => write!(f, "reading"),
            TaskType::Video => write!(f, "video"),
            TaskType::Quiz => write!(f, "quiz"),
            TaskType::Assignment => write!(f, "assignment"),
        }
    }
}

impl FromStr for TaskType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reading" => Ok(TaskType::Reading),
            "video" => Ok(TaskType::Video),
            "quiz" => Ok(TaskType::Quiz),
            "assignment" => Ok(TaskType::Assignment),
            other => Err(format!("unknown task type: {other}")),
        }
    }
}

/// Lifecycle state of a task. Only moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Submitted,
    Graded,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::Submitted => write!(f, "submitted"),
            TaskStatus::Graded => write!(f, "graded"),
        }
    }
}

/// A `"true"` / `"false"` value as stored on true-false questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TruthValue {
    True,
    False,
}

impl fmt::Display for TruthValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TruthValue::True => write!(f, "true"),
            TruthValue::False => write!(f, "false"),
        }
    }
}

impl FromStr for TruthValue {
    type Err = String;

    /// Only the exact literals are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "true" => Ok(TruthValue::True),
            "false" => Ok(TruthValue::False),
            other => Err(format!("expected \"true\" or \"false\", got {other:?}")),
        }
    }
}

/// A quiz question together with the learner's answer, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within the task.
    pub id: String,
    /// The question text.
    pub prompt: String,
    /// Answer type, expected answer and the learner's response.
    #[serde(flatten)]
    pub kind: QuestionKind,
}

/// The three answer types. Each variant carries exactly the fields its type
/// needs, so a text question can never hold options.
///
/// Missing authored fields deserialize to empty values and are reported by
/// [`check_shape`](crate::scorer::check_shape), so one malformed question
/// does not make the whole task collection unreadable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "answerType", rename_all = "kebab-case")]
pub enum QuestionKind {
    #[serde(rename_all = "camelCase")]
    MultipleChoice {
        #[serde(default)]
        options: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        correct_option: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_answer: Option<usize>,
    },
    #[serde(rename_all = "camelCase")]
    Text {
        #[serde(default)]
        correct_answer: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_answer: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    TrueFalse {
        #[serde(
            default,
            deserialize_with = "truth_literal",
            skip_serializing_if = "Option::is_none"
        )]
        correct_answer: Option<TruthValue>,
        #[serde(
            default,
            deserialize_with = "truth_literal",
            skip_serializing_if = "Option::is_none"
        )]
        user_answer: Option<TruthValue>,
    },
}

/// Anything other than the exact `"true"` / `"false"` strings reads as absent.
fn truth_literal<'de, D>(deserializer: D) -> Result<Option<TruthValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| s.parse().ok()))
}

impl QuestionKind {
    /// Name of the answer type as written in task files.
    pub fn type_name(&self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice { .. } => "multiple-choice",
            QuestionKind::Text { .. } => "text",
            QuestionKind::TrueFalse { .. } => "true-false",
        }
    }
}

impl Question {
    /// A multiple-choice question with no answer yet.
    pub fn multiple_choice(
        id: impl Into<String>,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_option: usize,
    ) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            kind: QuestionKind::MultipleChoice {
                options,
                correct_option: Some(correct_option),
                user_answer: None,
            },
        }
    }

    /// A free-text question with no answer yet.
    pub fn text(
        id: impl Into<String>,
        prompt: impl Into<String>,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            kind: QuestionKind::Text {
                correct_answer: correct_answer.into(),
                user_answer: None,
            },
        }
    }

    /// A true-false question with no answer yet.
    pub fn true_false(
        id: impl Into<String>,
        prompt: impl Into<String>,
        correct_answer: TruthValue,
    ) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            kind: QuestionKind::TrueFalse {
                correct_answer: Some(correct_answer),
                user_answer: None,
            },
        }
    }

    /// Builder-style [`set_answer`](Self::set_answer).
    pub fn answered(mut self, answer: Answer) -> Result<Self, &'static str> {
        self.set_answer(answer)?;
        Ok(self)
    }

    /// Store `answer` on this question.
    ///
    /// Returns the expected answer type name when the shape does not fit.
    pub fn set_answer(&mut self, answer: Answer) -> Result<(), &'static str> {
        match (&mut self.kind, answer) {
            (QuestionKind::MultipleChoice { user_answer, .. }, Answer::Choice(index)) => {
                *user_answer = Some(index);
                Ok(())
            }
            (QuestionKind::Text { user_answer, .. }, Answer::Text(text)) => {
                *user_answer = Some(text);
                Ok(())
            }
            (QuestionKind::TrueFalse { user_answer, .. }, Answer::Truth(value)) => {
                *user_answer = Some(value);
                Ok(())
            }
            (QuestionKind::TrueFalse { user_answer, .. }, Answer::Text(text)) => {
                let value = text.parse::<TruthValue>().map_err(|_| "true-false")?;
                *user_answer = Some(value);
                Ok(())
            }
            (kind, _) => Err(kind.type_name()),
        }
    }
}

/// An answer supplied by the learner before it is attached to a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Zero-based option index.
    Choice(usize),
    /// Free text, or a `"true"`/`"false"` literal for true-false questions.
    Text(String),
    /// An already parsed true-false value.
    Truth(TruthValue),
}

impl Answer {
    /// Interpret raw user input against the answer type of `kind`.
    pub fn parse_for(kind: &QuestionKind, raw: &str) -> Option<Answer> {
        match kind {
            QuestionKind::MultipleChoice { .. } => raw.trim().parse().ok().map(Answer::Choice),
            QuestionKind::Text { .. } => Some(Answer::Text(raw.to_string())),
            QuestionKind::TrueFalse { .. } => raw.trim().parse().ok().map(Answer::Truth),
        }
    }
}

/// A unit of learner work tracked through the grading lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Course reference. Not owned by the task.
    pub course: String,
    #[serde(rename = "type")]
    pub kind: TaskType,
    pub status: TaskStatus,
    /// Quiz questions, present only on quiz tasks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<Question>>,
    /// Free-text submission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<Grade>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl Task {
    /// A new pending quiz task.
    pub fn new_quiz(
        title: impl Into<String>,
        course: impl Into<String>,
        questions: Vec<Question>,
    ) -> Self {
        Self {
            questions: Some(questions),
            ..Self::blank(title.into(), course.into(), TaskType::Quiz)
        }
    }

    /// A new pending task graded on its free-text answer.
    pub fn new_free_text(
        title: impl Into<String>,
        course: impl Into<String>,
        kind: TaskType,
    ) -> Self {
        Self::blank(title.into(), course.into(), kind)
    }

    fn blank(title: String, course: String, kind: TaskType) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            description: String::new(),
            course,
            kind,
            status: TaskStatus::Pending,
            questions: None,
            answer: None,
            grade: None,
            feedback: None,
            created_at: Utc::now(),
            due_date: None,
            submitted_at: None,
        }
    }

    /// Whether this task is graded by the quiz scorer.
    pub fn is_quiz(&self) -> bool {
        self.questions.is_some()
    }

    /// Look up a question by id.
    pub fn question_mut(&mut self, question_id: &str) -> Option<&mut Question> {
        self.questions
            .as_mut()?
            .iter_mut()
            .find(|q| q.id == question_id)
    }
}
