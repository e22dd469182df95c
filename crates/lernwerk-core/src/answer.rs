//! Completeness checks for quiz answers.

use crate::model::{Question, QuestionKind};

/// Whether the learner has given a usable answer to `question`.
///
/// Text answers count only when they are non-empty after trimming.
pub fn is_answered(question: &Question) -> bool {
    match &question.kind {
        QuestionKind::MultipleChoice { user_answer, .. } => user_answer.is_some(),
        QuestionKind::Text { user_answer, .. } => user_answer
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty()),
        QuestionKind::TrueFalse { user_answer, .. } => user_answer.is_some(),
    }
}

/// Whether every question is answered. An empty quiz is never complete.
pub fn all_answered(questions: &[Question]) -> bool {
    !questions.is_empty() && questions.iter().all(is_answered)
}

/// Ids of the questions that still need an answer, in quiz order.
pub fn unanswered_ids(questions: &[Question]) -> Vec<String> {
    questions
        .iter()
        .filter(|q| !is_answered(q))
        .map(|q| q.id.clone())
        .collect()
}
