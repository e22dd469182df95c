//! Grading: scorer or evaluator, then banding, then feedback.

use crate::bander::Grade;
use crate::config::GraderConfig;
use crate::error::DataShapeError;
use crate::evaluator::{Evaluation, TextEvaluator};
use crate::feedback::FeedbackTemplates;
use crate::model::{Question, TaskType};
use crate::scorer::{self, QuizOutcome};

/// What a grade was computed from.
#[derive(Debug, Clone, PartialEq)]
pub enum GradeDetail {
    Quiz(QuizOutcome),
    FreeText(Evaluation),
}

/// A grade with its feedback text.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeReport {
    pub grade: Grade,
    pub feedback: String,
    pub detail: GradeDetail,
}

/// Stateless grader built from a [`GraderConfig`].
#[derive(Debug, Clone, Default)]
pub struct Grader {
    evaluator: TextEvaluator,
    templates: FeedbackTemplates,
}

impl Grader {
    pub fn new(config: GraderConfig) -> Self {
        Self {
            evaluator: TextEvaluator::new(config.min_answer_chars, config.heuristics),
            templates: config.feedback,
        }
    }

    /// Grade a fully answered quiz.
    ///
    /// Fails with the shape problems if any question could not be scored.
    pub fn grade_quiz(&self, questions: &[Question]) -> Result<GradeReport, Vec<DataShapeError>> {
        let outcome = scorer::score(questions);
        if !outcome.is_complete() {
            return Err(outcome.problems());
        }
        let grade = Grade::from_score(outcome.score.percentage);
        let feedback = self.templates.quiz_feedback(grade, &outcome.score);
        Ok(GradeReport {
            grade,
            feedback,
            detail: GradeDetail::Quiz(outcome),
        })
    }

    /// Grade a free-text answer. `task_type` picks the sample solution.
    pub fn grade_free_text(&self, text: &str, task_type: TaskType) -> GradeReport {
        let evaluation = self.evaluator.evaluate(text);
        let grade = evaluation.grade();
        let feedback = self.templates.free_text_feedback(&evaluation, task_type);
        GradeReport {
            grade,
            feedback,
            detail: GradeDetail::FreeText(evaluation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Answer;

    fn two_choice(correct: usize, answer: usize) -> Question {
        Question::multiple_choice("q", "p", vec!["a".into(), "b".into()], correct)
            .answered(Answer::Choice(answer))
            .unwrap()
    }

    #[test]
    fn quiz_grade_uses_shared_bands() {
        let grader = Grader::default();
        let report = grader
            .grade_quiz(&[two_choice(0, 0), two_choice(1, 0)])
            .unwrap();
        assert_eq!(report.grade, Grade::Mangelhaft);
        assert!(report.feedback.contains("1 von 2"));
        assert!(!report.feedback.contains("Musterlösung"));
    }

    #[test]
    fn quiz_with_malformed_question_is_refused() {
        let broken = Question::multiple_choice("bad", "p", vec!["a".into(), "b".into()], 2)
            .answered(Answer::Choice(0))
            .unwrap();
        let problems = Grader::default()
            .grade_quiz(&[two_choice(0, 0), broken])
            .unwrap_err();
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].question_id(), "bad");
    }

    #[test]
    fn custom_templates_flow_through() {
        let mut config = GraderConfig::default();
        config.feedback.short_answer = "too short".into();
        config.min_answer_chars = 3;
        let grader = Grader::new(config);
        assert_eq!(grader.grade_free_text("ab", TaskType::Reading).feedback, "too short");
        let report = grader.grade_free_text("abc", TaskType::Reading);
        assert!(matches!(report.detail, GradeDetail::FreeText(Evaluation::Scored { .. })));
    }
}
