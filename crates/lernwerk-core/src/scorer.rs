//! Exact-match quiz scoring.
//!
//! Text answers are compared case-insensitively after trimming. There is no
//! partial credit and no normalization beyond case folding.

use serde::{Deserialize, Serialize};

use crate::error::DataShapeError;
use crate::model::{Question, QuestionKind};

/// Outcome for a single question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
    /// The question's authored data is malformed; it is left out of the tally.
    Unscoreable(DataShapeError),
}

/// Per-question verdict, in quiz order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionVerdict {
    pub question_id: String,
    pub verdict: Verdict,
}

/// Aggregate quiz result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizScore {
    pub correct_count: u32,
    /// Number of scoreable questions.
    pub total: u32,
    /// `100 * correct_count / total`, unrounded. Zero when `total` is zero.
    pub percentage: f64,
}

/// The full scoring pass: aggregate plus verdicts.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizOutcome {
    pub score: QuizScore,
    pub verdicts: Vec<QuestionVerdict>,
}

impl QuizOutcome {
    /// Shape problems found while scoring.
    pub fn problems(&self) -> Vec<DataShapeError> {
        self.verdicts
            .iter()
            .filter_map(|v| match &v.verdict {
                Verdict::Unscoreable(e) => Some(e.clone()),
                _ => None,
            })
            .collect()
    }

    /// Whether every question could be scored.
    pub fn is_complete(&self) -> bool {
        self.verdicts
            .iter()
            .all(|v| !matches!(v.verdict, Verdict::Unscoreable(_)))
    }
}

/// Check that a question's authored data fits its answer type.
pub fn check_shape(question: &Question) -> Result<(), DataShapeError> {
    match &question.kind {
        QuestionKind::MultipleChoice {
            options,
            correct_option,
            ..
        } => {
            if options.len() < 2 {
                return Err(DataShapeError::TooFewOptions {
                    question_id: question.id.clone(),
                    count: options.len(),
                });
            }
            let Some(index) = *correct_option else {
                return Err(DataShapeError::MissingField {
                    question_id: question.id.clone(),
                    field: "correctOption",
                });
            };
            if index >= options.len() {
                return Err(DataShapeError::CorrectOptionOutOfRange {
                    question_id: question.id.clone(),
                    index,
                    len: options.len(),
                });
            }
            Ok(())
        }
        QuestionKind::Text { correct_answer, .. } => {
            if correct_answer.trim().is_empty() {
                return Err(DataShapeError::EmptyExpectedAnswer {
                    question_id: question.id.clone(),
                });
            }
            Ok(())
        }
        QuestionKind::TrueFalse { correct_answer, .. } => {
            if correct_answer.is_none() {
                return Err(DataShapeError::MissingField {
                    question_id: question.id.clone(),
                    field: "correctAnswer",
                });
            }
            Ok(())
        }
    }
}

/// Whether the learner's answer matches. Unanswered questions are incorrect.
pub fn is_correct(question: &Question) -> Result<bool, DataShapeError> {
    check_shape(question)?;
    let correct = match &question.kind {
        QuestionKind::MultipleChoice {
            correct_option,
            user_answer,
            ..
        } => user_answer.is_some() && user_answer == correct_option,
        QuestionKind::Text {
            correct_answer,
            user_answer,
        } => user_answer.as_deref().is_some_and(|answer| {
            answer.trim().to_lowercase() == correct_answer.trim().to_lowercase()
        }),
        QuestionKind::TrueFalse {
            correct_answer,
            user_answer,
        } => user_answer.is_some() && user_answer == correct_answer,
    };
    Ok(correct)
}

/// Score a quiz. Unscoreable questions are logged and excluded from both
/// the correct count and the total.
pub fn score(questions: &[Question]) -> QuizOutcome {
    let mut correct_count = 0u32;
    let mut total = 0u32;
    let mut verdicts = Vec::with_capacity(questions.len());

    for question in questions {
        let verdict = match is_correct(question) {
            Ok(true) => {
                correct_count += 1;
                total += 1;
                Verdict::Correct
            }
            Ok(false) => {
                total += 1;
                Verdict::Incorrect
            }
            Err(e) => {
                tracing::warn!("excluding question from score: {e}");
                Verdict::Unscoreable(e)
            }
        };
        verdicts.push(QuestionVerdict {
            question_id: question.id.clone(),
            verdict,
        });
    }

    let percentage = if total == 0 {
        0.0
    } else {
        100.0 * correct_count as f64 / total as f64
    };

    QuizOutcome {
        score: QuizScore {
            correct_count,
            total,
            percentage,
        },
        verdicts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Answer, TruthValue};

    fn mc(id: &str, correct: usize, answer: usize) -> Question {
        Question::multiple_choice(id, "p", vec!["a".into(), "b".into(), "c".into()], correct)
            .answered(Answer::Choice(answer))
            .unwrap()
    }

    #[test]
    fn multiple_choice_is_exact_index_match() {
        assert!(is_correct(&mc("q", 1, 1)).unwrap());
        assert!(!is_correct(&mc("q", 1, 2)).unwrap());
        assert!(!is_correct(&mc("q", 0, 0).answered(Answer::Choice(7)).unwrap()).unwrap());
    }

    #[test]
    fn text_ignores_case_and_surrounding_whitespace() {
        let q = Question::text("q", "p", " Ownership ");
        let with = |text: &str| q.clone().answered(Answer::Text(text.into())).unwrap();
        assert!(is_correct(&with("ownership")).unwrap());
        assert!(is_correct(&with("  OWNERSHIP\n")).unwrap());
        assert!(!is_correct(&with("owner ship")).unwrap());
        assert!(!is_correct(&q).unwrap());
    }

    #[test]
    fn true_false_is_string_identity() {
        let q = Question::true_false("q", "p", TruthValue::False);
        let wrong = q.clone().answered(Answer::Text("true".into())).unwrap();
        assert!(!is_correct(&wrong).unwrap());
        let right = q.answered(Answer::Text("false".into())).unwrap();
        assert!(is_correct(&right).unwrap());
    }

    #[test]
    fn score_computes_unrounded_percentage() {
        let questions = vec![mc("a", 0, 0), mc("b", 1, 2), mc("c", 2, 2)];
        let outcome = score(&questions);
        assert_eq!(outcome.score.correct_count, 2);
        assert_eq!(outcome.score.total, 3);
        assert!((outcome.score.percentage - 200.0 / 3.0).abs() < 1e-9);
        assert!(outcome.is_complete());
    }

    #[test]
    fn malformed_question_is_excluded_not_fatal() {
        let broken = Question::multiple_choice("broken", "p", vec!["only".into()], 0)
            .answered(Answer::Choice(0))
            .unwrap();
        let out_of_range = Question::multiple_choice("oob", "p", vec!["a".into(), "b".into()], 5)
            .answered(Answer::Choice(1))
            .unwrap();
        let outcome = score(&[mc("ok", 0, 0), broken, out_of_range]);
        assert_eq!(outcome.score.correct_count, 1);
        assert_eq!(outcome.score.total, 1);
        assert_eq!(outcome.score.percentage, 100.0);
        assert!(!outcome.is_complete());
        let problems = outcome.problems();
        let ids: Vec<&str> = problems.iter().map(|p| p.question_id()).collect();
        assert_eq!(ids, vec!["broken", "oob"]);
    }

    #[test]
    fn missing_authored_fields_are_shape_errors() {
        let json = r#"[
            {"id": "no-options", "prompt": "p", "answerType": "multiple-choice", "correctOption": 0, "userAnswer": 0},
            {"id": "no-index", "prompt": "p", "answerType": "multiple-choice", "options": ["a", "b"], "userAnswer": 0},
            {"id": "no-truth", "prompt": "p", "answerType": "true-false", "userAnswer": "true"}
        ]"#;
        let questions: Vec<Question> = serde_json::from_str(json).unwrap();
        let outcome = score(&questions);
        assert_eq!(outcome.score.total, 0);
        assert_eq!(
            outcome.problems(),
            vec![
                DataShapeError::TooFewOptions {
                    question_id: "no-options".into(),
                    count: 0,
                },
                DataShapeError::MissingField {
                    question_id: "no-index".into(),
                    field: "correctOption",
                },
                DataShapeError::MissingField {
                    question_id: "no-truth".into(),
                    field: "correctAnswer",
                },
            ]
        );
    }

    #[test]
    fn empty_quiz_scores_zero() {
        let outcome = score(&[]);
        assert_eq!(outcome.score.total, 0);
        assert_eq!(outcome.score.percentage, 0.0);
    }

    #[test]
    fn verdicts_are_deterministic() {
        let questions = vec![
            mc("a", 0, 1),
            Question::text("b", "p", "x")
                .answered(Answer::Text("X".into()))
                .unwrap(),
        ];
        assert_eq!(score(&questions), score(&questions));
    }
}
