//! Heuristic free-text evaluation.
//!
//! Scores prose on three crude signals (length, sentence length and
//! vocabulary diversity) using fixed breakpoint tables. This measures
//! effort, not semantic correctness.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::bander::Grade;

/// One breakpoint: values in `[min, max]` earn `points`. `max = None` is open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub min: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub points: u32,
}

impl Tier {
    pub const fn at_least(min: f64, points: u32) -> Self {
        Self {
            min,
            max: None,
            points,
        }
    }

    pub const fn between(min: f64, max: f64, points: u32) -> Self {
        Self {
            min,
            max: Some(max),
            points,
        }
    }

    fn contains(&self, value: f64) -> bool {
        value >= self.min && self.max.map_or(true, |max| value <= max)
    }
}

/// Points for `value` from the first matching tier, or 0.
pub fn tier_points(tiers: &[Tier], value: f64) -> u32 {
    tiers
        .iter()
        .find(|t| t.contains(value))
        .map(|t| t.points)
        .unwrap_or(0)
}

/// The three breakpoint tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct HeuristicTables {
    /// Word count, up to 30 points.
    pub word_count: Vec<Tier>,
    /// Average words per sentence, up to 30 points.
    pub sentence_length: Vec<Tier>,
    /// Distinct words over total words, up to 40 points.
    pub vocabulary: Vec<Tier>,
}

pub const MAX_WORD_COUNT_POINTS: u32 = 30;
pub const MAX_SENTENCE_LENGTH_POINTS: u32 = 30;
pub const MAX_VOCABULARY_POINTS: u32 = 40;

impl Default for HeuristicTables {
    fn default() -> Self {
        Self {
            word_count: vec![
                Tier::at_least(200.0, 30),
                Tier::at_least(100.0, 25),
                Tier::at_least(50.0, 20),
                Tier::at_least(20.0, 10),
                Tier::at_least(0.0, 5),
            ],
            sentence_length: vec![
                Tier::between(10.0, 20.0, 30),
                Tier::between(8.0, 25.0, 25),
                Tier::between(6.0, 30.0, 20),
                Tier::between(4.0, 35.0, 10),
                Tier::at_least(0.0, 5),
            ],
            vocabulary: vec![
                Tier::at_least(0.7, 40),
                Tier::at_least(0.6, 35),
                Tier::at_least(0.5, 30),
                Tier::at_least(0.4, 20),
                Tier::at_least(0.3, 10),
                Tier::at_least(0.0, 5),
            ],
        }
    }
}

impl HeuristicTables {
    /// Check that no table can award more than its signal's maximum.
    pub fn validate(&self) -> Result<(), String> {
        let checks = [
            ("word-count", &self.word_count, MAX_WORD_COUNT_POINTS),
            ("sentence-length", &self.sentence_length, MAX_SENTENCE_LENGTH_POINTS),
            ("vocabulary", &self.vocabulary, MAX_VOCABULARY_POINTS),
        ];
        for (name, tiers, max) in checks {
            if let Some(t) = tiers.iter().find(|t| t.points > max) {
                return Err(format!(
                    "{name} tier at {} awards {} points, maximum is {max}",
                    t.min, t.points
                ));
            }
            if let Some(t) = tiers.iter().find(|t| t.max.is_some_and(|m| m < t.min)) {
                return Err(format!("{name} tier at {} has max below min", t.min));
            }
        }
        Ok(())
    }
}

/// Raw signals measured from a text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMetrics {
    pub word_count: usize,
    pub sentence_count: usize,
    pub average_sentence_length: f64,
    pub unique_words_ratio: f64,
}

/// Measure `text`. Sentences are non-empty segments between `.`, `!` and
/// `?`, with a floor of one.
pub fn measure(text: &str) -> TextMetrics {
    let words: Vec<&str> = text.split_whitespace().collect();
    let word_count = words.len();

    let sentence_count = text
        .split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .count()
        .max(1);

    let distinct: HashSet<String> = words.iter().map(|w| w.to_lowercase()).collect();
    let unique_words_ratio = if word_count == 0 {
        0.0
    } else {
        distinct.len() as f64 / word_count as f64
    };

    TextMetrics {
        word_count,
        sentence_count,
        average_sentence_length: word_count as f64 / sentence_count as f64,
        unique_words_ratio,
    }
}

/// Points per signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Points {
    pub word_count: u32,
    pub sentence_length: u32,
    pub vocabulary: u32,
}

impl Points {
    /// Composite 0–100 score.
    pub fn total(&self) -> u32 {
        self.word_count + self.sentence_length + self.vocabulary
    }
}

/// Result of evaluating one free-text answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    /// Shorter than the minimum; rejected before any scoring.
    TooShort { length: usize },
    Scored { metrics: TextMetrics, points: Points },
}

impl Evaluation {
    /// The composite score fed to the bander.
    pub fn score(&self) -> u32 {
        match self {
            Evaluation::TooShort { .. } => 0,
            Evaluation::Scored { points, .. } => points.total(),
        }
    }

    pub fn grade(&self) -> Grade {
        match self {
            Evaluation::TooShort { .. } => Grade::Ungenuegend,
            Evaluation::Scored { points, .. } => Grade::from_score(points.total() as f64),
        }
    }
}

/// Free-text evaluator with its configured thresholds.
#[derive(Debug, Clone)]
pub struct TextEvaluator {
    min_answer_chars: usize,
    tables: HeuristicTables,
}

impl Default for TextEvaluator {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MIN_ANSWER_CHARS, HeuristicTables::default())
    }
}

impl TextEvaluator {
    pub fn new(min_answer_chars: usize, tables: HeuristicTables) -> Self {
        Self {
            min_answer_chars,
            tables,
        }
    }

    /// Evaluate `text`. Length is counted in characters after trimming.
    pub fn evaluate(&self, text: &str) -> Evaluation {
        let length = text.trim().chars().count();
        if length < self.min_answer_chars {
            tracing::debug!(length, "free-text answer below minimum length");
            return Evaluation::TooShort { length };
        }

        let metrics = measure(text);
        let points = Points {
            word_count: tier_points(&self.tables.word_count, metrics.word_count as f64),
            sentence_length: tier_points(
                &self.tables.sentence_length,
                metrics.average_sentence_length,
            ),
            vocabulary: tier_points(&self.tables.vocabulary, metrics.unique_words_ratio),
        };
        tracing::debug!(?metrics, ?points, "free-text answer scored");
        Evaluation::Scored { metrics, points }
    }
}
