//! Grade bands shared by the quiz and free-text paths.
//!
//! A single threshold table maps a 0–100 score onto six ordinal labels.
//! Both grading paths go through [`Grade::from_score`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// The six ordinal grades, declared lowest first so `Ord` follows quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "Ungenügend")]
    Ungenuegend,
    #[serde(rename = "Mangelhaft")]
    Mangelhaft,
    #[serde(rename = "Ausreichend")]
    Ausreichend,
    #[serde(rename = "Befriedigend")]
    Befriedigend,
    #[serde(rename = "Gut")]
    Gut,
    #[serde(rename = "Sehr gut")]
    SehrGut,
}

/// Inclusive lower bounds, highest band first. Anything below the last
/// bound is [`Grade::Ungenuegend`].
pub const BANDS: [(f64, Grade); 5] = [
    (90.0, Grade::SehrGut),
    (80.0, Grade::Gut),
    (70.0, Grade::Befriedigend),
    (60.0, Grade::Ausreichend),
    (50.0, Grade::Mangelhaft),
];

impl Grade {
    /// All grades, best first.
    pub const ALL: [Grade; 6] = [
        Grade::SehrGut,
        Grade::Gut,
        Grade::Befriedigend,
        Grade::Ausreichend,
        Grade::Mangelhaft,
        Grade::Ungenuegend,
    ];

    /// Map a 0–100 score onto its band. NaN falls into the lowest band.
    pub fn from_score(score: f64) -> Grade {
        BANDS
            .iter()
            .find(|(lower, _)| score >= *lower)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::Ungenuegend)
    }

    /// The display label.
    pub fn label(&self) -> &'static str {
        match self {
            Grade::SehrGut => "Sehr gut",
            Grade::Gut => "Gut",
            Grade::Befriedigend => "Befriedigend",
            Grade::Ausreichend => "Ausreichend",
            Grade::Mangelhaft => "Mangelhaft",
            Grade::Ungenuegend => "Ungenügend",
        }
    }

    /// The two lowest bands, which get a sample solution on the free-text path.
    pub fn is_failing(&self) -> bool {
        matches!(self, Grade::Mangelhaft | Grade::Ungenuegend)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
