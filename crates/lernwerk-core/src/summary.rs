//! Progress aggregation over a task collection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bander::Grade;
use crate::model::{Task, TaskStatus};
use crate::scorer;

/// Counts and averages for a set of tasks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub total: usize,
    pub pending: usize,
    pub submitted: usize,
    pub graded: usize,
    /// Graded tasks per grade.
    pub grades: BTreeMap<Grade, usize>,
    /// Mean percentage over graded quizzes, if there are any.
    pub average_quiz_percentage: Option<f64>,
}

impl ProgressSummary {
    /// Share of tasks that are graded, 0.0–1.0.
    pub fn completion_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.graded as f64 / self.total as f64
        }
    }
}

/// Summarize `tasks`, optionally restricted to one course.
pub fn summarize(tasks: &[Task], course: Option<&str>) -> ProgressSummary {
    let mut summary = ProgressSummary::default();
    let mut quiz_percentages = Vec::new();

    for task in tasks
        .iter()
        .filter(|t| course.map_or(true, |c| t.course == c))
    {
        summary.total += 1;
        match task.status {
            TaskStatus::Pending => summary.pending += 1,
            TaskStatus::Submitted => summary.submitted += 1,
            TaskStatus::Graded => summary.graded += 1,
        }

        if task.status != TaskStatus::Graded {
            continue;
        }
        if let Some(grade) = task.grade {
            *summary.grades.entry(grade).or_default() += 1;
        }
        if let Some(questions) = &task.questions {
            let outcome = scorer::score(questions);
            if outcome.score.total > 0 {
                quiz_percentages.push(outcome.score.percentage);
            }
        }
    }

    if !quiz_percentages.is_empty() {
        summary.average_quiz_percentage =
            Some(quiz_percentages.iter().sum::<f64>() / quiz_percentages.len() as f64);
    }

    summary
}
