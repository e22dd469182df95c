//! Task lifecycle and grading engine for lernwerk.
//!
//! This crate defines the task and quiz data model, the submission state
//! machine, the quiz scorer, the heuristic free-text evaluator, and the
//! grade banding that both grading paths share.

pub mod answer;
pub mod bander;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod feedback;
pub mod grader;
pub mod lifecycle;
pub mod model;
pub mod scorer;
pub mod store;
pub mod summary;
