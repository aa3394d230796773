//! Grades photographed multiple-choice answer sheets.
//!
//! A photo goes through six stages: the sheet outline is located
//! ([`locate`]), warped face-on ([`rectify`]), binarized and searched for
//! bubbles ([`bubbles`]), the bubbles are ordered into question rows
//! ([`rows`]), the filled bubble of each row is read ([`marks`]) and the
//! answers are scored against an [`AnswerKey`] ([`score`]). [`grade`] runs
//! them all.

pub mod answer_key;
pub mod bubbles;
pub mod debug;
pub mod geometry;
pub mod grade;
pub mod image_utils;
pub mod locate;
pub mod marks;
pub mod options;
pub mod rectify;
pub mod rows;
pub mod score;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use answer_key::{AnswerKey, AnswerKeyError, KeyEntry};
pub use debug::ImageDebugWriter;
pub use grade::{grade, grade_with_debug, GradingError};
pub use options::GradingOptions;
pub use score::{GradingResult, QuestionOutcome};
pub use types::{option_letter, MarkCandidate, Quadrilateral, QuestionGroup, ALTERNATIVES};
