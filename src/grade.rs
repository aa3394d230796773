use image::RgbImage;
use log::info;
use logging_timer::time;
use thiserror::Error;

use crate::{
    answer_key::AnswerKey,
    bubbles::detect_marks,
    debug::{draw_question_rows_debug_image_mut, ImageDebugWriter},
    locate::locate_document,
    options::GradingOptions,
    rectify::rectify_document,
    rows::group_rows,
    score::{score_groups, GradingResult},
};

/// Why a photo could not be graded. Every variant ends the grading call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradingError {
    #[error("no answer sheet found in the photo ({reason}); use a dark background and frame the whole sheet")]
    NoDocumentFound { reason: String },

    #[error("no answer bubbles found on the sheet")]
    NoMarksFound,

    #[error("unable to order {candidates} answer bubbles into question rows")]
    RowOrderingFailed { candidates: usize },

    #[error("found {candidates} answer bubbles, which is not a multiple of {alternatives} options per question")]
    MalformedRowCount {
        candidates: usize,
        alternatives: usize,
    },
}

/// Grades a photo of an answer sheet against `key`.
pub fn grade(
    photo: &RgbImage,
    key: &AnswerKey,
    options: &GradingOptions,
) -> Result<GradingResult, GradingError> {
    grade_with_debug(photo, key, options, &ImageDebugWriter::disabled())
}

/// Grades a photo of an answer sheet against `key`, writing intermediate
/// images through `debug`.
#[time]
pub fn grade_with_debug(
    photo: &RgbImage,
    key: &AnswerKey,
    options: &GradingOptions,
    debug: &ImageDebugWriter,
) -> Result<GradingResult, GradingError> {
    let gray = image::imageops::grayscale(photo);

    let quad = locate_document(photo, &gray, options, debug)?;
    let sheet = rectify_document(photo, &gray, &quad)?;
    let detection = detect_marks(&sheet, options, debug)?;
    let groups = group_rows(&detection.candidates, options)?;

    debug.write("rows", &sheet.color, |canvas| {
        draw_question_rows_debug_image_mut(canvas, &groups)
    });

    let result = score_groups(&groups, &detection.binary, &sheet.color, key, options);
    info!(
        "graded {} of {} questions: {} / {}",
        result.questions.len(),
        groups.len(),
        result.score,
        key.max_score()
    );
    Ok(result)
}
