use image::{GrayImage, Rgb, RgbImage};
use imageproc::{drawing::draw_filled_rect_mut, rect::Rect};
use log::{debug, info};
use logging_timer::time;
use serde::Serialize;

use crate::{
    answer_key::AnswerKey,
    image_utils::{GREEN, RED},
    marks::read_group,
    options::GradingOptions,
    types::{MarkCandidate, QuestionGroup, ALTERNATIVES},
};

/// How one question was answered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOutcome {
    pub question: usize,
    pub selected: usize,
    pub answer: usize,
    pub fill_counts: [u32; ALTERNATIVES],
    pub points_awarded: f64,
    pub correct: bool,
}

/// Score and annotated sheet for one graded photo.
#[derive(Debug, Clone)]
pub struct GradingResult {
    pub score: f64,
    pub annotated_image: RgbImage,
    pub questions: Vec<QuestionOutcome>,
}

impl GradingResult {
    /// The score rounded to the nearest integer, halves away from zero.
    pub fn rounded_score(&self) -> i64 {
        self.score.round() as i64
    }

    /// Whether the sheet earned every point the key offers.
    pub fn is_perfect(&self, key: &AnswerKey) -> bool {
        self.rounded_score() == key.max_score().round() as i64
    }
}

/// Traces a candidate's outline with squares `thickness` pixels wide.
pub fn draw_mark_outline_mut(
    canvas: &mut RgbImage,
    candidate: &MarkCandidate,
    color: Rgb<u8>,
    thickness: u32,
) {
    if thickness == 0 {
        return;
    }
    let offset = (thickness / 2) as i32;
    for point in &candidate.contour {
        draw_filled_rect_mut(
            canvas,
            Rect::at(point.x - offset, point.y - offset).of_size(thickness, thickness),
            color,
        );
    }
}

/// Grades each question in order against `key`.
///
/// Question `q` is graded with the `q`-th group. Grading stops at the first
/// question missing from the key or when the groups run out. The overlay
/// always outlines the correct option: green when it was the one chosen, red
/// otherwise.
#[time]
pub fn score_groups(
    groups: &[QuestionGroup],
    binary: &GrayImage,
    display: &RgbImage,
    key: &AnswerKey,
    options: &GradingOptions,
) -> GradingResult {
    let mut annotated_image = display.clone();
    let mut questions = Vec::with_capacity(groups.len().min(key.len()));
    let mut score = 0.0;

    for (question, group) in groups.iter().enumerate() {
        let entry = match key.get(question) {
            Some(entry) => entry,
            None => {
                debug!("no key entry for question {}, stopping", question);
                break;
            }
        };

        let reading = read_group(group, binary);
        let correct = reading.selected == entry.answer;
        let points_awarded = if correct { entry.points } else { 0.0 };
        score += points_awarded;

        if let Some(answer) = group.option(entry.answer) {
            draw_mark_outline_mut(
                &mut annotated_image,
                answer,
                if correct { GREEN } else { RED },
                options.overlay_thickness,
            );
        }

        debug!(
            "question {}: selected {} ({:?}), answer {}",
            question, reading.selected, reading.fill_counts, entry.answer
        );

        questions.push(QuestionOutcome {
            question,
            selected: reading.selected,
            answer: entry.answer,
            fill_counts: reading.fill_counts,
            points_awarded,
            correct,
        });
    }

    info!("graded {} questions, score {}", questions.len(), score);

    GradingResult {
        score,
        annotated_image,
        questions,
    }
}
