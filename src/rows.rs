use log::{debug, warn};
use logging_timer::time;

use crate::{
    grade::GradingError,
    options::GradingOptions,
    types::{MarkCandidate, QuestionGroup, ALTERNATIVES},
};

/// Orders mark candidates into questions.
///
/// Candidates are sorted top to bottom and cut into consecutive runs of
/// [`ALTERNATIVES`]; each run is then sorted left to right. Both sorts are
/// stable, so candidates that line up keep their detection order. A trailing
/// run with fewer than [`ALTERNATIVES`] candidates is dropped.
///
/// Question numbering comes purely from position. A stray candidate shifts
/// every following question unless `strict_row_count` is set, in which case a
/// count that is not a multiple of [`ALTERNATIVES`] is rejected.
#[time]
pub fn group_rows(
    candidates: &[MarkCandidate],
    options: &GradingOptions,
) -> Result<Vec<QuestionGroup>, GradingError> {
    if candidates.len() < ALTERNATIVES {
        return Err(GradingError::RowOrderingFailed {
            candidates: candidates.len(),
        });
    }

    let remainder = candidates.len() % ALTERNATIVES;
    if remainder != 0 {
        if options.strict_row_count {
            return Err(GradingError::MalformedRowCount {
                candidates: candidates.len(),
                alternatives: ALTERNATIVES,
            });
        }
        warn!(
            "{} mark candidates is not a multiple of {}; question rows may be misaligned",
            candidates.len(),
            ALTERNATIVES
        );
    }

    let mut sorted = candidates.to_vec();
    sorted.sort_by_key(|candidate| candidate.bounds.top());

    let groups = sorted
        .chunks_exact(ALTERNATIVES)
        .map(|chunk| {
            let mut row = chunk.to_vec();
            row.sort_by_key(|candidate| candidate.bounds.left());
            let marks: [MarkCandidate; ALTERNATIVES] =
                row.try_into().map_err(|row: Vec<MarkCandidate>| {
                    GradingError::RowOrderingFailed {
                        candidates: row.len(),
                    }
                })?;
            Ok(QuestionGroup { options: marks })
        })
        .collect::<Result<Vec<QuestionGroup>, GradingError>>()?;

    debug!("grouped {} candidates into {} questions", candidates.len(), groups.len());
    Ok(groups)
}
