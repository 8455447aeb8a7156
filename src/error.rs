use thiserror::Error;

/// Structural violations that abort a pipeline run.
///
/// Data irregularities (missing observations, zero denominators) are policy
/// decisions handled inline and never surface here.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum PipelineError {
    #[error("empty rating log")]
    EmptyLog,
    #[error("rating log spans fewer than two distinct days")]
    TooFewDays,
}
