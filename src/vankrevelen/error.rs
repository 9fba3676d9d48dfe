use thiserror::Error;

/// Failure kinds raised by the plot assembler and its collaborators.
///
/// Every validation variant is raised before the first drawing call, so a
/// failed render never leaves a partially drawn figure behind.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PlotError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("color series has {actual} elements but the ratio list has {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("density estimation failed: {0}")]
    DensityEstimation(String),

    #[error("render failed: {0}")]
    Render(String),
}
