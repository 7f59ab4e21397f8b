use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalculusError {
    #[error("step size must be positive and finite, got {0}")]
    NonPositiveStep(f64),

    #[error("tolerance must be positive and finite, got {0}")]
    NonPositiveTolerance(f64),

    #[error("period must be positive and finite, got {0}")]
    NonPositivePeriod(f64),

    #[error("bound must be finite, got {0}")]
    NonFiniteBound(f64),

    #[error("subdivision count must be at least 1")]
    ZeroSubdivisions,

    #[error("truncation order must be at least 1")]
    ZeroTruncationOrder,

    #[error("variable index {index} out of range for a point of dimension {dimension}")]
    IndexOutOfDimension { index: usize, dimension: usize },

    #[error("expected a point of dimension {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("average value is undefined over the degenerate interval [{at}, {at}]")]
    DegenerateInterval { at: f64 },

    #[error("every sample approaching {at} failed to evaluate")]
    EverySampleFailed { at: f64 },

    #[error("limit does not exist: left estimate {left} and right estimate {right} disagree")]
    LimitDoesNotExist { left: f64, right: f64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    JsonParse(#[from] serde_json::Error),
}
