#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DigitError {
    #[error("Digit must be in 0..=9, got {0}")]
    OutOfRange(u8),
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FactorError {
    #[error("Factor must be in 1..=9, got {0}")]
    OutOfRange(u8),
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SegmentError {
    #[error("Segment endpoints must differ, got ({0}, {0})")]
    SelfLoop(u8),

    #[error(transparent)]
    Digit(#[from] DigitError),
}

/// User-correctable problems surfaced when grading a drawing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GradeError {
    #[error("draw something first")]
    NothingDrawn,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RasterError {
    #[error("raster {width}x{height} is too large")]
    TooLarge { width: usize, height: usize },

    #[error("raster {width}x{height} needs {expected} bytes, got {len}")]
    SizeMismatch { width: usize, height: usize, expected: usize, len: usize },
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LogLevelError {
    #[error("invalid log level: {0}")]
    Unknown(String),
}
