use crate::intervals::{BoundsKind, Timestamp};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid interval bounds [{from}, {until}]")]
    InvalidBounds { from: Timestamp, until: Timestamp },

    #[error(
        "cannot compare a {left} interval with a {right} interval, \
         both must use the same bounds convention"
    )]
    IncompatibleIntervalKinds { left: BoundsKind, right: BoundsKind },

    #[error("unsupported step size {step}, only ranges with a step of 1 are periods")]
    UnsupportedStepSize { step: i64 },

    #[error("empty range has no interval")]
    EmptyRange,

    #[error("out of the supported calendar range: {0}")]
    OutOfRange(String),
}

pub type Result<T> = std::result::Result<T, Error>;
