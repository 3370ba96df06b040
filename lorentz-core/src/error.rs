use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or configuring a simulation.
///
/// Integration itself never fails: a non-finite state stalls the run instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Scenario value outside its allowed range.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Flat field input did not hold `[Ex, Ey, Ez, Bx, By, Bz]`.
    #[error("expected 6 field components [Ex, Ey, Ez, Bx, By, Bz], got {0}")]
    FieldLength(usize),

    /// Scenario file could not be parsed.
    #[error("scenario parse error: {0}")]
    Scenario(#[from] serde_yaml::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
