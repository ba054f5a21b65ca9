use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the gas engine.
///
/// Construction and stepping validate their inputs up front and report through
/// this enum instead of panicking or letting NaNs leak into the particle state.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Initial velocity sampling produced no kinetic energy, so the velocities
    /// cannot be rescaled to a target temperature.
    #[error("initial velocities carry zero kinetic energy; cannot rescale to target temperature")]
    ZeroKineticEnergy,

    /// An array or query does not match the dimensionality it was used with.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// What the operation requires.
        expected: String,
        /// What it was given.
        found: String,
    },
}

impl Error {
    pub(crate) fn shape(expected: (usize, usize), found: (usize, usize)) -> Self {
        Error::DimensionMismatch {
            expected: format!("shape {expected:?}"),
            found: format!("shape {found:?}"),
        }
    }
}
