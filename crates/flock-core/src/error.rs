//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `FlockError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// The top-level error type for `flock-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum FlockError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{name} = {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange {
        name:  &'static str,
        value: f64,
        min:   f64,
        max:   f64,
    },

    #[error("{name} must be positive and finite, got {value}")]
    NotPositive {
        name:  &'static str,
        value: f64,
    },
}

/// Shorthand result type for all `flock-*` crates.
pub type FlockResult<T> = Result<T, FlockError>;

/// Check that `value` lies in `[min, max]`.
pub fn ensure_in_range(name: &'static str, value: f64, min: f64, max: f64) -> FlockResult<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(FlockError::OutOfRange { name, value, min, max })
    }
}

/// Check that `value` is finite and strictly greater than zero.
pub fn ensure_positive(name: &'static str, value: f64) -> FlockResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FlockError::NotPositive { name, value })
    }
}
