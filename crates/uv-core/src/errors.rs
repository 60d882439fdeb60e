//! Error types for uvol.
//!
//! Every fallible operation in the workspace returns the single
//! `thiserror`-derived [`Error`] enum. Input validation goes through the
//! [`ensure!`](crate::ensure) macro, which raises a configuration error, and
//! unrecoverable internal conditions go through [`fail!`](crate::fail).

use thiserror::Error;

/// The top-level error type used throughout uvol.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Invalid input: unknown contract kind, grid too coarse, inverted
    /// volatility bounds, misaligned reference spot, empty scan range.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A curve value was requested at a price that is not on the grid.
    #[error("no grid node at asset price {spot}")]
    Lookup {
        /// The requested asset price.
        spot: f64,
    },

    /// The explicit scheme diverged (non-finite or exploding values).
    #[error("numerical instability at time step {step}: {detail}")]
    NumericalInstability {
        /// Zero-based index of the time step that produced the bad values.
        step: usize,
        /// What the stability guard observed.
        detail: String,
    },

    /// General runtime error.
    #[error("{0}")]
    Runtime(String),
}

impl Error {
    /// `true` for errors caused by invalid caller input.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }
}

/// Shorthand `Result` type used throughout uvol.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Validate an input condition.
///
/// Returns `Err(Error::Configuration(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use uv_core::{ensure, errors::Error};
/// fn positive(x: f64) -> uv_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(matches!(positive(-1.0), Err(Error::Configuration(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Configuration(
                format!($($msg)*)
            ));
        }
    };
}

/// Return `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use uv_core::{fail, errors::Error};
/// fn always_err() -> uv_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checked_nas(nas: usize) -> Result<usize> {
        crate::ensure!(nas > 3, "NAS must be greater than 3, got {nas}");
        Ok(nas)
    }

    #[test]
    fn ensure_raises_configuration_error() {
        assert_eq!(checked_nas(100), Ok(100));
        let err = checked_nas(3).unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(
            err.to_string(),
            "configuration error: NAS must be greater than 3, got 3"
        );
    }

    #[test]
    fn lookup_and_instability_messages() {
        let e = Error::Lookup { spot: 101.5 };
        assert_eq!(e.to_string(), "no grid node at asset price 101.5");
        assert!(!e.is_configuration());

        let e = Error::NumericalInstability {
            step: 7,
            detail: "non-finite value at node 3".into(),
        };
        assert!(e.to_string().starts_with("numerical instability at time step 7"));
    }
}
