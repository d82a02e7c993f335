//! Non-fatal diagnostics.
//!
//! Some operations have a harmless fallback instead of a failure path:
//! popping an empty array yields `None`, normalising an empty array yields
//! an empty result. Those conditions are described by [`StrideWarning`] and
//! reported through `tracing`; they never surface as an `Err`.

use std::fmt;

/// A recoverable condition reported by an array operation.
#[derive(Clone, Debug, PartialEq)]
pub enum StrideWarning {
    /// `pop`, `shift` or `normalise` was called on an empty collection.
    EmptyCollection {
        /// Name of the operation that found nothing to do.
        operation: &'static str,
    },
    /// A rolling window was asked for more observations than it can hold.
    MinObservationsClamped {
        /// The requested minimum.
        requested: usize,
        /// The window size it was clamped to.
        window: usize,
    },
    /// `normalise` saw a constant input (`max == min`); every output is `0.0`.
    DegenerateRange {
        /// The single value every numeric element shares.
        value: f64,
    },
}

impl fmt::Display for StrideWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCollection { operation } => {
                write!(f, "{operation} called on an empty collection")
            }
            Self::MinObservationsClamped { requested, window } => {
                write!(
                    f,
                    "min_observations {requested} exceeds window {window}; clamped to {window}"
                )
            }
            Self::DegenerateRange { value } => {
                write!(f, "normalise over constant input {value}; emitting zeros")
            }
        }
    }
}

/// Emit `warning` as a `tracing` event and hand it back to the caller.
pub fn report(warning: StrideWarning) -> StrideWarning {
    tracing::warn!(target: "stride", %warning, "non-fatal packed array condition");
    warning
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_returns_the_warning() {
        let w = report(StrideWarning::EmptyCollection { operation: "pop" });
        assert_eq!(w, StrideWarning::EmptyCollection { operation: "pop" });
    }

    #[test]
    fn clamped_message_names_both_sizes() {
        let w = StrideWarning::MinObservationsClamped {
            requested: 9,
            window: 3,
        };
        assert_eq!(
            w.to_string(),
            "min_observations 9 exceeds window 3; clamped to 3"
        );
    }
}
