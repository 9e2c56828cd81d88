//! Per-indicator result values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an indicator has no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unavailable {
    /// The look-back window is not filled yet.
    InsufficientData { required: usize, available: usize },
    /// The formula divides by a quantity that is zero for this window.
    DivisionByZero,
    /// The input or the result is NaN or infinite.
    NonFinite,
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unavailable::InsufficientData { required, available } => {
                write!(f, "insufficient data ({available}/{required})")
            }
            Unavailable::DivisionByZero => f.write_str("division by zero"),
            Unavailable::NonFinite => f.write_str("non-finite value"),
        }
    }
}

/// The value of one indicator: either a number (or structured reading) or an
/// explicit marker saying why it could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorValue<T> {
    Available(T),
    Unavailable(Unavailable),
}

impl IndicatorValue<f64> {
    /// Wrap a raw float, mapping NaN and infinities to `NonFinite`.
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() {
            IndicatorValue::Available(value)
        } else {
            IndicatorValue::Unavailable(Unavailable::NonFinite)
        }
    }

    /// Format with a fixed number of decimals, or "n/a".
    pub fn format(&self, digits: usize) -> String {
        match self {
            IndicatorValue::Available(v) => format!("{:.*}", digits, v),
            IndicatorValue::Unavailable(_) => "n/a".to_string(),
        }
    }
}

impl<T> IndicatorValue<T> {
    /// Shorthand for an insufficient-data marker.
    pub fn insufficient(required: usize, available: usize) -> Self {
        IndicatorValue::Unavailable(Unavailable::InsufficientData {
            required,
            available,
        })
    }

    pub fn is_available(&self) -> bool {
        matches!(self, IndicatorValue::Available(_))
    }

    /// Borrow the value if available.
    pub fn value(&self) -> Option<&T> {
        match self {
            IndicatorValue::Available(v) => Some(v),
            IndicatorValue::Unavailable(_) => None,
        }
    }

    /// Consume into an `Option`, dropping the reason.
    pub fn into_option(self) -> Option<T> {
        match self {
            IndicatorValue::Available(v) => Some(v),
            IndicatorValue::Unavailable(_) => None,
        }
    }

    /// The reason the value is missing, if it is.
    pub fn reason(&self) -> Option<Unavailable> {
        match self {
            IndicatorValue::Available(_) => None,
            IndicatorValue::Unavailable(r) => Some(*r),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> IndicatorValue<U> {
        match self {
            IndicatorValue::Available(v) => IndicatorValue::Available(f(v)),
            IndicatorValue::Unavailable(r) => IndicatorValue::Unavailable(r),
        }
    }

    pub fn and_then<U, F: FnOnce(T) -> IndicatorValue<U>>(self, f: F) -> IndicatorValue<U> {
        match self {
            IndicatorValue::Available(v) => f(v),
            IndicatorValue::Unavailable(r) => IndicatorValue::Unavailable(r),
        }
    }

    /// Combine two values; the first missing reason wins.
    pub fn zip<U>(self, other: IndicatorValue<U>) -> IndicatorValue<(T, U)> {
        match (self, other) {
            (IndicatorValue::Available(a), IndicatorValue::Available(b)) => {
                IndicatorValue::Available((a, b))
            }
            (IndicatorValue::Unavailable(r), _) | (_, IndicatorValue::Unavailable(r)) => {
                IndicatorValue::Unavailable(r)
            }
        }
    }
}

impl<T: fmt::Display> fmt::Display for IndicatorValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorValue::Available(v) => v.fmt(f),
            IndicatorValue::Unavailable(_) => f.write_str("n/a"),
        }
    }
}
