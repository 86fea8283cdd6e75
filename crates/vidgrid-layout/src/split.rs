//! Proportional split state for the two grid axes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{DEFAULT_SPLIT_PERCENT, MAX_SPLIT_PERCENT, MIN_SPLIT_PERCENT, SplitAxis};

/// Clamp window and reset value for split percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitBounds {
    min: f64,
    max: f64,
    reset: f64,
}

impl SplitBounds {
    /// Validate a clamp window. Requires `0 <= min < max <= 100` and
    /// `min <= reset <= max`.
    pub fn new(min: f64, max: f64, reset: f64) -> Result<Self, SplitBoundsError> {
        if !(min.is_finite() && max.is_finite() && reset.is_finite()) {
            return Err(SplitBoundsError::NonFinite);
        }
        if min < 0.0 || max > 100.0 || min >= max {
            return Err(SplitBoundsError::InvalidRange { min, max });
        }
        if reset < min || reset > max {
            return Err(SplitBoundsError::ResetOutOfRange { reset, min, max });
        }
        Ok(Self { min, max, reset })
    }

    #[must_use]
    pub const fn min(self) -> f64 {
        self.min
    }

    #[must_use]
    pub const fn max(self) -> f64 {
        self.max
    }

    #[must_use]
    pub const fn reset(self) -> f64 {
        self.reset
    }

    /// Clamp a raw percentage into `[min, max]`. NaN lands on `max`.
    #[must_use]
    pub fn clamp(self, percent: f64) -> f64 {
        percent.min(self.max).max(self.min)
    }
}

impl Default for SplitBounds {
    fn default() -> Self {
        Self {
            min: MIN_SPLIT_PERCENT,
            max: MAX_SPLIT_PERCENT,
            reset: DEFAULT_SPLIT_PERCENT,
        }
    }
}

/// Invalid [`SplitBounds`] parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplitBoundsError {
    NonFinite,
    InvalidRange { min: f64, max: f64 },
    ResetOutOfRange { reset: f64, min: f64, max: f64 },
}

impl fmt::Display for SplitBoundsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite => f.write_str("split bounds must be finite"),
            Self::InvalidRange { min, max } => {
                write!(f, "split bounds need 0 <= min < max <= 100 (got {min}..{max})")
            }
            Self::ResetOutOfRange { reset, min, max } => {
                write!(f, "reset split {reset} is outside {min}..{max}")
            }
        }
    }
}

impl std::error::Error for SplitBoundsError {}

/// Size of the first column and first row, in percent of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitState {
    column_split: f64,
    row_split: f64,
}

impl SplitState {
    /// Both axes at the reset value of `bounds`.
    #[must_use]
    pub const fn centered(bounds: SplitBounds) -> Self {
        Self {
            column_split: bounds.reset,
            row_split: bounds.reset,
        }
    }

    #[must_use]
    pub const fn column_split(&self) -> f64 {
        self.column_split
    }

    #[must_use]
    pub const fn row_split(&self) -> f64 {
        self.row_split
    }

    #[must_use]
    pub const fn get(&self, axis: SplitAxis) -> f64 {
        match axis {
            SplitAxis::Horizontal => self.column_split,
            SplitAxis::Vertical => self.row_split,
        }
    }

    /// Store a percentage for one axis, clamped to `bounds`. Returns the
    /// stored value.
    pub fn set(&mut self, axis: SplitAxis, percent: f64, bounds: SplitBounds) -> f64 {
        let clamped = bounds.clamp(percent);
        match axis {
            SplitAxis::Horizontal => self.column_split = clamped,
            SplitAxis::Vertical => self.row_split = clamped,
        }
        clamped
    }

    /// Reset both axes, including ones the active layout does not use.
    pub fn reset(&mut self, bounds: SplitBounds) {
        *self = Self::centered(bounds);
    }
}

impl Default for SplitState {
    fn default() -> Self {
        Self::centered(SplitBounds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::{SplitBounds, SplitBoundsError, SplitState};
    use crate::geometry::SplitAxis;

    #[test]
    fn default_bounds_are_ten_to_ninety() {
        let bounds = SplitBounds::default();
        assert_eq!(bounds.min(), 10.0);
        assert_eq!(bounds.max(), 90.0);
        assert_eq!(bounds.reset(), 50.0);
    }

    #[test]
    fn bounds_validation_rejects_bad_windows() {
        assert_eq!(
            SplitBounds::new(f64::NAN, 90.0, 50.0),
            Err(SplitBoundsError::NonFinite)
        );
        assert_eq!(
            SplitBounds::new(60.0, 40.0, 50.0),
            Err(SplitBoundsError::InvalidRange {
                min: 60.0,
                max: 40.0
            })
        );
        assert!(SplitBounds::new(-1.0, 90.0, 50.0).is_err());
        assert!(SplitBounds::new(10.0, 101.0, 50.0).is_err());
        assert_eq!(
            SplitBounds::new(10.0, 40.0, 50.0),
            Err(SplitBoundsError::ResetOutOfRange {
                reset: 50.0,
                min: 10.0,
                max: 40.0
            })
        );
        assert!(SplitBounds::new(20.0, 80.0, 30.0).is_ok());
    }

    #[test]
    fn set_clamps_per_axis() {
        let bounds = SplitBounds::default();
        let mut split = SplitState::default();
        assert_eq!(split.set(SplitAxis::Horizontal, 3.0, bounds), 10.0);
        assert_eq!(split.set(SplitAxis::Vertical, 97.5, bounds), 90.0);
        assert_eq!(split.column_split(), 10.0);
        assert_eq!(split.row_split(), 90.0);

        split.reset(bounds);
        assert_eq!(split, SplitState::default());
    }
}
