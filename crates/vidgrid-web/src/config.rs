//! Runner configuration.
//!
//! Every field has a default, so a host may pass a partial JSON object (or
//! nothing at all) to the constructor.

use core::time::Duration;
use std::fmt;

use serde::{Deserialize, Serialize};
use vidgrid_layout::{
    DEFAULT_HEADER_HEIGHT_PX, DEFAULT_SPLIT_PERCENT, MAX_SPLIT_PERCENT, MIN_SPLIT_PERCENT,
    SplitBounds, SplitBoundsError,
};
use vidgrid_media::{DEFAULT_AUTOPLAY_DELAY, DeckConfig};

use crate::divider_pointer::DividerPointerConfig;

/// Tunables for one grid page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    pub min_split_percent: f64,
    pub max_split_percent: f64,
    /// Value both splits return to on layout change and reset.
    pub default_split_percent: f64,
    /// Height of the control bar above the grid.
    pub header_height_px: u16,
    pub autoplay_delay_ms: u32,
    pub start_muted: bool,
    pub pointer: DividerPointerConfig,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            min_split_percent: MIN_SPLIT_PERCENT,
            max_split_percent: MAX_SPLIT_PERCENT,
            default_split_percent: DEFAULT_SPLIT_PERCENT,
            header_height_px: DEFAULT_HEADER_HEIGHT_PX,
            autoplay_delay_ms: u32::try_from(DEFAULT_AUTOPLAY_DELAY.as_millis()).unwrap_or(100),
            start_muted: true,
            pointer: DividerPointerConfig::default(),
        }
    }
}

impl GridConfig {
    /// Parse and validate a JSON config object.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| ConfigError::Json(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the split window; returns the validated bounds.
    pub fn validate(&self) -> Result<SplitBounds, ConfigError> {
        Ok(SplitBounds::new(
            self.min_split_percent,
            self.max_split_percent,
            self.default_split_percent,
        )?)
    }

    #[must_use]
    pub fn deck_config(&self) -> DeckConfig {
        DeckConfig {
            autoplay_delay: Duration::from_millis(u64::from(self.autoplay_delay_ms)),
            start_muted: self.start_muted,
        }
    }
}

/// Rejected configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Json(String),
    Split(SplitBoundsError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "invalid config JSON: {msg}"),
            Self::Split(err) => write!(f, "invalid split config: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(_) => None,
            Self::Split(err) => Some(err),
        }
    }
}

impl From<SplitBoundsError> for ConfigError {
    fn from(err: SplitBoundsError) -> Self {
        Self::Split(err)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, GridConfig};
    use crate::divider_pointer::DividerPointerButton;
    use core::time::Duration;
    use pretty_assertions::assert_eq;
    use vidgrid_layout::SplitBoundsError;

    #[test]
    fn defaults_validate() {
        let config = GridConfig::default();
        let bounds = config.validate().expect("defaults are valid");
        assert_eq!(bounds.min(), 10.0);
        assert_eq!(bounds.max(), 90.0);
        assert_eq!(bounds.reset(), 50.0);
        assert_eq!(config.header_height_px, 60);
        assert_eq!(config.deck_config().autoplay_delay, Duration::from_millis(100));
        assert!(config.deck_config().start_muted);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = GridConfig::from_json(r#"{"header_height_px": 48, "start_muted": false}"#)
            .expect("partial config parses");
        assert_eq!(config.header_height_px, 48);
        assert!(!config.start_muted);
        assert_eq!(config.min_split_percent, 10.0);
        assert_eq!(config.pointer.activation_button, DividerPointerButton::Primary);
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(GridConfig::from_json("{}"), Ok(GridConfig::default()));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let err = GridConfig::from_json(r#"{"min_split_percent": 80, "max_split_percent": 20}"#)
            .expect_err("min above max");
        assert_eq!(
            err,
            ConfigError::Split(SplitBoundsError::InvalidRange {
                min: 80.0,
                max: 20.0
            })
        );
    }

    #[test]
    fn reset_outside_window_is_rejected() {
        let err = GridConfig::from_json(r#"{"default_split_percent": 95}"#)
            .expect_err("reset outside window");
        assert!(matches!(
            err,
            ConfigError::Split(SplitBoundsError::ResetOutOfRange { .. })
        ));
    }

    #[test]
    fn unknown_fields_and_bad_json_are_errors() {
        assert!(matches!(
            GridConfig::from_json(r#"{"header": 1}"#),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            GridConfig::from_json("not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
