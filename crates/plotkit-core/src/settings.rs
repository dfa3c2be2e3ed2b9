//! Defaults a drawing context starts from.

use crate::error::{PathError, PathResult};
use crate::geometry::AngleMode;
use crate::transform::TransformMode;
use serde::{Deserialize, Serialize};

/// Default curve-flattening tolerance for boolean operations.
pub const DEFAULT_FLATNESS: f64 = 0.6;
/// Default number of linear pieces used to measure each curve segment.
pub const DEFAULT_SUBDIVISIONS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Close paths automatically when their authoring scope ends.
    pub autoclose: bool,
    pub flatness: f64,
    pub subdivisions: usize,
    pub transform_mode: TransformMode,
    pub angle_mode: AngleMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            autoclose: true,
            flatness: DEFAULT_FLATNESS,
            subdivisions: DEFAULT_SUBDIVISIONS,
            transform_mode: TransformMode::default(),
            angle_mode: AngleMode::default(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> PathResult<Self> {
        serde_json::from_str(json).map_err(|e| PathError::Settings(e.to_string()))
    }

    pub fn to_json(&self) -> PathResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| PathError::Settings(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.autoclose);
        assert_eq!(settings.flatness, 0.6);
        assert_eq!(settings.subdivisions, 10);
        assert_eq!(settings.transform_mode, TransformMode::Center);
        assert_eq!(settings.angle_mode, AngleMode::Degrees);
    }

    #[test]
    fn test_partial_json() {
        let settings =
            Settings::from_json(r#"{"autoclose": false, "angle_mode": "radians"}"#).unwrap();
        assert!(!settings.autoclose);
        assert_eq!(settings.angle_mode, AngleMode::Radians);
        assert_eq!(settings.subdivisions, DEFAULT_SUBDIVISIONS);
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings {
            flatness: 0.25,
            transform_mode: TransformMode::Corner,
            ..Settings::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_bad_json() {
        let err = Settings::from_json("{\"flatness\": \"fine\"}").unwrap_err();
        assert!(matches!(err, PathError::Settings(_)));
    }
}
