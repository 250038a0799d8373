// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Airport document.
//!
//! A hand-edited TOML file describing one airport: the bounding box of the
//! surface (ASDE-X) and radar scenes, the geometry drawn behind the traffic,
//! and the aircraft present when the session starts.
//!
//! ```toml
//! name = "KSAN"
//! asdex_top = 32.743
//! asdex_left = -117.225
//! top = 33.0
//! left = -117.6
//!
//! [[runways]]
//! name = "9/27"
//! points = [[32.7379, -117.2043], [32.7295, -117.1779]]
//!
//! [[aircraft]]
//! name = "Plane1"
//! lat = 32.724261
//! lon = -117.212722
//! heading = 45.0
//! speed = 250.0
//! altitude = 6000
//! ```
//!
//! Loading validates the whole document; a bad document is a startup error.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::aircraft::AircraftState;
use crate::error::ConfigError;
use crate::projection::{GeoPoint, ProjectionConfig, Scene, Viewport};

fn default_asdex_lat_span() -> f64 {
    0.025
}

fn default_asdex_lon_span() -> f64 {
    0.05
}

fn default_lat_span() -> f64 {
    0.4
}

fn default_lon_span() -> f64 {
    0.8
}

/// A named polyline of `[lat, lon]` points.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Polyline {
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

impl Polyline {
    pub fn geo_points(&self) -> impl Iterator<Item = GeoPoint> + '_ {
        self.points.iter().map(|&[lat, lon]| GeoPoint::new(lat, lon))
    }
}

/// Initial state of one aircraft.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AircraftSpawn {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub heading: f64,
    /// Ground speed in km/h.
    pub speed: f64,
    /// Altitude in feet.
    #[serde(default)]
    pub altitude: i32,
}

impl AircraftSpawn {
    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidAircraft {
            name: self.name.clone(),
            reason: reason.to_owned(),
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if !self.lat.is_finite() || !self.lon.is_finite() {
            return Err(invalid("position must be finite"));
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(invalid("latitude out of range"));
        }
        if !self.heading.is_finite() {
            return Err(invalid("heading must be finite"));
        }
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(invalid("speed must be a non-negative number"));
        }
        if self.altitude < 0 {
            return Err(invalid("altitude must not be negative"));
        }
        Ok(())
    }

    #[must_use]
    pub fn to_state(&self) -> AircraftState {
        AircraftState::new(
            self.name.clone(),
            GeoPoint::new(self.lat, self.lon),
            self.heading,
            self.speed,
            self.altitude,
        )
    }
}

/// Parsed and validated airport document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AirportConfig {
    #[serde(default)]
    pub name: String,

    /// Surface scene bounding box.
    pub asdex_top: f64,
    pub asdex_left: f64,
    #[serde(default = "default_asdex_lat_span")]
    pub asdex_lat_span: f64,
    #[serde(default = "default_asdex_lon_span")]
    pub asdex_lon_span: f64,

    /// Radar scene bounding box.
    pub top: f64,
    pub left: f64,
    #[serde(default = "default_lat_span")]
    pub lat_span: f64,
    #[serde(default = "default_lon_span")]
    pub lon_span: f64,

    #[serde(default)]
    pub runways: Vec<Polyline>,
    #[serde(default)]
    pub taxiways: Vec<Polyline>,
    #[serde(default)]
    pub aircraft: Vec<AircraftSpawn>,
}

impl AirportConfig {
    /// Read and validate an airport document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        info!(
            "Loaded airport '{}' from {}: {} runways, {} taxiways, {} aircraft",
            config.name,
            path.display(),
            config.runways.len(),
            config.taxiways.len(),
            config.aircraft.len()
        );
        Ok(config)
    }

    /// Parse and validate an airport document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for scene in [Scene::Surface, Scene::Radar] {
            let (top, left, lat_span, lon_span) = self.extent(scene);
            if !top.is_finite() || !left.is_finite() {
                return Err(ConfigError::InvalidBoundingBox { scene, top, left });
            }
            if !(lat_span.is_finite() && lon_span.is_finite() && lat_span > 0.0 && lon_span > 0.0) {
                return Err(ConfigError::InvalidSpan {
                    scene,
                    lat_span,
                    lon_span,
                });
            }
        }

        for line in self.runways.iter().chain(&self.taxiways) {
            if line.points.len() < 2 {
                return Err(ConfigError::InvalidGeometry {
                    name: line.name.clone(),
                    reason: format!("needs at least 2 points, found {}", line.points.len()),
                });
            }
            if line.points.iter().flatten().any(|v| !v.is_finite()) {
                return Err(ConfigError::InvalidGeometry {
                    name: line.name.clone(),
                    reason: "points must be finite".to_owned(),
                });
            }
        }

        let mut seen = HashSet::new();
        for spawn in &self.aircraft {
            spawn.validate()?;
            if !seen.insert(spawn.name.as_str()) {
                return Err(ConfigError::DuplicateAircraft(spawn.name.clone()));
            }
        }
        Ok(())
    }

    /// `(top, left, lat_span, lon_span)` for a scene.
    #[must_use]
    pub fn extent(&self, scene: Scene) -> (f64, f64, f64, f64) {
        match scene {
            Scene::Surface => (
                self.asdex_top,
                self.asdex_left,
                self.asdex_lat_span,
                self.asdex_lon_span,
            ),
            Scene::Radar => (self.top, self.left, self.lat_span, self.lon_span),
        }
    }

    /// Build the projection for a scene at the given viewport size.
    #[must_use]
    pub fn projection(&self, scene: Scene, viewport: Viewport) -> ProjectionConfig {
        let (top, left, lat_span, lon_span) = self.extent(scene);
        ProjectionConfig::new(top, left, lat_span, lon_span, viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const MINIMAL: &str = r"
asdex_top = 32.743
asdex_left = -117.225
top = 33.0
left = -117.6
";

    fn with_aircraft(extra: &str) -> String {
        format!("{MINIMAL}\n[[aircraft]]\n{extra}\n")
    }

    #[test]
    fn test_minimal_document_uses_default_spans() {
        let config = AirportConfig::from_toml_str(MINIMAL).unwrap();
        assert_eq!(config.extent(Scene::Surface), (32.743, -117.225, 0.025, 0.05));
        assert_eq!(config.extent(Scene::Radar), (33.0, -117.6, 0.4, 0.8));
        assert!(config.aircraft.is_empty());
        assert!(config.runways.is_empty());
    }

    #[test]
    fn test_full_document() {
        let text = format!(
            r#"{MINIMAL}
name = "KSAN"

[[runways]]
name = "9/27"
points = [[32.7379, -117.2043], [32.7295, -117.1779]]

[[taxiways]]
name = "B"
points = [[32.7360, -117.2040], [32.7330, -117.1950], [32.7290, -117.1800]]

[[aircraft]]
name = "Plane1"
lat = 32.724261
lon = -117.212722
heading = 45.0
speed = 250.0
altitude = 6000

[[aircraft]]
name = "Plane2"
lat = 32.737167
lon = -117.204398
heading = 540.0
speed = 18.0
"#
        );
        let config = AirportConfig::from_toml_str(&text).unwrap();
        assert_eq!(config.name, "KSAN");
        assert_eq!(config.runways[0].geo_points().count(), 2);
        assert_eq!(config.taxiways[0].points.len(), 3);

        let plane2 = config.aircraft[1].to_state();
        assert_eq!(plane2.name(), "Plane2");
        assert_eq!(plane2.altitude_ft, 0);
        assert_relative_eq!(plane2.heading, 180.0);
    }

    #[test]
    fn test_missing_bounding_box_is_parse_error() {
        let err =
            AirportConfig::from_toml_str("asdex_top = 32.7\nasdex_left = -117.2\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = AirportConfig::from_toml_str("asdex_top = = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_non_positive_span() {
        let text = format!("{MINIMAL}\nlat_span = 0.0\n");
        let err = AirportConfig::from_toml_str(&text).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSpan { scene: Scene::Radar, .. }));

        let text = format!("{MINIMAL}\nasdex_lon_span = -1.0\n");
        let err = AirportConfig::from_toml_str(&text).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSpan { scene: Scene::Surface, .. }));
    }

    #[test]
    fn test_rejects_negative_speed() {
        let text =
            with_aircraft("name = \"A\"\nlat = 32.7\nlon = -117.2\nheading = 0.0\nspeed = -5.0");
        let err = AirportConfig::from_toml_str(&text).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAircraft { ref name, .. } if name == "A"));
    }

    #[test]
    fn test_rejects_negative_altitude() {
        let text = with_aircraft(
            "name = \"A\"\nlat = 32.7\nlon = -117.2\nheading = 0.0\nspeed = 5.0\naltitude = -100",
        );
        let err = AirportConfig::from_toml_str(&text).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAircraft { .. }));
    }

    #[test]
    fn test_rejects_empty_name() {
        let text =
            with_aircraft("name = \" \"\nlat = 32.7\nlon = -117.2\nheading = 0.0\nspeed = 5.0");
        let err = AirportConfig::from_toml_str(&text).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAircraft { .. }));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let one = "name = \"A\"\nlat = 32.7\nlon = -117.2\nheading = 0.0\nspeed = 5.0";
        let text = format!("{}\n[[aircraft]]\n{one}\n", with_aircraft(one));
        let err = AirportConfig::from_toml_str(&text).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateAircraft(ref name) if name == "A"));
    }

    #[test]
    fn test_rejects_degenerate_geometry() {
        let text =
            format!("{MINIMAL}\n[[runways]]\nname = \"9/27\"\npoints = [[32.73, -117.2]]\n");
        let err = AirportConfig::from_toml_str(&text).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidGeometry { .. }));
    }

    fn spawn_reason(lat: &str, lon: &str, heading: &str) -> String {
        let text = with_aircraft(&format!(
            "name = \"A\"\nlat = {lat}\nlon = {lon}\nheading = {heading}\nspeed = 5.0"
        ));
        match AirportConfig::from_toml_str(&text).unwrap_err() {
            ConfigError::InvalidAircraft { name, reason } => {
                assert_eq!(name, "A");
                reason
            }
            other => panic!("expected InvalidAircraft, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_non_finite_bounding_box() {
        let surface = "asdex_top = nan\nasdex_left = -117.225\ntop = 33.0\nleft = -117.6\n";
        let err = AirportConfig::from_toml_str(surface).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidBoundingBox { scene: Scene::Surface, top, .. } if top.is_nan()
        ));

        let radar = "asdex_top = 32.743\nasdex_left = -117.225\ntop = 33.0\nleft = -inf\n";
        let err = AirportConfig::from_toml_str(radar).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidBoundingBox { scene: Scene::Radar, left, .. } if left.is_infinite()
        ));
    }

    #[test]
    fn test_rejects_non_finite_position() {
        assert_eq!(spawn_reason("nan", "-117.2", "0.0"), "position must be finite");
        assert_eq!(spawn_reason("32.7", "inf", "0.0"), "position must be finite");
    }

    #[test]
    fn test_rejects_latitude_out_of_range() {
        assert_eq!(spawn_reason("95.0", "-117.2", "0.0"), "latitude out of range");
        assert_eq!(spawn_reason("-90.5", "-117.2", "0.0"), "latitude out of range");
    }

    #[test]
    fn test_accepts_latitude_at_poles() {
        for lat in ["90.0", "-90.0"] {
            let text = with_aircraft(&format!(
                "name = \"A\"\nlat = {lat}\nlon = 0.0\nheading = 0.0\nspeed = 5.0"
            ));
            assert!(AirportConfig::from_toml_str(&text).is_ok());
        }
    }

    #[test]
    fn test_rejects_non_finite_heading() {
        assert_eq!(spawn_reason("32.7", "-117.2", "nan"), "heading must be finite");
        assert_eq!(spawn_reason("32.7", "-117.2", "inf"), "heading must be finite");
    }

    #[test]
    fn test_rejects_non_finite_geometry_points() {
        let text = format!(
            "{MINIMAL}\n[[taxiways]]\nname = \"B\"\npoints = [[32.73, -117.2], [nan, -117.19]]\n"
        );
        let err = AirportConfig::from_toml_str(&text).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidGeometry { ref name, ref reason }
                if name == "B" && reason == "points must be finite"
        ));
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = AirportConfig::load("/nonexistent/airport.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_bundled_airport_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../res/airport.toml");
        let config = AirportConfig::load(path).unwrap();
        assert_eq!(config.aircraft.len(), 2);
        assert!(!config.runways.is_empty());
    }
}
