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

//! Aircraft state and dead-reckoning kinematics.
//!
//! Aircraft fly straight lines at constant ground speed. Each advance converts
//! the distance covered into degrees using a fixed length for a degree of
//! latitude and a latitude-dependent length for a degree of longitude.

use std::time::Duration;

use crate::projection::GeoPoint;

/// Kilometres per degree of latitude.
pub const KM_PER_DEGREE_LAT: f64 = 110.574;
/// Kilometres per degree of longitude at the equator; shrinks with cos(lat).
pub const KM_PER_DEGREE_LON_EQUATOR: f64 = 111.320;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// A simulated aircraft.
#[derive(Debug, Clone, PartialEq)]
pub struct AircraftState {
    name: String,
    /// Current position in degrees.
    pub position: GeoPoint,
    /// Heading in degrees clockwise from north, `[0, 360)`.
    pub heading: f64,
    /// Ground speed in km/h.
    pub speed_kmh: f64,
    /// Altitude in feet. Display only.
    pub altitude_ft: i32,
    /// Set once a controller has clicked the aircraft.
    pub acknowledged: bool,
}

impl AircraftState {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        position: GeoPoint,
        heading: f64,
        speed_kmh: f64,
        altitude_ft: i32,
    ) -> Self {
        Self {
            name: name.into(),
            position,
            heading: heading.rem_euclid(360.0),
            speed_kmh,
            altitude_ft,
            acknowledged: false,
        }
    }

    /// Callsign-style label; fixed for the life of the aircraft.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Distance flown in `elapsed` at the current ground speed, in km.
    #[must_use]
    pub fn distance_km(&self, elapsed: Duration) -> f64 {
        self.speed_kmh / SECONDS_PER_HOUR * elapsed.as_secs_f64()
    }

    /// Move the aircraft along its heading for `elapsed` wall-clock time.
    ///
    /// Latitude is updated first and the longitude step uses the new
    /// latitude. Positions are never clamped.
    pub fn advance(&mut self, elapsed: Duration) {
        let distance = self.distance_km(elapsed);
        let heading = self.heading.to_radians();

        self.position.lat += heading.cos() * (distance / KM_PER_DEGREE_LAT);
        let km_per_degree_lon = KM_PER_DEGREE_LON_EQUATOR * self.position.lat.to_radians().cos();
        self.position.lon += heading.sin() * (distance / km_per_degree_lon);
    }

    pub fn acknowledge(&mut self) {
        self.acknowledged = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn plane(heading: f64, speed: f64) -> AircraftState {
        AircraftState::new("Plane1", GeoPoint::new(32.724_261, -117.212_722), heading, speed, 6000)
    }

    #[test]
    fn test_stationary_aircraft_does_not_move() {
        for elapsed_ms in [0, 16, 1000, 3_600_000] {
            let mut aircraft = plane(137.0, 0.0);
            let start = aircraft.position;
            aircraft.advance(Duration::from_millis(elapsed_ms));
            assert_eq!(aircraft.position, start);
        }
    }

    #[test]
    fn test_due_north_only_changes_latitude() {
        let mut aircraft = plane(0.0, 250.0);
        let start = aircraft.position;
        aircraft.advance(Duration::from_secs(10));
        assert!(aircraft.position.lat > start.lat);
        assert_relative_eq!(aircraft.position.lon, start.lon, epsilon = 1e-12);
    }

    #[test]
    fn test_due_east_only_changes_longitude() {
        let mut aircraft = plane(90.0, 250.0);
        let start = aircraft.position;
        aircraft.advance(Duration::from_secs(10));
        assert_relative_eq!(aircraft.position.lat, start.lat, epsilon = 1e-12);
        assert!(aircraft.position.lon > start.lon);
    }

    #[test]
    fn test_northeast_after_one_second() {
        let mut aircraft = plane(45.0, 250.0);
        let start = aircraft.position;
        aircraft.advance(Duration::from_millis(1000));
        assert!(aircraft.position.lat > start.lat);
        assert!(aircraft.position.lon > start.lon);
    }

    #[test]
    fn test_distance_matches_ground_speed() {
        let aircraft = plane(0.0, 360.0);
        // 360 km/h is 0.1 km/s
        assert_relative_eq!(aircraft.distance_km(Duration::from_secs(1)), 0.1);

        let mut aircraft = aircraft;
        let start = aircraft.position;
        aircraft.advance(Duration::from_secs(1));
        assert_relative_eq!(
            aircraft.position.lat - start.lat,
            0.1 / KM_PER_DEGREE_LAT,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_longitude_step_uses_updated_latitude() {
        let mut aircraft = plane(45.0, 250.0);
        let start = aircraft.position;
        let elapsed = Duration::from_secs(60);
        aircraft.advance(elapsed);

        let distance = aircraft.distance_km(elapsed);
        let heading = 45.0_f64.to_radians();
        let new_lat = start.lat + heading.cos() * distance / KM_PER_DEGREE_LAT;
        let km_per_degree_lon = KM_PER_DEGREE_LON_EQUATOR * new_lat.to_radians().cos();
        let expected_lon = start.lon + heading.sin() * distance / km_per_degree_lon;

        assert_relative_eq!(aircraft.position.lat, new_lat, epsilon = 1e-12);
        assert_relative_eq!(aircraft.position.lon, expected_lon, epsilon = 1e-12);
    }

    #[test]
    fn test_heading_is_normalized() {
        assert_relative_eq!(plane(-90.0, 0.0).heading, 270.0);
        assert_relative_eq!(plane(720.0, 0.0).heading, 0.0);
    }

    #[test]
    fn test_advance_keeps_altitude_and_acknowledgement() {
        let mut aircraft = plane(180.0, 18.0);
        aircraft.acknowledge();
        aircraft.advance(Duration::from_secs(2));
        assert_eq!(aircraft.altitude_ft, 6000);
        assert!(aircraft.acknowledged);
    }
}
