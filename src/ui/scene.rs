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

//! Scene backgrounds.
//!
//! The surface scene shows pavement: taxiways under wider runways. The radar
//! scene shows runway centerlines and range rings around the airfield. Shapes
//! are built once and reused until the simulation reports a resize or a
//! scene change.

use tower_core::aircraft::KM_PER_DEGREE_LAT;
use tower_core::{AirportConfig, GeoPoint, Polyline, ProjectionConfig, Scene};

use super::data_block::to_pos;

const KM_PER_NM: f64 = 1.852;
const RANGE_RING_SPACING_NM: f64 = 5.0;
const RANGE_RING_COUNT: u32 = 4;

// Pavement widths in metres on the surface scene
const RUNWAY_WIDTH_M: f64 = 60.0;
const TAXIWAY_WIDTH_M: f64 = 25.0;

const RUNWAY_COLOR: egui::Color32 = egui::Color32::from_rgb(90, 90, 90);
const TAXIWAY_COLOR: egui::Color32 = egui::Color32::from_rgb(55, 55, 60);
const CENTERLINE_COLOR: egui::Color32 = egui::Color32::from_rgb(120, 120, 120);
const RANGE_RING_COLOR: egui::Color32 = egui::Color32::from_rgb(40, 60, 40);

pub fn background_color(scene: Scene) -> egui::Color32 {
    match scene {
        Scene::Surface => egui::Color32::from_rgb(20, 22, 24),
        Scene::Radar => egui::Color32::from_rgb(8, 10, 8),
    }
}

/// Pixels covered by `metres` along a meridian at the projection's scale
#[allow(clippy::cast_possible_truncation, reason = "stroke widths are small")]
fn metres_to_px(projection: &ProjectionConfig, metres: f64) -> f32 {
    (metres / 1000.0 / KM_PER_DEGREE_LAT * projection.scale()) as f32
}

fn polyline(
    projection: &ProjectionConfig,
    origin: egui::Pos2,
    line: &Polyline,
    stroke: egui::Stroke,
) -> egui::Shape {
    let points = line
        .geo_points()
        .map(|p| to_pos(origin, projection.geo_to_pixel(p)))
        .collect();
    egui::Shape::line(points, stroke)
}

/// Center of the runway complex, or of the scene if there are no runways
fn airfield_center(airport: &AirportConfig, projection: &ProjectionConfig) -> GeoPoint {
    let (sum, count) = airport
        .runways
        .iter()
        .flat_map(Polyline::geo_points)
        .fold(((0.0, 0.0), 0_u32), |((lat, lon), n), p| ((lat + p.lat, lon + p.lon), n + 1));
    if count == 0 {
        projection.center()
    } else {
        GeoPoint::new(sum.0 / f64::from(count), sum.1 / f64::from(count))
    }
}

/// Build the background for `scene` in absolute screen coordinates
pub fn background_shapes(
    airport: &AirportConfig,
    scene: Scene,
    projection: &ProjectionConfig,
    origin: egui::Pos2,
) -> Vec<egui::Shape> {
    let mut shapes = Vec::new();

    match scene {
        Scene::Surface => {
            let taxiway_width = metres_to_px(projection, TAXIWAY_WIDTH_M).max(1.0);
            let runway_width = metres_to_px(projection, RUNWAY_WIDTH_M).max(2.0);
            let taxiway = egui::Stroke::new(taxiway_width, TAXIWAY_COLOR);
            let runway = egui::Stroke::new(runway_width, RUNWAY_COLOR);

            shapes.extend(
                airport.taxiways.iter().map(|t| polyline(projection, origin, t, taxiway)),
            );
            shapes.extend(airport.runways.iter().map(|r| polyline(projection, origin, r, runway)));
        }
        Scene::Radar => {
            let center = airfield_center(airport, projection);
            let center = to_pos(origin, projection.geo_to_pixel(center));
            let ring = egui::Stroke::new(1.0, RANGE_RING_COLOR);
            for i in 1..=RANGE_RING_COUNT {
                let radius_nm = RANGE_RING_SPACING_NM * f64::from(i);
                let radius = metres_to_px(projection, radius_nm * KM_PER_NM * 1000.0);
                shapes.push(egui::Shape::circle_stroke(center, radius, ring));
            }

            let centerline = egui::Stroke::new(2.0, CENTERLINE_COLOR);
            shapes.extend(
                airport.runways.iter().map(|r| polyline(projection, origin, r, centerline)),
            );
        }
    }

    shapes
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_core::Viewport;

    fn airport() -> AirportConfig {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/res/airport.toml");
        AirportConfig::load(path).unwrap()
    }

    #[test]
    fn test_surface_draws_pavement() {
        let airport = airport();
        let projection = airport.projection(Scene::Surface, Viewport::new(1200.0, 600.0));
        let shapes = background_shapes(&airport, Scene::Surface, &projection, egui::Pos2::ZERO);
        assert_eq!(shapes.len(), airport.runways.len() + airport.taxiways.len());
    }

    #[test]
    fn test_radar_draws_rings_and_centerlines() {
        let airport = airport();
        let projection = airport.projection(Scene::Radar, Viewport::new(1200.0, 600.0));
        let shapes = background_shapes(&airport, Scene::Radar, &projection, egui::Pos2::ZERO);
        assert_eq!(shapes.len(), RANGE_RING_COUNT as usize + airport.runways.len());
    }

    #[test]
    fn test_runway_width_scales_with_viewport() {
        let airport = airport();
        let small = airport.projection(Scene::Surface, Viewport::new(600.0, 300.0));
        let large = airport.projection(Scene::Surface, Viewport::new(2400.0, 1200.0));
        let ratio = metres_to_px(&large, RUNWAY_WIDTH_M) / metres_to_px(&small, RUNWAY_WIDTH_M);
        assert!((ratio - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_airfield_center_falls_back_to_scene_center() {
        let airport = AirportConfig::from_toml_str(
            "asdex_top = 1.0\nasdex_left = 1.0\ntop = 10.0\nleft = 20.0\n",
        )
        .unwrap();
        let projection = airport.projection(Scene::Radar, Viewport::new(800.0, 400.0));
        let center = airfield_center(&airport, &projection);
        assert!((center.lat - 9.8).abs() < 1e-9);
        assert!((center.lon - 20.4).abs() < 1e-9);
    }
}
