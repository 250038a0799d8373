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

//! Simulation context.
//!
//! [`SimulationContext`] is everything the display loop needs between frames:
//! the traffic, one projection per scene, which scene is showing, the debug
//! flag, and the sweep clock. The loop owns it and drives it with four
//! inputs (frame time, clicks, resizes, key toggles) and reads back one
//! [`AircraftView`] per aircraft every frame.

use std::time::Duration;

use log::{debug, info};

use crate::aircraft::AircraftState;
use crate::airport::AirportConfig;
use crate::error::ConfigError;
use crate::label::{label_bounds, label_color, label_text, LabelBounds, TextMeasure};
use crate::projection::{GeoPoint, ProjectionConfig, Scene, SceneSet, ScreenPoint, Viewport};
use crate::sweep::SweepClock;

/// What the renderer needs to draw one aircraft.
#[derive(Debug, Clone, PartialEq)]
pub struct AircraftView {
    pub name: String,
    /// Projected position in the active scene.
    pub pixel: ScreenPoint,
    pub label: String,
    pub color: (u8, u8, u8),
    pub acknowledged: bool,
    pub bounds: LabelBounds,
}

/// Result of a click on the display.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickOutcome {
    /// Aircraft whose data block was under the pointer.
    pub hits: Vec<String>,
    /// Geographic position of the click in the active scene.
    pub geo: GeoPoint,
}

#[derive(Debug)]
pub struct SimulationContext {
    aircraft: Vec<AircraftState>,
    scenes: SceneSet,
    active: Scene,
    debug: bool,
    clock: SweepClock,
    background_invalidated: bool,
}

impl SimulationContext {
    /// Build a session from an airport document.
    pub fn new(
        airport: &AirportConfig,
        viewport: Viewport,
        sweep_interval: Duration,
    ) -> Result<Self, ConfigError> {
        let scenes = SceneSet::new(
            airport.projection(Scene::Surface, viewport),
            airport.projection(Scene::Radar, viewport),
        );
        let aircraft = airport.aircraft.iter().map(|spawn| spawn.to_state()).collect();
        Ok(Self::from_parts(aircraft, scenes, SweepClock::new(sweep_interval)?))
    }

    #[must_use]
    pub fn from_parts(aircraft: Vec<AircraftState>, scenes: SceneSet, clock: SweepClock) -> Self {
        Self {
            aircraft,
            scenes,
            active: Scene::default(),
            debug: false,
            clock,
            background_invalidated: true,
        }
    }

    /// Account for one rendered frame. Each sweep that falls due advances
    /// every aircraft by one sweep interval. Returns the number of sweeps.
    pub fn tick(&mut self, elapsed: Duration) -> u32 {
        let sweeps = self.clock.tick(elapsed);
        if sweeps > 0 {
            let step = self.clock.interval();
            for _ in 0..sweeps {
                for aircraft in &mut self.aircraft {
                    aircraft.advance(step);
                }
            }
            debug!("Sweep {} advanced {} aircraft", self.clock.sweeps(), self.aircraft.len());
        }
        sweeps
    }

    #[must_use]
    pub fn active_scene(&self) -> Scene {
        self.active
    }

    pub fn set_scene(&mut self, scene: Scene) {
        if scene != self.active {
            self.active = scene;
            self.background_invalidated = true;
            info!("Switched to {scene} scene");
        }
    }

    pub fn toggle_scene(&mut self) -> Scene {
        self.set_scene(self.active.toggled());
        self.active
    }

    #[must_use]
    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn toggle_debug(&mut self) -> bool {
        self.debug = !self.debug;
        info!("Debug mode {}", if self.debug { "on" } else { "off" });
        self.debug
    }

    /// Projection for the active scene.
    #[must_use]
    pub fn projection(&self) -> &ProjectionConfig {
        self.scenes.get(self.active)
    }

    #[must_use]
    pub fn scenes(&self) -> &SceneSet {
        &self.scenes
    }

    /// Resize every scene and invalidate the drawn background.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.scenes.resize(width, height);
        self.background_invalidated = true;
    }

    /// Returns `true` once after the background needs to be redrawn.
    pub fn take_background_invalidated(&mut self) -> bool {
        std::mem::take(&mut self.background_invalidated)
    }

    #[must_use]
    pub fn aircraft(&self) -> &[AircraftState] {
        &self.aircraft
    }

    pub fn aircraft_mut(&mut self, name: &str) -> Option<&mut AircraftState> {
        self.aircraft.iter_mut().find(|a| a.name() == name)
    }

    #[must_use]
    pub fn clock(&self) -> &SweepClock {
        &self.clock
    }

    fn view(&self, aircraft: &AircraftState, measure: &impl TextMeasure) -> AircraftView {
        let pixel = self.projection().geo_to_pixel(aircraft.position);
        let label = label_text(aircraft, self.debug);
        let bounds = label_bounds(pixel, &label, measure);
        AircraftView {
            name: aircraft.name().to_owned(),
            pixel,
            label,
            color: label_color(aircraft),
            acknowledged: aircraft.acknowledged,
            bounds,
        }
    }

    /// Current screen state of every aircraft in the active scene.
    #[must_use]
    pub fn aircraft_views(&self, measure: &impl TextMeasure) -> Vec<AircraftView> {
        self.aircraft.iter().map(|a| self.view(a, measure)).collect()
    }

    /// Acknowledge every aircraft whose data block contains `point`.
    pub fn click(&mut self, point: ScreenPoint, measure: &impl TextMeasure) -> ClickOutcome {
        let hits: Vec<String> = self
            .aircraft_views(measure)
            .into_iter()
            .filter(|view| view.bounds.contains(point))
            .map(|view| view.name)
            .collect();

        for name in &hits {
            if let Some(aircraft) = self.aircraft_mut(name) {
                if !aircraft.acknowledged {
                    info!("Acknowledged {name}");
                }
                aircraft.acknowledge();
            }
        }

        let geo = self.projection().pixel_to_geo(point);
        if self.debug {
            info!(
                "Click at ({:.0}, {:.0}) in {} scene -> lat {:.6}, lon {:.6}",
                point.x, point.y, self.active, geo.lat, geo.lon
            );
        }

        ClickOutcome { hits, geo }
    }
}
