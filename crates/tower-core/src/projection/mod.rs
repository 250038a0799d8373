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

//! Flat-earth projection between geographic coordinates and viewport pixels.
//!
//! Each [`Scene`] owns a [`ProjectionConfig`]: a bounding box anchored at its
//! top-left corner, a fixed geographic span, and a viewport. The scale (pixels
//! per degree) is derived from the span and viewport and is recomputed on
//! every resize. Screen y grows downward while latitude grows northward, so
//! the latitude axis is flipped.
//!
//! This is an equirectangular approximation that is only meaningful over a
//! small area such as an airport surface or a terminal radar sector.

use std::fmt;

use log::{debug, warn};

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A position in viewport pixels, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_drawable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// The two display scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scene {
    /// Airport surface movement display.
    #[default]
    Surface,
    /// Terminal radar display.
    Radar,
}

impl Scene {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Surface => "asdex",
            Self::Radar => "radar",
        }
    }

    /// The other scene.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Surface => Self::Radar,
            Self::Radar => Self::Surface,
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Projection parameters for one scene.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    top: f64,
    left: f64,
    lat_span: f64,
    lon_span: f64,
    viewport: Viewport,
    scale: f64,
}

impl ProjectionConfig {
    /// Create a projection for a bounding box anchored at (`top`, `left`)
    /// covering `lat_span` x `lon_span` degrees.
    ///
    /// Spans must be positive; the airport loader rejects anything else
    /// before a projection is built.
    #[must_use]
    pub fn new(top: f64, left: f64, lat_span: f64, lon_span: f64, viewport: Viewport) -> Self {
        let mut config = Self {
            top,
            left,
            lat_span,
            lon_span,
            viewport,
            scale: 1.0,
        };
        if viewport.is_drawable() {
            config.scale = config.fit_scale(viewport);
        } else {
            warn!(
                "Initial viewport {}x{} is not drawable, using unit scale",
                viewport.width, viewport.height
            );
        }
        config
    }

    fn fit_scale(&self, viewport: Viewport) -> f64 {
        (viewport.width / self.lon_span).min(viewport.height / self.lat_span)
    }

    /// Map a geographic position to viewport pixels.
    #[must_use]
    pub fn geo_to_pixel(&self, point: GeoPoint) -> ScreenPoint {
        ScreenPoint {
            x: (point.lon - self.left) * self.scale,
            y: (self.top - point.lat) * self.scale,
        }
    }

    /// Map viewport pixels back to a geographic position.
    #[must_use]
    pub fn pixel_to_geo(&self, point: ScreenPoint) -> GeoPoint {
        GeoPoint {
            lat: self.top - point.y / self.scale,
            lon: point.x / self.scale + self.left,
        }
    }

    /// Recompute the scale for a new viewport size. The bounding box is kept.
    ///
    /// Sizes that cannot be drawn into (zero, negative, or not finite, as
    /// reported while a window is minimized) are ignored.
    pub fn resize(&mut self, width: f64, height: f64) {
        let viewport = Viewport::new(width, height);
        if !viewport.is_drawable() {
            warn!("Ignoring resize to {width}x{height}");
            return;
        }
        self.viewport = viewport;
        self.scale = self.fit_scale(viewport);
        debug!("Projection resized to {width}x{height}, scale {:.1} px/deg", self.scale);
    }

    /// Pixels per degree.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn top(&self) -> f64 {
        self.top
    }

    #[must_use]
    pub fn left(&self) -> f64 {
        self.left
    }

    #[must_use]
    pub fn lat_span(&self) -> f64 {
        self.lat_span
    }

    #[must_use]
    pub fn lon_span(&self) -> f64 {
        self.lon_span
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Geographic center of the configured span.
    #[must_use]
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(self.top - self.lat_span / 2.0, self.left + self.lon_span / 2.0)
    }
}

/// One projection per scene, resized together.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSet {
    surface: ProjectionConfig,
    radar: ProjectionConfig,
}

impl SceneSet {
    #[must_use]
    pub fn new(surface: ProjectionConfig, radar: ProjectionConfig) -> Self {
        Self { surface, radar }
    }

    #[must_use]
    pub fn get(&self, scene: Scene) -> &ProjectionConfig {
        match scene {
            Scene::Surface => &self.surface,
            Scene::Radar => &self.radar,
        }
    }

    /// Resize every scene to the same viewport.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.surface.resize(width, height);
        self.radar.resize(width, height);
    }
}
