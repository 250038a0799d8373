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

//! Simulation core for the Tower ATC airport display.
//!
//! The library has no rendering dependency. A display loop drives it and
//! draws what it reports:
//!
//! - **Aircraft**: dead-reckoning kinematics ([`AircraftState::advance`])
//! - **Projection**: flat-earth mapping between lat/lon and viewport pixels,
//!   one configuration per [`Scene`]
//! - **Sweep**: fixed-step clock that decouples traffic updates from frame rate
//! - **Airport**: the TOML document that seeds a session
//! - **Sim**: [`SimulationContext`], the state the loop owns between frames
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use tower_core::{AirportConfig, MonospaceMeasure, ScreenPoint, SimulationContext, Viewport};
//!
//! let airport = AirportConfig::from_toml_str(r#"
//! asdex_top = 32.743
//! asdex_left = -117.225
//! top = 33.0
//! left = -117.6
//!
//! [[aircraft]]
//! name = "Plane1"
//! lat = 32.724261
//! lon = -117.212722
//! heading = 45.0
//! speed = 250.0
//! altitude = 6000
//! "#).unwrap();
//!
//! let mut sim = SimulationContext::new(
//!     &airport,
//!     Viewport::new(1200.0, 600.0),
//!     Duration::from_secs(2),
//! ).unwrap();
//!
//! // One frame at ~30 fps
//! sim.tick(Duration::from_millis(33));
//!
//! let measure = MonospaceMeasure::default();
//! for view in sim.aircraft_views(&measure) {
//!     println!("{} at ({:.0}, {:.0})", view.label, view.pixel.x, view.pixel.y);
//! }
//!
//! let outcome = sim.click(ScreenPoint::new(300.0, 455.0), &measure);
//! println!("clicked {:?} at {:?}", outcome.hits, outcome.geo);
//! ```

pub mod aircraft;
pub mod airport;
pub mod error;
pub mod label;
pub mod projection;
pub mod sim;
pub mod sweep;

pub use aircraft::AircraftState;
pub use airport::{AircraftSpawn, AirportConfig, Polyline};
pub use error::ConfigError;
pub use label::{LabelBounds, MonospaceMeasure, TextMeasure};
pub use projection::{GeoPoint, ProjectionConfig, Scene, SceneSet, ScreenPoint, Viewport};
pub use sim::{AircraftView, ClickOutcome, SimulationContext};
pub use sweep::SweepClock;
