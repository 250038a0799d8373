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

//! Errors raised while building a simulation from an airport document.
//!
//! Every per-frame operation (kinematics, projection, clicks) is total, so
//! the only failures the core reports are startup configuration problems.

use std::path::PathBuf;

use thiserror::Error;

use crate::projection::Scene;

/// Errors that can occur while loading or validating an airport document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read airport file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed airport document: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid span for {scene} scene: lat_span={lat_span}, lon_span={lon_span}")]
    InvalidSpan {
        scene: Scene,
        lat_span: f64,
        lon_span: f64,
    },

    #[error("invalid bounding box for {scene} scene: top={top}, left={left}")]
    InvalidBoundingBox { scene: Scene, top: f64, left: f64 },

    #[error("invalid aircraft '{name}': {reason}")]
    InvalidAircraft { name: String, reason: String },

    #[error("duplicate aircraft name: {0}")]
    DuplicateAircraft(String),

    #[error("invalid geometry '{name}': {reason}")]
    InvalidGeometry { name: String, reason: String },

    #[error("sweep interval must be greater than zero")]
    InvalidSweepInterval,
}
