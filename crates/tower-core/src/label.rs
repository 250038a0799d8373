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

//! Aircraft data-block layout.
//!
//! A data block is a small square target followed by the label text. Its
//! bounds are anchored at the aircraft's projected pixel and are what a
//! click must land in to acknowledge the aircraft. Text size depends on the
//! renderer's font, so measuring goes through [`TextMeasure`].

use crate::aircraft::AircraftState;
use crate::projection::ScreenPoint;

/// Label color before acknowledgement.
pub const UNACKNOWLEDGED_COLOR: (u8, u8, u8) = (86, 176, 91);
/// Label color after acknowledgement.
pub const ACKNOWLEDGED_COLOR: (u8, u8, u8) = (174, 179, 36);

/// Side of the square target, in pixels.
pub const TARGET_SIZE: f64 = 5.0;
/// Vertical offset of the target from the label origin.
pub const TARGET_OFFSET_Y: f64 = 7.5;
/// Horizontal offset where the text starts.
pub const TEXT_OFFSET_X: f64 = 9.0;
/// Extra space added around measured text.
pub const LABEL_PADDING: f64 = 5.0;

/// Measures rendered text. Implemented by the renderer with its real font.
pub trait TextMeasure {
    /// Width and height of `text` in pixels.
    fn measure(&self, text: &str) -> (f64, f64);
}

/// Fixed-advance font metrics, for headless use and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    pub char_width: f64,
    pub line_height: f64,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self {
            char_width: 9.0,
            line_height: 15.0,
        }
    }
}

impl TextMeasure for MonospaceMeasure {
    #[allow(clippy::cast_precision_loss, reason = "label text is a handful of characters")]
    fn measure(&self, text: &str) -> (f64, f64) {
        (text.chars().count() as f64 * self.char_width, self.line_height)
    }
}

/// Clickable area of a data block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelBounds {
    pub origin: ScreenPoint,
    pub width: f64,
    pub height: f64,
}

impl LabelBounds {
    /// Inclusive on the top/left edges, exclusive on the bottom/right.
    #[must_use]
    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.origin.x
            && point.x < self.origin.x + self.width
            && point.y >= self.origin.y
            && point.y < self.origin.y + self.height
    }
}

/// Text shown next to the target. Altitude is appended in debug mode.
#[must_use]
pub fn label_text(aircraft: &AircraftState, debug: bool) -> String {
    if debug {
        format!("{} | {}", aircraft.name(), aircraft.altitude_ft)
    } else {
        aircraft.name().to_owned()
    }
}

#[must_use]
pub fn label_color(aircraft: &AircraftState) -> (u8, u8, u8) {
    if aircraft.acknowledged {
        ACKNOWLEDGED_COLOR
    } else {
        UNACKNOWLEDGED_COLOR
    }
}

/// Bounds of a data block with `text` anchored at `origin`.
#[must_use]
pub fn label_bounds(origin: ScreenPoint, text: &str, measure: &impl TextMeasure) -> LabelBounds {
    let (text_width, text_height) = measure.measure(text);
    LabelBounds {
        origin,
        width: TEXT_OFFSET_X + text_width + LABEL_PADDING,
        height: text_height + LABEL_PADDING,
    }
}
