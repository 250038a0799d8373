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

use tower_core::label::{TARGET_OFFSET_Y, TARGET_SIZE, TEXT_OFFSET_X};
use tower_core::{AircraftView, ScreenPoint, TextMeasure};

/// Text measurement backed by egui's font layout
pub struct PainterMeasure<'a> {
    painter: &'a egui::Painter,
    font: egui::FontId,
}

impl<'a> PainterMeasure<'a> {
    pub fn new(painter: &'a egui::Painter, font: egui::FontId) -> Self {
        Self { painter, font }
    }
}

impl TextMeasure for PainterMeasure<'_> {
    fn measure(&self, text: &str) -> (f64, f64) {
        let galley = self
            .painter
            .layout_no_wrap(text.to_owned(), self.font.clone(), egui::Color32::WHITE);
        let size = galley.size();
        (f64::from(size.x), f64::from(size.y))
    }
}

#[allow(clippy::cast_possible_truncation, reason = "viewport pixels fit in f32")]
pub fn to_pos(origin: egui::Pos2, point: ScreenPoint) -> egui::Pos2 {
    origin + egui::vec2(point.x as f32, point.y as f32)
}

fn color(rgb: (u8, u8, u8)) -> egui::Color32 {
    egui::Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

/// Paint the target square and label for one aircraft
#[allow(clippy::cast_possible_truncation, reason = "layout constants are small")]
pub fn paint(
    painter: &egui::Painter,
    origin: egui::Pos2,
    view: &AircraftView,
    font: &egui::FontId,
) {
    let anchor = to_pos(origin, view.pixel);
    let color = color(view.color);

    let target = egui::Rect::from_min_size(
        anchor + egui::vec2(0.0, TARGET_OFFSET_Y as f32),
        egui::vec2(TARGET_SIZE as f32, TARGET_SIZE as f32),
    );
    painter.rect_filled(target, 0.0, color);

    painter.text(
        anchor + egui::vec2(TEXT_OFFSET_X as f32, 0.0),
        egui::Align2::LEFT_TOP,
        &view.label,
        font.clone(),
        color,
    );
}
