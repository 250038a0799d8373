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

//! The display loop.
//!
//! eframe calls [`TowerApp::update`] once per frame. Each frame measures the
//! real time since the previous one and feeds it to the simulation, applies
//! key toggles, forwards clicks and resizes, then paints the background and
//! every aircraft data block.

use std::time::{Duration, Instant};

use eframe::egui;
use log::debug;
use tower_core::{AirportConfig, Scene, ScreenPoint, SimulationContext};

use crate::config::AppConfig;
use crate::ui::{data_block, scene};

#[derive(Debug)]
pub struct TowerApp {
    sim: SimulationContext,
    airport: AirportConfig,
    frame_interval: Duration,
    font: egui::FontId,
    last_frame: Instant,
    display_rect: egui::Rect,
    background: Vec<egui::Shape>,
}

impl TowerApp {
    pub fn new(sim: SimulationContext, airport: AirportConfig, config: &AppConfig) -> Self {
        Self {
            sim,
            airport,
            frame_interval: config.frame_interval(),
            font: egui::FontId::monospace(config.label_font_size),
            last_frame: Instant::now(),
            display_rect: egui::Rect::NOTHING,
            background: Vec::new(),
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        let (toggle_scene, toggle_debug) =
            ctx.input(|i| (i.key_pressed(egui::Key::Escape), i.key_pressed(egui::Key::F1)));

        if toggle_scene {
            self.sim.toggle_scene();
        }
        if toggle_debug {
            self.sim.toggle_debug();
        }
    }

    fn draw_display(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click());
        let rect = response.rect;

        if rect != self.display_rect {
            if rect.size() != self.display_rect.size() {
                debug!("Display resized to {}x{}", rect.width(), rect.height());
                self.sim.resize(f64::from(rect.width()), f64::from(rect.height()));
            }
            self.display_rect = rect;
            self.background.clear();
        }

        let invalidated = self.sim.take_background_invalidated();
        if invalidated || self.background.is_empty() {
            self.background = scene::background_shapes(
                &self.airport,
                self.sim.active_scene(),
                self.sim.projection(),
                rect.min,
            );
        }

        painter.rect_filled(rect, 0.0, scene::background_color(self.sim.active_scene()));
        painter.extend(self.background.iter().cloned());

        let measure = data_block::PainterMeasure::new(&painter, self.font.clone());

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let local = pos - rect.min;
                let point = ScreenPoint::new(f64::from(local.x), f64::from(local.y));
                let outcome = self.sim.click(point, &measure);
                debug!("Click at ({}, {}) hit {:?}", local.x, local.y, outcome.hits);
            }
        }

        for view in self.sim.aircraft_views(&measure) {
            data_block::paint(&painter, rect.min, &view, &self.font);
        }

        self.draw_status(&painter, rect);
    }

    fn draw_status(&self, painter: &egui::Painter, rect: egui::Rect) {
        painter.text(
            rect.left_bottom() + egui::vec2(8.0, -8.0),
            egui::Align2::LEFT_BOTTOM,
            status_text(&self.sim),
            egui::FontId::monospace(12.0),
            egui::Color32::from_gray(140),
        );
    }
}

/// One-line summary of the scene and sweep clock shown under the display.
fn status_text(sim: &SimulationContext) -> String {
    let scene_label = match sim.active_scene() {
        Scene::Surface => "SURFACE",
        Scene::Radar => "RADAR",
    };
    let clock = sim.clock();
    let next = clock.interval().saturating_sub(clock.pending());
    let mut status = format!(
        "{scene_label}  FRAME {}  SWEEP {}  NEXT {:.1}s",
        clock.frames(),
        clock.sweeps(),
        next.as_secs_f64()
    );
    if sim.debug() {
        status.push_str("  DEBUG");
    }
    status
}

impl eframe::App for TowerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.sim.tick(elapsed);

        self.handle_keys(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.draw_display(ui);
            });

        // Pace the loop at the target frame rate
        ctx.request_repaint_after(self.frame_interval);
    }
}
