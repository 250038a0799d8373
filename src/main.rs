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

mod app;
mod config;
mod ui;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use eframe::egui;
use log::{error, info, warn};
use tower_core::{AirportConfig, Scene, SimulationContext, Viewport};

use app::TowerApp;
use config::AppConfig;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Airport surface and radar traffic display
#[derive(Parser, Debug)]
#[command(name = "tower-atc", version, about)]
struct Cli {
    /// Airport document to load (overrides the settings file)
    #[arg(long, value_name = "PATH")]
    airport: Option<PathBuf>,

    /// Show altitude in aircraft data blocks
    #[arg(long)]
    debug: bool,

    /// Target frames per second
    #[arg(long, value_name = "FPS", value_parser = clap::value_parser!(u32).range(1..=240))]
    frame_rate: Option<u32>,

    /// Start in the radar scene instead of the surface scene
    #[arg(long)]
    radar: bool,

    /// Write --airport, --frame-rate, --debug and --radar to the settings file
    #[arg(long)]
    save: bool,

    /// Print the settings file location and exit
    #[arg(long)]
    print_config_path: bool,
}

impl Cli {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(path) = &self.airport {
            config.airport_path.clone_from(path);
        }
        if let Some(frame_rate) = self.frame_rate {
            config.frame_rate = frame_rate;
        }
        if self.debug {
            config.start_in_debug = true;
        }
        if self.radar {
            config.start_in_radar = true;
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if cli.print_config_path {
        return match AppConfig::get_config_path() {
            Ok(path) => {
                println!("{}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Failed to resolve settings path: {e}");
                ExitCode::FAILURE
            }
        };
    }

    info!("Starting Tower ATC...");

    let mut config = AppConfig::load_or_default();
    cli.apply(&mut config);
    if cli.save {
        match config.save() {
            Ok(()) => info!("Settings saved"),
            Err(e) => warn!("Failed to save settings: {e}"),
        }
    }

    let airport = match AirportConfig::load(&config.airport_path) {
        Ok(airport) => airport,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let viewport = Viewport::new(f64::from(config.window_width), f64::from(config.window_height));
    let mut sim = match SimulationContext::new(&airport, viewport, config.sweep_interval()) {
        Ok(sim) => sim,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    sim.set_debug(config.start_in_debug);
    if config.start_in_radar {
        sim.set_scene(Scene::Radar);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_resizable(true)
            .with_title("Tower ATC"),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Tower ATC",
        options,
        Box::new(move |_cc| Ok(Box::new(TowerApp::new(sim, airport, &config)))),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Display loop failed: {e}");
            ExitCode::FAILURE
        }
    }
}
