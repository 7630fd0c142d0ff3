// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
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

//! Retroframe demo entry point
//!
//! This binary runs the demo shell: an animated test pattern composited
//! through the video layer, with the settings UI on top. It uses winit
//! for window management, wgpu for GPU acceleration, and egui for the UI.

use clap::Parser;
use retroframe::frontend::Application;
use winit::event_loop::EventLoop;

/// Demo shell for the Retroframe video layer
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Directory holding persisted settings and save slots
    #[arg(short, long, default_value = "retroframe-data")]
    data_dir: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Pick up RUST_LOG and friends from a local .env file, then
    // initialize logging
    dotenvy::dotenv().ok();
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting Retroframe demo...");

    // Parse command-line arguments
    let args = Args::parse();
    log::info!("Data directory: {}", args.data_dir);

    // Create event loop
    let event_loop = EventLoop::new()?;

    // Create application
    let mut app = Application::new(&args.data_dir);

    log::info!("Running event loop...");

    // Run application
    event_loop.run_app(&mut app)?;

    Ok(())
}
