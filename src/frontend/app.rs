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

//! Retroframe demo application
//!
//! This module provides the main application struct that manages the window,
//! event loop, rendering context, video layer, and UI.

use crate::core::config::VideoSettings;
use crate::core::controls::TouchLayout;
use crate::core::geom::Projection;
use crate::core::layer::VideoLayer;
use crate::core::render::Renderer;
use crate::core::slots::DirSlotStore;
use crate::core::source::{ContentSource, VideoSource};
use crate::frontend::frame_timer::FrameTimer;
use crate::frontend::pattern::TestPattern;
use crate::frontend::renderer::{RenderContext, WgpuCommands, WgpuRenderer};
use crate::frontend::ui::{UiAction, UiState};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

/// Width of the generated test pattern in pixels
const PATTERN_WIDTH: u32 = 256;
/// Height of the generated test pattern in pixels
const PATTERN_HEIGHT: u32 = 224;

/// Retroframe demo application
///
/// Manages the window, rendering context, video layer, and UI for the
/// demo shell. This struct orchestrates the event loop and handles user
/// input.
pub struct Application {
    /// The application window
    window: Option<Arc<Window>>,
    /// wgpu rendering context
    render_context: Option<RenderContext>,
    /// egui context for UI
    egui_ctx: egui::Context,
    /// egui-winit state for event handling
    egui_state: Option<egui_winit::State>,
    /// egui-wgpu renderer
    egui_renderer: Option<egui_wgpu::Renderer>,
    /// Renderer backing the video layer
    renderer: Option<Rc<RefCell<WgpuRenderer>>>,
    /// Compositing layer placing the content on screen
    layer: Option<VideoLayer>,
    /// Animated test pattern acting as the content source
    pattern: Option<Rc<RefCell<TestPattern>>>,
    /// Save-slot store rooted in the data directory
    slots: Option<DirSlotStore>,
    /// Active video settings
    settings: VideoSettings,
    /// Where the settings are persisted
    settings_path: PathBuf,
    /// Touch-control layout the placement must avoid
    touch: TouchLayout,
    /// Frame timer for 60 FPS pacing
    frame_timer: FrameTimer,
    /// Playback paused state
    paused: bool,
    /// Data directory for settings and save slots
    data_dir: PathBuf,
    /// UI state manager
    ui_state: UiState,
    /// Exit requested flag
    exit_requested: bool,
}

impl Application {
    /// Create a new Retroframe application
    ///
    /// Settings are loaded from `<data_dir>/settings.toml` when the file
    /// exists; otherwise the defaults apply. The save-slot store lives
    /// under `<data_dir>/slots`.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Directory holding persisted settings and save slots
    ///
    /// # Returns
    ///
    /// A new `Application` instance ready to be run with an event loop
    ///
    /// # Example
    ///
    /// ```no_run
    /// use winit::event_loop::EventLoop;
    /// use retroframe::frontend::Application;
    ///
    /// let event_loop = EventLoop::new().unwrap();
    /// let mut app = Application::new("retroframe-data");
    /// event_loop.run_app(&mut app).unwrap();
    /// ```
    pub fn new(data_dir: &str) -> Self {
        let egui_ctx = egui::Context::default();
        let data_dir = PathBuf::from(data_dir);
        let settings_path = data_dir.join("settings.toml");

        let settings = if settings_path.exists() {
            match VideoSettings::load(&settings_path) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!(
                        "Failed to load settings from {}: {}",
                        settings_path.display(),
                        e
                    );
                    VideoSettings::default()
                }
            }
        } else {
            VideoSettings::default()
        };

        Self {
            window: None,
            render_context: None,
            egui_ctx,
            egui_state: None,
            egui_renderer: None,
            renderer: None,
            layer: None,
            pattern: None,
            slots: None,
            settings,
            settings_path,
            touch: TouchLayout::default(),
            frame_timer: FrameTimer::new(60),
            paused: false,
            data_dir,
            ui_state: UiState::new(),
            exit_requested: false,
        }
    }

    /// Toggle pause/resume playback
    ///
    /// # Example
    ///
    /// ```no_run
    /// use retroframe::frontend::Application;
    ///
    /// let mut app = Application::new("retroframe-data");
    /// app.toggle_pause();
    /// ```
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::info!(
            "Playback {}",
            if self.paused { "paused" } else { "resumed" }
        );
    }

    /// Step one frame (when paused)
    ///
    /// Advances the content by exactly one frame when paused.
    /// Does nothing if playback is not paused.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use retroframe::frontend::Application;
    ///
    /// let mut app = Application::new("retroframe-data");
    /// app.toggle_pause(); // Pause first
    /// app.step_frame();   // Step one frame
    /// ```
    pub fn step_frame(&mut self) {
        if self.paused {
            if let Some(ref pattern) = self.pattern {
                pattern.borrow_mut().advance();
                // Request redraw
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
        }
    }

    /// Reset the video layer
    ///
    /// Drops every GPU resource the layer holds so the next frame
    /// rebuilds them from scratch.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use retroframe::frontend::Application;
    ///
    /// let mut app = Application::new("retroframe-data");
    /// app.reset_video();
    /// ```
    pub fn reset_video(&mut self) {
        if let Some(ref mut layer) = self.layer {
            layer.reset();
        }
    }

    /// Toggle fullscreen mode
    ///
    /// Switches between windowed and fullscreen mode.
    pub fn toggle_fullscreen(&mut self) {
        if let Some(window) = &self.window {
            let is_fullscreen = window.fullscreen().is_some();
            if is_fullscreen {
                window.set_fullscreen(None);
                log::info!("Switched to windowed mode");
            } else {
                window.set_fullscreen(Some(winit::window::Fullscreen::Borderless(None)));
                log::info!("Switched to fullscreen mode");
            }
        }
    }

    /// Push the active settings into the video layer and persist them
    fn apply_settings(&mut self) {
        self.settings = self.settings.clone().sanitized();
        if let Some(ref mut layer) = self.layer {
            layer.apply_settings(&self.settings);
        }
        if let Err(e) = self.settings.save(&self.settings_path) {
            log::error!("Failed to save settings: {}", e);
        }
    }

    /// Handle UI action
    ///
    /// Processes actions triggered from the UI (menu bar, buttons, etc.)
    fn handle_ui_action(&mut self, action: UiAction) {
        match action {
            UiAction::None => {}
            UiAction::TogglePause => {
                self.toggle_pause();
            }
            UiAction::StepFrame => {
                self.step_frame();
            }
            UiAction::ResetVideo => {
                self.reset_video();
            }
            UiAction::ToggleFullscreen => {
                self.toggle_fullscreen();
            }
            UiAction::ApplySettings => {
                self.apply_settings();
            }
            UiAction::ImportSettings => {
                self.open_import_dialog();
            }
            UiAction::ExportSettings => {
                self.open_export_dialog();
            }
            UiAction::Exit => {
                // Set exit flag - will be handled in the event loop
                self.exit_requested = true;
                log::info!("Exit requested from UI");
            }
        }
    }

    /// Open a file dialog and import settings from the picked file
    fn open_import_dialog(&mut self) {
        let path = rfd::FileDialog::new()
            .add_filter("Settings", &["toml", "TOML"])
            .set_title("Import video settings")
            .pick_file();

        if let Some(path) = path {
            match VideoSettings::load(&path) {
                Ok(settings) => {
                    self.settings = settings;
                    self.apply_settings();
                    log::info!("Imported settings from {}", path.display());
                }
                Err(e) => {
                    log::error!("Failed to import settings: {}", e);
                }
            }
        }
    }

    /// Open a file dialog and export the active settings
    fn open_export_dialog(&mut self) {
        let path = rfd::FileDialog::new()
            .add_filter("Settings", &["toml", "TOML"])
            .set_title("Export video settings")
            .set_file_name("settings.toml")
            .save_file();

        if let Some(path) = path {
            match self.settings.save(&path) {
                Ok(()) => log::info!("Exported settings to {}", path.display()),
                Err(e) => log::error!("Failed to export settings: {}", e),
            }
        }
    }

    /// Render a frame
    ///
    /// This method handles:
    /// 1. Getting the next surface texture
    /// 2. Placing the video layer for the current viewport
    /// 3. Running the egui UI code with performance metrics
    /// 4. Drawing the video layer, then egui on top
    /// 5. Presenting the frame
    fn render(&mut self) -> Result<(), String> {
        let window = self.window.as_ref().ok_or("Window not initialized")?;
        let render_context = self
            .render_context
            .as_mut()
            .ok_or("Render context not initialized")?;
        let egui_state = self
            .egui_state
            .as_mut()
            .ok_or("egui state not initialized")?;
        let egui_renderer = self
            .egui_renderer
            .as_mut()
            .ok_or("egui renderer not initialized")?;
        let renderer = self.renderer.as_ref().ok_or("Renderer not initialized")?;
        let layer = self.layer.as_mut().ok_or("Video layer not initialized")?;
        let slots = self.slots.as_mut().ok_or("Slot store not initialized")?;

        // Get the next frame, handling common surface errors gracefully
        let output = match render_context.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                // Reconfigure the surface to the current size and skip this frame
                render_context.resize(
                    render_context.surface_config.width,
                    render_context.surface_config.height,
                );
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                // Non-fatal; skip this frame
                log::warn!("Surface timeout while acquiring frame");
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                // Treat as fatal and propagate up
                return Err("Surface out of memory while acquiring frame".to_string());
            }
            Err(e) => {
                // Catch-all for any other surface error (e.g. `Other`)
                log::error!("Unexpected surface error: {:?}", e);
                return Err(format!("Failed to get surface texture: {:?}", e));
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Place the content for the current viewport before the UI reads
        // the resulting rectangle for the status bar
        let viewport = render_context.viewport();
        let proj = Projection::new(viewport);
        layer.place(viewport, &proj, &self.settings, Some(&self.touch));

        // Begin egui frame
        let raw_input = egui_state.take_egui_input(window);
        let paused = self.paused;

        // Track UI actions
        let mut ui_action = UiAction::None;

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            // Render the settings UI (menu bar, status bar, panels)
            ui_action = self.ui_state.render(
                ctx,
                &mut self.settings,
                &mut self.touch.enabled,
                slots,
                layer,
                &self.frame_timer,
                paused,
            );
        });

        // Handle platform output (e.g., cursor changes)
        egui_state.handle_platform_output(window, full_output.platform_output);

        // Prepare egui rendering
        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        // Upload egui textures
        for (id, image_delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(
                &render_context.device,
                &render_context.queue,
                *id,
                image_delta,
            );
        }

        // Update egui vertex/index buffers
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [
                render_context.surface_config.width,
                render_context.surface_config.height,
            ],
            pixels_per_point: window.scale_factor() as f32,
        };

        // Draw the video layer first and submit it, so its fences are
        // registered against the content batch alone
        let (width, height) = render_context.surface_size();
        let mut cmds = WgpuCommands::new(Rc::clone(renderer), view.clone(), width, height);
        layer.draw(&mut cmds);
        cmds.submit();

        // Record egui on its own encoder, loading the composited content
        let mut encoder =
            render_context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Render Encoder"),
                });

        // Update egui buffers
        egui_renderer.update_buffers(
            &render_context.device,
            &render_context.queue,
            &mut encoder,
            &tris,
            &screen_descriptor,
        );

        // Render egui on top of the video layer
        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load, // Load the composited content
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Forget lifetime to make render pass 'static as required by egui-wgpu 0.33
            let mut render_pass = render_pass.forget_lifetime();

            // Render egui
            egui_renderer.render(&mut render_pass, &tris, &screen_descriptor);
        }

        // Submit commands
        render_context
            .queue
            .submit(std::iter::once(encoder.finish()));

        // Free egui textures
        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }

        // Present frame
        output.present();

        // Handle UI actions after all borrows are released
        self.handle_ui_action(ui_action);

        Ok(())
    }
}

impl Default for Application {
    fn default() -> Self {
        // Default data directory (users should provide this via command line)
        Self::new("retroframe-data")
    }
}

impl ApplicationHandler for Application {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Create window if it doesn't exist
        if self.window.is_none() {
            let window_attributes = Window::default_attributes()
                .with_title("Retroframe")
                .with_inner_size(winit::dpi::LogicalSize::new(800, 600))
                .with_resizable(true);

            let window = Arc::new(
                event_loop
                    .create_window(window_attributes)
                    .expect("Failed to create window"),
            );

            // Initialize rendering context
            let render_context =
                pollster::block_on(RenderContext::new(&window)).expect("Failed to create renderer");

            // Initialize egui-winit state
            let egui_state = egui_winit::State::new(
                self.egui_ctx.clone(),
                egui::ViewportId::ROOT,
                &window,
                Some(window.scale_factor() as f32),
                None,
                None,
            );

            // Initialize egui-wgpu renderer
            let egui_renderer = egui_wgpu::Renderer::new(
                &render_context.device,
                render_context.surface_config.format,
                egui_wgpu::RendererOptions::default(),
            );

            // Initialize the video pipeline: renderer, content source, layer
            let renderer = Rc::new(RefCell::new(WgpuRenderer::new(
                &render_context.device,
                &render_context.queue,
                render_context.surface_config.format,
            )));
            renderer.borrow_mut().compile_quad_programs();

            let pattern = Rc::new(RefCell::new(TestPattern::new(
                PATTERN_WIDTH,
                PATTERN_HEIGHT,
            )));
            pattern
                .borrow_mut()
                .connect(Rc::clone(&renderer) as Rc<RefCell<dyn Renderer>>);

            let mut layer = VideoLayer::new(
                Rc::clone(&pattern) as Rc<RefCell<dyn VideoSource>>,
                Rc::clone(&pattern) as Rc<RefCell<dyn ContentSource>>,
                Rc::clone(&renderer) as Rc<RefCell<dyn Renderer>>,
            );
            layer.apply_settings(&self.settings);

            // Initialize the save-slot store
            let slots = DirSlotStore::new(self.data_dir.join("slots"))
                .expect("Failed to open save-slot store");

            #[cfg(feature = "audio")]
            {
                let format = crate::frontend::audio::native_format();
                log::info!(
                    "Audio output: {} Hz, {} channels, {:?} samples",
                    format.rate,
                    format.channels,
                    format.sample_format
                );
            }

            self.window = Some(window);
            self.render_context = Some(render_context);
            self.egui_state = Some(egui_state);
            self.egui_renderer = Some(egui_renderer);
            self.renderer = Some(renderer);
            self.layer = Some(layer);
            self.pattern = Some(pattern);
            self.slots = Some(slots);

            log::info!("Application initialized successfully");
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        // Let egui handle the event first
        if let Some(egui_state) = &mut self.egui_state {
            if let Some(window) = &self.window {
                let response = egui_state.on_window_event(window, &event);
                if response.consumed {
                    return; // egui consumed the event
                }
            }
        }

        // Handle window events
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(render_context) = &mut self.render_context {
                    render_context.resize(physical_size.width, physical_size.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    // Hotkeys act on press only
                    if event.state.is_pressed() {
                        match key_code {
                            KeyCode::Space => {
                                self.toggle_pause();
                            }
                            KeyCode::F10 => {
                                self.step_frame();
                            }
                            KeyCode::F5 => {
                                self.reset_video();
                            }
                            KeyCode::F11 => {
                                self.toggle_fullscreen();
                            }
                            _ => {}
                        }
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.render() {
                    log::error!("Render error: {}", e);
                    event_loop.exit();
                }
            }
            _ => {}
        }

        // Check if exit was requested from UI
        if self.exit_requested {
            log::info!("Exiting application");
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Main animation loop - runs at 60 FPS
        if !self.paused && self.frame_timer.should_run_frame() {
            // Advance the test pattern
            if let Some(ref pattern) = self.pattern {
                pattern.borrow_mut().advance();
            }

            // Update frame timer
            self.frame_timer.tick();

            // Request redraw
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }

        // Set control flow based on playback state to avoid busy-waiting
        if self.paused {
            // When paused, wait for events (keyboard input, etc.)
            event_loop.set_control_flow(winit::event_loop::ControlFlow::Wait);
        } else {
            // When running, wake up at the next frame time for 60 FPS pacing
            let next_frame = self.frame_timer.next_frame_instant();
            event_loop.set_control_flow(winit::event_loop::ControlFlow::WaitUntil(next_frame));
        }
    }
}
