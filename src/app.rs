//! # Application Core (`app.rs`)
//!
//! The `App` struct is the winit [`ApplicationHandler`] for the wave viewer. It creates the
//! window, brings up the [`Renderer`], routes pointer input to the orbit camera and drives the
//! redraw loop.
//!
//! ## Frame Loop
//!
//! There is no separate scheduler. Every handled window event ends with
//! [`Window::request_redraw`], and every `RedrawRequested`:
//!
//! 1. Ticks the [`AnimationClock`] to get the elapsed time for the shader.
//! 2. Runs the egui pass (the overlay is only laid out when visible).
//! 3. Hands both to [`Renderer::render_frame`].
//!
//! Presentation is vsync-paced by the surface, which throttles the loop to the display refresh
//! rate.
//!
//! ## Input
//!
//! | Input | Action |
//! |---|---|
//! | left drag | orbit around the target |
//! | middle drag | zoom (down is out, up is in) |
//! | right drag | pan the target |
//! | mouse wheel | zoom |
//! | `H` | toggle the overlay |
//! | `Escape` | quit |
//!
//! Events the overlay consumes (clicks on its window, for instance) never reach the camera.
//!
//! ## Platform-Specific Notes
//!
//! - **Desktop**: the renderer is created synchronously with `pollster`.
//! - **WebAssembly**: the window wraps the `<canvas id="canvas">` element and the renderer is
//!   created on a spawned future, then collected from a `oneshot` channel on a later event.

// `JsCast` (for `dyn_into`) comes in through the prelude, used to turn the DOM element into a
// canvas on the web.
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

// The window is shared between the app, egui state and the wgpu surface.
use std::sync::Arc;

// `web_time::Instant` behaves like `std::time::Instant` natively and uses `performance.now()` in
// the browser, where `std::time::Instant` panics.
use web_time::Instant;

use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
    window::{Theme, Window},
};

// Elapsed seconds for the shader's `time` uniform.
use crate::clock::AnimationClock;

// Default scene settings the renderer is built from.
use crate::config::SceneConfig;

// The debug window and the values it displays.
use crate::overlay::{self, OverlayStats};

// Owns the GPU and the scene; drawn into on every redraw.
use crate::renderer::Renderer;

/// Pixels of precise (touchpad) scrolling that count as one wheel notch.
const PIXELS_PER_SCROLL_STEP: f32 = 50.0;

/// Weight of the newest sample in the smoothed frame rate.
const FRAME_RATE_SMOOTHING: f32 = 0.1;

/// What a held pointer button does to the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragMode {
    Orbit,
    Dolly,
    Pan,
}

impl DragMode {
    /// The drag started by pressing `button`, if it controls the camera at all.
    fn for_button(button: MouseButton) -> Option<Self> {
        match button {
            MouseButton::Left => Some(Self::Orbit),
            MouseButton::Middle => Some(Self::Dolly),
            MouseButton::Right => Some(Self::Pan),
            _ => None,
        }
    }
}

/// Pointer state between cursor events.
#[derive(Debug, Default)]
struct PointerState {
    /// Last known cursor position in physical pixels.
    position: Option<PhysicalPosition<f64>>,

    /// The drag in progress, if any.
    drag: Option<DragMode>,
}

/// Main application structure for the wave viewer.
///
/// # Fields
///
/// - `window`: The window (or canvas) rendered into, created on the first `resumed`.
/// - `renderer`: GPU renderer and scene. `None` until set up, which on the web happens
///   asynchronously.
/// - `gui_state`: egui integration for the overlay.
/// - `clock`: Animation clock feeding the shader's time uniform.
/// - `last_render_time`: Instant of the previous frame, for the frame rate readout.
/// - `last_size`: Surface size in physical pixels.
/// - `overlay_visible`: Whether the overlay window is shown.
#[derive(Default)]
pub struct App {
    /// The main application window.
    ///
    /// On desktop platforms this is a native window. On WebAssembly it wraps the existing
    /// HTML canvas element.
    window: Option<Arc<Window>>,

    /// Renderer owning the GPU context and the scene.
    ///
    /// When this field is `None`, the application is not yet ready for rendering and window
    /// events are ignored.
    renderer: Option<Renderer>,

    /// egui state bound to the window.
    gui_state: Option<egui_winit::State>,

    /// Source of the elapsed time pushed to the shader each frame.
    clock: Option<AnimationClock>,

    /// Time of the last rendered frame.
    last_render_time: Option<Instant>,

    /// Receiver for the renderer built asynchronously on WebAssembly.
    #[cfg(target_arch = "wasm32")]
    renderer_receiver: Option<futures::channel::oneshot::Receiver<Renderer>>,

    /// Last known surface size `(width, height)` in physical pixels.
    last_size: (u32, u32),

    /// Whether the debug overlay is laid out this frame.
    overlay_visible: bool,

    /// Pointer position and drag state for the orbit camera.
    pointer: PointerState,

    /// Exponentially smoothed frames per second.
    frames_per_second: f32,
}

impl ApplicationHandler for App {
    /// Creates the window and starts renderer construction.
    ///
    /// Only the first call does any setup; later `resumed` events reuse the existing window.
    fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let mut attributes = Window::default_attributes();

        #[cfg(not(target_arch = "wasm32"))]
        {
            attributes = attributes.with_title("Wave Plane");
        }

        #[allow(unused_assignments)]
        #[cfg(target_arch = "wasm32")]
        let mut canvas_width = 0;

        #[allow(unused_assignments)]
        #[cfg(target_arch = "wasm32")]
        let mut canvas_height = 0;

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::WindowAttributesExtWebSys;
            let Some(canvas) = wgpu::web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.get_element_by_id("canvas"))
                .and_then(|element| {
                    element
                        .dyn_into::<wgpu::web_sys::HtmlCanvasElement>()
                        .ok()
                })
            else {
                log::error!("No <canvas id=\"canvas\"> element to render into");
                event_loop.exit();
                return;
            };
            canvas_width = canvas.width();
            canvas_height = canvas.height();
            self.last_size = (canvas_width, canvas_height);
            attributes = attributes.with_canvas(Some(canvas));
        }

        let window = match event_loop.create_window(attributes) {
            Ok(window) => window,
            Err(error) => {
                log::error!("Failed to create window: {error}");
                event_loop.exit();
                return;
            }
        };

        let window_handle = Arc::new(window);
        self.window = Some(window_handle.clone());

        let gui_context = egui::Context::default();

        #[cfg(not(target_arch = "wasm32"))]
        {
            let inner_size = window_handle.inner_size();
            self.last_size = (inner_size.width, inner_size.height);
        }

        #[cfg(target_arch = "wasm32")]
        {
            gui_context.set_pixels_per_point(window_handle.scale_factor() as f32);
        }

        let viewport_id = gui_context.viewport_id();
        let gui_state = egui_winit::State::new(
            gui_context,
            viewport_id,
            &window_handle,
            Some(window_handle.scale_factor() as _),
            Some(Theme::Dark),
            None,
        );

        let config = SceneConfig::default();

        #[cfg(not(target_arch = "wasm32"))]
        {
            let (width, height) = self.last_size;
            let renderer = pollster::block_on(Renderer::new(
                window_handle.clone(),
                width,
                height,
                &config,
            ));
            match renderer {
                Ok(renderer) => self.renderer = Some(renderer),
                Err(error) => {
                    log::error!("Failed to initialise renderer: {error}");
                    event_loop.exit();
                    return;
                }
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let (sender, receiver) = futures::channel::oneshot::channel();
            self.renderer_receiver = Some(receiver);
            log::info!("Canvas dimensions: ({canvas_width} x {canvas_height})");
            wasm_bindgen_futures::spawn_local(async move {
                match Renderer::new(window_handle.clone(), canvas_width, canvas_height, &config)
                    .await
                {
                    Ok(renderer) => {
                        if sender.send(renderer).is_err() {
                            log::error!("Failed to send renderer to the event loop");
                        }
                    }
                    Err(error) => log::error!("Failed to initialise renderer: {error}"),
                }
            });
        }

        self.gui_state = Some(gui_state);
        self.clock = Some(AnimationClock::start());
        self.last_render_time = Some(Instant::now());
        log::info!("Wave plane started");
    }

    /// Handles window events: input, resizing, closing and redraws.
    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        #[cfg(target_arch = "wasm32")]
        {
            let mut renderer_received = false;
            if let Some(receiver) = self.renderer_receiver.as_mut() {
                if let Ok(Some(renderer)) = receiver.try_recv() {
                    self.renderer = Some(renderer);
                    renderer_received = true;
                }
            }
            if renderer_received {
                self.renderer_receiver = None;
            }
        }

        let (Some(gui_state), Some(renderer), Some(window), Some(clock), Some(last_render_time)) = (
            self.gui_state.as_mut(),
            self.renderer.as_mut(),
            self.window.as_ref(),
            self.clock.as_mut(),
            self.last_render_time.as_mut(),
        ) else {
            return;
        };

        if gui_state.on_window_event(window, &event).consumed {
            // A press the overlay swallowed must not leave a drag running.
            self.pointer.drag = None;
            window.request_redraw();
            return;
        }

        let viewport_height = self.last_size.1 as f32;

        match event {
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match key_code {
                KeyCode::Escape => {
                    log::info!("Escape pressed. Exiting...");
                    event_loop.exit();
                }
                KeyCode::KeyH => {
                    self.overlay_visible = !self.overlay_visible;
                }
                _ => (),
            },

            WindowEvent::MouseInput { state, button, .. } => {
                match (state, DragMode::for_button(button)) {
                    (ElementState::Pressed, Some(mode)) => self.pointer.drag = Some(mode),
                    (ElementState::Released, Some(mode)) if self.pointer.drag == Some(mode) => {
                        self.pointer.drag = None;
                    }
                    _ => (),
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let (Some(mode), Some(last)) = (self.pointer.drag, self.pointer.position) {
                    let dx = (position.x - last.x) as f32;
                    let dy = (position.y - last.y) as f32;
                    let camera = &mut renderer.scene_mut().camera;
                    match mode {
                        DragMode::Orbit => camera.rotate(dx, dy, viewport_height),
                        DragMode::Dolly => camera.dolly_drag(dy),
                        DragMode::Pan => camera.pan(dx, dy, viewport_height),
                    }
                }
                self.pointer.position = Some(position);
            }

            WindowEvent::CursorLeft { .. } => {
                self.pointer.position = None;
                self.pointer.drag = None;
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(offset) => offset.y as f32 / PIXELS_PER_SCROLL_STEP,
                };
                if steps != 0.0 {
                    renderer.scene_mut().camera.dolly(steps);
                }
            }

            WindowEvent::Resized(PhysicalSize { width, height }) => {
                log::info!("Resizing renderer surface to: ({width}, {height})");
                renderer.resize(width, height);
                self.last_size = (width, height);
            }

            WindowEvent::CloseRequested => {
                log::info!("Close requested. Exiting...");
                event_loop.exit();
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let delta_time = (now - *last_render_time).as_secs_f32();
                *last_render_time = now;
                if delta_time > 0.0 {
                    let sample = 1.0 / delta_time;
                    self.frames_per_second = if self.frames_per_second == 0.0 {
                        sample
                    } else {
                        self.frames_per_second
                            + (sample - self.frames_per_second) * FRAME_RATE_SMOOTHING
                    };
                }

                let elapsed = clock.tick();

                let gui_input = gui_state.take_egui_input(window);
                gui_state.egui_ctx().begin_pass(gui_input);

                if self.overlay_visible {
                    let scene = renderer.scene();
                    let stats = OverlayStats {
                        elapsed,
                        frames_per_second: self.frames_per_second,
                        camera_distance: scene.camera.distance(),
                        palette: scene.palette,
                    };
                    let response = overlay::show(gui_state.egui_ctx(), &stats);
                    if response.reset_camera {
                        log::info!("Camera reset");
                        renderer.scene_mut().camera.reset();
                    }
                }

                let egui_winit::egui::FullOutput {
                    textures_delta,
                    shapes,
                    pixels_per_point,
                    platform_output,
                    ..
                } = gui_state.egui_ctx().end_pass();

                gui_state.handle_platform_output(window, platform_output);

                let paint_jobs = gui_state.egui_ctx().tessellate(shapes, pixels_per_point);

                let screen_descriptor = {
                    let (width, height) = self.last_size;
                    egui_wgpu::ScreenDescriptor {
                        size_in_pixels: [width, height],
                        pixels_per_point: window.scale_factor() as f32,
                    }
                };

                if let Err(error) =
                    renderer.render_frame(screen_descriptor, paint_jobs, textures_delta, elapsed)
                {
                    log::error!("Rendering failed: {error}");
                    event_loop.exit();
                    return;
                }
            }
            _ => (),
        }

        window.request_redraw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_map_to_orbit_controls() {
        assert_eq!(DragMode::for_button(MouseButton::Left), Some(DragMode::Orbit));
        assert_eq!(DragMode::for_button(MouseButton::Middle), Some(DragMode::Dolly));
        assert_eq!(DragMode::for_button(MouseButton::Right), Some(DragMode::Pan));
        assert_eq!(DragMode::for_button(MouseButton::Back), None);
    }
}
