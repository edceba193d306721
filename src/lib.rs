//! # Wave Plane Library
//!
//! This library renders a single animated wave surface with wgpu: a 40×40 plane, subdivided
//! into 128×128 segments, whose vertices are lifted by layered 3D simplex noise in a vertex
//! shader and colored by blending a five-color palette with further noise layers. An orbit
//! camera lets the user look around the surface. It runs natively through winit and in the
//! browser as WebAssembly.
//!
//! ## Modules
//!
//! - [`app`]: winit application handler, input routing and the redraw loop.
//! - [`renderer`]: Per-frame encoding, presentation and surface error recovery.
//! - [`gpu`]: Instance, adapter, device and surface setup.
//! - [`scene`]: Composes the plane mesh, wave material and camera.
//! - [`plane`]: Generates the subdivided plane geometry.
//! - [`vertex`]: The vertex format and its buffer layout.
//! - [`uniform_buffer`]: Per-frame shader inputs (`WaveUniforms`).
//! - [`uniform_binding`]: Buffer and bind group exposing the uniforms to the shader.
//! - [`camera`]: Orbit camera with rotate, zoom and pan.
//! - [`clock`]: Monotonic animation clock.
//! - [`palette`]: The five fixed surface colors.
//! - [`noise`]: CPU implementation of the shader's 3D simplex noise.
//! - [`surface`]: CPU reference of the shader's displacement and color blend.
//! - [`overlay`]: egui debug window.
//! - [`config`]: Visual constants of the scene.
//! - [`error`]: Render error type.
//!
//! ## Data Flow
//!
//! Once per frame the [`AnimationClock`] produces the elapsed time, [`Scene::update`] writes it
//! into the uniform buffer along with the camera matrix and palette, the vertex stage displaces
//! each vertex and computes its color, and the fragment stage writes the interpolated color with
//! full opacity.
//!
//! ## Dependencies
//!
//! - `wgpu`: GPU device, pipelines and presentation.
//! - `winit`: Window and event management.
//! - `egui`, `egui-wgpu`, `egui-winit`: Debug overlay.
//! - `nalgebra-glm`: Vector and matrix math, on the CPU side of the shader.
//! - `log` with `env_logger` (native) or `console_log` (web): Logging.
//! - `thiserror`: Error type.
//!
//! ## Running
//!
//! ```sh
//! RUST_LOG=info cargo run --release
//! ```

pub mod app;
pub mod camera;
pub mod clock;
pub mod config;
pub mod error;
pub mod gpu;
pub mod noise;
pub mod overlay;
pub mod palette;
pub mod plane;
pub mod renderer;
pub mod scene;
pub mod surface;
pub mod uniform_binding;
pub mod uniform_buffer;
pub mod vertex;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub use crate::app::App;
pub use crate::camera::OrbitCamera;
pub use crate::clock::AnimationClock;
pub use crate::config::{CameraConfig, PlaneConfig, SceneConfig};
pub use crate::error::RenderError;
pub use crate::gpu::Gpu;
pub use crate::palette::Palette;
pub use crate::plane::PlaneGeometry;
pub use crate::renderer::Renderer;
pub use crate::scene::Scene;
pub use crate::uniform_binding::UniformBinding;
pub use crate::uniform_buffer::WaveUniforms;
pub use crate::vertex::Vertex;

/// The source code of the wave shader, written in WGSL.
///
/// ### Uniform
///
/// `@group(0) @binding(0)` holds [`WaveUniforms`]: the view-projection matrix, the five palette
/// colors and the elapsed time.
///
/// ### Vertex Stage
///
/// `vertex_main` takes the rest position (`@location(0)`) and UV (`@location(1)`) of a plane
/// vertex. It raises `z` by the noise displacement and bias terms, blends the first three
/// palette colors with three further noise samples, and outputs the clip-space position and
/// the color.
///
/// ### Fragment Stage
///
/// `fragment_main` writes the interpolated color with alpha `1.0`.
///
/// The CPU functions in [`noise`] and [`surface`] implement the same arithmetic.
pub const SHADER_SOURCE: &str = include_str!("wave.wgsl");

/// Runs the viewer on a native window until it is closed.
///
/// Logging goes through `env_logger`; set `RUST_LOG` to choose the level.
///
/// # Errors
///
/// Returns an error if the event loop cannot be created or fails while running.
#[cfg(not(target_arch = "wasm32"))]
pub fn run() -> Result<(), winit::error::EventLoopError> {
    env_logger::init();
    let event_loop = winit::event_loop::EventLoop::new()?;
    let mut app = App::default();
    event_loop.run_app(&mut app)
}

/// Web entry point: attaches the viewer to `<canvas id="canvas">`.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    use winit::platform::web::EventLoopExtWebSys;

    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    console_log::init_with_level(log::Level::Info)
        .map_err(|error| JsValue::from_str(&error.to_string()))?;

    let event_loop = winit::event_loop::EventLoop::new()
        .map_err(|error| JsValue::from_str(&error.to_string()))?;
    event_loop.spawn_app(App::default());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_declares_entry_points_and_uniforms() {
        assert!(SHADER_SOURCE.contains("fn vertex_main("));
        assert!(SHADER_SOURCE.contains("fn fragment_main("));
        assert!(SHADER_SOURCE.contains("fn snoise3("));
        assert!(SHADER_SOURCE.contains("palette: array<vec4<f32>, 5>"));
        assert!(SHADER_SOURCE.contains("@location(0) position: vec3<f32>"));
        assert!(SHADER_SOURCE.contains("@location(1) uv: vec2<f32>"));
    }

    #[test]
    fn shader_uses_the_surface_coefficients() {
        for coefficient in [
            "uv * vec2<f32>(6.0, 8.0)",
            "-1.5 * uv.y",
            "uv.x * 5.0",
            "mix(2.0, 2.75, uv.y)",
            "time * 0.03",
            "time * 0.1",
            "noise * 2.0",
            "0.01 + layer * 0.04",
            "0.01 + layer * 0.001",
            "1.0 + layer * 12.0",
            "vec2<f32>(0.5, 1.0)",
            "i < 3",
        ] {
            assert!(
                SHADER_SOURCE.contains(coefficient),
                "shader is missing `{coefficient}`"
            );
        }
    }

    #[test]
    fn shader_noise_uses_the_simplex_constants() {
        for constant in [
            "x - floor(x * (1.0 / 289.0)) * 289.0",
            "((x * 34.0) + 1.0) * x",
            "i.z + vec4<f32>(0.0, i1.z, i2.z, 1.0))",
            "+ i.x + vec4<f32>(0.0, i1.x, i2.x, 1.0));",
            "1.7928429 - 0.8537347 * r",
            "vec2<f32>(1.0 / 6.0, 1.0 / 3.0)",
            "let n_ = 0.14285715;",
            "max(0.6 - vec4<f32>(dot(x0, x0), dot(x1, x1), dot(x2, x2), dot(x3, x3)), vec4<f32>(0.0))",
            "return 42.0 * dot(m * m,",
        ] {
            assert!(
                SHADER_SOURCE.contains(constant),
                "shader noise is missing `{constant}`"
            );
        }
    }
}
