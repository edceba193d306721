#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(error) = wave_plane::run() {
        log::error!("Event loop failed: {error}");
        std::process::exit(1);
    }
}

// On the web the viewer starts from `wave_plane::start`, registered with `#[wasm_bindgen(start)]`.
#[cfg(target_arch = "wasm32")]
fn main() {}
