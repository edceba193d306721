//! # Debug Overlay
//!
//! A small egui window drawn over the wave when toggled on with `H`.
//!
//! It reports the animation clock, frame rate and camera distance, samples the surface at the
//! plane centre with the CPU reference in [`surface`](crate::surface), and lists the palette.
//! Palette entries that do not take part in the color blend are marked as unused.

use nalgebra_glm as glm;

use crate::palette::Palette;
use crate::surface;

/// Values shown by the overlay for the current frame.
#[derive(Debug, Clone, Copy)]
pub struct OverlayStats {
    pub elapsed: f32,
    pub frames_per_second: f32,
    pub camera_distance: f32,
    pub palette: Palette,
}

/// What the user asked for through the overlay this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayResponse {
    pub reset_camera: bool,
}

/// Lays out the overlay window for this frame.
pub fn show(ctx: &egui::Context, stats: &OverlayStats) -> OverlayResponse {
    let mut response = OverlayResponse::default();

    let center = glm::vec2(0.5, 0.5);
    let height = surface::displace(glm::Vec3::zeros(), center, stats.elapsed).z;
    let color = surface::blend_color(center, stats.elapsed, &stats.palette);

    egui::Window::new("Wave Plane")
        .resizable(false)
        .show(ctx, |ui| {
            egui::Grid::new("wave_stats").num_columns(2).show(ui, |ui| {
                ui.label("Time");
                ui.label(format!("{:.2} s", stats.elapsed));
                ui.end_row();

                ui.label("Frame rate");
                ui.label(format!("{:.0} fps", stats.frames_per_second));
                ui.end_row();

                ui.label("Camera distance");
                ui.label(format!("{:.2}", stats.camera_distance));
                ui.end_row();

                ui.label("Centre height");
                ui.label(format!("{height:.3}"));
                ui.end_row();

                ui.label("Centre color");
                ui.label(format!("({:.2}, {:.2}, {:.2})", color.x, color.y, color.z));
                ui.end_row();
            });

            ui.separator();
            ui.heading("Palette");
            for index in 0..Palette::LEN {
                let [_, r, g, b] = stats.palette.hex(index).to_be_bytes();
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::from_rgb(r, g, b), "■■■");
                    ui.monospace(format!("#{:06x}", stats.palette.hex(index)));
                    if !Palette::is_blended(index) {
                        ui.weak("unused");
                    }
                });
            }

            ui.separator();
            if ui.button("Reset camera").clicked() {
                response.reset_camera = true;
            }
            ui.weak("Drag to orbit, right-drag to pan, scroll to zoom. H hides this window.");
        });

    response
}
