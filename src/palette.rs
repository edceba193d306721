//! # Palette
//!
//! The five fixed colors the wave surface blends between.
//!
//! Colors are stored as their original `0xRRGGBB` values and converted to floats by dividing
//! each channel by 255. No sRGB to linear conversion is applied: the surface is configured with
//! a non-sRGB format and the shader writes these values straight to the framebuffer.
//!
//! Only the first [`Palette::BLENDED`] entries take part in the color blend. The remaining two
//! are still uploaded with the uniforms so the shader always sees five colors, but nothing in the
//! blend loop reads them.

use nalgebra_glm as glm;

/// Number of entries in every palette.
pub const PALETTE_LEN: usize = 5;

/// The palette as hex values, in blend order.
pub const PALETTE_HEX: [u32; PALETTE_LEN] = [0xfe4a49, 0xfed766, 0x009fb7, 0xe6e6ea, 0xf4f4f8];

/// Converts a `0xRRGGBB` value into an RGB vector with channels in `[0, 1]`.
pub fn hex_to_rgb(hex: u32) -> glm::Vec3 {
    let [_, r, g, b] = hex.to_be_bytes();
    glm::vec3(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

/// An ordered set of exactly five colors.
///
/// The fixed-size array makes the entry count part of the type, so a palette with a
/// different number of colors cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    hex: [u32; PALETTE_LEN],
}

impl Palette {
    /// Number of palette entries.
    pub const LEN: usize = PALETTE_LEN;

    /// Number of leading entries read by the color blend.
    pub const BLENDED: usize = 3;

    /// Builds a palette from five `0xRRGGBB` values, in blend order.
    ///
    /// # Parameters
    ///
    /// - `hex`: The colors. Only the first [`Palette::BLENDED`] take part in the blend; the rest are
    ///   still uploaded with the uniforms.
    pub const fn from_hex(hex: [u32; PALETTE_LEN]) -> Self {
        Self { hex }
    }

    /// The `0xRRGGBB` value of entry `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= Palette::LEN`.
    pub fn hex(&self, index: usize) -> u32 {
        self.hex[index]
    }

    /// The RGB color of entry `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= Palette::LEN`.
    pub fn color(&self, index: usize) -> glm::Vec3 {
        hex_to_rgb(self.hex[index])
    }

    /// Whether entry `index` influences the blended surface color.
    pub fn is_blended(index: usize) -> bool {
        index < Self::BLENDED
    }

    /// All five colors as `vec4` rows with alpha 1, in the layout the shader expects.
    pub fn to_uniform(&self) -> [[f32; 4]; PALETTE_LEN] {
        self.hex.map(|hex| {
            let rgb = hex_to_rgb(hex);
            [rgb.x, rgb.y, rgb.z, 1.0]
        })
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_hex(PALETTE_HEX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_channels_are_divided_by_255() {
        let rgb = hex_to_rgb(0xfe4a49);
        assert_eq!(rgb, glm::vec3(254.0 / 255.0, 74.0 / 255.0, 73.0 / 255.0));

        let teal = hex_to_rgb(0x009fb7);
        assert_eq!(teal.x, 0.0);
        assert_eq!(teal.y, 159.0 / 255.0);
        assert_eq!(teal.z, 183.0 / 255.0);
    }

    #[test]
    fn default_palette_keeps_original_order() {
        let palette = Palette::default();
        for (index, hex) in PALETTE_HEX.iter().enumerate() {
            assert_eq!(palette.hex(index), *hex);
        }
    }

    #[test]
    fn only_first_three_entries_are_blended() {
        let blended: Vec<usize> = (0..Palette::LEN).filter(|&i| Palette::is_blended(i)).collect();
        assert_eq!(blended, vec![0, 1, 2]);
    }

    #[test]
    fn uniform_rows_carry_opaque_alpha() {
        let rows = Palette::default().to_uniform();
        assert_eq!(rows.len(), 5);
        for (index, row) in rows.iter().enumerate() {
            let rgb = Palette::default().color(index);
            assert_eq!(row, &[rgb.x, rgb.y, rgb.z, 1.0]);
        }
    }
}
