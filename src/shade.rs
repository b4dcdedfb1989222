//! Brightness computation and cell shading.
//!
//! A shader turns a rotated surface normal, the frame's light direction and
//! the sample's parameter coordinates into the content of one framebuffer
//! cell: a plain glyph, a tinted glyph, or a painted background color.

use nalgebra::Vector3;

use crate::surface::Sample;
use crate::texture::Texture;

/// 24-bit RGB color with ANSI escape rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const fn new(red: u8, green: u8, blue: u8) -> Color {
        Color { red, green, blue }
    }

    pub fn to_ansi_fore(self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.red, self.green, self.blue)
    }

    pub fn to_ansi_back(self) -> String {
        format!("\x1b[48;2;{};{};{}m", self.red, self.green, self.blue)
    }

    /// Scale each channel by `lighting`, saturating at the channel bounds.
    pub fn attenuate(self, lighting: f32) -> Color {
        let scale = |chan: u8| (chan as f32 * lighting).clamp(0.0, 255.0) as u8;
        Color::new(scale(self.red), scale(self.green), scale(self.blue))
    }

    pub fn is_black(self) -> bool {
        self.red == 0 && self.green == 0 && self.blue == 0
    }
}

/// Content of a single framebuffer cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Texel {
    /// Nothing written; renders as the background character.
    Blank,
    /// Uncolored character.
    Glyph(char),
    /// Character drawn in a foreground color.
    ColoredGlyph { chr: char, color: Color },
    /// Cell painted as a background-colored space.
    Painted(Color),
}

/// Lambertian brightness of a surface facing `light`, clamped to `[0, 1]`.
///
/// `light` must be pre-normalized; back-facing cells clamp to zero rather
/// than going negative.
pub fn brightness(normal: &Vector3<f32>, light: &Vector3<f32>) -> f32 {
    normal.dot(light).clamp(0.0, 1.0)
}

/// Maps shading inputs to cell content.
pub trait Shader: Send + Sync {
    fn shade(&self, normal: &Vector3<f32>, light: &Vector3<f32>, sample: &Sample) -> Texel;
}

/// Cosmetic two-color overlay keyed on the sample's first parameter.
///
/// Cells whose `uv.0` falls inside `band` take the `inside` color, all
/// others the `outside` color. Independent of luminosity.
#[derive(Debug, Clone, Copy)]
pub struct BandTint {
    pub band: (f32, f32),
    pub inside: Color,
    pub outside: Color,
}

/// Indexes an ordered sparse-to-dense character ramp by luminosity.
pub struct GlyphRamp {
    ramp: Vec<char>,
    floor: f32,
    tint: Option<BandTint>,
}

impl GlyphRamp {
    pub fn new(ramp: &str) -> GlyphRamp {
        let ramp: Vec<char> = ramp.chars().collect();
        assert!(!ramp.is_empty(), "glyph ramp must contain at least one character");
        GlyphRamp { ramp, floor: 0.0, tint: None }
    }

    /// Minimum luminosity, keeping back-facing cells from going fully dark.
    pub fn with_floor(mut self, floor: f32) -> GlyphRamp {
        self.floor = floor;
        self
    }

    pub fn with_tint(mut self, tint: BandTint) -> GlyphRamp {
        self.tint = Some(tint);
        self
    }

    fn glyph(&self, luminosity: f32) -> char {
        let last = self.ramp.len() - 1;
        let idx = ((luminosity * last as f32).floor() as usize).min(last);
        self.ramp[idx]
    }
}

impl Shader for GlyphRamp {
    fn shade(&self, normal: &Vector3<f32>, light: &Vector3<f32>, sample: &Sample) -> Texel {
        let luminosity = brightness(normal, light).max(self.floor);
        let chr = self.glyph(luminosity);
        match self.tint {
            None => Texel::Glyph(chr),
            Some(tint) => {
                let (lo, hi) = tint.band;
                let color = if sample.uv.0 > lo && sample.uv.0 < hi {
                    tint.inside
                } else {
                    tint.outside
                };
                Texel::ColoredGlyph { chr, color }
            }
        }
    }
}

/// Attenuates a base or textured color by luminosity.
pub struct ColorRamp {
    base: Color,
    texture: Option<Texture>,
    floor: f32,
}

impl ColorRamp {
    pub fn new(base: Color) -> ColorRamp {
        ColorRamp { base, texture: None, floor: 0.0 }
    }

    /// Sample cell color from a texture by the sample's uv instead of `base`.
    pub fn with_texture(mut self, texture: Texture) -> ColorRamp {
        self.texture = Some(texture);
        self
    }

    pub fn with_floor(mut self, floor: f32) -> ColorRamp {
        self.floor = floor;
        self
    }
}

impl Shader for ColorRamp {
    fn shade(&self, normal: &Vector3<f32>, light: &Vector3<f32>, sample: &Sample) -> Texel {
        let luminosity = brightness(normal, light).max(self.floor);
        let color = match &self.texture {
            Some(texture) => texture.get_at(sample.uv.0, sample.uv.1),
            None => self.base,
        };
        Texel::Painted(color.attenuate(luminosity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_at(u: f32, v: f32) -> Sample {
        Sample {
            position: Vector3::zeros(),
            normal: Vector3::z(),
            uv: (u, v),
        }
    }

    #[test]
    fn test_brightness_aligned_is_one() {
        let n = Vector3::new(0.0, 1.0, 0.0);
        assert!((brightness(&n, &n) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_brightness_opposed_clamps_to_zero() {
        let n = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(brightness(&n, &-n), 0.0);
    }

    #[test]
    fn test_ramp_endpoints() {
        let ramp = GlyphRamp::new(".:#");
        assert_eq!(ramp.glyph(0.0), '.');
        assert_eq!(ramp.glyph(1.0), '#');
        assert_eq!(ramp.glyph(0.4), ':');
    }

    #[test]
    fn test_ramp_floor_lifts_dark_cells() {
        let shader = GlyphRamp::new(".:#").with_floor(0.5);
        let light = Vector3::x();
        let texel = shader.shade(&-Vector3::x(), &light, &sample_at(0.0, 0.0));
        assert_eq!(texel, Texel::Glyph(':'));
    }

    #[test]
    fn test_band_tint_selects_by_first_parameter() {
        let tint = BandTint {
            band: (0.25, 0.75),
            inside: Color::new(89, 44, 4),
            outside: Color::new(173, 158, 95),
        };
        let shader = GlyphRamp::new(".:#").with_tint(tint);
        let light = Vector3::z();
        let inside = shader.shade(&Vector3::z(), &light, &sample_at(0.5, 0.0));
        let outside = shader.shade(&Vector3::z(), &light, &sample_at(0.9, 0.0));
        assert_eq!(inside, Texel::ColoredGlyph { chr: '#', color: tint.inside });
        assert_eq!(outside, Texel::ColoredGlyph { chr: '#', color: tint.outside });
    }

    #[test]
    fn test_attenuate_saturates() {
        let bright = Color::new(200, 10, 0).attenuate(2.0);
        assert_eq!(bright, Color::new(255, 20, 0));
        let dark = Color::new(200, 10, 0).attenuate(0.0);
        assert!(dark.is_black());
    }

    #[test]
    fn test_color_ramp_attenuates_base() {
        let shader = ColorRamp::new(Color::new(100, 200, 50));
        let light = Vector3::z();
        let texel = shader.shade(&Vector3::z(), &light, &sample_at(0.0, 0.0));
        assert_eq!(texel, Texel::Painted(Color::new(100, 200, 50)));
        let side = shader.shade(&Vector3::x(), &light, &sample_at(0.0, 0.0));
        assert_eq!(side, Texel::Painted(Color::new(0, 0, 0)));
    }
}
