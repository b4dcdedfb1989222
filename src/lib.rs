//! Software rasterizer for parametric surfaces on a terminal grid.
//!
//! Samples a parametric surface (cube, sphere, torus, planet), rotates it,
//! projects it onto a character grid with a per-cell depth test, and shades
//! each cell as a glyph or an ANSI 24-bit color. The render core performs no
//! I/O; [`terminal::TerminalDisplay`] is the display sink and a host drives
//! frames one at a time through [`renderer::Renderer::advance`].

pub mod buffer;
pub mod math;
pub mod renderer;
pub mod shade;
pub mod surface;
pub mod terminal;
pub mod texture;

pub use buffer::{DepthConvention, Framebuffer};
pub use renderer::{Camera, RenderConfig, Renderer};
pub use shade::{BandTint, Color, ColorRamp, GlyphRamp, Shader, Texel};
pub use surface::{Cube, Planet, Sample, Sphere, Surface, Torus};
pub use texture::Texture;

/// Coarse character ramp from sparse to dense.
pub const GLYPH_RAMP: &str = ".,:;+**?%%#@@";

/// Fine-grained ramp for smoothly lit surfaces.
pub const GLYPH_RAMP_FINE: &str =
    ".`^',:;Il!i~+_-?][}{1)(|\\/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$";
