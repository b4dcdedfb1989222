//! Spinning parametric surfaces in the terminal.
//!
//! Drives the render core at a fixed cadence and presents each frame
//! through the crossterm display. Controls: space pauses, `r` resets the
//! rotation, `q` or Escape quits.

use std::f32::consts::TAU;
use std::path::{Path, PathBuf};
use std::thread::sleep;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use nalgebra::{Point3, Vector3};

use termraster::terminal::{parse_key_event, Action, TerminalDisplay};
use termraster::{
    BandTint, Camera, Color, ColorRamp, Cube, DepthConvention, GlyphRamp, Planet, RenderConfig,
    Renderer, Sphere, Texture, Torus, GLYPH_RAMP, GLYPH_RAMP_FINE,
};

#[derive(Parser)]
#[command(name = "termraster", about = "Spinning parametric surfaces in the terminal")]
struct Args {
    /// Surface to render
    #[arg(value_enum, default_value_t = Shape::Torus)]
    shape: Shape,

    /// Frame delay in milliseconds
    #[arg(long, default_value_t = 30)]
    delay: u64,

    /// Texture map for the planet (R;G;B text grid, see texgen)
    #[arg(long)]
    texture: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Shape {
    Cube,
    Sphere,
    Torus,
    Planet,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.texture.is_some() && args.shape != Shape::Planet {
        log::warn!("--texture only applies to the planet surface, ignoring");
    }

    let mut terminal = TerminalDisplay::new().context("failed to initialize terminal")?;
    let (width, height) = terminal.size();
    log::info!("rendering {:?} on a {}x{} grid", args.shape, width, height);

    let mut renderer = build_renderer(args.shape, width, height, args.texture.as_deref())?;
    let status = format!(
        "{:?} | space pause | r reset | q quit",
        args.shape
    );
    let delay = Duration::from_millis(args.delay);
    let mut paused = false;

    loop {
        if terminal.check_resize() {
            let (width, height) = terminal.size();
            renderer = build_renderer(args.shape, width, height, args.texture.as_deref())?;
        }

        if let Some(key_event) = terminal.poll_input(Duration::from_millis(1))? {
            match parse_key_event(key_event) {
                Action::Quit => break,
                Action::Pause => paused = !paused,
                Action::Reset => {
                    let (width, height) = terminal.size();
                    renderer = build_renderer(args.shape, width, height, args.texture.as_deref())?;
                }
                Action::None => {}
            }
        }

        if !paused {
            renderer.advance();
        }
        terminal.present(&renderer.frame(), &status)?;
        sleep(delay);
    }

    Ok(())
}

/// Per-shape configuration, carrying the tuned constants of each demo
/// scaled to the live terminal size.
fn build_renderer(
    shape: Shape,
    width: usize,
    height: usize,
    texture: Option<&Path>,
) -> Result<Renderer> {
    let (w, h) = (width.max(10) as f32, height.max(10) as f32);
    let renderer = match shape {
        Shape::Cube => Renderer::new(
            RenderConfig {
                width,
                height,
                camera: Camera::looking_at(Point3::new(0.0, 0.0, -350.0), Point3::origin()),
                light: Vector3::new(1.0, 0.5, -0.5),
                scale: (1.25 * w, 2.5 * h),
                rotation_delta: Vector3::new(0.01, 0.04, 0.005),
                depth: DepthConvention::Inverse,
                ..RenderConfig::default()
            },
            Box::new(Cube::new(30.0).with_step(1.2)),
            Box::new(GlyphRamp::new(GLYPH_RAMP_FINE)),
        ),
        Shape::Sphere => Renderer::new(
            RenderConfig {
                width,
                height,
                camera: Camera::looking_at(Point3::new(20.0, 0.0, 0.0), Point3::origin()),
                light: Vector3::new(1.0, 0.8, 0.4),
                scale: (0.6 * w, 0.62 * h),
                rotation_delta: Vector3::new(0.0, 0.03, 0.01),
                depth: DepthConvention::Linear,
                ..RenderConfig::default()
            },
            Box::new(Sphere::new(12.0, Point3::origin()).with_steps(0.01, 0.03)),
            Box::new(GlyphRamp::new(GLYPH_RAMP_FINE)),
        ),
        Shape::Torus => Renderer::new(
            RenderConfig {
                width,
                height,
                camera: Camera::looking_at(Point3::new(0.0, 0.0, -250.0), Point3::origin()),
                light: Vector3::new(-2.0, 3.0, 3.0),
                scale: (w / 3.0, h),
                rotation: Vector3::new(TAU / 8.0, TAU / 2.0, 0.0),
                rotation_delta: Vector3::new(0.04, 0.07, 0.02),
                depth: DepthConvention::Inverse,
                ..RenderConfig::default()
            },
            Box::new(Torus::new(50.0, 25.0)),
            Box::new(GlyphRamp::new(GLYPH_RAMP).with_tint(BandTint {
                band: (1.0 / 16.0, 0.5),
                inside: Color::new(89, 44, 4),
                outside: Color::new(173, 158, 95),
            })),
        ),
        Shape::Planet => {
            let mut shader = ColorRamp::new(Color::new(0, 255, 255)).with_floor(0.5);
            if let Some(path) = texture {
                let map = Texture::from_file(path)
                    .with_context(|| format!("failed to load texture {}", path.display()))?;
                shader = shader.with_texture(map);
            }
            Renderer::new(
                RenderConfig {
                    width,
                    height,
                    camera: Camera::looking_at(Point3::new(-120.0, 0.0, 0.0), Point3::origin())
                        .with_up(Vector3::z()),
                    light: Vector3::new(-1.0, 0.0, 0.2),
                    light_drift: Vector3::new(0.0, 0.0, 0.01),
                    scale: (1.8 * w, 2.7 * h),
                    rotation_delta: Vector3::new(0.005, 0.0, -0.01),
                    depth: DepthConvention::Linear,
                    ..RenderConfig::default()
                },
                Box::new(Planet::new(20.0, Point3::origin(), 0.4)),
                Box::new(shader),
            )
        }
    };
    Ok(renderer)
}
