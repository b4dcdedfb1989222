//! Transform pipeline and frame orchestration.
//!
//! One `Renderer` owns a surface, a shader, the framebuffer, and the
//! rotation/light state, and renders exactly one frame per [`Renderer::advance`]
//! call. The host decides cadence; there is no loop and no I/O here.

use nalgebra::{Point3, Vector3};
use rayon::prelude::*;

use crate::buffer::{DepthConvention, Framebuffer};
use crate::math;
use crate::shade::{Shader, Texel};
use crate::surface::{Sample, Surface};

/// Look-at camera with an orthonormal view basis.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
}

impl Camera {
    pub fn looking_at(position: Point3<f32>, target: Point3<f32>) -> Camera {
        Camera { position, target, up: Vector3::y() }
    }

    pub fn with_up(mut self, up: Vector3<f32>) -> Camera {
        self.up = up;
        self
    }

    /// View basis `(right, up, forward)`.
    fn basis(&self) -> (Vector3<f32>, Vector3<f32>, Vector3<f32>) {
        let w = math::normalize_or(self.position - self.target, Vector3::z());
        let right = math::normalize_or(self.up.cross(&w), Vector3::x());
        let up = w.cross(&right);
        (right, up, -w)
    }
}

/// Everything the render loop used to read from global constants.
pub struct RenderConfig {
    /// Grid size in character cells.
    pub width: usize,
    pub height: usize,
    pub camera: Camera,
    /// Direction toward the light; normalized at construction.
    pub light: Vector3<f32>,
    /// Per-frame rotation applied to the light direction.
    pub light_drift: Vector3<f32>,
    /// Horizontal and vertical projection scales. Independent so the
    /// non-square aspect of character cells can be compensated.
    pub scale: (f32, f32),
    /// Initial rotation angles of the object.
    pub rotation: Vector3<f32>,
    /// Per-frame rotation deltas.
    pub rotation_delta: Vector3<f32>,
    pub depth: DepthConvention,
}

impl Default for RenderConfig {
    fn default() -> RenderConfig {
        RenderConfig {
            width: 120,
            height: 60,
            camera: Camera::looking_at(Point3::new(0.0, 0.0, -250.0), Point3::origin()),
            light: Vector3::new(-2.0, 3.0, 3.0),
            light_drift: Vector3::zeros(),
            scale: (80.0, 60.0),
            rotation: Vector3::zeros(),
            rotation_delta: Vector3::zeros(),
            depth: DepthConvention::Inverse,
        }
    }
}

/// A transformed, shaded sample ready for the depth merge.
struct Fragment {
    x: i32,
    y: i32,
    texel: Texel,
    depth: f32,
}

pub struct Renderer {
    surface: Box<dyn Surface>,
    shader: Box<dyn Shader>,
    buffer: Framebuffer,
    camera: Camera,
    scale: (f32, f32),
    light: Vector3<f32>,
    light_drift: Vector3<f32>,
    rotation: Vector3<f32>,
    rotation_delta: Vector3<f32>,
}

impl Renderer {
    pub fn new(config: RenderConfig, surface: Box<dyn Surface>, shader: Box<dyn Shader>) -> Renderer {
        Renderer {
            surface,
            shader,
            buffer: Framebuffer::new(config.width, config.height, config.depth),
            camera: config.camera,
            scale: config.scale,
            light: math::normalize_or(config.light, Vector3::x()),
            light_drift: config.light_drift,
            rotation: config.rotation,
            rotation_delta: config.rotation_delta,
        }
    }

    pub fn buffer(&self) -> &Framebuffer {
        &self.buffer
    }

    /// Serialized form of the most recently rendered frame.
    pub fn frame(&self) -> String {
        self.buffer.serialize()
    }

    pub fn rotation(&self) -> Vector3<f32> {
        self.rotation
    }

    pub fn light(&self) -> Vector3<f32> {
        self.light
    }

    /// Render one frame, then step the rotation and light state.
    ///
    /// The frame stays readable through [`Renderer::buffer`] until the next
    /// call. Rotation and light are read once per frame, so every sample in
    /// a frame sees the same snapshot.
    pub fn advance(&mut self) {
        self.buffer.clear();
        self.draw();
        self.rotation += self.rotation_delta;
        if self.light_drift != Vector3::zeros() {
            self.light = math::orientation(&self.light_drift) * self.light;
        }
    }

    fn draw(&mut self) {
        let orientation = math::orientation(&self.rotation);
        let center = self.surface.center();
        let (right, up, forward) = self.camera.basis();
        let eye = self.camera.position;
        let (scale_x, scale_y) = self.scale;
        let half_w = (self.buffer.width() / 2) as f32;
        let half_h = (self.buffer.height() / 2) as f32;
        let convention = self.buffer.convention();
        let light = self.light;
        let shader = self.shader.as_ref();

        let samples: Vec<Sample> = self.surface.samples().collect();
        let fragments: Vec<Fragment> = samples
            .par_iter()
            .filter_map(|sample| {
                let world = center + orientation * sample.position;
                let normal = orientation * sample.normal;
                let view = world - eye;
                let depth = view.dot(&forward);
                // perspective division is meaningless at or behind the camera
                if depth <= 0.0 {
                    return None;
                }
                let x = (half_w + scale_x * view.dot(&right) / depth).floor() as i32;
                let y = (half_h - scale_y * view.dot(&up) / depth).floor() as i32;
                let texel = shader.shade(&normal, &light, sample);
                Some(Fragment { x, y, texel, depth: convention.encode(depth) })
            })
            .collect();

        log::debug!("frame: {} samples, {} fragments", samples.len(), fragments.len());

        // merge in sample order; competing writes to a cell resolve here
        for fragment in fragments {
            self.buffer.write(fragment.x, fragment.y, fragment.texel, fragment.depth);
        }
    }
}
