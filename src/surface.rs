//! Parametric surface samplers.
//!
//! Each surface sweeps a finite 2D parameter grid and yields, per parameter
//! pair, an object-space position (relative to the surface's own center), an
//! outward unit normal, and the normalized parameter coordinates. Sweeps are
//! deterministic: the same surface yields the same samples every time
//! `samples` is called.

use std::f32::consts::{PI, TAU};

use nalgebra::{Point3, Rotation3, Vector3};

use crate::math;

/// One point on a surface, before rotation and projection.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    /// Offset from the surface center, object space.
    pub position: Vector3<f32>,
    /// Outward unit normal, object space.
    pub normal: Vector3<f32>,
    /// Parameter fractions in `[0, 1)`, used for texturing and tinting.
    pub uv: (f32, f32),
}

/// A shape that can be swept into a sample stream.
pub trait Surface: Send + Sync {
    /// Lazy, finite sweep over the parameter domain. Restartable: every
    /// call begins a fresh identical sweep.
    fn samples(&self) -> Box<dyn Iterator<Item = Sample> + Send + '_>;

    /// World-space center the object rotates around.
    fn center(&self) -> Point3<f32> {
        Point3::origin()
    }
}

/// Axis-aligned cube swept face by face.
#[derive(Debug, Clone, Copy)]
pub struct Cube {
    half: f32,
    step: f32,
}

impl Cube {
    pub fn new(half_width: f32) -> Cube {
        Cube { half: half_width, step: half_width / 16.0 }
    }

    pub fn with_step(mut self, step: f32) -> Cube {
        self.step = step;
        self
    }

    fn face_samples(half: f32, u: f32, v: f32) -> [Sample; 6] {
        let uv = ((u + half) / (2.0 * half), (v + half) / (2.0 * half));
        let at = |position: Vector3<f32>, normal: Vector3<f32>| Sample { position, normal, uv };
        [
            at(Vector3::new(u, v, -half), -Vector3::z()),
            at(Vector3::new(half, v, u), Vector3::x()),
            at(Vector3::new(-half, v, u), -Vector3::x()),
            at(Vector3::new(-u, v, half), Vector3::z()),
            at(Vector3::new(u, -half, -v), -Vector3::y()),
            at(Vector3::new(u, half, v), Vector3::y()),
        ]
    }
}

impl Surface for Cube {
    fn samples(&self) -> Box<dyn Iterator<Item = Sample> + Send + '_> {
        let Cube { half, step } = *self;
        let n = (2.0 * half / step).floor() as usize + 1;
        Box::new((0..n).flat_map(move |i| {
            let u = -half + i as f32 * step;
            (0..n).flat_map(move |j| {
                let v = -half + j as f32 * step;
                Cube::face_samples(half, u, v).into_iter()
            })
        }))
    }
}

/// Lat-long sphere; normal is the radial direction.
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    radius: f32,
    center: Point3<f32>,
    theta_step: f32,
    phi_step: f32,
}

impl Sphere {
    pub fn new(radius: f32, center: Point3<f32>) -> Sphere {
        Sphere { radius, center, theta_step: 0.01, phi_step: 0.02 }
    }

    pub fn with_steps(mut self, theta_step: f32, phi_step: f32) -> Sphere {
        self.theta_step = theta_step;
        self.phi_step = phi_step;
        self
    }

    fn point(radius: f32, theta: f32, phi: f32) -> Vector3<f32> {
        let (sint, cost) = theta.sin_cos();
        let (sinp, cosp) = phi.sin_cos();
        Vector3::new(radius * cost * sinp, radius * sint * sinp, radius * cosp)
    }
}

impl Surface for Sphere {
    fn samples(&self) -> Box<dyn Iterator<Item = Sample> + Send + '_> {
        let Sphere { radius, theta_step, phi_step, .. } = *self;
        let thetas = (TAU / theta_step).ceil() as usize;
        let phis = (PI / phi_step).ceil() as usize;
        Box::new((0..thetas).flat_map(move |ti| {
            let theta = ti as f32 * theta_step;
            (0..phis).map(move |pi| {
                let phi = pi as f32 * phi_step;
                let position = Sphere::point(radius, theta, phi);
                Sample {
                    position,
                    normal: position / radius,
                    uv: (theta / TAU, phi / PI),
                }
            })
        }))
    }

    fn center(&self) -> Point3<f32> {
        self.center
    }
}

/// Torus around the z axis.
#[derive(Debug, Clone, Copy)]
pub struct Torus {
    major: f32,
    minor: f32,
    theta_step: f32,
    phi_step: f32,
}

impl Torus {
    pub fn new(major: f32, minor: f32) -> Torus {
        Torus { major, minor, theta_step: 0.1, phi_step: 0.03 }
    }

    pub fn with_steps(mut self, theta_step: f32, phi_step: f32) -> Torus {
        self.theta_step = theta_step;
        self.phi_step = phi_step;
        self
    }

    fn point(major: f32, minor: f32, theta: f32, phi: f32) -> Vector3<f32> {
        let (sint, cost) = theta.sin_cos();
        let (sinp, cosp) = phi.sin_cos();
        Vector3::new(
            (major + minor * cost) * cosp,
            (major + minor * cost) * sinp,
            minor * sint,
        )
    }

    /// Outward normal from the two parameter tangents.
    fn normal(major: f32, minor: f32, theta: f32, phi: f32) -> Vector3<f32> {
        let (sint, cost) = theta.sin_cos();
        let (sinp, cosp) = phi.sin_cos();
        let dtheta = Vector3::new(-minor * sint * cosp, -minor * sint * sinp, minor * cost);
        let dphi = Vector3::new(
            -(major + minor * cost) * sinp,
            (major + minor * cost) * cosp,
            0.0,
        );
        math::normalize_or(dphi.cross(&dtheta), Vector3::z())
    }
}

impl Surface for Torus {
    fn samples(&self) -> Box<dyn Iterator<Item = Sample> + Send + '_> {
        let Torus { major, minor, theta_step, phi_step } = *self;
        let thetas = (TAU / theta_step).ceil() as usize;
        let phis = (TAU / phi_step).ceil() as usize;
        Box::new((0..thetas).flat_map(move |ti| {
            let theta = ti as f32 * theta_step;
            (0..phis).map(move |pi| {
                let phi = pi as f32 * phi_step;
                Sample {
                    position: Torus::point(major, minor, theta, phi),
                    normal: Torus::normal(major, minor, theta, phi),
                    uv: (theta / TAU, phi / TAU),
                }
            })
        }))
    }
}

/// Sphere with a fixed axial tilt, uv-mapped for texturing.
///
/// The tilt is baked into positions and normals at sampling time; the
/// frame-to-frame spin comes from the renderer's rotation state. The uv
/// coordinates stay pinned to the untilted parameterization so a texture
/// rides the surface.
#[derive(Debug, Clone, Copy)]
pub struct Planet {
    radius: f32,
    center: Point3<f32>,
    tilt: Rotation3<f32>,
    theta_step: f32,
    phi_step: f32,
}

impl Planet {
    pub fn new(radius: f32, center: Point3<f32>, axial_tilt: f32) -> Planet {
        Planet {
            radius,
            center,
            tilt: Rotation3::from_axis_angle(&Vector3::x_axis(), axial_tilt),
            theta_step: 0.007,
            phi_step: 0.014,
        }
    }

    pub fn with_steps(mut self, theta_step: f32, phi_step: f32) -> Planet {
        self.theta_step = theta_step;
        self.phi_step = phi_step;
        self
    }
}

impl Surface for Planet {
    fn samples(&self) -> Box<dyn Iterator<Item = Sample> + Send + '_> {
        let Planet { radius, tilt, theta_step, phi_step, .. } = *self;
        let thetas = (TAU / theta_step).ceil() as usize;
        let phis = (PI / phi_step).ceil() as usize;
        Box::new((0..thetas).flat_map(move |ti| {
            let theta = ti as f32 * theta_step;
            (0..phis).map(move |pi| {
                let phi = pi as f32 * phi_step;
                let position = tilt * Sphere::point(radius, theta, phi);
                Sample {
                    position,
                    normal: position / radius,
                    uv: (theta / TAU, phi / PI),
                }
            })
        }))
    }

    fn center(&self) -> Point3<f32> {
        self.center
    }
}
