//! Point-cloud model for the animated background: sizing, generation,
//! rotation clock and camera matrices. Drawing lives in `wasm::render`.

/// Particle budget for one side of the mobile breakpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Density {
    pub count: usize,
    /// Point size in CSS pixels.
    pub point_size: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleSettings {
    /// Viewport width in CSS pixels below which the mobile density applies.
    pub mobile_breakpoint: f64,
    pub desktop: Density,
    pub mobile: Density,
    /// Radians per second around the X axis.
    pub spin_x: f32,
    /// Radians per second around the Y axis.
    pub spin_y: f32,
    pub radius: f32,
    pub camera_distance: f32,
    pub fov_degrees: f32,
    pub color: [f32; 4],
    pub seed: u32,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            mobile_breakpoint: 768.0,
            desktop: Density {
                count: 1500,
                point_size: 3.0,
            },
            mobile: Density {
                count: 600,
                point_size: 2.0,
            },
            spin_x: 0.05,
            spin_y: 0.08,
            radius: 5.0,
            camera_distance: 10.0,
            fov_degrees: 75.0,
            color: [0.39, 0.55, 1.0, 0.8],
            seed: 0x9E37_79B9,
        }
    }
}

impl ParticleSettings {
    pub fn density_for(&self, viewport_width: f64) -> Density {
        if viewport_width < self.mobile_breakpoint {
            self.mobile
        } else {
            self.desktop
        }
    }
}

/// Deterministic xorshift32 stream mapped to `[0, 1)`.
struct XorShift(u32);

impl XorShift {
    fn new(seed: u32) -> Self {
        // xorshift never leaves zero.
        Self(if seed == 0 { 0x2545_F491 } else { seed })
    }

    fn next_unit(&mut self) -> f32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        (x >> 8) as f32 / (1u32 << 24) as f32
    }
}

/// `count` points spread uniformly through a sphere, flattened `[x, y, z, ...]`.
pub fn generate_cloud(count: usize, radius: f32, seed: u32) -> Vec<f32> {
    let mut rng = XorShift::new(seed);
    let mut positions = Vec::with_capacity(count * 3);
    for _ in 0..count {
        let u = rng.next_unit();
        let v = rng.next_unit();
        let w = rng.next_unit();
        let theta = u * std::f32::consts::TAU;
        let z = 2.0 * v - 1.0;
        let r = radius * w.cbrt();
        let ring = (1.0 - z * z).max(0.0).sqrt();
        positions.push(r * ring * theta.cos());
        positions.push(r * ring * theta.sin());
        positions.push(r * z);
    }
    positions
}

/// Rotation angles advanced from frame timestamps, independent of frame rate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spin {
    pub x: f32,
    pub y: f32,
    last_ms: Option<f64>,
}

impl Spin {
    /// Advances by the wall-clock time since the previous frame. The first
    /// frame after a [`Spin::pause`] only records the timestamp, so a hidden
    /// tab does not make the cloud jump when it comes back.
    pub fn advance(&mut self, now_ms: f64, rate_x: f32, rate_y: f32) {
        if let Some(prev) = self.last_ms {
            let dt = ((now_ms - prev).max(0.0) / 1000.0) as f32;
            self.x = (self.x + rate_x * dt) % std::f32::consts::TAU;
            self.y = (self.y + rate_y * dt) % std::f32::consts::TAU;
        }
        self.last_ms = Some(now_ms);
    }

    pub fn pause(&mut self) {
        self.last_ms = None;
    }
}

/// Column-major 4x4 matrix as WebGL expects it.
pub type Mat4 = [f32; 16];

#[rustfmt::skip]
pub fn perspective(fov_y_radians: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y_radians / 2.0).tan();
    let nf = 1.0 / (near - far);
    [
        f / aspect, 0.0, 0.0, 0.0,
        0.0, f, 0.0, 0.0,
        0.0, 0.0, (far + near) * nf, -1.0,
        0.0, 0.0, 2.0 * far * near * nf, 0.0,
    ]
}

pub fn multiply(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut out = [0.0; 16];
    for col in 0..4 {
        for row in 0..4 {
            out[col * 4 + row] = (0..4).map(|k| a[k * 4 + row] * b[col * 4 + k]).sum();
        }
    }
    out
}

/// Rotation about X then Y, followed by pushing the cloud `distance` away
/// from the camera.
#[rustfmt::skip]
pub fn model_view(spin: &Spin, distance: f32) -> Mat4 {
    let (sx, cx) = spin.x.sin_cos();
    let (sy, cy) = spin.y.sin_cos();
    let rot_x: Mat4 = [
        1.0, 0.0, 0.0, 0.0,
        0.0, cx, sx, 0.0,
        0.0, -sx, cx, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ];
    let rot_y: Mat4 = [
        cy, 0.0, -sy, 0.0,
        0.0, 1.0, 0.0, 0.0,
        sy, 0.0, cy, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ];
    let translate: Mat4 = [
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, -distance, 1.0,
    ];
    multiply(&translate, &multiply(&rot_y, &rot_x))
}

/// Camera for a viewport of `width` x `height` pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Backing-store size for a CSS viewport, with the pixel ratio capped at 2.
    pub fn from_css(css_width: f64, css_height: f64, pixel_ratio: f64) -> Self {
        let ratio = pixel_ratio.clamp(1.0, 2.0);
        Self {
            width: (css_width * ratio).round().max(1.0) as u32,
            height: (css_height * ratio).round().max(1.0) as u32,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn projection(&self, settings: &ParticleSettings) -> Mat4 {
        perspective(settings.fov_degrees.to_radians(), self.aspect(), 0.1, 1000.0)
    }
}
