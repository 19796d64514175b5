//! Catmull-Rom curves through the keyframe positions and targets.
//!
//! Curves are open, pass through every control point in order and extrapolate
//! a phantom point beyond each end so the first and last segments have
//! tangents. They back the controller's fallback path and the debug path
//! visualisation; normal playback blends keyframes directly.

use glam::Vec3;

use crate::keyframe::CameraKeyframe;

/// Knot parameterisation of the spline.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum CurveKind {
    /// Knot spacing by the square root of chord length (alpha = 0.5).
    #[default]
    Centripetal,
    /// Knot spacing by chord length (alpha = 1).
    Chordal,
    /// Uniform knots with the given tangent tension.
    Uniform { tension: f32 },
}

/// Cubic `c0 + c1 t + c2 t² + c3 t³` fitted to end values and end tangents.
#[derive(Clone, Copy, Debug, Default)]
struct CubicPoly {
    c0: f32,
    c1: f32,
    c2: f32,
    c3: f32,
}

impl CubicPoly {
    fn hermite(x0: f32, x1: f32, t0: f32, t1: f32) -> Self {
        Self {
            c0: x0,
            c1: t0,
            c2: -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1,
            c3: 2.0 * x0 - 2.0 * x1 + t0 + t1,
        }
    }

    fn catmull_rom(x0: f32, x1: f32, x2: f32, x3: f32, tension: f32) -> Self {
        Self::hermite(x1, x2, tension * (x2 - x0), tension * (x3 - x1))
    }

    fn nonuniform(x0: f32, x1: f32, x2: f32, x3: f32, dt0: f32, dt1: f32, dt2: f32) -> Self {
        let t1 = (x1 - x0) / dt0 - (x2 - x0) / (dt0 + dt1) + (x2 - x1) / dt1;
        let t2 = (x2 - x1) / dt1 - (x3 - x1) / (dt1 + dt2) + (x3 - x2) / dt2;
        Self::hermite(x1, x2, t1 * dt1, t2 * dt1)
    }

    #[inline]
    fn calc(&self, t: f32) -> f32 {
        let t2 = t * t;
        let t3 = t2 * t;
        self.c0 + self.c1 * t + self.c2 * t2 + self.c3 * t3
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CatmullRomCurve {
    points: Vec<Vec3>,
    kind: CurveKind,
}

impl CatmullRomCurve {
    pub fn new(points: Vec<Vec3>, kind: CurveKind) -> Self {
        Self { points, kind }
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Point at parameter `t`, clamped to \[0, 1\].
    ///
    /// An empty curve yields the origin and a single-point curve yields that
    /// point for every `t`.
    pub fn point_at(&self, t: f32) -> Vec3 {
        let pts = &self.points;
        let l = pts.len();
        match l {
            0 => return Vec3::ZERO,
            1 => return pts[0],
            _ => {}
        }
        let p = (l - 1) as f32 * t.clamp(0.0, 1.0);
        let mut seg = p.floor() as usize;
        let mut weight = p - seg as f32;
        if seg >= l - 1 {
            seg = l - 2;
            weight = 1.0;
        }

        let p0 = if seg > 0 {
            pts[seg - 1]
        } else {
            pts[0] * 2.0 - pts[1]
        };
        let p1 = pts[seg];
        let p2 = pts[seg + 1];
        let p3 = if seg + 2 < l {
            pts[seg + 2]
        } else {
            pts[l - 1] * 2.0 - pts[l - 2]
        };

        let polys = match self.kind {
            CurveKind::Uniform { tension } => [
                CubicPoly::catmull_rom(p0.x, p1.x, p2.x, p3.x, tension),
                CubicPoly::catmull_rom(p0.y, p1.y, p2.y, p3.y, tension),
                CubicPoly::catmull_rom(p0.z, p1.z, p2.z, p3.z, tension),
            ],
            CurveKind::Centripetal | CurveKind::Chordal => {
                let pow = if self.kind == CurveKind::Chordal {
                    0.5
                } else {
                    0.25
                };
                let mut dt0 = p0.distance_squared(p1).powf(pow);
                let mut dt1 = p1.distance_squared(p2).powf(pow);
                let mut dt2 = p2.distance_squared(p3).powf(pow);
                // coincident points
                if dt1 < 1e-4 {
                    dt1 = 1.0;
                }
                if dt0 < 1e-4 {
                    dt0 = dt1;
                }
                if dt2 < 1e-4 {
                    dt2 = dt1;
                }
                [
                    CubicPoly::nonuniform(p0.x, p1.x, p2.x, p3.x, dt0, dt1, dt2),
                    CubicPoly::nonuniform(p0.y, p1.y, p2.y, p3.y, dt0, dt1, dt2),
                    CubicPoly::nonuniform(p0.z, p1.z, p2.z, p3.z, dt0, dt1, dt2),
                ]
            }
        };
        Vec3::new(
            polys[0].calc(weight),
            polys[1].calc(weight),
            polys[2].calc(weight),
        )
    }

    /// `divisions + 1` points at evenly spaced parameters from 0 to 1.
    pub fn sample_points(&self, divisions: usize) -> Vec<Vec3> {
        if divisions == 0 {
            return vec![self.point_at(0.0)];
        }
        (0..=divisions)
            .map(|d| self.point_at(d as f32 / divisions as f32))
            .collect()
    }
}

/// The pair of curves derived from one keyframe snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct PathCurves {
    pub position: CatmullRomCurve,
    pub target: CatmullRomCurve,
}

impl PathCurves {
    pub fn build(keyframes: &[CameraKeyframe], kind: CurveKind) -> Self {
        Self {
            position: CatmullRomCurve::new(keyframes.iter().map(|k| k.position).collect(), kind),
            target: CatmullRomCurve::new(keyframes.iter().map(|k| k.target).collect(), kind),
        }
    }
}
