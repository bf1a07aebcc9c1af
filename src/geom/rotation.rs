//! Normalized angle(s) in radians, composed by multiplication (spec §3
//! "Rotation2D/Rotation3D").

use crate::geom::vector::{Vector2D, Vector3D};
use crate::numeric::normalize_angle_signed;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation2D {
    angle: f64,
}

impl Rotation2D {
    pub fn new(angle: f64) -> Self {
        Self { angle: normalize_angle_signed(angle) }
    }

    pub fn angle(self) -> f64 {
        self.angle
    }

    /// Composition, i.e. applying `self` then `other`.
    pub fn then(self, other: Rotation2D) -> Rotation2D {
        Rotation2D::new(self.angle + other.angle)
    }

    pub fn apply(self, v: Vector2D) -> Vector2D {
        let (sin, cos) = self.angle.sin_cos();
        Vector2D::new(cos * v.x - sin * v.y, sin * v.x + cos * v.y)
    }
}

/// Heading/pitch/roll (z-y-x Tait-Bryan angles), matching the teacher's pose convention
/// for plan-view heading plus elevation pitch plus superelevation roll (spec §4.5).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation3D {
    pub heading: f64,
    pub pitch: f64,
    pub roll: f64,
}

impl Rotation3D {
    pub fn new(heading: f64, pitch: f64, roll: f64) -> Self {
        Self {
            heading: normalize_angle_signed(heading),
            pitch: normalize_angle_signed(pitch),
            roll: normalize_angle_signed(roll),
        }
    }

    /// Composition by multiplying the three respective rotation matrices: `self` is the
    /// intrinsic heading/pitch/roll of the base curve, `other` is superimposed torsion
    /// about the tangent axis.
    pub fn then(self, other: Rotation3D) -> Rotation3D {
        Rotation3D::new(self.heading + other.heading, self.pitch + other.pitch, self.roll + other.roll)
    }

    /// Rotation matrix columns, Z(heading) * Y(pitch) * X(roll).
    pub(crate) fn matrix(self) -> [[f64; 3]; 3] {
        let (sh, ch) = self.heading.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        let (sr, cr) = self.roll.sin_cos();
        [
            [ch * cp, ch * sp * sr - sh * cr, ch * sp * cr + sh * sr],
            [sh * cp, sh * sp * sr + ch * cr, sh * sp * cr - ch * sr],
            [-sp, cp * sr, cp * cr],
        ]
    }

    pub fn apply(self, v: Vector3D) -> Vector3D {
        let m = self.matrix();
        Vector3D::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }

    /// Tangent direction this rotation points along (local x-axis image).
    pub fn tangent(self) -> Vector3D {
        self.apply(Vector3D::new(1.0, 0.0, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation2d_quarter_turn_maps_x_axis_to_y_axis() {
        let r = Rotation2D::new(std::f64::consts::FRAC_PI_2);
        let v = r.apply(Vector2D::new(1.0, 0.0));
        assert!(v.fuzzy_equals(Vector2D::new(0.0, 1.0), 1e-9));
    }

    #[test]
    fn rotation3d_heading_only_matches_rotation2d() {
        let r3 = Rotation3D::new(0.7, 0.0, 0.0);
        let v = r3.apply(Vector3D::new(1.0, 0.0, 0.0));
        let r2 = Rotation2D::new(0.7).apply(Vector2D::new(1.0, 0.0));
        assert!(fuzzy2(v.x, r2.x) && fuzzy2(v.y, r2.y));
    }

    fn fuzzy2(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }
}
