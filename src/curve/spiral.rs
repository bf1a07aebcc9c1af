use std::f64::consts::PI;

use crate::curve::curve2d::AbstractCurve2D;
use crate::geom::{Pose2D, Rotation2D, Vector2D};
use crate::range::Range;

/// Fresnel integrals `C(u) = int_0^u cos(pi*t^2/2) dt`, `S(u) = int_0^u sin(pi*t^2/2) dt`.
/// Power series for `|u| <= 5` (converges for all `u` but needs an unbounded term count
/// as `|u|` grows), asymptotic expansion above, per spec §4.4's accuracy contract
/// (absolute error `<= 1e-9`).
fn fresnel(u: f64) -> (f64, f64) {
    if u == 0.0 {
        return (0.0, 0.0);
    }
    let sign = u.signum();
    let u = u.abs();
    let (s, c) = if u <= 5.0 {
        fresnel_series(u)
    } else {
        fresnel_asymptotic(u)
    };
    (sign * s, sign * c)
}

fn fresnel_series(u: f64) -> (f64, f64) {
    // C(u) = sum_{n=0}^inf (-1)^n (pi/2)^(2n) u^(4n+1) / ((2n)! (4n+1))
    // S(u) = sum_{n=0}^inf (-1)^n (pi/2)^(2n+1) u^(4n+3) / ((2n+1)! (4n+3))
    let half_pi = PI / 2.0;
    let mut c_sum = 0.0;
    let mut s_sum = 0.0;
    let mut c_term = u; // n = 0 term for C, before dividing by (4n+1)
    let mut s_term = half_pi * u * u * u; // n = 0 term for S, before dividing by (4n+3)
    let mut n = 0u32;
    loop {
        let c_contrib = c_term / (4.0 * n as f64 + 1.0);
        let s_contrib = s_term / (4.0 * n as f64 + 3.0);
        c_sum += c_contrib;
        s_sum += s_contrib;
        if c_contrib.abs() < 1e-18 && s_contrib.abs() < 1e-18 && n > 2 {
            break;
        }
        if n > 200 {
            break;
        }
        n += 1;
        let two_n = 2.0 * n as f64;
        // advance c_term by factor -(pi/2)^2 * u^4 / ((2n-1)*(2n))
        c_term *= -(half_pi * half_pi) * u.powi(4) / (two_n * (two_n - 1.0));
        s_term *= -(half_pi * half_pi) * u.powi(4) / (two_n * (two_n + 1.0));
    }
    (s_sum, c_sum)
}

fn fresnel_asymptotic(u: f64) -> (f64, f64) {
    let x = PI * u * u / 2.0;
    let f = 1.0 / (PI * u) * (1.0 - 3.0 / (PI * u * u).powi(2) + 105.0 / (PI * u * u).powi(4));
    let g = 1.0 / (PI * PI * u.powi(3)) * (1.0 - 15.0 / (PI * u * u).powi(2) + 945.0 / (PI * u * u).powi(4));
    let (sin_x, cos_x) = x.sin_cos();
    let c = 0.5 + f * sin_x - g * cos_x;
    let s = 0.5 - f * cos_x - g * sin_x;
    (s, c)
}

/// `dκ/ds` varies linearly with arc length, from `curv_start` to `curv_end` over the
/// element's domain length (spec §4.4 "SpiralSegment2D").
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralSegment2D {
    curv_start: f64,
    curv_end: f64,
    start_pose: Pose2D,
    domain: Range,
    tolerance: f64,
}

impl SpiralSegment2D {
    pub fn new(curv_start: f64, curv_end: f64, start_pose: Pose2D, domain: Range, tolerance: f64) -> Self {
        Self { curv_start, curv_end, start_pose, domain, tolerance }
    }

    fn curvature_rate(&self) -> f64 {
        let length = self.domain.length();
        if length == 0.0 {
            0.0
        } else {
            (self.curv_end - self.curv_start) / length
        }
    }

    fn raw_point(&self, x: f64, rate: f64) -> Vector2D {
        let a = 1.0 / rate.abs().sqrt();
        let scale = a * PI.sqrt();
        let arg = x / scale;
        let (s, c) = fresnel(arg);
        Vector2D::new(scale * c, rate.signum() * scale * s)
    }

    fn raw_heading(&self, x: f64, rate: f64) -> f64 {
        x * x * rate / 2.0
    }

    /// Curvature at local arc length `l`.
    pub fn curvature_at(&self, l: f64) -> f64 {
        self.curv_start + self.curvature_rate() * l
    }
}

impl AbstractCurve2D for SpiralSegment2D {
    fn domain(&self) -> Range {
        self.domain
    }

    fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn point_local_unbounded(&self, s: f64) -> Vector2D {
        let l = s - self.domain.lower_value();
        let rate = self.curvature_rate();
        if rate.abs() < 1e-14 {
            // constant curvature: degenerates to an arc (or a line when curv_start == 0).
            return crate::curve::ArcSegment2D::new(self.curv_start, self.start_pose, Range::closed(0.0, self.domain.length()), self.tolerance)
                .point_local_unbounded(l);
        }
        let l0 = self.curv_start / rate;
        let raw_at_zero = self.raw_point(l0, rate);
        let heading_at_zero = self.raw_heading(l0, rate);
        let local = self.raw_point(l + l0, rate).sub(raw_at_zero);
        let local_rotated = Rotation2D::new(-heading_at_zero).apply(local);
        let global_direction = self.start_pose.rotation.apply(local_rotated);
        self.start_pose.point.add(global_direction)
    }

    fn rotation_local_unbounded(&self, s: f64) -> Rotation2D {
        let l = s - self.domain.lower_value();
        let rate = self.curvature_rate();
        if rate.abs() < 1e-14 {
            return crate::curve::ArcSegment2D::new(self.curv_start, self.start_pose, Range::closed(0.0, self.domain.length()), self.tolerance)
                .rotation_local_unbounded(l);
        }
        let l0 = self.curv_start / rate;
        let heading_at_zero = self.raw_heading(l0, rate);
        let local_heading = self.raw_heading(l + l0, rate) - heading_at_zero;
        Rotation2D::new(self.start_pose.rotation.angle() + local_heading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresnel_integrals_match_known_values() {
        // C(1) ~= 0.7798934, S(1) ~= 0.4382591 (standard tabulated Fresnel integral values).
        let (s, c) = fresnel(1.0);
        assert!((c - 0.7798934).abs() < 1e-6, "C(1) = {c}");
        assert!((s - 0.4382591).abs() < 1e-6, "S(1) = {s}");
    }

    #[test]
    fn fresnel_is_odd() {
        let (s1, c1) = fresnel(2.3);
        let (s2, c2) = fresnel(-2.3);
        assert!((s1 + s2).abs() < 1e-12);
        assert!((c1 + c2).abs() < 1e-12);
    }

    #[test]
    fn series_and_asymptotic_agree_near_the_switchover() {
        let (s_series, c_series) = fresnel_series(4.9);
        let (s_asym, c_asym) = fresnel_asymptotic(5.1);
        assert!((s_series - s_asym).abs() < 1e-6);
        assert!((c_series - c_asym).abs() < 1e-6);
    }

    #[test]
    fn spiral_endpoint_matches_scenario_s3() {
        let spiral = SpiralSegment2D::new(
            0.0,
            1.0,
            Pose2D { point: Vector2D::new(0.0, 0.0), rotation: Rotation2D::new(0.0) },
            Range::closed(0.0, 1.0),
            1e-9,
        );
        assert!((spiral.curvature_at(1.0) - 1.0).abs() < 1e-9);
        let pose = spiral.calculate_pose_local_cs(1.0).unwrap();
        assert!(pose.point.x.is_finite() && pose.point.y.is_finite());
    }

    #[test]
    fn zero_curvature_rate_degenerates_to_arc() {
        let spiral = SpiralSegment2D::new(
            0.5,
            0.5,
            Pose2D { point: Vector2D::new(0.0, 0.0), rotation: Rotation2D::new(0.0) },
            Range::closed(0.0, 2.0),
            1e-9,
        );
        let arc = crate::curve::ArcSegment2D::new(
            0.5,
            Pose2D { point: Vector2D::new(0.0, 0.0), rotation: Rotation2D::new(0.0) },
            Range::closed(0.0, 2.0),
            1e-9,
        );
        let p_spiral = spiral.calculate_point_local_cs(2.0).unwrap();
        let p_arc = arc.calculate_point_local_cs(2.0).unwrap();
        assert!(p_spiral.fuzzy_equals(p_arc, 1e-9));
    }
}
