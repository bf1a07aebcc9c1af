//! Solid primitives (spec component C8): each yields a non-empty list of [`Polygon3D`]
//! faces in a local frame; lifting to a global frame uses the solid's own
//! [`crate::geom::AffineSequence`]. Modeled as a tagged sum per spec §9's design note.

use crate::error::{GeometricError, GeometricResult};
use crate::geom::{AffineSequence, Vector3D};

/// An ordered ring of `>= 3` distinct, non-colinear, coplanar vertices (spec §3
/// "Polygon3D / LinearRing3D"). No two consecutive vertices may be duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRing3D {
    vertices: Vec<Vector3D>,
}

impl LinearRing3D {
    pub fn try_new(vertices: Vec<Vector3D>, tolerance: f64) -> GeometricResult<Self> {
        if vertices.len() < 3 {
            return Err(GeometricError::NotEnoughVertices { expected: 3, actual: vertices.len() });
        }
        for pair in vertices.windows(2) {
            if pair[0].distance(pair[1]) <= tolerance {
                return Err(GeometricError::ColinearConsecutive { tolerance });
            }
        }
        for window in vertices.windows(3) {
            if is_colinear(window[0], window[1], window[2], tolerance) {
                return Err(GeometricError::ColinearConsecutive { tolerance });
            }
        }
        if !is_coplanar(&vertices, tolerance) {
            return Err(GeometricError::NonPlanar { tolerance });
        }
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[Vector3D] {
        &self.vertices
    }
}

fn is_colinear(a: Vector3D, b: Vector3D, c: Vector3D, tolerance: f64) -> bool {
    let ab = b.sub(a);
    let ac = c.sub(a);
    ab.cross(ac).norm() <= tolerance * (ab.norm().max(ac.norm()).max(1.0))
}

fn is_coplanar(vertices: &[Vector3D], tolerance: f64) -> bool {
    if vertices.len() <= 3 {
        return true;
    }
    let a = vertices[0];
    let b = vertices[1];
    let c = vertices[2];
    let normal = match b.sub(a).cross(c.sub(a)).normalized() {
        Some(n) => n,
        None => return false,
    };
    vertices[3..].iter().all(|v| normal.dot(v.sub(a)).abs() <= tolerance)
}

/// A planar face: the outer ring plus zero or more inner rings (holes).
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon3D {
    pub exterior: LinearRing3D,
    pub interiors: Vec<LinearRing3D>,
}

impl Polygon3D {
    pub fn new(exterior: LinearRing3D) -> Self {
        Self { exterior, interiors: Vec::new() }
    }

    pub fn with_interiors(exterior: LinearRing3D, interiors: Vec<LinearRing3D>) -> Self {
        Self { exterior, interiors }
    }
}

/// Each variant yields a non-empty face list in a local frame (spec §4.7).
#[derive(Debug, Clone, PartialEq)]
pub enum Solid3D {
    Cuboid { length: f64, width: f64, height: f64 },
    Cylinder { radius: f64, height: f64, slices: usize },
    Polyhedron { faces: Vec<Polygon3D> },
    ParametricSweep { cross_section_radii: Vec<f64>, axis_points: Vec<Vector3D>, slices: usize },
}

impl Solid3D {
    pub fn cuboid(length: f64, width: f64, height: f64, tolerance: f64) -> GeometricResult<Self> {
        if length <= tolerance || width <= tolerance || height <= tolerance {
            return Err(GeometricError::BoundaryGenerationFailure {
                reason: "cuboid dimensions must all be positive".to_string(),
            });
        }
        Ok(Solid3D::Cuboid { length, width, height })
    }

    pub fn cylinder(radius: f64, height: f64, slices: usize) -> GeometricResult<Self> {
        if radius <= 0.0 || height <= 0.0 || slices < 3 {
            return Err(GeometricError::BoundaryGenerationFailure {
                reason: "cylinder requires positive radius/height and at least 3 slices".to_string(),
            });
        }
        Ok(Solid3D::Cylinder { radius, height, slices })
    }

    pub fn polyhedron(faces: Vec<Polygon3D>) -> GeometricResult<Self> {
        if faces.len() < 4 {
            return Err(GeometricError::NotEnoughVertices { expected: 4, actual: faces.len() });
        }
        Ok(Solid3D::Polyhedron { faces })
    }

    /// Faces in the solid's local frame. Cuboid faces are wound consistently outward;
    /// the cylinder's base sits at `z=0` and its top at `z=h`.
    pub fn faces(&self, tolerance: f64) -> GeometricResult<Vec<Polygon3D>> {
        match self {
            Solid3D::Cuboid { length, width, height } => cuboid_faces(*length, *width, *height, tolerance),
            Solid3D::Cylinder { radius, height, slices } => cylinder_faces(*radius, *height, *slices, tolerance),
            Solid3D::Polyhedron { faces } => Ok(faces.clone()),
            Solid3D::ParametricSweep { cross_section_radii, axis_points, slices } => {
                sweep_faces(cross_section_radii, axis_points, *slices, tolerance)
            }
        }
    }

    pub fn global_faces(&self, transform: &AffineSequence, tolerance: f64) -> GeometricResult<Vec<Polygon3D>> {
        self.faces(tolerance).map(|faces| {
            faces
                .into_iter()
                .map(|face| {
                    let exterior = transform.transform_polygon(face.exterior.vertices());
                    let interiors = face
                        .interiors
                        .iter()
                        .map(|ring| LinearRing3D { vertices: transform.transform_polygon(ring.vertices()) })
                        .collect();
                    Polygon3D {
                        exterior: LinearRing3D { vertices: exterior },
                        interiors,
                    }
                })
                .collect()
        })
    }
}

fn cuboid_faces(length: f64, width: f64, height: f64, tolerance: f64) -> GeometricResult<Vec<Polygon3D>> {
    let (l, w, h) = (length / 2.0, width / 2.0, height);
    let corners = [
        Vector3D::new(-l, -w, 0.0),
        Vector3D::new(l, -w, 0.0),
        Vector3D::new(l, w, 0.0),
        Vector3D::new(-l, w, 0.0),
        Vector3D::new(-l, -w, h),
        Vector3D::new(l, -w, h),
        Vector3D::new(l, w, h),
        Vector3D::new(-l, w, h),
    ];
    let face_indices: [[usize; 4]; 6] = [
        [0, 3, 2, 1], // bottom, normal -z
        [4, 5, 6, 7], // top, normal +z
        [0, 1, 5, 4], // front, normal -y
        [1, 2, 6, 5], // right, normal +x
        [2, 3, 7, 6], // back, normal +y
        [3, 0, 4, 7], // left, normal -x
    ];
    face_indices
        .iter()
        .map(|idx| {
            let ring = LinearRing3D::try_new(idx.iter().map(|&i| corners[i]).collect(), tolerance)?;
            Ok(Polygon3D::new(ring))
        })
        .collect()
}

fn cylinder_faces(radius: f64, height: f64, slices: usize, tolerance: f64) -> GeometricResult<Vec<Polygon3D>> {
    let angle_step = 2.0 * std::f64::consts::PI / slices as f64;
    let base: Vec<Vector3D> = (0..slices)
        .map(|i| {
            let a = angle_step * i as f64;
            Vector3D::new(radius * a.cos(), radius * a.sin(), 0.0)
        })
        .collect();
    let top: Vec<Vector3D> = base.iter().map(|p| Vector3D::new(p.x, p.y, height)).collect();

    let mut faces = Vec::with_capacity(slices + 2);
    faces.push(Polygon3D::new(LinearRing3D::try_new(base.iter().rev().cloned().collect(), tolerance)?));
    faces.push(Polygon3D::new(LinearRing3D::try_new(top.clone(), tolerance)?));
    for i in 0..slices {
        let j = (i + 1) % slices;
        let quad = vec![base[i], base[j], top[j], top[i]];
        faces.push(Polygon3D::new(LinearRing3D::try_new(quad, tolerance)?));
    }
    Ok(faces)
}

fn sweep_faces(radii: &[f64], axis_points: &[Vector3D], slices: usize, tolerance: f64) -> GeometricResult<Vec<Polygon3D>> {
    if axis_points.len() < 2 || radii.len() != axis_points.len() {
        return Err(GeometricError::BoundaryGenerationFailure {
            reason: "parametric sweep needs matching radius/axis-point samples, at least 2".to_string(),
        });
    }
    let angle_step = 2.0 * std::f64::consts::PI / slices as f64;
    // cross-section rings, one per axis sample, in the plane perpendicular to the local
    // tangent approximated by the segment to the next axis point.
    let mut rings: Vec<Vec<Vector3D>> = Vec::with_capacity(axis_points.len());
    for (i, center) in axis_points.iter().enumerate() {
        let tangent = if i + 1 < axis_points.len() {
            axis_points[i + 1].sub(*center)
        } else {
            center.sub(axis_points[i - 1])
        }
        .normalized()
        .unwrap_or(Vector3D::new(0.0, 0.0, 1.0));
        let (u, v) = perpendicular_basis(tangent);
        let r = radii[i];
        let ring: Vec<Vector3D> = (0..slices)
            .map(|k| {
                let a = angle_step * k as f64;
                center.add(u.scale(r * a.cos())).add(v.scale(r * a.sin()))
            })
            .collect();
        rings.push(ring);
    }
    let mut faces = Vec::new();
    faces.push(Polygon3D::new(LinearRing3D::try_new(rings[0].iter().rev().cloned().collect(), tolerance)?));
    faces.push(Polygon3D::new(LinearRing3D::try_new(rings[rings.len() - 1].clone(), tolerance)?));
    for pair in rings.windows(2) {
        for k in 0..slices {
            let j = (k + 1) % slices;
            let quad = vec![pair[0][k], pair[0][j], pair[1][j], pair[1][k]];
            faces.push(Polygon3D::new(LinearRing3D::try_new(quad, tolerance)?));
        }
    }
    Ok(faces)
}

fn perpendicular_basis(tangent: Vector3D) -> (Vector3D, Vector3D) {
    let reference = if tangent.x.abs() < 0.9 { Vector3D::new(1.0, 0.0, 0.0) } else { Vector3D::new(0.0, 1.0, 0.0) };
    let u = tangent.cross(reference).normalized().unwrap_or(Vector3D::new(1.0, 0.0, 0.0));
    let v = tangent.cross(u).normalized().unwrap_or(Vector3D::new(0.0, 1.0, 0.0));
    (u, v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuboid_yields_six_quad_faces() {
        let solid = Solid3D::cuboid(2.0, 1.0, 3.0, 1e-9).unwrap();
        let faces = solid.faces(1e-9).unwrap();
        assert_eq!(faces.len(), 6);
        for face in &faces {
            assert_eq!(face.exterior.vertices().len(), 4);
        }
    }

    #[test]
    fn cylinder_base_sits_at_zero_and_top_at_height() {
        let solid = Solid3D::cylinder(1.0, 5.0, 8).unwrap();
        let faces = solid.faces(1e-9).unwrap();
        let base = &faces[0];
        let top = &faces[1];
        assert!(base.exterior.vertices().iter().all(|v| v.z.abs() < 1e-12));
        assert!(top.exterior.vertices().iter().all(|v| (v.z - 5.0).abs() < 1e-12));
    }

    #[test]
    fn colinear_ring_is_rejected() {
        let vertices = vec![Vector3D::new(0.0, 0.0, 0.0), Vector3D::new(1.0, 0.0, 0.0), Vector3D::new(2.0, 0.0, 0.0)];
        assert!(LinearRing3D::try_new(vertices, 1e-9).is_err());
    }

    #[test]
    fn non_coplanar_ring_is_rejected() {
        let vertices = vec![
            Vector3D::new(0.0, 0.0, 0.0),
            Vector3D::new(1.0, 0.0, 0.0),
            Vector3D::new(1.0, 1.0, 0.0),
            Vector3D::new(0.0, 1.0, 5.0),
        ];
        assert!(LinearRing3D::try_new(vertices, 1e-9).is_err());
    }
}
