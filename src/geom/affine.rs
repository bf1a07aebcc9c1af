//! Composable affine stack (spec §3 "AffineSequence"): an ordered list of affines
//! composed right-to-left, with `transform(point)`/`transform(polygon)` both using the
//! solved composite.

use crate::geom::pose::Pose3D;
use crate::geom::rotation::Rotation3D;
use crate::geom::vector::Vector3D;

/// A single rigid transform: rotate, then translate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine3D {
    pub rotation: Rotation3D,
    pub translation: Vector3D,
}

impl Affine3D {
    pub fn identity() -> Self {
        Self { rotation: Rotation3D::new(0.0, 0.0, 0.0), translation: Vector3D::ZERO }
    }

    pub fn from_pose(pose: Pose3D) -> Self {
        Self { rotation: pose.rotation, translation: pose.point }
    }

    pub fn transform_point(self, p: Vector3D) -> Vector3D {
        self.rotation.apply(p).add(self.translation)
    }

    /// `self` then `inner`, i.e. `(self ∘ inner)(p) == self.transform_point(inner.transform_point(p))`.
    pub fn compose(self, inner: Affine3D) -> Affine3D {
        let rotated_translation = self.rotation.apply(inner.translation);
        Affine3D {
            rotation: self.rotation.then(inner.rotation),
            translation: self.translation.add(rotated_translation),
        }
    }
}

/// Ordered list of affines, composed right-to-left: `sequence[0] ∘ sequence[1] ∘ ... `.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AffineSequence {
    affines: Vec<Affine3D>,
}

impl AffineSequence {
    pub fn new(affines: Vec<Affine3D>) -> Self {
        Self { affines }
    }

    pub fn push(&mut self, affine: Affine3D) {
        self.affines.push(affine);
    }

    /// Folds the sequence into a single composite transform.
    pub fn solved(&self) -> Affine3D {
        self.affines.iter().rev().fold(Affine3D::identity(), |acc, next| next.compose(acc))
    }

    pub fn transform(&self, point: Vector3D) -> Vector3D {
        self.solved().transform_point(point)
    }

    pub fn transform_polygon(&self, polygon: &[Vector3D]) -> Vec<Vector3D> {
        let composite = self.solved();
        polygon.iter().map(|p| composite.transform_point(*p)).collect()
    }
}
