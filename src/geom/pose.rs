//! `Pose = (Vector, Rotation)` (spec §3).

use crate::geom::rotation::{Rotation2D, Rotation3D};
use crate::geom::vector::{Vector2D, Vector3D};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose2D {
    pub point: Vector2D,
    pub rotation: Rotation2D,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose3D {
    pub point: Vector3D,
    pub rotation: Rotation3D,
}

/// Generic marker kept for symmetry with spec §3's `Pose = (Vector, Rotation)`; callers
/// use [`Pose2D`]/[`Pose3D`] directly since Rust has no natural dimension-polymorphic
/// vector/rotation pair without a trait-object detour the rest of the kernel doesn't need.
pub type Pose = Pose3D;
