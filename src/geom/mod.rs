//! 2D/3D vectors, rotations, poses, and the composable affine stack (spec component C5).

mod affine;
mod pose;
mod rotation;
mod vector;

pub use affine::{Affine3D, AffineSequence};
pub use pose::{Pose, Pose2D, Pose3D};
pub use rotation::{Rotation2D, Rotation3D};
pub use vector::{CurveRelativeVector1D, CurveRelativeVector2D, CurveRelativeVector3D, Vector2D, Vector3D};
