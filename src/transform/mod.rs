//! Affine and projective coordinate mapping.

/// Projective solve from four correspondences.
pub mod homography;
/// 3x3 transform.
pub mod mat;
/// Quadrilateral helpers.
pub mod quad;
