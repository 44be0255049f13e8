//! # Ground-plane geometry
//!
//! Converts the static camera model into meters-per-pixel scales. Each axis is
//! handled on its own, so cameras with different horizontal and vertical
//! fields of view produce anisotropic scales.

use nalgebra as na;
use num_traits::Float;

use crate::config::SpeedEstimationConfig;
use crate::frame::FrameShape;

/// Ground extent visible along one axis.
///
/// # Arguments
///
/// * `height` - camera mounting height above the ground plane.
/// * `fov_degrees` - field-of-view angle along the axis (in degrees).
#[inline]
pub fn ground_extent<T: Float>(height: T, fov_degrees: T) -> T {
    let two = T::one() + T::one();

    two * height * (fov_degrees / two).to_radians().tan()
}

/// Meters covered by a single pixel along one axis.
///
/// A zero field of view or a zero-sized frame gives a zero scale.
#[inline]
pub fn meters_per_pixel<T: Float>(height: T, fov_degrees: T, pixels: u32) -> T {
    let pixels = match <T as num_traits::NumCast>::from(pixels) {
        Some(p) if p > T::zero() => p,
        _ => return T::zero(),
    };

    ground_extent(height, fov_degrees) / pixels
}

/// Per-axis meters-per-pixel scale for one frame shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundScale(na::Vector2<f32>);

impl GroundScale {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self(na::Vector2::new(x, y))
    }

    pub fn from_config(config: &SpeedEstimationConfig, frame: &FrameShape) -> Self {
        let h = config.camera_mount_height;

        Self::new(
            meters_per_pixel(h, config.camera_horizontal_fov_degrees, frame.width),
            meters_per_pixel(h, config.camera_vertical_fov_degrees, frame.height),
        )
    }

    #[inline(always)]
    pub fn x(&self) -> f32 {
        self.0.x
    }

    #[inline(always)]
    pub fn y(&self) -> f32 {
        self.0.y
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.0.x == 0.0 || self.0.y == 0.0
    }

    /// Real-world displacement (in meters) for a pixel-space delta.
    #[inline]
    pub fn to_meters(&self, delta: na::Vector2<f32>) -> f32 {
        delta.component_mul(&self.0).norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn extent_at_ninety_degrees() {
        // tan(45°) = 1, the visible extent is twice the height
        assert_approx_eq!(ground_extent(4.5f32, 90.0), 9.0, 1e-5);
        assert_approx_eq!(ground_extent(4.5f64, 90.0), 9.0, 1e-9);
    }

    #[test]
    fn zero_fov_is_zero_scale() {
        assert_eq!(meters_per_pixel(4.5f32, 0.0, 640), 0.0);
    }

    #[test]
    fn zero_pixels_is_zero_scale() {
        assert_eq!(meters_per_pixel(4.5f32, 80.0, 0), 0.0);
    }

    #[test]
    fn anisotropic_scales() {
        let config = SpeedEstimationConfig::new(4.5, 30, 80.0, 53.0);
        let scale = GroundScale::from_config(&config, &FrameShape::new(480, 640));

        assert_approx_eq!(scale.x(), 2.0 * 4.5 * 40f32.to_radians().tan() / 640.0, 1e-6);
        assert_approx_eq!(scale.y(), 2.0 * 4.5 * 26.5f32.to_radians().tan() / 480.0, 1e-6);
        assert!(!scale.is_degenerate());
    }

    #[test]
    fn axes_combined_at_displacement() {
        let scale = GroundScale::new(0.03, 0.04);
        assert_approx_eq!(scale.to_meters(na::Vector2::new(100.0, 0.0)), 3.0, 1e-5);
        assert_approx_eq!(scale.to_meters(na::Vector2::new(100.0, 100.0)), 5.0, 1e-5);
        assert_approx_eq!(scale.to_meters(na::Vector2::new(-100.0, -100.0)), 5.0, 1e-5);
    }
}
