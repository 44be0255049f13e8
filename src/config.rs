use serde_derive::{Deserialize, Serialize};

use crate::error::Error;

/// Static camera and stream parameters the speed estimator is built with.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SpeedEstimationConfig {
    #[serde(default, alias = "person_action")]
    pub enable_action_classification: bool,

    // in meters, above the ground plane
    #[serde(alias = "camera_length")]
    pub camera_mount_height: f32,

    #[serde(alias = "fps")]
    pub frame_rate: u32,

    #[serde(default)]
    pub lens_dimension: f32,

    #[serde(default)]
    pub focal_length: f32,

    #[serde(alias = "camera_horizontal_degrees")]
    pub camera_horizontal_fov_degrees: f32,

    #[serde(alias = "camera_vertical_degrees")]
    pub camera_vertical_fov_degrees: f32,
}

impl SpeedEstimationConfig {
    pub fn new(camera_mount_height: f32, frame_rate: u32, hfov: f32, vfov: f32) -> Self {
        Self {
            enable_action_classification: false,
            camera_mount_height,
            frame_rate,
            lens_dimension: 0.0,
            focal_length: 0.0,
            camera_horizontal_fov_degrees: hfov,
            camera_vertical_fov_degrees: vfov,
        }
    }

    pub fn with_action_classification(mut self, enabled: bool) -> Self {
        self.enable_action_classification = enabled;
        self
    }

    pub fn with_intrinsics(mut self, lens_dimension: f32, focal_length: f32) -> Self {
        self.lens_dimension = lens_dimension;
        self.focal_length = focal_length;
        self
    }

    /// Parses a JSON document and validates it.
    pub fn from_json(src: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(src)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.frame_rate == 0 {
            return Err(invalid("frame rate must be positive"));
        }

        if !self.camera_mount_height.is_finite() || self.camera_mount_height < 0.0 {
            return Err(invalid(format!(
                "camera mount height must be a non-negative number, got {}",
                self.camera_mount_height
            )));
        }

        for (axis, fov) in [
            ("horizontal", self.camera_horizontal_fov_degrees),
            ("vertical", self.camera_vertical_fov_degrees),
        ] {
            if !fov.is_finite() || !(0.0..180.0).contains(&fov) {
                return Err(invalid(format!(
                    "{} field of view must be within [0, 180) degrees, got {}",
                    axis, fov
                )));
            }
        }

        if !(self.lens_dimension >= 0.0 && self.focal_length >= 0.0) {
            return Err(invalid(
                "lens dimension and focal length must be non-negative",
            ));
        }

        Ok(())
    }

    #[inline]
    pub fn intrinsics(&self) -> CameraIntrinsics {
        CameraIntrinsics {
            lens_dimension: self.lens_dimension,
            focal_length: self.focal_length,
        }
    }
}

#[inline]
fn invalid(msg: impl Into<String>) -> Error {
    Error::InvalidConfiguration(msg.into())
}

/// Lens parameters kept alongside the field-of-view angles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraIntrinsics {
    pub lens_dimension: f32,
    pub focal_length: f32,
}

impl CameraIntrinsics {
    /// Angle of view in degrees implied by the lens, when both values are known.
    pub fn angle_of_view(&self) -> Option<f32> {
        if self.lens_dimension > 0.0 && self.focal_length > 0.0 {
            Some((2.0 * (self.lens_dimension / (2.0 * self.focal_length)).atan()).to_degrees())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn parses_addon_keys() {
        let config = SpeedEstimationConfig::from_json(
            r#"{
                "person_action": true,
                "camera_length": 4.5,
                "fps": 30,
                "lens_dimension": 0,
                "focal_length": 1,
                "camera_horizontal_degrees": 80,
                "camera_vertical_degrees": 53
            }"#,
        )
        .unwrap();

        assert!(config.enable_action_classification);
        assert_eq!(config.frame_rate, 30);
        assert_approx_eq!(config.camera_mount_height, 4.5);
        assert_approx_eq!(config.camera_horizontal_fov_degrees, 80.0);
        assert_approx_eq!(config.camera_vertical_fov_degrees, 53.0);
    }

    #[test]
    fn optional_fields_default() {
        let config = SpeedEstimationConfig::from_json(
            r#"{
                "camera_mount_height": 3.0,
                "frame_rate": 25,
                "camera_horizontal_fov_degrees": 60,
                "camera_vertical_fov_degrees": 40
            }"#,
        )
        .unwrap();

        assert!(!config.enable_action_classification);
        assert_eq!(config.lens_dimension, 0.0);
        assert_eq!(config.focal_length, 0.0);
    }

    #[test]
    fn zero_frame_rate_rejected() {
        let err = SpeedEstimationConfig::new(4.5, 0, 80.0, 53.0)
            .validate()
            .unwrap_err();

        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn zero_fov_accepted() {
        assert!(SpeedEstimationConfig::new(4.5, 30, 0.0, 0.0).validate().is_ok());
    }

    #[test]
    fn out_of_range_values_rejected() {
        assert!(SpeedEstimationConfig::new(-1.0, 30, 80.0, 53.0).validate().is_err());
        assert!(SpeedEstimationConfig::new(4.5, 30, 180.0, 53.0).validate().is_err());
        assert!(SpeedEstimationConfig::new(4.5, 30, 80.0, f32::NAN).validate().is_err());
        assert!(SpeedEstimationConfig::new(4.5, 30, 80.0, 53.0)
            .with_intrinsics(-1.0, 1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = SpeedEstimationConfig::from_json("{ \"fps\": ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn angle_of_view_from_lens() {
        let intrinsics = CameraIntrinsics {
            lens_dimension: 2.0,
            focal_length: 1.0,
        };
        assert_approx_eq!(intrinsics.angle_of_view().unwrap(), 90.0, 1e-4);

        let missing = CameraIntrinsics {
            lens_dimension: 0.0,
            focal_length: 1.0,
        };
        assert!(missing.angle_of_view().is_none());
    }
}
