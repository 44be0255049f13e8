use nalgebra as na;

use crate::geometry::GroundScale;

/// m/s to km/h
pub const MPS_TO_KMH: f32 = 3.6;

/// Turns the two newest centroids of a trajectory into a speed in km/h.
#[derive(Debug, Clone, Copy)]
pub struct SpeedCalculator {
    frame_rate: u32,
}

impl SpeedCalculator {
    pub fn new(frame_rate: u32) -> Self {
        Self { frame_rate }
    }

    #[inline]
    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    /// Seconds between two consecutive frames
    #[inline]
    pub fn frame_interval(&self) -> f32 {
        1.0 / self.frame_rate as f32
    }

    /// Pixel delta between the two newest centroids, if there are two.
    #[inline]
    pub fn last_delta(centroids: &[na::Point2<f32>]) -> Option<na::Vector2<f32>> {
        match centroids {
            [.., prev, last] => Some(last - prev),
            _ => None,
        }
    }

    /// Instantaneous speed; zero with fewer than two centroids.
    pub fn speed(&self, centroids: &[na::Point2<f32>], scale: &GroundScale) -> f32 {
        let delta = match Self::last_delta(centroids) {
            Some(delta) => delta,
            None => return 0.0,
        };

        let meters = scale.to_meters(delta);
        let kmh = meters / self.frame_interval() * MPS_TO_KMH;

        if kmh.is_finite() {
            kmh.max(0.0)
        } else {
            0.0
        }
    }
}
