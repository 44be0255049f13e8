use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// Upper bound (inclusive, km/h) of the standing class
pub const STANDING_MAX_KMH: f32 = 2.0;

/// Upper bound (inclusive, km/h) of the walking class
pub const WALKING_MAX_KMH: f32 = 7.0;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MovementAction {
    Standing,
    Walking,
    Running,
}

impl MovementAction {
    pub fn classify(speed: f32) -> Self {
        if speed.is_nan() || speed <= STANDING_MAX_KMH {
            MovementAction::Standing
        } else if speed <= WALKING_MAX_KMH {
            MovementAction::Walking
        } else {
            MovementAction::Running
        }
    }

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementAction::Standing => "standing",
            MovementAction::Walking => "walking",
            MovementAction::Running => "running",
        }
    }
}

impl fmt::Display for MovementAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append-only record of speed samples, one per processing cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeedHistory {
    samples: Vec<f32>,
}

impl SpeedHistory {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, speed: f32) {
        self.samples.push(speed);
    }

    #[inline]
    pub fn latest(&self) -> Option<f32> {
        self.samples.last().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &f32> {
        self.samples.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.samples
    }

    /// Mean of the newest `window` samples (fewer if the history is shorter).
    pub fn mean_over(&self, window: usize) -> Option<f32> {
        let n = window.min(self.samples.len());
        if n == 0 {
            return None;
        }

        let sum: f32 = self.samples[self.samples.len() - n..].iter().sum();

        Some(sum / n as f32)
    }

    pub fn peak(&self) -> Option<f32> {
        self.samples.iter().copied().reduce(f32::max)
    }
}

impl From<Vec<f32>> for SpeedHistory {
    fn from(samples: Vec<f32>) -> Self {
        Self { samples }
    }
}
