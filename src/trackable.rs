use nalgebra as na;
use std::collections::btree_map::{self, BTreeMap};

use crate::bbox::{BBox, Ltrb};
use crate::history::{MovementAction, SpeedHistory};

pub type ObjectId = u32;

/// An object followed by the tracker across frames.
///
/// The tracker owns the trajectory (`centroids`, `bbox`); speed estimation
/// only appends to `speeds` and updates `current_speed` and `action`.
#[derive(Debug, Clone)]
pub struct TrackedObject {
    pub id: ObjectId,
    pub centroids: Vec<na::Point2<f32>>,
    pub bbox: BBox<Ltrb>,

    // in km/h
    pub speeds: SpeedHistory,
    pub current_speed: f32,

    pub action: Option<MovementAction>,
}

impl TrackedObject {
    pub fn new(id: ObjectId, centroid: na::Point2<f32>, bbox: BBox<Ltrb>) -> Self {
        Self {
            id,
            centroids: vec![centroid],
            bbox,
            speeds: SpeedHistory::new(),
            current_speed: 0.0,
            action: None,
        }
    }

    /// Starts a track at the center of its first box.
    pub fn from_bbox(id: ObjectId, bbox: BBox<Ltrb>) -> Self {
        Self::new(id, bbox.centroid(), bbox)
    }

    /// Records the position seen in a new frame.
    pub fn observe(&mut self, centroid: na::Point2<f32>, bbox: BBox<Ltrb>) {
        self.centroids.push(centroid);
        self.bbox = bbox;
    }

    #[inline]
    pub fn has_motion_pair(&self) -> bool {
        self.centroids.len() >= 2
    }

    /// Stores a speed sample for this cycle.
    #[inline]
    pub fn record_speed(&mut self, speed: f32) {
        let speed = speed.max(0.0);

        self.speeds.push(speed);
        self.current_speed = speed;
    }

    /// Latest classification, empty when never classified.
    #[inline]
    pub fn action_str(&self) -> &'static str {
        self.action.map(|a| a.as_str()).unwrap_or("")
    }

    #[inline]
    pub fn average_speed(&self, window: usize) -> Option<f32> {
        self.speeds.mean_over(window)
    }
}

/// Arena of the currently tracked objects, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    objects: BTreeMap<ObjectId, TrackedObject>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an object, replacing any object with the same id.
    pub fn insert(&mut self, object: TrackedObject) -> Option<TrackedObject> {
        self.objects.insert(object.id, object)
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<TrackedObject> {
        self.objects.remove(&id)
    }

    #[inline]
    pub fn get(&self, id: ObjectId) -> Option<&TrackedObject> {
        self.objects.get(&id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut TrackedObject> {
        self.objects.get_mut(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> btree_map::Values<'_, ObjectId, TrackedObject> {
        self.objects.values()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> btree_map::ValuesMut<'_, ObjectId, TrackedObject> {
        self.objects.values_mut()
    }
}

impl FromIterator<TrackedObject> for Registry {
    fn from_iter<I: IntoIterator<Item = TrackedObject>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().map(|o| (o.id, o)).collect(),
        }
    }
}
