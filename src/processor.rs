use log::{debug, trace, warn};
use std::collections::BTreeMap;

use crate::config::SpeedEstimationConfig;
use crate::error::Error;
use crate::frame::FrameShape;
use crate::geometry::GroundScale;
use crate::history::MovementAction;
use crate::inference::{Inference, SpeedReport};
use crate::speed::SpeedCalculator;
use crate::trackable::{Registry, TrackedObject};

/// Per-frame speed estimation over every tracked object.
///
/// Each call to [`SpeedEstimationProcessor::update_objects`] appends exactly one
/// speed sample per object, so it must run once per frame.
#[derive(Debug)]
pub struct SpeedEstimationProcessor {
    config: SpeedEstimationConfig,
    calculator: SpeedCalculator,
    degenerate_reported: bool,
}

impl SpeedEstimationProcessor {
    pub fn new(config: SpeedEstimationConfig) -> Result<Self, Error> {
        config.validate()?;

        debug!(
            "speed estimation: height={}m fps={} fov=({}°, {}°) lens aov={:?} actions={}",
            config.camera_mount_height,
            config.frame_rate,
            config.camera_horizontal_fov_degrees,
            config.camera_vertical_fov_degrees,
            config.intrinsics().angle_of_view(),
            config.enable_action_classification,
        );

        Ok(Self {
            calculator: SpeedCalculator::new(config.frame_rate),
            config,
            degenerate_reported: false,
        })
    }

    #[inline]
    pub fn config(&self) -> &SpeedEstimationConfig {
        &self.config
    }

    #[inline]
    pub fn classifies_actions(&self) -> bool {
        self.config.enable_action_classification
    }

    pub fn scale(&mut self, frame: &FrameShape) -> GroundScale {
        let scale = GroundScale::from_config(&self.config, frame);

        if scale.is_degenerate() && !self.degenerate_reported {
            warn!(
                "degenerate ground scale {:?} for frame {:?}, speeds on that axis read as zero",
                scale, frame
            );
            self.degenerate_reported = true;
        }

        scale
    }

    fn update_object(&self, obj: &mut TrackedObject, scale: &GroundScale) {
        let speed = self.calculator.speed(&obj.centroids, scale);
        obj.record_speed(speed);

        if self.classifies_actions() && obj.has_motion_pair() {
            obj.action = Some(MovementAction::classify(obj.current_speed));
        }

        trace!(
            "object {}: {:.3} km/h ({} samples) {}",
            obj.id,
            obj.current_speed,
            obj.speeds.len(),
            obj.action_str()
        );
    }

    /// Computes this frame's speed sample for every object in place.
    pub fn update_objects(&mut self, frame: &FrameShape, objects: &mut Registry) {
        let scale = self.scale(frame);

        for obj in objects.iter_mut() {
            self.update_object(obj, &scale);
        }
    }

    pub fn report(&self, objects: &Registry) -> SpeedReport {
        let current_speed = objects
            .iter()
            .map(|o| (o.id.to_string(), o.current_speed))
            .collect();

        let current_action = if self.classifies_actions() {
            Some(
                objects
                    .iter()
                    .filter_map(|o| Some((o.id.to_string(), o.action?.to_string())))
                    .collect::<BTreeMap<_, _>>(),
            )
        } else {
            None
        };

        SpeedReport {
            current_speed,
            current_action,
        }
    }
}

impl crate::PostProcessor for SpeedEstimationProcessor {
    fn post_process(
        &mut self,
        frame: &FrameShape,
        objects: &mut Registry,
        inference: &mut Inference,
    ) -> Result<SpeedReport, Error> {
        self.update_objects(frame, objects);

        let report = self.report(objects);
        report.merge_into(inference)?;

        Ok(report)
    }
}
