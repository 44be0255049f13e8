pub mod bbox;
pub mod config;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod history;
pub mod inference;
pub mod processor;
pub mod speed;
pub mod trackable;

pub use config::SpeedEstimationConfig;
pub use frame::FrameShape;
pub use history::{MovementAction, SpeedHistory};
pub use inference::{Inference, SpeedReport};
pub use processor::SpeedEstimationProcessor;
pub use trackable::{ObjectId, Registry, TrackedObject};

use error::Error;

/// A step the host pipeline runs once per processed frame, after tracking.
pub trait PostProcessor {
    fn post_process(
        &mut self,
        frame: &FrameShape,
        objects: &mut Registry,
        inference: &mut Inference,
    ) -> Result<SpeedReport, Error>;
}
