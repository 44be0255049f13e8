use nalgebra as na;
use speed_estimation::bbox::BBox;
use speed_estimation::error::Error;
use speed_estimation::{
    FrameShape, Inference, PostProcessor, Registry, SpeedEstimationConfig,
    SpeedEstimationProcessor, TrackedObject,
};

const CONFIG: &str = r#"{
    "enable_action_classification": true,
    "camera_mount_height": 4.5,
    "frame_rate": 30,
    "focal_length": 4.0,
    "lens_dimension": 6.4,
    "camera_horizontal_fov_degrees": 80,
    "camera_vertical_fov_degrees": 53
}"#;

fn main() -> Result<(), Error> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let src = std::fs::read_to_string(&path)
                .map_err(|e| Error::InvalidConfiguration(format!("{}: {}", path, e)))?;
            SpeedEstimationConfig::from_json(&src)?
        }
        None => SpeedEstimationConfig::from_json(CONFIG)?,
    };

    let frame = FrameShape::new(720, 1280);
    let mut processor = SpeedEstimationProcessor::new(config)?;
    let mut objects = Registry::new();

    // (id, pixels per frame along x)
    let walkers = [(1, 0.0f32), (2, 0.5), (3, 4.0)];

    for (id, _) in walkers {
        let y = 100.0 + 150.0 * id as f32;
        objects.insert(TrackedObject::from_bbox(
            id,
            BBox::xywh(100.0, y, 40.0, 90.0).as_ltrb(),
        ));
    }

    for n in 1..=90 {
        let mut inference = Inference::new();

        if n > 1 {
            for (id, step) in walkers {
                if let Some(obj) = objects.get_mut(id) {
                    let last = obj.centroids[obj.centroids.len() - 1];
                    let next = na::Point2::new(last.x + step, last.y);
                    obj.observe(next, BBox::xywh(next.x, next.y, 40.0, 90.0).as_ltrb());
                }
            }
        }

        let report = processor.post_process(&frame, &mut objects, &mut inference)?;

        if n % 30 == 0 {
            println!(
                "frame {}: {}",
                n,
                serde_json::to_string(&report).map_err(Error::Output)?
            );
        }
    }

    for obj in objects.iter() {
        println!(
            "object {}: avg {:.2} km/h over the last second, peak {:.2} km/h",
            obj.id,
            obj.average_speed(30).unwrap_or(0.0),
            obj.speeds.peak().unwrap_or(0.0),
        );
    }

    Ok(())
}
