use serde_derive::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::error::Error;

pub const CURRENT_SPEED_KEY: &str = "current_speed";
pub const CURRENT_ACTION_KEY: &str = "current_action";

/// Shared per-frame output of the host pipeline.
#[derive(Debug, Clone, Default)]
pub struct Inference {
    pub extra: Map<String, Value>,
}

impl Inference {
    pub fn new() -> Self {
        Self::default()
    }
}

/// What one processing cycle publishes, keyed by stringified object id.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct SpeedReport {
    pub current_speed: BTreeMap<String, f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_action: Option<BTreeMap<String, String>>,
}

impl SpeedReport {
    pub fn merge_into(&self, inference: &mut Inference) -> Result<(), Error> {
        let speeds = serde_json::to_value(&self.current_speed).map_err(Error::Output)?;
        inference.extra.insert(CURRENT_SPEED_KEY.to_string(), speeds);

        if let Some(actions) = &self.current_action {
            let actions = serde_json::to_value(actions).map_err(Error::Output)?;
            inference.extra.insert(CURRENT_ACTION_KEY.to_string(), actions);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_key_only_when_present() {
        let mut report = SpeedReport::default();
        report.current_speed.insert("0".into(), 0.0);

        let mut inference = Inference::new();
        inference.extra.insert("objects".into(), Value::Null);
        report.merge_into(&mut inference).unwrap();

        assert!(inference.extra.contains_key(CURRENT_SPEED_KEY));
        assert!(!inference.extra.contains_key(CURRENT_ACTION_KEY));
        assert!(inference.extra.contains_key("objects"));

        report.current_action = Some(BTreeMap::from([("0".into(), "standing".into())]));
        report.merge_into(&mut inference).unwrap();

        assert_eq!(inference.extra[CURRENT_ACTION_KEY]["0"], "standing");
    }

    #[test]
    fn serialized_shape() {
        let report = SpeedReport {
            current_speed: BTreeMap::from([("7".into(), 3.5)]),
            current_action: None,
        };

        assert_eq!(
            serde_json::to_string(&report).unwrap(),
            r#"{"current_speed":{"7":3.5}}"#
        );
    }
}
