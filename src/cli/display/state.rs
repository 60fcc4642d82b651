//! Coarse lifecycle state of a custom object

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectState {
    Ready,
    Progressing,
    Failed,
    Unknown,
}

impl ObjectState {
    /// Map an operator phase string onto a state
    pub fn classify(phase: &str) -> Self {
        match phase.to_ascii_lowercase().as_str() {
            "running" | "success" | "succeeded" | "completed" | "ready" => Self::Ready,
            "failed" | "failure" | "error" => Self::Failed,
            "" => Self::Unknown,
            _ => Self::Progressing,
        }
    }

    pub fn from_status(status: Option<&Value>) -> Self {
        status_phase(status)
            .map(Self::classify)
            .unwrap_or(Self::Unknown)
    }
}

/// The operator reports progress under `phase`, `state` or `status`
/// depending on the kind.
pub fn status_phase(status: Option<&Value>) -> Option<&str> {
    let status = status?;
    ["phase", "state", "status"]
        .iter()
        .find_map(|key| status.get(*key).and_then(Value::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify() {
        assert_eq!(ObjectState::classify("Running"), ObjectState::Ready);
        assert_eq!(ObjectState::classify("Success"), ObjectState::Ready);
        assert_eq!(ObjectState::classify("Failed"), ObjectState::Failed);
        assert_eq!(ObjectState::classify("Pending"), ObjectState::Progressing);
        assert_eq!(ObjectState::classify("Persisting"), ObjectState::Progressing);
        assert_eq!(ObjectState::classify(""), ObjectState::Unknown);
    }

    #[test]
    fn test_status_phase_lookup_order() {
        let platform = json!({"phase": "Running", "clusterSize": 3});
        let map = json!({"state": "Success"});
        let wan = json!({"status": "Pending"});

        assert_eq!(status_phase(Some(&platform)), Some("Running"));
        assert_eq!(status_phase(Some(&map)), Some("Success"));
        assert_eq!(status_phase(Some(&wan)), Some("Pending"));
        assert_eq!(status_phase(None), None);
        assert_eq!(ObjectState::from_status(Some(&json!({}))), ObjectState::Unknown);
    }
}
