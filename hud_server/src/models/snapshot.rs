//! hud.snapshot — The full resource state pushed by the host on every change.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::resource::Resource;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, alias = "Resources")]
    pub resources: Vec<Resource>,
}

impl Snapshot {
    /// Content fingerprint over the normalized JSON form. Field order and
    /// whitespace in the pushed payload do not affect it.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        let bytes = serde_json::to_vec(self)?;
        let hash = Sha256::digest(&bytes);
        Ok(hex::encode(&hash[..16]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST_SNAPSHOT: &str = r#"{
        "Resources": [
            {
                "Name": "vigoda",
                "LastDeployTime": "2019-04-22T18:03:05.039-04:00",
                "RuntimeStatus": "ok",
                "BuildHistory": [
                    {"Log": "", "StartTime": "2019-04-22T18:03:01Z", "FinishTime": "2019-04-22T18:03:05Z", "Error": "", "Warnings": ["warning"]}
                ],
                "CurrentBuild": {"StartTime": "0001-01-01T00:00:00Z"},
                "PendingBuildSince": "0001-01-01T00:00:00Z"
            }
        ]
    }"#;

    #[test]
    fn parses_host_pascal_case_payload() {
        let snapshot: Snapshot = serde_json::from_str(HOST_SNAPSHOT).unwrap();
        let res = &snapshot.resources[0];
        assert_eq!(res.name, "vigoda");
        assert_eq!(res.runtime_status.as_deref(), Some("ok"));
        let latest = res.latest_build().unwrap();
        assert!(!latest.has_error());
        assert!(latest.has_warnings());
    }

    #[test]
    fn fingerprint_ignores_payload_formatting() {
        let a: Snapshot = serde_json::from_str(HOST_SNAPSHOT).unwrap();
        let compact = serde_json::to_string(&a).unwrap();
        let b: Snapshot = serde_json::from_str(&compact).unwrap();
        assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
    }

    #[test]
    fn fingerprint_changes_with_content() {
        let mut snapshot: Snapshot = serde_json::from_str(HOST_SNAPSHOT).unwrap();
        let before = snapshot.fingerprint().unwrap();
        snapshot.resources[0].build_history[0].warnings.clear();
        assert_ne!(before, snapshot.fingerprint().unwrap());
    }
}
