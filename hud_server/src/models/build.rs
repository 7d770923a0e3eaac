//! hud.build — One completed or in-flight build attempt of a resource.

use serde::{Deserialize, Deserializer, Serialize};

use super::timestamp::deserialize_raw_time;

/// Marker for a failed build. Its presence is what matters; the message is informational.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Build {
    #[serde(default, alias = "Log")]
    pub log: String,
    #[serde(default, alias = "StartTime", deserialize_with = "deserialize_raw_time")]
    pub start_time: String,
    #[serde(default, alias = "FinishTime", deserialize_with = "deserialize_raw_time")]
    pub finish_time: String,
    #[serde(default, alias = "Error", deserialize_with = "deserialize_build_error")]
    pub error: Option<BuildError>,
    #[serde(default, alias = "Warnings", deserialize_with = "deserialize_warnings")]
    pub warnings: Vec<String>,
}

impl Build {
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// `null`, `false`, and `""` mean success. `{}`, a message string, or any
/// other value marks the build as failed.
fn deserialize_build_error<'de, D>(deserializer: D) -> Result<Option<BuildError>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(BuildError { message: Some(s) }),
        Some(Value::Object(map)) => Some(BuildError {
            message: map
                .get("message")
                .or_else(|| map.get("Message"))
                .and_then(Value::as_str)
                .map(str::to_owned),
        }),
        Some(other) => Some(BuildError {
            message: Some(other.to_string()),
        }),
    })
}

fn deserialize_warnings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
