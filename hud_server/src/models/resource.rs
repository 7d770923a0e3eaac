//! hud.resource — A named unit under observation with its build history.

use serde::{Deserialize, Serialize};

use super::build::Build;
use super::timestamp::deserialize_raw_time;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    #[serde(alias = "Name")]
    pub name: String,
    /// Most recent build first.
    #[serde(default, alias = "BuildHistory", deserialize_with = "deserialize_history")]
    pub build_history: Vec<Build>,
    #[serde(default, alias = "LastDeployTime", deserialize_with = "deserialize_raw_time")]
    pub last_deploy_time: String,
    #[serde(default, alias = "RuntimeStatus", skip_serializing_if = "Option::is_none")]
    pub runtime_status: Option<String>,
    #[serde(default, alias = "CurrentBuild", skip_serializing_if = "Option::is_none")]
    pub current_build: Option<Build>,
    #[serde(default, alias = "PendingBuildSince", deserialize_with = "deserialize_raw_time")]
    pub pending_build_since: String,
}

impl Resource {
    pub fn latest_build(&self) -> Option<&Build> {
        self.build_history.first()
    }
}

fn deserialize_history<'de, D>(deserializer: D) -> Result<Vec<Build>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Build>>::deserialize(deserializer)?.unwrap_or_default())
}
