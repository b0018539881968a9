/*
 * Docker CLI output records
 *
 * Typed views over the JSON that `docker ... --format '{{json .}}'` prints.
 * Most commands print one JSON object per line; `ps` additionally joins
 * container labels into a single "k1=v1,k2=v2" string.
 */
use crate::error::{Result, ToolError};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;

pub const COMPOSE_PROJECT_LABEL: &str = "com.docker.compose.project";
pub const COMPOSE_SERVICE_LABEL: &str = "com.docker.compose.service";
pub const COMPOSE_WORKING_DIR_LABEL: &str = "com.docker.compose.project.working_dir";

/// One record of `docker ps --format '{{json .}}'`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContainerSummary {
    #[serde(rename = "ID")]
    pub id: String,
    pub names: String,
    pub image: String,
    pub state: String,
    pub status: String,
    pub labels: String,
}

impl ContainerSummary {
    /// Labels split out of the comma-joined `Labels` string.
    pub fn labels(&self) -> BTreeMap<String, String> {
        parse_labels(&self.labels)
    }

    pub fn label(&self, key: &str) -> Option<String> {
        self.labels().remove(key)
    }

    pub fn compose_project(&self) -> Option<String> {
        self.label(COMPOSE_PROJECT_LABEL).filter(|p| !p.is_empty())
    }

    pub fn compose_service(&self) -> Option<String> {
        self.label(COMPOSE_SERVICE_LABEL).filter(|s| !s.is_empty())
    }
}

/// Parse a "k1=v1,k2=v2" label string. Pairs without '=' are dropped.
pub fn parse_labels(raw: &str) -> BTreeMap<String, String> {
    raw.split(',')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// One record of `docker stats --no-stream --format '{{json .}}'`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StatsEntry {
    #[serde(rename = "Container")]
    pub container: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "CPUPerc")]
    pub cpu_perc: String,
    #[serde(rename = "MemUsage")]
    pub mem_usage: String,
    #[serde(rename = "MemPerc")]
    pub mem_perc: String,
    #[serde(rename = "NetIO")]
    pub net_io: String,
    #[serde(rename = "BlockIO")]
    pub block_io: String,
    #[serde(rename = "PIDs")]
    pub pids: String,
}

/// One record of `docker events --format '{{json .}}'`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DockerEvent {
    // Pre-1.22 daemons only fill in `status`
    pub status: String,
    #[serde(rename = "Action")]
    pub action: String,
    #[serde(rename = "Actor")]
    pub actor: EventActor,
    pub time: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EventActor {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Attributes")]
    pub attributes: BTreeMap<String, String>,
}

/// `.State.Health` of `docker inspect`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HealthState {
    pub status: String,
    pub failing_streak: i64,
    pub log: Vec<HealthLog>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HealthLog {
    pub start: String,
    pub end: String,
    pub exit_code: i64,
    pub output: String,
}

/// `.Config.Healthcheck` of `docker inspect`. Durations are nanoseconds.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HealthConfig {
    pub test: Vec<String>,
    pub interval: i64,
    pub timeout: i64,
    pub retries: i64,
}

/// Parse newline-delimited JSON records, skipping blank lines.
pub fn parse_json_lines<T: DeserializeOwned>(output: &str, what: &'static str) -> Result<Vec<T>> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| serde_json::from_str(line).map_err(|e| ToolError::parse(what, e)))
        .collect()
}
