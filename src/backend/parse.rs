use std::collections::HashMap;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawNode {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub r: f32,
    #[serde(default)]
    pub properties: HashMap<String, Value>,
    #[serde(default)]
    pub proplist: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawLink {
    pub source: usize,
    pub target: usize,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub properties: HashMap<String, Value>,
    #[serde(default)]
    pub proplist: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawTopology {
    #[serde(default)]
    pub nodes: Vec<RawNode>,
    #[serde(default)]
    pub links: Vec<RawLink>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QueryResult {
    Path {
        #[serde(default)]
        expr: String,
        #[serde(deserialize_with = "path_pairs")]
        path: Vec<(String, String)>,
    },
    Topology {
        topology: RawTopology,
    },
}

/// Path segments arrive as arrays; only the first two elements name the
/// endpoint ids, anything after them is ignored.
fn path_pairs<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    let segments: Vec<Vec<Value>> = Vec::deserialize(deserializer)?;

    segments
        .into_iter()
        .map(|segment| {
            let mut ids = segment.into_iter();
            match (ids.next(), ids.next()) {
                (Some(Value::String(source)), Some(Value::String(target))) => {
                    Ok((source, target))
                }
                _ => Err(de::Error::custom(
                    "path segment must start with two node id strings",
                )),
            }
        })
        .collect()
}

pub(super) fn parse_topology_list(raw: &str) -> Result<Vec<String>> {
    serde_json::from_str(raw).context("invalid topology list JSON from backend")
}

/// The topology endpoint wraps its payload in a JSON array; only the first
/// element carries the topology.
pub(super) fn parse_topology_payload(raw: &str) -> Result<RawTopology> {
    let mut payload: Vec<RawTopology> =
        serde_json::from_str(raw).context("invalid topology JSON from backend")?;

    if payload.is_empty() {
        return Err(anyhow!("topology payload array from backend is empty"));
    }

    Ok(payload.swap_remove(0))
}

pub(super) fn parse_query_results(raw: &str) -> Result<Vec<QueryResult>> {
    serde_json::from_str(raw).context("invalid query result JSON from backend")
}
