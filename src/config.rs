//! Pipeline configuration
//!
//! All constants of the map pipeline live here. Defaults reproduce the
//! stylized China map look (depth 3 solids, borders hovering at 10.01).

use serde::Deserialize;
use std::env;

/// Tunables for region extraction, extrusion and reassembly
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Number of task groups and worker threads
    pub worker_count: usize,
    /// Feature property holding the region code
    pub region_key: String,
    /// Extrusion depth of every region solid
    pub extrude_depth: f32,
    /// Z coordinate of border line points, above the top cap
    pub border_elevation: f32,
    /// Position of each border line node relative to the group
    pub border_offset: [f32; 3],
    /// Non-uniform (x, y) scale applied after centering
    pub scale: [f64; 2],
    /// Decimals the computed map center is rounded to
    pub center_precision: u32,
    pub axis_helper_size: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            worker_count: 4,
            region_key: "adcode".to_string(),
            extrude_depth: 3.0,
            border_elevation: 10.01,
            border_offset: [0.0, 0.0, -6.8],
            scale: [0.9, 1.1],
            center_precision: 4,
            axis_helper_size: 500.0,
        }
    }
}

impl PipelineConfig {
    /// Defaults overlaid with `MAP_EXTRUDE_*` environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(n) = read_env::<usize>("MAP_EXTRUDE_WORKERS") {
            config.worker_count = n;
        }
        if let Some(depth) = read_env::<f32>("MAP_EXTRUDE_DEPTH") {
            config.extrude_depth = depth;
        }
        if let Ok(key) = env::var("MAP_EXTRUDE_REGION_KEY") {
            if !key.trim().is_empty() {
                config.region_key = key.trim().to_string();
            }
        }

        config.normalized()
    }

    /// Parse a JSON config document; missing fields take their defaults
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: PipelineConfig = serde_json::from_str(json)
            .map_err(|e| anyhow::anyhow!("Invalid pipeline config: {}", e))?;
        Ok(config.normalized())
    }

    pub(crate) fn normalized(mut self) -> Self {
        self.worker_count = self.worker_count.max(1);
        self
    }
}

fn read_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(variable = name, value = %raw, "ignoring unparsable environment override");
            None
        }
    }
}
