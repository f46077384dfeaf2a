//! Flow-line animation driver
//!
//! Each material owns its own clock. The render loop advances it once per
//! frame; nothing ticks in the background, so dropping the material stops
//! the animation.

use serde::{Deserialize, Serialize};

/// Material parameters for animated border lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowLineMaterial {
    /// Base line color
    pub color: String,
    /// Color of the travelling highlight
    pub flow_color: String,
    /// Cycles per second of the highlight
    pub speed: f32,
    /// Seconds of animation elapsed
    pub time: f32,
}

impl Default for FlowLineMaterial {
    fn default() -> Self {
        Self {
            color: "#fff".to_string(),
            flow_color: "#00ffff".to_string(),
            speed: 0.2,
            time: 0.0,
        }
    }
}

impl FlowLineMaterial {
    pub fn advance(&mut self, dt: f32) {
        self.time += dt;
    }

    pub fn set_time(&mut self, t: f32) {
        self.time = t;
    }

    /// Highlight strength at a progress value, in [0, 1]
    ///
    /// Two highlight pulses travel along each line.
    pub fn intensity(&self, progress: f32) -> f32 {
        let flow = (progress * 2.0 + self.time * self.speed).rem_euclid(1.0);
        smoothstep(0.1, 0.9, flow)
    }
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
