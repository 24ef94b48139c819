//! World edge shaping.

use super::WorldEdgeMode;

/// Hermite smoothstep of `x` over `[edge0, edge1]`.
fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Blends `bedrock` toward the mode's edge target near the world border.
///
/// `blend` is the fraction of the shorter world side over which the blend
/// happens. Points outside the world take the edge target outright.
pub fn apply_world_edge(
    mode: WorldEdgeMode,
    bedrock: f64,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    blend: f64,
) -> f64 {
    let target = match mode {
        WorldEdgeMode::Open => return bedrock,
        WorldEdgeMode::Island => 0.0,
        WorldEdgeMode::Valley => 1.0,
    };

    let edge_dist = x.min(width - x).min(y).min(height - y);
    let blend_cm = blend * width.min(height);
    let keep = if edge_dist < 0.0 {
        0.0
    } else if blend_cm <= 0.0 {
        1.0
    } else {
        smoothstep(0.0, blend_cm, edge_dist)
    };

    target + (bedrock - target) * keep
}
