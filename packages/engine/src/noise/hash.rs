/// Sine-scrambled hash of a 2D coordinate.
///
/// Returns a value in `[0, 1)`. Identical inputs give bit-identical outputs.
#[inline]
pub fn seeded_random(x: f64, y: f64, seed: f64) -> f64 {
    let n = (x * 12.9898 + y * 78.233 + seed * 37.719).sin() * 43758.5453;
    let f = n - n.floor();
    // n slightly below an integer can round up to exactly 1.0
    if f >= 1.0 {
        0.0
    } else {
        f
    }
}

/// Cubic Hermite `3t² - 2t³`, input clamped to `[0, 1]`.
#[inline]
pub fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// GLSL-style `smoothstep(edge0, edge1, x)`.
#[inline]
pub fn smoothstep_range(edge0: f64, edge1: f64, x: f64) -> f64 {
    if edge1 == edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    smoothstep((x - edge0) / (edge1 - edge0))
}
