//! GLSL ES 3.00 sources for the instanced grid
//!
//! The noise and timing helpers are hand ports of `noise::*` and
//! `systems::arc::*`; the arc constants are the defaults of `ArcConfig`.

// Attribute locations, shared with `web::gl_renderer`
pub const ATTR_CORNER: u32 = 0;
pub const ATTR_OFFSET: u32 = 1;
pub const ATTR_INDEX: u32 = 2;
pub const ATTR_SEED: u32 = 3;
pub const ATTR_GRID: u32 = 4;

/// Uniform names in the order of [`super::UniformSet::to_array`], each with its
/// component count.
pub const UNIFORMS: [(&str, usize); 13] = [
    ("u_time", 1),
    ("u_progress", 1),
    ("u_scroll_progress", 1),
    ("u_mode", 1),
    ("u_resolution", 2),
    ("u_cell_size", 1),
    ("u_pixel_ratio", 1),
    ("u_process_rect", 4),
    ("u_card_rect", 4),
    ("u_hover_index", 1),
    ("u_hover_prev_index", 1),
    ("u_hover_change_time", 1),
    ("u_reduced_motion", 1),
];

/// Unit quad as two triangles, in cell-local `[0, 1]` coordinates.
pub const QUAD_CORNERS: [f32; 12] = [
    0.0, 0.0, 1.0, 0.0, 0.0, 1.0, //
    0.0, 1.0, 1.0, 0.0, 1.0, 1.0,
];

pub const VERTEX_SRC: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec2 a_corner;
layout(location = 1) in vec2 a_offset;
layout(location = 2) in float a_index;
layout(location = 3) in vec2 a_seed;
layout(location = 4) in vec2 a_grid;

uniform vec2 u_resolution;
uniform float u_cell_size;

out vec2 v_local;
out vec2 v_center;
out vec2 v_seed;
out vec2 v_grid;
out float v_index;

void main() {
    vec2 px = a_offset + a_corner * u_cell_size;
    vec2 clip = px / max(u_resolution, vec2(1.0)) * 2.0 - 1.0;
    gl_Position = vec4(clip.x, -clip.y, 0.0, 1.0);

    v_local = a_corner;
    v_center = a_offset + vec2(0.5 * u_cell_size);
    v_seed = a_seed;
    v_grid = a_grid;
    v_index = a_index;
}
"#;

pub const FRAGMENT_SRC: &str = r#"#version 300 es
precision highp float;

uniform float u_time;
uniform float u_progress;
uniform float u_scroll_progress;
uniform float u_mode;
uniform vec2 u_resolution;
uniform float u_cell_size;
uniform float u_pixel_ratio;
uniform vec4 u_process_rect;
uniform vec4 u_card_rect;
uniform float u_hover_index;
uniform float u_hover_prev_index;
uniform float u_hover_change_time;
uniform float u_reduced_motion;

in vec2 v_local;
in vec2 v_center;
in vec2 v_seed;
in vec2 v_grid;
in float v_index;

out vec4 out_color;

const float PI = 3.14159265;
const float CURVATURE = 0.16;
const float CENTER_FRACTION = 0.38;
const float THICKNESS_FRACTION = 0.24;
const float THICKNESS_VARIATION = 0.25;
const float EDGE_NOISE_AMOUNT = 0.35;
const float NOISE_SCALE = 0.12;
const float BASE_HUE = 214.0;
const float HOVER_FADE = 0.35;
const float HOVER_SLOTS = 4.0;

float seeded_random(vec2 p, float seed) {
    float n = sin(p.x * 12.9898 + p.y * 78.233 + seed * 37.719) * 43758.5453;
    return fract(n);
}

float value_noise(vec2 p, float scale) {
    vec2 s = p * scale;
    vec2 i = floor(s);
    vec2 f = s - i;
    vec2 t = f * f * (3.0 - 2.0 * f);
    float c00 = seeded_random(i, 17.0);
    float c10 = seeded_random(i + vec2(1.0, 0.0), 17.0);
    float c01 = seeded_random(i + vec2(0.0, 1.0), 17.0);
    float c11 = seeded_random(i + vec2(1.0, 1.0), 17.0);
    return mix(mix(c00, c10, t.x), mix(c01, c11, t.x), t.y);
}

float fractal_noise(vec2 p) {
    float total = 0.0;
    float amplitude = 1.0;
    float frequency = 1.0;
    float max_amplitude = 0.0;
    for (int i = 0; i < 3; i++) {
        total += value_noise(p, frequency) * amplitude;
        max_amplitude += amplitude;
        amplitude *= 0.5;
        frequency *= 2.0;
    }
    return total / max_amplitude;
}

float organic_ease(float t) {
    if (t <= 0.0) return 0.0;
    if (t >= 1.0) return 1.0;
    float inv = 1.0 - t;
    float base = 1.0 - inv * inv * inv;
    return clamp(base + 0.02 * sin(t * PI * 3.0) * inv, 0.0, 1.0);
}

float breathing(vec2 seed, float time_s) {
    float factor = mix(0.7, 1.3, seed.x);
    return 1.0 + 0.12 * sin(time_s * 1000.0 * 0.0015 * factor + seed.y * 2.0 * PI);
}

// 1 on the arc centerline, 0 outside the band
float arc_profile(vec2 center, vec2 grid) {
    float nx = clamp((center.x - 0.5 * u_resolution.x) / (0.5 * u_resolution.x), -1.0, 1.0);
    float centerline = CENTER_FRACTION * u_resolution.y + CURVATURE * u_resolution.x * nx * nx;
    float u = (nx + 1.0) * 0.5;
    float shape_noise = fractal_noise(grid * NOISE_SCALE);
    float thickness = THICKNESS_FRACTION * u_resolution.y * (0.25 + 0.75 * sin(u * PI));
    thickness *= 1.0 + (shape_noise - 0.5) * 2.0 * THICKNESS_VARIATION;
    float half_t = max(thickness * 0.5, 1e-3);
    float d = abs(center.y - centerline) / half_t;
    float boundary = 1.0;
    if (d > 0.6) {
        boundary += (fractal_noise(grid * NOISE_SCALE + vec2(31.7, 11.3)) - 0.5) * EDGE_NOISE_AMOUNT;
    }
    // no seeded rim roll past 0.85 here; the Canvas2D ArcShape::sample applies one
    if (d >= boundary) return 0.0;
    float r = d / boundary;
    return 1.0 - r * r;
}

float rect_glow(vec2 p, vec4 rect, float reach) {
    if (rect.z <= 0.0 || rect.w <= 0.0) return 0.0;
    vec2 lo = rect.xy;
    vec2 hi = rect.xy + rect.zw;
    vec2 outside = max(max(lo - p, p - hi), vec2(0.0));
    return 1.0 - smoothstep(0.0, reach, length(outside));
}

// Highlight for the hovered slot of the solution card
float hover_highlight(float slot, vec2 p) {
    if (slot < 0.0 || u_card_rect.z <= 0.0) return 0.0;
    float slot_w = u_card_rect.z / HOVER_SLOTS;
    vec4 slot_rect = vec4(u_card_rect.x + slot * slot_w, u_card_rect.y, slot_w, u_card_rect.w);
    return rect_glow(p, slot_rect, u_cell_size * 3.0);
}

float rounded_mask(vec2 local) {
    vec2 q = abs(local - 0.5) - vec2(0.5 - 0.18);
    float d = length(max(q, 0.0)) - 0.18;
    float aa = 1.5 / max(u_cell_size * u_pixel_ratio, 1.0);
    return 1.0 - smoothstep(-aa, aa, d);
}

void main() {
    if (u_mode < 0.5) discard;

    float time_s = u_reduced_motion > 0.5 ? 0.0 : u_time;
    float detail = fractal_noise(v_grid * NOISE_SCALE + vec2(-47.1, 83.9));
    float profile = arc_profile(v_center, v_grid);
    float intensity = profile * (0.55 + 0.45 * detail);

    if (u_mode < 1.25) {
        // intro ramp: left-to-right sweep with per-cell jitter
        float eased = organic_ease(u_progress);
        float appear = clamp(v_center.x / u_resolution.x, 0.0, 1.0) * 0.8 + v_seed.y * 0.2;
        intensity *= smoothstep(appear, appear + 0.12, eased * 1.12);
    } else if (u_mode < 2.5) {
        intensity *= breathing(v_seed, time_s);
        intensity *= 1.0 - 0.6 * u_scroll_progress;
    } else {
        // blog: sparse low twinkle, no arc
        float twinkle = 0.5 + 0.5 * sin(time_s * (0.6 + v_seed.x) + v_seed.y * 2.0 * PI);
        intensity = step(0.92, v_seed.x) * 0.18 * twinkle;
    }

    float reach = u_cell_size * 4.0;
    intensity += 0.35 * rect_glow(v_center, u_process_rect, reach) * (0.5 + 0.5 * detail);

    float fade = clamp((time_s - u_hover_change_time) / HOVER_FADE, 0.0, 1.0);
    float hover = mix(hover_highlight(u_hover_prev_index, v_center),
                      hover_highlight(u_hover_index, v_center), fade);
    intensity += 0.45 * hover;

    intensity = clamp(intensity, 0.0, 1.0);
    if (intensity < 0.02) discard;

    float hue = BASE_HUE + (detail - 0.5) * 16.0;
    float sat = mix(0.55, 0.90, intensity);
    float light = mix(0.30, 0.68, intensity);
    // hsl -> rgb
    vec3 k = mod(vec3(0.0, 8.0, 4.0) + hue / 30.0, 12.0);
    float a = sat * min(light, 1.0 - light);
    vec3 rgb = light - a * max(-1.0, min(min(k - 3.0, 9.0 - k), 1.0));

    float alpha = intensity * rounded_mask(v_local);
    out_color = vec4(rgb * alpha, alpha);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::UNIFORM_FLOATS;

    #[test]
    fn uniform_table_covers_the_flat_layout() {
        let floats: usize = UNIFORMS.iter().map(|(_, n)| n).sum();
        assert_eq!(floats, UNIFORM_FLOATS);
    }

    #[test]
    fn every_uniform_is_declared_in_a_shader() {
        for (name, _) in UNIFORMS {
            let decl = format!(" {name};");
            assert!(
                VERTEX_SRC.contains(&decl) || FRAGMENT_SRC.contains(&decl),
                "{name} is not declared"
            );
        }
    }

    #[test]
    fn edge_noise_matches_the_cpu_arc_and_skips_the_rim_roll() {
        assert!(FRAGMENT_SRC.contains("if (d > 0.6)"));
        assert!(FRAGMENT_SRC.contains("vec2(31.7, 11.3)"));
        assert!(!FRAGMENT_SRC.contains("d > 0.85"));
    }

    #[test]
    fn attribute_locations_match_the_vertex_shader() {
        for (loc, name) in [
            (ATTR_CORNER, "a_corner"),
            (ATTR_OFFSET, "a_offset"),
            (ATTR_INDEX, "a_index"),
            (ATTR_SEED, "a_seed"),
            (ATTR_GRID, "a_grid"),
        ] {
            let decl = format!("layout(location = {loc}) in");
            let line = VERTEX_SRC.lines().find(|l| l.contains(name) && l.contains(" in ")).unwrap();
            assert!(line.starts_with(&decl), "{name}: {line}");
        }
    }

    #[test]
    fn sources_carry_the_version_directive_first() {
        assert!(VERTEX_SRC.starts_with("#version 300 es"));
        assert!(FRAGMENT_SRC.starts_with("#version 300 es"));
    }
}
