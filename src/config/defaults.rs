//! Default value functions for serde deserialization.

pub fn enabled() -> bool {
    true
}

pub fn max_range() -> f32 {
    100.0
}

pub fn min_distance() -> f32 {
    0.001
}

pub fn tie_epsilon() -> f32 {
    1e-4
}

pub fn registry_weight() -> f32 {
    0.8
}

pub fn max_extension() -> f32 {
    0.5
}

pub fn min_extension() -> f32 {
    0.05
}

pub fn fov_y_deg() -> f32 {
    60.0
}

pub fn aspect() -> f32 {
    16.0 / 9.0
}
