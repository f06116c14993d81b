/// Pounds per kilogram. Kept bit-exact so goals agree across clients.
pub const LBS_PER_KG: f64 = 2.20462;

/// Floor applied to a serving mass before dividing by it.
pub const MIN_BASE_GRAMS: f64 = 1e-9;

/// Fiber goal (grams) when none is configured.
pub const DEFAULT_FIBER_GOAL: f64 = 25.0;
