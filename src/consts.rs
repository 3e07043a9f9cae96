// Floating point comparisons
pub const FEQ_EPSILON: f64 = 0.0001;

// Default render parameters for the demo scene
pub const CANVAS_WIDTH: usize = 640;
pub const CANVAS_HEIGHT: usize = 360;
pub const OUT_FILE: &str = "./out.ppm";
