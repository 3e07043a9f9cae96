pub mod consts;
pub mod error;

pub mod tuple;
pub mod matrix;
pub mod color;
pub mod ray;

pub mod pattern;
pub mod light;
pub mod shape;
pub mod intersect;
pub mod world;

pub mod camera;
pub mod canvas;
pub mod scene;

/// Compares two floats approximately, within `consts::FEQ_EPSILON`.
pub fn feq(left: f64, right: f64) -> bool {
    (left - right).abs() < consts::FEQ_EPSILON
}
