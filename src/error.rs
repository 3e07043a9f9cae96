use thiserror::Error;

/// Errors produced by the ray tracing core.
///
/// Every failure here is local and deterministic; retrying a computation with
/// the same inputs reproduces the same error. Consumers propagate these with
/// `?` rather than substituting defaults.
#[derive(Copy, Clone, Debug, Error, PartialEq)]
pub enum TraceError {
    /// The matrix determinant is exactly zero, so no inverse exists.
    #[error("matrix is not invertible (determinant is zero)")]
    NonInvertibleMatrix,

    /// A Phong coefficient was negative. Coefficients are rejected outright,
    /// never clamped.
    #[error("material parameter `{name}` must be nonnegative (got {value})")]
    InvalidMaterialParameter { name: &'static str, value: f64 },

    /// A zero-magnitude vector was normalized.
    #[error("cannot normalize a vector with zero magnitude")]
    DegenerateVector,
}

pub type TraceResult<T> = Result<T, TraceError>;
