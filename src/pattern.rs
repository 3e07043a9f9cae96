use crate::feq;
use crate::tuple::Tuple4D;
use crate::color::Color;
use crate::matrix::Matrix4D;
use crate::shape::Shape;
use crate::error::TraceResult;

/// The color function a `Pattern` evaluates in pattern space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PatternKind {
    /// Alternates colors by `floor(x) mod 2`; y and z are ignored.
    Stripe,

    /// Linearly interpolates between the two colors over the fractional part
    /// of x; y and z are ignored.
    Gradient,

    /// Alternates colors in concentric rings by `floor(sqrt(x² + z²)) mod 2`.
    Ring,

    /// Alternates colors in unit cubes by `floor(x)+floor(y)+floor(z) mod 2`;
    /// no two adjacent cubes share a color.
    Checker,
}

/// A two-color pattern with its own transform.
///
/// Patterns are sampled in *pattern space*: a world point is first converted
/// to the owning shape's object space, then through this pattern's inverse
/// transform, and only then handed to the color function.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pattern {
    kind: PatternKind,
    primary: Color,
    secondary: Color,
    transform: Matrix4D,
}

impl Pattern {
    fn new(kind: PatternKind, primary: Color, secondary: Color) -> Pattern {
        Pattern {
            kind,
            primary,
            secondary,
            transform: Matrix4D::identity(),
        }
    }

    /// Creates a stripe pattern alternating along the X axis.
    pub fn stripe(primary: Color, secondary: Color) -> Pattern {
        Pattern::new(PatternKind::Stripe, primary, secondary)
    }

    /// Creates a gradient pattern blending along the X axis.
    pub fn gradient(primary: Color, secondary: Color) -> Pattern {
        Pattern::new(PatternKind::Gradient, primary, secondary)
    }

    /// Creates a ring pattern alternating in the XZ plane.
    pub fn ring(primary: Color, secondary: Color) -> Pattern {
        Pattern::new(PatternKind::Ring, primary, secondary)
    }

    /// Creates a 3D checker pattern.
    pub fn checker(primary: Color, secondary: Color) -> Pattern {
        Pattern::new(PatternKind::Checker, primary, secondary)
    }

    /// Returns the same pattern with a different pattern-space transform.
    pub fn with_transform(self, transform: Matrix4D) -> Pattern {
        Pattern { transform, ..self }
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    pub fn primary(&self) -> Color {
        self.primary
    }

    pub fn secondary(&self) -> Color {
        self.secondary
    }

    pub fn transform(&self) -> &Matrix4D {
        &self.transform
    }

    /// Evaluates the pattern color at a point already in pattern space.
    pub fn pattern_at(&self, p: Tuple4D) -> Color {
        match self.kind {
            PatternKind::Stripe => {
                if feq(p.x.floor().rem_euclid(2.0), 0.0) {
                    self.primary
                } else {
                    self.secondary
                }
            },

            PatternKind::Gradient => {
                let distance = self.secondary - self.primary;
                let fraction = p.x - p.x.floor();

                self.primary + distance * fraction
            },

            PatternKind::Ring => {
                let radius = (p.x.powi(2) + p.z.powi(2)).sqrt();
                if feq(radius.floor().rem_euclid(2.0), 0.0) {
                    self.primary
                } else {
                    self.secondary
                }
            },

            PatternKind::Checker => {
                let cell = p.x.floor() + p.y.floor() + p.z.floor();
                if feq(cell.rem_euclid(2.0), 0.0) {
                    self.primary
                } else {
                    self.secondary
                }
            },
        }
    }

    /// Evaluates the pattern color at a world-space point on a shape.
    ///
    /// Composes two conversions: world space to object space through the
    /// shape's inverse transform, then object space to pattern space through
    /// this pattern's own inverse transform. Either inversion can fail for a
    /// degenerate transform, and the failure propagates.
    pub fn pattern_at_object(&self, obj: &Shape, world_point: Tuple4D)
        -> TraceResult<Color> {
        let object_point = obj.world_to_object(world_point)?;
        let pattern_point = self.transform.inverse()? * object_point;

        Ok(self.pattern_at(pattern_point))
    }
}

#[test]
fn stripe_pattern_is_constant_along_y() {
    let pattern = Pattern::stripe(Color::white(), Color::black());

    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, 0.0)),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 1.0, 0.0)),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 2.0, 0.0)),
        Color::white());
}

#[test]
fn stripe_pattern_is_constant_along_z() {
    let pattern = Pattern::stripe(Color::white(), Color::black());

    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, 0.0)),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, 1.0)),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, 2.0)),
        Color::white());
}

#[test]
fn stripe_pattern_alternates_along_x() {
    let pattern = Pattern::stripe(Color::white(), Color::black());

    assert_eq!(pattern.pattern_at(Tuple4D::point( 0.0, 0.0, 0.0)),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple4D::point( 0.9, 0.0, 0.0)),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple4D::point( 1.0, 0.0, 0.0)),
        Color::black());
    assert_eq!(pattern.pattern_at(Tuple4D::point(-0.1, 0.0, 0.0)),
        Color::black());
    assert_eq!(pattern.pattern_at(Tuple4D::point(-1.0, 0.0, 0.0)),
        Color::black());
    assert_eq!(pattern.pattern_at(Tuple4D::point(-1.1, 0.0, 0.0)),
        Color::white());
}

#[test]
fn gradient_interpolates_between_colors() {
    let pattern = Pattern::gradient(Color::white(), Color::black());

    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, 0.0)),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.25, 0.0, 0.0)),
        Color::rgb(0.75, 0.75, 0.75));
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.5, 0.0, 0.0)),
        Color::rgb(0.5, 0.5, 0.5));
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.75, 0.0, 0.0)),
        Color::rgb(0.25, 0.25, 0.25));
}

#[test]
fn ring_extends_in_x_and_z() {
    let pattern = Pattern::ring(Color::white(), Color::black());

    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, 0.0)),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple4D::point(1.0, 0.0, 0.0)),
        Color::black());
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, 1.0)),
        Color::black());
    // Just past sqrt(2)/2, so still within the second ring.
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.708, 0.0, 0.708)),
        Color::black());
}

#[test]
fn checker_repeats_in_x() {
    let pattern = Pattern::checker(Color::white(), Color::black());

    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, 0.0)),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.99, 0.0, 0.0)),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple4D::point(1.01, 0.0, 0.0)),
        Color::black());
}

#[test]
fn checker_repeats_in_y() {
    let pattern = Pattern::checker(Color::white(), Color::black());

    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.99, 0.0)),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 1.01, 0.0)),
        Color::black());
}

#[test]
fn checker_repeats_in_z() {
    let pattern = Pattern::checker(Color::white(), Color::black());

    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, 0.99)),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, 1.01)),
        Color::black());
}

#[test]
fn stripes_with_object_transform() {
    let mut object = Shape::sphere();
    object.transform = Matrix4D::scaling(2.0, 2.0, 2.0);

    let pattern = Pattern::stripe(Color::white(), Color::black());
    let c = pattern.pattern_at_object(
        &object, Tuple4D::point(1.5, 0.0, 0.0)
    ).unwrap();

    assert_eq!(c, Color::white());
}

#[test]
fn stripes_with_pattern_transform() {
    let object = Shape::sphere();
    let pattern = Pattern::stripe(Color::white(), Color::black())
        .with_transform(Matrix4D::scaling(2.0, 2.0, 2.0));

    let c = pattern.pattern_at_object(
        &object, Tuple4D::point(1.5, 0.0, 0.0)
    ).unwrap();

    assert_eq!(c, Color::white());
}

#[test]
fn stripes_with_object_and_pattern_transform() {
    let mut object = Shape::sphere();
    object.transform = Matrix4D::scaling(2.0, 2.0, 2.0);

    let pattern = Pattern::stripe(Color::white(), Color::black())
        .with_transform(Matrix4D::translation(0.5, 0.0, 0.0));

    let c = pattern.pattern_at_object(
        &object, Tuple4D::point(2.5, 0.0, 0.0)
    ).unwrap();

    assert_eq!(c, Color::white());
}

#[test]
fn pattern_on_shape_with_singular_transform_fails() {
    use crate::error::TraceError;

    let mut object = Shape::sphere();
    object.transform = Matrix4D::scaling(0.0, 0.0, 0.0);

    let pattern = Pattern::stripe(Color::white(), Color::black());
    let res = pattern.pattern_at_object(&object, Tuple4D::point(1.0, 0.0, 0.0));

    assert_eq!(res, Err(TraceError::NonInvertibleMatrix));
}
