use crate::consts::FEQ_EPSILON;

use crate::tuple::Tuple4D;
use crate::ray::Ray4D;
use crate::shape::{ Shape, normal_at };
use crate::error::TraceResult;

/// An intersection.
///
/// This structure assumes that some ray produced an intersection. Parameter
/// `t` is analogous to the parameter in the ray equation `position(t)`, and
/// `what` refers to the shape the ray intersected.
#[derive(Copy, Clone, Debug)]
pub struct Intersection<'a> {
    pub t: f64,
    pub what: &'a Shape,
}

impl<'a> Intersection<'a> {
    pub fn new(t: f64, what: &'a Shape) -> Intersection<'a> {
        Intersection { t, what }
    }
}

/// Two intersections are equal when their `t` values match and they refer to
/// the *same* shape, not merely an equal one.
impl<'a> PartialEq for Intersection<'a> {
    fn eq(&self, other: &Intersection<'a>) -> bool {
        self.t == other.t && std::ptr::eq(self.what, other.what)
    }
}

/// A collection of intersections, sortable by `t`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Intersections<'a> {
    pub intersections: Vec<Intersection<'a>>,
}

impl<'a> Intersections<'a> {
    pub fn new() -> Intersections<'a> {
        Intersections { intersections: Vec::new() }
    }

    /// Sorts intersections in ascending order of `t`, discarding any with a
    /// non-finite `t` first so the comparison is total.
    pub fn sort(&mut self) {
        self.intersections.retain(|i| i.t.is_finite());
        self.intersections.sort_by(|a, b|
            a.t.partial_cmp(&b.t).unwrap()
        );
    }

    /// Checks which intersection is visible from the origin of a ray.
    ///
    /// The "hit" is the intersection with the lowest nonnegative `t`. The
    /// collection is sorted before selection, so callers need not keep it
    /// ordered themselves. Returns `None` when every intersection lies
    /// behind the ray.
    pub fn hit(&mut self) -> Option<Intersection<'a>> {
        self.sort();
        self.intersections.iter().find(|i| i.t >= 0.0).copied()
    }
}

/// Values describing the state of a hit.
///
/// Precomputed once per hit and shared by the shading routines: the point of
/// intersection, the eye and normal vectors there, and whether the hit
/// occurred on the inside of its shape.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntersectionComputation<'a> {
    /// The `t` of the underlying intersection.
    pub t: f64,

    /// The shape that was hit.
    pub obj: &'a Shape,

    /// The point of intersection in world space.
    pub point: Tuple4D,

    /// The point of intersection, nudged slightly along the normal.
    ///
    /// Shadow rays originate here rather than at `point`, so that a surface
    /// doesn't cast a shadow on itself through floating-point error.
    pub over_point: Tuple4D,

    /// A vector pointing from the intersection back towards the eye.
    pub eyev: Tuple4D,

    /// The surface normal at the intersection, flipped if `inside`.
    pub normalv: Tuple4D,

    /// Whether the intersection occurred inside the shape.
    pub inside: bool,
}

impl<'a> IntersectionComputation<'a> {
    /// Precomputes the state of an intersection against a ray.
    ///
    /// When the ray originates inside the shape, the surface normal points
    /// away from the eye; it is negated so shading sees a normal facing the
    /// viewer, and `inside` records that this happened.
    pub fn new(r: &Ray4D, hit: &Intersection<'a>)
        -> TraceResult<IntersectionComputation<'a>> {
        let t = hit.t;
        let obj = hit.what;

        let point = r.position(t);
        let eyev = -r.direction;
        let mut normalv = normal_at(obj, point)?;

        let inside = normalv.dot(&eyev) < 0.0;
        if inside {
            normalv = -normalv;
        }

        let over_point = point + normalv * FEQ_EPSILON;

        Ok(IntersectionComputation {
            t, obj, point, over_point, eyev, normalv, inside,
        })
    }
}

#[test]
fn hit_with_all_positive_t() {
    let s = Shape::sphere();
    let i1 = Intersection::new(1.0, &s);
    let i2 = Intersection::new(2.0, &s);

    let mut is = Intersections { intersections: vec![i2, i1] };
    assert_eq!(is.hit(), Some(i1));
}

#[test]
fn hit_with_some_negative_t() {
    let s = Shape::sphere();
    let i1 = Intersection::new(-1.0, &s);
    let i2 = Intersection::new(1.0, &s);

    let mut is = Intersections { intersections: vec![i2, i1] };
    assert_eq!(is.hit(), Some(i2));
}

#[test]
fn hit_with_all_negative_t() {
    let s = Shape::sphere();
    let i1 = Intersection::new(-2.0, &s);
    let i2 = Intersection::new(-1.0, &s);

    let mut is = Intersections { intersections: vec![i2, i1] };
    assert_eq!(is.hit(), None);
}

#[test]
fn hit_is_lowest_nonnegative_t() {
    let s = Shape::sphere();
    let i1 = Intersection::new(5.0, &s);
    let i2 = Intersection::new(7.0, &s);
    let i3 = Intersection::new(-3.0, &s);
    let i4 = Intersection::new(2.0, &s);

    let mut is = Intersections { intersections: vec![i1, i2, i3, i4] };
    assert_eq!(is.hit(), Some(i4));
}

#[test]
fn hit_at_t_zero_counts() {
    let s = Shape::sphere();
    let i1 = Intersection::new(0.0, &s);
    let i2 = Intersection::new(4.0, &s);

    let mut is = Intersections { intersections: vec![i2, i1] };
    assert_eq!(is.hit(), Some(i1));
}

#[test]
fn precompute_intersection_state() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );
    let s = Shape::sphere();
    let i = Intersection::new(4.0, &s);

    let comps = IntersectionComputation::new(&r, &i).unwrap();
    assert_eq!(comps.t, i.t);
    assert!(std::ptr::eq(comps.obj, i.what));
    assert_eq!(comps.point, Tuple4D::point(0.0, 0.0, -1.0));
    assert_eq!(comps.eyev, Tuple4D::vector(0.0, 0.0, -1.0));
    assert_eq!(comps.normalv, Tuple4D::vector(0.0, 0.0, -1.0));
}

#[test]
fn hit_intersection_outside_shape() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );
    let s = Shape::sphere();
    let i = Intersection::new(4.0, &s);

    let comps = IntersectionComputation::new(&r, &i).unwrap();
    assert!(!comps.inside);
}

#[test]
fn hit_intersection_inside_shape() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );
    let s = Shape::sphere();
    let i = Intersection::new(1.0, &s);

    let comps = IntersectionComputation::new(&r, &i).unwrap();
    assert_eq!(comps.point, Tuple4D::point(0.0, 0.0, 1.0));
    assert_eq!(comps.eyev, Tuple4D::vector(0.0, 0.0, -1.0));
    assert!(comps.inside);

    // The normal is inverted so that it faces the eye.
    assert_eq!(comps.normalv, Tuple4D::vector(0.0, 0.0, -1.0));
}

#[test]
fn hit_should_offset_point() {
    use crate::matrix::Matrix4D;

    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );

    let mut s = Shape::sphere();
    s.transform = Matrix4D::translation(0.0, 0.0, 1.0);

    let i = Intersection::new(5.0, &s);
    let comps = IntersectionComputation::new(&r, &i).unwrap();

    assert!(comps.over_point.z < -FEQ_EPSILON / 2.0);
    assert!(comps.point.z > comps.over_point.z);
}
