use crate::consts::FEQ_EPSILON;

use crate::tuple::Tuple4D;
use crate::matrix::Matrix4D;
use crate::ray::Ray4D;
use crate::light::Material;
use crate::intersect::{ Intersection, Intersections };
use crate::error::TraceResult;

/// The geometry a `Shape` carries.
///
/// Every variant is defined in its own object space; the owning `Shape`'s
/// transform places it in the world. Dispatch on this enum happens in
/// exactly two places, `local_intersect` and `local_normal_at`, so adding a
/// primitive means adding one variant and two match arms.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ShapeType {
    /// A unit sphere centered on the object-space origin.
    Sphere,

    /// The plane y = 0, extending infinitely in x and z.
    Plane,
}

/// A shape: geometry, a transform and a material.
///
/// The transform maps object space to world space. Rays are intersected by
/// converting them *into* object space with the inverse transform, so the
/// geometry code never needs to know where the shape sits in the world.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub ty: ShapeType,
    pub transform: Matrix4D,
    pub material: Material,
}

impl Default for Shape {
    fn default() -> Shape {
        Shape::sphere()
    }
}

impl Shape {
    /// Creates a unit sphere with an identity transform.
    pub fn sphere() -> Shape {
        Shape {
            ty: ShapeType::Sphere,
            transform: Matrix4D::identity(),
            material: Default::default(),
        }
    }

    /// Creates the plane y = 0 with an identity transform.
    pub fn plane() -> Shape {
        Shape {
            ty: ShapeType::Plane,
            transform: Matrix4D::identity(),
            material: Default::default(),
        }
    }

    /// Intersects an object-space ray against this shape's geometry.
    ///
    /// Callers are expected to have already converted the ray to object
    /// space; `intersect` does this for world-space rays.
    pub fn local_intersect(&self, ray: &Ray4D) -> Intersections {
        match self.ty {
            ShapeType::Sphere => self.intersect_sphere(ray),
            ShapeType::Plane => self.intersect_plane(ray),
        }
    }

    /// The object-space normal at an object-space point.
    ///
    /// The point is assumed to lie on the shape's surface.
    pub fn local_normal_at(&self, at: &Tuple4D) -> Tuple4D {
        match self.ty {
            // The normal on a unit sphere is the vector from the origin to
            // the point itself.
            ShapeType::Sphere => {
                Tuple4D::vector(at.x, at.y, at.z)
            },

            ShapeType::Plane => {
                Tuple4D::vector(0.0, 1.0, 0.0)
            },
        }
    }

    /// Converts a world-space point to object space.
    ///
    /// Fails if this shape's transform is not invertible.
    pub fn world_to_object(&self, p: Tuple4D) -> TraceResult<Tuple4D> {
        Ok(self.transform.inverse()? * p)
    }

    /// Converts an object-space normal to a world-space normal.
    ///
    /// Uses the inverse transpose of the shape's transform, which preserves
    /// perpendicularity under nonuniform scaling where the plain transform
    /// would not. The `w` component is reset to 0 afterwards, since the
    /// transpose of a translation bleeds into it.
    pub fn normal_to_world(&self, n: Tuple4D) -> TraceResult<Tuple4D> {
        let mut world_normal = self.transform.inverse()?.transposition() * n;
        world_normal.w = 0.0;

        world_normal.normalize()
    }

    fn intersect_sphere(&self, ray: &Ray4D) -> Intersections {
        // Vector from the sphere's center to the ray origin
        let sphere_to_ray = ray.origin - Tuple4D::point(0.0, 0.0, 0.0);

        let a = ray.direction.dot(&ray.direction);
        let b = 2.0 * ray.direction.dot(&sphere_to_ray);
        let c = sphere_to_ray.dot(&sphere_to_ray) - 1.0;

        let discriminant = b.powi(2) - (4.0 * a * c);
        if discriminant < 0.0 {
            return Intersections::new();
        }

        // t1 <= t2 always holds; a is strictly positive for any real
        // direction, so dividing by 2a preserves the root order.
        let t1 = (-b - discriminant.sqrt()) / (2.0 * a);
        let t2 = (-b + discriminant.sqrt()) / (2.0 * a);

        Intersections {
            intersections: vec![
                Intersection::new(t1, self),
                Intersection::new(t2, self),
            ],
        }
    }

    fn intersect_plane(&self, ray: &Ray4D) -> Intersections {
        // A ray parallel to (or within) the plane never intersects it.
        if ray.direction.y.abs() < FEQ_EPSILON {
            return Intersections::new();
        }

        let t = -ray.origin.y / ray.direction.y;
        Intersections {
            intersections: vec![Intersection::new(t, self)],
        }
    }
}

/// Intersects a world-space ray with a shape.
///
/// The ray is converted to object space with the shape's inverse transform
/// before the geometry test runs. Intersection `t` values are measured along
/// the *original* ray, which falls out naturally: transforming the ray scales
/// its direction, not its parameterization.
pub fn intersect<'a>(s: &'a Shape, r: Ray4D) -> TraceResult<Intersections<'a>> {
    let transformed_ray = r.transform(s.transform.inverse()?);
    Ok(s.local_intersect(&transformed_ray))
}

/// The world-space surface normal of a shape at a world-space point.
///
/// Converts the point to object space, takes the object-space normal there,
/// then converts that normal back to world space (normalized).
pub fn normal_at(s: &Shape, world_point: Tuple4D) -> TraceResult<Tuple4D> {
    let local_point = s.world_to_object(world_point)?;
    let local_normal = s.local_normal_at(&local_point);

    s.normal_to_world(local_normal)
}

#[test]
fn ray_intersects_sphere_twice() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );
    let s = Shape::sphere();

    let is = intersect(&s, r).unwrap();
    assert_eq!(is.intersections.len(), 2);
    assert_eq!(is.intersections[0].t, 4.0);
    assert_eq!(is.intersections[1].t, 6.0);
}

#[test]
fn ray_tangent_to_sphere() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 1.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );
    let s = Shape::sphere();

    let is = intersect(&s, r).unwrap();
    assert_eq!(is.intersections.len(), 2);
    assert_eq!(is.intersections[0].t, 5.0);
    assert_eq!(is.intersections[1].t, 5.0);
}

#[test]
fn ray_misses_sphere() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 2.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );
    let s = Shape::sphere();

    let is = intersect(&s, r).unwrap();
    assert_eq!(is.intersections.len(), 0);
}

#[test]
fn ray_originates_within_sphere() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );
    let s = Shape::sphere();

    let is = intersect(&s, r).unwrap();
    assert_eq!(is.intersections.len(), 2);
    assert_eq!(is.intersections[0].t, -1.0);
    assert_eq!(is.intersections[1].t, 1.0);
}

#[test]
fn sphere_behind_ray() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 5.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );
    let s = Shape::sphere();

    let is = intersect(&s, r).unwrap();
    assert_eq!(is.intersections.len(), 2);
    assert_eq!(is.intersections[0].t, -6.0);
    assert_eq!(is.intersections[1].t, -4.0);
}

#[test]
fn intersect_scaled_sphere() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );

    let mut s = Shape::sphere();
    s.transform = Matrix4D::scaling(2.0, 2.0, 2.0);

    let is = intersect(&s, r).unwrap();
    assert_eq!(is.intersections.len(), 2);
    assert_eq!(is.intersections[0].t, 3.0);
    assert_eq!(is.intersections[1].t, 7.0);
}

#[test]
fn intersect_translated_sphere() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );

    let mut s = Shape::sphere();
    s.transform = Matrix4D::translation(5.0, 0.0, 0.0);

    let is = intersect(&s, r).unwrap();
    assert_eq!(is.intersections.len(), 0);
}

#[test]
fn intersect_sphere_with_singular_transform_fails() {
    use crate::error::TraceError;

    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );

    let mut s = Shape::sphere();
    s.transform = Matrix4D::scaling(0.0, 0.0, 0.0);

    assert_eq!(intersect(&s, r).unwrap_err(), TraceError::NonInvertibleMatrix);
}

#[test]
fn ray_parallel_to_plane() {
    let p = Shape::plane();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 10.0, 0.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );

    let is = intersect(&p, r).unwrap();
    assert_eq!(is.intersections.len(), 0);
}

#[test]
fn ray_coplanar_with_plane() {
    let p = Shape::plane();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );

    let is = intersect(&p, r).unwrap();
    assert_eq!(is.intersections.len(), 0);
}

#[test]
fn ray_intersects_plane_from_above() {
    let p = Shape::plane();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 1.0, 0.0),
        Tuple4D::vector(0.0, -1.0, 0.0),
    );

    let is = intersect(&p, r).unwrap();
    assert_eq!(is.intersections.len(), 1);
    assert_eq!(is.intersections[0].t, 1.0);
}

#[test]
fn ray_intersects_plane_from_below() {
    let p = Shape::plane();
    let r = Ray4D::new(
        Tuple4D::point(0.0, -1.0, 0.0),
        Tuple4D::vector(0.0, 1.0, 0.0),
    );

    let is = intersect(&p, r).unwrap();
    assert_eq!(is.intersections.len(), 1);
    assert_eq!(is.intersections[0].t, 1.0);
}

#[test]
fn sphere_normal_on_x_axis() {
    let s = Shape::sphere();
    let n = normal_at(&s, Tuple4D::point(1.0, 0.0, 0.0)).unwrap();

    assert_eq!(n, Tuple4D::vector(1.0, 0.0, 0.0));
}

#[test]
fn sphere_normal_at_nonaxial_point() {
    let s = Shape::sphere();
    let sqrt3_3 = 3.0f64.sqrt() / 3.0;
    let n = normal_at(&s, Tuple4D::point(sqrt3_3, sqrt3_3, sqrt3_3)).unwrap();

    assert_eq!(n, Tuple4D::vector(sqrt3_3, sqrt3_3, sqrt3_3));
}

#[test]
fn sphere_normal_is_normalized() {
    let s = Shape::sphere();
    let sqrt3_3 = 3.0f64.sqrt() / 3.0;
    let n = normal_at(&s, Tuple4D::point(sqrt3_3, sqrt3_3, sqrt3_3)).unwrap();

    assert_eq!(n, n.normalize().unwrap());
}

#[test]
fn translated_sphere_normal() {
    let mut s = Shape::sphere();
    s.transform = Matrix4D::translation(0.0, 1.0, 0.0);

    let n = normal_at(
        &s, Tuple4D::point(0.0, 1.70711, -0.70711)
    ).unwrap();

    assert_eq!(n, Tuple4D::vector(0.0, 0.70711, -0.70711));
}

#[test]
fn transformed_sphere_normal() {
    use std::f64::consts::PI;

    let mut s = Shape::sphere();
    s.transform = Matrix4D::scaling(1.0, 0.5, 1.0)
        * Matrix4D::rotation_z(PI / 5.0);

    let sqrt2_2 = 2.0f64.sqrt() / 2.0;
    let n = normal_at(&s, Tuple4D::point(0.0, sqrt2_2, -sqrt2_2)).unwrap();

    assert_eq!(n, Tuple4D::vector(0.0, 0.97014, -0.24254));
}

#[test]
fn plane_normal_is_constant() {
    let p = Shape::plane();

    let n1 = p.local_normal_at(&Tuple4D::point(0.0, 0.0, 0.0));
    let n2 = p.local_normal_at(&Tuple4D::point(10.0, 0.0, -10.0));
    let n3 = p.local_normal_at(&Tuple4D::point(-5.0, 0.0, 150.0));

    assert_eq!(n1, Tuple4D::vector(0.0, 1.0, 0.0));
    assert_eq!(n2, Tuple4D::vector(0.0, 1.0, 0.0));
    assert_eq!(n3, Tuple4D::vector(0.0, 1.0, 0.0));
}
