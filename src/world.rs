use crate::tuple::Tuple4D;
use crate::matrix::Matrix4D;
use crate::color::Color;
use crate::ray::Ray4D;
use crate::shape::{ Shape, intersect };
use crate::intersect::{ Intersections, IntersectionComputation };
use crate::light::{ PointLight, Material, lighting };
use crate::error::TraceResult;

/// A world of shapes lit by a single point light.
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    pub objects: Vec<Shape>,
    pub light_source: PointLight,
}

/// The default world: two concentric spheres, the outer one green-ish, the
/// inner one scaled to half size, lit from the upper left.
impl Default for World {
    fn default() -> World {
        let light_source = PointLight::new(
            Color::rgb(1.0, 1.0, 1.0),
            Tuple4D::point(-10.0, 10.0, -10.0),
        );

        let mut s1 = Shape::sphere();
        s1.material = Material::new(
            Color::rgb(0.8, 1.0, 0.6), 0.1, 0.7, 0.2, 200.0
        ).expect("literal coefficients are nonnegative");

        let mut s2 = Shape::sphere();
        s2.transform = Matrix4D::scaling(0.5, 0.5, 0.5);

        World {
            objects: vec![s1, s2],
            light_source,
        }
    }
}

impl World {
    /// Creates a world with no shapes in it.
    pub fn empty() -> World {
        World {
            objects: Vec::new(),
            light_source: Default::default(),
        }
    }

    /// Intersects a ray against every shape in the world.
    ///
    /// The returned collection aggregates the intersections of all shapes,
    /// sorted in ascending order of `t`.
    pub fn intersect(&self, r: Ray4D) -> TraceResult<Intersections> {
        let mut is = Intersections::new();
        for obj in self.objects.iter() {
            is.intersections.extend(intersect(obj, r)?.intersections);
        }

        is.sort();
        Ok(is)
    }

    /// Checks whether a point is shadowed from the world's light.
    ///
    /// Casts a ray from the point towards the light; if anything intersects
    /// that ray *before* it reaches the light, the point is in shadow.
    pub fn is_shadowed(&self, p: Tuple4D) -> TraceResult<bool> {
        let v = self.light_source.position - p;
        let distance = v.magnitude();
        let direction = v.normalize()?;

        let r = Ray4D::new(p, direction);
        let mut is = self.intersect(r)?;

        Ok(match is.hit() {
            Some(h) => h.t < distance,
            None => false,
        })
    }

    /// Shades a precomputed intersection.
    ///
    /// Shadow testing uses the intersection's `over_point`, so a surface
    /// never shadows itself at its own point of intersection.
    pub fn shade_hit(&self, comps: &IntersectionComputation)
        -> TraceResult<Color> {
        let shadowed = self.is_shadowed(comps.over_point)?;

        lighting(
            &comps.obj.material,
            comps.obj,
            self.light_source,
            comps.over_point,
            comps.eyev,
            comps.normalv,
            shadowed,
        )
    }

    /// The color a ray produces in this world.
    ///
    /// A ray which hits nothing yields black.
    pub fn color_at(&self, r: Ray4D) -> TraceResult<Color> {
        let mut is = self.intersect(r)?;

        match is.hit() {
            Some(hit) => {
                let comps = IntersectionComputation::new(&r, &hit)?;
                self.shade_hit(&comps)
            },
            None => Ok(Color::black()),
        }
    }
}

#[test]
fn intersect_world_with_ray() {
    let w: World = Default::default();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );

    let is = w.intersect(r).unwrap();

    assert_eq!(is.intersections.len(), 4);
    assert_eq!(is.intersections[0].t, 4.0);
    assert_eq!(is.intersections[1].t, 4.5);
    assert_eq!(is.intersections[2].t, 5.5);
    assert_eq!(is.intersections[3].t, 6.0);
}

#[test]
fn shade_an_intersection() {
    use crate::intersect::Intersection;

    let w: World = Default::default();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );

    let shape = &w.objects[0];
    let i = Intersection::new(4.0, shape);

    let comps = IntersectionComputation::new(&r, &i).unwrap();
    let c = w.shade_hit(&comps).unwrap();

    assert_eq!(c, Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn shade_an_intersection_from_inside() {
    use crate::intersect::Intersection;

    let mut w: World = Default::default();
    w.light_source = PointLight::new(
        Color::rgb(1.0, 1.0, 1.0),
        Tuple4D::point(0.0, 0.25, 0.0),
    );

    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );

    let shape = &w.objects[1];
    let i = Intersection::new(0.5, shape);

    let comps = IntersectionComputation::new(&r, &i).unwrap();
    let c = w.shade_hit(&comps).unwrap();

    assert_eq!(c, Color::rgb(0.90498, 0.90498, 0.90498));
}

#[test]
fn color_when_ray_misses() {
    let w: World = Default::default();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 1.0, 0.0),
    );

    assert_eq!(w.color_at(r).unwrap(), Color::black());
}

#[test]
fn color_when_ray_hits() {
    let w: World = Default::default();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );

    assert_eq!(w.color_at(r).unwrap(), Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn color_with_intersection_behind_ray() {
    let mut w: World = Default::default();

    w.objects[0].material
        = w.objects[0].material.with_ambient(1.0).unwrap();
    w.objects[1].material
        = w.objects[1].material.with_ambient(1.0).unwrap();

    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 0.75),
        Tuple4D::vector(0.0, 0.0, -1.0),
    );

    let inner_color = w.objects[1].material.color();
    assert_eq!(w.color_at(r).unwrap(), inner_color);
}

#[test]
fn no_shadow_when_nothing_obstructs_light() {
    let w: World = Default::default();
    let p = Tuple4D::point(0.0, 10.0, 0.0);

    assert!(!w.is_shadowed(p).unwrap());
}

#[test]
fn shadow_when_object_between_point_and_light() {
    let w: World = Default::default();
    let p = Tuple4D::point(10.0, -10.0, 10.0);

    assert!(w.is_shadowed(p).unwrap());
}

#[test]
fn no_shadow_when_object_behind_light() {
    let w: World = Default::default();
    let p = Tuple4D::point(-20.0, 20.0, -20.0);

    assert!(!w.is_shadowed(p).unwrap());
}

#[test]
fn no_shadow_when_object_behind_point() {
    let w: World = Default::default();
    let p = Tuple4D::point(-2.0, 2.0, -2.0);

    assert!(!w.is_shadowed(p).unwrap());
}

#[test]
fn shade_hit_given_intersection_in_shadow() {
    use crate::intersect::Intersection;

    let mut w = World::empty();
    w.light_source = PointLight::new(
        Color::rgb(1.0, 1.0, 1.0),
        Tuple4D::point(0.0, 0.0, -10.0),
    );

    let s1 = Shape::sphere();
    let mut s2 = Shape::sphere();
    s2.transform = Matrix4D::translation(0.0, 0.0, 10.0);

    w.objects = vec![s1, s2];

    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 5.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );
    let i = Intersection::new(4.0, &w.objects[1]);

    let comps = IntersectionComputation::new(&r, &i).unwrap();
    let c = w.shade_hit(&comps).unwrap();

    assert_eq!(c, Color::rgb(0.1, 0.1, 0.1));
}
