use crate::color::Color;
use crate::pattern::Pattern;
use crate::tuple::Tuple4D;
use crate::shape::Shape;
use crate::error::{ TraceError, TraceResult };

/// A point light.
///
/// A very simple light source. Provides a color and a position where light is
/// produced from.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointLight {
    pub intensity: Color,
    pub position: Tuple4D,
}

impl PointLight {
    /// Creates a point light.
    ///
    /// If `position` isn't a point, it is converted to a point automatically.
    pub fn new(intensity: Color, mut position: Tuple4D) -> PointLight {
        if !position.is_point() {
            position.w = 1.0;
        }

        PointLight { intensity, position }
    }
}

/// A material record.
///
/// Materials use attributes from the Phong reflection model: ambient,
/// diffuse, specular and shininess. All four coefficients must be
/// nonnegative; construction and reconfiguration reject negative values with
/// `TraceError::InvalidMaterialParameter` instead of clamping. Fields are
/// private so no invalid state can be written in from the outside.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    color: Color,
    pattern: Option<Pattern>,

    ambient: f64,
    diffuse: f64,
    specular: f64,
    shininess: f64,
}

impl Default for Material {
    fn default() -> Material {
        Material {
            color: Color::rgb(1.0, 1.0, 1.0),
            pattern: None,

            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.0,
        }
    }
}

fn validated(name: &'static str, value: f64) -> TraceResult<f64> {
    if value < 0.0 {
        Err(TraceError::InvalidMaterialParameter { name, value })
    } else {
        Ok(value)
    }
}

impl Material {
    /// Creates a material, validating all four Phong coefficients.
    pub fn new(color: Color, ambient: f64, diffuse: f64, specular: f64,
        shininess: f64) -> TraceResult<Material> {
        Ok(Material {
            color,
            pattern: None,
            ambient: validated("ambient", ambient)?,
            diffuse: validated("diffuse", diffuse)?,
            specular: validated("specular", specular)?,
            shininess: validated("shininess", shininess)?,
        })
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn pattern(&self) -> Option<&Pattern> {
        self.pattern.as_ref()
    }

    pub fn ambient(&self) -> f64 {
        self.ambient
    }

    pub fn diffuse(&self) -> f64 {
        self.diffuse
    }

    pub fn specular(&self) -> f64 {
        self.specular
    }

    pub fn shininess(&self) -> f64 {
        self.shininess
    }

    /// Returns the same material with a different surface color.
    pub fn with_color(self, color: Color) -> Material {
        Material { color, ..self }
    }

    /// Returns the same material with a pattern applied.
    pub fn with_pattern(self, pattern: Pattern) -> Material {
        Material { pattern: Some(pattern), ..self }
    }

    /// Returns the same material with a different ambient coefficient.
    pub fn with_ambient(self, ambient: f64) -> TraceResult<Material> {
        Ok(Material { ambient: validated("ambient", ambient)?, ..self })
    }

    /// Returns the same material with a different diffuse coefficient.
    pub fn with_diffuse(self, diffuse: f64) -> TraceResult<Material> {
        Ok(Material { diffuse: validated("diffuse", diffuse)?, ..self })
    }

    /// Returns the same material with a different specular coefficient.
    pub fn with_specular(self, specular: f64) -> TraceResult<Material> {
        Ok(Material { specular: validated("specular", specular)?, ..self })
    }

    /// Returns the same material with a different shininess exponent.
    pub fn with_shininess(self, shininess: f64) -> TraceResult<Material> {
        Ok(Material { shininess: validated("shininess", shininess)?, ..self })
    }
}

/// Calculate the lighting of a point in an environment.
///
/// This function takes a material, the shape it belongs to, a single light,
/// a point, the eye vector and the normal vector, and calculates how the
/// light looks from the eye using the Phong reflection model.
///
/// The material color is resolved first: a patterned material samples its
/// pattern at the point (in pattern space), otherwise the flat color is used.
///
/// If this point is in a shadow (parameter `in_shadow`), only ambient light
/// is used.
pub fn lighting(m: &Material, obj: &Shape, light: PointLight,
    point: Tuple4D, eyev: Tuple4D, normalv: Tuple4D, in_shadow: bool)
    -> TraceResult<Color> {
    // If material m has some pattern, use that for color
    let color = if let Some(pat) = m.pattern() {
        pat.pattern_at_object(obj, point)?
    } else {
        m.color()
    };

    // Combine surface color with light's color
    let effective_color = color * light.intensity;

    // Find direction to light source
    let lightv = (light.position - point).normalize()?;

    // Compute ambient light
    let ambient = effective_color * m.ambient();

    // If the point is in a shadow, only calculate ambient light
    if in_shadow {
        return Ok(ambient);
    }

    // Declare diffuse and specular variables for calculating light
    let diffuse;
    let specular;

    // For the side of the surface with no light, use only ambient light
    let light_dot_normal = lightv.dot(&normalv);
    if light_dot_normal < 0.0 {
        diffuse = Color::black();
        specular = Color::black();
    } else {
        diffuse = effective_color * m.diffuse() * light_dot_normal;

        let reflectv = (-lightv).reflect(&normalv);
        let reflect_dot_eye = reflectv.dot(&eyev);

        // If no specular reflection, set the specular light to black
        if reflect_dot_eye <= 0.0 {
            specular = Color::black();
        } else {
            // Otherwise, calculate the shininess factor and apply
            let factor = reflect_dot_eye.powf(m.shininess());
            specular = light.intensity * m.specular() * factor;
        }
    }

    Ok(ambient + diffuse + specular)
}

#[test]
fn material_rejects_negative_coefficient_at_construction() {
    let res = Material::new(Color::white(), -0.1, 0.9, 0.9, 200.0);

    assert_eq!(res, Err(TraceError::InvalidMaterialParameter {
        name: "ambient",
        value: -0.1,
    }));
}

#[test]
fn material_rejects_negative_coefficient_at_reconfiguration() {
    let m: Material = Default::default();

    assert!(m.with_diffuse(-1.0).is_err());
    assert!(m.with_specular(-0.5).is_err());
    assert!(m.with_shininess(-200.0).is_err());
    assert!(m.with_ambient(0.0).is_ok());
}

#[test]
fn default_material_is_standard_phong() {
    let m: Material = Default::default();

    assert_eq!(m.color(), Color::white());
    assert_eq!(m.ambient(), 0.1);
    assert_eq!(m.diffuse(), 0.9);
    assert_eq!(m.specular(), 0.9);
    assert_eq!(m.shininess(), 200.0);
}

#[test]
fn eye_between_light_and_surface() {
    let m: Material = Default::default();
    let position = Tuple4D::point(0.0, 0.0, 0.0);
    let s = Shape::sphere();

    let eyev = Tuple4D::vector(0.0, 0.0, -1.0);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);
    let light = PointLight::new(
        Color::rgb(1.0, 1.0, 1.0),
        Tuple4D::point(0.0, 0.0, -10.0),
    );

    let res = lighting(&m, &s, light, position, eyev, normalv, false).unwrap();
    assert_eq!(res, Color::rgb(1.9, 1.9, 1.9));
}

#[test]
fn eye_between_light_and_surface_offset_45() {
    let m: Material = Default::default();
    let position = Tuple4D::point(0.0, 0.0, 0.0);
    let s = Shape::sphere();

    let eyev = Tuple4D::vector(0.0, 2.0f64.sqrt() / 2.0, 2.0f64.sqrt() / 2.0);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);
    let light = PointLight::new(
        Color::rgb(1.0, 1.0, 1.0),
        Tuple4D::point(0.0, 0.0, -10.0),
    );

    let res = lighting(&m, &s, light, position, eyev, normalv, false).unwrap();
    assert_eq!(res, Color::rgb(1.0, 1.0, 1.0));
}

#[test]
fn eye_opposite_from_surface_offset_45() {
    let m: Material = Default::default();
    let position = Tuple4D::point(0.0, 0.0, 0.0);
    let s = Shape::sphere();

    let eyev = Tuple4D::vector(0.0, 0.0, -1.0);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);
    let light = PointLight::new(
        Color::rgb(1.0, 1.0, 1.0),
        Tuple4D::point(0.0, 10.0, -10.0),
    );

    let res = lighting(&m, &s, light, position, eyev, normalv, false).unwrap();
    assert_eq!(res, Color::rgb(0.7364, 0.7364, 0.7364));
}

#[test]
fn eye_opposite_from_surface_in_reflection() {
    let m: Material = Default::default();
    let position = Tuple4D::point(0.0, 0.0, 0.0);
    let s = Shape::sphere();

    let eyev = Tuple4D::vector(0., -(2.0f64.sqrt())/2., -(2.0f64.sqrt())/2.);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);
    let light = PointLight::new(
        Color::rgb(1.0, 1.0, 1.0),
        Tuple4D::point(0.0, 10.0, -10.0),
    );

    let res = lighting(&m, &s, light, position, eyev, normalv, false).unwrap();
    assert_eq!(res, Color::rgb(1.6364, 1.6364, 1.6364));
}

#[test]
fn eye_across_surface_from_light() {
    let m: Material = Default::default();
    let position = Tuple4D::point(0.0, 0.0, 0.0);
    let s = Shape::sphere();

    let eyev = Tuple4D::vector(0.0, 0.0, -1.0);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);
    let light = PointLight::new(
        Color::rgb(1.0, 1.0, 1.0),
        Tuple4D::point(0.0, 0.0, 10.0),
    );

    let res = lighting(&m, &s, light, position, eyev, normalv, false).unwrap();
    assert_eq!(res, Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn lighting_with_surface_in_shadow() {
    let m: Material = Default::default();
    let position = Tuple4D::point(0.0, 0.0, 0.0);
    let s = Shape::sphere();

    let eyev = Tuple4D::vector(0.0, 0.0, -1.0);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);
    let light = PointLight::new(
        Color::rgb(1.0, 1.0, 1.0),
        Tuple4D::point(0.0, 0.0, -10.0),
    );

    let res = lighting(&m, &s, light, position, eyev, normalv, true).unwrap();
    assert_eq!(res, Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn lighting_with_stripe_pattern() {
    // Note that ONLY ambient light is included, as the color of ambient
    // light is mostly predictable
    let m = Material::new(Color::rgb(0.5, 0.5, 0.5), 1.0, 0.0, 0.0, 0.0)
        .unwrap()
        .with_pattern(Pattern::stripe(Color::white(), Color::black()));

    let mut s = Shape::sphere();
    s.material = m;

    let eyev = Tuple4D::vector(0.0, 0.0, -1.0);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);
    let light = PointLight::new(
        Color::white(), Tuple4D::point(0.0, 0.0, -10.0)
    );

    assert_eq!(
        Color::white(),
        lighting(&m, &s, light, Tuple4D::point(0.9, 0.0, 0.0),
            eyev, normalv, false).unwrap()
    );

    assert_eq!(
        Color::black(),
        lighting(&m, &s, light, Tuple4D::point(1.1, 0.0, 0.0),
            eyev, normalv, false).unwrap()
    );
}
