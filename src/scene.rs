use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{ Serialize, Deserialize };
use thiserror::Error;

use crate::tuple::Tuple4D;
use crate::matrix::Matrix4D;
use crate::color::Color;
use crate::shape::Shape;
use crate::pattern::Pattern;
use crate::light::{ PointLight, Material };
use crate::world::World;
use crate::camera::Camera;
use crate::error::TraceError;

/// Anything that can go wrong loading a scene description.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("couldn't read scene file: {0}")]
    Io(#[from] std::io::Error),

    #[error("couldn't parse scene file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unrecognized shape type `{0}`")]
    UnknownShapeType(String),

    #[error("unrecognized pattern type `{0}`")]
    UnknownPatternType(String),

    #[error("transform must have 16 elements in row-major order (got {0})")]
    BadTransform(usize),

    #[error(transparent)]
    Invalid(#[from] TraceError),
}

/// A renderable scene: a world and the camera framing it.
pub struct Scene {
    pub world: World,
    pub camera: Camera,
}

impl Scene {
    /// Loads a scene from a JSON description file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Scene, SceneError> {
        let file = File::open(path)?;
        let scene_json: SceneJson = serde_json::from_reader(
            BufReader::new(file)
        )?;

        scene_json.build()
    }
}

/// The JSON form of a scene description.
///
/// Points and vectors are plain arrays of up to three numbers; missing
/// trailing components default to 0. Transforms are 16-element row-major
/// arrays, defaulting to the identity when absent.
#[derive(Serialize, Deserialize)]
pub struct SceneJson {
    canvas_width: usize,
    canvas_height: usize,
    field_of_view: f64,

    camera_from: Vec<f64>,
    camera_to: Vec<f64>,
    camera_up: Vec<f64>,

    light: LightJson,
    shapes: Vec<ShapeJson>,
}

#[derive(Clone, Serialize, Deserialize)]
struct LightJson {
    intensity: Vec<f64>,
    position: Vec<f64>,
}

#[derive(Clone, Serialize, Deserialize)]
struct ShapeJson {
    ty: String,
    transform: Option<Vec<f64>>,
    material: Option<MaterialJson>,
}

#[derive(Clone, Serialize, Deserialize)]
struct MaterialJson {
    color: Option<Vec<f64>>,
    pattern: Option<PatternJson>,

    ambient: Option<f64>,
    diffuse: Option<f64>,
    specular: Option<f64>,
    shininess: Option<f64>,
}

#[derive(Clone, Serialize, Deserialize)]
struct PatternJson {
    ty: String,
    primary: Vec<f64>,
    secondary: Vec<f64>,
    transform: Option<Vec<f64>>,
}

/// Takes up to the first three elements of a slice as x, y and z; missing
/// elements default to 0.
fn xyz_of(v: &[f64]) -> (f64, f64, f64) {
    let x = v.get(0).copied().unwrap_or(0.0);
    let y = v.get(1).copied().unwrap_or(0.0);
    let z = v.get(2).copied().unwrap_or(0.0);

    (x, y, z)
}

fn point_of(v: &[f64]) -> Tuple4D {
    let (x, y, z) = xyz_of(v);
    Tuple4D::point(x, y, z)
}

fn vector_of(v: &[f64]) -> Tuple4D {
    let (x, y, z) = xyz_of(v);
    Tuple4D::vector(x, y, z)
}

/// Converts an optional 16-element row-major array to a matrix.
///
/// An absent transform means the identity; a present one with the wrong
/// number of elements is an error rather than a silent truncation.
fn transform_of(t: &Option<Vec<f64>>) -> Result<Matrix4D, SceneError> {
    match t {
        None => Ok(Matrix4D::identity()),
        Some(v) => {
            if v.len() != 16 {
                return Err(SceneError::BadTransform(v.len()));
            }

            let mut buf = [0.0; 16];
            buf.copy_from_slice(v);
            Ok(buf.into())
        },
    }
}

impl SceneJson {
    fn build(self) -> Result<Scene, SceneError> {
        // Create the camera transform from the view parameters.
        let camera_transform = Matrix4D::view_transform(
            point_of(&self.camera_from),
            point_of(&self.camera_to),
            vector_of(&self.camera_up),
        )?;

        // Create the camera.
        let camera = Camera::new(
            self.canvas_width,
            self.canvas_height,
            self.field_of_view,
            camera_transform,
        );

        // Create the world.
        let mut world = World::empty();
        world.light_source = PointLight::new(
            Color::from(&self.light.intensity),
            point_of(&self.light.position),
        );

        for shape_json in self.shapes {
            world.objects.push(shape_json.build()?);
        }

        Ok(Scene { world, camera })
    }
}

impl ShapeJson {
    fn build(self) -> Result<Shape, SceneError> {
        let mut shape = match self.ty.as_str() {
            "sphere" => Shape::sphere(),
            "plane" => Shape::plane(),
            other => return Err(
                SceneError::UnknownShapeType(other.to_string())
            ),
        };

        shape.transform = transform_of(&self.transform)?;
        if let Some(material_json) = self.material {
            shape.material = material_json.build()?;
        }

        Ok(shape)
    }
}

impl MaterialJson {
    fn build(self) -> Result<Material, SceneError> {
        let defaults = Material::default();

        let color = match self.color {
            Some(ref v) => Color::from(v),
            None => defaults.color(),
        };

        // Absent coefficients fall back to the defaults; present ones go
        // through the same validation as programmatic construction.
        let mut material = Material::new(
            color,
            self.ambient.unwrap_or_else(|| defaults.ambient()),
            self.diffuse.unwrap_or_else(|| defaults.diffuse()),
            self.specular.unwrap_or_else(|| defaults.specular()),
            self.shininess.unwrap_or_else(|| defaults.shininess()),
        )?;

        if let Some(pattern_json) = self.pattern {
            material = material.with_pattern(pattern_json.build()?);
        }

        Ok(material)
    }
}

impl PatternJson {
    fn build(self) -> Result<Pattern, SceneError> {
        let primary = Color::from(&self.primary);
        let secondary = Color::from(&self.secondary);

        let pattern = match self.ty.as_str() {
            "stripe" => Pattern::stripe(primary, secondary),
            "gradient" => Pattern::gradient(primary, secondary),
            "ring" => Pattern::ring(primary, secondary),
            "checker" => Pattern::checker(primary, secondary),
            other => return Err(
                SceneError::UnknownPatternType(other.to_string())
            ),
        };

        Ok(pattern.with_transform(transform_of(&self.transform)?))
    }
}

#[cfg(test)]
fn minimal_scene_json() -> String {
    String::from(r#"
        {
            "canvas_width": 100,
            "canvas_height": 50,
            "field_of_view": 1.047,

            "camera_from": [0.0, 1.5, -5.0],
            "camera_to": [0.0, 1.0, 0.0],
            "camera_up": [0.0, 1.0, 0.0],

            "light": {
                "intensity": [1.0, 1.0, 1.0],
                "position": [-10.0, 10.0, -10.0]
            },

            "shapes": [
                {
                    "ty": "plane",
                    "transform": null,
                    "material": {
                        "color": [1.0, 0.9, 0.9],
                        "pattern": {
                            "ty": "checker",
                            "primary": [1.0, 1.0, 1.0],
                            "secondary": [0.0, 0.0, 0.0],
                            "transform": null
                        },
                        "ambient": null,
                        "diffuse": null,
                        "specular": 0.0,
                        "shininess": null
                    }
                },
                {
                    "ty": "sphere",
                    "transform": [1.0, 0.0, 0.0, -0.5,
                                  0.0, 1.0, 0.0, 1.0,
                                  0.0, 0.0, 1.0, 0.5,
                                  0.0, 0.0, 0.0, 1.0],
                    "material": null
                }
            ]
        }
    "#)
}

#[test]
fn scene_from_json_description() {
    use crate::pattern::PatternKind;

    let scene_json: SceneJson
        = serde_json::from_str(&minimal_scene_json()).unwrap();
    let scene = scene_json.build().unwrap();

    assert_eq!(scene.camera.hsize, 100);
    assert_eq!(scene.camera.vsize, 50);
    assert_eq!(scene.world.objects.len(), 2);

    let floor = &scene.world.objects[0];
    assert_eq!(floor.material.specular(), 0.0);
    assert_eq!(floor.material.pattern().unwrap().kind(),
        PatternKind::Checker);

    let sphere = &scene.world.objects[1];
    assert_eq!(sphere.transform,
        Matrix4D::translation(-0.5, 1.0, 0.5));

    assert_eq!(scene.world.light_source.position,
        Tuple4D::point(-10.0, 10.0, -10.0));
}

#[test]
fn scene_with_unknown_shape_type_fails() {
    let json = minimal_scene_json().replace("\"plane\"", "\"torus\"");
    let scene_json: SceneJson = serde_json::from_str(&json).unwrap();

    match scene_json.build() {
        Err(SceneError::UnknownShapeType(ty)) => assert_eq!(ty, "torus"),
        other => panic!("expected UnknownShapeType, got {:?}",
            other.err().map(|e| e.to_string())),
    }
}

#[test]
fn scene_with_short_transform_fails() {
    let json = r#"
        {
            "canvas_width": 10,
            "canvas_height": 10,
            "field_of_view": 1.047,

            "camera_from": [0.0, 0.0, -5.0],
            "camera_to": [0.0, 0.0, 0.0],
            "camera_up": [0.0, 1.0, 0.0],

            "light": {
                "intensity": [1.0, 1.0, 1.0],
                "position": [-10.0, 10.0, -10.0]
            },

            "shapes": [
                { "ty": "sphere", "transform": [1.0, 0.0], "material": null }
            ]
        }
    "#;

    let scene_json: SceneJson = serde_json::from_str(json).unwrap();
    match scene_json.build() {
        Err(SceneError::BadTransform(n)) => assert_eq!(n, 2),
        other => panic!("expected BadTransform, got {:?}",
            other.err().map(|e| e.to_string())),
    }
}

#[test]
fn scene_with_negative_coefficient_fails() {
    let json = minimal_scene_json().replace("\"specular\": 0.0",
        "\"specular\": -0.4");
    let scene_json: SceneJson = serde_json::from_str(&json).unwrap();

    assert!(matches!(scene_json.build(),
        Err(SceneError::Invalid(TraceError::InvalidMaterialParameter {
            name: "specular",
            ..
        }))));
}
