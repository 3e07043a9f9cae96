use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use lumen::consts::{ CANVAS_WIDTH, CANVAS_HEIGHT, OUT_FILE };
use lumen::tuple::Tuple4D;
use lumen::matrix::Matrix4D;
use lumen::color::Color;
use lumen::pattern::Pattern;
use lumen::light::{ PointLight, Material };
use lumen::shape::Shape;
use lumen::world::World;
use lumen::camera::Camera;
use lumen::scene::Scene;
use lumen::error::TraceResult;

/// Renders a scene to a PPM image.
#[derive(Parser)]
#[clap(author, version, about)]
struct Args {
    /// A JSON scene description to render. A built-in demo scene is
    /// rendered when omitted.
    scene: Option<PathBuf>,

    /// Where the rendered PPM image is written.
    #[clap(short, long, default_value = OUT_FILE)]
    output: PathBuf,

    /// Canvas width in pixels (demo scene only).
    #[clap(long, default_value_t = CANVAS_WIDTH)]
    width: usize,

    /// Canvas height in pixels (demo scene only).
    #[clap(long, default_value_t = CANVAS_HEIGHT)]
    height: usize,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let scene = match &args.scene {
        Some(path) => Scene::load(path)?,
        None => demo_scene(args.width, args.height)?,
    };

    let canvas = scene.camera.render(&scene.world)?;
    canvas.save(&args.output)?;

    Ok(())
}

/// Three spheres resting on a checkered floor.
fn demo_scene(width: usize, height: usize) -> TraceResult<Scene> {
    let mut floor = Shape::plane();
    floor.material = Material::default()
        .with_color(Color::rgb(1.0, 0.9, 0.9))
        .with_specular(0.0)?
        .with_pattern(Pattern::checker(Color::white(), Color::black()));

    let mut middle = Shape::sphere();
    middle.transform = Matrix4D::translation(-0.5, 1.0, 0.5);
    middle.material = Material::default()
        .with_diffuse(0.7)?
        .with_specular(0.3)?
        .with_pattern(
            Pattern::stripe(
                Color::rgb(0.1, 1.0, 0.5),
                Color::rgb(0.05, 0.5, 0.25),
            ).with_transform(
                Matrix4D::scaling(0.25, 0.25, 0.25)
                    * Matrix4D::rotation_z(std::f64::consts::PI / 4.0)
            )
        );

    let mut right = Shape::sphere();
    right.transform = Matrix4D::translation(1.5, 0.5, -0.5)
        * Matrix4D::scaling(0.5, 0.5, 0.5);
    right.material = Material::default()
        .with_diffuse(0.7)?
        .with_specular(0.3)?
        .with_pattern(
            Pattern::gradient(
                Color::rgb(0.5, 1.0, 0.1),
                Color::rgb(0.1, 0.1, 1.0),
            )
        );

    let mut left = Shape::sphere();
    left.transform = Matrix4D::translation(-1.5, 0.33, -0.75)
        * Matrix4D::scaling(0.33, 0.33, 0.33);
    left.material = Material::default()
        .with_color(Color::rgb(1.0, 0.8, 0.1))
        .with_diffuse(0.7)?
        .with_specular(0.3)?;

    let mut world = World::empty();
    world.light_source = PointLight::new(
        Color::rgb(1.0, 1.0, 1.0),
        Tuple4D::point(-10.0, 10.0, -10.0),
    );
    world.objects = vec![floor, middle, right, left];

    let camera = Camera::new(
        width,
        height,
        std::f64::consts::PI / 3.0,
        Matrix4D::view_transform(
            Tuple4D::point(0.0, 1.5, -5.0),
            Tuple4D::point(0.0, 1.0, 0.0),
            Tuple4D::vector(0.0, 1.0, 0.0),
        )?,
    );

    Ok(Scene { world, camera })
}
