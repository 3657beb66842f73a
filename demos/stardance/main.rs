//! Ambient scene: a star field and backdrop that never stop turning, and
//! a model that sways to the music whenever playback is on (M toggles it).

use anyhow::Result;
use caper::prelude::*;
use cgmath::Vector3;
use winit::keyboard::KeyCode;

// Per-second rates matching the original scene's per-frame nudges at 60 Hz
const STAR_SPIN_RATE: f32 = 0.012;
const BACKDROP_SPIN_RATE: f32 = 0.03;

// Sway phase advances at 7 rad/s while the music plays
const SWAY_RATE: f32 = 7.0;
const SWAY_AMPLITUDE: f32 = 0.7;

fn main() -> Result<()> {
    env_logger::init();

    let mut app = caper::default();
    app.set_title("stardance");

    let mut camera = OrbitCamera::new(10.0, 0.3, 0.0, Vector3::new(0.0, 1.0, 0.0), 1.0);
    camera.bounds.min_distance = Some(6.0);
    camera.bounds.max_distance = Some(10.0);
    app.set_camera(CameraRig::orbit(camera, CameraController::new(0.005, 0.1)));

    let scene = app.scene_mut();
    scene.set_clear_color_rgb(0x11, 0x11, 0x11);

    let mut rng = rand::rng();
    let stars = generate_star_field(4000, StarFieldBounds::default(), &mut rng);
    let stars_handle = scene.add_object(
        Object::new("stars", ObjectGeometry::Points(PointCloud::new(stars)))
            .with_color([0.35, 0.35, 0.4, 1.0]),
    );

    let backdrop_geometry = generate_plane(50.0, 50.0, 1, 1);
    let mut backdrop = Object::new(
        "milkyway",
        ObjectGeometry::Meshes(vec![Mesh::new(
            backdrop_geometry.positions,
            backdrop_geometry.normals,
            backdrop_geometry.indices,
        )]),
    )
    .with_color([0.22, 0.20, 0.32, 0.5]);
    backdrop.transform.position = Vector3::new(0.0, -10.0, 0.0);
    backdrop.transform.rotation.x = -2.0;
    let backdrop_handle = scene.add_object(backdrop);

    // Ambient spins run from the very first tick, before any model lands
    let driver = app.driver_mut();
    driver.add_ambient(AnimatedEntity::new(
        "stars-spin",
        stars_handle,
        EntityKind::ParticleField {
            rate: STAR_SPIN_RATE,
        },
    ));
    driver.add_ambient(AnimatedEntity::new(
        "milkyway-spin",
        backdrop_handle,
        EntityKind::RotatingMesh {
            axis: RotationAxis::Z,
            rate: BACKDROP_SPIN_RATE,
        },
    ));

    app.load_model(ModelRequest {
        path: "assets/models/maxwell.obj".into(),
        placements: vec![Placement {
            name: "maxwell".into(),
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: 1.0,
            color: [0.82, 0.71, 0.55, 1.0],
            recipe: Some(EntityRecipe {
                group: "dancer".into(),
                time_scale: 1.0,
                kind: EntityKind::ReactiveSway {
                    rate: SWAY_RATE,
                    amplitude: SWAY_AMPLITUDE,
                },
            }),
        }],
    });

    // Swap NullAudio for a real transport to actually hear anything
    app.set_audio(Box::new(NullAudio), KeyCode::KeyM);

    app.run();
    Ok(())
}
