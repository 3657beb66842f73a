//! Cinematic scene: three foxes chase a rabbit across a field while a
//! scripted flythrough pulls the camera along a fixed three-leg path.

use anyhow::Result;
use caper::prelude::*;
use cgmath::Vector3;
use std::f32::consts::FRAC_PI_2;

// Length of the "Run" gallop clips, in seconds of clip time
const FOX_RUN_DURATION: f32 = 0.7;
const RABBIT_RUN_DURATION: f32 = 0.5;

const GROUND_Y: f32 = -0.6;
const FOX_Y: f32 = -0.5;

fn main() -> Result<()> {
    env_logger::init();

    let mut app = caper::default();
    app.set_title("overrun");

    app.set_camera(CameraRig::Flythrough(FlythroughCamera::new(
        Vector3::new(0.0, 0.0, 4.0),
        Vector3::new(0.0, 0.0, 0.0),
        1.0,
    )));

    let scene = app.scene_mut();
    scene.set_clear_color_rgb(0x00, 0xc9, 0xd9);

    let floor_geometry = generate_plane(500.0, 500.0, 1, 1);
    let mut floor = Object::new(
        "floor",
        ObjectGeometry::Meshes(vec![Mesh::new(
            floor_geometry.positions,
            floor_geometry.normals,
            floor_geometry.indices,
        )]),
    )
    .with_color([0.012, 0.4, 0.208, 1.0]);
    floor.transform.rotation.x = -FRAC_PI_2;
    floor.transform.position.y = GROUND_Y;
    scene.add_object(floor);

    // One fox model, three placements: each gets its own gallop offset so
    // the pack never runs in lockstep, and its own playback multiplier.
    let fox_placements = [
        ("fox1", Vector3::new(-3.0, FOX_Y, 0.0), 0.015, 0.0, 2.0),
        ("fox2", Vector3::new(-3.5, FOX_Y, 0.6), 0.008, 0.3, 3.5),
        ("fox3", Vector3::new(-3.4, FOX_Y, -0.6), 0.01, 0.45, 3.0),
    ];
    app.load_model(ModelRequest {
        path: "assets/models/fox.obj".into(),
        placements: fox_placements
            .iter()
            .map(|&(name, position, scale, start_offset, time_scale)| Placement {
                name: name.into(),
                position,
                rotation: Vector3::new(0.0, FRAC_PI_2, 0.0),
                scale,
                color: [0.85, 0.45, 0.13, 1.0],
                recipe: Some(EntityRecipe {
                    group: "foxes".into(),
                    time_scale,
                    kind: EntityKind::SkeletalCharacter {
                        mixer: AnimationMixer::new("Run", FOX_RUN_DURATION, start_offset),
                        rest_height: FOX_Y,
                        bounce: 0.03,
                    },
                }),
            })
            .collect(),
    });

    app.load_model(ModelRequest {
        path: "assets/models/rabbit.obj".into(),
        placements: vec![Placement {
            name: "rabbit".into(),
            position: Vector3::new(0.0, GROUND_Y, 0.0),
            rotation: Vector3::new(0.0, FRAC_PI_2, 0.0),
            scale: 0.2,
            color: [0.9, 0.87, 0.82, 1.0],
            recipe: Some(EntityRecipe {
                group: "rabbit".into(),
                time_scale: 4.0,
                kind: EntityKind::SkeletalCharacter {
                    mixer: AnimationMixer::new("Armature.001|Run", RABBIT_RUN_DURATION, 0.0),
                    rest_height: GROUND_Y,
                    bounce: 0.04,
                },
            }),
        }],
    });

    // Three 3-second legs: slide out to x=4, back to x=6, then climb to
    // (6, 8, 5) for the closing overhead shot. Fires once on startup.
    app.set_timeline(ScriptedTimeline::new(vec![
        SegmentSpec::new(vec![(Channel::PosX, 4.0)], 3.0, Easing::Linear),
        SegmentSpec::new(vec![(Channel::PosX, 6.0)], 3.0, Easing::Linear),
        SegmentSpec::new(
            vec![(Channel::PosY, 8.0), (Channel::PosZ, 5.0)],
            3.0,
            Easing::Linear,
        ),
    ]));

    app.run();
    Ok(())
}
