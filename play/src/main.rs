#![cfg_attr(feature = "strict", deny(warnings))]

//! Headless driver: seats a vehicle on a synthetic straightaway, plays a
//! scripted input tape against it, and logs what the core does. Useful for
//! eyeballing tuning changes without the renderer.

use common::prelude::*;
use log::info;
use nalgebra::{Point3, Vector3};
use simulate::{
    AudioHandle, AudioService, Checkpoint, CollisionMesh, ConfigRegistry, Controls, Course,
    InputSnapshot, LastViewCamera, Services, Sfx, SilentParticles, SurfaceFlags, Triangle,
    Vehicle, VehicleKind,
};

mod logging;

const DT: f32 = 1.0 / 60.0;
const COUNTDOWN: f32 = 1.0;
const RACE_SECONDS: f32 = 14.0;

/// A straightaway: a big floor with a heal strip partway down and a wall
/// across the far end.
fn build_track() -> CollisionMesh {
    let mut triangles = Vec::new();
    quad(
        &mut triangles,
        Point3::new(-200.0, 0.0, -250.0),
        Point3::new(2500.0, 0.0, 250.0),
        SurfaceFlags::NONE,
    );
    // Heal strip floating just above the floor between x = 900 and 1100.
    quad(
        &mut triangles,
        Point3::new(900.0, 0.01, -250.0),
        Point3::new(1100.0, 0.01, 250.0),
        SurfaceFlags::HEAL,
    );
    // The far wall, facing back down the track.
    triangles.push(
        Triangle::new(
            Point3::new(1900.0, -10.0, -250.0),
            Point3::new(1900.0, -10.0, 250.0),
            Point3::new(1900.0, 400.0, 0.0),
            SurfaceFlags::WALL,
        )
        .unwrap(),
    );
    CollisionMesh::new(triangles)
}

fn quad(triangles: &mut Vec<Triangle>, min: Point3<f32>, max: Point3<f32>, flags: SurfaceFlags) {
    let y = min.y;
    triangles.push(
        Triangle::new(
            Point3::new(min.x, y, min.z),
            Point3::new(min.x, y, max.z),
            Point3::new(max.x, y, max.z),
            flags,
        )
        .unwrap(),
    );
    triangles.push(
        Triangle::new(
            Point3::new(min.x, y, min.z),
            Point3::new(max.x, y, max.z),
            Point3::new(max.x, y, min.z),
            flags,
        )
        .unwrap(),
    );
}

fn build_course() -> Course {
    let checkpoints = (0..4)
        .map(|id| Checkpoint::new_sphere(id, Point3::new(id as f32 * 500.0, 0.0, 0.0), 300.0))
        .collect();
    Course::new(checkpoints, 3)
}

/// The scripted tape: hold the gas after the countdown, one boost press at
/// five seconds, a little strafe while healing.
fn controls_at(t: f32) -> Controls {
    if t < COUNTDOWN {
        return Controls::default();
    }
    Controls {
        gas: true,
        boost: (5.0..5.1).contains(&t),
        trigger_l: if (7.0..8.0).contains(&t) { 0.6 } else { 0.0 },
        ..Controls::default()
    }
}

/// Audio "device" that just logs one-shot effects.
#[derive(Default)]
struct LoggingAudio {
    next_index: u32,
}

impl AudioService for LoggingAudio {
    fn play(
        &mut self,
        sfx: Sfx,
        position: Point3<f32>,
        pitch: f32,
        looping: bool,
    ) -> Option<AudioHandle> {
        if !looping {
            info!("sfx {:?} at {} (pitch {:.2})", sfx, position.pretty(), pitch);
        }
        let handle = AudioHandle {
            index: self.next_index,
            generation: 0,
        };
        self.next_index += 1;
        Some(handle)
    }

    fn set_pitch(&mut self, _handle: AudioHandle, _pitch: f32) {}

    fn set_position(&mut self, _handle: AudioHandle, _position: Point3<f32>) {}

    fn stop(&mut self, _handle: AudioHandle) {}

    fn completion(&self, _handle: AudioHandle) -> Option<f32> {
        Some(1.0)
    }
}

fn main() {
    logging::init();

    let mesh = build_track();
    let course = build_course();

    // No config files shipped next to the binary: this warns and runs on the
    // compiled-in tuning, which is exactly what we want here.
    let mut registry = ConfigRegistry::new("res/vehicles");
    let config = registry.get(VehicleKind(0));

    let mut vehicle = Vehicle::new(config, Point3::new(0.0, 2.0, 0.0), Vector3::x_axis(), 0xF0);
    let mut audio = LoggingAudio::default();
    let mut particles = SilentParticles::default();
    let mut camera = LastViewCamera::default();

    let mut input = InputSnapshot::zeroed();
    let frames = ((COUNTDOWN + RACE_SECONDS) / DT) as usize;
    for frame in 0..frames {
        let t = frame as f32 * DT;
        logging::STATE.lock().unwrap().sim_time = Some(t);
        input = input.advance(controls_at(t));

        let mut services = Services {
            audio: &mut audio,
            particles: &mut particles,
            camera: &mut camera,
        };
        vehicle.step(
            DT,
            &input,
            &mesh,
            &course,
            t < COUNTDOWN,
            &mut services,
        );

        if frame % 30 == 0 {
            info!(
                "pos={} speed={:6.1} health={:.2} lap={} dist={} {}",
                vehicle.position().pretty(),
                vehicle.speed(),
                vehicle.health(),
                vehicle.progress().lap(),
                vehicle.progress().lap_distance(),
                if vehicle.on_plane() { "grounded" } else { "airborne" },
            );
        }
        if vehicle.is_exploded() {
            info!("vehicle exploded, ending run");
            break;
        }
    }

    if let Some((eye, target, _up)) = camera.view {
        info!(
            "final camera eye={} target={} fov+{:.2}",
            eye.pretty(),
            target.pretty(),
            camera.fov_addition,
        );
    }
    info!(
        "run complete: speedometer {:.0}, {} laps",
        vehicle.speedometer(),
        vehicle.progress().lap(),
    );
}
