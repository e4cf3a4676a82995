//! Track-side entities that poke the vehicle when it drives through them.
//! Both use a crude axis-aligned trigger box and fire on entry, not while
//! inside.

use crate::{
    effects::{AudioService, ParticleBurst, ParticleService, Sfx},
    vehicle::Vehicle,
};
use nalgebra::{Point3, Unit, Vector3};

/// Half-extent of the entry trigger on every axis.
const TRIGGER_RANGE: f32 = 10.0;

fn vehicle_in_range(center: &Point3<f32>, vehicle: &Vehicle) -> bool {
    let delta = vehicle.position() - center;
    delta.x.abs() < TRIGGER_RANGE && delta.y.abs() < TRIGGER_RANGE && delta.z.abs() < TRIGGER_RANGE
}

/// Grants a free, full-cooldown boost when driven over.
pub struct BoostPad {
    position: Point3<f32>,
    player_inside: bool,
}

impl BoostPad {
    pub fn new(position: Point3<f32>) -> BoostPad {
        BoostPad {
            position,
            player_inside: false,
        }
    }

    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    pub fn step(
        &mut self,
        vehicle: &mut Vehicle,
        audio: &mut dyn AudioService,
        particles: &mut dyn ParticleService,
    ) {
        let inside = vehicle_in_range(&self.position, vehicle);
        if inside && !self.player_inside {
            vehicle.give_boost();
            audio.play(Sfx::BoostPad, self.position, 1.0, false);
            particles.spawn(ParticleBurst {
                texture: 0,
                position: self.position,
                velocity: Vector3::zeros(),
                rotation: 0.0,
                scale: 3.0,
                lifetime: 0.5,
                gravity: false,
                fade: true,
            });
        }
        self.player_inside = inside;
    }
}

/// Kicks the vehicle off the ground along the ramp's launch direction.
pub struct JumpRamp {
    position: Point3<f32>,
    launch_dir: Unit<Vector3<f32>>,
    launch_kick: f32,
    player_inside: bool,
}

impl JumpRamp {
    pub fn new(position: Point3<f32>, launch_dir: Unit<Vector3<f32>>, launch_kick: f32) -> JumpRamp {
        JumpRamp {
            position,
            launch_dir,
            launch_kick,
            player_inside: false,
        }
    }

    pub fn step(&mut self, vehicle: &mut Vehicle, audio: &mut dyn AudioService) {
        let inside = vehicle_in_range(&self.position, vehicle);
        if inside && !self.player_inside {
            vehicle.launch(self.launch_dir, self.launch_kick);
            audio.play(Sfx::JumpRamp, self.position, 1.0, false);
        }
        self.player_inside = inside;
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        config::VehicleConfig,
        effects::{SilentAudio, SilentParticles},
        track::{BoostPad, JumpRamp},
        vehicle::Vehicle,
    };
    use nalgebra::{Point3, Unit, Vector3};
    use std::sync::Arc;

    fn vehicle_at(position: Point3<f32>) -> Vehicle {
        Vehicle::new(
            Arc::new(VehicleConfig::default()),
            position,
            Vector3::x_axis(),
            7,
        )
    }

    #[test]
    fn boost_pad_fires_once_per_entry() {
        let mut pad = BoostPad::new(Point3::new(0.0, 0.0, 0.0));
        let mut audio = SilentAudio::default();
        let mut particles = SilentParticles::default();

        let mut vehicle = vehicle_at(Point3::new(2.0, 1.0, 0.0));
        vehicle.set_velocity(Vector3::new(10.0, 0.0, 0.0));

        pad.step(&mut vehicle, &mut audio, &mut particles);
        let boosted = vehicle.speed();
        assert!(boosted > 10.0);

        // Still inside: no second kick.
        pad.step(&mut vehicle, &mut audio, &mut particles);
        assert!((vehicle.speed() - boosted).abs() < 1e-4);

        // Leave and re-enter: fires again.
        vehicle.set_position(Point3::new(50.0, 1.0, 0.0));
        pad.step(&mut vehicle, &mut audio, &mut particles);
        vehicle.set_position(Point3::new(2.0, 1.0, 0.0));
        pad.step(&mut vehicle, &mut audio, &mut particles);
        assert!(vehicle.speed() > boosted);
    }

    #[test]
    fn jump_ramp_launches_the_vehicle() {
        let mut ramp = JumpRamp::new(
            Point3::new(0.0, 0.0, 0.0),
            Unit::new_normalize(Vector3::new(0.0, 1.0, 0.0)),
            40.0,
        );
        let mut audio = SilentAudio::default();
        let mut vehicle = vehicle_at(Point3::new(0.0, 1.0, 0.0));
        vehicle.set_velocity(Vector3::new(30.0, 0.0, 0.0));

        ramp.step(&mut vehicle, &mut audio);
        assert!(!vehicle.on_plane());
        assert!(vehicle.velocity().y > 30.0 * 0.5);
    }
}
