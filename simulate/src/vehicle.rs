//! The vehicle: per-frame kinematics plus collision sliding. One `step` per
//! frame, called from the simulation loop with that frame's inputs and
//! delta. The model is deliberately not physical — speeds approach tuned
//! terminals, turning rotates velocity directly, and collisions reshape the
//! velocity vector rather than exchanging momentum.

use crate::{
    camera::CameraRig,
    config::VehicleConfig,
    effects::{AudioHandle, AudioService, CameraSink, ParticleBurst, ParticleService, Sfx},
    input::{Controls, InputSnapshot},
    mesh::{CollisionMesh, SurfaceFlags, SweepHit, TriangleId},
    progress::{Course, Progress, ProgressEvent},
};
use common::{math, prelude::*, rng};
use log::debug;
use nalgebra::{Point3, Unit, Vector3};
use rand::{rngs::StdRng, SeedableRng};
use std::f32::consts::{FRAC_PI_2, PI};
use std::sync::Arc;

/// Slowest the vehicle ever moves; the velocity is floor-clamped here so its
/// heading survives a full stop.
pub const VEL_SLOWEST: f32 = 0.0006;
/// Hover height above the supporting triangle, to avoid re-penetration.
pub const FLOOR_OFFSET: f32 = 0.1;

/// Shown-on-the-HUD speed per world unit of actual speed.
const SPEEDOMETER_SCALE: f32 = 3.46;
/// Airborne grace before dive inputs register.
const IN_AIR_DIVE_DELAY: f32 = 0.25;
/// Steepest allowed descent.
const MAX_DIVE_ANGLE: f32 = -70.0 * PI / 180.0;
/// Slip below this angle counts as neither left nor right.
const SLIP_DIRECTION_DEADZONE: f32 = 10.0 * PI / 180.0;
/// Remaining travel below this is considered exhausted by the slide loop.
const SUBSTEP_EPSILON: f32 = 1e-3;
/// Safety bound on the slide loop; degenerate slivers of track could
/// otherwise spin it for a very long time.
const MAX_SUBSTEPS: usize = 32;
/// Straight-down probe length used to seat the vehicle during the pre-race
/// countdown.
const COUNTDOWN_PROBE_DEPTH: f32 = 20.0;
/// How fast the exhaust plume chases its target length.
const EXHAUST_APPROACH: f32 = 5.0;
const SIDE_ATTACK_DURATION: f32 = 0.5;
const SIDE_ATTACK_MIN_SPEED_RATIO: f32 = 0.3;
const SIDE_ATTACK_MIN_WHEEL: f32 = 0.5;
const SPIN_ATTACK_DURATION: f32 = 0.8;
/// Seconds between dropping dead and the explosion.
const DEAD_EXPLODE_GRACE: f32 = 2.0;
/// Degrees per second of death spin.
const DEATH_SPIN_RATE: f32 = 720.0;
/// Health under this starts the danger loop.
const DANGER_HEALTH: f32 = 0.25;
const EXPLOSION_PARTICLES: usize = 24;

/// The collaborator subsystems a step is allowed to poke.
pub struct Services<'a> {
    pub audio: &'a mut dyn AudioService,
    pub particles: &'a mut dyn ParticleService,
    pub camera: &'a mut dyn CameraSink,
}

pub struct Vehicle {
    config: Arc<VehicleConfig>,

    position: Point3<f32>,
    vel: Vector3<f32>,
    curr_norm: Unit<Vector3<f32>>,
    curr_norm_smooth: Unit<Vector3<f32>>,
    cam_dir: Unit<Vector3<f32>>,
    cam_dir_smooth: Unit<Vector3<f32>>,
    on_plane: bool,
    current_triangle: Option<TriangleId>,

    health: f32,
    exploded: bool,
    dead_timer: f32,
    death_spin: f32,

    can_move_timer: f32,
    boost_delay_timer: f32,
    in_air_timer: f32,

    slip_timer: f32,
    slip_accumulated: f32,
    slip_angle: f32,
    slip_angle_target: f32,
    slip_timer_left: f32,
    slip_timer_right: f32,
    slip_punish_last: f32,

    side_attack_timer: f32,
    side_attack_cooldown_timer: f32,
    side_attack_dir: f32,
    spin_attack_timer: f32,
    spin_attack_cooldown_timer: f32,

    // Visual orientation, degrees; consumed by the renderer.
    rot_x: f32,
    rot_y: f32,
    rot_z: f32,
    rot_roll: f32,

    exhaust_length: f32,
    exhaust_length_target: f32,

    rig: CameraRig,
    progress: Progress,
    rng: StdRng,
    last_overall_speed: f32,

    source_engine: Option<AudioHandle>,
    source_strafe: Option<AudioHandle>,
    strafe_loop_timer: f32,
    source_slip: Option<AudioHandle>,
    source_danger: Option<AudioHandle>,
    source_heal: Option<AudioHandle>,
}

impl Vehicle {
    pub fn new(
        config: Arc<VehicleConfig>,
        position: Point3<f32>,
        heading: Unit<Vector3<f32>>,
        seed: u64,
    ) -> Vehicle {
        Vehicle {
            config,
            position,
            vel: heading.into_inner() * VEL_SLOWEST,
            curr_norm: Vector3::y_axis(),
            curr_norm_smooth: Vector3::y_axis(),
            cam_dir: heading,
            cam_dir_smooth: heading,
            on_plane: false,
            current_triangle: None,

            health: 1.0,
            exploded: false,
            dead_timer: 0.0,
            death_spin: 0.0,

            // Brief spawn stun, as when respawning mid-race.
            can_move_timer: 1.0,
            boost_delay_timer: 0.0,
            in_air_timer: 0.0,

            slip_timer: 0.0,
            slip_accumulated: 0.0,
            slip_angle: 0.0,
            slip_angle_target: 0.0,
            slip_timer_left: 0.0,
            slip_timer_right: 0.0,
            slip_punish_last: 0.0,

            side_attack_timer: 0.0,
            side_attack_cooldown_timer: 0.0,
            side_attack_dir: 0.0,
            spin_attack_timer: 0.0,
            spin_attack_cooldown_timer: 0.0,

            rot_x: 0.0,
            rot_y: 0.0,
            rot_z: 0.0,
            rot_roll: 0.0,

            exhaust_length: 0.0,
            exhaust_length_target: 0.0,

            rig: CameraRig::new(),
            progress: Progress::new(),
            rng: StdRng::seed_from_u64(seed),
            last_overall_speed: 0.0,

            source_engine: None,
            source_strafe: None,
            strafe_loop_timer: 0.0,
            source_slip: None,
            source_danger: None,
            source_heal: None,
        }
    }

    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    pub fn set_position(&mut self, position: Point3<f32>) {
        self.position = position;
    }

    pub fn velocity(&self) -> Vector3<f32> {
        self.vel
    }

    pub fn set_velocity(&mut self, vel: Vector3<f32>) {
        self.vel = vel;
    }

    pub fn speed(&self) -> f32 {
        self.vel.norm()
    }

    /// The value the HUD speed readout shows.
    pub fn speedometer(&self) -> f32 {
        self.last_overall_speed * SPEEDOMETER_SCALE
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn is_dead(&self) -> bool {
        self.health < 0.0
    }

    pub fn is_exploded(&self) -> bool {
        self.exploded
    }

    pub fn on_plane(&self) -> bool {
        self.on_plane
    }

    pub fn current_triangle(&self) -> Option<TriangleId> {
        self.current_triangle
    }

    pub fn ground_normal(&self) -> Unit<Vector3<f32>> {
        self.curr_norm
    }

    /// Visual twist/yaw/pitch/roll in degrees, renderer convention.
    pub fn orientation(&self) -> (f32, f32, f32, f32) {
        (self.rot_x, self.rot_y, self.rot_z, self.rot_roll)
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn set_can_move_timer(&mut self, timer: f32) {
        self.can_move_timer = timer;
    }

    /// A free boost, as granted by boost pads: no health cost, full window.
    pub fn give_boost(&mut self) {
        let config = self.config.clone();
        self.boost_delay_timer = config.boost_delay_max;
        self.kick_boost(config.boost_kick);
    }

    /// Throw the vehicle off the ground, as jump ramps do.
    pub fn launch(&mut self, dir: Unit<Vector3<f32>>, kick: f32) {
        self.vel += dir.into_inner() * kick;
        self.on_plane = false;
        self.current_triangle = None;
    }

    /// Advance one frame. No-op once the vehicle has exploded.
    pub fn step(
        &mut self,
        dt: f32,
        input: &InputSnapshot,
        mesh: &CollisionMesh,
        course: &Course,
        countdown: bool,
        services: &mut Services<'_>,
    ) {
        if self.exploded {
            return;
        }
        let config = self.config.clone();

        // Countdown timers.
        self.can_move_timer = (self.can_move_timer - dt).max(0.0);
        self.boost_delay_timer = (self.boost_delay_timer - dt).max(0.0);
        self.slip_timer = (self.slip_timer - dt).max(0.0);
        self.side_attack_timer = (self.side_attack_timer - dt).max(0.0);
        self.side_attack_cooldown_timer = (self.side_attack_cooldown_timer - dt).max(0.0);
        self.spin_attack_timer = (self.spin_attack_timer - dt).max(0.0);
        self.spin_attack_cooldown_timer = (self.spin_attack_cooldown_timer - dt).max(0.0);

        if self.is_dead() {
            self.dead_timer += dt;
            self.death_spin += DEATH_SPIN_RATE * dt;
            if self.dead_timer >= DEAD_EXPLODE_GRACE {
                self.explode(services);
                return;
            }
        }

        // Inputs go dark while stunned or dead.
        let input = if self.can_move_timer > 0.0 || self.is_dead() {
            InputSnapshot::zeroed()
        } else {
            *input
        };
        let controls = input.current;

        // The triangle under us going into this frame.
        let surface_before = self.surface_flags(mesh);

        self.step_slip(&input, surface_before, dt);

        let total_strafe = self.step_strafe(&controls);
        let strafe_punish =
            1.0 - (controls.trigger_l - controls.trigger_r).abs() * (1.0 - config.strafe_terminal_punish);
        let side_kick = self.step_side_attack(&input);

        self.step_boost(&input, services.audio);
        self.step_spin_attack(&input);
        self.step_throttle(&controls, strafe_punish, surface_before, dt);
        self.step_turn(&controls, dt);

        if self.on_plane {
            self.in_air_timer = 0.0;
        } else {
            self.in_air_timer += dt;
        }
        self.step_dive(&controls, dt);

        let overall_vel = self.vel + total_strafe + side_kick;
        self.last_overall_speed = overall_vel.norm();
        self.resolve_collisions(overall_vel, mesh, countdown, dt, services.audio);

        // The triangle we ended the frame on.
        let surface_after = self.surface_flags(mesh);

        if self.on_plane && surface_after.is_mini_boost() && self.boost_delay_timer == 0.0 {
            self.give_boost();
            services.audio.play(Sfx::Boost, self.position, 1.0, false);
        }
        if self.on_plane && surface_after.is_heal() && !self.is_dead() {
            self.health = (self.health + config.heal_rate * dt).min(1.0);
        }

        self.update_smoothing(dt);
        self.update_orientation(&controls, overall_vel);
        self.update_exhaust(&controls, overall_vel, dt, services.particles);

        let frame = self.rig.compute(
            &config,
            self.position,
            self.cam_dir_smooth,
            self.curr_norm_smooth,
            self.vel.norm(),
            dt,
        );
        services.camera.set_view_matrix(frame.eye, frame.target, frame.up);
        services.camera.set_fov_addition(frame.fov_addition);

        self.update_audio_loops(
            overall_vel.norm(),
            total_strafe.norm(),
            surface_after,
            dt,
            services.audio,
        );

        let position = self.position;
        let mut fell_out = false;
        for event in self.progress.update(course, &position, dt) {
            match event {
                ProgressEvent::LapCompleted { .. } => {
                    services.audio.play(Sfx::LapComplete, position, 1.0, false);
                }
                ProgressEvent::Finished => {
                    services.audio.play(Sfx::RaceFinish, position, 1.0, false);
                }
                ProgressEvent::SkippedCheckpoints | ProgressEvent::FallOutWarning => {
                    services.audio.play(Sfx::FallOutWarning, position, 1.0, false);
                }
                ProgressEvent::FellOut => fell_out = true,
            }
        }
        if fell_out {
            self.explode(services);
        }
    }

    fn surface_flags(&self, mesh: &CollisionMesh) -> SurfaceFlags {
        self.current_triangle
            .and_then(|id| mesh.triangle(id))
            .map(|triangle| triangle.flags())
            .unwrap_or_default()
    }

    /// Scale the velocity to `new_speed`, keeping the heading. Does nothing
    /// if the velocity has degenerated to zero length.
    fn rescale_velocity(&mut self, new_speed: f32) {
        if let Some(dir) = self.vel.try_axis() {
            self.vel = dir.into_inner() * new_speed;
        }
    }

    fn kick_boost(&mut self, kick: f32) {
        let config = self.config.clone();
        let old_speed = self.vel.norm();
        let new_speed = old_speed + kick * (config.boost_speed - old_speed);
        if new_speed > old_speed {
            self.rescale_velocity(new_speed);
        }
    }

    fn step_slip(&mut self, input: &InputSnapshot, surface: SurfaceFlags, dt: f32) {
        let config = self.config.clone();
        let controls = input.current;
        let speed_ratio = self.vel.norm() / config.terminal_speed;

        if controls.trigger_l > 0.5 && controls.trigger_r > 0.5 {
            self.slip_timer = config.slip_timer_max;
        }
        if self.on_plane && surface.is_slippery() {
            self.slip_timer = config.slip_timer_max;
        }

        self.slip_accumulated += 100.0 * input.wheel_jerk().abs() * dt * speed_ratio;
        if self.slip_timer > 0.0 {
            self.slip_accumulated += 25.0 * controls.wheel.abs() * dt * speed_ratio;
        }
        self.slip_accumulated = math::approach(self.slip_accumulated, 0.0, 5.0, dt);
        if self.slip_accumulated > config.slip_threshold {
            self.slip_timer = config.slip_timer_max;
        }

        if !self.on_plane {
            self.slip_timer = 0.0;
            self.slip_accumulated = 0.0;
        }

        self.slip_angle_target = (config.slip_angle_max * controls.wheel * speed_ratio)
            .min(config.slip_angle_max)
            .max(-config.slip_angle_max);
        if self.slip_timer == 0.0 {
            self.slip_angle_target = 0.0;
        }
        self.slip_angle = math::approach(
            self.slip_angle,
            self.slip_angle_target,
            config.slip_angle_accel,
            dt,
        );

        if self.slip_angle.abs() <= SLIP_DIRECTION_DEADZONE {
            self.slip_timer_left = 0.0;
            self.slip_timer_right = 0.0;
        } else if self.slip_angle > 0.0 {
            self.slip_timer_right += dt;
            self.slip_timer_left = 0.0;
        } else {
            self.slip_timer_left += dt;
            self.slip_timer_right = 0.0;
        }

        // Below the sustain threshold a drift bleeds speed; past it (and on
        // the gas, if so configured) it pays out instead.
        let sustained =
            self.slip_timer_left + self.slip_timer_right >= config.slip_timer_threshold;
        let drift_boost = sustained && (!config.drift_boost_requires_gas || controls.gas);
        let ratio = self.slip_angle / config.slip_angle_max;
        let turn = -config.slip_power * ratio * dt;
        let punish = if drift_boost {
            -(ratio * ratio) * config.slip_power_pos / config.slip_power
        } else {
            (ratio * ratio) * config.slip_power_neg / config.slip_power
        };
        self.slip_punish_last = punish;
        self.vel *= 1.0 - punish * turn.abs();
        self.vel = math::rotate_vector(self.vel, self.curr_norm.into_inner(), turn);
    }

    fn step_strafe(&mut self, controls: &Controls) -> Vector3<f32> {
        let config = self.config.clone();
        let strafe_dir = match self.curr_norm.cross(&self.vel).try_axis() {
            Some(dir) => dir,
            None => return Vector3::zeros(),
        };
        strafe_dir.into_inner()
            * (controls.trigger_l - controls.trigger_r)
            * config.strafe_percentage
            * self.vel.norm()
    }

    fn step_side_attack(&mut self, input: &InputSnapshot) -> Vector3<f32> {
        let config = self.config.clone();
        let controls = input.current;
        if input.pressed_side_attack()
            && self.side_attack_cooldown_timer == 0.0
            && self.on_plane
            && self.vel.norm() >= config.terminal_speed * SIDE_ATTACK_MIN_SPEED_RATIO
            && controls.wheel.abs() >= SIDE_ATTACK_MIN_WHEEL
        {
            self.side_attack_timer = SIDE_ATTACK_DURATION;
            self.side_attack_cooldown_timer = config.side_attack_cooldown;
            self.side_attack_dir = controls.wheel.signum();
        }
        if self.side_attack_timer > 0.0 {
            if let Some(dir) = self.curr_norm.cross(&self.vel).try_axis() {
                // Wheel right is the negative strafe direction.
                return dir.into_inner()
                    * -self.side_attack_dir
                    * config.side_attack_power
                    * (self.side_attack_timer / SIDE_ATTACK_DURATION);
            }
        }
        Vector3::zeros()
    }

    fn step_boost(&mut self, input: &InputSnapshot, audio: &mut dyn AudioService) {
        if !input.pressed_boost() {
            return;
        }
        if self.boost_delay_timer > 0.0 || !self.on_plane || self.health <= 0.0 {
            return;
        }
        let config = self.config.clone();
        // Boosting burns health; with less than the full cost left, the
        // boost window shrinks proportionally.
        let cost = config.boost_health_cost.min(self.health);
        let ratio = if config.boost_health_cost > 0.0 {
            cost / config.boost_health_cost
        } else {
            1.0
        };
        self.health -= cost;
        self.boost_delay_timer = config.boost_delay_max * ratio;
        self.kick_boost(config.boost_kick);
        audio.play(Sfx::Boost, self.position, 1.0, false);
    }

    fn step_spin_attack(&mut self, input: &InputSnapshot) {
        let config = self.config.clone();
        if input.pressed_spin_attack()
            && self.spin_attack_cooldown_timer == 0.0
            && self.spin_attack_timer == 0.0
        {
            self.spin_attack_timer = SPIN_ATTACK_DURATION;
            self.spin_attack_cooldown_timer = config.spin_attack_cooldown;
        }
    }

    fn step_throttle(
        &mut self,
        controls: &Controls,
        strafe_punish: f32,
        surface: SurfaceFlags,
        dt: f32,
    ) {
        let config = self.config.clone();
        let brake_punish = if self.on_plane && surface.is_brake() {
            0.5
        } else {
            1.0
        };
        let spin_punish = if self.spin_attack_timer > 0.0 {
            config.spin_punish
        } else {
            1.0
        };
        let old_speed = self.vel.norm();
        if controls.gas && self.on_plane {
            let terminal = if self.boost_delay_timer > config.boost_delay_max - config.boost_duration
            {
                config.boost_speed
            } else {
                config.terminal_speed
            };
            let new_speed = math::approach(
                old_speed,
                terminal * strafe_punish * brake_punish * spin_punish,
                config.terminal_accel_gas,
                dt,
            );
            self.rescale_velocity(new_speed);
        } else if controls.brake && self.on_plane {
            let new_speed =
                math::approach(old_speed, 0.0, config.terminal_accel_brake / brake_punish, dt);
            self.rescale_velocity(new_speed.max(VEL_SLOWEST));
        } else {
            let new_speed =
                math::approach(old_speed, 0.0, config.terminal_accel_coast / brake_punish, dt);
            self.rescale_velocity(new_speed.max(VEL_SLOWEST));
        }
    }

    fn step_turn(&mut self, controls: &Controls, dt: f32) {
        let config = self.config.clone();
        let turn = -controls.wheel * config.turn_speed * dt;
        self.vel *= 1.0 - config.turn_punish * turn.abs();
        self.vel = math::rotate_vector(self.vel, self.curr_norm.into_inner(), turn);
    }

    fn step_dive(&mut self, controls: &Controls, dt: f32) {
        let config = self.config.clone();
        if !self.on_plane && self.in_air_timer > IN_AIR_DIVE_DELAY {
            let pitch_by = controls.dive * config.dive_speed * dt;
            let side = self.vel.cross(&self.curr_norm.into_inner());
            let rotated = math::rotate_vector(self.vel, side, pitch_by);

            // Refuse the rotation if it would flip the travel direction.
            let old_angle = (-self.vel.z).atan2(self.vel.x);
            let new_angle = (-rotated.z).atan2(rotated.x);
            if math::angle_diff(new_angle, old_angle).abs() < FRAC_PI_2 {
                self.vel = rotated;
                if controls.dive > 0.0 {
                    self.vel *= 1.0 - controls.dive * config.dive_punish * dt;
                }
            }
        }

        // Never steeper than the maximum dive.
        if !self.on_plane && self.vel.y < 0.0 {
            let horizontal = (self.vel.x * self.vel.x + self.vel.z * self.vel.z).sqrt();
            let angle = self.vel.y.atan2(horizontal);
            if angle < MAX_DIVE_ANGLE {
                let side = self.vel.cross(&self.curr_norm.into_inner());
                self.vel = math::rotate_vector(self.vel, side, -(angle - MAX_DIVE_ANGLE));
            }
        }
    }

    /// Sweep the frame's displacement against the track, sliding across
    /// smooth transitions, bouncing off walls, and probing for the ground
    /// when nothing was hit.
    fn resolve_collisions(
        &mut self,
        overall_vel: Vector3<f32>,
        mesh: &CollisionMesh,
        countdown: bool,
        dt: f32,
        audio: &mut dyn AudioService,
    ) {
        let config = self.config.clone();
        let original_speed = self.vel.norm();
        let from = self.position;
        let to = from + overall_vel * dt;

        if let Some(hit) = mesh.sweep(from, to) {
            if !self.on_plane {
                if hit.flags.is_wall() {
                    // Graze the wall and keep flying; it never becomes the
                    // ground.
                    let slid = math::project_onto_plane(&self.vel, &hit.normal);
                    if slid.norm_squared() != 0.0 {
                        self.vel = slid;
                    }
                    self.position = hit.position + hit.normal.into_inner() * FLOOR_OFFSET;
                } else {
                    // Touchdown.
                    self.current_triangle = Some(hit.triangle);
                    let landed = math::project_onto_plane(&self.vel, &hit.normal);
                    if landed.norm_squared() != 0.0 {
                        if landed.norm() < VEL_SLOWEST {
                            if let Some(dir) = landed.try_axis() {
                                self.vel = dir.into_inner() * VEL_SLOWEST;
                            }
                        } else {
                            self.vel = landed;
                        }
                    }
                    self.position = hit.position + hit.normal.into_inner() * FLOOR_OFFSET;
                    self.curr_norm = hit.normal;
                    self.on_plane = true;
                }
            } else {
                let dot = self.curr_norm.dot(&hit.normal);
                if dot < config.smooth_transition_threshold || hit.flags.is_wall() {
                    self.wall_impact(overall_vel, &hit, original_speed, audio);
                } else {
                    // Smooth transition; the frame may still have distance
                    // left to travel after snapping to the contact.
                    let travelled = (hit.position - from).norm();
                    self.adopt_plane(&hit, original_speed);
                    let mut remaining = overall_vel.norm() * dt - travelled;
                    let mut iterations = 0;
                    while remaining > SUBSTEP_EPSILON {
                        iterations += 1;
                        if iterations > MAX_SUBSTEPS {
                            debug!("slide loop bound hit, {:.4} units dropped", remaining);
                            break;
                        }
                        let dir = match self.vel.try_axis() {
                            Some(dir) => dir,
                            None => break,
                        };
                        let start = self.position;
                        let target = start + dir.into_inner() * remaining;
                        match mesh.sweep(start, target) {
                            Some(next) => {
                                let dot = self.curr_norm.dot(&next.normal);
                                if dot < config.smooth_transition_threshold
                                    || next.flags.is_wall()
                                {
                                    let step_vel = dir.into_inner() * remaining;
                                    self.wall_impact(step_vel, &next, original_speed, audio);
                                    remaining = 0.0;
                                } else {
                                    let travelled = (next.position - start).norm();
                                    self.adopt_plane(&next, original_speed);
                                    remaining -= travelled.max(SUBSTEP_EPSILON * 0.5);
                                }
                            }
                            None => {
                                self.position = target;
                                remaining = 0.0;
                            }
                        }
                    }
                }
            }
        } else {
            // Nothing in the way; move, then check we did not just drive off
            // the surface we were glued to.
            self.position = to;

            let mut kept_ground = false;
            if self.on_plane {
                let probe_to =
                    self.position - self.curr_norm.into_inner() * config.surface_tension;
                if let Some(probe) = mesh.sweep(self.position, probe_to) {
                    let dot = self.curr_norm.dot(&probe.normal);
                    let mut ignore = false;
                    if dot < config.smooth_transition_threshold {
                        // A steep face under us: a wall blocks, a cliff edge
                        // does not. The probe normal leaning along our travel
                        // direction means we are leaving over an edge.
                        let side = math::third_axis(&self.vel, &self.curr_norm.into_inner());
                        if let Some(coords) = math::coordinates_in_basis(
                            &self.vel,
                            &self.curr_norm.into_inner(),
                            &side,
                            &probe.normal.into_inner(),
                        ) {
                            if coords.x > 0.0 {
                                ignore = true;
                            }
                        }
                    }
                    if !ignore {
                        if dot < config.smooth_transition_threshold {
                            // Clipped a low wall while staying grounded.
                            let bounced = math::bounce(&overall_vel, &probe.normal, 1.0);
                            self.vel = (bounced * 2.0 + overall_vel) * 0.25;
                            self.apply_wall_damage(&overall_vel, &probe.normal, original_speed);
                            self.can_move_timer = config.hit_wall_time_punish;
                            audio.play(Sfx::WallImpact, self.position, 1.0, false);
                            self.position += probe.normal.into_inner() * FLOOR_OFFSET;
                        } else {
                            self.adopt_plane(&probe, original_speed);
                        }
                        kept_ground = true;
                    }
                }
            }

            if !kept_ground {
                self.on_plane = false;
                self.current_triangle = None;

                // Bend the falling frame toward world up, and fall along it.
                let bent = self
                    .curr_norm
                    .into_inner()
                    .blend_toward(&Vector3::y(), config.cam_smoothness * dt);
                if let Some(bent) = bent.try_axis() {
                    self.curr_norm = bent;
                }

                if countdown {
                    // No gravity before the start signal; just seat the
                    // vehicle on whatever is directly below.
                    let probe_to = self.position - Vector3::y() * COUNTDOWN_PROBE_DEPTH;
                    if let Some(seat) = mesh.sweep(self.position, probe_to) {
                        self.current_triangle = Some(seat.triangle);
                        self.on_plane = true;
                        self.curr_norm = Vector3::y_axis();
                    }
                } else {
                    self.vel += self.curr_norm.into_inner() * (-config.gravity_force * dt);
                }
            }
        }
    }

    /// Adopt a smoothly-connected triangle as the new ground: keep the speed,
    /// redirect along the new plane, snap to the contact, and tell the camera
    /// how sharply the surface curved.
    fn adopt_plane(&mut self, hit: &SweepHit, speed: f32) {
        self.current_triangle = Some(hit.triangle);
        let projected = math::project_onto_plane(&self.vel, &hit.normal);
        if projected.norm_squared() != 0.0 {
            let side = math::third_axis(&self.vel, &self.curr_norm.into_inner());
            if let Some(coords) = math::coordinates_in_basis(
                &self.vel,
                &self.curr_norm.into_inner(),
                &side,
                &projected,
            ) {
                self.rig.feed_surface_curvature(coords.y);
            }
            if let Some(dir) = projected.try_axis() {
                self.vel = dir.into_inner() * speed.max(VEL_SLOWEST);
            }
        }
        self.curr_norm = hit.normal;
        self.position = hit.position + hit.normal.into_inner() * FLOOR_OFFSET;
    }

    /// Too steep to ride: reflect, damp, hurt, stun.
    fn wall_impact(
        &mut self,
        incoming: Vector3<f32>,
        hit: &SweepHit,
        speed: f32,
        audio: &mut dyn AudioService,
    ) {
        let config = self.config.clone();
        let died = self.apply_wall_damage(&incoming, &hit.normal, speed);
        // Doubling the reflection before adding the incoming velocity both
        // redirects and damps; a hit that kills keeps its speed and pays in
        // health instead.
        let bounced = math::bounce(&incoming, &hit.normal, 1.0);
        let retained = if died {
            speed
        } else {
            speed * config.hit_wall_speed_retention
        };
        if let Some(dir) = (bounced * 2.0 + incoming).try_axis() {
            self.vel = dir.into_inner() * retained.max(VEL_SLOWEST);
        }
        self.can_move_timer = config.hit_wall_time_punish;
        audio.play(Sfx::WallImpact, self.position, 1.0, false);
        self.position += hit.normal.into_inner() * FLOOR_OFFSET;
    }

    /// Health cost of a wall strike: steeper impacts at higher speed hurt
    /// more. Returns whether this one was fatal.
    fn apply_wall_damage(
        &mut self,
        incoming: &Vector3<f32>,
        normal: &Unit<Vector3<f32>>,
        speed: f32,
    ) -> bool {
        let config = self.config.clone();
        if let Some(dir) = incoming.try_axis() {
            let impact = dir.dot(normal).abs();
            self.health -= config.hit_wall_health_punish * impact * (speed / config.terminal_speed);
        }
        self.is_dead()
    }

    fn update_smoothing(&mut self, dt: f32) {
        let config = self.config.clone();
        if let Some(dir) = self.vel.try_axis() {
            self.cam_dir = dir;
        }
        let blended = self
            .cam_dir_smooth
            .into_inner()
            .blend_toward(&self.cam_dir.into_inner(), config.cam_smoothness * dt);
        if let Some(blended) = blended.try_axis() {
            self.cam_dir_smooth = blended;
        }
        let blended = self
            .curr_norm_smooth
            .into_inner()
            .blend_toward(&self.curr_norm.into_inner(), config.cam_smoothness * dt);
        if let Some(blended) = blended.try_axis() {
            self.curr_norm_smooth = blended;
        }
    }

    fn update_orientation(&mut self, controls: &Controls, overall_vel: Vector3<f32>) {
        let config = self.config.clone();
        if self.on_plane {
            let ground = math::project_onto_plane(&self.vel, &self.curr_norm);
            let twist = (-ground.z).atan2(ground.x);
            let n = self.curr_norm.into_inner();
            let pitch = n.y.atan2((n.x * n.x + n.z * n.z).sqrt());
            let yaw = (-n.z).atan2(n.x);
            let diff = math::angle_diff(twist, yaw);

            self.rot_x = (diff - self.slip_angle).to_degrees();
            self.rot_y = yaw.to_degrees();
            self.rot_z = pitch.to_degrees();
        } else {
            let horizontal =
                (overall_vel.x * overall_vel.x + overall_vel.z * overall_vel.z).sqrt();
            let pitch = overall_vel.y.atan2(horizontal);
            let yaw = (-overall_vel.z).atan2(overall_vel.x);

            self.rot_x = 0.0;
            self.rot_y = yaw.to_degrees();
            self.rot_z = pitch.to_degrees() + 90.0;
        }

        if self.spin_attack_timer > 0.0 {
            self.rot_x += 720.0 * (1.0 - self.spin_attack_timer / SPIN_ATTACK_DURATION);
        }
        if self.is_dead() {
            self.rot_x += self.death_spin;
        }
        self.rot_roll = 10.0
            * (controls.trigger_l - controls.trigger_r)
            * (self.vel.norm() / config.terminal_speed);
    }

    fn update_exhaust(
        &mut self,
        controls: &Controls,
        overall_vel: Vector3<f32>,
        dt: f32,
        particles: &mut dyn ParticleService,
    ) {
        let config = self.config.clone();
        self.exhaust_length_target =
            if self.boost_delay_timer > config.boost_delay_max - config.boost_duration {
                2.5
            } else if self.on_plane && controls.gas {
                1.0
            } else {
                0.0
            };
        self.exhaust_length = math::approach(
            self.exhaust_length,
            self.exhaust_length_target,
            EXHAUST_APPROACH,
            dt,
        );
        if self.exhaust_length <= 0.002 {
            return;
        }

        // Vehicle-local frame, twisted by the slip angle and the roll so the
        // plume follows the body, not the travel direction.
        let up0 = self.curr_norm.into_inner();
        let at0 = self.vel;
        let right0 = at0.cross(&up0);
        let up1 = right0.cross(&at0);
        let at1 = math::rotate_vector(at0, up1, -self.slip_angle);
        let right1 = math::rotate_vector(right0, at1, -self.rot_roll.to_radians());
        let (up, at, right) = match (up1.try_axis(), at1.try_axis(), right1.try_axis()) {
            (Some(up), Some(at), Some(right)) => {
                (up.into_inner(), at.into_inner(), right.into_inner())
            }
            _ => return,
        };

        for emitter in &config.exhausts {
            let plume =
                at * (-overall_vel.norm() * emitter.length_scale * self.exhaust_length);
            let start = self.position
                + up * emitter.pos_up
                + at * emitter.pos_at
                + right * emitter.pos_side;
            let end = start + plume;
            let count = 3 + (10.0 * plume.norm()) as usize;

            let step = (end - start) / count as f32;
            for i in 0..count {
                let along = i as f32 / count as f32;
                let jitter = rng::unit_sphere(&mut self.rng) * along * 0.2;
                let scale = (count - i) as f32 / count as f32;
                particles.spawn(ParticleBurst {
                    texture: emitter.texture,
                    position: start + step * i as f32 + jitter,
                    velocity: Vector3::zeros(),
                    rotation: 0.0,
                    scale: emitter.size * self.exhaust_length * scale,
                    lifetime: 1.0,
                    gravity: false,
                    fade: true,
                });
            }
        }
    }

    fn update_audio_loops(
        &mut self,
        overall_speed: f32,
        strafe_len: f32,
        surface: SurfaceFlags,
        dt: f32,
        audio: &mut dyn AudioService,
    ) {
        let position = self.position;

        // Engine drone follows the speed.
        if self.on_plane && overall_speed > 10.0 && !self.is_dead() {
            if self.source_engine.is_none() {
                self.source_engine =
                    audio.play(Sfx::EngineLoop, position, overall_speed / 250.0, true);
            }
            if let Some(handle) = self.source_engine {
                audio.set_pitch(handle, overall_speed / 200.0);
                audio.set_position(handle, position);
            }
        } else if let Some(handle) = self.source_engine.take() {
            audio.stop(handle);
        }

        // Strafe hiss ramps up the longer it is held.
        if strafe_len > 5.0 {
            if self.source_strafe.is_none() {
                self.source_strafe = audio.play(
                    Sfx::StrafeLoop,
                    position,
                    0.5 + self.strafe_loop_timer / 3.0,
                    true,
                );
            }
            if let Some(handle) = self.source_strafe {
                audio.set_pitch(handle, 0.5 + self.strafe_loop_timer / 3.0);
                audio.set_position(handle, position);
            }
            self.strafe_loop_timer = (self.strafe_loop_timer + dt).min(1.5);
        } else {
            self.strafe_loop_timer = 0.0;
            if let Some(handle) = self.source_strafe.take() {
                audio.stop(handle);
            }
        }

        // Tire screech while the slip is actually costing (or paying) speed.
        if self.slip_punish_last.abs() > 0.03 {
            if self.source_slip.is_none() {
                self.source_slip = audio.play(Sfx::SlipLoop, position, overall_speed / 250.0, true);
            }
            if let Some(handle) = self.source_slip {
                audio.set_pitch(handle, overall_speed / 250.0);
                audio.set_position(handle, position);
            }
        } else if let Some(handle) = self.source_slip.take() {
            audio.stop(handle);
        }

        // Low-health warning.
        if self.health < DANGER_HEALTH && !self.is_dead() {
            if self.source_danger.is_none() {
                self.source_danger = audio.play(Sfx::DangerLoop, position, 1.0, true);
            }
        } else if let Some(handle) = self.source_danger.take() {
            audio.stop(handle);
        }

        // Heal shimmer while topping up.
        if self.on_plane && surface.is_heal() && self.health < 1.0 && !self.is_dead() {
            if self.source_heal.is_none() {
                self.source_heal = audio.play(Sfx::HealLoop, position, 1.0, true);
            }
        } else if let Some(handle) = self.source_heal.take() {
            audio.stop(handle);
        }
    }

    /// Terminal: one burst of debris, one bang, and no further stepping.
    fn explode(&mut self, services: &mut Services<'_>) {
        if self.exploded {
            return;
        }
        self.exploded = true;
        for handle in [
            self.source_engine.take(),
            self.source_strafe.take(),
            self.source_slip.take(),
            self.source_danger.take(),
            self.source_heal.take(),
        ]
        .iter()
        .flatten()
        {
            services.audio.stop(*handle);
        }
        services.audio.play(Sfx::Explosion, self.position, 1.0, false);
        for _ in 0..EXPLOSION_PARTICLES {
            let dir = rng::unit_sphere(&mut self.rng);
            services.particles.spawn(ParticleBurst {
                texture: 1,
                position: self.position,
                velocity: dir * (20.0 + 40.0 * rng::uniform(&mut self.rng)),
                rotation: 2.0 * PI * rng::uniform(&mut self.rng),
                scale: 2.0,
                lifetime: 1.5,
                gravity: true,
                fade: true,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::VehicleConfig,
        effects::LastViewCamera,
        input::{Controls, InputSnapshot},
        mesh::{CollisionMesh, SurfaceFlags, Triangle},
        progress::{Checkpoint, Course},
    };
    use nalgebra::{Point3, Vector3};
    use std::sync::Arc;

    const DT: f32 = 1.0 / 60.0;

    struct RecordingAudio {
        played: Vec<Sfx>,
        next_index: u32,
    }

    impl RecordingAudio {
        fn new() -> RecordingAudio {
            RecordingAudio {
                played: Vec::new(),
                next_index: 0,
            }
        }

        fn count(&self, sfx: Sfx) -> usize {
            self.played.iter().filter(|&&s| s == sfx).count()
        }
    }

    impl AudioService for RecordingAudio {
        fn play(
            &mut self,
            sfx: Sfx,
            _position: Point3<f32>,
            _pitch: f32,
            _looping: bool,
        ) -> Option<AudioHandle> {
            self.played.push(sfx);
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

    struct CountingParticles {
        spawned: usize,
    }

    impl ParticleService for CountingParticles {
        fn spawn(&mut self, _burst: ParticleBurst) {
            self.spawned += 1;
        }
    }

    struct Harness {
        mesh: CollisionMesh,
        course: Course,
        audio: RecordingAudio,
        particles: CountingParticles,
        camera: LastViewCamera,
    }

    impl Harness {
        fn new(mesh: CollisionMesh) -> Harness {
            // One checkpoint big enough to cover everything, so fall-out
            // never interferes with kinematics tests.
            let course = Course::new(
                vec![Checkpoint::new_sphere(0, Point3::origin(), 1.0e6)],
                3,
            );
            Harness {
                mesh,
                course,
                audio: RecordingAudio::new(),
                particles: CountingParticles { spawned: 0 },
                camera: LastViewCamera::default(),
            }
        }

        fn step(&mut self, vehicle: &mut Vehicle, input: &InputSnapshot, countdown: bool) {
            let mut services = Services {
                audio: &mut self.audio,
                particles: &mut self.particles,
                camera: &mut self.camera,
            };
            vehicle.step(DT, input, &self.mesh, &self.course, countdown, &mut services);
        }

        fn step_n(
            &mut self,
            vehicle: &mut Vehicle,
            input: &InputSnapshot,
            countdown: bool,
            frames: usize,
        ) {
            for _ in 0..frames {
                self.step(vehicle, input, countdown);
            }
        }
    }

    fn flat_quad(flags: SurfaceFlags) -> Vec<Triangle> {
        // Large enough that twenty seconds of terminal speed stays on it.
        vec![
            Triangle::new(
                Point3::new(-10_000.0, 0.0, -10_000.0),
                Point3::new(-10_000.0, 0.0, 10_000.0),
                Point3::new(10_000.0, 0.0, 10_000.0),
                flags,
            )
            .unwrap(),
            Triangle::new(
                Point3::new(-10_000.0, 0.0, -10_000.0),
                Point3::new(10_000.0, 0.0, 10_000.0),
                Point3::new(10_000.0, 0.0, -10_000.0),
                flags,
            )
            .unwrap(),
        ]
    }

    /// Vertical wall at x = `x`, facing -x, tall and wide.
    fn wall_at(x: f32) -> Triangle {
        Triangle::new(
            Point3::new(x, -10.0, -200.0),
            Point3::new(x, -10.0, 200.0),
            Point3::new(x, 300.0, 0.0),
            SurfaceFlags::WALL,
        )
        .unwrap()
    }

    fn held(controls: Controls) -> InputSnapshot {
        InputSnapshot {
            current: controls,
            previous: controls,
        }
    }

    fn gas() -> InputSnapshot {
        held(Controls {
            gas: true,
            ..Controls::default()
        })
    }

    /// A vehicle seated on the ground at the origin, stun expired, heading +x.
    fn grounded(harness: &mut Harness) -> Vehicle {
        let mut vehicle = Vehicle::new(
            Arc::new(VehicleConfig::default()),
            Point3::new(0.0, 0.5, 0.0),
            Vector3::x_axis(),
            7,
        );
        vehicle.set_can_move_timer(0.0);
        harness.step(&mut vehicle, &InputSnapshot::zeroed(), true);
        assert!(vehicle.on_plane());
        vehicle
    }

    #[test]
    fn countdown_seats_the_vehicle() {
        let mut harness = Harness::new(CollisionMesh::new(flat_quad(SurfaceFlags::NONE)));
        let vehicle = grounded(&mut harness);
        assert!(vehicle.current_triangle().is_some());
        assert_eq!(
            vehicle.ground_normal().into_inner(),
            Vector3::new(0.0, 1.0, 0.0),
        );
    }

    #[test]
    fn full_throttle_approaches_terminal_and_never_exceeds_it() {
        let mut harness = Harness::new(CollisionMesh::new(flat_quad(SurfaceFlags::NONE)));
        let mut vehicle = grounded(&mut harness);
        let terminal = VehicleConfig::default().terminal_speed;

        for _ in 0..(20.0 / DT) as usize {
            harness.step(&mut vehicle, &gas(), false);
            assert!(vehicle.speed() <= terminal + 1e-3);
        }
        assert!(vehicle.speed() > terminal * 0.97);
    }

    #[test]
    fn braking_clamps_to_the_speed_floor_and_keeps_heading() {
        let mut harness = Harness::new(CollisionMesh::new(flat_quad(SurfaceFlags::NONE)));
        let mut vehicle = grounded(&mut harness);
        harness.step_n(&mut vehicle, &gas(), false, 120);

        let brake = held(Controls {
            brake: true,
            ..Controls::default()
        });
        harness.step_n(&mut vehicle, &brake, false, (15.0 / DT) as usize);

        assert!(vehicle.speed() >= VEL_SLOWEST * 0.999);
        assert!(vehicle.speed() < 1.0);
        let heading = vehicle.velocity() / vehicle.speed();
        assert!(heading.x > 0.99, "heading flipped: {:?}", heading);
    }

    #[test]
    fn wall_hit_bounces_stuns_and_hurts() {
        let mut triangles = flat_quad(SurfaceFlags::NONE);
        triangles.push(wall_at(60.0));
        let mut harness = Harness::new(CollisionMesh::new(triangles));
        let mut vehicle = grounded(&mut harness);
        let config = VehicleConfig::default();

        let mut speed_before = 0.0;
        let mut hit_frame_speed = None;
        for _ in 0..(10.0 / DT) as usize {
            let health_before = vehicle.health();
            harness.step(&mut vehicle, &gas(), false);
            if harness.audio.count(Sfx::WallImpact) > 0 {
                hit_frame_speed = Some((speed_before, health_before));
                break;
            }
            speed_before = vehicle.speed();
        }
        let (speed_before, health_before) = hit_frame_speed.expect("never hit the wall");

        // Redirected backwards at the configured fraction of impact speed.
        assert!(vehicle.velocity().x < 0.0);
        let expected = speed_before * config.hit_wall_speed_retention;
        assert!(
            (vehicle.speed() - expected).abs() / expected < 0.05,
            "{} vs {}",
            vehicle.speed(),
            expected,
        );
        // Head-on at near-full speed: proportional health penalty.
        assert!(vehicle.health() < health_before);
        let lost = health_before - vehicle.health();
        let predicted =
            config.hit_wall_health_punish * (speed_before / config.terminal_speed);
        assert!((lost - predicted).abs() < 0.05, "{} vs {}", lost, predicted);
        // Stunned for the configured time (one frame may already have
        // decayed).
        assert!(vehicle.can_move_timer > config.hit_wall_time_punish - 2.0 * DT);
    }

    #[test]
    fn boost_costs_health_and_kicks_speed() {
        let mut harness = Harness::new(CollisionMesh::new(flat_quad(SurfaceFlags::NONE)));
        let mut vehicle = grounded(&mut harness);
        let config = VehicleConfig::default();
        harness.step_n(&mut vehicle, &gas(), false, 240);
        let before = vehicle.speed();

        let press = gas().advance(Controls {
            gas: true,
            boost: true,
            ..Controls::default()
        });
        harness.step(&mut vehicle, &press, false);

        assert_eq!(harness.audio.count(Sfx::Boost), 1);
        assert!((vehicle.health() - (1.0 - config.boost_health_cost)).abs() < 1e-5);
        assert!(vehicle.speed() > before);
        assert!(vehicle.boost_delay_timer > 0.0);

        // Held button is not an edge; cooldown blocks a re-press anyway.
        harness.step(&mut vehicle, &held(press.current), false);
        assert_eq!(harness.audio.count(Sfx::Boost), 1);
    }

    #[test]
    fn boost_requires_ground() {
        let mut harness = Harness::new(CollisionMesh::new(flat_quad(SurfaceFlags::NONE)));
        let mut vehicle = Vehicle::new(
            Arc::new(VehicleConfig::default()),
            Point3::new(0.0, 400.0, 0.0),
            Vector3::x_axis(),
            7,
        );
        vehicle.set_can_move_timer(0.0);
        vehicle.set_velocity(Vector3::new(50.0, 0.0, 0.0));

        let press = InputSnapshot::zeroed().advance(Controls {
            boost: true,
            ..Controls::default()
        });
        harness.step(&mut vehicle, &press, false);
        assert_eq!(harness.audio.count(Sfx::Boost), 0);
        assert_eq!(vehicle.health(), 1.0);
    }

    #[test]
    fn heal_surface_restores_health_up_to_full() {
        let mut harness = Harness::new(CollisionMesh::new(flat_quad(SurfaceFlags::HEAL)));
        let mut vehicle = grounded(&mut harness);
        vehicle.health = 0.5;

        harness.step_n(&mut vehicle, &InputSnapshot::zeroed(), false, 60);
        assert!(vehicle.health() > 0.5);
        assert!(harness.audio.count(Sfx::HealLoop) >= 1);

        harness.step_n(&mut vehicle, &InputSnapshot::zeroed(), false, 600);
        assert_eq!(vehicle.health(), 1.0);
    }

    #[test]
    fn drift_boost_policy_gains_past_sustain_threshold() {
        let mut harness = Harness::new(CollisionMesh::new(flat_quad(SurfaceFlags::NONE)));
        let config = VehicleConfig::default();

        // Early in the slip: bleeding speed.
        let mut vehicle = grounded(&mut harness);
        vehicle.set_velocity(Vector3::new(200.0, 0.0, 0.0));
        vehicle.slip_timer = 1.0;
        vehicle.slip_angle = config.slip_angle_max * 0.9;
        vehicle.step_slip(&gas(), SurfaceFlags::NONE, DT);
        assert!(vehicle.speed() < 200.0);

        // Sustained one-directional slip with the gas held: paying out.
        let mut vehicle = grounded(&mut harness);
        vehicle.set_velocity(Vector3::new(200.0, 0.0, 0.0));
        vehicle.slip_timer = 1.0;
        vehicle.slip_angle = config.slip_angle_max * 0.9;
        vehicle.slip_timer_right = config.slip_timer_threshold + 0.1;
        vehicle.step_slip(&gas(), SurfaceFlags::NONE, DT);
        assert!(vehicle.speed() > 200.0);

        // Same, gas released: the gate closes and it bleeds again.
        let mut vehicle = grounded(&mut harness);
        vehicle.set_velocity(Vector3::new(200.0, 0.0, 0.0));
        vehicle.slip_timer = 1.0;
        vehicle.slip_angle = config.slip_angle_max * 0.9;
        vehicle.slip_timer_right = config.slip_timer_threshold + 0.1;
        vehicle.step_slip(&InputSnapshot::zeroed(), SurfaceFlags::NONE, DT);
        assert!(vehicle.speed() < 200.0);
    }

    #[test]
    fn slip_state_clears_airborne() {
        let mut harness = Harness::new(CollisionMesh::new(flat_quad(SurfaceFlags::NONE)));
        let mut vehicle = grounded(&mut harness);
        vehicle.slip_timer = 1.0;
        vehicle.slip_accumulated = 2.0;
        vehicle.on_plane = false;
        vehicle.step_slip(&InputSnapshot::zeroed(), SurfaceFlags::NONE, DT);
        assert_eq!(vehicle.slip_timer, 0.0);
        assert_eq!(vehicle.slip_accumulated, 0.0);
    }

    #[test]
    fn smooth_ramp_transition_keeps_speed() {
        // Flat floor up to x = 40, then a gentle 15-degree ramp. The normals
        // agree well past the smooth-transition threshold.
        let rise = 15.0_f32.to_radians().tan() * 200.0;
        let mut triangles = vec![
            Triangle::new(
                Point3::new(-500.0, 0.0, -200.0),
                Point3::new(-500.0, 0.0, 200.0),
                Point3::new(40.0, 0.0, 200.0),
                SurfaceFlags::NONE,
            )
            .unwrap(),
            Triangle::new(
                Point3::new(-500.0, 0.0, -200.0),
                Point3::new(40.0, 0.0, 200.0),
                Point3::new(40.0, 0.0, -200.0),
                SurfaceFlags::NONE,
            )
            .unwrap(),
        ];
        triangles.push(
            Triangle::new(
                Point3::new(40.0, 0.0, -200.0),
                Point3::new(40.0, 0.0, 200.0),
                Point3::new(240.0, rise, 200.0),
                SurfaceFlags::NONE,
            )
            .unwrap(),
        );
        triangles.push(
            Triangle::new(
                Point3::new(40.0, 0.0, -200.0),
                Point3::new(240.0, rise, 200.0),
                Point3::new(240.0, rise, -200.0),
                SurfaceFlags::NONE,
            )
            .unwrap(),
        );
        let mut harness = Harness::new(CollisionMesh::new(triangles));
        let mut vehicle = grounded(&mut harness);

        // Long enough to cross onto the ramp, short enough to stay on it.
        harness.step_n(&mut vehicle, &gas(), false, (1.2 / DT) as usize);

        assert_eq!(harness.audio.count(Sfx::WallImpact), 0);
        assert!(vehicle.on_plane());
        // Up the slope now: the ground normal tilted away from +y.
        assert!(vehicle.position().x > 40.0);
        assert!(vehicle.ground_normal().into_inner().y < 0.999);
        assert!(vehicle.velocity().y > 0.0);
    }

    #[test]
    fn airborne_vehicle_falls() {
        let mut harness = Harness::new(CollisionMesh::new(flat_quad(SurfaceFlags::NONE)));
        let mut vehicle = Vehicle::new(
            Arc::new(VehicleConfig::default()),
            Point3::new(0.0, 400.0, 0.0),
            Vector3::x_axis(),
            7,
        );
        vehicle.set_can_move_timer(0.0);
        vehicle.set_velocity(Vector3::new(50.0, 0.0, 0.0));

        harness.step_n(&mut vehicle, &InputSnapshot::zeroed(), false, 30);
        assert!(vehicle.velocity().y < 0.0);
        assert!(vehicle.position().y < 400.0);
    }

    #[test]
    fn landing_adopts_the_ground() {
        let mut harness = Harness::new(CollisionMesh::new(flat_quad(SurfaceFlags::NONE)));
        let mut vehicle = Vehicle::new(
            Arc::new(VehicleConfig::default()),
            Point3::new(0.0, 30.0, 0.0),
            Vector3::x_axis(),
            7,
        );
        vehicle.set_can_move_timer(0.0);
        vehicle.set_velocity(Vector3::new(50.0, 0.0, 0.0));

        harness.step_n(&mut vehicle, &InputSnapshot::zeroed(), false, (4.0 / DT) as usize);
        assert!(vehicle.on_plane());
        assert!(vehicle.position().y < 1.0);
        // Velocity got projected into the plane on touchdown.
        assert!(vehicle.velocity().y.abs() < 1.0);
    }

    #[test]
    fn stun_blocks_inputs() {
        let mut harness = Harness::new(CollisionMesh::new(flat_quad(SurfaceFlags::NONE)));
        let mut vehicle = grounded(&mut harness);
        vehicle.set_can_move_timer(10.0);
        harness.step_n(&mut vehicle, &gas(), false, 60);
        assert!(vehicle.speed() < 1.0);
    }

    #[test]
    fn death_spins_then_explodes_and_stops_stepping() {
        let mut harness = Harness::new(CollisionMesh::new(flat_quad(SurfaceFlags::NONE)));
        let mut vehicle = grounded(&mut harness);
        vehicle.health = -0.1;

        harness.step_n(&mut vehicle, &gas(), false, (3.0 / DT) as usize);
        assert!(vehicle.is_exploded());
        assert_eq!(harness.audio.count(Sfx::Explosion), 1);
        assert!(harness.particles.spawned >= EXPLOSION_PARTICLES);

        let position = vehicle.position();
        harness.step_n(&mut vehicle, &gas(), false, 60);
        assert_eq!(vehicle.position(), position);
        assert_eq!(harness.audio.count(Sfx::Explosion), 1);
    }

    #[test]
    fn engine_loop_follows_speed() {
        let mut harness = Harness::new(CollisionMesh::new(flat_quad(SurfaceFlags::NONE)));
        let mut vehicle = grounded(&mut harness);
        harness.step_n(&mut vehicle, &gas(), false, 300);
        assert_eq!(harness.audio.count(Sfx::EngineLoop), 1);
        assert!(vehicle.speedometer() > 0.0);
    }

    #[test]
    fn side_attack_needs_speed_wheel_and_cooldown() {
        let mut harness = Harness::new(CollisionMesh::new(flat_quad(SurfaceFlags::NONE)));
        let mut vehicle = grounded(&mut harness);
        vehicle.set_velocity(Vector3::new(200.0, 0.0, 0.0));

        let press = InputSnapshot::zeroed().advance(Controls {
            gas: true,
            side_attack: true,
            wheel: 1.0,
            ..Controls::default()
        });
        let kick = vehicle.step_side_attack(&press);
        assert!(kick.norm() > 0.0);
        assert!(vehicle.side_attack_timer > 0.0);
        assert!(vehicle.side_attack_cooldown_timer > 0.0);

        // Too slow: no attack.
        let mut slow = grounded(&mut harness);
        slow.set_velocity(Vector3::new(10.0, 0.0, 0.0));
        assert_eq!(slow.step_side_attack(&press), Vector3::zeros());

        // No wheel deflection: no attack.
        let mut straight = grounded(&mut harness);
        straight.set_velocity(Vector3::new(200.0, 0.0, 0.0));
        let no_wheel = InputSnapshot::zeroed().advance(Controls {
            side_attack: true,
            ..Controls::default()
        });
        assert_eq!(straight.step_side_attack(&no_wheel), Vector3::zeros());
    }

    #[test]
    fn spin_attack_punishes_terminal_speed() {
        let mut harness = Harness::new(CollisionMesh::new(flat_quad(SurfaceFlags::NONE)));
        let config = VehicleConfig::default();
        let mut vehicle = grounded(&mut harness);
        harness.step_n(&mut vehicle, &gas(), false, (20.0 / DT) as usize);
        let cruising = vehicle.speed();

        let press = gas().advance(Controls {
            gas: true,
            spin_attack: true,
            ..Controls::default()
        });
        harness.step(&mut vehicle, &press, false);
        assert!(vehicle.spin_attack_timer > 0.0);
        harness.step_n(&mut vehicle, &gas(), false, 30);
        // Half a second of spinning drags the speed below the plain terminal.
        assert!(vehicle.speed() < cruising);
        assert!(vehicle.speed() > cruising * config.spin_punish * 0.9);
    }
}
