//! Contracts for the collaborator subsystems the core triggers but does not
//! own: audio playback, particle spawning, and the camera sink. All calls are
//! fire-and-forget from the core's point of view.

use nalgebra::{Point3, Unit, Vector3};

/// Sound effects the core can trigger. The audio subsystem maps these to
/// buffers; the core neither loads nor owns them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sfx {
    Boost,
    WallImpact,
    LapComplete,
    RaceFinish,
    FallOutWarning,
    Explosion,
    EngineLoop,
    StrafeLoop,
    SlipLoop,
    DangerLoop,
    HealLoop,
    BoostPad,
    JumpRamp,
}

/// Weak reference to a playing source. The audio subsystem owns the source
/// table; the generation lets it reject handles that outlived their slot
/// instead of touching a recycled source.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AudioHandle {
    pub index: u32,
    pub generation: u32,
}

pub trait AudioService {
    /// Start a sound. `None` means the subsystem declined (out of voices,
    /// muted); callers must treat that as success.
    fn play(
        &mut self,
        sfx: Sfx,
        position: Point3<f32>,
        pitch: f32,
        looping: bool,
    ) -> Option<AudioHandle>;
    /// No-ops on stale handles.
    fn set_pitch(&mut self, handle: AudioHandle, pitch: f32);
    fn set_position(&mut self, handle: AudioHandle, position: Point3<f32>);
    fn stop(&mut self, handle: AudioHandle);
    /// Playback progress in `[0, 1]`, or `None` for a stale handle.
    fn completion(&self, handle: AudioHandle) -> Option<f32>;
}

/// One-shot particle description.
#[derive(Copy, Clone, Debug)]
pub struct ParticleBurst {
    pub texture: u32,
    pub position: Point3<f32>,
    pub velocity: Vector3<f32>,
    pub rotation: f32,
    pub scale: f32,
    pub lifetime: f32,
    pub gravity: bool,
    pub fade: bool,
}

pub trait ParticleService {
    fn spawn(&mut self, burst: ParticleBurst);
}

pub trait CameraSink {
    fn set_view_matrix(&mut self, eye: Point3<f32>, target: Point3<f32>, up: Unit<Vector3<f32>>);
    fn set_fov_addition(&mut self, fov: f32);
}

/// Do-nothing audio service that still hands out (generation zero) handles,
/// so the looping-source bookkeeping in the vehicle gets exercised headless.
#[derive(Default)]
pub struct SilentAudio {
    next_index: u32,
}

impl AudioService for SilentAudio {
    fn play(
        &mut self,
        _sfx: Sfx,
        _position: Point3<f32>,
        _pitch: f32,
        _looping: bool,
    ) -> Option<AudioHandle> {
        let handle = AudioHandle {
            index: self.next_index,
            generation: 0,
        };
        self.next_index = self.next_index.wrapping_add(1);
        Some(handle)
    }

    fn set_pitch(&mut self, _handle: AudioHandle, _pitch: f32) {}

    fn set_position(&mut self, _handle: AudioHandle, _position: Point3<f32>) {}

    fn stop(&mut self, _handle: AudioHandle) {}

    fn completion(&self, _handle: AudioHandle) -> Option<f32> {
        Some(1.0)
    }
}

#[derive(Default)]
pub struct SilentParticles;

impl ParticleService for SilentParticles {
    fn spawn(&mut self, _burst: ParticleBurst) {}
}

/// Camera sink that remembers the last view it was given; the headless
/// driver logs from it.
#[derive(Default)]
pub struct LastViewCamera {
    pub view: Option<(Point3<f32>, Point3<f32>, Vector3<f32>)>,
    pub fov_addition: f32,
}

impl CameraSink for LastViewCamera {
    fn set_view_matrix(&mut self, eye: Point3<f32>, target: Point3<f32>, up: Unit<Vector3<f32>>) {
        self.view = Some((eye, target, up.into_inner()));
    }

    fn set_fov_addition(&mut self, fov: f32) {
        self.fov_addition = fov;
    }
}
