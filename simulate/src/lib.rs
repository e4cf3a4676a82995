#![cfg_attr(feature = "strict", deny(warnings))]

//! The locomotion core of the racing game: per-frame vehicle kinematics
//! (slip, boost, strafing, attacks, diving) fused with swept triangle-mesh
//! collision and sliding, plus the chase camera, per-vehicle tuning, and
//! checkpoint progress. Rendering, audio decoding, particle drawing and
//! input polling live elsewhere and are reached through the traits in
//! [`effects`].

pub use crate::{
    camera::{CameraFrame, CameraRig},
    config::{ConfigRegistry, ExhaustEmitter, VehicleConfig, VehicleKind},
    effects::{
        AudioHandle, AudioService, CameraSink, LastViewCamera, ParticleBurst, ParticleService,
        Sfx, SilentAudio, SilentParticles,
    },
    input::{Controls, InputSnapshot},
    mesh::{CollisionMesh, MeshError, SurfaceFlags, SweepHit, Triangle, TriangleId},
    progress::{Checkpoint, Course, Progress, ProgressEvent},
    track::{BoostPad, JumpRamp},
    vehicle::{Services, Vehicle},
};

pub mod camera;
pub mod config;
pub mod effects;
pub mod input;
pub mod mesh;
pub mod progress;
pub mod track;
pub mod vehicle;
