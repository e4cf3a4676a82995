//! The chase camera. Orbits behind the smoothed travel direction, zooms out
//! with speed, and pitches down extra when recent terrain curvature says the
//! track is falling away under the vehicle.

use crate::config::VehicleConfig;
use common::math;
use nalgebra::{Point3, Unit, Vector3};
use std::f32::consts::FRAC_PI_2;

/// How fast the extra lookdown chases its target.
const LOOKDOWN_SMOOTHNESS: f32 = 0.4;
/// How fast the target itself decays back to zero.
const LOOKDOWN_TARGET_DECAY: f32 = 2.5;
/// Cap on the extra lookdown, radians.
const LOOKDOWN_MAX: f32 = 0.3;
/// Contribution of a single plane transition to the lookdown target.
const LOOKDOWN_FEEDBACK_SCALE: f32 = 0.005;

#[derive(Copy, Clone, Debug)]
pub struct CameraFrame {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Unit<Vector3<f32>>,
    pub fov_addition: f32,
}

#[derive(Default)]
pub struct CameraRig {
    lookdown_additional: f32,
    lookdown_additional_target: f32,
}

impl CameraRig {
    pub fn new() -> CameraRig {
        CameraRig::default()
    }

    /// Called by the vehicle on every plane transition with the out-of-plane
    /// component of the new travel direction. Convex transitions push the
    /// camera to look further down.
    pub fn feed_surface_curvature(&mut self, out_of_plane: f32) {
        self.lookdown_additional_target -= out_of_plane * LOOKDOWN_FEEDBACK_SCALE;
    }

    pub fn lookdown_additional(&self) -> f32 {
        self.lookdown_additional
    }

    /// Advance the smoothing state and derive the frame's view.
    pub fn compute(
        &mut self,
        config: &VehicleConfig,
        position: Point3<f32>,
        cam_dir_smooth: Unit<Vector3<f32>>,
        norm_smooth: Unit<Vector3<f32>>,
        speed: f32,
        dt: f32,
    ) -> CameraFrame {
        self.lookdown_additional_target = self
            .lookdown_additional_target
            .max(-LOOKDOWN_MAX)
            .min(LOOKDOWN_MAX);
        self.lookdown_additional = math::approach(
            self.lookdown_additional,
            self.lookdown_additional_target,
            LOOKDOWN_SMOOTHNESS,
            dt,
        );
        self.lookdown_additional_target =
            math::approach(self.lookdown_additional_target, 0.0, LOOKDOWN_TARGET_DECAY, dt);

        let lookdown = config.cam_angle_lookdown + self.lookdown_additional;

        // The side axis: the up vector swung a quarter turn about the view
        // direction.
        let side = math::rotate_vector(
            norm_smooth.into_inner(),
            cam_dir_smooth.into_inner(),
            -FRAC_PI_2,
        );

        let radius = config.cam_radius * (1.0 + speed * config.cam_radius_adjust);
        let cam_offset =
            math::rotate_vector(cam_dir_smooth.into_inner() * radius, side, lookdown);
        let cam_height = norm_smooth.into_inner() * config.cam_height_offset;

        let eye = position - cam_offset + cam_height;
        let target = position + cam_height;
        let up = Unit::new_normalize(math::rotate_vector(
            norm_smooth.into_inner(),
            side,
            lookdown,
        ));

        CameraFrame {
            eye,
            target,
            up,
            fov_addition: speed * config.cam_fov_adjust,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{camera::CameraRig, config::VehicleConfig};
    use nalgebra::{Point3, Unit, Vector3};

    const DT: f32 = 1.0 / 60.0;

    fn frame_at_speed(speed: f32) -> crate::camera::CameraFrame {
        let mut rig = CameraRig::new();
        rig.compute(
            &VehicleConfig::default(),
            Point3::origin(),
            Unit::new_normalize(Vector3::new(1.0, 0.0, 0.0)),
            Unit::new_normalize(Vector3::new(0.0, 1.0, 0.0)),
            speed,
            DT,
        )
    }

    #[test]
    fn orbit_radius_scales_with_speed() {
        let slow = frame_at_speed(0.0);
        let fast = frame_at_speed(400.0);
        let slow_radius = (slow.eye - slow.target).norm();
        let fast_radius = (fast.eye - fast.target).norm();
        assert!(fast_radius > slow_radius);
        let config = VehicleConfig::default();
        assert!((slow_radius - config.cam_radius).abs() < 1e-3);
    }

    #[test]
    fn up_stays_unit_length() {
        let frame = frame_at_speed(250.0);
        assert!((frame.up.into_inner().norm() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn fov_addition_tracks_speed() {
        let frame = frame_at_speed(200.0);
        assert!((frame.fov_addition - 200.0 * 0.05).abs() < 1e-4);
    }

    #[test]
    fn curvature_feedback_is_clamped_and_decays() {
        let mut rig = CameraRig::new();
        // A huge kick cannot push the lookdown past its cap.
        rig.feed_surface_curvature(-1000.0);
        let config = VehicleConfig::default();
        for _ in 0..600 {
            rig.compute(
                &config,
                Point3::origin(),
                Unit::new_normalize(Vector3::new(1.0, 0.0, 0.0)),
                Unit::new_normalize(Vector3::new(0.0, 1.0, 0.0)),
                100.0,
                DT,
            );
            assert!(rig.lookdown_additional().abs() <= 0.3 + 1e-4);
        }
        // After ten simulated seconds the feedback has washed out.
        assert!(rig.lookdown_additional().abs() < 0.02);
    }
}
