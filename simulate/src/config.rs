//! Per-vehicle-type tuning. Each vehicle kind gets a `tuning.ini` of
//! `key;value` lines and an `exhaust.ini` of whitespace-delimited emitter
//! records. Every field has a compiled-in default, so a missing or mangled
//! file degrades to a drivable vehicle instead of an error.

use lazy_static::lazy_static;
use log::{debug, warn};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

/// Identifies a vehicle type; doubles as the config directory name
/// (`vehicle<N>/`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct VehicleKind(pub u16);

/// One exhaust emitter, in the vehicle's local up/at/side frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ExhaustEmitter {
    pub texture: u32,
    pub pos_up: f32,
    pub pos_at: f32,
    pub pos_side: f32,
    pub length_scale: f32,
    pub size: f32,
}

lazy_static! {
    /// Fallback exhaust layout: a single centered emitter.
    static ref DEFAULT_EXHAUSTS: Vec<ExhaustEmitter> = vec![ExhaustEmitter {
        texture: 0,
        pos_up: 0.0,
        pos_at: -1.5,
        pos_side: 0.0,
        length_scale: 0.01,
        size: 0.5,
    }];
}

#[derive(Clone, Debug, PartialEq)]
pub struct VehicleConfig {
    pub terminal_speed: f32,
    pub terminal_accel_gas: f32,
    pub terminal_accel_brake: f32,
    pub terminal_accel_coast: f32,

    pub turn_speed: f32,
    pub turn_punish: f32,

    pub dive_speed: f32,
    pub dive_punish: f32,

    pub strafe_percentage: f32,
    pub strafe_terminal_punish: f32,

    pub slip_timer_max: f32,
    pub slip_threshold: f32,
    pub slip_angle_accel: f32,
    /// Radians. The file stores degrees; conversion happens on load.
    pub slip_angle_max: f32,
    pub slip_power: f32,
    pub slip_power_pos: f32,
    pub slip_power_neg: f32,
    pub slip_timer_threshold: f32,
    pub drift_boost_requires_gas: bool,

    pub boost_speed: f32,
    pub boost_kick: f32,
    pub boost_duration: f32,
    pub boost_delay_max: f32,
    pub boost_health_cost: f32,

    pub heal_rate: f32,
    pub hit_wall_time_punish: f32,
    pub hit_wall_health_punish: f32,
    pub hit_wall_speed_retention: f32,

    pub side_attack_cooldown: f32,
    pub side_attack_power: f32,
    pub spin_attack_cooldown: f32,
    pub spin_punish: f32,

    pub cam_radius: f32,
    pub cam_radius_adjust: f32,
    pub cam_fov_adjust: f32,
    pub cam_height_offset: f32,
    pub cam_smoothness: f32,
    pub cam_angle_lookdown: f32,

    pub gravity_force: f32,
    pub surface_tension: f32,
    pub smooth_transition_threshold: f32,

    pub exhausts: Vec<ExhaustEmitter>,
}

impl Default for VehicleConfig {
    fn default() -> VehicleConfig {
        VehicleConfig {
            terminal_speed: 298.0,
            terminal_accel_gas: 0.45,
            terminal_accel_brake: 1.0,
            terminal_accel_coast: 0.1,

            turn_speed: 1.38,
            turn_punish: 0.1,

            dive_speed: 4.5,
            dive_punish: 2.5,

            strafe_percentage: 0.2,
            strafe_terminal_punish: 0.95,

            slip_timer_max: 1.5,
            slip_threshold: 2.5,
            slip_angle_accel: 5.0,
            slip_angle_max: 40.0_f32.to_radians(),
            slip_power: 1.5,
            slip_power_pos: 1.5,
            slip_power_neg: 1.5,
            slip_timer_threshold: 0.5,
            drift_boost_requires_gas: true,

            boost_speed: 462.0,
            boost_kick: 0.7,
            boost_duration: 1.0,
            boost_delay_max: 1.15,
            boost_health_cost: 0.25,

            heal_rate: 0.35,
            hit_wall_time_punish: 0.125,
            hit_wall_health_punish: 0.3,
            hit_wall_speed_retention: 0.75,

            side_attack_cooldown: 1.0,
            side_attack_power: 90.0,
            spin_attack_cooldown: 1.2,
            spin_punish: 0.8,

            cam_radius: 7.5,
            cam_radius_adjust: 0.0005,
            cam_fov_adjust: 0.05,
            cam_height_offset: 2.5,
            cam_smoothness: 5.0,
            cam_angle_lookdown: 0.2,

            gravity_force: 180.0,
            surface_tension: 10.0,
            smooth_transition_threshold: 0.6,

            exhausts: DEFAULT_EXHAUSTS.clone(),
        }
    }
}

impl VehicleConfig {
    /// Apply `key;value` tuning lines on top of `self`. Blank lines and `#`
    /// comments are ignored; lines with the wrong field count or an
    /// unparsable value are skipped without complaint.
    pub fn apply_tuning(&mut self, content: &str) {
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split(';').collect();
            if fields.len() != 2 {
                continue;
            }
            let value: f32 = match fields[1].trim().parse() {
                Ok(v) => v,
                Err(_) => continue,
            };
            match fields[0].trim() {
                "terminalSpeed" => self.terminal_speed = value,
                "terminalAccelGas" => self.terminal_accel_gas = value,
                "terminalAccelBrake" => self.terminal_accel_brake = value,
                "terminalAccelCoast" => self.terminal_accel_coast = value,
                "turnSpeed" => self.turn_speed = value,
                "turnPunish" => self.turn_punish = value,
                "diveSpeed" => self.dive_speed = value,
                "divePunish" => self.dive_punish = value,
                "strafePercentage" => self.strafe_percentage = value,
                "strafeTerminalPunish" => self.strafe_terminal_punish = value,
                "slipTimerMax" => self.slip_timer_max = value,
                "slipThreshold" => self.slip_threshold = value,
                "slipAngleAccel" => self.slip_angle_accel = value,
                "slipAngleMax" => self.slip_angle_max = value.to_radians(),
                "slipPower" => self.slip_power = value,
                "slipPowerPos" => self.slip_power_pos = value,
                "slipPowerNeg" => self.slip_power_neg = value,
                "slipTimerThreshold" => self.slip_timer_threshold = value,
                "driftBoostRequiresGas" => self.drift_boost_requires_gas = value != 0.0,
                "boostSpeed" => self.boost_speed = value,
                "boostKick" => self.boost_kick = value,
                "boostDuration" => self.boost_duration = value,
                "boostDelayMax" => self.boost_delay_max = value,
                "boostHealthCost" => self.boost_health_cost = value,
                "healRate" => self.heal_rate = value,
                "hitWallTimePunish" => self.hit_wall_time_punish = value,
                "hitWallHealthPunish" => self.hit_wall_health_punish = value,
                "hitWallSpeedRetention" => self.hit_wall_speed_retention = value,
                "sideAttackCooldown" => self.side_attack_cooldown = value,
                "sideAttackPower" => self.side_attack_power = value,
                "spinAttackCooldown" => self.spin_attack_cooldown = value,
                "spinPunish" => self.spin_punish = value,
                "camRadius" => self.cam_radius = value,
                "camRadiusAdjust" => self.cam_radius_adjust = value,
                "camFovAdjust" => self.cam_fov_adjust = value,
                "camHeightOffset" => self.cam_height_offset = value,
                "camSmoothness" => self.cam_smoothness = value,
                "camAngleLookdown" => self.cam_angle_lookdown = value,
                "gravityForce" => self.gravity_force = value,
                "surfaceTension" => self.surface_tension = value,
                "smoothTransitionThreshold" => self.smooth_transition_threshold = value,
                other => debug!("unknown tuning key '{}'", other),
            }
        }
    }

    /// Parse exhaust emitter records: seven whitespace-delimited numbers per
    /// line (`texture posUp posAt posSide atOffset lengthScale size`); the
    /// at-offset folds into `pos_at`. Returns `None` when no record parses,
    /// so the caller keeps the default layout.
    pub fn parse_exhausts(content: &str) -> Option<Vec<ExhaustEmitter>> {
        let mut exhausts = Vec::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != 7 {
                continue;
            }
            let texture: u32 = match fields[0].parse() {
                Ok(v) => v,
                Err(_) => continue,
            };
            let numbers: Vec<f32> = fields[1..]
                .iter()
                .filter_map(|field| field.parse().ok())
                .collect();
            if numbers.len() != 6 {
                continue;
            }
            exhausts.push(ExhaustEmitter {
                texture,
                pos_up: numbers[0],
                pos_at: numbers[1] + numbers[3],
                pos_side: numbers[2],
                length_scale: numbers[4],
                size: numbers[5],
            });
        }
        if exhausts.is_empty() {
            None
        } else {
            Some(exhausts)
        }
    }
}

/// Lazily-populated, explicitly-released cache of per-kind configs. All
/// instances of a kind share one `Arc<VehicleConfig>`.
pub struct ConfigRegistry {
    root: PathBuf,
    cache: HashMap<VehicleKind, Arc<VehicleConfig>>,
}

impl ConfigRegistry {
    pub fn new(root: impl Into<PathBuf>) -> ConfigRegistry {
        ConfigRegistry {
            root: root.into(),
            cache: HashMap::new(),
        }
    }

    pub fn get(&mut self, kind: VehicleKind) -> Arc<VehicleConfig> {
        let root = &self.root;
        self.cache
            .entry(kind)
            .or_insert_with(|| Arc::new(load_config(root, kind)))
            .clone()
    }

    pub fn release(&mut self, kind: VehicleKind) {
        self.cache.remove(&kind);
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

fn load_config(root: &Path, kind: VehicleKind) -> VehicleConfig {
    let dir = root.join(format!("vehicle{}", kind.0));
    let mut config = VehicleConfig::default();

    let tuning_path = dir.join("tuning.ini");
    match fs::read_to_string(&tuning_path) {
        Ok(content) => config.apply_tuning(&content),
        Err(err) => warn!(
            "cannot load '{}' ({}); using default tuning",
            tuning_path.display(),
            err,
        ),
    }

    let exhaust_path = dir.join("exhaust.ini");
    match fs::read_to_string(&exhaust_path) {
        Ok(content) => {
            if let Some(exhausts) = VehicleConfig::parse_exhausts(&content) {
                config.exhausts = exhausts;
            }
        }
        Err(err) => warn!(
            "cannot load '{}' ({}); using default exhaust layout",
            exhaust_path.display(),
            err,
        ),
    }

    config
}

#[cfg(test)]
mod tests {
    use crate::config::{ConfigRegistry, VehicleConfig, VehicleKind};
    use std::sync::Arc;

    #[test]
    fn tuning_lines_override_defaults() {
        let mut config = VehicleConfig::default();
        config.apply_tuning(
            "# comment\n\
             terminalSpeed;350\n\
             turnSpeed ; 2.0\n\
             \n\
             driftBoostRequiresGas;0\n",
        );
        assert_eq!(config.terminal_speed, 350.0);
        assert_eq!(config.turn_speed, 2.0);
        assert!(!config.drift_boost_requires_gas);
        // Untouched keys keep their defaults.
        assert_eq!(config.boost_speed, 462.0);
    }

    #[test]
    fn malformed_tuning_lines_are_skipped() {
        let mut config = VehicleConfig::default();
        config.apply_tuning(
            "terminalSpeed\n\
             terminalSpeed;very fast\n\
             terminalSpeed;1;2\n\
             boostKick;0.9\n",
        );
        assert_eq!(config.terminal_speed, 298.0);
        assert_eq!(config.boost_kick, 0.9);
    }

    #[test]
    fn slip_angle_max_converts_to_radians() {
        let mut config = VehicleConfig::default();
        config.apply_tuning("slipAngleMax;90\n");
        assert!((config.slip_angle_max - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn exhaust_records_fold_at_offset() {
        let exhausts = VehicleConfig::parse_exhausts(
            "# texture up at side atOffset lengthScale size\n\
             3 0.5 -2.0 1.0 -0.25 0.012 0.8\n\
             bogus line\n\
             1 2 3\n",
        )
        .unwrap();
        assert_eq!(exhausts.len(), 1);
        assert_eq!(exhausts[0].texture, 3);
        assert_eq!(exhausts[0].pos_at, -2.25);
        assert_eq!(exhausts[0].pos_side, 1.0);
    }

    #[test]
    fn all_malformed_exhausts_yield_none() {
        assert!(VehicleConfig::parse_exhausts("# nothing here\n1 2 3\n").is_none());
    }

    #[test]
    fn registry_caches_and_falls_back_to_defaults() {
        // Nonexistent root: every load degrades to defaults (and warns).
        let mut registry = ConfigRegistry::new("/nonexistent/config/root");
        let first = registry.get(VehicleKind(0));
        let second = registry.get(VehicleKind(0));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*first, VehicleConfig::default());

        registry.release(VehicleKind(0));
        let third = registry.get(VehicleKind(0));
        assert!(!Arc::ptr_eq(&first, &third));
    }
}
