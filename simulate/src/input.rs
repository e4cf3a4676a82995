//! The per-frame input snapshot. The host polls devices and hands the core a
//! plain value; the previous frame's controls ride along so button edges and
//! wheel jerk can be detected without the core holding input state.

/// One frame's worth of control values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Controls {
    pub gas: bool,
    pub brake: bool,
    pub boost: bool,
    pub side_attack: bool,
    pub spin_attack: bool,
    /// Steering, -1 (left) to 1 (right).
    pub wheel: f32,
    /// Nose control while airborne, -1 (pull up) to 1 (dive).
    pub dive: f32,
    /// Left/right strafe triggers, 0 to 1.
    pub trigger_l: f32,
    pub trigger_r: f32,
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    pub current: Controls,
    pub previous: Controls,
}

impl InputSnapshot {
    /// Shift `current` into `previous` and adopt this frame's controls.
    pub fn advance(&self, next: Controls) -> InputSnapshot {
        InputSnapshot {
            current: next,
            previous: self.current,
        }
    }

    /// All-zero inputs with no pending edges; what the vehicle sees while
    /// stunned or dead.
    pub fn zeroed() -> InputSnapshot {
        InputSnapshot::default()
    }

    pub fn pressed_boost(&self) -> bool {
        self.current.boost && !self.previous.boost
    }

    pub fn pressed_side_attack(&self) -> bool {
        self.current.side_attack && !self.previous.side_attack
    }

    pub fn pressed_spin_attack(&self) -> bool {
        self.current.spin_attack && !self.previous.spin_attack
    }

    /// How far the wheel moved since last frame; the slip accumulator feeds
    /// on this.
    pub fn wheel_jerk(&self) -> f32 {
        self.current.wheel - self.previous.wheel
    }
}

#[cfg(test)]
mod tests {
    use crate::input::{Controls, InputSnapshot};

    #[test]
    fn edges_fire_once() {
        let held = Controls {
            boost: true,
            ..Controls::default()
        };
        let input = InputSnapshot::zeroed().advance(held);
        assert!(input.pressed_boost());
        let input = input.advance(held);
        assert!(!input.pressed_boost());
    }

    #[test]
    fn wheel_jerk_is_frame_delta() {
        let mut input = InputSnapshot::zeroed();
        input = input.advance(Controls {
            wheel: 0.25,
            ..Controls::default()
        });
        input = input.advance(Controls {
            wheel: -0.5,
            ..Controls::default()
        });
        assert!((input.wheel_jerk() - -0.75).abs() < 1e-6);
    }

    #[test]
    fn zeroed_has_no_edges() {
        let input = InputSnapshot::zeroed();
        assert!(!input.pressed_boost());
        assert!(!input.pressed_side_attack());
        assert!(!input.pressed_spin_attack());
        assert_eq!(input.wheel_jerk(), 0.0);
    }
}
