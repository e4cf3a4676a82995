//! Checkpoint containment, lap bookkeeping and fall-out detection. The core
//! only ever reads checkpoints; authoring them is the track loader's job.

use log::debug;
use nalgebra::{Isometry3, Point3, Vector3};
use ncollide3d::{
    query::PointQuery,
    shape::{Ball, Cuboid},
};

/// Seconds outside all checkpoints before the penalty cue fires.
const FALL_OUT_WARNING: f32 = 1.5;
/// Seconds outside all checkpoints before the vehicle is considered gone.
const FALL_OUT_LIMIT: f32 = 3.5;

enum Volume {
    Box {
        iso: Isometry3<f32>,
        shape: Cuboid<f32>,
    },
    Sphere {
        center: Point3<f32>,
        shape: Ball<f32>,
    },
}

pub struct Checkpoint {
    id: u32,
    volume: Volume,
}

impl Checkpoint {
    pub fn new_box(id: u32, iso: Isometry3<f32>, half_extents: Vector3<f32>) -> Checkpoint {
        Checkpoint {
            id,
            volume: Volume::Box {
                iso,
                shape: Cuboid::new(half_extents),
            },
        }
    }

    pub fn new_sphere(id: u32, center: Point3<f32>, radius: f32) -> Checkpoint {
        Checkpoint {
            id,
            volume: Volume::Sphere {
                center,
                shape: Ball::new(radius),
            },
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn contains(&self, point: &Point3<f32>) -> bool {
        match &self.volume {
            Volume::Box { iso, shape } => shape.contains_point(iso, point),
            Volume::Sphere { center, shape } => {
                shape.contains_point(&Isometry3::new(center.coords, Vector3::zeros()), point)
            }
        }
    }
}

pub struct Course {
    checkpoints: Vec<Checkpoint>,
    laps_to_finish: i32,
}

impl Course {
    pub fn new(mut checkpoints: Vec<Checkpoint>, laps_to_finish: i32) -> Course {
        checkpoints.sort_by_key(|checkpoint| checkpoint.id);
        Course {
            checkpoints,
            laps_to_finish,
        }
    }

    pub fn checkpoint_count(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn laps_to_finish(&self) -> i32 {
        self.laps_to_finish
    }

    /// The lowest-id checkpoint containing `point`, if any. Checkpoints are
    /// kept sorted, so the first match wins ties.
    pub fn containing_checkpoint(&self, point: &Point3<f32>) -> Option<u32> {
        self.checkpoints
            .iter()
            .find(|checkpoint| checkpoint.contains(point))
            .map(|checkpoint| checkpoint.id)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProgressEvent {
    LapCompleted { lap: i32 },
    Finished,
    /// Jumped two or more checkpoints in one frame; treated like leaving the
    /// track.
    SkippedCheckpoints,
    FallOutWarning,
    FellOut,
}

#[derive(Default)]
pub struct Progress {
    last_checkpoint: Option<u32>,
    lap: i32,
    lap_distance: i32,
    fall_out_timer: f32,
    fell_out: bool,
    finished: bool,
}

impl Progress {
    pub fn new() -> Progress {
        Progress::default()
    }

    pub fn lap(&self) -> i32 {
        self.lap
    }

    pub fn lap_distance(&self) -> i32 {
        self.lap_distance
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn fall_out_timer(&self) -> f32 {
        self.fall_out_timer
    }

    /// Per-frame progress update. Events are returned in the order they
    /// occurred; the caller turns them into sounds and terminal state.
    pub fn update(
        &mut self,
        course: &Course,
        position: &Point3<f32>,
        dt: f32,
    ) -> Vec<ProgressEvent> {
        let mut events = Vec::new();

        let containing = course.containing_checkpoint(position);
        let id = match containing {
            Some(id) => id,
            None => {
                let before = self.fall_out_timer;
                self.fall_out_timer += dt;
                if before < FALL_OUT_WARNING && self.fall_out_timer >= FALL_OUT_WARNING {
                    events.push(ProgressEvent::FallOutWarning);
                }
                if self.fall_out_timer >= FALL_OUT_LIMIT && !self.fell_out {
                    self.fell_out = true;
                    events.push(ProgressEvent::FellOut);
                }
                return events;
            }
        };

        self.fall_out_timer = 0.0;
        self.fell_out = false;

        let last = match self.last_checkpoint {
            Some(last) => last,
            None => {
                self.last_checkpoint = Some(id);
                return events;
            }
        };
        if last == id {
            return events;
        }
        self.last_checkpoint = Some(id);

        let count = course.checkpoint_count() as i32;
        let mut delta = id as i32 - last as i32;
        // Wrap across the lap seam: the highest id and id 0 are adjacent in
        // both directions.
        if delta > count / 2 {
            delta -= count;
        } else if delta < -(count / 2) {
            delta += count;
        }

        if delta.abs() >= 2 {
            debug!("skipped {} checkpoints ({} -> {})", delta.abs() - 1, last, id);
            events.push(ProgressEvent::SkippedCheckpoints);
            return events;
        }

        self.lap_distance += delta;
        if self.lap_distance < 0 {
            self.lap -= 1;
            self.lap_distance = count - 1;
        } else if self.lap_distance >= count {
            self.lap += 1;
            self.lap_distance = 0;
            events.push(ProgressEvent::LapCompleted { lap: self.lap });
            if self.lap >= course.laps_to_finish && !self.finished {
                self.finished = true;
                events.push(ProgressEvent::Finished);
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use crate::progress::{Checkpoint, Course, Progress, ProgressEvent};
    use nalgebra::{Isometry3, Point3, Vector3};

    const DT: f32 = 1.0 / 60.0;

    /// Four checkpoints in a row along x, 10 apart, radius 4.
    fn course(laps: i32) -> Course {
        let checkpoints = (0..4)
            .map(|id| Checkpoint::new_sphere(id, Point3::new(id as f32 * 10.0, 0.0, 0.0), 4.0))
            .collect();
        Course::new(checkpoints, laps)
    }

    fn at(id: u32) -> Point3<f32> {
        Point3::new(id as f32 * 10.0, 0.0, 0.0)
    }

    #[test]
    fn box_and_sphere_containment() {
        let sphere = Checkpoint::new_sphere(0, Point3::new(5.0, 0.0, 0.0), 2.0);
        assert!(sphere.contains(&Point3::new(6.0, 0.0, 0.0)));
        assert!(!sphere.contains(&Point3::new(8.0, 0.0, 0.0)));

        let cube = Checkpoint::new_box(
            1,
            Isometry3::new(Vector3::new(0.0, 10.0, 0.0), Vector3::zeros()),
            Vector3::new(1.0, 1.0, 1.0),
        );
        assert!(cube.contains(&Point3::new(0.5, 10.5, 0.0)));
        assert!(!cube.contains(&Point3::new(0.0, 12.5, 0.0)));
    }

    #[test]
    fn wraparound_delta_is_plus_one() {
        let course = course(3);
        let mut progress = Progress::new();
        // Walk forward through every checkpoint of the first lap.
        for id in 0..4 {
            assert!(progress.update(&course, &at(id), DT).is_empty());
        }
        assert_eq!(progress.lap_distance(), 3);
        // Highest id back to 0: delta +1, which completes the lap.
        let events = progress.update(&course, &at(0), DT);
        assert_eq!(events, vec![ProgressEvent::LapCompleted { lap: 1 }]);
        assert_eq!(progress.lap(), 1);
        assert_eq!(progress.lap_distance(), 0);
    }

    #[test]
    fn wraparound_delta_is_minus_one() {
        let course = course(3);
        let mut progress = Progress::new();
        progress.update(&course, &at(0), DT);
        // Driving backwards across the seam decrements the lap.
        let events = progress.update(&course, &at(3), DT);
        assert!(events.is_empty());
        assert_eq!(progress.lap(), -1);
        assert_eq!(progress.lap_distance(), 3);
    }

    #[test]
    fn finish_fires_only_on_final_lap() {
        let course = course(2);
        let mut progress = Progress::new();
        progress.update(&course, &at(0), DT);
        let mut finishes = 0;
        let mut laps = 0;
        for _ in 0..2 {
            for id in [1, 2, 3, 0].iter() {
                for event in progress.update(&course, &at(*id), DT) {
                    match event {
                        ProgressEvent::LapCompleted { .. } => laps += 1,
                        ProgressEvent::Finished => finishes += 1,
                        _ => panic!("unexpected event"),
                    }
                }
            }
        }
        assert_eq!(laps, 2);
        assert_eq!(finishes, 1);
        assert!(progress.finished());
    }

    #[test]
    fn skipping_checkpoints_is_suspicious() {
        let course = course(3);
        let mut progress = Progress::new();
        progress.update(&course, &at(0), DT);
        let events = progress.update(&course, &at(2), DT);
        assert_eq!(events, vec![ProgressEvent::SkippedCheckpoints]);
        // Distance is not credited for the jump.
        assert_eq!(progress.lap_distance(), 0);
    }

    #[test]
    fn fall_out_warns_then_expires() {
        let course = course(3);
        let mut progress = Progress::new();
        let nowhere = Point3::new(1000.0, 0.0, 0.0);
        let mut warned = false;
        let mut fell = false;
        for _ in 0..((4.0 / DT) as usize) {
            for event in progress.update(&course, &nowhere, DT) {
                match event {
                    ProgressEvent::FallOutWarning => {
                        assert!(!warned);
                        warned = true;
                    }
                    ProgressEvent::FellOut => {
                        assert!(warned);
                        assert!(!fell);
                        fell = true;
                    }
                    _ => panic!("unexpected event"),
                }
            }
        }
        assert!(warned && fell);
        // Re-entering a checkpoint resets the timer.
        progress.update(&course, &at(1), DT);
        assert_eq!(progress.fall_out_timer(), 0.0);
    }
}
