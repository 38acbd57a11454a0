//! Goal scoring.
//!
//! A goal compares the live pose against a reference over a window of
//! samples and ends with one [`Grade`]. Pose goals hold a single target and
//! are sampled at a fixed interval; motion goals step through their frames,
//! sampling each one once its timestamp is reached.

pub mod edd;
pub mod filter;
pub mod metric;

pub use edd::{edd_distance, score_matrix, EddAccumulator};
pub use filter::{FilterBank, KalmanFilter};
pub use metric::{quaternion_distance, weighted_quaternion_distance, MetricKind};

use crate::config::{GradeThresholds, ScoringConfig};
use crate::joint::{PoseFrame, RecordedPose};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum Grade {
    Great = 0,
    Good = 1,
    Bad = 2,
}

impl Grade {
    /// Grade a finalized distance. Boundaries belong to the worse grade;
    /// NaN grades Bad.
    pub fn from_distance(distance: f32, thresholds: &GradeThresholds) -> Grade {
        if distance < thresholds.great {
            Grade::Great
        } else if distance < thresholds.good {
            Grade::Good
        } else {
            Grade::Bad
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum GoalKind {
    /// Hold one pose
    Pose,
    /// Follow a timed sequence of poses
    Motion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringState {
    Idle,
    Scoring(GoalKind),
}

/// Receives each grade as it is awarded
pub trait ScoreDisplay {
    fn add_score(&mut self, grade: Grade);
}

impl<F: FnMut(Grade)> ScoreDisplay for F {
    fn add_score(&mut self, grade: Grade) {
        self(grade)
    }
}

/// The active goal and its collected samples
#[derive(Debug, Clone)]
struct Goal {
    kind: GoalKind,
    frames: Vec<RecordedPose>,
    start_time: f32,
    window: usize,
    counter: usize,
    last_sample_time: f32,
    samples: Vec<f32>,
}

impl Goal {
    fn sample_due(&self, time: f32, interval: f32) -> bool {
        match self.kind {
            GoalKind::Pose => time - self.last_sample_time >= interval,
            GoalKind::Motion => self
                .frames
                .get(self.counter)
                .is_some_and(|frame| time >= self.start_time + frame.timestamp),
        }
    }
}

/// Scores goals one at a time and keeps the grade history.
pub struct ScoringEngine {
    config: ScoringConfig,
    goal: Option<Goal>,
    grades: Vec<Grade>,
    filters: FilterBank,
    display: Option<Box<dyn ScoreDisplay>>,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        let filters = FilterBank::new(config.process_noise, config.measurement_noise);
        Self {
            config,
            goal: None,
            grades: Vec::new(),
            filters,
            display: None,
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn attach_display(&mut self, display: Box<dyn ScoreDisplay>) {
        self.display = Some(display);
    }

    pub fn state(&self) -> ScoringState {
        match &self.goal {
            Some(goal) => ScoringState::Scoring(goal.kind),
            None => ScoringState::Idle,
        }
    }

    pub fn grades(&self) -> &[Grade] {
        &self.grades
    }

    /// Begin scoring a goal. A goal still in progress is finalized first,
    /// so it gets its grade even though its window was cut short.
    pub fn start_new_goal(&mut self, kind: GoalKind, frames: Vec<RecordedPose>, start_time: f32) {
        if self.goal.is_some() {
            self.finalize_goal();
        }
        if frames.is_empty() {
            log::warn!("{:?} goal at {:.2}s has no reference frames; ignored", kind, start_time);
            return;
        }

        let window = match kind {
            GoalKind::Pose => self.config.pose_window.max(1),
            GoalKind::Motion => frames.len(),
        };
        log::debug!("Starting {:?} goal at {:.2}s ({} samples)", kind, start_time, window);
        self.goal = Some(Goal {
            kind,
            frames,
            start_time,
            window,
            counter: 0,
            last_sample_time: start_time,
            samples: Vec::with_capacity(window),
        });
    }

    /// Sample the active goal if one is due. Returns the grade when this
    /// sample completed the goal's window.
    pub fn update(&mut self, live: &PoseFrame, time: f32) -> Option<Grade> {
        let goal = self.goal.as_ref()?;

        if let Some(timeout) = self.config.goal_timeout {
            if time - goal.start_time > timeout {
                log::warn!(
                    "{:?} goal started at {:.2}s timed out at {:.2}s",
                    goal.kind,
                    goal.start_time,
                    time
                );
                self.abandon_goal();
                return None;
            }
        }

        if !goal.sample_due(time, self.config.pose_interval) {
            return None;
        }

        let goal = self.goal.as_mut()?;
        let distance = measure(goal, live, &self.config, &mut self.filters);
        goal.samples.push(distance);
        goal.counter += 1;
        goal.last_sample_time = time;

        if goal.counter >= goal.window {
            return Some(self.finalize_goal());
        }
        None
    }

    /// Drop the active goal without grading it
    pub fn abandon_goal(&mut self) {
        if let Some(goal) = self.goal.take() {
            log::info!("Abandoned {:?} goal after {} samples", goal.kind, goal.samples.len());
        }
    }

    /// Finalize any active goal and return the full grade history
    pub fn finish(&mut self) -> &[Grade] {
        if self.goal.is_some() {
            self.finalize_goal();
        }
        &self.grades
    }

    /// Restart every smoothing filter
    pub fn reset_filters(&mut self) {
        self.filters.reset();
    }

    fn finalize_goal(&mut self) -> Grade {
        let Some(goal) = self.goal.take() else {
            return Grade::Bad;
        };

        let distance = match goal.kind {
            GoalKind::Pose => metric::max_distance(&goal.samples),
            GoalKind::Motion => metric::quadratic_mean(&goal.samples),
        };
        let grade = match distance {
            Some(distance) => {
                let grade = Grade::from_distance(distance, &self.config.thresholds);
                log::info!("{:?} goal: distance {:.4} -> {:?}", goal.kind, distance, grade);
                grade
            }
            None => {
                log::warn!("{:?} goal ended before any sample; graded Bad", goal.kind);
                Grade::Bad
            }
        };

        self.grades.push(grade);
        if let Some(display) = self.display.as_mut() {
            display.add_score(grade);
        }
        grade
    }
}

/// Distance of `live` from the goal's current reference
fn measure(goal: &Goal, live: &PoseFrame, config: &ScoringConfig, filters: &mut FilterBank) -> f32 {
    let index = match goal.kind {
        GoalKind::Pose => 0,
        GoalKind::Motion => goal.counter.min(goal.frames.len() - 1),
    };

    match config.metric {
        MetricKind::Quaternion => {
            let filters = config.smoothing.then_some(filters);
            weighted_quaternion_distance(live, &goal.frames[index].frame, filters)
        }
        MetricKind::Edd => {
            let start = (index + 1).saturating_sub(config.edd_window.max(1));
            edd_distance(
                goal.frames[start..=index].iter().map(|pose| &pose.frame),
                live,
                config.edd_centre,
                config.edd_scale,
            )
        }
    }
}
