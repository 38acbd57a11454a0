//! Coaching session state with context passing.
//!
//! `CoachSession` owns everything one performance needs and is advanced by
//! explicit `tick` calls; core code never reaches for globals. The wasm
//! bindings keep a single session in a thread-local slot and reach it only
//! through `with_session` / `with_session_mut`.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::avatar::Avatar;
use crate::config::CoachConfig;
use crate::error::CoachError;
use crate::joint::{Choreography, PoseFrame, RecordedPose};
use crate::scoring::{GoalKind, Grade, ScoringEngine};
use crate::source::{LatestPoseSource, PoseSource};
use glam::Vec3;

/// Where the reference avatar stands relative to the performer
pub const REFERENCE_ORIGIN: Vec3 = Vec3::new(-2.0, 0.0, 0.0);

/// A goal from the choreography asset, started once its time is reached
#[derive(Debug, Clone)]
pub struct ScheduledGoal {
    pub start_time: f32,
    pub kind: GoalKind,
    pub frames: Vec<RecordedPose>,
}

impl ScheduledGoal {
    pub fn new(start_time: f32, kind: GoalKind, frames: Vec<RecordedPose>) -> Self {
        Self {
            start_time,
            kind,
            frames,
        }
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Grade awarded this tick
    pub grade: Option<Grade>,
    /// The choreography has ended and scores are final
    pub finished: bool,
}

pub struct CoachSession<S: PoseSource> {
    /// Driven by the live tracked pose
    pub performer: Avatar,
    /// Driven by the interpolated choreography
    pub reference: Avatar,
    pub scoring: ScoringEngine,
    choreography: Choreography,
    cursor: usize,
    schedule: VecDeque<ScheduledGoal>,
    source: S,
    live: Option<PoseFrame>,
    finished: bool,
}

impl<S: PoseSource> CoachSession<S> {
    pub fn new(
        config: &CoachConfig,
        choreography: Choreography,
        mut goals: Vec<ScheduledGoal>,
        source: S,
    ) -> Self {
        goals.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
        log::info!(
            "Session: {} keyframes over {:.1}s, {} goals",
            choreography.len(),
            choreography.duration(),
            goals.len()
        );
        Self {
            performer: Avatar::new(&config.rig, Vec3::ZERO),
            reference: Avatar::new(&config.rig, REFERENCE_ORIGIN),
            scoring: ScoringEngine::new(config.scoring.clone()),
            choreography,
            cursor: 0,
            schedule: goals.into(),
            source,
            live: None,
            finished: false,
        }
    }

    /// Advance the session to `time` (seconds since the performance began).
    pub fn tick(&mut self, time: f32) -> TickReport {
        if self.finished {
            return TickReport {
                grade: None,
                finished: true,
            };
        }

        // 1. Live pose
        match self.source.next_pose() {
            Ok(frame) => self.live = Some(frame),
            Err(err) => log::debug!("No live pose this tick: {}", err),
        }
        if let Some(live) = &self.live {
            self.performer.retarget(live);
        }

        // 2. Goals whose start has passed
        while self
            .schedule
            .front()
            .is_some_and(|goal| time >= goal.start_time)
        {
            if let Some(goal) = self.schedule.pop_front() {
                self.scoring.start_new_goal(goal.kind, goal.frames, goal.start_time);
            }
        }

        // 3. Reference pose
        let (reference, cursor) = self.choreography.interpolate(self.cursor, time);
        self.cursor = cursor;
        self.reference.retarget(&reference);

        // 4. Scoring
        let grade = match &self.live {
            Some(live) => self.scoring.update(live, time),
            None => None,
        };

        if !self.choreography.is_empty() && time > self.choreography.duration() {
            let grades = self.scoring.finish();
            log::info!("Performance finished with {} grades", grades.len());
            self.finished = true;
        }

        TickReport {
            grade,
            finished: self.finished,
        }
    }

    /// Add a goal after construction, keeping the schedule in start order
    pub fn schedule_goal(&mut self, goal: ScheduledGoal) {
        let at = self
            .schedule
            .partition_point(|queued| queued.start_time <= goal.start_time);
        self.schedule.insert(at, goal);
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn grades(&self) -> &[Grade] {
        self.scoring.grades()
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Release the pose source
    pub fn shutdown(&mut self) -> Result<(), CoachError> {
        self.source.dispose()
    }
}

/// Session type the wasm bindings drive; the host pushes live frames.
pub type HostSession = CoachSession<LatestPoseSource>;

// Global state access, thin wrapper for WASM bindings only
thread_local! {
    static SESSION: RefCell<Option<HostSession>> = const { RefCell::new(None) };
}

/// Replace the global session
pub fn install_session(session: HostSession) {
    SESSION.with(|slot| {
        *slot.borrow_mut() = Some(session);
    });
}

/// Drop the global session, returning it if there was one
pub fn take_session() -> Option<HostSession> {
    SESSION.with(|slot| slot.borrow_mut().take())
}

/// Execute a closure with immutable access to the session
///
/// Returns None if no session is installed
pub fn with_session<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&HostSession) -> R,
{
    SESSION.with(|slot| slot.borrow().as_ref().map(f))
}

/// Execute a closure with mutable access to the session
///
/// Returns None if no session is installed
pub fn with_session_mut<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut HostSession) -> R,
{
    SESSION.with(|slot| slot.borrow_mut().as_mut().map(f))
}
