//! Euclidean distance matrix (EDD) comparison.
//!
//! For every joint pair, the distance between two reference joints is
//! compared with the distance between a reference joint and a live joint,
//! after each pose has been centred on its own centre joint. Equal poses
//! produce all-zero cells regardless of where the performer stands.

use crate::joint::{JointId, PoseFrame};
use glam::Vec3;

const N: usize = JointId::COUNT;

/// Per-pair cell matrix, `matrix[i][j]`
pub type ScoreMatrix = [[f32; N]; N];

fn centred(frame: &PoseFrame, centre: JointId) -> [Vec3; N] {
    let origin = frame.position(centre);
    frame.joints.map(|joint| joint.position - origin)
}

/// Cell (i, j) = | |ref_i - ref_j| - |ref_i - live_j| |, both poses centred.
pub fn score_matrix(reference: &PoseFrame, live: &PoseFrame, centre: JointId) -> ScoreMatrix {
    let reference = centred(reference, centre);
    let live = centred(live, centre);

    let mut matrix = [[0.0; N]; N];
    for (i, row) in matrix.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            let own = reference[i].distance(reference[j]);
            let cross = reference[i].distance(live[j]);
            *cell = (own - cross).abs();
        }
    }
    matrix
}

/// Mean cell value of one reference/live comparison
pub fn frame_score(reference: &PoseFrame, live: &PoseFrame, centre: JointId) -> f32 {
    let matrix = score_matrix(reference, live, centre);
    let sum: f32 = matrix.iter().flatten().sum();
    sum / (N * N) as f32
}

/// EDD distance of `live` against a window of reference frames: mean over
/// all cells of all frames, times `scale`. An empty window scores 0.
pub fn edd_distance<'a>(
    references: impl IntoIterator<Item = &'a PoseFrame>,
    live: &PoseFrame,
    centre: JointId,
    scale: f32,
) -> f32 {
    let mut total = 0.0;
    let mut frames = 0usize;
    for reference in references {
        total += frame_score(reference, live, centre);
        frames += 1;
    }
    if frames == 0 {
        return 0.0;
    }
    total / frames as f32 * scale
}

/// Running EDD over a performance: remembers the reference frames seen so
/// far and scores each live frame against the most recent ones.
#[derive(Debug, Clone)]
pub struct EddAccumulator {
    history: Vec<PoseFrame>,
    window: usize,
    centre: JointId,
    scale: f32,
    total: f32,
    frames: usize,
}

impl EddAccumulator {
    pub fn new(window: usize, centre: JointId, scale: f32) -> Self {
        Self {
            history: Vec::new(),
            window: window.max(1),
            centre,
            scale,
            total: 0.0,
            frames: 0,
        }
    }

    /// Record `reference`, score `live` against the last window of
    /// references, and return this frame's score.
    pub fn update(&mut self, reference: PoseFrame, live: &PoseFrame) -> f32 {
        self.history.push(reference);
        let start = self.history.len().saturating_sub(self.window);
        let score = edd_distance(&self.history[start..], live, self.centre, self.scale);
        self.total += score;
        self.frames += 1;
        score
    }

    /// Mean per-frame score so far (0 before the first update)
    pub fn mean(&self) -> f32 {
        if self.frames == 0 {
            0.0
        } else {
            self.total / self.frames as f32
        }
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.total = 0.0;
        self.frames = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{jittered_frame, seeded, standing_frame};

    fn shifted(frame: &PoseFrame, offset: Vec3) -> PoseFrame {
        let mut out = frame.clone();
        for joint in out.joints.iter_mut() {
            joint.position += offset;
        }
        out
    }

    #[test]
    fn test_identical_pose_scores_zero() {
        let frame = standing_frame();
        let matrix = score_matrix(&frame, &frame, JointId::SpineChest);
        assert!(matrix.iter().flatten().all(|cell| cell.abs() < 1e-3));
    }

    #[test]
    fn test_translation_invariance() {
        let frame = standing_frame();
        let moved = shifted(&frame, Vec3::new(400.0, -30.0, 900.0));
        assert!(frame_score(&frame, &moved, JointId::SpineChest) < 1e-2);
    }

    #[test]
    fn test_different_pose_scores_positive() {
        let mut rng = seeded(8);
        let reference = standing_frame();
        let live = jittered_frame(&mut rng, 200.0);
        assert!(frame_score(&reference, &live, JointId::SpineChest) > 1.0);
    }

    #[test]
    fn test_window_average_and_scale() {
        let mut rng = seeded(13);
        let a = standing_frame();
        let b = jittered_frame(&mut rng, 100.0);
        let live = standing_frame();

        let single = frame_score(&b, &live, JointId::Pelvis);
        let windowed = edd_distance([&a, &b], &live, JointId::Pelvis, 0.001);
        let expected = (frame_score(&a, &live, JointId::Pelvis) + single) / 2.0 * 0.001;
        assert!((windowed - expected).abs() < 1e-6);
        assert_eq!(edd_distance(std::iter::empty(), &live, JointId::Pelvis, 0.001), 0.0);
    }

    #[test]
    fn test_accumulator_tracks_running_mean() {
        let mut rng = seeded(2);
        let live = standing_frame();
        let mut edd = EddAccumulator::new(5, JointId::SpineChest, 0.001);

        let first = edd.update(live.clone(), &live);
        assert!(first < 1e-5);
        let second = edd.update(jittered_frame(&mut rng, 120.0), &live);
        assert!(second > first);
        assert_eq!(edd.frames(), 2);
        assert!((edd.mean() - (first + second) / 2.0).abs() < 1e-7);

        edd.reset();
        assert_eq!(edd.frames(), 0);
        assert_eq!(edd.mean(), 0.0);
    }
}
