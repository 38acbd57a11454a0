//! Tracked-pose sources.

use crate::error::CoachError;
use crate::joint::PoseFrame;

/// Supplier of live tracked poses, polled once per tick.
pub trait PoseSource {
    /// Most recent tracked pose
    fn next_pose(&mut self) -> Result<PoseFrame, CoachError>;

    /// Release the source. Only the first call succeeds.
    fn dispose(&mut self) -> Result<(), CoachError>;
}

fn dispose_once(disposed: &mut bool) -> Result<(), CoachError> {
    if *disposed {
        log::warn!("Pose source disposed twice");
        return Err(CoachError::SourceDisposed);
    }
    *disposed = true;
    Ok(())
}

/// Plays back recorded frames, one per call.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    frames: Vec<PoseFrame>,
    position: usize,
    looping: bool,
    disposed: bool,
}

impl ReplaySource {
    /// Without looping the last frame repeats once playback reaches it.
    pub fn new(frames: Vec<PoseFrame>, looping: bool) -> Result<Self, CoachError> {
        if frames.is_empty() {
            return Err(CoachError::EmptySource);
        }
        Ok(Self {
            frames,
            position: 0,
            looping,
            disposed: false,
        })
    }

    /// Parse one frame per non-empty line, each a JSON array in the flat
    /// `[px, py, pz, qx, qy, qz, qw] * 32` layout.
    pub fn from_json_lines(text: &str, looping: bool) -> Result<Self, CoachError> {
        let frames = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| -> Result<PoseFrame, CoachError> {
                let flat: Vec<f32> = serde_json::from_str(line)?;
                PoseFrame::from_flat(&flat)
            })
            .collect::<Result<Vec<_>, CoachError>>()?;
        log::info!("Loaded {} replay frames", frames.len());
        Self::new(frames, looping)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl PoseSource for ReplaySource {
    fn next_pose(&mut self) -> Result<PoseFrame, CoachError> {
        if self.disposed {
            return Err(CoachError::SourceDisposed);
        }
        let frame = self.frames[self.position].clone();
        if self.position + 1 < self.frames.len() {
            self.position += 1;
        } else if self.looping {
            self.position = 0;
        }
        Ok(frame)
    }

    fn dispose(&mut self) -> Result<(), CoachError> {
        dispose_once(&mut self.disposed)
    }
}

/// Holds whatever frame was pushed last (fed by the host each frame).
#[derive(Debug, Clone, Default)]
pub struct LatestPoseSource {
    latest: PoseFrame,
    disposed: bool,
}

impl LatestPoseSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: PoseFrame) {
        self.latest = frame;
    }
}

impl PoseSource for LatestPoseSource {
    fn next_pose(&mut self) -> Result<PoseFrame, CoachError> {
        if self.disposed {
            return Err(CoachError::SourceDisposed);
        }
        Ok(self.latest.clone())
    }

    fn dispose(&mut self) -> Result<(), CoachError> {
        dispose_once(&mut self.disposed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::joint::JointId;
    use crate::test_support::standing_frame;
    use glam::Vec3;

    fn frame_with_pelvis(x: f32) -> PoseFrame {
        let mut frame = standing_frame();
        frame.joints[JointId::Pelvis.index()].position = Vec3::new(x, 0.0, 0.0);
        frame
    }

    #[test]
    fn test_replay_holds_last_frame() {
        let mut source =
            ReplaySource::new(vec![frame_with_pelvis(1.0), frame_with_pelvis(2.0)], false).unwrap();
        let xs: Vec<f32> = (0..4)
            .map(|_| source.next_pose().unwrap().position(JointId::Pelvis).x)
            .collect();
        assert_eq!(xs, [1.0, 2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_replay_loops() {
        let mut source =
            ReplaySource::new(vec![frame_with_pelvis(1.0), frame_with_pelvis(2.0)], true).unwrap();
        let xs: Vec<f32> = (0..5)
            .map(|_| source.next_pose().unwrap().position(JointId::Pelvis).x)
            .collect();
        assert_eq!(xs, [1.0, 2.0, 1.0, 2.0, 1.0]);
    }

    #[test]
    fn test_empty_replay_is_rejected() {
        assert!(matches!(ReplaySource::new(Vec::new(), true), Err(CoachError::EmptySource)));
        assert!(matches!(
            ReplaySource::from_json_lines("\n \n", true),
            Err(CoachError::EmptySource)
        ));
    }

    #[test]
    fn test_json_lines() {
        let line = serde_json::to_string(&frame_with_pelvis(7.0).to_flat()).unwrap();
        let text = format!("{line}\n\n{line}\n");
        let mut source = ReplaySource::from_json_lines(&text, false).unwrap();
        assert_eq!(source.len(), 2);
        assert_eq!(source.next_pose().unwrap().position(JointId::Pelvis).x, 7.0);

        let err = ReplaySource::from_json_lines("[1.0, 2.0]", false).unwrap_err();
        assert!(matches!(err, CoachError::FrameLength { actual: 2, .. }));
        let err = ReplaySource::from_json_lines("not json", false).unwrap_err();
        assert!(matches!(err, CoachError::Json(_)));
    }

    #[test]
    fn test_second_dispose_is_rejected() {
        let mut source = LatestPoseSource::new();
        source.push(frame_with_pelvis(3.0));
        assert_eq!(source.next_pose().unwrap().position(JointId::Pelvis).x, 3.0);

        assert!(source.dispose().is_ok());
        assert!(matches!(source.dispose(), Err(CoachError::SourceDisposed)));
        assert!(matches!(source.next_pose(), Err(CoachError::SourceDisposed)));

        let mut replay = ReplaySource::new(vec![standing_frame()], false).unwrap();
        assert!(replay.dispose().is_ok());
        assert!(replay.dispose().is_err());
    }
}
