use super::id::JointId;
use super::pose::{PoseFrame, FLOATS_PER_JOINT};
use crate::error::CoachError;
use serde::{Deserialize, Serialize};

// ============================================================================
// Recorded choreography
// ============================================================================

/// A keyframe of recorded choreography, timestamped relative to the start of
/// the performance (seconds).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RecordedPose {
    pub timestamp: f32,
    pub frame: PoseFrame,
}

impl RecordedPose {
    pub fn new(timestamp: f32, frame: PoseFrame) -> Self {
        Self { timestamp, frame }
    }

    /// Pair each timestamp with the next frame of a flat frame buffer
    pub fn sequence_from_flat(
        timestamps: &[f32],
        data: &[f32],
    ) -> Result<Vec<RecordedPose>, CoachError> {
        let stride = JointId::COUNT * FLOATS_PER_JOINT;
        if data.len() != timestamps.len() * stride {
            return Err(CoachError::FrameLength {
                expected: timestamps.len() * stride,
                actual: data.len(),
            });
        }
        timestamps
            .iter()
            .zip(data.chunks_exact(stride))
            .map(|(&timestamp, chunk)| {
                PoseFrame::from_flat(chunk).map(|frame| RecordedPose::new(timestamp, frame))
            })
            .collect()
    }
}

/// Keyframes ordered by strictly increasing timestamp.
///
/// Serialized as a plain keyframe list; deserializing goes through
/// [`Choreography::new`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(from = "Vec<RecordedPose>", into = "Vec<RecordedPose>")]
pub struct Choreography {
    keyframes: Vec<RecordedPose>,
}

impl From<Vec<RecordedPose>> for Choreography {
    fn from(keyframes: Vec<RecordedPose>) -> Self {
        Choreography::new(keyframes)
    }
}

impl From<Choreography> for Vec<RecordedPose> {
    fn from(choreography: Choreography) -> Self {
        choreography.keyframes
    }
}

impl Choreography {
    /// Build a choreography, sorting keyframes and dropping duplicate
    /// timestamps (first one wins) so the ordering invariant holds.
    pub fn new(mut keyframes: Vec<RecordedPose>) -> Self {
        keyframes.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
        let before = keyframes.len();
        keyframes.dedup_by(|later, earlier| later.timestamp <= earlier.timestamp);
        if keyframes.len() != before {
            log::warn!(
                "Dropped {} choreography keyframes with duplicate timestamps",
                before - keyframes.len()
            );
        }
        Self { keyframes }
    }

    pub fn keyframes(&self) -> &[RecordedPose] {
        &self.keyframes
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Timestamp of the last keyframe (0 when empty)
    pub fn duration(&self) -> f32 {
        self.keyframes.last().map(|kf| kf.timestamp).unwrap_or(0.0)
    }

    /// Sample the choreography at `time`.
    ///
    /// `cursor` is the keyframe index resolved by the previous call; the scan
    /// only moves forward from it, so callers must query with non-decreasing
    /// time. Returns the interpolated frame and the updated cursor.
    /// Before the first keyframe the first frame is held, after the last one
    /// the last frame is held. An empty choreography yields the default frame.
    pub fn interpolate(&self, cursor: usize, time: f32) -> (PoseFrame, usize) {
        if self.keyframes.is_empty() {
            return (PoseFrame::default(), 0);
        }

        let last = self.keyframes.len() - 1;
        let mut cursor = cursor.min(last);
        while cursor < last && self.keyframes[cursor + 1].timestamp <= time {
            cursor += 1;
        }

        if cursor == last {
            return (self.keyframes[last].frame.clone(), cursor);
        }

        let prev = &self.keyframes[cursor];
        let next = &self.keyframes[cursor + 1];
        let segment_duration = next.timestamp - prev.timestamp;
        let t = if segment_duration > 0.0 {
            ((time - prev.timestamp) / segment_duration).clamp(0.0, 1.0)
        } else {
            0.0
        };

        (PoseFrame::lerp(&prev.frame, &next.frame, t), cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::joint::{JointId, JointSample};
    use glam::{Quat, Vec3};

    fn frame_at(offset: f32, angle: f32) -> PoseFrame {
        let mut frame = PoseFrame::default();
        for id in JointId::ALL {
            frame.joints[id.index()] = JointSample::new(
                Vec3::new(offset, id.index() as f32, 0.0),
                Quat::from_rotation_y(angle),
            );
        }
        frame
    }

    fn three_keyframes() -> Choreography {
        Choreography::new(vec![
            RecordedPose::new(0.0, frame_at(0.0, 0.0)),
            RecordedPose::new(1.0, frame_at(10.0, std::f32::consts::FRAC_PI_2)),
            RecordedPose::new(3.0, frame_at(30.0, 0.0)),
        ])
    }

    #[test]
    fn test_keyframe_exact_query_returns_keyframe() {
        let choreo = three_keyframes();
        let (frame, cursor) = choreo.interpolate(0, 1.0);
        assert_eq!(cursor, 1);
        let expected = &choreo.keyframes()[1].frame;
        for id in JointId::ALL {
            assert!(frame.position(id).distance(expected.position(id)) < 1e-5);
            assert!(frame.orientation(id).dot(expected.orientation(id)).abs() > 1.0 - 1e-5);
        }
    }

    #[test]
    fn test_midpoint_interpolation() {
        let choreo = three_keyframes();
        let (frame, cursor) = choreo.interpolate(0, 0.5);
        assert_eq!(cursor, 0);
        assert!((frame.position(JointId::Pelvis).x - 5.0).abs() < 1e-5);

        let expected = Quat::from_rotation_y(std::f32::consts::FRAC_PI_4);
        assert!(frame.orientation(JointId::Head).dot(expected).abs() > 1.0 - 1e-5);
    }

    #[test]
    fn test_cursor_never_moves_backward() {
        let choreo = three_keyframes();
        let mut cursor = 0;
        let mut previous = 0;
        for step in 0..40 {
            let time = step as f32 * 0.1;
            let (_, next) = choreo.interpolate(cursor, time);
            assert!(next >= previous, "cursor moved back at t={}", time);
            previous = next;
            cursor = next;
        }
        assert_eq!(cursor, 2);
    }

    #[test]
    fn test_repeated_query_is_idempotent() {
        let choreo = three_keyframes();
        let (a, cursor_a) = choreo.interpolate(0, 2.0);
        let (b, cursor_b) = choreo.interpolate(cursor_a, 2.0);
        assert_eq!(cursor_a, cursor_b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_out_of_range_queries_hold_ends() {
        let choreo = three_keyframes();
        let (before, cursor) = choreo.interpolate(0, -1.0);
        assert_eq!(cursor, 0);
        assert_eq!(before, choreo.keyframes()[0].frame);

        let (after, cursor) = choreo.interpolate(0, 99.0);
        assert_eq!(cursor, 2);
        assert_eq!(after, choreo.keyframes()[2].frame);
    }

    #[test]
    fn test_unsorted_input_is_ordered() {
        let choreo = Choreography::new(vec![
            RecordedPose::new(2.0, frame_at(2.0, 0.0)),
            RecordedPose::new(0.0, frame_at(0.0, 0.0)),
            RecordedPose::new(2.0, frame_at(9.0, 0.0)),
        ]);
        assert_eq!(choreo.len(), 2);
        assert!(choreo.keyframes()[0].timestamp < choreo.keyframes()[1].timestamp);
        assert_eq!(choreo.duration(), 2.0);
    }

    #[test]
    fn test_deserialized_keyframes_are_ordered() {
        let keyframes = vec![
            RecordedPose::new(3.0, frame_at(3.0, 0.0)),
            RecordedPose::new(1.0, frame_at(1.0, 0.0)),
            RecordedPose::new(3.0, frame_at(8.0, 0.0)),
        ];
        let json = serde_json::to_string(&keyframes).unwrap();

        let choreo: Choreography = serde_json::from_str(&json).unwrap();
        let timestamps: Vec<f32> = choreo.keyframes().iter().map(|kf| kf.timestamp).collect();
        assert_eq!(timestamps, [1.0, 3.0]);
        assert_eq!(choreo.keyframes()[1].frame.position(JointId::Pelvis).x, 3.0);

        let json = serde_json::to_string(&choreo).unwrap();
        let again: Choreography = serde_json::from_str(&json).unwrap();
        assert_eq!(again.keyframes(), choreo.keyframes());
    }

    #[test]
    fn test_sequence_from_flat() {
        let mut data = frame_at(1.0, 0.0).to_flat();
        data.extend(frame_at(2.0, 0.0).to_flat());

        let poses = RecordedPose::sequence_from_flat(&[0.0, 0.5], &data).unwrap();
        assert_eq!(poses.len(), 2);
        assert_eq!(poses[1].timestamp, 0.5);
        assert_eq!(poses[1].frame.position(JointId::Pelvis).x, 2.0);

        assert!(RecordedPose::sequence_from_flat(&[0.0], &data).is_err());
    }

    #[test]
    fn test_empty_choreography() {
        let choreo = Choreography::default();
        let (frame, cursor) = choreo.interpolate(5, 1.0);
        assert_eq!(cursor, 0);
        assert_eq!(frame, PoseFrame::default());
    }
}
