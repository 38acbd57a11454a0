//! Pose distance metrics and window aggregation.

use super::filter::FilterBank;
use crate::joint::PoseFrame;
use crate::math::alignment;
use crate::orientation::{segment_orientations, BodySegment};
use glam::Quat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    /// Weighted per-segment orientation distance
    #[default]
    Quaternion,
    /// Euclidean distance matrix comparison
    Edd,
}

/// Orientation distance in `[0, 1]`: 0 for equal rotations (either sign),
/// 1 for rotations 180 degrees apart.
#[inline]
pub fn quaternion_distance(a: Quat, b: Quat) -> f32 {
    (1.0 - alignment(a, b)).max(0.0)
}

/// Weighted RMS of the per-segment distances between two poses.
///
/// With a filter bank, every segment distance is smoothed before weighting.
pub fn weighted_quaternion_distance(
    live: &PoseFrame,
    reference: &PoseFrame,
    mut filters: Option<&mut FilterBank>,
) -> f32 {
    let live = segment_orientations(live);
    let reference = segment_orientations(reference);

    let mut weighted = 0.0;
    let mut total_weight = 0.0;
    for segment in BodySegment::ALL {
        let i = segment.index();
        let mut distance = quaternion_distance(live[i], reference[i]);
        if let Some(bank) = filters.as_deref_mut() {
            distance = bank.update(segment, distance);
        }
        weighted += segment.weight() * distance * distance;
        total_weight += segment.weight();
    }
    (weighted / total_weight).sqrt()
}

/// Largest sample, or None for an empty window
pub fn max_distance(samples: &[f32]) -> Option<f32> {
    samples.iter().copied().reduce(f32::max)
}

/// Square root of the mean of squares, or None for an empty window
pub fn quadratic_mean(samples: &[f32]) -> Option<f32> {
    if samples.is_empty() {
        return None;
    }
    let sum: f32 = samples.iter().map(|d| d * d).sum();
    Some((sum / samples.len() as f32).sqrt())
}
