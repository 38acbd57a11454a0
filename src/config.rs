//! Session configuration, loaded from JSON. Every field has a default, so
//! `{}` is a valid configuration.

use crate::error::CoachError;
use crate::joint::JointId;
use crate::rig::{BodyVariant, RigId};
use crate::scoring::MetricKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CoachConfig {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub rig: RigConfig,
}

impl CoachConfig {
    pub fn from_json(json: &str) -> Result<Self, CoachError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Distance limits for each grade: below `great` is Great, below `good`
/// is Good, anything else Bad.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct GradeThresholds {
    #[serde(default = "default_great")]
    pub great: f32,
    #[serde(default = "default_good")]
    pub good: f32,
}

fn default_great() -> f32 { 0.15 }
fn default_good() -> f32 { 0.4 }

impl Default for GradeThresholds {
    fn default() -> Self {
        Self {
            great: default_great(),
            good: default_good(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub metric: MetricKind,
    /// Run quaternion distances through the per-segment filters
    #[serde(default)]
    pub smoothing: bool,
    #[serde(default = "default_process_noise")]
    pub process_noise: f32,
    #[serde(default = "default_measurement_noise")]
    pub measurement_noise: f32,
    /// Seconds between samples of a pose goal
    #[serde(default = "default_pose_interval")]
    pub pose_interval: f32,
    /// Samples per pose goal
    #[serde(default = "default_pose_window")]
    pub pose_window: usize,
    #[serde(default)]
    pub thresholds: GradeThresholds,
    /// Reference frames per EDD comparison
    #[serde(default = "default_edd_window")]
    pub edd_window: usize,
    /// Applied to the mean cell difference (millimetres). The default is
    /// 0.001 per cell of a summed frame matrix.
    #[serde(default = "default_edd_scale")]
    pub edd_scale: f32,
    /// Joint each pose is centred on before cross distances are taken
    #[serde(default = "default_edd_centre")]
    pub edd_centre: JointId,
    /// Abandon goals still running this many seconds after their start
    #[serde(default)]
    pub goal_timeout: Option<f32>,
}

fn default_process_noise() -> f32 { 0.0001 }
fn default_measurement_noise() -> f32 { 1.0 }
fn default_pose_interval() -> f32 { 0.1 }
fn default_pose_window() -> usize { 15 }
fn default_edd_window() -> usize { 5 }
fn default_edd_scale() -> f32 { 0.001 * (JointId::COUNT * JointId::COUNT) as f32 }
fn default_edd_centre() -> JointId { JointId::SpineChest }

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            metric: MetricKind::default(),
            smoothing: false,
            process_noise: default_process_noise(),
            measurement_noise: default_measurement_noise(),
            pose_interval: default_pose_interval(),
            pose_window: default_pose_window(),
            thresholds: GradeThresholds::default(),
            edd_window: default_edd_window(),
            edd_scale: default_edd_scale(),
            edd_centre: default_edd_centre(),
            goal_timeout: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RigConfig {
    /// Tracking units to stick-rig units
    #[serde(default = "default_stick_scale")]
    pub stick_scale: f32,
    /// Tracking units to proportional segment length
    #[serde(default = "default_segment_length_scale")]
    pub segment_length_scale: f32,
    #[serde(default = "default_marker_scale")]
    pub marker_scale: f32,
    #[serde(default)]
    pub initial_rig: RigId,
    #[serde(default)]
    pub mirrored: bool,
    #[serde(default)]
    pub body_variant: BodyVariant,
    #[serde(default = "default_score_height")]
    pub score_indicator_height: f32,
    #[serde(default = "default_pulse_height")]
    pub pulse_indicator_height: f32,
    #[serde(default = "default_progress_height")]
    pub progress_indicator_height: f32,
    /// Indicators stay put until one drifts this far from its target
    #[serde(default = "default_indicator_slack")]
    pub indicator_slack: f32,
}

fn default_stick_scale() -> f32 { 0.008 }
fn default_segment_length_scale() -> f32 { 0.002 }
fn default_marker_scale() -> f32 { 0.004 }
fn default_score_height() -> f32 { 0.9 }
fn default_pulse_height() -> f32 { 1.4 }
fn default_progress_height() -> f32 { 0.9 }
fn default_indicator_slack() -> f32 { 1.0 }

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            stick_scale: default_stick_scale(),
            segment_length_scale: default_segment_length_scale(),
            marker_scale: default_marker_scale(),
            initial_rig: RigId::default(),
            mirrored: false,
            body_variant: BodyVariant::default(),
            score_indicator_height: default_score_height(),
            pulse_indicator_height: default_pulse_height(),
            progress_indicator_height: default_progress_height(),
            indicator_slack: default_indicator_slack(),
        }
    }
}
