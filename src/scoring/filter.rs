//! Single-channel Kalman smoothing of per-segment distances
//!
//! Random-walk model: the state is the distance itself, predicted unchanged
//! between updates with process noise `q`, observed with noise `r`.

use crate::orientation::BodySegment;

/// One-dimensional Kalman filter
#[derive(Debug, Clone, PartialEq)]
pub struct KalmanFilter {
    /// Current estimate
    estimate: f32,
    /// Estimate variance
    covariance: f32,
    /// Process noise (higher = more responsive)
    process_noise: f32,
    /// Measurement noise (higher = smoother)
    measurement_noise: f32,
}

impl KalmanFilter {
    pub fn new(process_noise: f32, measurement_noise: f32) -> Self {
        Self {
            estimate: 0.0,
            covariance: 1.0,
            process_noise,
            measurement_noise,
        }
    }

    /// Restart from `estimate` with unit variance
    pub fn reset(&mut self, estimate: f32) {
        self.estimate = estimate;
        self.covariance = 1.0;
    }

    /// Fold in one measurement and return the new estimate
    pub fn update(&mut self, measurement: f32) -> f32 {
        // Predict
        self.covariance += self.process_noise;

        // Correct
        let gain = self.covariance / (self.covariance + self.measurement_noise);
        self.estimate += gain * (measurement - self.estimate);
        self.covariance *= 1.0 - gain;
        self.estimate
    }

    pub fn estimate(&self) -> f32 {
        self.estimate
    }
}

/// One filter per [`BodySegment`]
#[derive(Debug, Clone, PartialEq)]
pub struct FilterBank {
    filters: [KalmanFilter; BodySegment::COUNT],
}

impl FilterBank {
    /// Value every filter restarts from
    pub const INITIAL_ESTIMATE: f32 = 1.0;

    pub fn new(process_noise: f32, measurement_noise: f32) -> Self {
        let mut bank = Self {
            filters: std::array::from_fn(|_| KalmanFilter::new(process_noise, measurement_noise)),
        };
        bank.reset();
        bank
    }

    pub fn reset(&mut self) {
        for filter in &mut self.filters {
            filter.reset(Self::INITIAL_ESTIMATE);
        }
    }

    pub fn update(&mut self, segment: BodySegment, measurement: f32) -> f32 {
        self.filters[segment.index()].update(measurement)
    }

    pub fn filter(&self, segment: BodySegment) -> &KalmanFilter {
        &self.filters[segment.index()]
    }
}
