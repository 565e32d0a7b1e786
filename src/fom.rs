//! Figures of merit for the running reconstruction

use crate::recon::ReconGrid;

/// Scaling applied to the signed error before it is mapped to a display
/// channel. Tunable presentation constant, kept for output compatibility.
pub const ERROR_DISPLAY_SCALE: f32 = 400.0;

impl ReconGrid<'_> {

    /// Signed per-cell error: positive means over-reconstructed, negative
    /// under-reconstructed.
    pub fn error_field(&self) -> Vec<f32> {
        self.values.iter()
            .zip(self.ground_truth.iter())
            .map(|(v, t)| v - t)
            .collect()
    }

    pub fn sum_squared_error(&self) -> f32 {
        self.values.iter()
            .zip(self.ground_truth.iter())
            .map(|(v, t)| (v - t) * (v - t))
            .sum()
    }

    pub fn max_abs_error(&self) -> f32 {
        self.error_field().into_iter().fold(0.0, |max, e| max.max(e.abs()))
    }
}
