//! User-facing options for the prefilter pipeline.

use serde::Deserialize;

/// Parameters of a prefilter run.
///
/// One output mip level is produced per entry of `mip_level_sigmas`; level
/// `ℓ` has faces of side `⌈image_size / 2^ℓ⌉` and approximates the input
/// convolved with a spherical Gaussian of the corresponding σ. The
/// remaining knobs trade blur quality against cost and rarely need
/// touching.
#[derive(Clone, Debug, Deserialize)]
pub struct PrefilterParams {
    /// Side length of every input face in pixels (≤ 32768).
    pub image_size: usize,
    /// Per-level standard deviations, unitless (1 = half the sphere
    /// radius, i.e. a full face). Must be monotonically non-decreasing.
    pub mip_level_sigmas: Vec<f32>,
    /// Lower bound on the number of (u, v, w) convolution rounds per level.
    pub min_num_passes: usize,
    /// Kernel sampling density κ: adjacent taps are 1/κ pixels apart.
    /// Larger values cost more and sample the Gaussian more densely.
    pub kernel_resolution: f32,
    /// Kernel half-extent as a multiple of σ (the truncation radius).
    pub kernel_width: f32,
}

impl Default for PrefilterParams {
    fn default() -> Self {
        Self {
            image_size: 64,
            // One octave per level, as used by the radiance mip pyramids
            // this filter was designed for.
            mip_level_sigmas: (0..4).map(|i| (i as f32 - 5.0).exp2()).collect(),
            min_num_passes: 2,
            kernel_resolution: 2.0,
            kernel_width: 3.0,
        }
    }
}

impl PrefilterParams {
    /// Parameters for `image_size` faces and the given σ sequence, with
    /// default quality knobs.
    pub fn new(image_size: usize, mip_level_sigmas: Vec<f32>) -> Self {
        Self {
            image_size,
            mip_level_sigmas,
            ..Default::default()
        }
    }

    pub fn with_min_num_passes(mut self, min_num_passes: usize) -> Self {
        self.min_num_passes = min_num_passes;
        self
    }

    pub fn with_kernel_resolution(mut self, kernel_resolution: f32) -> Self {
        self.kernel_resolution = kernel_resolution;
        self
    }

    pub fn with_kernel_width(mut self, kernel_width: f32) -> Self {
        self.kernel_width = kernel_width;
        self
    }
}
