//! Per-mip-level pass planning.
//!
//! Gaussians compose by adding variances, so the blur still owed at level
//! `ℓ` is `σ_ℓ² − σ_{ℓ−1}²`. That residue is split into `num_passes` equal
//! slices small enough for the small-angle assumption of the spherical
//! approximation to hold, and each slice becomes one (u, v, w) round with a
//! fixed kernel. Everything here is decided once at construction; the plan
//! is read-only afterwards.

use crate::blur::gaussian_kernel;
use crate::error::PrefilterError;
use crate::pipeline::PrefilterParams;
use log::debug;

/// Hard upper bound on the face side length.
pub const MAX_IMAGE_SIZE: usize = 32768;

/// Blur schedule for one mip level.
#[derive(Clone, Debug)]
pub struct LevelPlan {
    /// Face side length at this level: `⌈N / 2^ℓ⌉`.
    pub size: usize,
    /// Normalized Gaussian taps; `[1.0]` when this level owes no blur.
    pub kernel: Vec<f32>,
    /// Pixel stride between adjacent taps (`1/κ`).
    pub kernel_scale: f32,
    /// Number of (u, v, w) rounds to run.
    pub num_passes: usize,
}

impl LevelPlan {
    #[inline]
    pub fn kernel_radius(&self) -> usize {
        self.kernel.len() / 2
    }
}

/// The full per-level schedule derived from a σ sequence.
#[derive(Clone, Debug)]
pub struct BlurPlan {
    pub levels: Vec<LevelPlan>,
}

impl BlurPlan {
    /// Derive the schedule, performing all validation that does not need
    /// pixel data: size range, kernel parameters, σ monotonicity and the
    /// per-level kernel-size guard.
    pub fn build(params: &PrefilterParams) -> Result<Self, PrefilterError> {
        let n0 = params.image_size;
        if n0 == 0 || n0 > MAX_IMAGE_SIZE {
            return Err(PrefilterError::InvalidSize {
                size: n0,
                found: 0,
                required: 0,
            });
        }

        let kappa = f64::from(params.kernel_resolution);
        let omega = f64::from(params.kernel_width);
        if !(kappa.is_finite() && kappa > 0.0 && omega.is_finite() && omega > 0.0) {
            return Err(PrefilterError::InvalidKernel {
                level: 0,
                face_size: n0,
                kernel_radius: 0,
                kernel_scale: 1.0 / params.kernel_resolution,
            });
        }
        let scale = (1.0 / kappa) as f32;
        let min_passes = params.min_num_passes.max(1);

        // Largest per-pass σ the small-angle assumption tolerates. The
        // variance split below caps every pass at this value.
        let sigma_limit = 0.5 / kappa;

        let mut levels = Vec::with_capacity(params.mip_level_sigmas.len());
        let mut size = n0;
        let mut last_var = 0.0f64;
        let mut last_sigma = 0.0f32;

        for (level, &sigma) in params.mip_level_sigmas.iter().enumerate() {
            if level > 0 {
                size = size.div_ceil(2);
            }

            let desired_var = f64::from(sigma) * f64::from(sigma);
            let residue_var = desired_var - last_var;
            if !sigma.is_finite() || sigma < 0.0 || !(residue_var >= 0.0) {
                return Err(PrefilterError::NonMonotonicSigmas {
                    level,
                    sigma,
                    previous: last_sigma,
                });
            }

            let num_passes =
                ((residue_var / (sigma_limit * sigma_limit)).ceil() as usize).max(min_passes);
            let level_sigma = (residue_var / num_passes as f64).sqrt() * size as f64;
            let radius = (level_sigma * kappa * omega).floor() as usize;

            if size as f32 <= radius as f32 * scale * 1.8 {
                return Err(PrefilterError::InvalidKernel {
                    level,
                    face_size: size,
                    kernel_radius: radius,
                    kernel_scale: scale,
                });
            }

            // The builder's σ is in tap units: taps are `scale` pixels
            // apart, so σ_taps = σ_px·κ.
            let kernel = if radius == 0 {
                vec![1.0]
            } else {
                gaussian_kernel(radius, (level_sigma * kappa) as f32)
            };

            debug!(
                "level {level}: size {size}, sigma {sigma}, residue {residue_var:.3e}, \
                 {num_passes} passes, kernel radius {radius}"
            );

            levels.push(LevelPlan {
                size,
                kernel,
                kernel_scale: scale,
                num_passes,
            });

            // Advance by the cumulative target, not the residue, so
            // rounding slack never leaks into the next level.
            last_var = desired_var;
            last_sigma = sigma;
        }

        Ok(Self { levels })
    }
}
