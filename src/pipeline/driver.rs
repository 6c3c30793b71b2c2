//! The prefilter driver: coerce → per-level downsample/blur/encode.
//!
//! Typical usage:
//! ```no_run
//! use envmap_prefilter::{CubePrefilter, PrefilterParams};
//! use envmap_prefilter::types::{FaceInput, FaceSlice, PixelFormat};
//!
//! # fn example(face_data: [Vec<f32>; 6]) -> Result<(), Box<dyn std::error::Error>> {
//! let prefilter = CubePrefilter::new(PrefilterParams::new(64, vec![0.05, 0.1]))?;
//! let faces: Vec<FaceInput> = face_data
//!     .iter()
//!     .map(|d| FaceInput {
//!         format: PixelFormat::RgbaF32Premultiplied,
//!         data: FaceSlice::F32(d),
//!     })
//!     .collect();
//! let chain = prefilter.process(&faces, PixelFormat::RgbaF32Premultiplied)?;
//! println!("levels: {}", chain.len());
//! # Ok(())
//! # }
//! ```

use crate::blur::{run_passes, PassWorkspace};
use crate::coerce::{coerce_in, coerce_out};
use crate::cubemap::CubeTopology;
use crate::error::PrefilterError;
use crate::plan::BlurPlan;
use crate::resample::downsample_half;
use crate::types::{face_buffers, EncodedFace, FaceBuffers, FaceInput, MipLevel, PixelFormat};

use super::options::PrefilterParams;
use log::debug;
use std::time::Instant;

/// Pre-filtered environment map generator.
///
/// Construction validates the parameters and builds the read-only blur
/// plan; [`CubePrefilter::process`] may then be called any number of times.
/// Calls are independent (every call owns its scratch buffers), so a
/// single instance can be shared across threads.
#[derive(Debug)]
pub struct CubePrefilter {
    params: PrefilterParams,
    plan: BlurPlan,
    topology: CubeTopology,
}

impl CubePrefilter {
    /// Validate `params` and derive the per-level schedule.
    pub fn new(params: PrefilterParams) -> Result<Self, PrefilterError> {
        let plan = BlurPlan::build(&params)?;
        Ok(Self {
            params,
            plan,
            topology: CubeTopology::new(),
        })
    }

    #[inline]
    pub fn params(&self) -> &PrefilterParams {
        &self.params
    }

    #[inline]
    pub fn plan(&self) -> &BlurPlan {
        &self.plan
    }

    /// Run the prefilter over six input faces (ordered `+X, −X, +Y, −Y,
    /// +Z, −Z`; extra entries are ignored) and return one entry per
    /// configured mip level, each holding six faces encoded as `output`.
    pub fn process(
        &self,
        faces: &[FaceInput<'_>],
        output: PixelFormat,
    ) -> Result<Vec<MipLevel>, PrefilterError> {
        if faces.len() < 6 {
            return Err(PrefilterError::InvalidArity {
                found: faces.len(),
            });
        }
        let n0 = self.params.image_size;
        let total_start = Instant::now();

        let coerced: Vec<Vec<f32>> = faces[..6]
            .iter()
            .map(|face| coerce_in(face, n0))
            .collect::<Result<_, _>>()?;
        let mut current: FaceBuffers = coerced.try_into().expect("six coerced faces");

        // Scratch for the whole call: the orchestrator's ping-pong pair
        // plus one buffer to downsample into, all sized for level 0.
        let mut ws = PassWorkspace::new(n0);
        let mut next = face_buffers(n0);

        let mut levels = Vec::with_capacity(self.plan.levels.len());
        let mut prev_size = n0;
        for (index, level) in self.plan.levels.iter().enumerate() {
            let start = Instant::now();

            if index > 0 {
                for (dst, src) in next.iter_mut().zip(current.iter()) {
                    downsample_half(src, prev_size, dst, level.size);
                }
                std::mem::swap(&mut current, &mut next);
            }

            run_passes(
                &mut current,
                level.size,
                &level.kernel,
                level.kernel_scale,
                level.num_passes,
                &self.topology,
                &mut ws,
            );

            let plane = 4 * level.size * level.size;
            let mut encoded = Vec::with_capacity(6);
            for face in current.iter() {
                encoded.push(EncodedFace {
                    format: output,
                    pixels: coerce_out(&face[..plane], output)?,
                });
            }
            levels.push(MipLevel {
                size: level.size,
                faces: encoded.try_into().expect("six encoded faces"),
            });

            debug!(
                "level {index}: {size}×{size}, {passes} passes in {ms:.3} ms",
                size = level.size,
                passes = level.num_passes,
                ms = start.elapsed().as_secs_f64() * 1000.0
            );
            prev_size = level.size;
        }

        debug!(
            "prefiltered {count} levels in {ms:.3} ms",
            count = levels.len(),
            ms = total_start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(levels)
    }
}
