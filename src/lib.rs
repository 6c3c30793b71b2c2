#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod coerce;
pub mod error;
pub mod pipeline;
pub mod plan;
pub mod types;

// “Expert” modules – still public, but considered unstable internals.
pub mod blur;
pub mod cubemap;
pub mod resample;

// --- High-level re-exports -------------------------------------------------

// Main entry points: driver + parameters + results.
pub use crate::error::PrefilterError;
pub use crate::pipeline::{CubePrefilter, PrefilterParams};
pub use crate::types::{EncodedFace, FaceInput, MipLevel, PixelFormat};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use envmap_prefilter::prelude::*;
///
/// # fn main() -> Result<(), PrefilterError> {
/// let prefilter = CubePrefilter::new(PrefilterParams::new(64, vec![0.05, 0.1]))?;
/// println!("{} levels planned", prefilter.plan().levels.len());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::types::{FaceInput, FaceSlice, MipLevel, PixelFormat};
    pub use crate::{CubePrefilter, PrefilterError, PrefilterParams};
}
