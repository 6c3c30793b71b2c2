//! Error kinds reported by plan construction and the processing call.
//!
//! All errors are fatal to the current call: nothing is retried and no
//! partial mip chain is returned.

use crate::types::PixelFormat;

/// Reasons why building a prefilter or processing a cube map may fail.
#[derive(Clone, Debug, PartialEq)]
pub enum PrefilterError {
    /// Fewer than six faces were supplied.
    InvalidArity { found: usize },
    /// The requested face size is out of range, or a face's backing storage
    /// holds fewer than the `4·N·N` samples the size requires.
    InvalidSize {
        size: usize,
        found: usize,
        required: usize,
    },
    /// A declared pixel format does not match the supplied buffer, or data
    /// that is not premultiplied-alpha float reached a boundary that
    /// requires it.
    InvalidFormat { found: PixelFormat },
    /// Unusable kernel geometry: non-positive sampling parameters, or a
    /// kernel footprint too large for the face it would run on.
    InvalidKernel {
        level: usize,
        face_size: usize,
        kernel_radius: usize,
        kernel_scale: f32,
    },
    /// The σ sequence decreases (or is not a finite non-negative real) at
    /// the given mip level.
    NonMonotonicSigmas {
        level: usize,
        sigma: f32,
        previous: f32,
    },
}

impl std::fmt::Display for PrefilterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrefilterError::InvalidArity { found } => {
                write!(f, "expected 6 cube faces, got {found}")
            }
            PrefilterError::InvalidSize {
                size,
                found,
                required,
            } => {
                if found < required {
                    write!(
                        f,
                        "face storage too small for size {size}: {found} samples, need {required}"
                    )
                } else {
                    write!(f, "face size {size} out of supported range 1..=32768")
                }
            }
            PrefilterError::InvalidFormat { found } => {
                write!(f, "unsupported pixel data for format {found:?}")
            }
            PrefilterError::InvalidKernel {
                level,
                face_size,
                kernel_radius,
                kernel_scale,
            } => write!(
                f,
                "invalid kernel at level {level}: radius {kernel_radius}, scale {kernel_scale}, \
                 face size {face_size}"
            ),
            PrefilterError::NonMonotonicSigmas {
                level,
                sigma,
                previous,
            } => write!(
                f,
                "mip sigma decreases at level {level} ({sigma} < {previous})"
            ),
        }
    }
}

impl std::error::Error for PrefilterError {}
