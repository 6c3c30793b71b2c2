//! Shared data types for cube-map inputs, working buffers and emitted mips.

use serde::{Deserialize, Serialize};

/// Pixel encodings accepted at the crate boundary.
///
/// The convolution core itself operates exclusively on
/// [`PixelFormat::RgbaF32Premultiplied`]; the other encodings exist for the
/// coercion step on the way in and out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelFormat {
    /// Linear RGBA, 32-bit float, color channels premultiplied by alpha.
    RgbaF32Premultiplied,
    /// Linear RGBA, 32-bit float, straight alpha.
    RgbaF32,
    /// Linear RGBA, 8 bits per channel, straight alpha.
    Rgba8,
    /// sRGB-encoded RGBA, 8 bits per channel, straight alpha.
    Rgba8Srgb,
}

impl PixelFormat {
    /// True for the 8-bit encodings.
    #[inline]
    pub fn is_u8(&self) -> bool {
        matches!(self, PixelFormat::Rgba8 | PixelFormat::Rgba8Srgb)
    }
}

/// Borrowed pixel storage of one input face.
#[derive(Clone, Copy, Debug)]
pub enum FaceSlice<'a> {
    U8(&'a [u8]),
    F32(&'a [f32]),
}

impl FaceSlice<'_> {
    /// Number of samples (channel values) in the slice.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            FaceSlice::U8(s) => s.len(),
            FaceSlice::F32(s) => s.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One input cube face as handed to [`crate::CubePrefilter::process`].
///
/// `data` holds `4·N·N` interleaved RGBA samples in row-major order. The
/// caller's storage is never mutated; the pipeline works on owned copies.
#[derive(Clone, Copy, Debug)]
pub struct FaceInput<'a> {
    pub format: PixelFormat,
    pub data: FaceSlice<'a>,
}

/// Owned pixel storage of one emitted face.
#[derive(Clone, Debug)]
pub enum FacePixels {
    U8(Vec<u8>),
    F32(Vec<f32>),
}

/// One face of an emitted mip level, encoded in the requested output format.
#[derive(Clone, Debug)]
pub struct EncodedFace {
    pub format: PixelFormat,
    pub pixels: FacePixels,
}

/// One emitted mip level: six encoded faces of side `size`.
///
/// Faces are ordered `+X, −X, +Y, −Y, +Z, −Z`.
#[derive(Clone, Debug)]
pub struct MipLevel {
    pub size: usize,
    pub faces: [EncodedFace; 6],
}

/// Six-face working set: one `Vec<f32>` of `4·N·N` interleaved RGBA samples
/// per face, ordered `+X, −X, +Y, −Y, +Z, −Z`.
pub type FaceBuffers = [Vec<f32>; 6];

/// Allocate a zeroed six-face working set for faces of side `n`.
pub fn face_buffers(n: usize) -> FaceBuffers {
    std::array::from_fn(|_| vec![0.0; 4 * n * n])
}
