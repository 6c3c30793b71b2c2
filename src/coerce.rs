//! Pixel-format coercion at the pipeline boundary.
//!
//! The convolution core only ever sees premultiplied-alpha linear RGBA
//! float; everything else is converted on the way in and back on the way
//! out. sRGB is handled with the gamma-2 approximation (`lin = v²`,
//! `v = √lin`), which commutes cheaply with the 8-bit quantization and is
//! accurate enough for radiance prefiltering.

use crate::error::PrefilterError;
use crate::types::{FaceInput, FacePixels, FaceSlice, PixelFormat};

/// Convert one input face to owned premultiplied linear RGBA f32.
///
/// The returned buffer holds `4·n·n` samples; the caller's storage is left
/// untouched (premultiplied float input is copied, not borrowed). Fails
/// with [`PrefilterError::InvalidSize`] when the backing storage is too
/// small and [`PrefilterError::InvalidFormat`] when the declared format
/// does not match the buffer kind.
pub fn coerce_in(face: &FaceInput<'_>, n: usize) -> Result<Vec<f32>, PrefilterError> {
    let required = 4 * n * n;
    if face.data.len() < required {
        return Err(PrefilterError::InvalidSize {
            size: n,
            found: face.data.len(),
            required,
        });
    }

    match (face.format, face.data) {
        (PixelFormat::RgbaF32Premultiplied, FaceSlice::F32(data)) => Ok(data[..required].to_vec()),
        (PixelFormat::RgbaF32, FaceSlice::F32(data)) => {
            let mut out = data[..required].to_vec();
            for px in out.chunks_exact_mut(4) {
                let a = px[3];
                px[0] *= a;
                px[1] *= a;
                px[2] *= a;
            }
            Ok(out)
        }
        (PixelFormat::Rgba8, FaceSlice::U8(data)) => {
            Ok(decode_u8(&data[..required], |v| v))
        }
        (PixelFormat::Rgba8Srgb, FaceSlice::U8(data)) => {
            Ok(decode_u8(&data[..required], |v| v * v))
        }
        (format, _) => Err(PrefilterError::InvalidFormat { found: format }),
    }
}

/// Convert one premultiplied linear RGBA f32 face to the requested output
/// encoding.
pub fn coerce_out(data: &[f32], format: PixelFormat) -> Result<FacePixels, PrefilterError> {
    match format {
        PixelFormat::RgbaF32Premultiplied => Ok(FacePixels::F32(data.to_vec())),
        PixelFormat::RgbaF32 => {
            let mut out = data.to_vec();
            for px in out.chunks_exact_mut(4) {
                let a = px[3];
                if a > 0.0 {
                    px[0] /= a;
                    px[1] /= a;
                    px[2] /= a;
                }
            }
            Ok(FacePixels::F32(out))
        }
        PixelFormat::Rgba8 => Ok(FacePixels::U8(encode_u8(data, |v| v))),
        PixelFormat::Rgba8Srgb => Ok(FacePixels::U8(encode_u8(data, f32::sqrt))),
    }
}

fn decode_u8(data: &[u8], to_linear: impl Fn(f32) -> f32) -> Vec<f32> {
    let mut out = Vec::with_capacity(data.len());
    for px in data.chunks_exact(4) {
        let a = px[3] as f32 / 255.0;
        for &c in &px[..3] {
            out.push(to_linear(c as f32 / 255.0) * a);
        }
        out.push(a);
    }
    out
}

fn encode_u8(data: &[f32], to_encoded: impl Fn(f32) -> f32) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    for px in data.chunks_exact(4) {
        let a = px[3];
        let inv_a = if a > 0.0 { 1.0 / a } else { 0.0 };
        for &c in &px[..3] {
            let v = to_encoded((c * inv_a).max(0.0));
            out.push((v * 255.0 + 0.5).clamp(0.0, 255.0) as u8);
        }
        out.push((a * 255.0 + 0.5).clamp(0.0, 255.0) as u8);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(format: PixelFormat, data: FaceSlice<'_>) -> FaceInput<'_> {
        FaceInput { format, data }
    }

    #[test]
    fn premultiplied_float_passes_through() {
        let data = [0.1f32, 0.2, 0.3, 0.5, 0.0, 0.0, 0.0, 0.0];
        let out = coerce_in(
            &input(PixelFormat::RgbaF32Premultiplied, FaceSlice::F32(&data)),
            1,
        )
        .unwrap();
        assert_eq!(out, data[..4]);
    }

    #[test]
    fn straight_alpha_float_is_premultiplied() {
        let data = [0.8f32, 0.4, 0.2, 0.5];
        let out = coerce_in(&input(PixelFormat::RgbaF32, FaceSlice::F32(&data)), 1).unwrap();
        assert_eq!(out, vec![0.4, 0.2, 0.1, 0.5]);
    }

    #[test]
    fn srgb_u8_round_trips_within_quantization() {
        let data: Vec<u8> = vec![200, 100, 30, 255];
        let lin = coerce_in(&input(PixelFormat::Rgba8Srgb, FaceSlice::U8(&data)), 1).unwrap();
        let back = match coerce_out(&lin, PixelFormat::Rgba8Srgb).unwrap() {
            FacePixels::U8(v) => v,
            other => panic!("unexpected {other:?}"),
        };
        for (a, b) in data.iter().zip(&back) {
            assert!((*a as i32 - *b as i32).abs() <= 1, "{a} vs {b}");
        }
    }

    #[test]
    fn zero_alpha_encodes_to_black() {
        let lin = [0.0f32, 0.0, 0.0, 0.0];
        match coerce_out(&lin, PixelFormat::Rgba8).unwrap() {
            FacePixels::U8(v) => assert_eq!(v, vec![0, 0, 0, 0]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn mismatched_buffer_kind_is_invalid_format() {
        let bytes = [0u8; 4];
        let err = coerce_in(
            &input(PixelFormat::RgbaF32Premultiplied, FaceSlice::U8(&bytes)),
            1,
        )
        .unwrap_err();
        assert!(matches!(err, PrefilterError::InvalidFormat { .. }));
    }

    #[test]
    fn short_storage_is_invalid_size() {
        let data = [0.0f32; 8];
        let err = coerce_in(
            &input(PixelFormat::RgbaF32Premultiplied, FaceSlice::F32(&data)),
            2,
        )
        .unwrap_err();
        assert_eq!(
            err,
            PrefilterError::InvalidSize {
                size: 2,
                found: 8,
                required: 16,
            }
        );
    }
}
