//! Synthetic six-face inputs and measurement helpers shared by the
//! integration tests.

use envmap_prefilter::types::{FaceInput, FacePixels, FaceSlice, MipLevel, PixelFormat};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Six faces filled with one premultiplied RGBA color.
pub fn constant_faces(n: usize, rgba: [f32; 4]) -> [Vec<f32>; 6] {
    std::array::from_fn(|_| {
        let mut data = vec![0.0f32; 4 * n * n];
        for px in data.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
        data
    })
}

/// Six black faces with a single premultiplied RGBA texel on one face.
pub fn delta_faces(n: usize, face: usize, u: usize, v: usize, rgba: [f32; 4]) -> [Vec<f32>; 6] {
    let mut faces = constant_faces(n, [0.0; 4]);
    faces[face][4 * (v * n + u)..4 * (v * n + u) + 4].copy_from_slice(&rgba);
    faces
}

/// The same smooth radial bump on every face.
///
/// The pattern depends only on the distance from the face center, so it is
/// invariant under every 90° rotation and flip of a face, which makes the
/// whole cube map invariant under cube rotations.
pub fn radial_faces(n: usize) -> [Vec<f32>; 6] {
    let mut face = vec![0.0f32; 4 * n * n];
    for v in 0..n {
        let vc = 2.0 * (v as f32 + 0.5) / n as f32 - 1.0;
        for u in 0..n {
            let uc = 2.0 * (u as f32 + 0.5) / n as f32 - 1.0;
            let value = (-(uc * uc + vc * vc) * 2.0).exp();
            let px = &mut face[4 * (v * n + u)..4 * (v * n + u) + 4];
            px.copy_from_slice(&[value, value * 0.5, 1.0 - value, 1.0]);
        }
    }
    std::array::from_fn(|_| face.clone())
}

/// Six faces of seeded uniform noise with opaque alpha.
pub fn random_faces(n: usize, seed: u64) -> [Vec<f32>; 6] {
    let mut rng = StdRng::seed_from_u64(seed);
    std::array::from_fn(|_| {
        let mut data = vec![0.0f32; 4 * n * n];
        for px in data.chunks_exact_mut(4) {
            px[0] = rng.gen();
            px[1] = rng.gen();
            px[2] = rng.gen();
            px[3] = 1.0;
        }
        data
    })
}

/// Borrow a face set as premultiplied-float pipeline inputs.
pub fn face_inputs(data: &[Vec<f32>; 6]) -> Vec<FaceInput<'_>> {
    data.iter()
        .map(|d| FaceInput {
            format: PixelFormat::RgbaF32Premultiplied,
            data: FaceSlice::F32(d),
        })
        .collect()
}

/// Float pixels of one face of an emitted level.
pub fn level_face(level: &MipLevel, face: usize) -> &[f32] {
    match &level.faces[face].pixels {
        FacePixels::F32(v) => v,
        other => panic!("expected float pixels, got {other:?}"),
    }
}

/// Sum of one channel over a face.
pub fn channel_sum(face: &[f32], channel: usize) -> f64 {
    face.chunks_exact(4).map(|px| f64::from(px[channel])).sum()
}

/// Sum of squared differences between horizontally and vertically adjacent
/// texels; a simple roughness measure (smaller = smoother).
pub fn roughness(face: &[f32], n: usize) -> f64 {
    let mut sum = 0.0f64;
    let texel = |u: usize, v: usize, c: usize| f64::from(face[4 * (v * n + u) + c]);
    for v in 0..n {
        for u in 0..n {
            for c in 0..3 {
                if u + 1 < n {
                    sum += (texel(u + 1, v, c) - texel(u, v, c)).powi(2);
                }
                if v + 1 < n {
                    sum += (texel(u, v + 1, c) - texel(u, v, c)).powi(2);
                }
            }
        }
    }
    sum
}
