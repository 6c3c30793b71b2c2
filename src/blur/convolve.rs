//! Single-axis convolution of all six cube faces.

use crate::cubemap::{CubeFace, CubeTopology, CUBE_FACES};
use crate::types::FaceBuffers;
use rayon::prelude::*;

/// Direction of one convolution pass, local to each face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Along each face's `u` (tangent) direction.
    U = 0,
    /// Along each face's `v` (bitangent) direction.
    V = 1,
    /// Along each face's outward normal. Offsetting a surface point along
    /// the normal and re-projecting onto the face scales both in-plane
    /// coordinates about the face center, so this pass is a radial blur;
    /// it restores approximate isotropy on the sphere.
    W = 2,
}

/// Convolve `src` into `dst` along one axis.
///
/// Every destination pixel of every face accumulates `kernel[i + r]` times
/// the source texel at offset `round(i·scale)` pixels along the axis, for
/// `i ∈ −r..=r`. Taps that leave the face are fetched from the correct
/// neighbor through `topo`; the caller must uphold the kernel-size
/// invariant (`n > r·scale·√3`) so no tap crosses more than one edge.
/// `dst` and `src` must be distinct sets (the borrow rules enforce it);
/// both may be larger than `4·n·n` per face, only that prefix is touched.
pub fn convolve_axis(
    dst: &mut FaceBuffers,
    src: &FaceBuffers,
    n: usize,
    kernel: &[f32],
    scale: f32,
    axis: Axis,
    topo: &CubeTopology,
) {
    assert!(kernel.len() % 2 == 1, "kernel length must be odd");
    assert!(scale >= 0.0, "kernel scale must be non-negative");
    let radius = kernel.len() / 2;
    assert!(
        n as f32 > radius as f32 * scale * 3.0f32.sqrt(),
        "kernel footprint too large for {n}×{n} faces"
    );
    let plane = 4 * n * n;
    for face in src.iter() {
        assert!(face.len() >= plane);
    }

    // Tap offsets in whole pixels, hoisted out of the pixel loops.
    let offsets: Vec<isize> = (-(radius as isize)..=radius as isize)
        .map(|i| (i as f32 * scale).round() as isize)
        .collect();

    dst.par_iter_mut().enumerate().for_each(|(fi, out)| {
        let face = CUBE_FACES[fi];
        let out = &mut out[..plane];
        match axis {
            Axis::U | Axis::V => {
                convolve_face_linear(out, src, face, n, kernel, &offsets, axis, topo)
            }
            Axis::W => convolve_face_radial(out, src, face, n, kernel, &offsets, topo),
        }
    });
}

#[inline]
fn accumulate(acc: &mut [f32; 4], texel: &[f32], w: f32) {
    acc[0] += texel[0] * w;
    acc[1] += texel[1] * w;
    acc[2] += texel[2] * w;
    acc[3] += texel[3] * w;
}

fn convolve_face_linear(
    out: &mut [f32],
    src: &FaceBuffers,
    face: CubeFace,
    n: usize,
    kernel: &[f32],
    offsets: &[isize],
    axis: Axis,
    topo: &CubeTopology,
) {
    let own = &src[face.as_ordinal()];
    let last = n as isize - 1;
    let lo = offsets[0];
    let hi = offsets[offsets.len() - 1];
    let horizontal = axis == Axis::U;

    for v in 0..n {
        let row = 4 * v * n;
        for u in 0..n {
            let c = if horizontal { u } else { v } as isize;
            let mut acc = [0.0f32; 4];

            if c + lo >= 0 && c + hi <= last {
                // Whole footprint on this face.
                if horizontal {
                    for (&w, &o) in kernel.iter().zip(offsets) {
                        let idx = row + 4 * (u as isize + o) as usize;
                        accumulate(&mut acc, &own[idx..idx + 4], w);
                    }
                } else {
                    for (&w, &o) in kernel.iter().zip(offsets) {
                        let idx = 4 * ((v as isize + o) as usize * n + u);
                        accumulate(&mut acc, &own[idx..idx + 4], w);
                    }
                }
            } else {
                for (&w, &o) in kernel.iter().zip(offsets) {
                    let (su, sv) = if horizontal {
                        (u as isize + o, v as isize)
                    } else {
                        (u as isize, v as isize + o)
                    };
                    let (f, uu, vv) = topo.resolve(face, su, sv, n);
                    let idx = 4 * (vv * n + uu);
                    accumulate(&mut acc, &src[f.as_ordinal()][idx..idx + 4], w);
                }
            }

            let o = row + 4 * u;
            out[o..o + 4].copy_from_slice(&acc);
        }
    }
}

fn convolve_face_radial(
    out: &mut [f32],
    src: &FaceBuffers,
    face: CubeFace,
    n: usize,
    kernel: &[f32],
    offsets: &[isize],
    topo: &CubeTopology,
) {
    let own = &src[face.as_ordinal()];
    let last = n as isize - 1;
    let half = n as f32 * 0.5;

    // Normal offset `o` pixels ↦ scale both center-relative coordinates by
    // 1 − 2o/n (small-angle form of the exact 1/(1 + 2o/n) reprojection).
    // The largest factor belongs to the most outward tap.
    let factors: Vec<f32> = offsets
        .iter()
        .map(|&o| 1.0 - 2.0 * o as f32 / n as f32)
        .collect();
    let f_max = factors[0].max(factors[factors.len() - 1]);

    for v in 0..n {
        let pv = v as f32 + 0.5 - half;
        let row = 4 * v * n;
        for u in 0..n {
            let pu = u as f32 + 0.5 - half;
            let mut acc = [0.0f32; 4];

            // The footprint stays on-face iff the widest zoom does.
            let eu = (pu * f_max + half - 0.5).round() as isize;
            let ev = (pv * f_max + half - 0.5).round() as isize;
            if eu >= 0 && eu <= last && ev >= 0 && ev <= last {
                for (&w, &f) in kernel.iter().zip(&factors) {
                    let su = (pu * f + half - 0.5).round() as usize;
                    let sv = (pv * f + half - 0.5).round() as usize;
                    let idx = 4 * (sv * n + su);
                    accumulate(&mut acc, &own[idx..idx + 4], w);
                }
            } else {
                for (&w, &f) in kernel.iter().zip(&factors) {
                    let su = (pu * f + half - 0.5).round() as isize;
                    let sv = (pv * f + half - 0.5).round() as isize;
                    let (fc, uu, vv) = topo.resolve(face, su, sv, n);
                    let idx = 4 * (vv * n + uu);
                    accumulate(&mut acc, &src[fc.as_ordinal()][idx..idx + 4], w);
                }
            }

            let o = row + 4 * u;
            out[o..o + 4].copy_from_slice(&acc);
        }
    }
}
