//! Pass orchestration: repeated (u, v, w) rounds over ping-pong buffers.

use super::convolve::{convolve_axis, Axis};
use crate::cubemap::CubeTopology;
use crate::types::{face_buffers, FaceBuffers};
use std::mem::swap;

/// Two owned six-face buffers recycled by every pass of a process call.
///
/// Allocated once per call, sized for the largest mip level; smaller levels
/// run on a prefix of each face. Nothing survives the call that owns it.
pub struct PassWorkspace {
    ping: FaceBuffers,
    pong: FaceBuffers,
    capacity: usize,
}

impl PassWorkspace {
    /// Workspace able to host faces up to `max_size`×`max_size`.
    pub fn new(max_size: usize) -> Self {
        Self {
            ping: face_buffers(max_size),
            pong: face_buffers(max_size),
            capacity: max_size,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Apply `num_passes` full (u, v, w) convolution rounds to `faces` in place.
///
/// The input is copied into the workspace, blurred across `3·num_passes`
/// single-axis passes that ping-pong between the two owned buffers, and
/// copied back out. A radius-0 kernel short-circuits to the identity after
/// the copy. Reentrant: all mutable state lives in `faces` and `ws`.
pub fn run_passes(
    faces: &mut FaceBuffers,
    n: usize,
    kernel: &[f32],
    scale: f32,
    num_passes: usize,
    topo: &CubeTopology,
    ws: &mut PassWorkspace,
) {
    assert!(ws.capacity >= n, "workspace too small for {n}×{n} faces");
    let plane = 4 * n * n;

    for (dst, src) in ws.ping.iter_mut().zip(faces.iter()) {
        dst[..plane].copy_from_slice(&src[..plane]);
    }

    if kernel.len() > 1 {
        for _ in 0..num_passes {
            for axis in [Axis::U, Axis::V, Axis::W] {
                convolve_axis(&mut ws.pong, &ws.ping, n, kernel, scale, axis, topo);
                swap(&mut ws.ping, &mut ws.pong);
            }
        }
    }

    for (dst, src) in faces.iter_mut().zip(ws.ping.iter()) {
        dst[..plane].copy_from_slice(&src[..plane]);
    }
}
