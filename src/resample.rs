//! 2× box downsampling between mip levels.

/// Downsample one RGBA face from side `src_n` to side `dst_n = ⌈src_n/2⌉`
/// by 2×2 box averaging.
///
/// For odd sizes the rightmost/bottom box clamps to the last source row or
/// column. Only the `4·n·n` prefixes of the slices are touched, so the
/// buffers may be larger than the faces they hold.
pub fn downsample_half(src: &[f32], src_n: usize, dst: &mut [f32], dst_n: usize) {
    assert_eq!(dst_n, src_n.div_ceil(2), "not a 2× reduction");
    assert!(src.len() >= 4 * src_n * src_n);
    assert!(dst.len() >= 4 * dst_n * dst_n);

    let max = src_n - 1;
    for y in 0..dst_n {
        let y0 = 2 * y;
        let y1 = (2 * y + 1).min(max);
        for x in 0..dst_n {
            let x0 = 2 * x;
            let x1 = (2 * x + 1).min(max);
            let out = 4 * (y * dst_n + x);
            for c in 0..4 {
                let sum = src[4 * (y0 * src_n + x0) + c]
                    + src[4 * (y0 * src_n + x1) + c]
                    + src[4 * (y1 * src_n + x0) + c]
                    + src[4 * (y1 * src_n + x1) + c];
                dst[out + c] = sum * 0.25;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_two_by_two_blocks() {
        // 2×2 face with one bright pixel collapses to its quarter.
        let mut src = vec![0.0f32; 16];
        src[0] = 1.0; // R of (0, 0)
        let mut dst = vec![0.0f32; 4];
        downsample_half(&src, 2, &mut dst, 1);
        assert_eq!(dst[0], 0.25);
        assert_eq!(dst[1], 0.0);
    }

    #[test]
    fn constant_face_survives_exactly() {
        let n = 6;
        let src: Vec<f32> = std::iter::repeat([0.2, 0.4, 0.6, 1.0])
            .take(n * n)
            .flatten()
            .collect();
        let mut dst = vec![0.0f32; 4 * 3 * 3];
        downsample_half(&src, n, &mut dst, 3);
        for px in dst.chunks_exact(4) {
            assert_eq!(px, [0.2, 0.4, 0.6, 1.0]);
        }
    }

    #[test]
    fn odd_sizes_clamp_the_last_row_and_column() {
        let n = 3;
        let mut src = vec![0.0f32; 4 * n * n];
        // bottom-right corner pixel
        src[4 * (2 * n + 2)] = 1.0;
        let mut dst = vec![0.0f32; 4 * 2 * 2];
        downsample_half(&src, n, &mut dst, 2);
        // The clamped 2×2 box reads the corner four times.
        assert_eq!(dst[4 * 3], 1.0);
    }
}
