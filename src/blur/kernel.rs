//! 1-D Gaussian sample vectors used as convolution kernels.

/// Build a normalized Gaussian kernel of length `2·radius + 1`.
///
/// Entry `i` is `exp(−½·((i − radius)/σ)²)`, scaled so the entries sum to
/// one. No windowing is applied beyond the fixed radius. `radius == 0`
/// yields the identity kernel `[1.0]`.
pub fn gaussian_kernel(radius: usize, sigma: f32) -> Vec<f32> {
    assert!(
        sigma.is_finite() && sigma > 0.0,
        "sigma must be > 0 and finite"
    );

    let r = radius as isize;
    let inv_sigma = 1.0 / sigma;
    let mut v: Vec<f32> = (-r..=r)
        .map(|i| (-0.5 * (i as f32 * inv_sigma).powi(2)).exp())
        .collect();

    // normalize
    let sum: f32 = v.iter().sum();
    for w in v.iter_mut() {
        *w /= sum;
    }
    v
}
