//! Linear-time approximate spherical Gaussian (LTASG) blur.
//!
//! A wide spherical Gaussian is decomposed into a chain of cheap passes:
//! per round, one separable pass along each face's `u` axis, one along `v`,
//! and one radial pass standing in for the direction normal to the face.
//! All passes sample across cube edges through [`crate::cubemap::CubeTopology`],
//! which is what makes the result spherical instead of six independent
//! planar blurs: skipping the third pass leaves visible seams at the cube
//! edges.

mod convolve;
mod kernel;
mod passes;

pub use convolve::{convolve_axis, Axis};
pub use kernel::gaussian_kernel;
pub use passes::{run_passes, PassWorkspace};
