//! Edge adjacency of the six cube faces as a precomputed lookup table.
//!
//! A convolution tap that falls off one face must be fetched from the
//! correct neighbor face with the correct coordinate reorientation. Each
//! face has four neighbors (across its `±U` and `±V` edges), and crossing
//! an edge is an isometry of the pixel grid: the in-range coordinate `p`
//! runs along the shared edge while the overshoot `q` walks into the
//! neighbor, and each lands on the neighbor's `u` or `v` axis, possibly
//! mirrored. That is 6×4 entries of `(dst_face, swap_uv, flip_u, flip_v)`,
//! derived here once from the face frames instead of being re-decided per
//! tap.

use super::{CubeFace, CUBE_FACES};
use nalgebra::Vector3;

/// How coordinates entering one neighbor face are laid out on it.
#[derive(Debug, Clone, Copy)]
struct EdgeMap {
    face: CubeFace,
    /// Overshoot lands on the neighbor's `u` axis instead of `v`.
    swap_uv: bool,
    flip_u: bool,
    flip_v: bool,
}

/// Cube-face edge sampling: resolves any integer pixel coordinate, in range
/// or not, to a concrete `(face, u, v)` texel.
#[derive(Debug, Clone)]
pub struct CubeTopology {
    /// Per face, entries for the `+U, −U, +V, −V` edges in that order.
    edges: [[EdgeMap; 4]; 6],
}

impl CubeTopology {
    pub fn new() -> Self {
        let edges = std::array::from_fn(|f| {
            let face = CUBE_FACES[f];
            [
                edge_map(face, face.u_axis()),
                edge_map(face, -face.u_axis()),
                edge_map(face, face.v_axis()),
                edge_map(face, -face.v_axis()),
            ]
        });
        Self { edges }
    }

    /// Resolve a possibly off-face pixel coordinate to an on-face texel.
    ///
    /// `u` and `v` may be any integers. In-range coordinates are returned
    /// unchanged; an out-of-range coordinate is folded across the matching
    /// edge into the neighbor face. When both axes overflow (a corner tap)
    /// the axis with the smaller overshoot is clamped into range and the
    /// dominant axis proceeds; the kernel-size invariant guarantees no tap
    /// lies further than one neighbor away. Boundary sampling is nearest
    /// neighbor.
    pub fn resolve(&self, face: CubeFace, u: isize, v: isize, n: usize) -> (CubeFace, usize, usize) {
        debug_assert!(n > 0);
        let last = n as isize - 1;
        let (mut u, mut v) = (u, v);
        if u >= 0 && u <= last && v >= 0 && v <= last {
            return (face, u as usize, v as usize);
        }

        let over_u = if u < 0 { -u } else { (u - last).max(0) };
        let over_v = if v < 0 { -v } else { (v - last).max(0) };
        if over_u > 0 && over_v > 0 {
            if over_u >= over_v {
                v = v.clamp(0, last);
            } else {
                u = u.clamp(0, last);
            }
        }

        // Fold into (edge, along, depth); depth 0 is the first texel past
        // the edge. Depth clamps at the far side so a violated kernel
        // invariant degrades to edge clamping instead of indexing out.
        let (edge, p, q) = if u > last {
            (0, v, u - last - 1)
        } else if u < 0 {
            (1, v, -1 - u)
        } else if v > last {
            (2, u, v - last - 1)
        } else {
            (3, u, -1 - v)
        };
        let q = q.min(last);

        let m = &self.edges[face.as_ordinal()][edge];
        let (mut nu, mut nv) = if m.swap_uv { (q, p) } else { (p, q) };
        if m.flip_u {
            nu = last - nu;
        }
        if m.flip_v {
            nv = last - nv;
        }
        (m.face, nu as usize, nv as usize)
    }

    /// Neighbor face across the given edge (0=+U, 1=−U, 2=+V, 3=−V).
    #[cfg(test)]
    fn neighbor(&self, face: CubeFace, edge: usize) -> CubeFace {
        self.edges[face.as_ordinal()][edge].face
    }
}

impl Default for CubeTopology {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive the coordinate mapping for the edge of `face` in world direction
/// `dir`.
///
/// The neighbor is the face whose normal is `dir`. On the neighbor, walking
/// away from the shared edge follows world `−normal(face)`, and the shared
/// edge itself runs along `face`'s other in-plane axis; matching those two
/// world directions against the neighbor's `±T`/`±B` axes pins down the
/// swap and both mirror flags.
fn edge_map(face: CubeFace, dir: Vector3<i32>) -> EdgeMap {
    let dst = CubeFace::from_normal(dir);
    let depth = -face.normal();
    let along = if dir == face.u_axis() || dir == -face.u_axis() {
        face.v_axis()
    } else {
        face.u_axis()
    };

    if depth == dst.u_axis() || depth == -dst.u_axis() {
        debug_assert!(along == dst.v_axis() || along == -dst.v_axis());
        EdgeMap {
            face: dst,
            swap_uv: true,
            flip_u: depth == -dst.u_axis(),
            flip_v: along == -dst.v_axis(),
        }
    } else {
        debug_assert!(depth == dst.v_axis() || depth == -dst.v_axis());
        debug_assert!(along == dst.u_axis() || along == -dst.u_axis());
        EdgeMap {
            face: dst,
            swap_uv: false,
            flip_u: along == -dst.u_axis(),
            flip_v: depth == -dst.v_axis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const N: usize = 8;

    #[test]
    fn in_range_is_identity() {
        let topo = CubeTopology::new();
        for face in CUBE_FACES {
            for v in 0..N {
                for u in 0..N {
                    assert_eq!(
                        topo.resolve(face, u as isize, v as isize, N),
                        (face, u, v)
                    );
                }
            }
        }
    }

    #[test]
    fn edges_reach_the_expected_neighbors() {
        let topo = CubeTopology::new();
        for face in CUBE_FACES {
            assert_eq!(topo.neighbor(face, 0), face.u_face());
            assert_eq!(topo.neighbor(face, 1), face.u_face().opposite());
            assert_eq!(topo.neighbor(face, 2), face.v_face());
            assert_eq!(topo.neighbor(face, 3), face.v_face().opposite());
        }
    }

    #[test]
    fn edge_texels_are_distinct_on_the_neighbor() {
        // Crossing an edge is an isometry of the grid: the N texels just
        // past an edge must land on N distinct neighbor texels.
        let topo = CubeTopology::new();
        for face in CUBE_FACES {
            for (du, dv) in [(N as isize, 0), (-1, 0), (0, N as isize), (0, -1)] {
                let mut seen = std::collections::HashSet::new();
                for p in 0..N as isize {
                    let (u, v) = if du != 0 { (du, p) } else { (p, dv) };
                    let hit = topo.resolve(face, u, v, N);
                    assert!(seen.insert(hit), "duplicate texel {hit:?} from {face:?}");
                }
            }
        }
    }

    /// Project the continuous sample position of an (extended) pixel
    /// coordinate onto the cube, independently of the edge table.
    fn project(face: CubeFace, u: isize, v: isize, n: usize) -> (CubeFace, usize, usize) {
        let fc = |c: isize| (2.0 * (c as f64 + 0.5)) / n as f64 - 1.0;
        let (uc, vc) = (fc(u), fc(v));
        let t = face.u_axis().cast::<f64>();
        let b = face.v_axis().cast::<f64>();
        let nr = face.normal().cast::<f64>();
        let p = nr + t * uc + b * vc;

        let (ax, sign) = [p.x, p.y, p.z]
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.abs().partial_cmp(&b.1.abs()).unwrap())
            .map(|(i, &c)| (i, c.signum() as i32))
            .unwrap();
        let mut normal = Vector3::zeros();
        normal[ax] = sign;
        let dst = CubeFace::from_normal(normal);

        let w = p.dot(&dst.normal().cast::<f64>());
        let uc2 = p.dot(&dst.u_axis().cast::<f64>()) / w;
        let vc2 = p.dot(&dst.v_axis().cast::<f64>()) / w;
        let px = |c: f64| {
            (((c + 1.0) * 0.5 * n as f64 - 0.5).round() as isize).clamp(0, n as isize - 1) as usize
        };
        (dst, px(uc2), px(vc2))
    }

    #[test]
    fn table_matches_geometric_projection_past_each_edge() {
        let topo = CubeTopology::new();
        for face in CUBE_FACES {
            for p in 0..N as isize {
                for (u, v) in [
                    (N as isize, p),
                    (-1, p),
                    (p, N as isize),
                    (p, -1),
                ] {
                    assert_eq!(
                        topo.resolve(face, u, v, N),
                        project(face, u, v, N),
                        "face {face:?} tap ({u}, {v})"
                    );
                }
            }
        }
    }

    #[test]
    fn corner_taps_clamp_the_minor_axis() {
        let topo = CubeTopology::new();
        let n = N as isize;
        // Overshoot 3 past +U, 1 past +V: V clamps, the tap crosses +U only.
        let (face, u, v) = topo.resolve(CubeFace::PositiveZ, n + 2, n, N);
        assert_eq!(face, CubeFace::PositiveZ.u_face());
        let expect = topo.resolve(CubeFace::PositiveZ, n + 2, n - 1, N);
        assert_eq!((face, u, v), expect);
    }

    #[test]
    fn depth_clamps_at_the_far_side() {
        let topo = CubeTopology::new();
        // A pathologically deep tap stays on the neighbor instead of
        // indexing past it.
        let (face, ..) = topo.resolve(CubeFace::PositiveX, 10 * N as isize, 2, N);
        assert_eq!(face, CubeFace::PositiveX.u_face());
    }
}
