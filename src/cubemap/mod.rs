//! Cube-map face definitions and cross-face edge topology.
//!
//! A cube map is six square faces tangent to the unit cube, indexed by the
//! outward world axis: `+X, −X, +Y, −Y, +Z, −Z` (ordinals 0..5). Each face
//! carries a local frame of two in-plane axes, tangent `T` (pixel `u`
//! grows along it) and bitangent `B` (pixel `v`), plus the outward normal.
//! The frame assignments follow the common layout where the cross-face
//! orientation of every edge is fixed by convention, which is what lets the
//! edge adjacency be captured in a small static table (see
//! [`CubeTopology`]).

mod topology;

pub use topology::CubeTopology;

use nalgebra::Vector3;

/// One face of a cube map, named by its outward world axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CubeFace {
    PositiveX = 0,
    NegativeX = 1,
    PositiveY = 2,
    NegativeY = 3,
    PositiveZ = 4,
    NegativeZ = 5,
}

/// All six faces in ordinal order.
pub const CUBE_FACES: [CubeFace; 6] = [
    CubeFace::PositiveX,
    CubeFace::NegativeX,
    CubeFace::PositiveY,
    CubeFace::NegativeY,
    CubeFace::PositiveZ,
    CubeFace::NegativeZ,
];

impl CubeFace {
    /// Face for ordinal `i`, if `i < 6`.
    #[inline]
    pub fn from_ordinal(i: usize) -> Option<CubeFace> {
        CUBE_FACES.get(i).copied()
    }

    #[inline]
    pub fn as_ordinal(self) -> usize {
        self as usize
    }

    /// The positive face of this face's axis (`−X` → `+X` etc.).
    #[inline]
    pub fn abs(self) -> CubeFace {
        CUBE_FACES[self.as_ordinal() & !1]
    }

    /// The opposite face (`+X` ↔ `−X`).
    #[inline]
    pub fn opposite(self) -> CubeFace {
        CUBE_FACES[self.as_ordinal() ^ 1]
    }

    /// Neighbor face in the `+u` direction: the face whose normal is this
    /// face's tangent.
    pub fn u_face(self) -> CubeFace {
        match self {
            CubeFace::PositiveX => CubeFace::NegativeZ,
            CubeFace::NegativeX => CubeFace::PositiveZ,
            CubeFace::PositiveY => CubeFace::PositiveX,
            CubeFace::NegativeY => CubeFace::PositiveX,
            CubeFace::PositiveZ => CubeFace::PositiveX,
            CubeFace::NegativeZ => CubeFace::NegativeX,
        }
    }

    /// Neighbor face in the `+v` direction: the face whose normal is this
    /// face's bitangent.
    pub fn v_face(self) -> CubeFace {
        match self {
            CubeFace::PositiveX => CubeFace::NegativeY,
            CubeFace::NegativeX => CubeFace::NegativeY,
            CubeFace::PositiveY => CubeFace::PositiveZ,
            CubeFace::NegativeY => CubeFace::NegativeZ,
            CubeFace::PositiveZ => CubeFace::NegativeY,
            CubeFace::NegativeZ => CubeFace::NegativeY,
        }
    }

    /// Outward world normal.
    pub fn normal(self) -> Vector3<i32> {
        match self {
            CubeFace::PositiveX => Vector3::new(1, 0, 0),
            CubeFace::NegativeX => Vector3::new(-1, 0, 0),
            CubeFace::PositiveY => Vector3::new(0, 1, 0),
            CubeFace::NegativeY => Vector3::new(0, -1, 0),
            CubeFace::PositiveZ => Vector3::new(0, 0, 1),
            CubeFace::NegativeZ => Vector3::new(0, 0, -1),
        }
    }

    /// World direction of the face's `u` axis.
    #[inline]
    pub fn u_axis(self) -> Vector3<i32> {
        self.u_face().normal()
    }

    /// World direction of the face's `v` axis.
    #[inline]
    pub fn v_axis(self) -> Vector3<i32> {
        self.v_face().normal()
    }

    /// Face whose outward normal is `dir`. `dir` must be a signed unit axis.
    pub fn from_normal(dir: Vector3<i32>) -> CubeFace {
        match (dir.x, dir.y, dir.z) {
            (1, 0, 0) => CubeFace::PositiveX,
            (-1, 0, 0) => CubeFace::NegativeX,
            (0, 1, 0) => CubeFace::PositiveY,
            (0, -1, 0) => CubeFace::NegativeY,
            (0, 0, 1) => CubeFace::PositiveZ,
            (0, 0, -1) => CubeFace::NegativeZ,
            _ => unreachable!("not a unit axis direction: {dir:?}"),
        }
    }
}
