//! Box geometry for block footprints (no engine dependency).
#![forbid(unsafe_code)]

/// Grid subdivisions per block edge. Exported shapes use this unit.
pub const GRID_RES: i32 = 16;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const ONE: Vec3 = Vec3 {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Rounds each component (in block units) to the nearest grid step.
    /// Halfway cases round away from zero.
    #[inline]
    pub fn to_grid(self) -> [i32; 3] {
        let r = GRID_RES as f64;
        [
            (self.x * r).round() as i32,
            (self.y * r).round() as i32,
            (self.z * r).round() as i32,
        ]
    }
}

/// Axis-aligned box in block units, as reported by the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const FULL_BLOCK: Aabb = Aabb {
        min: Vec3::ZERO,
        max: Vec3::ONE,
    };

    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// `[min_x, min_y, min_z, max_x, max_y, max_z]`
    #[inline]
    pub const fn from_array(c: [f64; 6]) -> Self {
        Self {
            min: Vec3::new(c[0], c[1], c[2]),
            max: Vec3::new(c[3], c[4], c[5]),
        }
    }

    #[inline]
    pub fn to_grid(self) -> GridBox {
        GridBox {
            min: self.min.to_grid(),
            max: self.max.to_grid(),
        }
    }
}

/// Box quantized to 1/[`GRID_RES`] of a block. Equality and hashing are exact,
/// which makes it usable as part of an interning key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct GridBox {
    pub min: [i32; 3],
    pub max: [i32; 3],
}

impl GridBox {
    pub const FULL: GridBox = GridBox {
        min: [0, 0, 0],
        max: [GRID_RES, GRID_RES, GRID_RES],
    };

    #[inline]
    pub const fn new(min: [i32; 3], max: [i32; 3]) -> Self {
        Self { min, max }
    }

    /// Flattened export order: min x/y/z then max x/y/z.
    #[inline]
    pub fn to_flat(self) -> [i32; 6] {
        [
            self.min[0], self.min[1], self.min[2], self.max[0], self.max[1], self.max[2],
        ]
    }
}
