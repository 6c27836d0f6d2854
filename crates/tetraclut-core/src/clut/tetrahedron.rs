//! The six tetrahedra of a unit cube
//!
//! A cube cell is split along its main diagonal into six tetrahedra, one per
//! ordering of the three fractional coordinates. Each tetrahedron is a path
//! from the low corner `000` to the high corner `111` that steps one axis at
//! a time, largest fraction first.

/// One of the six tetrahedra, named by the order in which axes are stepped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tetrahedron {
    /// `rx >= ry >= rz`
    Rgb,
    /// `rx >= rz >= ry`
    Rbg,
    /// `rz >= rx >= ry`
    Brg,
    /// `ry >= rx >= rz`
    Grb,
    /// `ry >= rz >= rx`
    Gbr,
    /// `rz >= ry >= rx`
    Bgr,
}

impl Tetrahedron {
    /// All tetrahedra in classification priority order
    pub const ALL: [Tetrahedron; 6] = [
        Tetrahedron::Rgb,
        Tetrahedron::Rbg,
        Tetrahedron::Brg,
        Tetrahedron::Grb,
        Tetrahedron::Gbr,
        Tetrahedron::Bgr,
    ];

    /// Pick the tetrahedron containing the point `(rx, ry, rz)`
    ///
    /// Conditions are checked in [`Tetrahedron::ALL`] order, so on a shared
    /// face the first matching case wins. Returns `None` only when no
    /// ordering holds, which cannot happen for integers.
    #[inline]
    pub fn classify(rx: i32, ry: i32, rz: i32) -> Option<Self> {
        if rx >= ry && ry >= rz {
            Some(Tetrahedron::Rgb)
        } else if rx >= rz && rz >= ry {
            Some(Tetrahedron::Rbg)
        } else if rz >= rx && rx >= ry {
            Some(Tetrahedron::Brg)
        } else if ry >= rx && rx >= rz {
            Some(Tetrahedron::Grb)
        } else if ry >= rz && rz >= rx {
            Some(Tetrahedron::Gbr)
        } else if rz >= ry && ry >= rx {
            Some(Tetrahedron::Bgr)
        } else {
            None
        }
    }

    /// Whether the point satisfies this tetrahedron's ordering
    #[inline]
    pub fn contains(self, rx: i32, ry: i32, rz: i32) -> bool {
        match self {
            Tetrahedron::Rgb => rx >= ry && ry >= rz,
            Tetrahedron::Rbg => rx >= rz && rz >= ry,
            Tetrahedron::Brg => rz >= rx && rx >= ry,
            Tetrahedron::Grb => ry >= rx && rx >= rz,
            Tetrahedron::Gbr => ry >= rz && rz >= rx,
            Tetrahedron::Bgr => rz >= ry && ry >= rx,
        }
    }

    /// Axes (0 = r, 1 = g, 2 = b) in the order the path steps them
    pub const fn axis_order(self) -> [usize; 3] {
        match self {
            Tetrahedron::Rgb => [0, 1, 2],
            Tetrahedron::Rbg => [0, 2, 1],
            Tetrahedron::Brg => [2, 0, 1],
            Tetrahedron::Grb => [1, 0, 2],
            Tetrahedron::Gbr => [1, 2, 0],
            Tetrahedron::Bgr => [2, 1, 0],
        }
    }

    /// The two corners between `000` and `111` on this tetrahedron's path
    ///
    /// `true` selects the upper grid line on that axis.
    pub const fn middle_vertices(self) -> [[bool; 3]; 2] {
        match self {
            Tetrahedron::Rgb => [[true, false, false], [true, true, false]],
            Tetrahedron::Rbg => [[true, false, false], [true, false, true]],
            Tetrahedron::Brg => [[false, false, true], [true, false, true]],
            Tetrahedron::Grb => [[false, true, false], [true, true, false]],
            Tetrahedron::Gbr => [[false, true, false], [false, true, true]],
            Tetrahedron::Bgr => [[false, false, true], [false, true, true]],
        }
    }

    /// Edge deltas `[c1, c2, c3]` weighting `rx`, `ry`, `rz`
    ///
    /// `c0` is the low corner, `v1` and `v2` the middle vertices in path
    /// order, `v3` the high corner.
    #[inline]
    pub const fn coefficients(self, c0: i32, v1: i32, v2: i32, v3: i32) -> [i32; 3] {
        match self {
            Tetrahedron::Rgb => [v1 - c0, v2 - v1, v3 - v2],
            Tetrahedron::Rbg => [v1 - c0, v3 - v2, v2 - v1],
            Tetrahedron::Brg => [v2 - v1, v3 - v2, v1 - c0],
            Tetrahedron::Grb => [v2 - v1, v1 - c0, v3 - v2],
            Tetrahedron::Gbr => [v3 - v2, v1 - c0, v2 - v1],
            Tetrahedron::Bgr => [v3 - v2, v2 - v1, v1 - c0],
        }
    }
}
