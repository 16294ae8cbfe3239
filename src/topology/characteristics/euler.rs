//! Euler characteristic bookkeeping for triangulated surfaces.
//!
//! Boundary components of a 3-manifold triangulation are closed triangulated
//! surfaces, and every recognition algorithm in this crate reads their Euler
//! characteristic: a 2-sphere has χ = 2, a torus χ = 0, and compressing a
//! surface along an essential disc always raises χ by 2.
//!
//! The characteristic is computed from the f-vector using
//! χ = Σ(-1)^k · `f_k`, and a closed surface is classified from `(χ, orientable)`.
//!
//! # Examples
//!
//! ```rust
//! use crushing::topology::characteristics::euler::{self, FVector, SurfaceClassification};
//!
//! // Boundary of a single tetrahedron: 4 vertices, 6 edges, 4 triangles.
//! let counts = FVector { by_dim: vec![4, 6, 4] };
//! let chi = euler::euler_characteristic(&counts);
//! assert_eq!(chi, 2);
//! assert_eq!(euler::classify_surface(chi, true), SurfaceClassification::Sphere);
//! ```

/// Counts of k-simplices for all dimensions 0 ≤ k ≤ D.
///
/// `by_dim[k]` is `f_k`, the number of `k`-dimensional simplices. For a
/// boundary surface of a 3-manifold triangulation this is
/// `(vertices, edges, triangles)`.
///
/// # Examples
///
/// ```rust
/// use crushing::topology::characteristics::euler::FVector;
///
/// let counts = FVector { by_dim: vec![1, 3, 2] };  // one-vertex torus
///
/// assert_eq!(counts.count(0), 1);
/// assert_eq!(counts.count(2), 2);
/// assert_eq!(counts.count(3), 0);  // out of range
/// assert_eq!(counts.dimension(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FVector {
    /// `by_dim[k]` = `f_k` = number of `k`-simplices
    pub by_dim: Vec<usize>,
}

impl FVector {
    /// Get the number of `k`-simplices.
    ///
    /// Returns 0 if `k` is out of range.
    #[must_use]
    #[inline]
    pub fn count(&self, k: usize) -> usize {
        self.by_dim.get(k).copied().unwrap_or(0)
    }

    /// Get the dimension (length of the f-vector minus one).
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.by_dim.len().saturating_sub(1)
    }
}

/// Compute χ = Σ(-1)^k · `f_k` from an f-vector.
#[must_use]
pub fn euler_characteristic(counts: &FVector) -> isize {
    counts
        .by_dim
        .iter()
        .enumerate()
        .map(|(k, &f_k)| {
            let sign = if k % 2 == 0 { 1 } else { -1 };
            sign * (f_k as isize)
        })
        .sum()
}

/// Topological type of a closed connected surface.
///
/// Closed surfaces are determined up to homeomorphism by Euler characteristic
/// and orientability.
///
/// # Examples
///
/// ```rust
/// use crushing::topology::characteristics::euler::{classify_surface, SurfaceClassification};
///
/// assert_eq!(classify_surface(0, true), SurfaceClassification::Torus);
/// assert_eq!(classify_surface(-2, true), SurfaceClassification::Orientable { genus: 2 });
/// assert_eq!(classify_surface(1, false), SurfaceClassification::ProjectivePlane);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceClassification {
    /// The 2-sphere (χ = 2, orientable).
    Sphere,
    /// The torus (χ = 0, orientable).
    Torus,
    /// Orientable surface of genus at least 2.
    Orientable {
        /// Number of handles.
        genus: usize,
    },
    /// The projective plane (χ = 1, non-orientable).
    ProjectivePlane,
    /// The Klein bottle (χ = 0, non-orientable).
    KleinBottle,
    /// Non-orientable surface with at least 3 crosscaps.
    NonOrientable {
        /// Number of crosscaps.
        genus: usize,
    },
    /// Euler characteristic impossible for a closed surface of this orientability.
    Unknown,
}

impl SurfaceClassification {
    /// Orientable genus, or crosscap number for non-orientable surfaces.
    ///
    /// Returns `None` for [`SurfaceClassification::Unknown`].
    #[must_use]
    pub const fn genus(self) -> Option<usize> {
        match self {
            Self::Sphere => Some(0),
            Self::Torus | Self::ProjectivePlane => Some(1),
            Self::KleinBottle => Some(2),
            Self::Orientable { genus } | Self::NonOrientable { genus } => Some(genus),
            Self::Unknown => None,
        }
    }
}

/// Classify a closed connected surface from its Euler characteristic.
#[must_use]
pub fn classify_surface(chi: isize, orientable: bool) -> SurfaceClassification {
    if orientable {
        // χ = 2 - 2g
        match chi {
            2 => SurfaceClassification::Sphere,
            0 => SurfaceClassification::Torus,
            c if c < 0 && c % 2 == 0 => SurfaceClassification::Orientable {
                genus: ((2 - c) / 2) as usize,
            },
            _ => SurfaceClassification::Unknown,
        }
    } else {
        // χ = 2 - k
        match chi {
            1 => SurfaceClassification::ProjectivePlane,
            0 => SurfaceClassification::KleinBottle,
            c if c < 0 => SurfaceClassification::NonOrientable {
                genus: (2 - c) as usize,
            },
            _ => SurfaceClassification::Unknown,
        }
    }
}

/// Expected Euler characteristic of a classified surface.
///
/// Inverse of [`classify_surface`]; returns `None` for
/// [`SurfaceClassification::Unknown`].
#[must_use]
pub fn expected_chi_for(classification: &SurfaceClassification) -> Option<isize> {
    match *classification {
        SurfaceClassification::Sphere => Some(2),
        SurfaceClassification::Torus | SurfaceClassification::KleinBottle => Some(0),
        SurfaceClassification::ProjectivePlane => Some(1),
        SurfaceClassification::Orientable { genus } => Some(2 - 2 * genus as isize),
        SurfaceClassification::NonOrientable { genus } => Some(2 - genus as isize),
        SurfaceClassification::Unknown => None,
    }
}

/// Euler characteristic of the surface obtained by compressing a surface of
/// characteristic `chi` along an essential disc.
#[must_use]
pub const fn compressed_chi(chi: isize) -> isize {
    chi + 2
}
