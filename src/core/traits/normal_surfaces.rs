//! The normal-surface contract consumed by the recognition algorithms.
//!
//! Enumeration, the LP tree-traversal search, almost-normal sphere search
//! and crushing are provided by the backend through
//! [`NormalSurfaceSearch`]. Crushing takes the triangulation by value: once a
//! triangulation has been crushed it is gone, and only the crushed result
//! (which may be invalid) remains.

use crate::core::traits::triangulation::Triangulation3;

/// Coordinate system for normal surface enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalCoords {
    /// Standard triangle-and-quadrilateral coordinates (7 per tetrahedron).
    Standard,
    /// Quadrilateral coordinates (3 per tetrahedron); vertex links vanish.
    Quad,
}

/// Extra linear constraint imposed on a single-solution LP search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinearConstraint {
    /// No constraint beyond the normal matching equations.
    Unconstrained,
    /// Euler characteristic strictly positive: the search can only return
    /// spheres, discs, projective planes and their unions.
    EulerPositive,
}

/// Parameters of a tree-traversal search for a single non-trivial normal
/// surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SingleSolutionSearch {
    /// Coordinate system searched.
    pub coords: NormalCoords,
    /// Constraint imposed on the solution.
    pub constraint: LinearConstraint,
}

impl SingleSolutionSearch {
    /// Search in standard coordinates for a surface of positive Euler
    /// characteristic.
    #[must_use]
    pub const fn euler_positive() -> Self {
        Self {
            coords: NormalCoords::Standard,
            constraint: LinearConstraint::EulerPositive,
        }
    }
}

/// Predicates of a normal (or almost normal) surface.
pub trait NormalSurface {
    /// Euler characteristic.
    fn euler_char(&self) -> i64;

    /// Finitely many normal discs.
    fn is_compact(&self) -> bool;

    /// A single connected surface.
    fn is_connected(&self) -> bool;

    /// Two-sided in the ambient triangulation.
    fn is_two_sided(&self) -> bool;

    /// Meets the real boundary of the triangulation.
    fn has_real_boundary(&self) -> bool;

    /// A union of vertex links.
    fn is_vertex_linking(&self) -> bool;
}

/// Normal surface machinery on top of a triangulation.
pub trait NormalSurfaceSearch: Triangulation3 {
    /// The backend's normal surface type.
    type Surface: NormalSurface;

    /// A normal sphere or disc that is not vertex-linking, or `None` if the
    /// triangulation is 0-efficient.
    fn non_trivial_sphere_or_disc(&self) -> Option<Self::Surface>;

    /// An octagonal almost normal sphere.
    ///
    /// Only meaningful for closed orientable one-vertex 0-efficient
    /// triangulations, where it exists iff the triangulation is a 3-sphere.
    fn octagonal_almost_normal_sphere(&self) -> Option<Self::Surface>;

    /// All vertex normal surfaces in the given coordinate system.
    fn vertex_surfaces(&self, coords: NormalCoords) -> Vec<Self::Surface>;

    /// A single non-trivial solution satisfying the search's constraint.
    fn single_solution(&self, search: SingleSolutionSearch) -> Option<Self::Surface>;

    /// Crush the surface, consuming the triangulation.
    ///
    /// The result is never absent but may be invalid; this happens when the
    /// surface encloses an embedded two-sided projective plane.
    fn crush(self, surface: &Self::Surface) -> Self;

    /// Cut the triangulation open along the surface.
    fn cut_along(&self, surface: &Self::Surface) -> Self;

    /// Whether the surface is a compressing disc: a disc whose boundary
    /// does not bound a disc in the boundary of the triangulation.
    ///
    /// `known_connected` lets the backend skip its connectedness test.
    fn is_compressing_disc(&self, surface: &Self::Surface, known_connected: bool) -> bool;
}
