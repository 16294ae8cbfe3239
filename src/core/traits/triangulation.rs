//! The triangulation contract consumed by the recognition algorithms.
//!
//! The data structure itself (tetrahedra, facet gluings, skeleton,
//! simplification moves) belongs to the backend. The recognizers only need
//! the queries and operations below, and never look inside a tetrahedron
//! except through the small skeletal views used by the compressing-disc fast
//! path ([`TriangleInfo`], [`EdgeInfo`]).
//!
//! Implementations must keep the [`PropertyCache`] returned by
//! [`Triangulation3::properties`] consistent with the triangulation it is
//! attached to. Operations that preserve the manifold (simplification,
//! subdivision and truncation of ideal vertices) keep the manifold facts but
//! must call [`PropertyCache::forget_triangulation_dependent`], since they
//! change the triangulation. Every other operation must start from an empty
//! cache, including [`Triangulation3::finite_to_ideal`], which fills sphere
//! boundaries with balls.

use serde::{Deserialize, Serialize};

use crate::core::homology::AbelianGroup;
use crate::core::properties::PropertyCache;
use crate::topology::characteristics::euler::{SurfaceClassification, classify_surface};

/// A boundary component of a triangulation, real or ideal.
///
/// # Examples
///
/// ```rust
/// use crushing::core::traits::triangulation::BoundaryComponent;
///
/// let torus = BoundaryComponent::real(0, true);
/// assert!(torus.is_torus());
/// assert!(!torus.is_sphere());
///
/// let cusp = BoundaryComponent::ideal(0, true);
/// assert!(cusp.is_torus() && cusp.ideal);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundaryComponent {
    /// Euler characteristic of the boundary surface (of the vertex link for
    /// ideal components).
    pub euler_char: isize,
    /// Whether the boundary surface is orientable.
    pub orientable: bool,
    /// Whether this is an ideal vertex rather than a collection of boundary
    /// triangles.
    pub ideal: bool,
}

impl BoundaryComponent {
    /// A real boundary component made of boundary triangles.
    #[must_use]
    pub const fn real(euler_char: isize, orientable: bool) -> Self {
        Self {
            euler_char,
            orientable,
            ideal: false,
        }
    }

    /// An ideal boundary component (a vertex whose link is this surface).
    #[must_use]
    pub const fn ideal(euler_char: isize, orientable: bool) -> Self {
        Self {
            euler_char,
            orientable,
            ideal: true,
        }
    }

    /// Topological type of the boundary surface.
    #[must_use]
    pub fn classification(&self) -> SurfaceClassification {
        classify_surface(self.euler_char, self.orientable)
    }

    /// Returns `true` for a 2-sphere boundary.
    #[must_use]
    pub fn is_sphere(&self) -> bool {
        self.classification() == SurfaceClassification::Sphere
    }

    /// Returns `true` for a torus boundary.
    #[must_use]
    pub fn is_torus(&self) -> bool {
        self.classification() == SurfaceClassification::Torus
    }
}

/// Skeletal view of a triangle, used to look for compressing discs exposed
/// by a single triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriangleInfo {
    /// Index of the triangle in the backend's skeleton.
    pub index: usize,
    /// The triangle lies on the boundary.
    pub is_boundary: bool,
    /// For each of the three edges of the triangle, whether it lies on the boundary.
    pub edges_on_boundary: [bool; 3],
}

impl TriangleInfo {
    /// An internal triangle whose boundary circle lies entirely in the
    /// boundary of the triangulation: a properly embedded disc.
    #[must_use]
    pub fn is_spanning_disc(&self) -> bool {
        !self.is_boundary && self.edges_on_boundary.iter().all(|&on| on)
    }
}

/// Skeletal view of an edge, used to look for tetrahedra folded around an
/// internal edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeInfo {
    /// Index of the edge in the backend's skeleton.
    pub index: usize,
    /// Number of tetrahedron edges identified to this edge.
    pub degree: usize,
    /// The edge lies on the boundary.
    pub is_boundary: bool,
    /// For a degree-one edge: whether the edge opposite it in its unique
    /// tetrahedron (the equator of the fold) lies on the boundary.
    pub equator_on_boundary: bool,
}

impl EdgeInfo {
    /// A tetrahedron folded around this internal degree-one edge, whose
    /// equator lies on the boundary: the fold spans a disc.
    #[must_use]
    pub const fn is_boundary_fold(&self) -> bool {
        self.degree == 1 && !self.is_boundary && self.equator_on_boundary
    }
}

/// A 3-dimensional triangulation as seen by the recognition algorithms.
pub trait Triangulation3: Clone + Sized {
    // ---------------------------------------------------------------------
    // Cheap queries
    // ---------------------------------------------------------------------

    /// Returns `true` if there are no tetrahedra.
    fn is_empty(&self) -> bool {
        self.count_tetrahedra() == 0
    }

    /// Valid: every edge and vertex link is as it should be in a 3-manifold
    /// (possibly with ideal vertices).
    fn is_valid(&self) -> bool;

    /// No boundary triangles and no ideal vertices.
    fn is_closed(&self) -> bool;

    /// The triangulation is orientable.
    fn is_orientable(&self) -> bool;

    /// The triangulation has exactly one connected component.
    fn is_connected(&self) -> bool;

    /// At least one vertex is ideal.
    fn is_ideal(&self) -> bool;

    /// At least one triangle lies on the real boundary.
    fn has_boundary_triangles(&self) -> bool;

    /// Number of tetrahedra.
    fn count_tetrahedra(&self) -> usize;

    /// Number of triangles in the 2-skeleton.
    fn count_triangles(&self) -> usize;

    /// Number of vertices.
    fn count_vertices(&self) -> usize;

    /// Boundary components, real and ideal.
    fn boundary_components(&self) -> Vec<BoundaryComponent>;

    /// Number of boundary components, real and ideal.
    fn count_boundary_components(&self) -> usize {
        self.boundary_components().len()
    }

    /// First homology group H₁.
    fn homology(&self) -> AbelianGroup;

    /// Number of generators in a simplified presentation of the fundamental
    /// group. Zero certifies a trivial group.
    fn fundamental_group_generators(&self) -> usize;

    /// Cached decision properties of this triangulation.
    fn properties(&self) -> &PropertyCache;

    // ---------------------------------------------------------------------
    // In-place modifications
    // ---------------------------------------------------------------------

    /// Heuristic simplification. Returns `true` if anything changed, in
    /// which case triangulation-dependent cached properties are dropped.
    fn intelligent_simplify(&mut self) -> bool;

    /// Barycentric subdivision. Drops triangulation-dependent cached
    /// properties.
    fn barycentric_subdivision(&mut self);

    /// Truncate ideal vertices into real boundary components. Drops
    /// triangulation-dependent cached properties.
    fn ideal_to_finite(&mut self);

    /// Cone every real boundary component to a single vertex.
    ///
    /// For a sphere boundary this fills the boundary with a ball, so the
    /// property cache must be cleared.
    fn finite_to_ideal(&mut self);

    // ---------------------------------------------------------------------
    // Constructions
    // ---------------------------------------------------------------------

    /// Split into one owned triangulation per connected component.
    fn into_components(self) -> Vec<Self>;

    /// Dehn filling of boundary torus `boundary` along the slope `p/q`,
    /// measured against the backend's preferred basis of that torus.
    fn fill_torus_boundary(&self, boundary: usize, p: i64, q: i64) -> Self;

    /// The layered lens space L(p, q); `p = 0` gives S² × S¹.
    fn layered_lens_space(p: u64, q: u64) -> Self;

    /// The twisted sphere bundle S² ×~ S¹.
    fn twisted_sphere_bundle() -> Self;

    // ---------------------------------------------------------------------
    // Skeletal inspection for the compressing-disc fast path
    // ---------------------------------------------------------------------

    /// Triangles of the 2-skeleton.
    fn triangles(&self) -> Vec<TriangleInfo>;

    /// Edges of the 1-skeleton.
    fn edges(&self) -> Vec<EdgeInfo>;

    /// A copy of this triangulation cut open along the given internal triangle.
    fn cut_along_triangle(&self, triangle: usize) -> Self;

    /// A copy of this triangulation with the tetrahedron folded around the
    /// given degree-one edge opened up along the disc it spans.
    fn open_fold(&self, edge: usize) -> Self;
}
