//! A symbolic triangulation backend.
//!
//! [`ModelTriangulation`] does not store tetrahedra. Each connected component
//! records the connected-sum pieces it is built from together with a few
//! combinatorial counters (vertices, tetrahedra, trivial discs, skeletal
//! features). Every operation of [`Triangulation3`] and
//! [`NormalSurfaceSearch`] is answered from that description, following the
//! known behaviour of crushing:
//!
//! - a sphere cutting off a closed summand splits it into its own component;
//! - S² × S¹, S² ×~ S¹, RP³ and L(3,1) summands vanish when crushed;
//! - crushing a sphere that isolates RP² × S¹ gives an invalid result;
//! - a 0-efficient closed component has one vertex, or is the two-vertex
//!   3-sphere.
//!
//! This makes the recognition algorithms testable and benchmarkable
//! without a full normal-surface engine.

use crate::core::homology::AbelianGroup;
use crate::core::properties::PropertyCache;
use crate::core::traits::normal_surfaces::{
    LinearConstraint, NormalCoords, NormalSurface, NormalSurfaceSearch, SingleSolutionSearch,
};
use crate::core::traits::triangulation::{
    BoundaryComponent, EdgeInfo, TriangleInfo, Triangulation3,
};
use crate::model::piece::{ModelError, Piece};
use crate::model::surface::{ModelSurface, SurfaceKind};
use crate::topology::characteristics::euler::FVector;

/// Average degree given to internal edges that carry no feature.
const GENERIC_EDGE_DEGREE: usize = 5;

fn signed(n: usize) -> isize {
    isize::try_from(n).unwrap_or(isize::MAX)
}

fn presentation_generators(piece: &Piece) -> usize {
    match piece {
        Piece::Ball => 0,
        Piece::Lens { .. } | Piece::SphereBundle | Piece::TwistedSphereBundle | Piece::SolidTorus => {
            1
        }
        Piece::ProjectivePlaneBundle | Piece::TorusTimesInterval => 2,
        Piece::Handlebody { genus } => *genus,
        // A trivial abelianisation still needs two generators for a
        // non-trivial perfect group.
        Piece::Irreducible { homology, .. } => {
            (homology.rank() + homology.invariant_factors().len()).max(2)
        }
        Piece::Bounded { homology, .. } => homology.rank().max(1),
    }
}

/// Dehn filling of a solid torus along `p/q`, where `1/0` is the meridian.
/// `None` stands for the 3-sphere.
fn fill_solid_torus(p: i64, q: i64) -> Option<Piece> {
    let order = q.unsigned_abs();
    match order {
        0 => Some(Piece::SphereBundle),
        1 => None,
        _ => Some(Piece::Lens {
            p: order,
            q: p.unsigned_abs() % order,
        }),
    }
}

/// A deliberately wrong crush, for exercising how callers cope with a
/// faulty normal surface backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrushFault {
    /// The crushed component comes back twice.
    DuplicateComponent,
    /// A T² × I summand appears, adding two boundary tori.
    ExtraBoundary,
    /// The component is replaced by a genus-two handlebody.
    ForeignBoundary,
    /// The result is an invalid triangulation.
    Invalid,
}

/// One connected component of a model triangulation.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Component {
    pieces: Vec<Piece>,
    vertices: usize,
    tetrahedra: usize,
    ideal: bool,
    stubborn: bool,
    sticky_vertices: bool,
    trivial_discs: usize,
    exposed_disc: bool,
    boundary_fold: bool,
    valid: bool,
    crush_fault: Option<CrushFault>,
}

impl Component {
    fn new(pieces: Vec<Piece>) -> Self {
        let mut component = Self {
            pieces,
            vertices: 1,
            tetrahedra: 1,
            ideal: false,
            stubborn: false,
            sticky_vertices: false,
            trivial_discs: 0,
            exposed_disc: false,
            boundary_fold: false,
            valid: true,
            crush_fault: None,
        };
        component.vertices = component.min_vertices();
        component.tetrahedra = component.minimal_tetrahedra();
        component
    }

    fn boundary(&self) -> Vec<BoundaryComponent> {
        self.pieces
            .iter()
            .flat_map(Piece::boundary)
            .map(|b| {
                if self.ideal && !b.is_sphere() {
                    BoundaryComponent::ideal(b.euler_char, b.orientable)
                } else {
                    b
                }
            })
            .collect()
    }

    fn has_real_boundary(&self) -> bool {
        self.boundary().iter().any(|b| !b.ideal)
    }

    fn is_orientable(&self) -> bool {
        self.pieces.iter().all(Piece::is_orientable)
    }

    fn homology(&self) -> AbelianGroup {
        self.pieces
            .iter()
            .fold(AbelianGroup::trivial(), |sum, piece| {
                sum.direct_sum(&piece.homology())
            })
    }

    fn generators(&self) -> usize {
        self.pieces.iter().map(presentation_generators).sum::<usize>() + usize::from(self.stubborn)
    }

    /// A real sphere boundary needs four vertices (the boundary of a
    /// tetrahedron), any other boundary one.
    fn min_vertices(&self) -> usize {
        self.boundary()
            .iter()
            .map(|b| if b.is_sphere() && !b.ideal { 4 } else { 1 })
            .sum::<usize>()
            .max(1)
    }

    /// Exposed discs and folds each cost one extra tetrahedron.
    fn minimal_tetrahedra(&self) -> usize {
        let pieces: usize = self.pieces.iter().map(Piece::minimal_tetrahedra).sum();
        (pieces + self.pieces.len().saturating_sub(1)).max(1)
            + usize::from(self.exposed_disc)
            + usize::from(self.boundary_fold)
    }

    /// Fewest vertices a 0-efficient triangulation of this component has.
    fn vertex_floor(&self) -> usize {
        if self.pieces.is_empty() {
            2
        } else {
            self.min_vertices()
        }
    }

    fn closed_pieces(&self) -> impl Iterator<Item = usize> + '_ {
        self.pieces
            .iter()
            .enumerate()
            .filter(|(_, piece)| piece.is_closed())
            .map(|(index, _)| index)
    }

    fn compressible_piece(&self) -> Option<usize> {
        self.pieces
            .iter()
            .position(Piece::has_compressible_boundary)
    }

    /// The normal sphere or disc a search would find first, if any.
    fn non_trivial_surface(&self) -> Option<SurfaceKind> {
        if let Some(last_closed) = self.closed_pieces().last() {
            let piece = &self.pieces[last_closed];
            if self.pieces.len() > 1
                || piece.is_erased_by_crushing()
                || *piece == Piece::ProjectivePlaneBundle
            {
                return Some(SurfaceKind::SummandSphere { piece: last_closed });
            }
        }
        if self.vertices > self.vertex_floor() {
            return Some(SurfaceKind::VertexReduction);
        }
        if self.ideal {
            return None;
        }
        if self.trivial_discs > 0 {
            return Some(SurfaceKind::TrivialDisc);
        }
        self.compressible_piece()
            .map(|piece| SurfaceKind::Meridian { piece })
    }

    fn has_almost_normal_sphere(&self) -> bool {
        self.pieces.is_empty() && self.vertices == 1
    }

    fn boundary_triangles(&self) -> usize {
        self.boundary()
            .iter()
            .filter(|b| !b.ideal)
            .map(|b| {
                if b.is_sphere() {
                    4
                } else {
                    usize::try_from(2 - 2 * b.euler_char).unwrap_or(0).max(2)
                }
            })
            .sum()
    }

    /// Euler characteristic of the underlying cell complex, with each ideal
    /// vertex counted as the cone on its link.
    fn complex_euler_char(&self) -> isize {
        self.boundary()
            .iter()
            .map(|b| {
                if b.ideal {
                    1 - b.euler_char / 2
                } else {
                    b.euler_char / 2
                }
            })
            .sum()
    }

    fn f_vector(&self) -> FVector {
        let triangles = (4 * self.tetrahedra + self.boundary_triangles()) / 2;
        let edges = signed(self.vertices) + signed(triangles)
            - signed(self.tetrahedra)
            - self.complex_euler_char();
        FVector {
            by_dim: vec![
                self.vertices,
                usize::try_from(edges).unwrap_or(0).max(1),
                triangles,
                self.tetrahedra,
            ],
        }
    }

    fn triangles(&self) -> Vec<TriangleInfo> {
        let boundary = self.boundary_triangles();
        let total = self.f_vector().count(2);
        (0..total)
            .map(|index| {
                let is_boundary = index < boundary;
                let spanning = self.exposed_disc && index == boundary;
                TriangleInfo {
                    index,
                    is_boundary,
                    edges_on_boundary: [is_boundary || spanning; 3],
                }
            })
            .collect()
    }

    fn edges(&self) -> Vec<EdgeInfo> {
        let boundary = 3 * self.boundary_triangles() / 2;
        let total = self.f_vector().count(1);
        (0..total)
            .map(|index| {
                let fold = self.boundary_fold && index == boundary;
                EdgeInfo {
                    index,
                    degree: if fold { 1 } else { GENERIC_EDGE_DEGREE },
                    is_boundary: index < boundary,
                    equator_on_boundary: fold,
                }
            })
            .collect()
    }

    fn simplify(&mut self) -> bool {
        let before = (self.vertices, self.tetrahedra);
        if !self.sticky_vertices {
            self.vertices = self.min_vertices();
        }
        self.tetrahedra = self.minimal_tetrahedra()
            + 2 * self.vertices.saturating_sub(self.min_vertices());
        before != (self.vertices, self.tetrahedra)
    }

    fn subdivide(&mut self) {
        let counts = self.f_vector();
        self.vertices = counts.by_dim.iter().sum();
        self.tetrahedra *= 24;
        self.sticky_vertices = false;
    }

    /// Remove the piece at `index`, re-flooring the vertex count.
    fn take_piece(&mut self, index: usize) -> Option<Piece> {
        (index < self.pieces.len()).then(|| {
            let piece = self.pieces.remove(index);
            self.vertices = self.vertices.max(self.min_vertices());
            piece
        })
    }

    fn compress(&mut self, index: usize) {
        if let Some(compressed) = self.pieces.get(index).and_then(Piece::compressed) {
            self.pieces[index] = compressed;
        }
        self.exposed_disc = false;
        self.boundary_fold = false;
        self.vertices = self.vertices.max(self.min_vertices());
    }

    fn crushed(mut self, kind: SurfaceKind) -> Vec<Self> {
        if let Some(fault) = self.crush_fault.take() {
            return self.faulty_crush(fault);
        }
        match kind {
            SurfaceKind::SummandSphere { piece } => match self.take_piece(piece) {
                Some(Piece::ProjectivePlaneBundle) => {
                    self.valid = false;
                    vec![self]
                }
                Some(removed) if !removed.is_erased_by_crushing() => {
                    vec![self, Self::new(vec![removed])]
                }
                _ => vec![self],
            },
            SurfaceKind::VertexReduction => {
                self.vertices = self.vertices.saturating_sub(1).max(self.min_vertices());
                vec![self]
            }
            SurfaceKind::TrivialDisc => {
                self.trivial_discs = self.trivial_discs.saturating_sub(1);
                vec![self, Self::new(vec![Piece::Ball])]
            }
            SurfaceKind::Meridian { piece } => {
                self.compress(piece);
                vec![self]
            }
            SurfaceKind::VertexLink { .. }
            | SurfaceKind::AlmostNormalSphere
            | SurfaceKind::Embedded { .. } => vec![self],
        }
    }

    fn cut(mut self, kind: SurfaceKind) -> Vec<Self> {
        match kind {
            SurfaceKind::Embedded { piece, surface } => {
                if let Some(Piece::Irreducible { homology, .. }) = self.pieces.get(piece) {
                    let side = BoundaryComponent::real(surface.euler_char(), true);
                    self.pieces[piece] = Piece::Bounded {
                        boundary: vec![side, side],
                        homology: homology.clone(),
                        compressible: !surface.incompressible,
                    };
                    self.vertices = self.min_vertices();
                    self.tetrahedra = self.minimal_tetrahedra();
                }
                vec![self]
            }
            SurfaceKind::SummandSphere { piece } => match self.take_piece(piece) {
                Some(removed) => {
                    self.pieces.push(Piece::Ball);
                    self.vertices = self.vertices.max(self.min_vertices());
                    vec![self, Self::new(vec![removed, Piece::Ball])]
                }
                None => vec![self],
            },
            SurfaceKind::TrivialDisc | SurfaceKind::Meridian { .. } => self.crushed(kind),
            SurfaceKind::VertexLink { .. }
            | SurfaceKind::VertexReduction
            | SurfaceKind::AlmostNormalSphere => vec![self, Self::new(vec![Piece::Ball])],
        }
    }

    fn faulty_crush(mut self, fault: CrushFault) -> Vec<Self> {
        match fault {
            CrushFault::DuplicateComponent => vec![self.clone(), self],
            CrushFault::ExtraBoundary => {
                self.pieces.push(Piece::TorusTimesInterval);
                self.vertices = self.vertices.max(self.min_vertices());
                self.tetrahedra = self.minimal_tetrahedra();
                vec![self]
            }
            CrushFault::ForeignBoundary => vec![Self::new(vec![Piece::Handlebody { genus: 2 }])],
            CrushFault::Invalid => {
                self.valid = false;
                vec![self]
            }
        }
    }

    /// Cut along the disc exposed by a spanning triangle or a boundary fold.
    fn cut_exposed_disc(mut self) -> Vec<Self> {
        match self.compressible_piece() {
            Some(index) => {
                self.compress(index);
                vec![self]
            }
            None => {
                self.exposed_disc = false;
                self.boundary_fold = false;
                vec![self, Self::new(vec![Piece::Ball])]
            }
        }
    }
}

/// A symbolic 3-manifold triangulation.
///
/// # Examples
///
/// ```rust
/// use crushing::model::piece::Piece;
/// use crushing::model::triangulation::ModelTriangulation;
/// use crushing::prelude::*;
///
/// let sum = ModelTriangulation::connected_sum(&[
///     Piece::Lens { p: 2, q: 1 },
///     Piece::Lens { p: 5, q: 2 },
/// ])
/// .unwrap();
/// assert_eq!(sum.homology().to_string(), "Z_10");
/// assert!(!sum.is_irreducible().unwrap());
/// assert_eq!(sum.summands().unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModelTriangulation {
    components: Vec<Component>,
    properties: PropertyCache,
}

impl ModelTriangulation {
    fn from_components(components: Vec<Component>) -> Self {
        Self {
            components,
            properties: PropertyCache::default(),
        }
    }

    fn map_components(mut self, mut f: impl FnMut(&mut Component)) -> Self {
        for component in &mut self.components {
            f(component);
        }
        self.properties.forget_triangulation_dependent();
        self
    }

    /// Locate the component owning a global skeleton index.
    fn locate(&self, mut index: usize, count: impl Fn(&Component) -> usize) -> Option<(usize, usize)> {
        for (position, component) in self.components.iter().enumerate() {
            let size = count(component);
            if index < size {
                return Some((position, index));
            }
            index -= size;
        }
        None
    }

    /// Replace component `position` by whatever `f` turns it into.
    fn replacing(&self, position: usize, f: impl FnOnce(Component) -> Vec<Component>) -> Self {
        let mut components = self.components.clone();
        let replaced = f(components.remove(position));
        components.splice(position..position, replaced);
        Self::from_components(components)
    }

    /// The empty triangulation.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A one-vertex 3-sphere.
    #[must_use]
    pub fn three_sphere() -> Self {
        Self::from_components(vec![Component::new(Vec::new())])
    }

    /// A 3-ball.
    #[must_use]
    pub fn ball() -> Self {
        Self::from_piece(Piece::Ball)
    }

    /// The one-tetrahedron layered solid torus.
    #[must_use]
    pub fn solid_torus() -> Self {
        Self::from_piece(Piece::SolidTorus)
    }

    /// The Poincaré homology sphere.
    #[must_use]
    pub fn poincare_sphere() -> Self {
        Self::from_piece(Piece::poincare())
    }

    /// A non-trivial knot complement with real torus boundary.
    #[must_use]
    pub fn knot_complement() -> Self {
        Self::link_complement(1)
    }

    /// A non-split link complement with `cusps` real torus boundary
    /// components (at least one).
    #[must_use]
    pub fn link_complement(cusps: usize) -> Self {
        let cusps = cusps.max(1);
        Self::from_piece(Piece::Bounded {
            boundary: vec![BoundaryComponent::real(0, true); cusps],
            homology: AbelianGroup::free(cusps),
            compressible: false,
        })
    }

    /// An orientable handlebody.
    #[must_use]
    pub fn handlebody(genus: usize) -> Self {
        Self::from_piece(Piece::Handlebody { genus })
    }

    /// (S² ×~ S¹) # (RP² × S¹): crushing the sphere between the summands
    /// runs into the two-sided projective plane.
    #[must_use]
    pub fn twisted_sphere_bundle_sum_with_projective_plane() -> Self {
        Self::from_components(vec![Component::new(vec![
            Piece::TwistedSphereBundle,
            Piece::ProjectivePlaneBundle,
        ])])
    }

    /// A minimal triangulation of a single piece.
    #[must_use]
    pub fn from_piece(piece: Piece) -> Self {
        Self::from_components(vec![Component::new(vec![piece])])
    }

    /// A minimal triangulation of the connected sum of `pieces`. No pieces
    /// gives the 3-sphere.
    ///
    /// # Errors
    ///
    /// Returns the first [`ModelError`] reported by [`Piece::validate`].
    pub fn connected_sum(pieces: &[Piece]) -> Result<Self, ModelError> {
        for piece in pieces {
            piece.validate()?;
        }
        Ok(Self::from_components(vec![Component::new(pieces.to_vec())]))
    }

    /// Solid torus # `piece` for a closed `piece`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotClosed`] for a bounded piece, or the error
    /// reported by [`Piece::validate`].
    pub fn solid_torus_sum(piece: Piece) -> Result<Self, ModelError> {
        if !piece.is_closed() {
            return Err(ModelError::NotClosed {
                piece: format!("{piece:?}"),
            });
        }
        Self::connected_sum(&[Piece::SolidTorus, piece])
    }

    /// The disjoint union of two triangulations.
    #[must_use]
    pub fn disjoint_union(mut self, other: Self) -> Self {
        self.components.extend(other.components);
        Self::from_components(self.components)
    }

    /// Use `vertices` vertices in every component (never fewer than the
    /// boundary requires).
    #[must_use]
    pub fn with_vertices(self, vertices: usize) -> Self {
        self.map_components(|component| {
            component.vertices = vertices.max(component.min_vertices());
            component.tetrahedra = component.minimal_tetrahedra()
                + 2 * component.vertices.saturating_sub(component.min_vertices());
        })
    }

    /// Keep surplus vertices through simplification until the first
    /// barycentric subdivision.
    #[must_use]
    pub fn with_sticky_vertices(self) -> Self {
        self.map_components(|component| component.sticky_vertices = true)
    }

    /// Make the fundamental group presentation resist simplification to
    /// zero generators.
    #[must_use]
    pub fn with_stubborn_presentation(self) -> Self {
        self.map_components(|component| component.stubborn = true)
    }

    /// Present every non-sphere boundary component as an ideal vertex.
    #[must_use]
    pub fn with_ideal_boundary(self) -> Self {
        self.map_components(|component| {
            component.ideal = true;
            component.vertices = component.min_vertices();
        })
    }

    /// Add `count` boundary-parallel discs visible to normal surface
    /// searches.
    #[must_use]
    pub fn with_trivial_discs(self, count: usize) -> Self {
        self.map_components(|component| component.trivial_discs += count)
    }

    /// Expose a disc as a single internal triangle with all three edges on
    /// the boundary.
    #[must_use]
    pub fn with_exposed_disc(self) -> Self {
        self.map_components(|component| {
            component.exposed_disc = true;
            component.tetrahedra += 1;
        })
    }

    /// Fold one tetrahedron around an internal degree-one edge whose
    /// equator lies on the boundary.
    #[must_use]
    pub fn with_boundary_fold(self) -> Self {
        self.map_components(|component| {
            component.boundary_fold = true;
            component.tetrahedra += 1;
        })
    }

    /// Make every generic bounded piece compressible.
    #[must_use]
    pub fn with_compressible_boundary(self) -> Self {
        self.map_components(|component| {
            for piece in &mut component.pieces {
                if let Piece::Bounded { compressible, .. } = piece {
                    *compressible = true;
                }
            }
        })
    }

    /// Make the next crush of every component go wrong in the given way.
    /// Each component misbehaves once.
    #[must_use]
    pub fn with_crush_fault(self, fault: CrushFault) -> Self {
        self.map_components(|component| component.crush_fault = Some(fault))
    }

    /// Remove a ball from every component.
    #[must_use]
    pub fn punctured(self) -> Self {
        self.map_components(|component| {
            component.pieces.push(Piece::Ball);
            component.vertices = component.vertices.max(component.min_vertices());
            component.tetrahedra = component.minimal_tetrahedra();
        })
    }

    /// The same triangulation with an empty property cache. `clone` keeps
    /// cached answers.
    #[must_use]
    pub fn clone_without_cache(&self) -> Self {
        Self::from_components(self.components.clone())
    }

    /// Counts of vertices, edges, triangles and tetrahedra.
    #[must_use]
    pub fn f_vector(&self) -> FVector {
        let mut by_dim = vec![0; 4];
        for component in &self.components {
            for (total, count) in by_dim.iter_mut().zip(component.f_vector().by_dim) {
                *total += count;
            }
        }
        FVector { by_dim }
    }
}

impl Triangulation3 for ModelTriangulation {
    fn is_valid(&self) -> bool {
        self.components.iter().all(|c| c.valid)
    }

    fn is_closed(&self) -> bool {
        self.components.iter().all(|c| c.boundary().is_empty())
    }

    fn is_orientable(&self) -> bool {
        self.components.iter().all(Component::is_orientable)
    }

    fn is_connected(&self) -> bool {
        self.components.len() == 1
    }

    fn is_ideal(&self) -> bool {
        self.components
            .iter()
            .any(|c| c.boundary().iter().any(|b| b.ideal))
    }

    fn has_boundary_triangles(&self) -> bool {
        self.components.iter().any(Component::has_real_boundary)
    }

    fn count_tetrahedra(&self) -> usize {
        self.components.iter().map(|c| c.tetrahedra).sum()
    }

    fn count_triangles(&self) -> usize {
        self.f_vector().count(2)
    }

    fn count_vertices(&self) -> usize {
        self.components.iter().map(|c| c.vertices).sum()
    }

    fn boundary_components(&self) -> Vec<BoundaryComponent> {
        self.components.iter().flat_map(Component::boundary).collect()
    }

    fn homology(&self) -> AbelianGroup {
        self.components
            .iter()
            .fold(AbelianGroup::trivial(), |sum, c| sum.direct_sum(&c.homology()))
    }

    fn fundamental_group_generators(&self) -> usize {
        self.components.iter().map(Component::generators).sum()
    }

    fn properties(&self) -> &PropertyCache {
        &self.properties
    }

    fn intelligent_simplify(&mut self) -> bool {
        let changed = self
            .components
            .iter_mut()
            .fold(false, |changed, c| c.simplify() || changed);
        if changed {
            self.properties.forget_triangulation_dependent();
        }
        changed
    }

    fn barycentric_subdivision(&mut self) {
        for component in &mut self.components {
            component.subdivide();
        }
        self.properties.forget_triangulation_dependent();
    }

    fn ideal_to_finite(&mut self) {
        for component in &mut self.components {
            component.ideal = false;
            component.vertices = component.vertices.max(component.min_vertices());
        }
        self.properties.forget_triangulation_dependent();
    }

    fn finite_to_ideal(&mut self) {
        for component in &mut self.components {
            if !component.has_real_boundary() {
                continue;
            }
            component.pieces.retain(|piece| *piece != Piece::Ball);
            component.ideal = true;
            if component.boundary().is_empty() {
                component.trivial_discs = 0;
                component.exposed_disc = false;
                component.boundary_fold = false;
            }
            component.vertices = component.vertices.min(component.min_vertices().max(1));
        }
        self.properties = PropertyCache::default();
    }

    fn into_components(self) -> Vec<Self> {
        if self.components.len() == 1 {
            return vec![self];
        }
        self.components
            .into_iter()
            .map(|c| Self::from_components(vec![c]))
            .collect()
    }

    fn fill_torus_boundary(&self, boundary: usize, p: i64, q: i64) -> Self {
        let mut remaining = boundary;
        for (position, component) in self.components.iter().enumerate() {
            for (index, piece) in component.pieces.iter().enumerate() {
                let count = piece.boundary().len();
                if remaining >= count {
                    remaining -= count;
                    continue;
                }
                let filled = if *piece == Piece::SolidTorus {
                    Ok(fill_solid_torus(p, q))
                } else {
                    piece.filled(remaining).map(Some).ok_or(())
                };
                return self.replacing(position, |mut component| {
                    match filled {
                        Ok(Some(result)) => component.pieces[index] = result,
                        Ok(None) => {
                            component.pieces.remove(index);
                        }
                        Err(()) => component.valid = false,
                    }
                    component.vertices = component.min_vertices();
                    component.tetrahedra = component.minimal_tetrahedra();
                    vec![component]
                });
            }
        }
        let mut invalid = self.clone();
        for component in &mut invalid.components {
            component.valid = false;
        }
        invalid.properties = PropertyCache::default();
        invalid
    }

    fn layered_lens_space(p: u64, q: u64) -> Self {
        match p {
            0 => Self::from_piece(Piece::SphereBundle),
            1 => Self::three_sphere(),
            _ => Self::from_piece(Piece::Lens { p, q: q % p }),
        }
    }

    fn twisted_sphere_bundle() -> Self {
        Self::from_piece(Piece::TwistedSphereBundle)
    }

    fn triangles(&self) -> Vec<TriangleInfo> {
        let mut offset = 0;
        let mut all = Vec::new();
        for component in &self.components {
            let local = component.triangles();
            let size = local.len();
            all.extend(local.into_iter().map(|t| TriangleInfo {
                index: t.index + offset,
                ..t
            }));
            offset += size;
        }
        all
    }

    fn edges(&self) -> Vec<EdgeInfo> {
        let mut offset = 0;
        let mut all = Vec::new();
        for component in &self.components {
            let local = component.edges();
            let size = local.len();
            all.extend(local.into_iter().map(|e| EdgeInfo {
                index: e.index + offset,
                ..e
            }));
            offset += size;
        }
        all
    }

    fn cut_along_triangle(&self, triangle: usize) -> Self {
        match self.locate(triangle, |c| c.f_vector().count(2)) {
            Some((position, local))
                if self.components[position].exposed_disc
                    && local == self.components[position].boundary_triangles() =>
            {
                self.replacing(position, Component::cut_exposed_disc)
            }
            _ => Self::from_components(self.components.clone()),
        }
    }

    fn open_fold(&self, edge: usize) -> Self {
        match self.locate(edge, |c| c.f_vector().count(1)) {
            Some((position, local))
                if self.components[position].boundary_fold
                    && local == 3 * self.components[position].boundary_triangles() / 2 =>
            {
                self.replacing(position, Component::cut_exposed_disc)
            }
            _ => Self::from_components(self.components.clone()),
        }
    }
}

impl NormalSurfaceSearch for ModelTriangulation {
    type Surface = ModelSurface;

    fn non_trivial_sphere_or_disc(&self) -> Option<ModelSurface> {
        self.components
            .iter()
            .enumerate()
            .find_map(|(position, c)| {
                c.non_trivial_surface()
                    .map(|kind| ModelSurface::new(position, kind))
            })
    }

    fn octagonal_almost_normal_sphere(&self) -> Option<ModelSurface> {
        match self.components.as_slice() {
            [only] if only.has_almost_normal_sphere() && only.boundary().is_empty() => {
                Some(ModelSurface::new(0, SurfaceKind::AlmostNormalSphere))
            }
            _ => None,
        }
    }

    fn vertex_surfaces(&self, coords: NormalCoords) -> Vec<ModelSurface> {
        let mut surfaces = Vec::new();
        for (position, component) in self.components.iter().enumerate() {
            let mut push = |kind| {
                let surface = ModelSurface::new(position, kind);
                if !surfaces.contains(&surface) {
                    surfaces.push(surface);
                }
            };
            if coords == NormalCoords::Standard {
                let boundary_vertices = if component.has_real_boundary() {
                    component.min_vertices()
                } else {
                    0
                };
                for vertex in 0..component.vertices {
                    push(SurfaceKind::VertexLink {
                        boundary: vertex < boundary_vertices,
                    });
                }
            }
            if let Some(kind) = component.non_trivial_surface() {
                push(kind);
            }
            if let Some(piece) = component.compressible_piece() {
                push(SurfaceKind::Meridian { piece });
            }
            for (index, piece) in component.pieces.iter().enumerate() {
                if let Piece::Irreducible { surfaces, .. } = piece {
                    for &surface in surfaces {
                        push(SurfaceKind::Embedded {
                            piece: index,
                            surface,
                        });
                    }
                }
            }
        }
        surfaces
    }

    fn single_solution(&self, search: SingleSolutionSearch) -> Option<ModelSurface> {
        match search.constraint {
            LinearConstraint::EulerPositive => self.non_trivial_sphere_or_disc(),
            LinearConstraint::Unconstrained => self
                .vertex_surfaces(search.coords)
                .into_iter()
                .find(|surface| !surface.is_vertex_linking()),
        }
    }

    fn crush(self, surface: &ModelSurface) -> Self {
        let position = surface.component();
        if position >= self.components.len() {
            return Self::from_components(self.components);
        }
        self.replacing(position, |c| c.crushed(surface.kind()))
    }

    fn cut_along(&self, surface: &ModelSurface) -> Self {
        let position = surface.component();
        if position >= self.components.len() {
            return Self::from_components(self.components.clone());
        }
        self.replacing(position, |c| c.cut(surface.kind()))
    }

    fn is_compressing_disc(&self, surface: &ModelSurface, _known_connected: bool) -> bool {
        surface.component() < self.components.len()
            && matches!(surface.kind(), SurfaceKind::Meridian { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::properties::DecisionProperty;
    use crate::topology::characteristics::euler::euler_characteristic;

    #[test]
    fn test_f_vector_matches_euler_characteristic() {
        for tri in [
            ModelTriangulation::three_sphere(),
            ModelTriangulation::ball(),
            ModelTriangulation::solid_torus(),
            ModelTriangulation::handlebody(3),
            ModelTriangulation::from_piece(Piece::TorusTimesInterval),
        ] {
            let expected: isize = tri.components.iter().map(Component::complex_euler_char).sum();
            assert_eq!(euler_characteristic(&tri.f_vector()), expected);
        }
    }

    #[test]
    fn test_layered_solid_torus_skeleton() {
        let solid_torus = ModelTriangulation::solid_torus();
        assert_eq!(solid_torus.f_vector().by_dim, vec![1, 3, 3, 1]);
        assert_eq!(solid_torus.triangles().iter().filter(|t| t.is_boundary).count(), 2);
    }

    #[test]
    fn test_one_tetrahedron_ball_skeleton() {
        let ball = ModelTriangulation::ball();
        assert_eq!(ball.f_vector().by_dim, vec![4, 6, 4, 1]);
        assert!(ball.triangles().iter().all(|t| t.is_boundary));
        assert_eq!(ball.edges().iter().filter(|e| e.is_boundary).count(), 6);

        let punctured = ModelTriangulation::three_sphere().punctured();
        assert_eq!(punctured.triangles().iter().filter(|t| t.is_boundary).count(), 4);
    }

    #[test]
    fn test_builders_and_in_place_changes_drop_zero_efficiency() {
        let mut lens = ModelTriangulation::from_piece(Piece::Lens { p: 7, q: 2 });
        lens.properties().record(DecisionProperty::ZeroEfficient, true);
        lens.barycentric_subdivision();
        assert_eq!(lens.properties().get(DecisionProperty::ZeroEfficient), None);

        let unchanged = ModelTriangulation::from_piece(Piece::Lens { p: 7, q: 2 });
        unchanged.properties().record(DecisionProperty::ZeroEfficient, true);
        let mut copy = unchanged.clone();
        assert!(!copy.intelligent_simplify());
        assert_eq!(copy.properties().get(DecisionProperty::ZeroEfficient), Some(true));

        let rebuilt = unchanged.with_vertices(3);
        assert_eq!(rebuilt.properties().get(DecisionProperty::ZeroEfficient), None);

        let mut ideal = ModelTriangulation::knot_complement().with_ideal_boundary();
        ideal.properties().record(DecisionProperty::ZeroEfficient, true);
        ideal.ideal_to_finite();
        assert_eq!(ideal.properties().get(DecisionProperty::ZeroEfficient), None);
    }

    #[test]
    fn test_crush_fault_fires_once() {
        let solid_torus =
            ModelTriangulation::solid_torus().with_crush_fault(CrushFault::DuplicateComponent);
        let meridian = solid_torus.non_trivial_sphere_or_disc().unwrap();
        let copies = solid_torus.crush(&meridian).into_components();
        assert_eq!(copies.len(), 2);

        for copy in copies {
            let meridian = copy.non_trivial_sphere_or_disc().unwrap();
            let ball = copy.crush(&meridian);
            assert!(ball.is_connected());
            assert!(ball.boundary_components()[0].is_sphere());
        }
    }

    #[test]
    fn test_connected_sum_homology_and_validation() {
        let sum = ModelTriangulation::connected_sum(&[
            Piece::Lens { p: 2, q: 1 },
            Piece::Lens { p: 3, q: 1 },
        ])
        .unwrap();
        assert_eq!(sum.homology(), AbelianGroup::from_cyclic(0, &[6]));
        assert!(sum.is_closed() && sum.is_connected() && sum.is_orientable());

        assert_eq!(
            ModelTriangulation::connected_sum(&[Piece::Lens { p: 4, q: 2 }]).unwrap_err(),
            ModelError::InvalidLens { p: 4, q: 2 }
        );
        assert!(matches!(
            ModelTriangulation::solid_torus_sum(Piece::Ball),
            Err(ModelError::NotClosed { .. })
        ));
    }

    #[test]
    fn test_crushing_splits_and_erases_summands() {
        let sum = ModelTriangulation::connected_sum(&[
            Piece::Lens { p: 5, q: 1 },
            Piece::SphereBundle,
        ])
        .unwrap();
        let sphere = sum.non_trivial_sphere_or_disc().unwrap();
        assert_eq!(sphere.kind(), SurfaceKind::SummandSphere { piece: 1 });

        let crushed = sum.crush(&sphere);
        assert!(crushed.is_valid());
        assert_eq!(crushed.homology(), AbelianGroup::from_cyclic(0, &[5]));
        assert!(crushed.properties().snapshot().known.is_empty());
    }

    #[test]
    fn test_crushing_projective_plane_bundle_is_invalid() {
        let tri = ModelTriangulation::twisted_sphere_bundle_sum_with_projective_plane();
        assert!(!tri.is_orientable());
        let sphere = tri.non_trivial_sphere_or_disc().unwrap();
        assert!(!tri.crush(&sphere).is_valid());
    }

    #[test]
    fn test_simplify_reaches_minimal_vertices_unless_sticky() {
        let mut loose = ModelTriangulation::three_sphere().with_vertices(4);
        assert!(loose.intelligent_simplify());
        assert_eq!(loose.count_vertices(), 1);

        let mut sticky = ModelTriangulation::three_sphere()
            .with_vertices(4)
            .with_sticky_vertices();
        sticky.intelligent_simplify();
        assert_eq!(sticky.count_vertices(), 4);
        sticky.barycentric_subdivision();
        sticky.intelligent_simplify();
        assert_eq!(sticky.count_vertices(), 1);
    }

    #[test]
    fn test_zero_efficient_spheres() {
        let one_vertex = ModelTriangulation::three_sphere();
        assert!(one_vertex.non_trivial_sphere_or_disc().is_none());
        assert!(one_vertex.octagonal_almost_normal_sphere().is_some());

        let two_vertex = ModelTriangulation::three_sphere()
            .with_vertices(2)
            .with_sticky_vertices();
        assert!(two_vertex.non_trivial_sphere_or_disc().is_none());
        assert!(two_vertex.octagonal_almost_normal_sphere().is_none());
    }

    #[test]
    fn test_finite_to_ideal_cones_sphere_boundary() {
        let mut ball = ModelTriangulation::ball();
        ball.properties()
            .record(crate::core::properties::DecisionProperty::ThreeBall, true);
        ball.finite_to_ideal();
        assert!(ball.is_closed());
        assert!(ball.properties().snapshot().known.is_empty());
    }

    #[test]
    fn test_dehn_filling() {
        let txi = ModelTriangulation::from_piece(Piece::TorusTimesInterval);
        let filled = txi.fill_torus_boundary(0, 1, 1);
        assert_eq!(filled.boundary_components().len(), 1);
        assert_eq!(filled.homology(), AbelianGroup::free(1));

        let solid_torus = ModelTriangulation::solid_torus();
        assert_eq!(
            solid_torus.fill_torus_boundary(0, 1, 5).homology(),
            AbelianGroup::from_cyclic(0, &[5])
        );
        assert!(!ModelTriangulation::ball().fill_torus_boundary(0, 1, 0).is_valid());
    }

    #[test]
    fn test_clone_without_cache() {
        let sphere = ModelTriangulation::three_sphere();
        sphere
            .properties()
            .record(crate::core::properties::DecisionProperty::ThreeSphere, true);
        assert!(!sphere.clone().properties().snapshot().known.is_empty());
        let fresh = sphere.clone_without_cache();
        assert!(fresh.properties().snapshot().known.is_empty());
        assert_eq!(fresh.f_vector(), sphere.f_vector());
    }

    #[test]
    fn test_disjoint_union_splits_into_components() {
        let union = ModelTriangulation::three_sphere().disjoint_union(ModelTriangulation::ball());
        assert!(!union.is_connected());
        assert_eq!(union.into_components().len(), 2);
    }
}
