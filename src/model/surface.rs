//! Normal surfaces of the symbolic model.

use crate::core::traits::normal_surfaces::NormalSurface;
use crate::model::piece::EmbeddedSurface;

/// What a model surface is, relative to the component it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// Link of a vertex: a sphere, or a disc at a boundary vertex.
    VertexLink {
        /// The vertex lies on the real boundary.
        boundary: bool,
    },
    /// A sphere cutting off (or, for an erasable summand, running through)
    /// the closed piece at this index.
    SummandSphere {
        /// Index into the component's pieces.
        piece: usize,
    },
    /// A sphere that only separates surplus vertices.
    VertexReduction,
    /// A disc whose boundary bounds a disc in the boundary.
    TrivialDisc,
    /// A compressing disc of the bounded piece at this index.
    Meridian {
        /// Index into the component's pieces.
        piece: usize,
    },
    /// An octagonal almost normal sphere in a one-vertex 3-sphere.
    AlmostNormalSphere,
    /// A closed surface listed on an irreducible piece.
    Embedded {
        /// Index into the component's pieces.
        piece: usize,
        /// The surface itself.
        surface: EmbeddedSurface,
    },
}

/// A normal surface in a [`ModelTriangulation`](crate::model::triangulation::ModelTriangulation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelSurface {
    component: usize,
    kind: SurfaceKind,
}

impl ModelSurface {
    pub(crate) const fn new(component: usize, kind: SurfaceKind) -> Self {
        Self { component, kind }
    }

    /// Index of the component containing the surface.
    #[must_use]
    pub const fn component(&self) -> usize {
        self.component
    }

    /// What the surface is.
    #[must_use]
    pub const fn kind(&self) -> SurfaceKind {
        self.kind
    }
}

impl NormalSurface for ModelSurface {
    fn euler_char(&self) -> i64 {
        match self.kind {
            SurfaceKind::VertexLink { boundary: false }
            | SurfaceKind::SummandSphere { .. }
            | SurfaceKind::VertexReduction
            | SurfaceKind::AlmostNormalSphere => 2,
            SurfaceKind::VertexLink { boundary: true }
            | SurfaceKind::TrivialDisc
            | SurfaceKind::Meridian { .. } => 1,
            SurfaceKind::Embedded { surface, .. } => {
                i64::try_from(surface.euler_char()).unwrap_or(i64::MIN)
            }
        }
    }

    fn is_compact(&self) -> bool {
        true
    }

    fn is_connected(&self) -> bool {
        true
    }

    fn is_two_sided(&self) -> bool {
        true
    }

    fn has_real_boundary(&self) -> bool {
        matches!(
            self.kind,
            SurfaceKind::VertexLink { boundary: true }
                | SurfaceKind::TrivialDisc
                | SurfaceKind::Meridian { .. }
        )
    }

    fn is_vertex_linking(&self) -> bool {
        matches!(self.kind, SurfaceKind::VertexLink { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_predicates() {
        let link = ModelSurface::new(0, SurfaceKind::VertexLink { boundary: true });
        assert!(link.is_vertex_linking());
        assert!(link.has_real_boundary());
        assert_eq!(link.euler_char(), 1);

        let genus_two = ModelSurface::new(
            1,
            SurfaceKind::Embedded {
                piece: 0,
                surface: EmbeddedSurface {
                    genus: 2,
                    incompressible: true,
                },
            },
        );
        assert_eq!(genus_two.euler_char(), -2);
        assert!(!genus_two.has_real_boundary());
        assert_eq!(genus_two.component(), 1);
    }
}
