//! Prime pieces of the symbolic model.
//!
//! A model triangulation component is a connected sum of [`Piece`]s. Closed
//! pieces are the prime summands; bounded pieces supply the boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::homology::AbelianGroup;
use crate::core::traits::triangulation::BoundaryComponent;
use crate::topology::characteristics::euler::compressed_chi;

/// Errors raised when building a model triangulation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModelError {
    /// L(p, q) needs `p >= 2`, `1 <= q < p` and `gcd(p, q) = 1`.
    #[error("L({p}, {q}) is not a lens space with p >= 2, 1 <= q < p and gcd(p, q) = 1")]
    InvalidLens {
        /// Order of the fundamental group.
        p: u64,
        /// Twisting parameter.
        q: u64,
    },
    /// A handlebody needs at least one handle.
    #[error("Handlebody of genus 0 is a ball; use Piece::Ball")]
    EmptyHandlebody,
    /// A bounded piece needs at least one boundary component.
    #[error("Bounded piece has no boundary components")]
    MissingBoundary,
    /// The operation only accepts closed pieces.
    #[error("Expected a closed piece, found {piece}")]
    NotClosed {
        /// Debug rendering of the offending piece.
        piece: String,
    },
}

/// A closed surface embedded in a closed [`Piece::Irreducible`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmbeddedSurface {
    /// Orientable genus.
    pub genus: usize,
    /// The surface admits no compressing disc.
    pub incompressible: bool,
}

impl EmbeddedSurface {
    /// Euler characteristic `2 - 2g`.
    #[must_use]
    pub fn euler_char(&self) -> isize {
        2 - 2 * isize::try_from(self.genus).unwrap_or(isize::MAX / 2)
    }
}

/// A connected-sum piece.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Piece {
    /// The lens space L(p, q).
    Lens {
        /// Order of the fundamental group.
        p: u64,
        /// Twisting parameter.
        q: u64,
    },
    /// S² × S¹.
    SphereBundle,
    /// The twisted bundle S² ×~ S¹ (non-orientable).
    TwistedSphereBundle,
    /// RP² × S¹, which contains a two-sided projective plane.
    ProjectivePlaneBundle,
    /// A closed orientable irreducible manifold that crushing never erases.
    Irreducible {
        /// First homology.
        homology: AbelianGroup,
        /// Closed surfaces visible as vertex normal surfaces.
        surfaces: Vec<EmbeddedSurface>,
    },
    /// The 3-ball. In a connected sum it punctures the other pieces.
    Ball,
    /// The solid torus.
    SolidTorus,
    /// The product T² × I.
    TorusTimesInterval,
    /// An orientable handlebody of genus at least 2.
    Handlebody {
        /// Number of handles.
        genus: usize,
    },
    /// Any other orientable bounded manifold.
    Bounded {
        /// Boundary components.
        boundary: Vec<BoundaryComponent>,
        /// First homology.
        homology: AbelianGroup,
        /// Some boundary component compresses.
        compressible: bool,
    },
}

impl Piece {
    /// The Poincaré homology sphere.
    #[must_use]
    pub fn poincare() -> Self {
        Self::Irreducible {
            homology: AbelianGroup::trivial(),
            surfaces: Vec::new(),
        }
    }

    /// A closed irreducible manifold with free first homology of the given
    /// rank and no listed surfaces.
    #[must_use]
    pub fn closed_with_rank(rank: usize) -> Self {
        Self::Irreducible {
            homology: AbelianGroup::free(rank),
            surfaces: Vec::new(),
        }
    }

    /// A homology sphere containing a compressible torus and an
    /// incompressible surface of the given genus.
    #[must_use]
    pub fn haken_homology_sphere(genus: usize) -> Self {
        Self::Irreducible {
            homology: AbelianGroup::trivial(),
            surfaces: vec![
                EmbeddedSurface {
                    genus: 1,
                    incompressible: false,
                },
                EmbeddedSurface {
                    genus,
                    incompressible: true,
                },
            ],
        }
    }

    /// Reject parameter combinations that name no manifold.
    ///
    /// # Errors
    ///
    /// Returns the [`ModelError`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            &Self::Lens { p, q } => {
                if p < 2 || q == 0 || q >= p || gcd(p, q) != 1 {
                    return Err(ModelError::InvalidLens { p, q });
                }
            }
            Self::Handlebody { genus: 0 } => return Err(ModelError::EmptyHandlebody),
            Self::Bounded { boundary, .. } if boundary.is_empty() => {
                return Err(ModelError::MissingBoundary);
            }
            _ => {}
        }
        Ok(())
    }

    /// The piece has no boundary.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(
            self,
            Self::Lens { .. }
                | Self::SphereBundle
                | Self::TwistedSphereBundle
                | Self::ProjectivePlaneBundle
                | Self::Irreducible { .. }
        )
    }

    /// The piece is orientable.
    #[must_use]
    pub fn is_orientable(&self) -> bool {
        match self {
            Self::TwistedSphereBundle | Self::ProjectivePlaneBundle => false,
            Self::Bounded { boundary, .. } => boundary.iter().all(|b| b.orientable),
            _ => true,
        }
    }

    /// Crushing removes this summand without trace: its only record is the
    /// homology it leaves missing.
    #[must_use]
    pub const fn is_erased_by_crushing(&self) -> bool {
        matches!(
            self,
            Self::SphereBundle | Self::TwistedSphereBundle | Self::Lens { p: 2 | 3, .. }
        )
    }

    /// First homology.
    #[must_use]
    pub fn homology(&self) -> AbelianGroup {
        match self {
            &Self::Lens { p, .. } => AbelianGroup::from_cyclic(0, &[p]),
            Self::SphereBundle | Self::TwistedSphereBundle | Self::SolidTorus => {
                AbelianGroup::free(1)
            }
            Self::ProjectivePlaneBundle => AbelianGroup::from_cyclic(1, &[2]),
            Self::Irreducible { homology, .. } | Self::Bounded { homology, .. } => {
                homology.clone()
            }
            Self::Ball => AbelianGroup::trivial(),
            Self::TorusTimesInterval => AbelianGroup::free(2),
            &Self::Handlebody { genus } => AbelianGroup::free(genus),
        }
    }

    /// Boundary components, all real.
    #[must_use]
    pub fn boundary(&self) -> Vec<BoundaryComponent> {
        match self {
            Self::Ball => vec![BoundaryComponent::real(2, true)],
            Self::SolidTorus => vec![BoundaryComponent::real(0, true)],
            Self::TorusTimesInterval => vec![BoundaryComponent::real(0, true); 2],
            Self::Handlebody { genus } => vec![BoundaryComponent::real(
                EmbeddedSurface {
                    genus: *genus,
                    incompressible: false,
                }
                .euler_char(),
                true,
            )],
            Self::Bounded { boundary, .. } => boundary.clone(),
            _ => Vec::new(),
        }
    }

    /// A boundary component of this piece compresses.
    #[must_use]
    pub const fn has_compressible_boundary(&self) -> bool {
        match self {
            Self::SolidTorus | Self::Handlebody { .. } => true,
            Self::Bounded { compressible, .. } => *compressible,
            _ => false,
        }
    }

    /// Tetrahedra in a minimal triangulation of this piece.
    #[must_use]
    pub fn minimal_tetrahedra(&self) -> usize {
        match self {
            Self::Ball | Self::SolidTorus => 1,
            Self::Lens { .. } | Self::SphereBundle | Self::TwistedSphereBundle => 2,
            Self::ProjectivePlaneBundle => 4,
            Self::Irreducible { surfaces, .. } => 5 + 2 * surfaces.len(),
            Self::TorusTimesInterval => 6,
            Self::Handlebody { genus } => 2 * genus,
            Self::Bounded { boundary, .. } => 3 * boundary.len(),
        }
    }

    /// The result of compressing this piece along a meridian disc, or `None`
    /// if it has no compressible boundary.
    #[must_use]
    pub fn compressed(&self) -> Option<Self> {
        match self {
            Self::SolidTorus | Self::Handlebody { genus: 0 | 1 } => Some(Self::Ball),
            Self::Handlebody { genus: 2 } => Some(Self::SolidTorus),
            &Self::Handlebody { genus } => Some(Self::Handlebody { genus: genus - 1 }),
            Self::Bounded {
                boundary,
                homology,
                compressible: true,
            } => {
                let mut boundary = boundary.clone();
                if let Some(first) = boundary.first_mut() {
                    first.euler_char = compressed_chi(first.euler_char);
                }
                Some(Self::Bounded {
                    boundary,
                    homology: AbelianGroup::free(homology.rank().saturating_sub(1)),
                    compressible: false,
                })
            }
            _ => None,
        }
    }

    /// The result of Dehn filling boundary torus `boundary`, or `None` if
    /// that boundary component is not a torus of this piece.
    #[must_use]
    pub fn filled(&self, boundary: usize) -> Option<Self> {
        let torus = self.boundary().get(boundary).is_some_and(BoundaryComponent::is_torus);
        if !torus {
            return None;
        }
        match self {
            Self::TorusTimesInterval => Some(Self::SolidTorus),
            Self::Bounded {
                boundary: components,
                homology,
                ..
            } => {
                let mut remaining = components.clone();
                remaining.remove(boundary);
                if remaining.is_empty() {
                    Some(Self::Irreducible {
                        homology: AbelianGroup::free(homology.rank().saturating_sub(1)),
                        surfaces: Vec::new(),
                    })
                } else {
                    Some(Self::Bounded {
                        boundary: remaining,
                        homology: AbelianGroup::free(homology.rank().saturating_sub(1)),
                        compressible: false,
                    })
                }
            }
            // Filling a solid torus gives a lens space; the slope is not tracked.
            _ => None,
        }
    }
}

const fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}
