//! Prime decomposition by repeated crushing.
//!
//! A LIFO worklist starts with the (simplified) input. Each popped
//! triangulation is searched for a non-vertex-linking normal sphere; if one
//! exists it is crushed and the pieces pushed back. Otherwise the piece is
//! 0-efficient: orientable pieces with several vertices, or with one vertex
//! and an octagonal almost normal sphere, are 3-spheres and vanish. Anything
//! else is a prime summand.
//!
//! Crushing silently erases S² × S¹, S² ×~ S¹, RP³ and L(3,1) summands. The
//! [`HomologyDeficit`] accountant tracks how much of H₁ has gone missing so
//! the erased summands can be reinserted at the end.

use std::ops::ControlFlow;

use crate::core::config::RecognitionConfig;
use crate::core::homology::AbelianGroup;
use crate::core::properties::DecisionProperty;
use crate::core::traits::normal_surfaces::NormalSurfaceSearch;
use crate::recognition::crush::crush_and_split;
use crate::recognition::error::RecognitionError;

/// Homology not yet accounted for by the prime summands found so far.
///
/// Starts at the invariants of the input's H₁; each kept summand subtracts
/// its own. Whatever remains at the end counts erased summands: one
/// S² × S¹ (or S² ×~ S¹) per unit of rank, one RP³ per Z₂ factor and one
/// L(3,1) per Z₃ factor.
///
/// # Examples
///
/// ```rust
/// use crushing::core::homology::AbelianGroup;
/// use crushing::recognition::decomposition::HomologyDeficit;
///
/// let mut deficit = HomologyDeficit::of(&AbelianGroup::from_cyclic(1, &[2, 5]));
/// deficit.subtract(&AbelianGroup::from_cyclic(0, &[5]));
/// assert_eq!(deficit.rank, 1);
/// assert_eq!(deficit.two_torsion, 1);
/// assert_eq!(deficit.missing_summands(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HomologyDeficit {
    /// Missing free rank.
    pub rank: usize,
    /// Missing Z₂ factors.
    pub two_torsion: usize,
    /// Missing Z₃ factors.
    pub three_torsion: usize,
}

impl HomologyDeficit {
    /// The invariants of `group`.
    #[must_use]
    pub fn of(group: &AbelianGroup) -> Self {
        Self {
            rank: group.rank(),
            two_torsion: group.torsion_rank(2),
            three_torsion: group.torsion_rank(3),
        }
    }

    /// Account for a summand with homology `group`.
    pub fn subtract(&mut self, group: &AbelianGroup) {
        let summand = Self::of(group);
        if summand.rank > self.rank
            || summand.two_torsion > self.two_torsion
            || summand.three_torsion > self.three_torsion
        {
            tracing::error!(
                deficit = ?self,
                summand = ?summand,
                "summand homology exceeds what is left of the input's homology"
            );
        }
        self.rank = self.rank.saturating_sub(summand.rank);
        self.two_torsion = self.two_torsion.saturating_sub(summand.two_torsion);
        self.three_torsion = self.three_torsion.saturating_sub(summand.three_torsion);
    }

    /// Number of summands erased by crushing.
    #[must_use]
    pub const fn missing_summands(&self) -> usize {
        self.rank + self.two_torsion + self.three_torsion
    }
}

/// Run the crushing worklist from `start`, handing every prime piece that is
/// not a 3-sphere to `on_prime`.
///
/// Returns `Break` as soon as `on_prime` does, `Continue` once the worklist is
/// exhausted.
///
/// # Errors
///
/// Returns [`RecognitionError::UnsolvedCase`] if a crush produces an invalid
/// triangulation.
pub(crate) fn crush_to_primes<T, F>(
    start: T,
    config: &RecognitionConfig,
    mut on_prime: F,
) -> Result<ControlFlow<()>, RecognitionError>
where
    T: NormalSurfaceSearch,
    F: FnMut(T) -> ControlFlow<()>,
{
    let mut stack = vec![start];
    while let Some(processing) = stack.pop() {
        if config.trace {
            tracing::debug!(
                pending = stack.len(),
                tetrahedra = processing.count_tetrahedra(),
                vertices = processing.count_vertices(),
                "processing piece"
            );
        }

        if let Some(sphere) = processing.non_trivial_sphere_or_disc() {
            let pieces = crush_and_split(processing, &sphere)?;
            if config.trace {
                tracing::debug!(components = pieces.len(), "crushed normal sphere");
            }
            stack.extend(pieces);
            continue;
        }

        if is_zero_efficient_sphere(&processing) {
            if config.trace {
                tracing::debug!("discarding 0-efficient 3-sphere");
            }
            continue;
        }

        if on_prime(processing).is_break() {
            return Ok(ControlFlow::Break(()));
        }
    }
    Ok(ControlFlow::Continue(()))
}

/// For a closed 0-efficient piece: does it certify a 3-sphere?
fn is_zero_efficient_sphere<T: NormalSurfaceSearch>(piece: &T) -> bool {
    piece.is_orientable()
        && (piece.count_vertices() > 1 || piece.octagonal_almost_normal_sphere().is_some())
}

/// Decompose a closed 3-manifold into its prime summands.
///
/// See [`summands_with_config`].
///
/// # Errors
///
/// See [`summands_with_config`].
pub fn summands<T: NormalSurfaceSearch>(triangulation: &T) -> Result<Vec<T>, RecognitionError> {
    summands_with_config(triangulation, &RecognitionConfig::from_env())
}

/// Decompose a closed 3-manifold into its prime summands.
///
/// An empty list means the input is a 3-sphere. When exactly one summand
/// results it is a simplified copy of the input itself. Order among summands
/// is unspecified.
///
/// Caches on the input: `three_sphere = true` for no summands,
/// `three_sphere = false` for one, `irreducible = false` for more than one
/// (and for a lone S² × S¹ summand).
///
/// # Errors
///
/// - [`RecognitionError::Precondition`] if the input is not valid, closed and
///   connected.
/// - [`RecognitionError::UnsolvedCase`] if crushing runs into an embedded
///   two-sided projective plane.
pub fn summands_with_config<T: NormalSurfaceSearch>(
    triangulation: &T,
    config: &RecognitionConfig,
) -> Result<Vec<T>, RecognitionError> {
    if !(triangulation.is_valid() && triangulation.is_closed() && triangulation.is_connected()) {
        return Err(RecognitionError::Precondition {
            operation: "summands",
            requirement: "a valid, closed, connected triangulation",
        });
    }

    let mut working = triangulation.clone();
    working.intelligent_simplify();
    let orientable = working.is_orientable();
    let mut deficit = HomologyDeficit::of(&working.homology());
    let simplified = working.clone();

    let mut primes = Vec::new();
    crush_to_primes(working, config, |prime| {
        deficit.subtract(&prime.homology());
        primes.push(prime);
        ControlFlow::Continue(())
    })?;

    if config.trace {
        tracing::debug!(
            kept = primes.len(),
            deficit = ?deficit,
            "reinserting summands erased by crushing"
        );
    }
    for _ in 0..deficit.rank {
        primes.push(if orientable {
            T::layered_lens_space(0, 1)
        } else {
            T::twisted_sphere_bundle()
        });
    }
    for _ in 0..deficit.two_torsion {
        primes.push(T::layered_lens_space(2, 1));
    }
    for _ in 0..deficit.three_torsion {
        primes.push(T::layered_lens_space(3, 1));
    }

    let properties = triangulation.properties();
    match primes.len() {
        0 => {
            properties.record(DecisionProperty::ThreeSphere, true);
        }
        1 => {
            properties.record(DecisionProperty::ThreeSphere, false);
            if orientable && deficit.rank == 1 {
                properties.record(DecisionProperty::Irreducible, false);
            }
            primes[0] = simplified;
        }
        _ => {
            properties.record(DecisionProperty::Irreducible, false);
        }
    }
    Ok(primes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::triangulation::Triangulation3;
    use crate::model::piece::Piece;
    use crate::model::triangulation::ModelTriangulation;

    #[test]
    fn test_deficit_counts_erased_summands() {
        let input = AbelianGroup::from_cyclic(2, &[2, 2, 3, 7]);
        let mut deficit = HomologyDeficit::of(&input);
        assert_eq!(deficit.missing_summands(), 5);
        deficit.subtract(&AbelianGroup::from_cyclic(0, &[7]));
        assert_eq!(
            deficit,
            HomologyDeficit {
                rank: 2,
                two_torsion: 2,
                three_torsion: 1,
            }
        );
    }

    #[test]
    fn test_deficit_saturates() {
        let mut deficit = HomologyDeficit::of(&AbelianGroup::trivial());
        deficit.subtract(&AbelianGroup::free(1));
        assert_eq!(deficit, HomologyDeficit::default());
    }

    #[test]
    fn test_summands_of_three_sphere_is_empty() {
        let sphere = ModelTriangulation::three_sphere().with_vertices(4);
        let primes = summands_with_config(&sphere, &RecognitionConfig::default()).unwrap();
        assert!(primes.is_empty());
        assert_eq!(
            sphere.properties().get(DecisionProperty::ThreeSphere),
            Some(true)
        );
    }

    #[test]
    fn test_summands_reinserts_erased_lens_spaces() {
        let tri = ModelTriangulation::connected_sum(&[
            Piece::SphereBundle,
            Piece::Lens { p: 2, q: 1 },
            Piece::Lens { p: 3, q: 1 },
            Piece::Lens { p: 7, q: 2 },
        ])
        .unwrap();
        let primes = summands_with_config(&tri, &RecognitionConfig::default()).unwrap();
        assert_eq!(primes.len(), 4);

        let mut total = AbelianGroup::trivial();
        for prime in &primes {
            total = total.direct_sum(&prime.homology());
        }
        assert_eq!(total, tri.homology());
        assert_eq!(
            tri.properties().get(DecisionProperty::Irreducible),
            Some(false)
        );
    }

    #[test]
    fn test_single_summand_is_the_simplified_input() {
        let lens = ModelTriangulation::from_piece(Piece::Lens { p: 5, q: 2 }).with_vertices(3);
        let primes = summands_with_config(&lens, &RecognitionConfig::default()).unwrap();
        assert_eq!(primes.len(), 1);
        assert_eq!(primes[0].homology(), lens.homology());
        assert_eq!(
            lens.properties().get(DecisionProperty::ThreeSphere),
            Some(false)
        );
    }

    #[test]
    fn test_lone_sphere_bundle_is_reducible() {
        let bundle = ModelTriangulation::from_piece(Piece::SphereBundle);
        let primes = summands_with_config(&bundle, &RecognitionConfig::default()).unwrap();
        assert_eq!(primes.len(), 1);
        assert_eq!(
            bundle.properties().get(DecisionProperty::Irreducible),
            Some(false)
        );
    }

    #[test]
    fn test_summands_rejects_bounded_input() {
        let ball = ModelTriangulation::ball();
        assert!(matches!(
            summands_with_config(&ball, &RecognitionConfig::default()),
            Err(RecognitionError::Precondition { .. })
        ));
    }

    #[test]
    fn test_summands_reports_unsolved_case() {
        let tri = ModelTriangulation::twisted_sphere_bundle_sum_with_projective_plane();
        assert_eq!(
            summands_with_config(&tri, &RecognitionConfig::default()).unwrap_err(),
            RecognitionError::UnsolvedCase
        );
    }
}
