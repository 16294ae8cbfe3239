//! Solid torus and T² × I recognition.
//!
//! The solid torus loop crushes normal spheres and discs and keeps following
//! the one component that still has a torus boundary. Everything else left
//! behind must be a 3-sphere or a 3-ball. The loop ends either when the
//! torus boundary disappears (a meridian disc was crushed: solid torus) or
//! when no normal sphere or disc is left (0-efficient with a torus
//! boundary: not a solid torus).

use crate::core::config::RecognitionConfig;
use crate::core::properties::DecisionProperty;
use crate::core::traits::normal_surfaces::NormalSurfaceSearch;
use crate::core::traits::triangulation::{BoundaryComponent, Triangulation3};
use crate::recognition::crush::{CrushedComponent, classify, crush_and_split};
use crate::recognition::error::RecognitionError;
use crate::recognition::sphere::{is_ball_with_config, is_sphere_with_config};

const TORUS: BoundaryComponent = BoundaryComponent::real(0, true);

/// Slopes filled on the first boundary torus when testing for T² × I.
/// Any two of them meet once.
const TXI_SLOPES: [(i64, i64); 3] = [(1, 0), (0, 1), (1, 1)];

fn solid_torus_shaped<T: Triangulation3>(triangulation: &T) -> bool {
    if !(triangulation.is_valid() && triangulation.is_orientable() && triangulation.is_connected())
    {
        return false;
    }
    matches!(
        triangulation.boundary_components().as_slice(),
        [only] if only.is_torus()
    )
}

fn txi_shaped<T: Triangulation3>(triangulation: &T) -> bool {
    if !(triangulation.is_valid() && triangulation.is_orientable() && triangulation.is_connected())
    {
        return false;
    }
    matches!(
        triangulation.boundary_components().as_slice(),
        [first, second] if first.is_torus() && second.is_torus()
    )
}

/// Decide whether `triangulation` is a solid torus.
///
/// # Errors
///
/// See [`is_solid_torus_with_config`].
pub fn is_solid_torus<T: NormalSurfaceSearch>(
    triangulation: &T,
) -> Result<bool, RecognitionError> {
    is_solid_torus_with_config(triangulation, &RecognitionConfig::from_env())
}

/// Decide whether `triangulation` is a solid torus.
///
/// Requires a valid, orientable, connected triangulation with a single torus
/// boundary component (real or ideal) and H₁ = Z; anything else answers (and
/// caches) `false`.
///
/// # Errors
///
/// Returns [`RecognitionError::UnsolvedCase`] if crushing produces an
/// invalid triangulation.
pub fn is_solid_torus_with_config<T: NormalSurfaceSearch>(
    triangulation: &T,
    config: &RecognitionConfig,
) -> Result<bool, RecognitionError> {
    let properties = triangulation.properties();
    if let Some(known) = properties.get(DecisionProperty::SolidTorus) {
        return Ok(known);
    }
    if !solid_torus_shaped(triangulation) || !triangulation.homology().is_z() {
        return Ok(properties.record(DecisionProperty::SolidTorus, false));
    }

    let mut working = triangulation.clone();
    if working.is_ideal() {
        working.ideal_to_finite();
    }
    working.intelligent_simplify();

    let answer = follow_torus_boundary(working, config)?;
    Ok(properties.record(DecisionProperty::SolidTorus, answer))
}

fn follow_torus_boundary<T: NormalSurfaceSearch>(
    mut working: T,
    config: &RecognitionConfig,
) -> Result<bool, RecognitionError> {
    loop {
        if config.subdivide_multi_vertex && working.count_vertices() > 1 {
            working.barycentric_subdivision();
            working.intelligent_simplify();
        }
        if config.trace {
            tracing::debug!(
                tetrahedra = working.count_tetrahedra(),
                vertices = working.count_vertices(),
                "solid torus iteration"
            );
        }

        let Some(surface) = working.non_trivial_sphere_or_disc() else {
            return Ok(false);
        };

        let mut survivor = None;
        for piece in crush_and_split(working, &surface)? {
            let tagged = classify(piece, &TORUS);
            let label = tagged.label();
            if config.trace {
                tracing::debug!(component = label, "crushed component");
            }
            match tagged {
                CrushedComponent::Closed(closed) => {
                    if !is_sphere_with_config(&closed, config)? {
                        return Ok(false);
                    }
                }
                CrushedComponent::SphereBounded(bounded) => {
                    if !is_ball_with_config(&bounded, config)? {
                        return Ok(false);
                    }
                }
                CrushedComponent::Matching(torus) => {
                    if survivor.is_some() {
                        tracing::error!("crushing left more than one torus-bounded component");
                        return Ok(false);
                    }
                    survivor = Some(torus);
                }
                CrushedComponent::OtherBoundary(_) | CrushedComponent::MultiBoundary(_) => {
                    tracing::error!(
                        component = label,
                        "crushing a solid torus candidate left an impossible boundary"
                    );
                    return Ok(false);
                }
            }
        }

        match survivor {
            Some(next) => working = next,
            None => return Ok(true),
        }
    }
}

/// Whether [`is_solid_torus`] can answer without crushing, caching the answer
/// if one is found along the way.
pub fn knows_solid_torus<T: Triangulation3>(triangulation: &T) -> bool {
    let properties = triangulation.properties();
    if properties.knows(DecisionProperty::SolidTorus) {
        return true;
    }
    if !solid_torus_shaped(triangulation) || !triangulation.homology().is_z() {
        properties.record(DecisionProperty::SolidTorus, false);
        return true;
    }
    false
}

/// Decide whether `triangulation` is the product T² × I.
///
/// # Errors
///
/// See [`is_txi_with_config`].
pub fn is_txi<T: NormalSurfaceSearch>(triangulation: &T) -> Result<bool, RecognitionError> {
    is_txi_with_config(triangulation, &RecognitionConfig::from_env())
}

/// Decide whether `triangulation` is the product T² × I.
///
/// Requires a valid, orientable, connected triangulation with exactly two
/// torus boundary components and H₁ = Z²; anything else answers (and caches)
/// `false`. The first boundary torus is then Dehn filled along three slopes
/// that pairwise meet once. The manifold is T² × I iff all three fillings
/// are solid tori.
///
/// # Errors
///
/// Returns [`RecognitionError::UnsolvedCase`] if crushing produces an
/// invalid triangulation.
pub fn is_txi_with_config<T: NormalSurfaceSearch>(
    triangulation: &T,
    config: &RecognitionConfig,
) -> Result<bool, RecognitionError> {
    let properties = triangulation.properties();
    if let Some(known) = properties.get(DecisionProperty::TxI) {
        return Ok(known);
    }
    if !txi_shaped(triangulation) || !triangulation.homology().is_free(2) {
        return Ok(properties.record(DecisionProperty::TxI, false));
    }

    let mut working = triangulation.clone();
    working.intelligent_simplify();
    for (p, q) in TXI_SLOPES {
        let filled = working.fill_torus_boundary(0, p, q);
        if config.trace {
            tracing::debug!(p, q, "testing Dehn filling for a solid torus");
        }
        if !is_solid_torus_with_config(&filled, config)? {
            return Ok(properties.record(DecisionProperty::TxI, false));
        }
    }
    Ok(properties.record(DecisionProperty::TxI, true))
}

/// Whether [`is_txi`] can answer without crushing, caching the answer if one
/// is found along the way.
pub fn knows_txi<T: Triangulation3>(triangulation: &T) -> bool {
    let properties = triangulation.properties();
    if properties.knows(DecisionProperty::TxI) {
        return true;
    }
    if !txi_shaped(triangulation) || !triangulation.homology().is_free(2) {
        properties.record(DecisionProperty::TxI, false);
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::piece::Piece;
    use crate::model::triangulation::{CrushFault, ModelTriangulation};

    fn config() -> RecognitionConfig {
        RecognitionConfig::default()
    }

    #[test]
    fn test_solid_torus_is_recognized() {
        let solid_torus = ModelTriangulation::solid_torus().with_vertices(3);
        assert!(!knows_solid_torus(&solid_torus));
        assert!(is_solid_torus_with_config(&solid_torus, &config()).unwrap());
        assert_eq!(
            solid_torus
                .properties()
                .get(DecisionProperty::CompressingDisc),
            Some(true)
        );
        assert_eq!(
            solid_torus.properties().get(DecisionProperty::ThreeBall),
            Some(false)
        );
    }

    #[test]
    fn test_ideal_solid_torus_is_truncated_first() {
        let ideal = ModelTriangulation::solid_torus().with_ideal_boundary();
        assert!(is_solid_torus_with_config(&ideal, &config()).unwrap());
    }

    #[test]
    fn test_solid_torus_with_trivial_discs_still_recognized() {
        let solid_torus = ModelTriangulation::solid_torus().with_trivial_discs(2);
        assert!(is_solid_torus_with_config(&solid_torus, &config()).unwrap());
    }

    #[test]
    fn test_knot_complement_is_not_a_solid_torus() {
        let trefoil = ModelTriangulation::knot_complement();
        assert!(!knows_solid_torus(&trefoil));
        assert!(!is_solid_torus_with_config(&trefoil, &config()).unwrap());
    }

    #[test]
    fn test_solid_torus_with_fake_ball_summand_is_rejected() {
        let fake = ModelTriangulation::solid_torus_sum(Piece::poincare()).unwrap();
        assert!(!is_solid_torus_with_config(&fake, &config()).unwrap());
    }

    #[test]
    fn test_wrong_homology_is_known_cheaply() {
        let ball = ModelTriangulation::ball();
        assert!(knows_solid_torus(&ball));
        assert!(!is_solid_torus_with_config(&ball, &config()).unwrap());
    }

    #[test]
    fn test_txi_is_recognized() {
        let txi = ModelTriangulation::from_piece(Piece::TorusTimesInterval);
        assert!(!knows_txi(&txi));
        assert!(is_txi_with_config(&txi, &config()).unwrap());
        assert_eq!(
            txi.properties().get(DecisionProperty::CompressingDisc),
            Some(false)
        );
    }

    #[test]
    fn test_solid_torus_is_not_txi() {
        let solid_torus = ModelTriangulation::solid_torus();
        assert!(knows_txi(&solid_torus));
        assert!(!is_txi_with_config(&solid_torus, &config()).unwrap());
    }

    #[test]
    fn test_two_cusped_link_complement_is_not_txi() {
        let whitehead = ModelTriangulation::link_complement(2);
        assert!(!is_txi_with_config(&whitehead, &config()).unwrap());
    }
    #[test]
    fn test_impossible_crush_results_are_rejected() {
        for fault in [
            CrushFault::DuplicateComponent,
            CrushFault::ExtraBoundary,
            CrushFault::ForeignBoundary,
        ] {
            let solid_torus = ModelTriangulation::solid_torus().with_crush_fault(fault);
            assert!(
                !is_solid_torus_with_config(&solid_torus, &config()).unwrap(),
                "{fault:?}"
            );
            assert_eq!(
                solid_torus.properties().get(DecisionProperty::SolidTorus),
                Some(false),
                "{fault:?}"
            );
        }
    }

    #[test]
    fn test_invalid_crush_is_unsolved() {
        let solid_torus = ModelTriangulation::solid_torus().with_crush_fault(CrushFault::Invalid);
        assert_eq!(
            is_solid_torus_with_config(&solid_torus, &config()).unwrap_err(),
            RecognitionError::UnsolvedCase
        );
        assert!(!knows_solid_torus(&solid_torus));
    }

    #[test]
    fn test_txi_propagates_unsolved_filling() {
        let txi = ModelTriangulation::from_piece(Piece::TorusTimesInterval)
            .with_crush_fault(CrushFault::Invalid);
        assert_eq!(
            is_txi_with_config(&txi, &config()).unwrap_err(),
            RecognitionError::UnsolvedCase
        );
        assert_eq!(txi.properties().get(DecisionProperty::TxI), None);
    }
}
