//! Integration tests for the recognition algorithms through the public API.
//!
//! These tests drive every recognizer on the symbolic model backend via
//! `crushing::prelude::*`, covering:
//! - 3-sphere and 3-ball recognition, including the coned ball
//! - Prime decomposition with erased summands and homology bookkeeping
//! - Irreducibility, 0-efficiency and Hakenness
//! - Solid torus, T² × I and compressing disc recognition
//! - Caching: idempotence, `knows_*` and logical implications
//! - The unsolved crushing case
//!
//! For randomized checks over connected sums, see `proptest_recognition.rs`.

use crushing::prelude::*;

fn lens(p: u64, q: u64) -> Piece {
    Piece::Lens { p, q }
}

fn summed_homology(primes: &[ModelTriangulation]) -> AbelianGroup {
    primes
        .iter()
        .fold(AbelianGroup::trivial(), |sum, prime| {
            sum.direct_sum(&prime.homology())
        })
}

// =============================================================================
// SPHERES AND BALLS
// =============================================================================

#[test]
fn test_single_tetrahedron_ball() {
    let ball = ModelTriangulation::ball();
    assert_eq!(ball.count_tetrahedra(), 1);
    assert_eq!(ball.count_triangles(), 4);
    assert_eq!(ball.count_vertices(), 4);
    assert!(ball.is_ball().unwrap());
    assert!(ball.knows_ball());
    assert!(!ball.is_sphere().unwrap(), "a ball is not closed");
}

#[test]
fn test_one_tetrahedron_three_sphere() {
    let sphere = ModelTriangulation::three_sphere();
    assert_eq!(sphere.count_tetrahedra(), 1);
    assert!(sphere.is_sphere().unwrap());
    assert!(sphere.summands().unwrap().is_empty());
    assert!(sphere.is_irreducible().unwrap());
    assert!(!sphere.is_haken().unwrap());
}

#[test]
fn test_coned_ball_is_a_sphere() {
    let mut coned = ModelTriangulation::ball();
    coned.finite_to_ideal();
    assert!(coned.is_closed());
    assert!(coned.is_sphere().unwrap());
}

#[test]
fn test_poincare_sphere() {
    let poincare = ModelTriangulation::poincare_sphere();
    assert!(poincare.homology().is_trivial());
    assert!(!poincare.is_sphere().unwrap());
    assert!(poincare.is_irreducible().unwrap());
    assert!(!poincare.is_haken().unwrap());

    let primes = poincare.summands().unwrap();
    assert_eq!(primes.len(), 1);
    assert!(primes[0].homology().is_trivial());

    let punctured = ModelTriangulation::poincare_sphere().punctured();
    assert!(!punctured.is_ball().unwrap());
}

#[test]
fn test_lens_space_is_irreducible_not_sphere() {
    let tri = ModelTriangulation::from_piece(lens(7, 2));
    assert!(!tri.is_sphere().unwrap());
    assert!(tri.is_irreducible().unwrap());
    assert_eq!(tri.summands().unwrap().len(), 1);
}

#[test]
fn test_disconnected_input_is_not_a_sphere() {
    let union =
        ModelTriangulation::three_sphere().disjoint_union(ModelTriangulation::three_sphere());
    assert!(!union.is_sphere().unwrap());
    assert!(matches!(
        union.summands(),
        Err(RecognitionError::Precondition { .. })
    ));
}

// =============================================================================
// PRIME DECOMPOSITION
// =============================================================================

#[test]
fn test_sum_of_two_projective_spaces() {
    let rp3_sum = ModelTriangulation::connected_sum(&[lens(2, 1), lens(2, 1)]).unwrap();
    assert!(!rp3_sum.is_irreducible().unwrap());

    let primes = rp3_sum.summands().unwrap();
    assert_eq!(primes.len(), 2);
    for prime in &primes {
        assert_eq!(prime.homology(), AbelianGroup::from_cyclic(0, &[2]));
        assert!(prime.is_irreducible().unwrap());
        assert!(!prime.is_sphere().unwrap());
    }
}

#[test]
fn test_summands_recover_every_erased_kind() {
    let tri = ModelTriangulation::connected_sum(&[
        Piece::SphereBundle,
        lens(3, 2),
        Piece::poincare(),
        lens(5, 2),
    ])
    .unwrap();

    let primes = tri.summands().unwrap();
    assert_eq!(primes.len(), 4);
    assert_eq!(summed_homology(&primes), tri.homology());
    assert_eq!(
        primes.iter().filter(|prime| prime.homology().is_z()).count(),
        1,
        "exactly one S² × S¹ is reinserted"
    );
}

#[test]
fn test_non_orientable_rank_reinserts_twisted_bundle() {
    let tri = ModelTriangulation::from_piece(Piece::TwistedSphereBundle);
    let primes = tri.summands().unwrap();
    assert_eq!(primes.len(), 1);
    assert!(!primes[0].is_orientable());
}

#[test]
fn test_unsolved_case_is_reported() {
    let tri = ModelTriangulation::twisted_sphere_bundle_sum_with_projective_plane();
    assert_eq!(tri.summands().unwrap_err(), RecognitionError::UnsolvedCase);
    assert!(
        tri.properties().snapshot().known.is_empty(),
        "nothing is cached for an unsolved case"
    );
}

// =============================================================================
// HAKEN MANIFOLDS
// =============================================================================

#[test]
fn test_haken_through_incompressible_surface() {
    let tri = ModelTriangulation::from_piece(Piece::Irreducible {
        homology: AbelianGroup::from_cyclic(0, &[5]),
        surfaces: vec![EmbeddedSurface {
            genus: 3,
            incompressible: true,
        }],
    });
    assert!(tri.is_haken().unwrap());
    assert_eq!(tri.properties().get(DecisionProperty::Irreducible), Some(true));
    assert_eq!(tri.properties().get(DecisionProperty::ThreeSphere), Some(false));
}

#[test]
fn test_haken_through_positive_rank() {
    let tri = ModelTriangulation::from_piece(Piece::closed_with_rank(2));
    assert!(tri.is_haken().unwrap());
}

#[test]
fn test_compressible_surfaces_do_not_make_haken() {
    let tri = ModelTriangulation::from_piece(Piece::Irreducible {
        homology: AbelianGroup::trivial(),
        surfaces: vec![EmbeddedSurface {
            genus: 1,
            incompressible: false,
        }],
    });
    assert!(!tri.is_haken().unwrap());
    assert!(tri.knows_haken());
}

// =============================================================================
// BOUNDED MANIFOLDS
// =============================================================================

#[test]
fn test_solid_torus_and_product() {
    let solid_torus = ModelTriangulation::solid_torus();
    assert!(solid_torus.is_solid_torus().unwrap());
    assert!(solid_torus.has_compressing_disc().unwrap());
    assert!(!solid_torus.is_ball().unwrap());
    assert!(!solid_torus.is_txi().unwrap());

    let txi = ModelTriangulation::from_piece(Piece::TorusTimesInterval);
    assert!(txi.is_txi().unwrap());
    assert!(!txi.has_compressing_disc().unwrap());
    assert!(!txi.is_solid_torus().unwrap());
}

#[test]
fn test_knot_complement() {
    let trefoil = ModelTriangulation::knot_complement();
    assert!(!trefoil.is_solid_torus().unwrap());
    assert!(!trefoil.has_compressing_disc().unwrap());
}

#[test]
fn test_handlebody_compresses() {
    let handlebody = ModelTriangulation::handlebody(3);
    assert!(!handlebody.has_simple_compressing_disc());
    assert!(handlebody.has_compressing_disc().unwrap());
    assert!(!handlebody.is_solid_torus().unwrap());
}

#[test]
fn test_without_subdivision() {
    let config = RecognitionConfigBuilder::default()
        .subdivide_multi_vertex(false)
        .build()
        .unwrap();
    let solid_torus = ModelTriangulation::solid_torus().with_vertices(4);
    assert!(solid_torus.is_solid_torus_with_config(&config).unwrap());
    let handlebody = ModelTriangulation::handlebody(2).with_vertices(3);
    assert!(handlebody.has_compressing_disc_with_config(&config).unwrap());
}

// =============================================================================
// CACHING
// =============================================================================

#[test]
fn test_answers_are_idempotent() {
    let tri = ModelTriangulation::connected_sum(&[lens(5, 1), Piece::SphereBundle]).unwrap();
    let first = tri.is_irreducible().unwrap();
    let snapshot = tri.properties().snapshot();
    assert_eq!(tri.is_irreducible().unwrap(), first);
    assert_eq!(tri.properties().snapshot(), snapshot);
}

#[test]
fn test_implications_are_recorded_together() {
    let tri = ModelTriangulation::connected_sum(&[lens(5, 1), lens(7, 2)]).unwrap();
    assert!(!tri.knows_irreducible());
    assert!(!tri.is_irreducible().unwrap());
    assert!(tri.knows_irreducible());
    assert!(tri.knows_sphere());
    assert_eq!(tri.properties().get(DecisionProperty::ZeroEfficient), Some(false));

    let sphere = ModelTriangulation::three_sphere().with_vertices(3);
    assert!(sphere.is_sphere().unwrap());
    assert!(sphere.knows_irreducible());
    assert!(sphere.knows_haken());
}

#[test]
fn test_clone_carries_cache() {
    let lens_space = ModelTriangulation::from_piece(lens(7, 3));
    assert!(lens_space.is_irreducible().unwrap());
    let copy = lens_space.clone();
    assert!(copy.knows_irreducible());
}

#[test]
fn test_snapshot_serializes() {
    let tri = ModelTriangulation::three_sphere();
    assert!(tri.is_sphere().unwrap());
    let snapshot = tri.properties().snapshot();

    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(json.contains("ThreeSphere"));
    let restored: PropertySnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.get(DecisionProperty::ThreeSphere), Some(true));
    assert_eq!(restored.get(DecisionProperty::Haken), Some(false));
}
