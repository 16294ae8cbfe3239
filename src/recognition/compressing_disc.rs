//! Compressing discs.
//!
//! A compressing disc is a properly embedded disc whose boundary does not
//! bound a disc in the boundary of the manifold. A fast path looks for discs
//! exposed directly by the skeleton. When the boundary is a single
//! orientable surface, a crushing loop driven by an LP search for surfaces of
//! positive Euler characteristic decides the question. Otherwise the vertex
//! normal surfaces are enumerated and checked one by one.

use crate::core::config::RecognitionConfig;
use crate::core::properties::DecisionProperty;
use crate::core::traits::normal_surfaces::{NormalCoords, NormalSurfaceSearch, SingleSolutionSearch};
use crate::core::traits::triangulation::Triangulation3;
use crate::recognition::crush::{CrushedComponent, classify, crush_and_split};
use crate::recognition::error::RecognitionError;

fn bounded_finite<T: Triangulation3>(triangulation: &T) -> bool {
    triangulation.has_boundary_triangles() && triangulation.is_valid() && !triangulation.is_ideal()
}

fn all_boundary_spheres<T: Triangulation3>(triangulation: &T) -> bool {
    triangulation
        .boundary_components()
        .iter()
        .all(|boundary| boundary.is_sphere())
}

/// Decide whether the underlying manifold has a compressing disc.
///
/// # Errors
///
/// See [`has_compressing_disc_with_config`].
pub fn has_compressing_disc<T: NormalSurfaceSearch>(
    triangulation: &T,
) -> Result<bool, RecognitionError> {
    has_compressing_disc_with_config(triangulation, &RecognitionConfig::from_env())
}

/// Decide whether the underlying manifold has a compressing disc.
///
/// Closed triangulations, and those whose boundary components are all
/// spheres, answer (and cache) `false`. Invalid or ideal triangulations
/// answer `false` without touching the cache.
///
/// # Errors
///
/// - [`RecognitionError::UnsolvedCase`] if crushing produces an invalid
///   triangulation.
/// - [`RecognitionError::Inconsistent`] if a crush leaves more than one
///   component carrying the original boundary.
pub fn has_compressing_disc_with_config<T: NormalSurfaceSearch>(
    triangulation: &T,
    config: &RecognitionConfig,
) -> Result<bool, RecognitionError> {
    let properties = triangulation.properties();
    if let Some(known) = properties.get(DecisionProperty::CompressingDisc) {
        return Ok(known);
    }
    if !triangulation.has_boundary_triangles() {
        return Ok(properties.record(DecisionProperty::CompressingDisc, false));
    }
    if !triangulation.is_valid() || triangulation.is_ideal() {
        return Ok(false);
    }
    if all_boundary_spheres(triangulation) {
        return Ok(properties.record(DecisionProperty::CompressingDisc, false));
    }

    let mut working = triangulation.clone();
    working.intelligent_simplify();

    if has_simple_compressing_disc(&working) {
        return Ok(properties.record(DecisionProperty::CompressingDisc, true));
    }

    let answer = if working.is_orientable() && working.count_boundary_components() == 1 {
        search_by_crushing(working, config)?
    } else {
        if config.trace {
            tracing::debug!("enumerating vertex normal surfaces for a compressing disc");
        }
        working
            .vertex_surfaces(NormalCoords::Standard)
            .iter()
            .any(|surface| working.is_compressing_disc(surface, true))
    };
    Ok(properties.record(DecisionProperty::CompressingDisc, answer))
}

/// Repeatedly crush an LP-found surface of positive Euler characteristic and
/// follow the component that keeps the original boundary.
///
/// Crushing a sphere or a trivial disc leaves that boundary intact; crushing
/// a compressing disc changes it. So the boundary disappearing certifies a
/// compressing disc, and the search running dry rules one out.
fn search_by_crushing<T: NormalSurfaceSearch>(
    mut working: T,
    config: &RecognitionConfig,
) -> Result<bool, RecognitionError> {
    let Some(&tracked) = working.boundary_components().first() else {
        return Ok(false);
    };

    loop {
        if config.subdivide_multi_vertex && working.count_vertices() > 1 {
            working.barycentric_subdivision();
            working.intelligent_simplify();
        }

        let Some(surface) = working.single_solution(SingleSolutionSearch::euler_positive()) else {
            if config.trace {
                tracing::debug!("no surface of positive Euler characteristic left");
            }
            return Ok(false);
        };

        let mut survivor = None;
        for piece in crush_and_split(working, &surface)? {
            let tagged = classify(piece, &tracked);
            if config.trace {
                tracing::debug!(component = tagged.label(), "crushed component");
            }
            match tagged {
                CrushedComponent::Matching(same) => {
                    if survivor.is_some() {
                        return Err(inconsistent("two components kept the original boundary"));
                    }
                    survivor = Some(same);
                }
                CrushedComponent::MultiBoundary(_) => {
                    return Err(inconsistent(
                        "crushing a single boundary left a component with several",
                    ));
                }
                CrushedComponent::Closed(_)
                | CrushedComponent::SphereBounded(_)
                | CrushedComponent::OtherBoundary(_) => {}
            }
        }

        match survivor {
            Some(next) => working = next,
            None => return Ok(true),
        }
    }
}

fn inconsistent(message: &str) -> RecognitionError {
    tracing::error!(detail = message, "compressing disc search reached an impossible state");
    RecognitionError::Inconsistent {
        operation: "has_compressing_disc",
        message: message.to_string(),
    }
}

/// Whether [`has_compressing_disc`] can answer without any normal surface
/// work, caching the answer if one is found along the way.
pub fn knows_compressing_disc<T: Triangulation3>(triangulation: &T) -> bool {
    let properties = triangulation.properties();
    if properties.knows(DecisionProperty::CompressingDisc) {
        return true;
    }
    if !triangulation.has_boundary_triangles() || all_boundary_spheres(triangulation) {
        properties.record(DecisionProperty::CompressingDisc, false);
        return true;
    }
    false
}

/// Look for a compressing disc that is visible in the skeleton: a one
/// tetrahedron component that is a solid torus, a single internal triangle
/// spanning a disc, or a tetrahedron folded around an internal edge.
///
/// A `true` answer is cached. A `false` answer only means nothing simple was
/// found and is not cached.
pub fn has_simple_compressing_disc<T: Triangulation3>(triangulation: &T) -> bool {
    let properties = triangulation.properties();
    if let Some(known) = properties.get(DecisionProperty::CompressingDisc) {
        return known;
    }
    if !bounded_finite(triangulation) {
        return false;
    }

    let mut working = triangulation.clone();
    working.intelligent_simplify();

    // The one-tetrahedron, one-vertex triangulation with three triangles is
    // the layered solid torus.
    let solid_torus_component = working.clone().into_components().iter().any(|component| {
        component.count_tetrahedra() == 1
            && component.count_triangles() == 3
            && component.count_vertices() == 1
    });
    if solid_torus_component {
        return properties.record(DecisionProperty::CompressingDisc, true);
    }

    let boundary = working.boundary_components();
    let boundary_count = boundary.len();
    let sphere_count = boundary.iter().filter(|b| b.is_sphere()).count();

    let spanning_disc = working
        .triangles()
        .iter()
        .filter(|triangle| triangle.is_spanning_disc())
        .any(|triangle| {
            let cut = working.cut_along_triangle(triangle.index);
            disc_was_essential(&cut, boundary_count, sphere_count)
        });
    if spanning_disc {
        return properties.record(DecisionProperty::CompressingDisc, true);
    }

    let folded_disc = working
        .edges()
        .iter()
        .filter(|edge| edge.is_boundary_fold())
        .any(|edge| {
            let opened = working.open_fold(edge.index);
            disc_was_essential(&opened, boundary_count, sphere_count)
        });
    if folded_disc {
        return properties.record(DecisionProperty::CompressingDisc, true);
    }

    false
}

/// After cutting along a disc: the disc was essential iff its boundary was
/// non-separating in the boundary surface (the number of boundary
/// components did not change), or it separated the boundary without cutting
/// off a new sphere.
fn disc_was_essential<T: Triangulation3>(
    cut: &T,
    boundary_count: usize,
    sphere_count: usize,
) -> bool {
    let boundary = cut.boundary_components();
    boundary.len() == boundary_count
        || boundary.iter().filter(|b| b.is_sphere()).count() == sphere_count
}
