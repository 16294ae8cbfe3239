//! Haken manifolds and incompressible surfaces.

use std::cmp::Reverse;

use crate::core::config::RecognitionConfig;
use crate::core::properties::DecisionProperty;
use crate::core::traits::normal_surfaces::{NormalCoords, NormalSurface, NormalSurfaceSearch};
use crate::core::traits::triangulation::Triangulation3;
use crate::recognition::compressing_disc::has_compressing_disc_with_config;
use crate::recognition::error::RecognitionError;
use crate::recognition::irreducible::is_irreducible_with_config;

/// Decide whether the underlying manifold is Haken.
///
/// # Errors
///
/// See [`is_haken_with_config`].
pub fn is_haken<T: NormalSurfaceSearch>(triangulation: &T) -> Result<bool, RecognitionError> {
    is_haken_with_config(triangulation, &RecognitionConfig::from_env())
}

/// Decide whether the underlying manifold is Haken: irreducible and
/// containing a two-sided incompressible surface.
///
/// Inputs that are not valid, closed, orientable and connected answer (and
/// cache) `false`. A reducible manifold answers `false` without caching
/// Hakenness, which is undefined there.
///
/// Positive first Betti number settles the question at once. Otherwise
/// every vertex normal surface in quadrilateral coordinates is a candidate,
/// tested in order of increasing genus.
///
/// # Errors
///
/// Propagates [`RecognitionError`] from the irreducibility test and from
/// the compressing-disc searches run on the cut-open pieces.
pub fn is_haken_with_config<T: NormalSurfaceSearch>(
    triangulation: &T,
    config: &RecognitionConfig,
) -> Result<bool, RecognitionError> {
    let properties = triangulation.properties();
    if let Some(known) = properties.get(DecisionProperty::Haken) {
        return Ok(known);
    }
    if !(triangulation.is_valid()
        && triangulation.is_closed()
        && triangulation.is_orientable()
        && triangulation.is_connected())
    {
        return Ok(properties.record(DecisionProperty::Haken, false));
    }
    if !is_irreducible_with_config(triangulation, config)? {
        return Ok(false);
    }
    if triangulation.homology().rank() > 0 {
        return Ok(properties.record(DecisionProperty::Haken, true));
    }

    let mut working = triangulation.clone();
    working.intelligent_simplify();

    let mut candidates = working.vertex_surfaces(NormalCoords::Quad);
    // Stable: equal genus keeps enumeration order.
    candidates.sort_by_key(|surface| Reverse(surface.euler_char()));
    if config.trace {
        tracing::debug!(candidates = candidates.len(), "testing Haken candidates");
    }

    for candidate in &candidates {
        if is_incompressible_with_config(&working, candidate, config)? {
            return Ok(properties.record(DecisionProperty::Haken, true));
        }
    }
    Ok(properties.record(DecisionProperty::Haken, false))
}

/// Whether the Hakenness of `triangulation` is already cached.
pub fn knows_haken<T: Triangulation3>(triangulation: &T) -> bool {
    triangulation.properties().knows(DecisionProperty::Haken)
}

/// Decide whether `surface` is incompressible in `triangulation`.
///
/// # Errors
///
/// See [`is_incompressible_with_config`].
pub fn is_incompressible<T: NormalSurfaceSearch>(
    triangulation: &T,
    surface: &T::Surface,
) -> Result<bool, RecognitionError> {
    is_incompressible_with_config(triangulation, surface, &RecognitionConfig::from_env())
}

/// Decide whether a closed two-sided `surface` is incompressible in
/// `triangulation`.
///
/// Non-compact, bounded, disconnected and vertex-linking surfaces, and
/// surfaces of positive Euler characteristic, answer `false`. Otherwise the
/// triangulation is cut open along the surface: the surface is
/// incompressible iff no resulting component has a compressing disc.
///
/// # Errors
///
/// Propagates [`RecognitionError`] from the compressing-disc searches.
pub fn is_incompressible_with_config<T: NormalSurfaceSearch>(
    triangulation: &T,
    surface: &T::Surface,
    config: &RecognitionConfig,
) -> Result<bool, RecognitionError> {
    if !surface.is_compact()
        || surface.has_real_boundary()
        || !surface.is_connected()
        || surface.is_vertex_linking()
        || surface.euler_char() > 0
    {
        return Ok(false);
    }

    let mut cut = triangulation.cut_along(surface);
    cut.intelligent_simplify();
    for component in cut.into_components() {
        if has_compressing_disc_with_config(&component, config)? {
            return Ok(false);
        }
    }
    Ok(true)
}
