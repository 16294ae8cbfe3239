//! 3-sphere and 3-ball recognition.
//!
//! A closed orientable triangulation is a 3-sphere iff the crushing
//! worklist ends with no prime piece left. The ball case reduces to the
//! sphere case by coning the boundary sphere.

use std::ops::ControlFlow;

use crate::core::config::RecognitionConfig;
use crate::core::properties::DecisionProperty;
use crate::core::traits::normal_surfaces::NormalSurfaceSearch;
use crate::core::traits::triangulation::Triangulation3;
use crate::recognition::decomposition::crush_to_primes;
use crate::recognition::error::RecognitionError;

fn sphere_shaped<T: Triangulation3>(triangulation: &T) -> bool {
    triangulation.is_valid()
        && triangulation.is_closed()
        && triangulation.is_orientable()
        && triangulation.is_connected()
}

fn ball_shaped<T: Triangulation3>(triangulation: &T) -> bool {
    if !(triangulation.is_valid() && triangulation.is_orientable() && triangulation.is_connected())
    {
        return false;
    }
    matches!(
        triangulation.boundary_components().as_slice(),
        [only] if only.is_sphere() && !only.ideal
    )
}

/// Decide whether `triangulation` is a 3-sphere.
///
/// # Errors
///
/// See [`is_sphere_with_config`].
pub fn is_sphere<T: NormalSurfaceSearch>(triangulation: &T) -> Result<bool, RecognitionError> {
    is_sphere_with_config(triangulation, &RecognitionConfig::from_env())
}

/// Decide whether `triangulation` is a 3-sphere.
///
/// The empty triangulation answers `false` without touching the cache. Any
/// other input that is not valid, closed, orientable and connected answers
/// (and caches) `false`.
///
/// # Errors
///
/// Returns [`RecognitionError::UnsolvedCase`] if crushing produces an
/// invalid triangulation.
pub fn is_sphere_with_config<T: NormalSurfaceSearch>(
    triangulation: &T,
    config: &RecognitionConfig,
) -> Result<bool, RecognitionError> {
    let properties = triangulation.properties();
    if let Some(known) = properties.get(DecisionProperty::ThreeSphere) {
        return Ok(known);
    }
    if triangulation.is_empty() {
        return Ok(false);
    }
    if !sphere_shaped(triangulation) {
        return Ok(properties.record(DecisionProperty::ThreeSphere, false));
    }

    let mut working = triangulation.clone();
    working.intelligent_simplify();

    if working.fundamental_group_generators() == 0 {
        return Ok(properties.record(DecisionProperty::ThreeSphere, true));
    }
    if !working.homology().is_trivial() {
        return Ok(properties.record(DecisionProperty::ThreeSphere, false));
    }

    // A homology sphere: any prime piece that survives crushing is a
    // non-trivial summand.
    let outcome = crush_to_primes(working, config, |_prime| ControlFlow::Break(()))?;
    Ok(properties.record(DecisionProperty::ThreeSphere, outcome.is_continue()))
}

/// Whether [`is_sphere`] can answer without crushing, caching the answer if
/// one is found along the way.
pub fn knows_sphere<T: NormalSurfaceSearch>(triangulation: &T) -> bool {
    let properties = triangulation.properties();
    if properties.knows(DecisionProperty::ThreeSphere) || triangulation.is_empty() {
        return true;
    }
    if !sphere_shaped(triangulation) || !triangulation.homology().is_trivial() {
        properties.record(DecisionProperty::ThreeSphere, false);
        return true;
    }
    false
}

/// Decide whether `triangulation` is a 3-ball.
///
/// # Errors
///
/// See [`is_ball_with_config`].
pub fn is_ball<T: NormalSurfaceSearch>(triangulation: &T) -> Result<bool, RecognitionError> {
    is_ball_with_config(triangulation, &RecognitionConfig::from_env())
}

/// Decide whether `triangulation` is a 3-ball.
///
/// Requires a valid, orientable, connected triangulation with a single real
/// 2-sphere boundary component and trivial homology; anything else answers
/// (and caches) `false`. The boundary is then coned to a point and the result
/// tested with [`is_sphere_with_config`].
///
/// # Errors
///
/// Returns [`RecognitionError::UnsolvedCase`] if crushing produces an
/// invalid triangulation.
pub fn is_ball_with_config<T: NormalSurfaceSearch>(
    triangulation: &T,
    config: &RecognitionConfig,
) -> Result<bool, RecognitionError> {
    let properties = triangulation.properties();
    if let Some(known) = properties.get(DecisionProperty::ThreeBall) {
        return Ok(known);
    }
    if !ball_shaped(triangulation) || !triangulation.homology().is_trivial() {
        return Ok(properties.record(DecisionProperty::ThreeBall, false));
    }

    let mut coned = triangulation.clone();
    coned.intelligent_simplify();
    coned.finite_to_ideal();
    coned.intelligent_simplify();
    if config.trace {
        tracing::debug!(
            tetrahedra = coned.count_tetrahedra(),
            "testing coned ball for the 3-sphere"
        );
    }

    let answer = is_sphere_with_config(&coned, config)?;
    Ok(properties.record(DecisionProperty::ThreeBall, answer))
}

/// Whether [`is_ball`] can answer without crushing, caching the answer if one
/// is found along the way.
pub fn knows_ball<T: NormalSurfaceSearch>(triangulation: &T) -> bool {
    let properties = triangulation.properties();
    if properties.knows(DecisionProperty::ThreeBall) {
        return true;
    }
    if !ball_shaped(triangulation) || !triangulation.homology().is_trivial() {
        properties.record(DecisionProperty::ThreeBall, false);
        return true;
    }
    false
}
