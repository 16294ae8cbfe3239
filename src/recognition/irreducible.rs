//! Irreducibility and 0-efficiency.

use std::ops::ControlFlow;

use crate::core::config::RecognitionConfig;
use crate::core::properties::DecisionProperty;
use crate::core::traits::normal_surfaces::NormalSurfaceSearch;
use crate::core::traits::triangulation::Triangulation3;
use crate::recognition::decomposition::{HomologyDeficit, crush_to_primes};
use crate::recognition::error::RecognitionError;

fn closed_orientable<T: Triangulation3>(triangulation: &T) -> bool {
    triangulation.is_valid()
        && triangulation.is_closed()
        && triangulation.is_orientable()
        && triangulation.is_connected()
}

/// Decide whether the underlying manifold is irreducible.
///
/// # Errors
///
/// See [`is_irreducible_with_config`].
pub fn is_irreducible<T: NormalSurfaceSearch>(
    triangulation: &T,
) -> Result<bool, RecognitionError> {
    is_irreducible_with_config(triangulation, &RecognitionConfig::from_env())
}

/// Decide whether the underlying manifold is irreducible: every embedded
/// 2-sphere bounds a ball.
///
/// Runs the decomposition but stops as soon as a second prime summand is
/// kept. The erased summands are then counted from the homology deficit:
/// any missing rank means an S² × S¹ summand, and more than one summand in
/// total means a non-trivial connected sum.
///
/// Inputs that are not valid, closed, orientable and connected answer
/// `false` without touching the cache.
///
/// # Errors
///
/// Returns [`RecognitionError::UnsolvedCase`] if crushing produces an
/// invalid triangulation.
pub fn is_irreducible_with_config<T: NormalSurfaceSearch>(
    triangulation: &T,
    config: &RecognitionConfig,
) -> Result<bool, RecognitionError> {
    let properties = triangulation.properties();
    if let Some(known) = properties.get(DecisionProperty::Irreducible) {
        return Ok(known);
    }
    if !closed_orientable(triangulation) {
        return Ok(false);
    }

    let mut working = triangulation.clone();
    working.intelligent_simplify();
    let mut deficit = HomologyDeficit::of(&working.homology());
    let mut kept = 0_usize;

    let outcome = crush_to_primes(working, config, |prime| {
        kept += 1;
        if kept > 1 {
            return ControlFlow::Break(());
        }
        deficit.subtract(&prime.homology());
        ControlFlow::Continue(())
    })?;

    if outcome.is_break() {
        if config.trace {
            tracing::debug!("found a second prime summand");
        }
        return Ok(properties.record(DecisionProperty::Irreducible, false));
    }

    if deficit.rank > 0 || kept + deficit.missing_summands() > 1 {
        return Ok(properties.record(DecisionProperty::Irreducible, false));
    }
    if kept + deficit.missing_summands() == 0 {
        properties.record(DecisionProperty::ThreeSphere, true);
    }
    Ok(properties.record(DecisionProperty::Irreducible, true))
}

/// Whether the irreducibility of `triangulation` is already cached.
pub fn knows_irreducible<T: Triangulation3>(triangulation: &T) -> bool {
    triangulation
        .properties()
        .knows(DecisionProperty::Irreducible)
}

/// Decide whether this triangulation is 0-efficient: every normal sphere or
/// disc is vertex-linking.
///
/// Unlike the other recognizers this is a property of the triangulation,
/// not of the manifold, so it is tested as given without simplifying. A
/// triangulation with a 2-sphere boundary component is never 0-efficient.
pub fn is_zero_efficient<T: NormalSurfaceSearch>(triangulation: &T) -> bool {
    let properties = triangulation.properties();
    if let Some(known) = properties.get(DecisionProperty::ZeroEfficient) {
        return known;
    }
    if triangulation
        .boundary_components()
        .iter()
        .any(|boundary| boundary.is_sphere())
    {
        return properties.record(DecisionProperty::ZeroEfficient, false);
    }
    let answer = triangulation.non_trivial_sphere_or_disc().is_none();
    properties.record(DecisionProperty::ZeroEfficient, answer)
}

/// Whether the 0-efficiency of `triangulation` is already cached.
pub fn knows_zero_efficient<T: Triangulation3>(triangulation: &T) -> bool {
    triangulation
        .properties()
        .knows(DecisionProperty::ZeroEfficient)
}
