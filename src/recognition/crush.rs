//! Crush, split and classify: the step shared by every crushing loop.
//!
//! A crushed triangulation may be disconnected. Its components are split
//! into independently owned triangulations straight away and, for the loops
//! that follow one interesting boundary component through repeated crushes
//! (solid torus recognition and the compressing-disc search), tagged by the
//! shape of their boundary.

use crate::core::traits::normal_surfaces::NormalSurfaceSearch;
use crate::core::traits::triangulation::{BoundaryComponent, Triangulation3};
use crate::recognition::error::RecognitionError;

/// Crush `surface` in `triangulation`, simplify, and split the result into
/// its non-empty connected components.
///
/// # Errors
///
/// Returns [`RecognitionError::UnsolvedCase`] if the crushed triangulation is
/// invalid.
pub(crate) fn crush_and_split<T>(
    triangulation: T,
    surface: &T::Surface,
) -> Result<Vec<T>, RecognitionError>
where
    T: NormalSurfaceSearch,
{
    let mut crushed = triangulation.crush(surface);
    if !crushed.is_valid() {
        tracing::warn!("crushed triangulation is invalid; abandoning the decomposition");
        return Err(RecognitionError::UnsolvedCase);
    }
    crushed.intelligent_simplify();
    Ok(crushed
        .into_components()
        .into_iter()
        .filter(|component| !component.is_empty())
        .collect())
}

/// Shape of one component left behind by a crush, relative to the boundary
/// component being tracked.
#[derive(Debug)]
pub(crate) enum CrushedComponent<T> {
    /// No boundary.
    Closed(T),
    /// A single 2-sphere boundary component.
    SphereBounded(T),
    /// A single boundary component of the tracked type.
    Matching(T),
    /// A single boundary component of some other type.
    OtherBoundary(T),
    /// More than one boundary component.
    MultiBoundary(T),
}

impl<T> CrushedComponent<T> {
    /// Short label for traces.
    pub(crate) const fn label(&self) -> &'static str {
        match self {
            Self::Closed(_) => "closed",
            Self::SphereBounded(_) => "sphere-bounded",
            Self::Matching(_) => "matching",
            Self::OtherBoundary(_) => "other-boundary",
            Self::MultiBoundary(_) => "multi-boundary",
        }
    }
}

/// Tag `component` by its boundary relative to `tracked`.
///
/// Only Euler characteristic and orientability are compared; whether the
/// boundary is real or ideal does not matter.
pub(crate) fn classify<T>(component: T, tracked: &BoundaryComponent) -> CrushedComponent<T>
where
    T: Triangulation3,
{
    let boundary = component.boundary_components();
    match boundary.as_slice() {
        [] => CrushedComponent::Closed(component),
        [only]
            if only.euler_char == tracked.euler_char && only.orientable == tracked.orientable =>
        {
            CrushedComponent::Matching(component)
        }
        [only] if only.is_sphere() => CrushedComponent::SphereBounded(component),
        [_] => CrushedComponent::OtherBoundary(component),
        _ => CrushedComponent::MultiBoundary(component),
    }
}
