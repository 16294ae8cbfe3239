//! Method-call access to every recognizer.
//!
//! [`Recognize`] is implemented for every [`NormalSurfaceSearch`] backend, so
//! bringing it into scope (it is in the prelude) turns each free function of
//! this module tree into a method.
//!
//! # Examples
//!
//! ```rust
//! use crushing::prelude::*;
//!
//! let sphere = ModelTriangulation::three_sphere();
//! assert!(sphere.is_sphere().unwrap());
//! assert!(sphere.knows_sphere());
//! assert!(sphere.summands().unwrap().is_empty());
//! ```

use crate::core::config::RecognitionConfig;
use crate::core::traits::normal_surfaces::NormalSurfaceSearch;
use crate::recognition::error::RecognitionError;
use crate::recognition::{
    compressing_disc, decomposition, haken, irreducible, solid_torus, sphere,
};

/// Decision algorithms available on any triangulation backend.
///
/// Every `is_*`/`has_*` method reads its configuration from the environment;
/// the `*_with_config` variants take it explicitly.
pub trait Recognize: NormalSurfaceSearch {
    /// See [`sphere::is_sphere_with_config`].
    ///
    /// # Errors
    ///
    /// Returns [`RecognitionError::UnsolvedCase`] if crushing fails.
    fn is_sphere(&self) -> Result<bool, RecognitionError> {
        sphere::is_sphere(self)
    }

    /// See [`sphere::is_sphere_with_config`].
    ///
    /// # Errors
    ///
    /// Returns [`RecognitionError::UnsolvedCase`] if crushing fails.
    fn is_sphere_with_config(&self, config: &RecognitionConfig) -> Result<bool, RecognitionError> {
        sphere::is_sphere_with_config(self, config)
    }

    /// See [`sphere::knows_sphere`].
    fn knows_sphere(&self) -> bool {
        sphere::knows_sphere(self)
    }

    /// See [`sphere::is_ball_with_config`].
    ///
    /// # Errors
    ///
    /// Returns [`RecognitionError::UnsolvedCase`] if crushing fails.
    fn is_ball(&self) -> Result<bool, RecognitionError> {
        sphere::is_ball(self)
    }

    /// See [`sphere::is_ball_with_config`].
    ///
    /// # Errors
    ///
    /// Returns [`RecognitionError::UnsolvedCase`] if crushing fails.
    fn is_ball_with_config(&self, config: &RecognitionConfig) -> Result<bool, RecognitionError> {
        sphere::is_ball_with_config(self, config)
    }

    /// See [`sphere::knows_ball`].
    fn knows_ball(&self) -> bool {
        sphere::knows_ball(self)
    }

    /// See [`solid_torus::is_solid_torus_with_config`].
    ///
    /// # Errors
    ///
    /// Returns [`RecognitionError::UnsolvedCase`] if crushing fails.
    fn is_solid_torus(&self) -> Result<bool, RecognitionError> {
        solid_torus::is_solid_torus(self)
    }

    /// See [`solid_torus::is_solid_torus_with_config`].
    ///
    /// # Errors
    ///
    /// Returns [`RecognitionError::UnsolvedCase`] if crushing fails.
    fn is_solid_torus_with_config(
        &self,
        config: &RecognitionConfig,
    ) -> Result<bool, RecognitionError> {
        solid_torus::is_solid_torus_with_config(self, config)
    }

    /// See [`solid_torus::knows_solid_torus`].
    fn knows_solid_torus(&self) -> bool {
        solid_torus::knows_solid_torus(self)
    }

    /// See [`solid_torus::is_txi_with_config`].
    ///
    /// # Errors
    ///
    /// Returns [`RecognitionError::UnsolvedCase`] if crushing fails.
    fn is_txi(&self) -> Result<bool, RecognitionError> {
        solid_torus::is_txi(self)
    }

    /// See [`solid_torus::knows_txi`].
    fn knows_txi(&self) -> bool {
        solid_torus::knows_txi(self)
    }

    /// See [`irreducible::is_irreducible_with_config`].
    ///
    /// # Errors
    ///
    /// Returns [`RecognitionError::UnsolvedCase`] if crushing fails.
    fn is_irreducible(&self) -> Result<bool, RecognitionError> {
        irreducible::is_irreducible(self)
    }

    /// See [`irreducible::is_irreducible_with_config`].
    ///
    /// # Errors
    ///
    /// Returns [`RecognitionError::UnsolvedCase`] if crushing fails.
    fn is_irreducible_with_config(
        &self,
        config: &RecognitionConfig,
    ) -> Result<bool, RecognitionError> {
        irreducible::is_irreducible_with_config(self, config)
    }

    /// See [`irreducible::knows_irreducible`].
    fn knows_irreducible(&self) -> bool {
        irreducible::knows_irreducible(self)
    }

    /// See [`irreducible::is_zero_efficient`].
    fn is_zero_efficient(&self) -> bool {
        irreducible::is_zero_efficient(self)
    }

    /// See [`irreducible::knows_zero_efficient`].
    fn knows_zero_efficient(&self) -> bool {
        irreducible::knows_zero_efficient(self)
    }

    /// See [`haken::is_haken_with_config`].
    ///
    /// # Errors
    ///
    /// Propagates errors from the irreducibility and compressing-disc tests.
    fn is_haken(&self) -> Result<bool, RecognitionError> {
        haken::is_haken(self)
    }

    /// See [`haken::is_haken_with_config`].
    ///
    /// # Errors
    ///
    /// Propagates errors from the irreducibility and compressing-disc tests.
    fn is_haken_with_config(&self, config: &RecognitionConfig) -> Result<bool, RecognitionError> {
        haken::is_haken_with_config(self, config)
    }

    /// See [`haken::knows_haken`].
    fn knows_haken(&self) -> bool {
        haken::knows_haken(self)
    }

    /// See [`haken::is_incompressible_with_config`].
    ///
    /// # Errors
    ///
    /// Propagates errors from the compressing-disc searches.
    fn is_incompressible(&self, surface: &Self::Surface) -> Result<bool, RecognitionError> {
        haken::is_incompressible(self, surface)
    }

    /// See [`compressing_disc::has_compressing_disc_with_config`].
    ///
    /// # Errors
    ///
    /// Returns [`RecognitionError::UnsolvedCase`] or
    /// [`RecognitionError::Inconsistent`] if the crushing search fails.
    fn has_compressing_disc(&self) -> Result<bool, RecognitionError> {
        compressing_disc::has_compressing_disc(self)
    }

    /// See [`compressing_disc::has_compressing_disc_with_config`].
    ///
    /// # Errors
    ///
    /// Returns [`RecognitionError::UnsolvedCase`] or
    /// [`RecognitionError::Inconsistent`] if the crushing search fails.
    fn has_compressing_disc_with_config(
        &self,
        config: &RecognitionConfig,
    ) -> Result<bool, RecognitionError> {
        compressing_disc::has_compressing_disc_with_config(self, config)
    }

    /// See [`compressing_disc::knows_compressing_disc`].
    fn knows_compressing_disc(&self) -> bool {
        compressing_disc::knows_compressing_disc(self)
    }

    /// See [`compressing_disc::has_simple_compressing_disc`].
    fn has_simple_compressing_disc(&self) -> bool {
        compressing_disc::has_simple_compressing_disc(self)
    }

    /// See [`decomposition::summands_with_config`].
    ///
    /// # Errors
    ///
    /// Returns [`RecognitionError::Precondition`] for bounded, invalid or
    /// disconnected input, and [`RecognitionError::UnsolvedCase`] if crushing
    /// fails.
    fn summands(&self) -> Result<Vec<Self>, RecognitionError> {
        decomposition::summands(self)
    }

    /// See [`decomposition::summands_with_config`].
    ///
    /// # Errors
    ///
    /// Returns [`RecognitionError::Precondition`] for bounded, invalid or
    /// disconnected input, and [`RecognitionError::UnsolvedCase`] if crushing
    /// fails.
    fn summands_with_config(
        &self,
        config: &RecognitionConfig,
    ) -> Result<Vec<Self>, RecognitionError> {
        decomposition::summands_with_config(self, config)
    }
}

impl<T: NormalSurfaceSearch> Recognize for T {}
