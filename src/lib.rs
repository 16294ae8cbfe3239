//! # crushing
//!
//! Decision algorithms for triangulated 3-manifolds, built on normal
//! surfaces and the Jaco–Rubinstein crushing procedure.
//!
//! # Features
//!
//! - 3-sphere and 3-ball recognition
//! - Prime decomposition of closed 3-manifolds, including the summands that
//!   crushing erases (S² × S¹, S² ×~ S¹, RP³, L(3,1)), recovered from a
//!   homology deficit
//! - Solid torus and T² × I recognition
//! - Irreducibility, 0-efficiency and Hakenness
//! - Compressing disc detection, with a skeletal fast path
//! - Per-triangulation caching of every answer, with logical implications
//!   recorded together (a 3-sphere is irreducible and not Haken, and so on)
//!
//! The algorithms are generic over the triangulation backend: anything that
//! implements [`Triangulation3`](core::traits::triangulation::Triangulation3)
//! and [`NormalSurfaceSearch`](core::traits::normal_surfaces::NormalSurfaceSearch)
//! gets every recognizer as a method through
//! [`Recognize`](recognition::recognize::Recognize). The crate ships a
//! symbolic backend, [`ModelTriangulation`](model::triangulation::ModelTriangulation),
//! which describes a triangulation by its connected-sum pieces.
//!
//! # Basic Usage
//!
//! ```rust
//! use crushing::prelude::*;
//!
//! // (S² × S¹) # L(7,2)
//! let tri = ModelTriangulation::connected_sum(&[
//!     Piece::SphereBundle,
//!     Piece::Lens { p: 7, q: 2 },
//! ])
//! .unwrap();
//!
//! assert!(!tri.is_sphere().unwrap());
//! assert!(!tri.is_irreducible().unwrap());
//!
//! // Crushing erases the S² × S¹ summand; the homology deficit puts it back.
//! let summands = tri.summands().unwrap();
//! assert_eq!(summands.len(), 2);
//!
//! // Answers are cached, together with what they imply.
//! assert!(tri.knows_sphere());
//! assert_eq!(tri.properties().get(DecisionProperty::ZeroEfficient), Some(false));
//! ```
//!
//! # Configuration
//!
//! Every recognizer reads a [`RecognitionConfig`](core::config::RecognitionConfig).
//! The plain methods take it from the environment (`CRUSHING_TRACE` turns on
//! per-iteration `tracing` output); the `*_with_config` variants take it
//! explicitly.
//!
//! ```rust
//! use crushing::prelude::*;
//!
//! let config = RecognitionConfigBuilder::default()
//!     .subdivide_multi_vertex(false)
//!     .build()
//!     .unwrap();
//! let solid_torus = ModelTriangulation::solid_torus().with_vertices(3);
//! assert!(solid_torus.is_solid_torus_with_config(&config).unwrap());
//! ```

// Forbid unsafe code throughout the entire crate
#![forbid(unsafe_code)]

#[macro_use]
extern crate derive_builder;

/// Contracts consumed by the recognizers, and the data they exchange.
///
/// The triangulation and normal-surface traits describe what a backend must
/// provide. Homology groups, the property cache and the configuration are
/// shared by every algorithm.
pub mod core {
    pub mod config;
    pub mod homology;
    pub mod properties;
    /// Backend traits.
    pub mod traits {
        pub mod normal_surfaces;
        pub mod triangulation;
        pub use normal_surfaces::*;
        pub use triangulation::*;
    }
    pub use config::*;
    pub use homology::*;
    pub use properties::*;
    pub use traits::*;
}

/// Topological bookkeeping shared by the algorithms and the model backend.
pub mod topology {
    /// Topological characteristics of simplicial complexes.
    pub mod characteristics {
        /// Euler characteristic and closed surface classification
        pub mod euler;
    }
}

/// The decision algorithms.
pub mod recognition {
    pub mod compressing_disc;
    mod crush;
    pub mod decomposition;
    pub mod error;
    pub mod haken;
    pub mod irreducible;
    pub mod recognize;
    pub mod solid_torus;
    pub mod sphere;
    pub use error::RecognitionError;
    pub use recognize::Recognize;
}

/// A symbolic triangulation backend described by connected-sum pieces.
pub mod model {
    pub mod piece;
    pub mod surface;
    pub mod triangulation;
    pub use piece::*;
    pub use surface::*;
    pub use triangulation::*;
}

/// A prelude module that re-exports commonly used types.
/// This makes it easier to import the most commonly used items from the crate.
pub mod prelude {
    pub use crate::core::{
        config::*,
        homology::*,
        properties::*,
        traits::{normal_surfaces::*, triangulation::*},
    };

    pub use crate::model::{piece::*, surface::*, triangulation::*};

    pub use crate::recognition::{
        decomposition::HomologyDeficit, error::RecognitionError, recognize::Recognize,
    };

    pub use crate::topology::characteristics::euler::*;
}

/// The function `is_normal` checks that structs implement `auto` traits.
/// Traits are checked at compile time, so this function is only used for
/// testing.
#[must_use]
pub const fn is_normal<T: Sized + Send + Sync + Unpin>() -> bool {
    true
}

// =============================================================================
// TESTS
// =============================================================================
