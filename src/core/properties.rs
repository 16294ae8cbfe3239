//! Cached decision properties attached to a triangulation.
//!
//! Every recognizer answer is stored here once computed. A stored value is
//! authoritative: it is never recomputed and never overwritten by a
//! contradicting value. Recording one property through
//! [`PropertyCache::record`] also records every property it logically
//! implies, in the same call.
//!
//! Most properties describe the manifold and survive any change of
//! triangulation. [`DecisionProperty::ZeroEfficient`] describes the
//! triangulation itself; backends drop it with
//! [`PropertyCache::forget_triangulation_dependent`] whenever they modify a
//! triangulation in place.
//!
//! Each slot is a [`OnceLock`], so a cache can be filled through a shared
//! reference and a triangulation carrying it stays `Send + Sync`.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// A decision property that can be cached on a triangulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionProperty {
    /// The triangulation is a 3-sphere.
    ThreeSphere,
    /// The triangulation is a 3-ball.
    ThreeBall,
    /// The triangulation is a solid torus.
    SolidTorus,
    /// The triangulation is the product T² × I.
    TxI,
    /// The underlying manifold is irreducible.
    Irreducible,
    /// The triangulation is 0-efficient.
    ZeroEfficient,
    /// The underlying manifold is Haken.
    Haken,
    /// The underlying manifold has a compressing disc.
    CompressingDisc,
}

impl DecisionProperty {
    /// All properties, in storage order.
    pub const ALL: [Self; 8] = [
        Self::ThreeSphere,
        Self::ThreeBall,
        Self::SolidTorus,
        Self::TxI,
        Self::Irreducible,
        Self::ZeroEfficient,
        Self::Haken,
        Self::CompressingDisc,
    ];

    /// The property depends on the triangulation, not only on the manifold.
    #[must_use]
    pub const fn depends_on_triangulation(self) -> bool {
        matches!(self, Self::ZeroEfficient)
    }

    /// Properties forced by recording `self = value`.
    #[must_use]
    pub const fn implications(self, value: bool) -> &'static [(Self, bool)] {
        match (self, value) {
            (Self::ThreeSphere, true) => &[(Self::Irreducible, true), (Self::Haken, false)],
            (Self::Irreducible, false) => {
                &[(Self::ThreeSphere, false), (Self::ZeroEfficient, false)]
            }
            (Self::Haken, true) => &[(Self::Irreducible, true), (Self::ThreeSphere, false)],
            (Self::ThreeBall, true) => &[
                (Self::CompressingDisc, false),
                (Self::SolidTorus, false),
                (Self::TxI, false),
            ],
            (Self::SolidTorus, true) => &[
                (Self::ThreeBall, false),
                (Self::CompressingDisc, true),
                (Self::TxI, false),
            ],
            (Self::TxI, true) => &[
                (Self::ThreeBall, false),
                (Self::SolidTorus, false),
                (Self::CompressingDisc, false),
            ],
            (Self::CompressingDisc, true) => &[(Self::ThreeBall, false), (Self::TxI, false)],
            _ => &[],
        }
    }
}

/// Per-triangulation store of decision properties.
///
/// # Examples
///
/// ```rust
/// use crushing::core::properties::{DecisionProperty, PropertyCache};
///
/// let cache = PropertyCache::default();
/// cache.record(DecisionProperty::ThreeSphere, true);
///
/// // Implied facts are recorded together with the triggering one.
/// assert_eq!(cache.get(DecisionProperty::Irreducible), Some(true));
/// assert_eq!(cache.get(DecisionProperty::Haken), Some(false));
///
/// // A stored value is never contradicted.
/// assert!(cache.record(DecisionProperty::ThreeSphere, false));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PropertyCache {
    three_sphere: OnceLock<bool>,
    three_ball: OnceLock<bool>,
    solid_torus: OnceLock<bool>,
    txi: OnceLock<bool>,
    irreducible: OnceLock<bool>,
    zero_efficient: OnceLock<bool>,
    haken: OnceLock<bool>,
    compressing_disc: OnceLock<bool>,
}

impl PropertyCache {
    const fn slot(&self, property: DecisionProperty) -> &OnceLock<bool> {
        match property {
            DecisionProperty::ThreeSphere => &self.three_sphere,
            DecisionProperty::ThreeBall => &self.three_ball,
            DecisionProperty::SolidTorus => &self.solid_torus,
            DecisionProperty::TxI => &self.txi,
            DecisionProperty::Irreducible => &self.irreducible,
            DecisionProperty::ZeroEfficient => &self.zero_efficient,
            DecisionProperty::Haken => &self.haken,
            DecisionProperty::CompressingDisc => &self.compressing_disc,
        }
    }

    /// The cached value of `property`, if known.
    #[must_use]
    pub fn get(&self, property: DecisionProperty) -> Option<bool> {
        self.slot(property).get().copied()
    }

    /// Returns `true` if `property` has been cached.
    #[must_use]
    pub fn knows(&self, property: DecisionProperty) -> bool {
        self.get(property).is_some()
    }

    /// Record `property = value` together with everything it implies, and
    /// return the authoritative value.
    ///
    /// If the property is already known, the stored value wins and is
    /// returned; a disagreeing `value` is reported as a defect.
    pub fn record(&self, property: DecisionProperty, value: bool) -> bool {
        let stored = self.store(property, value);
        if stored == value {
            for &(implied, implied_value) in property.implications(value) {
                self.store(implied, implied_value);
            }
        }
        stored
    }

    fn store(&self, property: DecisionProperty, value: bool) -> bool {
        let stored = *self.slot(property).get_or_init(|| value);
        if stored != value {
            tracing::error!(
                ?property,
                stored,
                attempted = value,
                "refusing to overwrite a cached decision property with a contradicting value"
            );
        }
        stored
    }

    /// Drop every property that describes the triangulation rather than the
    /// manifold, keeping whatever the remaining manifold facts still imply.
    ///
    /// Call after any in-place change of the triangulation.
    pub fn forget_triangulation_dependent(&mut self) {
        for property in DecisionProperty::ALL {
            if property.depends_on_triangulation() {
                self.slot_mut(property).take();
            }
        }
        // A reducible manifold has no 0-efficient triangulation.
        if self.get(DecisionProperty::Irreducible) == Some(false) {
            self.store(DecisionProperty::ZeroEfficient, false);
        }
    }

    fn slot_mut(&mut self, property: DecisionProperty) -> &mut OnceLock<bool> {
        match property {
            DecisionProperty::ThreeSphere => &mut self.three_sphere,
            DecisionProperty::ThreeBall => &mut self.three_ball,
            DecisionProperty::SolidTorus => &mut self.solid_torus,
            DecisionProperty::TxI => &mut self.txi,
            DecisionProperty::Irreducible => &mut self.irreducible,
            DecisionProperty::ZeroEfficient => &mut self.zero_efficient,
            DecisionProperty::Haken => &mut self.haken,
            DecisionProperty::CompressingDisc => &mut self.compressing_disc,
        }
    }

    /// Snapshot of every known property.
    #[must_use]
    pub fn snapshot(&self) -> PropertySnapshot {
        PropertySnapshot {
            known: DecisionProperty::ALL
                .iter()
                .filter_map(|&p| self.get(p).map(|v| (p, v)))
                .collect(),
        }
    }
}

/// Serializable record of the properties known at some point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySnapshot {
    /// Known `(property, value)` pairs in [`DecisionProperty::ALL`] order.
    pub known: Vec<(DecisionProperty, bool)>,
}

impl PropertySnapshot {
    /// Look up a property in the snapshot.
    #[must_use]
    pub fn get(&self, property: DecisionProperty) -> Option<bool> {
        self.known
            .iter()
            .find_map(|&(p, v)| (p == property).then_some(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cache_knows_nothing() {
        let cache = PropertyCache::default();
        for property in DecisionProperty::ALL {
            assert!(!cache.knows(property));
        }
        assert!(cache.snapshot().known.is_empty());
    }

    #[test]
    fn test_reducible_implies_not_sphere_and_not_zero_efficient() {
        let cache = PropertyCache::default();
        assert!(!cache.record(DecisionProperty::Irreducible, false));
        assert_eq!(cache.get(DecisionProperty::ThreeSphere), Some(false));
        assert_eq!(cache.get(DecisionProperty::ZeroEfficient), Some(false));
        // Hakenness is undefined for reducible manifolds.
        assert_eq!(cache.get(DecisionProperty::Haken), None);
    }

    #[test]
    fn test_haken_implies_irreducible_and_not_sphere() {
        let cache = PropertyCache::default();
        cache.record(DecisionProperty::Haken, true);
        assert_eq!(cache.get(DecisionProperty::Irreducible), Some(true));
        assert_eq!(cache.get(DecisionProperty::ThreeSphere), Some(false));
    }

    #[test]
    fn test_negative_facts_imply_nothing() {
        let cache = PropertyCache::default();
        cache.record(DecisionProperty::ThreeSphere, false);
        cache.record(DecisionProperty::SolidTorus, false);
        assert_eq!(cache.snapshot().known.len(), 2);
    }

    #[test]
    fn test_implications_do_not_override_known_values() {
        let cache = PropertyCache::default();
        cache.record(DecisionProperty::Irreducible, true);
        cache.record(DecisionProperty::ThreeSphere, true);
        assert_eq!(cache.get(DecisionProperty::Irreducible), Some(true));
        assert_eq!(cache.get(DecisionProperty::Haken), Some(false));
    }

    #[test]
    fn test_clone_preserves_known_values() {
        let cache = PropertyCache::default();
        cache.record(DecisionProperty::SolidTorus, true);
        let copy = cache.clone();
        assert_eq!(copy.get(DecisionProperty::CompressingDisc), Some(true));
        assert_eq!(copy.get(DecisionProperty::ThreeBall), Some(false));
    }

    #[test]
    fn test_forget_drops_only_triangulation_facts() {
        let mut cache = PropertyCache::default();
        cache.record(DecisionProperty::ZeroEfficient, true);
        cache.record(DecisionProperty::SolidTorus, false);
        cache.forget_triangulation_dependent();
        assert_eq!(cache.get(DecisionProperty::ZeroEfficient), None);
        assert_eq!(cache.get(DecisionProperty::SolidTorus), Some(false));

        let mut reducible = PropertyCache::default();
        reducible.record(DecisionProperty::Irreducible, false);
        reducible.forget_triangulation_dependent();
        assert_eq!(reducible.get(DecisionProperty::ZeroEfficient), Some(false));
    }

    #[test]
    fn test_snapshot_serializes() {
        let cache = PropertyCache::default();
        cache.record(DecisionProperty::ThreeBall, true);
        let snapshot = cache.snapshot();
        assert_eq!(snapshot.get(DecisionProperty::ThreeBall), Some(true));
        assert_eq!(snapshot.get(DecisionProperty::CompressingDisc), Some(false));

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: PropertySnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
