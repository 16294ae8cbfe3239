//! Finitely generated abelian groups, as returned by homology computations.
//!
//! Homology itself is computed by the triangulation backend; the recognition
//! algorithms only read the result. A group is stored in invariant-factor
//! form ℤ^r ⊕ ℤ_{d₁} ⊕ … ⊕ ℤ_{d_k} with `1 < d₁ | d₂ | … | d_k`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Inline capacity for invariant factors; 3-manifold groups seen in practice
/// rarely carry more than a handful of torsion summands.
const INLINE_FACTORS: usize = 4;

/// A finitely generated abelian group ℤ^rank ⊕ (torsion).
///
/// # Examples
///
/// ```rust
/// use crushing::core::homology::AbelianGroup;
///
/// // H₁(ℝP³ # ℝP³ # L(3,1)) = ℤ₂ ⊕ ℤ₂ ⊕ ℤ₃ ≅ ℤ₂ ⊕ ℤ₆
/// let group = AbelianGroup::from_cyclic(0, &[2, 2, 3]);
/// assert_eq!(group.invariant_factors(), &[2, 6]);
/// assert_eq!(group.torsion_rank(2), 2);
/// assert_eq!(group.torsion_rank(3), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbelianGroup {
    rank: usize,
    invariant_factors: SmallVec<[u64; INLINE_FACTORS]>,
}

impl AbelianGroup {
    /// The trivial group.
    #[must_use]
    pub fn trivial() -> Self {
        Self::default()
    }

    /// The free abelian group ℤ^rank.
    #[must_use]
    pub fn free(rank: usize) -> Self {
        Self {
            rank,
            invariant_factors: SmallVec::new(),
        }
    }

    /// Build a group ℤ^rank ⊕ ℤ_{c₁} ⊕ … from arbitrary cyclic orders.
    ///
    /// Orders 0 contribute to the rank, orders 1 are dropped, and the result
    /// is normalised to invariant-factor form.
    #[must_use]
    pub fn from_cyclic(rank: usize, orders: &[u64]) -> Self {
        let mut group = Self::free(rank);
        for &order in orders {
            group.add_cyclic(order);
        }
        group
    }

    /// Add a cyclic summand ℤ_order (ℤ when `order == 0`).
    pub fn add_cyclic(&mut self, order: u64) {
        match order {
            0 => self.rank += 1,
            1 => {}
            _ => {
                // Split into prime powers, merge, then rebuild invariant factors.
                let mut powers = self.prime_powers();
                powers.extend(prime_powers_of(order));
                self.invariant_factors = invariant_factors_from(powers);
            }
        }
    }

    /// Direct sum with another group (homology of a connected sum).
    #[must_use]
    pub fn direct_sum(&self, other: &Self) -> Self {
        let mut powers = self.prime_powers();
        powers.extend(other.prime_powers());
        Self {
            rank: self.rank + other.rank,
            invariant_factors: invariant_factors_from(powers),
        }
    }

    /// Free rank.
    #[must_use]
    pub const fn rank(&self) -> usize {
        self.rank
    }

    /// Invariant factors `d₁ | d₂ | …`, all greater than 1.
    #[must_use]
    pub fn invariant_factors(&self) -> &[u64] {
        &self.invariant_factors
    }

    /// Number of invariant factors divisible by `p`, i.e. the rank of the
    /// `p`-primary part as a vector space over ℤ_p.
    #[must_use]
    pub fn torsion_rank(&self, p: u64) -> usize {
        if p < 2 {
            return 0;
        }
        self.invariant_factors.iter().filter(|&&d| d % p == 0).count()
    }

    /// Returns `true` for the trivial group.
    #[must_use]
    pub fn is_trivial(&self) -> bool {
        self.rank == 0 && self.invariant_factors.is_empty()
    }

    /// Returns `true` if the group is infinite cyclic.
    #[must_use]
    pub fn is_z(&self) -> bool {
        self.rank == 1 && self.invariant_factors.is_empty()
    }

    /// Returns `true` if the group is free abelian of the given rank.
    #[must_use]
    pub fn is_free(&self, rank: usize) -> bool {
        self.rank == rank && self.invariant_factors.is_empty()
    }

    fn prime_powers(&self) -> Vec<(u64, u64)> {
        self.invariant_factors
            .iter()
            .flat_map(|&d| prime_powers_of(d))
            .collect()
    }
}

impl std::fmt::Display for AbelianGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_trivial() {
            return write!(f, "0");
        }
        let mut parts = Vec::new();
        match self.rank {
            0 => {}
            1 => parts.push("Z".to_string()),
            r => parts.push(format!("{r} Z")),
        }
        parts.extend(self.invariant_factors.iter().map(|d| format!("Z_{d}")));
        write!(f, "{}", parts.join(" + "))
    }
}

/// Factor `n > 1` into `(prime, prime power)` pairs.
fn prime_powers_of(mut n: u64) -> Vec<(u64, u64)> {
    let mut out = Vec::new();
    let mut p = 2;
    while p * p <= n {
        if n % p == 0 {
            let mut power = 1;
            while n % p == 0 {
                n /= p;
                power *= p;
            }
            out.push((p, power));
        }
        p += 1;
    }
    if n > 1 {
        out.push((n, n));
    }
    out
}

/// Rebuild invariant factors from the multiset of elementary divisors.
fn invariant_factors_from(mut powers: Vec<(u64, u64)>) -> SmallVec<[u64; INLINE_FACTORS]> {
    // Largest powers first within each prime; the i-th largest power of every
    // prime goes into the i-th largest invariant factor.
    powers.sort_unstable_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));
    let mut factors: Vec<u64> = Vec::new();
    let mut index = 0;
    let mut current_prime = 0;
    for (prime, power) in powers {
        if prime != current_prime {
            current_prime = prime;
            index = 0;
        }
        if index == factors.len() {
            factors.push(1);
        }
        factors[index] *= power;
        index += 1;
    }
    factors.reverse();
    factors.into_iter().collect()
}
