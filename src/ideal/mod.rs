use std::fmt::{Debug, Display};
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ConfigurationError;
use crate::ring::*;
use crate::rings::zn::*;

///
/// Contains [`integer::IntegerPrimeIdeal`], the prime ideals `(p)` of `Z`.
///
pub mod integer;
///
/// Contains [`polynomial::PolyPrimeIdeal`], the prime ideals `(g)` of `Fp[t]`.
///
pub mod polynomial;
///
/// Contains [`number_field::NumberFieldPrimeIdeal`], the prime ideals of the equation
/// order `Z[θ]` of a number field.
///
pub mod number_field;

///
/// Trait for maximal ideals `P` of an order `O` (a Dedekind domain, or at least a ring that
/// is regular at `P`), that provides the data required to build the residue field `O/P` and
/// the reduction from the fraction field `Frac(O)` into it.
///
/// The quotient `O/P` is an `Fp`-vector space of dimension `n`, where `n` is the residue
/// class degree. The maps [`ResidueIdeal::to_vs()`] and [`ResidueIdeal::to_order()`] identify
/// it with `Fp^n`, w.r.t. a basis that is fixed by the ideal (and in general is not the
/// power basis of any generator).
///
/// Ideals are plain data, so two ideals compare equal if and only if they describe the same
/// prime of the same order.
///
pub trait ResidueIdeal: Clone + PartialEq + Eq + Hash + Debug + Display + Serialize + DeserializeOwned {

    ///
    /// The type of the order `O` containing this ideal.
    ///
    type Order: RingStore;

    ///
    /// The type of the fraction field of `O`.
    ///
    type FractionField: RingStore;

    fn order(&self) -> &Self::Order;

    fn fraction_field(&self) -> &Self::FractionField;

    ///
    /// Returns the characteristic `p` of the residue field, i.e. the prime with
    /// `P ∩ Z = pZ` resp. the characteristic of the base field.
    ///
    fn characteristic(&self) -> u64;

    fn prime_field(&self) -> PrimeField {
        PrimeField::new(self.characteristic())
    }

    ///
    /// Returns the dimension `n` of `O/P` over `Fp`.
    ///
    fn residue_class_degree(&self) -> usize;

    ///
    /// Checks whether this ideal is indeed a prime ideal. This might require
    /// factoring polynomials or integers, and thus be expensive.
    ///
    fn is_prime(&self) -> bool;

    ///
    /// Checks that the arithmetic of this ideal is supported, i.e. that the valuation
    /// and the related functions work correctly.
    ///
    fn check_supported(&self) -> Result<(), ConfigurationError> {
        Ok(())
    }

    ///
    /// The name of the generator of the order, used to derive the default name of the
    /// generator of the residue field.
    ///
    fn variable_name(&self) -> &str;

    ///
    /// Whether the residue field requires a basis change between `Fp^n` and the power basis
    /// of its generator. This is `false` only if `O/P` is a prime field that can be
    /// identified with `Fp` directly.
    ///
    fn requires_basis(&self) -> bool {
        true
    }

    ///
    /// Returns the distinguished generator of `O`, which is the preferred candidate for the
    /// generator of the residue field.
    ///
    fn generator(&self) -> El<Self::Order>;

    ///
    /// Maps `x` to the coordinate vector of `x mod P` in `Fp^n`.
    ///
    fn to_vs(&self, x: &El<Self::Order>) -> Vec<PrimeFieldEl>;

    ///
    /// Maps `x` to the coordinate vector of `x mod P` in `Fp^n`, if this can be done
    /// without knowing the valuation of `x`. This always succeeds if `x` is (the image of)
    /// an element of `O`, and may return `None` if the representation of `x` involves a
    /// denominator that is not a unit modulo `P`.
    ///
    fn try_to_vs(&self, x: &El<Self::FractionField>) -> Option<Vec<PrimeFieldEl>>;

    ///
    /// Returns an element of `O` whose coordinate vector modulo `P` is `v`.
    ///
    fn to_order(&self, v: &[PrimeFieldEl]) -> El<Self::Order>;

    ///
    /// The inclusion `O -> Frac(O)`.
    ///
    fn embed(&self, x: El<Self::Order>) -> El<Self::FractionField>;

    ///
    /// Returns `(a, d)` with `a, d in O`, `d != 0` and `x = a / d`.
    ///
    fn integral_split(&self, x: &El<Self::FractionField>) -> (El<Self::Order>, El<Self::Order>);

    ///
    /// Returns the `P`-adic valuation of `x`, or `None` if `x = 0`.
    ///
    fn valuation(&self, x: &El<Self::Order>) -> Option<usize>;

    ///
    /// Returns `x * u^k`, where `u` is a fixed element of `Frac(O)` of valuation `-1` at `P`
    /// and nonnegative valuation at all other primes above `p`. In particular, if `x` has
    /// valuation `k`, the result is a `P`-unit, and [`ResidueIdeal::try_to_vs()`] succeeds on it.
    ///
    fn divide_by_uniformizer_power(&self, x: El<Self::Order>, power: usize) -> El<Self::FractionField>;
}
