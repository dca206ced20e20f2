use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::algorithms;
use crate::divisibility::DivisibilityRing;
use crate::field::Field;
use crate::ring::*;
use crate::rings::finite::FiniteRing;
use crate::serialization::SerializableElementRing;

///
/// The prime field `Fp = Z/pZ` for a prime `p < 2^64`.
///
/// Elements are stored as their smallest nonnegative representative, and
/// products are computed in `u128`, so no further restriction on `p` is necessary.
///
/// # Example
/// ```rust
/// # use residue_fields::assert_el_eq;
/// # use residue_fields::ring::*;
/// # use residue_fields::field::*;
/// # use residue_fields::rings::zn::*;
/// let Fp = PrimeField::new(17);
/// let x = Fp.from_int(5);
/// assert_el_eq!(Fp, Fp.one(), Fp.mul(Fp.invert(&x), x));
/// assert_eq!(4, Fp.smallest_positive_lift(&Fp.get_ring().from_i128(21)));
/// ```
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct PrimeFieldBase {
    modulus: u64
}

///
/// An element of [`PrimeField`].
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct PrimeFieldEl(u64);

///
/// [`RingStore`] corresponding to [`PrimeFieldBase`].
///
pub type PrimeField = RingValue<PrimeFieldBase>;

impl PrimeField {

    ///
    /// Creates the prime field of the given characteristic.
    ///
    /// It is the responsibility of the caller to ensure that `p` is prime;
    /// this is only checked in debug builds.
    ///
    pub fn new(p: u64) -> Self {
        assert!(p >= 2);
        debug_assert!(algorithms::miller_rabin::is_prime(p as u128, 10));
        RingValue::from(PrimeFieldBase { modulus: p })
    }

    pub fn modulus(&self) -> u64 {
        self.get_ring().modulus
    }

    ///
    /// Returns the representative of `x` in `{0, ..., p - 1}`.
    ///
    pub fn smallest_positive_lift(&self, x: &PrimeFieldEl) -> u64 {
        x.0
    }

    ///
    /// Returns the representative of `x` in `{-p/2, ..., p/2}`.
    ///
    pub fn smallest_lift(&self, x: &PrimeFieldEl) -> i128 {
        if x.0 as u128 * 2 > self.modulus() as u128 { x.0 as i128 - self.modulus() as i128 } else { x.0 as i128 }
    }
}

impl PrimeFieldBase {

    pub fn from_i128(&self, x: i128) -> PrimeFieldEl {
        PrimeFieldEl(x.rem_euclid(self.modulus as i128) as u64)
    }

    pub fn from_u128(&self, x: u128) -> PrimeFieldEl {
        PrimeFieldEl((x % self.modulus as u128) as u64)
    }

    fn inv(&self, x: u64) -> u64 {
        assert!(x != 0, "division by zero");
        let (mut a, mut b) = (x as i128, self.modulus as i128);
        let (mut sa, mut sb) = (1i128, 0i128);
        while b != 0 {
            let q = a / b;
            (a, b) = (b, a - q * b);
            (sa, sb) = (sb, sa - q * sb);
        }
        debug_assert!(a == 1);
        return sa.rem_euclid(self.modulus as i128) as u64;
    }
}

impl RingBase for PrimeFieldBase {

    type Element = PrimeFieldEl;

    fn clone_el(&self, val: &Self::Element) -> Self::Element {
        *val
    }

    fn add_assign(&self, lhs: &mut Self::Element, rhs: Self::Element) {
        lhs.0 = ((lhs.0 as u128 + rhs.0 as u128) % self.modulus as u128) as u64;
    }

    fn negate_inplace(&self, lhs: &mut Self::Element) {
        if lhs.0 != 0 {
            lhs.0 = self.modulus - lhs.0;
        }
    }

    fn mul_assign(&self, lhs: &mut Self::Element, rhs: Self::Element) {
        lhs.0 = ((lhs.0 as u128 * rhs.0 as u128) % self.modulus as u128) as u64;
    }

    fn from_int(&self, value: i32) -> Self::Element {
        self.from_i128(value as i128)
    }

    fn eq_el(&self, lhs: &Self::Element, rhs: &Self::Element) -> bool {
        lhs.0 == rhs.0
    }

    fn is_zero(&self, value: &Self::Element) -> bool {
        value.0 == 0
    }

    fn is_commutative(&self) -> bool { true }
    fn is_noetherian(&self) -> bool { true }

    fn dbg<'a>(&self, value: &Self::Element, out: &mut std::fmt::Formatter<'a>) -> std::fmt::Result {
        write!(out, "{}", value.0)
    }
}

impl DivisibilityRing for PrimeFieldBase {

    fn checked_left_div(&self, lhs: &Self::Element, rhs: &Self::Element) -> Option<Self::Element> {
        if lhs.0 == 0 {
            Some(PrimeFieldEl(0))
        } else if rhs.0 == 0 {
            None
        } else {
            Some(self.mul(*lhs, PrimeFieldEl(self.inv(rhs.0))))
        }
    }
}

impl Field for PrimeFieldBase {}

impl FiniteRing for PrimeFieldBase {

    fn random_element<G: FnMut() -> u64>(&self, mut rng: G) -> Self::Element {
        self.from_u128(((rng() as u128) << 64) | rng() as u128)
    }

    fn size(&self) -> Option<u128> {
        Some(self.modulus as u128)
    }

    fn elements<'a>(&'a self) -> Box<dyn 'a + Iterator<Item = Self::Element>> {
        Box::new((0..self.modulus).map(PrimeFieldEl))
    }
}

impl SerializableElementRing for PrimeFieldBase {

    fn deserialize<'de, D>(&self, deserializer: D) -> Result<Self::Element, D::Error>
        where D: Deserializer<'de>
    {
        let value = <u64 as Deserialize>::deserialize(deserializer)?;
        if value >= self.modulus {
            return Err(serde::de::Error::custom(format!("{} is not reduced modulo {}", value, self.modulus)));
        }
        return Ok(PrimeFieldEl(value));
    }

    fn serialize<S>(&self, el: &Self::Element, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        <u64 as Serialize>::serialize(&el.0, serializer)
    }
}

#[cfg(test)]
use crate::field::FieldStore;
#[cfg(test)]
use crate::rings::finite::FiniteRingStore;

#[test]
fn test_ring_axioms() {
    let Fp = PrimeField::new(17);
    crate::ring::generic_tests::test_ring_axioms(Fp, Fp.elements());
    crate::field::generic_tests::test_field_axioms(Fp, Fp.elements());
    crate::rings::finite::generic_tests::test_finite_ring_axioms(&Fp);
}

#[test]
fn test_large_modulus() {
    let Fp = PrimeField::new(18446744073709551557);
    let x = Fp.get_ring().from_i128(-2);
    assert_eq!(18446744073709551555, Fp.smallest_positive_lift(&x));
    assert_eq!(-2, Fp.smallest_lift(&x));
    assert_el_eq!(Fp, Fp.from_int(4), Fp.mul_ref(&x, &x));
    assert_el_eq!(Fp, Fp.one(), Fp.mul_ref(&x, &Fp.invert(&x)));
}

#[test]
fn test_serialization() {
    let Fp = PrimeField::new(17);
    crate::serialization::generic_tests::test_serialization(Fp, Fp.elements());
}
