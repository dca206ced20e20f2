use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::algorithms;
use crate::divisibility::DivisibilityRing;
use crate::field::Field;
use crate::ring::*;
use crate::rings::finite::FiniteRing;
use crate::rings::poly::dbg_poly;
use crate::rings::zn::*;
use crate::serialization::SerializableElementRing;

use super::{FiniteFieldBackend, BINARY_FIELD_MAX_DEGREE};

///
/// The finite field `F(2^n)` for `n <= 127`, whose elements are stored as bitfields
/// of their coefficients w.r.t. the power basis `1, a, ..., a^(n - 1)`.
///
/// Addition is xor, and multiplication is performed by shift-and-add, reducing modulo
/// the minimal polynomial of `a` after each shift.
///
/// # Example
/// ```rust
/// # use residue_fields::assert_el_eq;
/// # use residue_fields::ring::*;
/// # use residue_fields::rings::zn::*;
/// # use residue_fields::rings::finite_field::*;
/// # use residue_fields::rings::finite_field::binary::*;
/// let F2 = PrimeField::new(2);
/// // F8 = F2[a]/(a^3 + a + 1)
/// let F8 = BinaryField::new(F2, vec![F2.one(), F2.one(), F2.zero(), F2.one()], "a");
/// let a = F8.from_coefficients(&[F2.zero(), F2.one()]);
/// assert_el_eq!(F8, F8.add_ref(&a, &F8.one()), F8.pow(a, 3));
/// ```
///
#[derive(Clone, PartialEq, Eq)]
pub struct BinaryFieldBase {
    prime_field: PrimeField,
    degree: usize,
    // the non-leading coefficients of the modulus
    reduction: u128,
    name: String
}

///
/// [`RingStore`] corresponding to [`BinaryFieldBase`].
///
pub type BinaryField = RingValue<BinaryFieldBase>;

///
/// An element of [`BinaryField`].
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BinaryFieldEl(u128);

impl BinaryField {

    ///
    /// Creates the field `F2[X]/(f)`, where `f` is the given monic irreducible polynomial,
    /// whose coefficients start with the constant one.
    ///
    pub fn new(prime_field: PrimeField, modulus: Vec<PrimeFieldEl>, name: &str) -> Self {
        RingValue::from(BinaryFieldBase::new(prime_field, modulus, name))
    }
}

impl BinaryFieldBase {

    pub fn new(prime_field: PrimeField, modulus: Vec<PrimeFieldEl>, name: &str) -> Self {
        assert_eq!(2, prime_field.modulus());
        let degree = modulus.len() - 1;
        assert!(degree >= 1 && degree <= BINARY_FIELD_MAX_DEGREE);
        assert!(prime_field.is_one(&modulus[degree]), "modulus must be monic");
        let reduction = modulus[..degree].iter().enumerate()
            .filter(|(_, c)| !prime_field.is_zero(c))
            .fold(0, |current, (i, _)| current | (1 << i));
        let result = BinaryFieldBase { prime_field, degree, reduction, name: name.to_owned() };
        debug_assert!(result.frobenius_fixes_generator(), "modulus is not irreducible");
        return result;
    }

    fn mask(&self) -> u128 {
        (1 << self.degree) - 1
    }

    fn mul_by_generator(&self, x: u128) -> u128 {
        let carry = (x >> (self.degree - 1)) & 1;
        let shifted = (x << 1) & self.mask();
        if carry == 1 { shifted ^ self.reduction } else { shifted }
    }

    fn mul_bits(&self, lhs: u128, mut rhs: u128) -> u128 {
        let mut result = 0;
        let mut current = lhs;
        while rhs != 0 {
            if rhs & 1 == 1 {
                result ^= current;
            }
            rhs >>= 1;
            current = self.mul_by_generator(current);
        }
        return result;
    }

    fn pow_bits(&self, x: u128, power: u128) -> u128 {
        algorithms::sqr_mul::generic_abs_square_and_multiply(x, power, |a| self.mul_bits(a, a), |x, a| self.mul_bits(*x, a), 1)
    }

    ///
    /// Checks that `a^(2^n) = a`, which is necessary for the modulus to be irreducible.
    ///
    fn frobenius_fixes_generator(&self) -> bool {
        let generator = if self.degree == 1 { self.reduction } else { 2 };
        let mut current = generator;
        for _ in 0..self.degree {
            current = self.mul_bits(current, current);
        }
        return current == generator;
    }
}

impl RingBase for BinaryFieldBase {

    type Element = BinaryFieldEl;

    fn clone_el(&self, val: &Self::Element) -> Self::Element {
        *val
    }

    fn add_assign(&self, lhs: &mut Self::Element, rhs: Self::Element) {
        lhs.0 ^= rhs.0;
    }

    fn negate_inplace(&self, _lhs: &mut Self::Element) {}

    fn mul_assign(&self, lhs: &mut Self::Element, rhs: Self::Element) {
        lhs.0 = self.mul_bits(lhs.0, rhs.0);
    }

    fn from_int(&self, value: i32) -> Self::Element {
        BinaryFieldEl((value & 1) as u128)
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
        dbg_poly(&self.coefficients(value), &self.prime_field, &self.name, out)
    }
}

impl DivisibilityRing for BinaryFieldBase {

    fn checked_left_div(&self, lhs: &Self::Element, rhs: &Self::Element) -> Option<Self::Element> {
        if lhs.0 == 0 {
            Some(*lhs)
        } else if rhs.0 == 0 {
            None
        } else {
            // the unit group has order 2^n - 1
            let inverse = self.pow_bits(rhs.0, (1 << self.degree) - 2);
            Some(BinaryFieldEl(self.mul_bits(lhs.0, inverse)))
        }
    }
}

impl Field for BinaryFieldBase {}

impl FiniteRing for BinaryFieldBase {

    fn random_element<G: FnMut() -> u64>(&self, mut rng: G) -> Self::Element {
        BinaryFieldEl((((rng() as u128) << 64) | rng() as u128) & self.mask())
    }

    fn size(&self) -> Option<u128> {
        Some(1 << self.degree)
    }

    fn elements<'a>(&'a self) -> Box<dyn 'a + Iterator<Item = Self::Element>> {
        Box::new((0..=self.mask()).map(BinaryFieldEl))
    }
}

impl FiniteFieldBackend for BinaryFieldBase {

    fn prime_field(&self) -> PrimeField {
        self.prime_field
    }

    fn degree(&self) -> usize {
        self.degree
    }

    fn from_coefficients(&self, coefficients: &[PrimeFieldEl]) -> Self::Element {
        assert!(coefficients.len() <= self.degree);
        BinaryFieldEl(coefficients.iter().enumerate()
            .filter(|(_, c)| !self.prime_field.is_zero(c))
            .fold(0, |current, (i, _)| current | (1 << i)))
    }

    fn coefficients(&self, x: &Self::Element) -> Vec<PrimeFieldEl> {
        (0..self.degree).map(|i| self.prime_field.get_ring().from_u128((x.0 >> i) & 1)).collect()
    }
}

impl SerializableElementRing for BinaryFieldBase {

    fn deserialize<'de, D>(&self, deserializer: D) -> Result<Self::Element, D::Error>
        where D: Deserializer<'de>
    {
        let value = <u128 as Deserialize>::deserialize(deserializer)?;
        if value & !self.mask() != 0 {
            return Err(serde::de::Error::custom(format!("{} does not represent an element of a field of degree {}", value, self.degree)));
        }
        return Ok(BinaryFieldEl(value));
    }

    fn serialize<S>(&self, el: &Self::Element, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        <u128 as Serialize>::serialize(&el.0, serializer)
    }
}

#[cfg(test)]
use crate::rings::finite::FiniteRingStore;
#[cfg(test)]
use crate::field::FieldStore;
#[cfg(test)]
use super::FiniteFieldBackendStore;

#[cfg(test)]
fn binary_modulus(F2: &PrimeField, degree: usize, nonleading_monomials: &[usize]) -> Vec<PrimeFieldEl> {
    let mut result = vec![F2.zero(); degree + 1];
    result[degree] = F2.one();
    for i in nonleading_monomials {
        result[*i] = F2.one();
    }
    return result;
}

#[test]
fn test_ring_axioms() {
    let F2 = PrimeField::new(2);
    let F8 = BinaryField::new(F2, binary_modulus(&F2, 3, &[0, 1]), "a");
    crate::ring::generic_tests::test_ring_axioms(&F8, F8.elements());
    crate::field::generic_tests::test_field_axioms(&F8, F8.elements());
    crate::rings::finite::generic_tests::test_finite_ring_axioms(&F8);

    let F2_as_extension = BinaryField::new(F2, binary_modulus(&F2, 1, &[0]), "a");
    crate::field::generic_tests::test_field_axioms(&F2_as_extension, F2_as_extension.elements());
    crate::rings::finite::generic_tests::test_finite_ring_axioms(&F2_as_extension);
}

#[test]
fn test_large_degree() {
    let F2 = PrimeField::new(2);
    // X^127 + X + 1 is irreducible over F2
    let F = BinaryField::new(F2, binary_modulus(&F2, 127, &[0, 1]), "a");
    assert_eq!(Some(1 << 127), F.size());
    let a = F.from_coefficients(&[F2.zero(), F2.one()]);
    assert_el_eq!(&F, F.add_ref(&a, &F.one()), F.pow(F.clone_el(&a), 127));
    // 2^127 - 1 is prime, so every element other than 0, 1 is primitive
    assert_el_eq!(&F, F.one(), F.pow(F.clone_el(&a), u128::MAX >> 1));
    let mut rng = oorandom::Rand64::new(1);
    for _ in 0..10 {
        let x = F.random_element(|| rng.rand_u64());
        if !F.is_zero(&x) {
            assert_el_eq!(&F, F.one(), F.mul_ref(&x, &F.invert(&x)));
        }
    }
    assert_eq!("a^2 + a", format!("{}", F.format(&F.mul_ref(&a, &F.add_ref(&a, &F.one())))));
}

#[test]
fn test_serialization() {
    let F2 = PrimeField::new(2);
    let F8 = BinaryField::new(F2, binary_modulus(&F2, 3, &[0, 1]), "a");
    crate::serialization::generic_tests::test_serialization(&F8, F8.elements());
}
