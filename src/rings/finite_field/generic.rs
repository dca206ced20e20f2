use serde::{Deserializer, Serializer};

use crate::divisibility::DivisibilityRing;
use crate::field::*;
use crate::ring::*;
use crate::rings::extension::mul_mod_monic;
use crate::rings::finite::*;
use crate::rings::poly::dense_poly::*;
use crate::rings::poly::*;
use crate::rings::zn::*;
use crate::serialization::*;

use super::FiniteFieldBackend;

///
/// The finite field `Fp[X]/(f)`, for any prime `p < 2^64` and monic irreducible
/// polynomial `f`. Elements are stored as vectors of coefficients w.r.t. the power
/// basis, multiplication is performed by schoolbook multiplication and reduction
/// modulo `f`, and inverses are computed using the extended Euclidean algorithm.
///
/// # Example
/// ```rust
/// # use residue_fields::assert_el_eq;
/// # use residue_fields::ring::*;
/// # use residue_fields::field::*;
/// # use residue_fields::rings::zn::*;
/// # use residue_fields::rings::finite_field::*;
/// # use residue_fields::rings::finite_field::generic::*;
/// let Fp = PrimeField::new(65537);
/// // X^2 - 3 is irreducible, since 3 is a primitive root modulo 65537
/// let F = PolyBasisField::new(Fp, vec![Fp.from_int(-3), Fp.zero(), Fp.one()], "a");
/// let a = F.from_coefficients(&[Fp.zero(), Fp.one()]);
/// assert_el_eq!(F, F.from_int(3), F.mul_ref(&a, &a));
/// assert_el_eq!(F, F.div(&a, &F.from_int(3)), F.invert(&a));
/// ```
///
#[derive(Clone)]
pub struct PolyBasisFieldBase {
    modulus: Vec<PrimeFieldEl>,
    poly_ring: DensePolyRing<PrimeField>
}

///
/// [`RingStore`] corresponding to [`PolyBasisFieldBase`].
///
pub type PolyBasisField = RingValue<PolyBasisFieldBase>;

///
/// An element of [`PolyBasisField`].
///
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PolyBasisFieldEl(Vec<PrimeFieldEl>);

impl PolyBasisField {

    ///
    /// Creates the field `Fp[X]/(f)`, where `f` is the given monic irreducible polynomial,
    /// whose coefficients start with the constant one.
    ///
    pub fn new(prime_field: PrimeField, modulus: Vec<PrimeFieldEl>, name: &str) -> Self {
        RingValue::from(PolyBasisFieldBase::new(prime_field, modulus, name))
    }
}

impl PolyBasisFieldBase {

    pub fn new(prime_field: PrimeField, modulus: Vec<PrimeFieldEl>, name: &str) -> Self {
        let degree = modulus.len() - 1;
        assert!(degree >= 1);
        assert!(prime_field.is_one(&modulus[degree]), "modulus must be monic");
        PolyBasisFieldBase { modulus, poly_ring: DensePolyRing::new(prime_field, name) }
    }

    fn prime_field_ref(&self) -> &PrimeField {
        self.poly_ring.base_ring()
    }

    fn degree(&self) -> usize {
        self.modulus.len() - 1
    }
}

impl PartialEq for PolyBasisFieldBase {

    fn eq(&self, other: &Self) -> bool {
        self.prime_field_ref().get_ring() == other.prime_field_ref().get_ring() && self.modulus == other.modulus
    }
}

impl RingBase for PolyBasisFieldBase {

    type Element = PolyBasisFieldEl;

    fn clone_el(&self, val: &Self::Element) -> Self::Element {
        val.clone()
    }

    fn add_assign(&self, lhs: &mut Self::Element, rhs: Self::Element) {
        self.add_assign_ref(lhs, &rhs)
    }

    fn add_assign_ref(&self, lhs: &mut Self::Element, rhs: &Self::Element) {
        for (x, y) in lhs.0.iter_mut().zip(rhs.0.iter()) {
            self.prime_field_ref().add_assign_ref(x, y);
        }
    }

    fn negate_inplace(&self, lhs: &mut Self::Element) {
        for x in lhs.0.iter_mut() {
            self.prime_field_ref().negate_inplace(x);
        }
    }

    fn mul_assign(&self, lhs: &mut Self::Element, rhs: Self::Element) {
        self.mul_assign_ref(lhs, &rhs)
    }

    fn mul_assign_ref(&self, lhs: &mut Self::Element, rhs: &Self::Element) {
        lhs.0 = mul_mod_monic(&lhs.0, &rhs.0, &self.modulus[..self.degree()], self.prime_field_ref());
    }

    fn from_int(&self, value: i32) -> Self::Element {
        let mut result = vec![self.prime_field_ref().zero(); self.degree()];
        result[0] = self.prime_field_ref().from_int(value);
        return PolyBasisFieldEl(result);
    }

    fn eq_el(&self, lhs: &Self::Element, rhs: &Self::Element) -> bool {
        lhs.0 == rhs.0
    }

    fn is_zero(&self, value: &Self::Element) -> bool {
        value.0.iter().all(|x| self.prime_field_ref().is_zero(x))
    }

    fn is_commutative(&self) -> bool { true }
    fn is_noetherian(&self) -> bool { true }

    fn dbg<'a>(&self, value: &Self::Element, out: &mut std::fmt::Formatter<'a>) -> std::fmt::Result {
        dbg_poly(&value.0, self.prime_field_ref(), self.poly_ring.indeterminate_name(), out)
    }
}

impl DivisibilityRing for PolyBasisFieldBase {

    fn checked_left_div(&self, lhs: &Self::Element, rhs: &Self::Element) -> Option<Self::Element> {
        if self.is_zero(lhs) {
            return Some(self.zero());
        } else if self.is_zero(rhs) {
            return None;
        }
        let P = &self.poly_ring;
        let modulus = P.from_coefficients(self.modulus.iter().copied());
        let (s, _, d) = P.extended_ideal_gen(&P.from_coefficients(rhs.0.iter().copied()), &modulus);
        assert!(P.is_one(&d), "modulus is not irreducible");
        let inverse = PolyBasisFieldEl(P.coefficient_vec(&P.div_rem_monic(s, &modulus).1, self.degree()));
        return Some(self.mul_ref(lhs, &inverse));
    }
}

impl Field for PolyBasisFieldBase {}

impl FiniteRing for PolyBasisFieldBase {

    fn random_element<G: FnMut() -> u64>(&self, mut rng: G) -> Self::Element {
        PolyBasisFieldEl((0..self.degree()).map(|_| self.prime_field_ref().random_element(&mut rng)).collect())
    }

    fn size(&self) -> Option<u128> {
        super::field_size(self.prime_field_ref().modulus(), self.degree())
    }

    fn elements<'a>(&'a self) -> Box<dyn 'a + Iterator<Item = Self::Element>> {
        let Fp = self.prime_field_ref();
        let p = Fp.modulus() as u128;
        Box::new((0..self.size().unwrap_or(u128::MAX)).map(move |mut index| {
            PolyBasisFieldEl((0..self.degree()).map(|_| {
                let digit = index % p;
                index /= p;
                Fp.get_ring().from_u128(digit)
            }).collect())
        }))
    }
}

impl FiniteFieldBackend for PolyBasisFieldBase {

    fn prime_field(&self) -> PrimeField {
        *self.prime_field_ref()
    }

    fn degree(&self) -> usize {
        PolyBasisFieldBase::degree(self)
    }

    fn from_coefficients(&self, coefficients: &[PrimeFieldEl]) -> Self::Element {
        assert!(coefficients.len() <= PolyBasisFieldBase::degree(self));
        let mut result = coefficients.to_vec();
        result.resize(PolyBasisFieldBase::degree(self), self.prime_field_ref().zero());
        return PolyBasisFieldEl(result);
    }

    fn coefficients(&self, x: &Self::Element) -> Vec<PrimeFieldEl> {
        x.0.clone()
    }
}

impl SerializableElementRing for PolyBasisFieldBase {

    fn deserialize<'de, D>(&self, deserializer: D) -> Result<Self::Element, D::Error>
        where D: Deserializer<'de>
    {
        let mut result = Vec::new();
        deserialize_seq_helper(deserializer, |c| result.push(c), DeserializeWithRing::new(self.prime_field_ref()))?;
        if result.len() != PolyBasisFieldBase::degree(self) {
            return Err(serde::de::Error::invalid_length(result.len(), &"one coefficient per basis element"));
        }
        return Ok(PolyBasisFieldEl(result));
    }

    fn serialize<S>(&self, el: &Self::Element, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        serialize_seq_helper(serializer, el.0.iter().map(|c| SerializeWithRing::new(c, self.prime_field_ref())))
    }
}

#[cfg(test)]
use crate::divisibility::DivisibilityRingStore;
#[cfg(test)]
use super::FiniteFieldBackendStore;

#[cfg(test)]
fn test_field_f25() -> PolyBasisField {
    let F5 = PrimeField::new(5);
    // X^2 + 2 is irreducible over F5
    PolyBasisField::new(F5, vec![F5.from_int(2), F5.zero(), F5.one()], "a")
}

#[test]
fn test_ring_axioms() {
    let F25 = test_field_f25();
    crate::ring::generic_tests::test_ring_axioms(&F25, F25.elements());
    crate::field::generic_tests::test_field_axioms(&F25, F25.elements());
    crate::rings::finite::generic_tests::test_finite_ring_axioms(&F25);
}

#[test]
fn test_invert() {
    let F25 = test_field_f25();
    let F5 = F25.prime_field();
    let a = F25.from_coefficients(&[F5.zero(), F5.one()]);
    // a^2 = -2 = 3, so a^-1 = a / 3 = 2a
    assert_el_eq!(&F25, F25.from_coefficients(&[F5.zero(), F5.from_int(2)]), F25.invert(&a));
    assert_eq!("2*a", format!("{}", F25.format(&F25.invert(&a))));
    let one_plus_a = F25.add_ref(&a, &F25.one());
    // (1 + a)(1 - a) = 1 - a^2 = 3
    assert_el_eq!(&F25, F25.mul(F25.sub(F25.one(), a), F25.invert(&F25.from_int(3))), F25.invert(&one_plus_a));
    assert!(F25.checked_div(&F25.one(), &F25.zero()).is_none());
}

#[test]
fn test_large_characteristic() {
    let Fp = PrimeField::new(18446744073709551557);
    let F = PolyBasisField::new(Fp, vec![Fp.neg_one(), Fp.neg_one(), Fp.zero(), Fp.one()], "a");
    assert_eq!(None, F.size());
    let a = F.from_coefficients(&[Fp.zero(), Fp.one()]);
    assert_el_eq!(&F, F.add_ref(&a, &F.one()), F.pow(F.clone_el(&a), 3));
}

#[test]
fn test_serialization() {
    let F25 = test_field_f25();
    crate::serialization::generic_tests::test_serialization(&F25, F25.elements());
}
