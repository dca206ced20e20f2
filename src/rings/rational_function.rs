use serde::{Deserializer, Serializer};

use crate::divisibility::DivisibilityRing;
use crate::field::*;
use crate::ring::*;
use crate::rings::poly::dense_poly::*;
use crate::rings::poly::*;
use crate::rings::zn::*;
use crate::serialization::*;

///
/// The field of rational functions `Fp(t)` over a prime field, i.e. the fraction
/// field of the polynomial ring `Fp[t]`.
///
/// Elements are stored as fractions of two coprime polynomials, with monic denominator.
///
/// # Example
/// ```rust
/// # use residue_fields::assert_el_eq;
/// # use residue_fields::ring::*;
/// # use residue_fields::field::*;
/// # use residue_fields::rings::zn::*;
/// # use residue_fields::rings::poly::*;
/// # use residue_fields::rings::rational_function::*;
/// let K = RationalFunctionField::new(PrimeField::new(5), "t");
/// let P = K.poly_ring();
/// let t = P.indeterminate();
/// let t_squared_minus_1 = P.sub(P.mul_ref(&t, &t), P.one());
/// let x = K.from_fraction(P.sub(P.clone_el(&t), P.one()), t_squared_minus_1);
/// assert_el_eq!(K, K.invert(&K.embed(P.add(t, P.one()))), x);
/// ```
///
#[derive(Clone)]
pub struct RationalFunctionFieldBase {
    poly_ring: DensePolyRing<PrimeField>
}

///
/// [`RingStore`] corresponding to [`RationalFunctionFieldBase`].
///
pub type RationalFunctionField = RingValue<RationalFunctionFieldBase>;

///
/// An element of [`RationalFunctionField`].
///
pub struct RationalFunctionFieldEl {
    num: DensePolyRingEl<PrimeField>,
    den: DensePolyRingEl<PrimeField>
}

impl RationalFunctionField {

    pub fn new(base_field: PrimeField, unknown_name: &str) -> Self {
        RingValue::from(RationalFunctionFieldBase { poly_ring: DensePolyRing::new(base_field, unknown_name) })
    }

    ///
    /// Returns the polynomial ring `Fp[t]` whose fraction field this is.
    ///
    pub fn poly_ring(&self) -> &DensePolyRing<PrimeField> {
        &self.get_ring().poly_ring
    }

    pub fn from_fraction(&self, num: DensePolyRingEl<PrimeField>, den: DensePolyRingEl<PrimeField>) -> RationalFunctionFieldEl {
        self.get_ring().reduce(num, den)
    }

    pub fn embed(&self, x: DensePolyRingEl<PrimeField>) -> RationalFunctionFieldEl {
        RationalFunctionFieldEl { num: x, den: self.poly_ring().one() }
    }

    pub fn num<'a>(&self, x: &'a RationalFunctionFieldEl) -> &'a DensePolyRingEl<PrimeField> {
        &x.num
    }

    pub fn den<'a>(&self, x: &'a RationalFunctionFieldEl) -> &'a DensePolyRingEl<PrimeField> {
        &x.den
    }
}

impl RationalFunctionFieldBase {

    fn reduce(&self, num: DensePolyRingEl<PrimeField>, den: DensePolyRingEl<PrimeField>) -> RationalFunctionFieldEl {
        let P = &self.poly_ring;
        assert!(!P.is_zero(&den), "denominator must not be zero");
        if P.is_zero(&num) {
            return RationalFunctionFieldEl { num, den: P.one() };
        }
        let gcd = P.ideal_gen(&num, &den);
        let num = P.div_rem_monic(num, &gcd).0;
        let den = P.div_rem_monic(den, &gcd).0;
        let lc_inv = P.base_ring().invert(P.lc(&den).unwrap());
        return RationalFunctionFieldEl {
            num: P.inclusion_mul(&lc_inv, num),
            den: P.inclusion_mul(&lc_inv, den)
        };
    }
}

impl PartialEq for RationalFunctionFieldBase {

    fn eq(&self, other: &Self) -> bool {
        self.poly_ring.get_ring() == other.poly_ring.get_ring()
    }
}

impl RingBase for RationalFunctionFieldBase {

    type Element = RationalFunctionFieldEl;

    fn clone_el(&self, val: &Self::Element) -> Self::Element {
        RationalFunctionFieldEl { num: self.poly_ring.clone_el(&val.num), den: self.poly_ring.clone_el(&val.den) }
    }

    fn add_assign(&self, lhs: &mut Self::Element, rhs: Self::Element) {
        let P = &self.poly_ring;
        let num = P.add(P.mul_ref(&lhs.num, &rhs.den), P.mul_ref(&rhs.num, &lhs.den));
        let den = P.mul_ref(&lhs.den, &rhs.den);
        *lhs = self.reduce(num, den);
    }

    fn negate_inplace(&self, lhs: &mut Self::Element) {
        self.poly_ring.negate_inplace(&mut lhs.num);
    }

    fn mul_assign(&self, lhs: &mut Self::Element, rhs: Self::Element) {
        let P = &self.poly_ring;
        *lhs = self.reduce(P.mul_ref(&lhs.num, &rhs.num), P.mul_ref(&lhs.den, &rhs.den));
    }

    fn from_int(&self, value: i32) -> Self::Element {
        RationalFunctionFieldEl { num: self.poly_ring.from_int(value), den: self.poly_ring.one() }
    }

    fn eq_el(&self, lhs: &Self::Element, rhs: &Self::Element) -> bool {
        self.poly_ring.eq_el(&lhs.num, &rhs.num) && self.poly_ring.eq_el(&lhs.den, &rhs.den)
    }

    fn is_zero(&self, value: &Self::Element) -> bool {
        self.poly_ring.is_zero(&value.num)
    }

    fn is_commutative(&self) -> bool { true }
    fn is_noetherian(&self) -> bool { true }

    fn dbg<'a>(&self, value: &Self::Element, out: &mut std::fmt::Formatter<'a>) -> std::fmt::Result {
        if self.poly_ring.is_one(&value.den) {
            write!(out, "{}", self.poly_ring.format(&value.num))
        } else {
            write!(out, "({})/({})", self.poly_ring.format(&value.num), self.poly_ring.format(&value.den))
        }
    }
}

impl DivisibilityRing for RationalFunctionFieldBase {

    fn checked_left_div(&self, lhs: &Self::Element, rhs: &Self::Element) -> Option<Self::Element> {
        if self.is_zero(lhs) {
            return Some(self.zero());
        } else if self.is_zero(rhs) {
            return None;
        }
        let P = &self.poly_ring;
        return Some(self.reduce(P.mul_ref(&lhs.num, &rhs.den), P.mul_ref(&lhs.den, &rhs.num)));
    }
}

impl Field for RationalFunctionFieldBase {}

impl SerializableElementRing for RationalFunctionFieldBase {

    fn deserialize<'de, D>(&self, deserializer: D) -> Result<Self::Element, D::Error>
        where D: Deserializer<'de>
    {
        let mut parts = Vec::new();
        deserialize_seq_helper(deserializer, |x| parts.push(x), DeserializeWithRing::new(&self.poly_ring))?;
        if parts.len() != 2 {
            return Err(serde::de::Error::invalid_length(parts.len(), &"a numerator and a denominator"));
        }
        let den = parts.pop().unwrap();
        let num = parts.pop().unwrap();
        if self.poly_ring.is_zero(&den) {
            return Err(serde::de::Error::custom("denominator must not be zero"));
        }
        return Ok(self.reduce(num, den));
    }

    fn serialize<S>(&self, el: &Self::Element, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        serialize_seq_helper(serializer, [&el.num, &el.den].into_iter().map(|x| SerializeWithRing::new(x, &self.poly_ring)))
    }
}

#[cfg(test)]
fn edge_case_elements(K: &RationalFunctionField) -> Vec<RationalFunctionFieldEl> {
    let P = K.poly_ring();
    let t = P.indeterminate();
    vec![
        K.zero(),
        K.one(),
        K.from_int(3),
        K.embed(P.clone_el(&t)),
        K.from_fraction(P.one(), P.clone_el(&t)),
        K.from_fraction(P.add(P.clone_el(&t), P.from_int(2)), P.from_terms([(P.base_ring().from_int(3), 2), (P.base_ring().one(), 0)]))
    ]
}

#[test]
fn test_ring_axioms() {
    let K = RationalFunctionField::new(PrimeField::new(5), "t");
    crate::ring::generic_tests::test_ring_axioms(&K, edge_case_elements(&K).into_iter());
    crate::field::generic_tests::test_field_axioms(&K, edge_case_elements(&K).into_iter());
}

#[test]
fn test_normal_form() {
    let K = RationalFunctionField::new(PrimeField::new(5), "t");
    let P = K.poly_ring();
    let t = P.indeterminate();
    // (2t^2 + 2t) / (4t) = (t + 1) / 2 = (3t + 3) / 1
    let x = K.from_fraction(P.from_coefficients([P.base_ring().zero(), P.base_ring().from_int(2), P.base_ring().from_int(2)]), P.mul_ref(&t, &P.from_int(4)));
    assert!(P.is_one(K.den(&x)));
    assert_el_eq!(P, P.from_coefficients([P.base_ring().from_int(3), P.base_ring().from_int(3)]), K.num(&x));
    assert_eq!("3*t + 3", format!("{}", K.format(&x)));
    let y = K.invert(&x);
    assert_eq!("(2)/(t + 1)", format!("{}", K.format(&y)));
}

#[test]
fn test_serialization() {
    let K = RationalFunctionField::new(PrimeField::new(5), "t");
    crate::serialization::generic_tests::test_serialization(&K, edge_case_elements(&K).into_iter());
}
