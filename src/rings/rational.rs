use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::divisibility::DivisibilityRing;
use crate::field::Field;
use crate::ring::*;
use crate::rings::integer::{add_i128, mul_i128, neg_i128, IntegerRing};
use crate::serialization::SerializableElementRing;

///
/// An implementation of the rational numbers `Q`, based on representing them
/// as a tuple `(numerator, denominator)` of `i128`s.
///
/// Be careful with this, since by nature of the rational numbers, both numerator
/// and denominator can increase dramatically, even when the numbers itself are of
/// moderate size. This implementation panics if they leave the range of `i128`.
///
/// # Example
/// ```rust
/// # use residue_fields::assert_el_eq;
/// # use residue_fields::ring::*;
/// # use residue_fields::rings::rational::*;
/// # use residue_fields::field::FieldStore;
/// let QQ = RationalField::RING;
/// let one_half = QQ.div(&QQ.one(), &QQ.from_int(2));
/// assert_el_eq!(QQ, QQ.from_fraction(1, 4), QQ.pow(one_half, 2));
/// assert_eq!(1, *QQ.num(&one_half));
/// assert_eq!(2, *QQ.den(&one_half));
/// ```
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct RationalFieldBase;

///
/// [`RingStore`] corresponding to [`RationalFieldBase`]
///
pub type RationalField = RingValue<RationalFieldBase>;

///
/// An element of [`RationalField`], i.e. a fraction of two integers, which is
/// always kept in lowest terms with positive denominator.
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct RationalFieldEl(i128, i128);

impl RationalField {

    pub const RING: RationalField = RingValue::from(RationalFieldBase);

    pub fn from_fraction(&self, num: i128, den: i128) -> RationalFieldEl {
        self.get_ring().reduce(num, den)
    }

    pub fn from_integer(&self, x: i128) -> RationalFieldEl {
        RationalFieldEl(x, 1)
    }

    pub fn num<'a>(&self, x: &'a RationalFieldEl) -> &'a i128 {
        &x.0
    }

    pub fn den<'a>(&self, x: &'a RationalFieldEl) -> &'a i128 {
        &x.1
    }

    ///
    /// Returns `x` as integer, if it is one.
    ///
    pub fn as_integer(&self, x: &RationalFieldEl) -> Option<i128> {
        if x.1 == 1 { Some(x.0) } else { None }
    }
}

impl RationalFieldBase {

    fn reduce(&self, num: i128, den: i128) -> RationalFieldEl {
        assert!(den != 0, "denominator must not be zero");
        let gcd = IntegerRing::RING.gcd(num, den);
        let sign = den.signum();
        return RationalFieldEl(mul_i128(sign, num / gcd), mul_i128(sign, den / gcd));
    }
}

impl RingBase for RationalFieldBase {

    type Element = RationalFieldEl;

    fn clone_el(&self, val: &Self::Element) -> Self::Element {
        *val
    }

    fn add_assign(&self, lhs: &mut Self::Element, rhs: Self::Element) {
        if lhs.1 == 1 && rhs.1 == 1 {
            lhs.0 = add_i128(lhs.0, rhs.0);
        } else {
            let gcd = IntegerRing::RING.gcd(lhs.1, rhs.1);
            let num = add_i128(mul_i128(lhs.0, rhs.1 / gcd), mul_i128(rhs.0, lhs.1 / gcd));
            *lhs = self.reduce(num, mul_i128(lhs.1 / gcd, rhs.1));
        }
    }

    fn negate_inplace(&self, lhs: &mut Self::Element) {
        lhs.0 = neg_i128(lhs.0);
    }

    fn mul_assign(&self, lhs: &mut Self::Element, rhs: Self::Element) {
        let gcd1 = IntegerRing::RING.gcd(lhs.0, rhs.1);
        let gcd2 = IntegerRing::RING.gcd(rhs.0, lhs.1);
        *lhs = RationalFieldEl(mul_i128(lhs.0 / gcd1, rhs.0 / gcd2), mul_i128(lhs.1 / gcd2, rhs.1 / gcd1));
    }

    fn from_int(&self, value: i32) -> Self::Element {
        RationalFieldEl(value as i128, 1)
    }

    fn eq_el(&self, lhs: &Self::Element, rhs: &Self::Element) -> bool {
        lhs == rhs
    }

    fn is_commutative(&self) -> bool { true }
    fn is_noetherian(&self) -> bool { true }

    fn dbg<'a>(&self, value: &Self::Element, out: &mut std::fmt::Formatter<'a>) -> std::fmt::Result {
        if value.1 == 1 {
            write!(out, "{}", value.0)
        } else {
            write!(out, "{}/{}", value.0, value.1)
        }
    }
}

impl DivisibilityRing for RationalFieldBase {

    fn checked_left_div(&self, lhs: &Self::Element, rhs: &Self::Element) -> Option<Self::Element> {
        if lhs.0 == 0 {
            Some(RationalFieldEl(0, 1))
        } else if rhs.0 == 0 {
            None
        } else {
            Some(self.mul(*lhs, self.reduce(rhs.1, rhs.0)))
        }
    }
}

impl Field for RationalFieldBase {}

impl SerializableElementRing for RationalFieldBase {

    fn deserialize<'de, D>(&self, deserializer: D) -> Result<Self::Element, D::Error>
        where D: Deserializer<'de>
    {
        let (num, den) = <(i128, i128) as Deserialize>::deserialize(deserializer)?;
        if den == 0 {
            return Err(serde::de::Error::custom("denominator must not be zero"));
        }
        return Ok(self.reduce(num, den));
    }

    fn serialize<S>(&self, el: &Self::Element, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        <(i128, i128) as Serialize>::serialize(&(el.0, el.1), serializer)
    }
}

#[cfg(test)]
use crate::field::FieldStore;

#[cfg(test)]
fn edge_case_elements() -> impl Iterator<Item = RationalFieldEl> {
    let QQ = RationalField::RING;
    (-6..8).flat_map(move |x| (-2..5).filter(|y| *y != 0).map(move |y| QQ.from_fraction(x, y)))
}

#[test]
fn test_ring_axioms() {
    let QQ = RationalField::RING;
    let half = QQ.div(&QQ.one(), &QQ.from_int(2));
    assert!(!QQ.is_one(&half));
    assert!(!QQ.is_zero(&half));
    assert_el_eq!(QQ, QQ.one(), QQ.add_ref(&half, &half));
    crate::ring::generic_tests::test_ring_axioms(QQ, edge_case_elements());
}

#[test]
fn test_field_axioms() {
    crate::field::generic_tests::test_field_axioms(RationalField::RING, edge_case_elements());
}

#[test]
fn test_normal_form() {
    let QQ = RationalField::RING;
    let x = QQ.from_fraction(6, -4);
    assert_eq!(-3, *QQ.num(&x));
    assert_eq!(2, *QQ.den(&x));
    assert_eq!(None, QQ.as_integer(&x));
    assert_eq!(Some(-3), QQ.as_integer(&QQ.mul(x, QQ.from_int(2))));
    assert_eq!("-3/2", format!("{}", QQ.format(&x)));
}

#[test]
fn test_serialization() {
    crate::serialization::generic_tests::test_serialization(RationalField::RING, edge_case_elements());
    let QQ = RationalField::RING;
    let json = serde_json::to_string(&crate::serialization::SerializeWithRing::new(&QQ.from_fraction(3, 9), QQ)).unwrap();
    assert_eq!("[1,3]", json);
}

#[test]
#[should_panic(expected = "integer overflow")]
fn test_overflow() {
    let QQ = RationalField::RING;
    QQ.add(QQ.from_fraction(1, 1 << 125), QQ.from_fraction(1, 3));
}
