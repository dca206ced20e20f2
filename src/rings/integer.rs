use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::divisibility::DivisibilityRing;
use crate::ring::*;
use crate::serialization::SerializableElementRing;

///
/// The ring of integers `Z`, with elements represented by `i128`.
///
/// Arithmetic panics if a result does not fit into an `i128`, so this is only
/// suitable for computations whose intermediate results are known to be small.
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct IntegerRingBase;

pub type IntegerRing = RingValue<IntegerRingBase>;

impl IntegerRing {

    pub const RING: IntegerRing = RingValue::from(IntegerRingBase);

    ///
    /// Computes the nonnegative greatest common divisor of `lhs` and `rhs`.
    ///
    pub fn gcd(&self, lhs: i128, rhs: i128) -> i128 {
        let (mut a, mut b) = (lhs.abs(), rhs.abs());
        while b != 0 {
            (a, b) = (b, a % b);
        }
        return a;
    }

    ///
    /// Computes the nonnegative least common multiple of `lhs` and `rhs`.
    ///
    pub fn lcm(&self, lhs: i128, rhs: i128) -> i128 {
        if lhs == 0 || rhs == 0 {
            return 0;
        }
        mul_i128((lhs / self.gcd(lhs, rhs)).abs(), rhs.abs())
    }

    ///
    /// Returns the largest `k` such that `p^k` divides `x`, or `None` if `x = 0`.
    ///
    pub fn p_adic_valuation(&self, mut x: i128, p: i128) -> Option<usize> {
        assert!(p > 1);
        if x == 0 {
            return None;
        }
        let mut result = 0;
        while x % p == 0 {
            x /= p;
            result += 1;
        }
        return Some(result);
    }
}

pub(crate) fn add_i128(lhs: i128, rhs: i128) -> i128 {
    lhs.checked_add(rhs).unwrap_or_else(|| overflow(lhs, "+", rhs))
}

pub(crate) fn mul_i128(lhs: i128, rhs: i128) -> i128 {
    lhs.checked_mul(rhs).unwrap_or_else(|| overflow(lhs, "*", rhs))
}

pub(crate) fn neg_i128(x: i128) -> i128 {
    x.checked_neg().unwrap_or_else(|| overflow(0, "-", x))
}

#[cold]
fn overflow(lhs: i128, op: &str, rhs: i128) -> ! {
    panic!("integer overflow: {} {} {} exceeds the range of i128", lhs, op, rhs)
}

impl RingBase for IntegerRingBase {

    type Element = i128;

    fn clone_el(&self, val: &Self::Element) -> Self::Element {
        *val
    }

    fn add_assign(&self, lhs: &mut Self::Element, rhs: Self::Element) {
        *lhs = add_i128(*lhs, rhs);
    }

    fn negate_inplace(&self, lhs: &mut Self::Element) {
        *lhs = neg_i128(*lhs);
    }

    fn mul_assign(&self, lhs: &mut Self::Element, rhs: Self::Element) {
        *lhs = mul_i128(*lhs, rhs);
    }

    fn from_int(&self, value: i32) -> Self::Element {
        value as i128
    }

    fn eq_el(&self, lhs: &Self::Element, rhs: &Self::Element) -> bool {
        lhs == rhs
    }

    fn is_commutative(&self) -> bool { true }
    fn is_noetherian(&self) -> bool { true }

    fn dbg<'a>(&self, value: &Self::Element, out: &mut std::fmt::Formatter<'a>) -> std::fmt::Result {
        write!(out, "{}", value)
    }
}

impl DivisibilityRing for IntegerRingBase {

    fn checked_left_div(&self, lhs: &Self::Element, rhs: &Self::Element) -> Option<Self::Element> {
        if *rhs == 0 {
            if *lhs == 0 { Some(0) } else { None }
        } else if lhs % rhs == 0 {
            Some(lhs / rhs)
        } else {
            None
        }
    }
}

impl SerializableElementRing for IntegerRingBase {

    fn deserialize<'de, D>(&self, deserializer: D) -> Result<Self::Element, D::Error>
        where D: Deserializer<'de>
    {
        <i128 as Deserialize>::deserialize(deserializer)
    }

    fn serialize<S>(&self, el: &Self::Element, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        <i128 as Serialize>::serialize(el, serializer)
    }
}

#[test]
fn test_ring_axioms() {
    crate::ring::generic_tests::test_ring_axioms(IntegerRing::RING, (-6..7).map(|x| x as i128));
}

#[test]
fn test_gcd_lcm() {
    let ZZ = IntegerRing::RING;
    assert_eq!(6, ZZ.gcd(-12, 18));
    assert_eq!(5, ZZ.gcd(0, -5));
    assert_eq!(36, ZZ.lcm(-12, 18));
    assert_eq!(0, ZZ.lcm(0, 3));
}

#[test]
fn test_p_adic_valuation() {
    let ZZ = IntegerRing::RING;
    assert_eq!(Some(3), ZZ.p_adic_valuation(-24, 2));
    assert_eq!(Some(0), ZZ.p_adic_valuation(7, 29));
    assert_eq!(Some(2), ZZ.p_adic_valuation(841 * 5, 29));
    assert_eq!(None, ZZ.p_adic_valuation(0, 29));
}

#[test]
#[should_panic(expected = "integer overflow")]
fn test_mul_overflow() {
    let ZZ = IntegerRing::RING;
    ZZ.mul(i128::MAX / 2, 3);
}

#[test]
#[should_panic(expected = "integer overflow")]
fn test_add_overflow() {
    let ZZ = IntegerRing::RING;
    ZZ.sub(i128::MIN + 1, 2);
}
