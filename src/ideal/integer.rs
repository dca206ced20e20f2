use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::algorithms;
use crate::error::ConfigurationError;
use crate::field::FieldStore;
use crate::ring::*;
use crate::rings::integer::IntegerRing;
use crate::rings::rational::*;
use crate::rings::zn::*;

use super::ResidueIdeal;

///
/// The ideal `(p)` of `Z` generated by a prime `p < 2^64`.
///
/// Its residue field is `Fp`, which is identified with `Z/pZ` directly, so no basis
/// computations are necessary.
///
/// # Example
/// ```rust
/// # use residue_fields::ideal::*;
/// # use residue_fields::ideal::integer::*;
/// let ideal = IntegerPrimeIdeal::new(17);
/// assert!(ideal.is_prime());
/// assert_eq!(Some(2), ideal.valuation(&(17 * 17 * 3)));
/// assert_eq!("Principal ideal (17) of Integer Ring", format!("{}", ideal));
/// ```
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IntegerPrimeIdeal {
    p: u64
}

impl IntegerPrimeIdeal {

    ///
    /// Creates the ideal `(p)`. Whether `p` is actually prime is checked by
    /// [`ResidueIdeal::is_prime()`].
    ///
    pub fn new(p: u64) -> Self {
        IntegerPrimeIdeal { p }
    }

    ///
    /// Creates the ideal generated by the given rational number, which must be an integer.
    ///
    pub fn principal(x: &RationalFieldEl) -> Result<Self, ConfigurationError> {
        let QQ = RationalField::RING;
        let not_prime = || ConfigurationError::NotPrime { ideal: format!("({})", QQ.format(x)) };
        let generator = QQ.as_integer(x).ok_or_else(not_prime)?;
        let p = u64::try_from(generator.unsigned_abs()).map_err(|_| ConfigurationError::UnsupportedRing { reason: format!("characteristic {} does not fit into 64 bits", generator) })?;
        return Ok(Self::new(p));
    }

    pub fn generator_value(&self) -> u64 {
        self.p
    }

    fn modulus(&self) -> i128 {
        self.p as i128
    }
}

impl Display for IntegerPrimeIdeal {

    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Principal ideal ({}) of Integer Ring", self.p)
    }
}

impl Serialize for IntegerPrimeIdeal {

    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        <u64 as Serialize>::serialize(&self.p, serializer)
    }
}

impl<'de> Deserialize<'de> for IntegerPrimeIdeal {

    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: Deserializer<'de>
    {
        <u64 as Deserialize>::deserialize(deserializer).map(IntegerPrimeIdeal::new)
    }
}

impl ResidueIdeal for IntegerPrimeIdeal {

    type Order = IntegerRing;
    type FractionField = RationalField;

    fn order(&self) -> &Self::Order {
        &IntegerRing::RING
    }

    fn fraction_field(&self) -> &Self::FractionField {
        &RationalField::RING
    }

    fn characteristic(&self) -> u64 {
        self.p
    }

    fn residue_class_degree(&self) -> usize {
        1
    }

    fn is_prime(&self) -> bool {
        algorithms::miller_rabin::is_prime(self.p as u128, 10)
    }

    fn variable_name(&self) -> &str {
        "x"
    }

    fn requires_basis(&self) -> bool {
        false
    }

    fn generator(&self) -> i128 {
        1
    }

    fn to_vs(&self, x: &i128) -> Vec<PrimeFieldEl> {
        vec![self.prime_field().get_ring().from_i128(*x)]
    }

    fn try_to_vs(&self, x: &RationalFieldEl) -> Option<Vec<PrimeFieldEl>> {
        let QQ = RationalField::RING;
        let Fp = self.prime_field();
        let den = Fp.get_ring().from_i128(*QQ.den(x));
        if Fp.is_zero(&den) {
            return None;
        }
        return Some(vec![Fp.div(&Fp.get_ring().from_i128(*QQ.num(x)), &den)]);
    }

    fn to_order(&self, v: &[PrimeFieldEl]) -> i128 {
        assert_eq!(1, v.len());
        self.prime_field().smallest_positive_lift(&v[0]) as i128
    }

    fn embed(&self, x: i128) -> RationalFieldEl {
        RationalField::RING.from_integer(x)
    }

    fn integral_split(&self, x: &RationalFieldEl) -> (i128, i128) {
        let QQ = RationalField::RING;
        (*QQ.num(x), *QQ.den(x))
    }

    fn valuation(&self, x: &i128) -> Option<usize> {
        IntegerRing::RING.p_adic_valuation(*x, self.modulus())
    }

    fn divide_by_uniformizer_power(&self, x: i128, power: usize) -> RationalFieldEl {
        RationalField::RING.from_fraction(x, IntegerRing::RING.pow(self.modulus(), power as u128))
    }
}

#[test]
fn test_to_vs() {
    let ideal = IntegerPrimeIdeal::new(17);
    let Fp = ideal.prime_field();
    let QQ = RationalField::RING;
    assert_el_eq!(Fp, Fp.from_int(4), ideal.to_vs(&21)[0]);
    assert_el_eq!(Fp, Fp.from_int(13), ideal.to_vs(&-4)[0]);
    assert_el_eq!(Fp, Fp.from_int(6), ideal.try_to_vs(&QQ.from_fraction(1, 3)).unwrap()[0]);
    assert!(ideal.try_to_vs(&QQ.from_fraction(1, 34)).is_none());
    assert_eq!(4, ideal.to_order(&ideal.to_vs(&21)));
}

#[test]
fn test_valuation() {
    let ideal = IntegerPrimeIdeal::new(5);
    let QQ = RationalField::RING;
    assert_eq!(None, ideal.valuation(&0));
    assert_eq!(Some(0), ideal.valuation(&7));
    assert_eq!(Some(3), ideal.valuation(&-250));
    assert_el_eq!(QQ, QQ.from_fraction(-2, 1), ideal.divide_by_uniformizer_power(-250, 3));
    assert_eq!((3, 25), ideal.integral_split(&QQ.from_fraction(-6, -50)));
}

#[test]
fn test_is_prime() {
    let QQ = RationalField::RING;
    assert!(IntegerPrimeIdeal::new(2).is_prime());
    assert!(IntegerPrimeIdeal::new(18446744073709551557).is_prime());
    assert!(!IntegerPrimeIdeal::new(1).is_prime());
    assert!(!IntegerPrimeIdeal::new(91).is_prime());
    assert_eq!(IntegerPrimeIdeal::new(7), IntegerPrimeIdeal::principal(&QQ.from_integer(-7)).unwrap());
    assert!(IntegerPrimeIdeal::principal(&QQ.from_fraction(1, 7)).is_err());
}

#[test]
fn test_serialization() {
    let ideal = IntegerPrimeIdeal::new(17);
    let json = serde_json::to_string(&ideal).unwrap();
    assert_eq!("17", json);
    assert_eq!(ideal, serde_json::from_str(&json).unwrap());
}
