use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{event, instrument, Level};

use crate::algorithms;
use crate::divisibility::DivisibilityRing;
use crate::field::Field;
use crate::ring::*;
use crate::rings::extension::mul_mod_monic;
use crate::rings::finite::FiniteRing;
use crate::rings::poly::dbg_poly;
use crate::rings::zn::*;
use crate::serialization::SerializableElementRing;

use super::{FiniteFieldBackend, ZECH_LOG_BOUND};

///
/// A finite field `Fq`, `q < 2^16`, whose elements are stored as discrete logarithms
/// w.r.t. a fixed primitive element `g`. Multiplication is then addition of logarithms,
/// and addition uses the table of Zech logarithms `Z(k)` defined by `1 + g^k = g^Z(k)`.
///
/// Since all tables have `q` entries, this is only suitable for small fields.
///
/// # Example
/// ```rust
/// # use residue_fields::assert_el_eq;
/// # use residue_fields::ring::*;
/// # use residue_fields::rings::zn::*;
/// # use residue_fields::rings::finite_field::*;
/// # use residue_fields::rings::finite_field::zech::*;
/// let F3 = PrimeField::new(3);
/// // F9 = F3[i]/(i^2 + 1)
/// let F9 = ZechLogField::new(F3, vec![F3.one(), F3.zero(), F3.one()], "i");
/// let i = F9.from_coefficients(&[F3.zero(), F3.one()]);
/// assert_el_eq!(F9, F9.neg_one(), F9.mul_ref(&i, &i));
/// ```
///
#[derive(Clone)]
pub struct ZechLogFieldBase {
    prime_field: PrimeField,
    modulus: Vec<PrimeFieldEl>,
    name: String,
    // q - 1, also used to represent zero
    order: u32,
    exp_table: Vec<u32>,
    log_table: Vec<u32>,
    zech_table: Vec<u32>,
    negation_offset: u32
}

///
/// [`RingStore`] corresponding to [`ZechLogFieldBase`].
///
pub type ZechLogField = RingValue<ZechLogFieldBase>;

///
/// An element of [`ZechLogField`].
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ZechLogFieldEl(u32);

impl ZechLogField {

    ///
    /// Creates the field `Fp[X]/(f)`, where `f` is the given monic irreducible polynomial,
    /// whose coefficients start with the constant one.
    ///
    pub fn new(prime_field: PrimeField, modulus: Vec<PrimeFieldEl>, name: &str) -> Self {
        RingValue::from(ZechLogFieldBase::new(prime_field, modulus, name))
    }
}

impl ZechLogFieldBase {

    #[instrument(skip_all, level = "trace")]
    pub fn new(prime_field: PrimeField, modulus: Vec<PrimeFieldEl>, name: &str) -> Self {
        let degree = modulus.len() - 1;
        assert!(degree >= 1);
        assert!(prime_field.is_one(&modulus[degree]), "modulus must be monic");
        let size = super::field_size(prime_field.modulus(), degree).unwrap_or(u128::MAX);
        assert!(size < ZECH_LOG_BOUND, "field too large for Zech logarithm tables");
        let mut result = ZechLogFieldBase {
            prime_field,
            modulus,
            name: name.to_owned(),
            order: (size - 1) as u32,
            exp_table: Vec::new(),
            log_table: Vec::new(),
            zech_table: Vec::new(),
            negation_offset: 0
        };
        result.fill_tables();
        return result;
    }

    fn degree(&self) -> usize {
        self.modulus.len() - 1
    }

    fn characteristic(&self) -> u32 {
        self.prime_field.modulus() as u32
    }

    fn mul_poly(&self, lhs: &[PrimeFieldEl], rhs: &[PrimeFieldEl]) -> Vec<PrimeFieldEl> {
        mul_mod_monic(lhs, rhs, &self.modulus[..self.degree()], &self.prime_field)
    }

    ///
    /// Elements are identified with `{0, ..., q - 1}` via `sum_i c_i X^i -> sum_i c_i p^i`.
    ///
    fn encode(&self, coefficients: &[PrimeFieldEl]) -> u32 {
        let p = self.characteristic();
        coefficients.iter().rev().fold(0, |current, c| current * p + self.prime_field.smallest_positive_lift(c) as u32)
    }

    fn decode(&self, mut value: u32) -> Vec<PrimeFieldEl> {
        let p = self.characteristic();
        let mut result = Vec::with_capacity(self.degree());
        for _ in 0..self.degree() {
            result.push(self.prime_field.get_ring().from_u128((value % p) as u128));
            value /= p;
        }
        return result;
    }

    fn find_primitive_element(&self) -> Vec<PrimeFieldEl> {
        let one = self.decode(1);
        let prime_divisors = algorithms::int_factor::prime_divisors(self.order as u128);
        for candidate in 1..=self.order {
            let g = self.decode(candidate);
            let is_primitive = prime_divisors.iter().all(|r| {
                let power = algorithms::sqr_mul::generic_abs_square_and_multiply(
                    &g,
                    self.order as u128 / r,
                    |a| self.mul_poly(&a, &a),
                    |g, a| self.mul_poly(g, &a),
                    one.clone()
                );
                power != one
            });
            if is_primitive {
                return g;
            }
        }
        unreachable!("the multiplicative group of a finite field is cyclic")
    }

    fn fill_tables(&mut self) {
        let size = self.order as usize + 1;
        let g = self.find_primitive_element();
        event!(Level::TRACE, primitive_element = self.encode(&g), "found primitive element");

        let mut exp_table = vec![0; size - 1];
        let mut log_table = vec![self.order; size];
        let mut current = self.decode(1);
        for k in 0..(size - 1) {
            let value = self.encode(&current);
            assert!(log_table[value as usize] == self.order, "modulus is not irreducible");
            exp_table[k] = value;
            log_table[value as usize] = k as u32;
            current = self.mul_poly(&current, &g);
        }

        let p = self.characteristic();
        let zech_table = exp_table.iter().map(|value| {
            let constant_coeff = value % p;
            let one_plus_value = value - constant_coeff + (constant_coeff + 1) % p;
            log_table[one_plus_value as usize]
        }).collect();

        self.exp_table = exp_table;
        self.log_table = log_table;
        self.zech_table = zech_table;
        self.negation_offset = if p == 2 { 0 } else { self.order / 2 };
    }

    fn from_encoded(&self, value: u32) -> ZechLogFieldEl {
        ZechLogFieldEl(self.log_table[value as usize])
    }

    fn to_encoded(&self, x: &ZechLogFieldEl) -> u32 {
        if x.0 == self.order { 0 } else { self.exp_table[x.0 as usize] }
    }

    fn add_logs(&self, lhs: u32, rhs: u32) -> u32 {
        ((lhs as u64 + rhs as u64) % self.order as u64) as u32
    }
}

impl PartialEq for ZechLogFieldBase {

    fn eq(&self, other: &Self) -> bool {
        self.prime_field.get_ring() == other.prime_field.get_ring() && self.modulus == other.modulus
    }
}

impl RingBase for ZechLogFieldBase {

    type Element = ZechLogFieldEl;

    fn clone_el(&self, val: &Self::Element) -> Self::Element {
        *val
    }

    fn add_assign(&self, lhs: &mut Self::Element, rhs: Self::Element) {
        if lhs.0 == self.order {
            *lhs = rhs;
        } else if rhs.0 != self.order {
            // g^a + g^b = g^a (1 + g^(b - a))
            let diff = (rhs.0 + self.order - lhs.0) % self.order;
            let zech = self.zech_table[diff as usize];
            lhs.0 = if zech == self.order { self.order } else { self.add_logs(lhs.0, zech) };
        }
    }

    fn negate_inplace(&self, lhs: &mut Self::Element) {
        if lhs.0 != self.order {
            lhs.0 = self.add_logs(lhs.0, self.negation_offset);
        }
    }

    fn mul_assign(&self, lhs: &mut Self::Element, rhs: Self::Element) {
        if lhs.0 == self.order || rhs.0 == self.order {
            lhs.0 = self.order;
        } else {
            lhs.0 = self.add_logs(lhs.0, rhs.0);
        }
    }

    fn from_int(&self, value: i32) -> Self::Element {
        let constant = self.prime_field.get_ring().from_i128(value as i128);
        self.from_encoded(self.prime_field.smallest_positive_lift(&constant) as u32)
    }

    fn eq_el(&self, lhs: &Self::Element, rhs: &Self::Element) -> bool {
        lhs.0 == rhs.0
    }

    fn is_zero(&self, value: &Self::Element) -> bool {
        value.0 == self.order
    }

    fn is_one(&self, value: &Self::Element) -> bool {
        value.0 == 0
    }

    fn is_commutative(&self) -> bool { true }
    fn is_noetherian(&self) -> bool { true }

    fn dbg<'a>(&self, value: &Self::Element, out: &mut std::fmt::Formatter<'a>) -> std::fmt::Result {
        dbg_poly(&self.coefficients(value), &self.prime_field, &self.name, out)
    }
}

impl DivisibilityRing for ZechLogFieldBase {

    fn checked_left_div(&self, lhs: &Self::Element, rhs: &Self::Element) -> Option<Self::Element> {
        if lhs.0 == self.order {
            Some(*lhs)
        } else if rhs.0 == self.order {
            None
        } else {
            Some(ZechLogFieldEl(self.add_logs(lhs.0, self.order - rhs.0)))
        }
    }
}

impl Field for ZechLogFieldBase {}

impl FiniteRing for ZechLogFieldBase {

    fn random_element<G: FnMut() -> u64>(&self, mut rng: G) -> Self::Element {
        self.from_encoded((rng() % (self.order as u64 + 1)) as u32)
    }

    fn size(&self) -> Option<u128> {
        Some(self.order as u128 + 1)
    }

    fn elements<'a>(&'a self) -> Box<dyn 'a + Iterator<Item = Self::Element>> {
        Box::new((0..=self.order).map(|value| self.from_encoded(value)))
    }
}

impl FiniteFieldBackend for ZechLogFieldBase {

    fn prime_field(&self) -> PrimeField {
        self.prime_field
    }

    fn degree(&self) -> usize {
        ZechLogFieldBase::degree(self)
    }

    fn from_coefficients(&self, coefficients: &[PrimeFieldEl]) -> Self::Element {
        assert!(coefficients.len() <= ZechLogFieldBase::degree(self));
        self.from_encoded(self.encode(coefficients))
    }

    fn coefficients(&self, x: &Self::Element) -> Vec<PrimeFieldEl> {
        self.decode(self.to_encoded(x))
    }
}

impl SerializableElementRing for ZechLogFieldBase {

    fn deserialize<'de, D>(&self, deserializer: D) -> Result<Self::Element, D::Error>
        where D: Deserializer<'de>
    {
        let value = <u32 as Deserialize>::deserialize(deserializer)?;
        if value > self.order {
            return Err(serde::de::Error::custom(format!("{} does not represent an element of a field of size {}", value, self.order as u64 + 1)));
        }
        return Ok(self.from_encoded(value));
    }

    fn serialize<S>(&self, el: &Self::Element, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        <u32 as Serialize>::serialize(&self.to_encoded(el), serializer)
    }
}

#[cfg(test)]
use crate::rings::finite::FiniteRingStore;
#[cfg(test)]
use crate::field::FieldStore;
#[cfg(test)]
use super::FiniteFieldBackendStore;

#[cfg(test)]
fn test_field_f9() -> ZechLogField {
    let F3 = PrimeField::new(3);
    ZechLogField::new(F3, vec![F3.one(), F3.zero(), F3.one()], "i")
}

#[cfg(test)]
fn test_field_f16() -> ZechLogField {
    let F2 = PrimeField::new(2);
    ZechLogField::new(F2, vec![F2.one(), F2.one(), F2.zero(), F2.zero(), F2.one()], "a")
}

#[test]
fn test_ring_axioms() {
    let F9 = test_field_f9();
    crate::ring::generic_tests::test_ring_axioms(&F9, F9.elements());
    crate::field::generic_tests::test_field_axioms(&F9, F9.elements());
    crate::rings::finite::generic_tests::test_finite_ring_axioms(&F9);

    let F16 = test_field_f16();
    crate::ring::generic_tests::test_ring_axioms(&F16, F16.elements());
    crate::field::generic_tests::test_field_axioms(&F16, F16.elements());
    crate::rings::finite::generic_tests::test_finite_ring_axioms(&F16);
}

#[test]
fn test_arithmetic() {
    crate::tracing::LogAlgorithmSubscriber::init_test();
    let F9 = test_field_f9();
    let F3 = F9.prime_field();
    let i = F9.from_coefficients(&[F3.zero(), F3.one()]);
    let one_plus_i = F9.add_ref(&F9.one(), &i);
    assert_el_eq!(&F9, F9.neg_one(), F9.mul_ref(&i, &i));
    assert_el_eq!(&F9, F9.from_coefficients(&[F3.zero(), F3.from_int(2)]), F9.mul_ref(&one_plus_i, &one_plus_i));
    assert_el_eq!(&F9, F9.from_coefficients(&[F3.from_int(2), F3.one()]), F9.invert(&one_plus_i));
    assert_eq!(vec![F3.one(), F3.one()], F9.coefficients(&one_plus_i));
    assert_eq!("i + 1", format!("{}", F9.format(&one_plus_i)));
    assert_el_eq!(&F9, F9.zero(), F9.add(F9.from_int(2), F9.one()));

    let F16 = test_field_f16();
    let F2 = F16.prime_field();
    let a = F16.from_coefficients(&[F2.zero(), F2.one()]);
    assert_el_eq!(&F16, F16.one(), F16.pow(F16.clone_el(&a), 15));
    assert!(!F16.is_one(&F16.pow(F16.clone_el(&a), 5)));
    assert_el_eq!(&F16, F16.add_ref(&a, &F16.one()), F16.pow(a, 4));
}

#[test]
#[should_panic]
fn test_reducible_modulus() {
    let F3 = PrimeField::new(3);
    // X^2 - 1 = (X - 1)(X + 1)
    ZechLogField::new(F3, vec![F3.neg_one(), F3.zero(), F3.one()], "x");
}

#[test]
fn test_serialization() {
    let F9 = test_field_f9();
    crate::serialization::generic_tests::test_serialization(&F9, F9.elements());
}
