use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{event, instrument, Level};

use crate::algorithms;
use crate::algorithms::cantor_zassenhaus;
use crate::algorithms::miller_rabin::{add_mod, mul_mod};
use crate::error::ConfigurationError;
use crate::field::FieldStore;
use crate::ring::*;
use crate::rings::extension::number_field::*;
use crate::rings::integer::IntegerRing;
use crate::rings::poly::dense_poly::*;
use crate::rings::poly::*;
use crate::rings::rational::*;
use crate::rings::zn::*;

use super::ResidueIdeal;

///
/// A prime ideal `P` of the equation order `Z[θ]` of a number field `K = Q(θ)`, with `θ`
/// a root of the monic defining polynomial `f`.
///
/// `P` is described in two-element form `P = (p, g(θ))`, where `g mod p` is a monic
/// irreducible factor of `f mod p`. By Kummer-Dedekind, this gives all prime ideals of
/// `Z[θ]` lying over `p`, and we have `Z[θ]/P = Fp[X]/(g)`. We use the power basis of
/// `Fp[X]/(g)` to identify the residue field with `Fp^n`.
///
/// The valuation `v_P` is only computed correctly if `Z[θ]` is `p`-maximal, which is
/// checked by [`ResidueIdeal::check_supported()`] via the Dedekind criterion.
///
/// # Example
/// ```rust
/// # use residue_fields::ring::*;
/// # use residue_fields::rings::extension::number_field::*;
/// # use residue_fields::ideal::*;
/// # use residue_fields::ideal::number_field::*;
/// let K = NumberField::new(&[-7, 0, 0, 1], "a");
/// let primes = NumberFieldPrimeIdeal::primes_above(&K, 29).unwrap();
/// assert_eq!(2, primes.len());
/// let P = primes.iter().find(|P| P.residue_class_degree() == 2).unwrap();
/// assert!(P.is_prime());
/// assert!(P.check_supported().is_ok());
/// assert_eq!("Fractional ideal (29, a^2 + 16*a + 24)", format!("{}", P));
/// ```
///
pub struct NumberFieldPrimeIdeal {
    order: EquationOrder,
    poly_ring: DensePolyRing<PrimeField>,
    /// the monic polynomial `g mod p`
    factor: DensePolyRingEl<PrimeField>,
    ramification_index: usize,
    /// a lift of `(f mod p) / (g mod p)`; divided by `p`, it has valuation `-1` at `P`
    anti_uniformizer: EquationOrderEl
}

fn reduce_integer_poly(poly_ring: &DensePolyRing<PrimeField>, coefficients: &[i128]) -> DensePolyRingEl<PrimeField> {
    let Fp = poly_ring.base_ring();
    poly_ring.from_coefficients(coefficients.iter().map(|c| Fp.get_ring().from_i128(*c)))
}

fn lift_poly(poly_ring: &DensePolyRing<PrimeField>, f: &DensePolyRingEl<PrimeField>, len: usize) -> Vec<i128> {
    let Fp = poly_ring.base_ring();
    poly_ring.coefficient_vec(f, len).iter().map(|c| Fp.smallest_positive_lift(c) as i128).collect()
}

fn format_integer_poly(coefficients: &[i128], name: &str) -> String {
    let ZZX = DensePolyRing::new(IntegerRing::RING, name);
    format!("{}", ZZX.format(&ZZX.from_coefficients(coefficients.iter().copied())))
}

fn mul_poly_mod(lhs: &[u128], rhs: &[u128], modulus: u128) -> Vec<u128> {
    let mut result = vec![0; lhs.len() + rhs.len() - 1];
    for (i, a) in lhs.iter().enumerate() {
        for (j, b) in rhs.iter().enumerate() {
            result[i + j] = add_mod(result[i + j], mul_mod(*a, *b, modulus), modulus);
        }
    }
    return result;
}

impl NumberFieldPrimeIdeal {

    ///
    /// Creates the ideal `(p, g(θ))` of the equation order of `field`, where `g` is given
    /// by its coefficients, starting with the constant one.
    ///
    /// Only `g mod p` matters, and it is replaced by `gcd(g mod p, f mod p)`. In particular,
    /// if `g` is zero, this gives the ideal `(p)`. Fails if `p` is not prime or `g` is
    /// coprime to `f` modulo `p`. Whether the resulting ideal is prime is checked by
    /// [`ResidueIdeal::is_prime()`].
    ///
    pub fn new(field: NumberField, p: u64, generator: &[i128]) -> Result<Self, ConfigurationError> {
        let ideal_name = || format!("({}, {})", p, format_integer_poly(generator, field.variable_name()));
        if !algorithms::miller_rabin::is_prime(p as u128, 10) {
            return Err(ConfigurationError::NotPrime { ideal: ideal_name() });
        }
        let poly_ring = DensePolyRing::new(PrimeField::new(p), field.variable_name());
        let f = reduce_integer_poly(&poly_ring, &field.defining_polynomial());
        let g = reduce_integer_poly(&poly_ring, generator);
        let factor = poly_ring.ideal_gen(&g, &f);
        if poly_ring.degree(&factor) == Some(0) {
            return Err(ConfigurationError::NotPrime { ideal: ideal_name() });
        }
        return Ok(Self::from_factor(field.equation_order(), poly_ring, factor));
    }

    ///
    /// Returns all prime ideals of the equation order of `field` that lie above `p`.
    ///
    #[instrument(skip_all, level = "trace")]
    pub fn primes_above(field: &NumberField, p: u64) -> Result<Vec<Self>, ConfigurationError> {
        if !algorithms::miller_rabin::is_prime(p as u128, 10) {
            return Err(ConfigurationError::NotPrime { ideal: format!("({})", p) });
        }
        let poly_ring = DensePolyRing::new(PrimeField::new(p), field.variable_name());
        let f = reduce_integer_poly(&poly_ring, &field.defining_polynomial());
        let (factors, _) = cantor_zassenhaus::factor(&poly_ring, f);
        event!(Level::DEBUG, p, prime_count = factors.len(), "decomposed prime in equation order");
        return Ok(factors.into_iter().map(|(g, _)| Self::from_factor(field.equation_order(), poly_ring.clone(), g)).collect());
    }

    ///
    /// Creates the ideal generated by `x`, if this is a prime ideal whose arithmetic is
    /// supported. Since `x` is then an element of norm `p^k`, this is found among the
    /// primes above `p`.
    ///
    pub fn principal(field: &NumberField, x: &NumberFieldEl) -> Result<Self, ConfigurationError> {
        let not_prime = || ConfigurationError::NotPrime { ideal: format!("({})", field.format(x)) };
        let a = field.as_order_element(x).ok_or_else(not_prime)?;
        let norm = RationalField::RING.as_integer(&field.norm(x)).ok_or_else(not_prime)?.unsigned_abs();
        if norm <= 1 {
            return Err(not_prime());
        }
        let factorization = algorithms::int_factor::factor(norm);
        let &[(p, degree)] = factorization.as_slice() else {
            return Err(not_prime());
        };
        let p = u64::try_from(p).map_err(|_| not_prime())?;
        let candidates = Self::primes_above(field, p)?;
        for candidate in &candidates {
            candidate.check_supported()?;
        }
        // N((x)) = N(P)^v_P(x) * ..., so the norm forces (x) = P
        return candidates.into_iter()
            .find(|candidate| candidate.residue_class_degree() == degree && candidate.valuation(&a) == Some(1))
            .ok_or_else(not_prime);
    }

    fn from_factor(order: EquationOrder, poly_ring: DensePolyRing<PrimeField>, factor: DensePolyRingEl<PrimeField>) -> Self {
        let f = reduce_integer_poly(&poly_ring, &order.number_field().defining_polynomial());
        let (cofactor, rem) = poly_ring.div_rem_monic(f, &factor);
        assert!(poly_ring.is_zero(&rem));
        let mut ramification_index = 1;
        let mut current = poly_ring.clone_el(&cofactor);
        loop {
            let (quo, rem) = poly_ring.div_rem_monic(poly_ring.clone_el(&current), &factor);
            if !poly_ring.is_zero(&rem) {
                break;
            }
            current = quo;
            ramification_index += 1;
        }
        let anti_uniformizer = order.from_coordinates(lift_poly(&poly_ring, &cofactor, order.rank()));
        NumberFieldPrimeIdeal { order, poly_ring, factor, ramification_index, anti_uniformizer }
    }

    pub fn number_field(&self) -> &NumberField {
        self.order.number_field()
    }

    ///
    /// Returns the exponent `e` of `P` in the factorization of `p Z[θ]`, assuming that
    /// `Z[θ]` is `p`-maximal.
    ///
    pub fn ramification_index(&self) -> usize {
        self.ramification_index
    }

    ///
    /// Returns the coefficients of the monic polynomial `g mod p` with `P = (p, g(θ))`,
    /// as integers in `[0, p)`.
    ///
    pub fn residue_polynomial(&self) -> Vec<u64> {
        let Fp = self.poly_ring.base_ring();
        self.poly_ring.coefficient_vec(&self.factor, self.residue_class_degree() + 1).iter().map(|c| Fp.smallest_positive_lift(c)).collect()
    }

    ///
    /// Returns an element of `Z[θ]` of valuation `1` at `P`.
    ///
    pub fn uniformizer(&self) -> EquationOrderEl {
        let p = self.characteristic() as i128;
        if self.residue_class_degree() == self.order.rank() {
            return self.integer(p);
        }
        let mut result = self.order.from_coordinates(lift_poly(&self.poly_ring, &self.factor, self.order.rank()));
        if self.valuation(&result) != Some(1) {
            self.order.add_assign(&mut result, self.integer(p));
        }
        return result;
    }

    fn integer(&self, value: i128) -> EquationOrderEl {
        self.order.from_coordinates((0..self.order.rank()).map(|i| if i == 0 { value } else { 0 }).collect())
    }

    fn reduce(&self, f: DensePolyRingEl<PrimeField>) -> Vec<PrimeFieldEl> {
        let P = &self.poly_ring;
        P.coefficient_vec(&P.div_rem_monic(f, &self.factor).1, self.residue_class_degree())
    }
}

impl Clone for NumberFieldPrimeIdeal {

    fn clone(&self) -> Self {
        NumberFieldPrimeIdeal {
            order: self.order.clone(),
            poly_ring: self.poly_ring.clone(),
            factor: self.poly_ring.clone_el(&self.factor),
            ramification_index: self.ramification_index,
            anti_uniformizer: self.anti_uniformizer.clone()
        }
    }
}

impl PartialEq for NumberFieldPrimeIdeal {

    fn eq(&self, other: &Self) -> bool {
        self.order.get_ring() == other.order.get_ring() && self.characteristic() == other.characteristic() && self.residue_polynomial() == other.residue_polynomial()
    }
}

impl Eq for NumberFieldPrimeIdeal {}

impl Hash for NumberFieldPrimeIdeal {

    fn hash<H: Hasher>(&self, state: &mut H) {
        self.number_field().defining_polynomial().hash(state);
        self.variable_name().hash(state);
        self.characteristic().hash(state);
        self.residue_polynomial().hash(state);
    }
}

impl std::fmt::Debug for NumberFieldPrimeIdeal {

    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "NumberFieldPrimeIdeal({}, {})", self.characteristic(), self.poly_ring.format(&self.factor))
    }
}

impl Display for NumberFieldPrimeIdeal {

    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.residue_class_degree() == self.order.rank() {
            return write!(f, "Fractional ideal ({})", self.characteristic());
        }
        let lifted_factor = lift_poly(&self.poly_ring, &self.factor, self.residue_class_degree() + 1);
        write!(f, "Fractional ideal ({}, ", self.characteristic())?;
        dbg_poly(&lifted_factor, IntegerRing::RING, self.variable_name(), f)?;
        write!(f, ")")
    }
}

#[derive(Serialize, Deserialize)]
struct NumberFieldPrimeIdealData {
    defining_polynomial: Vec<i128>,
    variable_name: String,
    characteristic: u64,
    factor: Vec<u64>
}

impl Serialize for NumberFieldPrimeIdeal {

    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        NumberFieldPrimeIdealData {
            defining_polynomial: self.number_field().defining_polynomial(),
            variable_name: self.variable_name().to_owned(),
            characteristic: self.characteristic(),
            factor: self.residue_polynomial()
        }.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NumberFieldPrimeIdeal {

    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: Deserializer<'de>
    {
        let data = NumberFieldPrimeIdealData::deserialize(deserializer)?;
        if data.defining_polynomial.len() < 2 || data.defining_polynomial.last() != Some(&1) {
            return Err(serde::de::Error::custom("defining polynomial must be monic and nonconstant"));
        }
        let field = NumberField::new(&data.defining_polynomial, &data.variable_name);
        let factor = data.factor.iter().map(|c| *c as i128).collect::<Vec<_>>();
        return NumberFieldPrimeIdeal::new(field, data.characteristic, &factor).map_err(serde::de::Error::custom);
    }
}

impl ResidueIdeal for NumberFieldPrimeIdeal {

    type Order = EquationOrder;
    type FractionField = NumberField;

    fn order(&self) -> &Self::Order {
        &self.order
    }

    fn fraction_field(&self) -> &Self::FractionField {
        self.order.number_field()
    }

    fn characteristic(&self) -> u64 {
        self.poly_ring.base_ring().modulus()
    }

    fn prime_field(&self) -> PrimeField {
        *self.poly_ring.base_ring()
    }

    fn residue_class_degree(&self) -> usize {
        self.poly_ring.degree(&self.factor).unwrap()
    }

    fn is_prime(&self) -> bool {
        cantor_zassenhaus::is_irreducible(&self.poly_ring, &self.factor)
    }

    ///
    /// Checks that `Z[θ]` is `p`-maximal using the Dedekind criterion: Write
    /// `f = prod g_i^e_i mod p`, and `f = g h + p F` with `g = prod g_i` and
    /// `h = prod g_i^(e_i - 1)`. Then `Z[θ]` is `p`-maximal if and only if
    /// `gcd(F, g, h) = 1` modulo `p`.
    ///
    #[instrument(skip_all, level = "trace")]
    fn check_supported(&self) -> Result<(), ConfigurationError> {
        let P = &self.poly_ring;
        let Fp = self.prime_field();
        let p = self.characteristic() as u128;
        let modulus = p * p;
        let f = self.number_field().defining_polynomial();
        let (factors, _) = cantor_zassenhaus::factor(P, reduce_integer_poly(P, &f));

        let mut radical = vec![1];
        let mut cofactor = vec![1];
        for (g, e) in &factors {
            let lifted = lift_poly(P, g, P.degree(g).unwrap() + 1).into_iter().map(|c| c as u128).collect::<Vec<_>>();
            radical = mul_poly_mod(&radical, &lifted, modulus);
            for _ in 1..*e {
                cofactor = mul_poly_mod(&cofactor, &lifted, modulus);
            }
        }
        let product = mul_poly_mod(&radical, &cofactor, modulus);
        debug_assert_eq!(f.len(), product.len());

        // product = f mod p, so all coefficients of product - f mod p^2 are divisible by p
        let remainder = P.from_coefficients(product.iter().zip(f.iter()).map(|(a, c)| {
            let c = if *c >= 0 { c.unsigned_abs() % modulus } else { (modulus - c.unsigned_abs() % modulus) % modulus };
            let difference = if *a >= c { *a - c } else { modulus - (c - *a) };
            debug_assert!(difference % p == 0);
            Fp.get_ring().from_u128(difference / p)
        }));
        let radical = P.from_coefficients(radical.iter().map(|c| Fp.get_ring().from_u128(*c)));
        let cofactor = P.from_coefficients(cofactor.iter().map(|c| Fp.get_ring().from_u128(*c)));
        let gcd = P.ideal_gen(&P.ideal_gen(&remainder, &radical), &cofactor);

        if P.degree(&gcd) == Some(0) {
            return Ok(());
        }
        event!(Level::DEBUG, p = self.characteristic(), "equation order is not p-maximal");
        return Err(ConfigurationError::UnsupportedRing {
            reason: format!("the equation order of {} is not maximal at {}", format_integer_poly(&f, self.variable_name()), p)
        });
    }

    fn variable_name(&self) -> &str {
        self.number_field().variable_name()
    }

    fn generator(&self) -> EquationOrderEl {
        self.order.generator()
    }

    fn to_vs(&self, x: &EquationOrderEl) -> Vec<PrimeFieldEl> {
        self.reduce(reduce_integer_poly(&self.poly_ring, self.order.coordinates(x)))
    }

    fn try_to_vs(&self, x: &NumberFieldEl) -> Option<Vec<PrimeFieldEl>> {
        let QQ = RationalField::RING;
        let Fp = self.prime_field();
        let coordinates = self.number_field().coordinates(x).iter().map(|c| {
            let den = Fp.get_ring().from_i128(*QQ.den(c));
            if Fp.is_zero(&den) {
                None
            } else {
                Some(Fp.div(&Fp.get_ring().from_i128(*QQ.num(c)), &den))
            }
        }).collect::<Option<Vec<_>>>()?;
        return Some(self.reduce(self.poly_ring.from_coefficients(coordinates.into_iter())));
    }

    fn to_order(&self, v: &[PrimeFieldEl]) -> EquationOrderEl {
        assert_eq!(self.residue_class_degree(), v.len());
        let Fp = self.prime_field();
        let rank = self.order.rank();
        self.order.from_coordinates((0..rank).map(|i| if i < v.len() { Fp.smallest_positive_lift(&v[i]) as i128 } else { 0 }).collect())
    }

    fn embed(&self, x: EquationOrderEl) -> NumberFieldEl {
        self.number_field().embed(x)
    }

    fn integral_split(&self, x: &NumberFieldEl) -> (EquationOrderEl, EquationOrderEl) {
        let (numerator, denominator) = self.number_field().integral_split(x);
        (numerator, self.integer(denominator))
    }

    ///
    /// Multiplying by `b` and dividing by `p` decreases `v_P` by one, and does not change
    /// integrality at the other primes above `p`. Hence `v_P(x)` is the number of times
    /// this can be done while staying in `Z[θ]`.
    ///
    fn valuation(&self, x: &EquationOrderEl) -> Option<usize> {
        if self.order.is_zero(x) {
            return None;
        }
        let p = self.characteristic() as i128;
        let mut current = self.order.clone_el(x);
        let mut result = 0;
        loop {
            let next = self.order.mul_ref(&current, &self.anti_uniformizer);
            if self.order.coordinates(&next).iter().any(|c| c % p != 0) {
                return Some(result);
            }
            current = self.order.from_coordinates(self.order.coordinates(&next).iter().map(|c| c / p).collect());
            result += 1;
        }
    }

    fn divide_by_uniformizer_power(&self, x: EquationOrderEl, power: usize) -> NumberFieldEl {
        let K = self.number_field();
        let QQ = RationalField::RING;
        let p = self.characteristic() as i128;
        let step = K.from_coordinates(self.order.coordinates(&self.anti_uniformizer).iter().map(|c| QQ.from_fraction(*c, p)).collect());
        return K.mul(K.embed(x), K.pow(step, power as u128));
    }
}

#[cfg(test)]
fn test_field() -> NumberField {
    NumberField::new(&[-7, 0, 0, 1], "a")
}

#[cfg(test)]
fn prime_of_degree(primes: &[NumberFieldPrimeIdeal], degree: usize) -> NumberFieldPrimeIdeal {
    primes.iter().find(|P| P.residue_class_degree() == degree).unwrap().clone()
}

#[test]
fn test_primes_above() {
    crate::tracing::LogAlgorithmSubscriber::init_test();
    let K = test_field();
    // x^3 - 7 = (x + 13) (x^2 + 16x + 24) modulo 29
    let primes = NumberFieldPrimeIdeal::primes_above(&K, 29).unwrap();
    assert_eq!(2, primes.len());
    let P1 = prime_of_degree(&primes, 1);
    let P2 = prime_of_degree(&primes, 2);
    assert_eq!(vec![13, 1], P1.residue_polynomial());
    assert_eq!(vec![24, 16, 1], P2.residue_polynomial());
    for P in &primes {
        assert!(P.is_prime());
        assert!(P.check_supported().is_ok());
        assert_eq!(1, P.ramification_index());
    }
    assert_eq!(P2, NumberFieldPrimeIdeal::new(K.clone(), 29, &[24, 16, 1]).unwrap());
    assert_eq!(P1, NumberFieldPrimeIdeal::new(K.clone(), 29, &[-16, 1]).unwrap());
    assert!(NumberFieldPrimeIdeal::primes_above(&K, 30).is_err());
}

#[test]
fn test_new() {
    let K = test_field();
    assert!(NumberFieldPrimeIdeal::new(K.clone(), 91, &[0, 1]).is_err());
    assert!(matches!(NumberFieldPrimeIdeal::new(K.clone(), 29, &[1]), Err(ConfigurationError::NotPrime { .. })));
    // (29) itself is not prime, since 29 splits
    let not_prime = NumberFieldPrimeIdeal::new(K.clone(), 29, &[]).unwrap();
    assert_eq!(3, not_prime.residue_class_degree());
    assert!(!not_prime.is_prime());
}

#[test]
fn test_display() {
    let K = test_field();
    let primes = NumberFieldPrimeIdeal::primes_above(&K, 29).unwrap();
    assert_eq!("Fractional ideal (29, a + 13)", format!("{}", prime_of_degree(&primes, 1)));
    assert_eq!("Fractional ideal (29, a^2 + 16*a + 24)", format!("{}", prime_of_degree(&primes, 2)));
    // x^3 - 2 is irreducible modulo 7, since 2 is not a cube modulo 7
    let L = NumberField::new(&[-2, 0, 0, 1], "b");
    let inert = NumberFieldPrimeIdeal::primes_above(&L, 7).unwrap();
    assert_eq!(1, inert.len());
    assert_eq!("Fractional ideal (7)", format!("{}", inert[0]));
}

#[test]
fn test_valuation() {
    let K = test_field();
    let O = K.equation_order();
    let P2 = prime_of_degree(&NumberFieldPrimeIdeal::primes_above(&K, 29).unwrap(), 2);
    let g = O.from_coordinates(vec![24, 16, 1]);
    assert_eq!(Some(1), P2.valuation(&g));
    assert_eq!(Some(2), P2.valuation(&O.pow(O.clone_el(&g), 2)));
    assert_eq!(Some(1), P2.valuation(&O.from_int(29)));
    assert_eq!(Some(0), P2.valuation(&O.from_coordinates(vec![13, 1, 0])));
    assert_eq!(None, P2.valuation(&O.zero()));
    assert_eq!(Some(1), P2.valuation(&P2.uniformizer()));

    let z = P2.divide_by_uniformizer_power(O.pow(O.clone_el(&g), 2), 2);
    assert!(P2.try_to_vs(&z).is_some());
    assert!(!P2.try_to_vs(&z).unwrap().iter().all(|c| P2.prime_field().is_zero(c)));
}

#[test]
#[should_panic(expected = "integer overflow")]
fn test_valuation_out_of_range() {
    let K = test_field();
    let O = K.equation_order();
    let P2 = prime_of_degree(&NumberFieldPrimeIdeal::primes_above(&K, 29).unwrap(), 2);
    P2.valuation(&O.from_coordinates(vec![i128::MAX / 4, 0, 0]));
}

#[test]
#[should_panic(expected = "integer overflow")]
fn test_divide_by_uniformizer_power_out_of_range() {
    let K = test_field();
    let O = K.equation_order();
    let P2 = prime_of_degree(&NumberFieldPrimeIdeal::primes_above(&K, 29).unwrap(), 2);
    P2.divide_by_uniformizer_power(O.one(), 40);
}

#[test]
fn test_ramified_prime() {
    let K = test_field();
    let O = K.equation_order();
    // x^3 - 7 = x^3 modulo 7
    let primes = NumberFieldPrimeIdeal::primes_above(&K, 7).unwrap();
    assert_eq!(1, primes.len());
    let P = &primes[0];
    assert_eq!(3, P.ramification_index());
    assert!(P.check_supported().is_ok());
    assert_eq!(Some(3), P.valuation(&O.from_int(7)));
    assert_eq!(Some(1), P.valuation(&O.generator()));
    assert_el_eq!(&O, O.generator(), P.uniformizer());
    assert_eq!(*P, NumberFieldPrimeIdeal::principal(&K, &K.generator()).unwrap());
}

#[test]
fn test_principal() {
    let K = test_field();
    let QQ = RationalField::RING;
    // N(a + 13) = 2204 = 2^2 * 19 * 29
    assert!(NumberFieldPrimeIdeal::principal(&K, &K.add(K.generator(), K.from_int(13))).is_err());
    assert!(NumberFieldPrimeIdeal::principal(&K, &K.from_coordinates(vec![QQ.from_fraction(1, 2), QQ.zero(), QQ.zero()])).is_err());
    assert!(NumberFieldPrimeIdeal::principal(&K, &K.one()).is_err());

    let L = NumberField::new(&[-2, 0, 0, 1], "b");
    let inert = NumberFieldPrimeIdeal::primes_above(&L, 7).unwrap().pop().unwrap();
    assert_eq!(inert, NumberFieldPrimeIdeal::principal(&L, &L.from_int(7)).unwrap());
    assert_el_eq!(&L.equation_order(), L.equation_order().from_int(7), inert.uniformizer());
}

#[test]
fn test_check_supported() {
    // Z[sqrt(5)] is not maximal at 2
    let K = NumberField::new(&[-5, 0, 1], "a");
    let P = NumberFieldPrimeIdeal::primes_above(&K, 2).unwrap().pop().unwrap();
    assert_eq!(2, P.ramification_index());
    assert!(matches!(P.check_supported(), Err(ConfigurationError::UnsupportedRing { .. })));

    // Z[i] is maximal
    let K = NumberField::new(&[1, 0, 1], "i");
    let P = NumberFieldPrimeIdeal::primes_above(&K, 2).unwrap().pop().unwrap();
    assert_eq!(2, P.ramification_index());
    assert!(P.check_supported().is_ok());
}

#[test]
fn test_to_vs() {
    let K = test_field();
    let O = K.equation_order();
    let QQ = RationalField::RING;
    let P2 = prime_of_degree(&NumberFieldPrimeIdeal::primes_above(&K, 29).unwrap(), 2);
    let Fp = P2.prime_field();
    // a^2 = -16a - 24 = 13a + 5 modulo P2
    assert_eq!(vec![Fp.from_int(5), Fp.from_int(13)], P2.to_vs(&O.from_coordinates(vec![0, 0, 1])));
    assert_el_eq!(&O, O.from_coordinates(vec![5, 13, 0]), P2.to_order(&P2.to_vs(&O.from_coordinates(vec![0, 0, 1]))));
    let half = K.from_coordinates(vec![QQ.from_fraction(1, 2), QQ.zero(), QQ.zero()]);
    assert_eq!(Some(vec![Fp.from_int(15), Fp.zero()]), P2.try_to_vs(&half));
    let small = K.from_coordinates(vec![QQ.from_fraction(1, 29), QQ.zero(), QQ.zero()]);
    assert_eq!(None, P2.try_to_vs(&small));
    let (numerator, denominator) = P2.integral_split(&half);
    assert_el_eq!(&O, O.one(), numerator);
    assert_el_eq!(&O, O.from_int(2), denominator);
}

#[test]
fn test_serialization() {
    let K = test_field();
    let P2 = prime_of_degree(&NumberFieldPrimeIdeal::primes_above(&K, 29).unwrap(), 2);
    let json = serde_json::to_string(&P2).unwrap();
    assert_eq!(r#"{"defining_polynomial":[-7,0,0,1],"variable_name":"a","characteristic":29,"factor":[24,16,1]}"#, json);
    assert_eq!(P2, serde_json::from_str(&json).unwrap());
    assert!(serde_json::from_str::<NumberFieldPrimeIdeal>(r#"{"defining_polynomial":[-7,0,0,2],"variable_name":"a","characteristic":29,"factor":[24,16,1]}"#).is_err());
}
