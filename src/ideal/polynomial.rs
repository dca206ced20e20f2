use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::algorithms;
use crate::error::ConfigurationError;
use crate::ring::*;
use crate::rings::poly::dense_poly::*;
use crate::rings::poly::*;
use crate::rings::rational_function::*;
use crate::rings::zn::*;

use super::ResidueIdeal;

///
/// The ideal `(g)` of the polynomial ring `Fp[t]` over a prime field, where `g` is a monic
/// polynomial. It is prime if and only if `g` is irreducible, and then its residue field
/// is `Fp[t]/(g)`, of degree `deg(g)` over `Fp`.
///
/// As basis of `Fp[t]/(g)` over `Fp`, we use the power basis `1, t, ..., t^(n - 1)`.
///
/// # Example
/// ```rust
/// # use residue_fields::ring::*;
/// # use residue_fields::rings::zn::*;
/// # use residue_fields::rings::poly::*;
/// # use residue_fields::rings::rational_function::*;
/// # use residue_fields::ideal::*;
/// # use residue_fields::ideal::polynomial::*;
/// let K = RationalFunctionField::new(PrimeField::new(5), "t");
/// let P = K.poly_ring();
/// let g = P.add(P.pow(P.indeterminate(), 2), P.from_int(2));
/// let ideal = PolyPrimeIdeal::new(K.clone(), &g).unwrap();
/// assert!(ideal.is_prime());
/// assert_eq!(2, ideal.residue_class_degree());
/// assert_eq!("Principal ideal (t^2 + 2) of Univariate Polynomial Ring in t over Finite Field of size 5", format!("{}", ideal));
/// ```
///
pub struct PolyPrimeIdeal {
    function_field: RationalFunctionField,
    modulus: DensePolyRingEl<PrimeField>
}

impl PolyPrimeIdeal {

    ///
    /// Creates the ideal of `Fp[t]` generated by `g`, where `Fp[t]` is the polynomial ring
    /// whose fraction field is the given function field.
    ///
    pub fn new(function_field: RationalFunctionField, g: &DensePolyRingEl<PrimeField>) -> Result<Self, ConfigurationError> {
        let P = function_field.poly_ring();
        match P.degree(g) {
            None | Some(0) => return Err(ConfigurationError::NotPrime { ideal: format!("({})", P.format(g)) }),
            Some(_) => {}
        };
        let modulus = P.normalize(P.clone_el(g));
        return Ok(PolyPrimeIdeal { function_field, modulus });
    }

    ///
    /// Creates the ideal generated by the given rational function, which must be a polynomial.
    ///
    pub fn principal(function_field: RationalFunctionField, x: &RationalFunctionFieldEl) -> Result<Self, ConfigurationError> {
        if !function_field.poly_ring().is_one(function_field.den(x)) {
            return Err(ConfigurationError::NotPrime { ideal: format!("({})", function_field.format(x)) });
        }
        let g = function_field.poly_ring().clone_el(function_field.num(x));
        return Self::new(function_field, &g);
    }

    ///
    /// Returns the monic generator `g` of this ideal.
    ///
    pub fn modulus(&self) -> &DensePolyRingEl<PrimeField> {
        &self.modulus
    }

    fn poly_ring(&self) -> &DensePolyRing<PrimeField> {
        self.function_field.poly_ring()
    }

    fn reduce(&self, f: DensePolyRingEl<PrimeField>) -> DensePolyRingEl<PrimeField> {
        self.poly_ring().div_rem_monic(f, &self.modulus).1
    }

    fn modulus_coefficients(&self) -> Vec<u64> {
        let P = self.poly_ring();
        P.coefficient_vec(&self.modulus, self.residue_class_degree() + 1).iter().map(|c| P.base_ring().smallest_positive_lift(c)).collect()
    }
}

impl Clone for PolyPrimeIdeal {

    fn clone(&self) -> Self {
        PolyPrimeIdeal {
            function_field: self.function_field.clone(),
            modulus: self.poly_ring().clone_el(&self.modulus)
        }
    }
}

impl PartialEq for PolyPrimeIdeal {

    fn eq(&self, other: &Self) -> bool {
        self.function_field.get_ring() == other.function_field.get_ring() && self.poly_ring().eq_el(&self.modulus, &other.modulus)
    }
}

impl Eq for PolyPrimeIdeal {}

impl Hash for PolyPrimeIdeal {

    fn hash<H: Hasher>(&self, state: &mut H) {
        self.characteristic().hash(state);
        self.variable_name().hash(state);
        self.modulus_coefficients().hash(state);
    }
}

impl std::fmt::Debug for PolyPrimeIdeal {

    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "PolyPrimeIdeal({})", self.poly_ring().format(&self.modulus))
    }
}

impl Display for PolyPrimeIdeal {

    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Principal ideal ({}) of Univariate Polynomial Ring in {} over Finite Field of size {}", self.poly_ring().format(&self.modulus), self.variable_name(), self.characteristic())
    }
}

#[derive(Serialize, Deserialize)]
struct PolyPrimeIdealData {
    characteristic: u64,
    variable_name: String,
    modulus: Vec<u64>
}

impl Serialize for PolyPrimeIdeal {

    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        PolyPrimeIdealData {
            characteristic: self.characteristic(),
            variable_name: self.variable_name().to_owned(),
            modulus: self.modulus_coefficients()
        }.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PolyPrimeIdeal {

    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: Deserializer<'de>
    {
        let data = PolyPrimeIdealData::deserialize(deserializer)?;
        if !algorithms::miller_rabin::is_prime(data.characteristic as u128, 10) {
            return Err(serde::de::Error::custom(format!("characteristic {} is not prime", data.characteristic)));
        }
        let function_field = RationalFunctionField::new(PrimeField::new(data.characteristic), &data.variable_name);
        let P = function_field.poly_ring();
        let g = P.from_coefficients(data.modulus.iter().map(|c| P.base_ring().get_ring().from_u128(*c as u128)));
        return PolyPrimeIdeal::new(function_field, &g).map_err(serde::de::Error::custom);
    }
}

impl ResidueIdeal for PolyPrimeIdeal {

    type Order = DensePolyRing<PrimeField>;
    type FractionField = RationalFunctionField;

    fn order(&self) -> &Self::Order {
        self.poly_ring()
    }

    fn fraction_field(&self) -> &Self::FractionField {
        &self.function_field
    }

    fn characteristic(&self) -> u64 {
        self.poly_ring().base_ring().modulus()
    }

    fn prime_field(&self) -> PrimeField {
        *self.poly_ring().base_ring()
    }

    fn residue_class_degree(&self) -> usize {
        self.poly_ring().degree(&self.modulus).unwrap()
    }

    fn is_prime(&self) -> bool {
        algorithms::cantor_zassenhaus::is_irreducible(self.poly_ring(), &self.modulus)
    }

    fn variable_name(&self) -> &str {
        self.poly_ring().indeterminate_name()
    }

    fn generator(&self) -> DensePolyRingEl<PrimeField> {
        self.poly_ring().indeterminate()
    }

    fn to_vs(&self, x: &DensePolyRingEl<PrimeField>) -> Vec<PrimeFieldEl> {
        let P = self.poly_ring();
        P.coefficient_vec(&self.reduce(P.clone_el(x)), self.residue_class_degree())
    }

    fn try_to_vs(&self, x: &RationalFunctionFieldEl) -> Option<Vec<PrimeFieldEl>> {
        let P = self.poly_ring();
        let K = &self.function_field;
        let den = self.reduce(P.clone_el(K.den(x)));
        if P.is_zero(&den) {
            return None;
        }
        let (den_inv, _, gcd) = P.extended_ideal_gen(&den, &self.modulus);
        if !P.is_one(&gcd) {
            return None;
        }
        return Some(self.to_vs(&P.mul_ref(K.num(x), &den_inv)));
    }

    fn to_order(&self, v: &[PrimeFieldEl]) -> DensePolyRingEl<PrimeField> {
        assert_eq!(self.residue_class_degree(), v.len());
        self.poly_ring().from_coefficients(v.iter().copied())
    }

    fn embed(&self, x: DensePolyRingEl<PrimeField>) -> RationalFunctionFieldEl {
        self.function_field.embed(x)
    }

    fn integral_split(&self, x: &RationalFunctionFieldEl) -> (DensePolyRingEl<PrimeField>, DensePolyRingEl<PrimeField>) {
        let P = self.poly_ring();
        (P.clone_el(self.function_field.num(x)), P.clone_el(self.function_field.den(x)))
    }

    fn valuation(&self, x: &DensePolyRingEl<PrimeField>) -> Option<usize> {
        let P = self.poly_ring();
        if P.is_zero(x) {
            return None;
        }
        let mut current = P.clone_el(x);
        let mut result = 0;
        loop {
            let (quo, rem) = P.div_rem_monic(P.clone_el(&current), &self.modulus);
            if !P.is_zero(&rem) {
                return Some(result);
            }
            current = quo;
            result += 1;
        }
    }

    fn divide_by_uniformizer_power(&self, x: DensePolyRingEl<PrimeField>, power: usize) -> RationalFunctionFieldEl {
        let P = self.poly_ring();
        self.function_field.from_fraction(x, P.pow(P.clone_el(&self.modulus), power as u128))
    }
}

#[cfg(test)]
fn test_ideal() -> PolyPrimeIdeal {
    let K = RationalFunctionField::new(PrimeField::new(5), "t");
    let P = K.poly_ring();
    let g = P.from_coefficients([2, 0, 1].into_iter().map(|c| P.base_ring().from_int(c)));
    PolyPrimeIdeal::new(K.clone(), &g).unwrap()
}

#[test]
fn test_to_vs() {
    let ideal = test_ideal();
    let P = ideal.order();
    let Fp = ideal.prime_field();
    let t = P.indeterminate();
    // t^3 = -2t = 3t mod t^2 + 2
    assert_eq!(vec![Fp.zero(), Fp.from_int(3)], ideal.to_vs(&P.pow(P.clone_el(&t), 3)));
    assert_el_eq!(P, P.add(P.clone_el(&t), P.one()), ideal.to_order(&[Fp.one(), Fp.one()]));
    let K = ideal.fraction_field();
    // 1/t = -t/2 = 2t mod t^2 + 2
    assert_eq!(Some(vec![Fp.zero(), Fp.from_int(2)]), ideal.try_to_vs(&K.from_fraction(P.one(), P.clone_el(&t))));
    assert_eq!(None, ideal.try_to_vs(&K.from_fraction(P.one(), P.clone_el(ideal.modulus()))));
}

#[test]
fn test_valuation() {
    let ideal = test_ideal();
    let P = ideal.order();
    let K = ideal.fraction_field();
    let g = P.clone_el(ideal.modulus());
    let t_plus_one = P.add(P.indeterminate(), P.one());
    let x = P.mul(P.pow(P.clone_el(&g), 3), P.clone_el(&t_plus_one));
    assert_eq!(Some(3), ideal.valuation(&x));
    assert_eq!(Some(0), ideal.valuation(&t_plus_one));
    assert_eq!(None, ideal.valuation(&P.zero()));
    assert_el_eq!(K, K.embed(t_plus_one), ideal.divide_by_uniformizer_power(x, 3));
}

#[test]
fn test_is_prime() {
    let K = RationalFunctionField::new(PrimeField::new(5), "t");
    let P = K.poly_ring();
    assert!(test_ideal().is_prime());
    // t^2 + 1 = (t + 2)(t - 2) over F5
    let reducible = P.from_coefficients([1, 0, 1].into_iter().map(|c| P.base_ring().from_int(c)));
    assert!(!PolyPrimeIdeal::new(K.clone(), &reducible).unwrap().is_prime());
    assert!(PolyPrimeIdeal::new(K.clone(), &P.from_int(3)).is_err());
    assert!(PolyPrimeIdeal::principal(K.clone(), &K.from_fraction(P.one(), P.indeterminate())).is_err());
    let scaled = P.inclusion_mul(&P.base_ring().from_int(3), P.clone_el(test_ideal().modulus()));
    assert_eq!(test_ideal(), PolyPrimeIdeal::new(K, &scaled).unwrap());
}

#[test]
fn test_serialization() {
    let ideal = test_ideal();
    let json = serde_json::to_string(&ideal).unwrap();
    assert_eq!(r#"{"characteristic":5,"variable_name":"t","modulus":[2,0,1]}"#, json);
    assert_eq!(ideal, serde_json::from_str(&json).unwrap());
    assert!(serde_json::from_str::<PolyPrimeIdeal>(r#"{"characteristic":6,"variable_name":"t","modulus":[2,0,1]}"#).is_err());
}
