use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{event, instrument, Level};

use crate::divisibility::DivisibilityRing;
use crate::error::ConfigurationError;
use crate::field::Field;
use crate::ring::*;
use crate::rings::finite::FiniteRing;
use crate::rings::zn::*;
use crate::serialization::SerializableElementRing;

///
/// Contains [`zech::ZechLogField`], a table-based implementation of small finite fields.
///
pub mod zech;
///
/// Contains [`binary::BinaryField`], an implementation of finite fields of characteristic 2
/// based on bit operations.
///
pub mod binary;
///
/// Contains [`generic::PolyBasisField`], an implementation of arbitrary finite fields
/// based on polynomial arithmetic modulo a minimal polynomial.
///
pub mod generic;

use zech::*;
use binary::*;
use generic::*;

///
/// Fields of size below this bound are implemented by [`zech::ZechLogField`], unless they
/// are prime fields or another implementation is explicitly requested.
///
pub const ZECH_LOG_BOUND: u128 = 1 << 16;

///
/// The largest degree of a field that can be represented by [`binary::BinaryField`].
///
pub const BINARY_FIELD_MAX_DEGREE: usize = 127;

///
/// Trait for implementations of a finite field `Fq` with `q = p^n`, that represent
/// elements w.r.t. a power basis `1, a, ..., a^(n - 1)` over the prime field `Fp`,
/// where `a` is a root of a fixed monic irreducible polynomial over `Fp`.
///
pub trait FiniteFieldBackend: Field + FiniteRing {

    ///
    /// Returns the prime field `Fp` contained in this field.
    ///
    fn prime_field(&self) -> PrimeField;

    ///
    /// Returns the degree `n = [Fq : Fp]`.
    ///
    fn degree(&self) -> usize;

    ///
    /// Returns `sum_i c_i a^i`, where `c_i` are the given coefficients. At most
    /// [`FiniteFieldBackend::degree()`] coefficients may be given.
    ///
    fn from_coefficients(&self, coefficients: &[PrimeFieldEl]) -> Self::Element;

    ///
    /// Returns the coefficients `c_0, ..., c_(n - 1)` of `x` w.r.t. the power basis,
    /// i.e. such that `x = sum_i c_i a^i`.
    ///
    fn coefficients(&self, x: &Self::Element) -> Vec<PrimeFieldEl>;
}

///
/// [`RingStore`] for [`FiniteFieldBackend`]s.
///
pub trait FiniteFieldBackendStore: RingStore
    where Self::Type: FiniteFieldBackend
{
    delegate!{ fn prime_field(&self) -> PrimeField }
    delegate!{ fn degree(&self) -> usize }
    delegate!{ fn from_coefficients(&self, coefficients: &[PrimeFieldEl]) -> El<Self> }
    delegate!{ fn coefficients(&self, x: &El<Self>) -> Vec<PrimeFieldEl> }
}

impl<R> FiniteFieldBackendStore for R
    where R: RingStore, R::Type: FiniteFieldBackend
{}

impl FiniteFieldBackend for PrimeFieldBase {

    fn prime_field(&self) -> PrimeField {
        RingValue::from(*self)
    }

    fn degree(&self) -> usize {
        1
    }

    fn from_coefficients(&self, coefficients: &[PrimeFieldEl]) -> Self::Element {
        assert!(coefficients.len() <= 1);
        coefficients.first().copied().unwrap_or(self.zero())
    }

    fn coefficients(&self, x: &Self::Element) -> Vec<PrimeFieldEl> {
        vec![*x]
    }
}

///
/// The available implementations of finite fields. Their names are the tags by
/// which they are selected in [`crate::residue_field::ResidueFieldOptions`].
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FiniteFieldImplementation {
    ///
    /// [`PrimeField`], only for fields of prime order.
    ///
    #[serde(rename = "modn")]
    PrimeModN,
    ///
    /// [`zech::ZechLogField`], only for fields of size below [`ZECH_LOG_BOUND`].
    ///
    #[serde(rename = "givaro")]
    ZechLog,
    ///
    /// [`binary::BinaryField`], only for fields of characteristic 2 and degree at most
    /// [`BINARY_FIELD_MAX_DEGREE`].
    ///
    #[serde(rename = "ntl")]
    Binary,
    ///
    /// [`generic::PolyBasisField`], works for all finite fields.
    ///
    #[serde(rename = "pari")]
    PolynomialBasis
}

impl FiniteFieldImplementation {

    pub fn tag(&self) -> &'static str {
        match self {
            FiniteFieldImplementation::PrimeModN => "modn",
            FiniteFieldImplementation::ZechLog => "givaro",
            FiniteFieldImplementation::Binary => "ntl",
            FiniteFieldImplementation::PolynomialBasis => "pari"
        }
    }

    ///
    /// Checks whether this implementation can represent the field of size `p^degree`.
    ///
    pub fn supports(&self, characteristic: u64, degree: usize) -> bool {
        match self {
            FiniteFieldImplementation::PrimeModN => degree == 1,
            FiniteFieldImplementation::ZechLog => field_size(characteristic, degree).map(|q| q < ZECH_LOG_BOUND).unwrap_or(false),
            FiniteFieldImplementation::Binary => characteristic == 2 && degree <= BINARY_FIELD_MAX_DEGREE,
            FiniteFieldImplementation::PolynomialBasis => true
        }
    }
}

impl Display for FiniteFieldImplementation {

    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for FiniteFieldImplementation {

    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "modn" => Ok(FiniteFieldImplementation::PrimeModN),
            "givaro" => Ok(FiniteFieldImplementation::ZechLog),
            "ntl" => Ok(FiniteFieldImplementation::Binary),
            "pari" => Ok(FiniteFieldImplementation::PolynomialBasis),
            _ => Err(ConfigurationError::UnknownImplementation(s.to_owned()))
        }
    }
}

///
/// Returns `p^degree`, if it fits into a `u128`.
///
pub fn field_size(characteristic: u64, degree: usize) -> Option<u128> {
    (characteristic as u128).checked_pow(u32::try_from(degree).ok()?)
}

///
/// Decides which implementation to use for the field of size `p^degree`. If an
/// implementation is requested, it is used if it supports the field, and otherwise
/// an error is returned.
///
/// # Example
/// ```rust
/// # use residue_fields::rings::finite_field::*;
/// assert_eq!(FiniteFieldImplementation::PrimeModN, choose_implementation(17, 1, None).unwrap());
/// assert_eq!(FiniteFieldImplementation::ZechLog, choose_implementation(29, 2, None).unwrap());
/// assert_eq!(FiniteFieldImplementation::Binary, choose_implementation(2, 20, None).unwrap());
/// assert_eq!(FiniteFieldImplementation::PolynomialBasis, choose_implementation(65537, 2, None).unwrap());
/// assert!(choose_implementation(29, 2, Some(FiniteFieldImplementation::PrimeModN)).is_err());
/// ```
///
pub fn choose_implementation(characteristic: u64, degree: usize, requested: Option<FiniteFieldImplementation>) -> Result<FiniteFieldImplementation, ConfigurationError> {
    assert!(degree >= 1);
    if let Some(implementation) = requested {
        if implementation.supports(characteristic, degree) {
            return Ok(implementation);
        } else {
            return Err(ConfigurationError::IncompatibleImplementation { implementation, characteristic, degree });
        }
    }
    let result = if degree == 1 {
        FiniteFieldImplementation::PrimeModN
    } else if FiniteFieldImplementation::ZechLog.supports(characteristic, degree) {
        FiniteFieldImplementation::ZechLog
    } else if FiniteFieldImplementation::Binary.supports(characteristic, degree) {
        FiniteFieldImplementation::Binary
    } else {
        FiniteFieldImplementation::PolynomialBasis
    };
    return Ok(result);
}

///
/// Creates the finite field `Fp[X]/(f)` using the given implementation, where `f` is the
/// given monic irreducible polynomial (coefficients starting with the constant one). Elements
/// of the result are printed as polynomials in `name`, which refers to the image of `X`.
///
#[instrument(skip_all, level = "trace")]
pub fn create_field(implementation: FiniteFieldImplementation, prime_field: PrimeField, modulus: Vec<PrimeFieldEl>, name: &str) -> AnyFiniteField {
    let degree = modulus.len() - 1;
    assert!(implementation.supports(prime_field.modulus(), degree));
    event!(Level::DEBUG, implementation = implementation.tag(), characteristic = prime_field.modulus(), degree = degree, "creating finite field");
    let base = match implementation {
        FiniteFieldImplementation::PrimeModN => AnyFiniteFieldBase::PrimeModN(*prime_field.get_ring()),
        FiniteFieldImplementation::ZechLog => AnyFiniteFieldBase::ZechLog(ZechLogFieldBase::new(prime_field, modulus, name)),
        FiniteFieldImplementation::Binary => AnyFiniteFieldBase::Binary(BinaryFieldBase::new(prime_field, modulus, name)),
        FiniteFieldImplementation::PolynomialBasis => AnyFiniteFieldBase::PolynomialBasis(PolyBasisFieldBase::new(prime_field, modulus, name))
    };
    return RingValue::from(base);
}

///
/// A finite field using any of the available implementations, chosen at runtime.
///
#[derive(Clone)]
pub enum AnyFiniteFieldBase {
    PrimeModN(PrimeFieldBase),
    ZechLog(ZechLogFieldBase),
    Binary(BinaryFieldBase),
    PolynomialBasis(PolyBasisFieldBase)
}

///
/// [`RingStore`] corresponding to [`AnyFiniteFieldBase`].
///
pub type AnyFiniteField = RingValue<AnyFiniteFieldBase>;

///
/// An element of [`AnyFiniteField`]. Its variant always matches the variant of the field.
///
pub enum AnyFiniteFieldEl {
    PrimeModN(PrimeFieldEl),
    ZechLog(ZechLogFieldEl),
    Binary(BinaryFieldEl),
    PolynomialBasis(PolyBasisFieldEl)
}

impl AnyFiniteFieldBase {

    pub fn implementation(&self) -> FiniteFieldImplementation {
        match self {
            AnyFiniteFieldBase::PrimeModN(_) => FiniteFieldImplementation::PrimeModN,
            AnyFiniteFieldBase::ZechLog(_) => FiniteFieldImplementation::ZechLog,
            AnyFiniteFieldBase::Binary(_) => FiniteFieldImplementation::Binary,
            AnyFiniteFieldBase::PolynomialBasis(_) => FiniteFieldImplementation::PolynomialBasis
        }
    }
}

fn foreign_element() -> ! {
    panic!("element belongs to a finite field with different implementation")
}

///
/// Executes `$body` with `$ring` bound to the implementation of `$self`, and `$variant`
/// referring to the matching variant of [`AnyFiniteFieldEl`].
///
macro_rules! dispatch {
    ($self:expr, |$ring:ident, $variant:ident| $body:expr) => {
        match $self {
            AnyFiniteFieldBase::PrimeModN($ring) => { #[allow(unused_imports)] use AnyFiniteFieldEl::PrimeModN as $variant; $body },
            AnyFiniteFieldBase::ZechLog($ring) => { #[allow(unused_imports)] use AnyFiniteFieldEl::ZechLog as $variant; $body },
            AnyFiniteFieldBase::Binary($ring) => { #[allow(unused_imports)] use AnyFiniteFieldEl::Binary as $variant; $body },
            AnyFiniteFieldBase::PolynomialBasis($ring) => { #[allow(unused_imports)] use AnyFiniteFieldEl::PolynomialBasis as $variant; $body }
        }
    };
}

impl RingBase for AnyFiniteFieldBase {

    type Element = AnyFiniteFieldEl;

    fn clone_el(&self, val: &Self::Element) -> Self::Element {
        dispatch!(self, |ring, Variant| match val {
            Variant(x) => Variant(ring.clone_el(x)),
            _ => foreign_element()
        })
    }

    fn add_assign(&self, lhs: &mut Self::Element, rhs: Self::Element) {
        dispatch!(self, |ring, Variant| match (lhs, rhs) {
            (Variant(x), Variant(y)) => ring.add_assign(x, y),
            _ => foreign_element()
        })
    }

    fn add_assign_ref(&self, lhs: &mut Self::Element, rhs: &Self::Element) {
        dispatch!(self, |ring, Variant| match (lhs, rhs) {
            (Variant(x), Variant(y)) => ring.add_assign_ref(x, y),
            _ => foreign_element()
        })
    }

    fn negate_inplace(&self, lhs: &mut Self::Element) {
        dispatch!(self, |ring, Variant| match lhs {
            Variant(x) => ring.negate_inplace(x),
            _ => foreign_element()
        })
    }

    fn mul_assign(&self, lhs: &mut Self::Element, rhs: Self::Element) {
        dispatch!(self, |ring, Variant| match (lhs, rhs) {
            (Variant(x), Variant(y)) => ring.mul_assign(x, y),
            _ => foreign_element()
        })
    }

    fn mul_assign_ref(&self, lhs: &mut Self::Element, rhs: &Self::Element) {
        dispatch!(self, |ring, Variant| match (lhs, rhs) {
            (Variant(x), Variant(y)) => ring.mul_assign_ref(x, y),
            _ => foreign_element()
        })
    }

    fn from_int(&self, value: i32) -> Self::Element {
        dispatch!(self, |ring, Variant| Variant(ring.from_int(value)))
    }

    fn eq_el(&self, lhs: &Self::Element, rhs: &Self::Element) -> bool {
        dispatch!(self, |ring, Variant| match (lhs, rhs) {
            (Variant(x), Variant(y)) => ring.eq_el(x, y),
            _ => foreign_element()
        })
    }

    fn is_zero(&self, value: &Self::Element) -> bool {
        dispatch!(self, |ring, Variant| match value {
            Variant(x) => ring.is_zero(x),
            _ => foreign_element()
        })
    }

    fn is_commutative(&self) -> bool { true }
    fn is_noetherian(&self) -> bool { true }

    fn dbg<'a>(&self, value: &Self::Element, out: &mut std::fmt::Formatter<'a>) -> std::fmt::Result {
        dispatch!(self, |ring, Variant| match value {
            Variant(x) => ring.dbg(x, out),
            _ => foreign_element()
        })
    }
}

impl DivisibilityRing for AnyFiniteFieldBase {

    fn checked_left_div(&self, lhs: &Self::Element, rhs: &Self::Element) -> Option<Self::Element> {
        dispatch!(self, |ring, Variant| match (lhs, rhs) {
            (Variant(x), Variant(y)) => ring.checked_left_div(x, y).map(Variant),
            _ => foreign_element()
        })
    }
}

impl Field for AnyFiniteFieldBase {}

impl FiniteRing for AnyFiniteFieldBase {

    fn random_element<G: FnMut() -> u64>(&self, rng: G) -> Self::Element {
        dispatch!(self, |ring, Variant| Variant(ring.random_element(rng)))
    }

    fn size(&self) -> Option<u128> {
        dispatch!(self, |ring, _Variant| ring.size())
    }

    fn elements<'a>(&'a self) -> Box<dyn 'a + Iterator<Item = Self::Element>> {
        dispatch!(self, |ring, Variant| Box::new(ring.elements().map(Variant)))
    }
}

impl FiniteFieldBackend for AnyFiniteFieldBase {

    fn prime_field(&self) -> PrimeField {
        dispatch!(self, |ring, _Variant| ring.prime_field())
    }

    fn degree(&self) -> usize {
        dispatch!(self, |ring, _Variant| ring.degree())
    }

    fn from_coefficients(&self, coefficients: &[PrimeFieldEl]) -> Self::Element {
        dispatch!(self, |ring, Variant| Variant(ring.from_coefficients(coefficients)))
    }

    fn coefficients(&self, x: &Self::Element) -> Vec<PrimeFieldEl> {
        dispatch!(self, |ring, Variant| match x {
            Variant(x) => ring.coefficients(x),
            _ => foreign_element()
        })
    }
}

impl SerializableElementRing for AnyFiniteFieldBase {

    fn deserialize<'de, D>(&self, deserializer: D) -> Result<Self::Element, D::Error>
        where D: Deserializer<'de>
    {
        dispatch!(self, |ring, Variant| ring.deserialize(deserializer).map(Variant))
    }

    fn serialize<S>(&self, el: &Self::Element, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        dispatch!(self, |ring, Variant| match el {
            Variant(x) => ring.serialize(x, serializer),
            _ => foreign_element()
        })
    }
}

#[cfg(test)]
use crate::rings::finite::FiniteRingStore;
#[cfg(test)]
use crate::field::FieldStore;

#[cfg(test)]
fn conway_polynomial_29_2() -> (PrimeField, Vec<PrimeFieldEl>) {
    // X^2 + 24X + 2 is irreducible over F29
    let Fp = PrimeField::new(29);
    return (Fp, vec![Fp.from_int(2), Fp.from_int(24), Fp.one()]);
}

#[test]
fn test_choose_implementation() {
    assert_eq!(FiniteFieldImplementation::PrimeModN, choose_implementation(2, 1, None).unwrap());
    assert_eq!(FiniteFieldImplementation::PrimeModN, choose_implementation(18446744073709551557, 1, None).unwrap());
    assert_eq!(FiniteFieldImplementation::ZechLog, choose_implementation(2, 15, None).unwrap());
    assert_eq!(FiniteFieldImplementation::Binary, choose_implementation(2, 16, None).unwrap());
    assert_eq!(FiniteFieldImplementation::Binary, choose_implementation(2, 127, None).unwrap());
    assert_eq!(FiniteFieldImplementation::PolynomialBasis, choose_implementation(2, 128, None).unwrap());
    assert_eq!(FiniteFieldImplementation::ZechLog, choose_implementation(251, 2, None).unwrap());
    assert_eq!(FiniteFieldImplementation::PolynomialBasis, choose_implementation(257, 2, None).unwrap());
    assert_eq!(FiniteFieldImplementation::PolynomialBasis, choose_implementation(3, 100, None).unwrap());

    assert_eq!(FiniteFieldImplementation::PolynomialBasis, choose_implementation(17, 1, Some(FiniteFieldImplementation::PolynomialBasis)).unwrap());
    assert_eq!(FiniteFieldImplementation::ZechLog, choose_implementation(17, 1, Some(FiniteFieldImplementation::ZechLog)).unwrap());
    assert_eq!(
        Err(ConfigurationError::IncompatibleImplementation { implementation: FiniteFieldImplementation::Binary, characteristic: 3, degree: 2 }),
        choose_implementation(3, 2, Some(FiniteFieldImplementation::Binary))
    );
    assert!(choose_implementation(257, 2, Some(FiniteFieldImplementation::ZechLog)).is_err());
    assert!(choose_implementation(5, 2, Some(FiniteFieldImplementation::PrimeModN)).is_err());
}

#[test]
fn test_parse_implementation() {
    for implementation in [FiniteFieldImplementation::PrimeModN, FiniteFieldImplementation::ZechLog, FiniteFieldImplementation::Binary, FiniteFieldImplementation::PolynomialBasis] {
        assert_eq!(implementation, implementation.to_string().parse::<FiniteFieldImplementation>().unwrap());
        let json = serde_json::to_string(&implementation).unwrap();
        assert_eq!(format!("\"{}\"", implementation.tag()), json);
        assert_eq!(implementation, serde_json::from_str::<FiniteFieldImplementation>(&json).unwrap());
    }
    assert_eq!(Err(ConfigurationError::UnknownImplementation("flint".to_owned())), "flint".parse::<FiniteFieldImplementation>());
}

#[test]
fn test_implementations_agree() {
    let (Fp, modulus) = conway_polynomial_29_2();
    let fields = [FiniteFieldImplementation::ZechLog, FiniteFieldImplementation::PolynomialBasis].map(|implementation| create_field(implementation, Fp, modulus.clone(), "a"));
    let coefficient_pairs = [(0, 1), (3, 5), (28, 17), (1, 0)];
    for (a0, a1) in coefficient_pairs {
        for (b0, b1) in coefficient_pairs {
            let products = fields.iter().map(|F| {
                let x = F.from_coefficients(&[Fp.from_int(a0), Fp.from_int(a1)]);
                let y = F.from_coefficients(&[Fp.from_int(b0), Fp.from_int(b1)]);
                let sum = F.coefficients(&F.add_ref(&x, &y));
                let product = F.coefficients(&F.mul_ref(&x, &y));
                let quotient = if F.is_zero(&y) { None } else { Some(F.coefficients(&F.div(&x, &y))) };
                (sum, product, quotient)
            }).collect::<Vec<_>>();
            assert_eq!(products[0], products[1]);
        }
    }
}

#[test]
fn test_any_finite_field_axioms() {
    let (Fp, modulus) = conway_polynomial_29_2();
    for implementation in [FiniteFieldImplementation::ZechLog, FiniteFieldImplementation::PolynomialBasis] {
        let F = create_field(implementation, Fp, modulus.clone(), "a");
        assert_eq!(Some(841), F.size());
        assert_eq!(2, F.degree());
        assert_eq!(implementation, F.get_ring().implementation());
        let elements = (0..12).map(|i| F.from_coefficients(&[Fp.from_int(i * 5), Fp.from_int(i * i + 3)]));
        crate::field::generic_tests::test_field_axioms(&F, elements);
        assert_eq!("a", format!("{}", F.format(&F.from_coefficients(&[Fp.zero(), Fp.one()]))));
        assert_eq!("3*a + 28", format!("{}", F.format(&F.from_coefficients(&[Fp.from_int(-1), Fp.from_int(3)]))));
    }
    let F = create_field(FiniteFieldImplementation::PrimeModN, Fp, vec![Fp.from_int(-5), Fp.one()], "a");
    crate::rings::finite::generic_tests::test_finite_ring_axioms(&F);
    assert_eq!(vec![Fp.from_int(7)], F.coefficients(&F.from_int(7)));
    assert_el_eq!(&F, F.one(), F.mul_ref(&F.from_int(2), &F.invert(&F.from_int(2))));
}

#[test]
#[should_panic]
fn test_mixing_implementations() {
    let (Fp, modulus) = conway_polynomial_29_2();
    let F = create_field(FiniteFieldImplementation::ZechLog, Fp, modulus.clone(), "a");
    let G = create_field(FiniteFieldImplementation::PolynomialBasis, Fp, modulus, "a");
    F.add(F.one(), G.one());
}
