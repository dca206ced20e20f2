use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{event, instrument, Level};

use crate::algorithms::linsolve::gauss;
use crate::divisibility::DivisibilityRing;
use crate::error::{ConfigurationError, ReductionError};
use crate::field::{Field, FieldStore};
use crate::ideal::ResidueIdeal;
use crate::matrix::OwnedMatrix;
use crate::ring::*;
use crate::rings::finite::FiniteRing;
use crate::rings::finite_field::*;
use crate::rings::zn::*;
use crate::serialization::SerializableElementRing;

///
/// Contains [`basis::find_field_generator()`], which finds a generator of `O/P` and
/// the corresponding change of basis.
///
pub mod basis;
///
/// Contains [`reduction::ReductionMap`], the partial map `Frac(O) -> O/P`.
///
pub mod reduction;
///
/// Contains [`hom::ResidueFieldHom`], the ring homomorphism `O -> O/P`.
///
pub mod hom;
///
/// Contains [`lift::LiftingMap`], a set-theoretic section `O/P -> O`.
///
pub mod lift;
///
/// Contains [`cache::ResidueFieldCache`], which returns the same residue field for
/// equal construction arguments.
///
pub mod cache;

use basis::BasisData;
use reduction::ReductionMap;
use hom::ResidueFieldHom;
use lift::LiftingMap;

///
/// The parameters to construct a [`ResidueField`] from a prime ideal.
///
/// # Example
/// ```rust
/// # use residue_fields::residue_field::*;
/// let options = ResidueFieldOptions::default().with_name("w").with_implementation("pari");
/// assert_eq!(r#"{"names":"w","check":true,"implementation":"pari"}"#, serde_json::to_string(&options).unwrap());
/// ```
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ResidueFieldOptions {
    ///
    /// The name of the generator of the residue field. Defaults to the name of the
    /// generator of the order, followed by `bar`.
    ///
    pub names: Option<String>,
    ///
    /// Whether to check that the ideal is prime, and that its arithmetic is supported.
    ///
    pub check: bool,
    ///
    /// The tag of the finite field implementation to use, i.e. one of `modn`, `givaro`,
    /// `ntl` and `pari`. If not given, it is chosen based on the size of the field.
    ///
    pub implementation: Option<String>
}

impl Default for ResidueFieldOptions {

    fn default() -> Self {
        ResidueFieldOptions { names: None, check: true, implementation: None }
    }
}

impl ResidueFieldOptions {

    pub fn with_name(mut self, name: &str) -> Self {
        self.names = Some(name.to_owned());
        self
    }

    pub fn with_check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }

    pub fn with_implementation(mut self, implementation: &str) -> Self {
        self.implementation = Some(implementation.to_owned());
        self
    }

    ///
    /// Determines the name of the generator and the finite field implementation used
    /// for the residue field of `ideal`.
    ///
    pub fn resolve<P: ResidueIdeal>(&self, ideal: &P) -> Result<(String, FiniteFieldImplementation), ConfigurationError> {
        let requested = self.implementation.as_deref().map(str::parse::<FiniteFieldImplementation>).transpose()?;
        let implementation = choose_implementation(ideal.characteristic(), ideal.residue_class_degree(), requested)?;
        let name = self.names.clone().unwrap_or_else(|| format!("{}bar", ideal.variable_name()));
        return Ok((name, implementation));
    }

    ///
    /// If checks are enabled, makes sure that `ideal` is prime and supported.
    ///
    pub fn validate<P: ResidueIdeal>(&self, ideal: &P) -> Result<(), ConfigurationError> {
        if self.check {
            if !ideal.is_prime() {
                return Err(ConfigurationError::NotPrime { ideal: ideal.to_string() });
            }
            ideal.check_supported()?;
        }
        return Ok(());
    }
}

///
/// The residue field `O/P` of a prime ideal `P` of an order `O`. It is a finite field,
/// whose elements are represented w.r.t. the power basis of a generator `x mod P`, and
/// whose arithmetic is performed by one of the implementations in [`crate::rings::finite_field`].
///
/// Besides being a field, it provides the reduction `Frac(O) -> O/P`, defined on all elements
/// of nonnegative valuation at `P`, and a lift `O/P -> O` that is a section of it.
///
/// # Example
/// ```rust
/// # use residue_fields::assert_el_eq;
/// # use residue_fields::ring::*;
/// # use residue_fields::field::*;
/// # use residue_fields::rings::rational::*;
/// # use residue_fields::ideal::integer::*;
/// # use residue_fields::residue_field::*;
/// let QQ = RationalField::RING;
/// let F = ResidueField::new(IntegerPrimeIdeal::new(17), &ResidueFieldOptions::default()).unwrap();
/// let reduction = (&F).reduction_map();
/// assert_el_eq!(F, F.from_int(10), reduction.map(&QQ.from_fraction(3, 2)).unwrap());
/// assert!(reduction.map(&QQ.from_fraction(1, 17)).is_err());
/// assert_eq!("Residue field of Integers modulo 17", format!("{}", F.get_ring()));
/// ```
///
pub struct ResidueFieldBase<P: ResidueIdeal> {
    ideal: P,
    name: String,
    backend: AnyFiniteField,
    basis: Option<BasisData<P>>
}

///
/// [`RingStore`] corresponding to [`ResidueFieldBase`].
///
pub type ResidueField<P> = RingValue<ResidueFieldBase<P>>;

impl<P: ResidueIdeal> ResidueField<P> {

    ///
    /// Creates the residue field of the given prime ideal.
    ///
    pub fn new(ideal: P, options: &ResidueFieldOptions) -> Result<Self, ConfigurationError> {
        Ok(RingValue::from(ResidueFieldBase::new(ideal, options)?))
    }
}

impl<P: ResidueIdeal> ResidueFieldBase<P> {

    pub fn new(ideal: P, options: &ResidueFieldOptions) -> Result<Self, ConfigurationError> {
        options.validate(&ideal)?;
        let (name, implementation) = options.resolve(&ideal)?;
        return Ok(Self::create(ideal, name, implementation));
    }

    ///
    /// Creates the residue field without any checks. The implementation must support
    /// a field of the size of `O/P`.
    ///
    #[instrument(skip_all, level = "trace")]
    pub(crate) fn create(ideal: P, name: String, implementation: FiniteFieldImplementation) -> Self {
        let Fp = ideal.prime_field();
        let basis = if ideal.requires_basis() {
            Some(basis::find_field_generator(&ideal))
        } else {
            None
        };
        let minimal_polynomial = match &basis {
            Some(basis) => basis.minimal_polynomial().to_vec(),
            None => vec![Fp.neg_one(), Fp.one()]
        };
        let backend = create_field(implementation, Fp, minimal_polynomial, &name);
        event!(Level::INFO, implementation = implementation.tag(), characteristic = Fp.modulus(), degree = ideal.residue_class_degree(), "created residue field");
        return ResidueFieldBase { ideal, name, backend, basis };
    }

    pub fn ideal(&self) -> &P {
        &self.ideal
    }

    pub fn variable_name(&self) -> &str {
        &self.name
    }

    pub fn characteristic(&self) -> u64 {
        self.ideal.characteristic()
    }

    pub fn implementation(&self) -> FiniteFieldImplementation {
        self.backend.get_ring().implementation()
    }

    ///
    /// Returns the minimal polynomial of the generator of this field over `Fp`, with
    /// coefficients starting with the constant one.
    ///
    pub fn minimal_polynomial(&self) -> Vec<PrimeFieldEl> {
        match &self.basis {
            Some(basis) => basis.minimal_polynomial().to_vec(),
            None => {
                let Fp = self.prime_field();
                vec![Fp.neg_one(), Fp.one()]
            }
        }
    }

    ///
    /// Returns the matrix whose `i`-th row is the coordinate vector of `x^i mod P`, for
    /// the generator `x`. This is `None` if `O/P` is identified with `Fp` directly.
    ///
    pub fn basis_matrix(&self) -> Option<&OwnedMatrix<PrimeFieldEl>> {
        self.basis.as_ref().map(|basis| basis.basis_matrix())
    }

    pub fn basis_data(&self) -> Option<&BasisData<P>> {
        self.basis.as_ref()
    }

    ///
    /// Returns the generator of this field over `Fp`, i.e. the image of `x` in `O/P`.
    ///
    pub fn gen(&self) -> AnyFiniteFieldEl {
        let Fp = self.prime_field();
        if self.degree() == 1 {
            // x is the root of X + m_0
            let minimal_polynomial = self.minimal_polynomial();
            self.backend.from_coefficients(&[Fp.negate(minimal_polynomial[0])])
        } else {
            self.backend.from_coefficients(&[Fp.zero(), Fp.one()])
        }
    }

    ///
    /// Maps a coordinate vector w.r.t. the basis fixed by the ideal to the corresponding
    /// element of this field.
    ///
    pub fn from_vs(&self, v: &[PrimeFieldEl]) -> AnyFiniteFieldEl {
        match &self.basis {
            Some(basis) => self.backend.from_coefficients(&gauss::vec_mul(v, basis.basis_matrix_inv(), self.prime_field())),
            None => self.backend.from_coefficients(v)
        }
    }

    ///
    /// Inverse of [`ResidueFieldBase::from_vs()`].
    ///
    pub fn to_vs(&self, y: &AnyFiniteFieldEl) -> Vec<PrimeFieldEl> {
        let coefficients = self.backend.coefficients(y);
        match &self.basis {
            Some(basis) => gauss::vec_mul(&coefficients, basis.basis_matrix(), self.prime_field()),
            None => coefficients
        }
    }

    ///
    /// Computes `x mod P` for an element `x` of `O`.
    ///
    pub fn reduce_integral(&self, x: &El<P::Order>) -> AnyFiniteFieldEl {
        self.from_vs(&self.ideal.to_vs(x))
    }

    ///
    /// Computes `x mod P` for an element `x` of `Frac(O)`, which fails if and only if `x`
    /// has negative valuation at `P`.
    ///
    pub fn reduce(&self, x: &El<P::FractionField>) -> Result<AnyFiniteFieldEl, ReductionError> {
        self.reduce_with_depth(x, 0)
    }

    fn reduce_with_depth(&self, x: &El<P::FractionField>, depth: usize) -> Result<AnyFiniteFieldEl, ReductionError> {
        if let Some(coordinates) = self.ideal.try_to_vs(x) {
            return Ok(self.from_vs(&coordinates));
        }
        let K = self.ideal.fraction_field();
        assert!(depth == 0, "{} is a unit at {}, but cannot be reduced", K.format(x), self.ideal);

        let (numerator, denominator) = self.ideal.integral_split(x);
        let Some(numerator_valuation) = self.ideal.valuation(&numerator) else {
            return Ok(self.zero());
        };
        let Some(denominator_valuation) = self.ideal.valuation(&denominator) else {
            panic!("denominator of {} is zero", K.format(x));
        };
        event!(Level::DEBUG, numerator_valuation, denominator_valuation, "reducing by valuations");
        if numerator_valuation > denominator_valuation {
            return Ok(self.zero());
        } else if numerator_valuation < denominator_valuation {
            return Err(ReductionError::NegativeValuation { element: format!("{}", K.format(x)), ideal: self.ideal.to_string() });
        }
        let numerator = self.ideal.divide_by_uniformizer_power(numerator, numerator_valuation);
        let denominator = self.ideal.divide_by_uniformizer_power(denominator, denominator_valuation);
        let numerator = self.reduce_with_depth(&numerator, depth + 1)?;
        let denominator = self.reduce_with_depth(&denominator, depth + 1)?;
        return Ok(self.backend.div(&numerator, &denominator));
    }

    ///
    /// Returns an element of `O` that reduces to `y`.
    ///
    pub fn lift(&self, y: &AnyFiniteFieldEl) -> El<P::Order> {
        self.ideal.to_order(&self.to_vs(y))
    }
}

impl<P: ResidueIdeal> Clone for ResidueFieldBase<P> {

    fn clone(&self) -> Self {
        ResidueFieldBase {
            ideal: self.ideal.clone(),
            name: self.name.clone(),
            backend: self.backend.clone(),
            basis: self.basis.as_ref().map(|basis| basis.clone_in(&self.ideal))
        }
    }
}

impl<P: ResidueIdeal> Display for ResidueFieldBase<P> {

    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.basis.is_none() {
            write!(f, "Residue field of Integers modulo {}", self.characteristic())
        } else {
            write!(f, "Residue field in {} of {}", self.name, self.ideal)
        }
    }
}

impl<P: ResidueIdeal> std::fmt::Debug for ResidueFieldBase<P> {

    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl<P: ResidueIdeal> RingBase for ResidueFieldBase<P> {

    type Element = AnyFiniteFieldEl;

    fn clone_el(&self, val: &Self::Element) -> Self::Element {
        self.backend.clone_el(val)
    }

    fn add_assign(&self, lhs: &mut Self::Element, rhs: Self::Element) {
        self.backend.add_assign(lhs, rhs)
    }

    fn add_assign_ref(&self, lhs: &mut Self::Element, rhs: &Self::Element) {
        self.backend.add_assign_ref(lhs, rhs)
    }

    fn negate_inplace(&self, lhs: &mut Self::Element) {
        self.backend.negate_inplace(lhs)
    }

    fn mul_assign(&self, lhs: &mut Self::Element, rhs: Self::Element) {
        self.backend.mul_assign(lhs, rhs)
    }

    fn mul_assign_ref(&self, lhs: &mut Self::Element, rhs: &Self::Element) {
        self.backend.mul_assign_ref(lhs, rhs)
    }

    fn from_int(&self, value: i32) -> Self::Element {
        self.backend.from_int(value)
    }

    fn eq_el(&self, lhs: &Self::Element, rhs: &Self::Element) -> bool {
        self.backend.eq_el(lhs, rhs)
    }

    fn is_zero(&self, value: &Self::Element) -> bool {
        self.backend.is_zero(value)
    }

    fn is_commutative(&self) -> bool { true }
    fn is_noetherian(&self) -> bool { true }

    fn dbg<'a>(&self, value: &Self::Element, out: &mut std::fmt::Formatter<'a>) -> std::fmt::Result {
        self.backend.get_ring().dbg(value, out)
    }
}

impl<P: ResidueIdeal> DivisibilityRing for ResidueFieldBase<P> {

    fn checked_left_div(&self, lhs: &Self::Element, rhs: &Self::Element) -> Option<Self::Element> {
        self.backend.get_ring().checked_left_div(lhs, rhs)
    }
}

impl<P: ResidueIdeal> Field for ResidueFieldBase<P> {}

impl<P: ResidueIdeal> FiniteRing for ResidueFieldBase<P> {

    fn random_element<G: FnMut() -> u64>(&self, rng: G) -> Self::Element {
        self.backend.get_ring().random_element(rng)
    }

    fn size(&self) -> Option<u128> {
        self.backend.get_ring().size()
    }

    fn elements<'a>(&'a self) -> Box<dyn 'a + Iterator<Item = Self::Element>> {
        self.backend.get_ring().elements()
    }
}

impl<P: ResidueIdeal> FiniteFieldBackend for ResidueFieldBase<P> {

    fn prime_field(&self) -> PrimeField {
        self.backend.prime_field()
    }

    fn degree(&self) -> usize {
        self.backend.degree()
    }

    fn from_coefficients(&self, coefficients: &[PrimeFieldEl]) -> Self::Element {
        self.backend.from_coefficients(coefficients)
    }

    fn coefficients(&self, x: &Self::Element) -> Vec<PrimeFieldEl> {
        self.backend.coefficients(x)
    }
}

impl<P: ResidueIdeal> SerializableElementRing for ResidueFieldBase<P> {

    fn deserialize<'de, D>(&self, deserializer: D) -> Result<Self::Element, D::Error>
        where D: Deserializer<'de>
    {
        self.backend.get_ring().deserialize(deserializer)
    }

    fn serialize<S>(&self, el: &Self::Element, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        self.backend.get_ring().serialize(el, serializer)
    }
}

#[derive(Serialize)]
#[serde(bound = "")]
struct ResidueFieldDataRef<'a, P: ResidueIdeal> {
    ideal: &'a P,
    name: &'a str,
    implementation: FiniteFieldImplementation
}

#[derive(Deserialize)]
#[serde(bound = "")]
pub(crate) struct ResidueFieldData<P: ResidueIdeal> {
    pub(crate) ideal: P,
    pub(crate) name: String,
    pub(crate) implementation: FiniteFieldImplementation
}

///
/// Serializes the construction arguments of the field, i.e. the ideal, the name of the
/// generator and the implementation. Use [`cache::ResidueFieldCache::deserialize_field()`]
/// to get back the (identical) field.
///
impl<P: ResidueIdeal> Serialize for ResidueFieldBase<P> {

    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        ResidueFieldDataRef { ideal: &self.ideal, name: &self.name, implementation: self.implementation() }.serialize(serializer)
    }
}

///
/// [`RingStore`] for [`ResidueFieldBase`], which provides the maps between the order, its
/// fraction field and the residue field.
///
pub trait ResidueFieldStore<P: ResidueIdeal>: RingStore<Type = ResidueFieldBase<P>> {

    fn ideal(&self) -> &P {
        self.get_ring().ideal()
    }

    fn gen(&self) -> El<Self> {
        self.get_ring().gen()
    }

    fn from_vs(&self, v: &[PrimeFieldEl]) -> El<Self> {
        self.get_ring().from_vs(v)
    }

    fn to_vs(&self, y: &El<Self>) -> Vec<PrimeFieldEl> {
        self.get_ring().to_vs(y)
    }

    fn lift(&self, y: &El<Self>) -> El<P::Order> {
        self.get_ring().lift(y)
    }

    ///
    /// Returns the partial map `Frac(O) -> O/P`.
    ///
    fn reduction_map(self) -> ReductionMap<P, Self>
        where Self: Sized + Clone
    {
        ReductionMap::new(self)
    }

    ///
    /// Returns the ring homomorphism `O -> O/P`.
    ///
    fn ring_hom(self) -> ResidueFieldHom<P, Self>
        where Self: Sized + Clone
    {
        ResidueFieldHom::new(self)
    }

    ///
    /// Returns a section `O/P -> O` of the ring homomorphism `O -> O/P`.
    ///
    fn lift_map(self) -> LiftingMap<P, Self>
        where Self: Sized + Clone
    {
        LiftingMap::new(self)
    }
}

impl<P: ResidueIdeal, R: RingStore<Type = ResidueFieldBase<P>>> ResidueFieldStore<P> for R {}

#[cfg(test)]
use crate::homomorphism::Homomorphism;
#[cfg(test)]
use crate::rings::finite::FiniteRingStore;
#[cfg(test)]
use crate::rings::rational::RationalField;
#[cfg(test)]
use crate::rings::poly::*;
#[cfg(test)]
use crate::rings::rational_function::RationalFunctionField;
#[cfg(test)]
use crate::rings::extension::number_field::NumberField;
#[cfg(test)]
use crate::ideal::integer::IntegerPrimeIdeal;
#[cfg(test)]
use crate::ideal::polynomial::PolyPrimeIdeal;
#[cfg(test)]
use crate::ideal::number_field::NumberFieldPrimeIdeal;

#[cfg(test)]
fn test_number_field_ideal() -> NumberFieldPrimeIdeal {
    let K = NumberField::new(&[-7, 0, 0, 1], "a");
    NumberFieldPrimeIdeal::new(K, 29, &[24, 16, 1]).unwrap()
}

#[cfg(test)]
fn test_poly_ideal() -> PolyPrimeIdeal {
    let K = RationalFunctionField::new(PrimeField::new(5), "t");
    let P = K.poly_ring();
    let g = P.add(P.pow(P.indeterminate(), 2), P.from_int(2));
    PolyPrimeIdeal::new(K.clone(), &g).unwrap()
}

#[test]
fn test_residue_field_of_integers() {
    crate::tracing::LogAlgorithmSubscriber::init_test();
    let QQ = RationalField::RING;
    let F = ResidueField::new(IntegerPrimeIdeal::new(17), &ResidueFieldOptions::default()).unwrap();
    assert_eq!(Some(17), F.size());
    assert_eq!(1, F.degree());
    assert_eq!(FiniteFieldImplementation::PrimeModN, F.get_ring().implementation());
    assert_eq!("xbar", F.get_ring().variable_name());
    assert!(F.get_ring().basis_matrix().is_none());
    assert_eq!("Residue field of Integers modulo 17", format!("{}", F.get_ring()));

    let reduction = (&F).reduction_map();
    assert_el_eq!(F, F.from_int(4), reduction.map(&QQ.from_integer(4)).unwrap());
    assert_el_eq!(F, F.from_int(4), reduction.map(&QQ.from_integer(21)).unwrap());
    assert_el_eq!(F, F.from_int(10), reduction.map(&QQ.from_fraction(3, 2)).unwrap());
    assert_el_eq!(F, F.zero(), reduction.map(&QQ.from_fraction(17, 3)).unwrap());
    assert_eq!(
        Some(ReductionError::NegativeValuation { element: "1/17".to_owned(), ideal: "Principal ideal (17) of Integer Ring".to_owned() }),
        reduction.map(&QQ.from_fraction(1, 17)).err()
    );
    assert_el_eq!(F, F.one(), F.gen());

    crate::field::generic_tests::test_field_axioms(&F, F.elements());
    crate::rings::finite::generic_tests::test_finite_ring_axioms(&F);
}

#[test]
fn test_residue_field_of_number_field() {
    crate::tracing::LogAlgorithmSubscriber::init_test();
    let ideal = test_number_field_ideal();
    let K = ideal.number_field().clone();
    let O = K.equation_order();
    let F = ResidueField::new(ideal.clone(), &ResidueFieldOptions::default()).unwrap();
    assert_eq!(Some(841), F.size());
    assert_eq!(2, F.degree());
    assert_eq!(FiniteFieldImplementation::ZechLog, F.get_ring().implementation());
    assert_eq!("Residue field in abar of Fractional ideal (29, a^2 + 16*a + 24)", format!("{}", F.get_ring()));
    assert_eq!(2, gauss::rank(F.get_ring().basis_matrix().unwrap(), &F.prime_field()));

    let reduction = (&F).reduction_map();
    let hom = (&F).ring_hom();
    let a = K.generator();
    assert_el_eq!(F, F.gen(), reduction.map(&a).unwrap());
    assert_el_eq!(F, F.pow(F.gen(), 2), reduction.map(&K.pow(K.clone_el(&a), 2)).unwrap());
    assert_el_eq!(F, reduction.map(&K.pow(K.clone_el(&a), 2)).unwrap(), reduction.map(&K.pow(K.clone_el(&a), 2)).unwrap());
    assert_eq!("13*abar + 5", format!("{}", F.format(&F.pow(F.gen(), 2))));

    // (a + 13) g = 29 (a^2 + 8a + 11) for g = a^2 + 16a + 24
    let g = K.embed(O.from_coordinates(vec![24, 16, 1]));
    let twenty_nine = K.from_int(29);
    let expected = F.div(&hom.map(O.from_coordinates(vec![11, 8, 1])), &hom.map(O.from_coordinates(vec![13, 1, 0])));
    let actual = reduction.map(&K.div(&g, &twenty_nine)).unwrap();
    assert!(!F.is_zero(&actual));
    assert_el_eq!(F, expected, actual);

    assert!(reduction.map(&K.div(&K.embed(O.from_coordinates(vec![13, 1, 0])), &twenty_nine)).is_err());
    assert_el_eq!(F, F.zero(), reduction.map(&K.div(&K.pow(K.clone_el(&g), 2), &twenty_nine)).unwrap());
    assert_el_eq!(F, F.zero(), reduction.map(&twenty_nine).unwrap());
    assert_el_eq!(F, F.zero(), reduction.map(&g).unwrap());
}

#[test]
fn test_residue_field_of_function_field() {
    let ideal = test_poly_ideal();
    let K = ideal.fraction_field().clone();
    let P = K.poly_ring();
    let F = ResidueField::new(ideal.clone(), &ResidueFieldOptions::default()).unwrap();
    assert_eq!(Some(25), F.size());
    assert_eq!("Residue field in tbar of Principal ideal (t^2 + 2) of Univariate Polynomial Ring in t over Finite Field of size 5", format!("{}", F.get_ring()));

    let reduction = (&F).reduction_map();
    assert_el_eq!(F, F.gen(), reduction.map(&K.embed(P.indeterminate())).unwrap());
    // 1/t = 2t mod t^2 + 2
    assert_el_eq!(F, F.mul(F.from_int(2), F.gen()), reduction.map(&K.from_fraction(P.one(), P.indeterminate())).unwrap());
    assert!(reduction.map(&K.from_fraction(P.one(), P.clone_el(ideal.modulus()))).is_err());
    let g_over_t = K.from_fraction(P.clone_el(ideal.modulus()), P.indeterminate());
    assert_el_eq!(F, F.zero(), reduction.map(&g_over_t).unwrap());
    assert_el_eq!(F, F.neg_one(), reduction.map(&K.from_fraction(P.clone_el(ideal.modulus()), P.negate(P.clone_el(ideal.modulus())))).unwrap());

    crate::field::generic_tests::test_field_axioms(&F, F.elements().step_by(2));
}

#[test]
fn test_binary_residue_field() {
    let K = RationalFunctionField::new(PrimeField::new(2), "t");
    let P = K.poly_ring();
    let g = P.from_coefficients((0..=17).map(|i| if i == 0 || i == 3 || i == 17 { P.base_ring().one() } else { P.base_ring().zero() }));
    let ideal = PolyPrimeIdeal::new(K.clone(), &g).unwrap();
    let F = ResidueField::new(ideal, &ResidueFieldOptions::default()).unwrap();
    assert_eq!(FiniteFieldImplementation::Binary, F.get_ring().implementation());
    assert_eq!(17, F.degree());
    assert_el_eq!(F, F.gen(), F.pow(F.gen(), 1 << 17));
    assert!(!F.is_one(&F.gen()));

    let reduction = (&F).reduction_map();
    let t = K.embed(P.indeterminate());
    assert_el_eq!(F, F.pow(F.gen(), 20), reduction.map(&K.pow(t, 20)).unwrap());
}

#[test]
fn test_round_trip() {
    let F = ResidueField::new(test_number_field_ideal(), &ResidueFieldOptions::default()).unwrap();
    let reduction = (&F).reduction_map();
    let hom = (&F).ring_hom();
    let lift = (&F).lift_map();
    for y in F.elements() {
        assert_el_eq!(F, &y, hom.map(lift.map(&y)));
        assert_el_eq!(F, &y, reduction.map(&lift.map_into_fraction_field(&y)).unwrap());
        assert_eq!(F.to_vs(&y), F.get_ring().ideal().to_vs(&F.lift(&y)));
    }

    let F = ResidueField::new(test_poly_ideal(), &ResidueFieldOptions::default()).unwrap();
    let lift = (&F).lift_map();
    let reduction = (&F).reduction_map();
    for y in F.elements() {
        assert_el_eq!(F, &y, reduction.map(&lift.map_into_fraction_field(&y)).unwrap());
    }
}

#[test]
fn test_owned_field() {
    let ideal = test_number_field_ideal();
    let K = ideal.number_field().clone();
    let F = ResidueField::new(ideal.clone(), &ResidueFieldOptions::default()).unwrap();
    assert_eq!(&ideal, F.ideal());
    let a_bar = F.gen();
    assert_eq!(ideal.to_vs(&K.equation_order().generator()), F.to_vs(&a_bar));
    assert_el_eq!(F, &a_bar, F.from_vs(&F.to_vs(&a_bar)));

    let G = F.clone();
    assert_eq!(Some(841), G.size());
    assert_eq!(F.get_ring().minimal_polynomial(), G.get_ring().minimal_polynomial());
    assert_el_eq!(G, G.gen(), F.gen());
    assert_el_eq!(K.equation_order(), F.lift(&a_bar), G.lift(&G.gen()));

    let reduction = F.reduction_map();
    assert_el_eq!(reduction.codomain(), &a_bar, reduction.map(&K.generator()).unwrap());
    let hom = G.clone().ring_hom();
    assert_el_eq!(G, G.gen(), hom.map(K.equation_order().generator()));
    let lift = G.lift_map();
    assert_el_eq!(lift.domain(), lift.domain().gen(), reduction.map(&lift.map_into_fraction_field(&a_bar)).unwrap());
}

#[test]
fn test_forced_implementation() {
    let F = ResidueField::new(test_number_field_ideal(), &ResidueFieldOptions::default().with_implementation("pari")).unwrap();
    assert_eq!(FiniteFieldImplementation::PolynomialBasis, F.get_ring().implementation());
    let reduction = (&F).reduction_map();
    let K = F.ideal().number_field().clone();
    assert_el_eq!(F, F.gen(), reduction.map(&K.generator()).unwrap());

    let F = ResidueField::new(IntegerPrimeIdeal::new(17), &ResidueFieldOptions::default().with_implementation("givaro")).unwrap();
    assert_eq!(FiniteFieldImplementation::ZechLog, F.get_ring().implementation());
    assert_el_eq!(F, F.from_int(10), (&F).reduction_map().map(&RationalField::RING.from_fraction(3, 2)).unwrap());
}

#[test]
fn test_configuration_errors() {
    let options = ResidueFieldOptions::default();
    assert_eq!(
        Err(ConfigurationError::IncompatibleImplementation { implementation: FiniteFieldImplementation::PrimeModN, characteristic: 29, degree: 2 }),
        ResidueField::new(test_number_field_ideal(), &options.clone().with_implementation("modn")).map(|_| ())
    );
    assert_eq!(
        Err(ConfigurationError::UnknownImplementation("foo".to_owned())),
        ResidueField::new(IntegerPrimeIdeal::new(17), &options.clone().with_implementation("foo")).map(|_| ())
    );
    assert!(matches!(ResidueField::new(IntegerPrimeIdeal::new(91), &options), Err(ConfigurationError::NotPrime { .. })));

    let K = RationalFunctionField::new(PrimeField::new(5), "t");
    let P = K.poly_ring();
    // t^2 + 1 = (t + 2)(t - 2) over F5
    let reducible = P.from_coefficients([1, 0, 1].into_iter().map(|c| P.base_ring().from_int(c)));
    assert!(matches!(ResidueField::new(PolyPrimeIdeal::new(K, &reducible).unwrap(), &options), Err(ConfigurationError::NotPrime { .. })));

    let K = NumberField::new(&[-5, 0, 1], "a");
    let unsupported = NumberFieldPrimeIdeal::new(K, 2, &[1, 1]).unwrap();
    assert!(matches!(ResidueField::new(unsupported, &options), Err(ConfigurationError::UnsupportedRing { .. })));
}

#[test]
fn test_options() {
    let ideal = test_number_field_ideal();
    let options = ResidueFieldOptions::default();
    assert_eq!(("abar".to_owned(), FiniteFieldImplementation::ZechLog), options.resolve(&ideal).unwrap());
    assert_eq!(("w".to_owned(), FiniteFieldImplementation::PolynomialBasis), options.clone().with_name("w").with_implementation("pari").resolve(&ideal).unwrap());
    assert!(options.clone().with_check(false).validate(&IntegerPrimeIdeal::new(91)).is_ok());

    assert_eq!(r#"{"names":null,"check":true,"implementation":null}"#, serde_json::to_string(&options).unwrap());
    assert_eq!(options, serde_json::from_str::<ResidueFieldOptions>("{}").unwrap());
    assert_eq!(options.clone().with_implementation("ntl"), serde_json::from_str::<ResidueFieldOptions>(r#"{"implementation":"ntl"}"#).unwrap());
}

#[test]
fn test_serialize_elements() {
    let F = ResidueField::new(test_number_field_ideal(), &ResidueFieldOptions::default()).unwrap();
    crate::serialization::generic_tests::test_serialization(&F, F.elements().step_by(37));
    assert_eq!(
        r#"{"ideal":{"defining_polynomial":[-7,0,0,1],"variable_name":"a","characteristic":29,"factor":[24,16,1]},"name":"abar","implementation":"givaro"}"#,
        serde_json::to_string(F.get_ring()).unwrap()
    );
}
