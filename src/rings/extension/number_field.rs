use serde::{Deserializer, Serializer};

use crate::algorithms::linsolve::gauss;
use crate::divisibility::*;
use crate::field::*;
use crate::matrix::OwnedMatrix;
use crate::ring::*;
use crate::rings::extension::mul_mod_monic;
use crate::rings::integer::{add_i128, mul_i128, neg_i128, IntegerRing};
use crate::rings::poly::dbg_poly;
use crate::rings::rational::*;
use crate::serialization::*;

///
/// An algebraic number field `K = Q[X]/(f)` for a monic irreducible polynomial `f`
/// with integral coefficients, with elements stored as their coordinates w.r.t. the
/// power basis `1, θ, ..., θ^(n - 1)` where `θ` is the image of `X`.
///
/// The irreducibility of `f` is not checked. If `f` is reducible, this is still a ring
/// (and all ring operations work), but divisions by zero divisors will fail.
///
/// # Example
/// ```rust
/// # use residue_fields::assert_el_eq;
/// # use residue_fields::ring::*;
/// # use residue_fields::field::*;
/// # use residue_fields::rings::rational::*;
/// # use residue_fields::rings::extension::number_field::*;
/// let K = NumberField::new(&[-7, 0, 0, 1], "a");
/// let a = K.generator();
/// assert_el_eq!(K, K.from_int(7), K.pow(K.clone_el(&a), 3));
/// let a_inv = K.invert(&a);
/// assert_eq!("1/7*a^2", format!("{}", K.format(&a_inv)));
/// assert_el_eq!(RationalField::RING, RationalField::RING.from_int(7), K.norm(&a));
/// ```
///
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NumberFieldBase {
    modulus: Vec<i128>,
    modulus_qq: Vec<RationalFieldEl>,
    name: String
}

///
/// [`RingStore`] corresponding to [`NumberFieldBase`].
///
pub type NumberField = RingValue<NumberFieldBase>;

///
/// An element of a [`NumberField`].
///
#[derive(Clone, Debug)]
pub struct NumberFieldEl(Vec<RationalFieldEl>);

impl NumberField {

    ///
    /// Creates the number field `Q[X]/(f)`, where `f` is given by its coefficients, starting with
    /// the constant one. `f` must be monic.
    ///
    pub fn new(defining_polynomial: &[i128], name: &str) -> Self {
        assert!(defining_polynomial.len() >= 2, "defining polynomial must not be constant");
        assert_eq!(Some(&1), defining_polynomial.last(), "defining polynomial must be monic");
        let modulus = defining_polynomial[..(defining_polynomial.len() - 1)].to_vec();
        let modulus_qq = modulus.iter().map(|c| RationalField::RING.from_integer(*c)).collect();
        RingValue::from(NumberFieldBase { modulus, modulus_qq, name: name.to_owned() })
    }

    ///
    /// Returns the degree `[K : Q]`.
    ///
    pub fn rank(&self) -> usize {
        self.get_ring().modulus.len()
    }

    ///
    /// Returns the coefficients of the monic polynomial `f` with `K = Q[X]/(f)`,
    /// starting with the constant one.
    ///
    pub fn defining_polynomial(&self) -> Vec<i128> {
        self.get_ring().modulus.iter().copied().chain([1]).collect()
    }

    pub fn variable_name(&self) -> &str {
        &self.get_ring().name
    }

    ///
    /// Returns `θ`, the image of `X` under `Q[X] -> Q[X]/(f)`.
    ///
    pub fn generator(&self) -> NumberFieldEl {
        self.embed(self.equation_order().generator())
    }

    pub fn from_coordinates(&self, coordinates: Vec<RationalFieldEl>) -> NumberFieldEl {
        assert_eq!(self.rank(), coordinates.len());
        NumberFieldEl(coordinates)
    }

    pub fn coordinates<'a>(&self, x: &'a NumberFieldEl) -> &'a [RationalFieldEl] {
        &x.0
    }

    ///
    /// Returns the matrix of the multiplication-by-`x` map w.r.t. the power basis, i.e.
    /// the matrix whose `i`-th row are the coordinates of `x θ^i`.
    ///
    pub fn multiplication_matrix(&self, x: &NumberFieldEl) -> OwnedMatrix<RationalFieldEl> {
        self.get_ring().multiplication_matrix(x)
    }

    ///
    /// Computes the field norm `N_(K/Q)(x)`.
    ///
    pub fn norm(&self, x: &NumberFieldEl) -> RationalFieldEl {
        gauss::determinant(&self.multiplication_matrix(x), RationalField::RING)
    }

    ///
    /// Returns the smallest positive integer `d` such that `d x` has integral coordinates.
    ///
    pub fn denominator(&self, x: &NumberFieldEl) -> i128 {
        let QQ = RationalField::RING;
        x.0.iter().fold(1, |current, c| IntegerRing::RING.lcm(current, *QQ.den(c)))
    }

    ///
    /// Returns `(d x, d)` where `d` is the [`NumberField::denominator()`] of `x`, so `d x`
    /// lies in the equation order.
    ///
    pub fn integral_split(&self, x: &NumberFieldEl) -> (EquationOrderEl, i128) {
        let QQ = RationalField::RING;
        let d = self.denominator(x);
        let scaled = x.0.iter().map(|c| mul_i128(*QQ.num(c), d / QQ.den(c))).collect();
        return (EquationOrderEl(scaled), d);
    }

    ///
    /// Returns the equation order `Z[θ]` of this number field.
    ///
    pub fn equation_order(&self) -> EquationOrder {
        RingValue::from(EquationOrderBase { field: self.clone() })
    }

    ///
    /// Maps an element of the equation order into the number field.
    ///
    pub fn embed(&self, x: EquationOrderEl) -> NumberFieldEl {
        assert_eq!(self.rank(), x.0.len());
        NumberFieldEl(x.0.into_iter().map(|c| RationalField::RING.from_integer(c)).collect())
    }

    ///
    /// Returns `x` as an element of the equation order, if it is integral w.r.t. the power basis.
    ///
    pub fn as_order_element(&self, x: &NumberFieldEl) -> Option<EquationOrderEl> {
        x.0.iter().map(|c| RationalField::RING.as_integer(c)).collect::<Option<Vec<_>>>().map(EquationOrderEl)
    }
}

impl NumberFieldBase {

    fn multiplication_matrix(&self, x: &NumberFieldEl) -> OwnedMatrix<RationalFieldEl> {
        let n = self.modulus.len();
        let mut current = x.0.clone();
        let mut rows = Vec::with_capacity(n);
        for i in 0..n {
            if i > 0 {
                // multiplication by θ shifts the coordinates and reduces modulo f
                let overflow = current.pop().unwrap();
                current.insert(0, RationalField::RING.zero());
                for (c, m) in current.iter_mut().zip(self.modulus_qq.iter()) {
                    RationalField::RING.sub_assign(c, RationalField::RING.mul_ref(&overflow, m));
                }
            }
            rows.push(current.clone());
        }
        return OwnedMatrix::from_rows(rows, n);
    }

    fn invert(&self, x: &NumberFieldEl) -> Option<NumberFieldEl> {
        let inverse_matrix = gauss::invert(&self.multiplication_matrix(x), RationalField::RING)?;
        return Some(NumberFieldEl(inverse_matrix.row(0).to_vec()));
    }
}

impl RingBase for NumberFieldBase {

    type Element = NumberFieldEl;

    fn clone_el(&self, val: &Self::Element) -> Self::Element {
        val.clone()
    }

    fn add_assign(&self, lhs: &mut Self::Element, rhs: Self::Element) {
        for (a, b) in lhs.0.iter_mut().zip(rhs.0.into_iter()) {
            RationalField::RING.add_assign(a, b);
        }
    }

    fn negate_inplace(&self, lhs: &mut Self::Element) {
        for a in &mut lhs.0 {
            RationalField::RING.negate_inplace(a);
        }
    }

    fn mul_assign(&self, lhs: &mut Self::Element, rhs: Self::Element) {
        self.mul_assign_ref(lhs, &rhs);
    }

    fn mul_assign_ref(&self, lhs: &mut Self::Element, rhs: &Self::Element) {
        lhs.0 = mul_mod_monic(&lhs.0, &rhs.0, &self.modulus_qq, RationalField::RING);
    }

    fn from_int(&self, value: i32) -> Self::Element {
        let QQ = RationalField::RING;
        NumberFieldEl((0..self.modulus.len()).map(|i| if i == 0 { QQ.from_int(value) } else { QQ.zero() }).collect())
    }

    fn eq_el(&self, lhs: &Self::Element, rhs: &Self::Element) -> bool {
        lhs.0 == rhs.0
    }

    fn is_commutative(&self) -> bool { true }
    fn is_noetherian(&self) -> bool { true }

    fn dbg<'a>(&self, value: &Self::Element, out: &mut std::fmt::Formatter<'a>) -> std::fmt::Result {
        dbg_poly(&value.0, RationalField::RING, &self.name, out)
    }
}

impl DivisibilityRing for NumberFieldBase {

    fn checked_left_div(&self, lhs: &Self::Element, rhs: &Self::Element) -> Option<Self::Element> {
        if self.is_zero(lhs) {
            return Some(self.zero());
        } else if self.is_zero(rhs) {
            return None;
        }
        let rhs_inv = self.invert(rhs)?;
        return Some(self.mul_ref(lhs, &rhs_inv));
    }
}

impl Field for NumberFieldBase {}

impl SerializableElementRing for NumberFieldBase {

    fn deserialize<'de, D>(&self, deserializer: D) -> Result<Self::Element, D::Error>
        where D: Deserializer<'de>
    {
        let mut coordinates = Vec::new();
        deserialize_seq_helper(deserializer, |c| coordinates.push(c), DeserializeWithRing::new(RationalField::RING))?;
        if coordinates.len() != self.modulus.len() {
            return Err(serde::de::Error::invalid_length(coordinates.len(), &"one coordinate per power basis element"));
        }
        return Ok(NumberFieldEl(coordinates));
    }

    fn serialize<S>(&self, el: &Self::Element, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        serialize_seq_helper(serializer, el.0.iter().map(|c| SerializeWithRing::new(c, RationalField::RING)))
    }
}

///
/// The equation order `Z[θ]` of a [`NumberField`] `K = Q[θ]`, i.e. the subring of
/// elements with integral coordinates w.r.t. the power basis.
///
/// This is contained in the ring of integers of `K`, but in general not equal to it.
///
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EquationOrderBase {
    field: NumberField
}

///
/// [`RingStore`] corresponding to [`EquationOrderBase`].
///
pub type EquationOrder = RingValue<EquationOrderBase>;

///
/// An element of an [`EquationOrder`].
///
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EquationOrderEl(Vec<i128>);

impl EquationOrder {

    ///
    /// The number field whose equation order this is.
    ///
    pub fn number_field(&self) -> &NumberField {
        &self.get_ring().field
    }

    pub fn rank(&self) -> usize {
        self.number_field().rank()
    }

    pub fn generator(&self) -> EquationOrderEl {
        if self.rank() == 1 {
            // θ is the root of X + f_0
            return EquationOrderEl(vec![-self.number_field().get_ring().modulus[0]]);
        }
        EquationOrderEl((0..self.rank()).map(|i| if i == 1 { 1 } else { 0 }).collect())
    }

    pub fn from_coordinates(&self, coordinates: Vec<i128>) -> EquationOrderEl {
        assert_eq!(self.rank(), coordinates.len());
        EquationOrderEl(coordinates)
    }

    pub fn coordinates<'a>(&self, x: &'a EquationOrderEl) -> &'a [i128] {
        &x.0
    }
}

impl RingBase for EquationOrderBase {

    type Element = EquationOrderEl;

    fn clone_el(&self, val: &Self::Element) -> Self::Element {
        val.clone()
    }

    fn add_assign(&self, lhs: &mut Self::Element, rhs: Self::Element) {
        for (a, b) in lhs.0.iter_mut().zip(rhs.0.into_iter()) {
            *a = add_i128(*a, b);
        }
    }

    fn negate_inplace(&self, lhs: &mut Self::Element) {
        for a in &mut lhs.0 {
            *a = neg_i128(*a);
        }
    }

    fn mul_assign(&self, lhs: &mut Self::Element, rhs: Self::Element) {
        self.mul_assign_ref(lhs, &rhs);
    }

    fn mul_assign_ref(&self, lhs: &mut Self::Element, rhs: &Self::Element) {
        lhs.0 = mul_mod_monic(&lhs.0, &rhs.0, &self.field.get_ring().modulus, IntegerRing::RING);
    }

    fn from_int(&self, value: i32) -> Self::Element {
        EquationOrderEl((0..self.field.rank()).map(|i| if i == 0 { value as i128 } else { 0 }).collect())
    }

    fn eq_el(&self, lhs: &Self::Element, rhs: &Self::Element) -> bool {
        lhs.0 == rhs.0
    }

    fn is_commutative(&self) -> bool { true }
    fn is_noetherian(&self) -> bool { true }

    fn dbg<'a>(&self, value: &Self::Element, out: &mut std::fmt::Formatter<'a>) -> std::fmt::Result {
        dbg_poly(&value.0, IntegerRing::RING, self.field.variable_name(), out)
    }
}

impl DivisibilityRing for EquationOrderBase {

    fn checked_left_div(&self, lhs: &Self::Element, rhs: &Self::Element) -> Option<Self::Element> {
        let K = &self.field;
        let quotient = K.checked_left_div(&K.embed(lhs.clone()), &K.embed(rhs.clone()))?;
        return K.as_order_element(&quotient);
    }
}

impl SerializableElementRing for EquationOrderBase {

    fn deserialize<'de, D>(&self, deserializer: D) -> Result<Self::Element, D::Error>
        where D: Deserializer<'de>
    {
        let mut coordinates = Vec::new();
        deserialize_seq_helper(deserializer, |c| coordinates.push(c), DeserializeWithRing::new(IntegerRing::RING))?;
        if coordinates.len() != self.field.rank() {
            return Err(serde::de::Error::invalid_length(coordinates.len(), &"one coordinate per power basis element"));
        }
        return Ok(EquationOrderEl(coordinates));
    }

    fn serialize<S>(&self, el: &Self::Element, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        serialize_seq_helper(serializer, el.0.iter().map(|c| SerializeWithRing::new(c, IntegerRing::RING)))
    }
}

#[cfg(test)]
fn edge_case_elements(K: &NumberField) -> Vec<NumberFieldEl> {
    let QQ = RationalField::RING;
    vec![
        K.zero(),
        K.one(),
        K.generator(),
        K.from_coordinates(vec![QQ.from_int(1), QQ.from_int(-1), QQ.zero()]),
        K.from_coordinates(vec![QQ.zero(), QQ.from_fraction(1, 2), QQ.from_int(2)]),
        K.from_coordinates(vec![QQ.from_fraction(-2, 3), QQ.zero(), QQ.from_int(1)])
    ]
}

#[test]
fn test_ring_axioms() {
    let K = NumberField::new(&[-7, 0, 0, 1], "a");
    crate::ring::generic_tests::test_ring_axioms(&K, edge_case_elements(&K).into_iter());
    crate::field::generic_tests::test_field_axioms(&K, edge_case_elements(&K).into_iter());
    let O = K.equation_order();
    crate::ring::generic_tests::test_ring_axioms(&O, [vec![0, 0, 0], vec![1, 0, 0], vec![0, 1, 0], vec![3, -1, 2], vec![-5, 0, 1]].into_iter().map(|c| O.from_coordinates(c)));
}

#[test]
fn test_norm() {
    let QQ = RationalField::RING;
    let K = NumberField::new(&[-7, 0, 0, 1], "a");
    assert_el_eq!(QQ, QQ.from_int(7), K.norm(&K.generator()));
    assert_el_eq!(QQ, QQ.from_int(8), K.norm(&K.add(K.generator(), K.one())));
    assert_el_eq!(QQ, QQ.from_int(27), K.norm(&K.from_int(3)));
    assert_el_eq!(QQ, QQ.from_fraction(1, 8), K.norm(&K.invert(&K.from_int(2))));
}

#[test]
fn test_integral_split() {
    let QQ = RationalField::RING;
    let K = NumberField::new(&[-7, 0, 0, 1], "a");
    let x = K.from_coordinates(vec![QQ.from_fraction(1, 3), QQ.from_fraction(1, 2), QQ.zero()]);
    let (nx, d) = K.integral_split(&x);
    assert_eq!(6, d);
    assert_eq!(&[2, 3, 0], K.equation_order().coordinates(&nx));
    assert_el_eq!(K, K.mul(x, K.from_int(6)), K.embed(nx));
    assert!(K.as_order_element(&K.generator()).is_some());
}

#[test]
fn test_order_division() {
    let K = NumberField::new(&[-7, 0, 0, 1], "a");
    let O = K.equation_order();
    let a = O.generator();
    let a_squared = O.mul_ref(&a, &a);
    assert_el_eq!(O, a, O.checked_left_div(&O.from_int(7), &a_squared).unwrap());
    assert!(O.checked_left_div(&O.one(), &a).is_none());
    assert_eq!("a^2 + 3", format!("{}", O.format(&O.add(a_squared, O.from_int(3)))));
}

#[test]
fn test_serialization() {
    let K = NumberField::new(&[-7, 0, 0, 1], "a");
    crate::serialization::generic_tests::test_serialization(&K, edge_case_elements(&K).into_iter());
    let O = K.equation_order();
    crate::serialization::generic_tests::test_serialization(&O, [O.generator(), O.from_coordinates(vec![-1, 2, 100])].into_iter());
}
