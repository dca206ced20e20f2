use serde::{Deserializer, Serializer};

use crate::divisibility::*;
use crate::field::*;
use crate::ring::*;
use crate::rings::poly::*;
use crate::serialization::*;

///
/// The univariate polynomial ring `R[X]`. Polynomials are stored as dense vectors of
/// coefficients, without trailing zeros.
///
/// # Example
/// ```rust
/// # use residue_fields::ring::*;
/// # use residue_fields::rings::zn::*;
/// # use residue_fields::rings::poly::*;
/// # use residue_fields::rings::poly::dense_poly::*;
/// let Fp = PrimeField::new(5);
/// let P = DensePolyRing::new(Fp, "t");
/// let t_plus_1 = P.add(P.indeterminate(), P.one());
/// let f = P.pow(t_plus_1, 5);
/// assert_eq!(Some(5), P.degree(&f));
/// assert!(Fp.is_zero(P.coefficient_at(&f, 2)));
/// assert_eq!("t^5 + 1", format!("{}", P.format(&f)));
/// ```
///
pub struct DensePolyRingBase<R: RingStore> {
    base_ring: R,
    unknown_name: String,
    zero: El<R>
}

impl<R: RingStore + Clone> Clone for DensePolyRingBase<R> {

    fn clone(&self) -> Self {
        DensePolyRingBase {
            base_ring: <R as Clone>::clone(&self.base_ring),
            unknown_name: self.unknown_name.clone(),
            zero: self.base_ring.zero()
        }
    }
}

impl<R: RingStore + std::fmt::Debug> std::fmt::Debug for DensePolyRingBase<R> {

    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DensePolyRing").field("base_ring", &self.base_ring).field("unknown_name", &self.unknown_name).finish()
    }
}

///
/// The univariate polynomial ring `R[X]`, with polynomials being stored as dense vectors of coefficients.
/// For details, see [`DensePolyRingBase`].
///
pub type DensePolyRing<R> = RingValue<DensePolyRingBase<R>>;

impl<R: RingStore> DensePolyRing<R> {

    pub fn new(base_ring: R, unknown_name: &str) -> Self {
        let zero = base_ring.zero();
        RingValue::from(DensePolyRingBase {
            base_ring,
            unknown_name: unknown_name.to_owned(),
            zero
        })
    }
}

///
/// An element of [`DensePolyRing`].
///
pub struct DensePolyRingEl<R: RingStore> {
    data: Vec<El<R>>
}

impl<R: RingStore> DensePolyRingBase<R> {

    fn trim(&self, mut data: Vec<El<R>>) -> DensePolyRingEl<R> {
        while data.last().map(|c| self.base_ring.is_zero(c)).unwrap_or(false) {
            data.pop();
        }
        return DensePolyRingEl { data };
    }
}

impl<R: RingStore> PartialEq for DensePolyRingBase<R>
    where R: PartialEq
{
    fn eq(&self, other: &Self) -> bool {
        self.base_ring == other.base_ring && self.unknown_name == other.unknown_name
    }
}

impl<R: RingStore> RingBase for DensePolyRingBase<R> {

    type Element = DensePolyRingEl<R>;

    fn clone_el(&self, val: &Self::Element) -> Self::Element {
        DensePolyRingEl { data: val.data.iter().map(|c| self.base_ring.clone_el(c)).collect() }
    }

    fn add_assign_ref(&self, lhs: &mut Self::Element, rhs: &Self::Element) {
        let mut data = std::mem::take(&mut lhs.data);
        for (i, c) in rhs.data.iter().enumerate() {
            if i < data.len() {
                self.base_ring.add_assign_ref(&mut data[i], c);
            } else {
                data.push(self.base_ring.clone_el(c));
            }
        }
        *lhs = self.trim(data);
    }

    fn add_assign(&self, lhs: &mut Self::Element, rhs: Self::Element) {
        self.add_assign_ref(lhs, &rhs);
    }

    fn negate_inplace(&self, lhs: &mut Self::Element) {
        for c in &mut lhs.data {
            self.base_ring.negate_inplace(c);
        }
    }

    fn mul_assign_ref(&self, lhs: &mut Self::Element, rhs: &Self::Element) {
        *lhs = self.mul_ref(lhs, rhs);
    }

    fn mul_assign(&self, lhs: &mut Self::Element, rhs: Self::Element) {
        self.mul_assign_ref(lhs, &rhs);
    }

    fn mul_ref(&self, lhs: &Self::Element, rhs: &Self::Element) -> Self::Element {
        if lhs.data.len() == 0 || rhs.data.len() == 0 {
            return self.zero();
        }
        let mut data = (0..(lhs.data.len() + rhs.data.len() - 1)).map(|_| self.base_ring.zero()).collect::<Vec<_>>();
        for (i, a) in lhs.data.iter().enumerate() {
            for (j, b) in rhs.data.iter().enumerate() {
                self.base_ring.add_assign(&mut data[i + j], self.base_ring.mul_ref(a, b));
            }
        }
        return self.trim(data);
    }

    fn from_int(&self, value: i32) -> Self::Element {
        self.trim(vec![self.base_ring.from_int(value)])
    }

    fn zero(&self) -> Self::Element {
        DensePolyRingEl { data: Vec::new() }
    }

    fn is_zero(&self, value: &Self::Element) -> bool {
        value.data.len() == 0
    }

    fn eq_el(&self, lhs: &Self::Element, rhs: &Self::Element) -> bool {
        lhs.data.len() == rhs.data.len() && lhs.data.iter().zip(rhs.data.iter()).all(|(a, b)| self.base_ring.eq_el(a, b))
    }

    fn is_commutative(&self) -> bool {
        self.base_ring.is_commutative()
    }

    fn is_noetherian(&self) -> bool {
        self.base_ring.is_noetherian()
    }

    fn dbg<'a>(&self, value: &Self::Element, out: &mut std::fmt::Formatter<'a>) -> std::fmt::Result {
        dbg_poly(&value.data, &self.base_ring, &self.unknown_name, out)
    }
}

impl<R: RingStore> PolyRing for DensePolyRingBase<R> {

    type BaseRing = R;

    fn base_ring<'a>(&'a self) -> &'a Self::BaseRing {
        &self.base_ring
    }

    fn indeterminate(&self) -> Self::Element {
        DensePolyRingEl { data: vec![self.base_ring.zero(), self.base_ring.one()] }
    }

    fn indeterminate_name(&self) -> &str {
        &self.unknown_name
    }

    fn from_terms<I>(&self, terms: I) -> Self::Element
        where I: IntoIterator<Item = (El<Self::BaseRing>, usize)>
    {
        let mut data = Vec::new();
        for (c, i) in terms {
            if i >= data.len() {
                data.resize_with(i + 1, || self.base_ring.zero());
            }
            self.base_ring.add_assign(&mut data[i], c);
        }
        return self.trim(data);
    }

    fn coefficient_at<'a>(&'a self, f: &'a Self::Element, i: usize) -> &'a El<Self::BaseRing> {
        if i < f.data.len() { &f.data[i] } else { &self.zero }
    }

    fn degree(&self, f: &Self::Element) -> Option<usize> {
        f.data.len().checked_sub(1)
    }

    fn div_rem_monic(&self, lhs: Self::Element, rhs: &Self::Element) -> (Self::Element, Self::Element) {
        let d = self.degree(rhs).expect("division by zero");
        assert!(self.base_ring.is_one(&rhs.data[d]), "divisor must be monic");
        let mut rem = lhs.data;
        if rem.len() <= d {
            return (self.zero(), self.trim(rem));
        }
        let mut quo = (0..(rem.len() - d)).map(|_| self.base_ring.zero()).collect::<Vec<_>>();
        for i in (0..quo.len()).rev() {
            let factor = std::mem::replace(&mut rem[i + d], self.base_ring.zero());
            for j in 0..d {
                let delta = self.base_ring.mul_ref(&factor, &rhs.data[j]);
                self.base_ring.sub_assign(&mut rem[i + j], delta);
            }
            quo[i] = factor;
        }
        rem.truncate(d);
        return (self.trim(quo), self.trim(rem));
    }
}

impl<R: RingStore> DivisibilityRing for DensePolyRingBase<R>
    where R::Type: Field
{
    fn checked_left_div(&self, lhs: &Self::Element, rhs: &Self::Element) -> Option<Self::Element> {
        if self.is_zero(lhs) {
            return Some(self.zero());
        } else if self.is_zero(rhs) {
            return None;
        }
        let (q, r) = RingRef::new(self).div_rem(self.clone_el(lhs), rhs);
        if self.is_zero(&r) {
            return Some(q);
        } else {
            return None;
        }
    }
}

impl<R: RingStore> SerializableElementRing for DensePolyRingBase<R>
    where R::Type: SerializableElementRing
{
    fn deserialize<'de, D>(&self, deserializer: D) -> Result<Self::Element, D::Error>
        where D: Deserializer<'de>
    {
        let mut data = Vec::new();
        deserialize_seq_helper(deserializer, |c| data.push(c), DeserializeWithRing::new(&self.base_ring))?;
        return Ok(self.trim(data));
    }

    fn serialize<S>(&self, el: &Self::Element, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        serialize_seq_helper(serializer, el.data.iter().map(|c| SerializeWithRing::new(c, &self.base_ring)))
    }
}

#[cfg(test)]
use crate::rings::zn::PrimeField;
#[cfg(test)]
use crate::rings::rational::RationalField;

#[cfg(test)]
fn edge_case_elements<R: RingStore>(P: &DensePolyRing<R>) -> Vec<DensePolyRingEl<R>> {
    let base_ring = P.base_ring();
    vec![
        P.zero(),
        P.one(),
        P.indeterminate(),
        P.from_coefficients([base_ring.from_int(2), base_ring.zero(), base_ring.from_int(3)]),
        P.from_coefficients([base_ring.from_int(-1), base_ring.one()]),
        P.from_coefficients([base_ring.zero(), base_ring.zero(), base_ring.zero(), base_ring.from_int(4)])
    ]
}

#[test]
fn test_ring_axioms() {
    let P = DensePolyRing::new(PrimeField::new(7), "t");
    crate::ring::generic_tests::test_ring_axioms(&P, edge_case_elements(&P).into_iter());
    crate::divisibility::generic_tests::test_divisibility_axioms(&P, edge_case_elements(&P).into_iter());
}

#[test]
fn test_div_rem() {
    let Fp = PrimeField::new(7);
    let P = DensePolyRing::new(Fp, "t");
    let f = P.from_coefficients([Fp.from_int(1), Fp.from_int(2), Fp.from_int(3), Fp.from_int(4)]);
    let g = P.from_coefficients([Fp.from_int(5), Fp.from_int(0), Fp.from_int(2)]);
    let (q, r) = P.div_rem(P.clone_el(&f), &g);
    assert!(P.degree(&r).unwrap() < 2);
    assert_el_eq!(P, f, P.add(P.mul_ref(&q, &g), r));

    let monic = P.normalize(P.clone_el(&g));
    assert_el_eq!(Fp, Fp.one(), P.lc(&monic).unwrap());
    let (q, r) = P.div_rem_monic(P.mul_ref(&monic, &monic), &monic);
    assert_el_eq!(P, monic, q);
    assert!(P.is_zero(&r));
}

#[test]
fn test_gcd() {
    let Fp = PrimeField::new(5);
    let P = DensePolyRing::new(Fp, "t");
    let t = P.indeterminate();
    let a = P.sub(P.clone_el(&t), P.one());
    let b = P.add(P.clone_el(&t), P.from_int(2));
    let c = P.add(P.mul_ref(&t, &t), P.from_int(2));
    let f = P.mul_ref(&a, &b);
    let g = P.mul_ref(&a, &c);
    assert_el_eq!(P, a, P.ideal_gen(&f, &g));
    let (s, u, d) = P.extended_ideal_gen(&f, &g);
    assert_el_eq!(P, a, d);
    assert_el_eq!(P, d, P.add(P.mul_ref(&s, &f), P.mul_ref(&u, &g)));
    let (s, u, d) = P.extended_ideal_gen(&b, &c);
    assert_el_eq!(P, P.one(), d);
    assert_el_eq!(P, P.one(), P.add(P.mul_ref(&s, &b), P.mul_ref(&u, &c)));
}

#[test]
fn test_derivative() {
    let QQ = RationalField::RING;
    let P = DensePolyRing::new(QQ, "x");
    let f = P.from_coefficients([QQ.from_int(-7), QQ.zero(), QQ.zero(), QQ.one()]);
    assert_el_eq!(P, P.from_coefficients([QQ.zero(), QQ.zero(), QQ.from_int(3)]), P.derivative(&f));
    assert_eq!("x^3 - 7", format!("{}", P.format(&f)));
    let g = P.from_coefficients([QQ.from_fraction(1, 2), QQ.from_int(-1), QQ.from_int(2)]);
    assert_eq!("2*x^2 - x + 1/2", format!("{}", P.format(&g)));
}

#[test]
fn test_serialization() {
    let P = DensePolyRing::new(PrimeField::new(7), "t");
    crate::serialization::generic_tests::test_serialization(&P, edge_case_elements(&P).into_iter());
}
