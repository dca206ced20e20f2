use std::rc::Rc;
use std::sync::Arc;

use crate::algorithms;

///
/// Basic trait for objects that have a ring structure.
///
/// Implementors of this trait provide the basic ring operations, and
/// additionally functions for displaying and equality testing of elements.
/// If a performance advantage can be achieved by accepting some arguments by
/// reference instead of by value, the default-implemented functions for
/// ring operations on references should be overwritten.
///
/// Note that usually, this trait will not be used directly, but always
/// through a [`RingStore`]. In more detail, while this trait defines the
/// functionality, [`RingStore`] allows abstracting the storage - everything
/// that allows access to a ring then is a [`RingStore`]. For example,
/// references or shared pointers to rings. If you want to use rings directly
/// by value, some technical details make it necessary to use the no-op
/// container [`RingValue`].
///
/// Elements do not store a reference to their ring. Hence, every operation
/// on elements is performed through the ring, and it is up to the user to
/// only pass elements to the ring they belong to.
///
pub trait RingBase {

    type Element: Sized;

    fn clone_el(&self, val: &Self::Element) -> Self::Element;
    fn add_assign(&self, lhs: &mut Self::Element, rhs: Self::Element);
    fn negate_inplace(&self, lhs: &mut Self::Element);
    fn mul_assign(&self, lhs: &mut Self::Element, rhs: Self::Element);
    fn from_int(&self, value: i32) -> Self::Element;
    fn eq_el(&self, lhs: &Self::Element, rhs: &Self::Element) -> bool;
    fn is_commutative(&self) -> bool;
    fn is_noetherian(&self) -> bool;
    fn dbg<'a>(&self, value: &Self::Element, out: &mut std::fmt::Formatter<'a>) -> std::fmt::Result;

    fn add_assign_ref(&self, lhs: &mut Self::Element, rhs: &Self::Element) { self.add_assign(lhs, self.clone_el(rhs)) }
    fn sub_assign_ref(&self, lhs: &mut Self::Element, rhs: &Self::Element) { self.sub_assign(lhs, self.clone_el(rhs)) }
    fn mul_assign_ref(&self, lhs: &mut Self::Element, rhs: &Self::Element) { self.mul_assign(lhs, self.clone_el(rhs)) }
    fn zero(&self) -> Self::Element { self.from_int(0) }
    fn one(&self) -> Self::Element { self.from_int(1) }
    fn neg_one(&self) -> Self::Element { self.from_int(-1) }
    fn is_zero(&self, value: &Self::Element) -> bool { self.eq_el(value, &self.zero()) }
    fn is_one(&self, value: &Self::Element) -> bool { self.eq_el(value, &self.one()) }
    fn is_neg_one(&self, value: &Self::Element) -> bool { self.eq_el(value, &self.neg_one()) }

    fn negate(&self, mut value: Self::Element) -> Self::Element {
        self.negate_inplace(&mut value);
        return value;
    }

    fn sub_assign(&self, lhs: &mut Self::Element, mut rhs: Self::Element) {
        self.negate_inplace(&mut rhs);
        self.add_assign(lhs, rhs);
    }

    fn add_ref(&self, lhs: &Self::Element, rhs: &Self::Element) -> Self::Element {
        let mut result = self.clone_el(lhs);
        self.add_assign_ref(&mut result, rhs);
        return result;
    }

    fn add(&self, mut lhs: Self::Element, rhs: Self::Element) -> Self::Element {
        self.add_assign(&mut lhs, rhs);
        return lhs;
    }

    fn sub_ref(&self, lhs: &Self::Element, rhs: &Self::Element) -> Self::Element {
        let mut result = self.clone_el(lhs);
        self.sub_assign_ref(&mut result, rhs);
        return result;
    }

    fn sub(&self, mut lhs: Self::Element, rhs: Self::Element) -> Self::Element {
        self.sub_assign(&mut lhs, rhs);
        return lhs;
    }

    fn mul_ref(&self, lhs: &Self::Element, rhs: &Self::Element) -> Self::Element {
        let mut result = self.clone_el(lhs);
        self.mul_assign_ref(&mut result, rhs);
        return result;
    }

    fn mul_ref_fst(&self, lhs: &Self::Element, mut rhs: Self::Element) -> Self::Element {
        if self.is_commutative() {
            self.mul_assign_ref(&mut rhs, lhs);
            return rhs;
        } else {
            let mut result = self.clone_el(lhs);
            self.mul_assign(&mut result, rhs);
            return result;
        }
    }

    fn mul(&self, mut lhs: Self::Element, rhs: Self::Element) -> Self::Element {
        self.mul_assign(&mut lhs, rhs);
        return lhs;
    }
}

macro_rules! delegate {
    (fn $name:ident (&self, $($pname:ident: $ptype:ty),*) -> $rtype:ty) => {
        fn $name (&self, $($pname: $ptype),*) -> $rtype {
            self.get_ring().$name($($pname),*)
        }
    };
    (fn $name:ident (&self) -> $rtype:ty) => {
        fn $name (&self) -> $rtype {
            self.get_ring().$name()
        }
    };
}

///
/// Asserts that two elements of a ring are equal, using the equality of the
/// ring (and not [`PartialEq`], which elements usually don't implement).
/// On failure, both elements are printed using [`RingStore::format()`].
///
/// # Example
/// ```rust
/// # use residue_fields::assert_el_eq;
/// # use residue_fields::ring::*;
/// # use residue_fields::rings::zn::*;
/// let Fp = PrimeField::new(7);
/// assert_el_eq!(Fp, Fp.from_int(3), Fp.from_int(10));
/// ```
///
#[macro_export]
macro_rules! assert_el_eq {
    ($ring:expr, $lhs:expr, $rhs:expr) => {
        match (&$ring, &$lhs, &$rhs) {
            (ring_val, lhs_val, rhs_val) => {
                assert!(<_ as $crate::ring::RingStore>::eq_el(ring_val, lhs_val, rhs_val), "Assertion failed: {} != {}", <_ as $crate::ring::RingStore>::format(ring_val, lhs_val), <_ as $crate::ring::RingStore>::format(ring_val, rhs_val));
            }
        }
    }
}

///
/// Basic trait for objects that store (in some sense) a ring. This can
/// be a ring-by-value, a reference to a ring, or a shared pointer to a ring.
///
/// As opposed to [`RingBase`], which is responsible for the functionality
/// and ring operations, this trait is solely responsible for the storage.
/// All ring operations are also available through this trait, and forward
/// to the underlying [`RingBase`].
///
pub trait RingStore: Sized {

    type Type: RingBase + ?Sized;

    fn get_ring<'a>(&'a self) -> &'a Self::Type;

    delegate!{ fn clone_el(&self, val: &El<Self>) -> El<Self> }
    delegate!{ fn add_assign_ref(&self, lhs: &mut El<Self>, rhs: &El<Self>) -> () }
    delegate!{ fn add_assign(&self, lhs: &mut El<Self>, rhs: El<Self>) -> () }
    delegate!{ fn sub_assign_ref(&self, lhs: &mut El<Self>, rhs: &El<Self>) -> () }
    delegate!{ fn sub_assign(&self, lhs: &mut El<Self>, rhs: El<Self>) -> () }
    delegate!{ fn negate_inplace(&self, lhs: &mut El<Self>) -> () }
    delegate!{ fn mul_assign(&self, lhs: &mut El<Self>, rhs: El<Self>) -> () }
    delegate!{ fn mul_assign_ref(&self, lhs: &mut El<Self>, rhs: &El<Self>) -> () }
    delegate!{ fn zero(&self) -> El<Self> }
    delegate!{ fn one(&self) -> El<Self> }
    delegate!{ fn neg_one(&self) -> El<Self> }
    delegate!{ fn eq_el(&self, lhs: &El<Self>, rhs: &El<Self>) -> bool }
    delegate!{ fn is_zero(&self, value: &El<Self>) -> bool }
    delegate!{ fn is_one(&self, value: &El<Self>) -> bool }
    delegate!{ fn is_neg_one(&self, value: &El<Self>) -> bool }
    delegate!{ fn is_commutative(&self) -> bool }
    delegate!{ fn is_noetherian(&self) -> bool }
    delegate!{ fn negate(&self, value: El<Self>) -> El<Self> }
    delegate!{ fn add_ref(&self, lhs: &El<Self>, rhs: &El<Self>) -> El<Self> }
    delegate!{ fn add(&self, lhs: El<Self>, rhs: El<Self>) -> El<Self> }
    delegate!{ fn sub_ref(&self, lhs: &El<Self>, rhs: &El<Self>) -> El<Self> }
    delegate!{ fn sub(&self, lhs: El<Self>, rhs: El<Self>) -> El<Self> }
    delegate!{ fn mul_ref(&self, lhs: &El<Self>, rhs: &El<Self>) -> El<Self> }
    delegate!{ fn mul_ref_fst(&self, lhs: &El<Self>, rhs: El<Self>) -> El<Self> }
    delegate!{ fn mul(&self, lhs: El<Self>, rhs: El<Self>) -> El<Self> }

    delegate!{ fn from_int(&self, value: i32) -> El<Self> }

    fn sum<I>(&self, els: I) -> El<Self>
        where I: IntoIterator<Item = El<Self>>
    {
        els.into_iter().fold(self.zero(), |a, b| self.add(a, b))
    }

    fn prod<I>(&self, els: I) -> El<Self>
        where I: IntoIterator<Item = El<Self>>
    {
        els.into_iter().fold(self.one(), |a, b| self.mul(a, b))
    }

    ///
    /// Raises the given element to the given power, using square-and-multiply.
    ///
    fn pow(&self, x: El<Self>, power: u128) -> El<Self> {
        algorithms::sqr_mul::generic_abs_square_and_multiply(
            x,
            power,
            |a| self.mul_ref(&a, &a),
            |a, b| self.mul_ref_fst(a, b),
            self.one()
        )
    }

    fn format<'a>(&'a self, value: &'a El<Self>) -> RingElementDisplayWrapper<'a, Self> {
        RingElementDisplayWrapper { ring: self, element: value }
    }

    fn println(&self, value: &El<Self>) {
        println!("{}", self.format(value));
    }
}

///
/// Wrapper around a ring element that implements [`std::fmt::Display`], as
/// returned by [`RingStore::format()`].
///
pub struct RingElementDisplayWrapper<'a, R: RingStore + ?Sized> {
    ring: &'a R,
    element: &'a El<R>
}

impl<'a, R: RingStore + ?Sized> std::fmt::Display for RingElementDisplayWrapper<'a, R> {

    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.ring.get_ring().dbg(self.element, f)
    }
}

///
/// The element type of the ring stored by the [`RingStore`] `R`.
///
pub type El<R> = <<R as RingStore>::Type as RingBase>::Element;

///
/// The most fundamental [`RingStore`]. It is basically a no-op container,
/// i.e. stores a [`RingBase`] object by value, and allows accessing it.
///
/// # Why is this necessary?
///
/// We cannot implement
/// ```ignore
/// impl<R: RingBase> RingStore for R {}
/// impl<'a, R: RingStore> RingStore for &'a R {}
/// ```
/// since this might cause conflicting implementations. Instead, we
/// implement [`RingStore`] for `RingValue<R>`, and recommend the following
/// pattern:
/// ```ignore
/// struct ABase { ... }
/// impl RingBase for ABase { ... }
/// type A = RingValue<ABase>;
/// ```
///
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RingValue<R: RingBase> {
    ring: R
}

impl<R: RingBase> RingValue<R> {

    pub const fn from(value: R) -> Self {
        RingValue { ring: value }
    }
}

impl<R: RingBase> RingStore for RingValue<R> {

    type Type = R;

    fn get_ring(&self) -> &R {
        &self.ring
    }
}

///
/// The second most basic [`RingStore`]. Similarly to [`RingValue`] it is
/// just a no-op container, but stores a reference to the ring.
///
/// This is useful when implementing [`RingBase`]-functions using algorithms
/// that require a [`RingStore`], since there we only have a reference
/// `&self` to the [`RingBase`] object.
///
pub struct RingRef<'a, R: RingBase + ?Sized> {
    ring: &'a R
}

impl<'a, R: RingBase + ?Sized> Clone for RingRef<'a, R> {

    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, R: RingBase + ?Sized> Copy for RingRef<'a, R> {}

impl<'a, R: RingBase + ?Sized> RingRef<'a, R> {

    pub const fn new(value: &'a R) -> Self {
        RingRef { ring: value }
    }
}

impl<'a, R: RingBase + ?Sized> RingStore for RingRef<'a, R> {

    type Type = R;

    fn get_ring(&self) -> &R {
        self.ring
    }
}

impl<'a, R: RingStore> RingStore for &'a R {

    type Type = <R as RingStore>::Type;

    fn get_ring(&self) -> &Self::Type {
        (**self).get_ring()
    }
}

impl<R: RingStore> RingStore for Box<R> {

    type Type = <R as RingStore>::Type;

    fn get_ring(&self) -> &Self::Type {
        (**self).get_ring()
    }
}

impl<R: RingStore> RingStore for Rc<R> {

    type Type = <R as RingStore>::Type;

    fn get_ring(&self) -> &Self::Type {
        (**self).get_ring()
    }
}

impl<R: RingStore> RingStore for Arc<R> {

    type Type = <R as RingStore>::Type;

    fn get_ring(&self) -> &Self::Type {
        (**self).get_ring()
    }
}

#[cfg(any(test, feature = "generic_tests"))]
pub mod generic_tests {

    use super::*;

    pub fn test_ring_axioms<R: RingStore, I: Iterator<Item = El<R>>>(ring: R, edge_case_elements: I) {
        let elements = edge_case_elements.collect::<Vec<_>>();
        let zero = ring.zero();
        let one = ring.one();

        // check self-subtraction
        for a in &elements {
            assert_el_eq!(ring, zero, ring.sub_ref(a, a));
        }

        // check identity elements
        for a in &elements {
            assert_el_eq!(ring, a, ring.add_ref(a, &zero));
            assert_el_eq!(ring, a, ring.mul_ref(a, &one));
        }

        for a in &elements {
            for b in &elements {
                assert_el_eq!(ring, ring.add_ref(a, b), ring.add_ref(b, a));
                if ring.is_commutative() {
                    assert_el_eq!(ring, ring.mul_ref(a, b), ring.mul_ref(b, a));
                }
            }
        }

        for a in &elements {
            for b in &elements {
                for c in &elements {
                    assert_el_eq!(ring, ring.add(ring.add_ref(a, b), ring.clone_el(c)), ring.add(ring.clone_el(a), ring.add_ref(b, c)));
                    assert_el_eq!(ring, ring.mul(ring.mul_ref(a, b), ring.clone_el(c)), ring.mul(ring.clone_el(a), ring.mul_ref(b, c)));
                    assert_el_eq!(ring, ring.mul(ring.clone_el(a), ring.add_ref(b, c)), ring.add(ring.mul_ref(a, b), ring.mul_ref(a, c)));
                }
            }
        }

        // check integers
        assert_el_eq!(ring, ring.one(), ring.from_int(1));
        assert_el_eq!(ring, ring.neg_one(), ring.from_int(-1));
        assert_el_eq!(ring, ring.from_int(6), ring.mul(ring.from_int(2), ring.from_int(3)));
        assert_el_eq!(ring, ring.from_int(-1), ring.add(ring.from_int(2), ring.from_int(-3)));
    }
}

#[cfg(test)]
use crate::rings::integer::IntegerRing;

#[test]
fn test_internal_wrappings_dont_matter() {
    let ZZ = IntegerRing::RING;
    let boxed = Box::new(ZZ);
    let shared = Arc::new(ZZ);
    let by_ref = RingRef::new(ZZ.get_ring());

    assert_el_eq!(ZZ, 5, boxed.add(2, 3));
    assert_el_eq!(ZZ, 6, shared.mul(2, 3));
    assert_el_eq!(ZZ, -1, by_ref.sub(2, 3));
    assert_el_eq!(&&ZZ, 8, (&&ZZ).pow(2, 3));
}

#[test]
fn test_pow() {
    let ZZ = IntegerRing::RING;
    assert_el_eq!(ZZ, 1, ZZ.pow(7, 0));
    assert_el_eq!(ZZ, 7, ZZ.pow(7, 1));
    assert_el_eq!(ZZ, 1 << 62, ZZ.pow(2, 62));
    assert_el_eq!(ZZ, -27, ZZ.pow(-3, 3));
}

#[test]
fn test_format() {
    let ZZ = IntegerRing::RING;
    assert_eq!("-42", format!("{}", ZZ.format(&-42)));
}
