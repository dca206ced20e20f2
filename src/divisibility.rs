use crate::ring::*;

///
/// Trait for rings that support checking divisibility, i.e.
/// whether for `x, y` there is `k` such that `x = ky`.
///
pub trait DivisibilityRing: RingBase {

    ///
    /// Checks whether there is an element `x` such that `rhs * x = lhs`, and
    /// returns it if it exists. Note that this does not have to be unique, if
    /// rhs is a left zero-divisor. In particular, this function will return any
    /// element in the ring if `lhs = rhs = 0`.
    ///
    fn checked_left_div(&self, lhs: &Self::Element, rhs: &Self::Element) -> Option<Self::Element>;

    fn is_unit(&self, x: &Self::Element) -> bool {
        self.checked_left_div(&self.one(), x).is_some()
    }
}

///
/// Trait for [`RingStore`]s that store [`DivisibilityRing`]s. Mainly used
/// to provide a convenient interface to the [`DivisibilityRing`]-functions.
///
pub trait DivisibilityRingStore: RingStore
    where Self::Type: DivisibilityRing
{
    delegate!{ fn checked_left_div(&self, lhs: &El<Self>, rhs: &El<Self>) -> Option<El<Self>> }
    delegate!{ fn is_unit(&self, x: &El<Self>) -> bool }

    fn checked_div(&self, lhs: &El<Self>, rhs: &El<Self>) -> Option<El<Self>> {
        assert!(self.is_commutative());
        self.checked_left_div(lhs, rhs)
    }

    fn divides(&self, lhs: &El<Self>, rhs: &El<Self>) -> bool {
        self.checked_left_div(rhs, lhs).is_some()
    }
}

impl<R> DivisibilityRingStore for R
    where R: RingStore, R::Type: DivisibilityRing
{}

#[cfg(any(test, feature = "generic_tests"))]
pub mod generic_tests {

    use super::*;

    pub fn test_divisibility_axioms<R: RingStore, I: Iterator<Item = El<R>>>(ring: R, edge_case_elements: I)
        where R::Type: DivisibilityRing
    {
        let elements = edge_case_elements.collect::<Vec<_>>();
        for a in &elements {
            for b in &elements {
                let ab = ring.mul_ref(a, b);
                let quo = ring.checked_left_div(&ab, a);
                assert!(quo.is_some(), "{} divides {}, but division failed", ring.format(a), ring.format(&ab));
                assert_el_eq!(ring, ab, ring.mul_ref(a, quo.as_ref().unwrap()));
            }
        }
        for a in &elements {
            if ring.is_unit(a) {
                let inv = ring.checked_left_div(&ring.one(), a).unwrap();
                assert_el_eq!(ring, ring.one(), ring.mul_ref(a, &inv));
            }
        }
    }
}

#[cfg(test)]
use crate::rings::integer::IntegerRing;

#[test]
fn test_divisibility_axioms() {
    crate::divisibility::generic_tests::test_divisibility_axioms(IntegerRing::RING, (-8..8).map(|x| x as i128));
}
