use crate::divisibility::*;
use crate::ring::*;

///
/// Trait for rings that are fields, i.e. where every nonzero element has an inverse.
///
pub trait Field: DivisibilityRing {

    fn div(&self, lhs: &Self::Element, rhs: &Self::Element) -> Self::Element {
        assert!(!self.is_zero(rhs), "division by zero");
        return self.checked_left_div(lhs, rhs).unwrap();
    }
}

///
/// [`RingStore`] for [`Field`]s.
///
pub trait FieldStore: RingStore + DivisibilityRingStore
    where Self::Type: Field
{
    delegate!{ fn div(&self, lhs: &El<Self>, rhs: &El<Self>) -> El<Self> }

    fn invert(&self, x: &El<Self>) -> El<Self> {
        self.div(&self.one(), x)
    }
}

impl<R> FieldStore for R
    where R: RingStore, R::Type: Field
{}

#[cfg(any(test, feature = "generic_tests"))]
pub mod generic_tests {

    use super::*;

    pub fn test_field_axioms<R: RingStore, I: Iterator<Item = El<R>>>(ring: R, edge_case_elements: I)
        where R::Type: Field
    {
        assert!(ring.is_commutative());
        let elements = edge_case_elements.collect::<Vec<_>>();
        for a in &elements {
            if !ring.is_zero(a) {
                assert!(ring.is_unit(a));
                assert_el_eq!(ring, ring.one(), ring.mul_ref(a, &ring.invert(a)));
                for b in &elements {
                    assert_el_eq!(ring, b, ring.mul(ring.div(b, a), ring.clone_el(a)));
                }
            } else {
                assert!(!ring.is_unit(a));
            }
        }
        crate::divisibility::generic_tests::test_divisibility_axioms(&ring, elements.into_iter());
    }
}

#[cfg(test)]
use crate::rings::rational::RationalField;

#[test]
fn test_field_axioms() {
    let QQ = RationalField::RING;
    let elements = (-3..4).flat_map(|num| (1..4).map(move |den| QQ.from_fraction(num, den)));
    generic_tests::test_field_axioms(QQ, elements);
}
