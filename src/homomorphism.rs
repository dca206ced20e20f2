use crate::ring::*;

///
/// The user-facing trait for ring homomorphisms, i.e. maps `R -> S`
/// between rings that respect the ring structure. Since all considered
/// rings are unital, ring homomorphisms also must be unital.
///
/// Objects are expected to know their domain and codomain rings and
/// can thus make sense without an implicit ambient ring (unlike e.g.
/// ring elements).
///
/// Maps that are only partially defined, like the reduction of a number
/// field into a residue field, are not [`Homomorphism`]s, but provide
/// a fallible `map()` returning a [`Result`] instead.
///
pub trait Homomorphism<Domain: ?Sized, Codomain: ?Sized>
    where Domain: RingBase, Codomain: RingBase
{
    ///
    /// The type of the [`RingStore`] used by this object to store the domain ring.
    ///
    type DomainStore: RingStore<Type = Domain>;
    ///
    /// The type of the [`RingStore`] used by this object to store the codomain ring.
    ///
    type CodomainStore: RingStore<Type = Codomain>;

    ///
    /// Returns a reference to the domain ring.
    ///
    fn domain<'a>(&'a self) -> &'a Self::DomainStore;

    ///
    /// Returns a reference to the codomain ring.
    ///
    fn codomain<'a>(&'a self) -> &'a Self::CodomainStore;

    ///
    /// Applies this homomorphism to the given element from the domain ring,
    /// resulting in an element in the codomain ring.
    ///
    fn map(&self, x: Domain::Element) -> Codomain::Element;

    ///
    /// Applies this homomorphism to the given element from the domain ring,
    /// resulting in an element in the codomain ring.
    ///
    fn map_ref(&self, x: &Domain::Element) -> Codomain::Element {
        self.map(self.domain().clone_el(x))
    }

    ///
    /// Multiplies the given element in the codomain ring with an element obtained
    /// by applying this homomorphism to a given element from the domain ring.
    ///
    fn mul_assign_map(&self, lhs: &mut Codomain::Element, rhs: Domain::Element) {
        self.codomain().mul_assign(lhs, self.map(rhs))
    }

    fn mul_map(&self, mut lhs: Codomain::Element, rhs: Domain::Element) -> Codomain::Element {
        self.mul_assign_map(&mut lhs, rhs);
        return lhs;
    }
}

impl<'a, S, R, H> Homomorphism<S, R> for &'a H
    where S: ?Sized + RingBase, R: ?Sized + RingBase, H: Homomorphism<S, R>
{
    type CodomainStore = H::CodomainStore;
    type DomainStore = H::DomainStore;

    fn codomain<'b>(&'b self) -> &'b Self::CodomainStore {
        (*self).codomain()
    }

    fn domain<'b>(&'b self) -> &'b Self::DomainStore {
        (*self).domain()
    }

    fn map(&self, x: <S as RingBase>::Element) -> <R as RingBase>::Element {
        (*self).map(x)
    }

    fn map_ref(&self, x: &<S as RingBase>::Element) -> <R as RingBase>::Element {
        (*self).map_ref(x)
    }

    fn mul_assign_map(&self, lhs: &mut <R as RingBase>::Element, rhs: <S as RingBase>::Element) {
        (*self).mul_assign_map(lhs, rhs)
    }
}

#[cfg(any(test, feature = "generic_tests"))]
pub mod generic_tests {

    use super::*;

    ///
    /// Checks that the given map respects addition, multiplication and the
    /// identity elements on all pairs of the given elements.
    ///
    pub fn test_homomorphism_axioms<R: ?Sized + RingBase, S: ?Sized + RingBase, H, I: Iterator<Item = R::Element>>(hom: H, edge_case_elements: I)
        where H: Homomorphism<R, S>
    {
        let from = hom.domain();
        let to = hom.codomain();
        let elements = edge_case_elements.collect::<Vec<_>>();

        assert!(to.is_zero(&hom.map(from.zero())));
        assert!(to.is_one(&hom.map(from.one())));

        for a in &elements {
            for b in &elements {
                assert_el_eq!(to, to.add(hom.map_ref(a), hom.map_ref(b)), hom.map(from.add_ref(a, b)));
                assert_el_eq!(to, to.mul(hom.map_ref(a), hom.map_ref(b)), hom.map(from.mul_ref(a, b)));
                assert_el_eq!(to, hom.mul_map(hom.map_ref(a), from.clone_el(b)), hom.map(from.mul_ref(a, b)));
            }
        }
    }
}
