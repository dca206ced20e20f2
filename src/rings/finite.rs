use crate::ring::*;

///
/// Trait for rings that are finite.
///
pub trait FiniteRing: RingBase {

    ///
    /// Returns a uniformly random element from this ring, using the randomness
    /// provided by `rng`.
    ///
    fn random_element<G: FnMut() -> u64>(&self, rng: G) -> Self::Element;

    ///
    /// Returns the number of elements in this ring, if it fits within a `u128`.
    ///
    fn size(&self) -> Option<u128>;

    ///
    /// Returns an iterator over all elements of this ring, each exactly once.
    ///
    fn elements<'a>(&'a self) -> Box<dyn 'a + Iterator<Item = Self::Element>>;
}

///
/// [`RingStore`] for [`FiniteRing`]
///
pub trait FiniteRingStore: RingStore
    where Self::Type: FiniteRing
{
    ///
    /// See [`FiniteRing::random_element()`].
    ///
    fn random_element<G: FnMut() -> u64>(&self, rng: G) -> El<Self> {
        self.get_ring().random_element(rng)
    }

    ///
    /// See [`FiniteRing::size()`].
    ///
    fn size(&self) -> Option<u128> {
        self.get_ring().size()
    }

    ///
    /// See [`FiniteRing::elements()`].
    ///
    fn elements<'a>(&'a self) -> Box<dyn 'a + Iterator<Item = El<Self>>> {
        self.get_ring().elements()
    }
}

impl<R: RingStore> FiniteRingStore for R
    where R::Type: FiniteRing
{}

#[cfg(any(test, feature = "generic_tests"))]
pub mod generic_tests {

    use super::{FiniteRing, FiniteRingStore, RingStore};

    ///
    /// Checks that [`FiniteRing::elements()`] enumerates exactly [`FiniteRing::size()`]
    /// pairwise distinct elements, and that random elements are among them.
    ///
    pub fn test_finite_ring_axioms<R>(ring: &R)
        where R: RingStore,
            R::Type: FiniteRing
    {
        let size = ring.size().unwrap();
        assert!(size <= 10000, "ring too large for exhaustive testing");
        let elements = ring.elements().collect::<Vec<_>>();
        assert_eq!(size, elements.len() as u128);
        for i in 0..elements.len() {
            for j in (i + 1)..elements.len() {
                assert!(!ring.eq_el(&elements[i], &elements[j]), "{} occurs twice", ring.format(&elements[i]));
            }
        }
        let mut rng = oorandom::Rand64::new(1);
        for _ in 0..10 {
            let x = ring.random_element(|| rng.rand_u64());
            assert!(elements.iter().any(|y| ring.eq_el(&x, y)));
        }
    }
}
