use std::marker::PhantomData;

use crate::ideal::ResidueIdeal;
use crate::ring::*;

use super::ResidueFieldStore;

///
/// A section `O/P -> O` of the reduction, i.e. a map that sends each element `y` of the
/// residue field to some `x` in `O` with `x mod P = y`. It is not a ring homomorphism.
///
/// The lift of `y` is computed by converting `y` to coordinates w.r.t. the basis fixed
/// by the ideal, and returning the element of `O` with the smallest nonnegative integer
/// resp. polynomial coordinates.
///
pub struct LiftingMap<P: ResidueIdeal, F: ResidueFieldStore<P> + Clone> {
    field: F,
    ideal: PhantomData<P>
}

impl<P: ResidueIdeal, F: ResidueFieldStore<P> + Clone> LiftingMap<P, F> {

    pub fn new(field: F) -> Self {
        LiftingMap { field, ideal: PhantomData }
    }

    pub fn domain(&self) -> &F {
        &self.field
    }

    pub fn codomain(&self) -> &P::Order {
        self.field.get_ring().ideal().order()
    }

    pub fn map(&self, y: &El<F>) -> El<P::Order> {
        self.field.get_ring().lift(y)
    }

    ///
    /// Computes the lift of `y`, considered as element of `Frac(O)`.
    ///
    pub fn map_into_fraction_field(&self, y: &El<F>) -> El<P::FractionField> {
        self.field.get_ring().ideal().embed(self.map(y))
    }
}

impl<P: ResidueIdeal, F: ResidueFieldStore<P> + Clone> Clone for LiftingMap<P, F> {

    fn clone(&self) -> Self {
        LiftingMap::new(self.field.clone())
    }
}

#[cfg(test)]
use crate::rings::integer::IntegerRing;
#[cfg(test)]
use crate::rings::finite::FiniteRingStore;
#[cfg(test)]
use crate::ideal::integer::IntegerPrimeIdeal;
#[cfg(test)]
use crate::ideal::polynomial::PolyPrimeIdeal;
#[cfg(test)]
use crate::rings::rational_function::RationalFunctionField;
#[cfg(test)]
use crate::rings::zn::PrimeField;
#[cfg(test)]
use crate::rings::poly::*;
#[cfg(test)]
use super::*;

#[test]
fn test_lift_integers() {
    let F = ResidueField::new(IntegerPrimeIdeal::new(17), &ResidueFieldOptions::default()).unwrap();
    let lift = (&F).lift_map();
    let ZZ = IntegerRing::RING;
    assert_el_eq!(ZZ, 4, lift.map(&F.from_int(21)));
    assert_el_eq!(ZZ, 16, lift.map(&F.neg_one()));
    assert_el_eq!(ZZ, 0, lift.map(&F.zero()));
    assert!(lift.codomain().is_one(&lift.map(&F.one())));
    assert_eq!(17, lift.domain().elements().map(|y| lift.map(&y)).collect::<std::collections::HashSet<_>>().len());
}

#[test]
fn test_lift_polynomials() {
    let K = RationalFunctionField::new(PrimeField::new(3), "t");
    let P = K.poly_ring();
    // t^2 + 1 is irreducible over F3
    let g = P.add(P.pow(P.indeterminate(), 2), P.one());
    let F = ResidueField::new(PolyPrimeIdeal::new(K.clone(), &g).unwrap(), &ResidueFieldOptions::default()).unwrap();
    let lift = (&F).lift_map();
    let hom = (&F).ring_hom();
    for y in F.elements() {
        let x = lift.map(&y);
        assert!(P.degree(&x).unwrap_or(0) < 2);
        assert_el_eq!(F, y, crate::homomorphism::Homomorphism::map(&hom, x));
    }
    assert_el_eq!(P, P.indeterminate(), lift.map(&F.gen()));
}
