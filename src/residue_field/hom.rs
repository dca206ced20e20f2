use std::sync::OnceLock;

use crate::homomorphism::Homomorphism;
use crate::ideal::ResidueIdeal;
use crate::ring::*;

use super::{ResidueFieldBase, ResidueFieldStore};
use super::lift::LiftingMap;

///
/// The canonical ring homomorphism `O -> O/P`.
///
/// Its section, a [`LiftingMap`], is created on first use and then reused.
///
pub struct ResidueFieldHom<P: ResidueIdeal, F: ResidueFieldStore<P> + Clone> {
    field: F,
    section: OnceLock<LiftingMap<P, F>>
}

impl<P: ResidueIdeal, F: ResidueFieldStore<P> + Clone> ResidueFieldHom<P, F> {

    pub fn new(field: F) -> Self {
        ResidueFieldHom { field, section: OnceLock::new() }
    }

    ///
    /// Returns a map `O/P -> O` that is a right-inverse of this homomorphism.
    ///
    pub fn section(&self) -> &LiftingMap<P, F> {
        self.section.get_or_init(|| LiftingMap::new(self.field.clone()))
    }
}

impl<P: ResidueIdeal, F: ResidueFieldStore<P> + Clone> Homomorphism<<P::Order as RingStore>::Type, ResidueFieldBase<P>> for ResidueFieldHom<P, F> {

    type DomainStore = P::Order;
    type CodomainStore = F;

    fn domain<'a>(&'a self) -> &'a Self::DomainStore {
        self.field.get_ring().ideal().order()
    }

    fn codomain<'a>(&'a self) -> &'a Self::CodomainStore {
        &self.field
    }

    fn map(&self, x: El<P::Order>) -> El<F> {
        self.field.get_ring().reduce_integral(&x)
    }

    fn map_ref(&self, x: &El<P::Order>) -> El<F> {
        self.field.get_ring().reduce_integral(x)
    }
}

#[cfg(test)]
use crate::rings::finite::FiniteRingStore;
#[cfg(test)]
use crate::rings::extension::number_field::NumberField;
#[cfg(test)]
use crate::ideal::number_field::NumberFieldPrimeIdeal;
#[cfg(test)]
use crate::ideal::integer::IntegerPrimeIdeal;
#[cfg(test)]
use super::*;

#[test]
fn test_homomorphism_axioms() {
    let F = ResidueField::new(IntegerPrimeIdeal::new(7), &ResidueFieldOptions::default()).unwrap();
    crate::homomorphism::generic_tests::test_homomorphism_axioms((&F).ring_hom(), [-15, -1, 0, 1, 6, 7, 8, 50].into_iter());

    let K = NumberField::new(&[-7, 0, 0, 1], "a");
    let O = K.equation_order();
    let P = NumberFieldPrimeIdeal::new(K.clone(), 29, &[24, 16, 1]).unwrap();
    let F = ResidueField::new(P, &ResidueFieldOptions::default()).unwrap();
    let elements = [vec![0, 0, 0], vec![1, 0, 0], vec![0, 1, 0], vec![3, 0, 1], vec![13, 1, 0], vec![-5, 29, 2], vec![24, 16, 1]].into_iter().map(|c| O.from_coordinates(c));
    crate::homomorphism::generic_tests::test_homomorphism_axioms((&F).ring_hom(), elements);
}

#[test]
fn test_section() {
    let K = NumberField::new(&[-7, 0, 0, 1], "a");
    let P = NumberFieldPrimeIdeal::new(K, 29, &[13, 1]).unwrap();
    let F = ResidueField::new(P, &ResidueFieldOptions::default()).unwrap();
    let hom = (&F).ring_hom();
    assert_eq!(Some(29), hom.codomain().size());
    for y in F.elements() {
        assert_el_eq!(F, y, hom.map(hom.section().map(&y)));
    }
    assert!(std::ptr::eq(hom.section(), hom.section()));
}
