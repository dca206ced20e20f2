use std::sync::OnceLock;

use serde::{Serialize, Serializer};

use crate::error::ReductionError;
use crate::ideal::ResidueIdeal;
use crate::ring::*;

use super::ResidueFieldStore;
use super::lift::LiftingMap;

///
/// The reduction map `Frac(O) -> O/P`. It is only defined on elements of nonnegative
/// valuation at `P`, thus [`ReductionMap::map()`] fails with [`ReductionError::NegativeValuation`]
/// for all other elements.
///
/// If the denominator of `x` is not in `P`, the reduction of `x` is computed directly.
/// Otherwise, both numerator and denominator are divided by the largest power of a uniformizer
/// at `P`, which yields two `P`-units that can be reduced.
///
/// # Example
/// ```rust
/// # use residue_fields::assert_el_eq;
/// # use residue_fields::ring::*;
/// # use residue_fields::field::*;
/// # use residue_fields::rings::extension::number_field::*;
/// # use residue_fields::ideal::number_field::*;
/// # use residue_fields::residue_field::*;
/// let K = NumberField::new(&[-7, 0, 0, 1], "a");
/// let P = NumberFieldPrimeIdeal::new(K.clone(), 29, &[24, 16, 1]).unwrap();
/// let F = ResidueField::new(P, &ResidueFieldOptions::default()).unwrap();
/// let reduction = (&F).reduction_map();
/// assert_el_eq!(F, F.gen(), reduction.map(&K.generator()).unwrap());
/// assert!(reduction.map(&K.invert(&K.from_int(29))).is_err());
/// ```
///
pub struct ReductionMap<P: ResidueIdeal, F: ResidueFieldStore<P> + Clone> {
    field: F,
    section: OnceLock<LiftingMap<P, F>>
}

impl<P: ResidueIdeal, F: ResidueFieldStore<P> + Clone> ReductionMap<P, F> {

    pub fn new(field: F) -> Self {
        ReductionMap { field, section: OnceLock::new() }
    }

    pub fn domain(&self) -> &P::FractionField {
        self.field.get_ring().ideal().fraction_field()
    }

    pub fn codomain(&self) -> &F {
        &self.field
    }

    pub fn map(&self, x: &El<P::FractionField>) -> Result<El<F>, ReductionError> {
        self.field.get_ring().reduce(x)
    }

    ///
    /// Returns a map `O/P -> O` whose composition with this map (after embedding `O` into
    /// its fraction field) is the identity.
    ///
    pub fn section(&self) -> &LiftingMap<P, F> {
        self.section.get_or_init(|| LiftingMap::new(self.field.clone()))
    }
}

impl<P: ResidueIdeal, F: ResidueFieldStore<P> + Clone> Clone for ReductionMap<P, F> {

    fn clone(&self) -> Self {
        ReductionMap::new(self.field.clone())
    }
}

///
/// A reduction map is determined by its residue field, so it is serialized as the
/// construction arguments of the field.
///
impl<P: ResidueIdeal, F: ResidueFieldStore<P> + Clone> Serialize for ReductionMap<P, F> {

    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        Serialize::serialize(self.field.get_ring(), serializer)
    }
}

#[cfg(test)]
use crate::field::FieldStore;
#[cfg(test)]
use crate::rings::finite::FiniteRingStore;
#[cfg(test)]
use crate::rings::extension::number_field::NumberField;
#[cfg(test)]
use crate::ideal::number_field::NumberFieldPrimeIdeal;
#[cfg(test)]
use super::*;

#[test]
fn test_ramified_reduction() {
    crate::tracing::LogAlgorithmSubscriber::init_test();
    // 7 = a^3 is totally ramified in Q(a) with a^3 = 7
    let K = NumberField::new(&[-7, 0, 0, 1], "a");
    let O = K.equation_order();
    let P = NumberFieldPrimeIdeal::principal(&K, &K.generator()).unwrap();
    assert_eq!(3, P.ramification_index());
    let F = ResidueField::new(P, &ResidueFieldOptions::default()).unwrap();
    assert_eq!(Some(7), F.size());
    let reduction = (&F).reduction_map();
    let a = K.generator();
    let seven = K.from_int(7);

    assert_el_eq!(F, F.zero(), reduction.map(&a).unwrap());
    // a^3 / 7 = 1
    assert_el_eq!(F, F.one(), reduction.map(&K.div(&K.pow(K.clone_el(&a), 3), &seven)).unwrap());
    // (a^2 + 7) / a^2 = 1 + 7/a^2 = 1 + a
    assert_el_eq!(F, F.one(), reduction.map(&K.div(&K.add(K.pow(K.clone_el(&a), 2), K.clone_el(&seven)), &K.pow(K.clone_el(&a), 2))).unwrap());
    // 2 a^4 / (3 * 7) = 2a / 3
    assert_el_eq!(F, F.zero(), reduction.map(&K.div(&K.mul(K.from_int(2), K.pow(K.clone_el(&a), 4)), &K.from_int(21))).unwrap());
    // 2 a^3 / (3 * 7) = 2 / 3
    assert_el_eq!(F, F.div(&F.from_int(2), &F.from_int(3)), reduction.map(&K.div(&K.mul(K.from_int(2), K.pow(K.clone_el(&a), 3)), &K.from_int(21))).unwrap());
    assert!(reduction.map(&K.div(&K.pow(K.clone_el(&a), 2), &seven)).is_err());
    assert!(reduction.map(&K.invert(&a)).is_err());

    for y in F.elements() {
        assert_el_eq!(F, y, reduction.map(&K.embed(reduction.section().map(&y))).unwrap());
    }
    assert_el_eq!(O, O.zero(), reduction.section().map(&F.zero()));
}

#[test]
fn test_reduction_map_serialization() {
    let K = NumberField::new(&[-7, 0, 0, 1], "a");
    let P = NumberFieldPrimeIdeal::new(K, 29, &[13, 1]).unwrap();
    let F = ResidueField::new(P, &ResidueFieldOptions::default().with_name("w")).unwrap();
    let reduction = (&F).reduction_map();
    assert_eq!(
        r#"{"ideal":{"defining_polynomial":[-7,0,0,1],"variable_name":"a","characteristic":29,"factor":[13,1]},"name":"w","implementation":"modn"}"#,
        serde_json::to_string(&reduction).unwrap()
    );
    assert_eq!(serde_json::to_string(&reduction).unwrap(), serde_json::to_string(&reduction.clone()).unwrap());
}
