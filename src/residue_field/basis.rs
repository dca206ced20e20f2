use tracing::{event, instrument, Level};

use crate::algorithms::linsolve::gauss;
use crate::ideal::ResidueIdeal;
use crate::matrix::OwnedMatrix;
use crate::ring::*;
use crate::rings::zn::*;

///
/// The linear algebra relating the quotient `O/P ~ Fp^n` (w.r.t. the basis fixed by the
/// ideal) to the power basis `1, x, ..., x^(n - 1)` of a generator `x` of `O/P`.
///
pub struct BasisData<P: ResidueIdeal> {
    generator: El<P::Order>,
    minimal_polynomial: Vec<PrimeFieldEl>,
    /// the `i`-th row is `to_vs(x^i)`
    basis_matrix: OwnedMatrix<PrimeFieldEl>,
    basis_matrix_inv: OwnedMatrix<PrimeFieldEl>
}

impl<P: ResidueIdeal> BasisData<P> {

    ///
    /// The element `x` of `O` whose image generates `O/P`.
    ///
    pub fn generator(&self) -> &El<P::Order> {
        &self.generator
    }

    ///
    /// The monic minimal polynomial of `x mod P` over `Fp`, with coefficients
    /// starting with the constant one.
    ///
    pub fn minimal_polynomial(&self) -> &[PrimeFieldEl] {
        &self.minimal_polynomial
    }

    ///
    /// The matrix `PB` whose `i`-th row is the coordinate vector of `x^i mod P`.
    /// Multiplying a coefficient vector w.r.t. the power basis by `PB` gives the
    /// coordinate vector w.r.t. the basis fixed by the ideal.
    ///
    pub fn basis_matrix(&self) -> &OwnedMatrix<PrimeFieldEl> {
        &self.basis_matrix
    }

    ///
    /// The inverse of [`BasisData::basis_matrix()`].
    ///
    pub fn basis_matrix_inv(&self) -> &OwnedMatrix<PrimeFieldEl> {
        &self.basis_matrix_inv
    }

    pub(crate) fn clone_in(&self, ideal: &P) -> Self {
        BasisData {
            generator: ideal.order().clone_el(&self.generator),
            minimal_polynomial: self.minimal_polynomial.clone(),
            basis_matrix: self.basis_matrix.clone(),
            basis_matrix_inv: self.basis_matrix_inv.clone()
        }
    }
}

///
/// Tries to use `x` as generator of `O/P`, which works if and only if `1, x, ..., x^(n - 1)`
/// are linearly independent modulo `P`.
///
#[stability::unstable(feature = "enable")]
pub fn try_generator<P: ResidueIdeal>(ideal: &P, x: El<P::Order>) -> Option<BasisData<P>> {
    let n = ideal.residue_class_degree();
    let Fp = ideal.prime_field();
    let O = ideal.order();

    let mut rows = Vec::with_capacity(n);
    let mut current = O.one();
    for _ in 0..n {
        rows.push(ideal.to_vs(&current));
        // keep the representatives small
        current = ideal.to_order(&ideal.to_vs(&O.mul_ref(&current, &x)));
    }
    let last_row = ideal.to_vs(&current);
    let basis_matrix = OwnedMatrix::from_rows(rows, n);
    let basis_matrix_inv = gauss::invert(&basis_matrix, &Fp)?;

    // x^n = sum_i c_i x^i
    let coefficients = gauss::vec_mul(&last_row, &basis_matrix_inv, &Fp);
    let minimal_polynomial = coefficients.into_iter().map(|c| Fp.negate(c)).chain([Fp.one()]).collect();
    return Some(BasisData { generator: x, minimal_polynomial, basis_matrix, basis_matrix_inv });
}

///
/// Iterates over all nonzero vectors in `Fp^n`.
///
fn nonzero_vectors(Fp: PrimeField, n: usize) -> impl Iterator<Item = Vec<PrimeFieldEl>> {
    let p = Fp.modulus();
    let mut digits = vec![0u64; n];
    std::iter::from_fn(move || {
        for i in 0..digits.len() {
            digits[i] += 1;
            if digits[i] < p {
                return Some(digits.iter().map(|d| Fp.get_ring().from_u128(*d as u128)).collect());
            }
            digits[i] = 0;
        }
        return None;
    })
}

///
/// Finds an element `x` of `O` whose image generates `O/P` over `Fp`, and computes its
/// minimal polynomial together with the basis change matrices.
///
/// The distinguished generator of `O` is tried first (or `1` plus it, if it lies in `P`),
/// and then the lifts of all nonzero elements of `O/P`. Since `O/P` is finite, one of them
/// is a primitive element, so the search only fails if `P` is not prime.
///
#[stability::unstable(feature = "enable")]
#[instrument(skip_all, level = "trace")]
pub fn find_field_generator<P: ResidueIdeal>(ideal: &P) -> BasisData<P> {
    let n = ideal.residue_class_degree();
    let Fp = ideal.prime_field();
    let O = ideal.order();

    let mut preferred = ideal.generator();
    if ideal.to_vs(&preferred).iter().all(|c| Fp.is_zero(c)) {
        preferred = O.add(O.one(), preferred);
    }
    let candidates = std::iter::once(preferred).chain(nonzero_vectors(Fp, n).map(|v| ideal.to_order(&v)));
    for (index, candidate) in candidates.enumerate() {
        if let Some(result) = try_generator(ideal, candidate) {
            return result;
        }
        event!(Level::DEBUG, candidate = index, "rejected candidate generator, its powers are linearly dependent");
    }
    panic!("found no generator of the residue field of {}", ideal);
}

#[cfg(test)]
use crate::rings::poly::*;
#[cfg(test)]
use crate::rings::rational_function::RationalFunctionField;
#[cfg(test)]
use crate::rings::extension::number_field::NumberField;
#[cfg(test)]
use crate::ideal::polynomial::PolyPrimeIdeal;
#[cfg(test)]
use crate::ideal::number_field::NumberFieldPrimeIdeal;

#[test]
fn test_power_basis_of_equation_order() {
    crate::tracing::LogAlgorithmSubscriber::init_test();
    let K = NumberField::new(&[-7, 0, 0, 1], "a");
    let P = NumberFieldPrimeIdeal::new(K.clone(), 29, &[24, 16, 1]).unwrap();
    let Fp = P.prime_field();
    let data = find_field_generator(&P);
    assert_el_eq!(P.order(), P.order().generator(), data.generator());
    assert_eq!(vec![Fp.from_int(24), Fp.from_int(16), Fp.one()], data.minimal_polynomial());
    for i in 0..2 {
        for j in 0..2 {
            assert_el_eq!(Fp, if i == j { Fp.one() } else { Fp.zero() }, data.basis_matrix().at(i, j));
            assert_el_eq!(Fp, if i == j { Fp.one() } else { Fp.zero() }, data.basis_matrix_inv().at(i, j));
        }
    }
    assert_eq!(2, gauss::rank(data.basis_matrix(), &Fp));

    // the generator is -13 modulo (29, a + 13)
    let P1 = NumberFieldPrimeIdeal::new(K, 29, &[13, 1]).unwrap();
    let data = find_field_generator(&P1);
    assert_eq!(vec![Fp.from_int(13), Fp.one()], data.minimal_polynomial());
}

#[test]
fn test_dependent_powers_are_rejected() {
    let K = NumberField::new(&[-7, 0, 0, 1], "a");
    let P = NumberFieldPrimeIdeal::new(K, 29, &[24, 16, 1]).unwrap();
    let O = P.order();
    assert!(try_generator(&P, O.one()).is_none());
    assert!(try_generator(&P, O.from_int(5)).is_none());
    assert!(try_generator(&P, O.add(O.generator(), O.one())).is_some());
}

#[test]
fn test_generator_in_ideal() {
    let K = RationalFunctionField::new(PrimeField::new(5), "t");
    let Fp = *K.poly_ring().base_ring();
    let P = PolyPrimeIdeal::new(K.clone(), &K.poly_ring().indeterminate()).unwrap();
    // t lies in (t), so 1 + t is used instead
    let data = find_field_generator(&P);
    assert_el_eq!(K.poly_ring(), K.poly_ring().add(K.poly_ring().indeterminate(), K.poly_ring().one()), data.generator());
    assert_eq!(vec![Fp.neg_one(), Fp.one()], data.minimal_polynomial());
    assert_el_eq!(Fp, Fp.one(), data.basis_matrix().at(0, 0));
}

#[test]
fn test_nonzero_vectors() {
    let Fp = PrimeField::new(3);
    let vectors = nonzero_vectors(Fp, 2).collect::<Vec<_>>();
    assert_eq!(8, vectors.len());
    assert!(vectors.iter().all(|v| v.iter().any(|c| !Fp.is_zero(c))));
    assert_eq!(vec![Fp.one(), Fp.zero()], vectors[0]);
    assert_eq!(vec![Fp.from_int(2), Fp.from_int(2)], vectors[7]);
}
