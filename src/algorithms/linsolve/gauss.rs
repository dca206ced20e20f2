use crate::field::{Field, FieldStore};
use crate::matrix::OwnedMatrix;
use crate::ring::*;

///
/// Transforms `A` into reduced row echelon form, using row operations only.
/// Returns the list of pivot columns, whose length is the rank of `A`.
///
/// # Example
/// ```rust
/// # use residue_fields::ring::*;
/// # use residue_fields::rings::zn::*;
/// # use residue_fields::matrix::*;
/// # use residue_fields::algorithms::linsolve::gauss::*;
/// let Fp = PrimeField::new(5);
/// let mut A = OwnedMatrix::from_fn(2, 3, |i, j| Fp.from_int((i + j) as i32));
/// assert_eq!(vec![0, 1], reduced_row_echelon_form(&mut A, &Fp));
/// ```
///
pub fn reduced_row_echelon_form<R>(A: &mut OwnedMatrix<El<R>>, ring: R) -> Vec<usize>
    where R: RingStore,
        R::Type: Field
{
    let n = A.row_count();
    let m = A.col_count();
    let mut pivots = Vec::new();
    let mut row = 0;
    for col in 0..m {
        if row >= n {
            break;
        }
        let Some(pivot_row) = (row..n).find(|i| !ring.is_zero(A.at(*i, col))) else {
            continue;
        };
        A.swap_rows(row, pivot_row);
        let inv = ring.invert(A.at(row, col));
        for l in 0..m {
            ring.mul_assign_ref(A.at_mut(row, l), &inv);
        }
        for k in 0..n {
            if k != row && !ring.is_zero(A.at(k, col)) {
                let factor = ring.clone_el(A.at(k, col));
                for l in 0..m {
                    let delta = ring.mul_ref(&factor, A.at(row, l));
                    ring.sub_assign(A.at_mut(k, l), delta);
                }
            }
        }
        pivots.push(col);
        row += 1;
    }
    return pivots;
}

///
/// Computes the rank of `A` over the given field.
///
pub fn rank<R>(A: &OwnedMatrix<El<R>>, ring: R) -> usize
    where R: RingStore,
        R::Type: Field
{
    let mut copy = A.clone_matrix(&ring);
    reduced_row_echelon_form(&mut copy, &ring).len()
}

///
/// Computes the inverse of the square matrix `A`, or returns `None` if it is singular.
///
pub fn invert<R>(A: &OwnedMatrix<El<R>>, ring: R) -> Option<OwnedMatrix<El<R>>>
    where R: RingStore,
        R::Type: Field
{
    let n = A.row_count();
    assert_eq!(n, A.col_count());
    let mut augmented = OwnedMatrix::from_fn(n, 2 * n, |i, j| if j < n {
        ring.clone_el(A.at(i, j))
    } else if j - n == i {
        ring.one()
    } else {
        ring.zero()
    });
    let pivots = reduced_row_echelon_form(&mut augmented, &ring);
    if pivots.len() < n || pivots[n - 1] >= n {
        return None;
    }
    return Some(OwnedMatrix::from_fn(n, n, |i, j| ring.clone_el(augmented.at(i, j + n))));
}

///
/// Computes the determinant of the square matrix `A`.
///
pub fn determinant<R>(A: &OwnedMatrix<El<R>>, ring: R) -> El<R>
    where R: RingStore,
        R::Type: Field
{
    let n = A.row_count();
    assert_eq!(n, A.col_count());
    let mut A = A.clone_matrix(&ring);
    let mut result = ring.one();
    for i in 0..n {
        let Some(pivot_row) = (i..n).find(|k| !ring.is_zero(A.at(*k, i))) else {
            return ring.zero();
        };
        if pivot_row != i {
            A.swap_rows(i, pivot_row);
            ring.negate_inplace(&mut result);
        }
        ring.mul_assign_ref(&mut result, A.at(i, i));
        let inv = ring.invert(A.at(i, i));
        for k in (i + 1)..n {
            let factor = ring.mul_ref(A.at(k, i), &inv);
            for l in i..n {
                let delta = ring.mul_ref(&factor, A.at(i, l));
                ring.sub_assign(A.at_mut(k, l), delta);
            }
        }
    }
    return result;
}

///
/// Computes the product `v * A` of the row vector `v` with the matrix `A`.
///
pub fn vec_mul<R>(v: &[El<R>], A: &OwnedMatrix<El<R>>, ring: R) -> Vec<El<R>>
    where R: RingStore
{
    assert_eq!(v.len(), A.row_count());
    (0..A.col_count()).map(|j| ring.sum(v.iter().enumerate().map(|(i, x)| ring.mul_ref(x, A.at(i, j))))).collect()
}

#[cfg(test)]
use crate::rings::zn::PrimeField;
#[cfg(test)]
use crate::rings::rational::RationalField;

#[test]
fn test_reduced_row_echelon_form() {
    let Fp = PrimeField::new(7);
    let mut A = OwnedMatrix::from_rows([
        vec![Fp.from_int(0), Fp.from_int(2), Fp.from_int(4)],
        vec![Fp.from_int(0), Fp.from_int(1), Fp.from_int(2)],
        vec![Fp.from_int(3), Fp.from_int(0), Fp.from_int(1)]
    ], 3);
    let pivots = reduced_row_echelon_form(&mut A, &Fp);
    assert_eq!(vec![0, 1], pivots);
    assert_el_eq!(Fp, Fp.one(), A.at(0, 0));
    assert_el_eq!(Fp, Fp.zero(), A.at(0, 1));
    assert_el_eq!(Fp, Fp.from_int(5), A.at(0, 2));
    assert_el_eq!(Fp, Fp.from_int(2), A.at(1, 2));
    for j in 0..3 {
        assert_el_eq!(Fp, Fp.zero(), A.at(2, j));
    }
}

#[test]
fn test_invert() {
    let Fp = PrimeField::new(5);
    let A = OwnedMatrix::from_fn(3, 3, |i, j| Fp.from_int((i * i + 2 * j + (if i == j { 3 } else { 0 }) + 1) as i32));
    let A_inv = invert(&A, &Fp).unwrap();
    for i in 0..3 {
        let row = vec_mul(A.row(i), &A_inv, &Fp);
        for j in 0..3 {
            assert_el_eq!(Fp, if i == j { Fp.one() } else { Fp.zero() }, row[j]);
        }
    }
    let singular = OwnedMatrix::from_fn(2, 2, |_, j| Fp.from_int(j as i32 + 1));
    assert!(invert(&singular, &Fp).is_none());
    assert_eq!(1, rank(&singular, &Fp));
}

#[test]
fn test_determinant() {
    let QQ = RationalField::RING;
    let A = OwnedMatrix::from_rows([
        vec![QQ.from_int(0), QQ.from_int(1), QQ.from_int(2)],
        vec![QQ.from_int(3), QQ.from_int(4), QQ.from_int(5)],
        vec![QQ.from_int(6), QQ.from_int(7), QQ.from_fraction(17, 2)]
    ], 3);
    // expansion along the first row: -1 * (3 * 17/2 - 30) + 2 * (21 - 24) = 4.5 - 6
    assert_el_eq!(QQ, QQ.from_fraction(-3, 2), determinant(&A, &QQ));
    let B = OwnedMatrix::from_fn(3, 3, |i, j| QQ.from_int((3 * i + j) as i32));
    assert_el_eq!(QQ, QQ.zero(), determinant(&B, &QQ));
}
