use crate::ring::*;

///
/// Contains [`number_field::NumberField`] and its equation order [`number_field::EquationOrder`].
///
pub mod number_field;

///
/// Computes the product of two elements of `R[X]/(f)`, given by their coefficients
/// w.r.t. the power basis `1, X, ..., X^(n - 1)`. Here `f` is monic of degree `n`, and
/// `modulus` contains the non-leading coefficients of `f`, starting with the constant one.
///
pub fn mul_mod_monic<R>(lhs: &[El<R>], rhs: &[El<R>], modulus: &[El<R>], ring: R) -> Vec<El<R>>
    where R: RingStore
{
    let n = modulus.len();
    assert_eq!(n, lhs.len());
    assert_eq!(n, rhs.len());
    let mut product = (0..(2 * n - 1)).map(|_| ring.zero()).collect::<Vec<_>>();
    for i in 0..n {
        for j in 0..n {
            ring.add_assign(&mut product[i + j], ring.mul_ref(&lhs[i], &rhs[j]));
        }
    }
    for k in (n..(2 * n - 1)).rev() {
        let c = std::mem::replace(&mut product[k], ring.zero());
        if ring.is_zero(&c) {
            continue;
        }
        for j in 0..n {
            ring.sub_assign(&mut product[k - n + j], ring.mul_ref(&c, &modulus[j]));
        }
    }
    product.truncate(n);
    return product;
}

#[cfg(test)]
use crate::rings::integer::IntegerRing;

#[test]
fn test_mul_mod_monic() {
    let ZZ = IntegerRing::RING;
    // in Z[X]/(X^3 - 7), we have (X^2 + 1) (X + 2) = X^3 + 2X^2 + X + 2 = 2X^2 + X + 9
    let modulus = [-7, 0, 0];
    assert_eq!(vec![9, 1, 2], mul_mod_monic(&[1, 0, 1], &[2, 1, 0], &modulus, ZZ));
    assert_eq!(vec![0, 7, 0], mul_mod_monic(&[0, 0, 1], &[0, 0, 1], &modulus, ZZ));
}
