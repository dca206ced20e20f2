use tracing::{event, instrument, Level};

use crate::algorithms;
use crate::field::Field;
use crate::ring::*;
use crate::rings::finite::{FiniteRing, FiniteRingStore};
use crate::rings::poly::{PolyRing, PolyRingStore};

fn pow_mod_f<P>(poly_ring: P, g: El<P>, f: &El<P>, power: u128) -> El<P>
    where P: PolyRingStore,
        P::Type: PolyRing
{
    return algorithms::sqr_mul::generic_abs_square_and_multiply(
        g,
        power,
        |a| poly_ring.div_rem_monic(poly_ring.mul_ref(&a, &a), f).1,
        |a, b| poly_ring.div_rem_monic(poly_ring.mul_ref_fst(a, b), f).1,
        poly_ring.one()
    );
}

fn field_size<P>(poly_ring: P) -> u128
    where P: PolyRingStore,
        P::Type: PolyRing,
        <<P::Type as PolyRing>::BaseRing as RingStore>::Type: FiniteRing + Field
{
    let q = poly_ring.base_ring().size().unwrap();
    debug_assert!(algorithms::miller_rabin::is_prime(q, 10), "only polynomials over prime fields are supported");
    return q;
}

///
/// Returns a squarefree polynomial that divides `poly` and has the same irreducible
/// factors as `poly`, except possibly those that occur with a multiplicity divisible
/// by the characteristic. In particular, the result is never a unit, unless `poly` is.
///
pub fn poly_squarefree_part<P>(poly_ring: P, poly: El<P>) -> El<P>
    where P: PolyRingStore,
        P::Type: PolyRing,
        <<P::Type as PolyRing>::BaseRing as RingStore>::Type: FiniteRing + Field
{
    assert!(!poly_ring.is_zero(&poly));
    let derivate = poly_ring.derivative(&poly);
    if poly_ring.degree(&poly) == Some(0) {
        return poly_ring.one();
    } else if poly_ring.is_zero(&derivate) {
        // poly is a polynomial in X^p, and since the p-th power map is the identity
        // on Fp, it is the p-th power of the following polynomial
        let p = field_size(&poly_ring) as usize;
        let d = poly_ring.degree(&poly).unwrap();
        let base_poly = poly_ring.from_terms((0..=d).step_by(p).map(|i| (poly_ring.base_ring().clone_el(poly_ring.coefficient_at(&poly, i)), i / p)));
        return poly_squarefree_part(poly_ring, base_poly);
    } else {
        let square_part = poly_ring.ideal_gen(&poly, &derivate);
        return poly_ring.normalize(poly_ring.div_rem(poly, &square_part).0);
    }
}

///
/// Computes the distinct-degree factorization of the squarefree polynomial `f`, i.e.
/// the list whose `d`-th entry is the product of all monic irreducible factors of `f`
/// of degree `d`. The `0`-th entry is the leading coefficient of `f`.
///
#[instrument(skip_all, level = "trace")]
pub fn distinct_degree_factorization<P>(poly_ring: P, f: El<P>) -> Vec<El<P>>
    where P: PolyRingStore,
        P::Type: PolyRing,
        <<P::Type as PolyRing>::BaseRing as RingStore>::Type: FiniteRing + Field
{
    assert!(!poly_ring.is_zero(&f));
    let q = field_size(&poly_ring);
    let lc = poly_ring.from(poly_ring.base_ring().clone_el(poly_ring.lc(&f).unwrap()));
    let mut f = poly_ring.normalize(f);

    let mut result = Vec::new();
    result.push(lc);
    let mut x_power_q_mod_f = poly_ring.indeterminate();
    while poly_ring.degree(&f) != Some(0) {
        // computing gcd(f, X^(q^i) - X) directly would involve huge polynomials,
        // so reduce X^(q^i) modulo f first
        x_power_q_mod_f = pow_mod_f(&poly_ring, x_power_q_mod_f, &f, q);
        let fq_defining_poly_mod_f = poly_ring.sub_ref(&x_power_q_mod_f, &poly_ring.indeterminate());
        let deg_i_factor = poly_ring.ideal_gen(&f, &fq_defining_poly_mod_f);
        f = poly_ring.div_rem_monic(f, &deg_i_factor).0;
        result.push(deg_i_factor);
    }
    return result;
}

///
/// Uses the Cantor-Zassenhaus algorithm to find a nontrivial monic factor of a monic
/// polynomial `f` over a prime field `Fp`, that is squarefree and consists only of
/// irreducible factors of degree `d`.
///
/// # Algorithm
///
/// For every polynomial `T` and `q = p^d`, the polynomial `T^q - T` is divisible by `f`.
/// If `p` is odd, we have
/// ```text
/// T^q - T = T (T^((q - 1)/2) + 1) (T^((q - 1)/2) - 1)
/// ```
/// with pairwise coprime factors, and for a random `T`, the value `T(a)` at a root `a`
/// of `f` is a square in `Fq` with probability about `1/2`, independently for the different
/// irreducible factors of `f`. Thus `gcd(T^((q - 1)/2) - 1, f)` is a nontrivial factor
/// of `f` with probability about `1/2`.
///
/// If `p = 2`, the same works with the trace polynomial `T + T^2 + ... + T^(2^(d - 1))`
/// instead, which takes values in `F2` at the roots of `f`.
///
#[instrument(skip_all, level = "trace")]
pub fn cantor_zassenhaus<P>(poly_ring: P, f: El<P>, d: usize) -> El<P>
    where P: PolyRingStore,
        P::Type: PolyRing,
        <<P::Type as PolyRing>::BaseRing as RingStore>::Type: FiniteRing + Field
{
    let q = field_size(&poly_ring);
    let n = poly_ring.degree(&f).unwrap();
    assert!(n % d == 0);
    assert!(n > d);
    assert!(poly_ring.base_ring().is_one(poly_ring.lc(&f).unwrap()));
    let mut rng = oorandom::Rand64::new(q ^ ((n as u128) << 64));

    loop {
        let T = poly_ring.from_terms((0..n).map(|i| (poly_ring.base_ring().random_element(|| rng.rand_u64()), i)));
        let G = if q == 2 {
            let mut current = poly_ring.clone_el(&T);
            let mut trace = T;
            for _ in 1..d {
                current = pow_mod_f(&poly_ring, current, &f, 2);
                poly_ring.add_assign_ref(&mut trace, &current);
            }
            trace
        } else {
            let mut current = pow_mod_f(&poly_ring, T, &f, (q - 1) / 2);
            let mut norm = poly_ring.one();
            for _ in 0..d {
                norm = poly_ring.div_rem_monic(poly_ring.mul_ref(&norm, &current), &f).1;
                current = pow_mod_f(&poly_ring, current, &f, q);
            }
            poly_ring.sub(norm, poly_ring.one())
        };
        let g = poly_ring.ideal_gen(&f, &G);
        let deg_g = poly_ring.degree(&g).unwrap();
        if deg_g > 0 && deg_g < n {
            return g;
        }
        event!(Level::TRACE, "random polynomial did not split the input, retrying");
    }
}

///
/// Computes the factorization of `f` into monic irreducible polynomials, returned
/// together with their multiplicities, and the leading coefficient of `f`.
///
/// # Example
/// ```rust
/// # use residue_fields::assert_el_eq;
/// # use residue_fields::ring::*;
/// # use residue_fields::rings::zn::*;
/// # use residue_fields::rings::poly::*;
/// # use residue_fields::rings::poly::dense_poly::*;
/// # use residue_fields::algorithms::cantor_zassenhaus::*;
/// let Fp = PrimeField::new(29);
/// let P = DensePolyRing::new(Fp, "x");
/// // x^3 - 7 = (x + 13) (x^2 + 16x + 24) modulo 29
/// let f = P.sub(P.pow(P.indeterminate(), 3), P.from_int(7));
/// let (factors, unit) = factor(&P, f);
/// assert_el_eq!(Fp, Fp.one(), unit);
/// assert_eq!(2, factors.len());
/// assert!(factors.iter().all(|(_, e)| *e == 1));
/// ```
///
#[instrument(skip_all, level = "trace")]
pub fn factor<P>(poly_ring: P, f: El<P>) -> (Vec<(El<P>, usize)>, El<<P::Type as PolyRing>::BaseRing>)
    where P: PolyRingStore,
        P::Type: PolyRing,
        <<P::Type as PolyRing>::BaseRing as RingStore>::Type: FiniteRing + Field
{
    assert!(!poly_ring.is_zero(&f));
    let unit = poly_ring.base_ring().clone_el(poly_ring.lc(&f).unwrap());
    let mut el = poly_ring.normalize(f);
    let mut result: Vec<(El<P>, usize)> = Vec::new();

    // we repeatedly remove the squarefree part
    while poly_ring.degree(&el) != Some(0) {
        let sqrfree_part = poly_squarefree_part(&poly_ring, poly_ring.clone_el(&el));
        assert!(poly_ring.degree(&sqrfree_part).unwrap() > 0);

        for (d, factor_d) in distinct_degree_factorization(&poly_ring, poly_ring.clone_el(&sqrfree_part)).into_iter().enumerate().skip(1) {
            let mut stack = vec![factor_d];
            while let Some(current) = stack.pop() {
                if poly_ring.degree(&current) == Some(0) {
                    continue;
                } else if poly_ring.degree(&current) == Some(d) {
                    if let Some((_, power)) = result.iter_mut().find(|(factor, _)| poly_ring.eq_el(factor, &current)) {
                        *power += 1;
                    } else {
                        result.push((current, 1));
                    }
                } else {
                    let factor = cantor_zassenhaus(&poly_ring, poly_ring.clone_el(&current), d);
                    stack.push(poly_ring.div_rem_monic(current, &factor).0);
                    stack.push(factor);
                }
            }
        }
        el = poly_ring.div_rem_monic(el, &sqrfree_part).0;
    }
    event!(Level::DEBUG, factor_count = result.len(), "factored polynomial over finite prime field");
    return (result, unit);
}

///
/// Checks whether `f` is irreducible, using that `f` is irreducible of degree `n`
/// if and only if it is squarefree and has no irreducible factor of degree `< n`.
///
#[instrument(skip_all, level = "trace")]
pub fn is_irreducible<P>(poly_ring: P, f: &El<P>) -> bool
    where P: PolyRingStore,
        P::Type: PolyRing,
        <<P::Type as PolyRing>::BaseRing as RingStore>::Type: FiniteRing + Field
{
    let n = match poly_ring.degree(f) {
        None | Some(0) => return false,
        Some(1) => return true,
        Some(n) => n
    };
    let derivate = poly_ring.derivative(f);
    if poly_ring.is_zero(&derivate) || poly_ring.degree(&poly_ring.ideal_gen(f, &derivate)) != Some(0) {
        return false;
    }
    let ddf = distinct_degree_factorization(&poly_ring, poly_ring.clone_el(f));
    return ddf.len() == n + 1 && ddf[1..n].iter().all(|g| poly_ring.degree(g) == Some(0));
}

#[cfg(test)]
use crate::rings::poly::dense_poly::DensePolyRing;
#[cfg(test)]
use crate::rings::zn::PrimeField;

#[cfg(test)]
fn linear<P: PolyRingStore>(poly_ring: P, a: i32) -> El<P>
    where P::Type: PolyRing
{
    poly_ring.add(poly_ring.indeterminate(), poly_ring.from_int(a))
}

#[test]
fn test_poly_squarefree_part() {
    let ring = DensePolyRing::new(PrimeField::new(257), "X");
    let a = ring.prod([
        linear(&ring, 4), linear(&ring, 6), linear(&ring, 6), linear(&ring, 255),
        linear(&ring, 255), linear(&ring, 8), linear(&ring, 8), linear(&ring, 8)
    ]);
    let b = ring.prod([linear(&ring, 4), linear(&ring, 6), linear(&ring, 255), linear(&ring, 8)]);
    assert_el_eq!(&ring, &b, &poly_squarefree_part(&ring, a));
}

#[test]
fn test_poly_squarefree_part_multiplicity_p() {
    let Fp = PrimeField::new(5);
    let ring = DensePolyRing::new(Fp, "X");
    let f = ring.from_terms([(Fp.from_int(3), 0), (Fp.from_int(1), 10)]);
    let g = ring.from_terms([(Fp.from_int(3), 0), (Fp.from_int(1), 2)]);
    assert_el_eq!(&ring, &g, &poly_squarefree_part(&ring, f));
}

#[test]
fn test_distinct_degree_factorization() {
    let field = PrimeField::new(2);
    let ring = DensePolyRing::new(field, "X");
    let a0 = ring.one();
    let a1 = ring.mul(ring.indeterminate(), linear(&ring, 1));
    let a2 = ring.from_coefficients([field.one(), field.one(), field.one()]);
    let a3 = ring.mul(
        ring.from_coefficients([field.one(), field.one(), field.zero(), field.one()]),
        ring.from_coefficients([field.one(), field.zero(), field.one(), field.one()])
    );
    let a = ring.prod([&a0, &a1, &a2, &a3].into_iter().map(|x| ring.clone_el(x)));
    let expected = vec![a0, a1, a2, a3];
    let distinct_degree_factorization = distinct_degree_factorization(&ring, a);
    assert_eq!(expected.len(), distinct_degree_factorization.len());
    for (f, e) in distinct_degree_factorization.into_iter().zip(expected.into_iter()) {
        assert_el_eq!(&ring, &e, &f);
    }
}

#[test]
fn test_cantor_zassenhaus() {
    let Fp = PrimeField::new(7);
    let ring = DensePolyRing::new(Fp, "X");
    let f = ring.from_coefficients([Fp.from_int(1), Fp.from_int(0), Fp.from_int(1)]);
    let g = ring.from_coefficients([Fp.from_int(3), Fp.from_int(1), Fp.from_int(1)]);
    let p = ring.mul_ref(&f, &g);
    let factor = cantor_zassenhaus(&ring, p, 2);
    assert!(ring.eq_el(&factor, &f) || ring.eq_el(&factor, &g));
}

#[test]
fn test_cantor_zassenhaus_char_2() {
    let F2 = PrimeField::new(2);
    let ring = DensePolyRing::new(F2, "X");
    // X^3 + X + 1 and X^3 + X^2 + 1 are the two irreducible cubics over F2
    let f = ring.from_coefficients([F2.one(), F2.one(), F2.zero(), F2.one()]);
    let g = ring.from_coefficients([F2.one(), F2.zero(), F2.one(), F2.one()]);
    let factor = cantor_zassenhaus(&ring, ring.mul_ref(&f, &g), 3);
    assert!(ring.eq_el(&factor, &f) || ring.eq_el(&factor, &g));
}

#[test]
fn test_factor() {
    crate::tracing::LogAlgorithmSubscriber::init_test();
    let Fp = PrimeField::new(7);
    let ring = DensePolyRing::new(Fp, "X");
    // 3 (X + 4) (X + 6)^2 (X + 5)^3
    let f = ring.prod([
        ring.from_int(3), linear(&ring, 4), linear(&ring, 6), linear(&ring, 6),
        linear(&ring, 5), linear(&ring, 5), linear(&ring, 5)
    ]);
    let (mut factors, unit) = factor(&ring, f);
    assert_el_eq!(Fp, Fp.from_int(3), unit);
    factors.sort_by_key(|(_, e)| *e);
    assert_eq!(3, factors.len());
    assert_el_eq!(&ring, linear(&ring, 4), &factors[0].0);
    assert_el_eq!(&ring, linear(&ring, 6), &factors[1].0);
    assert_el_eq!(&ring, linear(&ring, 5), &factors[2].0);
    assert_eq!(vec![1, 2, 3], factors.iter().map(|(_, e)| *e).collect::<Vec<_>>());

    // X^10 + 3 = (X^2 - 2)^5 over F5
    let F5 = PrimeField::new(5);
    let ring = DensePolyRing::new(F5, "X");
    let f = ring.from_terms([(F5.from_int(3), 0), (F5.one(), 10)]);
    let (factors, _) = factor(&ring, f);
    assert_eq!(1, factors.len());
    assert_el_eq!(&ring, ring.from_terms([(F5.from_int(-2), 0), (F5.one(), 2)]), &factors[0].0);
    assert_eq!(5, factors[0].1);
}

#[test]
fn test_is_irreducible() {
    let F5 = PrimeField::new(5);
    let ring = DensePolyRing::new(F5, "X");
    let x_squared_plus = |a: i32| ring.from_terms([(F5.from_int(a), 0), (F5.one(), 2)]);
    assert!(is_irreducible(&ring, &x_squared_plus(2)));
    assert!(!is_irreducible(&ring, &x_squared_plus(1)));
    assert!(is_irreducible(&ring, &linear(&ring, 3)));
    assert!(!is_irreducible(&ring, &ring.one()));
    let F7 = PrimeField::new(7);
    let ring = DensePolyRing::new(F7, "X");
    assert!(is_irreducible(&ring, &ring.from_terms([(F7.from_int(-2), 0), (F7.one(), 3)])));
    assert!(!is_irreducible(&ring, &ring.from_terms([(F7.from_int(-2), 0), (F7.one(), 14)])));
}
