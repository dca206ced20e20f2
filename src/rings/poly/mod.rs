use crate::field::*;
use crate::ring::*;

///
/// Contains [`dense_poly::DensePolyRing`], an implementation of univariate
/// polynomials based on dense coefficient vectors.
///
pub mod dense_poly;

///
/// Trait for all rings that represent the univariate polynomial ring `R[X]`
/// with any base ring `R`.
///
/// Currently, the two operations that are specific to polynomial rings are
/// accessing coefficients and division by monic polynomials. Everything that
/// requires the base ring to be a field is provided by [`PolyRingStore`].
///
pub trait PolyRing: RingBase {

    type BaseRing: RingStore;

    fn base_ring<'a>(&'a self) -> &'a Self::BaseRing;

    fn indeterminate(&self) -> Self::Element;

    ///
    /// The name of the indeterminate, as used when printing polynomials.
    ///
    fn indeterminate_name(&self) -> &str;

    ///
    /// Returns the polynomial `sum_i c_i X^(e_i)` for the given terms `(c_i, e_i)`.
    /// Exponents may occur multiple times, in which case the coefficients are added.
    ///
    fn from_terms<I>(&self, terms: I) -> Self::Element
        where I: IntoIterator<Item = (El<Self::BaseRing>, usize)>;

    fn coefficient_at<'a>(&'a self, f: &'a Self::Element, i: usize) -> &'a El<Self::BaseRing>;

    ///
    /// Returns the degree of the polynomial, or `None` if it is zero.
    ///
    fn degree(&self, f: &Self::Element) -> Option<usize>;

    ///
    /// Computes `(q, r)` with `lhs = q * rhs + r` and `deg(r) < deg(rhs)`.
    /// The polynomial `rhs` must be monic.
    ///
    fn div_rem_monic(&self, lhs: Self::Element, rhs: &Self::Element) -> (Self::Element, Self::Element);

    ///
    /// Returns the constant polynomial `x`.
    ///
    fn from(&self, x: El<Self::BaseRing>) -> Self::Element {
        self.from_terms([(x, 0)])
    }
}

///
/// [`RingStore`] corresponding to [`PolyRing`].
///
pub trait PolyRingStore: RingStore
    where Self::Type: PolyRing
{
    delegate!{ fn indeterminate(&self) -> El<Self> }
    delegate!{ fn degree(&self, f: &El<Self>) -> Option<usize> }
    delegate!{ fn div_rem_monic(&self, lhs: El<Self>, rhs: &El<Self>) -> (El<Self>, El<Self>) }

    fn base_ring<'a>(&'a self) -> &'a <Self::Type as PolyRing>::BaseRing {
        self.get_ring().base_ring()
    }

    fn indeterminate_name(&self) -> &str {
        self.get_ring().indeterminate_name()
    }

    fn coefficient_at<'a>(&'a self, f: &'a El<Self>, i: usize) -> &'a El<<Self::Type as PolyRing>::BaseRing> {
        self.get_ring().coefficient_at(f, i)
    }

    fn from_terms<I>(&self, terms: I) -> El<Self>
        where I: IntoIterator<Item = (El<<Self::Type as PolyRing>::BaseRing>, usize)>
    {
        self.get_ring().from_terms(terms)
    }

    fn from(&self, x: El<<Self::Type as PolyRing>::BaseRing>) -> El<Self> {
        self.get_ring().from(x)
    }

    ///
    /// Returns the leading coefficient of `f`, or `None` if `f` is zero.
    ///
    fn lc<'a>(&'a self, f: &'a El<Self>) -> Option<&'a El<<Self::Type as PolyRing>::BaseRing>> {
        let d = self.degree(f)?;
        return Some(self.coefficient_at(f, d));
    }

    ///
    /// Returns the polynomial whose coefficients are the given ones, starting
    /// with the constant coefficient.
    ///
    fn from_coefficients<I>(&self, coefficients: I) -> El<Self>
        where I: IntoIterator<Item = El<<Self::Type as PolyRing>::BaseRing>>
    {
        self.from_terms(coefficients.into_iter().enumerate().map(|(i, c)| (c, i)))
    }

    ///
    /// Returns the first `len` coefficients of `f`, padded with zeros.
    ///
    fn coefficient_vec(&self, f: &El<Self>, len: usize) -> Vec<El<<Self::Type as PolyRing>::BaseRing>> {
        assert!(self.degree(f).map(|d| d < len).unwrap_or(true));
        (0..len).map(|i| self.base_ring().clone_el(self.coefficient_at(f, i))).collect()
    }

    fn derivative(&self, f: &El<Self>) -> El<Self> {
        let Some(d) = self.degree(f) else {
            return self.zero();
        };
        let base_ring = self.base_ring();
        self.from_terms((1..=d).map(|i| (base_ring.mul_ref_fst(self.coefficient_at(f, i), base_ring.from_int(i as i32)), i - 1)))
    }

    ///
    /// Computes `(q, r)` with `lhs = q * rhs + r` and `deg(r) < deg(rhs)`.
    ///
    fn div_rem(&self, lhs: El<Self>, rhs: &El<Self>) -> (El<Self>, El<Self>)
        where <<Self::Type as PolyRing>::BaseRing as RingStore>::Type: Field
    {
        let lc_inv = self.base_ring().invert(self.lc(rhs).expect("division by zero"));
        let monic_rhs = self.inclusion_mul(&lc_inv, self.clone_el(rhs));
        let (q, r) = self.div_rem_monic(lhs, &monic_rhs);
        return (self.inclusion_mul(&lc_inv, q), r);
    }

    ///
    /// Multiplies each coefficient of `f` by `c`.
    ///
    fn inclusion_mul(&self, c: &El<<Self::Type as PolyRing>::BaseRing>, f: El<Self>) -> El<Self> {
        let Some(d) = self.degree(&f) else {
            return f;
        };
        let base_ring = self.base_ring();
        self.from_terms((0..=d).map(|i| (base_ring.mul_ref(c, self.coefficient_at(&f, i)), i)))
    }

    ///
    /// Returns the monic polynomial associated to `f`, or zero if `f` is zero.
    ///
    fn normalize(&self, f: El<Self>) -> El<Self>
        where <<Self::Type as PolyRing>::BaseRing as RingStore>::Type: Field
    {
        match self.lc(&f) {
            None => f,
            Some(lc) => {
                let lc_inv = self.base_ring().invert(lc);
                self.inclusion_mul(&lc_inv, f)
            }
        }
    }

    ///
    /// Computes the monic greatest common divisor of `lhs` and `rhs`.
    ///
    fn ideal_gen(&self, lhs: &El<Self>, rhs: &El<Self>) -> El<Self>
        where <<Self::Type as PolyRing>::BaseRing as RingStore>::Type: Field
    {
        let (mut a, mut b) = (self.clone_el(lhs), self.clone_el(rhs));
        while !self.is_zero(&b) {
            let (_, r) = self.div_rem(a, &b);
            a = b;
            b = r;
        }
        return self.normalize(a);
    }

    ///
    /// Computes `(s, t, d)` such that `d = s * lhs + t * rhs` is the monic greatest
    /// common divisor of `lhs` and `rhs`.
    ///
    fn extended_ideal_gen(&self, lhs: &El<Self>, rhs: &El<Self>) -> (El<Self>, El<Self>, El<Self>)
        where <<Self::Type as PolyRing>::BaseRing as RingStore>::Type: Field
    {
        let (mut a, mut b) = (self.clone_el(lhs), self.clone_el(rhs));
        let (mut sa, mut ta) = (self.one(), self.zero());
        let (mut sb, mut tb) = (self.zero(), self.one());
        while !self.is_zero(&b) {
            let (q, r) = self.div_rem(a, &b);
            let new_sb = self.sub_ref_fst_mul(&sa, &q, &sb);
            let new_tb = self.sub_ref_fst_mul(&ta, &q, &tb);
            (a, b) = (b, r);
            (sa, sb) = (sb, new_sb);
            (ta, tb) = (tb, new_tb);
        }
        let Some(lc) = self.lc(&a) else {
            return (sa, ta, a);
        };
        let lc_inv = self.base_ring().invert(lc);
        return (self.inclusion_mul(&lc_inv, sa), self.inclusion_mul(&lc_inv, ta), self.inclusion_mul(&lc_inv, a));
    }

    ///
    /// Computes `a - q * b`.
    ///
    fn sub_ref_fst_mul(&self, a: &El<Self>, q: &El<Self>, b: &El<Self>) -> El<Self> {
        self.sub_ref(a, &self.mul_ref(q, b))
    }
}

impl<R: RingStore> PolyRingStore for R
    where R::Type: PolyRing
{}

///
/// Writes the polynomial with the given coefficients (starting with the constant one)
/// in the usual notation, e.g. `X^2 + 4*X - 1`.
///
pub fn dbg_poly<'a, R>(coefficients: &[El<R>], base_ring: R, name: &str, out: &mut std::fmt::Formatter<'a>) -> std::fmt::Result
    where R: RingStore
{
    let mut first = true;
    for i in (0..coefficients.len()).rev() {
        let c = &coefficients[i];
        if base_ring.is_zero(c) {
            continue;
        }
        let formatted = format!("{}", base_ring.format(c));
        let (negative, abs) = match formatted.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, formatted.as_str())
        };
        if first && negative {
            write!(out, "-")?;
        } else if !first {
            write!(out, "{}", if negative { " - " } else { " + " })?;
        }
        first = false;
        if i == 0 {
            write!(out, "{}", abs)?;
            continue;
        }
        if abs != "1" {
            write!(out, "{}*", abs)?;
        }
        if i == 1 {
            write!(out, "{}", name)?;
        } else {
            write!(out, "{}^{}", name, i)?;
        }
    }
    if first {
        write!(out, "0")?;
    }
    return Ok(());
}
