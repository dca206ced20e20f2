///
/// Contains [`sqr_mul::generic_abs_square_and_multiply()`] for computing a power
/// of an element in a generic monoid.
///
pub mod sqr_mul;
///
/// Contains an implementation of the Miller-Rabin probabilistic primality test,
/// together with modular arithmetic on `u128`.
///
pub mod miller_rabin;
///
/// Contains an implementation of integer factoring by trial division, which is
/// sufficient for the small numbers that occur as orders of multiplicative groups
/// of table-based finite fields.
///
pub mod int_factor;
///
/// Contains algorithms for solving linear systems over fields.
///
pub mod linsolve;
///
/// Contains the Cantor-Zassenhaus algorithm and the other steps of polynomial
/// factorization over finite prime fields.
///
pub mod cantor_zassenhaus;
