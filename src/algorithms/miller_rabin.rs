use oorandom;

use crate::algorithms::sqr_mul::generic_abs_square_and_multiply;

const SMALL_PRIMES: [u128; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

///
/// Computes `a + b mod n` for `a, b < n`, without overflow for any `n`.
///
pub fn add_mod(a: u128, b: u128, n: u128) -> u128 {
    debug_assert!(a < n && b < n);
    if a >= n - b { a - (n - b) } else { a + b }
}

///
/// Computes `a * b mod n`, without overflow for any `n`.
///
pub fn mul_mod(a: u128, b: u128, n: u128) -> u128 {
    if n <= u64::MAX as u128 {
        return ((a % n) * (b % n)) % n;
    }
    let mut result = 0;
    let mut current = a % n;
    let mut b = b;
    while b > 0 {
        if b & 1 == 1 {
            result = add_mod(result, current, n);
        }
        current = add_mod(current, current, n);
        b >>= 1;
    }
    return result;
}

pub fn pow_mod(base: u128, power: u128, n: u128) -> u128 {
    generic_abs_square_and_multiply(base % n, power, |x| mul_mod(x, x, n), |a, b| mul_mod(*a, b, n), 1 % n)
}

fn is_witness(a: u128, n: u128, d: u128, s: u32) -> bool {
    let mut x = pow_mod(a, d, n);
    if x == 1 || x == n - 1 {
        return false;
    }
    for _ in 1..s {
        x = mul_mod(x, x, n);
        if x == n - 1 {
            return false;
        }
    }
    return true;
}

///
/// Miller-Rabin primality test.
///
/// If n is a prime, this returns true. If n is not a prime, this returns false
/// with probability greater or equal than `1 - 4^(-k)`. For `n < 3.3 * 10^24`, the
/// result is always correct, since then the fixed bases `2, 3, ..., 41` already
/// suffice for a deterministic test.
///
pub fn is_prime(n: u128, k: usize) -> bool {
    if n < 2 {
        return false;
    }
    for p in SMALL_PRIMES {
        if n == p {
            return true;
        } else if n % p == 0 {
            return false;
        }
    }
    let s = (n - 1).trailing_zeros();
    let d = (n - 1) >> s;
    for a in SMALL_PRIMES {
        if is_witness(a, n, d, s) {
            return false;
        }
    }
    let mut rng = oorandom::Rand64::new(n);
    for _ in 0..k {
        let a = 2 + ((rng.rand_u64() as u128) << 64 | rng.rand_u64() as u128) % (n - 3);
        if is_witness(a, n, d, s) {
            return false;
        }
    }
    return true;
}

///
/// Miller-Rabin primality test for signed integers; negative numbers are never prime.
///
pub fn is_prime_i128(n: i128, k: usize) -> bool {
    n > 0 && is_prime(n as u128, k)
}

#[test]
fn test_is_prime() {
    let primes = [2, 3, 5, 7, 11, 13, 17, 29, 97, 65537, 2147483647, 1000000007];
    let composites = [0, 1, 4, 9, 15, 91, 561, 1105, 65535, 3215031751, 1000000007 * 998244353];
    for p in primes {
        assert!(is_prime(p, 10), "{} is prime", p);
    }
    for n in composites {
        assert!(!is_prime(n, 10), "{} is composite", n);
    }
    assert!(is_prime(18446744073709551557, 10));
    assert!(is_prime(170141183460469231731687303715884105727, 10));
    assert!(!is_prime(18446744073709551557 * 3, 10));
    assert!(!is_prime_i128(-7, 10));
}

#[test]
fn test_mul_mod_large() {
    let n = 170141183460469231731687303715884105727;
    assert_eq!(1, mul_mod(n - 1, n - 1, n));
    assert_eq!(n - 2, mul_mod(n - 1, 2, n));
}
