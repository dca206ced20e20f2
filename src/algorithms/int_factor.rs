///
/// Factors the given positive integer by trial division, returning the prime
/// factors in ascending order, together with their multiplicities.
///
/// This is only efficient if `n` is small, or has only small prime factors
/// apart from possibly one large one.
///
pub fn factor(mut n: u128) -> Vec<(u128, usize)> {
    assert!(n > 0);
    let mut result = Vec::new();
    let mut p: u128 = 2;
    while p * p <= n {
        if n % p == 0 {
            let mut multiplicity = 0;
            while n % p == 0 {
                n /= p;
                multiplicity += 1;
            }
            result.push((p, multiplicity));
        }
        p += if p == 2 { 1 } else { 2 };
    }
    if n > 1 {
        result.push((n, 1));
    }
    return result;
}

///
/// Returns the distinct prime factors of the given positive integer.
///
pub fn prime_divisors(n: u128) -> Vec<u128> {
    factor(n).into_iter().map(|(p, _)| p).collect()
}

#[test]
fn test_factor() {
    assert_eq!(Vec::<(u128, usize)>::new(), factor(1));
    assert_eq!(vec![(2, 4), (3, 1), (5, 1)], factor(240));
    assert_eq!(vec![(65537, 1)], factor(65537));
    assert_eq!(vec![(2, 4), (3, 1), (5, 1), (17, 1), (257, 1)], factor(65535 * 16));
    assert_eq!(vec![2, 3, 5, 7], prime_divisors(840));
}
