//! Small number theory

pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Least common multiple; `lcm(0, x)` is 0
pub fn lcm(a: u64, b: u64) -> u64 {
    if a == 0 || b == 0 {
        0
    } else {
        a / gcd(a, b) * b
    }
}

/// `base^exp mod modulus`
pub fn mod_pow(base: u64, mut exp: u64, modulus: u64) -> u64 {
    if modulus == 1 {
        return 0;
    }
    let m = modulus as u128;
    let mut result = 1u128;
    let mut base = base as u128 % m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * base % m;
        }
        base = base * base % m;
        exp >>= 1;
    }
    result as u64
}

/// `(g, x, y)` with `a*x + b*y = g = gcd(a, b)`
fn extended_gcd(a: i128, b: i128) -> (i128, i128, i128) {
    if b == 0 {
        (a, 1, 0)
    } else {
        let (g, x, y) = extended_gcd(b, a.rem_euclid(b));
        (g, y, x - a.div_euclid(b) * y)
    }
}

/// Inverse of `a` modulo `m`, if `a` and `m` are coprime
pub fn mod_inv(a: i64, m: i64) -> Option<i64> {
    let (g, x, _) = extended_gcd((a as i128).rem_euclid(m as i128), m as i128);
    (g == 1).then(|| x.rem_euclid(m as i128) as i64)
}

/// Solve `x ≡ r (mod m)` for every `(r, m)` pair.
///
/// Moduli need not be coprime; `None` when the congruences contradict each
/// other. Returns `(x, lcm)` with `0 <= x < lcm`.
///
/// ```
/// use aoc_puzzles::utils::math::crt;
///
/// assert_eq!(crt(&[(2, 3), (3, 5), (2, 7)]), Some((23, 105)));
/// assert_eq!(crt(&[(1, 4), (2, 6)]), None);
/// ```
pub fn crt(congruences: &[(i64, i64)]) -> Option<(i64, i64)> {
    let mut x: i128 = 0;
    let mut m: i128 = 1;
    for &(r, n) in congruences {
        let (r, n) = ((r as i128).rem_euclid(n as i128), n as i128);
        let (g, p, _) = extended_gcd(m, n);
        if (r - x) % g != 0 {
            return None;
        }
        let step = n / g;
        let k = ((r - x) / g % step * p).rem_euclid(step);
        x += m * k;
        m *= step;
        x = x.rem_euclid(m);
    }
    Some((i64::try_from(x).ok()?, i64::try_from(m).ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn known_values() {
        assert_eq!(gcd(48, 18), 6);
        assert_eq!(gcd(0, 7), 7);
        assert_eq!(lcm(4, 6), 12);
        assert_eq!(lcm(0, 6), 0);
        assert_eq!(mod_pow(7, 8, 20201227), 5764801);
        assert_eq!(mod_pow(5, 0, 1), 0);
        assert_eq!(mod_inv(3, 11), Some(4));
        assert_eq!(mod_inv(4, 8), None);
    }

    #[test]
    fn crt_handles_bus_schedule() {
        // 17,x,13,19 -> t = 3417
        assert_eq!(crt(&[(0, 17), (-2, 13), (-3, 19)]), Some((3417, 17 * 13 * 19)));
        assert_eq!(crt(&[(2, 4), (4, 6)]), Some((10, 12)));
    }

    proptest! {
        #[test]
        fn crt_result_satisfies_every_congruence(
            x in 0i64..1_000_000,
            moduli in prop::collection::vec(2i64..60, 1..5),
        ) {
            let congruences: Vec<_> = moduli.iter().map(|&m| (x % m, m)).collect();
            let (found, modulus) = crt(&congruences).unwrap();
            prop_assert!(found < modulus);
            for &(r, m) in &congruences {
                prop_assert_eq!(found % m, r);
            }
            prop_assert_eq!(x % modulus, found);
        }

        #[test]
        fn mod_inv_inverts(a in 1i64..10_000, m in 2i64..10_000) {
            match mod_inv(a, m) {
                Some(inv) => prop_assert_eq!((a as i128 * inv as i128).rem_euclid(m as i128), 1),
                None => prop_assert!(gcd(a as u64, m as u64) != 1),
            }
        }

        #[test]
        fn lcm_is_divisible_by_both(a in 1u64..100_000, b in 1u64..100_000) {
            let l = lcm(a, b);
            prop_assert_eq!(l % a, 0);
            prop_assert_eq!(l % b, 0);
            prop_assert_eq!(l * gcd(a, b), a * b);
        }
    }
}
