/// Multiplicative inverse of `a` modulo `m` via the extended Euclidean algorithm.
///
/// Returns `None` when `gcd(a, m) != 1` or `m < 2`. The result lies in `[1, m)`.
pub fn mod_inverse(a: i64, m: i64) -> Option<i64> {
    if m < 2 {
        return None;
    }

    let a = a.rem_euclid(m);
    let (g, x, _) = egcd(a as i128, m as i128);
    if g != 1 {
        return None;
    }

    Some(x.rem_euclid(m as i128) as i64)
}

fn egcd(a: i128, b: i128) -> (i128, i128, i128) {
    if b == 0 {
        (a, 1, 0)
    } else {
        let (g, x1, y1) = egcd(b, a % b);
        (g, y1, x1 - (a / b) * y1)
    }
}

/// `base^exp mod m` for a 64-bit modulus.
pub const fn pow_mod_u64(base: u64, mut exp: u64, m: u64) -> u64 {
    let m128 = m as u128;
    let mut result: u128 = 1 % m128;
    let mut b = (base as u128) % m128;

    while exp > 0 {
        if exp & 1 == 1 {
            result = result * b % m128;
        }
        b = b * b % m128;
        exp >>= 1;
    }
    result as u64
}
