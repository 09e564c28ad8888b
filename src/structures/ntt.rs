//! Number Theoretic Transform (NTT) for fast integer convolution.
//!
//! Products of large polynomials are computed in `Z/qZ` for the fixed
//! NTT-friendly prime `q = 998244353 = 119 · 2²³ + 1`. The result is the true
//! integer convolution whenever every output coefficient lies in `[0, q)`,
//! which [`convolve`] checks up front from the operand magnitudes. Inputs that
//! fail the check are left to the schoolbook path in the polynomial kernel.

use crate::utils::pow_mod_u64;

/// Modulus of the transform.
pub const NTT_PRIME: u64 = 998_244_353;

/// Primitive root of `NTT_PRIME`.
const PRIMITIVE_ROOT: u64 = 3;

/// Largest `k` with `2^k | NTT_PRIME - 1`.
pub const MAX_LOG2: u32 = 23;

/// Operand length (in coefficients) from which the transform pays off.
pub const NTT_THRESHOLD: usize = 64;

/// A precomputed NTT plan for a specific size.
///
/// Caches the twiddle factors of every butterfly stage so repeated
/// transforms of the same size do not recompute roots of unity.
#[derive(Clone, Debug)]
pub struct NttPlan {
    n: usize,
    twiddles: Vec<Vec<u64>>,
    inv_twiddles: Vec<Vec<u64>>,
    n_inv: u64,
}

impl NttPlan {
    /// Create a plan for size `n`.
    ///
    /// Returns `None` if `n` is not a power of two or exceeds `2^MAX_LOG2`.
    pub fn new(n: usize) -> Option<Self> {
        if n == 0 || !n.is_power_of_two() {
            return None;
        }

        let log_n = n.trailing_zeros();
        if log_n > MAX_LOG2 {
            return None;
        }

        let omega_max = pow_mod_u64(PRIMITIVE_ROOT, (NTT_PRIME - 1) >> MAX_LOG2, NTT_PRIME);
        let omega = pow_mod_u64(omega_max, 1u64 << (MAX_LOG2 - log_n), NTT_PRIME);
        let omega_inv = pow_mod_u64(omega, NTT_PRIME - 2, NTT_PRIME);

        let mut twiddles = Vec::with_capacity(log_n as usize);
        let mut inv_twiddles = Vec::with_capacity(log_n as usize);

        for k in 0..log_n {
            let len = 1usize << (k + 1);
            let half_len = len / 2;

            // ω_len = ω^(n/len) is a primitive len-th root of unity
            let omega_len = pow_mod_u64(omega, (n / len) as u64, NTT_PRIME);
            let omega_len_inv = pow_mod_u64(omega_inv, (n / len) as u64, NTT_PRIME);

            let mut stage = Vec::with_capacity(half_len);
            let mut inv_stage = Vec::with_capacity(half_len);
            let mut w = 1u64;
            let mut w_inv = 1u64;
            for _ in 0..half_len {
                stage.push(w);
                inv_stage.push(w_inv);
                w = mul_q(w, omega_len);
                w_inv = mul_q(w_inv, omega_len_inv);
            }

            twiddles.push(stage);
            inv_twiddles.push(inv_stage);
        }

        let n_inv = pow_mod_u64(n as u64, NTT_PRIME - 2, NTT_PRIME);

        Some(Self {
            n,
            twiddles,
            inv_twiddles,
            n_inv,
        })
    }

    /// Get the NTT size.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Forward transform in place.
    ///
    /// # Panics
    /// Panics if `a.len() != self.size()`.
    pub fn ntt(&self, a: &mut [u64]) {
        assert_eq!(a.len(), self.n, "Input length must match plan size");
        butterflies(a, &self.twiddles);
    }

    /// Inverse transform in place, including the `1/n` scaling.
    ///
    /// # Panics
    /// Panics if `a.len() != self.size()`.
    pub fn intt(&self, a: &mut [u64]) {
        assert_eq!(a.len(), self.n, "Input length must match plan size");
        butterflies(a, &self.inv_twiddles);
        for x in a.iter_mut() {
            *x = mul_q(*x, self.n_inv);
        }
    }
}

/// Cooley-Tukey iterative transform with precomputed stage twiddles.
fn butterflies(a: &mut [u64], stages: &[Vec<u64>]) {
    let n = a.len();
    if n <= 1 {
        return;
    }

    bit_reverse_permutation(a);

    for (k, stage) in stages.iter().enumerate() {
        let len = 1usize << (k + 1);
        let half_len = len / 2;

        for start in (0..n).step_by(len) {
            for (j, &w) in stage.iter().enumerate() {
                let u = a[start + j];
                let v = mul_q(a[start + j + half_len], w);
                a[start + j] = add_q(u, v);
                a[start + j + half_len] = sub_q(u, v);
            }
        }
    }
}

#[inline]
fn mul_q(a: u64, b: u64) -> u64 {
    ((a as u128 * b as u128) % NTT_PRIME as u128) as u64
}

#[inline]
fn add_q(a: u64, b: u64) -> u64 {
    let s = a + b;
    if s >= NTT_PRIME {
        s - NTT_PRIME
    } else {
        s
    }
}

#[inline]
fn sub_q(a: u64, b: u64) -> u64 {
    if a >= b {
        a - b
    } else {
        a + NTT_PRIME - b
    }
}

/// Bit-reversal permutation.
fn bit_reverse_permutation<T: Copy>(a: &mut [T]) {
    let n = a.len();
    let log_n = n.trailing_zeros();

    for i in 0..n {
        let j = bit_reverse(i, log_n);
        if i < j {
            a.swap(i, j);
        }
    }
}

/// Reverse the lower `bits` bits of `x`.
fn bit_reverse(x: usize, bits: u32) -> usize {
    if bits == 0 {
        return 0;
    }
    x.reverse_bits() >> (usize::BITS - bits)
}

/// Whether the convolution of `a` and `b` is exactly representable in `Z/qZ`.
///
/// Requires non-negative coefficients and
/// `max(a) * max(b) * min(len a, len b) < q`, which bounds every output
/// coefficient.
pub fn fits_exactly(a: &[i64], b: &[i64]) -> bool {
    if a.iter().chain(b).any(|&c| c < 0) {
        return false;
    }

    let max_a = a.iter().copied().max().unwrap_or(0) as u128;
    let max_b = b.iter().copied().max().unwrap_or(0) as u128;
    let terms = a.len().min(b.len()) as u128;

    max_a
        .checked_mul(max_b)
        .and_then(|m| m.checked_mul(terms))
        .is_some_and(|bound| bound < NTT_PRIME as u128)
}

/// Exact integer convolution through the NTT.
///
/// Returns `None` if either operand is empty, if [`fits_exactly`] rejects the
/// operands, or if the product needs a transform longer than `2^MAX_LOG2`.
/// The output has length `a.len() + b.len() - 1` and may carry trailing
/// zeros.
pub fn convolve(a: &[i64], b: &[i64]) -> Option<Vec<i64>> {
    if a.is_empty() || b.is_empty() || !fits_exactly(a, b) {
        return None;
    }

    let result_len = a.len() + b.len() - 1;
    let plan = NttPlan::new(result_len.next_power_of_two())?;
    let n = plan.size();

    let mut fa: Vec<u64> = a.iter().map(|&c| c as u64).collect();
    let mut fb: Vec<u64> = b.iter().map(|&c| c as u64).collect();
    fa.resize(n, 0);
    fb.resize(n, 0);

    plan.ntt(&mut fa);
    plan.ntt(&mut fb);
    for (x, y) in fa.iter_mut().zip(&fb) {
        *x = mul_q(*x, *y);
    }
    plan.intt(&mut fa);

    fa.truncate(result_len);
    Some(fa.into_iter().map(|c| c as i64).collect())
}
