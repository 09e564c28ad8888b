use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};

use crate::structures::ntt;

/// Polynomial with integer coefficients.
///
/// Coefficients are stored in ascending order of degree:
/// `coeffs[i]` is the coefficient of `x^i`.
///
/// Every constructor and every operation strips trailing zeros, so the
/// zero polynomial is always the empty vector and the last stored
/// coefficient of any other polynomial is nonzero. Equality is therefore
/// equality of canonical forms.
///
/// The arithmetic here never reduces modulo a prime; that is the job of a
/// [`FiniteField`](crate::FiniteField). Kernel operations (`+`, `-`, negation,
/// `*` and [`mul_scalar`](Polynomial::mul_scalar)) wrap on `i64` overflow,
/// so results are exact only while every coefficient fits in an `i64`.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Polynomial {
    coeffs: Vec<i64>,
}

impl Polynomial {
    /// Create a polynomial from coefficients in ascending order.
    ///
    /// `coeffs[i]` is the coefficient of `x^i`.
    /// Trailing zeros are automatically removed.
    ///
    /// # Example
    ///
    /// ```
    /// use polygf::Polynomial;
    ///
    /// // 3 + 2x + x^2
    /// let p = Polynomial::new(vec![3, 2, 1, 0]);
    /// assert_eq!(p.degree(), Some(2));
    /// assert_eq!(p.len(), 3);
    /// ```
    pub fn new(coeffs: Vec<i64>) -> Self {
        let mut poly = Self { coeffs };
        poly.normalize();
        poly
    }

    /// Create a polynomial from coefficients written highest degree first.
    ///
    /// # Example
    ///
    /// ```
    /// use polygf::Polynomial;
    ///
    /// // x^2 + 2x + 3
    /// let p = Polynomial::from_math(vec![1, 2, 3]);
    /// assert_eq!(p, Polynomial::new(vec![3, 2, 1]));
    /// ```
    pub fn from_math(mut coeffs: Vec<i64>) -> Self {
        coeffs.reverse();
        Self::new(coeffs)
    }

    /// Create the zero polynomial.
    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    /// Create a constant polynomial.
    pub fn constant(c: i64) -> Self {
        if c == 0 {
            Self::zero()
        } else {
            Self { coeffs: vec![c] }
        }
    }

    /// Create the polynomial `x`.
    pub fn x() -> Self {
        Self { coeffs: vec![0, 1] }
    }

    /// Create a monomial `c * x^n`.
    pub fn monomial(c: i64, n: usize) -> Self {
        if c == 0 {
            return Self::zero();
        }
        let mut coeffs = vec![0; n + 1];
        coeffs[n] = c;
        Self { coeffs }
    }

    /// Check if this is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Check if this is a nonzero constant.
    pub fn is_constant(&self) -> bool {
        self.coeffs.len() == 1
    }

    /// Number of stored coefficients (`degree + 1`, or 0 for zero).
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    /// Get the degree of the polynomial.
    ///
    /// Returns `None` for the zero polynomial, `Some(n)` otherwise
    /// where `n` is the highest power with a non-zero coefficient.
    pub fn degree(&self) -> Option<usize> {
        if self.coeffs.is_empty() {
            None
        } else {
            Some(self.coeffs.len() - 1)
        }
    }

    /// Degree as a signed integer, `-1` for the zero polynomial.
    pub fn deg(&self) -> isize {
        self.coeffs.len() as isize - 1
    }

    /// Get the leading coefficient.
    ///
    /// Returns `None` for the zero polynomial.
    pub fn leading_coeff(&self) -> Option<i64> {
        self.coeffs.last().copied()
    }

    /// Get the coefficient of `x^i`, zero beyond the degree.
    pub fn coeff(&self, i: usize) -> i64 {
        self.coeffs.get(i).copied().unwrap_or(0)
    }

    /// Get a slice of all coefficients, lowest degree first.
    pub fn coefficients(&self) -> &[i64] {
        &self.coeffs
    }

    /// Consume the polynomial and return its coefficients.
    pub fn into_coefficients(self) -> Vec<i64> {
        self.coeffs
    }

    /// Multiply every coefficient by `alpha`, wrapping on overflow.
    ///
    /// # Example
    ///
    /// ```
    /// use polygf::Polynomial;
    ///
    /// let p = Polynomial::new(vec![1, -2, 3]);
    /// assert_eq!(p.mul_scalar(3), Polynomial::new(vec![3, -6, 9]));
    /// assert!(p.mul_scalar(0).is_zero());
    /// ```
    pub fn mul_scalar(&self, alpha: i64) -> Self {
        if alpha == 0 {
            return Self::zero();
        }
        Self::new(self.coeffs.iter().map(|&c| c.wrapping_mul(alpha)).collect())
    }

    /// Map every coefficient through `f` and re-normalize.
    pub(crate) fn map_coeffs(&self, f: impl Fn(i64) -> i64) -> Self {
        Self::new(self.coeffs.iter().map(|&c| f(c)).collect())
    }

    /// Remove trailing zero coefficients.
    fn normalize(&mut self) {
        while self.coeffs.last() == Some(&0) {
            self.coeffs.pop();
        }
    }

    /// Schoolbook convolution with `i128` accumulation.
    pub(crate) fn convolve_wide(a: &[i64], b: &[i64]) -> Vec<i128> {
        if a.is_empty() || b.is_empty() {
            return Vec::new();
        }

        let mut out = vec![0i128; a.len() + b.len() - 1];
        for (i, &x) in a.iter().enumerate() {
            if x == 0 {
                continue;
            }
            for (j, &y) in b.iter().enumerate() {
                out[i + j] += x as i128 * y as i128;
            }
        }
        out
    }

    /// Full product, choosing between the transform and schoolbook paths.
    ///
    /// Coefficients of the result are exact as long as they fit in `i64`;
    /// beyond that they wrap, as in [`mul_scalar`](Self::mul_scalar).
    fn product(&self, rhs: &Self) -> Self {
        if self.is_zero() || rhs.is_zero() {
            return Self::zero();
        }
        if self.is_constant() {
            return rhs.mul_scalar(self.coeffs[0]);
        }
        if rhs.is_constant() {
            return self.mul_scalar(rhs.coeffs[0]);
        }

        if self.len().min(rhs.len()) >= ntt::NTT_THRESHOLD {
            if let Some(coeffs) = ntt::convolve(&self.coeffs, &rhs.coeffs) {
                return Self::new(coeffs);
            }
        }

        Self::new(
            Self::convolve_wide(&self.coeffs, &rhs.coeffs)
                .into_iter()
                .map(|c| c as i64) // wraps like i64 arithmetic
                .collect(),
        )
    }

    fn combine(&self, rhs: &Self, op: impl Fn(i64, i64) -> i64) -> Self {
        let max_len = self.coeffs.len().max(rhs.coeffs.len());
        let coeffs = (0..max_len).map(|i| op(self.coeff(i), rhs.coeff(i))).collect();
        Self::new(coeffs)
    }
}

impl From<Vec<i64>> for Polynomial {
    fn from(coeffs: Vec<i64>) -> Self {
        Self::new(coeffs)
    }
}

/* ---- Arithmetic operators ---- */

impl Add for Polynomial {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.combine(&rhs, i64::wrapping_add)
    }
}

impl Add<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Self::Output {
        self.combine(rhs, i64::wrapping_add)
    }
}

impl Neg for Polynomial {
    type Output = Self;

    fn neg(self) -> Self::Output {
        let coeffs = self.coeffs.into_iter().map(i64::wrapping_neg).collect();
        Self { coeffs }
    }
}

impl Sub for Polynomial {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.combine(&rhs, i64::wrapping_sub)
    }
}

impl Sub<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &Polynomial) -> Self::Output {
        self.combine(rhs, i64::wrapping_sub)
    }
}

impl Mul for Polynomial {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.product(&rhs)
    }
}

impl Mul<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Self::Output {
        self.product(rhs)
    }
}

/// Scalar multiplication: polynomial * integer
impl Mul<i64> for Polynomial {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        self.mul_scalar(rhs)
    }
}

impl fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut first = true;
        for (i, &coeff) in self.coeffs.iter().enumerate() {
            if coeff == 0 {
                continue;
            }

            if !first {
                write!(f, " + ")?;
            }
            first = false;

            match i {
                0 => write!(f, "{}", coeff)?,
                1 if coeff == 1 => write!(f, "x")?,
                1 => write!(f, "{}*x", coeff)?,
                _ if coeff == 1 => write!(f, "x^{}", i)?,
                _ => write!(f, "{}*x^{}", coeff, i)?,
            }
        }

        Ok(())
    }
}

/// Coefficient list, highest degree first: `[1 0 4]` is `x^2 + 4`.
impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, c) in self.coeffs.iter().rev().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(c: &[i64]) -> Polynomial {
        Polynomial::new(c.to_vec())
    }

    #[test]
    fn new_normalizes() {
        let p = poly(&[1, 2, 0, 0]);
        assert_eq!(p.degree(), Some(1));
        assert_eq!(p.len(), 2);
        assert_eq!(p.deg(), 1);
    }

    #[test]
    fn new_all_zeros() {
        let p = poly(&[0, 0, 0]);
        assert!(p.is_zero());
        assert_eq!(p.degree(), None);
        assert_eq!(p.deg(), -1);
        assert_eq!(p.len(), 0);
        assert_eq!(p, Polynomial::zero());
    }

    #[test]
    fn new_keeps_inner_zeros() {
        let p = poly(&[0, 0, 3]);
        assert_eq!(p.coefficients(), &[0, 0, 3]);
    }

    #[test]
    fn from_math_reverses() {
        let p = Polynomial::from_math(vec![5, 0, 1, 2]);
        assert_eq!(p.coefficients(), &[2, 1, 0, 5]);
    }

    #[test]
    fn from_math_strips_leading_zeros() {
        let p = Polynomial::from_math(vec![0, 0, 1, 2]);
        assert_eq!(p.coefficients(), &[2, 1]);
    }

    #[test]
    fn zero() {
        let z = Polynomial::zero();
        assert!(z.is_zero());
        assert_eq!(z.degree(), None);
        assert_eq!(z.leading_coeff(), None);
    }

    #[test]
    fn constant() {
        let c = Polynomial::constant(5);
        assert_eq!(c.degree(), Some(0));
        assert!(c.is_constant());
        assert_eq!(c.leading_coeff(), Some(5));
        assert!(Polynomial::constant(0).is_zero());
    }

    #[test]
    fn monomial() {
        let m = Polynomial::monomial(3, 2);
        assert_eq!(m.coefficients(), &[0, 0, 3]);
        assert!(Polynomial::monomial(0, 5).is_zero());
    }

    #[test]
    fn coeff_out_of_range() {
        let p = poly(&[1, 2]);
        assert_eq!(p.coeff(0), 1);
        assert_eq!(p.coeff(1), 2);
        assert_eq!(p.coeff(100), 0);
    }

    #[test]
    fn add_basic() {
        assert_eq!(poly(&[1, 2, 3]) + poly(&[4, 5]), poly(&[5, 7, 3]));
    }

    #[test]
    fn add_different_degrees() {
        assert_eq!(poly(&[1]) + poly(&[0, 0, 0, 7]), poly(&[1, 0, 0, 7]));
    }

    #[test]
    fn add_cancellation() {
        let p = poly(&[1, 2, 3]) + poly(&[0, 0, -3]);
        assert_eq!(p.degree(), Some(1));
        assert!((poly(&[4, 5]) + poly(&[-4, -5])).is_zero());
    }

    #[test]
    fn add_by_reference() {
        let a = poly(&[1, 1]);
        let b = poly(&[2]);
        assert_eq!(&a + &b, poly(&[3, 1]));
    }

    #[test]
    fn neg_basic() {
        assert_eq!(-poly(&[1, -2, 3]), poly(&[-1, 2, -3]));
        assert!((-Polynomial::zero()).is_zero());
    }

    #[test]
    fn sub_basic() {
        assert_eq!(poly(&[5, 5, 5]) - poly(&[1, 2, 3]), poly(&[4, 3, 2]));
    }

    #[test]
    fn sub_leaves_negatives() {
        assert_eq!(poly(&[1]) - poly(&[3, 4]), poly(&[-2, -4]));
    }

    #[test]
    fn sub_self_is_zero() {
        let p = poly(&[3, 1, 4, 1, 5]);
        assert!((&p - &p).is_zero());
    }

    #[test]
    fn mul_by_x() {
        assert_eq!(poly(&[1, 2]) * Polynomial::x(), poly(&[0, 1, 2]));
    }

    #[test]
    fn mul_linear() {
        // (1 + x)(1 - x) = 1 - x^2
        assert_eq!(poly(&[1, 1]) * poly(&[1, -1]), poly(&[1, 0, -1]));
    }

    #[test]
    fn mul_unreduced_mixed_signs() {
        // 299x^3 + 3x + 2 times 5x - 4, no reduction
        let got = poly(&[2, 3, 0, 299]) * poly(&[-4, 5]);
        assert_eq!(got, poly(&[-8, -2, 15, -1196, 1495]));
    }

    #[test]
    fn mul_by_zero_poly() {
        assert!((poly(&[1, 2, 3]) * Polynomial::zero()).is_zero());
        assert!((Polynomial::zero() * poly(&[1, 2, 3])).is_zero());
    }

    #[test]
    fn mul_by_constant_is_scalar() {
        assert_eq!(poly(&[7]) * poly(&[1, 2, 3]), poly(&[7, 14, 21]));
        assert_eq!(poly(&[1, 2, 3]) * poly(&[-1]), poly(&[-1, -2, -3]));
    }

    #[test]
    fn mul_scalar_zero() {
        assert!(poly(&[9, 8, 7]).mul_scalar(0).is_zero());
        assert!((poly(&[9, 8, 7]) * 0).is_zero());
    }

    #[test]
    fn overflow_wraps_in_every_product_path() {
        let h = i64::MAX / 2;
        // general product and scalar product agree on wrapping
        assert_eq!(poly(&[h, 1]) * poly(&[4, 4]), poly(&[-4, 0, 4]));
        assert_eq!(poly(&[h, 1]).mul_scalar(4), poly(&[-4, 4]));
        assert_eq!(poly(&[h, 1]) * poly(&[4]), poly(&[-4, 4]));
    }

    #[test]
    fn overflow_wraps_in_add_sub_neg() {
        assert_eq!(poly(&[i64::MAX]) + poly(&[1]), poly(&[i64::MIN]));
        assert_eq!(poly(&[i64::MIN]) - poly(&[1]), poly(&[i64::MAX]));
        assert_eq!(-poly(&[i64::MIN]), poly(&[i64::MIN]));
    }

    #[test]
    fn mul_degree_sum() {
        let a = poly(&[1, 2, 3, 4]);
        let b = poly(&[5, 6, 7]);
        assert_eq!((a * b).degree(), Some(5));
    }

    #[test]
    fn mul_large_uses_transform_consistently() {
        let a: Vec<i64> = (0..130).map(|i| (i * 13 + 1) % 37).collect();
        let b: Vec<i64> = (0..90).map(|i| (i * 29 + 5) % 37).collect();
        let wide: Vec<i64> = Polynomial::convolve_wide(&a, &b)
            .into_iter()
            .map(|c| c as i64)
            .collect();
        assert_eq!(poly(&a) * poly(&b), Polynomial::new(wide));
    }

    #[test]
    fn mul_large_with_negatives_falls_back() {
        let a: Vec<i64> = (0..100).map(|i| if i % 2 == 0 { -i } else { i }).collect();
        let b: Vec<i64> = (0..100).map(|i| i % 5 - 2).collect();
        let wide: Vec<i64> = Polynomial::convolve_wide(&a, &b)
            .into_iter()
            .map(|c| c as i64)
            .collect();
        assert_eq!(poly(&a) * poly(&b), Polynomial::new(wide));
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", poly(&[1, 2, 1])), "1 + 2*x + x^2");
        assert_eq!(format!("{:?}", poly(&[0, 1, 0, 3])), "x + 3*x^3");
        assert_eq!(format!("{:?}", Polynomial::zero()), "0");
    }

    #[test]
    fn display_is_high_to_low() {
        assert_eq!(poly(&[4, 0, 1]).to_string(), "[1 0 4]");
        assert_eq!(Polynomial::zero().to_string(), "[]");
    }
}
