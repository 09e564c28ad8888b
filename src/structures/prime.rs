//! The prime field GF(p) acting on integer polynomials.

use core::fmt;

use num_bigint::BigUint;
use tracing::warn;

use crate::algebra::field::FiniteField;
use crate::error::FieldError;
use crate::structures::ntt;
use crate::structures::poly::Polynomial;
use crate::utils::mod_inverse;

/// Prime field GF(p).
///
/// Reduces polynomial coefficients into `[0, p)`. `p` is assumed prime and
/// is not checked; a composite modulus only shows up later as a missing
/// inverse during division.
///
/// # Example
///
/// ```
/// use polygf::{FiniteField, Polynomial, PrimeField};
///
/// let f = PrimeField::new(7, false).unwrap();
/// let a = Polynomial::new(vec![6, 5, 4]);
/// let b = Polynomial::new(vec![3, 2, 1]);
///
/// assert_eq!(f.sub_polynomials(&a, &b), Polynomial::new(vec![3, 3, 3]));
/// assert_eq!(f.to_string(), "GF(7)");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PrimeField {
    p: i64,
    log_errors: bool,
}

impl PrimeField {
    /// Largest supported characteristic.
    ///
    /// Keeps every product of two reduced coefficients inside `i64`.
    pub const MAX_PRIME: i64 = i32::MAX as i64;

    /// Create GF(p).
    ///
    /// With `log_errors` set, arithmetic failures are also reported as
    /// `tracing` warnings before being returned.
    ///
    /// # Errors
    ///
    /// `FieldError::InvalidParameters` if `p < 2`,
    /// `FieldError::PrimeTooLarge` if `p > MAX_PRIME`.
    pub fn new(p: i64, log_errors: bool) -> Result<Self, FieldError> {
        if p < 2 {
            return Err(FieldError::InvalidParameters { p, m: 1 });
        }
        if p > Self::MAX_PRIME {
            return Err(FieldError::PrimeTooLarge {
                p,
                max: Self::MAX_PRIME,
            });
        }
        Ok(Self { p, log_errors })
    }

    /// Whether failures are logged.
    pub fn log_errors(&self) -> bool {
        self.log_errors
    }

    /// Report an arithmetic failure and hand it back to the caller.
    pub(crate) fn fail(&self, err: FieldError) -> FieldError {
        if self.log_errors {
            warn!(field = %self, error = %err, "field arithmetic failed");
        }
        err
    }

    /// Remainder of `p1` divided by `p2`.
    pub fn rem(&self, p1: &Polynomial, p2: &Polynomial) -> Result<Polynomial, FieldError> {
        self.div_polynomials(p1, p2).map(|(_, r)| r)
    }

    /// Compute `base^exp mod modulus` by repeated squaring.
    ///
    /// `base` is reduced modulo `modulus` first and every intermediate
    /// product is reduced again.
    ///
    /// # Errors
    ///
    /// `FieldError::DivisionByZero` if `modulus` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use polygf::{Polynomial, PrimeField};
    ///
    /// let f = PrimeField::new(5, false).unwrap();
    /// let modulus = Polynomial::new(vec![2, 0, 1]); // x^2 + 2
    ///
    /// // x^2 ≡ -2 ≡ 3
    /// let r = f.pow_mod(&Polynomial::x(), 2, &modulus).unwrap();
    /// assert_eq!(r, Polynomial::constant(3));
    /// ```
    pub fn pow_mod(
        &self,
        base: &Polynomial,
        exp: u64,
        modulus: &Polynomial,
    ) -> Result<Polynomial, FieldError> {
        self.pow_mod_big(base, &BigUint::from(exp), modulus)
    }

    /// [`pow_mod`](Self::pow_mod) with an arbitrary-size exponent.
    pub fn pow_mod_big(
        &self,
        base: &Polynomial,
        exp: &BigUint,
        modulus: &Polynomial,
    ) -> Result<Polynomial, FieldError> {
        let mut result = self.rem(&Polynomial::constant(1), modulus)?;
        let mut current = self.rem(base, modulus)?;

        let bits = exp.bits();
        for i in 0..bits {
            if exp.bit(i) {
                result = self.rem(&self.mul_polynomials(&result, &current), modulus)?;
            }
            if i + 1 < bits {
                current = self.rem(&self.mul_polynomials(&current, &current), modulus)?;
            }
        }

        Ok(result)
    }

    /// Scale `poly` so that its leading coefficient is 1.
    ///
    /// Returns `None` for the zero polynomial.
    pub fn monic(&self, poly: &Polynomial) -> Option<Polynomial> {
        let reduced = self.normalize(poly);
        let lc = reduced.leading_coeff()?;
        let inv = mod_inverse(lc, self.p)?;
        Some(self.normalize(&reduced.mul_scalar(inv)))
    }

    /// Evaluate `poly` at `x` using Horner's method, result in `[0, p)`.
    pub fn evaluate(&self, poly: &Polynomial, x: i64) -> i64 {
        let p = self.p as i128;
        let x = (x as i128).rem_euclid(p);
        poly.coefficients()
            .iter()
            .rev()
            .fold(0i128, |acc, &c| (acc * x + c as i128).rem_euclid(p)) as i64
    }

    /// Generate a random monic irreducible polynomial of the given degree.
    ///
    /// Uses rejection sampling over monic candidates.
    ///
    /// # Panics
    ///
    /// Panics if degree is 0.
    #[cfg(feature = "rand")]
    pub fn random_irreducible<R: rand::Rng>(&self, rng: &mut R, degree: usize) -> Polynomial {
        assert!(degree > 0, "degree must be positive");

        loop {
            let mut coeffs = Vec::with_capacity(degree + 1);
            for _ in 0..degree {
                coeffs.push(rng.gen_range(0..self.p));
            }
            coeffs.push(1);

            let f = Polynomial::new(coeffs);
            if self.is_irreducible(&f) {
                return f;
            }
        }
    }
}

impl FiniteField for PrimeField {
    fn prime(&self) -> i64 {
        self.p
    }

    fn degree(&self) -> usize {
        1
    }

    fn irreducible(&self) -> Polynomial {
        Polynomial::zero()
    }

    fn normalize(&self, poly: &Polynomial) -> Polynomial {
        let p = self.p;
        poly.map_coeffs(|c| c.rem_euclid(p))
    }

    /// Product with both operands reduced first; sums accumulate in `i128`.
    fn mul_polynomials(&self, p1: &Polynomial, p2: &Polynomial) -> Polynomial {
        let a = self.normalize(p1);
        let b = self.normalize(p2);
        if a.is_zero() || b.is_zero() {
            return Polynomial::zero();
        }

        if a.len().min(b.len()) >= ntt::NTT_THRESHOLD {
            if let Some(coeffs) = ntt::convolve(a.coefficients(), b.coefficients()) {
                return self.normalize(&Polynomial::new(coeffs));
            }
        }

        let p = self.p as i128;
        Polynomial::new(
            Polynomial::convolve_wide(a.coefficients(), b.coefficients())
                .into_iter()
                .map(|c| c.rem_euclid(p) as i64)
                .collect(),
        )
    }

    /// Euclidean division: returns `(q, r)` with `p1 = q * p2 + r` and
    /// `deg(r) < deg(p2)`.
    ///
    /// # Example
    ///
    /// ```
    /// use polygf::{FiniteField, Polynomial, PrimeField};
    ///
    /// let f = PrimeField::new(5, false).unwrap();
    ///
    /// // (x^2 + 2x + 1) / (x + 1) = (x + 1), remainder 0
    /// let dividend = Polynomial::new(vec![1, 2, 1]);
    /// let divisor = Polynomial::new(vec![1, 1]);
    /// let (q, r) = f.div_polynomials(&dividend, &divisor).unwrap();
    ///
    /// assert_eq!(q, divisor);
    /// assert!(r.is_zero());
    /// ```
    fn div_polynomials(
        &self,
        p1: &Polynomial,
        p2: &Polynomial,
    ) -> Result<(Polynomial, Polynomial), FieldError> {
        let divisor = self.normalize(p2);
        let divisor_deg = match divisor.degree() {
            Some(d) => d,
            None => return Err(self.fail(FieldError::DivisionByZero)),
        };

        let dividend = self.normalize(p1);
        match dividend.degree() {
            None => return Ok((Polynomial::zero(), Polynomial::zero())),
            Some(d) if d < divisor_deg => return Ok((Polynomial::zero(), dividend)),
            _ => {}
        }

        let lc = divisor.coeff(divisor_deg);
        let lc_inv = mod_inverse(lc, self.p).ok_or_else(|| {
            self.fail(FieldError::NoInverse {
                value: lc,
                modulus: self.p,
            })
        })?;

        let p = self.p;
        let d = divisor.coefficients();
        let mut remainder = dividend.into_coefficients();
        let mut quotient = vec![0i64; remainder.len() - d.len() + 1];

        while remainder.len() >= d.len() {
            let lead = *remainder.last().unwrap_or(&0);
            let coeff = lead * lc_inv % p;
            let shift = remainder.len() - d.len();
            quotient[shift] = coeff;

            // remainder -= coeff * x^shift * divisor
            for (i, &dc) in d.iter().enumerate() {
                remainder[i + shift] = (remainder[i + shift] - coeff * dc).rem_euclid(p);
            }
            while remainder.last() == Some(&0) {
                remainder.pop();
            }
        }

        Ok((Polynomial::new(quotient), Polynomial::new(remainder)))
    }

    /// Ben-Or irreducibility test.
    ///
    /// `f` of degree `n` is irreducible iff `gcd(f, x^(p^i) - x) = 1` for
    /// every `i` in `1..=n/2`. `x^(p^i)` is built by raising the previous
    /// power to `p`, so `p^i` itself is never formed.
    ///
    /// # Example
    ///
    /// ```
    /// use polygf::{FiniteField, Polynomial, PrimeField};
    ///
    /// let f = PrimeField::new(17, false).unwrap();
    ///
    /// // x^2 - 3 is irreducible over GF(17)
    /// assert!(f.is_irreducible(&Polynomial::new(vec![14, 0, 1])));
    /// // x^2 - 4 = (x - 2)(x + 2)
    /// assert!(!f.is_irreducible(&Polynomial::new(vec![13, 0, 1])));
    /// ```
    fn is_irreducible(&self, poly: &Polynomial) -> bool {
        let f = self.normalize(poly);
        let n = match f.degree() {
            None | Some(0) => return false,
            Some(1) => return true,
            Some(d) => d,
        };

        // root at 0
        if f.coeff(0) == 0 {
            return false;
        }

        let x = Polynomial::x();
        let mut t = x.clone();
        for _ in 1..=n / 2 {
            t = match self.pow_mod(&t, self.p as u64, &f) {
                Ok(r) => r,
                Err(_) => return false,
            };

            let g = self.gcd(&f, &self.sub_polynomials(&t, &x));
            if g.degree().is_some_and(|d| d > 0) {
                return false;
            }
        }

        true
    }

    fn gcd(&self, p1: &Polynomial, p2: &Polynomial) -> Polynomial {
        let mut a = self.normalize(p1);
        let mut b = self.normalize(p2);

        while !b.is_zero() {
            let r = match self.rem(&a, &b) {
                Ok(r) => r,
                Err(_) => break,
            };
            a = b;
            b = r;
        }

        a
    }
}

impl fmt::Display for PrimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GF({})", self.p)
    }
}
