//! The extension field GF(p^m), elements taken modulo a generator polynomial.

use core::fmt;

use num_bigint::BigUint;
use num_traits::CheckedSub;

use crate::algebra::field::FiniteField;
use crate::error::FieldError;
use crate::structures::poly::Polynomial;
use crate::structures::prime::PrimeField;

/// Extension field GF(p^m).
///
/// Elements are polynomials over GF(p) reduced modulo `generator`, a
/// polynomial of degree `m`. The generator is assumed irreducible; this is
/// not verified, so a reducible generator yields a ring in which some
/// inverses are wrong rather than an error.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExtensionField {
    base: PrimeField,
    m: usize,
    generator: Polynomial,
}

impl ExtensionField {
    /// Build GF(p^m) over `base` with the given generator.
    ///
    /// The generator is reduced modulo p. Callers normally go through
    /// [`Field::new`](crate::Field::new), which validates the parameters.
    pub fn new(base: PrimeField, m: usize, generator: &Polynomial) -> Self {
        Self {
            generator: base.normalize(generator),
            base,
            m,
        }
    }

    /// The prime field used for coefficient reduction.
    pub fn base(&self) -> &PrimeField {
        &self.base
    }

    /// The generator polynomial.
    pub fn generator(&self) -> &Polynomial {
        &self.generator
    }

    /// Field order `p^deg(generator)`.
    pub fn order(&self) -> BigUint {
        let deg = self.generator.degree().unwrap_or(0) as u32;
        BigUint::from(self.base.prime() as u64).pow(deg)
    }

    /// Multiplicative inverse of `poly`.
    ///
    /// Computed as `poly^(q-2) mod generator` with `q` the field order.
    ///
    /// # Errors
    ///
    /// `FieldError::ZeroInverse` if `poly` reduces to zero.
    ///
    /// # Example
    ///
    /// ```
    /// use polygf::{ExtensionField, FiniteField, Polynomial, PrimeField};
    ///
    /// let gf19 = PrimeField::new(19, false).unwrap();
    /// let ext = ExtensionField::new(gf19, 3, &Polynomial::new(vec![1, 0, 0, 1]));
    ///
    /// let a = Polynomial::new(vec![5, 3, 7]);
    /// let inv = ext.inverse(&a).unwrap();
    /// assert_eq!(inv, Polynomial::new(vec![17, 16, 16]));
    /// assert_eq!(ext.mul_polynomials(&a, &inv), Polynomial::constant(1));
    /// ```
    pub fn inverse(&self, poly: &Polynomial) -> Result<Polynomial, FieldError> {
        let reduced = self.normalize(poly);
        if reduced.is_zero() {
            return Err(self.base.fail(FieldError::ZeroInverse));
        }

        let exp = self
            .order()
            .checked_sub(&BigUint::from(2u32))
            .unwrap_or_default();
        self.base.pow_mod_big(&reduced, &exp, &self.generator)
    }

    /// `p1 / p2` in the field, i.e. `p1 * inverse(p2)`.
    pub fn divide(&self, p1: &Polynomial, p2: &Polynomial) -> Result<Polynomial, FieldError> {
        let inv = self.inverse(p2)?;
        Ok(self.mul_polynomials(p1, &inv))
    }

    /// Raise an element to a power, reduced modulo the generator.
    pub fn pow(&self, poly: &Polynomial, exp: &BigUint) -> Result<Polynomial, FieldError> {
        self.base.pow_mod_big(poly, exp, &self.generator)
    }
}

impl FiniteField for ExtensionField {
    fn prime(&self) -> i64 {
        self.base.prime()
    }

    fn degree(&self) -> usize {
        self.m
    }

    fn irreducible(&self) -> Polynomial {
        self.generator.clone()
    }

    fn normalize(&self, poly: &Polynomial) -> Polynomial {
        // a zero generator leaves only coefficient reduction
        match self.base.rem(poly, &self.generator) {
            Ok(r) => r,
            Err(_) => self.base.normalize(poly),
        }
    }

    fn mul_polynomials(&self, p1: &Polynomial, p2: &Polynomial) -> Polynomial {
        self.normalize(&self.base.mul_polynomials(p1, p2))
    }

    /// Division in the field.
    ///
    /// The quotient slot is always zero; the second element holds
    /// `p1 * inverse(p2)`. See [`divide`](ExtensionField::divide).
    fn div_polynomials(
        &self,
        p1: &Polynomial,
        p2: &Polynomial,
    ) -> Result<(Polynomial, Polynomial), FieldError> {
        let product = self.divide(p1, p2)?;
        Ok((Polynomial::zero(), product))
    }

    fn is_irreducible(&self, poly: &Polynomial) -> bool {
        self.base.is_irreducible(poly)
    }

    fn gcd(&self, p1: &Polynomial, p2: &Polynomial) -> Polynomial {
        self.base.gcd(p1, p2)
    }
}

impl fmt::Display for ExtensionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GF({}^{}) mod {}",
            self.base.prime(),
            self.m,
            self.generator
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(c: &[i64]) -> Polynomial {
        Polynomial::new(c.to_vec())
    }

    fn ext(p: i64, generator: &[i64]) -> ExtensionField {
        let base = PrimeField::new(p, false).unwrap();
        ExtensionField::new(base, generator.len() - 1, &poly(generator))
    }

    #[test]
    fn accessors() {
        let f = ext(2, &[1, 1, 0, 1]);
        assert_eq!(f.prime(), 2);
        assert_eq!(f.degree(), 3);
        assert_eq!(f.irreducible(), poly(&[1, 1, 0, 1]));
        assert_eq!(f.order(), BigUint::from(8u32));
    }

    #[test]
    fn display() {
        let f = ext(2, &[1, 1, 0, 1]);
        assert_eq!(f.to_string(), "GF(2^3) mod [1 0 1 1]");
    }

    #[test]
    fn normalize_reduces_mod_generator() {
        // x^3 ≡ x + 1 mod x^3 + x + 1 over GF(2)
        let f = ext(2, &[1, 1, 0, 1]);
        assert_eq!(f.normalize(&poly(&[0, 0, 0, 1])), poly(&[1, 1]));
        assert_eq!(f.normalize(&poly(&[3, -1])), poly(&[1, 1]));
    }

    #[test]
    fn add_sub() {
        let f = ext(5, &[2, 0, 1]);
        assert_eq!(f.add_polynomials(&poly(&[4, 3]), &poly(&[2, 2])), poly(&[1]));
        assert_eq!(f.sub_polynomials(&poly(&[1]), &poly(&[2, 1])), poly(&[4, 4]));
    }

    #[test]
    fn mul_wraps_around_generator() {
        // in GF(2^3): x * x^2 = x^3 = x + 1
        let f = ext(2, &[1, 1, 0, 1]);
        assert_eq!(f.mul_polynomials(&poly(&[0, 1]), &poly(&[0, 0, 1])), poly(&[1, 1]));
    }

    #[test]
    fn inverse_gf19() {
        let f = ext(19, &[1, 0, 0, 1]);
        let a = poly(&[5, 3, 7]);
        let inv = f.inverse(&a).unwrap();
        assert_eq!(inv, poly(&[17, 16, 16]));
        assert_eq!(f.mul_polynomials(&a, &inv), poly(&[1]));
    }

    #[test]
    fn inverse_constant() {
        let f = ext(11, &[1, 1, 0, 1]);
        assert_eq!(f.inverse(&poly(&[3])).unwrap(), poly(&[4]));
    }

    #[test]
    fn inverse_of_one() {
        let f = ext(17, &[1, 0, 1, 1]);
        assert_eq!(f.inverse(&poly(&[1, 0, 0])).unwrap(), poly(&[1]));
    }

    #[test]
    fn inverse_of_zero_fails() {
        let f = ext(7, &[1, 0, 1]);
        assert_eq!(f.inverse(&Polynomial::zero()), Err(FieldError::ZeroInverse));
    }

    #[test]
    fn inverse_of_generator_fails() {
        let f = ext(13, &[1, 1, 0, 0, 1]);
        assert_eq!(
            f.inverse(&poly(&[1, 1, 0, 0, 1])),
            Err(FieldError::ZeroInverse)
        );
    }

    #[test]
    fn inverse_every_element_gf8() {
        let f = ext(2, &[1, 1, 0, 1]);
        for bits in 1..8i64 {
            let a = poly(&[bits & 1, (bits >> 1) & 1, (bits >> 2) & 1]);
            let inv = f.inverse(&a).unwrap();
            assert_eq!(f.mul_polynomials(&a, &inv), poly(&[1]), "a = {a}");
        }
    }

    #[test]
    fn div_polynomials_shape() {
        let f = ext(19, &[1, 0, 0, 1]);
        let a = poly(&[5, 3, 7]);
        let (q, r) = f.div_polynomials(&a, &a).unwrap();
        assert!(q.is_zero());
        assert_eq!(r, poly(&[1]));
    }

    #[test]
    fn divide_then_multiply() {
        let f = ext(7, &[1, 0, 1]);
        let a = poly(&[3, 5]);
        let b = poly(&[2, 6]);
        let c = f.divide(&a, &b).unwrap();
        assert_eq!(f.mul_polynomials(&c, &b), a);
    }

    #[test]
    fn divide_by_zero_fails() {
        let f = ext(7, &[1, 0, 1]);
        assert_eq!(
            f.div_polynomials(&poly(&[1]), &poly(&[7])),
            Err(FieldError::ZeroInverse)
        );
    }

    #[test]
    fn pow_matches_repeated_mul() {
        let f = ext(3, &[2, 2, 1]);
        let a = poly(&[1, 2]);
        let mut acc = poly(&[1]);
        for _ in 0..5 {
            acc = f.mul_polynomials(&acc, &a);
        }
        assert_eq!(f.pow(&a, &BigUint::from(5u32)).unwrap(), acc);
        // multiplicative group has order 8
        assert_eq!(f.pow(&a, &BigUint::from(8u32)).unwrap(), poly(&[1]));
    }

    #[test]
    fn gcd_and_irreducible_delegate() {
        let f = ext(11, &[1, 1, 0, 1]);
        assert_eq!(
            f.gcd(&poly(&[7, 3, 5, 8, 7, 8]), &poly(&[4, 0, 5, 3, 3, 9, 6])),
            poly(&[7, 0, 10])
        );
        assert!(!f.is_irreducible(&poly(&[6, 6, 4, 0, 1, 5, 1])));
    }
}
