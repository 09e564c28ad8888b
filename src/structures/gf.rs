//! Field construction and dispatch over the two field variants.
//!
//! This module provides:
//! - The `Field` enum, a closed choice between GF(p) and GF(p^m)
//! - `Field::new`, the validating factory that picks the variant

use core::fmt;

use num_bigint::BigUint;
use tracing::{debug, warn};

use crate::algebra::field::FiniteField;
use crate::error::FieldError;
use crate::structures::extension::ExtensionField;
use crate::structures::poly::Polynomial;
use crate::structures::prime::PrimeField;
use crate::utils::mod_inverse;

/// A finite field: either GF(p) or GF(p^m).
///
/// # Example
///
/// ```
/// use polygf::{Field, FiniteField, Polynomial};
///
/// // m == 1 gives the prime field
/// let gf7 = Field::new(7, 1, Polynomial::zero(), false).unwrap();
/// assert_eq!(gf7.to_string(), "GF(7)");
///
/// // GF(2^3) with generator x^3 + x + 1
/// let gf8 = Field::new(2, 3, Polynomial::new(vec![1, 1, 0, 1]), false).unwrap();
/// let x = Polynomial::x();
/// let x2 = gf8.mul_polynomials(&x, &x);
/// assert_eq!(gf8.mul_polynomials(&x, &x2), Polynomial::new(vec![1, 1]));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    /// GF(p).
    Prime(PrimeField),
    /// GF(p^m), m >= 2.
    Extension(ExtensionField),
}

impl Field {
    /// Build a field from its characteristic, extension degree and generator.
    ///
    /// Checks run in this order:
    /// 1. `deg(generator) > m` fails with `FieldError::GeneratorDegree`.
    /// 2. `p < 2` or `m < 1` fails with `FieldError::InvalidParameters`.
    /// 3. `p > PrimeField::MAX_PRIME` fails with `FieldError::PrimeTooLarge`.
    ///
    /// The degree check uses the generator as given. For the variant choice
    /// the generator is first reduced mod p: `m == 1` or a reduced generator
    /// of degree below 1 gives a prime field, anything else an extension
    /// field. The generator's irreducibility is not checked.
    pub fn new(
        p: i64,
        m: i64,
        generator: Polynomial,
        log_errors: bool,
    ) -> Result<Self, FieldError> {
        Self::build(p, m, generator, log_errors).map_err(|err| {
            if log_errors {
                warn!(p, m, error = %err, "field construction failed");
            }
            err
        })
    }

    fn build(p: i64, m: i64, generator: Polynomial, log_errors: bool) -> Result<Self, FieldError> {
        if let Some(deg) = generator.degree() {
            if deg as i64 > m {
                return Err(FieldError::GeneratorDegree { max: m, got: deg });
            }
        }
        if p < 2 || m < 1 {
            return Err(FieldError::InvalidParameters { p, m });
        }

        let base = PrimeField::new(p, log_errors)?;
        let generator = base.normalize(&generator);
        if m == 1 || generator.degree().map_or(true, |d| d < 1) {
            debug!(p, "built prime field");
            return Ok(Field::Prime(base));
        }

        debug!(p, m, generator = %generator, "built extension field");
        Ok(Field::Extension(ExtensionField::new(
            base,
            m as usize,
            &generator,
        )))
    }

    /// Whether this is a prime field.
    pub fn is_prime_field(&self) -> bool {
        matches!(self, Field::Prime(_))
    }

    /// The underlying prime field (GF(p) itself, or the base of GF(p^m)).
    pub fn base(&self) -> &PrimeField {
        match self {
            Field::Prime(f) => f,
            Field::Extension(f) => f.base(),
        }
    }

    /// Number of elements, `p^m`.
    pub fn order(&self) -> BigUint {
        match self {
            Field::Prime(f) => BigUint::from(f.prime() as u64),
            Field::Extension(f) => f.order(),
        }
    }

    /// Multiplicative inverse.
    ///
    /// In GF(p) only nonzero constants are elements with an inverse; any
    /// other polynomial fails with `FieldError::NoInverse`.
    pub fn inverse(&self, poly: &Polynomial) -> Result<Polynomial, FieldError> {
        match self {
            Field::Prime(f) => {
                let reduced = f.normalize(poly);
                let value = match reduced.coefficients() {
                    [] => return Err(f.fail(FieldError::ZeroInverse)),
                    [c] => *c,
                    _ => reduced.leading_coeff().unwrap_or(0),
                };
                match mod_inverse(value, f.prime()) {
                    Some(inv) if reduced.is_constant() => Ok(Polynomial::constant(inv)),
                    _ => Err(f.fail(FieldError::NoInverse {
                        value,
                        modulus: f.prime(),
                    })),
                }
            }
            Field::Extension(f) => f.inverse(poly),
        }
    }
}

impl From<PrimeField> for Field {
    fn from(f: PrimeField) -> Self {
        Field::Prime(f)
    }
}

impl From<ExtensionField> for Field {
    fn from(f: ExtensionField) -> Self {
        Field::Extension(f)
    }
}

macro_rules! dispatch {
    ($self:ident, $f:ident => $body:expr) => {
        match $self {
            Field::Prime($f) => $body,
            Field::Extension($f) => $body,
        }
    };
}

impl FiniteField for Field {
    fn prime(&self) -> i64 {
        dispatch!(self, f => f.prime())
    }

    fn degree(&self) -> usize {
        dispatch!(self, f => f.degree())
    }

    fn irreducible(&self) -> Polynomial {
        dispatch!(self, f => f.irreducible())
    }

    fn normalize(&self, poly: &Polynomial) -> Polynomial {
        dispatch!(self, f => f.normalize(poly))
    }

    fn add_polynomials(&self, p1: &Polynomial, p2: &Polynomial) -> Polynomial {
        dispatch!(self, f => f.add_polynomials(p1, p2))
    }

    fn sub_polynomials(&self, p1: &Polynomial, p2: &Polynomial) -> Polynomial {
        dispatch!(self, f => f.sub_polynomials(p1, p2))
    }

    fn mul_polynomials(&self, p1: &Polynomial, p2: &Polynomial) -> Polynomial {
        dispatch!(self, f => f.mul_polynomials(p1, p2))
    }

    fn div_polynomials(
        &self,
        p1: &Polynomial,
        p2: &Polynomial,
    ) -> Result<(Polynomial, Polynomial), FieldError> {
        dispatch!(self, f => f.div_polynomials(p1, p2))
    }

    fn is_irreducible(&self, poly: &Polynomial) -> bool {
        dispatch!(self, f => f.is_irreducible(poly))
    }

    fn gcd(&self, p1: &Polynomial, p2: &Polynomial) -> Polynomial {
        dispatch!(self, f => f.gcd(p1, p2))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Prime(inner) => inner.fmt(f),
            Field::Extension(inner) => inner.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(c: &[i64]) -> Polynomial {
        Polynomial::new(c.to_vec())
    }

    #[test]
    fn m_one_gives_prime_field() {
        let f = Field::new(13, 1, poly(&[1, 1]), false).unwrap();
        assert!(f.is_prime_field());
        assert_eq!(f.prime(), 13);
        assert_eq!(f.degree(), 1);
        assert!(f.irreducible().is_zero());
        assert_eq!(f.to_string(), "GF(13)");
    }

    #[test]
    fn constant_generator_gives_prime_field() {
        let f = Field::new(13, 4, poly(&[5]), false).unwrap();
        assert!(f.is_prime_field());
        let f = Field::new(13, 4, Polynomial::zero(), false).unwrap();
        assert!(f.is_prime_field());
    }

    #[test]
    fn generator_vanishing_mod_p_gives_prime_field() {
        // x^2 + 7 is the constant 1 over GF(7)
        let f = Field::new(7, 2, poly(&[1, 0, 7]), false).unwrap();
        assert!(f.is_prime_field());
        assert_eq!(f.normalize(&poly(&[3, 5])), poly(&[3, 5]));

        let f = Field::new(7, 2, poly(&[0, 0, 14]), false).unwrap();
        assert!(f.is_prime_field());
    }

    #[test]
    fn generator_reduced_before_building_extension() {
        let f = Field::new(7, 2, poly(&[8, 0, 15]), false).unwrap();
        assert!(!f.is_prime_field());
        assert_eq!(f.irreducible(), poly(&[1, 0, 1]));
    }

    #[test]
    fn extension_field_built() {
        let f = Field::new(2, 3, poly(&[1, 1, 0, 1]), false).unwrap();
        assert!(!f.is_prime_field());
        assert_eq!(f.prime(), 2);
        assert_eq!(f.degree(), 3);
        assert_eq!(f.irreducible(), poly(&[1, 1, 0, 1]));
        assert_eq!(f.order(), BigUint::from(8u32));
        assert_eq!(f.to_string(), "GF(2^3) mod [1 0 1 1]");
    }

    #[test]
    fn generator_degree_too_high() {
        assert_eq!(
            Field::new(13, 2, poly(&[1, 1, 0, 1]), false),
            Err(FieldError::GeneratorDegree { max: 2, got: 3 })
        );
    }

    #[test]
    fn generator_degree_checked_first() {
        assert_eq!(
            Field::new(1, 0, poly(&[1, 1]), true),
            Err(FieldError::GeneratorDegree { max: 0, got: 1 })
        );
    }

    #[test]
    fn invalid_parameters() {
        assert_eq!(
            Field::new(1, 1, Polynomial::zero(), false),
            Err(FieldError::InvalidParameters { p: 1, m: 1 })
        );
        assert_eq!(
            Field::new(7, 0, Polynomial::zero(), false),
            Err(FieldError::InvalidParameters { p: 7, m: 0 })
        );
        assert_eq!(
            Field::new(-3, 2, poly(&[1, 0, 1]), false),
            Err(FieldError::InvalidParameters { p: -3, m: 2 })
        );
    }

    #[test]
    fn prime_too_large() {
        assert!(matches!(
            Field::new(1 << 40, 1, Polynomial::zero(), false),
            Err(FieldError::PrimeTooLarge { .. })
        ));
    }

    #[test]
    fn dispatch_arithmetic_prime() {
        let f = Field::new(7, 1, Polynomial::zero(), false).unwrap();
        assert_eq!(f.sub_polynomials(&poly(&[6, 5, 4]), &poly(&[3, 2, 1])), poly(&[3, 3, 3]));
        let (q, r) = f.div_polynomials(&poly(&[6, 0, 1, 3]), &poly(&[0, 1, 5])).unwrap();
        assert_eq!(q, poly(&[4, 2]));
        assert_eq!(r, poly(&[6, 3]));
        assert!(f.is_irreducible(&poly(&[1, 0, 1])));
    }

    #[test]
    fn dispatch_arithmetic_extension() {
        let f = Field::new(19, 3, poly(&[1, 0, 0, 1]), false).unwrap();
        let a = poly(&[5, 3, 7]);
        let (q, r) = f.div_polynomials(&poly(&[1]), &a).unwrap();
        assert!(q.is_zero());
        assert_eq!(r, poly(&[17, 16, 16]));
        assert_eq!(f.inverse(&a).unwrap(), r);
    }

    #[test]
    fn prime_inverse() {
        let f = Field::new(7, 1, Polynomial::zero(), false).unwrap();
        assert_eq!(f.inverse(&poly(&[3])).unwrap(), poly(&[5]));
        assert_eq!(f.inverse(&poly(&[-4])).unwrap(), poly(&[5]));
        assert_eq!(f.inverse(&poly(&[7])), Err(FieldError::ZeroInverse));
        assert!(matches!(
            f.inverse(&poly(&[1, 1])),
            Err(FieldError::NoInverse { .. })
        ));
    }

    #[test]
    fn from_variants() {
        let base = PrimeField::new(5, false).unwrap();
        assert_eq!(Field::from(base), Field::Prime(base));
        let ext = ExtensionField::new(base, 2, &poly(&[2, 0, 1]));
        assert_eq!(Field::from(ext.clone()).base(), &base);
        assert_eq!(Field::from(ext).order(), BigUint::from(25u32));
    }
}
