use core::fmt;

use crate::error::FieldError;
use crate::structures::poly::Polynomial;

/// Capability set shared by every finite field in this crate.
///
/// A field decides how raw kernel results are reduced: GF(p) folds each
/// coefficient into `[0, p)`, GF(p^m) additionally reduces modulo its
/// generator. Arithmetic methods run the field-agnostic kernel operation on
/// [`Polynomial`] and then [`normalize`](FiniteField::normalize) the result.
pub trait FiniteField: fmt::Display {
    /// The characteristic `p`.
    fn prime(&self) -> i64;

    /// Extension degree `m` (1 for a prime field).
    fn degree(&self) -> usize;

    /// The generator polynomial; the zero polynomial for a prime field.
    fn irreducible(&self) -> Polynomial;

    /// Reduce `poly` to its canonical representative in this field.
    fn normalize(&self, poly: &Polynomial) -> Polynomial;

    /// `p1 + p2`, reduced.
    fn add_polynomials(&self, p1: &Polynomial, p2: &Polynomial) -> Polynomial {
        self.normalize(&(p1 + p2))
    }

    /// `p1 - p2`, reduced.
    fn sub_polynomials(&self, p1: &Polynomial, p2: &Polynomial) -> Polynomial {
        self.normalize(&(p1 - p2))
    }

    /// `p1 * p2`, reduced.
    fn mul_polynomials(&self, p1: &Polynomial, p2: &Polynomial) -> Polynomial {
        self.normalize(&(p1 * p2))
    }

    /// Division returning `(quotient, remainder)`.
    ///
    /// Fails on a zero divisor or when a required inverse does not exist.
    fn div_polynomials(
        &self,
        p1: &Polynomial,
        p2: &Polynomial,
    ) -> Result<(Polynomial, Polynomial), FieldError>;

    /// Whether `poly` is irreducible over the prime subfield.
    fn is_irreducible(&self, poly: &Polynomial) -> bool;

    /// Greatest common divisor; not necessarily monic.
    fn gcd(&self, p1: &Polynomial, p2: &Polynomial) -> Polynomial;
}
