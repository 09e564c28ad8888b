//! Error types for field construction, field arithmetic and the
//! irreducible-polynomial search.

use thiserror::Error;

/// Errors raised while building a field or doing arithmetic in one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// `p < 2` or `m < 1`.
    #[error("invalid values of the numbers p={p} < 2 or m={m} < 1")]
    InvalidParameters { p: i64, m: i64 },

    /// The generator has a larger degree than the extension.
    #[error("the degree of the generator must be lower than or equal to {max}, got {got}")]
    GeneratorDegree { max: i64, got: usize },

    /// The characteristic is too large for exact `i64` coefficient products.
    #[error("prime {p} exceeds the supported maximum {max}")]
    PrimeTooLarge { p: i64, max: i64 },

    /// Division by the zero polynomial.
    #[error("division by zero is not supported")]
    DivisionByZero,

    /// A scalar has no inverse modulo the characteristic.
    #[error("{value} has no inverse modulo {modulus}")]
    NoInverse { value: i64, modulus: i64 },

    /// The zero element of an extension field has no inverse.
    #[error("polynomial cannot be zero")]
    ZeroInverse,
}

/// Errors reported by [`generate_irreducible`](crate::generator::generate_irreducible)
/// before any worker starts.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Prime or length was negative.
    #[error("prime and length must be non-negative (prime={prime}, length={length})")]
    Negative { prime: i64, length: i64 },

    /// `0^0` combinations are undefined.
    #[error("cannot enumerate combinations for prime=0 and length=0")]
    UndefinedCombinations,

    /// `prime^length` does not fit in a `u64` index.
    #[error("the value of {prime}^{length} is too large for processing")]
    TooLarge { prime: u64, length: usize },

    /// A digit decode was requested with a non-positive base or width.
    #[error("invalid combination request: prime={prime}, length={length}")]
    InvalidCombination { prime: u64, length: usize },

    /// The OS refused to start a worker thread.
    #[error("failed to spawn worker thread: {0}")]
    WorkerSpawn(#[from] std::io::Error),
}
