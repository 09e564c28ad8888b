pub mod algebra;
pub mod error;
pub mod generator;
pub mod structures;
pub mod utils;

pub use algebra::field::FiniteField;

pub use error::{FieldError, GeneratorError};
pub use generator::{generate_irreducible, GeneratorConfig, IrreducibleStream};
pub use structures::extension::ExtensionField;
pub use structures::gf::Field;
pub use structures::ntt;
pub use structures::poly::Polynomial;
pub use structures::prime::PrimeField;
pub use utils::mod_inverse;
