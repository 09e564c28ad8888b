//! Extension Fields
//!
//! This example demonstrates:
//! - Building GF(p) and GF(p^m) through `Field::new`
//! - Arithmetic modulo the generator
//! - Inversion and division in GF(p^m)
//! - Construction errors, logged when `log_errors` is set
//!
//! Run with: RUST_LOG=polygf=warn cargo run --example extension_fields

use polygf::{Field, FiniteField, Polynomial};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Extension Fields ===\n");

    gf8_table();
    gf37_inverse();
    construction_errors();
}

fn gf8_table() {
    println!("--- GF(2^3) ---\n");

    let f = Field::new(2, 3, Polynomial::new(vec![1, 1, 0, 1]), false).unwrap();
    println!("{}\n", f);

    let x = Polynomial::x();
    let mut power = Polynomial::constant(1);
    for i in 0..7 {
        println!("  x^{} = {:?}", i, power);
        power = f.mul_polynomials(&power, &x);
    }
    println!("  x^7 = {:?}  (x generates the multiplicative group)\n", power);
}

fn gf37_inverse() {
    println!("--- GF(37^8) ---\n");

    let generator = Polynomial::new(vec![23, 28, 26, 30, 22, 7, 9, 25, 1]);
    let f = Field::new(37, 8, generator, true).unwrap();
    println!("{}", f);
    println!("order = {}\n", f.order());

    let a = Polynomial::new(vec![2, 4, 10, 6, 18]);
    let inv = f.inverse(&a).unwrap();
    println!("a       = {}", a);
    println!("a^-1    = {}", inv);
    println!("a * a^-1 = {}\n", f.mul_polynomials(&a, &inv));

    let b = Polynomial::new(vec![1, 1]);
    let (_, quotient) = f.div_polynomials(&a, &b).unwrap();
    println!("a / (x + 1) = {}", quotient);
    println!("check: {}\n", f.mul_polynomials(&quotient, &b));

    if let Err(e) = f.inverse(&Polynomial::zero()) {
        println!("inverse of zero: {}\n", e);
    }
}

fn construction_errors() {
    println!("--- Construction Errors ---\n");

    let cases = [
        (13, 2, Polynomial::new(vec![1, 1, 0, 1])),
        (1, 3, Polynomial::zero()),
        (7, 0, Polynomial::zero()),
        (4_294_967_311, 1, Polynomial::zero()),
    ];

    for (p, m, generator) in cases {
        match Field::new(p, m, generator, true) {
            Ok(f) => println!("  built {}", f),
            Err(e) => println!("  p={}, m={}: {}", p, m, e),
        }
    }

    // m == 1 ignores the generator
    let f = Field::new(13, 1, Polynomial::new(vec![1, 1]), false).unwrap();
    println!("  p=13, m=1: {}", f);
}
