//! Irreducible Polynomials
//!
//! This example demonstrates:
//! - Testing polynomials for irreducibility over GF(p)
//! - Searching the whole space of a given degree with worker threads
//! - Capping the number of results and cancelling a search
//!
//! Run with: RUST_LOG=polygf=debug cargo run --example irreducible_polys

use polygf::generator::{combination_count, generate_irreducible, GeneratorConfig};
use polygf::{FiniteField, Polynomial, PrimeField};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Irreducible Polynomials ===\n");

    irreducibility_tests();
    exhaustive_search();
    capped_search();
    cancelled_search();
}

fn irreducibility_tests() {
    println!("--- Irreducibility Tests ---\n");

    let gf17 = PrimeField::new(17, false).unwrap();

    // 3 is not a quadratic residue mod 17
    let irred = Polynomial::new(vec![14, 0, 1]);
    println!("f(x) = x^2 - 3 = {:?}", irred);
    println!("  is_irreducible over {}: {}\n", gf17, gf17.is_irreducible(&irred));

    let reducible = Polynomial::new(vec![13, 0, 1]);
    println!("g(x) = x^2 - 4 = {:?}", reducible);
    println!(
        "  is_irreducible over {}: {}  (factors as (x-2)(x+2))\n",
        gf17,
        gf17.is_irreducible(&reducible)
    );

    let gf3 = PrimeField::new(3, false).unwrap();
    let mut coeffs = vec![0i64; 101];
    coeffs[..6].copy_from_slice(&[2, 2, 0, 0, 1, 1]);
    coeffs[100] = 1;
    let big = Polynomial::new(coeffs);
    println!("x^100 + x^5 + x^4 + 2x + 2 over {}", gf3);
    println!("  is_irreducible: {}\n", gf3.is_irreducible(&big));
}

fn exhaustive_search() {
    println!("--- Exhaustive Search ---\n");

    let gf3 = PrimeField::new(3, false).unwrap();
    let length = 5;
    let total = combination_count(3, length).unwrap();
    println!("Scanning {} candidates of degree {} over {}", total, length - 1, gf3);

    let mut found: Vec<Polynomial> = generate_irreducible(&gf3, length, GeneratorConfig::default())
        .unwrap()
        .collect();
    found.sort_by(|a, b| a.coefficients().cmp(b.coefficients()));

    println!("Found {} monic irreducible quartics:", found.len());
    for p in &found {
        println!("  {}", p);
    }
    println!();
}

fn capped_search() {
    println!("--- Capped Search ---\n");

    let gf5 = PrimeField::new(5, false).unwrap();
    let config = GeneratorConfig::default().with_workers(4).with_limit(14);
    let found: Vec<_> = generate_irreducible(&gf5, 5, config).unwrap().collect();

    println!("Asked for at most 14 quartics over {}, got {}", gf5, found.len());
    for p in found.iter().take(3) {
        println!("  {:?}", p);
    }
    println!("  ...\n");
}

fn cancelled_search() {
    println!("--- Cancelled Search ---\n");

    let gf7 = PrimeField::new(7, false).unwrap();
    let mut stream = generate_irreducible(&gf7, 9, GeneratorConfig::default()).unwrap();

    let first: Vec<_> = stream.by_ref().take(5).collect();
    stream.cancel();
    let drained = stream.count();

    println!("Took {} degree-8 polynomials over {}:", first.len(), gf7);
    for p in &first {
        println!("  {}", p);
    }
    println!("{} more were already queued when the search stopped", drained);
}
