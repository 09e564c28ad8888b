pub mod extension;
pub mod gf;
pub mod ntt;
pub mod poly;
pub mod prime;
