pub mod amortization;
pub mod combined;
