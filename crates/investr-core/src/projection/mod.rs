pub mod cagr;
pub mod growth;
pub mod net_worth;
