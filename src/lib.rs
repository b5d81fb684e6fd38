pub mod codon;
pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod optimizer;
pub mod scorer;
pub mod sequence;
// cmd and reports are binary modules (see main.rs).
