//! Test-data generation for benchmarks and the CLI.

pub mod group_gen;
