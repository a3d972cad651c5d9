//! Benchmark utilities for Rusty Bus.
//!
//! - **Microbenchmarks** (`benches/bus_micro.rs`): subscribe, publish and reclaim in
//!   isolation, across registry sizes.
//! - **Scenario benchmarks** (`benches/bus_scenarios.rs`): game-like churn where owners
//!   spawn and despawn subscribers between publishes.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p rusty_bench
//!
//! # Run specific benchmark group
//! cargo bench -p rusty_bench -- publish
//! ```
//!
//! Results are written to `target/criterion/` with HTML reports.

pub mod churn;
pub mod subscribers;
