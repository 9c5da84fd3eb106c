pub mod client;
pub mod generator;
pub mod runner;

pub use client::SensorClient;
pub use generator::{GeneratorConfig, SensorState};
pub use runner::{RunSummary, SimulatorConfig, run_simulator};
