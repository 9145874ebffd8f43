pub mod export;
pub mod simulation;

pub use export::SnapshotExporter;
pub use simulation::{RngSource, ScriptedSource, SimulatedFeed};
