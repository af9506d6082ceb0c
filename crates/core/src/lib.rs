pub mod config;
pub mod error;
pub mod mapgen;
pub mod types;

pub use config::{CountRange, EncounterRates, GeneratorConfig};
pub use error::GeneratorError;
pub use mapgen::{LevelDescriptor, LevelGenerator, SeedInput, generate_level};
pub use types::*;
