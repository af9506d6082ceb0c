//! Procedural level generation split into one submodule per pipeline stage.

pub mod model;
pub mod validate;

mod connect;
mod generator;
mod grid;
mod layout;
mod maze;
mod regions;
mod seed;
mod stairs;
mod walls;
mod zones;

pub use generator::{GeneratorState, LevelGenerator, MAX_DIMENSION};
pub use grid::TileGrid;
pub use model::{
    ConnectivityReport, DoorProperties, LevelDescriptor, OpenMechanism, OverrideZone, Rect, Room,
    RoomKind, Special, StartResolution, Tile, TileKind, Wall, WallKind, Walls, ZoneKind,
};
pub use regions::{RegionCounter, RegionMerge};
pub use seed::{LevelRng, SeedInput, generate_runtime_seed};
pub use stairs::DEFAULT_START;

use crate::error::GeneratorError;

/// One-shot helper: a fresh generator per call, so the result depends only on the arguments.
pub fn generate_level(
    width: usize,
    height: usize,
    seed: impl Into<SeedInput>,
    level_number: u32,
) -> Result<LevelDescriptor, GeneratorError> {
    let mut generator = LevelGenerator::new(width, height, Some(seed.into()))?;
    Ok(generator.generate_level(level_number))
}
