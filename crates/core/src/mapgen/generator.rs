//! Level generator entry point and the per-call working state it resets.

mod pipeline;

use std::collections::BTreeSet;

use crate::config::{GeneratorConfig, force_odd};
use crate::error::GeneratorError;
use crate::types::Pos;

use super::grid::TileGrid;
use super::model::{LevelDescriptor, Room};
use super::regions::RegionCounter;
use super::seed::{LevelRng, SeedInput, generate_runtime_seed};

pub const MAX_DIMENSION: usize = 4095;

/// Mutable bookkeeping for one `generate_level` call. Replaced wholesale at the start of
/// every call; only the random stream survives between levels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorState {
    pub(super) grid: TileGrid,
    pub(super) rooms: Vec<Room>,
    pub(super) regions: RegionCounter,
    pub(super) door_eligible: BTreeSet<Pos>,
}

impl GeneratorState {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid: TileGrid::new(width, height),
            rooms: Vec::new(),
            regions: RegionCounter::default(),
            door_eligible: BTreeSet::new(),
        }
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn region_count(&self) -> usize {
        self.regions.count()
    }

    /// Positions opened as connectors; only their edges may become doors.
    pub fn door_eligible(&self) -> &BTreeSet<Pos> {
        &self.door_eligible
    }
}

pub struct LevelGenerator {
    width: usize,
    height: usize,
    seed: SeedInput,
    rng: LevelRng,
    config: GeneratorConfig,
    state: GeneratorState,
}

impl LevelGenerator {
    pub fn new(
        width: usize,
        height: usize,
        seed: Option<SeedInput>,
    ) -> Result<Self, GeneratorError> {
        Self::with_config(width, height, seed, GeneratorConfig::default())
    }

    /// Even dimensions are bumped to the next odd value. Omitting the seed draws a runtime
    /// seed string that stays available through [`LevelGenerator::seed`].
    pub fn with_config(
        width: usize,
        height: usize,
        seed: Option<SeedInput>,
        config: GeneratorConfig,
    ) -> Result<Self, GeneratorError> {
        if width == 0 || height == 0 {
            return Err(GeneratorError::EmptyDimensions { width, height });
        }
        for value in [width, height] {
            if value > MAX_DIMENSION {
                return Err(GeneratorError::DimensionTooLarge { value, max: MAX_DIMENSION });
            }
        }
        config.validate()?;

        let width = force_odd(width);
        let height = force_odd(height);
        let seed = seed.unwrap_or_else(|| SeedInput::Text(generate_runtime_seed()));
        let rng = LevelRng::new(seed.clone());
        log::debug!("level generator {width}x{height} seeded with '{seed}'");

        Ok(Self { width, height, seed, rng, config, state: GeneratorState::new(width, height) })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn seed(&self) -> &SeedInput {
        &self.seed
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Working state left behind by the most recent `generate_level` call.
    pub fn state(&self) -> &GeneratorState {
        &self.state
    }

    /// Builds one level from the current position of the random stream. Calling this
    /// repeatedly on the same instance yields a seed-history-dependent sequence of floors.
    pub fn generate_level(&mut self, level_number: u32) -> LevelDescriptor {
        self.state = GeneratorState::new(self.width, self.height);
        pipeline::run(&mut self.state, &mut self.rng, &self.config, level_number)
    }
}
